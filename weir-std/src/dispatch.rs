//! # Dispatcher
//!
//! Turns a merged option set and the captures of a matched branch into a
//! call. Options are processed in a fixed order:
//!
//! 1. **Target**: a named target is parsed and its key looked up. Malformed
//!    or unknown targets fail here, before any injection runs.
//! 2. **Injection**: every [`Inject`] is evaluated (literal, registry key,
//!    or function of the captures).
//! 3. **Construction**: the target is built, through the factory with the
//!    injected values when injections are present. A `key#method` target
//!    then binds the method on the constructed component.
//! 4. **Arguments**: captures followed by the `call_with` values.
//! 5. **Invocation**: the bound callable is called once.
//!
//! Method lookup follows injection because the constructed component is
//! what holds the method.

use crate::registry::Registry;
use weir_core::{
    Args, Callable, ConfigurationError, DispatchError, Inject, RegistryError, RouteOptions, Target,
    TargetRef, Value, bind,
};

/// Resolves and invokes route targets against a registry.
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher<'a> {
    registry: &'a Registry,
}

impl<'a> Dispatcher<'a> {
    /// Create a dispatcher over `registry`.
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    /// Resolve the target of `options`, call it with the assembled arguments,
    /// and return its result.
    pub fn dispatch(&self, options: &RouteOptions, captures: &[String]) -> Result<Value, DispatchError> {
        let target = options.target().ok_or(ConfigurationError::MissingTarget)?;
        let located = self.locate(target)?;

        let injected = options
            .injections()
            .map(|items| self.evaluate(items, captures))
            .transpose()?;

        let callable = self.construct(target, located, injected)?;
        let args = assemble(captures, options.extra_args());

        #[cfg(feature = "tracing")]
        tracing::debug!(%target, callable = callable.name(), args = args.len(), "invoking target");

        callable.call(args).map_err(DispatchError::Handler)
    }

    /// Evaluate injections in order.
    pub fn evaluate(&self, items: &[Inject], captures: &[String]) -> Result<Args, DispatchError> {
        items
            .iter()
            .map(|item| -> Result<Value, DispatchError> {
                match item {
                    Inject::Literal(value) => Ok(value.clone()),
                    Inject::Key(key) => Ok(self.registry.resolve(key)?),
                    Inject::Capture(f) => Ok(f(captures)),
                }
            })
            .collect()
    }

    /// Resolve `target` to a bound callable.
    pub fn resolve_target(
        &self,
        target: &Target,
        injected: Option<Args>,
    ) -> Result<Callable, DispatchError> {
        let located = self.locate(target)?;
        self.construct(target, located, injected)
    }

    /// Parse a named target and check that its key is registered.
    fn locate<'t>(&self, target: &'t Target) -> Result<Located<'t>, DispatchError> {
        match target {
            Target::Callable(callable) => Ok(Located::Direct(callable)),
            Target::Named(name) => {
                let reference = TargetRef::parse(name)?;
                if !self.registry.contains(reference.key()) {
                    return Err(RegistryError::UnknownKey(reference.key().to_owned()).into());
                }
                Ok(Located::Named(reference))
            }
        }
    }

    fn construct(
        &self,
        target: &Target,
        located: Located<'_>,
        injected: Option<Args>,
    ) -> Result<Callable, DispatchError> {
        match located {
            Located::Direct(callable) => match injected {
                // A callable target with injections acts as its own factory.
                Some(args) => {
                    let built = callable.call(args).map_err(DispatchError::Handler)?;
                    expect_callable(&built, target)
                }
                None => Ok(callable.clone()),
            },
            Located::Named(reference) => {
                let resolved = match injected {
                    Some(args) => {
                        #[cfg(feature = "tracing")]
                        tracing::debug!(key = reference.key(), injected = args.len(), "resolving with injections");
                        self.registry.resolve_with(reference.key(), args)?
                    }
                    None => self.registry.resolve(reference.key())?,
                };

                match &reference {
                    TargetRef::Key(_) => expect_callable(&resolved, target),
                    TargetRef::Method { method, .. } => bind_method(&resolved, method),
                }
            }
        }
    }
}

/// A target whose key is known to be registered.
enum Located<'t> {
    Direct(&'t Callable),
    Named(TargetRef),
}

/// Captures followed by the `call_with` values.
pub fn assemble(captures: &[String], extra: Option<&[Value]>) -> Args {
    captures
        .iter()
        .cloned()
        .map(Value::new)
        .chain(extra.into_iter().flatten().cloned())
        .collect()
}

fn expect_callable(value: &Value, target: &Target) -> Result<Callable, DispatchError> {
    value
        .as_callable()
        .cloned()
        .ok_or_else(|| DispatchError::NotCallable {
            target: target.to_string(),
            found: value.type_name(),
        })
}

fn bind_method(value: &Value, method: &str) -> Result<Callable, DispatchError> {
    let not_found = || DispatchError::MethodNotFound {
        component: value.type_name().to_owned(),
        method: method.to_owned(),
    };
    let component = value.as_component().ok_or_else(not_found)?;
    bind(component, method).ok_or_else(not_found)
}
