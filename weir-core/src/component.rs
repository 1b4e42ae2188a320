//! # Components
//!
//! A component is a registry-backed object whose methods can be targeted by
//! name from a route declaration (`"controllers.users#show"`). Method lookup
//! is explicit: a component publishes its method table instead of being
//! probed at call time.
//!
//! Implement [`Component`] by hand, build one at runtime with
//! [`MethodTable`], or use the `#[component]` attribute from `weir-macros`.

use crate::{
    error::BoxError,
    extract::Args,
    handler::Callable,
    value::Value,
};
use std::{collections::BTreeMap, sync::Arc};

/// An object exposing methods that can be invoked by name.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a weir component",
    label = "missing `Component` implementation",
    note = "Annotate the impl block with `#[weir::component]` or implement `Component` by hand."
)]
pub trait Component: Send + Sync + 'static {
    /// Name used in diagnostics. Defaults to the type name.
    fn component_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Names of the methods that can be invoked.
    fn method_names(&self) -> Vec<&str>;

    /// Returns `true` if `method` can be invoked on this component.
    fn responds_to(&self, method: &str) -> bool {
        self.method_names().contains(&method)
    }

    /// Invoke `method` with positional arguments.
    fn invoke(&self, method: &str, args: Args) -> Result<Value, BoxError>;
}

/// Bind `method` of `component` into a callable.
///
/// Returns `None` if the component does not respond to `method`; the lookup
/// happens here, before anything is invoked.
pub fn bind(component: &Arc<dyn Component>, method: &str) -> Option<Callable> {
    if !component.responds_to(method) {
        return None;
    }
    let name = format!("{}#{}", component.component_name(), method);
    let component = Arc::clone(component);
    let method = method.to_owned();
    Some(Callable::new(move |args| component.invoke(&method, args)).named(name))
}

/// A component assembled at runtime from named callables.
///
/// # Example
///
/// ```rust,ignore
/// let users = MethodTable::new("users")
///     .method("index", Callable::from_fn(move || repo.all()))
///     .method("show", Callable::from_fn(move |id: u64| repo.find(id)));
/// registry.register("controllers.users", Value::component(users));
/// ```
#[derive(Debug, Clone)]
pub struct MethodTable {
    name: &'static str,
    methods: BTreeMap<String, Callable>,
}

impl MethodTable {
    /// Create an empty table.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            methods: BTreeMap::new(),
        }
    }

    /// Add (or replace) a method.
    pub fn method(mut self, name: impl Into<String>, callable: Callable) -> Self {
        self.methods.insert(name.into(), callable);
        self
    }
}

impl Component for MethodTable {
    fn component_name(&self) -> &'static str {
        self.name
    }

    fn method_names(&self) -> Vec<&str> {
        self.methods.keys().map(String::as_str).collect()
    }

    fn responds_to(&self, method: &str) -> bool {
        self.methods.contains_key(method)
    }

    fn invoke(&self, method: &str, args: Args) -> Result<Value, BoxError> {
        match self.methods.get(method) {
            Some(callable) => callable.call(args),
            None => Err(format!("`{}` has no method `{}`", self.name, method).into()),
        }
    }
}
