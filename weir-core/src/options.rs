//! # Route Options
//!
//! A route declares *what* to call as data: a [`Target`], values to
//! [`inject`](RouteOptions::inject) into the target's factory, and extra
//! arguments to [`call_with`](RouteOptions::call_with) after the path captures.
//!
//! Options cascade: a branch's options are overlaid on the defaults that are
//! active where it is declared. Any option can be explicitly cancelled with
//! [`Setting::Cancel`], which removes it from the merged view instead of
//! passing a falsy value along.

use crate::{
    error::ConfigurationError,
    handler::Callable,
    value::{IntoValue, Value},
};
use std::{fmt, sync::Arc};

/// A declared option value, or an explicit cancellation of an inherited one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Setting<T> {
    /// Use this value.
    Set(T),
    /// Remove the inherited value entirely.
    Cancel,
}

impl<T> Setting<T> {
    /// The value, unless this is a cancellation.
    pub fn as_set(&self) -> Option<&T> {
        match self {
            Setting::Set(value) => Some(value),
            Setting::Cancel => None,
        }
    }
}

/// What a matched route invokes.
#[derive(Clone)]
pub enum Target {
    /// Invoke this callable directly.
    Callable(Callable),
    /// A registry reference, `"key"` or `"key#method"`, parsed at dispatch time.
    Named(String),
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Callable(callable) => f.debug_tuple("Callable").field(&callable.name()).finish(),
            Target::Named(name) => f.debug_tuple("Named").field(name).finish(),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Callable(callable) => f.write_str(callable.name()),
            Target::Named(name) => f.write_str(name),
        }
    }
}

/// A parsed registry reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetRef {
    /// Resolve the key to a directly invocable value.
    Key(String),
    /// Resolve the key to a component, then bind `method` on it.
    Method {
        /// Registry key of the component.
        key: String,
        /// Method to bind on the resolved component.
        method: String,
    },
}

impl TargetRef {
    /// Parse `"key"` or `"key#method"`.
    pub fn parse(target: &str) -> Result<Self, ConfigurationError> {
        let malformed = || ConfigurationError::MalformedTarget(target.to_owned());
        let mut parts = target.split('#');
        let key = parts.next().filter(|k| !k.is_empty()).ok_or_else(malformed)?;
        match (parts.next(), parts.next()) {
            (None, _) => Ok(TargetRef::Key(key.to_owned())),
            (Some(method), None) if !method.is_empty() => Ok(TargetRef::Method {
                key: key.to_owned(),
                method: method.to_owned(),
            }),
            _ => Err(malformed()),
        }
    }

    /// The registry key this reference resolves.
    pub fn key(&self) -> &str {
        match self {
            TargetRef::Key(key) | TargetRef::Method { key, .. } => key,
        }
    }
}

/// A function computing an injected value from the current path captures.
pub type CaptureFn = Arc<dyn Fn(&[String]) -> Value + Send + Sync>;

/// A value injected into the target's factory.
#[derive(Clone)]
pub enum Inject {
    /// Pass this value as is.
    Literal(Value),
    /// Resolve this registry key and pass the result.
    Key(String),
    /// Compute the value from the path captures of the matched route.
    Capture(CaptureFn),
}

impl Inject {
    /// Prefix marking a string injection as a literal rather than a key.
    pub const LITERAL_PREFIX: &'static str = "literal:";

    /// Parse a string injection: `"literal:World"` is the literal `"World"`,
    /// anything else is a registry key.
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix(Self::LITERAL_PREFIX) {
            Some(literal) => Inject::Literal(Value::new(literal.to_owned())),
            None => Inject::Key(raw.to_owned()),
        }
    }

    /// Inject a literal value.
    pub fn literal<T: IntoValue>(value: T) -> Self {
        Inject::Literal(Value::new(value))
    }

    /// Inject the value registered under `key`.
    pub fn key(key: impl Into<String>) -> Self {
        Inject::Key(key.into())
    }

    /// Inject a value computed from the path captures.
    pub fn capture<F>(f: F) -> Self
    where
        F: Fn(&[String]) -> Value + Send + Sync + 'static,
    {
        Inject::Capture(Arc::new(f))
    }
}

impl fmt::Debug for Inject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inject::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Inject::Key(key) => f.debug_tuple("Key").field(key).finish(),
            Inject::Capture(_) => f.write_str("Capture(..)"),
        }
    }
}

impl From<&str> for Inject {
    fn from(raw: &str) -> Self {
        Inject::parse(raw)
    }
}

impl From<String> for Inject {
    fn from(raw: String) -> Self {
        Inject::parse(&raw)
    }
}

impl From<Value> for Inject {
    fn from(value: Value) -> Self {
        Inject::Literal(value)
    }
}

/// The option set of a route branch or defaults scope.
///
/// Every option is absent, set, or explicitly cancelled. Options are applied
/// in a fixed order at dispatch: `target`, then `inject`, then `call_with`.
#[derive(Debug, Clone, Default)]
pub struct RouteOptions {
    target: Option<Setting<Target>>,
    inject: Option<Setting<Vec<Inject>>>,
    call_with: Option<Setting<Vec<Value>>>,
}

impl RouteOptions {
    /// Create an empty option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Target a registry entry: `"key"` or `"key#method"`.
    pub fn to(mut self, target: impl Into<String>) -> Self {
        self.target = Some(Setting::Set(Target::Named(target.into())));
        self
    }

    /// Target a callable directly.
    pub fn handler(mut self, callable: Callable) -> Self {
        self.target = Some(Setting::Set(Target::Callable(callable)));
        self
    }

    /// Values passed to the target's factory, in order.
    pub fn inject<I>(mut self, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Inject>,
    {
        self.inject = Some(Setting::Set(values.into_iter().map(Into::into).collect()));
        self
    }

    /// Alias of [`inject`](Self::inject).
    pub fn resolve<I>(self, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Inject>,
    {
        self.inject(values)
    }

    /// Arguments appended after the path captures, in order.
    pub fn call_with<I>(mut self, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoValue,
    {
        self.call_with = Some(Setting::Set(values.into_iter().map(Value::new).collect()));
        self
    }

    /// Remove any inherited target.
    pub fn cancel_target(mut self) -> Self {
        self.target = Some(Setting::Cancel);
        self
    }

    /// Remove any inherited injections.
    pub fn cancel_inject(mut self) -> Self {
        self.inject = Some(Setting::Cancel);
        self
    }

    /// Remove any inherited `call_with` arguments.
    pub fn cancel_call_with(mut self) -> Self {
        self.call_with = Some(Setting::Cancel);
        self
    }

    /// The target, if set.
    pub fn target(&self) -> Option<&Target> {
        self.target.as_ref().and_then(Setting::as_set)
    }

    /// The injections, if set.
    pub fn injections(&self) -> Option<&[Inject]> {
        self.inject.as_ref().and_then(Setting::as_set).map(Vec::as_slice)
    }

    /// The extra call arguments, if set.
    pub fn extra_args(&self) -> Option<&[Value]> {
        self.call_with.as_ref().and_then(Setting::as_set).map(Vec::as_slice)
    }

    /// Returns `true` if no option is present, set or cancelled.
    pub fn is_empty(&self) -> bool {
        self.target.is_none() && self.inject.is_none() && self.call_with.is_none()
    }

    /// Overlay `child` on `self`.
    ///
    /// Options absent from `child` keep the value from `self`; options set in
    /// `child` replace it; options cancelled in `child` are removed. The result
    /// never contains a cancellation.
    pub fn overlay(&self, child: &RouteOptions) -> RouteOptions {
        RouteOptions {
            target: overlay_setting(&self.target, &child.target),
            inject: overlay_setting(&self.inject, &child.inject),
            call_with: overlay_setting(&self.call_with, &child.call_with),
        }
    }
}

fn overlay_setting<T: Clone>(
    parent: &Option<Setting<T>>,
    child: &Option<Setting<T>>,
) -> Option<Setting<T>> {
    match child {
        None => parent
            .as_ref()
            .and_then(Setting::as_set)
            .map(|value| Setting::Set(value.clone())),
        Some(Setting::Cancel) => None,
        Some(Setting::Set(value)) => Some(Setting::Set(value.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_target_ref() {
        assert_eq!(TargetRef::parse("greet"), Ok(TargetRef::Key("greet".into())));
        assert_eq!(
            TargetRef::parse("controllers.users#show"),
            Ok(TargetRef::Method {
                key: "controllers.users".into(),
                method: "show".into()
            })
        );
        for bad in ["", "#show", "users#", "a#b#c"] {
            assert_eq!(
                TargetRef::parse(bad),
                Err(ConfigurationError::MalformedTarget(bad.into()))
            );
        }
    }

    #[test]
    fn test_parse_inject() {
        assert!(matches!(Inject::parse("repositories.user"), Inject::Key(ref k) if k == "repositories.user"));
        match Inject::parse("literal:World") {
            Inject::Literal(v) => assert_eq!(v.as_str(), Some("World")),
            other => panic!("expected literal, got {other:?}"),
        }
    }

    #[test]
    fn test_overlay_keeps_absent_and_replaces_set() {
        let parent = RouteOptions::new().to("users#index").call_with([42u32]);
        let child = RouteOptions::new().to("users#show");
        let merged = parent.overlay(&child);

        assert!(matches!(merged.target(), Some(Target::Named(t)) if t == "users#show"));
        let extra = merged.extra_args().unwrap();
        assert_eq!(extra.len(), 1);
        assert_eq!(extra[0].downcast_ref::<u32>(), Some(&42));
    }

    #[test]
    fn test_overlay_cancel_removes_option() {
        let parent = RouteOptions::new().inject(["repositories.user"]).call_with([42u32]);
        let child = RouteOptions::new().cancel_call_with();
        let merged = parent.overlay(&child);

        assert!(merged.extra_args().is_none());
        assert_eq!(merged.injections().map(<[Inject]>::len), Some(1));

        // A cancellation never survives into the merged view.
        let grandchild = merged.overlay(&RouteOptions::new());
        assert!(grandchild.extra_args().is_none());
        assert!(!merged.overlay(&RouteOptions::new().cancel_target()).is_empty());
    }

    #[test]
    fn test_overlay_of_cancel_on_empty_parent() {
        let merged = RouteOptions::new().overlay(&RouteOptions::new().cancel_inject());
        assert!(merged.is_empty());
    }
}
