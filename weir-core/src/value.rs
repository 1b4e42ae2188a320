//! Dynamic values passed between route declarations, the registry and handlers.
//!
//! Route handlers are declared as data, so everything that flows through the
//! dispatcher (path captures, injected dependencies, `call_with` literals,
//! handler results) is carried as a [`Value`].

use crate::{component::Component, handler::Callable};
use std::{any::Any, fmt, sync::Arc};

/// A cheaply clonable, thread-safe dynamic value.
///
/// A value is one of three kinds:
///
/// - **data**: any `'static + Send + Sync` type, shared behind an `Arc`
/// - **callable**: a [`Callable`] that can be invoked with positional [`Args`]
/// - **component**: an object exposing named methods (see [`Component`])
///
/// [`Args`]: crate::Args
#[derive(Clone)]
pub struct Value {
    kind: Kind,
}

#[derive(Clone)]
enum Kind {
    Data {
        inner: Arc<dyn Any + Send + Sync>,
        type_name: &'static str,
    },
    Callable(Callable),
    Component(Arc<dyn Component>),
}

impl Value {
    /// Wrap any value. Existing `Value`s and `Callable`s are not wrapped twice.
    pub fn new<T: IntoValue>(value: T) -> Self {
        value.into_value()
    }

    /// The unit value, used as the body of handlers that return nothing.
    pub fn unit() -> Self {
        Self::new(())
    }

    /// Wrap a callable.
    pub fn callable(callable: Callable) -> Self {
        Self {
            kind: Kind::Callable(callable),
        }
    }

    /// Wrap a component so its methods can be targeted with `key#method`.
    pub fn component<C: Component>(component: C) -> Self {
        Self::shared_component(Arc::new(component))
    }

    /// Wrap an already shared component.
    pub fn shared_component(component: Arc<dyn Component>) -> Self {
        Self {
            kind: Kind::Component(component),
        }
    }

    /// Name of the held type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match &self.kind {
            Kind::Data { type_name, .. } => type_name,
            Kind::Callable(_) => "callable",
            Kind::Component(component) => component.component_name(),
        }
    }

    /// Returns `true` if the value holds data of type `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }

    /// Borrow the held data as `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match &self.kind {
            Kind::Data { inner, .. } => inner.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Share the held data as `Arc<T>`.
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        match &self.kind {
            Kind::Data { inner, .. } => Arc::clone(inner).downcast::<T>().ok(),
            _ => None,
        }
    }

    /// The callable, if this value is one.
    pub fn as_callable(&self) -> Option<&Callable> {
        match &self.kind {
            Kind::Callable(callable) => Some(callable),
            _ => None,
        }
    }

    /// The component, if this value is one.
    pub fn as_component(&self) -> Option<&Arc<dyn Component>> {
        match &self.kind {
            Kind::Component(component) => Some(component),
            _ => None,
        }
    }

    /// String contents, if the value holds a `String` or `&'static str`.
    pub fn as_str(&self) -> Option<&str> {
        self.downcast_ref::<String>()
            .map(String::as_str)
            .or_else(|| self.downcast_ref::<&'static str>().copied())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            Kind::Data { .. } => match self.as_str() {
                Some(s) => f.debug_tuple("Value").field(&s).finish(),
                None => write!(f, "Value(<{}>)", self.type_name()),
            },
            Kind::Callable(callable) => f.debug_tuple("Value").field(callable).finish(),
            Kind::Component(component) => {
                write!(f, "Value(<component {}>)", component.component_name())
            }
        }
    }
}

/// Conversion into a [`Value`].
///
/// Implemented for every `'static + Send + Sync` type. Converting a `Value`
/// returns it unchanged, and converting a [`Callable`] yields a callable value
/// rather than opaque data.
pub trait IntoValue {
    /// Convert `self` into a dynamic value.
    fn into_value(self) -> Value;
}

impl<T: Any + Send + Sync> IntoValue for T {
    fn into_value(self) -> Value {
        let boxed: Box<dyn Any + Send + Sync> = Box::new(self);
        let boxed = match boxed.downcast::<Value>() {
            Ok(value) => return *value,
            Err(other) => other,
        };
        match boxed.downcast::<Callable>() {
            Ok(callable) => Value::callable(*callable),
            Err(other) => Value {
                kind: Kind::Data {
                    inner: Arc::from(other),
                    type_name: std::any::type_name::<T>(),
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Args, BoxError};

    #[test]
    fn test_value_does_not_double_wrap() {
        let value = Value::new("hello".to_string());
        let again = Value::new(value.clone());
        assert_eq!(again.downcast_ref::<String>().map(String::as_str), Some("hello"));
        assert!(!again.is::<Value>());
    }

    #[test]
    fn test_callable_becomes_callable_value() {
        let callable = Callable::new(|_args: Args| -> Result<Value, BoxError> { Ok(Value::unit()) });
        let value = Value::new(callable);
        assert!(value.as_callable().is_some());
        assert_eq!(value.type_name(), "callable");
    }

    #[test]
    fn test_downcast_shares_data() {
        let value = Value::new(vec![1u32, 2, 3]);
        let first = value.downcast::<Vec<u32>>().unwrap();
        let second = value.downcast::<Vec<u32>>().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(value.downcast::<String>().is_none());
    }

    #[test]
    fn test_as_str_accepts_static_str() {
        assert_eq!(Value::new("pong").as_str(), Some("pong"));
        assert_eq!(Value::new(42i64).as_str(), None);
    }
}
