//! # Positional Arguments and Extraction
//!
//! A dispatched route calls its target with an ordered argument list:
//! path captures first, then any `call_with` values. Factories receive the
//! injected values the same way. [`Args`] carries that list and
//! [`FromValue`] turns individual entries back into typed parameters.
//!
//! # Extractors
//!
//! | Type | Accepts |
//! |------|---------|
//! | [`Value`] | anything |
//! | `String` | `String` or `&'static str` data |
//! | integers, `bool` | the same type, or a string that parses as it |
//! | `Arc<T>` | shared data of type `T` |
//! | `Option<T>` | anything; `None` when `T` cannot be extracted |
//! | [`Callable`] | callable values |

use crate::{error::ArgumentError, handler::Callable, value::Value};
use std::{any::Any, fmt, sync::Arc};

/// An ordered list of positional arguments.
#[derive(Clone, Default)]
pub struct Args(Vec<Value>);

impl Args {
    /// Create an empty argument list.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no arguments.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append an argument.
    pub fn push(&mut self, value: Value) {
        self.0.push(value);
    }

    /// Borrow the argument at `index`.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    /// Iterate over the arguments in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }

    /// Extract the argument at `index` as `T`.
    pub fn extract<T: FromValue>(&self, index: usize) -> Result<T, ArgumentError> {
        let value = self.get(index).ok_or(ArgumentError::Missing(index))?;
        T::from_value(value, index)
    }

    /// Fail unless exactly `expected` arguments are present.
    pub fn expect_arity(&self, expected: usize) -> Result<(), ArgumentError> {
        if self.len() == expected {
            Ok(())
        } else {
            Err(ArgumentError::Arity {
                expected,
                given: self.len(),
            })
        }
    }

    /// Consume the list, returning the underlying values.
    pub fn into_vec(self) -> Vec<Value> {
        self.0
    }
}

impl fmt::Debug for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl From<Vec<Value>> for Args {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

impl FromIterator<Value> for Args {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Value> for Args {
    fn extend<I: IntoIterator<Item = Value>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Args {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Args {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Typed extraction of a positional argument.
///
/// `index` is the argument position, used for error reporting.
pub trait FromValue: Sized {
    /// Attempt to extract `Self` from the argument at `index`.
    fn from_value(value: &Value, index: usize) -> Result<Self, ArgumentError>;
}

fn mismatch<T>(value: &Value, index: usize) -> ArgumentError {
    ArgumentError::Type {
        index,
        expected: std::any::type_name::<T>(),
        found: value.type_name(),
    }
}

impl FromValue for Value {
    fn from_value(value: &Value, _index: usize) -> Result<Self, ArgumentError> {
        Ok(value.clone())
    }
}

impl FromValue for String {
    fn from_value(value: &Value, index: usize) -> Result<Self, ArgumentError> {
        value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| mismatch::<String>(value, index))
    }
}

impl FromValue for bool {
    fn from_value(value: &Value, index: usize) -> Result<Self, ArgumentError> {
        if let Some(b) = value.downcast_ref::<bool>() {
            return Ok(*b);
        }
        value
            .as_str()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| mismatch::<bool>(value, index))
    }
}

macro_rules! impl_from_value_int {
    ($($t:ty),+) => {
        $(
            impl FromValue for $t {
                fn from_value(value: &Value, index: usize) -> Result<Self, ArgumentError> {
                    if let Some(n) = value.downcast_ref::<$t>() {
                        return Ok(*n);
                    }
                    // Path captures arrive as strings.
                    value
                        .as_str()
                        .and_then(|s| s.parse::<$t>().ok())
                        .ok_or_else(|| mismatch::<$t>(value, index))
                }
            }
        )+
    };
}

impl_from_value_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl<T: Any + Send + Sync> FromValue for Arc<T> {
    fn from_value(value: &Value, index: usize) -> Result<Self, ArgumentError> {
        value
            .downcast::<T>()
            .ok_or_else(|| mismatch::<T>(value, index))
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value, index: usize) -> Result<Self, ArgumentError> {
        Ok(T::from_value(value, index).ok())
    }
}

impl FromValue for Callable {
    fn from_value(value: &Value, index: usize) -> Result<Self, ArgumentError> {
        value
            .as_callable()
            .cloned()
            .ok_or_else(|| mismatch::<Callable>(value, index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_parses_string_captures() {
        let args: Args = vec![Value::new("7".to_string()), Value::new(3u64)].into();
        assert_eq!(args.extract::<u64>(0), Ok(7));
        assert_eq!(args.extract::<u64>(1), Ok(3));
        assert_eq!(args.extract::<String>(0).as_deref(), Ok("7"));
    }

    #[test]
    fn test_extract_reports_type_and_position() {
        let args: Args = vec![Value::new(1.5f64)].into();
        let err = args.extract::<String>(0).unwrap_err();
        assert!(matches!(err, ArgumentError::Type { index: 0, .. }));
        assert_eq!(args.extract::<String>(3), Err(ArgumentError::Missing(3)));
    }

    #[test]
    fn test_option_extraction_never_fails() {
        let args: Args = vec![Value::new(1.5f64)].into();
        assert_eq!(args.extract::<Option<String>>(0), Ok(None));
    }

    #[test]
    fn test_expect_arity() {
        let args: Args = vec![Value::unit()].into();
        assert!(args.expect_arity(1).is_ok());
        assert_eq!(
            args.expect_arity(2),
            Err(ArgumentError::Arity {
                expected: 2,
                given: 1
            })
        );
    }
}
