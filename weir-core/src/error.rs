//! Error types for Weir.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`ConfigurationError`] - Malformed route options or defaults declarations
//! - [`RegistryError`] - Component registry misuse
//! - [`ArgumentError`] - Positional argument extraction failures
//! - [`DispatchError`] - Errors that abort the dispatch of a single request

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Route declarations that can never dispatch successfully.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// `with_defaults` was called without routes to apply the defaults to.
    #[error("defaults must be declared with a body")]
    DefaultsWithoutBody,

    /// A target string could not be parsed as `key` or `key#method`.
    #[error("malformed target `{0}`: expected `key` or `key#method`")]
    MalformedTarget(String),

    /// The merged option set of a dispatched route names no target.
    #[error("route has no target after merging defaults")]
    MissingTarget,
}

/// Errors raised by the component registry.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Nothing was registered under the key.
    #[error("nothing registered under key `{0}`")]
    UnknownKey(String),

    /// Arguments were supplied for an entry registered as a plain value.
    #[error("entry `{0}` is a plain value and cannot be called with arguments")]
    NotCallable(String),

    /// The factory registered under the key returned an error.
    #[error("factory `{key}` failed")]
    Factory {
        /// The registry key of the failing factory.
        key: String,
        /// The error returned by the factory.
        #[source]
        source: BoxError,
    },
}

/// Positional argument extraction failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    /// The callable was invoked with the wrong number of arguments.
    #[error("wrong number of arguments (given {given}, expected {expected})")]
    Arity {
        /// Number of arguments the callable accepts.
        expected: usize,
        /// Number of arguments supplied.
        given: usize,
    },

    /// No argument exists at the index.
    #[error("missing argument at position {0}")]
    Missing(usize),

    /// The argument could not be converted to the requested type.
    #[error("argument {index} is `{found}`, expected `{expected}`")]
    Type {
        /// Position of the argument.
        index: usize,
        /// Name of the requested type.
        expected: &'static str,
        /// Name of the type actually held.
        found: &'static str,
    },
}

/// Errors that abort the dispatch of a matched route.
///
/// None of these are retried: they surface as a server error for the
/// current request only.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The merged route options are unusable.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// A registry lookup or factory invocation failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The resolved component does not expose the requested method.
    #[error("`{component}` has no method `{method}`")]
    MethodNotFound {
        /// Name of the resolved component (or value type).
        component: String,
        /// The method that was requested.
        method: String,
    },

    /// The resolved target is not something that can be invoked.
    #[error("target `{target}` resolved to `{found}`, which is not callable")]
    NotCallable {
        /// The target as declared.
        target: String,
        /// Type name of the value the target resolved to.
        found: &'static str,
    },

    /// The invoked callable returned an error.
    #[error("handler failed")]
    Handler(#[source] BoxError),
}

// Convenience conversions
impl From<BoxError> for DispatchError {
    fn from(err: BoxError) -> Self {
        DispatchError::Handler(err)
    }
}
