//! Testing utilities for Weir.
//!
//! # Features
//!
//! - [`RecordingCallable`]: A callable that records every argument list it receives
//! - [`TestRequest`]: A builder for driving an [`App`] in tests

use crate::{
    app::{App, IncomingRequest},
    verb::Verb,
};
use std::sync::{Arc, Mutex, PoisonError};
use weir_core::{Args, Callable, Params, Response, Value};

// ============================================================================
// Recording Callable
// ============================================================================

/// A callable that records every argument list it receives.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingCallable::returning("ok");
/// let registry = Registry::builder()
///     .register("handler", recorder.callable())
///     .build();
///
/// // Dispatch some requests...
///
/// assert_eq!(recorder.count(), 1);
/// assert_eq!(recorder.last_strings(), vec!["7"]);
/// ```
#[derive(Clone)]
pub struct RecordingCallable {
    calls: Arc<Mutex<Vec<Args>>>,
    result: Value,
}

impl Default for RecordingCallable {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingCallable {
    /// Create a recorder that returns the unit value.
    pub fn new() -> Self {
        Self::returning(())
    }

    /// Create a recorder that returns `result` on every call.
    pub fn returning<T: weir_core::IntoValue>(result: T) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            result: result.into_value(),
        }
    }

    /// A callable sharing this recorder.
    pub fn callable(&self) -> Callable {
        let calls = Arc::clone(&self.calls);
        let result = self.result.clone();
        Callable::new(move |args| {
            calls
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(args);
            Ok(result.clone())
        })
        .named("recording")
    }

    /// Every recorded argument list, in call order.
    pub fn calls(&self) -> Vec<Args> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of calls.
    pub fn count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// The string arguments of the last call. Non-string arguments are
    /// rendered as their type name in angle brackets.
    pub fn last_strings(&self) -> Vec<String> {
        self.calls()
            .last()
            .map(|args| {
                args.iter()
                    .map(|v| match v.as_str() {
                        Some(s) => s.to_owned(),
                        None => format!("<{}>", v.type_name()),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Clear all recorded calls.
    pub fn clear(&self) {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

// ============================================================================
// Test Request
// ============================================================================

/// A builder for requests sent to an [`App`] in tests.
///
/// # Example
///
/// ```rust,ignore
/// let response = TestRequest::post("/users")
///     .param("name", "John")
///     .param("email", "john@example.com")
///     .send(&app);
/// assert_eq!(response.status(), Status::CREATED);
/// ```
#[derive(Debug, Clone)]
pub struct TestRequest {
    verb: Verb,
    path: String,
    params: Vec<(String, String)>,
}

impl TestRequest {
    /// A request with the given method.
    pub fn new(verb: Verb, path: impl Into<String>) -> Self {
        Self {
            verb,
            path: path.into(),
            params: Vec::new(),
        }
    }

    /// A `GET` request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Verb::GET, path)
    }

    /// A `POST` request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Verb::POST, path)
    }

    /// A `PUT` request.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Verb::PUT, path)
    }

    /// A `PATCH` request.
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Verb::PATCH, path)
    }

    /// A `DELETE` request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Verb::DELETE, path)
    }

    /// Add a parameter.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// Build the incoming request.
    pub fn build(self) -> IncomingRequest {
        let params: Params = self.params.into_iter().collect();
        IncomingRequest::new(self.verb, self.path).with_params(params)
    }

    /// Send the request to `app`.
    pub fn send(self, app: &App) -> Response {
        app.call(self.build())
    }
}
