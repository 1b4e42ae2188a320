//! Response types.
//!
//! The body of a finished response is the value returned by the dispatched
//! target. Injected components may adjust the status through a
//! [`ResponseHandle`] before the response is finished.

use crate::{
    error::ArgumentError,
    extract::FromValue,
    value::Value,
};
use std::{
    collections::BTreeMap,
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    },
};

/// An HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Status(u16);

impl Status {
    /// 200 OK
    pub const OK: Status = Status(200);
    /// 201 Created
    pub const CREATED: Status = Status(201);
    /// 204 No Content
    pub const NO_CONTENT: Status = Status(204);
    /// 404 Not Found
    pub const NOT_FOUND: Status = Status(404);
    /// 422 Unprocessable Entity
    pub const UNPROCESSABLE_ENTITY: Status = Status(422);
    /// 500 Internal Server Error
    pub const INTERNAL_SERVER_ERROR: Status = Status(500);

    /// Create a status from its numeric code.
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// The numeric code.
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Returns `true` for 2xx codes.
    pub const fn is_success(self) -> bool {
        self.0 >= 200 && self.0 < 300
    }
}

impl From<u16> for Status {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A shared handle to the status of the in-flight response.
///
/// Cloning the handle is cheap; every clone refers to the same response.
/// Inject it into a factory to let the constructed component set the status.
#[derive(Debug, Clone, Default)]
pub struct ResponseHandle(Arc<AtomicU32>);

impl ResponseHandle {
    // Marks a stored status as set; the low 16 bits hold the code.
    const SET: u32 = 1 << 16;

    /// Create a handle for a fresh response with no explicit status.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the status of the response.
    pub fn set_status(&self, status: Status) {
        self.0
            .store(Self::SET | u32::from(status.as_u16()), Ordering::Release);
    }

    /// The explicitly set status, if any.
    pub fn status(&self) -> Option<Status> {
        let stored = self.0.load(Ordering::Acquire);
        ((stored & Self::SET) != 0).then(|| Status((stored & 0xFFFF) as u16))
    }
}

impl FromValue for ResponseHandle {
    fn from_value(value: &Value, index: usize) -> Result<Self, ArgumentError> {
        value
            .downcast_ref::<ResponseHandle>()
            .cloned()
            .ok_or(ArgumentError::Type {
                index,
                expected: "ResponseHandle",
                found: value.type_name(),
            })
    }
}

/// Request parameters (query string or form fields).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Arc<BTreeMap<String, String>>);

impl Params {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a parameter.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Iterate over the parameters in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(Arc::new(
            iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        ))
    }
}

impl FromValue for Params {
    fn from_value(value: &Value, index: usize) -> Result<Self, ArgumentError> {
        value
            .downcast_ref::<Params>()
            .cloned()
            .ok_or(ArgumentError::Type {
                index,
                expected: "Params",
                found: value.type_name(),
            })
    }
}

/// A finished response.
#[derive(Debug, Clone)]
pub struct Response {
    status: Status,
    body: Option<Value>,
}

impl Response {
    /// Create a response.
    pub fn new(status: Status, body: Option<Value>) -> Self {
        Self { status, body }
    }

    /// An empty response with the given status.
    pub fn empty(status: Status) -> Self {
        Self::new(status, None)
    }

    /// The response status.
    pub fn status(&self) -> Status {
        self.status
    }

    /// The response body.
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Borrow the body as `T`.
    pub fn body_as<T: std::any::Any>(&self) -> Option<&T> {
        self.body.as_ref().and_then(Value::downcast_ref::<T>)
    }

    /// Consume the response, returning the body.
    pub fn into_body(self) -> Option<Value> {
        self.body
    }
}
