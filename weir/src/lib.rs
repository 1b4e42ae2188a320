//! # weir - Dependency-Injecting Route Dispatcher
//!
//! `weir` lets route handlers be declared as *data*: a registry key and a
//! method name instead of inline code. When a branch matches, the dispatcher
//! builds the target from the component registry, injects its dependencies,
//! assembles the argument list from the path captures and any extra
//! arguments, calls it once, and stops evaluating the routing tree.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use weir::prelude::*;
//!
//! struct Greeter { greeting: String }
//!
//! #[weir::component(name = "greeter")]
//! impl Greeter {
//!     pub fn hello(&self, name: String) -> String {
//!         format!("{}, {name}", self.greeting)
//!     }
//! }
//!
//! let registry = Registry::builder()
//!     .register_factory("greeter", |greeting: String| {
//!         Ok::<_, BoxError>(Value::component(Greeter { greeting }))
//!     })
//!     .build();
//!
//! let app = App::builder(registry)
//!     .routes(|r| {
//!         r.get(Route::new("hello/:name").to("greeter#hello").inject(["literal:Hello"]))
//!     })
//!     .build();
//!
//! let response = app.call(IncomingRequest::new(Verb::GET, "/hello/World"));
//! assert_eq!(response.body().and_then(Value::as_str), Some("Hello, World"));
//! ```
//!
//! ## Scoped Defaults
//!
//! Options shared by a group of routes are declared once with
//! [`Request::with_defaults`]. Nested scopes overlay their parent, and a
//! route can drop an inherited option with `cancel_call_with()` and friends.
//!
//! ## Features
//!
//! | Feature | Default | Enables |
//! |---------|---------|---------|
//! | `tracing` | yes | request spans and dispatch events via `tracing` |
//! | `macros` | yes | the `#[component]` attribute |
//! | `inventory` | no | [`ComponentRegistration`] and `RegistryBuilder::with_submitted` |

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use weir_core::{
    // Values and extraction
    Args,
    // Errors
    ArgumentError,
    BoxError,
    // Callables
    Callable,
    // Components
    Component,
    ConfigurationError,
    DispatchError,
    FromValue,
    // Short-circuit
    Halt,
    Handler,
    // Route options
    Inject,
    IntoValue,
    MethodTable,
    Outcome,
    // Response
    Params,
    RegistryError,
    Response,
    ResponseHandle,
    RouteOptions,
    RouteResult,
    Setting,
    Status,
    Target,
    TargetRef,
    Value,
    bind,
};

pub use weir_std::{
    App, AppBuilder, DefaultsHost, DefaultsStack, Dispatcher, IncomingRequest, MatchState,
    PathMatcher, Pattern, Registry, RegistryBuilder, Request, Route, SegmentMatcher, Verb,
};

#[cfg(feature = "inventory")]
pub use weir_std::ComponentRegistration;

#[cfg(feature = "inventory")]
pub use inventory;

#[cfg(feature = "macros")]
pub use weir_macros::component;

/// Path matching.
pub mod matching {
    pub use weir_std::matching::{
        MatchState, PathMatcher, Pattern, Segment, SegmentMatcher, Snapshot, attempt,
    };
}

/// Testing utilities.
pub mod testing {
    pub use weir_std::testing::{RecordingCallable, TestRequest};
}

/// Prelude module - common imports for Weir.
///
/// # Usage
///
/// ```rust,ignore
/// use weir::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        App, Args, BoxError, Callable, Component, FromValue, IncomingRequest, Inject, IntoValue,
        MethodTable, Outcome, Params, Registry, Request, ResponseHandle, Route, RouteOptions,
        RouteResult, Status, Value, Verb,
    };
}
