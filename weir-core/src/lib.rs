//! # weir-core
//!
//! Core types for the Weir route dispatcher.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! components and extensions that don't need the full `weir-std` runtime.
//!
//! # Building Blocks
//!
//! ## Values ([`Value`], [`Args`], [`FromValue`])
//!
//! Route handlers are declared as data, so everything that flows through a
//! dispatch is dynamically typed: path captures, injected dependencies,
//! `call_with` literals and handler results. Handlers get typed parameters
//! back through [`FromValue`].
//!
//! ## Callables ([`Callable`], [`Handler`])
//!
//! The terminal point of a dispatch. Plain Rust functions become callables
//! through [`Handler`], which extracts each parameter and checks the arity.
//!
//! ## Components ([`Component`])
//!
//! Objects whose methods are targeted by name (`"controllers.users#show"`).
//! Method lookup is explicit: a component publishes its method table.
//!
//! ## Route Options ([`RouteOptions`])
//!
//! What a branch dispatches to, what is injected into the target's factory
//! and which extra arguments follow the path captures. Options cascade
//! through nested defaults scopes and can be cancelled with [`Setting::Cancel`].
//!
//! ## Short-Circuit ([`RouteResult`], [`Halt`])
//!
//! A successful dispatch halts the routing tree through `Err(Halt)`, so `?`
//! is enough to stop every sibling and ancestor branch.
//!
//! # Error Types
//!
//! - [`DispatchError`] - Errors that abort a single request
//! - [`RegistryError`] - Component registry misuse
//! - [`ConfigurationError`] - Malformed route declarations

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod component;
mod error;
mod extract;
mod handler;
mod options;
mod response;
mod routing;
mod value;

// Re-exports
pub use component::{Component, MethodTable, bind};
pub use error::{ArgumentError, BoxError, ConfigurationError, DispatchError, RegistryError};
pub use extract::{Args, FromValue};
pub use handler::{Callable, Handler, Outcome};
pub use options::{CaptureFn, Inject, RouteOptions, Setting, Target, TargetRef};
pub use response::{Params, Response, ResponseHandle, Status};
pub use routing::{Halt, RouteResult};
pub use value::{IntoValue, Value};
