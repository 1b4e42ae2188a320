//! # weir-std
//!
//! Standard runtime for the Weir route dispatcher.
//!
//! This crate provides:
//! - **Component registry**: [`Registry`], [`RegistryBuilder`]
//! - **Defaults scopes**: [`DefaultsStack`]
//! - **Path matching**: [`MatchState`], [`PathMatcher`], [`SegmentMatcher`]
//! - **Dispatch**: [`Dispatcher`]
//! - **Routing context**: [`Request`], [`Route`], [`Verb`]
//! - **Application**: [`App`], [`AppBuilder`]
//! - **Testing**: [`testing`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core types
pub use weir_core;

// Modules
pub mod app;
pub mod defaults;
pub mod dispatch;
pub mod matching;
pub mod registry;
pub mod request;
pub mod testing;
pub mod verb;

pub use app::{App, AppBuilder, IncomingRequest};
pub use defaults::{DefaultsHost, DefaultsStack};
pub use dispatch::Dispatcher;
pub use matching::{MatchState, PathMatcher, Pattern, SegmentMatcher};
#[cfg(feature = "inventory")]
pub use registry::ComponentRegistration;
pub use registry::{Registry, RegistryBuilder};
pub use request::{Request, Route};
pub use verb::Verb;

#[cfg(feature = "inventory")]
pub use inventory;
