//! # Defaults Scope Stack
//!
//! Nested branches inherit default route options from their ancestors.
//! Each scope stores the fully merged view (parent overlaid by the scope's
//! own options), so reading the current defaults never walks the stack.
//!
//! Scopes are pushed for the dynamic extent of a body and popped when the
//! body returns, whether it dispatched, failed, or fell through. The stack
//! is request-local and never shared between requests.

use std::sync::Arc;
use weir_core::{ConfigurationError, RouteOptions};

/// A request-scoped stack of merged default options.
#[derive(Debug, Clone, Default)]
pub struct DefaultsStack {
    scopes: Vec<Arc<RouteOptions>>,
}

impl DefaultsStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// The merged defaults visible at this point; empty when no scope is active.
    pub fn current(&self) -> Arc<RouteOptions> {
        self.scopes.last().cloned().unwrap_or_default()
    }

    /// Number of active scopes.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Push a scope merged over the current one. Returns the depth to pass
    /// to [`exit`](Self::exit).
    pub fn enter(&mut self, options: &RouteOptions) -> usize {
        let depth = self.depth();
        let merged = self.current().overlay(options);
        self.scopes.push(Arc::new(merged));
        depth
    }

    /// Pop every scope above `depth`.
    pub fn exit(&mut self, depth: usize) {
        self.scopes.truncate(depth);
    }

    /// Run `body` with `options` merged into the defaults.
    ///
    /// Fails with [`ConfigurationError::DefaultsWithoutBody`] when `body` is
    /// `None`. The scope is popped when `body` returns or unwinds.
    pub fn with_defaults<F, R>(
        &mut self,
        options: &RouteOptions,
        body: Option<F>,
    ) -> Result<R, ConfigurationError>
    where
        F: FnOnce(&mut DefaultsStack) -> R,
    {
        scoped(self, options, body)
    }
}

/// Anything that owns a [`DefaultsStack`], such as a request context.
pub trait DefaultsHost {
    /// The stack scopes are pushed onto.
    fn defaults_mut(&mut self) -> &mut DefaultsStack;
}

impl DefaultsHost for DefaultsStack {
    fn defaults_mut(&mut self) -> &mut DefaultsStack {
        self
    }
}

/// Run `body` against `host` with `options` merged into its defaults.
///
/// Fails with [`ConfigurationError::DefaultsWithoutBody`] when `body` is
/// `None`. The scope is popped when `body` returns or unwinds.
pub fn scoped<H, F, R>(
    host: &mut H,
    options: &RouteOptions,
    body: Option<F>,
) -> Result<R, ConfigurationError>
where
    H: DefaultsHost + ?Sized,
    F: FnOnce(&mut H) -> R,
{
    let body = body.ok_or(ConfigurationError::DefaultsWithoutBody)?;
    let mut scope = Scope::enter(host, options);
    Ok(body(&mut *scope.host))
}

/// Pops its scope on drop.
struct Scope<'a, H: DefaultsHost + ?Sized> {
    host: &'a mut H,
    depth: usize,
}

impl<'a, H: DefaultsHost + ?Sized> Scope<'a, H> {
    fn enter(host: &'a mut H, options: &RouteOptions) -> Self {
        let depth = host.defaults_mut().enter(options);
        Self { host, depth }
    }
}

impl<H: DefaultsHost + ?Sized> Drop for Scope<'_, H> {
    fn drop(&mut self) {
        self.host.defaults_mut().exit(self.depth);
    }
}
