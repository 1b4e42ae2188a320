//! # Request Context
//!
//! [`Request`] is the explicit, request-scoped context a routing tree runs
//! against. It owns the match state and the defaults stack of one request
//! and borrows the shared registry and matcher, so concurrent requests never
//! observe each other's captures or defaults.
//!
//! # Branches
//!
//! Every combinator returns a [`RouteResult`]:
//!
//! | Combinator | Matches | Body receives |
//! |------------|---------|---------------|
//! | [`on`](Request::on) | pattern prefix | captures |
//! | [`is`](Request::is) | whole remaining path | captures |
//! | [`on_resolving`](Request::on_resolving) | pattern prefix | captures, then resolved values |
//! | [`resolve`](Request::resolve) | always | resolved registry values |
//! | [`with_defaults`](Request::with_defaults) | always | nothing |
//!
//! Declarative routes ([`get`](Request::get), [`post`](Request::post), ...)
//! match terminally and dispatch their [`Route`] options. A dispatch ends the
//! tree with `Err(Halt::Finished(..))`; propagate it with `?`.
//!
//! # Example
//!
//! ```rust,ignore
//! fn routes(r: &mut Request<'_>) -> RouteResult {
//!     r.on("users", |r, _| {
//!         r.resolve(["repositories.user"], |r, repo| {
//!             let defaults = RouteOptions::new()
//!                 .inject([Value::new(r.response()), repo[0].clone()]);
//!             r.with_defaults(defaults, |r| {
//!                 r.get(Route::new("").to("controllers.users#index"))?;
//!                 r.get(Route::new(":id").to("controllers.users#show"))
//!             })
//!         })
//!     })
//! }
//! ```

use crate::{
    defaults::{self, DefaultsHost, DefaultsStack},
    dispatch::Dispatcher,
    matching::{self, MatchState, PathMatcher, Pattern},
    registry::Registry,
    verb::Verb,
};
use std::sync::Arc;
use weir_core::{
    Args, Callable, Halt, Handler, Inject, IntoValue, Params, Response, ResponseHandle,
    RouteOptions, RouteResult, Status, Value,
};

/// A declarative route: a pattern and the options to dispatch on match.
#[derive(Debug, Clone)]
pub struct Route {
    pattern: Pattern,
    options: RouteOptions,
}

impl Route {
    /// A route matching `pattern`, with no options yet.
    pub fn new(pattern: &str) -> Self {
        Self::with_options(pattern, RouteOptions::new())
    }

    /// A route matching `pattern` with `options`.
    pub fn with_options(pattern: &str, options: RouteOptions) -> Self {
        Self {
            pattern: Pattern::parse(pattern),
            options,
        }
    }

    /// See [`RouteOptions::to`].
    pub fn to(self, target: impl Into<String>) -> Self {
        self.map(|o| o.to(target))
    }

    /// Dispatch to a typed function.
    pub fn handle<H, A>(self, handler: H) -> Self
    where
        H: Handler<A>,
        A: 'static,
    {
        let name = format!("route `{}`", self.pattern);
        self.map(|o| o.handler(Callable::from_fn(handler).named(name)))
    }

    /// See [`RouteOptions::inject`].
    pub fn inject<I>(self, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Inject>,
    {
        self.map(|o| o.inject(values))
    }

    /// See [`RouteOptions::call_with`].
    pub fn call_with<I>(self, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoValue,
    {
        self.map(|o| o.call_with(values))
    }

    /// See [`RouteOptions::cancel_inject`].
    pub fn cancel_inject(self) -> Self {
        self.map(RouteOptions::cancel_inject)
    }

    /// See [`RouteOptions::cancel_call_with`].
    pub fn cancel_call_with(self) -> Self {
        self.map(RouteOptions::cancel_call_with)
    }

    /// The route's pattern.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// The route's own options, before defaults are merged.
    pub fn options(&self) -> &RouteOptions {
        &self.options
    }

    fn map(mut self, f: impl FnOnce(RouteOptions) -> RouteOptions) -> Self {
        self.options = f(self.options);
        self
    }
}

/// The request-scoped routing context.
pub struct Request<'a> {
    verb: Verb,
    path: Arc<str>,
    params: Params,
    response: ResponseHandle,
    state: MatchState,
    defaults: DefaultsStack,
    registry: &'a Registry,
    matcher: &'a dyn PathMatcher,
}

impl<'a> Request<'a> {
    /// Create a context for one request.
    pub fn new(
        verb: Verb,
        path: &str,
        params: Params,
        registry: &'a Registry,
        matcher: &'a dyn PathMatcher,
    ) -> Self {
        Self {
            verb,
            path: Arc::from(path),
            params,
            response: ResponseHandle::new(),
            state: MatchState::new(path),
            defaults: DefaultsStack::new(),
            registry,
            matcher,
        }
    }

    /// The request method.
    pub fn method(&self) -> Verb {
        self.verb
    }

    /// The full request path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The part of the path not consumed by enclosing branches.
    pub fn remaining_path(&self) -> &str {
        self.state.remaining_path()
    }

    /// Values captured by the most recent match.
    pub fn captures(&self) -> &[String] {
        self.state.captures()
    }

    /// The request parameters.
    pub fn params(&self) -> Params {
        self.params.clone()
    }

    /// A handle to the in-flight response.
    pub fn response(&self) -> ResponseHandle {
        self.response.clone()
    }

    /// The shared registry.
    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// The defaults visible at this point.
    pub fn current_defaults(&self) -> Arc<RouteOptions> {
        self.defaults.current()
    }

    // ------------------------------------------------------------------------
    // Branches
    // ------------------------------------------------------------------------

    /// Run `body` if `pattern` matches a prefix of the remaining path.
    pub fn on<F>(&mut self, pattern: &str, body: F) -> RouteResult
    where
        F: FnOnce(&mut Self, Vec<String>) -> RouteResult,
    {
        self.if_match(&Pattern::parse(pattern), false, body)
    }

    /// Run `body` if `pattern` matches the whole remaining path.
    pub fn is<F>(&mut self, pattern: &str, body: F) -> RouteResult
    where
        F: FnOnce(&mut Self, Vec<String>) -> RouteResult,
    {
        self.if_match(&Pattern::parse(pattern), true, body)
    }

    /// Like [`on`](Self::on), but `body` also receives the evaluated
    /// `resolve` items after the captures.
    pub fn on_resolving<I, F>(&mut self, pattern: &str, resolve: I, body: F) -> RouteResult
    where
        I: IntoIterator,
        I::Item: Into<Inject>,
        F: FnOnce(&mut Self, Args) -> RouteResult,
    {
        let items: Vec<Inject> = resolve.into_iter().map(Into::into).collect();
        self.if_match(&Pattern::parse(pattern), false, |r, captures| {
            let resolved = r.dispatcher().evaluate(&items, &captures)?;
            let mut args: Args = captures.into_iter().map(Value::new).collect();
            args.extend(resolved);
            body(r, args)
        })
    }

    /// Resolve `keys` from the registry and pass the values to `body`.
    pub fn resolve<'k, K, F>(&mut self, keys: K, body: F) -> RouteResult
    where
        K: IntoIterator<Item = &'k str>,
        F: FnOnce(&mut Self, Vec<Value>) -> RouteResult,
    {
        let values = keys
            .into_iter()
            .map(|key| self.registry.resolve(key))
            .collect::<Result<Vec<_>, _>>()?;
        body(self, values)
    }

    /// Run `body` with `options` merged into the defaults.
    ///
    /// The scope ends when `body` returns, including when it halts.
    pub fn with_defaults<F>(&mut self, options: RouteOptions, body: F) -> RouteResult
    where
        F: FnOnce(&mut Self) -> RouteResult,
    {
        defaults::scoped(self, &options, Some(body))?
    }

    // ------------------------------------------------------------------------
    // Declarative routes
    // ------------------------------------------------------------------------

    /// Dispatch `route` on a `GET` request.
    pub fn get(&mut self, route: Route) -> RouteResult {
        self.verb(Verb::GET, route)
    }

    /// Dispatch `route` on a `POST` request.
    pub fn post(&mut self, route: Route) -> RouteResult {
        self.verb(Verb::POST, route)
    }

    /// Dispatch `route` on a `PUT` request.
    pub fn put(&mut self, route: Route) -> RouteResult {
        self.verb(Verb::PUT, route)
    }

    /// Dispatch `route` on a `PATCH` request.
    pub fn patch(&mut self, route: Route) -> RouteResult {
        self.verb(Verb::PATCH, route)
    }

    /// Dispatch `route` on a `DELETE` request.
    pub fn delete(&mut self, route: Route) -> RouteResult {
        self.verb(Verb::DELETE, route)
    }

    /// Dispatch `route` if the request method is in `verbs`. A request
    /// without a method matches no verb route.
    pub fn verb(&mut self, verbs: Verb, route: Route) -> RouteResult {
        if self.verb.is_empty() || !verbs.contains(self.verb) {
            return Ok(());
        }
        self.route(route)
    }

    /// Dispatch `route` for any request method.
    pub fn route(&mut self, route: Route) -> RouteResult {
        let Route { pattern, options } = route;
        self.if_match(&pattern, true, |r, captures| r.dispatch(&options, &captures))
    }

    /// Dispatch `options` without matching the path. Only `call_with`
    /// values are passed.
    pub fn always(&mut self, options: RouteOptions) -> RouteResult {
        self.dispatch(&options, &[])
    }

    /// Finish the response with `body`.
    pub fn finish<T: IntoValue>(&self, body: T) -> RouteResult {
        Err(Halt::Finished(self.respond(body.into_value())))
    }

    /// Finish the response with `status` and no body.
    pub fn halt(&self, status: Status) -> RouteResult {
        self.response.set_status(status);
        Err(Halt::Finished(Response::empty(status)))
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn dispatcher(&self) -> Dispatcher<'a> {
        Dispatcher::new(self.registry)
    }

    /// Merge `options` over the defaults, dispatch, and halt.
    fn dispatch(&mut self, options: &RouteOptions, captures: &[String]) -> RouteResult {
        let merged = self.defaults.current().overlay(options);
        let body = self.dispatcher().dispatch(&merged, captures)?;
        Err(Halt::Finished(self.respond(body)))
    }

    fn respond(&self, body: Value) -> Response {
        let status = self.response.status().unwrap_or(Status::OK);
        Response::new(status, Some(body))
    }

    /// Try `pattern`; on match run `body` and restore the match state after.
    fn if_match<F>(&mut self, pattern: &Pattern, terminal: bool, body: F) -> RouteResult
    where
        F: FnOnce(&mut Self, Vec<String>) -> RouteResult,
    {
        let Some(snapshot) = matching::attempt(self.matcher, &mut self.state, pattern, terminal)
        else {
            return Ok(());
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(%pattern, terminal, remaining = self.state.remaining_path(), "branch matched");

        let captures = self.state.captures().to_vec();
        let result = body(self, captures);
        self.state.restore(snapshot);
        result
    }
}

impl DefaultsHost for Request<'_> {
    fn defaults_mut(&mut self) -> &mut DefaultsStack {
        &mut self.defaults
    }
}
