//! # App
//!
//! Binds a routing tree to a frozen registry and a path matcher, and turns
//! each incoming request into a [`Response`].
//!
//! | Outcome of the tree | Response |
//! |---------------------|----------|
//! | a route dispatched | the target's result, with the status set through the [`ResponseHandle`] (200 by default) |
//! | nothing matched | not-found status, empty body |
//! | dispatch failed | error status; the error text as body when `expose_errors` is set |
//!
//! [`ResponseHandle`]: weir_core::ResponseHandle

use crate::{
    matching::{PathMatcher, SegmentMatcher},
    registry::Registry,
    request::Request,
    verb::Verb,
};
use std::{fmt, sync::Arc};
use weir_core::{Halt, Params, Response, RouteResult, Status, Value};

type RouteFn = dyn for<'a> Fn(&mut Request<'a>) -> RouteResult + Send + Sync;

/// A request as seen by the app.
#[derive(Debug, Clone)]
pub struct IncomingRequest {
    /// The request method.
    pub verb: Verb,
    /// The request path, starting with `/`.
    pub path: String,
    /// Query or form parameters.
    pub params: Params,
}

impl IncomingRequest {
    /// Create a request without parameters.
    pub fn new(verb: Verb, path: impl Into<String>) -> Self {
        Self {
            verb,
            path: path.into(),
            params: Params::new(),
        }
    }

    /// Replace the parameters.
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }
}

/// A routing tree bound to its registry.
///
/// Cloning is cheap; clones share the registry and the routes.
#[derive(Clone)]
pub struct App {
    registry: Arc<Registry>,
    routes: Arc<RouteFn>,
    matcher: Arc<dyn PathMatcher>,
    not_found_status: Status,
    error_status: Status,
    expose_errors: bool,
}

impl App {
    /// Start building an app over `registry`.
    pub fn builder(registry: impl Into<Arc<Registry>>) -> AppBuilder {
        AppBuilder::new(registry.into())
    }

    /// The shared registry.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Handle one request.
    pub fn call(&self, incoming: IncomingRequest) -> Response {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("request", method = incoming.verb.name(), path = %incoming.path).entered();

        let mut request = Request::new(
            incoming.verb,
            &incoming.path,
            incoming.params,
            &self.registry,
            &*self.matcher,
        );

        match (self.routes)(&mut request) {
            Err(Halt::Finished(response)) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(status = response.status().as_u16(), "request dispatched");
                response
            }
            Ok(()) => {
                #[cfg(feature = "tracing")]
                tracing::warn!("no route matched");
                Response::empty(self.not_found_status)
            }
            Err(Halt::Failed(err)) => {
                #[cfg(feature = "tracing")]
                tracing::error!(error = %err, "dispatch failed");
                let body = self.expose_errors.then(|| Value::new(err.to_string()));
                Response::new(self.error_status, body)
            }
        }
    }
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("registry", &self.registry)
            .field("not_found_status", &self.not_found_status)
            .field("error_status", &self.error_status)
            .field("expose_errors", &self.expose_errors)
            .finish_non_exhaustive()
    }
}

/// Builder for constructing an [`App`].
pub struct AppBuilder {
    registry: Arc<Registry>,
    routes: Option<Arc<RouteFn>>,
    matcher: Arc<dyn PathMatcher>,
    not_found_status: Status,
    error_status: Status,
    expose_errors: bool,
}

impl AppBuilder {
    fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            routes: None,
            matcher: Arc::new(SegmentMatcher),
            not_found_status: Status::NOT_FOUND,
            error_status: Status::INTERNAL_SERVER_ERROR,
            expose_errors: false,
        }
    }

    /// Set the routing tree.
    pub fn routes<F>(mut self, routes: F) -> Self
    where
        F: for<'a> Fn(&mut Request<'a>) -> RouteResult + Send + Sync + 'static,
    {
        let routes: Arc<RouteFn> = Arc::new(routes);
        self.routes = Some(routes);
        self
    }

    /// Replace the path matcher.
    pub fn matcher<M: PathMatcher>(mut self, matcher: M) -> Self {
        self.matcher = Arc::new(matcher);
        self
    }

    /// Status used when nothing matches. Defaults to 404.
    pub fn not_found_status(mut self, status: Status) -> Self {
        self.not_found_status = status;
        self
    }

    /// Status used when dispatch fails. Defaults to 500.
    pub fn error_status(mut self, status: Status) -> Self {
        self.error_status = status;
        self
    }

    /// Put the error text in the body of failed requests.
    pub fn expose_errors(mut self, expose: bool) -> Self {
        self.expose_errors = expose;
        self
    }

    /// Build the app. Without routes, every request is not found.
    pub fn build(self) -> App {
        let routes: Arc<RouteFn> = match self.routes {
            Some(routes) => routes,
            None => Arc::new(no_routes),
        };
        App {
            registry: self.registry,
            routes,
            matcher: self.matcher,
            not_found_status: self.not_found_status,
            error_status: self.error_status,
            expose_errors: self.expose_errors,
        }
    }
}

fn no_routes(_: &mut Request<'_>) -> RouteResult {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Route;
    use weir_core::{Args, BoxError, Callable};

    fn app(expose_errors: bool) -> App {
        let registry = Registry::builder()
            .register(
                "pong",
                Callable::new(|_: Args| -> Result<Value, BoxError> { Ok(Value::new("pong")) }),
            )
            .build();
        App::builder(registry)
            .routes(|r| {
                r.get(Route::new("ping").to("pong"))?;
                r.get(Route::new("broken").to("nothing#here"))
            })
            .expose_errors(expose_errors)
            .build()
    }

    #[test]
    fn test_dispatched() {
        let response = app(false).call(IncomingRequest::new(Verb::GET, "/ping"));
        assert_eq!(response.status(), Status::OK);
        assert_eq!(response.body().and_then(Value::as_str), Some("pong"));
    }

    #[test]
    fn test_not_found() {
        for path in ["/ping/", "/ping/2", "/"] {
            let response = app(false).call(IncomingRequest::new(Verb::GET, path));
            assert_eq!(response.status(), Status::NOT_FOUND);
            assert!(response.body().is_none());
        }
    }

    #[test]
    fn test_error_hidden_by_default() {
        let response = app(false).call(IncomingRequest::new(Verb::GET, "/broken"));
        assert_eq!(response.status(), Status::INTERNAL_SERVER_ERROR);
        assert!(response.body().is_none());
    }

    #[test]
    fn test_error_exposed() {
        let response = app(true).call(IncomingRequest::new(Verb::GET, "/broken"));
        assert_eq!(
            response.body().and_then(Value::as_str),
            Some("nothing registered under key `nothing`")
        );
    }

    #[test]
    fn test_custom_statuses() {
        let app = App::builder(Registry::builder().build())
            .not_found_status(Status::new(410))
            .build();
        assert_eq!(app.call(IncomingRequest::new(Verb::GET, "/")).status().as_u16(), 410);
    }
}
