//! The router: an ordered list of routes and the dispatcher walking it.
//!
//! Routes are tried in registration order, there are no priorities. Exact
//! routes (`get`, `post`, ...) match a method and a path of the same length
//! and stop the scan. Prefix routes (`use_prefix`) match any method and any
//! path starting with their pattern; their middleware runs and the scan goes on,
//! unless the middleware answered the request itself or the prefix route has
//! a handler.
//!
//! ```
//! use micro_mux::router::{handler, Router};
//! use micro_mux::{handler_fn, RequestContext, RouteError};
//!
//! async fn show_user(req: RequestContext) -> String {
//!     let params = req.path_params().expect("exact routes always bind params");
//!     format!("user {}", params.get("id").unwrap_or_default())
//! }
//!
//! fn router() -> Result<Router, RouteError> {
//!     let mut builder = Router::builder();
//!     builder.get("/users/:id", handler(handler_fn(show_user)))?;
//!     Ok(builder.build())
//! }
//! # router().unwrap();
//! ```

mod chain;
pub mod matcher;
mod route;

pub use route::{IntoRouteItems, Route, RouteError, RouteItem, RouteMethod, handler, middleware};

use crate::handler::{BoxedHandler, HandlerResult, RequestHandler};
use crate::{RequestContext, ResponseWriter, path, response};
use async_trait::async_trait;
use chain::{ChainOutcome, run_chain};
use http::Method;
use std::fmt;
use tracing::{debug, trace};

/// An immutable, ordered set of routes.
///
/// `Router` is `Send + Sync`: build it once, then share it between all the
/// tasks serving requests.
pub struct Router {
    routes: Vec<Route>,
    default_handler: Option<BoxedHandler>,
}

impl Router {
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// The registered routes, in registration order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Routes one request and writes its response into `resp`.
    ///
    /// 1. The path is normalized (see [`path::normalize`]). If that changes it,
    ///    the response is a `302 Found` to the normalized path and nothing else
    ///    runs.
    ///    The request's query string is carried over to `Location`, which a
    ///    plain redirect to the cleaned path would drop.
    /// 2. Routes are tried in order. A matching prefix route runs its middleware
    ///    chain; a matching exact route gets a request context carrying the
    ///    placeholder bindings, runs its chain, then its handler.
    /// 3. If no route produced the response, the default handler runs, or a
    ///    plain `404 Not Found` is written.
    ///
    /// Each middleware is decorated with a `next` that only records being
    /// called, and is run on its own against `resp`. A middleware that does not
    /// call `next` ends the dispatch right after it returns. One that does call
    /// it lets the dispatcher move on to the following middleware, then to the
    /// route's handler. This differs from nesting the chain (where `next` runs
    /// the rest of the chain before returning to the middleware): code after
    /// the `next` call runs *before* the rest of the chain.
    ///
    /// An error from a middleware or handler stops the dispatch and is
    /// returned unchanged.
    pub async fn dispatch(&self, resp: &mut ResponseWriter, req: &RequestContext) -> HandlerResult {
        let raw_path = req.uri().path();
        trace!(method = %req.method(), path = raw_path, "dispatch request");

        let normalized = path::normalize(raw_path);
        if normalized != raw_path {
            let location = match req.uri().query() {
                Some(query) => format!("{normalized}?{query}"),
                None => normalized,
            };
            debug!(from = raw_path, to = %location, "redirect to normalized path");
            response::redirect(resp, req.method(), &location);
            return Ok(());
        }

        let segments: Vec<&str> = normalized.split('/').skip(1).collect();

        for (index, route) in self.routes.iter().enumerate() {
            match route.method() {
                RouteMethod::Use => {
                    if !matcher::is_prefix_match(&segments, route) {
                        continue;
                    }
                    trace!(index, prefix = route.path(), "prefix route matched");

                    if run_chain(route.middlewares(), resp, req).await? == ChainOutcome::Finished {
                        return Ok(());
                    }

                    if let Some(terminal) = route.handler() {
                        return terminal.invoke(resp, req).await;
                    }
                }
                RouteMethod::Exact(_) => {
                    let Some(params) = matcher::is_match(req.method(), &segments, route) else {
                        continue;
                    };
                    trace!(index, route = route.path(), params = ?params, "route matched");

                    let req = req.with_path_params(params);

                    if run_chain(route.middlewares(), resp, &req).await? == ChainOutcome::Finished {
                        return Ok(());
                    }

                    return match route.handler() {
                        Some(terminal) => terminal.invoke(resp, &req).await,
                        None => {
                            debug!(route = route.path(), "matched route has no handler");
                            Ok(())
                        }
                    };
                }
            }
        }

        debug!(method = %req.method(), path = raw_path, "no route matched");
        match &self.default_handler {
            Some(default_handler) => default_handler.invoke(resp, req).await,
            None => {
                response::not_found(resp);
                Ok(())
            }
        }
    }
}

/// A router can be used wherever a handler is expected.
#[async_trait]
impl RequestHandler for Router {
    async fn invoke(&self, resp: &mut ResponseWriter, req: &RequestContext) -> HandlerResult {
        self.dispatch(resp, req).await
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes)
            .field("default_handler", &self.default_handler.is_some())
            .finish()
    }
}

/// Collects routes in registration order, then builds the [`Router`].
pub struct RouterBuilder {
    routes: Vec<Route>,
    default_handler: Option<BoxedHandler>,
}

macro_rules! method_route {
    ($name:ident, $method:ident) => {
        #[doc = concat!("Registers an exact `", stringify!($method), "` route.")]
        ///
        /// # Errors
        ///
        /// See [`RouterBuilder::register`].
        ///
        /// # Panics
        ///
        /// Panics if `path` does not begin with `/`.
        pub fn $name(&mut self, path: impl Into<String>, items: impl IntoRouteItems) -> Result<&mut Self, RouteError> {
            self.register(RouteMethod::Exact(Method::$method), path, items)
        }
    };
}

impl RouterBuilder {
    fn new() -> Self {
        Self { routes: Vec::new(), default_handler: None }
    }

    method_route!(get, GET);
    method_route!(post, POST);
    method_route!(put, PUT);
    method_route!(patch, PATCH);
    method_route!(delete, DELETE);
    method_route!(options, OPTIONS);
    method_route!(head, HEAD);

    /// Registers a prefix route.
    ///
    /// The route matches every request whose path starts with `path`, whatever
    /// its method. `items` may be a single middleware, a list of middleware,
    /// and optionally a handler serving the whole prefix.
    ///
    /// # Errors
    ///
    /// See [`RouterBuilder::register`].
    ///
    /// # Panics
    ///
    /// Panics if `path` does not begin with `/`.
    pub fn use_prefix(&mut self, path: impl Into<String>, items: impl IntoRouteItems) -> Result<&mut Self, RouteError> {
        self.register(RouteMethod::Use, path, items)
    }

    /// Appends a route.
    ///
    /// # Errors
    ///
    /// - [`RouteError::MultipleHandlers`] if `items` holds more than one handler
    /// - [`RouteError::MiddlewareAfterHandler`] if a middleware follows the handler
    /// - [`RouteError::UnknownRouteItem`] if a type-erased item is neither
    ///
    /// Nothing is registered when an error is returned.
    ///
    /// # Panics
    ///
    /// Panics if `path` does not begin with `/`: a pattern like that is a
    /// programming error, not something to recover from.
    pub fn register(
        &mut self,
        method: RouteMethod,
        path: impl Into<String>,
        items: impl IntoRouteItems,
    ) -> Result<&mut Self, RouteError> {
        let route = Route::new(method, path.into(), items)?;
        debug!(
            method = %route.method(),
            path = route.path(),
            middlewares = route.middlewares().len(),
            handler = route.handler().is_some(),
            "register route"
        );
        self.routes.push(route);
        Ok(self)
    }

    /// Replaces the built-in `404 Not Found` response for unmatched requests.
    pub fn default_handler(&mut self, handler: impl RequestHandler + 'static) -> &mut Self {
        self.default_handler = Some(Box::new(handler));
        self
    }

    pub fn build(self) -> Router {
        Router { routes: self.routes, default_handler: self.default_handler }
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RouterBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterBuilder")
            .field("routes", &self.routes)
            .field("default_handler", &self.default_handler.is_some())
            .finish()
    }
}
