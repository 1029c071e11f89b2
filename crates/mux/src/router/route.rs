//! Route entries and the items they are registered from.

use crate::handler::{BoxedHandler, RequestHandler};
use crate::middleware::{BoxedMiddleware, Middleware};
use crate::utils::ensure;
use http::Method;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Errors returned when a route is registered with a bad list of items.
///
/// The route is not added to the router when one of these is returned.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteError {
    #[error("route has been given two handlers but only one can be provided")]
    MultipleHandlers,

    #[error("route can't have middleware defined after the handler")]
    MiddlewareAfterHandler,

    #[error("unexpected item passed to route, expected a middleware or a handler")]
    UnknownRouteItem,
}

/// How a route matches requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteMethod {
    /// Matches requests with this method and exactly the pattern's segments.
    Exact(Method),
    /// Matches requests of any method whose path starts with the pattern's segments.
    Use,
}

impl fmt::Display for RouteMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteMethod::Exact(method) => f.write_str(method.as_str()),
            RouteMethod::Use => f.write_str("USE"),
        }
    }
}

/// One thing passed when registering a route: a middleware or the handler.
pub enum RouteItem {
    Middleware(BoxedMiddleware),
    Handler(BoxedHandler),
}

impl fmt::Debug for RouteItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteItem::Middleware(_) => f.write_str("RouteItem::Middleware"),
            RouteItem::Handler(_) => f.write_str("RouteItem::Handler"),
        }
    }
}

/// Wraps a handler as a route item.
pub fn handler<H: RequestHandler + 'static>(handler: H) -> RouteItem {
    RouteItem::Handler(Box::new(handler))
}

/// Wraps a middleware as a route item.
pub fn middleware<M: Middleware + 'static>(middleware: M) -> RouteItem {
    RouteItem::Middleware(Box::new(middleware))
}

/// Recognizes a type-erased item, as handed over by code that assembles
/// routes at runtime.
///
/// Accepted payloads are a [`RouteItem`], a [`BoxedHandler`], an
/// `Arc<dyn RequestHandler>`, a [`BoxedMiddleware`] or an `Arc<dyn Middleware>`.
/// Anything else is a [`RouteError::UnknownRouteItem`].
impl TryFrom<Box<dyn Any + Send>> for RouteItem {
    type Error = RouteError;

    fn try_from(item: Box<dyn Any + Send>) -> Result<Self, Self::Error> {
        let item = match item.downcast::<RouteItem>() {
            Ok(item) => return Ok(*item),
            Err(item) => item,
        };
        let item = match item.downcast::<BoxedHandler>() {
            Ok(handler) => return Ok(RouteItem::Handler(*handler)),
            Err(item) => item,
        };
        let item = match item.downcast::<Arc<dyn RequestHandler>>() {
            Ok(handler) => return Ok(RouteItem::Handler(Box::new(*handler))),
            Err(item) => item,
        };
        let item = match item.downcast::<BoxedMiddleware>() {
            Ok(middleware) => return Ok(RouteItem::Middleware(*middleware)),
            Err(item) => item,
        };
        match item.downcast::<Arc<dyn Middleware>>() {
            Ok(middleware) => Ok(RouteItem::Middleware(Box::new(*middleware))),
            Err(_) => Err(RouteError::UnknownRouteItem),
        }
    }
}

/// Anything that can be turned into the ordered item list of a route.
pub trait IntoRouteItems {
    fn into_route_items(self) -> Result<Vec<RouteItem>, RouteError>;
}

impl IntoRouteItems for RouteItem {
    fn into_route_items(self) -> Result<Vec<RouteItem>, RouteError> {
        Ok(vec![self])
    }
}

impl IntoRouteItems for Vec<RouteItem> {
    fn into_route_items(self) -> Result<Vec<RouteItem>, RouteError> {
        Ok(self)
    }
}

impl<const N: usize> IntoRouteItems for [RouteItem; N] {
    fn into_route_items(self) -> Result<Vec<RouteItem>, RouteError> {
        Ok(Vec::from(self))
    }
}

impl IntoRouteItems for Vec<Box<dyn Any + Send>> {
    fn into_route_items(self) -> Result<Vec<RouteItem>, RouteError> {
        self.into_iter().map(RouteItem::try_from).collect()
    }
}

/// A registered route: method, pattern, middleware chain and optional handler.
///
/// The pattern is split into segments once, here; matching never re-parses it.
pub struct Route {
    method: RouteMethod,
    path: String,
    segments: Vec<String>,
    middlewares: Vec<BoxedMiddleware>,
    handler: Option<BoxedHandler>,
}

impl Route {
    /// # Panics
    ///
    /// Panics if `path` does not begin with `/`.
    pub(crate) fn new(method: RouteMethod, path: String, items: impl IntoRouteItems) -> Result<Self, RouteError> {
        assert!(path.starts_with('/'), "path must begin with '/' in path '{path}'");

        let (middlewares, handler) = split_items(items.into_route_items()?)?;
        let segments = path.split('/').skip(1).map(str::to_owned).collect();

        Ok(Self { method, path, segments, middlewares, handler })
    }

    pub fn method(&self) -> &RouteMethod {
        &self.method
    }

    /// The pattern as registered.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The pattern split on `/`, without the empty segment before the leading slash.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    #[inline]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn middlewares(&self) -> &[BoxedMiddleware] {
        &self.middlewares
    }

    pub fn handler(&self) -> Option<&dyn RequestHandler> {
        self.handler.as_deref()
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("segments", &self.segments)
            .field("middlewares", &self.middlewares.len())
            .field("handler", &self.handler.is_some())
            .finish()
    }
}

/// Splits items into the middleware chain and the handler: at most one
/// handler, and nothing but middleware before it.
fn split_items(items: Vec<RouteItem>) -> Result<(Vec<BoxedMiddleware>, Option<BoxedHandler>), RouteError> {
    let mut middlewares = Vec::with_capacity(items.len());
    let mut handler = None;

    for item in items {
        match item {
            RouteItem::Middleware(middleware) => {
                ensure!(handler.is_none(), RouteError::MiddlewareAfterHandler);
                middlewares.push(middleware);
            }
            RouteItem::Handler(h) => {
                ensure!(handler.is_none(), RouteError::MultipleHandlers);
                handler = Some(h);
            }
        }
    }

    Ok((middlewares, handler))
}
