//! A small HTTP request router with exact routes, prefix routes and middleware.
//!
//! Routes are kept in the order they were registered and tried one by one:
//!
//! - exact routes (`get`, `post`, `put`, `patch`, `delete`, `options`, `head`)
//!   match one method and a path with exactly as many segments as their
//!   pattern. Segments starting with `:` are placeholders, bound to the request
//!   segment at the same position and available through
//!   [`RequestContext::path_params`].
//! - prefix routes (`use_prefix`) match any method and any path starting with
//!   their pattern. They carry middleware applied to a whole subtree, and
//!   optionally a handler serving it.
//!
//! Request paths are normalized first: `/a/../b` is redirected to `/b`, while a
//! trailing slash (`/a/b/`) is kept.
//!
//! # Example
//!
//! ```
//! use async_trait::async_trait;
//! use bytes::Bytes;
//! use http::{Request, StatusCode};
//! use micro_mux::router::{handler, middleware, Router};
//! use micro_mux::{
//!     handler_fn, BoxedHandler, HandlerResult, Middleware, RequestContext, RequestHandler, ResponseWriter,
//! };
//!
//! /// Rejects requests without an `authorization` header.
//! struct RequireAuth;
//!
//! struct RequireAuthHandler {
//!     next: BoxedHandler,
//! }
//!
//! impl Middleware for RequireAuth {
//!     fn decorate(&self, next: BoxedHandler) -> BoxedHandler {
//!         Box::new(RequireAuthHandler { next })
//!     }
//! }
//!
//! #[async_trait]
//! impl RequestHandler for RequireAuthHandler {
//!     async fn invoke(&self, resp: &mut ResponseWriter, req: &RequestContext) -> HandlerResult {
//!         if req.headers().contains_key(http::header::AUTHORIZATION) {
//!             return self.next.invoke(resp, req).await;
//!         }
//!         resp.write_status(StatusCode::UNAUTHORIZED);
//!         Ok(())
//!     }
//! }
//!
//! async fn dashboard(_req: RequestContext) -> &'static str {
//!     "dashboard"
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let mut builder = Router::builder();
//! builder.use_prefix("/admin/", middleware(RequireAuth))?;
//! builder.get("/admin/dashboard", handler(handler_fn(dashboard)))?;
//! let router = builder.build();
//!
//! let req = RequestContext::from(Request::get("/admin/dashboard").body(Bytes::new())?);
//! let mut resp = ResponseWriter::new();
//! router.dispatch(&mut resp, &req).await?;
//! assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
//! # Ok(())
//! # }
//! ```
//!
//! # Middleware continuation
//!
//! Middleware are not nested into each other. The router decorates each one
//! with a `next` that only records whether it was called, runs it, and then
//! moves on to the next middleware (or the handler) if it was. See
//! [`Router::dispatch`] for the details.

mod body;
mod handler;
mod middleware;
mod request;
mod responder;
mod response;
mod utils;

pub mod path;
pub mod router;
pub mod service;

pub use body::ResponseBody;
pub use handler::BoxedHandler;
pub use handler::FnHandler;
pub use handler::HandlerError;
pub use handler::HandlerResult;
pub use handler::RequestHandler;
pub use handler::TryFnHandler;
pub use handler::handler_fn;
pub use handler::try_handler_fn;
pub use middleware::BoxedMiddleware;
pub use middleware::Middleware;
pub use middleware::MiddlewareFn;
pub use middleware::middleware_fn;
pub use request::PathParams;
pub use request::RequestContext;
pub use request::RequestHeader;
pub use responder::Responder;
pub use response::ResponseWriter;
pub use router::RouteError;
pub use router::Router;
pub use router::RouterBuilder;
