//! Builds a small router and dispatches a few requests through it.
//!
//! ```text
//! cargo run -p micro-mux --example hello_mux
//! ```

use async_trait::async_trait;
use bytes::Bytes;
use http::{Method, Request, StatusCode};
use micro_mux::router::{Router, handler, middleware};
use micro_mux::service::Handler;
use micro_mux::{
    BoxedHandler, HandlerResult, Middleware, RequestContext, RequestHandler, ResponseWriter, RouteError, handler_fn,
};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

/// Logs every request reaching it, then continues.
struct AccessLog;

struct AccessLogHandler {
    next: BoxedHandler,
}

impl Middleware for AccessLog {
    fn decorate(&self, next: BoxedHandler) -> BoxedHandler {
        Box::new(AccessLogHandler { next })
    }
}

#[async_trait]
impl RequestHandler for AccessLogHandler {
    async fn invoke(&self, resp: &mut ResponseWriter, req: &RequestContext) -> HandlerResult {
        info!(method = %req.method(), path = req.uri().path(), "access");
        self.next.invoke(resp, req).await
    }
}

/// Answers `401` unless the request carries a token.
struct RequireToken;

struct RequireTokenHandler {
    next: BoxedHandler,
}

impl Middleware for RequireToken {
    fn decorate(&self, next: BoxedHandler) -> BoxedHandler {
        Box::new(RequireTokenHandler { next })
    }
}

#[async_trait]
impl RequestHandler for RequireTokenHandler {
    async fn invoke(&self, resp: &mut ResponseWriter, req: &RequestContext) -> HandlerResult {
        if req.headers().contains_key("x-token") {
            return self.next.invoke(resp, req).await;
        }
        resp.write_status(StatusCode::UNAUTHORIZED);
        resp.write("missing token\n");
        Ok(())
    }
}

async fn index(_req: RequestContext) -> &'static str {
    "hello mux\n"
}

async fn show_user(req: RequestContext) -> String {
    let id = req.path_params().and_then(|params| params.get("id")).unwrap_or_default();
    format!("user {id}\n")
}

async fn dashboard(_req: RequestContext) -> &'static str {
    "admin dashboard\n"
}

fn routes() -> Result<Router, RouteError> {
    let mut builder = Router::builder();
    builder.use_prefix("/", middleware(AccessLog))?;
    builder.get("/", handler(handler_fn(index)))?;
    builder.get("/users/:id", handler(handler_fn(show_user)))?;
    builder.use_prefix("/admin/", middleware(RequireToken))?;
    builder.get("/admin/dashboard", handler(handler_fn(dashboard)))?;
    Ok(builder.build())
}

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::DEBUG).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let router = routes().expect("routes are valid");

    let requests = [
        (Method::GET, "/", None),
        (Method::GET, "/users/42", None),
        (Method::GET, "/users/../users/7", None),
        (Method::GET, "/admin/dashboard", None),
        (Method::GET, "/admin/dashboard", Some("secret")),
        (Method::DELETE, "/nowhere", None),
    ];

    for (method, uri, token) in requests {
        let mut request = Request::builder().method(method.clone()).uri(uri);
        if let Some(token) = token {
            request = request.header("x-token", token);
        }
        let request = request.body(Bytes::new()).expect("request is valid");

        match router.call(request).await {
            Ok(response) => info!(%method, uri, status = %response.status(), "response"),
            Err(e) => info!(%method, uri, error = %e, "handler failed"),
        }
    }
}
