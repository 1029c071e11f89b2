use crate::RequestContext;
use crate::responder::Responder;
use crate::response::ResponseWriter;
use async_trait::async_trait;
use std::error::Error;
use std::sync::Arc;

/// The error a handler may fail with. The router never inspects it.
pub type HandlerError = Box<dyn Error + Send + Sync>;

pub type HandlerResult = Result<(), HandlerError>;

pub type BoxedHandler = Box<dyn RequestHandler>;

/// Produces the response for a request by writing into a [`ResponseWriter`].
///
/// Handlers own the writer for the duration of `invoke`; the router only
/// looks at it again after `invoke` returned.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    async fn invoke(&self, resp: &mut ResponseWriter, req: &RequestContext) -> HandlerResult;
}

#[async_trait]
impl<H: RequestHandler + ?Sized> RequestHandler for Box<H> {
    async fn invoke(&self, resp: &mut ResponseWriter, req: &RequestContext) -> HandlerResult {
        (**self).invoke(resp, req).await
    }
}

#[async_trait]
impl<H: RequestHandler + ?Sized> RequestHandler for Arc<H> {
    async fn invoke(&self, resp: &mut ResponseWriter, req: &RequestContext) -> HandlerResult {
        (**self).invoke(resp, req).await
    }
}

/// A handler backed by an async closure whose output is a [`Responder`].
#[derive(Debug, Clone, Copy)]
pub struct FnHandler<F> {
    f: F,
}

/// Creates a handler from an async function taking the request context.
///
/// ```
/// use micro_mux::{handler_fn, RequestContext};
///
/// let hello = handler_fn(|req: RequestContext| async move {
///     let id = req.path_params().and_then(|params| params.get("id")).unwrap_or_default();
///     format!("hello {id}")
/// });
/// # let _ = hello;
/// ```
pub fn handler_fn<F, Fut>(f: F) -> FnHandler<F>
where
    F: Fn(RequestContext) -> Fut + Send + Sync,
    Fut: Future + Send,
    Fut::Output: Responder,
{
    FnHandler { f }
}

#[async_trait]
impl<F, Fut> RequestHandler for FnHandler<F>
where
    F: Fn(RequestContext) -> Fut + Send + Sync,
    Fut: Future + Send,
    Fut::Output: Responder + Send,
{
    async fn invoke(&self, resp: &mut ResponseWriter, req: &RequestContext) -> HandlerResult {
        let responder = (self.f)(req.clone()).await;
        responder.respond_to(resp);
        Ok(())
    }
}

/// A handler backed by a fallible async closure.
#[derive(Debug, Clone, Copy)]
pub struct TryFnHandler<F> {
    f: F,
}

/// Like [`handler_fn`], but an `Err` is returned from `invoke` instead of
/// being written into the response.
pub fn try_handler_fn<F, Fut, R, E>(f: F) -> TryFnHandler<F>
where
    F: Fn(RequestContext) -> Fut + Send + Sync,
    Fut: Future<Output = Result<R, E>> + Send,
    R: Responder,
    E: Into<HandlerError>,
{
    TryFnHandler { f }
}

#[async_trait]
impl<F, Fut, R, E> RequestHandler for TryFnHandler<F>
where
    F: Fn(RequestContext) -> Fut + Send + Sync,
    Fut: Future<Output = Result<R, E>> + Send,
    R: Responder + Send,
    E: Into<HandlerError> + Send,
{
    async fn invoke(&self, resp: &mut ResponseWriter, req: &RequestContext) -> HandlerResult {
        let responder = (self.f)(req.clone()).await.map_err(Into::into)?;
        responder.respond_to(resp);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{BoxedHandler, RequestHandler, handler_fn, try_handler_fn};
    use crate::{RequestContext, ResponseWriter};
    use bytes::Bytes;
    use http::{Request, StatusCode};
    use std::io;

    fn assert_is_handler<T: RequestHandler>(_handler: &T) {
        // no op
    }

    fn request(path: &str) -> RequestContext {
        RequestContext::from(Request::get(path).body(Bytes::new()).unwrap())
    }

    #[test]
    fn assert_fn_is_handler() {
        let handler = handler_fn(|_req: RequestContext| async {});
        assert_is_handler(&handler);

        let boxed: BoxedHandler = Box::new(handler);
        assert_is_handler(&boxed);
    }

    #[tokio::test]
    async fn test_handler_fn_writes_responder() {
        let handler = handler_fn(|req: RequestContext| async move { (StatusCode::ACCEPTED, req.uri().path().to_string()) });

        let mut resp = ResponseWriter::new();
        handler.invoke(&mut resp, &request("/hello")).await.unwrap();

        assert_eq!(resp.status(), StatusCode::ACCEPTED);
        assert_eq!(resp.body(), b"/hello");
    }

    #[tokio::test]
    async fn test_try_handler_fn_returns_error() {
        let handler =
            try_handler_fn(|_req: RequestContext| async { Err::<&'static str, _>(io::Error::other("disk on fire")) });

        let mut resp = ResponseWriter::new();
        let err = handler.invoke(&mut resp, &request("/")).await.unwrap_err();

        assert_eq!(err.to_string(), "disk on fire");
        assert!(!resp.is_status_written());
    }
}
