//! The seam to an HTTP transport.
//!
//! A transport (an HTTP/1.1 connection loop, a test harness, ...) drives a
//! [`Handler`]: it passes a whole `http::Request` and gets a whole
//! `http::Response` back. [`Router`] implements it, so a configured router is
//! installed as the single handler of the transport.

use crate::body::ResponseBody;
use crate::handler::HandlerError;
use crate::{RequestContext, ResponseWriter, Router};
use async_trait::async_trait;
use bytes::Bytes;
use http::{Request, Response};
use http_body::Body;
use std::error::Error;

#[async_trait]
pub trait Handler<ReqBody> {
    type RespBody: Body;
    type Error: Into<Box<dyn Error + Send + Sync>>;

    async fn call(&self, req: Request<ReqBody>) -> Result<Response<Self::RespBody>, Self::Error>;
}

#[async_trait]
impl<ReqBody> Handler<ReqBody> for Router
where
    ReqBody: Into<Bytes> + Send + 'static,
{
    type RespBody = ResponseBody;
    type Error = HandlerError;

    async fn call(&self, req: Request<ReqBody>) -> Result<Response<Self::RespBody>, Self::Error> {
        let req = RequestContext::from(req);
        let mut resp = ResponseWriter::new();
        self.dispatch(&mut resp, &req).await?;
        Ok(resp.into_response())
    }
}
