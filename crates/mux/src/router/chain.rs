//! Runs a route's middleware chain one middleware at a time.
//!
//! Middleware are never nested into each other. Each one is decorated with its
//! own [`ContinueSignal`] as `next`, the decorated handler runs against the
//! real response writer, and only afterwards the signal tells whether the
//! middleware asked to continue. Calling `next` therefore does not run the
//! rest of the chain inside the middleware: it returns immediately, and the
//! following middleware (or the handler) runs once the calling middleware has
//! returned.

use crate::handler::{HandlerError, HandlerResult, RequestHandler};
use crate::middleware::BoxedMiddleware;
use crate::{RequestContext, ResponseWriter};
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChainOutcome {
    /// Every middleware called `next`.
    Continue,
    /// A middleware did not call `next` and owns the response.
    Finished,
}

/// The synthetic `next` handed to a middleware: invoking it only flips the
/// `finished` flag.
#[derive(Debug, Clone)]
pub(crate) struct ContinueSignal {
    finished: Arc<AtomicBool>,
}

impl ContinueSignal {
    fn new() -> Self {
        Self { finished: Arc::new(AtomicBool::new(true)) }
    }

    fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }
}

#[async_trait]
impl RequestHandler for ContinueSignal {
    async fn invoke(&self, _resp: &mut ResponseWriter, _req: &RequestContext) -> HandlerResult {
        self.finished.store(false, Ordering::Release);
        Ok(())
    }
}

/// Runs `middlewares` in order until one of them does not call `next`.
///
/// An empty chain continues. A middleware error stops the chain and is
/// returned as is.
pub(crate) async fn run_chain(
    middlewares: &[BoxedMiddleware],
    resp: &mut ResponseWriter,
    req: &RequestContext,
) -> Result<ChainOutcome, HandlerError> {
    for (index, middleware) in middlewares.iter().enumerate() {
        let signal = ContinueSignal::new();
        let handler = middleware.decorate(Box::new(signal.clone()));

        handler.invoke(resp, req).await?;

        if signal.is_finished() {
            debug!(index, "middleware finished the request");
            return Ok(ChainOutcome::Finished);
        }
    }

    Ok(ChainOutcome::Continue)
}
