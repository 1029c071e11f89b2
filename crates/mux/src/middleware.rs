//! Middleware: decorators turning a `next` handler into another handler.
//!
//! A middleware receives the handler that continues the chain and returns the
//! handler that actually runs. Calling `next` means "carry on", not calling it
//! means the middleware answered the request itself.
//!
//! Note that the router does not nest middleware into each other. Each one is
//! decorated on its own with a `next` that only records that it was called;
//! see [`Router::dispatch`](crate::Router::dispatch) for the consequences.

use crate::handler::BoxedHandler;
use std::sync::Arc;

pub type BoxedMiddleware = Box<dyn Middleware>;

pub trait Middleware: Send + Sync {
    fn decorate(&self, next: BoxedHandler) -> BoxedHandler;
}

impl<M: Middleware + ?Sized> Middleware for Box<M> {
    fn decorate(&self, next: BoxedHandler) -> BoxedHandler {
        (**self).decorate(next)
    }
}

impl<M: Middleware + ?Sized> Middleware for Arc<M> {
    fn decorate(&self, next: BoxedHandler) -> BoxedHandler {
        (**self).decorate(next)
    }
}

/// A middleware backed by a closure.
#[derive(Copy, Clone, Debug)]
pub struct MiddlewareFn<F> {
    f: F,
}

/// Creates a middleware from a `Fn(next) -> handler` closure.
pub fn middleware_fn<F>(f: F) -> MiddlewareFn<F>
where
    F: Fn(BoxedHandler) -> BoxedHandler + Send + Sync,
{
    MiddlewareFn { f }
}

impl<F> Middleware for MiddlewareFn<F>
where
    F: Fn(BoxedHandler) -> BoxedHandler + Send + Sync,
{
    fn decorate(&self, next: BoxedHandler) -> BoxedHandler {
        (self.f)(next)
    }
}
