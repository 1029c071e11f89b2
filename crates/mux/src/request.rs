//! Request information handed to middleware and handlers.
//!
//! This module contains:
//! - `RequestHeader`: the method, uri, version, headers and extensions of a request
//! - `RequestContext`: a request header, its body and, once an exact route
//!   matched, the placeholder bindings of that route
//! - `PathParams`: the placeholder name to path segment mapping

use bytes::Bytes;
use http::request::Parts;
use http::{Extensions, HeaderMap, Method, Request, Uri, Version};
use std::collections::HashMap;
use std::collections::hash_map;
use triomphe::Arc;

/// Wraps a bodyless `http::Request` to expose the header part of a request.
#[derive(Debug)]
pub struct RequestHeader {
    inner: Request<()>,
}

impl AsRef<Request<()>> for RequestHeader {
    fn as_ref(&self) -> &Request<()> {
        &self.inner
    }
}

impl RequestHeader {
    /// Consumes the header and returns the inner `Request<()>`.
    pub fn into_inner(self) -> Request<()> {
        self.inner
    }

    pub fn method(&self) -> &Method {
        self.inner.method()
    }

    pub fn uri(&self) -> &Uri {
        self.inner.uri()
    }

    pub fn version(&self) -> Version {
        self.inner.version()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    /// Returns the extensions the transport attached to the request, for
    /// example a cancellation token or the remote address.
    pub fn extensions(&self) -> &Extensions {
        self.inner.extensions()
    }
}

impl From<Parts> for RequestHeader {
    #[inline]
    fn from(parts: Parts) -> Self {
        Self { inner: Request::from_parts(parts, ()) }
    }
}

impl From<Request<()>> for RequestHeader {
    #[inline]
    fn from(inner: Request<()>) -> Self {
        Self { inner }
    }
}

/// The request as seen by middleware and handlers.
///
/// Cloning is cheap: the header and the path parameters are reference counted
/// and the body is a [`Bytes`].
#[derive(Debug, Clone)]
pub struct RequestContext {
    header: Arc<RequestHeader>,
    body: Bytes,
    path_params: Option<Arc<PathParams>>,
}

impl RequestContext {
    pub fn new(header: RequestHeader, body: Bytes) -> Self {
        Self { header: Arc::new(header), body, path_params: None }
    }

    /// Returns a context for the same request which carries `path_params`.
    ///
    /// The router calls this once an exact route matched, and passes the new
    /// context down to that route's middleware and handler.
    pub fn with_path_params(&self, path_params: PathParams) -> Self {
        Self { header: Arc::clone(&self.header), body: self.body.clone(), path_params: Some(Arc::new(path_params)) }
    }

    pub fn request_header(&self) -> &RequestHeader {
        &self.header
    }

    pub fn method(&self) -> &Method {
        self.header.method()
    }

    pub fn uri(&self) -> &Uri {
        self.header.uri()
    }

    pub fn version(&self) -> Version {
        self.header.version()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.header.headers()
    }

    pub fn extensions(&self) -> &Extensions {
        self.header.extensions()
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Returns the placeholder bindings of the matched exact route.
    ///
    /// `None` means no exact route has matched this request (yet): prefix
    /// middleware, prefix handlers and the not found handler always see `None`.
    /// A matched route without placeholders yields `Some` of an empty map.
    pub fn path_params(&self) -> Option<&PathParams> {
        self.path_params.as_deref()
    }
}

impl<B: Into<Bytes>> From<Request<B>> for RequestContext {
    fn from(request: Request<B>) -> Self {
        let (parts, body) = request.into_parts();
        Self::new(RequestHeader::from(parts), body.into())
    }
}

/// The values bound to the `:name` placeholders of a route pattern.
///
/// For the pattern `/users/:id` and the path `/users/42`, `get("id")` returns
/// `Some("42")`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams {
    inner: HashMap<String, String>,
}

impl PathParams {
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Gets the value bound to `name`, `None` if the pattern has no such placeholder.
    #[inline]
    pub fn get(&self, name: impl AsRef<str>) -> Option<&str> {
        self.inner.get(name.as_ref()).map(String::as_str)
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, String> {
        self.inner.iter()
    }

    /// Binds `name` to `value`; a later binding of the same name wins.
    pub(crate) fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.inner.insert(name.into(), value.into());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PathParams {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self { inner: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

impl<'a> IntoIterator for &'a PathParams {
    type Item = (&'a String, &'a String);
    type IntoIter = hash_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}
