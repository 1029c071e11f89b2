//! The response sink handlers write into.
//!
//! A [`ResponseWriter`] is created once per request by the caller of
//! [`Router::dispatch`](crate::Router::dispatch) and handed by `&mut` to every
//! middleware and handler that runs for the request, in turn. Whatever they
//! write accumulates; [`ResponseWriter::into_response`] assembles the final
//! [`http::Response`].

use crate::body::ResponseBody;
use bytes::{Bytes, BytesMut};
use http::header::{CONTENT_TYPE, HeaderValue, LOCATION, X_CONTENT_TYPE_OPTIONS};
use http::{HeaderMap, Method, Response, StatusCode};
use mime::Mime;
use tracing::warn;

#[derive(Debug, Default)]
pub struct ResponseWriter {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: BytesMut,
}

impl ResponseWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the status that will be sent, `200 OK` if none was written yet.
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::OK)
    }

    /// Returns true once a status was written, explicitly or by writing body bytes.
    pub fn is_status_written(&self) -> bool {
        self.status.is_some()
    }

    /// Writes the response status.
    ///
    /// Only the first status sticks: later calls are logged and ignored.
    pub fn write_status(&mut self, status: StatusCode) {
        match self.status {
            Some(current) => warn!(current = %current, ignored = %status, "superfluous write_status call"),
            None => self.status = Some(status),
        }
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Appends bytes to the body, implying `200 OK` if no status was written.
    pub fn write(&mut self, bytes: impl AsRef<[u8]>) {
        if self.status.is_none() {
            self.status = Some(StatusCode::OK);
        }
        self.body.extend_from_slice(bytes.as_ref());
    }

    /// Returns the body bytes written so far.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn set_content_type(&mut self, mime: &Mime) {
        if let Ok(value) = HeaderValue::from_str(mime.as_ref()) {
            self.headers.insert(CONTENT_TYPE, value);
        }
    }

    /// Sets `Content-Type` unless a handler already chose one.
    pub fn default_content_type(&mut self, mime: &Mime) {
        if !self.headers.contains_key(CONTENT_TYPE) {
            self.set_content_type(mime);
        }
    }

    pub fn into_response(self) -> Response<ResponseBody> {
        let status = self.status();
        let mut response = Response::new(ResponseBody::once(self.body.freeze()));
        *response.status_mut() = status;
        *response.headers_mut() = self.headers;
        response
    }
}

/// Replies with `404 Not Found` and a short plain text body.
pub(crate) fn not_found(resp: &mut ResponseWriter) {
    resp.set_content_type(&mime::TEXT_PLAIN_UTF_8);
    resp.headers_mut().insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    resp.write_status(StatusCode::NOT_FOUND);
    resp.write("404 page not found\n");
}

/// Replies with `302 Found` pointing at `location`.
///
/// `GET` and `HEAD` requests get an html content type, and `GET` a tiny html
/// body linking to the new location, unless a content type was already set.
pub(crate) fn redirect(resp: &mut ResponseWriter, method: &Method, location: &str) {
    match HeaderValue::try_from(location) {
        Ok(value) => {
            resp.headers_mut().insert(LOCATION, value);
        }
        Err(e) => warn!(location, cause = %e, "redirect location is not a valid header value"),
    }

    let had_content_type = resp.headers().contains_key(CONTENT_TYPE);
    if !had_content_type && (method == Method::GET || method == Method::HEAD) {
        resp.set_content_type(&mime::TEXT_HTML_UTF_8);
    }

    resp.write_status(StatusCode::FOUND);

    if !had_content_type && method == Method::GET {
        resp.write(format!("<a href=\"{}\">Found</a>.\n\n", html_escape(location)));
    }
}

fn html_escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

impl From<ResponseWriter> for Response<ResponseBody> {
    fn from(writer: ResponseWriter) -> Self {
        writer.into_response()
    }
}

impl From<ResponseWriter> for Bytes {
    fn from(writer: ResponseWriter) -> Self {
        writer.body.freeze()
    }
}

#[cfg(test)]
mod tests {
    use super::{ResponseWriter, not_found, redirect};
    use http::header::{CONTENT_TYPE, LOCATION};
    use http::{Method, StatusCode};
    use http_body_util::BodyExt;

    #[test]
    fn test_first_status_wins() {
        let mut resp = ResponseWriter::new();
        assert!(!resp.is_status_written());

        resp.write_status(StatusCode::CREATED);
        resp.write_status(StatusCode::NOT_FOUND);

        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    #[test]
    fn test_write_implies_ok() {
        let mut resp = ResponseWriter::new();
        resp.write("hello ");
        resp.write(b"world");
        resp.write_status(StatusCode::INTERNAL_SERVER_ERROR);

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.body(), b"hello world");
    }

    #[test]
    fn test_not_found() {
        let mut resp = ResponseWriter::new();
        not_found(&mut resp);

        let response = resp.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers().get(CONTENT_TYPE).unwrap(), "text/plain; charset=utf-8");
        assert_eq!(response.headers().get("x-content-type-options").unwrap(), "nosniff");
    }

    #[test]
    fn test_redirect_get() {
        let mut resp = ResponseWriter::new();
        redirect(&mut resp, &Method::GET, "/b?x=<1>");

        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(resp.headers().get(LOCATION).unwrap(), "/b?x=<1>");
        assert_eq!(resp.headers().get(CONTENT_TYPE).unwrap(), "text/html; charset=utf-8");
        assert_eq!(resp.body(), b"<a href=\"/b?x=&lt;1&gt;\">Found</a>.\n\n");
    }

    #[test]
    fn test_redirect_post_has_no_body() {
        let mut resp = ResponseWriter::new();
        redirect(&mut resp, &Method::POST, "/b");

        assert_eq!(resp.status(), StatusCode::FOUND);
        assert!(resp.headers().get(CONTENT_TYPE).is_none());
        assert!(resp.body().is_empty());
    }

    #[tokio::test]
    async fn test_into_response() {
        let mut resp = ResponseWriter::new();
        resp.write_status(StatusCode::CREATED);
        resp.set_content_type(&mime::TEXT_PLAIN_UTF_8);
        resp.write("created ");
        resp.write("item 7");

        let response = resp.into_response();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers().get(CONTENT_TYPE).unwrap(), "text/plain; charset=utf-8");
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"created item 7");
    }

    #[tokio::test]
    async fn test_into_response_implied_ok() {
        let mut resp = ResponseWriter::new();
        resp.write("hello");

        let response = resp.into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"hello");
    }
}
