//! Converts the return values of [`handler_fn`](crate::handler_fn) closures into
//! writes on the [`ResponseWriter`].
//!
//! Strings become `text/plain` bodies, a `StatusCode` paired with another
//! responder sets the status first, `Result` and `Option` delegate to their
//! contents.

use crate::response::ResponseWriter;
use bytes::Bytes;
use http::StatusCode;
use std::convert::Infallible;

/// A type that knows how to write itself into a response.
pub trait Responder {
    fn respond_to(self, resp: &mut ResponseWriter);
}

impl<T: Responder, E: Responder> Responder for Result<T, E> {
    fn respond_to(self, resp: &mut ResponseWriter) {
        match self {
            Ok(t) => t.respond_to(resp),
            Err(e) => e.respond_to(resp),
        }
    }
}

/// `None` writes nothing.
impl<T: Responder> Responder for Option<T> {
    fn respond_to(self, resp: &mut ResponseWriter) {
        if let Some(t) = self {
            t.respond_to(resp);
        }
    }
}

impl Responder for StatusCode {
    fn respond_to(self, resp: &mut ResponseWriter) {
        resp.write_status(self);
    }
}

impl<T: Responder> Responder for (StatusCode, T) {
    fn respond_to(self, resp: &mut ResponseWriter) {
        let (status, responder) = self;
        resp.write_status(status);
        responder.respond_to(resp);
    }
}

impl Responder for () {
    fn respond_to(self, _resp: &mut ResponseWriter) {}
}

impl Responder for &'static str {
    fn respond_to(self, resp: &mut ResponseWriter) {
        resp.default_content_type(&mime::TEXT_PLAIN_UTF_8);
        resp.write(self);
    }
}

impl Responder for String {
    fn respond_to(self, resp: &mut ResponseWriter) {
        resp.default_content_type(&mime::TEXT_PLAIN_UTF_8);
        resp.write(self);
    }
}

impl Responder for Bytes {
    fn respond_to(self, resp: &mut ResponseWriter) {
        resp.default_content_type(&mime::APPLICATION_OCTET_STREAM);
        resp.write(self);
    }
}

impl Responder for Infallible {
    fn respond_to(self, _resp: &mut ResponseWriter) {
        match self {}
    }
}

#[cfg(test)]
mod tests {
    use super::Responder;
    use crate::response::ResponseWriter;
    use http::StatusCode;
    use http::header::CONTENT_TYPE;

    #[test]
    fn test_string_is_plain_text() {
        let mut resp = ResponseWriter::new();
        "hello".to_string().respond_to(&mut resp);

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get(CONTENT_TYPE).unwrap(), "text/plain; charset=utf-8");
        assert_eq!(resp.body(), b"hello");
    }

    #[test]
    fn test_status_and_body() {
        let mut resp = ResponseWriter::new();
        (StatusCode::CREATED, "created").respond_to(&mut resp);

        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(resp.body(), b"created");
    }

    #[test]
    fn test_result_err() {
        let mut resp = ResponseWriter::new();
        let result: Result<&'static str, (StatusCode, &'static str)> = Err((StatusCode::BAD_REQUEST, "bad id"));
        result.respond_to(&mut resp);

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(resp.body(), b"bad id");
    }

    #[test]
    fn test_none_writes_nothing() {
        let mut resp = ResponseWriter::new();
        Option::<String>::None.respond_to(&mut resp);

        assert!(!resp.is_status_written());
        assert!(resp.body().is_empty());
    }
}
