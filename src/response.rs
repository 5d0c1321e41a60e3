//! The outbound response channel.
//!
//! Handlers never build a response value. They are handed a
//! [`ResponseWriter`] and push headers, a status and body bytes into it,
//! in that order. The channel is write-only: nothing on the trait tells
//! you what was already sent. Middleware that needs to know afterwards
//! (the access log) wraps the channel and keeps its own notes, see
//! [`CaptureWriter`](crate::middleware::CaptureWriter).

use std::io;

use bytes::Bytes;
use http::header::{CONTENT_TYPE, HeaderValue};
use http::{HeaderMap, StatusCode};
use http_body_util::Full;
use tracing::warn;

// ── ResponseWriter ────────────────────────────────────────────────────────────

/// Write side of one HTTP exchange.
pub trait ResponseWriter {
    /// Response headers still to be sent. Changes made after the status
    /// has been committed do not reach the client.
    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// Sends the status line. Call at most once, before any body bytes.
    fn set_status(&mut self, status: StatusCode);

    /// Sends body bytes. Commits `200 OK` first when no status was set.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize>;
}

impl<W: ResponseWriter + ?Sized> ResponseWriter for &mut W {
    fn headers_mut(&mut self) -> &mut HeaderMap { (**self).headers_mut() }
    fn set_status(&mut self, status: StatusCode) { (**self).set_status(status) }
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> { (**self).write(buf) }
}

// ── BufferedResponse ──────────────────────────────────────────────────────────

/// In-memory [`ResponseWriter`] the server hands to the handler chain.
///
/// Everything is collected and turned into one hyper response once the
/// handler returns. Like a socket, it only takes the first status: a
/// second `set_status`, or one after body bytes, is ignored. Headers are
/// frozen at the same moment.
#[derive(Debug, Default)]
pub struct BufferedResponse {
    headers: HeaderMap,
    // scratch map handed out once `headers` is frozen
    late_headers: HeaderMap,
    status: Option<StatusCode>,
    body: Vec<u8>,
}

impl BufferedResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed status, if any.
    pub fn status(&self) -> Option<StatusCode> { self.status }
    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Finishes the exchange. An uncommitted status becomes `200 OK`; a
    /// non-empty body without a content type is labelled as plain text.
    pub fn into_http(self) -> http::Response<Full<Bytes>> {
        let mut headers = self.headers;
        if !self.body.is_empty() && !headers.contains_key(CONTENT_TYPE) {
            headers.insert(
                CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            );
        }

        let mut res = http::Response::new(Full::new(Bytes::from(self.body)));
        *res.status_mut() = self.status.unwrap_or(StatusCode::OK);
        *res.headers_mut() = headers;
        res
    }
}

impl ResponseWriter for BufferedResponse {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        if self.status.is_some() {
            return &mut self.late_headers;
        }
        &mut self.headers
    }

    fn set_status(&mut self, status: StatusCode) {
        match self.status {
            None => self.status = Some(status),
            Some(sent) => {
                warn!(sent = sent.as_u16(), ignored = status.as_u16(), "superfluous set_status call");
            }
        }
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.status.get_or_insert(StatusCode::OK);
        self.body.extend_from_slice(buf);
        Ok(buf.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_status_wins() {
        let mut res = BufferedResponse::new();
        res.set_status(StatusCode::ACCEPTED);
        res.set_status(StatusCode::NOT_FOUND);
        assert_eq!(res.status(), Some(StatusCode::ACCEPTED));
    }

    #[test]
    fn write_commits_ok_and_ignores_later_status() {
        let mut res = BufferedResponse::new();
        assert_eq!(res.write(b"hi").unwrap(), 2);
        res.set_status(StatusCode::IM_A_TEAPOT);
        assert_eq!(res.status(), Some(StatusCode::OK));
    }

    #[test]
    fn body_accumulates_across_writes() {
        let mut res = BufferedResponse::new();
        res.write(b"hello ").unwrap();
        res.write(b"world").unwrap();
        assert_eq!(res.body(), b"hello world");
    }

    #[test]
    fn headers_freeze_on_commit() {
        let mut res = BufferedResponse::new();
        res.headers_mut().insert("x-early", HeaderValue::from_static("1"));
        res.set_status(StatusCode::OK);
        res.headers_mut().insert("x-late", HeaderValue::from_static("1"));
        res.headers_mut().remove("x-early");

        assert!(res.headers().contains_key("x-early"));
        assert!(!res.headers().contains_key("x-late"));
    }

    #[test]
    fn into_http_defaults() {
        let res = BufferedResponse::new().into_http();
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().get(CONTENT_TYPE).is_none());

        let mut res = BufferedResponse::new();
        res.write(b"ok\n").unwrap();
        let res = res.into_http();
        assert_eq!(res.headers()[CONTENT_TYPE], "text/plain; charset=utf-8");
    }

    #[test]
    fn into_http_keeps_explicit_content_type() {
        let mut res = BufferedResponse::new();
        res.headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        res.write(b"{}").unwrap();
        let res = res.into_http();
        assert_eq!(res.headers()[CONTENT_TYPE], "application/json");
    }
}
