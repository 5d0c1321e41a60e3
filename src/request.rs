//! Incoming HTTP request type.

use std::borrow::Cow;
use std::net::SocketAddr;

use http::header::{HOST, USER_AGENT};
use http::{HeaderMap, Method, Uri, Version};

/// An incoming HTTP request, as seen by handlers and middleware.
///
/// The body is not kept: every request gets the same answer, so there is
/// nothing in it worth reading.
pub struct Request {
    pub(crate) method: Method,
    pub(crate) uri: Uri,
    pub(crate) version: Version,
    pub(crate) headers: HeaderMap,
    pub(crate) remote_addr: SocketAddr,
}

impl Request {
    /// Builds a request from an [`http::Request`] and the peer address of
    /// the connection it arrived on. The body is dropped.
    pub fn new<B>(req: http::Request<B>, remote_addr: SocketAddr) -> Self {
        let (parts, _body) = req.into_parts();
        Self {
            method: parts.method,
            uri: parts.uri,
            version: parts.version,
            headers: parts.headers,
            remote_addr,
        }
    }

    pub fn method(&self) -> &Method { &self.method }
    pub fn uri(&self) -> &Uri { &self.uri }
    pub fn path(&self) -> &str { self.uri.path() }
    pub fn version(&self) -> Version { self.version }
    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn remote_addr(&self) -> SocketAddr { self.remote_addr }

    /// First value of the named header, if present and valid visible ASCII.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// The host the client asked for: the `Host` header on HTTP/1.x, the
    /// URI authority on HTTP/2. Empty when neither is present.
    pub fn host(&self) -> Cow<'_, str> {
        match self.headers.get(HOST) {
            Some(v) => String::from_utf8_lossy(v.as_bytes()),
            None => Cow::Borrowed(self.uri.authority().map_or("", |a| a.as_str())),
        }
    }

    /// The `User-Agent` header, or the empty string. Bytes outside UTF-8
    /// come out as U+FFFD rather than dropping the whole value.
    pub fn user_agent(&self) -> Cow<'_, str> {
        self.headers
            .get(USER_AGENT)
            .map_or(Cow::Borrowed(""), |v| String::from_utf8_lossy(v.as_bytes()))
    }

    /// Protocol version in request-line form, e.g. `HTTP/1.1`.
    pub fn protocol(&self) -> &'static str {
        match self.version {
            Version::HTTP_09 => "HTTP/0.9",
            Version::HTTP_10 => "HTTP/1.0",
            Version::HTTP_11 => "HTTP/1.1",
            Version::HTTP_2 => "HTTP/2.0",
            Version::HTTP_3 => "HTTP/3.0",
            _ => "HTTP/?",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> SocketAddr {
        "10.0.0.1:4321".parse().unwrap()
    }

    #[test]
    fn reads_request_line_fields() {
        let req = http::Request::builder()
            .method("POST")
            .uri("/a/b?c=d")
            .header("host", "example.com")
            .header("user-agent", "curl/8.0")
            .body(())
            .unwrap();
        let req = Request::new(req, addr());

        assert_eq!(req.method(), Method::POST);
        assert_eq!(req.path(), "/a/b");
        assert_eq!(req.protocol(), "HTTP/1.1");
        assert_eq!(req.host(), "example.com");
        assert_eq!(req.user_agent(), "curl/8.0");
        assert_eq!(req.remote_addr().to_string(), "10.0.0.1:4321");
    }

    #[test]
    fn host_falls_back_to_authority() {
        let req = http::Request::builder()
            .uri("https://svc.internal:8443/ping")
            .version(Version::HTTP_2)
            .body(())
            .unwrap();
        let req = Request::new(req, addr());

        assert_eq!(req.host(), "svc.internal:8443");
        assert_eq!(req.protocol(), "HTTP/2.0");
    }

    #[test]
    fn missing_headers_read_as_empty() {
        let req = Request::new(http::Request::new(()), addr());
        assert_eq!(req.host(), "");
        assert_eq!(req.user_agent(), "");
        assert_eq!(req.header("x-forwarded-for"), None);
    }

    #[test]
    fn non_ascii_header_bytes_survive_lossily() {
        let req = http::Request::builder()
            .header("host", http::HeaderValue::from_bytes(b"caf\xe9.example").unwrap())
            .header("user-agent", http::HeaderValue::from_bytes(b"agent/\xff1").unwrap())
            .body(())
            .unwrap();
        let req = Request::new(req, addr());

        assert_eq!(req.host(), "caf\u{fffd}.example");
        assert_eq!(req.user_agent(), "agent/\u{fffd}1");
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let req = http::Request::builder()
            .header("X-Forwarded-For", "1.2.3.4")
            .body(())
            .unwrap();
        let req = Request::new(req, addr());
        assert_eq!(req.header("x-forwarded-for"), Some("1.2.3.4"));
    }
}
