//! Identification headers.

use std::io;

use http::header::{HeaderName, HeaderValue};
use http::StatusCode;

use crate::handler::Handler;
use crate::request::Request;
use crate::response::ResponseWriter;
use crate::{APP_NAME, APP_VERSION};

pub const X_APP_NAME: HeaderName = HeaderName::from_static("x-app-name");
pub const X_APP_VERSION: HeaderName = HeaderName::from_static("x-app-version");

/// Stamps every response with `X-App-Name` / `X-App-Version` and sends a
/// fixed status before the wrapped handler runs.
///
/// Because the status is always sent here, whatever the inner handler does
/// with `set_status` afterwards is too late to change it.
#[derive(Debug, Clone)]
pub struct AppHeaders<H> {
    status: StatusCode,
    inner: H,
}

impl<H: Handler> AppHeaders<H> {
    pub fn new(status: StatusCode, inner: H) -> Self {
        Self { status, inner }
    }
}

impl<H: Handler> Handler for AppHeaders<H> {
    fn serve(&self, req: &Request, w: &mut dyn ResponseWriter) -> io::Result<()> {
        let headers = w.headers_mut();
        headers.insert(X_APP_NAME, HeaderValue::from_static(APP_NAME));
        headers.insert(X_APP_VERSION, HeaderValue::from_static(APP_VERSION));
        w.set_status(self.status);
        self.inner.serve(req, w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::BufferedResponse;

    fn request() -> Request {
        Request::new(http::Request::new(()), "127.0.0.1:1".parse().unwrap())
    }

    fn silent(_: &Request, _: &mut dyn ResponseWriter) -> io::Result<()> {
        Ok(())
    }

    fn teapot(_: &Request, w: &mut dyn ResponseWriter) -> io::Result<()> {
        w.headers_mut().remove(X_APP_NAME);
        w.set_status(StatusCode::IM_A_TEAPOT);
        w.write(b"short and stout").map(drop)
    }

    #[test]
    fn sets_identity_and_status() {
        let mut res = BufferedResponse::new();
        AppHeaders::new(StatusCode::ACCEPTED, silent)
            .serve(&request(), &mut res)
            .unwrap();

        assert_eq!(res.status(), Some(StatusCode::ACCEPTED));
        assert_eq!(res.headers()["x-app-name"], APP_NAME);
        assert_eq!(res.headers()["x-app-version"], APP_VERSION);
    }

    #[test]
    fn status_is_sent_before_inner_runs() {
        let mut res = BufferedResponse::new();
        AppHeaders::new(StatusCode::OK, teapot)
            .serve(&request(), &mut res)
            .unwrap();

        assert_eq!(res.status(), Some(StatusCode::OK));
        assert_eq!(res.body(), b"short and stout");
        assert_eq!(res.headers()["x-app-name"], APP_NAME);
        assert_eq!(res.headers()["x-app-version"], APP_VERSION);
    }
}
