//! Response metadata capture.

use std::io;

use http::{HeaderMap, StatusCode};

use crate::response::ResponseWriter;

/// A [`ResponseWriter`] decorator that remembers what went through it.
///
/// Every call is forwarded untouched to the wrapped channel. On the way it
/// records:
///
/// - `status`: the last code passed to `set_status`, or `200` as soon as
///   body bytes are written without one. `None` while neither happened.
/// - `length`: the size of the **most recent** `write` call only. Earlier
///   writes are overwritten, not summed.
#[derive(Debug)]
pub struct CaptureWriter<W> {
    inner: W,
    status: Option<StatusCode>,
    length: usize,
}

impl<W: ResponseWriter> CaptureWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, status: None, length: 0 }
    }

    pub fn status(&self) -> Option<StatusCode> { self.status }
    pub fn length(&self) -> usize { self.length }

    pub fn into_inner(self) -> W { self.inner }
}

impl<W: ResponseWriter> ResponseWriter for CaptureWriter<W> {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        self.inner.headers_mut()
    }

    fn set_status(&mut self, status: StatusCode) {
        self.status = Some(status);
        self.inner.set_status(status);
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.status.get_or_insert(StatusCode::OK);
        self.length = buf.len();
        self.inner.write(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::BufferedResponse;

    struct Broken;

    impl ResponseWriter for Broken {
        fn headers_mut(&mut self) -> &mut HeaderMap {
            unreachable!()
        }
        fn set_status(&mut self, _: StatusCode) {}
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }
    }

    #[test]
    fn starts_empty() {
        let cap = CaptureWriter::new(BufferedResponse::new());
        assert_eq!(cap.status(), None);
        assert_eq!(cap.length(), 0);
    }

    #[test]
    fn write_without_status_implies_ok() {
        let mut cap = CaptureWriter::new(BufferedResponse::new());
        cap.write(b"hello").unwrap();
        assert_eq!(cap.status(), Some(StatusCode::OK));
        assert_eq!(cap.length(), 5);
    }

    #[test]
    fn explicit_status_survives_writes() {
        let mut cap = CaptureWriter::new(BufferedResponse::new());
        cap.set_status(StatusCode::NOT_FOUND);
        cap.write(b"nope").unwrap();
        assert_eq!(cap.status(), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn length_is_last_write_only() {
        let mut cap = CaptureWriter::new(BufferedResponse::new());
        cap.write(&[b'a'; 10]).unwrap();
        cap.write(&[b'b'; 3]).unwrap();
        assert_eq!(cap.status(), Some(StatusCode::OK));
        assert_eq!(cap.length(), 3);

        // the client still got all of it
        assert_eq!(cap.into_inner().body().len(), 13);
    }

    #[test]
    fn forwards_headers_and_status() {
        let mut res = BufferedResponse::new();
        {
            let mut cap = CaptureWriter::new(&mut res);
            cap.headers_mut().insert("x-probe", "1".parse().unwrap());
            cap.set_status(StatusCode::CREATED);
        }
        assert_eq!(res.status(), Some(StatusCode::CREATED));
        assert_eq!(res.headers()["x-probe"], "1");
    }

    #[test]
    fn write_errors_propagate() {
        let mut cap = CaptureWriter::new(Broken);
        let err = cap.write(b"lost").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        // bookkeeping happens before forwarding
        assert_eq!(cap.length(), 4);
    }
}
