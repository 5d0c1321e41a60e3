//! The echo handler.
//!
//! Answers every request with the configured text and a trailing newline,
//! as a single write. It never touches headers or the status: those are
//! [`AppHeaders`](crate::middleware::AppHeaders)' job.

use std::io;

use crate::handler::Handler;
use crate::request::Request;
use crate::response::ResponseWriter;

#[derive(Debug, Clone)]
pub struct Echo {
    body: Box<[u8]>,
}

impl Echo {
    pub fn new(text: impl Into<String>) -> Self {
        let mut body = text.into();
        body.push('\n');
        Self { body: body.into_bytes().into_boxed_slice() }
    }

    /// The exact bytes every response carries.
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

impl Handler for Echo {
    fn serve(&self, _req: &Request, w: &mut dyn ResponseWriter) -> io::Result<()> {
        w.write(&self.body).map(drop)
    }
}
