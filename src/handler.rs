//! Handler trait.
//!
//! # Shape of a handler
//!
//! A handler receives the request by reference and a response channel it
//! writes into. It does not return a response value: the channel *is* the
//! response. This is what lets middleware stack as plain decorators, each
//! one wrapping the channel it passes down:
//!
//! ```text
//! AccessLog ── wraps the channel in a CaptureWriter, starts the clock
//!    ↓
//! AppHeaders ── sets X-App-Name / X-App-Version, sends the status
//!    ↓
//! Echo ── writes the body
//! ```
//!
//! The server stores the outermost handler behind one `Arc` and calls it
//! once per request. Handlers are synchronous: none of them wait on
//! anything but the channel.

use std::io;

use crate::request::Request;
use crate::response::ResponseWriter;

/// Serves one request by writing into a [`ResponseWriter`].
///
/// Implemented for every function or closure with the signature
///
/// ```text
/// fn name(req: &Request, w: &mut dyn ResponseWriter) -> io::Result<()>
/// ```
///
/// and for the middleware types in [`crate::middleware`].
///
/// An `Err` means the channel failed (typically the client went away).
/// It travels up unchanged; the server logs it and gives up on the
/// exchange.
pub trait Handler: Send + Sync + 'static {
    fn serve(&self, req: &Request, w: &mut dyn ResponseWriter) -> io::Result<()>;
}

impl<F> Handler for F
where
    F: Fn(&Request, &mut dyn ResponseWriter) -> io::Result<()> + Send + Sync + 'static,
{
    fn serve(&self, req: &Request, w: &mut dyn ResponseWriter) -> io::Result<()> {
        self(req, w)
    }
}
