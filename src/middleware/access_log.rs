//! Per-request access log.
//!
//! One line per request, written to a [`LogSink`] once the wrapped handler
//! is done with the response:
//!
//! ```text
//! 2026/10/16 09:41:07 example.com 10.0.0.1:4321 "GET / HTTP/1.1" 200 6 "curl/8.5.0" 41.2µs
//! ```
//!
//! With `LOG_FORWARDED_FOR` set to anything non-empty, the first
//! `X-Forwarded-For` hop (or `-`) is inserted after the peer address:
//!
//! ```text
//! 2026/10/16 09:41:07 example.com 10.0.0.1:4321 203.0.113.9 "GET / HTTP/1.1" 200 6 "curl/8.5.0" 41.2µs
//! ```
//!
//! The variable is looked up on every request, so flipping it on a running
//! process takes effect immediately.
//!
//! These lines are not `tracing` events. They go verbatim to the sink so
//! that whatever scrapes them sees a stable, greppable format.

use std::borrow::Cow;
use std::fmt;
use std::io::{self, Write};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use tracing::error;

use super::capture::CaptureWriter;
use crate::handler::Handler;
use crate::request::Request;
use crate::response::ResponseWriter;

/// Environment variable that switches on the forwarded-address field.
pub const LOG_FORWARDED_FOR_ENV: &str = "LOG_FORWARDED_FOR";

const LOG_DATE_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

// ── LogSink ───────────────────────────────────────────────────────────────────

/// Shared destination for access lines.
///
/// Clones share one writer behind a mutex. Each line is written whole,
/// with a single `write_all` under the lock, so lines from concurrent
/// requests never interleave.
pub struct LogSink<W> {
    inner: Arc<Mutex<W>>,
}

impl<W: Write> LogSink<W> {
    pub fn new(writer: W) -> Self {
        Self { inner: Arc::new(Mutex::new(writer)) }
    }

    /// Appends `line` and flushes.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut w = self.lock();
        w.write_all(line.as_bytes())?;
        w.flush()
    }

    /// Direct access to the writer, e.g. to read back a `Vec<u8>` in tests.
    pub fn lock(&self) -> MutexGuard<'_, W> {
        // a panic mid-write can only leave a torn line behind, not bad state
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LogSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W> Clone for LogSink<W> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

// ── ForwardedFor ──────────────────────────────────────────────────────────────

/// Whether access lines carry the `X-Forwarded-For` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardedFor {
    /// On while the named variable is set and non-empty. Read per request.
    FromEnv(&'static str),
    Always,
    Never,
}

impl ForwardedFor {
    pub fn enabled(&self) -> bool {
        match self {
            Self::FromEnv(var) => std::env::var_os(var).is_some_and(|v| !v.is_empty()),
            Self::Always => true,
            Self::Never => false,
        }
    }
}

impl Default for ForwardedFor {
    fn default() -> Self {
        Self::FromEnv(LOG_FORWARDED_FOR_ENV)
    }
}

/// First hop of `X-Forwarded-For`, trimmed; `-` when there is none.
pub fn first_forwarded_for(req: &Request) -> &str {
    req.header("x-forwarded-for")
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|hop| !hop.is_empty())
        .unwrap_or("-")
}

// ── AccessRecord ──────────────────────────────────────────────────────────────

/// Everything one access line says about a request. `Display` renders the
/// line without its trailing newline.
#[derive(Debug, Clone)]
pub struct AccessRecord<'a> {
    /// When the response finished, not when the request arrived.
    pub time: DateTime<Local>,
    pub host: Cow<'a, str>,
    pub remote_addr: SocketAddr,
    pub forwarded_for: Option<&'a str>,
    pub method: &'a str,
    pub path: &'a str,
    pub protocol: &'a str,
    pub status: u16,
    pub length: usize,
    pub user_agent: Cow<'a, str>,
    pub duration: Duration,
}

impl fmt::Display for AccessRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} ", self.time.format(LOG_DATE_FORMAT), self.host, self.remote_addr)?;
        if let Some(hop) = self.forwarded_for {
            write!(f, "{hop} ")?;
        }
        write!(
            f,
            "\"{} {} {}\" {} {} \"{}\" {:?}",
            self.method,
            self.path,
            self.protocol,
            self.status,
            self.length,
            self.user_agent,
            self.duration,
        )
    }
}

// ── AccessLog ─────────────────────────────────────────────────────────────────

/// Times each request and writes one [`AccessRecord`] line to the sink.
///
/// The line is emitted from a drop guard: a handler that returns an error,
/// or panics, still gets logged with whatever status and length it got to.
pub struct AccessLog<H, W> {
    inner: H,
    sink: LogSink<W>,
    forwarded_for: ForwardedFor,
}

impl<H: Handler, W: Write + Send + 'static> AccessLog<H, W> {
    pub fn new(sink: LogSink<W>, inner: H) -> Self {
        Self { inner, sink, forwarded_for: ForwardedFor::default() }
    }

    /// Overrides where the forwarded-address toggle comes from.
    pub fn forwarded_for(mut self, forwarded_for: ForwardedFor) -> Self {
        self.forwarded_for = forwarded_for;
        self
    }
}

impl<H: Handler, W: Write + Send + 'static> Handler for AccessLog<H, W> {
    fn serve(&self, req: &Request, w: &mut dyn ResponseWriter) -> io::Result<()> {
        let mut pending = Pending {
            log: self,
            req,
            start: Instant::now(),
            capture: CaptureWriter::new(w),
        };
        self.inner.serve(req, &mut pending.capture)
    }
}

/// A request in flight. Dropping it writes the access line.
struct Pending<'a, H, W: Write, R: ResponseWriter> {
    log: &'a AccessLog<H, W>,
    req: &'a Request,
    start: Instant,
    capture: CaptureWriter<R>,
}

impl<H, W: Write, R: ResponseWriter> Drop for Pending<'_, H, W, R> {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        let req = self.req;

        let record = AccessRecord {
            time: Local::now(),
            host: req.host(),
            remote_addr: req.remote_addr(),
            forwarded_for: self
                .log
                .forwarded_for
                .enabled()
                .then(|| first_forwarded_for(req)),
            method: req.method().as_str(),
            path: req.path(),
            protocol: req.protocol(),
            // nothing written at all still goes out as 200
            status: self.capture.status().map_or(200, |s| s.as_u16()),
            length: self.capture.length(),
            user_agent: req.user_agent(),
            duration,
        };

        if let Err(e) = self.log.sink.write_line(&format!("{record}\n")) {
            error!("access log write failed: {e}");
        }
    }
}
