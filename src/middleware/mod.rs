//! Middleware layer.
//!
//! Each middleware is a [`Handler`](crate::Handler) that wraps another one.
//! They are applied leaf-first; the binary builds
//!
//! ```rust,no_run
//! use http::StatusCode;
//! use http_echo::echo::Echo;
//! use http_echo::middleware::{AccessLog, AppHeaders, LogSink};
//!
//! let app = AccessLog::new(
//!     LogSink::stdout(),
//!     AppHeaders::new(StatusCode::OK, Echo::new("hello-world")),
//! );
//! ```
//!
//! - [`capture`]: a [`ResponseWriter`](crate::ResponseWriter) decorator
//!   recording status and length for whoever wraps the channel.
//! - [`app_headers`]: `X-App-Name` / `X-App-Version` plus a fixed status.
//! - [`access_log`]: one timed access line per request.

pub mod access_log;
pub mod app_headers;
pub mod capture;

pub use access_log::{AccessLog, AccessRecord, ForwardedFor, LogSink};
pub use app_headers::AppHeaders;
pub use capture::CaptureWriter;
