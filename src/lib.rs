//! # http-echo
//!
//! A tiny HTTP server that answers every request, whatever the method or
//! path, with the same text. Point a load-balancer health check or a
//! container readiness probe at it and read the access log.
//!
//! ## The contract
//!
//! One fixed response. No routing, no request bodies, no content
//! negotiation, no auth. What's left is a short middleware chain, applied
//! leaf-first:
//!
//! - [`Echo`](echo::Echo) — writes the configured text
//! - [`AppHeaders`](middleware::AppHeaders) — `X-App-Name`, `X-App-Version`
//!   and a fixed status code
//! - [`AccessLog`](middleware::AccessLog) — one timed line per request,
//!   with status and length captured by
//!   [`CaptureWriter`](middleware::CaptureWriter)
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use http::StatusCode;
//! use http_echo::echo::Echo;
//! use http_echo::middleware::{AccessLog, AppHeaders, LogSink};
//! use http_echo::Server;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), http_echo::Error> {
//!     let app = AccessLog::new(
//!         LogSink::stdout(),
//!         AppHeaders::new(StatusCode::OK, Echo::new("hello-world")),
//!     );
//!
//!     Server::bind("0.0.0.0:5678".parse::<std::net::SocketAddr>()?).await?.serve(app).await
//! }
//! ```

mod error;
mod handler;
mod request;
mod response;
mod server;

pub mod config;
pub mod echo;
pub mod middleware;

pub use error::Error;
pub use handler::Handler;
pub use request::Request;
pub use response::{BufferedResponse, ResponseWriter};
pub use server::Server;

/// Value of the `X-App-Name` header.
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// Value of the `X-App-Version` header.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
