//! HTTP server and graceful shutdown.
//!
//! # Graceful shutdown and Kubernetes
//!
//! When Kubernetes terminates a pod it sends **SIGTERM** and waits
//! `terminationGracePeriodSeconds` (default 30 s) before sending SIGKILL.
//!
//! The server reacts by:
//! 1. Immediately stopping `listener.accept()` — no new connections are made.
//! 2. Telling every open connection to wind down: in-flight requests finish,
//!    idle keep-alive connections close, HTTP/2 peers get a GOAWAY.
//! 3. Returning from [`Server::serve`] once they are all gone, which lets
//!    `main` exit cleanly.
//!
//! Probes are answered in microseconds, so the default grace period is
//! plenty.

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http::StatusCode;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use hyper_util::server::graceful::GracefulShutdown;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::error::Error;
use crate::handler::Handler;
use crate::request::Request;
use crate::response::BufferedResponse;

/// The HTTP server.
pub struct Server {
    listener: TcpListener,
}

impl Server {
    /// Binds a listener on `addr`. Port `0` picks a free port; see
    /// [`local_addr`](Server::local_addr).
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # async fn run() -> Result<(), http_echo::Error> {
    /// use http_echo::Server;
    /// let server = Server::bind("0.0.0.0:5678".parse::<std::net::SocketAddr>()?).await?;
    /// # Ok(()) }
    /// ```
    pub async fn bind(addr: SocketAddr) -> Result<Self, Error> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self { listener })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, Error> {
        Ok(self.listener.local_addr()?)
    }

    /// Answers every request with `handler` until SIGTERM or Ctrl-C, then
    /// drains in-flight connections and returns.
    pub async fn serve<H: Handler>(self, handler: H) -> Result<(), Error> {
        self.serve_with_shutdown(handler, shutdown_signal()).await
    }

    /// Like [`serve`](Server::serve), but stops when `signal` resolves.
    pub async fn serve_with_shutdown<H, S>(self, handler: H, signal: S) -> Result<(), Error>
    where
        H: Handler,
        S: Future<Output = ()>,
    {
        let addr = self.local_addr()?;

        // One chain, shared by every connection task.
        let handler = Arc::new(handler);

        info!(%addr, "http-echo listening");

        // HTTP/1.1 and HTTP/2, whatever the client speaks.
        let builder = ConnBuilder::new(TokioExecutor::new());

        // Every connection is registered here so shutdown can reach the
        // idle ones too, not just wait for them.
        let graceful = GracefulShutdown::new();

        // JoinSet tracks every spawned connection task so we can wait for
        // them all to finish during graceful shutdown.
        let mut tasks = tokio::task::JoinSet::new();

        tokio::pin!(signal);

        loop {
            tokio::select! {
                // Check shutdown first so a SIGTERM immediately stops
                // accepting new connections, even if more are queued.
                biased;

                () = &mut signal => {
                    info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                    break;
                }

                res = self.listener.accept() => {
                    let (stream, remote_addr) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            error!("accept error: {e}");
                            continue;
                        }
                    };

                    let handler = Arc::clone(&handler);
                    let io = TokioIo::new(stream);

                    // Called once per request on the connection, not once
                    // per connection.
                    let svc = service_fn(move |req| {
                        let handler = Arc::clone(&handler);
                        async move { dispatch(&*handler, req, remote_addr) }
                    });

                    let conn = graceful.watch(builder.serve_connection(io, svc).into_owned());

                    tasks.spawn(async move {
                        if let Err(e) = conn.await {
                            debug!(peer = %remote_addr, "connection error: {e}");
                        }
                    });
                }

                // Reap finished connection tasks so the JoinSet does not grow
                // without bound on long-running servers.
                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        }

        // Drain: ask every connection to close once its current request is
        // answered, then wait for all of them.
        graceful.shutdown().await;
        while tasks.join_next().await.is_some() {}

        info!("http-echo stopped");
        Ok(())
    }
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Runs the handler chain for one request and turns what it wrote into a
/// hyper response.
///
/// The error type is [`Infallible`]: a handler error becomes a bare 500 here
/// so hyper never sees one.
fn dispatch<H: Handler + ?Sized>(
    handler: &H,
    req: hyper::Request<Incoming>,
    remote_addr: SocketAddr,
) -> Result<http::Response<Full<Bytes>>, Infallible> {
    let req = Request::new(req, remote_addr);
    let mut res = BufferedResponse::new();

    if let Err(e) = handler.serve(&req, &mut res) {
        error!(peer = %remote_addr, path = req.path(), "handler failed: {e}");
        let mut failed = http::Response::new(Full::new(Bytes::new()));
        *failed.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
        return Ok(failed);
    }

    Ok(res.into_http())
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first shutdown signal the process receives.
///
/// On Unix this listens for both **SIGTERM** (sent by `kubectl` and the
/// Kubernetes control plane) and **SIGINT** (Ctrl-C, for local dev).
/// On Windows only Ctrl-C is available.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let sigterm = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    // `pending()` is a future that never resolves — on non-Unix platforms
    // the SIGTERM arm is effectively disabled.
    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c   => {}
        () = sigterm  => {}
    }
}
