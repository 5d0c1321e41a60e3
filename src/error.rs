//! Unified error type.

use std::fmt;
use std::net::AddrParseError;

/// The error type returned by http-echo's fallible operations.
///
/// What the client sees is always an HTTP response. This type surfaces
/// start-up and infrastructure failures: a bad command line, a port that
/// cannot be bound, a listener that stops accepting.
#[derive(Debug)]
pub enum Error {
    /// Socket-level failure while binding or serving.
    Io(std::io::Error),
    /// Not a literal `ip:port` pair.
    Addr(AddrParseError),
    /// `--listen` names a host that does not resolve.
    Resolve { listen: String, source: std::io::Error },
    /// `--status-code` is outside 100..=999.
    StatusCode(u16),
    /// Neither `--text` nor `ECHO_TEXT` supplied anything to echo.
    MissingText,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Addr(e) => write!(f, "invalid listen address: {e}"),
            Self::Resolve { listen, source } => write!(f, "cannot resolve `{listen}`: {source}"),
            Self::StatusCode(code) => write!(f, "invalid status code: {code}"),
            Self::MissingText => f.write_str("missing -text option or ECHO_TEXT env var"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Addr(e) => Some(e),
            Self::Resolve { source, .. } => Some(source),
            Self::StatusCode(_) | Self::MissingText => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<AddrParseError> for Error {
    fn from(e: AddrParseError) -> Self {
        Self::Addr(e)
    }
}
