//! Command-line configuration.
//!
//! Everything comes from flags; the echo text may also come from
//! `ECHO_TEXT`. `LOG_FORWARDED_FOR` is deliberately not a flag: the access
//! log reads it on every request.

use std::io;
use std::net::{SocketAddr, ToSocketAddrs};

use clap::Parser;
use http::StatusCode;

use crate::error::Error;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "http-echo")]
#[command(version)]
#[command(about = "Answers every HTTP request with the same text", long_about = None)]
pub struct CliArgs {
    /// Address to listen on; `:PORT` means every interface
    #[arg(short = 'l', long, default_value = ":5678")]
    pub listen: String,

    /// Text to put in every response
    #[arg(short = 't', long, env = "ECHO_TEXT")]
    pub text: Option<String>,

    /// Status code to answer with
    #[arg(short = 's', long, default_value_t = 200)]
    pub status_code: u16,

    /// Log level for diagnostics on stderr (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Validated configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen: SocketAddr,
    pub text: String,
    pub status: StatusCode,
    pub log_level: String,
}

impl Config {
    /// Parses the process command line.
    pub fn load() -> Result<Self, Error> {
        Self::from_args(CliArgs::parse())
    }

    pub fn from_args(args: CliArgs) -> Result<Self, Error> {
        let text = args
            .text
            .filter(|t| !t.is_empty())
            .ok_or(Error::MissingText)?;
        let status =
            StatusCode::from_u16(args.status_code).map_err(|_| Error::StatusCode(args.status_code))?;

        Ok(Self {
            listen: parse_listen(&args.listen)?,
            text,
            status,
            log_level: args.log_level,
        })
    }
}

/// Parses `host:port`, accepting a bare `:port` as every interface.
///
/// Literal addresses are taken as they are; host names are resolved once,
/// at start-up, and the first address wins.
pub fn parse_listen(listen: &str) -> Result<SocketAddr, Error> {
    if let Some(port) = listen.strip_prefix(':') {
        return Ok(format!("0.0.0.0:{port}").parse::<SocketAddr>()?);
    }
    if let Ok(addr) = listen.parse::<SocketAddr>() {
        return Ok(addr);
    }

    let resolve_err = |source: io::Error| Error::Resolve { listen: listen.to_owned(), source };
    listen
        .to_socket_addrs()
        .map_err(resolve_err)?
        .next()
        .ok_or_else(|| resolve_err(io::Error::new(io::ErrorKind::NotFound, "no addresses")))
}
