//! Command line configuration.
//!
//! Every flag can also come from the environment:
//!
//! ```bash
//! MINI_SERVE_DIRECTORY=/tmp/files ./mini-serve --log-level debug
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

/// Configuration resolved once at startup and handed to [`Server::from_config`](crate::Server::from_config).
#[derive(Debug, Clone, Parser)]
#[command(name = "mini-serve")]
#[command(about = "A tiny HTTP/1.1 server: echo, user-agent reflection and file upload/download")]
#[command(version)]
pub struct ServerConfig {
    /// Directory that `/files/{name}` requests read from and write to
    #[arg(long, default_value = ".", env = "MINI_SERVE_DIRECTORY")]
    pub directory: PathBuf,

    /// Address to listen on
    #[arg(long, default_value = "localhost:4221", env = "MINI_SERVE_ADDRESS")]
    pub address: String,

    /// Maximum log level (trace, debug, info, warn, error)
    #[arg(long = "log-level", default_value = "info", env = "MINI_SERVE_LOG_LEVEL")]
    pub log_level: Level,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ServerConfig::try_parse_from(["mini-serve"]).unwrap();

        assert_eq!(config.directory, PathBuf::from("."));
        assert_eq!(config.address, "localhost:4221");
        assert_eq!(config.log_level, Level::INFO);
    }

    #[test]
    fn explicit_flags() {
        let config = ServerConfig::try_parse_from([
            "mini-serve",
            "--directory",
            "/tmp/files",
            "--address",
            "127.0.0.1:8080",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(config.directory, PathBuf::from("/tmp/files"));
        assert_eq!(config.address, "127.0.0.1:8080");
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    fn reject_unknown_level() {
        assert!(ServerConfig::try_parse_from(["mini-serve", "--log-level", "loud"]).is_err());
    }
}
