//! A tiny HTTP/1.1 server built on [`mini_http`].
//!
//! It serves a fixed route table over one-request-per-connection TCP:
//!
//! | Method | Path | Response |
//! |---|---|---|
//! | GET | `/` | 200, empty body |
//! | GET | `/echo/{value}` | 200, `{value}` as text, gzip when accepted |
//! | GET | `/user-agent` | 200, the `User-Agent` request header |
//! | GET | `/files/{name}` | 200 with the file, 404 when absent |
//! | POST | `/files/{name}` | 201 after writing the body to the file |
//! | * | anything else | 404 |
//!
//! ```no_run
//! use mini_serve::{Server, ServerConfig, shutdown_signal};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig {
//!         directory: "/tmp/files".into(),
//!         address: "127.0.0.1:4221".into(),
//!         log_level: tracing::Level::INFO,
//!     };
//!     Server::from_config(&config)?.start(shutdown_signal()).await?;
//!     Ok(())
//! }
//! ```

mod config;
mod encoding;
mod error;
mod request;
mod server;

pub mod filter;
pub mod handler;
pub mod handlers;
pub mod router;

pub use config::ServerConfig;
pub use error::{HandlerError, ServerBuildError, ServerError};
pub use request::RequestContext;
pub use router::Router;
pub use server::{Server, ServerBuilder, shutdown_signal};
