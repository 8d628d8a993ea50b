//! A small asynchronous HTTP/1.1 server core: one request per connection.
//!
//! This crate turns a pair of async byte streams into exactly one HTTP exchange.
//! It reads a request line, a header block and a `Content-Length` framed body,
//! hands the buffered request to a [`handler::Handler`], writes the complete
//! response and closes the connection.
//!
//! # Example
//!
//! ```no_run
//! use bytes::Bytes;
//! use http::{Request, Response, StatusCode};
//! use std::error::Error;
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//! use tracing::{error, info, warn};
//! use mini_http::connection::HttpConnection;
//! use mini_http::handler::make_handler;
//!
//! #[tokio::main]
//! async fn main() {
//!     let tcp_listener = match TcpListener::bind("127.0.0.1:4221").await {
//!         Ok(tcp_listener) => tcp_listener,
//!         Err(e) => {
//!             error!(cause = %e, "bind server error");
//!             return;
//!         }
//!     };
//!
//!     let handler = Arc::new(make_handler(hello_world));
//!
//!     loop {
//!         let (tcp_stream, _remote_addr) = match tcp_listener.accept().await {
//!             Ok(stream_and_addr) => stream_and_addr,
//!             Err(e) => {
//!                 warn!(cause = %e, "failed to accept");
//!                 continue;
//!             }
//!         };
//!
//!         let handler = handler.clone();
//!
//!         tokio::spawn(async move {
//!             let (reader, writer) = tcp_stream.into_split();
//!             let connection = HttpConnection::new(reader, writer);
//!             match connection.process(handler).await {
//!                 Ok(_) => info!("finished process, connection shutdown"),
//!                 Err(e) => error!("service has error, cause {}, connection shutdown", e),
//!             }
//!         });
//!     }
//! }
//!
//! async fn hello_world(request: Request<Bytes>) -> Result<Response<Bytes>, Box<dyn Error + Send + Sync>> {
//!     info!(path = request.uri().path(), "receive request");
//!
//!     let response = Response::builder()
//!         .status(StatusCode::OK)
//!         .body(Bytes::from_static(b"Hello World!"))?;
//!
//!     Ok(response)
//! }
//! ```
//!
//! # Architecture
//!
//! - [`connection`]: drives one request/response exchange over a stream
//! - [`protocol`]: message types and errors
//! - [`codec`]: request decoding and response encoding
//! - [`handler`]: the request handler trait
//!
//! # Limitations
//!
//! - HTTP/1.0 and HTTP/1.1 request lines only
//! - No keep-alive, no chunked transfer-encoding, no TLS
//! - Maximum header size: 8KB
//! - Maximum number of headers: 64

pub mod codec;
pub mod connection;
pub mod handler;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;
