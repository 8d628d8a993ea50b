//! HTTP connection handling
//!
//! - [`HttpConnection`]: serves one request per connection:
//!   - decodes the request header and buffers its body
//!   - answers `Expect: 100-continue`
//!   - calls the handler and writes its response in one flush
//!   - shuts the connection down afterwards, whatever the outcome

mod http_connection;

pub use http_connection::HttpConnection;
