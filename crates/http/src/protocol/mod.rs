//! Core HTTP protocol abstractions.
//!
//! - **Message Handling** ([`message`]): what the codec produces and consumes
//!   - [`Message`]: either a header or a payload item
//!   - [`PayloadItem`]: a body chunk or the end-of-body marker
//!   - [`PayloadSize`]: how many body bytes follow a header block
//!
//! - **Request Processing** ([`request`]): [`RequestHeader`] wraps the decoded
//!   request line and header map
//!
//! - **Response Processing** ([`response`]): [`ResponseHead`] is a response
//!   before its body is attached
//!
//! - **Error Handling** ([`error`]):
//!   - [`HttpError`]: top-level per-connection error
//!   - [`ParseError`]: the request could not be decoded
//!   - [`SendError`]: the response could not be written

mod message;
pub use message::Message;
pub use message::PayloadItem;
pub use message::PayloadSize;

mod request;
pub use request::RequestHeader;

mod response;
pub use response::ResponseHead;

mod error;
pub use error::HttpError;
pub use error::ParseError;
pub use error::SendError;
