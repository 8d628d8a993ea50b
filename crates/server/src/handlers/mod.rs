//! The fixed set of request handlers behind the route table.

mod echo;
mod files;
mod user_agent;

pub use echo::EchoHandler;
pub use files::FileHandler;
pub use user_agent::UserAgentHandler;

use crate::handler::RequestHandler;
use crate::{HandlerError, RequestContext};
use async_trait::async_trait;
use bytes::Bytes;
use http::{Response, StatusCode};

/// A response with `status`, no headers and no body.
pub(crate) fn empty_response(status: StatusCode) -> Response<Bytes> {
    let mut response = Response::new(Bytes::new());
    *response.status_mut() = status;
    response
}

/// `GET /`: 200 with an empty body.
#[derive(Debug, Clone, Copy, Default)]
pub struct RootHandler;

#[async_trait]
impl RequestHandler for RootHandler {
    async fn invoke<'req>(&self, _req: &RequestContext<'req>, _req_body: Bytes) -> Result<Response<Bytes>, HandlerError> {
        Ok(empty_response(StatusCode::OK))
    }
}

/// Answers every request no route accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotFoundHandler;

#[async_trait]
impl RequestHandler for NotFoundHandler {
    async fn invoke<'req>(&self, _req: &RequestContext<'req>, _req_body: Bytes) -> Result<Response<Bytes>, HandlerError> {
        Ok(empty_response(StatusCode::NOT_FOUND))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use http::{HeaderMap, Method, Request};
    use mini_http::protocol::RequestHeader;

    pub(crate) fn header(method: Method, uri: &str, headers: &[(&'static str, &'static str)]) -> RequestHeader {
        let mut request = Request::builder().method(method).uri(uri).body(()).unwrap();
        let header_map: &mut HeaderMap = request.headers_mut();
        for (name, value) in headers {
            header_map.insert(*name, value.parse().unwrap());
        }
        request.into()
    }
}
