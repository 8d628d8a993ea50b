use crate::{HandlerError, RequestContext};
use async_trait::async_trait;
use bytes::Bytes;
use http::Response;

/// Produces the response for one routed request.
///
/// `req_body` is the request body as buffered by the connection; it is empty
/// for methods that carry no body.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    async fn invoke<'req>(&self, req: &RequestContext<'req>, req_body: Bytes) -> Result<Response<Bytes>, HandlerError>;
}
