use crate::handler::RequestHandler;
use crate::{HandlerError, RequestContext};
use async_trait::async_trait;
use bytes::Bytes;
use http::{Response, StatusCode, header};

/// `GET /user-agent`: reflects the `User-Agent` request header, empty when absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserAgentHandler;

#[async_trait]
impl RequestHandler for UserAgentHandler {
    async fn invoke<'req>(&self, req: &RequestContext<'req>, _req_body: Bytes) -> Result<Response<Bytes>, HandlerError> {
        let body = req
            .headers()
            .get(header::USER_AGENT)
            .map(|value| Bytes::copy_from_slice(value.as_bytes()))
            .unwrap_or_default();

        let response = Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, mime::TEXT_PLAIN.as_ref())
            .header(header::CONTENT_LENGTH, body.len())
            .body(body)?;

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::header;
    use http::Method;

    #[tokio::test]
    async fn reflect_user_agent() {
        let header = header(Method::GET, "/user-agent", &[("user-agent", "test-agent/1.0")]);
        let response = UserAgentHandler.invoke(&RequestContext::new(&header, ""), Bytes::new()).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get(header::CONTENT_TYPE).unwrap(), "text/plain");
        assert_eq!(response.headers().get(header::CONTENT_LENGTH).unwrap(), "14");
        assert_eq!(response.body().as_ref(), b"test-agent/1.0");
    }

    #[tokio::test]
    async fn missing_user_agent_is_empty() {
        let header = header(Method::GET, "/user-agent", &[]);
        let response = UserAgentHandler.invoke(&RequestContext::new(&header, ""), Bytes::new()).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get(header::CONTENT_LENGTH).unwrap(), "0");
        assert!(response.body().is_empty());
    }
}
