use crate::encoding::Encoder;
use crate::handler::RequestHandler;
use crate::{HandlerError, RequestContext};
use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderValue, Response, StatusCode, header};
use tracing::trace;

/// `GET /echo/{value}`: answers with `{value}` as plain text, gzip compressed
/// when the client accepts it.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoHandler;

#[async_trait]
impl RequestHandler for EchoHandler {
    async fn invoke<'req>(&self, req: &RequestContext<'req>, _req_body: Bytes) -> Result<Response<Bytes>, HandlerError> {
        let value = req.path_param().as_bytes();

        let builder = Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, mime::TEXT_PLAIN.as_ref());

        let response = match Encoder::select(req.headers()) {
            Some(encoder) => {
                let name = encoder.name();
                let body = encoder.encode(value)?;
                trace!(encoding = name, from = value.len(), to = body.len(), "compressed echo body");
                builder
                    .header(header::CONTENT_ENCODING, HeaderValue::from_static(name))
                    .header(header::CONTENT_LENGTH, body.len())
                    .body(body)?
            }
            None => builder.header(header::CONTENT_LENGTH, value.len()).body(Bytes::copy_from_slice(value))?,
        };

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::header;
    use flate2::read::GzDecoder;
    use http::Method;
    use std::io::Read;

    #[tokio::test]
    async fn echo_plain() {
        let header = header(Method::GET, "/echo/abc", &[]);
        let response = EchoHandler.invoke(&RequestContext::new(&header, "abc"), Bytes::new()).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get(header::CONTENT_TYPE).unwrap(), "text/plain");
        assert_eq!(response.headers().get(header::CONTENT_LENGTH).unwrap(), "3");
        assert!(response.headers().get(header::CONTENT_ENCODING).is_none());
        assert_eq!(response.body().as_ref(), b"abc");
    }

    #[tokio::test]
    async fn echo_empty_value() {
        let header = header(Method::GET, "/echo/", &[]);
        let response = EchoHandler.invoke(&RequestContext::new(&header, ""), Bytes::new()).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get(header::CONTENT_LENGTH).unwrap(), "0");
        assert!(response.body().is_empty());
    }

    #[tokio::test]
    async fn echo_gzip() {
        let header = header(Method::GET, "/echo/hello", &[("accept-encoding", "deflate, gzip")]);
        let response = EchoHandler.invoke(&RequestContext::new(&header, "hello"), Bytes::new()).await.unwrap();

        assert_eq!(response.headers().get(header::CONTENT_ENCODING).unwrap(), "gzip");
        let length: usize = response.headers().get(header::CONTENT_LENGTH).unwrap().to_str().unwrap().parse().unwrap();
        assert_eq!(length, response.body().len());

        let mut decoded = String::new();
        GzDecoder::new(response.body().as_ref()).read_to_string(&mut decoded).unwrap();
        assert_eq!(decoded, "hello");
    }

    #[tokio::test]
    async fn unsupported_encoding_is_plain() {
        let header = header(Method::GET, "/echo/hello", &[("accept-encoding", "invalid-encoding")]);
        let response = EchoHandler.invoke(&RequestContext::new(&header, "hello"), Bytes::new()).await.unwrap();

        assert!(response.headers().get(header::CONTENT_ENCODING).is_none());
        assert_eq!(response.body().as_ref(), b"hello");
    }
}
