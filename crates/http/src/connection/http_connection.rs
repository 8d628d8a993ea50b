use std::cmp;
use std::sync::Arc;

use bytes::{Bytes, BytesMut};
use futures::{SinkExt, StreamExt};
use http::Response;
use http::header::EXPECT;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{debug, info, trace};

use crate::codec::{RequestDecoder, ResponseEncoder};
use crate::handler::Handler;
use crate::protocol::{HttpError, Message, ParseError, PayloadItem, PayloadSize, RequestHeader, ResponseHead, SendError};

/// Upper bound for the body buffer reserved up front from `Content-Length`
const MAX_BODY_PREALLOCATE: u64 = 64 * 1024;

/// An HTTP connection that serves exactly one request and then closes
///
/// `HttpConnection` drives a single exchange:
/// - Reading and decoding the request header
/// - Buffering the request body declared by `Content-Length`
/// - Handling the expect-continue mechanism
/// - Handing the request to the [`Handler`] and writing its response
///
/// # Type Parameters
///
/// * `R`: The async readable stream type
/// * `W`: The async writable stream type
#[derive(Debug)]
pub struct HttpConnection<R, W> {
    framed_read: FramedRead<R, RequestDecoder>,
    framed_write: FramedWrite<W, ResponseEncoder>,
}

impl<R, W> HttpConnection<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            framed_read: FramedRead::with_capacity(reader, RequestDecoder::new(), 8 * 1024),
            framed_write: FramedWrite::new(writer, ResponseEncoder::new()),
        }
    }

    /// Serves one request, then shuts the write side down whatever happened.
    ///
    /// Nothing is written when the request can't be decoded or the handler
    /// fails; the peer only observes the connection closing.
    pub async fn process<H>(mut self, handler: Arc<H>) -> Result<(), HttpError>
    where
        H: Handler,
    {
        let result = self.do_process(handler.as_ref()).await;

        if let Err(e) = self.framed_write.get_mut().shutdown().await {
            debug!(cause = %e, "shutdown connection error");
        }

        result
    }

    async fn do_process<H>(&mut self, handler: &H) -> Result<(), HttpError>
    where
        H: Handler,
    {
        let (header, payload_size) = match self.framed_read.next().await {
            Some(Ok(Message::Header(header_and_size))) => header_and_size,
            Some(Ok(Message::Payload(_))) => {
                return Err(ParseError::invalid_body("need header while receive body").into());
            }
            Some(Err(e)) => return Err(e.into()),
            None => {
                info!("peer closed before sending a request");
                return Ok(());
            }
        };

        if !payload_size.is_empty() {
            self.send_continue_if_expected(&header).await?;
        }

        let body = self.read_body(payload_size).await?;
        let request = header.body(body);

        let response = handler.call(request).await.map_err(HttpError::handler)?;

        self.send_response(response).await
    }

    async fn send_continue_if_expected(&mut self, header: &RequestHeader) -> Result<(), SendError> {
        if let Some(value) = header.headers().get(EXPECT) {
            let slice = value.as_bytes();
            if slice.len() >= 4 && &slice[0..4] == b"100-" {
                let writer = self.framed_write.get_mut();
                writer.write_all(b"HTTP/1.1 100 Continue\r\n\r\n").await.map_err(SendError::io)?;
                writer.flush().await.map_err(SendError::io)?;
                info!("receive expect request header, sent continue response");
            }
        }
        Ok(())
    }

    async fn read_body(&mut self, payload_size: PayloadSize) -> Result<Bytes, ParseError> {
        let capacity = usize::try_from(cmp::min(payload_size.len(), MAX_BODY_PREALLOCATE)).unwrap_or_default();
        let mut body = BytesMut::with_capacity(capacity);

        loop {
            match self.framed_read.next().await {
                Some(Ok(Message::Payload(PayloadItem::Chunk(bytes)))) => {
                    trace!(chunk_size = bytes.len(), "receive body chunk");
                    body.extend_from_slice(&bytes);
                }
                Some(Ok(Message::Payload(PayloadItem::Eof))) => return Ok(body.freeze()),
                Some(Ok(Message::Header(_))) => return Err(ParseError::invalid_body("need body while receive header")),
                Some(Err(e)) => return Err(e),
                None => {
                    return Err(ParseError::invalid_body(format!(
                        "connection closed after {} of {} body bytes",
                        body.len(),
                        payload_size.len()
                    )));
                }
            }
        }
    }

    /// Encodes the whole response before flushing it to the peer.
    async fn send_response(&mut self, response: Response<Bytes>) -> Result<(), HttpError> {
        let (header_parts, body) = response.into_parts();
        let payload_size = PayloadSize::new_length(body.len() as u64);

        let header = Message::<_, Bytes>::Header((ResponseHead::from_parts(header_parts, ()), payload_size));
        self.framed_write.feed(header).await?;

        if !payload_size.is_empty() {
            self.framed_write.feed(Message::Payload(PayloadItem::Chunk(body))).await?;
        }

        // `send` flushes after the final item
        self.framed_write.send(Message::Payload(PayloadItem::<Bytes>::Eof)).await?;
        Ok(())
    }
}
