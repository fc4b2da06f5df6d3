use futures::stream::{AbortHandle, Abortable};
use futures::{Stream, StreamExt};
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::error::{ClientError, Result};

/// Boxed stream of decoded text fragments, in chunk-arrival order.
pub type TextStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// Cancellation handle for an in-flight chat stream.
///
/// Cancelling ends the stream and drops the underlying response body,
/// closing the connection. Safe to call from outside the reading task.
#[derive(Debug, Clone)]
pub struct StreamHandle {
    abort: AbortHandle,
}

impl StreamHandle {
    pub fn cancel(&self) {
        self.abort.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.abort.is_aborted()
    }
}

/// Cancellable chat response stream.
///
/// Yields text fragments as they arrive; after cancellation it terminates
/// on the next poll without yielding further fragments.
pub struct ChatStream {
    inner: Abortable<TextStream>,
    handle: StreamHandle,
}

impl ChatStream {
    pub fn new(inner: TextStream) -> Self {
        let (abort, registration) = AbortHandle::new_pair();
        Self {
            inner: Abortable::new(inner, registration),
            handle: StreamHandle { abort },
        }
    }

    pub fn handle(&self) -> StreamHandle {
        self.handle.clone()
    }
}

impl Stream for ChatStream {
    type Item = Result<String>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.get_mut().inner).poll_next(cx)
    }
}

/// Decode a stream of raw byte chunks into UTF-8 text fragments.
///
/// Chunk boundaries are not character boundaries: an incomplete trailing
/// sequence is held back and prepended to the next chunk. Fragments are
/// yielded strictly in arrival order with no other buffering.
pub fn decode_text_stream<S, B, E>(bytes: S) -> TextStream
where
    S: Stream<Item = std::result::Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Into<ClientError> + Send + 'static,
{
    Box::pin(async_stream::stream! {
        let mut chunks = Box::pin(bytes);
        let mut carry: Vec<u8> = Vec::new();

        while let Some(chunk) = chunks.next().await {
            match chunk {
                Ok(data) => {
                    carry.extend_from_slice(data.as_ref());

                    match std::str::from_utf8(&carry) {
                        Ok(text) => {
                            if !text.is_empty() {
                                yield Ok(text.to_string());
                            }
                            carry.clear();
                        }
                        Err(err) => {
                            if err.error_len().is_some() {
                                carry.clear();
                                yield Err(ClientError::Stream(
                                    "invalid UTF-8 in response stream".to_string(),
                                ));
                                break;
                            }
                            // Incomplete trailing sequence: emit the valid
                            // prefix, keep the tail for the next chunk.
                            let valid = err.valid_up_to();
                            if valid > 0 {
                                let tail = carry.split_off(valid);
                                yield Ok(String::from_utf8_lossy(&carry).into_owned());
                                carry = tail;
                            }
                        }
                    }
                }
                Err(e) => {
                    carry.clear();
                    yield Err(e.into());
                    break;
                }
            }
        }

        if !carry.is_empty() {
            yield Err(ClientError::Stream(
                "response stream ended mid-character".to_string(),
            ));
        }
    })
}
