//! Real-time score bridge
//!
//! One-shot subscription to the gateway: open the per-quote stream, take the
//! first pushed update, disconnect. A second push is never read because the
//! connection is already gone. Tearing the bridge down early (drop) closes
//! the subscription whether or not anything arrived.

use futures::stream::{BoxStream, StreamExt};
use thiserror::Error;
use tracing::{debug, warn};

use quotd_common::QuoteUpdate;

use crate::sse::SseDecoder;

type ByteStream = BoxStream<'static, Result<Vec<u8>, reqwest::Error>>;

/// Bridge lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    /// Connection open, waiting for the first update
    Subscribed,
    /// One update consumed; the connection has been dropped
    Delivered,
    /// Torn down without consuming an update
    Closed,
}

/// Bridge errors
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed push payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// One-shot subscription to rating updates for a single quote
pub struct ScoreBridge {
    stream: Option<ByteStream>,
    decoder: SseDecoder,
    state: BridgeState,
}

impl ScoreBridge {
    /// Open the subscription for one quote id
    pub async fn subscribe(rt_url: &str, id: i64) -> Result<Self, BridgeError> {
        let response = reqwest::get(format!("{rt_url}/{id}"))
            .await?
            .error_for_status()?;

        debug!("Subscribed to rating updates for quote {}", id);

        let stream = response
            .bytes_stream()
            .map(|chunk| chunk.map(|bytes| bytes.to_vec()))
            .boxed();

        Ok(Self::from_stream(stream))
    }

    fn from_stream(stream: ByteStream) -> Self {
        Self {
            stream: Some(stream),
            decoder: SseDecoder::new(),
            state: BridgeState::Subscribed,
        }
    }

    pub fn state(&self) -> BridgeState {
        self.state
    }

    /// Wait for the first pushed update, then disconnect
    ///
    /// Returns `None` once the bridge is past its single delivery, or if the
    /// server closes the stream before any update arrives. The connection is
    /// consumed either way; keep-alive comments are skipped while waiting.
    pub async fn next_update(&mut self) -> Result<Option<QuoteUpdate>, BridgeError> {
        let mut stream = match self.stream.take() {
            Some(stream) => stream,
            None => return Ok(None),
        };

        while let Some(chunk) = stream.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(err) => {
                    self.state = BridgeState::Closed;
                    return Err(err.into());
                }
            };

            if let Some(message) = self.decoder.feed(&chunk).into_iter().next() {
                let update: QuoteUpdate = match serde_json::from_str(&message.data) {
                    Ok(update) => update,
                    Err(err) => {
                        self.state = BridgeState::Closed;
                        return Err(err.into());
                    }
                };

                // dropping `stream` here is the disconnect
                self.state = BridgeState::Delivered;
                return Ok(Some(update));
            }
        }

        warn!("Subscription ended without an update");
        self.state = BridgeState::Closed;
        Ok(None)
    }

    /// Tear down the subscription if still open
    pub fn close(&mut self) {
        if self.state == BridgeState::Subscribed {
            self.state = BridgeState::Closed;
        }
        self.stream = None;
    }
}

impl Drop for ScoreBridge {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quotd_common::QuoteStatus;

    fn bridge_over(chunks: Vec<Vec<u8>>) -> ScoreBridge {
        let stream =
            futures::stream::iter(chunks.into_iter().map(Ok::<Vec<u8>, reqwest::Error>)).boxed();
        ScoreBridge::from_stream(stream)
    }

    #[tokio::test]
    async fn first_update_is_delivered_then_bridge_is_spent() {
        let mut bridge = bridge_over(vec![
            b"data: {\"id\":1,\"status\":\"RATED\",\"rating\":4}\n\n".to_vec(),
            // a second push exists on the wire but must never be consumed
            b"data: {\"id\":1,\"status\":\"RATED\",\"rating\":1}\n\n".to_vec(),
        ]);
        assert_eq!(bridge.state(), BridgeState::Subscribed);

        let update = bridge.next_update().await.unwrap().unwrap();
        assert_eq!(update.status, Some(QuoteStatus::Rated));
        assert_eq!(update.rating, Some(4));
        assert_eq!(bridge.state(), BridgeState::Delivered);

        assert!(bridge.next_update().await.unwrap().is_none());
        assert_eq!(bridge.state(), BridgeState::Delivered);
    }

    #[tokio::test]
    async fn keep_alives_are_skipped_while_waiting() {
        let mut bridge = bridge_over(vec![
            b": heartbeat\n\n".to_vec(),
            b": heartbeat\n\ndata: {\"id\":2,\"rating\":5}\n\n".to_vec(),
        ]);

        let update = bridge.next_update().await.unwrap().unwrap();
        assert_eq!(update.id, 2);
        assert_eq!(update.rating, Some(5));
    }

    #[tokio::test]
    async fn update_split_across_chunks_is_reassembled() {
        let mut bridge = bridge_over(vec![
            b"data: {\"id\":3,".to_vec(),
            b"\"rating\":2}\n".to_vec(),
            b"\n".to_vec(),
        ]);

        let update = bridge.next_update().await.unwrap().unwrap();
        assert_eq!(update.id, 3);
        assert_eq!(update.rating, Some(2));
    }

    #[tokio::test]
    async fn stream_end_without_update_closes_the_bridge() {
        let mut bridge = bridge_over(vec![b": heartbeat\n\n".to_vec()]);

        assert!(bridge.next_update().await.unwrap().is_none());
        assert_eq!(bridge.state(), BridgeState::Closed);
    }

    #[tokio::test]
    async fn malformed_payload_is_an_error() {
        let mut bridge = bridge_over(vec![b"data: not json\n\n".to_vec()]);

        assert!(bridge.next_update().await.is_err());
        assert_eq!(bridge.state(), BridgeState::Closed);
    }

    #[tokio::test]
    async fn close_before_delivery_ends_the_subscription() {
        let mut bridge = bridge_over(vec![b"data: {\"id\":1,\"rating\":4}\n\n".to_vec()]);

        bridge.close();
        assert_eq!(bridge.state(), BridgeState::Closed);
        assert!(bridge.next_update().await.unwrap().is_none());
    }
}
