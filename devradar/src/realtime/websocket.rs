//! WebSocket realtime channel.
//!
//! Connects to `<url>?latitude=..&longitude=..&techs=..` and reads JSON text
//! frames of the form:
//!
//! ```text
//! {"event": "new-dev", "data": { ...developer... }}
//! ```
//!
//! Frames with any other event name are ignored. Malformed frames are logged
//! and skipped; they never close the connection.

use futures::{SinkExt, StreamExt};
use reqwest::Url;
use serde::Deserialize;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use super::channel::{RealtimeChannel, RealtimeConnection};
use super::error::SubscriptionError;
use super::scope::{RealtimeEvent, SubscriptionId, SubscriptionScope};
use crate::developer::Developer;

/// Event name of a newly registered developer.
pub const NEW_DEV_EVENT: &str = "new-dev";

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Inbound frame envelope.
#[derive(Deserialize)]
struct Envelope {
    event: String,
    #[serde(default)]
    data: serde_json::Value,
}

/// Realtime channel over WebSocket.
#[derive(Debug, Clone)]
pub struct WebSocketChannel {
    url: Url,
}

impl WebSocketChannel {
    /// Creates a channel for the realtime endpoint at `url` (`ws://` or `wss://`).
    pub fn new(url: &str) -> Result<Self, SubscriptionError> {
        let parsed = Url::parse(url.trim()).map_err(|e| SubscriptionError::InvalidEndpoint {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        match parsed.scheme() {
            "ws" | "wss" => Ok(Self { url: parsed }),
            other => Err(SubscriptionError::InvalidEndpoint {
                url: url.to_string(),
                reason: format!("unsupported scheme '{}', expected ws or wss", other),
            }),
        }
    }

    /// Builds the connection URL for a scope.
    pub fn connect_url(&self, scope: &SubscriptionScope) -> Url {
        let mut url = self.url.clone();
        url.query_pairs_mut()
            .clear()
            .extend_pairs(scope.query_pairs());
        url
    }
}

impl RealtimeChannel for WebSocketChannel {
    type Connection = WebSocketConnection;

    async fn connect(
        &self,
        scope: &SubscriptionScope,
        id: SubscriptionId,
        events: mpsc::Sender<RealtimeEvent>,
    ) -> Result<WebSocketConnection, SubscriptionError> {
        let url = self.connect_url(scope);
        debug!(url = %url, subscription = %id, "Connecting to realtime server");

        let (stream, _response) = connect_async(url.as_str())
            .await
            .map_err(|e| SubscriptionError::ConnectFailed(e.to_string()))?;

        let cancel = CancellationToken::new();
        let task = tokio::spawn(read_frames(stream, id, events, cancel.clone()));

        Ok(WebSocketConnection { id, cancel, task })
    }
}

/// An open WebSocket subscription.
///
/// Dropping the handle without calling [`close`](RealtimeConnection::close)
/// still stops forwarding, but does not wait for the reader to finish.
pub struct WebSocketConnection {
    id: SubscriptionId,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl WebSocketConnection {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }
}

impl RealtimeConnection for WebSocketConnection {
    async fn close(mut self) {
        self.cancel.cancel();
        if let Err(e) = (&mut self.task).await {
            warn!(subscription = %self.id, error = %e, "Realtime reader task failed");
        }
    }
}

impl Drop for WebSocketConnection {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Reads frames until cancelled, closed by the server, or the consumer goes away.
async fn read_frames(
    mut stream: WsStream,
    id: SubscriptionId,
    events: mpsc::Sender<RealtimeEvent>,
    cancel: CancellationToken,
) {
    loop {
        let frame = tokio::select! {
            _ = cancel.cancelled() => {
                if let Err(e) = stream.close(None).await {
                    trace!(subscription = %id, error = %e, "Close handshake failed");
                }
                break;
            }
            frame = stream.next() => frame,
        };

        match frame {
            Some(Ok(Message::Text(text))) => match decode_frame(&text) {
                Ok(Some(developer)) => {
                    trace!(subscription = %id, github_username = %developer.github_username, "Developer pushed");
                    let event = RealtimeEvent {
                        subscription: id,
                        developer,
                    };
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        sent = events.send(event) => {
                            if sent.is_err() {
                                debug!(subscription = %id, "Realtime consumer gone, stopping reader");
                                break;
                            }
                        }
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(subscription = %id, error = %e, "Skipping malformed realtime frame");
                }
            },
            Some(Ok(Message::Ping(payload))) => {
                if let Err(e) = stream.send(Message::Pong(payload)).await {
                    debug!(subscription = %id, error = %e, "Failed to answer ping");
                }
            }
            Some(Ok(Message::Close(_))) | None => {
                debug!(subscription = %id, "Realtime server closed the connection");
                break;
            }
            Some(Ok(_)) => {}
            Some(Err(e)) => {
                warn!(subscription = %id, error = %e, "Realtime connection error");
                break;
            }
        }
    }
}

/// Decodes one text frame.
///
/// Returns `Ok(None)` for events other than [`NEW_DEV_EVENT`].
fn decode_frame(text: &str) -> Result<Option<Developer>, serde_json::Error> {
    let envelope: Envelope = serde_json::from_str(text)?;
    if envelope.event != NEW_DEV_EVENT {
        trace!(event = %envelope.event, "Ignoring realtime event");
        return Ok(None);
    }
    serde_json::from_value(envelope.data).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::Region;

    #[test]
    fn test_rejects_non_websocket_url() {
        assert!(matches!(
            WebSocketChannel::new("http://localhost:3333"),
            Err(SubscriptionError::InvalidEndpoint { .. })
        ));
        assert!(matches!(
            WebSocketChannel::new("::"),
            Err(SubscriptionError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn test_connect_url_carries_scope() {
        let channel = WebSocketChannel::new("ws://localhost:3333/realtime").unwrap();
        let scope = SubscriptionScope::new(&Region::centered(10.0, 20.0).unwrap(), "node");

        let url = channel.connect_url(&scope);
        assert_eq!(
            url.as_str(),
            "ws://localhost:3333/realtime?latitude=10&longitude=20&techs=node"
        );
    }

    #[test]
    fn test_connect_url_replaces_existing_query() {
        let channel = WebSocketChannel::new("wss://example.com/ws?latitude=0").unwrap();
        let scope = SubscriptionScope::new(&Region::centered(1.0, 2.0).unwrap(), "go");

        assert_eq!(
            channel.connect_url(&scope).query(),
            Some("latitude=1&longitude=2&techs=go")
        );
    }

    #[test]
    fn test_decode_new_dev_frame() {
        let text = r#"{"event": "new-dev", "data": {
            "_id": "42", "github_username": "octocat", "name": "Octo",
            "techs": ["rust"], "location": {"type": "Point", "coordinates": [20.0, 10.0]}
        }}"#;

        let dev = decode_frame(text).unwrap().unwrap();
        assert_eq!(dev.id, "42");
        assert_eq!(dev.location.latitude, 10.0);
    }

    #[test]
    fn test_decode_ignores_other_events() {
        assert_eq!(decode_frame(r#"{"event": "heartbeat"}"#).unwrap(), None);
    }

    #[test]
    fn test_decode_rejects_malformed_frames() {
        assert!(decode_frame("not json").is_err());
        assert!(decode_frame(r#"{"event": "new-dev", "data": {"name": "x"}}"#).is_err());
    }
}
