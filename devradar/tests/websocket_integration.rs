//! WebSocket realtime channel against an in-process server.

use std::time::Duration;

use devradar::developer::Developer;
use devradar::location::{FixedGeolocation, LocationProvider};
use devradar::realtime::{
    RealtimeChannel, RealtimeConnection, RealtimeEvent, SubscriptionId, SubscriptionScope,
    WebSocketChannel,
};
use devradar::region::Region;
use devradar::search::{SearchApi, SearchError, SearchQuery};
use devradar::view::{MapSearchView, ViewOptions};
use futures::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::WebSocketStream;

const WAIT: Duration = Duration::from_secs(5);

const NEW_DEV_FRAME: &str = r#"{"event": "new-dev", "data": {
    "_id": "5e4e0b0f", "name": "Diego", "bio": null,
    "avatar_url": "https://avatars.example/diego",
    "github_username": "diego3g", "techs": ["node", "react"],
    "location": {"type": "Point", "coordinates": [-46.63, -23.55]}
}}"#;

struct ServerHandle {
    url: String,
    /// Request URI of the accepted handshake.
    uri: oneshot::Receiver<String>,
    /// Fires once the client's close frame (or EOF) is seen.
    closed: oneshot::Receiver<()>,
}

/// Accepts one client, sends `frames`, then waits for the client to close.
async fn serve_once(frames: Vec<String>) -> ServerHandle {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (uri_tx, uri_rx) = oneshot::channel();
    let (closed_tx, closed_rx) = oneshot::channel();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let callback = move |req: &Request, resp: Response| -> Result<Response, ErrorResponse> {
            let _ = uri_tx.send(req.uri().to_string());
            Ok(resp)
        };
        let mut ws = tokio_tungstenite::accept_hdr_async(stream, callback)
            .await
            .unwrap();

        for frame in frames {
            ws.send(Message::Text(frame)).await.unwrap();
        }

        while let Some(msg) = ws.next().await {
            match msg {
                Ok(Message::Close(_)) | Err(_) => break,
                _ => {}
            }
        }
        let _ = closed_tx.send(());
    });

    ServerHandle {
        url: format!("ws://{}/realtime", addr),
        uri: uri_rx,
        closed: closed_rx,
    }
}

/// Accepts one client and hands the server side of the socket to `script`.
async fn serve_with<F, Fut>(script: F) -> String
where
    F: FnOnce(WebSocketStream<TcpStream>) -> Fut + Send + 'static,
    Fut: std::future::Future<Output = ()> + Send,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let ws = tokio_tungstenite::accept_async(stream).await.unwrap();
        script(ws).await;
    });

    format!("ws://{}/realtime", addr)
}

fn scope() -> SubscriptionScope {
    SubscriptionScope::new(&Region::centered(-23.55, -46.63).unwrap(), "node")
}

#[tokio::test]
async fn test_forwards_new_dev_frames_tagged_with_subscription() {
    let server = serve_once(vec![
        r#"{"event": "heartbeat"}"#.to_string(),
        "garbage".to_string(),
        NEW_DEV_FRAME.to_string(),
    ])
    .await;
    let channel = WebSocketChannel::new(&server.url).unwrap();
    let (tx, mut rx) = mpsc::channel(8);

    let connection = channel.connect(&scope(), SubscriptionId(7), tx).await.unwrap();

    let uri = timeout(WAIT, server.uri).await.unwrap().unwrap();
    assert_eq!(uri, "/realtime?latitude=-23.55&longitude=-46.63&techs=node");

    let event = timeout(WAIT, rx.recv()).await.unwrap().unwrap();
    assert_eq!(event.subscription, SubscriptionId(7));
    assert_eq!(event.developer.github_username, "diego3g");
    assert_eq!(event.developer.location.latitude, -23.55);
    assert_eq!(event.developer.location.longitude, -46.63);

    connection.close().await;
    timeout(WAIT, server.closed).await.unwrap().unwrap();
}

#[tokio::test]
async fn test_close_stops_forwarding() {
    let server = serve_once(Vec::new()).await;
    let channel = WebSocketChannel::new(&server.url).unwrap();
    let (tx, mut rx) = mpsc::channel::<RealtimeEvent>(8);

    let connection = channel.connect(&scope(), SubscriptionId(1), tx).await.unwrap();
    connection.close().await;

    timeout(WAIT, server.closed).await.unwrap().unwrap();
    // The reader task owned the only sender, so the queue ends.
    assert!(timeout(WAIT, rx.recv()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_connect_failure_is_reported() {
    // Bind and drop to get a port with nothing listening.
    let addr = TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap()
        .local_addr()
        .unwrap();
    let channel = WebSocketChannel::new(&format!("ws://{}/realtime", addr)).unwrap();
    let (tx, _rx) = mpsc::channel(1);

    let result = channel.connect(&scope(), SubscriptionId(1), tx).await;
    assert!(result.is_err());
}

#[derive(Clone)]
struct EmptySearch;

impl SearchApi for EmptySearch {
    async fn search(&self, _query: &SearchQuery) -> Result<Vec<Developer>, SearchError> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn test_view_appends_pushes_from_live_socket() {
    let server = serve_once(vec![NEW_DEV_FRAME.to_string()]).await;
    let mut view = MapSearchView::new(
        LocationProvider::new(FixedGeolocation::at(-23.55, -46.63)),
        EmptySearch,
        WebSocketChannel::new(&server.url).unwrap(),
        ViewOptions::default(),
    );
    assert!(view.mount().await);
    view.set_query("node");

    assert_eq!(view.search().await, Ok(0));
    let event = timeout(WAIT, view.next_realtime()).await.unwrap().unwrap();
    assert!(view.handle_realtime(event));

    let scene = view.render().unwrap();
    assert_eq!(scene.markers.len(), 1);
    assert_eq!(scene.markers[0].github_username, "diego3g");

    view.unmount().await;
    timeout(WAIT, server.closed).await.unwrap().unwrap();
}

#[tokio::test]
async fn test_ping_is_answered_with_pong() {
    let (pong_tx, pong_rx) = oneshot::channel();
    let url = serve_with(|mut ws| async move {
        ws.send(Message::Ping(b"are-you-there".to_vec())).await.unwrap();
        while let Some(Ok(msg)) = ws.next().await {
            if let Message::Pong(payload) = msg {
                let _ = pong_tx.send(payload);
                break;
            }
        }
    })
    .await;
    let channel = WebSocketChannel::new(&url).unwrap();
    let (tx, _rx) = mpsc::channel(8);

    let connection = channel.connect(&scope(), SubscriptionId(1), tx).await.unwrap();

    let payload = timeout(WAIT, pong_rx).await.unwrap().unwrap();
    assert_eq!(payload, b"are-you-there".to_vec());
    connection.close().await;
}

#[tokio::test]
async fn test_server_close_ends_reader() {
    let url = serve_with(|mut ws| async move {
        ws.send(Message::Close(None)).await.unwrap();
        // Drive the close handshake to completion.
        while let Some(Ok(_)) = ws.next().await {}
    })
    .await;
    let channel = WebSocketChannel::new(&url).unwrap();
    let (tx, mut rx) = mpsc::channel::<RealtimeEvent>(8);

    let connection = channel.connect(&scope(), SubscriptionId(3), tx).await.unwrap();

    // The reader task owned the only sender; it ends after the close frame.
    assert!(timeout(WAIT, rx.recv()).await.unwrap().is_none());
    connection.close().await;
}
