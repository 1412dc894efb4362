use std::{collections::HashMap, net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::{net::TcpStream, sync::Mutex};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, tungstenite::Message};

use ytsync_server::{
    domain::RoomRegistry,
    infrastructure::{
        message_pusher::WebSocketMessagePusher, name_generator::RandomNameGenerator,
    },
    ui::Server,
    usecase::{
        ConnectParticipantUseCase, DisconnectParticipantUseCase, GetServerStatusUseCase,
        HandleCommandUseCase,
    },
};
use ytsync_shared::time::ManualClock;

pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

const RECV_TIMEOUT: Duration = Duration::from_secs(2);

pub struct TestServer {
    pub addr: SocketAddr,
    /// Drives every room clock of the server.
    pub clock: Arc<ManualClock>,
    _handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Start the server on an ephemeral port, wired like the binary but with
    /// a manual clock.
    pub async fn new() -> Self {
        let clock = Arc::new(ManualClock::new(1_700_000_000_000));
        let registry = Arc::new(Mutex::new(RoomRegistry::new(
            clock.clone(),
            Arc::new(RandomNameGenerator::new()),
        )));
        let message_pusher = Arc::new(WebSocketMessagePusher::new(Arc::new(Mutex::new(
            HashMap::new(),
        ))));

        let server = Server::new(
            Arc::new(ConnectParticipantUseCase::new(
                registry.clone(),
                message_pusher.clone(),
            )),
            Arc::new(DisconnectParticipantUseCase::new(
                registry.clone(),
                message_pusher.clone(),
            )),
            Arc::new(HandleCommandUseCase::new(
                registry.clone(),
                message_pusher.clone(),
            )),
            Arc::new(GetServerStatusUseCase::new(registry, clock.clone())),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = server.router();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the server a moment to start accepting
        tokio::time::sleep(Duration::from_millis(20)).await;

        Self {
            addr,
            clock,
            _handle: handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self, session_id: &str) -> String {
        format!("ws://{}/ws/{}", self.addr, session_id)
    }

    /// Connect to `session_id` and consume messages up to and including the
    /// joiner's own `client-connect`.
    pub async fn join(&self, session_id: &str) -> (WsStream, Vec<Value>) {
        let (mut stream, _) = tokio_tungstenite::connect_async(self.ws_url(session_id))
            .await
            .unwrap();
        let first = recv_json(&mut stream).await;
        assert_eq!(first["action"], "client-connect");
        (stream, vec![first])
    }
}

pub async fn send_command(stream: &mut WsStream, action: &str, data: Value) {
    let text = json!({"action": action, "data": data}).to_string();
    stream.send(Message::text(text)).await.unwrap();
}

/// Next JSON text frame, panicking after a timeout.
pub async fn recv_json(stream: &mut WsStream) -> Value {
    loop {
        let msg = tokio::time::timeout(RECV_TIMEOUT, stream.next())
            .await
            .expect("timed out waiting for a message")
            .expect("stream closed")
            .expect("websocket error");
        if let Message::Text(text) = msg {
            return serde_json::from_str(text.as_str()).unwrap();
        }
    }
}

/// Read `count` messages and return their actions.
pub async fn recv_actions(stream: &mut WsStream, count: usize) -> Vec<String> {
    let mut actions = Vec::with_capacity(count);
    for _ in 0..count {
        let message = recv_json(stream).await;
        actions.push(message["action"].as_str().unwrap().to_string());
    }
    actions
}

/// Assert that nothing arrives for a short while.
pub async fn assert_silent(stream: &mut WsStream) {
    let result = tokio::time::timeout(Duration::from_millis(150), stream.next()).await;
    assert!(result.is_err(), "unexpected message: {result:?}");
}
