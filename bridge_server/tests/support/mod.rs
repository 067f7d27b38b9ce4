// Boots one bridge server per test binary on an ephemeral port, plus socket
// helpers shared by the test binaries.
#![allow(dead_code)]

use futures_util::StreamExt;
use serde_json::{Value, json};
use std::{
    sync::{Arc, OnceLock},
    time::Duration,
};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

pub type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub const WAIT: Duration = Duration::from_secs(5);

// host:port of the shared server once it is accepting connections.
static SERVER_ADDR: OnceLock<String> = OnceLock::new();
static SERVER_READY: OnceLock<()> = OnceLock::new();

pub fn http_url() -> String {
    format!("http://{}", ensure_server())
}

pub fn ws_url() -> String {
    format!("ws://{}/ws", ensure_server())
}

fn ensure_server() -> &'static str {
    SERVER_READY.get_or_init(|| {
        let published_addr = Arc::new(OnceLock::<String>::new());
        let published_addr_thread = Arc::clone(&published_addr);
        // The server needs its own runtime so it outlives each `#[tokio::test]` runtime.
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("test runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral test port");
                let addr = listener.local_addr().expect("get local addr");
                let _ = published_addr_thread.set(addr.to_string());
                bridge_server::run(listener).await.expect("server failed");
            });
        });
        wait_until_accepting(published_addr);
    });

    SERVER_ADDR
        .get()
        .expect("server addr should be initialized")
        .as_str()
}

fn wait_until_accepting(published_addr: Arc<OnceLock<String>>) {
    let addr = loop {
        if let Some(addr) = published_addr.get() {
            break addr.clone();
        }
        std::thread::sleep(Duration::from_millis(10));
    };

    for _ in 0..100 {
        if std::net::TcpStream::connect(&addr).is_ok() {
            let _ = SERVER_ADDR.set(addr);
            return;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    panic!("server did not become ready in time");
}

pub async fn connect() -> Socket {
    let (socket, _) = connect_async(ws_url())
        .await
        .expect("websocket should connect");
    socket
}

pub async fn next_json(socket: &mut Socket) -> Value {
    loop {
        let msg = timeout(WAIT, socket.next())
            .await
            .expect("timed out waiting for message")
            .expect("socket closed")
            .expect("websocket error");
        if let Message::Text(text) = msg {
            return serde_json::from_str(text.as_str()).expect("server sends JSON");
        }
    }
}

/// Next `WorldUpdate` matching `pred`, skipping everything else.
pub async fn next_update_where(socket: &mut Socket, pred: impl Fn(&Value) -> bool) -> Value {
    timeout(WAIT, async {
        loop {
            let msg = next_json(socket).await;
            if msg["type"] == "WorldUpdate" && pred(&msg["data"]) {
                break msg;
            }
        }
    })
    .await
    .expect("timed out waiting for matching update")
}

/// Close code the server sends, or None if the stream ends without one.
pub async fn close_code(socket: &mut Socket) -> Option<CloseCode> {
    timeout(WAIT, async {
        while let Some(Ok(msg)) = socket.next().await {
            if let Message::Close(frame) = msg {
                return frame.map(|f| f.code);
            }
        }
        None
    })
    .await
    .expect("timed out waiting for close")
}

pub fn hands_with_tips(thumb: (f32, f32), index: (f32, f32)) -> String {
    let keypoints: Vec<Value> = (0..21)
        .map(|i| match i {
            4 => json!({ "x": thumb.0, "y": thumb.1, "name": "thumb_tip" }),
            8 => json!({ "x": index.0, "y": index.1, "name": "index_finger_tip" }),
            _ => json!({ "x": 0.0, "y": 0.0 }),
        })
        .collect();
    json!({ "type": "Hands", "data": { "hands": [{ "keypoints": keypoints }] } }).to_string()
}
