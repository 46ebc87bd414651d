mod support;

use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use std::time::Duration;
use tokio::time::timeout;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

type WsStream =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

async fn connect_ws() -> WsStream {
    let base_url = support::ensure_server();
    let host = base_url
        .strip_prefix("http://")
        .expect("base url should use http://");
    let (socket, _response) = connect_async(format!("ws://{host}/ws"))
        .await
        .expect("websocket connect");
    socket
}

// Reads frames until one matches `pred` or the deadline passes.
async fn read_until(socket: &mut WsStream, pred: impl Fn(&Value) -> bool) -> Value {
    let deadline = Duration::from_secs(5);
    let found = timeout(deadline, async {
        loop {
            let frame = socket
                .next()
                .await
                .expect("socket open")
                .expect("frame readable");
            if let Message::Text(txt) = frame {
                if let Ok(value) = serde_json::from_str::<Value>(&txt) {
                    if pred(&value) {
                        return value;
                    }
                }
            }
        }
    })
    .await;
    found.expect("expected frame before deadline")
}

#[tokio::test]
async fn scene_updates_stream_to_connected_clients() {
    let mut socket = connect_ws().await;

    let update = read_until(&mut socket, |v| v["type"] == "SceneUpdate").await;
    let entities = update["data"]["entities"]
        .as_array()
        .expect("entities array");
    assert!(
        entities.iter().any(|e| e["kind"] == "player"),
        "snapshot should contain the player entity"
    );
    assert!(update["data"]["level"].as_u64() >= Some(1));
}

#[tokio::test]
async fn mirror_commands_reach_the_overlay_client() {
    let mut socket = connect_ws().await;

    // Move the player so throttled position updates keep flowing.
    let velocity = json!({"type": "Velocity", "data": {"vx": 3.0, "vy": 0.0}});
    socket
        .send(Message::Text(velocity.to_string().into()))
        .await
        .expect("send velocity");

    let mirror = read_until(&mut socket, |v| {
        v["type"] == "Mirror" && v["data"]["method"] == "SetPositionFromNormalized"
    })
    .await;

    assert_eq!(mirror["data"]["target"], "overlay-cube");
    let payload = mirror["data"]["payload"].as_str().expect("string payload");
    let (nx, ny) = payload.split_once(',').expect("two comma-separated fields");
    nx.parse::<f32>().expect("numeric nx");
    ny.parse::<f32>().expect("numeric ny");
}

#[tokio::test]
async fn inbound_set_color_lands_on_the_player_snapshot() {
    let mut socket = connect_ws().await;

    let command = json!({
        "type": "Command",
        "data": {"target": "overlay-cube", "method": "SetColor", "payload": "#123456"}
    });
    socket
        .send(Message::Text(command.to_string().into()))
        .await
        .expect("send command");

    read_until(&mut socket, |v| {
        v["type"] == "SceneUpdate"
            && v["data"]["entities"]
                .as_array()
                .is_some_and(|entities| {
                    entities
                        .iter()
                        .any(|e| e["kind"] == "player" && e["color"] == "#123456")
                })
    })
    .await;
}

#[tokio::test]
async fn set_level_route_updates_the_scene() {
    let base_url = support::ensure_server();
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{base_url}/session/level"))
        .json(&json!({"level": 4}))
        .send()
        .await
        .expect("request should succeed");
    assert_eq!(res.status(), reqwest::StatusCode::OK);

    let mut socket = connect_ws().await;
    read_until(&mut socket, |v| {
        v["type"] == "SceneUpdate" && v["data"]["level"] == 4
    })
    .await;
}

#[tokio::test]
async fn set_level_rejects_level_zero() {
    let base_url = support::ensure_server();
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{base_url}/session/level"))
        .json(&json!({"level": 0}))
        .send()
        .await
        .expect("request should succeed");
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);

    let body: Value = res.json().await.expect("json error body");
    assert!(body["error"].as_str().is_some());
}
