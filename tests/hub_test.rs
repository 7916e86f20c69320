use std::time::Duration;

use futures::{SinkExt, StreamExt};
use rps_tests::{spawn_server, test_config};
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio_tungstenite::{
    connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream,
};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn next_event(socket: &mut Socket) -> Value {
    loop {
        let message = tokio::time::timeout(Duration::from_secs(5), socket.next())
            .await
            .expect("Timed out waiting for hub message")
            .expect("Hub closed the connection")
            .expect("Hub connection failed");
        if let Message::Text(text) = message {
            return serde_json::from_str(&text).expect("Hub sent invalid JSON");
        }
    }
}

async fn post(client: &reqwest::Client, url: String, body: Value) -> Value {
    let response = client
        .post(url)
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success(), "status {}", response.status());
    response.json().await.expect("Response was not JSON")
}

#[tokio::test]
async fn test_subscribers_receive_every_state_change() {
    let (addr, _) = spawn_server(test_config()).await;
    let base = format!("http://{}", addr);
    let client = reqwest::Client::new();

    let game = post(&client, format!("{}/api/game/create", base), json!({ "name": "Alice" })).await;
    let game_id = game["id"].as_str().unwrap().to_string();

    let (mut socket, _) = connect_async(format!("ws://{}/gamehub/{}", addr, game_id))
        .await
        .expect("Failed to connect to hub");

    let joined = next_event(&mut socket).await;
    assert_eq!(joined["event"], "PlayerJoined");
    assert_eq!(joined["gameId"], game_id);

    post(&client, format!("{}/api/game/{}/join", base, game_id), json!({ "name": "Bob" })).await;
    let update = next_event(&mut socket).await;
    assert_eq!(update["event"], "ReceiveGameUpdate");
    assert_eq!(update["game"]["status"], "Joined");
    assert_eq!(update["game"]["player2"]["name"], "Bob");

    post(
        &client,
        format!("{}/api/game/{}/move", base, game_id),
        json!({ "name": "Alice", "move": "Paper" }),
    )
    .await;
    post(
        &client,
        format!("{}/api/game/{}/move", base, game_id),
        json!({ "name": "Bob", "move": "Rock" }),
    )
    .await;

    let first_move = next_event(&mut socket).await;
    assert_eq!(first_move["game"]["player1"]["move"], "Paper");
    let finished = next_event(&mut socket).await;
    assert_eq!(finished["game"]["status"], "Completed");
    assert_eq!(finished["game"]["winner"], "Alice");
}

#[tokio::test]
async fn test_ping_and_relayed_notifications() {
    let (addr, _) = spawn_server(test_config()).await;
    let client = reqwest::Client::new();
    let game = post(
        &client,
        format!("http://{}/api/game/create", addr),
        json!({ "name": "Alice" }),
    )
    .await;
    let game_id = game["id"].as_str().unwrap().to_string();
    let (mut socket, _) = connect_async(format!("ws://{}/gamehub/{}", addr, game_id))
        .await
        .expect("Failed to connect to hub");
    assert_eq!(next_event(&mut socket).await["event"], "PlayerJoined");

    socket
        .send(Message::Text(json!({ "action": "ping" }).to_string()))
        .await
        .unwrap();
    assert_eq!(next_event(&mut socket).await["event"], "Pong");

    socket
        .send(Message::Text(
            json!({ "action": "notify_game_end", "winner": "Alice" }).to_string(),
        ))
        .await
        .unwrap();
    let ended = next_event(&mut socket).await;
    assert_eq!(ended["event"], "GameEnded");
    assert_eq!(ended["message"], "The winner is Alice");

    socket
        .send(Message::Text("{\"action\":\"dance\"}".to_string()))
        .await
        .unwrap();
    assert_eq!(next_event(&mut socket).await["event"], "Error");
}

#[tokio::test]
async fn test_hub_rejects_unknown_game() {
    let (addr, _) = spawn_server(test_config()).await;

    let result = connect_async(format!("ws://{}/gamehub/{}", addr, uuid::Uuid::new_v4())).await;

    assert!(result.is_err());
}
