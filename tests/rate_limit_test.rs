use std::time::Duration;

use api::config::ServerConfig;
use reqwest::StatusCode;
use rps_tests::{spawn_server, test_config};

#[tokio::test]
async fn test_second_request_inside_window_is_throttled() {
    let config = ServerConfig {
        rate_limit_window: Duration::from_secs(60),
        ..test_config()
    };
    let (addr, state) = spawn_server(config).await;
    let client = reqwest::Client::new();
    let url = format!("http://{}/health", addr);

    let first = client.get(&url).send().await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = client.get(&url).send().await.unwrap();
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(
        second.text().await.unwrap(),
        "Rate limit exceeded. Try again later."
    );
    assert_eq!(state.rate_limiter.tracked_clients(), 1);
}

#[tokio::test]
async fn test_disabled_limiter_admits_bursts() {
    let (addr, _) = spawn_server(test_config()).await;
    let client = reqwest::Client::new();
    let url = format!("http://{}/health", addr);

    for _ in 0..5 {
        let response = client.get(&url).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
