use axum::http::StatusCode;
use serde_json::Value;

use crate::tests::helper;

#[tokio::test]
async fn test_health() {
    let mut app = helper::setup_test_app().await;

    let (status_code, body) = helper::get(&mut app, "/health").await;
    assert_eq!(StatusCode::OK, status_code);

    let health = serde_json::from_slice::<Value>(&body[..]).unwrap();
    assert_eq!(Some("up"), health["status"].as_str());
    assert!(health["time"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_landing_page() {
    let mut app = helper::setup_test_app().await;

    let (status_code, body) = helper::get(&mut app, "/").await;
    assert_eq!(StatusCode::OK, status_code);

    let body = String::from_utf8_lossy(&body[..]);
    assert!(body.contains("/static/app.js"));
}

#[tokio::test]
async fn test_static_assets() {
    let mut app = helper::setup_test_app().await;

    let (status_code, body) = helper::get(&mut app, "/static/app.js").await;
    assert_eq!(StatusCode::OK, status_code);
    assert!(!body.is_empty());

    let (status_code, _) = helper::get(&mut app, "/static/missing.js").await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);
}
