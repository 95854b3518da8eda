#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, Request};
use axum::response::Response;
use configs::DatabaseConfig;
use sea_orm::DatabaseConnection;
use tempfile::TempDir;

/// Fresh migrated SQLite file; hold the `TempDir` for as long as the connection is used.
pub async fn get_db() -> anyhow::Result<(TempDir, DatabaseConnection)> {
    let dir = tempfile::tempdir()?;
    let cfg = DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", dir.path().join("server.db").display()),
        ..Default::default()
    };
    let db = models::db::connect_and_migrate(&cfg).await?;
    Ok((dir, db))
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn body_json(resp: Response) -> serde_json::Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(resp: Response) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn blue_bottle() -> serde_json::Value {
    serde_json::json!({
        "name": "Blue Bottle",
        "map_url": "https://maps.example.com/bb",
        "img_url": "https://img.example.com/bb.jpg",
        "location": "Downtown",
        "seats": "20-30",
        "has_toilet": true,
        "has_wifi": true,
        "has_sockets": true,
        "can_take_calls": false,
        "coffee_price": "$3.50"
    })
}
