use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use crate::upstream::CLIENT_ID;

/// Client that ignores proxy settings from the environment so requests stay
/// on the loopback interface.
pub fn local_http_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// Serves canned `ava/getRecording` payloads on an ephemeral local port and
/// returns its base URL.
pub async fn spawn_fake_api() -> String {
    let app = Router::new().route("/ava/getRecording/{id}", get(fake_recording));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

fn mp4(height: &str, http: &str, filename: &str) -> Value {
    json!({
        "height": height,
        "width": "0",
        "streamers": {"http": http, "rtmp": "rtmp://stream.example/"},
        "filename": filename,
        "mediaType": "MP4"
    })
}

async fn fake_recording(
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if query.get("client_id").map(String::as_str) != Some(CLIENT_ID) {
        return StatusCode::FORBIDDEN.into_response();
    }

    let media_files = match id.as_str() {
        "10001" => vec![
            mp4("480", "http://media.example/", "two_480.mp4"),
            mp4("720", "http://media.example/", "two_720.mp4"),
        ],
        "10002" => vec![
            mp4("720", "http://first.example/", "tie.mp4"),
            mp4("720", "http://second.example/", "tie.mp4"),
        ],
        "10003" => vec![mp4("unknown", "http://media.example/", "bad_height.mp4")],
        "10004" => vec![
            mp4("1080", "", "no_http_1080.mp4"),
            mp4("360", "http://media.example/", "no_http_360.mp4"),
        ],
        "10005" => vec![mp4("576", "http://media.example/", "script.mp4")],
        "50000" => return StatusCode::SERVICE_UNAVAILABLE.into_response(),
        "60000" => return (StatusCode::OK, "not json").into_response(),
        _ => return StatusCode::NOT_FOUND.into_response(),
    };

    let title = match id.as_str() {
        "10001" => "Two renditions",
        "10005" => "<script>alert('x')</script>",
        _ => "Recording",
    };

    Json(json!({
        "response": {
            "title": title,
            "mediaFiles": media_files
        }
    }))
    .into_response()
}
