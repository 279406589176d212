//! ChatClient against a local backend on an ephemeral port

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use deepeuc::api::{ChatClient, ChatTransport, TransportError};
use deepeuc::config::Config;
use deepeuc::types::ModelType;
use serde_json::{Value, json};

async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve test backend");
    });
    format!("http://{addr}")
}

fn client_for(base: String) -> ChatClient {
    ChatClient::from_config(&Config {
        api_base_url: base,
        data_dir: None,
    })
}

#[tokio::test]
async fn posts_message_and_model_to_api_chat() {
    let router = Router::new().route(
        "/api/chat",
        post(|Json(body): Json<Value>| async move {
            let reply = format!(
                "{} via {}",
                body["message"].as_str().unwrap_or_default(),
                body["model"].as_str().unwrap_or_default()
            );
            Json(json!({ "response": reply }))
        }),
    );
    let client = client_for(spawn_backend(router).await);

    let reply = client
        .send_message("hello", &ModelType::Gemini15Flash)
        .await
        .expect("reply");
    assert_eq!(reply, "hello via gemini-1.5-flash");
}

#[tokio::test]
async fn wrapped_reply_is_normalized() {
    let router = Router::new().route(
        "/api/chat",
        post(|| async { Json(json!({ "response": { "reply": "hi there" } })) }),
    );
    let client = client_for(spawn_backend(router).await);

    let reply = client
        .send_message("hello", &ModelType::DeepSeek)
        .await
        .expect("reply");
    assert_eq!(reply, "hi there");
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let router = Router::new().route(
        "/api/chat",
        post(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
    );
    let client = client_for(spawn_backend(router).await);

    let err = client
        .send_message("hello", &ModelType::DeepSeek)
        .await
        .unwrap_err();
    match err {
        TransportError::Status { status, body } => {
            assert_eq!(status, StatusCode::BAD_GATEWAY);
            assert_eq!(body, "upstream down");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn non_json_body_is_an_error() {
    let router = Router::new().route("/api/chat", post(|| async { "plain text" }));
    let client = client_for(spawn_backend(router).await);

    let err = client
        .send_message("hello", &ModelType::DeepSeek)
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::Decode(_)));
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    drop(listener);

    let client = client_for(format!("http://{addr}"));
    let err = client
        .send_message("hello", &ModelType::DeepSeek)
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::Network(_)));
}
