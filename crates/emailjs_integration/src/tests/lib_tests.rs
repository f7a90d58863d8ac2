use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tokio::{
    net::TcpListener,
    sync::{oneshot, Mutex},
};

use super::*;

#[derive(Clone)]
struct ServerState {
    tx: Arc<Mutex<Option<oneshot::Sender<serde_json::Value>>>>,
    respond_with: StatusCode,
}

async fn handle_send_email(
    State(state): State<ServerState>,
    Json(payload): Json<serde_json::Value>,
) -> StatusCode {
    if let Some(tx) = state.tx.lock().await.take() {
        let _ = tx.send(payload);
    }
    state.respond_with
}

async fn spawn_email_server(
    respond_with: StatusCode,
) -> anyhow::Result<(String, oneshot::Receiver<serde_json::Value>)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let (tx, rx) = oneshot::channel();
    let state = ServerState {
        tx: Arc::new(Mutex::new(Some(tx))),
        respond_with,
    };
    let app = Router::new()
        .route("/api/v1.0/email/send", post(handle_send_email))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), rx))
}

fn test_settings(api_base_url: String) -> EmailJsSettings {
    EmailJsSettings {
        api_base_url,
        service_id: "service_test".into(),
        template_id: "template_test".into(),
        public_key: "pk_test".into(),
    }
}

fn sample_fields() -> ContactFields {
    ContactFields {
        name: "Jane Doe".into(),
        email: "jane@example.com".into(),
        message: "This is a sufficiently long message.".into(),
    }
}

#[tokio::test]
async fn deliver_posts_renamed_fields_and_identifiers() {
    let (server_url, payload_rx) = spawn_email_server(StatusCode::OK).await.expect("spawn");
    let sender = EmailJsSender::new(test_settings(server_url));

    let receipt = sender.deliver(&sample_fields()).await.expect("deliver");
    assert_eq!(receipt.status, 200);

    let payload = payload_rx.await.expect("payload captured");
    assert_eq!(payload["service_id"], "service_test");
    assert_eq!(payload["template_id"], "template_test");
    assert_eq!(payload["user_id"], "pk_test");
    assert_eq!(payload["template_params"]["from_name"], "Jane Doe");
    assert_eq!(payload["template_params"]["email"], "jane@example.com");
    assert_eq!(
        payload["template_params"]["message"],
        "This is a sufficiently long message."
    );
}

#[tokio::test]
async fn non_success_status_maps_to_rejected_fault() {
    let (server_url, _payload_rx) = spawn_email_server(StatusCode::BAD_REQUEST)
        .await
        .expect("spawn");
    let sender = EmailJsSender::new(test_settings(server_url));

    let fault = sender
        .deliver(&sample_fields())
        .await
        .expect_err("expected rejection");
    match fault {
        DeliveryFault::Rejected { status } => assert_eq!(status, 400),
        other => panic!("expected Rejected fault, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_service_maps_to_transport_fault() {
    // Bind then drop to get a port with nothing listening on it.
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let sender = EmailJsSender::new(test_settings(format!("http://{addr}")));
    let fault = sender
        .deliver(&sample_fields())
        .await
        .expect_err("expected transport failure");
    assert!(matches!(fault, DeliveryFault::Transport(_)));
}

#[tokio::test]
async fn send_url_tolerates_trailing_slash_in_base_url() {
    let sender = EmailJsSender::new(test_settings("http://127.0.0.1:1/".into()));
    assert_eq!(sender.send_url(), "http://127.0.0.1:1/api/v1.0/email/send");
}
