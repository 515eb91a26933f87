use agora_nullables::NullSigner;
use agora_subscriptions::{
    SubscribeParams, SubscriptionClient, SubscriptionError, UpdateSubscriptionsParams,
};
use agora_types::Address;
use axum::{http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};

/// Start a notification-service stand-in that echoes request bodies back.
async fn spawn_service() -> String {
    let app = Router::new()
        .route(
            "/",
            post(|Json(body): Json<Value>| async move { Json(json!({ "received": body })) }),
        )
        .route(
            "/subscriber",
            post(|Json(body): Json<Value>| async move { Json(json!({ "details": body })) }),
        );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn spawn_failing_service() -> String {
    let app = Router::new().route("/", post(|| async { StatusCode::SERVICE_UNAVAILABLE }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn subscribe_params() -> SubscribeParams {
    SubscribeParams {
        address: Address::parse("0x00000000000000000000000000000000000000aa").unwrap(),
        email: "voter@example.org".to_string(),
    }
}

#[tokio::test]
async fn test_subscribe_posts_signed_body() {
    let url = spawn_service().await;
    let signer = NullSigner::new("0xsigned");
    let client = SubscriptionClient::new(url, &signer).unwrap();

    let response = client.subscribe(&subscribe_params()).await.unwrap();
    assert_eq!(response["received"]["method"], "snapshot.subscribe");
    assert_eq!(response["received"]["params"]["signature"], "0xsigned");
    assert_eq!(response["received"]["params"]["email"], "voter@example.org");

    let requests = signer.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].1.fields("Subscribe").is_some());
    assert!(requests[0].0.get("signature").is_none());
}

#[tokio::test]
async fn test_update_subscriptions_uses_update_schema() {
    let url = spawn_service().await;
    let signer = NullSigner::new("0xsigned");
    let client = SubscriptionClient::new(url, &signer).unwrap();

    let params = UpdateSubscriptionsParams {
        address: Address::parse("0x00000000000000000000000000000000000000aa").unwrap(),
        email: "voter@example.org".to_string(),
        subscriptions: vec!["summary".to_string()],
    };
    let response = client.update_subscriptions(&params).await.unwrap();
    assert_eq!(response["received"]["method"], "snapshot.update");
    assert_eq!(response["received"]["params"]["subscriptions"], json!(["summary"]));
    assert!(signer.requests()[0].1.fields("Subscriptions").is_some());
}

#[tokio::test]
async fn test_sign_failure_short_circuits() {
    // Nothing listens here; a sign failure must return before any request.
    let client =
        SubscriptionClient::new("http://127.0.0.1:9", NullSigner::rejecting("user rejected")).unwrap();
    let err = client.subscribe(&subscribe_params()).await.unwrap_err();
    assert!(matches!(err, SubscriptionError::Sign(_)));
    assert_eq!(err.code(), "sign_error");
}

#[tokio::test]
async fn test_subscription_details_is_unsigned() {
    let url = spawn_service().await;
    let signer = NullSigner::new("0xsigned");
    let client = SubscriptionClient::new(format!("{url}/"), &signer).unwrap();

    let body = json!({ "address": "0x00000000000000000000000000000000000000aa" });
    let response = client.subscription_details(&body).await.unwrap();
    assert_eq!(response["details"], body);
    assert!(signer.requests().is_empty());
}

#[tokio::test]
async fn test_http_error_status() {
    let url = spawn_failing_service().await;
    let client = SubscriptionClient::new(url, NullSigner::new("0xsigned")).unwrap();
    let err = client.subscribe(&subscribe_params()).await.unwrap_err();
    assert!(matches!(err, SubscriptionError::Status(503)));
}
