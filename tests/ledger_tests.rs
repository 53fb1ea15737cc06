use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sunosynth::error::SynthError;
use sunosynth::identity::UserId;
use sunosynth::ledger::{CreditLedgerClient, SIGNUP_BONUS};

fn user() -> UserId {
    UserId::new("user-123")
}

#[tokio::test]
async fn fetch_balance_caches_server_value() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/credits/fetch"))
        .and(query_param("uid", "user-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "credits": 42,
            "message": "ok"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ledger = CreditLedgerClient::new(server.uri());
    assert_eq!(ledger.cached_balance(), 0);

    let credits = ledger.fetch_balance(&user()).await.expect("fetch");
    assert_eq!(credits, 42);
    assert_eq!(ledger.cached_balance(), 42);
}

#[tokio::test]
async fn fetch_failure_leaves_cache_unchanged() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/credits/fetch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "credits": 30,
            "message": "ok"
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/credits/fetch"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let ledger = CreditLedgerClient::new(server.uri());
    ledger.fetch_balance(&user()).await.expect("first fetch");

    let err = ledger
        .fetch_balance(&user())
        .await
        .expect_err("second fetch should fail");
    assert!(matches!(err, SynthError::Service { status: 503, .. }));
    assert_eq!(ledger.cached_balance(), 30);
}

#[tokio::test]
async fn server_reported_failure_surfaces_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/credits/fetch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "account suspended"
        })))
        .mount(&server)
        .await;

    let ledger = CreditLedgerClient::new(server.uri());
    let err = ledger
        .fetch_balance(&user())
        .await
        .expect_err("success=false should fail");

    assert!(
        matches!(err, SynthError::Service { message, .. } if message == "account suspended")
    );
    assert_eq!(ledger.cached_balance(), 0);
}

#[tokio::test]
async fn debit_caches_authoritative_balance_not_local_subtraction() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/credits/fetch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "credits": 20,
            "message": "ok"
        })))
        .mount(&server)
        .await;
    // The server settles at 14, not the locally predicted 20 - 5 = 15.
    Mock::given(method("POST"))
        .and(path("/credits/deduce"))
        .and(body_json(json!({ "uid": "user-123", "amount": 5 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "credits": 14,
            "message": "ok"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ledger = CreditLedgerClient::new(server.uri());
    ledger.fetch_balance(&user()).await.expect("fetch");

    let credits = ledger.debit(&user(), 5).await.expect("debit");
    assert_eq!(credits, 14);
    assert_eq!(ledger.cached_balance(), 14);
}

#[tokio::test]
async fn debit_failure_leaves_cache_unchanged() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/credits/fetch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "credits": 20,
            "message": "ok"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/credits/deduce"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "ledger write failed"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ledger = CreditLedgerClient::new(server.uri());
    ledger.fetch_balance(&user()).await.expect("fetch");

    let err = ledger
        .debit(&user(), 10)
        .await
        .expect_err("debit should fail");
    assert!(
        matches!(err, SynthError::Service { status: 500, message } if message == "ledger write failed")
    );
    assert_eq!(ledger.cached_balance(), 20);
}

#[tokio::test]
async fn grant_signup_bonus_caches_new_balance() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/credits/save"))
        .and(body_json(json!({ "uid": "user-123", "amount": SIGNUP_BONUS })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "credits": SIGNUP_BONUS,
            "message": "ok"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ledger = CreditLedgerClient::new(server.uri());
    let credits = ledger.grant(&user(), SIGNUP_BONUS).await.expect("grant");
    assert_eq!(credits, SIGNUP_BONUS);
    assert_eq!(ledger.cached_balance(), SIGNUP_BONUS);
}

#[tokio::test]
async fn slow_ledger_maps_to_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/credits/fetch"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(80))
                .set_body_json(json!({ "success": true, "credits": 5, "message": "ok" })),
        )
        .mount(&server)
        .await;

    let ledger = CreditLedgerClient::new(server.uri()).with_timeout(Duration::from_millis(10));
    let err = ledger
        .fetch_balance(&user())
        .await
        .expect_err("should time out");
    assert!(matches!(err, SynthError::Timeout(10)));
    assert_eq!(ledger.cached_balance(), 0);
}
