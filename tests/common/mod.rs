//! Shared test fixtures.

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sunosynth::identity::StaticIdentity;
use sunosynth::ledger::CreditLedgerClient;
use sunosynth::orchestrator::ActionOrchestrator;
use sunosynth::services::{HttpLyricsService, HttpMusicService};

pub const TEST_UID: &str = "user-123";

/// Orchestrator with all collaborators pointed at a single mock server.
pub fn orchestrator_for(server: &MockServer) -> ActionOrchestrator {
    ActionOrchestrator::new(
        Arc::new(CreditLedgerClient::new(server.uri())),
        Arc::new(HttpLyricsService::new(server.uri())),
        Arc::new(HttpMusicService::new(server.uri())),
        Arc::new(StaticIdentity::new(TEST_UID)),
    )
}

/// Mount a `/credits/fetch` mock returning `credits` and prime the cache
/// through a real fetch.
pub async fn prime_balance(server: &MockServer, orchestrator: &ActionOrchestrator, credits: u32) {
    Mock::given(method("GET"))
        .and(path("/credits/fetch"))
        .and(query_param("uid", TEST_UID))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "credits": credits,
            "message": "ok"
        })))
        .mount(server)
        .await;

    let fetched = orchestrator.refresh_balance().await.expect("prime balance");
    assert_eq!(fetched, credits);
}

/// A `/credits/deduce` mock accepting exactly `amount` and answering with
/// `credits_after`.
pub fn debit_ok(amount: u32, credits_after: u32) -> Mock {
    Mock::given(method("POST"))
        .and(path("/credits/deduce"))
        .and(body_json(json!({ "uid": TEST_UID, "amount": amount })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "credits": credits_after,
            "message": "ok"
        })))
}

/// A `/credits/deduce` mock that always fails server-side.
pub fn debit_unavailable() -> Mock {
    Mock::given(method("POST"))
        .and(path("/credits/deduce"))
        .respond_with(ResponseTemplate::new(500).set_body_string("ledger down"))
}
