//! Derived-result slot tests: compute-style endpoints never touch the
//! collection, land in per-action slots, and racing calls for one action
//! resolve by response arrival order.

use std::sync::Arc;
use std::time::Duration;

use foliosync_core::api::ApiClient;
use foliosync_core::models::RoadmapItem;
use foliosync_core::sync::{RequestState, Synchronizer};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> ApiClient {
    let base = server.uri().parse().unwrap();
    ApiClient::new(base)
        .unwrap()
        .with_token("test-token".to_string())
}

#[tokio::test]
async fn run_derived_stores_result_without_touching_collection() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/roadmap/ai/suggestSequencing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"order": [3, 1, 2]})))
        .mount(&server)
        .await;

    let sync = Synchronizer::<RoadmapItem>::new(test_client(&server));
    let result = sync
        .run_derived("suggestSequencing", &json!({"window": "q3"}))
        .await
        .unwrap();

    assert_eq!(result, json!({"order": [3, 1, 2]}));
    assert_eq!(
        sync.derived().get("suggestSequencing"),
        Some(json!({"order": [3, 1, 2]}))
    );
    assert!(sync.records().is_empty());
    assert_eq!(sync.request_state(), RequestState::Idle);
}

#[tokio::test]
async fn distinct_actions_keep_separate_slots() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/roadmap/ai/suggestSequencing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"order": [1]})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/roadmap/ai/capacityCheck"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"overbooked": false})))
        .mount(&server)
        .await;

    let sync = Synchronizer::<RoadmapItem>::new(test_client(&server));
    sync.run_derived("suggestSequencing", &json!({}))
        .await
        .unwrap();
    sync.run_derived("capacityCheck", &json!({}))
        .await
        .unwrap();

    assert_eq!(
        sync.derived().get("suggestSequencing"),
        Some(json!({"order": [1]}))
    );
    assert_eq!(
        sync.derived().get("capacityCheck"),
        Some(json!({"overbooked": false}))
    );
}

#[tokio::test]
async fn last_arriving_response_wins_regardless_of_issue_order() {
    let server = MockServer::start().await;

    // The first-issued call gets a slow response; the second-issued call a
    // fast one. The slot must end up holding the slow response, because it
    // arrives last.
    Mock::given(method("POST"))
        .and(path("/roadmap/ai/suggestSequencing"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"winner": "first-issued"}))
                .set_delay(Duration::from_millis(400)),
        )
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/roadmap/ai/suggestSequencing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"winner": "second-issued"})))
        .with_priority(2)
        .mount(&server)
        .await;

    let sync = Arc::new(Synchronizer::<RoadmapItem>::new(test_client(&server)));

    let slow = sync.clone();
    let first = tokio::spawn(async move {
        slow.run_derived("suggestSequencing", &json!({"window": "q3"}))
            .await
    });
    // Give the first request time to reach the server before issuing the second.
    tokio::time::sleep(Duration::from_millis(100)).await;

    let second = sync
        .run_derived("suggestSequencing", &json!({"window": "q3"}))
        .await
        .unwrap();
    assert_eq!(second, json!({"winner": "second-issued"}));

    first.await.unwrap().unwrap();
    assert_eq!(
        sync.derived().get("suggestSequencing"),
        Some(json!({"winner": "first-issued"}))
    );
}

#[tokio::test]
async fn derived_failure_leaves_slot_untouched() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/roadmap/ai/suggestSequencing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"order": [5]})))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/roadmap/ai/suggestSequencing"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({"detail": "model overloaded"})),
        )
        .with_priority(2)
        .mount(&server)
        .await;

    let sync = Synchronizer::<RoadmapItem>::new(test_client(&server));
    sync.run_derived("suggestSequencing", &json!({}))
        .await
        .unwrap();

    let result = sync.run_derived("suggestSequencing", &json!({})).await;
    assert!(result.is_err());
    assert_eq!(
        sync.derived().get("suggestSequencing"),
        Some(json!({"order": [5]}))
    );
    assert_eq!(
        sync.request_state(),
        RequestState::Failed("model overloaded".to_string())
    );
}
