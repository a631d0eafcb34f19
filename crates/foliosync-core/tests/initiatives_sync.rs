//! Cache-discipline tests for the initiative synchronizer against a
//! mocked backend: wholesale list replacement, append-on-create,
//! replace-in-place on update, stale-id no-ops, and delete filtering.

use foliosync_core::api::ApiClient;
use foliosync_core::models::{Initiative, InitiativeDraft, InitiativePatch};
use foliosync_core::sync::{RequestState, Synchronizer};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> ApiClient {
    let base = server.uri().parse().unwrap();
    ApiClient::new(base)
        .unwrap()
        .with_token("test-token".to_string())
}

fn initiative_body(id: i64, title: &str) -> serde_json::Value {
    json!({"id": id, "title": title, "stage": "scoping"})
}

#[tokio::test]
async fn create_appends_each_server_record_exactly_once() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/initiatives"))
        .respond_with(ResponseTemplate::new(201).set_body_json(initiative_body(1, "Churn model")))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/initiatives"))
        .respond_with(ResponseTemplate::new(201).set_body_json(initiative_body(2, "Fraud scoring")))
        .up_to_n_times(1)
        .with_priority(2)
        .mount(&server)
        .await;

    let sync = Synchronizer::<Initiative>::new(test_client(&server));

    let first = sync
        .create(&InitiativeDraft {
            title: "Churn model".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    let second = sync
        .create(&InitiativeDraft {
            title: "Fraud scoring".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);

    let records = sync.records();
    assert_eq!(records.len(), 2);
    for id in [1, 2] {
        assert_eq!(records.iter().filter(|r| r.id == id).count(), 1);
    }
    assert_eq!(sync.request_state(), RequestState::Idle);
}

#[tokio::test]
async fn list_replaces_collection_wholesale() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/initiatives"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            initiative_body(1, "A"),
            initiative_body(2, "B"),
            initiative_body(3, "C"),
        ])))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/initiatives"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            initiative_body(7, "D"),
            initiative_body(8, "E"),
        ])))
        .with_priority(2)
        .mount(&server)
        .await;

    let sync = Synchronizer::<Initiative>::new(test_client(&server));

    sync.list().await.unwrap();
    assert_eq!(sync.records().len(), 3);

    // The second listing is smaller; nothing from the first may survive.
    sync.list().await.unwrap();
    let records = sync.records();
    assert_eq!(records.len(), 2);
    let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![7, 8]);
}

#[tokio::test]
async fn create_failure_inserts_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/initiatives"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"detail": "title is required"})),
        )
        .mount(&server)
        .await;

    let sync = Synchronizer::<Initiative>::new(test_client(&server));
    let result = sync
        .create(&InitiativeDraft::default())
        .await;

    assert!(result.is_err());
    assert!(sync.records().is_empty());
    assert_eq!(
        sync.request_state(),
        RequestState::Failed("title is required".to_string())
    );
}

#[tokio::test]
async fn update_replaces_matching_record_in_place() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/initiatives"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            initiative_body(1, "A"),
            initiative_body(2, "B"),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/initiatives/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(initiative_body(1, "A renamed")))
        .mount(&server)
        .await;

    let sync = Synchronizer::<Initiative>::new(test_client(&server));
    sync.list().await.unwrap();

    let updated = sync
        .update(
            1,
            &InitiativePatch {
                title: Some("A renamed".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "A renamed");

    let records = sync.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].title, "A renamed");
    assert_eq!(records[1].title, "B");
}

#[tokio::test]
async fn update_on_missing_id_leaves_collection_unchanged() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/initiatives"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([initiative_body(2, "B")])))
        .mount(&server)
        .await;
    // The remote update succeeds; the record just is not cached locally.
    Mock::given(method("PUT"))
        .and(path("/initiatives/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(initiative_body(7, "Ghost")))
        .expect(1)
        .mount(&server)
        .await;

    let sync = Synchronizer::<Initiative>::new(test_client(&server));
    sync.list().await.unwrap();
    let before = sync.records();

    let result = sync
        .update(
            7,
            &InitiativePatch {
                title: Some("Ghost".to_string()),
                ..Default::default()
            },
        )
        .await;

    assert!(result.is_ok());
    assert_eq!(sync.records(), before);
    assert_eq!(sync.request_state(), RequestState::Idle);
}

#[tokio::test]
async fn remove_twice_fires_both_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/initiatives"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([initiative_body(1, "A")])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/initiatives/1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(2)
        .mount(&server)
        .await;

    let sync = Synchronizer::<Initiative>::new(test_client(&server));
    sync.list().await.unwrap();

    sync.remove(1).await.unwrap();
    assert!(sync.records().is_empty());

    // No idempotency guard: the request fires again, the local delta is empty.
    sync.remove(1).await.unwrap();
    assert!(sync.records().is_empty());
    assert_eq!(sync.request_state(), RequestState::Idle);
}

#[tokio::test]
async fn create_update_remove_scenario() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/initiatives"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1, "title": "A"})))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/initiatives/1"))
        .and(body_json(json!({"title": "B"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "title": "B"})))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/initiatives/1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let sync = Synchronizer::<Initiative>::new(test_client(&server));

    sync.create(&InitiativeDraft {
        title: "A".to_string(),
        ..Default::default()
    })
    .await
    .unwrap();
    let records = sync.records();
    assert_eq!(records.len(), 1);
    assert_eq!((records[0].id, records[0].title.as_str()), (1, "A"));

    sync.update(
        1,
        &InitiativePatch {
            title: Some("B".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let records = sync.records();
    assert_eq!(records.len(), 1);
    assert_eq!((records[0].id, records[0].title.as_str()), (1, "B"));

    sync.remove(1).await.unwrap();
    assert!(sync.records().is_empty());
}

#[tokio::test]
async fn requests_carry_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/initiatives"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let sync = Synchronizer::<Initiative>::new(test_client(&server));
    sync.list().await.unwrap();
}
