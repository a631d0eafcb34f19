use serde::Serialize;
use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::api::{ApiClient, ApiError};

use super::{CollectionState, DerivedResults, RequestState, Resource};

/// Mediator between UI intents and the remote API for one resource
/// collection.
///
/// Every operation issues exactly one request. Collection mutations are
/// applied atomically in the completion path via `send_modify`, so
/// subscribers never observe a half-applied change; when several
/// operations are in flight their mutations land in response-arrival
/// order.
///
/// Failures never propagate as panics: each one is converted to a
/// human-readable message in `RequestState::Failed` (the server's
/// `detail` verbatim when present, a generic fallback otherwise) and
/// also returned as a typed `ApiError` for callers that await the
/// outcome directly.
pub struct Synchronizer<R: Resource> {
    api: ApiClient,
    state: watch::Sender<CollectionState<R>>,
    derived: DerivedResults,
}

impl<R: Resource> Synchronizer<R> {
    pub fn new(api: ApiClient) -> Self {
        let (state, _) = watch::channel(CollectionState::default());
        Self {
            api,
            state,
            derived: DerivedResults::new(),
        }
    }

    /// Subscribe to collection snapshots. The receiver always yields the
    /// latest state; intermediate states may be skipped.
    pub fn subscribe(&self) -> watch::Receiver<CollectionState<R>> {
        self.state.subscribe()
    }

    /// Current records, cloned out of the shared state.
    pub fn records(&self) -> Vec<R> {
        self.state.borrow().records.clone()
    }

    pub fn request_state(&self) -> RequestState {
        self.state.borrow().request.clone()
    }

    /// The compute-result slots for this collection's `ai/` endpoints.
    pub fn derived(&self) -> &DerivedResults {
        &self.derived
    }

    fn set_pending(&self) {
        self.state.send_modify(|s| s.request = RequestState::Pending);
    }

    fn fail(&self, fallback: String, err: ApiError) -> ApiError {
        let message = match err.detail() {
            Some(detail) => detail.to_string(),
            None => fallback,
        };
        warn!(collection = R::PATH, error = %err, "operation failed");
        self.state
            .send_modify(|s| s.request = RequestState::Failed(message));
        err
    }

    /// Fetch the full collection and replace the local cache wholesale.
    /// On failure the cached records keep their pre-call value.
    pub async fn list(&self) -> Result<Vec<R>, ApiError> {
        self.set_pending();
        match self.api.get_json::<Vec<R>>(R::PATH).await {
            Ok(records) => {
                debug!(collection = R::PATH, count = records.len(), "collection replaced");
                let stored = records.clone();
                self.state.send_modify(|s| {
                    s.replace_all(stored);
                    s.request = RequestState::Idle;
                });
                Ok(records)
            }
            Err(err) => Err(self.fail(format!("Failed to fetch {}", R::PLURAL), err)),
        }
    }

    /// Create a record. On success the server's authoritative version
    /// (which may differ from the draft) is appended and returned; no
    /// client-synthesized record is ever inserted ahead of the response.
    pub async fn create<D>(&self, draft: &D) -> Result<R, ApiError>
    where
        D: Serialize + ?Sized,
    {
        self.set_pending();
        match self.api.post_json::<R, D>(R::PATH, draft).await {
            Ok(record) => {
                debug!(collection = R::PATH, id = record.id(), "record created");
                let stored = record.clone();
                self.state.send_modify(|s| {
                    s.append(stored);
                    s.request = RequestState::Idle;
                });
                Ok(record)
            }
            Err(err) => Err(self.fail(format!("Failed to create {}", R::SINGULAR), err)),
        }
    }

    /// Update the record with the given id. On success the matching cached
    /// record is replaced wholesale by the server's response; when the id
    /// is not cached locally (stale cache) the collection is left as-is
    /// even though the remote update succeeded.
    pub async fn update<P>(&self, id: i64, patch: &P) -> Result<R, ApiError>
    where
        P: Serialize + ?Sized,
    {
        self.set_pending();
        let path = format!("{}/{}", R::PATH, id);
        match self.api.put_json::<R, P>(&path, patch).await {
            Ok(record) => {
                let stored = record.clone();
                self.state.send_modify(|s| {
                    if !s.replace_by_id(stored) {
                        debug!(collection = R::PATH, id, "update target not cached");
                    }
                    s.request = RequestState::Idle;
                });
                Ok(record)
            }
            Err(err) => Err(self.fail(format!("Failed to update {}", R::SINGULAR), err)),
        }
    }

    /// Delete the record with the given id and drop it from the cache.
    /// There is no idempotency guard: removing an already-removed id still
    /// issues the request, and the local delta is simply empty.
    pub async fn remove(&self, id: i64) -> Result<(), ApiError> {
        self.set_pending();
        let path = format!("{}/{}", R::PATH, id);
        match self.api.delete(&path).await {
            Ok(()) => {
                self.state.send_modify(|s| {
                    if s.remove_by_id(id) == 0 {
                        debug!(collection = R::PATH, id, "delete target not cached");
                    }
                    s.request = RequestState::Idle;
                });
                Ok(())
            }
            Err(err) => Err(self.fail(format!("Failed to delete {}", R::SINGULAR), err)),
        }
    }

    /// Run a compute-style `ai/` endpoint that does not mutate the
    /// collection. The opaque result lands in this collection's derived
    /// slot for `action`, overwriting any previous result for the same
    /// action; racing calls resolve by arrival order.
    pub async fn run_derived<P>(&self, action: &str, payload: &P) -> Result<Value, ApiError>
    where
        P: Serialize + ?Sized,
    {
        self.set_pending();
        let path = format!("{}/ai/{}", R::PATH, action);
        match self.api.post_json::<Value, P>(&path, payload).await {
            Ok(result) => {
                debug!(collection = R::PATH, action, "derived result stored");
                self.derived.store(action, result.clone());
                self.state.send_modify(|s| s.request = RequestState::Idle);
                Ok(result)
            }
            Err(err) => Err(self.fail(format!("Failed to run {}", action), err)),
        }
    }
}
