//! Client-side cache synchronization between UI state and the remote API.
//!
//! One `Synchronizer` per resource collection mediates every intent the
//! UI issues: exactly one request per intent, and on success the server's
//! authoritative Record replaces or extends the local collection. On
//! failure the collection is left untouched and the reason is recorded
//! for display. There is no optimistic insertion, no rollback, no retry,
//! and no cancellation of in-flight requests.
//!
//! Subscribers observe `CollectionState` snapshots through a watch
//! channel; compute-style results land in the separate single-slot
//! `DerivedResults` store.

mod derived;
mod state;
mod synchronizer;

pub use derived::DerivedResults;
pub use state::{CollectionState, RequestState};
pub use synchronizer::Synchronizer;

use serde::de::DeserializeOwned;

/// A server-owned resource type cached client-side.
///
/// Records are immutable values once received: the synchronizer only ever
/// replaces whole Records, never field-patches them. Identity is the
/// server-assigned `id`, unique within the collection and stable for the
/// Record's lifetime.
pub trait Resource: Clone + DeserializeOwned + Send + Sync + 'static {
    /// Collection path segment relative to the API base URL.
    const PATH: &'static str;

    /// Singular noun for status messages.
    const SINGULAR: &'static str;

    /// Plural noun for status messages.
    const PLURAL: &'static str;

    fn id(&self) -> i64;
}
