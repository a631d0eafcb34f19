use super::Resource;

/// Status of the most recent operation against a collection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Pending,
    Failed(String),
}

impl RequestState {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending)
    }

    /// The failure message, when the last operation failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Observable snapshot of one resource collection.
///
/// Insertion order reflects server response order for listings and append
/// order for creations; no other ordering is promised.
#[derive(Debug, Clone)]
pub struct CollectionState<R> {
    pub records: Vec<R>,
    pub request: RequestState,
}

impl<R> Default for CollectionState<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            request: RequestState::Idle,
        }
    }
}

impl<R: Resource> CollectionState<R> {
    /// Replace the whole collection with a fresh server listing.
    /// Prior contents are discarded, never merged.
    pub fn replace_all(&mut self, records: Vec<R>) {
        self.records = records;
    }

    /// Append a server-confirmed record.
    pub fn append(&mut self, record: R) {
        self.records.push(record);
    }

    /// Replace the record carrying the same id, found by linear scan.
    /// Returns false when the id is not cached locally; the collection is
    /// left untouched in that case.
    pub fn replace_by_id(&mut self, record: R) -> bool {
        match self.records.iter().position(|r| r.id() == record.id()) {
            Some(index) => {
                self.records[index] = record;
                true
            }
            None => false,
        }
    }

    /// Remove every record with the given id, returning how many were
    /// dropped. Under the uniqueness invariant this is at most one.
    pub fn remove_by_id(&mut self, id: i64) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.id() != id);
        before - self.records.len()
    }
}
