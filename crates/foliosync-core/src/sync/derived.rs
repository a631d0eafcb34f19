use std::collections::HashMap;

use serde_json::Value;
use tokio::sync::watch;

/// Single-slot cache of compute-style results, one slot per action name.
///
/// Each completed call overwrites its action's slot on arrival, so two
/// racing calls for the same action resolve to whichever response arrived
/// last in wall-clock order, regardless of issuance order. Slots for
/// distinct actions never interfere.
pub struct DerivedResults {
    slots: watch::Sender<HashMap<String, Value>>,
}

impl DerivedResults {
    pub(crate) fn new() -> Self {
        let (slots, _) = watch::channel(HashMap::new());
        Self { slots }
    }

    pub(crate) fn store(&self, action: &str, result: Value) {
        self.slots.send_modify(|slots| {
            slots.insert(action.to_string(), result);
        });
    }

    /// Latest result for an action, if any call for it has completed.
    pub fn get(&self, action: &str) -> Option<Value> {
        self.slots.borrow().get(action).cloned()
    }

    /// Subscribe to slot snapshots; the receiver always yields the latest
    /// map of action name to result.
    pub fn subscribe(&self) -> watch::Receiver<HashMap<String, Value>> {
        self.slots.subscribe()
    }
}
