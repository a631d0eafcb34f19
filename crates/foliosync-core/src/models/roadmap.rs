//! Domain model for roadmap timeline entries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "ts")]
use ts_rs::TS;

use crate::sync::Resource;

/// One bar on the roadmap: a phase of an initiative scheduled on a lane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(TS), ts(export))]
pub struct RoadmapItem {
    pub id: i64,
    pub initiative_id: i64,
    pub name: String,
    #[serde(default)]
    pub lane: Option<String>,
    #[serde(default)]
    pub starts_on: Option<NaiveDate>,
    #[serde(default)]
    pub ends_on: Option<NaiveDate>,
}

impl RoadmapItem {
    /// Scheduled duration in days, when both ends are set.
    pub fn duration_days(&self) -> Option<i64> {
        match (self.starts_on, self.ends_on) {
            (Some(start), Some(end)) => Some((end - start).num_days()),
            _ => None,
        }
    }
}

impl Resource for RoadmapItem {
    const PATH: &'static str = "roadmap";
    const SINGULAR: &'static str = "roadmap item";
    const PLURAL: &'static str = "roadmap items";

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RoadmapItemDraft {
    pub initiative_id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lane: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starts_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RoadmapItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lane: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starts_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_on: Option<NaiveDate>,
}
