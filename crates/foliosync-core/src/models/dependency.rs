//! Domain model for dependency edges between initiatives.
//!
//! The graph view itself is computed server-side; the client only holds
//! the raw edge list for editing.

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts")]
use ts_rs::TS;

use crate::sync::Resource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "ts", derive(TS), ts(export))]
pub enum DependencyKind {
    Blocks,
    Informs,
    SharesData,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(TS), ts(export))]
pub struct DependencyEdge {
    pub id: i64,
    pub from_initiative: i64,
    pub to_initiative: i64,
    #[serde(default)]
    pub kind: Option<DependencyKind>,
    #[serde(default)]
    pub note: Option<String>,
}

impl DependencyEdge {
    pub fn is_blocking(&self) -> bool {
        matches!(self.kind, Some(DependencyKind::Blocks))
    }
}

impl Resource for DependencyEdge {
    const PATH: &'static str = "dependencies";
    const SINGULAR: &'static str = "dependency";
    const PLURAL: &'static str = "dependencies";

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DependencyEdgeDraft {
    pub from_initiative: i64,
    pub to_initiative: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<DependencyKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DependencyEdgePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<DependencyKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}
