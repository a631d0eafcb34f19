//! Domain model for portfolio initiatives.
//!
//! An initiative is one tracked project in the portfolio, carrying its
//! delivery-model lifecycle stage and ownership metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "ts")]
use ts_rs::TS;

use crate::sync::Resource;

/// Lifecycle stage of an initiative's delivery model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "ts", derive(TS), ts(export))]
pub enum Stage {
    Intake,
    Scoping,
    Build,
    Validation,
    Deployed,
    Retired,
    /// Forward-compatible catch-all for stages the backend introduces
    /// after this client version is deployed.
    #[serde(other)]
    Unknown,
}

impl Stage {
    pub fn display_name(&self) -> &'static str {
        match self {
            Stage::Intake => "Intake",
            Stage::Scoping => "Scoping",
            Stage::Build => "Build",
            Stage::Validation => "Validation",
            Stage::Deployed => "Deployed",
            Stage::Retired => "Retired",
            Stage::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(TS), ts(export))]
pub struct Initiative {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub stage: Option<Stage>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Initiative {
    /// Retired initiatives stay listed but no longer count as active work.
    pub fn is_active(&self) -> bool {
        !matches!(self.stage, Some(Stage::Retired))
    }
}

impl Resource for Initiative {
    const PATH: &'static str = "initiatives";
    const SINGULAR: &'static str = "initiative";
    const PLURAL: &'static str = "initiatives";

    fn id(&self) -> i64 {
        self.id
    }
}

/// Creation payload; the server assigns `id`, timestamps, and defaults.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InitiativeDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,
}

/// Field-level update payload; absent fields are left untouched server-side.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InitiativePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}
