//! Domain model for scoring models.
//!
//! A scoring model is a named set of weighted criteria used to rank
//! initiatives; the actual score computation happens server-side.

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts")]
use ts_rs::TS;

use crate::sync::Resource;

/// Weight tolerance when checking normalization.
const WEIGHT_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(TS), ts(export))]
pub struct Criterion {
    pub key: String,
    pub label: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(TS), ts(export))]
pub struct ScoringModel {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub criteria: Vec<Criterion>,
}

impl ScoringModel {
    pub fn total_weight(&self) -> f64 {
        self.criteria.iter().map(|c| c.weight).sum()
    }

    /// Whether the criteria weights sum to 1.
    pub fn is_normalized(&self) -> bool {
        (self.total_weight() - 1.0).abs() < WEIGHT_EPSILON
    }
}

impl Resource for ScoringModel {
    const PATH: &'static str = "scoring-models";
    const SINGULAR: &'static str = "scoring model";
    const PLURAL: &'static str = "scoring models";

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScoringModelDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub criteria: Vec<Criterion>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScoringModelPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub criteria: Option<Vec<Criterion>>,
}
