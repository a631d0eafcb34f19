//! Domain models for benefits tracking: KPIs and benefit leakages.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "ts")]
use ts_rs::TS;

use crate::sync::Resource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(TS), ts(export))]
pub struct Kpi {
    pub id: i64,
    pub initiative_id: i64,
    pub name: String,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub target: Option<f64>,
    #[serde(default)]
    pub actual: Option<f64>,
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

impl Kpi {
    /// Fraction of target reached, when both values are known.
    pub fn attainment(&self) -> Option<f64> {
        match (self.actual, self.target) {
            (Some(actual), Some(target)) if target != 0.0 => Some(actual / target),
            _ => None,
        }
    }
}

impl Resource for Kpi {
    const PATH: &'static str = "kpis";
    const SINGULAR: &'static str = "KPI";
    const PLURAL: &'static str = "KPIs";

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct KpiDraft {
    pub initiative_id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct KpiPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,
}

/// A recorded shortfall against a KPI's expected benefit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(TS), ts(export))]
pub struct Leakage {
    pub id: i64,
    pub kpi_id: i64,
    pub amount: f64,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub recorded_on: Option<NaiveDate>,
}

impl Resource for Leakage {
    const PATH: &'static str = "leakages";
    const SINGULAR: &'static str = "leakage";
    const PLURAL: &'static str = "leakages";

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LeakageDraft {
    pub kpi_id: i64,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LeakagePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded_on: Option<NaiveDate>,
}
