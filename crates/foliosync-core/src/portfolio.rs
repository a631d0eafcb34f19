//! Portfolio-wide aggregation of the per-collection synchronizers.
//!
//! `Portfolio` is what an application embeds after login: one
//! synchronizer per resource slice sharing a single authenticated
//! `ApiClient`, plus the bulk refresh every dashboard screen triggers.

use futures::future::BoxFuture;
use futures::stream::{self, StreamExt};
use serde_json::Value;
use tracing::info;

use crate::api::{ApiClient, ApiError};
use crate::models::{
    DependencyEdge, Initiative, IntakeTemplate, Kpi, Leakage, RoadmapItem, ScoringModel,
};
use crate::sync::{Resource, Synchronizer};

/// Maximum concurrent collection refreshes.
/// Keeps the post-login burst from overwhelming the server.
const MAX_CONCURRENT_REFRESHES: usize = 4;

pub struct Portfolio {
    pub initiatives: Synchronizer<Initiative>,
    pub roadmap: Synchronizer<RoadmapItem>,
    pub dependencies: Synchronizer<DependencyEdge>,
    pub scoring_models: Synchronizer<ScoringModel>,
    pub intake_templates: Synchronizer<IntakeTemplate>,
    pub kpis: Synchronizer<Kpi>,
    pub leakages: Synchronizer<Leakage>,
}

/// Outcome of a portfolio-wide refresh: record counts per loaded slice
/// and failure messages per slice that could not be fetched.
#[derive(Debug, Default)]
pub struct RefreshReport {
    pub loaded: Vec<(&'static str, usize)>,
    pub failed: Vec<(&'static str, String)>,
}

impl RefreshReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

async fn refresh<R: Resource>(
    sync: &Synchronizer<R>,
    name: &'static str,
) -> (&'static str, Result<usize, String>) {
    match sync.list().await {
        Ok(records) => (name, Ok(records.len())),
        Err(_) => {
            let message = sync
                .request_state()
                .error()
                .unwrap_or("request failed")
                .to_string();
            (name, Err(message))
        }
    }
}

impl Portfolio {
    pub fn new(api: ApiClient) -> Self {
        Self {
            initiatives: Synchronizer::new(api.clone()),
            roadmap: Synchronizer::new(api.clone()),
            dependencies: Synchronizer::new(api.clone()),
            scoring_models: Synchronizer::new(api.clone()),
            intake_templates: Synchronizer::new(api.clone()),
            kpis: Synchronizer::new(api.clone()),
            leakages: Synchronizer::new(api),
        }
    }

    /// Refresh every collection, at most `MAX_CONCURRENT_REFRESHES` in
    /// flight. Slices that fail keep their cached records and report
    /// their failure string; the rest load normally.
    pub async fn refresh_all(&self) -> RefreshReport {
        let tasks: Vec<BoxFuture<'_, (&'static str, Result<usize, String>)>> = vec![
            Box::pin(refresh(&self.initiatives, "initiatives")),
            Box::pin(refresh(&self.roadmap, "roadmap")),
            Box::pin(refresh(&self.dependencies, "dependencies")),
            Box::pin(refresh(&self.scoring_models, "scoring models")),
            Box::pin(refresh(&self.intake_templates, "intake templates")),
            Box::pin(refresh(&self.kpis, "KPIs")),
            Box::pin(refresh(&self.leakages, "leakages")),
        ];

        let mut report = RefreshReport::default();
        let mut results = stream::iter(tasks).buffer_unordered(MAX_CONCURRENT_REFRESHES);
        while let Some((name, outcome)) = results.next().await {
            match outcome {
                Ok(count) => report.loaded.push((name, count)),
                Err(message) => report.failed.push((name, message)),
            }
        }

        info!(
            loaded = report.loaded.len(),
            failed = report.failed.len(),
            "portfolio refresh finished"
        );
        report
    }

    /// Server-computed sequencing suggestion across the roadmap.
    pub async fn suggest_sequencing(&self, payload: &Value) -> Result<Value, ApiError> {
        self.roadmap.run_derived("suggestSequencing", payload).await
    }

    /// Score recommendation for an initiative under a scoring model.
    pub async fn recommend_scores(&self, payload: &Value) -> Result<Value, ApiError> {
        self.scoring_models
            .run_derived("recommendScores", payload)
            .await
    }

    /// Server-side projection of the dependency graph for the graph view.
    pub async fn dependency_graph(&self) -> Result<Value, ApiError> {
        self.dependencies
            .run_derived("graphProjection", &Value::Null)
            .await
    }
}
