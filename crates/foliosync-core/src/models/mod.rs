//! Data models for portfolio-governance entities.
//!
//! This module contains the typed Records held by the collection
//! synchronizers, one file per resource slice:
//!
//! - `Initiative`: tracked projects with lifecycle `Stage`
//! - `RoadmapItem`: timeline entries on the delivery roadmap
//! - `DependencyEdge`: raw edges behind the dependency graph view
//! - `ScoringModel`, `Criterion`: weighted prioritization criteria
//! - `IntakeTemplate`, `IntakeField`: intake form definitions
//! - `Kpi`, `Leakage`: benefits tracking
//!
//! Every Record type has a `…Draft` creation payload and an all-optional
//! `…Patch` update payload.

pub mod benefits;
pub mod dependency;
pub mod initiative;
pub mod intake;
pub mod roadmap;
pub mod scoring;

pub use benefits::{Kpi, KpiDraft, KpiPatch, Leakage, LeakageDraft, LeakagePatch};
pub use dependency::{DependencyEdge, DependencyEdgeDraft, DependencyEdgePatch, DependencyKind};
pub use initiative::{Initiative, InitiativeDraft, InitiativePatch, Stage};
pub use intake::{FieldKind, IntakeField, IntakeTemplate, IntakeTemplateDraft, IntakeTemplatePatch};
pub use roadmap::{RoadmapItem, RoadmapItemDraft, RoadmapItemPatch};
pub use scoring::{Criterion, ScoringModel, ScoringModelDraft, ScoringModelPatch};
