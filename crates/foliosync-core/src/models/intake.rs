//! Domain model for intake form templates.

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts")]
use ts_rs::TS;

use crate::sync::Resource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "ts", derive(TS), ts(export))]
pub enum FieldKind {
    #[default]
    Text,
    LongText,
    Number,
    Date,
    Select,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(TS), ts(export))]
pub struct IntakeField {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    /// Choice list for `Select` fields; empty otherwise.
    #[serde(default)]
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(TS), ts(export))]
pub struct IntakeTemplate {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub fields: Vec<IntakeField>,
}

impl IntakeTemplate {
    pub fn required_fields(&self) -> impl Iterator<Item = &IntakeField> {
        self.fields.iter().filter(|f| f.required)
    }
}

impl Resource for IntakeTemplate {
    const PATH: &'static str = "intake-templates";
    const SINGULAR: &'static str = "intake template";
    const PLURAL: &'static str = "intake templates";

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct IntakeTemplateDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<IntakeField>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct IntakeTemplatePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<IntakeField>>,
}
