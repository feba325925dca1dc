use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::HealthLogType;

/// A self-reported health measurement or symptom note.
///
/// `value` is free text in whatever unit the patient uses, e.g. `120/80`
/// for blood pressure or `98 mg/dL` for blood sugar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthLog {
    pub id: Uuid,
    /// `YYYY-MM-DD`.
    pub date: String,
    #[serde(rename = "type")]
    pub kind: HealthLogType,
    pub value: String,
    pub notes: Option<String>,
}
