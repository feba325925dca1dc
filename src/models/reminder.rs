use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::ReminderType;

/// A schedulable health task: a medicine dose, an appointment, or an
/// exercise session.
///
/// A recurring reminder is scheduled every calendar day; a one-off
/// reminder only on its `date`. `completed_on` is the per-date completion
/// log — unique `YYYY-MM-DD` strings, order irrelevant. Dates are kept as
/// stored strings here; the streak engine parses them strictly and rejects
/// malformed entries instead of guessing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reminder {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: ReminderType,
    pub title: String,
    pub details: Option<String>,
    /// Time of day, `HH:MM`. Display and notification scheduling only —
    /// never consumed by streak logic.
    pub time: String,
    pub is_recurring: bool,
    /// `YYYY-MM-DD`, meaningful only when `is_recurring` is false.
    pub date: Option<String>,
    pub completed_on: Vec<String>,
}
