//! Home dashboard — aggregated data for the landing screen.
//!
//! One read assembling today's schedule, the medication adherence card,
//! and both streak cards. Everything is derived on demand from the same
//! connection, so the pieces are mutually consistent.

use chrono::NaiveDate;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::db::DatabaseError;
use crate::reminders::{self, ScheduledReminder};
use crate::streaks::{self, StreakSummary};

/// Medicine doses taken today out of all medicine reminders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicationAdherence {
    pub taken: u32,
    pub total: u32,
}

/// Everything the dashboard screen renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardData {
    /// The day being displayed, `YYYY-MM-DD`.
    pub date: String,
    pub todays_reminders: Vec<ScheduledReminder>,
    pub medication: MedicationAdherence,
    pub streaks: Vec<StreakSummary>,
}

/// Assemble the dashboard for `today`.
pub fn dashboard_data(conn: &Connection, today: NaiveDate) -> Result<DashboardData, DatabaseError> {
    let todays_reminders = reminders::day_schedule(conn, today)?;
    let (taken, total) = reminders::medication_adherence(conn, today)?;
    let streaks = streaks::all_streak_summaries(conn, today)?;

    Ok(DashboardData {
        date: today.to_string(),
        todays_reminders,
        medication: MedicationAdherence { taken, total },
        streaks,
    })
}
