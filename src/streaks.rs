//! Streak engine — consecutive-day streaks and achievement tiers.
//!
//! The current streak is a pure function of the reminder completion log:
//! it is recomputed from the raw log on every read, never stored, so the
//! displayed value cannot drift from the underlying data. Only the
//! longest-streak / goal bookkeeping lives in the `streak_records` table.
//!
//! "Today" is an explicit parameter throughout, so the walk is
//! deterministic and testable without mocking the system clock.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::DatabaseError;
use crate::models::enums::{ReminderType, StreakCategory};
use crate::models::reminder::Reminder;
use crate::reminders;

/// Upper bound on the backward walk, in days before today.
///
/// The medication category treats a day with zero scheduled medicine
/// reminders as vacuously complete, so over sparse data the walk could
/// otherwise run without bound. Ten years is far beyond any real
/// completion history.
pub const MAX_WALK_DAYS: i64 = 3650;

#[derive(Error, Debug)]
pub enum StreakError {
    #[error("Invalid date format (expected YYYY-MM-DD): {0}")]
    InvalidDateFormat(String),
}

/// Strict `YYYY-MM-DD` parse. Malformed dates are a data-validation error
/// surfaced to the caller, never coerced or skipped.
fn parse_day(s: &str) -> Result<NaiveDate, StreakError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| StreakError::InvalidDateFormat(s.to_string()))
}

// ═══════════════════════════════════════════
// Engine — pure computation over a snapshot
// ═══════════════════════════════════════════

/// A reminder reduced to what the walk needs: its schedule and the parsed
/// set of days it was completed.
struct ScheduledTask {
    recurring: bool,
    date: Option<NaiveDate>,
    completed: HashSet<NaiveDate>,
}

impl ScheduledTask {
    fn from_reminder(r: &Reminder) -> Result<Self, StreakError> {
        let date = r.date.as_deref().map(parse_day).transpose()?;
        let completed = r
            .completed_on
            .iter()
            .map(|d| parse_day(d))
            .collect::<Result<HashSet<_>, _>>()?;
        Ok(Self {
            recurring: r.is_recurring,
            date,
            completed,
        })
    }

    /// Recurring reminders run every day, one-off reminders only on
    /// their own date.
    fn scheduled_on(&self, day: NaiveDate) -> bool {
        self.recurring || self.date == Some(day)
    }
}

/// Compute the current consecutive-day streak for `category`, evaluated
/// as of `today`.
///
/// A day qualifies when:
/// - `all_activity`: at least one completion record (of any reminder,
///   scheduled that day or not) falls on the day;
/// - `medication_adherence`: every medicine reminder scheduled that day
///   was completed that day; a day with zero scheduled medicine reminders
///   qualifies vacuously.
///
/// Grace rule: an unfinished today does not break the streak as long as
/// yesterday qualifies — today is still in progress. If neither today nor
/// yesterday qualifies, the streak is 0.
pub fn current_streak(
    reminders: &[Reminder],
    category: StreakCategory,
    today: NaiveDate,
) -> Result<u32, StreakError> {
    current_streak_capped(reminders, category, today, MAX_WALK_DAYS)
}

/// Same walk with an explicit cap on how far before `today` it may go.
pub fn current_streak_capped(
    reminders: &[Reminder],
    category: StreakCategory,
    today: NaiveDate,
    max_walk_days: i64,
) -> Result<u32, StreakError> {
    let relevant_count = match category {
        StreakCategory::AllActivity => reminders.len(),
        StreakCategory::MedicationAdherence => reminders
            .iter()
            .filter(|r| r.kind == ReminderType::Medicine)
            .count(),
    };
    if relevant_count == 0 {
        return Ok(0);
    }

    // Parse and validate the whole snapshot up front. The medication
    // category only walks over medicine tasks, but `completed_days`
    // (the all-activity check) spans every reminder's log.
    let mut med_tasks: Vec<ScheduledTask> = Vec::new();
    let mut completed_days: HashSet<NaiveDate> = HashSet::new();
    for r in reminders {
        let task = ScheduledTask::from_reminder(r)?;
        completed_days.extend(task.completed.iter().copied());
        if r.kind == ReminderType::Medicine {
            med_tasks.push(task);
        }
    }

    let qualifies = |day: NaiveDate| -> bool {
        match category {
            StreakCategory::AllActivity => completed_days.contains(&day),
            StreakCategory::MedicationAdherence => med_tasks
                .iter()
                .filter(|t| t.scheduled_on(day))
                .all(|t| t.completed.contains(&day)),
        }
    };

    let yesterday = today - Duration::days(1);
    let mut streak = 1u32;
    let mut cursor = if qualifies(today) {
        yesterday
    } else if qualifies(yesterday) {
        // Grace day: today is still in progress, count from yesterday.
        yesterday - Duration::days(1)
    } else {
        return Ok(0);
    };

    let floor = today - Duration::days(max_walk_days);
    while cursor >= floor && qualifies(cursor) {
        streak += 1;
        cursor -= Duration::days(1);
    }

    Ok(streak)
}

// ═══════════════════════════════════════════
// Achievement tiers
// ═══════════════════════════════════════════

/// Gamification tier, derived purely from the streak length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementTier {
    None,
    Bronze,
    Silver,
    Gold,
    Diamond,
}

impl AchievementTier {
    pub fn for_streak(streak: u32) -> Self {
        match streak {
            0 => Self::None,
            1..=10 => Self::Bronze,
            11..=30 => Self::Silver,
            31..=90 => Self::Gold,
            _ => Self::Diamond,
        }
    }
}

// ═══════════════════════════════════════════
// Repository functions — seen by the API layer
// ═══════════════════════════════════════════

/// Streak card data for one category: the freshly computed current streak
/// joined with the persisted longest-streak / goal bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakSummary {
    pub category: StreakCategory,
    pub name: String,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub goal: u32,
    pub tier: AchievementTier,
}

fn display_name(category: StreakCategory) -> &'static str {
    match category {
        StreakCategory::AllActivity => "Daily Activity Log",
        StreakCategory::MedicationAdherence => "Medication Adherence",
    }
}

/// Compute the summary for one category, bumping the persisted longest
/// streak when the fresh value exceeds it.
pub fn streak_summary(
    conn: &Connection,
    category: StreakCategory,
    today: NaiveDate,
) -> Result<StreakSummary, DatabaseError> {
    let snapshot = reminders::fetch_all_reminders(conn)?;
    let current = current_streak(&snapshot, category, today)?;

    let (mut longest, goal): (u32, u32) = conn.query_row(
        "SELECT longest_streak, goal FROM streak_records WHERE category = ?1",
        params![category.as_str()],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    if current > longest {
        conn.execute(
            "UPDATE streak_records SET longest_streak = ?1 WHERE category = ?2",
            params![current, category.as_str()],
        )?;
        longest = current;
    }

    Ok(StreakSummary {
        category,
        name: display_name(category).to_string(),
        current_streak: current,
        longest_streak: longest,
        goal,
        tier: AchievementTier::for_streak(current),
    })
}

/// Both streak cards, in display order.
pub fn all_streak_summaries(
    conn: &Connection,
    today: NaiveDate,
) -> Result<Vec<StreakSummary>, DatabaseError> {
    Ok(vec![
        streak_summary(conn, StreakCategory::AllActivity, today)?,
        streak_summary(conn, StreakCategory::MedicationAdherence, today)?,
    ])
}

/// Update the goal for a category's streak card.
pub fn update_goal(
    conn: &Connection,
    category: StreakCategory,
    goal: u32,
) -> Result<(), DatabaseError> {
    if goal == 0 {
        return Err(DatabaseError::ConstraintViolation(
            "Goal must be at least 1 day".into(),
        ));
    }
    let updated = conn.execute(
        "UPDATE streak_records SET goal = ?1 WHERE category = ?2",
        params![goal, category.as_str()],
    )?;
    if updated == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "StreakRecord".into(),
            id: category.as_str().into(),
        });
    }
    Ok(())
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
