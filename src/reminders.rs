//! Reminders — backend types and repository functions.
//!
//! Create/delete reminders, read today's schedule, and maintain the
//! per-date completion log (the patient checking or unchecking a box).
//! The streak engine consumes the snapshot produced by
//! [`fetch_all_reminders`] and never writes back.

use std::collections::HashMap;

use chrono::{Local, NaiveDate, NaiveTime};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::{parse_stored_uuid, DatabaseError};
use crate::models::enums::ReminderType;
use crate::models::reminder::Reminder;

// ═══════════════════════════════════════════
// View types — serialised to frontend
// ═══════════════════════════════════════════

/// Input for creating a reminder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReminder {
    #[serde(rename = "type")]
    pub kind: ReminderType,
    pub title: String,
    pub details: Option<String>,
    /// Time of day, `HH:MM`.
    pub time: String,
    #[serde(default)]
    pub is_recurring: bool,
    /// Required when `is_recurring` is false.
    pub date: Option<String>,
}

/// A reminder scheduled for a given day, with its completion state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledReminder {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: ReminderType,
    pub title: String,
    pub details: Option<String>,
    pub time: String,
    pub is_recurring: bool,
    pub completed: bool,
}

// ═══════════════════════════════════════════
// Repository functions
// ═══════════════════════════════════════════

/// Creates a reminder. Returns the generated UUID.
///
/// Non-recurring reminders require a date; dates must be `YYYY-MM-DD`
/// and times `HH:MM`.
pub fn add_reminder(conn: &Connection, input: &NewReminder) -> Result<Uuid, DatabaseError> {
    if input.title.trim().is_empty() {
        return Err(DatabaseError::ConstraintViolation(
            "Reminder title must not be empty".into(),
        ));
    }
    if NaiveTime::parse_from_str(&input.time, "%H:%M").is_err() {
        return Err(DatabaseError::ConstraintViolation(format!(
            "Invalid time (expected HH:MM): {}",
            input.time
        )));
    }
    match (&input.date, input.is_recurring) {
        (None, false) => {
            return Err(DatabaseError::ConstraintViolation(
                "Non-recurring reminder requires a date".into(),
            ));
        }
        (Some(date), _) => {
            if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
                return Err(DatabaseError::ConstraintViolation(format!(
                    "Invalid date (expected YYYY-MM-DD): {date}"
                )));
            }
        }
        (None, true) => {}
    }

    let id = Uuid::new_v4();
    let now = Local::now()
        .naive_local()
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();

    conn.execute(
        "INSERT INTO reminders (id, type, title, details, time, is_recurring, date, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            id.to_string(),
            input.kind.as_str(),
            input.title,
            input.details,
            input.time,
            input.is_recurring as i32,
            input.date,
            now,
        ],
    )?;

    Ok(id)
}

/// Fetches every reminder with its full completion log — the snapshot the
/// streak engine consumes.
pub fn fetch_all_reminders(conn: &Connection) -> Result<Vec<Reminder>, DatabaseError> {
    let mut completions: HashMap<String, Vec<String>> = HashMap::new();
    {
        let mut stmt =
            conn.prepare("SELECT reminder_id, completed_date FROM reminder_completions")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        for row in rows {
            let (reminder_id, date) = row?;
            completions.entry(reminder_id).or_default().push(date);
        }
    }

    let mut stmt = conn.prepare(
        "SELECT id, type, title, details, time, is_recurring, date
         FROM reminders
         ORDER BY time ASC",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, Option<String>>(3)?,
            row.get::<_, String>(4)?,
            row.get::<_, i32>(5)?,
            row.get::<_, Option<String>>(6)?,
        ))
    })?;

    let mut reminders = Vec::new();
    for row in rows {
        let (id, kind, title, details, time, is_recurring, date) = row?;
        reminders.push(Reminder {
            completed_on: completions.remove(&id).unwrap_or_default(),
            id: parse_stored_uuid(&id, "Reminder")?,
            kind: kind.parse()?,
            title,
            details,
            time,
            is_recurring: is_recurring != 0,
            date,
        });
    }
    Ok(reminders)
}

/// Reminders scheduled for `day` (recurring, or one-off dated that day),
/// sorted by time of day.
pub fn day_schedule(
    conn: &Connection,
    day: NaiveDate,
) -> Result<Vec<ScheduledReminder>, DatabaseError> {
    let day_str = day.to_string();
    let mut stmt = conn.prepare(
        "SELECT r.id, r.type, r.title, r.details, r.time, r.is_recurring,
                EXISTS(SELECT 1 FROM reminder_completions c
                       WHERE c.reminder_id = r.id AND c.completed_date = ?1) AS completed
         FROM reminders r
         WHERE r.is_recurring = 1 OR r.date = ?1
         ORDER BY r.time ASC",
    )?;
    let rows = stmt.query_map(params![day_str], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, Option<String>>(3)?,
            row.get::<_, String>(4)?,
            row.get::<_, i32>(5)?,
            row.get::<_, bool>(6)?,
        ))
    })?;

    let mut scheduled = Vec::new();
    for row in rows {
        let (id, kind, title, details, time, is_recurring, completed) = row?;
        scheduled.push(ScheduledReminder {
            id: parse_stored_uuid(&id, "Reminder")?,
            kind: kind.parse()?,
            title,
            details,
            time,
            is_recurring: is_recurring != 0,
            completed,
        });
    }
    Ok(scheduled)
}

/// Marks or unmarks a reminder as completed on `day`.
///
/// Checking an already-checked day is a no-op (set semantics), matching
/// the frontend's idempotent check/uncheck toggle.
pub fn set_completion(
    conn: &Connection,
    reminder_id: &Uuid,
    day: NaiveDate,
    done: bool,
) -> Result<(), DatabaseError> {
    let exists: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM reminders WHERE id = ?1",
        params![reminder_id.to_string()],
        |row| row.get(0),
    )?;
    if !exists {
        return Err(DatabaseError::NotFound {
            entity_type: "Reminder".into(),
            id: reminder_id.to_string(),
        });
    }

    if done {
        conn.execute(
            "INSERT OR IGNORE INTO reminder_completions (reminder_id, completed_date)
             VALUES (?1, ?2)",
            params![reminder_id.to_string(), day.to_string()],
        )?;
    } else {
        conn.execute(
            "DELETE FROM reminder_completions
             WHERE reminder_id = ?1 AND completed_date = ?2",
            params![reminder_id.to_string(), day.to_string()],
        )?;
    }
    Ok(())
}

/// Hard-deletes a reminder; completions cascade.
pub fn delete_reminder(conn: &Connection, reminder_id: &Uuid) -> Result<(), DatabaseError> {
    let deleted = conn.execute(
        "DELETE FROM reminders WHERE id = ?1",
        params![reminder_id.to_string()],
    )?;
    if deleted == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "Reminder".into(),
            id: reminder_id.to_string(),
        });
    }
    Ok(())
}

/// Medicine doses taken on `day` out of all medicine reminders, for the
/// dashboard adherence card. The denominator is every medicine reminder,
/// scheduled that day or not — matching the dashboard's original math.
pub fn medication_adherence(
    conn: &Connection,
    day: NaiveDate,
) -> Result<(u32, u32), DatabaseError> {
    let total: u32 = conn.query_row(
        "SELECT COUNT(*) FROM reminders WHERE type = 'medicine'",
        [],
        |row| row.get(0),
    )?;
    let taken: u32 = conn.query_row(
        "SELECT COUNT(*) FROM reminders r
         WHERE r.type = 'medicine'
         AND EXISTS(SELECT 1 FROM reminder_completions c
                    WHERE c.reminder_id = r.id AND c.completed_date = ?1)",
        params![day.to_string()],
        |row| row.get(0),
    )?;
    Ok((taken, total))
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;

    fn test_db() -> Connection {
        open_memory_database().expect("in-memory DB")
    }

    fn make_reminder(kind: ReminderType, time: &str) -> NewReminder {
        NewReminder {
            kind,
            title: "Test reminder".into(),
            details: None,
            time: time.into(),
            is_recurring: true,
            date: None,
        }
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    // ───────────────────────────────────────
    // add_reminder tests
    // ───────────────────────────────────────

    #[test]
    fn add_recurring_reminder() {
        let conn = test_db();
        let id = add_reminder(&conn, &make_reminder(ReminderType::Medicine, "08:00")).unwrap();

        let stored_type: String = conn
            .query_row(
                "SELECT type FROM reminders WHERE id = ?1",
                params![id.to_string()],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(stored_type, "medicine");
    }

    #[test]
    fn add_one_off_requires_date() {
        let conn = test_db();
        let mut input = make_reminder(ReminderType::Appointment, "14:30");
        input.is_recurring = false;
        let result = add_reminder(&conn, &input);
        assert!(matches!(
            result,
            Err(DatabaseError::ConstraintViolation(_))
        ));

        input.date = Some("2025-04-01".into());
        assert!(add_reminder(&conn, &input).is_ok());
    }

    #[test]
    fn add_rejects_malformed_date() {
        let conn = test_db();
        let mut input = make_reminder(ReminderType::Appointment, "14:30");
        input.is_recurring = false;
        input.date = Some("01/04/2025".into());
        let result = add_reminder(&conn, &input);
        assert!(matches!(
            result,
            Err(DatabaseError::ConstraintViolation(_))
        ));
    }

    #[test]
    fn add_rejects_malformed_time() {
        let conn = test_db();
        let result = add_reminder(&conn, &make_reminder(ReminderType::Medicine, "8am"));
        assert!(matches!(
            result,
            Err(DatabaseError::ConstraintViolation(_))
        ));
    }

    #[test]
    fn add_rejects_empty_title() {
        let conn = test_db();
        let mut input = make_reminder(ReminderType::Medicine, "08:00");
        input.title = "  ".into();
        let result = add_reminder(&conn, &input);
        assert!(matches!(
            result,
            Err(DatabaseError::ConstraintViolation(_))
        ));
    }

    // ───────────────────────────────────────
    // fetch_all_reminders tests
    // ───────────────────────────────────────

    #[test]
    fn fetch_empty_database() {
        let conn = test_db();
        let reminders = fetch_all_reminders(&conn).unwrap();
        assert!(reminders.is_empty());
    }

    #[test]
    fn fetch_joins_completion_log() {
        let conn = test_db();
        let id = add_reminder(&conn, &make_reminder(ReminderType::Medicine, "08:00")).unwrap();
        set_completion(&conn, &id, day("2025-03-14"), true).unwrap();
        set_completion(&conn, &id, day("2025-03-15"), true).unwrap();

        let reminders = fetch_all_reminders(&conn).unwrap();
        assert_eq!(reminders.len(), 1);
        let mut completed = reminders[0].completed_on.clone();
        completed.sort();
        assert_eq!(completed, vec!["2025-03-14", "2025-03-15"]);
    }

    #[test]
    fn fetch_sorted_by_time() {
        let conn = test_db();
        add_reminder(&conn, &make_reminder(ReminderType::Exercise, "18:00")).unwrap();
        add_reminder(&conn, &make_reminder(ReminderType::Medicine, "08:00")).unwrap();

        let reminders = fetch_all_reminders(&conn).unwrap();
        assert_eq!(reminders[0].time, "08:00");
        assert_eq!(reminders[1].time, "18:00");
    }

    // ───────────────────────────────────────
    // day_schedule tests
    // ───────────────────────────────────────

    #[test]
    fn schedule_includes_recurring_and_dated() {
        let conn = test_db();
        add_reminder(&conn, &make_reminder(ReminderType::Medicine, "08:00")).unwrap();

        let mut one_off = make_reminder(ReminderType::Appointment, "14:30");
        one_off.is_recurring = false;
        one_off.date = Some("2025-03-15".into());
        add_reminder(&conn, &one_off).unwrap();

        let mut other_day = make_reminder(ReminderType::Exercise, "10:00");
        other_day.is_recurring = false;
        other_day.date = Some("2025-03-20".into());
        add_reminder(&conn, &other_day).unwrap();

        let schedule = day_schedule(&conn, day("2025-03-15")).unwrap();
        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule[0].time, "08:00");
        assert_eq!(schedule[1].time, "14:30");
    }

    #[test]
    fn schedule_reports_completion_state() {
        let conn = test_db();
        let id = add_reminder(&conn, &make_reminder(ReminderType::Medicine, "08:00")).unwrap();
        set_completion(&conn, &id, day("2025-03-15"), true).unwrap();

        let schedule = day_schedule(&conn, day("2025-03-15")).unwrap();
        assert!(schedule[0].completed);

        // A different day is untouched
        let schedule = day_schedule(&conn, day("2025-03-16")).unwrap();
        assert!(!schedule[0].completed);
    }

    // ───────────────────────────────────────
    // set_completion tests
    // ───────────────────────────────────────

    #[test]
    fn completion_check_is_idempotent() {
        let conn = test_db();
        let id = add_reminder(&conn, &make_reminder(ReminderType::Medicine, "08:00")).unwrap();
        set_completion(&conn, &id, day("2025-03-15"), true).unwrap();
        set_completion(&conn, &id, day("2025-03-15"), true).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM reminder_completions", [], |r| {
                r.get(0)
            })
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn completion_uncheck_removes_entry() {
        let conn = test_db();
        let id = add_reminder(&conn, &make_reminder(ReminderType::Medicine, "08:00")).unwrap();
        set_completion(&conn, &id, day("2025-03-15"), true).unwrap();
        set_completion(&conn, &id, day("2025-03-15"), false).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM reminder_completions", [], |r| {
                r.get(0)
            })
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn completion_retroactive_date_allowed() {
        // Unchecking yesterday's box and re-checking it later is a normal
        // flow; the log accepts any calendar date.
        let conn = test_db();
        let id = add_reminder(&conn, &make_reminder(ReminderType::Medicine, "08:00")).unwrap();
        set_completion(&conn, &id, day("2024-12-31"), true).unwrap();

        let reminders = fetch_all_reminders(&conn).unwrap();
        assert_eq!(reminders[0].completed_on, vec!["2024-12-31"]);
    }

    #[test]
    fn fetch_rejects_malformed_stored_id() {
        let conn = test_db();
        conn.execute(
            "INSERT INTO reminders (id, type, title, time, is_recurring, created_at)
             VALUES ('not-a-uuid', 'medicine', 'Aspirin', '08:00', 1, '2025-03-15 08:00:00')",
            [],
        )
        .unwrap();

        let result = fetch_all_reminders(&conn);
        assert!(matches!(result, Err(DatabaseError::InvalidId { .. })));
    }

    #[test]
    fn completion_unknown_reminder_not_found() {
        let conn = test_db();
        let result = set_completion(&conn, &Uuid::new_v4(), day("2025-03-15"), true);
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }

    // ───────────────────────────────────────
    // delete_reminder tests
    // ───────────────────────────────────────

    #[test]
    fn delete_cascades_to_completions() {
        let conn = test_db();
        let id = add_reminder(&conn, &make_reminder(ReminderType::Medicine, "08:00")).unwrap();
        set_completion(&conn, &id, day("2025-03-15"), true).unwrap();
        delete_reminder(&conn, &id).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM reminder_completions", [], |r| {
                r.get(0)
            })
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn delete_nonexistent_returns_not_found() {
        let conn = test_db();
        let result = delete_reminder(&conn, &Uuid::new_v4());
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }

    // ───────────────────────────────────────
    // medication_adherence tests
    // ───────────────────────────────────────

    #[test]
    fn adherence_counts_taken_over_total() {
        let conn = test_db();
        let a = add_reminder(&conn, &make_reminder(ReminderType::Medicine, "08:00")).unwrap();
        add_reminder(&conn, &make_reminder(ReminderType::Medicine, "20:00")).unwrap();
        add_reminder(&conn, &make_reminder(ReminderType::Exercise, "10:00")).unwrap();
        set_completion(&conn, &a, day("2025-03-15"), true).unwrap();

        let (taken, total) = medication_adherence(&conn, day("2025-03-15")).unwrap();
        assert_eq!((taken, total), (1, 2));
    }

    #[test]
    fn adherence_empty_database_is_zero_of_zero() {
        let conn = test_db();
        let (taken, total) = medication_adherence(&conn, day("2025-03-15")).unwrap();
        assert_eq!((taken, total), (0, 0));
    }
}
