//! Progress — health-log repository and trend windows.
//!
//! Self-reported blood-pressure, blood-sugar, and symptom entries, plus
//! the recent-window query feeding the progress charts.

use chrono::{Duration, Local, NaiveDate};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::{parse_stored_uuid, DatabaseError};
use crate::models::enums::HealthLogType;
use crate::models::health_log::HealthLog;

/// Input for recording a health log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewHealthLog {
    #[serde(rename = "type")]
    pub kind: HealthLogType,
    /// `YYYY-MM-DD`.
    pub date: String,
    pub value: String,
    pub notes: Option<String>,
}

/// One chart point: the entry's date and raw value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: String,
    pub value: String,
}

/// Records a health log entry. Returns the generated UUID.
pub fn record_health_log(conn: &Connection, entry: &NewHealthLog) -> Result<Uuid, DatabaseError> {
    if NaiveDate::parse_from_str(&entry.date, "%Y-%m-%d").is_err() {
        return Err(DatabaseError::ConstraintViolation(format!(
            "Invalid date (expected YYYY-MM-DD): {}",
            entry.date
        )));
    }
    if entry.value.trim().is_empty() {
        return Err(DatabaseError::ConstraintViolation(
            "Health log value must not be empty".into(),
        ));
    }

    let id = Uuid::new_v4();
    let now = Local::now()
        .naive_local()
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();

    conn.execute(
        "INSERT INTO health_logs (id, date, type, value, notes, recorded_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            id.to_string(),
            entry.date,
            entry.kind.as_str(),
            entry.value,
            entry.notes,
            now,
        ],
    )?;

    Ok(id)
}

/// Fetches health logs, newest first, optionally filtered by type.
pub fn fetch_health_logs(
    conn: &Connection,
    kind: Option<HealthLogType>,
) -> Result<Vec<HealthLog>, DatabaseError> {
    let mut sql = String::from(
        "SELECT id, date, type, value, notes FROM health_logs WHERE 1=1",
    );
    let mut params_vec: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();
    if let Some(kind) = kind {
        sql.push_str(" AND type = ?1");
        params_vec.push(Box::new(kind.as_str().to_string()));
    }
    sql.push_str(" ORDER BY date DESC, recorded_at DESC");

    let param_refs: Vec<&dyn rusqlite::types::ToSql> =
        params_vec.iter().map(|p| p.as_ref()).collect();

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(param_refs.as_slice(), |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, Option<String>>(4)?,
        ))
    })?;

    let mut logs = Vec::new();
    for row in rows {
        let (id, date, kind, value, notes) = row?;
        logs.push(HealthLog {
            id: parse_stored_uuid(&id, "HealthLog")?,
            date,
            kind: kind.parse()?,
            value,
            notes,
        });
    }
    Ok(logs)
}

/// Entries of one type within the last `days` days (inclusive of `today`),
/// oldest first — ready for a line chart.
pub fn recent_trend(
    conn: &Connection,
    kind: HealthLogType,
    days: u32,
    today: NaiveDate,
) -> Result<Vec<TrendPoint>, DatabaseError> {
    let window_start = today - Duration::days(i64::from(days.saturating_sub(1)));
    let mut stmt = conn.prepare(
        "SELECT date, value FROM health_logs
         WHERE type = ?1 AND date >= ?2 AND date <= ?3
         ORDER BY date ASC, recorded_at ASC",
    )?;
    let points = stmt
        .query_map(
            params![kind.as_str(), window_start.to_string(), today.to_string()],
            |row| {
                Ok(TrendPoint {
                    date: row.get(0)?,
                    value: row.get(1)?,
                })
            },
        )?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(points)
}
