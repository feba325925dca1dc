//! Prescriptions — backend types and repository functions.
//!
//! A prescription is an issue date, a prescriber name, and an ordered
//! medicine list. Manually added prescriptions use "Self" as the
//! prescriber.

use chrono::{Local, NaiveDate};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::{parse_stored_uuid, DatabaseError};
use crate::models::prescription::{PrescribedMedicine, Prescription};

/// Input for adding a prescription.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPrescription {
    pub doctor_name: String,
    /// Issue date, `YYYY-MM-DD`.
    pub date: String,
    pub medicines: Vec<PrescribedMedicine>,
}

/// Adds a prescription with its medicine list. Returns the generated UUID.
pub fn add_prescription(
    conn: &Connection,
    input: &NewPrescription,
) -> Result<Uuid, DatabaseError> {
    if input.doctor_name.trim().is_empty() {
        return Err(DatabaseError::ConstraintViolation(
            "Prescriber name must not be empty".into(),
        ));
    }
    if NaiveDate::parse_from_str(&input.date, "%Y-%m-%d").is_err() {
        return Err(DatabaseError::ConstraintViolation(format!(
            "Invalid date (expected YYYY-MM-DD): {}",
            input.date
        )));
    }
    if input.medicines.is_empty() {
        return Err(DatabaseError::ConstraintViolation(
            "Prescription requires at least one medicine".into(),
        ));
    }
    if input.medicines.iter().any(|m| m.name.trim().is_empty()) {
        return Err(DatabaseError::ConstraintViolation(
            "Medicine name must not be empty".into(),
        ));
    }

    let id = Uuid::new_v4();
    let now = Local::now()
        .naive_local()
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();

    // Parent row and medicine rows commit together or not at all.
    let tx = conn.unchecked_transaction()?;

    tx.execute(
        "INSERT INTO prescriptions (id, doctor_name, date, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![id.to_string(), input.doctor_name, input.date, now],
    )?;

    for (position, med) in input.medicines.iter().enumerate() {
        tx.execute(
            "INSERT INTO prescription_medicines
             (prescription_id, name, dosage, instructions, position)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                id.to_string(),
                med.name,
                med.dosage,
                med.instructions,
                position as i64,
            ],
        )?;
    }

    tx.commit()?;
    Ok(id)
}

/// Fetches all prescriptions, newest issue date first, medicines in the
/// order they were entered.
pub fn fetch_prescriptions(conn: &Connection) -> Result<Vec<Prescription>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, doctor_name, date
         FROM prescriptions
         ORDER BY date DESC, created_at DESC",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
        ))
    })?;

    let mut prescriptions = Vec::new();
    for row in rows {
        let (id, doctor_name, date) = row?;

        let mut med_stmt = conn.prepare(
            "SELECT name, dosage, instructions
             FROM prescription_medicines
             WHERE prescription_id = ?1
             ORDER BY position ASC",
        )?;
        let medicines = med_stmt
            .query_map(params![id], |row| {
                Ok(PrescribedMedicine {
                    name: row.get(0)?,
                    dosage: row.get(1)?,
                    instructions: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        prescriptions.push(Prescription {
            id: parse_stored_uuid(&id, "Prescription")?,
            doctor_name,
            date,
            medicines,
        });
    }
    Ok(prescriptions)
}

/// Hard-deletes a prescription; medicines cascade.
pub fn delete_prescription(
    conn: &Connection,
    prescription_id: &Uuid,
) -> Result<(), DatabaseError> {
    let deleted = conn.execute(
        "DELETE FROM prescriptions WHERE id = ?1",
        params![prescription_id.to_string()],
    )?;
    if deleted == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "Prescription".into(),
            id: prescription_id.to_string(),
        });
    }
    Ok(())
}
