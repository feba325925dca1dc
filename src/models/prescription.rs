use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One medicine line on a prescription.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrescribedMedicine {
    pub name: String,
    pub dosage: String,
    pub instructions: String,
}

/// A prescription with its medicine list. `doctor_name` may be the
/// patient's own entry ("Self") for manually added prescriptions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prescription {
    pub id: Uuid,
    pub doctor_name: String,
    /// Issue date, `YYYY-MM-DD`.
    pub date: String,
    pub medicines: Vec<PrescribedMedicine>,
}
