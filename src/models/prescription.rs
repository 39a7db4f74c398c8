use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One scheduled medication line inside a prescription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationSchedule {
    pub medication_name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
    pub timing: String,
    pub instructions: String,
}

/// A prescription assembled from a consultation's clinical extraction.
/// The pipeline builds it; persisting it belongs to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prescription {
    pub appointment_id: i64,
    pub diagnosis: String,
    pub medications: Vec<MedicationSchedule>,
    pub lab_tests: Vec<String>,
    pub instructions: String,
    pub follow_up: Option<DateTime<Utc>>,
}
