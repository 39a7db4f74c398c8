use serde::{Deserialize, Serialize};

use crate::models::Severity;

/// Marker symptoms string identifying the fixed extraction-failure value.
pub const FALLBACK_SYMPTOMS: &str = "Could not extract";

/// One medication line extracted from a consultation transcript.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MedicationDescriptor {
    pub name: String,
    #[serde(default)]
    pub dosage: String,
    #[serde(default)]
    pub frequency: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub timing: String,
    #[serde(default)]
    pub instructions: String,
}

/// Structured clinical information extracted from free text by the AI
/// service. Field names follow the JSON contract the prompt dictates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalExtraction {
    pub symptoms: String,
    pub diagnosis: String,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub medications: Vec<MedicationDescriptor>,
    #[serde(default)]
    pub lab_tests: Vec<String>,
    pub instructions: String,
    #[serde(default)]
    pub follow_up_days: Option<u32>,
}

impl ClinicalExtraction {
    /// Fixed value returned when extraction cannot be completed. Call sites
    /// that must fail soft substitute this on error;
    /// [`ClinicalExtraction::is_fallback`] recognises it afterwards.
    pub fn fallback() -> Self {
        Self {
            symptoms: FALLBACK_SYMPTOMS.to_string(),
            diagnosis: "Analysis failed".to_string(),
            severity: Severity::Normal,
            medications: Vec::new(),
            lab_tests: Vec::new(),
            instructions: "Please review consultation manually".to_string(),
            follow_up_days: None,
        }
    }

    /// Whether this value is the fixed extraction-failure marker.
    pub fn is_fallback(&self) -> bool {
        self.symptoms == FALLBACK_SYMPTOMS && self.diagnosis == "Analysis failed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_matches_its_marker() {
        let fallback = ClinicalExtraction::fallback();
        assert!(fallback.is_fallback());
        assert_eq!(fallback.severity, Severity::Normal);
        assert!(fallback.medications.is_empty());
        assert!(fallback.lab_tests.is_empty());
        assert_eq!(fallback.instructions, "Please review consultation manually");
        assert!(fallback.follow_up_days.is_none());
    }

    #[test]
    fn legitimate_extraction_is_not_fallback() {
        let extraction = ClinicalExtraction {
            symptoms: "fever, cough".into(),
            diagnosis: "Influenza".into(),
            severity: Severity::Normal,
            medications: vec![],
            lab_tests: vec![],
            instructions: "Rest and fluids".into(),
            follow_up_days: Some(7),
        };
        assert!(!extraction.is_fallback());
    }

    #[test]
    fn serde_uses_camel_case_wire_names() {
        let extraction = ClinicalExtraction {
            symptoms: "fever".into(),
            diagnosis: "Flu".into(),
            severity: Severity::High,
            medications: vec![],
            lab_tests: vec!["CBC".into()],
            instructions: "Rest".into(),
            follow_up_days: Some(3),
        };
        let json = serde_json::to_string(&extraction).unwrap();
        assert!(json.contains("\"labTests\""));
        assert!(json.contains("\"followUpDays\""));
        assert!(json.contains("\"HIGH\""));
    }
}
