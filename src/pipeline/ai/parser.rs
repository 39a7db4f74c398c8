//! Tolerant handling of the service's free-form JSON output.

use super::types::ClinicalExtraction;
use super::AiError;

/// Strip residual Markdown code fences the service sometimes emits despite
/// the prompt forbidding them.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Decode the service's response text into a [`ClinicalExtraction`].
///
/// Absent optional fields (severity, medication and lab lists, follow-up)
/// decode to their defaults; only invalid JSON or missing required fields
/// fail.
pub fn parse_clinical_extraction(response: &str) -> Result<ClinicalExtraction, AiError> {
    let cleaned = strip_code_fences(response);
    serde_json::from_str(&cleaned).map_err(|e| {
        tracing::warn!(error = %e, "clinical extraction decode failed");
        AiError::MalformedResponse(e.to_string())
    })
}
