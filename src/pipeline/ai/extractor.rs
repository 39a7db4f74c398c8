//! High-level AI text operations: clinical extraction, plain-language
//! explanation, spelling correction and generic queries.

use super::gemini::AiService;
use super::parser::parse_clinical_extraction;
use super::prompt::{
    build_concise_prompt, build_explanation_prompt, build_extraction_prompt, build_spelling_prompt,
};
use super::types::ClinicalExtraction;
use super::AiError;

/// Sequences prompt construction, the service round trip and tolerant
/// parsing for each AI-backed operation.
pub struct Extractor {
    service: Box<dyn AiService + Send + Sync>,
}

impl Extractor {
    pub fn new(service: Box<dyn AiService + Send + Sync>) -> Self {
        Self { service }
    }

    /// Extract structured clinical information from a consultation
    /// transcript.
    ///
    /// Fails with the concrete error instead of masking it; call sites
    /// that must not fail substitute [`ClinicalExtraction::fallback`] on
    /// `Err`.
    pub fn extract_clinical_info(&self, transcript: &str) -> Result<ClinicalExtraction, AiError> {
        let prompt = build_extraction_prompt(transcript);
        let response = self.service.complete(&prompt)?;
        let extraction = parse_clinical_extraction(&response)?;
        tracing::debug!(
            medications = extraction.medications.len(),
            severity = %extraction.severity,
            "clinical extraction parsed"
        );
        Ok(extraction)
    }

    /// Explain a medical term or question in plain language.
    pub fn explain_in_plain_language(&self, query: &str) -> Result<String, AiError> {
        let prompt = build_explanation_prompt(query);
        self.service.complete(&prompt)
    }

    /// Normalize a free-text medication name to its corrected spelling.
    /// The reply is a single token, trimmed of whitespace.
    pub fn correct_name_spelling(&self, name: &str) -> Result<String, AiError> {
        let prompt = build_spelling_prompt(name);
        Ok(self.service.complete(&prompt)?.trim().to_string())
    }

    /// Answer an arbitrary query concisely.
    pub fn answer_query(&self, query: &str) -> Result<String, AiError> {
        let prompt = build_concise_prompt(query);
        self.service.complete(&prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::ai::gemini::MockAiClient;

    /// Service double that always fails like a network timeout.
    struct OfflineAi;

    impl AiService for OfflineAi {
        fn complete(&self, _prompt: &str) -> Result<String, AiError> {
            Err(AiError::ServiceUnavailable(
                "request timed out after 30s".into(),
            ))
        }
    }

    fn sample_response() -> &'static str {
        r#"{
            "symptoms": "fever",
            "diagnosis": "Influenza",
            "severity": "NORMAL",
            "medications": [],
            "labTests": [],
            "instructions": "Rest",
            "followUpDays": null
        }"#
    }

    #[test]
    fn extraction_parses_service_response() {
        let extractor = Extractor::new(Box::new(MockAiClient::new(sample_response())));
        let extraction = extractor.extract_clinical_info("patient has a fever").unwrap();
        assert_eq!(extraction.diagnosis, "Influenza");
    }

    #[test]
    fn extraction_strips_fences_from_response() {
        let fenced = format!("```json\n{}\n```", sample_response());
        let extractor = Extractor::new(Box::new(MockAiClient::new(&fenced)));
        assert!(extractor.extract_clinical_info("transcript").is_ok());
    }

    #[test]
    fn extraction_surfaces_service_failure() {
        let extractor = Extractor::new(Box::new(OfflineAi));
        let err = extractor.extract_clinical_info("transcript").unwrap_err();
        assert!(matches!(err, AiError::ServiceUnavailable(_)));
    }

    #[test]
    fn timeout_then_fallback_is_the_fixed_value() {
        let extractor = Extractor::new(Box::new(OfflineAi));
        let extraction = extractor
            .extract_clinical_info("transcript")
            .unwrap_or_else(|_| ClinicalExtraction::fallback());
        assert_eq!(extraction, ClinicalExtraction::fallback());
        assert!(extraction.is_fallback());
    }

    #[test]
    fn malformed_response_surfaces_as_error() {
        let extractor = Extractor::new(Box::new(MockAiClient::new("not json at all")));
        assert!(matches!(
            extractor.extract_clinical_info("transcript"),
            Err(AiError::MalformedResponse(_))
        ));
    }

    #[test]
    fn spelling_correction_trims_the_reply() {
        let extractor = Extractor::new(Box::new(MockAiClient::new("  Paracetamol\n")));
        assert_eq!(
            extractor.correct_name_spelling("parasetamol").unwrap(),
            "Paracetamol"
        );
    }

    #[test]
    fn explanation_returns_raw_text() {
        let extractor = Extractor::new(Box::new(MockAiClient::new(
            "It means your blood pressure is higher than normal.",
        )));
        let reply = extractor
            .explain_in_plain_language("what does hypertension mean")
            .unwrap();
        assert!(reply.contains("blood pressure"));
    }
}
