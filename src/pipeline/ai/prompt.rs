//! Prompt builders for the AI text operations.
//!
//! The extraction prompt pins the exact JSON contract and forbids Markdown
//! fences; the parser still strips residual fences because models ignore
//! that instruction often enough.

/// Build the clinical-extraction prompt: strict JSON only.
pub fn build_extraction_prompt(transcript: &str) -> String {
    format!(
        r#"Analyze this doctor-patient conversation and extract medical information.

Conversation: "{transcript}"

Return ONLY a valid JSON object with these exact keys. Do not use Markdown
formatting (like ```json).
{{
    "symptoms": "comma-separated list of symptoms",
    "diagnosis": "potential diagnosis",
    "severity": "LOW|NORMAL|HIGH|CRITICAL",
    "medications": [
        {{
            "name": "medication name",
            "dosage": "dosage amount",
            "frequency": "how often",
            "duration": "how long",
            "timing": "when to take",
            "instructions": "additional notes"
        }}
    ],
    "labTests": ["list of recommended tests"],
    "instructions": "general care instructions",
    "followUpDays": 7
}}"#
    )
}

/// Build the plain-language explanation prompt for patient-facing questions.
pub fn build_explanation_prompt(query: &str) -> String {
    format!(
        "You are a helpful medical assistant explaining to a patient.\n\
         Explain this in very simple language (max 3 sentences):\n\n\
         \"{query}\"\n\n\
         Use everyday words, avoid jargon, and be empathetic."
    )
}

/// Build the spelling-correction prompt for a medication name.
pub fn build_spelling_prompt(name: &str) -> String {
    format!("Correct this medication name (reply with ONLY the corrected name):\n\"{name}\"")
}

/// Wrap an arbitrary query so the answer stays short.
pub fn build_concise_prompt(query: &str) -> String {
    format!("Provide a concise answer (2-3 sentences max): {query}")
}
