//! Single entry point sequencing classification, extraction, record
//! resolution, store mutation and notification emission — one command at a
//! time, stateless across commands.

use chrono::Utc;

use crate::models::{MedicationSchedule, Prescription, Record};
use crate::notifier::{derive_notifications, NotificationSink, Transition};
use crate::store::{RecordStore, StoreError};

use super::ai::{ClinicalExtraction, Extractor};
use super::extract::{extract_category, extract_record_id, extract_subject, find_category};
use super::intent::{classify, Command, IdAction, Intent, MoveKind};
use super::matcher::best_match;

/// Keywords that escalate a consultation to the emergency path.
const EMERGENCY_KEYWORDS: &[&str] = &["emergency", "urgent", "critical"];

/// Keywords that route an unclassified command to plain-language
/// explanation rather than a generic answer.
const EXPLANATION_KEYWORDS: &[&str] = &["what", "mean", "explain", "define"];

/// Result of one handled command: the confirmation message plus a fresh
/// listing so observers render consistent state.
#[derive(Debug, Clone)]
pub struct CommandOutcome {
    pub message: String,
    pub records: Vec<Record>,
}

/// Result of one processed consultation transcript.
#[derive(Debug, Clone)]
pub struct ConsultationOutcome {
    pub message: String,
    /// Built prescription for the caller to persist; `None` when the
    /// transcript escalated to the emergency path.
    pub prescription: Option<Prescription>,
    /// Whether the clinical extraction came back as the fixed fallback.
    pub extraction_failed: bool,
}

/// Command-local failures. Every kind renders to a confirmation message;
/// none escapes [`CommandOrchestrator::handle`].
#[derive(Debug, thiserror::Error)]
enum CommandError {
    #[error("could not find a usable name in the command")]
    ExtractionFailure,

    #[error("no record within matching distance of '{0}'")]
    NoMatchFound(String),

    #[error("item {0} is not in the list")]
    RecordNotFound(usize),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Orchestrates one command to completion against explicit collaborators.
pub struct CommandOrchestrator<'a> {
    store: &'a dyn RecordStore,
    ai: &'a Extractor,
    sink: &'a dyn NotificationSink,
}

impl<'a> CommandOrchestrator<'a> {
    pub fn new(
        store: &'a dyn RecordStore,
        ai: &'a Extractor,
        sink: &'a dyn NotificationSink,
    ) -> Self {
        Self { store, ai, sink }
    }

    /// Handle one voice command to completion. Always returns a
    /// confirmation message, even on failure; failures never mutate.
    pub fn handle(&self, raw: &str) -> CommandOutcome {
        let command = Command::new(raw);
        let intent = classify(command.normalized());
        tracing::info!(intent = ?intent, "handling command");

        let message = match intent {
            Intent::IdentifierTargeted { action } => self.handle_identifier(&command, action),
            Intent::DeleteAll => self.handle_delete_all(),
            Intent::Add => self.handle_add(&command),
            Intent::Delete => self.handle_delete(&command),
            Intent::UpdateOrMove { kind } => self.handle_update_or_move(&command, kind),
            Intent::AiFallback => Ok(self.handle_ai_fallback(&command)),
        }
        .unwrap_or_else(render_failure);

        let records = self.store.list().unwrap_or_default();
        CommandOutcome { message, records }
    }

    /// Derive and emit notifications for a transition the caller committed
    /// outside the command flow (appointment booked, message sent).
    pub fn notify_transition(&self, transition: &Transition) {
        self.emit_all(transition);
    }

    /// Process a recorded consultation transcript: emergency escalation,
    /// or clinical extraction into a prescription the caller persists.
    pub fn process_consultation(
        &self,
        transcript: &str,
        appointment_id: i64,
        patient_id: &str,
    ) -> ConsultationOutcome {
        let lower = transcript.to_lowercase();
        if EMERGENCY_KEYWORDS.iter().any(|k| lower.contains(k)) {
            self.emit_all(&Transition::EmergencyDetected {
                details: transcript.to_string(),
            });
            return ConsultationOutcome {
                message: "Emergency detected in consultation. Hospital staff notified.".into(),
                prescription: None,
                extraction_failed: false,
            };
        }

        let (extraction, failed) = match self.ai.extract_clinical_info(transcript) {
            Ok(extraction) => (extraction, false),
            Err(err) => {
                tracing::warn!(error = %err, "clinical extraction failed, using fallback");
                (ClinicalExtraction::fallback(), true)
            }
        };

        let medications = extraction
            .medications
            .iter()
            .map(|med| MedicationSchedule {
                medication_name: med.name.clone(),
                dosage: med.dosage.clone(),
                frequency: med.frequency.clone(),
                duration: med.duration.clone(),
                timing: med.timing.clone(),
                instructions: med.instructions.clone(),
            })
            .collect();

        let prescription = Prescription {
            appointment_id,
            diagnosis: extraction.diagnosis.clone(),
            medications,
            lab_tests: extraction.lab_tests.clone(),
            instructions: extraction.instructions.clone(),
            follow_up: extraction
                .follow_up_days
                .map(|days| Utc::now() + chrono::Duration::days(i64::from(days))),
        };

        self.emit_all(&Transition::PrescriptionCreated {
            appointment_id,
            patient_id: patient_id.to_string(),
        });

        let message = if failed {
            "Could not analyze the consultation. Please review it manually.".to_string()
        } else {
            format!(
                "Prescription saved. Diagnosis: {}. Medications: {}.",
                prescription.diagnosis,
                prescription.medications.len()
            )
        };

        ConsultationOutcome {
            message,
            prescription: Some(prescription),
            extraction_failed: failed,
        }
    }

    // ── Branch handlers ──────────────────────────────────────

    fn handle_identifier(
        &self,
        command: &Command,
        action: IdAction,
    ) -> Result<String, CommandError> {
        let position =
            extract_record_id(command.normalized()).ok_or(CommandError::ExtractionFailure)?;
        let records = self.store.list()?;
        let record = position
            .checked_sub(1)
            .and_then(|index| records.get(index))
            .ok_or(CommandError::RecordNotFound(position))?
            .clone();

        match action {
            IdAction::Delete => {
                self.store.delete(&record)?;
                Ok(format!("Deleted {} (item {position}).", record.name))
            }
            IdAction::UpdateOrMove => {
                let target =
                    find_category(command.text(), "").ok_or(CommandError::ExtractionFailure)?;
                let kind = if command.normalized().contains("move") {
                    MoveKind::Relocate
                } else {
                    MoveKind::Update
                };
                self.apply_target(record, &target, kind)
            }
        }
    }

    fn handle_delete_all(&self) -> Result<String, CommandError> {
        let removed = self.store.delete_all()?;
        Ok(format!("Deleted all {removed} records."))
    }

    fn handle_add(&self, command: &Command) -> Result<String, CommandError> {
        let subject =
            extract_subject(command.text(), "add").ok_or(CommandError::ExtractionFailure)?;
        let category = extract_category(command.text(), "add");

        // Spelling correction is best-effort; the raw subject stands when
        // the service is unavailable.
        let name = match self.ai.correct_name_spelling(&subject) {
            Ok(corrected) if !corrected.is_empty() => corrected,
            Ok(_) => subject.clone(),
            Err(err) => {
                tracing::warn!(error = %err, "spelling correction unavailable");
                subject.clone()
            }
        };

        self.store.insert(&Record::new(name.clone(), category.clone()))?;
        Ok(format!("Added {name} to {category}."))
    }

    fn handle_delete(&self, command: &Command) -> Result<String, CommandError> {
        let subject =
            extract_subject(command.text(), "delete").ok_or(CommandError::ExtractionFailure)?;
        let records = self.store.list()?;
        let record = best_match(&subject, &records)
            .ok_or_else(|| CommandError::NoMatchFound(subject.clone()))?
            .clone();
        self.store.delete(&record)?;
        Ok(format!("Deleted {}.", record.name))
    }

    fn handle_update_or_move(
        &self,
        command: &Command,
        kind: MoveKind,
    ) -> Result<String, CommandError> {
        let keyword = match kind {
            MoveKind::Relocate => "move",
            MoveKind::Update => {
                if command.normalized().contains("update") {
                    "update"
                } else {
                    "change"
                }
            }
        };

        let subject =
            extract_subject(command.text(), keyword).ok_or(CommandError::ExtractionFailure)?;
        let target =
            find_category(command.text(), keyword).ok_or(CommandError::ExtractionFailure)?;

        let records = self.store.list()?;
        let record = best_match(&subject, &records)
            .ok_or_else(|| CommandError::NoMatchFound(subject.clone()))?
            .clone();

        self.apply_target(record, &target, kind)
    }

    /// Apply the "to Y" target to a matched record with partial-update
    /// semantics: only the fields Y names change, the rest carry over.
    /// For the update form, Y naming an existing category relocates;
    /// otherwise Y is the new name.
    fn apply_target(
        &self,
        mut record: Record,
        target: &str,
        kind: MoveKind,
    ) -> Result<String, CommandError> {
        let relocate = match kind {
            MoveKind::Relocate => true,
            MoveKind::Update => self.store.find_by_category(target)?.is_some(),
        };

        if relocate {
            let previous = std::mem::replace(&mut record.category, target.to_string());
            self.store.update(&record)?;
            Ok(format!(
                "Moved {} from {previous} to {}.",
                record.name, record.category
            ))
        } else {
            let previous = std::mem::replace(&mut record.name, target.to_string());
            self.store.update(&record)?;
            Ok(format!("Updated {previous} to {}.", record.name))
        }
    }

    fn handle_ai_fallback(&self, command: &Command) -> String {
        let wants_explanation = EXPLANATION_KEYWORDS
            .iter()
            .any(|k| command.normalized().contains(k));

        let reply = if wants_explanation {
            self.ai.explain_in_plain_language(command.raw())
        } else {
            self.ai.answer_query(command.raw())
        };

        reply.unwrap_or_else(|err| format!("Sorry, I couldn't answer that right now: {err}"))
    }

    fn emit_all(&self, transition: &Transition) {
        for event in derive_notifications(transition) {
            self.sink.emit(event);
        }
    }
}

/// Render a command-local failure as a user-facing confirmation.
fn render_failure(err: CommandError) -> String {
    match err {
        CommandError::ExtractionFailure => {
            "I couldn't catch the name. Please rephrase the command.".to_string()
        }
        CommandError::NoMatchFound(name) => {
            format!("Couldn't find anything matching '{name}'.")
        }
        CommandError::RecordNotFound(position) => {
            format!("Item {position} is not in the list.")
        }
        CommandError::Store(err) => {
            tracing::error!(error = %err, "store operation failed");
            format!("Something went wrong updating the records: {err}")
        }
    }
}
