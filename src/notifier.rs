//! Derived notifications for completed state transitions.
//!
//! Each transition maps to a fixed set of events. The mapping is a pure
//! function so emission counts stay exactly reproducible: an appointment
//! notifies both parties, a prescription notifies the patient, a message
//! notifies the other party in the thread, an emergency escalates to the
//! administrative role.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::models::{NotificationCategory, NotificationEvent, RecipientRole};

/// Message bodies are truncated to this many characters in previews.
const MESSAGE_PREVIEW_CHARS: usize = 50;

/// Recipient id used for emergency escalation.
pub const ADMIN_RECIPIENT: &str = "ADMIN";

/// A committed state change that notifications derive from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Transition {
    AppointmentCreated {
        appointment_id: i64,
        doctor_id: String,
        doctor_name: String,
        patient_id: String,
        patient_name: String,
    },
    PrescriptionCreated {
        appointment_id: i64,
        patient_id: String,
    },
    MessageSent {
        appointment_id: i64,
        sender_role: RecipientRole,
        recipient_id: String,
        content: String,
    },
    EmergencyDetected {
        details: String,
    },
}

/// Derive the notification events for a completed transition.
pub fn derive_notifications(transition: &Transition) -> Vec<NotificationEvent> {
    match transition {
        Transition::AppointmentCreated {
            appointment_id,
            doctor_id,
            doctor_name,
            patient_id,
            patient_name,
        } => vec![
            NotificationEvent::new(
                doctor_id,
                RecipientRole::Doctor,
                "New Appointment",
                format!("New appointment with {patient_name}"),
                NotificationCategory::AppointmentConfirmed,
            )
            .with_related_id(*appointment_id),
            NotificationEvent::new(
                patient_id,
                RecipientRole::Patient,
                "Appointment Confirmed",
                format!("Your appointment with {doctor_name} is confirmed"),
                NotificationCategory::AppointmentConfirmed,
            )
            .with_related_id(*appointment_id),
        ],
        Transition::PrescriptionCreated {
            appointment_id,
            patient_id,
        } => vec![NotificationEvent::new(
            patient_id,
            RecipientRole::Patient,
            "Prescription Ready",
            "Your prescription is ready. Check your appointments.",
            NotificationCategory::PrescriptionReady,
        )
        .with_related_id(*appointment_id)],
        Transition::MessageSent {
            appointment_id,
            sender_role,
            recipient_id,
            content,
        } => {
            let recipient_role = match sender_role {
                RecipientRole::Doctor => RecipientRole::Patient,
                _ => RecipientRole::Doctor,
            };
            vec![NotificationEvent::new(
                recipient_id,
                recipient_role,
                "New Message",
                preview(content),
                NotificationCategory::MessageReceived,
            )
            .with_related_id(*appointment_id)]
        }
        Transition::EmergencyDetected { details } => vec![NotificationEvent::new(
            ADMIN_RECIPIENT,
            RecipientRole::Admin,
            "Emergency Alert",
            format!("Emergency in consultation: {details}"),
            NotificationCategory::Emergency,
        )],
    }
}

/// Truncate a message body for its notification preview.
fn preview(content: &str) -> String {
    let truncated: String = content.chars().take(MESSAGE_PREVIEW_CHARS).collect();
    if content.chars().count() > MESSAGE_PREVIEW_CHARS {
        format!("{truncated}...")
    } else {
        truncated
    }
}

/// Fire-and-forget sink the pipeline emits events into.
pub trait NotificationSink {
    fn emit(&self, event: NotificationEvent);
}

/// Sink that records every event — the crate's test double.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<NotificationEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<NotificationEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl NotificationSink for RecordingSink {
    fn emit(&self, event: NotificationEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
