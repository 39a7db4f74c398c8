use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{NotificationCategory, RecipientRole};

/// A derived notification for one recipient.
///
/// Created by the notifier as a pure function of a completed state
/// transition; never mutated by the pipeline afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationEvent {
    pub recipient_id: String,
    pub recipient_role: RecipientRole,
    pub title: String,
    pub body: String,
    pub category: NotificationCategory,
    pub related_id: Option<i64>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl NotificationEvent {
    pub fn new(
        recipient_id: impl Into<String>,
        recipient_role: RecipientRole,
        title: impl Into<String>,
        body: impl Into<String>,
        category: NotificationCategory,
    ) -> Self {
        Self {
            recipient_id: recipient_id.into(),
            recipient_role,
            title: title.into(),
            body: body.into(),
            category,
            related_id: None,
            read: false,
            created_at: Utc::now(),
        }
    }

    pub fn with_related_id(mut self, id: i64) -> Self {
        self.related_id = Some(id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_event_starts_unread() {
        let event = NotificationEvent::new(
            "PAT001",
            RecipientRole::Patient,
            "Prescription Ready",
            "Your prescription is ready.",
            NotificationCategory::PrescriptionReady,
        );
        assert!(!event.read);
        assert!(event.related_id.is_none());
        assert_eq!(event.recipient_id, "PAT001");
    }

    #[test]
    fn with_related_id_attaches_record() {
        let event = NotificationEvent::new(
            "DOC001",
            RecipientRole::Doctor,
            "New Appointment",
            "New appointment with Amira",
            NotificationCategory::AppointmentConfirmed,
        )
        .with_related_id(42);
        assert_eq!(event.related_id, Some(42));
    }
}
