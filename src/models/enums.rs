use serde::{Deserialize, Serialize};

use super::ModelError;

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// Wire strings are upper-case to match the external contracts
/// (AI severity values, notification recipient roles).
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(Severity {
    Low => "LOW",
    Normal => "NORMAL",
    High => "HIGH",
    Critical => "CRITICAL",
});

impl Default for Severity {
    fn default() -> Self {
        Self::Normal
    }
}

str_enum!(RecipientRole {
    Doctor => "DOCTOR",
    Patient => "PATIENT",
    Admin => "ADMIN",
});

str_enum!(NotificationCategory {
    AppointmentConfirmed => "APPOINTMENT_CONFIRMED",
    PrescriptionReady => "PRESCRIPTION_READY",
    MessageReceived => "MESSAGE_RECEIVED",
    Emergency => "EMERGENCY",
});
