//! Localized user-facing messages.

use serde::{Deserialize, Serialize};

/// Language of messages shown to dashboard users.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English.
    #[default]
    En,
    /// Italian.
    It,
}

impl Locale {
    /// Shown when the caller lacks the required permission.
    pub fn unauthorized(self) -> &'static str {
        match self {
            Locale::En => "Unauthorized",
            Locale::It => "Non autorizzato",
        }
    }

    /// Shown when a repeater edit sets a non-positive frequency.
    pub fn frequency_must_be_positive(self) -> &'static str {
        match self {
            Locale::En => "Frequency must be greater than 0",
            Locale::It => "La frequenza deve essere maggiore di 0",
        }
    }

    /// Shown when a role grant names a role outside the known set.
    pub fn unknown_role(self) -> &'static str {
        match self {
            Locale::En => "Unknown role",
            Locale::It => "Ruolo sconosciuto",
        }
    }
}
