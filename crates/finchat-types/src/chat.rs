//! Chat session, firm settings, and turn result types for finchat.
//!
//! These types model one visitor's conversation with the assistant:
//! the per-session firm settings, the outcome of a single turn, and the
//! session metadata exposed to presentation layers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;

use crate::service::ServiceRecord;

// Re-export MessageRole from llm module (it's used in both chat and llm contexts).
pub use crate::llm::{Message, MessageRole};

/// Default firm display name.
pub const DEFAULT_FIRM_NAME: &str = "Zack Financial";

/// Default contact email shown to the model.
pub const DEFAULT_CONTACT_EMAIL: &str = "info@zackfinancial.com";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// The three user-editable settings that shape each outbound request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirmSettings {
    #[serde(default = "default_firm_name")]
    pub firm_name: String,
    #[serde(default = "default_contact_email")]
    pub contact_email: String,
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_firm_name() -> String {
    DEFAULT_FIRM_NAME.to_string()
}

fn default_contact_email() -> String {
    DEFAULT_CONTACT_EMAIL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl Default for FirmSettings {
    fn default() -> Self {
        Self {
            firm_name: default_firm_name(),
            contact_email: default_contact_email(),
            model: default_model(),
        }
    }
}

/// Partial update for [`FirmSettings`]; absent or blank fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FirmSettingsPatch {
    pub firm_name: Option<String>,
    pub contact_email: Option<String>,
    pub model: Option<String>,
}

impl FirmSettings {
    /// Apply a patch, ignoring blank values.
    pub fn apply(&mut self, patch: FirmSettingsPatch) {
        fn set(target: &mut String, value: Option<String>) {
            if let Some(v) = value {
                let v = v.trim();
                if !v.is_empty() {
                    *target = v.to_string();
                }
            }
        }
        set(&mut self.firm_name, patch.firm_name);
        set(&mut self.contact_email, patch.contact_email);
        set(&mut self.model, patch.model);
    }
}

/// How a turn's assistant reply was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnStatus {
    /// The completion endpoint answered.
    Completed,
    /// No credential is configured; the reply is the offline notice.
    Offline,
    /// The endpoint call failed; the reply carries the error description.
    Failed,
}

impl fmt::Display for TurnStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnStatus::Completed => write!(f, "completed"),
            TurnStatus::Offline => write!(f, "offline"),
            TurnStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Result of one user turn.
///
/// `shortlist` is display-only: it is computed for every turn but is not
/// part of the outbound prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub session_id: Uuid,
    pub reply: String,
    pub status: TurnStatus,
    pub shortlist: Vec<ServiceRecord>,
}

/// Session metadata for listing and inspection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
    /// Total messages including the seed system message.
    pub message_count: usize,
    pub settings: FirmSettings,
}
