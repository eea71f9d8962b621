//! Store abstraction.

use async_trait::async_trait;
use hamqrg_acl::Role;
use hamqrg_core::Result;
use serde::{Deserialize, Serialize};

/// The relational store and remote procedures the dashboard writes through.
///
/// Implementations talk to the hosted database. Guarded actions call these
/// methods only after the caller's permission has been checked.
#[async_trait]
pub trait DashboardStore: Send + Sync {
    /// Grant `role` to `user_id`. Granting an existing pair is not an error.
    async fn upsert_user_role(&self, user_id: &str, role: &Role) -> Result<()>;

    /// Revoke `role` from `user_id`. Revoking a missing pair is not an error.
    async fn delete_user_role(&self, user_id: &str, role: &Role) -> Result<()>;

    /// Set the moderation status of a report.
    async fn update_report_status(&self, report_id: &str, status: ReportStatus) -> Result<()>;

    /// Apply the present fields of `fields` to a repeater.
    async fn update_repeater(&self, repeater_id: &str, fields: &RepeaterUpdate) -> Result<()>;

    /// Invoke a remote procedure with a JSON body and return its JSON result.
    async fn invoke(&self, function: &str, body: serde_json::Value) -> Result<serde_json::Value>;
}

/// Moderation status of a user-submitted report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    /// Newly submitted.
    Pending,
    /// Looked at by a moderator.
    Reviewed,
    /// Acted upon.
    Resolved,
    /// Dismissed.
    Rejected,
}

/// Editable repeater fields.
///
/// `None` leaves a field untouched. For nullable text fields `Some(None)`
/// clears the value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RepeaterUpdate {
    /// Station callsign.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callsign: Option<Option<String>>,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Option<String>>,
    /// Responsible person or club.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager: Option<Option<String>>,
    /// Output frequency. Must be positive when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_hz: Option<i64>,
    /// Input offset; may be negative.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift_hz: Option<Option<i64>>,
    /// Town or site name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locality: Option<Option<String>>,
    /// Administrative region.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<Option<String>>,
    /// Two-letter province code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province_code: Option<Option<String>>,
    /// Maidenhead locator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locator: Option<Option<String>>,
}

impl RepeaterUpdate {
    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
