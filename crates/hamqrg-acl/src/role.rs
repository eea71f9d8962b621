//! Dashboard roles.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A named capability tier assigned to a user.
///
/// The dashboard knows four roles. A role string decoded from a session claim
/// that is none of them is kept verbatim in [`Role::Unknown`]: it never
/// matches a policy entry, so every permission check against it fails.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Full access, including user management and sync.
    Admin,
    /// Manages repeaters, networks and reports.
    BridgeManager,
    /// Sees the dashboard's pending-reports widget. Holds no permissions;
    /// see the policy table.
    ReportManager,
    /// Read-only baseline. Also the fail-closed fallback.
    #[default]
    Viewer,
    /// A role string outside the known set.
    Unknown(String),
}

impl Role {
    /// The four known roles, in display order.
    pub const KNOWN: [Role; 4] = [
        Role::Admin,
        Role::BridgeManager,
        Role::ReportManager,
        Role::Viewer,
    ];

    /// Map a role tag to a [`Role`]. Never fails: unrecognised tags become
    /// [`Role::Unknown`].
    pub fn parse(tag: &str) -> Self {
        match tag {
            "admin" => Role::Admin,
            "bridge_manager" => Role::BridgeManager,
            "report_manager" => Role::ReportManager,
            "viewer" => Role::Viewer,
            other => Role::Unknown(other.to_string()),
        }
    }

    /// The wire tag for this role.
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::BridgeManager => "bridge_manager",
            Role::ReportManager => "report_manager",
            Role::Viewer => "viewer",
            Role::Unknown(tag) => tag,
        }
    }

    /// Whether this is one of the four known roles.
    pub fn is_known(&self) -> bool {
        !matches!(self, Role::Unknown(_))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Role {
    fn from(tag: String) -> Self {
        match Role::parse(&tag) {
            Role::Unknown(_) => Role::Unknown(tag),
            known => known,
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}
