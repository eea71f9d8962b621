//! Fine-grained permissions gating mutating actions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A named authorization to perform one class of mutating action.
///
/// Serialized as the dotted tag (`"repeaters.write"` and so on).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Permission {
    /// Edit repeater records.
    #[serde(rename = "repeaters.write")]
    RepeatersWrite,

    /// Delete repeater records.
    #[serde(rename = "repeaters.delete")]
    RepeatersDelete,

    /// Edit network records.
    #[serde(rename = "networks.write")]
    NetworksWrite,

    /// Delete network records.
    #[serde(rename = "networks.delete")]
    NetworksDelete,

    /// Change the status of user-submitted reports.
    #[serde(rename = "reports.manage")]
    ReportsManage,

    /// Grant and revoke user roles.
    #[serde(rename = "users.manage")]
    UsersManage,

    /// Trigger the external repeater sync job.
    #[serde(rename = "sync.trigger")]
    SyncTrigger,
}

/// Returned when parsing a tag that names no permission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown permission: {0}")]
pub struct UnknownPermission(pub String);

impl Permission {
    /// Every permission, in declaration order.
    pub const ALL: [Permission; 7] = [
        Permission::RepeatersWrite,
        Permission::RepeatersDelete,
        Permission::NetworksWrite,
        Permission::NetworksDelete,
        Permission::ReportsManage,
        Permission::UsersManage,
        Permission::SyncTrigger,
    ];

    /// The dotted tag for this permission.
    pub fn as_str(self) -> &'static str {
        match self {
            Permission::RepeatersWrite => "repeaters.write",
            Permission::RepeatersDelete => "repeaters.delete",
            Permission::NetworksWrite => "networks.write",
            Permission::NetworksDelete => "networks.delete",
            Permission::ReportsManage => "reports.manage",
            Permission::UsersManage => "users.manage",
            Permission::SyncTrigger => "sync.trigger",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = UnknownPermission;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownPermission(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_all() {
        for perm in Permission::ALL {
            assert_eq!(perm.as_str().parse::<Permission>().unwrap(), perm);
        }
    }

    #[test]
    fn test_from_str_unknown() {
        let err = "repeaters.read".parse::<Permission>().unwrap_err();
        assert_eq!(err, UnknownPermission("repeaters.read".into()));
        assert_eq!(err.to_string(), "unknown permission: repeaters.read");
    }

    #[test]
    fn test_serde_matches_as_str() {
        for perm in Permission::ALL {
            let json = serde_json::to_string(&perm).unwrap();
            assert_eq!(json, format!("\"{}\"", perm.as_str()));
        }
    }
}
