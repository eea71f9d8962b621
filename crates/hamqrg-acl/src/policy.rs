//! The role → permission table.
//!
//! The policy is plain data: a map from [`Role`] to the set of
//! [`Permission`]s it grants. Authorization never branches on a role
//! directly; it looks the role up here. A role without an entry grants
//! nothing.
//!
//! # Authoritative policy
//!
//! | Role             | Permissions                                                   |
//! |------------------|---------------------------------------------------------------|
//! | `admin`          | every permission                                              |
//! | `bridge_manager` | `repeaters.write`, `networks.write`, `reports.manage`         |
//! | `report_manager` | *(no entry)*                                                  |
//! | `viewer`         | *(empty)*                                                     |
//!
//! `report_manager` has no entry, so `reports.manage` is denied to it. The
//! only place the dashboard names it is the pending-reports widget on the
//! home screen ([`Widget::PendingReports`](crate::Widget::PendingReports));
//! the reports screen itself admits admin and bridge_manager. This is kept
//! as observed rather than guessed at.

use std::collections::{BTreeSet, HashMap};

use crate::permission::Permission;
use crate::role::Role;

static NO_PERMISSIONS: BTreeSet<Permission> = BTreeSet::new();

static AUTHORITATIVE: &[(Role, &[Permission])] = &[
    (
        Role::Admin,
        &[
            Permission::RepeatersWrite,
            Permission::RepeatersDelete,
            Permission::NetworksWrite,
            Permission::NetworksDelete,
            Permission::ReportsManage,
            Permission::UsersManage,
            Permission::SyncTrigger,
        ],
    ),
    (
        Role::BridgeManager,
        &[
            Permission::RepeatersWrite,
            Permission::NetworksWrite,
            Permission::ReportsManage,
        ],
    ),
    (Role::Viewer, &[]),
];

/// Immutable mapping from role to granted permissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyTable {
    entries: HashMap<Role, BTreeSet<Permission>>,
}

impl PolicyTable {
    /// The authoritative dashboard policy.
    pub fn authoritative() -> Self {
        let mut builder = PolicyBuilder::default();
        for (role, perms) in AUTHORITATIVE {
            builder = builder.grant_all(role.clone(), perms.iter().copied());
        }
        builder.build()
    }

    /// A table with no entries. Denies everything.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Start a builder from an empty table.
    pub fn builder() -> PolicyBuilder {
        PolicyBuilder::default()
    }

    /// Start a builder pre-loaded with this table's entries.
    pub fn to_builder(&self) -> PolicyBuilder {
        PolicyBuilder {
            entries: self.entries.clone(),
        }
    }

    /// Permissions granted to `role`. Unmapped roles get the empty set.
    pub fn permissions_for(&self, role: &Role) -> &BTreeSet<Permission> {
        self.entries.get(role).unwrap_or(&NO_PERMISSIONS)
    }

    /// Whether `role` is granted `permission`.
    pub fn allows(&self, role: &Role, permission: Permission) -> bool {
        self.permissions_for(role).contains(&permission)
    }

    /// Whether `role` has an entry, even an empty one.
    pub fn is_mapped(&self, role: &Role) -> bool {
        self.entries.contains_key(role)
    }

    /// Iterate over mapped roles and their permission sets, ordered by role.
    pub fn iter(&self) -> impl Iterator<Item = (&Role, &BTreeSet<Permission>)> {
        let mut rows: Vec<_> = self.entries.iter().collect();
        rows.sort_by(|a, b| a.0.cmp(b.0));
        rows.into_iter()
    }
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self::authoritative()
    }
}

/// Builder for [`PolicyTable`].
#[derive(Debug, Clone, Default)]
pub struct PolicyBuilder {
    entries: HashMap<Role, BTreeSet<Permission>>,
}

impl PolicyBuilder {
    /// Grant one permission to a role, creating the entry if needed.
    pub fn grant(mut self, role: Role, permission: Permission) -> Self {
        self.entries.entry(role).or_default().insert(permission);
        self
    }

    /// Grant several permissions to a role. An empty iterator still creates
    /// the entry.
    pub fn grant_all(
        mut self,
        role: Role,
        permissions: impl IntoIterator<Item = Permission>,
    ) -> Self {
        self.entries.entry(role).or_default().extend(permissions);
        self
    }

    /// Remove one permission from a role, keeping the entry.
    pub fn revoke(mut self, role: &Role, permission: Permission) -> Self {
        if let Some(set) = self.entries.get_mut(role) {
            set.remove(&permission);
        }
        self
    }

    /// Finish the table.
    pub fn build(self) -> PolicyTable {
        PolicyTable {
            entries: self.entries,
        }
    }
}
