//! Permission-guarded mutating actions.
//!
//! Each action checks the caller's permission first and returns
//! [`ActionError::Unauthorized`] without touching the store when it is
//! missing. The caller is always passed in explicitly.

use std::sync::Arc;

use hamqrg_acl::{Caller, Permission, Role};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{ActionError, ActionResult};
use crate::messages::Locale;
use crate::store::{DashboardStore, RepeaterUpdate, ReportStatus};

/// Remote procedure that refreshes the repeater table.
pub const DEFAULT_SYNC_FUNCTION: &str = "sync_repeater_iz8wnh";

/// Settings shared by all actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionSettings {
    /// Language of user-facing error messages.
    pub locale: Locale,

    /// Name of the remote procedure invoked by [`GuardedActions::trigger_sync`].
    pub sync_function: String,
}

impl Default for ActionSettings {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            sync_function: DEFAULT_SYNC_FUNCTION.to_string(),
        }
    }
}

/// The dashboard's mutating operations, each gated on one permission.
///
/// | Action                   | Permission        |
/// |--------------------------|-------------------|
/// | `assign_role`            | `users.manage`    |
/// | `remove_role`            | `users.manage`    |
/// | `change_role`            | `users.manage`    |
/// | `update_report_status`   | `reports.manage`  |
/// | `update_repeater`        | `repeaters.write` |
/// | `trigger_sync`           | `sync.trigger`    |
#[derive(Clone)]
pub struct GuardedActions {
    store: Arc<dyn DashboardStore>,
    settings: ActionSettings,
}

impl GuardedActions {
    /// Create actions over `store` with default settings.
    pub fn new(store: Arc<dyn DashboardStore>) -> Self {
        Self {
            store,
            settings: ActionSettings::default(),
        }
    }

    /// Replace the settings.
    pub fn with_settings(mut self, settings: ActionSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Set the message locale.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.settings.locale = locale;
        self
    }

    /// The settings in force.
    pub fn settings(&self) -> &ActionSettings {
        &self.settings
    }

    fn require(&self, caller: &Caller, permission: Permission, action: &str) -> ActionResult {
        if caller.has_permission(permission) {
            return Ok(());
        }
        warn!("denied {action}: role {} lacks {permission}", caller.role());
        Err(ActionError::Unauthorized(
            self.settings.locale.unauthorized().to_string(),
        ))
    }

    fn require_known(&self, role: &Role) -> ActionResult {
        if role.is_known() {
            Ok(())
        } else {
            Err(ActionError::Validation(
                self.settings.locale.unknown_role().to_string(),
            ))
        }
    }

    /// Grant `role` to `user_id`.
    pub async fn assign_role(&self, caller: &Caller, user_id: &str, role: &Role) -> ActionResult {
        self.require(caller, Permission::UsersManage, "assign_role")?;
        self.require_known(role)?;
        self.store.upsert_user_role(user_id, role).await?;
        info!("granted {role} to user {user_id}");
        Ok(())
    }

    /// Revoke `role` from `user_id`.
    pub async fn remove_role(&self, caller: &Caller, user_id: &str, role: &Role) -> ActionResult {
        self.require(caller, Permission::UsersManage, "remove_role")?;
        self.require_known(role)?;
        self.store.delete_user_role(user_id, role).await?;
        info!("revoked {role} from user {user_id}");
        Ok(())
    }

    /// Move `user_id` from `current` to `new`.
    ///
    /// `viewer` is the implicit baseline and is never stored: it is not
    /// revoked when leaving it, nor granted when moving to it.
    ///
    /// The revoke and the grant are two separate store calls and are not
    /// atomic. If the grant fails after the revoke succeeded, the error is
    /// returned and the user is left without `current`, which reads as
    /// `viewer`; retrying the change with `current` set to `viewer`
    /// completes it.
    pub async fn change_role(
        &self,
        caller: &Caller,
        user_id: &str,
        current: &Role,
        new: &Role,
    ) -> ActionResult {
        self.require(caller, Permission::UsersManage, "change_role")?;
        self.require_known(new)?;

        if *current != Role::Viewer {
            self.store.delete_user_role(user_id, current).await?;
        }
        if *new != Role::Viewer {
            self.store.upsert_user_role(user_id, new).await?;
        }
        info!("changed role of user {user_id} from {current} to {new}");
        Ok(())
    }

    /// Set the moderation status of a report.
    pub async fn update_report_status(
        &self,
        caller: &Caller,
        report_id: &str,
        status: ReportStatus,
    ) -> ActionResult {
        self.require(caller, Permission::ReportsManage, "update_report_status")?;
        self.store.update_report_status(report_id, status).await?;
        info!("report {report_id} set to {status:?}");
        Ok(())
    }

    /// Edit a repeater's fields.
    pub async fn update_repeater(
        &self,
        caller: &Caller,
        repeater_id: &str,
        fields: &RepeaterUpdate,
    ) -> ActionResult {
        self.require(caller, Permission::RepeatersWrite, "update_repeater")?;
        if fields.frequency_hz.is_some_and(|hz| hz <= 0) {
            return Err(ActionError::Validation(
                self.settings.locale.frequency_must_be_positive().to_string(),
            ));
        }
        self.store.update_repeater(repeater_id, fields).await?;
        info!("updated repeater {repeater_id}");
        Ok(())
    }

    /// Run the external repeater sync and hand back its report unchanged.
    pub async fn trigger_sync(
        &self,
        caller: &Caller,
        dry_run: bool,
    ) -> ActionResult<serde_json::Value> {
        self.require(caller, Permission::SyncTrigger, "trigger_sync")?;
        let body = serde_json::json!({ "dry_run": dry_run });
        let report = self
            .store
            .invoke(&self.settings.sync_function, body)
            .await?;
        info!(
            "sync {} completed (dry_run={dry_run})",
            self.settings.sync_function
        );
        Ok(report)
    }
}
