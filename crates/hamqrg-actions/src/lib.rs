//! Permission-guarded mutating actions for the HamQRG dashboard.
//!
//! Every write the dashboard performs goes through [`GuardedActions`], which
//! consults the caller's permissions (see `hamqrg-acl`) before delegating to
//! a [`DashboardStore`]. Failures come back as [`ActionError`] values with
//! a user-visible, localized message; nothing here panics on a denied
//! request.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use hamqrg_acl::{AccessControl, Caller, Role};
//! use hamqrg_actions::{ActionError, GuardedActions, InMemoryStore, ReportStatus};
//!
//! # tokio_test::block_on(async {
//! let actions = GuardedActions::new(Arc::new(InMemoryStore::new()));
//! let viewer = Caller::with_role(Role::Viewer, &AccessControl::default());
//!
//! let result = actions
//!     .update_report_status(&viewer, "r1", ReportStatus::Resolved)
//!     .await;
//! assert_eq!(result, Err(ActionError::Unauthorized("Unauthorized".into())));
//! # });
//! ```

pub mod actions;
pub mod error;
pub mod messages;
pub mod store;

pub use actions::{ActionSettings, DEFAULT_SYNC_FUNCTION, GuardedActions};
pub use error::{ActionError, ActionResult};
pub use messages::Locale;
pub use store::{DashboardStore, InMemoryStore, RepeaterUpdate, ReportStatus};
