//! Access control for the HamQRG dashboard.
//!
//! Resolves the caller's role from their session token and answers the
//! role and permission questions that gate every admin page and every
//! mutating action.
//!
//! - [`AccessControl`]: `resolve_role`, `has_role`, `is_admin`, `has_permission`
//! - [`PolicyTable`]: the static role → permission table
//! - [`authorize_page`], [`visible_widgets`] and [`navigation`]: page gating,
//!   role-gated panels and sidebar filtering
//!
//! Sessions are passed explicitly. Token signatures are assumed to have
//! been verified by the session provider; see [`Session`].
//!
//! # Example
//!
//! ```
//! use hamqrg_acl::{AccessControl, Permission, Role};
//!
//! let acl = AccessControl::default();
//! assert_eq!(acl.resolve_role(None), Role::Viewer);
//! assert!(!acl.has_permission(None, Permission::SyncTrigger));
//! ```

pub mod access;
pub mod claims;
pub mod nav;
pub mod page;
pub mod permission;
pub mod policy;
pub mod role;
pub mod session;

pub use access::{AccessControl, Caller};
pub use claims::{Claims, ClaimsError, decode_claims};
pub use nav::{NavItem, NavSection, navigation};
pub use page::{
    DEFAULT_LANDING_ROUTE, Page, PageDecision, PageRule, Widget, authorize_page, visible_widgets,
};
pub use permission::{Permission, UnknownPermission};
pub use policy::{PolicyBuilder, PolicyTable};
pub use role::Role;
pub use session::Session;
