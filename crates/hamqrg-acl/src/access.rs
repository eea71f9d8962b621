//! Role resolution and authorization queries.
//!
//! [`AccessControl`] answers the questions every dashboard page and action
//! asks before doing anything: *who is this* ([`resolve_role`]) and *may
//! they do this* ([`has_permission`]). The session is always passed in;
//! nothing here reads ambient request state.
//!
//! Resolution fails closed. No session, an unreadable token, or a token
//! without a `user_role` claim all resolve to [`Role::Viewer`].
//!
//! [`resolve_role`]: AccessControl::resolve_role
//! [`has_permission`]: AccessControl::has_permission

use std::collections::BTreeSet;
use std::sync::Arc;

use log::debug;

use crate::claims::decode_claims;
use crate::permission::Permission;
use crate::policy::PolicyTable;
use crate::role::Role;
use crate::session::Session;

/// Resolves roles from sessions and checks them against a [`PolicyTable`].
///
/// Cheap to clone; the policy is shared.
#[derive(Debug, Clone, Default)]
pub struct AccessControl {
    policy: Arc<PolicyTable>,
}

impl AccessControl {
    /// Create an access control over the given policy.
    pub fn new(policy: PolicyTable) -> Self {
        Self {
            policy: Arc::new(policy),
        }
    }

    /// The policy in force.
    pub fn policy(&self) -> &PolicyTable {
        &self.policy
    }

    /// Determine the caller's role from their session.
    ///
    /// Never fails. Returns [`Role::Viewer`] when there is no session or
    /// when the token's claims cannot be read.
    pub fn resolve_role(&self, session: Option<&Session>) -> Role {
        let Some(session) = session else {
            debug!("no session, resolving to viewer");
            return Role::Viewer;
        };

        match decode_claims(session.access_token()) {
            Ok(claims) => match claims.user_role {
                Some(tag) => {
                    let role = Role::from(tag);
                    debug!("resolved role {role} from session claims");
                    role
                }
                None => {
                    debug!("session claims carry no user_role, resolving to viewer");
                    Role::Viewer
                }
            },
            Err(e) => {
                debug!("unreadable session claims ({e}), resolving to viewer");
                Role::Viewer
            }
        }
    }

    /// Whether the session resolves to exactly `role`.
    pub fn has_role(&self, session: Option<&Session>, role: &Role) -> bool {
        self.resolve_role(session) == *role
    }

    /// Shorthand for `has_role(session, &Role::Admin)`.
    pub fn is_admin(&self, session: Option<&Session>) -> bool {
        self.has_role(session, &Role::Admin)
    }

    /// Whether the session's role is granted `permission`.
    pub fn has_permission(&self, session: Option<&Session>, permission: Permission) -> bool {
        self.policy.allows(&self.resolve_role(session), permission)
    }

    /// Resolve the session once and bind the result to this policy.
    pub fn caller(&self, session: Option<&Session>) -> Caller {
        Caller::new(self.resolve_role(session), Arc::clone(&self.policy))
    }
}

/// A resolved role bound to the policy, for the lifetime of one request.
///
/// Answers the same questions as [`AccessControl`] without decoding the
/// token again.
#[derive(Debug, Clone)]
pub struct Caller {
    role: Role,
    policy: Arc<PolicyTable>,
}

impl Caller {
    fn new(role: Role, policy: Arc<PolicyTable>) -> Self {
        Self { role, policy }
    }

    /// A caller with a fixed role, bypassing token decoding.
    pub fn with_role(role: Role, access: &AccessControl) -> Self {
        Self::new(role, Arc::clone(&access.policy))
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn has_role(&self, role: &Role) -> bool {
        self.role == *role
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(&Role::Admin)
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.policy.allows(&self.role, permission)
    }

    /// Everything this caller is granted.
    pub fn permissions(&self) -> &BTreeSet<Permission> {
        self.policy.permissions_for(&self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::token_with_payload;
    use proptest::prelude::*;

    fn session_with_role(role: &str) -> Session {
        Session::new(token_with_payload(&format!(r#"{{"user_role":"{role}"}}"#)))
    }

    // ------------------------------------------------------------------------
    // resolve_role
    // ------------------------------------------------------------------------

    #[test]
    fn test_no_session_is_viewer() {
        let acl = AccessControl::default();
        assert_eq!(acl.resolve_role(None), Role::Viewer);
    }

    #[test]
    fn test_resolves_each_known_role() {
        let acl = AccessControl::default();
        for role in Role::KNOWN {
            let session = session_with_role(role.as_str());
            assert_eq!(acl.resolve_role(Some(&session)), role);
        }
    }

    #[test]
    fn test_malformed_tokens_are_viewer() {
        let acl = AccessControl::default();
        let cases = [
            String::new(),
            "no-dots-at-all".to_string(),
            "h.%%%.s".to_string(),
            token_with_payload("{not json"),
            token_with_payload(r#"{"sub":"u1"}"#),
            token_with_payload(r#"{"user_role":null}"#),
            token_with_payload(r#"{"user_role":["admin"]}"#),
            token_with_payload("\"admin\""),
            token_with_payload(r#"["admin"]"#),
            token_with_payload(r#"["admin","x"]"#),
        ];
        for token in cases {
            let session = Session::new(token.clone());
            assert_eq!(acl.resolve_role(Some(&session)), Role::Viewer, "{token}");
        }
    }

    #[test]
    fn test_array_payload_grants_nothing() {
        let acl = AccessControl::default();
        let session = Session::new(token_with_payload(r#"["admin"]"#));
        assert!(!acl.is_admin(Some(&session)));
        for perm in Permission::ALL {
            assert!(!acl.has_permission(Some(&session), perm));
        }
    }

    #[test]
    fn test_two_segment_token_is_viewer() {
        let acl = AccessControl::default();
        let full = token_with_payload(r#"{"user_role":"admin"}"#);
        let (two, _) = full.rsplit_once('.').unwrap();
        assert_eq!(acl.resolve_role(Some(&Session::new(two))), Role::Viewer);
    }

    #[test]
    fn test_unknown_role_passes_through() {
        let acl = AccessControl::default();
        let session = session_with_role("superuser");
        assert_eq!(
            acl.resolve_role(Some(&session)),
            Role::Unknown("superuser".into())
        );
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    #[test]
    fn test_bridge_manager_cannot_manage_users() {
        let acl = AccessControl::default();
        let session = session_with_role("bridge_manager");
        assert!(!acl.has_permission(Some(&session), Permission::UsersManage));
    }

    #[test]
    fn test_admin_can_trigger_sync() {
        let acl = AccessControl::default();
        let session = session_with_role("admin");
        assert!(acl.has_permission(Some(&session), Permission::SyncTrigger));
    }

    #[test]
    fn test_report_manager_cannot_manage_reports() {
        let acl = AccessControl::default();
        let session = session_with_role("report_manager");
        assert!(!acl.has_permission(Some(&session), Permission::ReportsManage));
    }

    #[test]
    fn test_unknown_role_has_no_permissions() {
        let acl = AccessControl::default();
        let session = session_with_role("superuser");
        for perm in Permission::ALL {
            assert!(!acl.has_permission(Some(&session), perm));
        }
        assert!(!acl.is_admin(Some(&session)));
    }

    #[test]
    fn test_no_session_has_no_permissions() {
        let acl = AccessControl::default();
        for perm in Permission::ALL {
            assert!(!acl.has_permission(None, perm));
        }
    }

    #[test]
    fn test_custom_policy_is_consulted() {
        let policy = PolicyTable::authoritative()
            .to_builder()
            .grant(Role::ReportManager, Permission::ReportsManage)
            .build();
        let acl = AccessControl::new(policy);
        let session = session_with_role("report_manager");
        assert!(acl.has_permission(Some(&session), Permission::ReportsManage));
        assert!(!acl.has_permission(Some(&session), Permission::RepeatersWrite));
    }

    // ------------------------------------------------------------------------
    // Caller
    // ------------------------------------------------------------------------

    #[test]
    fn test_caller_agrees_with_access_control() {
        let acl = AccessControl::default();
        for tag in ["admin", "bridge_manager", "report_manager", "viewer", "root"] {
            let session = session_with_role(tag);
            let caller = acl.caller(Some(&session));
            assert_eq!(*caller.role(), acl.resolve_role(Some(&session)));
            assert_eq!(caller.is_admin(), acl.is_admin(Some(&session)));
            for perm in Permission::ALL {
                assert_eq!(
                    caller.has_permission(perm),
                    acl.has_permission(Some(&session), perm)
                );
            }
        }
    }

    #[test]
    fn test_caller_permissions() {
        let acl = AccessControl::default();
        let caller = Caller::with_role(Role::BridgeManager, &acl);
        let perms: Vec<_> = caller.permissions().iter().copied().collect();
        assert_eq!(
            perms,
            vec![
                Permission::RepeatersWrite,
                Permission::NetworksWrite,
                Permission::ReportsManage,
            ]
        );
    }

    proptest! {
        #[test]
        fn prop_is_admin_equals_has_role_admin(tag in "[a-z_]{0,16}") {
            let acl = AccessControl::default();
            let session = session_with_role(&tag);
            prop_assert_eq!(
                acl.is_admin(Some(&session)),
                acl.has_role(Some(&session), &Role::Admin)
            );
        }

        #[test]
        fn prop_arbitrary_tokens_never_panic(token in ".{0,64}") {
            let acl = AccessControl::default();
            let session = Session::new(token);
            let _ = acl.resolve_role(Some(&session));
        }
    }
}
