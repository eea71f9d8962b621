//! Handler functions for the access-control commands.
//!
//! Each `render_*` function builds the text a command prints, so the
//! output can be checked without capturing stdout.

use hamqrg_acl::{
    AccessControl, Page, PageDecision, Permission, PolicyTable, Role, Session, authorize_page,
    navigation, visible_widgets,
};
use hamqrg_actions::Locale;
use std::fmt::Write as _;

/// Render the policy table, one row per known role plus any extra mapped role.
pub fn render_policy(policy: &PolicyTable) -> String {
    let mut roles: Vec<Role> = Role::KNOWN.to_vec();
    roles.extend(
        policy
            .iter()
            .map(|(role, _)| role.clone())
            .filter(|role| !role.is_known()),
    );

    let mut out = String::new();
    for role in roles {
        let perms = policy.permissions_for(&role);
        let cell = if !policy.is_mapped(&role) {
            "(no entry)".to_string()
        } else if perms.is_empty() {
            "(none)".to_string()
        } else {
            perms
                .iter()
                .map(|p| p.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        let _ = writeln!(out, "{:<16} {cell}", role.as_str());
    }
    out
}

/// Render the resolved role and its permissions.
pub fn render_whoami(access: &AccessControl, token: Option<&str>) -> String {
    let session = token.map(Session::new);
    let caller = access.caller(session.as_ref());
    let perms: Vec<&str> = caller.permissions().iter().map(|p| p.as_str()).collect();
    format!(
        "role: {}\npermissions: {}\n",
        caller.role(),
        if perms.is_empty() {
            "(none)".to_string()
        } else {
            perms.join(", ")
        }
    )
}

/// Check one permission. Returns whether it is granted and the line to print.
pub fn check_permission(
    access: &AccessControl,
    locale: Locale,
    permission: Permission,
    token: Option<&str>,
) -> (bool, String) {
    let session = token.map(Session::new);
    if access.has_permission(session.as_ref(), permission) {
        (true, format!("{permission}: allowed"))
    } else {
        (false, format!("{permission}: {}", locale.unauthorized()))
    }
}

/// Render page decisions, the widgets shown on each rendered page, and the
/// visible sidebar.
pub fn render_pages(
    access: &AccessControl,
    landing_route: &str,
    token: Option<&str>,
    path: Option<&str>,
) -> hamqrg_core::Result<String> {
    let session = token.map(Session::new);
    let caller = access.caller(session.as_ref());

    let pages: Vec<Page> = match path {
        Some(path) => vec![Page::from_path(path).ok_or_else(|| {
            hamqrg_core::Error::invalid_data(format!("no dashboard page at {path}"))
        })?],
        None => Page::ALL.to_vec(),
    };

    let mut out = format!("role: {}\n", caller.role());
    for page in pages {
        match authorize_page(&caller, page, landing_route) {
            PageDecision::Render => {
                let _ = writeln!(out, "{:<14} render", page.path());
                for widget in visible_widgets(&caller, page) {
                    let _ = writeln!(out, "  widget: {}", widget.title());
                }
            }
            PageDecision::Redirect(to) => {
                let _ = writeln!(out, "{:<14} redirect -> {to}", page.path());
            }
        }
    }

    if path.is_none() {
        for section in navigation(&caller) {
            let titles: Vec<&str> = section.items.iter().map(|i| i.title).collect();
            let _ = writeln!(out, "[{}] {}", section.label, titles.join(", "));
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    fn token(role: &str) -> String {
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"user_role":"{role}"}}"#));
        format!("e30.{payload}.sig")
    }

    #[test]
    fn test_render_policy() {
        let out = render_policy(&PolicyTable::authoritative());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("admin"));
        assert!(lines[0].contains("users.manage"));
        assert!(lines[1].ends_with("repeaters.write, networks.write, reports.manage"));
        assert!(lines[2].ends_with("(no entry)"));
        assert!(lines[3].ends_with("(none)"));
    }

    #[test]
    fn test_render_policy_lists_extra_roles() {
        let policy = PolicyTable::authoritative()
            .to_builder()
            .grant(Role::parse("auditor"), Permission::ReportsManage)
            .build();
        let out = render_policy(&policy);
        assert!(out.lines().any(|l| l.starts_with("auditor")));
    }

    #[test]
    fn test_render_whoami() {
        let access = AccessControl::default();
        assert_eq!(
            render_whoami(&access, None),
            "role: viewer\npermissions: (none)\n"
        );
        let out = render_whoami(&access, Some(&token("bridge_manager")));
        assert!(out.starts_with("role: bridge_manager\n"));
    }

    #[test]
    fn test_check_permission() {
        let access = AccessControl::default();
        let (ok, line) = check_permission(
            &access,
            Locale::En,
            Permission::SyncTrigger,
            Some(&token("admin")),
        );
        assert!(ok);
        assert_eq!(line, "sync.trigger: allowed");

        let (ok, line) = check_permission(
            &access,
            Locale::It,
            Permission::UsersManage,
            Some(&token("bridge_manager")),
        );
        assert!(!ok);
        assert_eq!(line, "users.manage: Non autorizzato");
    }

    #[test]
    fn test_check_permission_garbage_token() {
        let access = AccessControl::default();
        let (ok, _) = check_permission(&access, Locale::En, Permission::RepeatersWrite, Some("x"));
        assert!(!ok);
    }

    #[test]
    fn test_render_pages_for_viewer() {
        let access = AccessControl::default();
        let out = render_pages(&access, "/", None, None).unwrap();
        assert!(out.contains("/reports       redirect -> /"));
        assert!(out.contains("/map           render"));
        assert!(out.contains("[Navigation]"));
        assert!(!out.contains("[Admin]"));
    }

    #[test]
    fn test_render_pages_pending_reports_widget() {
        let access = AccessControl::default();
        let out = render_pages(&access, "/", Some(&token("report_manager")), Some("/")).unwrap();
        assert_eq!(
            out,
            "role: report_manager\n/              render\n  widget: Pending Reports\n"
        );

        let out = render_pages(&access, "/", Some(&token("bridge_manager")), None).unwrap();
        assert!(!out.contains("Pending Reports"));
        assert!(out.contains("/reports       render"));
    }

    #[test]
    fn test_render_pages_single_path() {
        let access = AccessControl::default();
        let out =
            render_pages(&access, "/home", Some(&token("admin")), Some("/admin/sync")).unwrap();
        assert_eq!(out, "role: admin\n/admin/sync    render\n");
    }

    #[test]
    fn test_render_pages_unknown_path() {
        let access = AccessControl::default();
        assert!(render_pages(&access, "/", None, Some("/login")).is_err());
    }
}
