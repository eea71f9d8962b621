//! Page-level gating.
//!
//! Before a restricted dashboard page renders, the page layer asks
//! [`authorize_page`] and either renders or redirects the caller to the
//! public landing route. Panels inside a page that only some roles see
//! are listed as [`Widget`]s and filtered with [`visible_widgets`].

use serde::Serialize;

use crate::access::Caller;
use crate::role::Role;

/// The landing route unauthorized callers are sent to.
pub const DEFAULT_LANDING_ROUTE: &str = "/";

/// Who may open a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRule {
    /// Anyone, including callers without a session.
    Public,
    /// Only callers whose role is listed.
    Roles(&'static [Role]),
}

impl PageRule {
    /// Whether `role` satisfies this rule.
    pub fn admits(self, role: &Role) -> bool {
        match self {
            PageRule::Public => true,
            PageRule::Roles(roles) => roles.contains(role),
        }
    }
}

static MANAGERS: &[Role] = &[Role::Admin, Role::BridgeManager];
static ADMINS: &[Role] = &[Role::Admin];
static REPORT_REVIEWERS: &[Role] = &[Role::Admin, Role::ReportManager];

/// Dashboard screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Dashboard,
    Repeaters,
    Networks,
    Map,
    Reports,
    AdminUsers,
    AdminSync,
}

impl Page {
    /// Every page, in sidebar order.
    pub const ALL: [Page; 7] = [
        Page::Dashboard,
        Page::Repeaters,
        Page::Networks,
        Page::Map,
        Page::Reports,
        Page::AdminUsers,
        Page::AdminSync,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Page::Dashboard => "/",
            Page::Repeaters => "/repeaters",
            Page::Networks => "/networks",
            Page::Map => "/map",
            Page::Reports => "/reports",
            Page::AdminUsers => "/admin/users",
            Page::AdminSync => "/admin/sync",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Repeaters => "Repeaters",
            Page::Networks => "Networks",
            Page::Map => "Map",
            Page::Reports => "Reports",
            Page::AdminUsers => "Users & Roles",
            Page::AdminSync => "Sync Runs",
        }
    }

    /// The access rule for this page.
    ///
    /// The reports screen is gated on role names rather than on
    /// `reports.manage`, so `report_manager` is kept out by omission here
    /// too.
    pub fn rule(self) -> PageRule {
        match self {
            Page::Dashboard | Page::Repeaters | Page::Networks | Page::Map => PageRule::Public,
            Page::Reports => PageRule::Roles(MANAGERS),
            Page::AdminUsers | Page::AdminSync => PageRule::Roles(ADMINS),
        }
    }

    /// Look up the page served at `path`. Sub-paths (`/reports/42`) map to
    /// their section.
    pub fn from_path(path: &str) -> Option<Page> {
        let path = path.trim_end_matches('/');
        if path.is_empty() {
            return Some(Page::Dashboard);
        }
        Page::ALL
            .into_iter()
            .filter(|p| *p != Page::Dashboard)
            .find(|p| path == p.path() || path.starts_with(&format!("{}/", p.path())))
    }
}

/// Role-gated panels embedded in a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Widget {
    /// Count of reports awaiting review, on the dashboard home screen.
    PendingReports,
}

impl Widget {
    pub const ALL: [Widget; 1] = [Widget::PendingReports];

    pub fn title(self) -> &'static str {
        match self {
            Widget::PendingReports => "Pending Reports",
        }
    }

    /// The page the widget is shown on.
    pub fn page(self) -> Page {
        match self {
            Widget::PendingReports => Page::Dashboard,
        }
    }

    /// Who sees the widget.
    ///
    /// This is the only check that names `report_manager` explicitly. It
    /// differs from the reports page rule and from the policy table, where
    /// `report_manager` holds nothing.
    pub fn rule(self) -> PageRule {
        match self {
            Widget::PendingReports => PageRule::Roles(REPORT_REVIEWERS),
        }
    }
}

/// Widgets on `page` that `caller` may see, in display order.
pub fn visible_widgets(caller: &Caller, page: Page) -> Vec<Widget> {
    Widget::ALL
        .into_iter()
        .filter(|w| w.page() == page && w.rule().admits(caller.role()))
        .collect()
}

/// Outcome of a page check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "to", rename_all = "snake_case")]
pub enum PageDecision {
    /// Render the page.
    Render,
    /// Send the caller elsewhere.
    Redirect(String),
}

/// Decide whether `caller` may see `page`, redirecting to `landing_route`
/// otherwise.
pub fn authorize_page(caller: &Caller, page: Page, landing_route: &str) -> PageDecision {
    if page.rule().admits(caller.role()) {
        PageDecision::Render
    } else {
        log::debug!(
            "role {} may not open {}, redirecting to {landing_route}",
            caller.role(),
            page.path()
        );
        PageDecision::Redirect(landing_route.to_string())
    }
}
