//! Role-filtered sidebar navigation.

use serde::Serialize;

use crate::access::Caller;
use crate::page::Page;

/// One sidebar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub title: &'static str,
    pub href: &'static str,
}

/// A titled group of sidebar entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavSection {
    pub label: &'static str,
    pub items: Vec<NavItem>,
}

const SECTIONS: &[(&str, &[Page])] = &[
    (
        "Navigation",
        &[Page::Dashboard, Page::Repeaters, Page::Networks, Page::Map],
    ),
    ("Management", &[Page::Reports]),
    ("Admin", &[Page::AdminUsers, Page::AdminSync]),
];

/// The sidebar as `caller` should see it.
///
/// Items follow the same rules as [`authorize_page`](crate::authorize_page);
/// sections left with no items are dropped.
pub fn navigation(caller: &Caller) -> Vec<NavSection> {
    SECTIONS
        .iter()
        .filter_map(|&(label, pages)| {
            let items: Vec<NavItem> = pages
                .iter()
                .filter(|page| page.rule().admits(caller.role()))
                .map(|page| NavItem {
                    title: page.title(),
                    href: page.path(),
                })
                .collect();
            (!items.is_empty()).then_some(NavSection { label, items })
        })
        .collect()
}
