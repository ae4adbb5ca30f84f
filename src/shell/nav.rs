//! Navigation rail state and entries.

use serde::{Deserialize, Serialize};

/// Width state of the navigation rail. The shell stores it and forwards it to
/// the content region; the rail itself raises toggle requests.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NavRail {
    #[default]
    Expanded,
    Collapsed,
}

impl NavRail {
    pub fn from_collapsed(collapsed: bool) -> Self {
        if collapsed {
            NavRail::Collapsed
        } else {
            NavRail::Expanded
        }
    }

    pub fn is_collapsed(self) -> bool {
        self == NavRail::Collapsed
    }

    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            NavRail::Expanded => NavRail::Collapsed,
            NavRail::Collapsed => NavRail::Expanded,
        }
    }

    pub fn rail_width_class(self) -> &'static str {
        match self {
            NavRail::Expanded => "w-64",
            NavRail::Collapsed => "w-20",
        }
    }

    /// Left offset applied to the content region so it clears the rail.
    pub fn content_offset_class(self) -> &'static str {
        match self {
            NavRail::Expanded => "pl-64",
            NavRail::Collapsed => "pl-20",
        }
    }
}

/// Entry of the navigation rail.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
    pub icon: &'static str,
}

impl NavItem {
    /// Active when the route is the item itself or one of its sub-pages.
    pub fn is_active(&self, route: &str) -> bool {
        route == self.href
            || route
                .strip_prefix(self.href)
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

pub const NAV_ITEMS: [NavItem; 7] = [
    NavItem {
        label: "Dashboard",
        href: "/dashboard",
        icon: "layout-dashboard",
    },
    NavItem {
        label: "Clients",
        href: "/clients",
        icon: "users",
    },
    NavItem {
        label: "Projects",
        href: "/projects",
        icon: "briefcase",
    },
    NavItem {
        label: "Sales",
        href: "/sales",
        icon: "trending-up",
    },
    NavItem {
        label: "Communications",
        href: "/communications",
        icon: "message-square",
    },
    NavItem {
        label: "Documents",
        href: "/documents",
        icon: "file-text",
    },
    NavItem {
        label: "Tickets",
        href: "/tickets",
        icon: "life-buoy",
    },
];
