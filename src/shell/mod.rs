//! Session-gated application shell.
//!
//! [`ShellGuard`] decides, for the current route and session, whether to
//! render the public entry page, redirect to it, or host the protected
//! layout. Session state and navigation are injected through
//! [`SessionSource`] and [`Navigator`] so the redirect rule runs the same in
//! the HTTP gate and in unit tests.

use serde::Serialize;

use crate::domain::user::User;

pub mod nav;
pub mod transition;

use nav::{NAV_ITEMS, NavItem, NavRail};
use transition::RouteTransition;

/// The single public route; it is also the login surface.
pub const ENTRY_ROUTE: &str = "/";

/// Supplies the current authenticated user, if any.
pub trait SessionSource {
    fn current_user(&self) -> Option<&User>;
}

impl SessionSource for Option<User> {
    fn current_user(&self) -> Option<&User> {
        self.as_ref()
    }
}

impl SessionSource for User {
    fn current_user(&self) -> Option<&User> {
        Some(self)
    }
}

/// Accepts programmatic navigation commands.
pub trait Navigator {
    fn navigate(&mut self, route: &str);
}

/// Navigator that only remembers where it was sent.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    pub visits: Vec<String>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, route: &str) {
        self.visits.push(route.to_string());
    }
}

/// What the shell renders for one evaluation.
#[derive(Clone, Debug, PartialEq)]
pub enum ShellOutcome {
    /// Not mounted yet: nothing is rendered and nothing is decided.
    Nothing,
    /// Entry route: children render without gating.
    Public,
    /// No session on a protected route; a navigation to `to` was requested.
    Redirecting { to: String },
    /// Session present on a protected route.
    Protected(ShellLayout),
}

/// Protected layout: navigation rail, top bar and keyed content region.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ShellLayout {
    pub user: User,
    pub route: String,
    pub rail: NavRail,
    pub transition: RouteTransition,
}

impl ShellLayout {
    pub fn rail_class(&self) -> &'static str {
        self.rail.rail_width_class()
    }

    pub fn content_offset_class(&self) -> &'static str {
        self.rail.content_offset_class()
    }

    /// Key of the animated content region; changes with every route.
    pub fn transition_key(&self) -> &str {
        self.transition.target()
    }

    pub fn nav_items(&self) -> Vec<(NavItem, bool)> {
        NAV_ITEMS
            .iter()
            .map(|item| (*item, item.is_active(&self.route)))
            .collect()
    }
}

/// Route gate plus the layout state it owns (mount flag, collapse flag,
/// content transition).
#[derive(Debug)]
pub struct ShellGuard {
    entry_route: String,
    mounted: bool,
    rail: NavRail,
    transition: Option<RouteTransition>,
    /// Protected route a redirect was already issued for.
    redirected_from: Option<String>,
}

impl ShellGuard {
    pub fn new(entry_route: impl Into<String>) -> Self {
        Self {
            entry_route: normalize_route(&entry_route.into()),
            mounted: false,
            rail: NavRail::default(),
            transition: None,
            redirected_from: None,
        }
    }

    pub fn entry_route(&self) -> &str {
        &self.entry_route
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Marks the shell mounted. Until then no redirect decision is taken.
    pub fn mount(&mut self) {
        self.mounted = true;
    }

    /// Drops all ephemeral state.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.rail = NavRail::default();
        self.transition = None;
        self.redirected_from = None;
    }

    pub fn rail(&self) -> NavRail {
        self.rail
    }

    pub fn set_rail(&mut self, rail: NavRail) {
        self.rail = rail;
    }

    /// Toggle signal raised by the navigation rail.
    pub fn toggle_rail(&mut self) -> NavRail {
        self.rail = self.rail.toggle();
        self.rail
    }

    pub fn is_entry_route(&self, route: &str) -> bool {
        normalize_route(route) == self.entry_route
    }

    /// Evaluates the gate for `route`.
    ///
    /// A redirect is requested at most once per protected route while the
    /// session stays absent; reaching the entry route, gaining a session or
    /// moving to another protected route re-arms it.
    pub fn evaluate<S, N>(&mut self, route: &str, session: &S, navigator: &mut N) -> ShellOutcome
    where
        S: SessionSource + ?Sized,
        N: Navigator + ?Sized,
    {
        if !self.mounted {
            return ShellOutcome::Nothing;
        }

        let route = normalize_route(route);

        if route == self.entry_route {
            self.redirected_from = None;
            return ShellOutcome::Public;
        }

        let Some(user) = session.current_user() else {
            if self.redirected_from.as_deref() != Some(route.as_str()) {
                log::debug!("No session on {route}, redirecting to {}", self.entry_route);
                navigator.navigate(&self.entry_route);
                self.redirected_from = Some(route);
            }
            return ShellOutcome::Redirecting {
                to: self.entry_route.clone(),
            };
        };

        self.redirected_from = None;
        let transition = self
            .transition
            .get_or_insert_with(|| RouteTransition::new(route.clone()));
        transition.navigate(&route);

        ShellOutcome::Protected(ShellLayout {
            user: user.clone(),
            route,
            rail: self.rail,
            transition: transition.clone(),
        })
    }

    /// Current content transition, if a protected page was ever shown.
    pub fn transition_mut(&mut self) -> Option<&mut RouteTransition> {
        self.transition.as_mut()
    }
}

/// Strips the query string and trailing slashes; the empty path is `/`.
pub fn normalize_route(route: &str) -> String {
    let path = route.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}
