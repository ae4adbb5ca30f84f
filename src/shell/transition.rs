//! Route-keyed content transition in "wait" mode.
//!
//! The content region is keyed on the route path. When the route changes the
//! previous content exits first; the next content only starts entering once
//! the exit has completed or been abandoned. The tween itself is cosmetic and
//! lives in the page; this is the state it follows.

use serde::Serialize;

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "phase", rename_all = "lowercase")]
pub enum RouteTransition {
    /// Content for `route` is settled.
    Idle { route: String },
    /// `from` is leaving; `to` waits for it.
    Exiting { from: String, to: String },
    /// `route` is entering.
    Entering { route: String },
}

impl RouteTransition {
    pub fn new(route: impl Into<String>) -> Self {
        RouteTransition::Idle {
            route: route.into(),
        }
    }

    /// Route whose content is (or will be) shown; also the transition key.
    pub fn target(&self) -> &str {
        match self {
            RouteTransition::Idle { route } | RouteTransition::Entering { route } => route,
            RouteTransition::Exiting { to, .. } => to,
        }
    }

    pub fn is_in_flight(&self) -> bool {
        !matches!(self, RouteTransition::Idle { .. })
    }

    /// Reacts to a route change. Navigating to the current target is a no-op.
    pub fn navigate(&mut self, route: &str) {
        if self.target() == route {
            return;
        }
        *self = match std::mem::replace(self, RouteTransition::new(String::new())) {
            RouteTransition::Idle { route: from } | RouteTransition::Entering { route: from } => {
                RouteTransition::Exiting {
                    from,
                    to: route.to_string(),
                }
            }
            // Back to the content that is leaving: it re-enters in place.
            RouteTransition::Exiting { from, .. } if from == route => {
                RouteTransition::Entering { route: from }
            }
            // Exit already running: retarget without restarting it.
            RouteTransition::Exiting { from, .. } => RouteTransition::Exiting {
                from,
                to: route.to_string(),
            },
        };
    }

    /// The previous content finished leaving.
    pub fn exit_complete(&mut self) {
        if let RouteTransition::Exiting { to, .. } = self {
            let route = std::mem::take(to);
            *self = RouteTransition::Entering { route };
        }
    }

    /// The exit animation was dropped; the next content enters right away.
    pub fn abandon_exit(&mut self) {
        self.exit_complete();
    }

    pub fn enter_complete(&mut self) {
        if let RouteTransition::Entering { route } = self {
            let route = std::mem::take(route);
            *self = RouteTransition::Idle { route };
        }
    }
}
