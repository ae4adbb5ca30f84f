//! DTOs for the dashboard page.

use serde::Serialize;

use crate::domain::lead::LeadStage;
use crate::domain::ticket::Ticket;

/// Direction and size of a stat card trend, in whole percent.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Trend {
    pub value: u8,
    pub is_positive: bool,
}

/// A value / trend / icon tuple rendered as one card.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StatCard {
    pub title: String,
    pub value: String,
    pub icon: &'static str,
    pub trend: Option<Trend>,
}

impl StatCard {
    pub fn new(title: impl Into<String>, value: impl Into<String>, icon: &'static str) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            icon,
            trend: None,
        }
    }

    pub fn with_trend(mut self, trend: Option<Trend>) -> Self {
        self.trend = trend;
        self
    }
}

/// Open pipeline totals for one stage.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StageSummary {
    pub stage: LeadStage,
    pub label: &'static str,
    pub count: usize,
    pub total_value: f64,
}

/// Data required to render the dashboard.
#[derive(Debug, Serialize)]
pub struct DashboardPageData {
    pub stats: Vec<StatCard>,
    pub recent_tickets: Vec<Ticket>,
    pub breached_tickets: usize,
    pub pipeline: Vec<StageSummary>,
}
