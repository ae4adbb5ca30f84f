use serde::Serialize;

use crate::domain::lead::{LeadStage, SaleLead};

/// One column of the pipeline board.
#[derive(Debug, Clone, Serialize)]
pub struct StageColumn {
    pub stage: LeadStage,
    pub label: &'static str,
    pub alias_label: &'static str,
    pub leads: Vec<SaleLead>,
    pub total_value: f64,
    pub weighted_value: f64,
}

pub struct SalesPageData {
    pub columns: Vec<StageColumn>,
    /// Sum over leads that are not closed.
    pub open_value: f64,
    pub weighted_value: f64,
}
