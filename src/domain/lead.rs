//! Sales pipeline opportunities.
//!
//! Stage labels arrive in two languages for the same funnel. Both label sets
//! deserialize to the same variant; serialization always emits the English
//! label.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::{EntityId, Percent};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LeadStage {
    #[serde(alias = "Prospection")]
    Prospecting,
    Qualification,
    #[serde(alias = "Proposition")]
    Proposal,
    #[serde(alias = "Négociation", alias = "Negociation")]
    Negotiation,
    #[serde(rename = "Closed Won", alias = "Gagné", alias = "Gagne")]
    ClosedWon,
    #[serde(rename = "Closed Lost", alias = "Perdu")]
    ClosedLost,
}

impl LeadStage {
    /// Funnel order, left to right on the pipeline board.
    pub const ALL: [LeadStage; 6] = [
        LeadStage::Prospecting,
        LeadStage::Qualification,
        LeadStage::Proposal,
        LeadStage::Negotiation,
        LeadStage::ClosedWon,
        LeadStage::ClosedLost,
    ];

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn is_closed(self) -> bool {
        matches!(self, LeadStage::ClosedWon | LeadStage::ClosedLost)
    }

    pub fn label(self) -> &'static str {
        match self {
            LeadStage::Prospecting => "Prospecting",
            LeadStage::Qualification => "Qualification",
            LeadStage::Proposal => "Proposal",
            LeadStage::Negotiation => "Negotiation",
            LeadStage::ClosedWon => "Closed Won",
            LeadStage::ClosedLost => "Closed Lost",
        }
    }

    /// French label of the same stage.
    pub fn alias_label(self) -> &'static str {
        match self {
            LeadStage::Prospecting => "Prospection",
            LeadStage::Qualification => "Qualification",
            LeadStage::Proposal => "Proposition",
            LeadStage::Negotiation => "Négociation",
            LeadStage::ClosedWon => "Gagné",
            LeadStage::ClosedLost => "Perdu",
        }
    }
}

/// A pipeline opportunity.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SaleLead {
    pub id: EntityId,
    pub title: String,
    pub value: f64,
    pub stage: LeadStage,
    pub probability: Percent,
    pub expected_close: NaiveDate,
    pub client_id: EntityId,
    pub client_name: String,
}

impl SaleLead {
    /// Value discounted by the win probability.
    pub fn weighted_value(&self) -> f64 {
        self.value * self.probability.fraction()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_label_sets_map_to_one_ordinal() {
        let english: LeadStage = serde_json::from_str("\"Negotiation\"").unwrap();
        let french: LeadStage = serde_json::from_str("\"Négociation\"").unwrap();
        assert_eq!(english, french);
        assert_eq!(french.ordinal(), 3);

        let won: LeadStage = serde_json::from_str("\"Gagné\"").unwrap();
        assert_eq!(won, LeadStage::ClosedWon);
        assert_eq!(serde_json::to_string(&won).unwrap(), "\"Closed Won\"");
    }

    #[test]
    fn ordinals_follow_funnel_order() {
        let ordinals: Vec<u8> = LeadStage::ALL.iter().map(|s| s.ordinal()).collect();
        assert_eq!(ordinals, vec![0, 1, 2, 3, 4, 5]);
        assert!(LeadStage::ClosedLost.is_closed());
        assert!(!LeadStage::Proposal.is_closed());
    }

    #[test]
    fn weighted_value_uses_probability() {
        let lead = SaleLead {
            id: EntityId::new("l-1").unwrap(),
            title: "Renewal".into(),
            value: 20_000.0,
            stage: LeadStage::Proposal,
            probability: Percent::new(60).unwrap(),
            expected_close: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            client_id: EntityId::new("c-1").unwrap(),
            client_name: "Acme".into(),
        };
        assert_eq!(lead.weighted_value(), 12_000.0);
    }
}
