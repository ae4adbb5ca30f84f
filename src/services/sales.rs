//! Pipeline board grouped by funnel stage.

use crate::domain::lead::LeadStage;
use crate::dto::sales::{SalesPageData, StageColumn};
use crate::repository::LeadReader;
use crate::services::ServiceResult;

/// Groups every lead under its stage, in funnel order.
pub fn load_pipeline<R>(repo: &R) -> ServiceResult<SalesPageData>
where
    R: LeadReader + ?Sized,
{
    let leads = repo.list_leads()?;

    let columns: Vec<StageColumn> = LeadStage::ALL
        .into_iter()
        .map(|stage| {
            let leads: Vec<_> = leads.iter().filter(|l| l.stage == stage).cloned().collect();
            StageColumn {
                stage,
                label: stage.label(),
                alias_label: stage.alias_label(),
                total_value: leads.iter().map(|l| l.value).sum(),
                weighted_value: leads.iter().map(|l| l.weighted_value()).sum(),
                leads,
            }
        })
        .collect();

    let (open_value, weighted_value) = columns
        .iter()
        .filter(|c| !c.stage.is_closed())
        .fold((0.0, 0.0), |(open, weighted), c| {
            (open + c.total_value, weighted + c.weighted_value)
        });

    Ok(SalesPageData {
        columns,
        open_value,
        weighted_value,
    })
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;
    use crate::services::fixtures;

    #[test]
    fn leads_land_in_their_stage_column() {
        let mut repo = MockRepository::new();
        repo.expect_list_leads().returning(|| {
            Ok(vec![
                fixtures::lead("l-1", LeadStage::Negotiation, 2000.0, 60),
                fixtures::lead("l-2", LeadStage::Negotiation, 1000.0, 40),
                fixtures::lead("l-3", LeadStage::ClosedLost, 9000.0, 0),
            ])
        });

        let data = load_pipeline(&repo).unwrap();

        assert_eq!(data.columns.len(), 6);
        let negotiation = &data.columns[LeadStage::Negotiation.ordinal() as usize];
        assert_eq!(negotiation.leads.len(), 2);
        assert_eq!(negotiation.alias_label, "Négociation");
        assert_eq!(negotiation.weighted_value, 1600.0);
        assert_eq!(data.open_value, 3000.0);
        assert_eq!(data.weighted_value, 1600.0);
    }
}
