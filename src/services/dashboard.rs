//! Dashboard figures.

use chrono::{DateTime, Duration, Utc};

use crate::domain::client::ClientStatus;
use crate::domain::lead::LeadStage;
use crate::domain::project::ProjectStatus;
use crate::dto::dashboard::{DashboardPageData, StageSummary, StatCard, Trend};
use crate::repository::{
    ClientListQuery, ClientReader, LeadReader, ProjectListQuery, ProjectReader, TicketListQuery,
    TicketReader,
};
use crate::services::ServiceResult;

const RECENT_TICKETS: usize = 5;
const TREND_WINDOW_DAYS: i64 = 30;

/// Percentage of `part` in `total`; no trend for an empty metric.
fn share(part: usize, total: usize, is_positive: bool) -> Option<Trend> {
    if total == 0 {
        return None;
    }
    let value = (part * 100 / total).min(100) as u8;
    Some(Trend { value, is_positive })
}

/// Renders an amount with thin-space thousands grouping, no decimals.
pub fn format_amount(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    if rounded < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Builds the stat cards, recent tickets and open pipeline summary.
pub fn load_dashboard<R>(repo: &R, now: DateTime<Utc>) -> ServiceResult<DashboardPageData>
where
    R: ClientReader + ProjectReader + TicketReader + LeadReader + ?Sized,
{
    let window_start = now - Duration::days(TREND_WINDOW_DAYS);
    let today = now.date_naive();
    let window_start_day = window_start.date_naive();

    let (_, active_clients) =
        repo.list_clients(ClientListQuery::new().status(ClientStatus::Active))?;
    let recently_contacted = active_clients
        .iter()
        .filter(|c| c.last_interaction >= window_start_day)
        .count();

    let running = repo.list_projects(ProjectListQuery::new().status(ProjectStatus::InProgress))?;
    let recently_started = running
        .iter()
        .filter(|p| p.start_date >= window_start_day && p.start_date <= today)
        .count();

    let (_, queue) = repo.list_tickets(TicketListQuery::new())?;
    let open: Vec<_> = queue.into_iter().filter(|t| t.is_open()).collect();
    let recently_opened = open.iter().filter(|t| t.created_at >= window_start).count();
    let breached_tickets = open.iter().filter(|t| t.is_sla_breached(now)).count();

    let leads = repo.list_leads()?;
    let open_leads: Vec<_> = leads.iter().filter(|l| !l.stage.is_closed()).collect();
    let pipeline_value: f64 = open_leads.iter().map(|l| l.value).sum();
    let weighted_value: f64 = open_leads.iter().map(|l| l.weighted_value()).sum();
    let pipeline_trend = if pipeline_value > 0.0 {
        Some(Trend {
            value: (weighted_value / pipeline_value * 100.0).round().clamp(0.0, 100.0) as u8,
            is_positive: true,
        })
    } else {
        None
    };

    let stats = vec![
        StatCard::new("Active clients", active_clients.len().to_string(), "users")
            .with_trend(share(recently_contacted, active_clients.len(), true)),
        StatCard::new("Projects in progress", running.len().to_string(), "briefcase")
            .with_trend(share(recently_started, running.len(), true)),
        StatCard::new("Open tickets", open.len().to_string(), "life-buoy")
            .with_trend(share(recently_opened, open.len(), false)),
        StatCard::new("Pipeline value", format_amount(pipeline_value), "trending-up")
            .with_trend(pipeline_trend),
    ];

    let pipeline = LeadStage::ALL
        .into_iter()
        .filter(|stage| !stage.is_closed())
        .map(|stage| {
            let in_stage = open_leads.iter().filter(|l| l.stage == stage);
            StageSummary {
                stage,
                label: stage.label(),
                count: in_stage.clone().count(),
                total_value: in_stage.map(|l| l.value).sum(),
            }
        })
        .collect();

    let mut recent_tickets = open;
    recent_tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    recent_tickets.truncate(RECENT_TICKETS);

    Ok(DashboardPageData {
        stats,
        recent_tickets,
        breached_tickets,
        pipeline,
    })
}

#[cfg(test)]
mod format_tests {
    use super::*;

    #[test]
    fn amounts_are_grouped_by_thousands() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(999.4), "999");
        assert_eq!(format_amount(1234567.0), "1 234 567");
        assert_eq!(format_amount(-4500.0), "-4 500");
    }

    #[test]
    fn empty_metric_has_no_trend() {
        assert_eq!(share(0, 0, true), None);
        assert_eq!(
            share(1, 4, false),
            Some(Trend {
                value: 25,
                is_positive: false
            })
        );
    }
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::{NaiveDate, TimeZone};

    use super::*;
    use crate::domain::ticket::TicketStatus;
    use crate::domain::ticket::tests::sample_ticket;
    use crate::repository::mock::MockRepository;
    use crate::services::fixtures;

    #[test]
    fn dashboard_counts_open_work() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let mut repo = MockRepository::new();

        repo.expect_list_clients()
            .withf(|q| q.status == Some(ClientStatus::Active))
            .returning(|_| {
                let mut stale = fixtures::client("c-2", "Globex", ClientStatus::Active);
                stale.last_interaction = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
                Ok((
                    2,
                    vec![
                        fixtures::client("c-1", "Acme", ClientStatus::Active),
                        stale,
                    ],
                ))
            });
        repo.expect_list_projects().returning(|_| {
            Ok(vec![fixtures::project(
                "p-1",
                ProjectStatus::InProgress,
                NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            )])
        });
        repo.expect_list_tickets().returning(|_| {
            let open = sample_ticket();
            let mut resolved = sample_ticket();
            resolved.id = crate::domain::types::EntityId::new("t-2").unwrap();
            resolved.status = TicketStatus::Resolved;
            Ok((2, vec![open, resolved]))
        });
        repo.expect_list_leads().returning(|| {
            Ok(vec![
                fixtures::lead("l-1", LeadStage::Proposal, 1000.0, 50),
                fixtures::lead("l-2", LeadStage::ClosedWon, 5000.0, 100),
            ])
        });

        let data = load_dashboard(&repo, now).unwrap();

        let values: Vec<&str> = data.stats.iter().map(|s| s.value.as_str()).collect();
        assert_eq!(values, vec!["2", "1", "1", "1 000"]);
        assert_eq!(data.stats[0].trend.map(|t| t.value), Some(50));
        assert_eq!(data.stats[3].trend.map(|t| t.value), Some(50));
        assert_eq!(data.recent_tickets.len(), 1);
        assert_eq!(data.breached_tickets, 1);

        let proposal = data
            .pipeline
            .iter()
            .find(|s| s.stage == LeadStage::Proposal)
            .unwrap();
        assert_eq!(proposal.count, 1);
        assert_eq!(data.pipeline.len(), 4);
    }
}
