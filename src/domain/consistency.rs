//! Recomputation of denormalized fields.
//!
//! `Client::projects_count` and the `client_name` copies carried by projects,
//! leads and tickets are derived values. They must equal the live count or
//! lookup at write time, so the data layer reruns [`refresh`] after every
//! write instead of trusting stored copies.

use std::collections::HashMap;

use crate::domain::client::Client;
use crate::domain::lead::SaleLead;
use crate::domain::project::Project;
use crate::domain::ticket::Ticket;
use crate::domain::types::EntityId;

/// Borrowed view over every collection holding denormalized fields.
pub struct Records<'a> {
    pub clients: &'a mut [Client],
    pub projects: &'a mut [Project],
    pub leads: &'a mut [SaleLead],
    pub tickets: &'a mut [Ticket],
}

/// Number of values that had drifted and were rewritten.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RefreshReport {
    pub counts_fixed: usize,
    pub names_fixed: usize,
    /// Records whose `clientId` references no known client.
    pub dangling: Vec<EntityId>,
}

impl RefreshReport {
    pub fn is_clean(&self) -> bool {
        self.counts_fixed == 0 && self.names_fixed == 0 && self.dangling.is_empty()
    }
}

/// Rewrites every derived field from the authoritative records.
pub fn refresh(records: Records<'_>) -> RefreshReport {
    let mut report = RefreshReport::default();

    let mut counts: HashMap<&str, u32> = HashMap::new();
    for project in records.projects.iter() {
        *counts.entry(project.client_id.as_str()).or_default() += 1;
    }
    for client in records.clients.iter_mut() {
        let live = counts.get(client.id.as_str()).copied().unwrap_or(0);
        if client.projects_count != live {
            client.projects_count = live;
            report.counts_fixed += 1;
        }
    }

    let names: HashMap<&str, &str> = records
        .clients
        .iter()
        .map(|client| (client.id.as_str(), client.name.as_str()))
        .collect();

    let mut sync = |id: &EntityId, client_id: &EntityId, client_name: &mut String| {
        match names.get(client_id.as_str()) {
            Some(name) if client_name.as_str() != *name => {
                *client_name = (*name).to_string();
                report.names_fixed += 1;
            }
            Some(_) => {}
            None => report.dangling.push(id.clone()),
        }
    };

    for project in records.projects.iter_mut() {
        sync(&project.id, &project.client_id, &mut project.client_name);
    }
    for lead in records.leads.iter_mut() {
        sync(&lead.id, &lead.client_id, &mut lead.client_name);
    }
    for ticket in records.tickets.iter_mut() {
        sync(&ticket.id, &ticket.client_id, &mut ticket.client_name);
    }

    report
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::client::{ClientStatus, ClientType};
    use crate::domain::project::ProjectStatus;
    use crate::domain::ticket::tests::sample_ticket;
    use crate::domain::types::Percent;

    fn client(id: &str, name: &str, projects_count: u32) -> Client {
        Client {
            id: EntityId::new(id).unwrap(),
            name: name.into(),
            kind: ClientType::Client,
            status: ClientStatus::Active,
            contact: "Contact".into(),
            email: "contact@example.com".into(),
            phone: "+33 1 00 00 00 00".into(),
            address: "1 rue de Paris".into(),
            last_interaction: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            projects_count,
        }
    }

    fn project(id: &str, client_id: &str, client_name: &str) -> Project {
        Project {
            id: EntityId::new(id).unwrap(),
            name: format!("Project {id}"),
            client_id: EntityId::new(client_id).unwrap(),
            client_name: client_name.into(),
            status: ProjectStatus::Planning,
            progress: Percent::default(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            budget: 1.0,
            spent: 0.0,
            manager: "M".into(),
            description: String::new(),
        }
    }

    #[test]
    fn counts_and_names_follow_live_records() {
        let mut clients = vec![client("c-1", "Acme", 7), client("c-2", "Globex", 0)];
        let mut projects = vec![
            project("p-1", "c-1", "Old Acme"),
            project("p-2", "c-1", "Acme"),
            project("p-3", "c-2", "Globex"),
        ];
        let mut tickets = vec![sample_ticket()];
        tickets[0].client_name = "ACME (stale)".into();

        let report = refresh(Records {
            clients: &mut clients,
            projects: &mut projects,
            leads: &mut [],
            tickets: &mut tickets,
        });

        assert_eq!(clients[0].projects_count, 2);
        assert_eq!(clients[1].projects_count, 1);
        assert_eq!(projects[0].client_name, "Acme");
        assert_eq!(tickets[0].client_name, "Acme");
        assert_eq!(report.counts_fixed, 2);
        assert_eq!(report.names_fixed, 2);
        assert!(report.dangling.is_empty());
    }

    #[test]
    fn unknown_client_reference_is_reported() {
        let mut clients = vec![client("c-1", "Acme", 0)];
        let mut projects = vec![project("p-9", "c-404", "Ghost")];

        let report = refresh(Records {
            clients: &mut clients,
            projects: &mut projects,
            leads: &mut [],
            tickets: &mut [],
        });

        assert_eq!(report.dangling, vec![EntityId::new("p-9").unwrap()]);
        assert_eq!(projects[0].client_name, "Ghost");
        assert!(!report.is_clean());
    }
}
