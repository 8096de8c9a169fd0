//! Fixed initial dataset loaded into an empty store.

use crate::models::{Expert, Ticket, TicketStatus};
use chrono::{DateTime, Duration, Utc};

pub const SEED_TICKET_COUNT: usize = 50;

const PLATFORMS: [&str; 5] = ["Web App", "iOS App", "Android App", "API", "Desktop"];

const ISSUE_TYPES: [&str; 6] = [
    "Authentication",
    "UI Glitch",
    "Performance",
    "Security Review",
    "Feature Request",
    "Billing",
];

const EXPERT_RESPONSE: &str = "Hello, thank you for reaching out. We've identified a bug in our \
    latest release that was causing this issue. A hotfix has been deployed. Please try logging in \
    again. We apologize for the inconvenience.";

const RESOLUTION_NOTES: &str = "Applied patch v2.3.1 which addresses the authentication service \
    failure. Confirmed with the user that the issue is resolved. Monitored logs for 15 minutes \
    post-deployment, no further errors reported.";

pub fn experts() -> Vec<Expert> {
    [
        ("exp1", "Alice Johnson"),
        ("exp2", "Bob Williams"),
        ("exp3", "Charlie Brown"),
        ("exp4", "Diana Miller"),
    ]
    .into_iter()
    .map(|(id, name)| Expert {
        id: id.into(),
        name: name.into(),
        avatar_url: format!("https://i.pravatar.cc/150?u={id}"),
    })
    .collect()
}

/// Seed tickets, one per day going back from `now`
pub fn tickets(now: DateTime<Utc>) -> Vec<Ticket> {
    let expert_ids: Vec<String> = experts().into_iter().map(|e| e.id).collect();
    (0..SEED_TICKET_COUNT)
        .map(|i| seed_ticket(i, now, &expert_ids))
        .collect()
}

fn seed_ticket(index: usize, now: DateTime<Utc>, expert_ids: &[String]) -> Ticket {
    let created_at = now - Duration::days(index as i64);
    let status = TicketStatus::ALL[index % TicketStatus::ALL.len()];
    let handled = status.is_handled();
    let platform = PLATFORMS[index % PLATFORMS.len()];
    let issue_type = ISSUE_TYPES[index % ISSUE_TYPES.len()];

    Ticket {
        id: format!("TKT-{}", 1001 + index),
        viber_query: format!(
            "User is having trouble with {} on the {}. They mentioned that the login button is \
             unresponsive after the latest update. They have tried clearing their cache and using \
             an incognito window, but the issue persists. Please advise on the next steps.",
            issue_type.to_lowercase(),
            platform
        ),
        platform: platform.into(),
        issue_type: issue_type.into(),
        status,
        expert_id: expert_ids[index % expert_ids.len()].clone(),
        created_at,
        resolved_at: handled.then(|| created_at + Duration::days(1)),
        satisfaction_score: if handled { (index % 5) as u8 + 1 } else { 0 },
        expert_response: handled.then(|| EXPERT_RESPONSE.to_string()),
        resolution_notes: handled.then(|| RESOLUTION_NOTES.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_tickets_respect_invariants() {
        let tickets = tickets(Utc::now());
        assert_eq!(tickets.len(), SEED_TICKET_COUNT);
        for ticket in &tickets {
            ticket.validate().unwrap();
            assert_eq!(ticket.resolved_at.is_some(), ticket.status.is_handled());
        }
    }

    #[test]
    fn test_seed_layout() {
        let now = Utc::now();
        let tickets = tickets(now);

        assert_eq!(tickets[0].id, "TKT-1001");
        assert_eq!(tickets[0].created_at, now);
        assert_eq!(tickets[1].status, TicketStatus::InProgress);
        assert_eq!(tickets[2].status, TicketStatus::Resolved);
        assert_eq!(tickets[2].satisfaction_score, 3);
        assert_eq!(tickets[3].platform, "API");
        assert_eq!(tickets[5].expert_id, "exp2");
        assert_eq!(tickets[49].id, "TKT-1050");
    }

    #[test]
    fn test_seed_ticket_experts_exist() {
        let ids: Vec<String> = experts().into_iter().map(|e| e.id).collect();
        assert!(tickets(Utc::now()).iter().all(|t| ids.contains(&t.expert_id)));
    }
}
