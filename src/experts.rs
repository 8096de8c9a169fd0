//! Read-only expert lookup built from the store for the lifetime of a request.

use crate::models::{Expert, Ticket, TicketAssignee};
use std::collections::HashMap;

/// Shown when a ticket's expert reference does not resolve
pub const UNASSIGNED: &str = "Unassigned";

pub struct ExpertDirectory {
    by_id: HashMap<String, Expert>,
}

impl ExpertDirectory {
    pub fn new(experts: Vec<Expert>) -> Self {
        Self {
            by_id: experts.into_iter().map(|e| (e.id.clone(), e)).collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Expert> {
        self.by_id.get(id)
    }

    /// Expert name, or "Unassigned" for a dangling reference
    pub fn display_name(&self, expert_id: &str) -> &str {
        self.get(expert_id).map_or(UNASSIGNED, |e| e.name.as_str())
    }

    pub fn assignee(&self, ticket: &Ticket) -> TicketAssignee {
        TicketAssignee {
            ticket_id: ticket.id.clone(),
            expert: self.get(&ticket.expert_id).cloned(),
            display_name: self.display_name(&ticket.expert_id).to_string(),
        }
    }
}
