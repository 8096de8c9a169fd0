//! API Models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard API response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ErrorResponse>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self { success: true, data: Some(data), error: None }
    }

    pub fn error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorResponse {
                code: code.to_string(),
                message: message.to_string(),
            }),
        }
    }
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

/// Paginated response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[aliases(TicketPage = PaginatedResponse<Ticket>)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total_count: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

// ============ Tickets ============

/// Support ticket raised by a viber
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    pub viber_query: String,
    pub platform: String,
    pub issue_type: String,
    pub status: TicketStatus,
    pub expert_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
    /// 0 means not rated, otherwise 1-5
    pub satisfaction_score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expert_response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution_notes: Option<String>,
}

/// Ticket status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum TicketStatus {
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
    Closed,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 4] = [
        TicketStatus::Open,
        TicketStatus::InProgress,
        TicketStatus::Resolved,
        TicketStatus::Closed,
    ];

    /// Wire representation, also used for filtering and sorting
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "Open",
            TicketStatus::InProgress => "In Progress",
            TicketStatus::Resolved => "Resolved",
            TicketStatus::Closed => "Closed",
        }
    }

    /// Resolved and closed tickets count as handled
    pub fn is_handled(&self) -> bool {
        matches!(self, TicketStatus::Resolved | TicketStatus::Closed)
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Violations of the ticket lifecycle rules
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TicketInvariantError {
    #[error("ticket {0} is handled but has no resolution time")]
    MissingResolution(String),

    #[error("ticket {0} is not handled but has a resolution time")]
    UnexpectedResolution(String),

    #[error("ticket {0} was resolved before it was created")]
    ResolvedBeforeCreated(String),

    #[error("ticket {id} has satisfaction score {score} outside 0-5")]
    ScoreOutOfRange { id: String, score: u8 },

    #[error("ticket {0} is rated but unresolved")]
    RatedWithoutResolution(String),
}

impl Ticket {
    pub fn is_handled(&self) -> bool {
        self.status.is_handled()
    }

    /// Check the lifecycle invariants tying status, resolution and rating together
    pub fn validate(&self) -> Result<(), TicketInvariantError> {
        match (self.status.is_handled(), self.resolved_at) {
            (true, None) => return Err(TicketInvariantError::MissingResolution(self.id.clone())),
            (false, Some(_)) => {
                return Err(TicketInvariantError::UnexpectedResolution(self.id.clone()))
            }
            (true, Some(resolved)) if resolved < self.created_at => {
                return Err(TicketInvariantError::ResolvedBeforeCreated(self.id.clone()))
            }
            _ => {}
        }
        if self.satisfaction_score > 5 {
            return Err(TicketInvariantError::ScoreOutOfRange {
                id: self.id.clone(),
                score: self.satisfaction_score,
            });
        }
        if self.satisfaction_score > 0 && self.resolved_at.is_none() {
            return Err(TicketInvariantError::RatedWithoutResolution(self.id.clone()));
        }
        Ok(())
    }
}

// ============ Experts ============

/// Support expert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Expert {
    pub id: String,
    pub name: String,
    pub avatar_url: String,
}

/// Expert assigned to a ticket, if the reference resolves
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketAssignee {
    pub ticket_id: String,
    pub expert: Option<Expert>,
    pub display_name: String,
}

// ============ Dashboard ============

/// Single KPI with its period-over-period change in percent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MetricValue {
    pub value: i64,
    pub change: i64,
}

/// Dashboard KPIs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub vibers_helped: MetricValue,
    /// Minutes
    pub avg_resolution_time: MetricValue,
    /// Percentage
    pub satisfaction_rate: MetricValue,
    pub active_experts: MetricValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TrendDataPoint {
    pub name: String,
    pub count: usize,
}

/// Top platforms and issue types for a range
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TrendsResponse {
    pub platforms: Vec<TrendDataPoint>,
    pub issues: Vec<TrendDataPoint>,
}

/// Tickets created and resolved on one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OverTimeDataPoint {
    pub date: NaiveDate,
    pub created: usize,
    pub resolved: usize,
}
