//! # Ticket Query Engine
//!
//! Pure filter → sort → paginate → aggregate pipeline over the full ticket
//! collection, plus the dashboard metrics derived from it. Nothing here
//! touches the store; callers load tickets first and pass them in.

pub mod engine;
pub mod metrics;

use crate::models::Ticket;
use chrono::{DateTime, Duration, Utc};
use std::cmp::Ordering;
use std::str::FromStr;

/// Rejected query parameters
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("unknown range '{0}', expected 24h, 7d or 30d")]
    UnknownRange(String),

    #[error("unknown sort field '{0}'")]
    UnknownSortField(String),

    #[error("unknown sort order '{0}', expected asc or desc")]
    UnknownSortOrder(String),

    #[error("invalid {name} '{value}': {reason}")]
    InvalidNumber {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Dashboard time range
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeRange {
    #[default]
    Last24Hours,
    Last7Days,
    Last30Days,
}

impl TimeRange {
    pub fn days(&self) -> i64 {
        match self {
            TimeRange::Last24Hours => 1,
            TimeRange::Last7Days => 7,
            TimeRange::Last30Days => 30,
        }
    }

    /// Parse an optional request value; absent or empty yields `default`
    pub fn parse_or(raw: Option<&str>, default: TimeRange) -> Result<Self, QueryError> {
        match raw {
            None | Some("") => Ok(default),
            Some(raw) => raw.parse(),
        }
    }

    /// Days shown in the performance series; a 24h range is widened to a week
    pub fn series_days(&self) -> usize {
        match self {
            TimeRange::Last30Days => 30,
            _ => 7,
        }
    }

    /// `[now - days, now]`
    pub fn window(&self, now: DateTime<Utc>) -> DateWindow {
        DateWindow {
            from: now - Duration::days(self.days()),
            to: now,
        }
    }

    /// The window of equal length ending just before `window(now)` starts
    pub fn previous_window(&self, now: DateTime<Utc>) -> DateWindow {
        let current = self.window(now);
        DateWindow {
            from: current.from - Duration::days(self.days()),
            to: current.from - Duration::nanoseconds(1),
        }
    }
}

impl FromStr for TimeRange {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "24h" => Ok(TimeRange::Last24Hours),
            "7d" => Ok(TimeRange::Last7Days),
            "30d" => Ok(TimeRange::Last30Days),
            other => Err(QueryError::UnknownRange(other.to_string())),
        }
    }
}

/// Closed interval of instants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl DateWindow {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.from <= at && at <= self.to
    }
}

/// Ticket field usable as a sort key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    Id,
    ViberQuery,
    Platform,
    IssueType,
    Status,
    ExpertId,
    #[default]
    CreatedAt,
    ResolvedAt,
    SatisfactionScore,
}

impl SortField {
    /// Three-way comparison on the field's natural value.
    ///
    /// Status compares by its wire string. A missing `resolvedAt` orders
    /// before any present one.
    pub fn compare(&self, a: &Ticket, b: &Ticket) -> Ordering {
        match self {
            SortField::Id => a.id.cmp(&b.id),
            SortField::ViberQuery => a.viber_query.cmp(&b.viber_query),
            SortField::Platform => a.platform.cmp(&b.platform),
            SortField::IssueType => a.issue_type.cmp(&b.issue_type),
            SortField::Status => a.status.as_str().cmp(b.status.as_str()),
            SortField::ExpertId => a.expert_id.cmp(&b.expert_id),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::ResolvedAt => a.resolved_at.cmp(&b.resolved_at),
            SortField::SatisfactionScore => a.satisfaction_score.cmp(&b.satisfaction_score),
        }
    }
}

impl FromStr for SortField {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "id" => SortField::Id,
            "viberQuery" => SortField::ViberQuery,
            "platform" => SortField::Platform,
            "issueType" => SortField::IssueType,
            "status" => SortField::Status,
            "expertId" => SortField::ExpertId,
            "createdAt" => SortField::CreatedAt,
            "resolvedAt" => SortField::ResolvedAt,
            "satisfactionScore" => SortField::SatisfactionScore,
            other => return Err(QueryError::UnknownSortField(other.to_string())),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(QueryError::UnknownSortOrder(other.to_string())),
        }
    }
}

/// Sort key and direction, defaulting to newest first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub order: SortOrder,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: SortField::CreatedAt,
            order: SortOrder::Desc,
        }
    }
}

/// Categorical and free-text constraints. `None` means unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketFilter {
    pub search: Option<String>,
    pub status: Option<String>,
    pub platform: Option<String>,
}

/// Everything needed to produce one page of the ticket listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketQuery {
    pub filter: TicketFilter,
    pub sort: SortSpec,
    /// 1-based
    pub page: usize,
    pub page_size: usize,
}

/// Field used for category aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Platform,
    IssueType,
}

impl Category {
    pub fn of<'a>(&self, ticket: &'a Ticket) -> &'a str {
        match self {
            Category::Platform => &ticket.platform,
            Category::IssueType => &ticket.issue_type,
        }
    }
}
