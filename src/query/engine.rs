//! Filtering, sorting, pagination and count aggregation over tickets.

use super::{Category, DateWindow, SortOrder, SortSpec, TicketFilter, TicketQuery};
use crate::models::{OverTimeDataPoint, PaginatedResponse, Ticket, TrendDataPoint, TrendsResponse};
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use std::collections::HashMap;

/// Number of entries kept by category aggregation
pub const TOP_CATEGORIES: usize = 5;

/// Tickets created inside `window`, in input order
pub fn in_window<'a>(tickets: &'a [Ticket], window: &DateWindow) -> Vec<&'a Ticket> {
    tickets
        .iter()
        .filter(|t| window.contains(t.created_at))
        .collect()
}

/// Case-insensitive substring match on id or query text
pub fn matches_search(ticket: &Ticket, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let needle = needle.to_lowercase();
    ticket.id.to_lowercase().contains(&needle)
        || ticket.viber_query.to_lowercase().contains(&needle)
}

impl TicketFilter {
    pub fn matches(&self, ticket: &Ticket) -> bool {
        if let Some(q) = &self.search {
            if !matches_search(ticket, q) {
                return false;
            }
        }
        if let Some(status) = &self.status {
            if ticket.status.as_str() != status {
                return false;
            }
        }
        if let Some(platform) = &self.platform {
            if &ticket.platform != platform {
                return false;
            }
        }
        true
    }
}

/// Stable sort; equal keys keep their relative order in both directions
pub fn sort_tickets(tickets: &mut [Ticket], spec: SortSpec) {
    tickets.sort_by(|a, b| {
        let ordering = spec.field.compare(a, b);
        match spec.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

/// Slice one 1-based page out of `items`. Pages past the end are empty.
pub fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> PaginatedResponse<T> {
    let total_count = items.len();
    let total_pages = if page_size == 0 {
        0
    } else {
        total_count.div_ceil(page_size)
    };
    let offset = page.saturating_sub(1).saturating_mul(page_size);
    let items = items.into_iter().skip(offset).take(page_size).collect();

    PaginatedResponse {
        items,
        total_count,
        page,
        page_size,
        total_pages,
    }
}

/// Full listing pipeline: filter, sort, then paginate
pub fn run_query(tickets: Vec<Ticket>, query: &TicketQuery) -> PaginatedResponse<Ticket> {
    let mut matched: Vec<Ticket> = tickets
        .into_iter()
        .filter(|t| query.filter.matches(t))
        .collect();
    sort_tickets(&mut matched, query.sort);
    paginate(matched, query.page, query.page_size)
}

/// Count tickets per distinct category value, most frequent first.
///
/// Ties keep first-seen order. At most `limit` entries are returned.
pub fn top_categories<'a, I>(tickets: I, category: Category, limit: usize) -> Vec<TrendDataPoint>
where
    I: IntoIterator<Item = &'a Ticket>,
{
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for ticket in tickets {
        let name = category.of(ticket);
        match positions.get(name) {
            Some(&idx) => counts[idx].1 += 1,
            None => {
                positions.insert(name, counts.len());
                counts.push((name, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(limit)
        .map(|(name, count)| TrendDataPoint {
            name: name.to_string(),
            count,
        })
        .collect()
}

/// Top platforms and issue types among tickets created in `window`
pub fn trends(tickets: &[Ticket], window: &DateWindow) -> TrendsResponse {
    let selected = in_window(tickets, window);
    TrendsResponse {
        platforms: top_categories(selected.iter().copied(), Category::Platform, TOP_CATEGORIES),
        issues: top_categories(selected.iter().copied(), Category::IssueType, TOP_CATEGORIES),
    }
}

/// Created/resolved counts per calendar day in `tz` for the `days` days
/// ending on the day containing `now`, oldest first.
pub fn daily_series<Tz: TimeZone>(
    tickets: &[Ticket],
    days: usize,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Vec<OverTimeDataPoint> {
    let local_day = |at: DateTime<Utc>| at.with_timezone(tz).date_naive();

    let mut created: HashMap<NaiveDate, usize> = HashMap::new();
    let mut resolved: HashMap<NaiveDate, usize> = HashMap::new();
    for ticket in tickets {
        *created.entry(local_day(ticket.created_at)).or_default() += 1;
        if let Some(at) = ticket.resolved_at {
            *resolved.entry(local_day(at)).or_default() += 1;
        }
    }

    let today = local_day(now);
    (0..days)
        .rev()
        .map(|back| {
            let date = today - Duration::days(back as i64);
            OverTimeDataPoint {
                date,
                created: created.get(&date).copied().unwrap_or(0),
                resolved: resolved.get(&date).copied().unwrap_or(0),
            }
        })
        .collect()
}
