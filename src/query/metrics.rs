//! Dashboard KPIs and period-over-period change.

use super::{engine::in_window, TimeRange};
use crate::models::{DashboardMetrics, MetricValue, Ticket};
use chrono::{DateTime, Utc};

/// Maximum satisfaction score a single ticket can receive
pub const MAX_SATISFACTION_SCORE: i64 = 5;

/// Window-scoped KPIs before change calculation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodStats {
    pub vibers_helped: i64,
    /// Minutes
    pub avg_resolution_time: i64,
    /// Percentage
    pub satisfaction_rate: i64,
}

/// Round half up, so -2.5 becomes -2 and 2.5 becomes 3
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// KPIs over handled tickets among `tickets`
pub fn period_stats<'a, I>(tickets: I) -> PeriodStats
where
    I: IntoIterator<Item = &'a Ticket>,
{
    let mut handled = 0i64;
    let mut total_minutes = 0i64;
    let mut total_score = 0i64;

    for ticket in tickets.into_iter().filter(|t| t.is_handled()) {
        handled += 1;
        if let Some(resolved_at) = ticket.resolved_at {
            total_minutes += (resolved_at - ticket.created_at).num_minutes();
        }
        total_score += i64::from(ticket.satisfaction_score);
    }

    if handled == 0 {
        return PeriodStats::default();
    }

    PeriodStats {
        vibers_helped: handled,
        avg_resolution_time: round_half_up(total_minutes as f64 / handled as f64),
        satisfaction_rate: round_half_up(
            total_score as f64 / (handled * MAX_SATISFACTION_SCORE) as f64 * 100.0,
        ),
    }
}

/// Percent change from `previous` to `current`.
///
/// Growth from zero counts as a full 100% swing; zero to zero is no change.
pub fn percent_change(current: i64, previous: i64) -> i64 {
    if previous == 0 {
        return if current > 0 { 100 } else { 0 };
    }
    round_half_up((current - previous) as f64 / previous as f64 * 100.0)
}

/// Dashboard metrics for `range` ending at `now`.
///
/// Resolution time change is negated: shorter resolution reads as improvement.
pub fn dashboard_metrics(
    tickets: &[Ticket],
    range: TimeRange,
    now: DateTime<Utc>,
    expert_count: usize,
) -> DashboardMetrics {
    let current = period_stats(in_window(tickets, &range.window(now)));
    let previous = period_stats(in_window(tickets, &range.previous_window(now)));

    DashboardMetrics {
        vibers_helped: MetricValue {
            value: current.vibers_helped,
            change: percent_change(current.vibers_helped, previous.vibers_helped),
        },
        avg_resolution_time: MetricValue {
            value: current.avg_resolution_time,
            change: -percent_change(current.avg_resolution_time, previous.avg_resolution_time),
        },
        satisfaction_rate: MetricValue {
            value: current.satisfaction_rate,
            change: percent_change(current.satisfaction_rate, previous.satisfaction_rate),
        },
        active_experts: MetricValue {
            value: expert_count as i64,
            change: 0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TicketStatus;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 18, 0, 0).unwrap()
    }

    fn ticket(status: TicketStatus, age_hours: i64, minutes: i64, score: u8) -> Ticket {
        let created_at = now() - Duration::hours(age_hours);
        Ticket {
            id: format!("TKT-{age_hours}-{minutes}"),
            viber_query: "help".into(),
            platform: "Web App".into(),
            issue_type: "Billing".into(),
            status,
            expert_id: "exp1".into(),
            created_at,
            resolved_at: status
                .is_handled()
                .then(|| created_at + Duration::minutes(minutes)),
            satisfaction_score: score,
            expert_response: None,
            resolution_notes: None,
        }
    }

    #[test]
    fn test_percent_change() {
        assert_eq!(percent_change(0, 0), 0);
        assert_eq!(percent_change(5, 0), 100);
        assert_eq!(percent_change(150, 100), 50);
        assert_eq!(percent_change(50, 100), -50);
        assert_eq!(percent_change(0, 4), -100);
        assert_eq!(percent_change(1, 3), -67);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(89.6), 90);
    }

    #[test]
    fn test_period_stats_example() {
        let tickets = vec![
            ticket(TicketStatus::Resolved, 2, 30, 4),
            ticket(TicketStatus::Open, 3, 0, 0),
            ticket(TicketStatus::Closed, 4, 50, 5),
        ];
        let stats = period_stats(&tickets);
        assert_eq!(
            stats,
            PeriodStats {
                vibers_helped: 2,
                avg_resolution_time: 40,
                satisfaction_rate: 90,
            }
        );
    }

    #[test]
    fn test_period_stats_empty() {
        let tickets = vec![ticket(TicketStatus::Open, 1, 0, 0)];
        assert_eq!(period_stats(&tickets), PeriodStats::default());
    }

    #[test]
    fn test_resolution_minutes_truncate() {
        let mut t = ticket(TicketStatus::Resolved, 1, 0, 0);
        t.resolved_at = Some(t.created_at + Duration::seconds(119));
        assert_eq!(period_stats([&t]).avg_resolution_time, 1);
    }

    #[test]
    fn test_dashboard_metrics_compare_periods() {
        let tickets = vec![
            // current 24h window
            ticket(TicketStatus::Resolved, 2, 30, 4),
            ticket(TicketStatus::Closed, 5, 30, 5),
            ticket(TicketStatus::Closed, 6, 30, 5),
            ticket(TicketStatus::Open, 1, 0, 0),
            // previous 24h window
            ticket(TicketStatus::Resolved, 30, 60, 5),
            ticket(TicketStatus::Resolved, 40, 60, 5),
            // outside both
            ticket(TicketStatus::Resolved, 60, 10, 1),
        ];
        let metrics = dashboard_metrics(&tickets, TimeRange::Last24Hours, now(), 4);

        assert_eq!(metrics.vibers_helped, MetricValue { value: 3, change: 50 });
        assert_eq!(metrics.avg_resolution_time, MetricValue { value: 30, change: 50 });
        assert_eq!(metrics.satisfaction_rate, MetricValue { value: 93, change: -7 });
        assert_eq!(metrics.active_experts, MetricValue { value: 4, change: 0 });
    }

    #[test]
    fn test_dashboard_metrics_without_history() {
        let tickets = vec![ticket(TicketStatus::Closed, 1, 45, 3)];
        let metrics = dashboard_metrics(&tickets, TimeRange::Last7Days, now(), 0);

        assert_eq!(metrics.vibers_helped, MetricValue { value: 1, change: 100 });
        assert_eq!(metrics.avg_resolution_time, MetricValue { value: 45, change: -100 });
        assert_eq!(metrics.satisfaction_rate, MetricValue { value: 60, change: 100 });
    }
}
