use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{debug, instrument};

use crate::model::models::{EventKind, ReportRow, UsageEvent};

/**
 * Per-type amount totals for one (date, client) pair.
 */
#[derive(Default)]
struct DailyTotals {
    call: u64,
    sms: u64,
    internet: u64,
}

/**
 * Builds the per-day, per-client usage report from raw events.
 */
pub struct ReportService {}

impl ReportService {
    /**
     * Creates a new instance of `ReportService`.
     *
     * # Returns
     * A new instance of `ReportService`.
     */
    pub fn new() -> Self {
        ReportService {}
    }

    /**
     * Aggregates events into one row per distinct (date, client) pair,
     * summing amounts per event kind with absent kinds defaulting to 0.
     * Rows are ordered by ascending date, then ascending client id. Pairs
     * without any event do not appear; an empty input yields an empty
     * report.
     *
     * # Arguments
     * `events`: The full events table.
     *
     * # Returns
     * The aggregated report rows.
     */
    #[instrument(skip(self, events))]
    pub fn build_report(&self, events: &[UsageEvent]) -> Vec<ReportRow> {
        let mut totals: BTreeMap<(NaiveDate, u64), DailyTotals> = BTreeMap::new();
        for event in events {
            let entry = totals.entry((event.timestamp_date, event.client_id)).or_default();
            let amount = u64::from(event.amount);
            match event.kind {
                EventKind::Call => entry.call += amount,
                EventKind::Sms => entry.sms += amount,
                EventKind::Internet => entry.internet += amount,
            }
        }
        debug!("Aggregated {} events into {} report rows", events.len(), totals.len());
        totals
            .into_iter()
            .map(|((date, client_id), daily)| ReportRow { client_id, date, call: daily.call, sms: daily.sms, internet: daily.internet })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use chrono::NaiveDateTime;

    use super::*;

    fn event(id: u64, date: &str, client_id: u64, kind: EventKind, amount: u32) -> UsageEvent {
        let timestamp = NaiveDateTime::parse_from_str(&format!("{date}T10:00:00"), "%Y-%m-%dT%H:%M:%S").unwrap();
        UsageEvent { id, timestamp, timestamp_date: timestamp.date(), client_id, kind, amount }
    }

    #[test]
    fn test_sums_per_kind_with_zero_defaults() {
        let service = ReportService::new();
        let events = vec![
            event(1, "2021-01-01", 1, EventKind::Call, 3),
            event(2, "2021-01-01", 1, EventKind::Call, 2),
            event(3, "2021-01-01", 1, EventKind::Sms, 1),
        ];
        let report = service.build_report(&events);
        assert_eq!(report.len(), 1);
        assert_eq!(report[0], ReportRow { client_id: 1, date: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(), call: 5, sms: 1, internet: 0 });
    }

    #[test]
    fn test_empty_events_yield_empty_report() {
        let service = ReportService::new();
        assert!(service.build_report(&[]).is_empty());
    }

    #[test]
    fn test_disjoint_clients_produce_disjoint_rows() {
        let service = ReportService::new();
        let events = vec![
            event(1, "2021-03-01", 1, EventKind::Internet, 100),
            event(2, "2021-04-01", 2, EventKind::Sms, 2),
        ];
        let report = service.build_report(&events);
        assert_eq!(report.len(), 2);
        assert_eq!(report[0], ReportRow { client_id: 1, date: NaiveDate::from_ymd_opt(2021, 3, 1).unwrap(), call: 0, sms: 0, internet: 100 });
        assert_eq!(report[1], ReportRow { client_id: 2, date: NaiveDate::from_ymd_opt(2021, 4, 1).unwrap(), call: 0, sms: 2, internet: 0 });
    }

    #[test]
    fn test_rows_ordered_by_date_then_client() {
        let service = ReportService::new();
        let events = vec![
            event(1, "2021-02-01", 2, EventKind::Call, 1),
            event(2, "2021-01-15", 3, EventKind::Call, 1),
            event(3, "2021-02-01", 1, EventKind::Call, 1),
        ];
        let report = service.build_report(&events);
        let keys: Vec<(NaiveDate, u64)> = report.iter().map(|row| (row.date, row.client_id)).collect();
        assert_eq!(
            keys,
            vec![
                (NaiveDate::from_ymd_opt(2021, 1, 15).unwrap(), 3),
                (NaiveDate::from_ymd_opt(2021, 2, 1).unwrap(), 1),
                (NaiveDate::from_ymd_opt(2021, 2, 1).unwrap(), 2),
            ]
        );
    }

    #[test]
    fn test_aggregation_is_idempotent_and_order_independent() {
        let service = ReportService::new();
        let mut events = vec![
            event(1, "2021-01-01", 1, EventKind::Call, 3),
            event(2, "2021-01-02", 1, EventKind::Sms, 1),
            event(3, "2021-01-01", 2, EventKind::Internet, 50),
            event(4, "2021-01-01", 1, EventKind::Call, 1),
        ];
        let first = service.build_report(&events);
        let second = service.build_report(&events);
        assert_eq!(first, second);
        events.reverse();
        assert_eq!(service.build_report(&events), first);
    }
}
