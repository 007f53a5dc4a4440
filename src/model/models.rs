use std::fmt;
use std::ops::Range;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/**
 * Cities a client can be registered in.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum City {
    Moscow,
    SaintPetersburg,
    Kazan,
    Volgograd,
}

impl City {
    pub const ALL: [City; 4] = [City::Moscow, City::SaintPetersburg, City::Kazan, City::Volgograd];
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            City::Moscow => "Moscow",
            City::SaintPetersburg => "Saint Petersburg",
            City::Kazan => "Kazan",
            City::Volgograd => "Volgograd",
        };
        write!(f, "{name}")
    }
}

/**
 * Categories of usage events a client can produce.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Call,
    Sms,
    Internet,
}

impl EventKind {
    /**
     * Returns the half-open interval the event amount is drawn from.
     * Call amounts are durations, sms amounts are message counts and
     * internet amounts are traffic volumes.
     */
    pub fn amount_range(self) -> Range<u32> {
        match self {
            EventKind::Call => 1..5,
            EventKind::Sms => 1..3,
            EventKind::Internet => 1..200,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            EventKind::Call => "call",
            EventKind::Sms => "sms",
            EventKind::Internet => "internet",
        };
        write!(f, "{name}")
    }
}

/**
 * A synthetic client. Immutable after generation.
 */
#[derive(Debug, Clone, Serialize)]
pub struct Client {
    pub id: u64,
    pub balance: f64,
    pub created_at_date: NaiveDate,
    pub age: u8,
    pub city: City,
    pub last_active_datetime: NaiveDateTime,
    pub current_tariff: u8,
}

/**
 * A single usage event belonging to exactly one client.
 */
#[derive(Debug, Clone, Serialize)]
pub struct UsageEvent {
    pub id: u64,
    pub timestamp: NaiveDateTime,
    pub timestamp_date: NaiveDate,
    pub client_id: u64,
    pub kind: EventKind,
    pub amount: u32,
}

/**
 * One aggregated (date, client) summary row with per-event-type totals.
 */
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub client_id: u64,
    pub date: NaiveDate,
    pub call: u64,
    pub sms: u64,
    pub internet: u64,
}
