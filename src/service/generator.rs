use std::ops::Range;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use rand::Rng;
use tracing::{debug, instrument};

use crate::{
    model::{
        apperror::ApplicationError,
        models::{City, Client, EventKind, UsageEvent},
    },
    service::random::random_datetime,
};

/**
 * Account creation dates are drawn from a window of this many days
 * starting at the creation epoch.
 */
const CREATION_WINDOW_DAYS: i64 = 22 * 356;

/**
 * Range the per-client tick count is drawn from. Each tick yields between
 * zero and three events sharing one timestamp.
 */
const TICKS_PER_CLIENT: Range<u32> = 20..40;

/**
 * Inclusion thresholds per event kind. A kind is emitted for a tick when a
 * fresh uniform draw in [0, 1) exceeds its threshold, so call/sms/internet
 * land at roughly 80%/60%/50%.
 */
const INCLUSION_THRESHOLDS: [(EventKind, f64); 3] = [(EventKind::Call, 0.2), (EventKind::Sms, 0.4), (EventKind::Internet, 0.5)];

/**
 * Upper bound for balances, exclusive.
 */
const MAX_BALANCE: f64 = 500.0;

/**
 * Range client ages are drawn from.
 */
const AGE_RANGE: Range<u8> = 18..70;

/**
 * Range tariff plan identifiers are drawn from.
 */
const TARIFF_RANGE: Range<u8> = 0..5;

/**
 * An event as produced by the tick loop, before the final sequential id
 * has been assigned.
 */
struct RawEvent {
    timestamp: NaiveDateTime,
    timestamp_date: NaiveDate,
    client_id: u64,
    kind: EventKind,
    amount: u32,
}

/**
 * Generates synthetic clients and their usage events. All draws share one
 * generation instant so every produced timestamp is bounded by it.
 */
pub struct GeneratorService {
    /**
     * The generation instant. Upper bound for every generated timestamp.
     */
    now: NaiveDateTime,
}

impl GeneratorService {
    /**
     * Creates a new instance of `GeneratorService`.
     *
     * # Arguments
     * `now`: The generation instant used as the upper bound for all drawn timestamps.
     *
     * # Returns
     * A new instance of `GeneratorService`.
     */
    pub fn new(now: NaiveDateTime) -> Self {
        GeneratorService { now }
    }

    /**
     * Generates a sequence of synthetic clients with sequential ids
     * starting at 1.
     *
     * # Arguments
     * `count`: Number of clients to generate.
     * `rng`: Random source to draw from.
     *
     * # Returns
     * A Result containing the generated clients or an `ApplicationError`.
     */
    #[instrument(skip(self, rng))]
    pub fn generate_clients<R: Rng>(&self, count: u32, rng: &mut R) -> Result<Vec<Client>, ApplicationError> {
        let epoch = creation_epoch();
        let mut clients = Vec::with_capacity(count as usize);
        for id in 1..=u64::from(count) {
            let created_at = epoch + TimeDelta::days(rng.gen_range(0..CREATION_WINDOW_DAYS));
            let client = Client {
                id,
                balance: rng.r#gen::<f64>() * MAX_BALANCE,
                created_at_date: created_at.date(),
                age: rng.gen_range(AGE_RANGE),
                city: City::ALL[rng.gen_range(0..City::ALL.len())],
                last_active_datetime: random_datetime(created_at, self.now, rng)?,
                current_tariff: rng.gen_range(TARIFF_RANGE),
            };
            clients.push(client);
        }
        debug!("Generated {} clients", clients.len());
        Ok(clients)
    }

    /**
     * Generates usage events for every client and assigns final ids,
     * numbered sequentially from 1 in the order clients were processed
     * and, within a client, in tick and kind order.
     *
     * # Arguments
     * `clients`: The clients to generate events for.
     * `rng`: Random source to draw from.
     *
     * # Returns
     * A Result containing the generated events or an `ApplicationError`.
     */
    #[instrument(skip(self, clients, rng))]
    pub fn generate_events<R: Rng>(&self, clients: &[Client], rng: &mut R) -> Result<Vec<UsageEvent>, ApplicationError> {
        let mut raw_events = Vec::new();
        for client in clients {
            let min_datetime = client.created_at_date.and_time(chrono::NaiveTime::MIN);
            raw_events.extend(self.events_for_client(client.id, min_datetime, rng)?);
        }
        debug!("Generated {} events for {} clients", raw_events.len(), clients.len());
        Ok(raw_events
            .into_iter()
            .enumerate()
            .map(|(index, raw)| UsageEvent {
                id: index as u64 + 1,
                timestamp: raw.timestamp,
                timestamp_date: raw.timestamp_date,
                client_id: raw.client_id,
                kind: raw.kind,
                amount: raw.amount,
            })
            .collect())
    }

    /**
     * Runs the tick loop for one client. Every tick draws one shared
     * timestamp in `[min_datetime, now)` and then decides inclusion of
     * each candidate kind independently.
     *
     * # Arguments
     * `client_id`: Identifier of the owning client.
     * `min_datetime`: Lower bound for drawn timestamps, the client's creation instant.
     * `rng`: Random source to draw from.
     *
     * # Returns
     * A Result containing the raw events in tick and kind order or an `ApplicationError`.
     */
    fn events_for_client<R: Rng>(&self, client_id: u64, min_datetime: NaiveDateTime, rng: &mut R) -> Result<Vec<RawEvent>, ApplicationError> {
        let mut events = Vec::new();
        let ticks = rng.gen_range(TICKS_PER_CLIENT);
        for _ in 0..ticks {
            let timestamp = random_datetime(min_datetime, self.now, rng)?;
            let timestamp_date = timestamp.date();
            for (kind, threshold) in INCLUSION_THRESHOLDS {
                if rng.r#gen::<f64>() > threshold {
                    events.push(RawEvent { timestamp, timestamp_date, client_id, kind, amount: rng.gen_range(kind.amount_range()) });
                }
            }
        }
        Ok(events)
    }
}

/**
 * Returns the earliest possible account creation instant.
 */
fn creation_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default().and_time(chrono::NaiveTime::MIN)
}
