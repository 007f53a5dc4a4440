use chrono::{NaiveDateTime, TimeDelta};
use rand::Rng;

use crate::model::apperror::{ApplicationError, ErrorType};

/**
 * Draws a timestamp uniformly from the whole seconds in `[start, end)`.
 *
 * The interval must span at least one whole second; a reversed or empty
 * interval is a precondition violation and fails immediately.
 *
 * # Arguments
 * `start`: Lower bound, inclusive.
 * `end`: Upper bound, exclusive.
 * `rng`: Random source to draw from.
 *
 * # Returns
 * A Result containing the drawn timestamp or an `ApplicationError`.
 */
pub fn random_datetime<R: Rng>(start: NaiveDateTime, end: NaiveDateTime, rng: &mut R) -> Result<NaiveDateTime, ApplicationError> {
    let total_seconds = (end - start).num_seconds();
    if total_seconds <= 0 {
        return Err(ApplicationError::new(ErrorType::InvalidInterval, format!("Interval [{start}, {end}) contains no whole second to draw from")));
    }
    let offset = rng.gen_range(0..total_seconds);
    Ok(start + TimeDelta::seconds(offset))
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    #[test]
    fn test_draws_stay_inside_interval_and_cover_it_uniformly() {
        let start = datetime("2020-01-01T00:00:00");
        let end = datetime("2020-01-02T00:00:00");
        let mut rng = StdRng::seed_from_u64(7);
        // Quarter-day buckets, 2500 expected per bucket over 10000 draws.
        let mut buckets = [0u32; 4];
        for _ in 0..10_000 {
            let drawn = random_datetime(start, end, &mut rng).unwrap();
            assert!(drawn >= start);
            assert!(drawn < end);
            let offset = (drawn - start).num_seconds();
            buckets[(offset / 21_600) as usize] += 1;
        }
        for count in buckets {
            assert!((2300..=2700).contains(&count), "bucket count {count} outside uniformity tolerance");
        }
    }

    #[test]
    fn test_single_second_interval_returns_start() {
        let start = datetime("2020-01-01T00:00:00");
        let end = datetime("2020-01-01T00:00:01");
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(random_datetime(start, end, &mut rng).unwrap(), start);
    }

    #[test]
    fn test_reversed_interval_fails_fast() {
        let start = datetime("2020-01-02T00:00:00");
        let end = datetime("2020-01-01T00:00:00");
        let mut rng = StdRng::seed_from_u64(1);
        let err = random_datetime(start, end, &mut rng).unwrap_err();
        assert_eq!(err.error_type, ErrorType::InvalidInterval);
    }

    #[test]
    fn test_empty_interval_fails_fast() {
        let start = datetime("2020-01-01T00:00:00");
        let mut rng = StdRng::seed_from_u64(1);
        let err = random_datetime(start, start, &mut rng).unwrap_err();
        assert_eq!(err.error_type, ErrorType::InvalidInterval);
    }
}
