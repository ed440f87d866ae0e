//! Timestamp generators.

use chrono::{DateTime, Utc};
use rand::Rng;

/// Pick a timestamp uniformly in `[start, end]` with second precision.
///
/// An empty or inverted window yields `start`.
pub fn timestamp_between<R: Rng + ?Sized>(
    rng: &mut R,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> DateTime<Utc> {
    let start_ts = start.timestamp();
    let end_ts = end.timestamp();

    if start_ts >= end_ts {
        return start;
    }

    let random_ts = rng.random_range(start_ts..=end_ts);
    DateTime::from_timestamp(random_ts, 0).unwrap_or(start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_timestamp_between_stays_in_window() {
        let mut rng = StdRng::seed_from_u64(42);
        let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap();

        for _ in 0..200 {
            let dt = timestamp_between(&mut rng, start, end);
            assert!(dt >= start && dt <= end);
            assert!(dt.year() >= 2020 && dt.year() <= 2024);
        }
    }

    #[test]
    fn test_inverted_window_returns_start() {
        let mut rng = StdRng::seed_from_u64(42);
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();

        assert_eq!(timestamp_between(&mut rng, start, end), start);
        assert_eq!(timestamp_between(&mut rng, start, start), start);
    }

    #[test]
    fn test_deterministic_generation() {
        let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap();
        let mut rng1 = StdRng::seed_from_u64(7);
        let mut rng2 = StdRng::seed_from_u64(7);

        assert_eq!(
            timestamp_between(&mut rng1, start, end),
            timestamp_between(&mut rng2, start, end)
        );
    }
}
