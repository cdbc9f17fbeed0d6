//! Timezone-aware day boundaries.
//!
//! "Days remaining" comparisons must not flicker when a run happens just
//! before midnight, across a daylight-saving shift, or with sub-second
//! noise between two clock reads. Everything here therefore reduces an
//! instant to the civil date a timezone's wall clock shows and compares
//! whole dates, never raw durations.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// The civil date the given timezone's wall clock shows at `instant`.
pub fn civil_date_at(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Whole-day difference `a - b` as the given timezone's wall clock sees it.
///
/// Both instants are reduced to civil dates first, so the time-of-day of
/// either never contributes: two instants on the same wall-clock day differ
/// by zero days no matter how far apart within the day they are.
pub fn day_difference(a: DateTime<Utc>, b: DateTime<Utc>, tz: Tz) -> i64 {
    (civil_date_at(a, tz) - civil_date_at(b, tz)).num_days()
}

/// Re-anchor a civil date and wall-clock time in `tz` to an instant.
///
/// An ambiguous wall-clock time (clocks rolled back) resolves to the
/// earlier instant; a skipped time (clocks rolled forward) slides ahead by
/// an hour to the first wall-clock time that exists.
pub fn instant_at(tz: Tz, date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    let naive = date.and_time(time);
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(first, _) => first.with_timezone(&Utc),
        LocalResult::None => match tz.from_local_datetime(&(naive + Duration::hours(1))) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
            LocalResult::None => Utc.from_utc_datetime(&naive),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::New_York;
    use chrono_tz::Asia::Shanghai;
    use chrono_tz::UTC;

    fn utc(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn test_civil_date_follows_the_wall_clock() {
        // 2024-03-01T23:30Z is already March 2nd in Shanghai (UTC+8)
        let instant = utc("2024-03-01T23:30:00Z");
        assert_eq!(
            civil_date_at(instant, UTC),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert_eq!(
            civil_date_at(instant, Shanghai),
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()
        );
    }

    #[test]
    fn test_day_difference_ignores_time_of_day() {
        let late = utc("2024-06-10T23:59:00Z");
        let early = utc("2024-06-10T00:01:00Z");
        assert_eq!(day_difference(late, early, UTC), 0);

        let next = utc("2024-06-11T00:01:00Z");
        assert_eq!(day_difference(next, late, UTC), 1);
        assert_eq!(day_difference(late, next, UTC), -1);
    }

    #[test]
    fn test_day_difference_across_dst_shift() {
        // US spring-forward was 2024-03-10; the lost hour must not shave a
        // day off the count
        let before = utc("2024-03-09T17:00:00Z"); // noon New York
        let after = utc("2024-03-11T16:00:00Z"); // noon New York, post-shift
        assert_eq!(day_difference(after, before, New_York), 2);
    }

    #[test]
    fn test_instant_at_round_trips_to_the_same_civil_date() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let time = NaiveTime::from_hms_opt(9, 30, 0).unwrap();
        let instant = instant_at(Shanghai, date, time);
        assert_eq!(civil_date_at(instant, Shanghai), date);
    }

    #[test]
    fn test_instant_at_handles_skipped_wall_clock_time() {
        // 02:30 did not exist in New York on 2024-03-10
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let time = NaiveTime::from_hms_opt(2, 30, 0).unwrap();
        let instant = instant_at(New_York, date, time);
        assert_eq!(civil_date_at(instant, New_York), date);
    }

    #[test]
    fn test_instant_at_prefers_earlier_ambiguous_time() {
        // 01:30 occurred twice in New York on 2024-11-03
        let date = NaiveDate::from_ymd_opt(2024, 11, 3).unwrap();
        let time = NaiveTime::from_hms_opt(1, 30, 0).unwrap();
        let instant = instant_at(New_York, date, time);
        assert_eq!(instant, utc("2024-11-03T05:30:00Z"));
    }
}
