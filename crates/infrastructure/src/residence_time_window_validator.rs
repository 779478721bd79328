use async_trait::async_trait;
use chrono::{DateTime, MappedLocalTime, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use comensales_application::TimeWindowValidator;
use comensales_core::{AppError, AppResult};
use comensales_domain::TimeWindowStatus;

use crate::{Clock, SystemClock};

/// Checks grant windows against the current time in the residence timezone.
///
/// A bound is a calendar date (`2026-10-14`), a local date-time
/// (`2026-10-14T08:30:00`) or an RFC 3339 timestamp. Date bounds cover the
/// whole local day, so `2026-10-01..2026-10-31` includes the 31st.
#[derive(Debug, Clone, Default)]
pub struct ResidenceTimeWindowValidator<C = SystemClock> {
    clock: C,
}

impl<C: Clock> ResidenceTimeWindowValidator<C> {
    /// Creates a validator reading the time from `clock`.
    #[must_use]
    pub fn new(clock: C) -> Self {
        Self { clock }
    }
}

#[async_trait]
impl<C: Clock> TimeWindowValidator for ResidenceTimeWindowValidator<C> {
    async fn check_window(
        &self,
        starts_on: Option<&str>,
        ends_on: Option<&str>,
        time_zone: &str,
    ) -> AppResult<TimeWindowStatus> {
        window_status_at(self.clock.now(), starts_on, ends_on, time_zone)
    }
}

/// Evaluates a window against `now`. Unknown timezones are validation errors.
pub fn window_status_at(
    now: DateTime<Utc>,
    starts_on: Option<&str>,
    ends_on: Option<&str>,
    time_zone: &str,
) -> AppResult<TimeWindowStatus> {
    let zone: Tz = time_zone.parse().map_err(|error| {
        AppError::Validation(format!("unknown residence time zone '{time_zone}': {error}"))
    })?;

    let (Some(starts_on), Some(ends_on)) = (starts_on, ends_on) else {
        return Ok(TimeWindowStatus::MalformedDate);
    };
    let (Some(start), Some(end)) = (
        parse_bound(starts_on, Edge::Start, zone),
        parse_bound(ends_on, Edge::End, zone),
    ) else {
        return Ok(TimeWindowStatus::MalformedDate);
    };

    if !end.admits(start.at) {
        return Ok(TimeWindowStatus::InvalidRange);
    }

    if now >= start.at && end.admits(now) {
        Ok(TimeWindowStatus::Within)
    } else {
        Ok(TimeWindowStatus::Outside)
    }
}

/// Longest run of skipped wall-clock minutes searched past a DST gap.
const MAX_GAP_MINUTES: i64 = 24 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Start,
    End,
}

/// A window bound as an instant.
#[derive(Debug, Clone, Copy)]
struct Bound {
    at: DateTime<Utc>,
    inclusive: bool,
}

impl Bound {
    /// Returns whether `moment` is not past this end bound.
    fn admits(&self, moment: DateTime<Utc>) -> bool {
        if self.inclusive {
            moment <= self.at
        } else {
            moment < self.at
        }
    }
}

fn parse_bound(value: &str, edge: Edge, zone: Tz) -> Option<Bound> {
    let value = value.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(Bound {
            at: instant.with_timezone(&Utc),
            inclusive: true,
        });
    }

    if let Ok(local) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(Bound {
            at: resolve_local(local, edge, zone)?,
            inclusive: true,
        });
    }

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
    match edge {
        Edge::Start => Some(Bound {
            at: resolve_local(date.and_hms_opt(0, 0, 0)?, edge, zone)?,
            inclusive: true,
        }),
        Edge::End => Some(Bound {
            at: resolve_local(date.succ_opt()?.and_hms_opt(0, 0, 0)?, edge, zone)?,
            inclusive: false,
        }),
    }
}

/// Turns a residence wall-clock time into an instant.
///
/// A repeated wall-clock time keeps the window narrow: a start takes its
/// later occurrence and an end its earlier one. A skipped wall-clock time
/// moves forward to the first minute that exists.
fn resolve_local(local: NaiveDateTime, edge: Edge, zone: Tz) -> Option<DateTime<Utc>> {
    (0..=MAX_GAP_MINUTES).find_map(|minutes| {
        let candidate = local.checked_add_signed(TimeDelta::try_minutes(minutes)?)?;
        let resolved = match zone.from_local_datetime(&candidate) {
            MappedLocalTime::Single(at) => at,
            MappedLocalTime::Ambiguous(earlier, later) => match edge {
                Edge::Start => later,
                Edge::End => earlier,
            },
            MappedLocalTime::None => return None,
        };
        Some(resolved.with_timezone(&Utc))
    })
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use comensales_application::TimeWindowValidator;
    use comensales_domain::TimeWindowStatus;

    use super::{ResidenceTimeWindowValidator, window_status_at};
    use crate::FixedClock;

    fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
            .single()
            .unwrap_or_default()
    }

    #[test]
    fn date_window_includes_both_end_days() {
        let first_morning = window_status_at(
            utc(2026, 9, 30, 22, 30),
            Some("2026-10-01"),
            Some("2026-10-31"),
            "Europe/Madrid",
        );
        let last_evening = window_status_at(
            utc(2026, 10, 31, 22, 30),
            Some("2026-10-01"),
            Some("2026-10-31"),
            "Europe/Madrid",
        );

        assert_eq!(first_morning.ok(), Some(TimeWindowStatus::Within));
        assert_eq!(last_evening.ok(), Some(TimeWindowStatus::Within));
    }

    #[test]
    fn residence_zone_decides_the_calendar_day() {
        // 2026-11-01 01:30 in Madrid is still 2026-10-31 in Mexico City.
        let now = utc(2026, 11, 1, 0, 30);

        let madrid = window_status_at(now, Some("2026-10-01"), Some("2026-10-31"), "Europe/Madrid");
        let mexico = window_status_at(
            now,
            Some("2026-10-01"),
            Some("2026-10-31"),
            "America/Mexico_City",
        );

        assert_eq!(madrid.ok(), Some(TimeWindowStatus::Outside));
        assert_eq!(mexico.ok(), Some(TimeWindowStatus::Within));
    }

    #[test]
    fn elapsed_window_is_outside() {
        let status = window_status_at(
            utc(2026, 10, 14, 12, 0),
            Some("2025-01-01"),
            Some("2025-12-31"),
            "Europe/Madrid",
        );
        assert_eq!(status.ok(), Some(TimeWindowStatus::Outside));
    }

    #[test]
    fn future_window_is_outside() {
        let status = window_status_at(
            utc(2026, 10, 14, 12, 0),
            Some("2027-01-01"),
            Some("2027-01-31"),
            "Europe/Madrid",
        );
        assert_eq!(status.ok(), Some(TimeWindowStatus::Outside));
    }

    #[test]
    fn timestamp_bounds_are_compared_as_instants() {
        let inside = window_status_at(
            utc(2026, 10, 14, 9, 59),
            Some("2026-10-14T08:00:00Z"),
            Some("2026-10-14T10:00:00Z"),
            "Europe/Madrid",
        );
        let after = window_status_at(
            utc(2026, 10, 14, 10, 1),
            Some("2026-10-14T08:00:00Z"),
            Some("2026-10-14T10:00:00Z"),
            "Europe/Madrid",
        );

        assert_eq!(inside.ok(), Some(TimeWindowStatus::Within));
        assert_eq!(after.ok(), Some(TimeWindowStatus::Outside));
    }

    #[test]
    fn local_date_time_bounds_use_residence_time() {
        // 06:30 UTC is 08:30 in Madrid during summer time.
        let status = window_status_at(
            utc(2026, 7, 1, 6, 30),
            Some("2026-07-01T08:00:00"),
            Some("2026-07-01T09:00:00"),
            "Europe/Madrid",
        );
        assert_eq!(status.ok(), Some(TimeWindowStatus::Within));
    }

    #[test]
    fn timestamp_end_stays_closed_through_the_repeated_autumn_hour() {
        // Madrid falls back from 03:00 CEST to 02:00 CET at 01:00 UTC on
        // 2026-10-25. The end is 02:40 CEST, "now" is 02:10 CET.
        let status = window_status_at(
            utc(2026, 10, 25, 1, 10),
            Some("2026-10-24"),
            Some("2026-10-25T00:40:00Z"),
            "Europe/Madrid",
        );
        assert_eq!(status.ok(), Some(TimeWindowStatus::Outside));
    }

    #[test]
    fn repeated_local_end_takes_its_earlier_occurrence() {
        // 02:30 happens at 00:30 UTC and again at 01:30 UTC.
        let before_first = window_status_at(
            utc(2026, 10, 25, 0, 20),
            Some("2026-10-24"),
            Some("2026-10-25T02:30:00"),
            "Europe/Madrid",
        );
        let between = window_status_at(
            utc(2026, 10, 25, 1, 10),
            Some("2026-10-24"),
            Some("2026-10-25T02:30:00"),
            "Europe/Madrid",
        );

        assert_eq!(before_first.ok(), Some(TimeWindowStatus::Within));
        assert_eq!(between.ok(), Some(TimeWindowStatus::Outside));
    }

    #[test]
    fn repeated_local_start_takes_its_later_occurrence() {
        let first_pass = window_status_at(
            utc(2026, 10, 25, 0, 45),
            Some("2026-10-25T02:30:00"),
            Some("2026-10-25"),
            "Europe/Madrid",
        );
        let second_pass = window_status_at(
            utc(2026, 10, 25, 1, 45),
            Some("2026-10-25T02:30:00"),
            Some("2026-10-25"),
            "Europe/Madrid",
        );

        assert_eq!(first_pass.ok(), Some(TimeWindowStatus::Outside));
        assert_eq!(second_pass.ok(), Some(TimeWindowStatus::Within));
    }

    #[test]
    fn skipped_local_start_moves_to_the_end_of_the_spring_gap() {
        // Madrid skips from 02:00 CET to 03:00 CEST at 01:00 UTC on 2026-03-29.
        let before_gap = window_status_at(
            utc(2026, 3, 29, 0, 59),
            Some("2026-03-29T02:30:00"),
            Some("2026-03-29"),
            "Europe/Madrid",
        );
        let after_gap = window_status_at(
            utc(2026, 3, 29, 1, 0),
            Some("2026-03-29T02:30:00"),
            Some("2026-03-29"),
            "Europe/Madrid",
        );

        assert_eq!(before_gap.ok(), Some(TimeWindowStatus::Outside));
        assert_eq!(after_gap.ok(), Some(TimeWindowStatus::Within));
    }

    #[test]
    fn offset_timestamps_are_compared_as_instants() {
        // 10:00-05:00 is 15:00 UTC and 17:00 in Madrid.
        let before = window_status_at(
            utc(2026, 10, 14, 14, 59),
            Some("2026-10-14T10:00:00-05:00"),
            Some("2026-10-14T18:00:00+02:00"),
            "Europe/Madrid",
        );
        let inside = window_status_at(
            utc(2026, 10, 14, 15, 30),
            Some("2026-10-14T10:00:00-05:00"),
            Some("2026-10-14T18:00:00+02:00"),
            "Europe/Madrid",
        );
        let after = window_status_at(
            utc(2026, 10, 14, 16, 1),
            Some("2026-10-14T10:00:00-05:00"),
            Some("2026-10-14T18:00:00+02:00"),
            "Europe/Madrid",
        );

        assert_eq!(before.ok(), Some(TimeWindowStatus::Outside));
        assert_eq!(inside.ok(), Some(TimeWindowStatus::Within));
        assert_eq!(after.ok(), Some(TimeWindowStatus::Outside));
    }

    #[test]
    fn reversed_window_is_invalid_range() {
        let status = window_status_at(
            utc(2026, 10, 14, 12, 0),
            Some("2026-10-31"),
            Some("2026-10-01"),
            "Europe/Madrid",
        );
        assert_eq!(status.ok(), Some(TimeWindowStatus::InvalidRange));
    }

    #[test]
    fn single_day_window_is_valid() {
        let status = window_status_at(
            utc(2026, 10, 14, 12, 0),
            Some("2026-10-14"),
            Some("2026-10-14"),
            "Europe/Madrid",
        );
        assert_eq!(status.ok(), Some(TimeWindowStatus::Within));
    }

    #[test]
    fn missing_or_garbled_bounds_are_malformed() {
        let now = utc(2026, 10, 14, 12, 0);

        let missing = window_status_at(now, None, Some("2026-10-31"), "Europe/Madrid");
        let garbled = window_status_at(
            now,
            Some("14/10/2026"),
            Some("2026-10-31"),
            "Europe/Madrid",
        );

        assert_eq!(missing.ok(), Some(TimeWindowStatus::MalformedDate));
        assert_eq!(garbled.ok(), Some(TimeWindowStatus::MalformedDate));
    }

    #[test]
    fn unknown_time_zone_is_an_error() {
        let status = window_status_at(
            utc(2026, 10, 14, 12, 0),
            Some("2026-10-01"),
            Some("2026-10-31"),
            "Mars/Olympus_Mons",
        );
        assert!(status.is_err());
    }

    #[tokio::test]
    async fn validator_reads_the_injected_clock() {
        let validator =
            ResidenceTimeWindowValidator::new(FixedClock::new(utc(2026, 10, 14, 12, 0)));

        let status = validator
            .check_window(Some("2026-10-01"), Some("2026-10-31"), "Europe/Madrid")
            .await;

        assert_eq!(status.ok(), Some(TimeWindowStatus::Within));
    }
}
