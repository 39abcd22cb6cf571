//! Reduction of the 5-day/3-hour forecast feed to one reading per day.

use chrono::{Local, NaiveDate, TimeZone, Timelike};

use crate::model::ForecastSample;

/// Maximum number of days in the reduced forecast.
pub const MAX_DAYS: usize = 5;

/// Collapse a raw forecast feed to one representative sample per calendar
/// day, capped at [`MAX_DAYS`] entries.
///
/// Days are keyed by the sample's UTC calendar date and appear in
/// first-seen order. Within a day, the sample whose local hour is closest
/// to 12:00 wins; on a tie the earlier-encountered sample is kept. The
/// "local" in the hour comparison is the viewer's timezone, matching the
/// calendar-day grouping only when the viewer is on UTC.
pub fn reduce_daily(samples: Vec<ForecastSample>) -> Vec<ForecastSample> {
    reduce_daily_in(samples, &Local)
}

/// [`reduce_daily`] with an explicit timezone for the closest-to-noon
/// comparison. Grouping stays on the UTC calendar date regardless.
pub fn reduce_daily_in<Tz: TimeZone>(samples: Vec<ForecastSample>, tz: &Tz) -> Vec<ForecastSample> {
    let hour_distance =
        |sample: &ForecastSample| (sample.timestamp.with_timezone(tz).hour() as i32 - 12).abs();

    let mut selected: Vec<(NaiveDate, ForecastSample)> = Vec::new();

    for sample in samples {
        let day = sample.timestamp.date_naive();

        match selected.iter_mut().find(|(d, _)| *d == day) {
            Some((_, current)) => {
                if hour_distance(&sample) < hour_distance(current) {
                    *current = sample;
                }
            }
            None => selected.push((day, sample)),
        }
    }

    selected.truncate(MAX_DAYS);
    selected.into_iter().map(|(_, sample)| sample).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset, Utc};

    fn sample_at(day: u32, hour: u32) -> ForecastSample {
        let timestamp: DateTime<Utc> = Utc
            .with_ymd_and_hms(2026, 8, day, hour, 0, 0)
            .single()
            .expect("valid timestamp");

        ForecastSample {
            timestamp,
            temperature_k: 290.0,
            condition_main: "Clouds".to_string(),
            condition_description: "scattered clouds".to_string(),
            icon_code: "03d".to_string(),
        }
    }

    #[test]
    fn empty_input_reduces_to_empty() {
        assert!(reduce_daily_in(vec![], &Utc).is_empty());
    }

    #[test]
    fn picks_sample_closest_to_noon() {
        let samples = vec![
            sample_at(10, 3),
            sample_at(10, 9),
            sample_at(10, 12),
            sample_at(10, 15),
            sample_at(10, 21),
        ];

        let reduced = reduce_daily_in(samples, &Utc);

        assert_eq!(reduced.len(), 1);
        assert_eq!(reduced[0].timestamp.hour(), 12);
    }

    #[test]
    fn noon_tie_keeps_first_seen() {
        let samples = vec![sample_at(10, 11), sample_at(10, 13)];

        let reduced = reduce_daily_in(samples, &Utc);

        assert_eq!(reduced.len(), 1);
        assert_eq!(reduced[0].timestamp.hour(), 11);
    }

    #[test]
    fn seven_days_truncate_to_five_in_day_order() {
        let samples: Vec<ForecastSample> =
            (10..17).flat_map(|day| vec![sample_at(day, 9), sample_at(day, 12)]).collect();

        let reduced = reduce_daily_in(samples, &Utc);

        assert_eq!(reduced.len(), MAX_DAYS);
        let first_day = NaiveDate::from_ymd_opt(2026, 8, 10).expect("valid date");
        for (offset, sample) in reduced.iter().enumerate() {
            assert_eq!(sample.timestamp.date_naive(), first_day + chrono::Days::new(offset as u64));
            assert_eq!(sample.timestamp.hour(), 12);
        }
    }

    #[test]
    fn noon_comparison_follows_the_given_timezone() {
        // At UTC+3, the 09:00 UTC sample is local noon and beats 12:00 UTC.
        let tz = FixedOffset::east_opt(3 * 3600).expect("valid offset");
        let samples = vec![sample_at(10, 9), sample_at(10, 12)];

        let reduced = reduce_daily_in(samples, &tz);

        assert_eq!(reduced.len(), 1);
        assert_eq!(reduced[0].timestamp.hour(), 9);
    }

    #[test]
    fn grouping_stays_on_utc_dates() {
        // 23:00 and 01:00 the next day are distinct groups even at UTC+3,
        // where both fall on the same local date.
        let tz = FixedOffset::east_opt(3 * 3600).expect("valid offset");
        let samples = vec![sample_at(10, 23), sample_at(11, 1)];

        let reduced = reduce_daily_in(samples, &tz);

        assert_eq!(reduced.len(), 2);
    }
}
