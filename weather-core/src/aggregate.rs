//! Reduce 3-hour forecast samples to one entry per day.

use chrono::{DateTime, FixedOffset, NaiveDate};

use crate::model::{ForecastDay, ForecastSeries, IconCategory, TODAY_LABEL};

/// One sub-daily forecast data point.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSample {
    pub timestamp: i64,
    pub temperature_c: f64,
    pub icon_category: IconCategory,
    pub description: String,
}

/// Label for a point in time as seen from `offset`: `"Today"` on `today`, else the short weekday.
///
/// Returns `None` for timestamps chrono cannot represent.
pub fn day_label(timestamp: i64, today: NaiveDate, offset: FixedOffset) -> Option<String> {
    let local = DateTime::from_timestamp(timestamp, 0)?.with_timezone(&offset);

    if local.date_naive() == today {
        Some(TODAY_LABEL.to_string())
    } else {
        Some(local.format("%a").to_string())
    }
}

/// Keep the first sample seen for each day label, up to five labels, in input order.
///
/// Labels are weekday names, so two calendar days a week apart share a key; with
/// the provider's five-day window this never happens.
pub fn aggregate(samples: &[ForecastSample], today: NaiveDate, offset: FixedOffset) -> ForecastSeries {
    let mut series = ForecastSeries::new();

    for sample in samples {
        if series.is_full() {
            break;
        }

        let Some(label) = day_label(sample.timestamp, today, offset) else {
            tracing::debug!(timestamp = sample.timestamp, "skipping sample with out-of-range timestamp");
            continue;
        };

        series.try_push(ForecastDay {
            label,
            temperature_c: sample.temperature_c,
            icon_category: sample.icon_category,
            description: sample.description.clone(),
        });
    }

    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    const THREE_HOURS: i64 = 3 * 60 * 60;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).expect("zero offset")
    }

    /// `count` samples every 3 hours starting at `start`, temperature equal to the index.
    fn samples_from(start: i64, count: usize) -> Vec<ForecastSample> {
        (0..count)
            .map(|i| ForecastSample {
                timestamp: start + i as i64 * THREE_HOURS,
                temperature_c: i as f64,
                icon_category: IconCategory::Cloudy,
                description: format!("sample {i}"),
            })
            .collect()
    }

    #[test]
    fn forty_samples_over_five_days_keep_first_of_each_day() {
        // Monday 2024-01-01 00:00 UTC, 40 samples end on Friday 21:00.
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap().timestamp();
        let samples = samples_from(start, 40);
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        let series = aggregate(&samples, today, utc());

        let labels: Vec<_> = series.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, ["Today", "Tue", "Wed", "Thu", "Fri"]);

        // Eight samples per day, so each day's earliest is every eighth index.
        for (day, expected_index) in series.iter().zip([0, 8, 16, 24, 32]) {
            assert_eq!(day.temperature_c, expected_index as f64);
            assert_eq!(day.description, format!("sample {expected_index}"));
        }
    }

    #[test]
    fn seven_distinct_days_truncate_to_five_in_first_seen_order() {
        // Starts mid-afternoon so the first day is partial.
        let start = Utc.with_ymd_and_hms(2024, 1, 3, 15, 0, 0).unwrap().timestamp();
        let samples = samples_from(start, 7 * 8);
        let today = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();

        let series = aggregate(&samples, today, utc());

        assert_eq!(series.len(), 5);
        let labels: Vec<_> = series.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, ["Today", "Thu", "Fri", "Sat", "Sun"]);
        // 15:00, 18:00, 21:00 belong to today; Thursday starts at index 3.
        assert_eq!(series.days()[1].temperature_c, 3.0);
    }

    #[test]
    fn query_day_not_in_window_uses_weekday_names_only() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap().timestamp();
        let samples = samples_from(start, 16);
        let today = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();

        let series = aggregate(&samples, today, utc());

        let labels: Vec<_> = series.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, ["Mon", "Tue"]);
    }

    #[test]
    fn offset_shifts_day_boundaries() {
        // 2024-01-01 22:00 UTC is already Tuesday in UTC+3.
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 22, 0, 0).unwrap().timestamp();
        let plus_three = FixedOffset::east_opt(3 * 3600).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        assert_eq!(day_label(ts, today, plus_three).as_deref(), Some("Tue"));
        assert_eq!(day_label(ts, today, utc()).as_deref(), Some("Today"));
    }

    #[test]
    fn empty_input_gives_empty_series() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(aggregate(&[], today, utc()).is_empty());
    }
}
