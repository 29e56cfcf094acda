//! Reduction of 3-hourly forecast samples to one summary per weekday.

use chrono::{Datelike, TimeZone, Weekday};
use serde::{Deserialize, Serialize};

use crate::icon::IconVariant;
use crate::types::ForecastSample;

/// Representative reading for one weekday
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub weekday: Weekday,
    pub temperature: f64,
    pub condition_code: i32,
    pub icon_code: String,
}

impl DailySummary {
    /// Short weekday label, e.g. `"Mon"`
    pub fn label(&self) -> String {
        self.weekday.to_string()
    }

    pub fn icon_variant(&self) -> IconVariant {
        IconVariant::from_condition_code(self.condition_code)
    }
}

/// Weekday-keyed summaries in first-seen order.
///
/// Holds at most one entry per weekday; an entry is never replaced once
/// inserted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyForecast {
    days: Vec<DailySummary>,
}

impl DailyForecast {
    /// Insert `summary` unless its weekday already has an entry.
    /// Returns whether it was inserted.
    pub fn insert_if_absent(&mut self, summary: DailySummary) -> bool {
        if self.get(summary.weekday).is_some() {
            return false;
        }
        self.days.push(summary);
        true
    }

    pub fn get(&self, weekday: Weekday) -> Option<&DailySummary> {
        self.days.iter().find(|d| d.weekday == weekday)
    }

    /// Lookup by label such as `"Tue"`
    pub fn get_label(&self, label: &str) -> Option<&DailySummary> {
        label.parse::<Weekday>().ok().and_then(|w| self.get(w))
    }

    pub fn iter(&self) -> impl Iterator<Item = &DailySummary> {
        self.days.iter()
    }

    pub fn labels(&self) -> Vec<String> {
        self.days.iter().map(DailySummary::label).collect()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl<'a> IntoIterator for &'a DailyForecast {
    type Item = &'a DailySummary;
    type IntoIter = std::slice::Iter<'a, DailySummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.days.iter()
    }
}

/// Fold `samples` (in provider order) into one summary per weekday, taking
/// the first sample seen for each weekday in `tz`.
///
/// Samples a week apart share a label, so only the earlier one is kept.
pub fn aggregate<Tz: TimeZone>(samples: &[ForecastSample], tz: &Tz) -> DailyForecast {
    let mut daily = DailyForecast::default();

    for sample in samples {
        let weekday = sample.timestamp.with_timezone(tz).weekday();
        let inserted = daily.insert_if_absent(DailySummary {
            weekday,
            temperature: sample.temperature,
            condition_code: sample.condition_code,
            icon_code: sample.icon_code.clone(),
        });

        if !inserted {
            tracing::trace!("Skipping later {} sample at {}", weekday, sample.timestamp);
        }
    }

    tracing::debug!(
        "Aggregated {} samples into {} days",
        samples.len(),
        daily.len()
    );
    daily
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset, Utc};

    /// 2024-01-01 is a Monday
    fn sample(day: u32, hour: u32, temperature: f64, condition_code: i32) -> ForecastSample {
        ForecastSample {
            timestamp: Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap(),
            temperature,
            condition_code,
            icon_code: format!("{condition_code}"),
        }
    }

    #[test]
    fn test_empty_samples_give_empty_forecast() {
        let daily = aggregate(&[], &Utc);
        assert!(daily.is_empty());
        assert_eq!(daily.len(), 0);
    }

    #[test]
    fn test_first_sample_of_day_wins() {
        let samples = [sample(1, 0, 10.0, 800), sample(1, 3, 15.0, 500)];
        let daily = aggregate(&samples, &Utc);

        assert_eq!(daily.len(), 1);
        assert_eq!(daily.get(Weekday::Mon).unwrap().temperature, 10.0);
    }

    #[test]
    fn test_two_day_scenario() {
        let samples = [
            sample(1, 0, 10.0, 800),
            sample(1, 3, 15.0, 500),
            sample(2, 0, 8.0, 600),
        ];
        let daily = aggregate(&samples, &Utc);

        assert_eq!(daily.labels(), vec!["Mon", "Tue"]);

        let mon = daily.get_label("Mon").unwrap();
        assert_eq!(mon.temperature, 10.0);
        assert_eq!(mon.icon_variant(), IconVariant::Clear);

        let tue = daily.get_label("Tue").unwrap();
        assert_eq!(tue.temperature, 8.0);
        assert_eq!(tue.icon_variant(), IconVariant::Snow);
    }

    #[test]
    fn test_five_day_response_yields_one_entry_per_day() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let samples: Vec<_> = (0..40)
            .map(|i| ForecastSample {
                timestamp: start + Duration::hours(3 * i),
                temperature: i as f64,
                condition_code: 801,
                icon_code: "02d".to_string(),
            })
            .collect();

        let daily = aggregate(&samples, &Utc);

        assert_eq!(daily.labels(), vec!["Mon", "Tue", "Wed", "Thu", "Fri"]);
        let temps: Vec<f64> = daily.iter().map(|d| d.temperature).collect();
        assert_eq!(temps, vec![0.0, 8.0, 16.0, 24.0, 32.0]);
    }

    #[test]
    fn test_same_weekday_next_week_collides() {
        // Mon 1st and Mon 8th share the "Mon" label; the later one is dropped.
        let samples = [
            sample(1, 12, 5.0, 800),
            sample(2, 12, 6.0, 800),
            sample(8, 12, 20.0, 211),
        ];
        let daily = aggregate(&samples, &Utc);

        assert_eq!(daily.len(), 2);
        let mon = daily.get(Weekday::Mon).unwrap();
        assert_eq!(mon.temperature, 5.0);
        assert_eq!(mon.icon_variant(), IconVariant::Clear);
    }

    #[test]
    fn test_weekday_uses_location_offset() {
        // 23:00 UTC Monday is already Tuesday at UTC+2.
        let samples = [sample(1, 23, 3.0, 600)];
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();

        assert_eq!(aggregate(&samples, &Utc).labels(), vec!["Mon"]);
        assert_eq!(aggregate(&samples, &plus_two).labels(), vec!["Tue"]);
    }

    #[test]
    fn test_insert_if_absent_reports_outcome() {
        let mut daily = DailyForecast::default();
        let summary = DailySummary {
            weekday: Weekday::Fri,
            temperature: 1.0,
            condition_code: 800,
            icon_code: "01d".to_string(),
        };
        assert!(daily.insert_if_absent(summary.clone()));
        assert!(!daily.insert_if_absent(DailySummary {
            temperature: 99.0,
            ..summary
        }));
        assert_eq!(daily.get(Weekday::Fri).unwrap().temperature, 1.0);
        assert!(daily.get_label("Sat").is_none());
        assert!(daily.get_label("not a day").is_none());
    }
}
