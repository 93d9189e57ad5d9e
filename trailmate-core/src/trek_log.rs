//! Trek history.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrekEntry {
    pub name: String,
    pub date: NaiveDate,
    pub duration_hours: f64,
    pub distance_km: f64,
    pub elevation_m: u32,
    #[serde(default)]
    pub weather: String,
    #[serde(default)]
    pub notes: String,
}

impl TrekEntry {
    pub fn new(name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            date,
            duration_hours: 0.0,
            distance_km: 0.0,
            elevation_m: 0,
            weather: String::new(),
            notes: String::new(),
        }
    }

    pub fn with_duration(mut self, hours: f64) -> Self {
        self.duration_hours = hours;
        self
    }

    pub fn with_distance(mut self, km: f64) -> Self {
        self.distance_km = km;
        self
    }

    pub fn with_elevation(mut self, meters: u32) -> Self {
        self.elevation_m = meters;
        self
    }

    /// Saturday of the weekend this trek falls on, if it was a weekend trek.
    pub fn weekend(&self) -> Option<NaiveDate> {
        match self.date.weekday() {
            Weekday::Sat => Some(self.date),
            Weekday::Sun => Some(self.date - Duration::days(1)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrekLog {
    pub entries: Vec<TrekEntry>,
}

impl TrekLog {
    pub fn new(entries: Vec<TrekEntry>) -> Self {
        Self { entries }
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn total_distance_km(&self) -> f64 {
        self.entries.iter().map(|e| e.distance_km.max(0.0)).sum()
    }

    pub fn max_elevation_m(&self) -> u32 {
        self.entries.iter().map(|e| e.elevation_m).max().unwrap_or(0)
    }

    pub fn longest_duration_hours(&self) -> f64 {
        self.entries
            .iter()
            .map(|e| e.duration_hours)
            .fold(0.0, f64::max)
    }

    /// Longest run of consecutive weekends with at least one trek.
    pub fn weekend_streak(&self) -> u32 {
        let weekends: BTreeSet<NaiveDate> = self.entries.iter().filter_map(|e| e.weekend()).collect();

        let mut best = 0;
        let mut run = 0;
        let mut prev: Option<NaiveDate> = None;
        for w in weekends {
            run = match prev {
                Some(p) if w - p == Duration::days(7) => run + 1,
                _ => 1,
            };
            best = best.max(run);
            prev = Some(w);
        }
        best
    }

    /// Entries newest first.
    pub fn recent(&self) -> Vec<&TrekEntry> {
        let mut out: Vec<&TrekEntry> = self.entries.iter().collect();
        out.sort_by(|a, b| b.date.cmp(&a.date));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_totals() {
        let log = TrekLog::new(vec![
            TrekEntry::new("Mountain Trail", d(2023, 10, 1)).with_distance(12.0).with_elevation(800).with_duration(5.0),
            TrekEntry::new("Forest Path", d(2023, 9, 15)).with_distance(8.0).with_elevation(200).with_duration(3.0),
            TrekEntry::new("Lakeside Walk", d(2023, 8, 20)).with_distance(5.0).with_elevation(50).with_duration(2.0),
        ]);
        assert_eq!(log.count(), 3);
        assert_eq!(log.total_distance_km(), 25.0);
        assert_eq!(log.max_elevation_m(), 800);
        assert_eq!(log.longest_duration_hours(), 5.0);
        assert_eq!(log.recent()[0].name, "Mountain Trail");
    }

    #[test]
    fn test_weekend_mapping() {
        // 2024-06-01 is a Saturday
        assert_eq!(TrekEntry::new("a", d(2024, 6, 1)).weekend(), Some(d(2024, 6, 1)));
        assert_eq!(TrekEntry::new("b", d(2024, 6, 2)).weekend(), Some(d(2024, 6, 1)));
        assert_eq!(TrekEntry::new("c", d(2024, 6, 3)).weekend(), None);
    }

    #[test]
    fn test_weekend_streak() {
        let log = TrekLog::new(vec![
            TrekEntry::new("a", d(2024, 6, 1)),
            TrekEntry::new("b", d(2024, 6, 2)),
            TrekEntry::new("c", d(2024, 6, 9)),
            TrekEntry::new("d", d(2024, 6, 15)),
            // gap, then a single weekend
            TrekEntry::new("e", d(2024, 7, 6)),
            TrekEntry::new("weekday", d(2024, 7, 10)),
        ]);
        assert_eq!(log.weekend_streak(), 3);
        assert_eq!(TrekLog::default().weekend_streak(), 0);
    }
}
