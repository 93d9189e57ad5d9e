//! Trek log CSV import.
//!
//! Expected header (any column order, case-insensitive):
//!   name,date,duration,distance,elevation,weather,notes
//!
//! Numeric columns accept units ("5 hours", "12 km", "800 m"). Dates are
//! `YYYY-MM-DD` or `MM/DD/YYYY`. Rows without a name or a readable date are
//! skipped and reported.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use csv::StringRecord;
use std::io::Read;
use std::path::Path;
use tracing::warn;
use trailmate_core::{TrekEntry, TrekLog};

use crate::types::ImportReport;

struct Columns {
    name: usize,
    date: usize,
    duration: Option<usize>,
    distance: Option<usize>,
    elevation: Option<usize>,
    weather: Option<usize>,
    notes: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |names: &[&str]| {
            headers.iter().position(|h| {
                let h = h.trim().to_lowercase();
                names.iter().any(|n| h == *n)
            })
        };

        let Some(name) = find(&["name", "trail", "trek"]) else {
            bail!("missing `name` column");
        };
        let Some(date) = find(&["date"]) else {
            bail!("missing `date` column");
        };

        Ok(Self {
            name,
            date,
            duration: find(&["duration", "duration_hours", "hours"]),
            distance: find(&["distance", "distance_km", "km"]),
            elevation: find(&["elevation", "elevation_m", "altitude"]),
            weather: find(&["weather"]),
            notes: find(&["notes", "note"]),
        })
    }
}

fn field<'a>(record: &'a StringRecord, idx: Option<usize>) -> &'a str {
    idx.and_then(|i| record.get(i)).unwrap_or("").trim()
}

/// Leading decimal number of a value with an optional unit suffix.
fn leading_number(s: &str) -> f64 {
    let s = s.trim();
    let end = s
        .char_indices()
        .find(|&(_, c)| !(c.is_ascii_digit() || c == '.'))
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    s[..end].parse().unwrap_or(0.0)
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%m/%d/%Y"))
        .ok()
}

fn read_treks<R: Read>(reader: R) -> Result<ImportReport<TrekEntry>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let headers = rdr.headers().context("read header row")?.clone();
    let cols = Columns::from_headers(&headers)?;

    let mut report = ImportReport::default();
    for result in rdr.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                warn!(line, error = %e, "unreadable trek row");
                report.skip(line, e.to_string());
                continue;
            }
        };
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let name = field(&record, Some(cols.name));
        if name.is_empty() {
            if record.iter().all(|f| f.trim().is_empty()) {
                continue;
            }
            warn!(line, "trek row without a name");
            report.skip(line, "missing name");
            continue;
        }

        let raw_date = field(&record, Some(cols.date));
        let Some(date) = parse_date(raw_date) else {
            warn!(line, date = raw_date, "unreadable trek date");
            report.skip(line, format!("unreadable date {:?}", raw_date));
            continue;
        };

        let mut entry = TrekEntry::new(name, date)
            .with_duration(leading_number(field(&record, cols.duration)))
            .with_distance(leading_number(field(&record, cols.distance)))
            .with_elevation(leading_number(field(&record, cols.elevation)).round() as u32);
        entry.weather = field(&record, cols.weather).to_string();
        entry.notes = field(&record, cols.notes).to_string();

        report.records.push(entry);
    }

    Ok(report)
}

/// Parse a trek log CSV file.
pub fn parse_trek_csv(path: impl AsRef<Path>) -> Result<ImportReport<TrekEntry>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_treks(file).with_context(|| format!("parsing {}", path.display()))
}

pub fn parse_trek_csv_str(s: &str) -> Result<ImportReport<TrekEntry>> {
    read_treks(s.as_bytes())
}

pub fn parse_trek_csv_bytes(bytes: &[u8]) -> Result<ImportReport<TrekEntry>> {
    read_treks(bytes)
}

impl ImportReport<TrekEntry> {
    pub fn into_log(self) -> TrekLog {
        TrekLog::new(self.records)
    }
}
