//! Leaderboard CSV import: `name,treks` rows.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::warn;
use trailmate_core::LeaderboardEntry;

use crate::types::ImportReport;

#[derive(Debug, Deserialize)]
struct Row {
    name: String,
    treks: String,
}

fn read_leaderboard<R: Read>(reader: R) -> Result<ImportReport<LeaderboardEntry>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = rdr.headers().context("read header row")?.clone();

    let mut report = ImportReport::default();
    for result in rdr.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                warn!(line, error = %e, "skipping leaderboard row");
                report.skip(line, e.to_string());
                continue;
            }
        };
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let row: Row = match record.deserialize(Some(&headers)) {
            Ok(row) => row,
            Err(e) => {
                warn!(line, error = %e, "skipping leaderboard row");
                report.skip(line, e.to_string());
                continue;
            }
        };

        if row.name.is_empty() {
            if row.treks.is_empty() {
                continue;
            }
            warn!(line, "leaderboard row without a name");
            report.skip(line, "missing name");
            continue;
        }
        match row.treks.parse::<u32>() {
            Ok(treks) => report.records.push(LeaderboardEntry::new(row.name, treks)),
            Err(_) => {
                warn!(line, name = %row.name, treks = %row.treks, "non-numeric trek count");
                report.skip(line, format!("non-numeric trek count for {}", row.name));
            }
        }
    }

    Ok(report)
}

/// Parse a leaderboard CSV. Rows with a blank name or a non-numeric trek
/// count are skipped and reported.
pub fn parse_leaderboard_csv(path: impl AsRef<Path>) -> Result<ImportReport<LeaderboardEntry>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_leaderboard(file).with_context(|| format!("parsing {}", path.display()))
}

pub fn parse_leaderboard_csv_str(s: &str) -> Result<ImportReport<LeaderboardEntry>> {
    read_leaderboard(s.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skipped_rows_carry_their_line() {
        let report = parse_leaderboard_csv_str("name,treks\nAayush,14\nBina,twelve\n,5\n").unwrap();
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.skipped[0].line, 3);
        assert!(report.skipped[0].reason.contains("Bina"));
        assert_eq!(report.skipped[1].line, 4);
        assert_eq!(report.skipped[1].reason, "missing name");
    }

    #[test]
    fn test_blank_rows_are_ignored() {
        let report = parse_leaderboard_csv_str("name,treks\nRiya,10\n,\n").unwrap();
        assert_eq!(report.records.len(), 1);
        assert!(report.skipped.is_empty());
    }
}
