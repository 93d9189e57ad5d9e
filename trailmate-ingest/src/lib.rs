//! trailmate-ingest: trek log and leaderboard imports (CSV) into core types.

pub mod parsers;
pub mod types;

pub use parsers::leaderboard_csv::{parse_leaderboard_csv, parse_leaderboard_csv_str};
pub use parsers::trek_csv::{parse_trek_csv, parse_trek_csv_bytes, parse_trek_csv_str};
pub use types::{ImportReport, SkippedRow};
