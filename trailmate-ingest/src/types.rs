use serde::{Deserialize, Serialize};

/// A row that could not be imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    /// 1-based line number in the source file (header is line 1).
    pub line: u64,
    pub reason: String,
}

/// Parsed records plus the rows that were skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportReport<T> {
    pub records: Vec<T>,
    pub skipped: Vec<SkippedRow>,
}

impl<T> Default for ImportReport<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

impl<T> ImportReport<T> {
    pub fn skip(&mut self, line: u64, reason: impl Into<String>) {
        self.skipped.push(SkippedRow {
            line,
            reason: reason.into(),
        });
    }
}
