//! Answer record captured by the questionnaire.
//!
//! Values are either free/enumerated text or a multi-select set. Each
//! submission is a snapshot: nothing here is versioned or persisted.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Solo trekker or a group filled in by its leader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrekMode {
    #[default]
    #[serde(rename = "solo")]
    Solo,
    #[serde(rename = "group")]
    Group,
}

impl TrekMode {
    pub fn is_group(&self) -> bool {
        matches!(self, TrekMode::Group)
    }
}

/// A single answer. Enumerated answers are stored as `Text` with the
/// option's canonical spelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Text(String),
    Many(BTreeSet<String>),
}

impl AnswerValue {
    pub fn text(s: impl Into<String>) -> Self {
        AnswerValue::Text(s.into())
    }

    pub fn many<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AnswerValue::Many(items.into_iter().map(Into::into).collect())
    }

    /// Whitespace-only text and empty sets count as unanswered.
    pub fn is_blank(&self) -> bool {
        match self {
            AnswerValue::Text(s) => s.trim().is_empty(),
            AnswerValue::Many(set) => set.iter().all(|s| s.trim().is_empty()),
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        AnswerValue::Text(s.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        AnswerValue::Text(s)
    }
}

/// Question key -> answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerRecord {
    values: BTreeMap<String, AnswerValue>,
}

impl AnswerRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AnswerValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&AnswerValue> {
        self.values.get(key)
    }

    pub fn is_blank(&self, key: &str) -> bool {
        self.get(key).map(AnswerValue::is_blank).unwrap_or(true)
    }

    /// Trimmed text answer. Sets are joined with ", ".
    pub fn text(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            AnswerValue::Text(s) => Some(s.trim().to_string()),
            AnswerValue::Many(set) => Some(set.iter().cloned().collect::<Vec<_>>().join(", ")),
        }
    }

    /// Leading integer of a text answer. Missing or unparseable answers are 0;
    /// digit runs too long for `i64` saturate.
    pub fn number(&self, key: &str) -> i64 {
        let Some(AnswerValue::Text(s)) = self.get(key) else {
            return 0;
        };
        let s = s.trim();
        let end = s
            .char_indices()
            .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
            .map(|(i, _)| i)
            .unwrap_or(s.len());
        let prefix = &s[..end];
        match prefix.parse::<i64>() {
            Ok(n) => n,
            Err(_) if prefix.bytes().any(|b| b.is_ascii_digit()) => {
                if prefix.starts_with('-') {
                    i64::MIN
                } else {
                    i64::MAX
                }
            }
            Err(_) => 0,
        }
    }

    /// Yes/no answer. Anything other than an affirmative is false.
    pub fn flag(&self, key: &str) -> bool {
        match self.get(key) {
            Some(AnswerValue::Text(s)) => {
                matches!(s.trim().to_lowercase().as_str(), "yes" | "y" | "true")
            }
            _ => false,
        }
    }

    /// Multi-select answer. A comma separated text answer is split.
    pub fn set(&self, key: &str) -> BTreeSet<String> {
        match self.get(key) {
            Some(AnswerValue::Many(set)) => set.clone(),
            Some(AnswerValue::Text(s)) => s
                .split(',')
                .map(|p| p.trim())
                .filter(|p| !p.is_empty())
                .map(|p| p.to_string())
                .collect(),
            None => BTreeSet::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AnswerValue)> {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_defaults_to_zero() {
        let answers = AnswerRecord::new()
            .with("age", "27 years")
            .with("trekCount", "")
            .with("weird", "abc");
        assert_eq!(answers.number("age"), 27);
        assert_eq!(answers.number("trekCount"), 0);
        assert_eq!(answers.number("weird"), 0);
        assert_eq!(answers.number("missing"), 0);
    }

    #[test]
    fn test_number_saturates_on_overflow() {
        let answers = AnswerRecord::new()
            .with("trekCount", "99999999999999999999")
            .with("age", "-99999999999999999999")
            .with("sign", "-");
        assert_eq!(answers.number("trekCount"), i64::MAX);
        assert_eq!(answers.number("age"), i64::MIN);
        assert_eq!(answers.number("sign"), 0);
    }

    #[test]
    fn test_flag_is_case_insensitive() {
        let answers = AnswerRecord::new()
            .with("backupPlan", " YES ")
            .with("gear", "no");
        assert!(answers.flag("backupPlan"));
        assert!(!answers.flag("gear"));
        assert!(!answers.flag("missing"));
    }

    #[test]
    fn test_blank_values() {
        let answers = AnswerRecord::new()
            .with("name", "   ")
            .with("gearChecklist", AnswerValue::many(Vec::<String>::new()));
        assert!(answers.is_blank("name"));
        assert!(answers.is_blank("gearChecklist"));
        assert!(answers.is_blank("missing"));
    }

    #[test]
    fn test_set_splits_text() {
        let answers = AnswerRecord::new().with("gearChecklist", "Water, Rain Gear ,");
        let set = answers.set("gearChecklist");
        assert_eq!(set.len(), 2);
        assert!(set.contains("Rain Gear"));
    }

    #[test]
    fn test_json_shape() {
        let answers = AnswerRecord::new()
            .with("name", "Asha")
            .with("gearChecklist", AnswerValue::many(["Water", "Snacks"]));
        let json = serde_json::to_string(&answers).unwrap();
        assert_eq!(json, r#"{"gearChecklist":["Snacks","Water"],"name":"Asha"}"#);

        let back: AnswerRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, answers);
    }
}
