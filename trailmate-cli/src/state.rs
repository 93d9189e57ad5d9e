use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use trailmate_core::{AnswerRecord, Submission};

pub fn trailmate_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("TRAILMATE_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".trailmate"))
}

pub fn ensure_trailmate_home() -> Result<PathBuf> {
    let dir = trailmate_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn submissions_dir() -> Result<PathBuf> {
    let dir = ensure_trailmate_home()?.join("submissions");
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// One scored questionnaire as written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionSnapshot {
    pub submitted_at_utc: String,
    #[serde(flatten)]
    pub submission: Submission,
}

pub fn write_submission(submission: &Submission, now: DateTime<Utc>) -> Result<PathBuf> {
    let snapshot = SubmissionSnapshot {
        submitted_at_utc: now.to_rfc3339(),
        submission: submission.clone(),
    };
    let p = submissions_dir()?.join(format!("submission-{}.json", now.format("%Y%m%dT%H%M%SZ")));
    let json = serde_json::to_string_pretty(&snapshot)?;
    fs::write(&p, json).with_context(|| format!("write {}", p.display()))?;
    Ok(p)
}

pub fn read_answers(path: &Path) -> Result<AnswerRecord> {
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

pub fn write_answers(path: &Path, answers: &AnswerRecord) -> Result<()> {
    let json = serde_json::to_string_pretty(answers)?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use trailmate_core::keys;

    #[test]
    fn test_answers_round_trip() {
        let dir = std::env::temp_dir().join(format!("trailmate-state-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let p = dir.join("answers.json");

        let answers = AnswerRecord::default()
            .with(keys::NAME, "Asha")
            .with(keys::GEAR_CHECKLIST, trailmate_core::AnswerValue::many(["Water", "Snacks"]));
        write_answers(&p, &answers).unwrap();
        assert_eq!(read_answers(&p).unwrap(), answers);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_unreadable_answers_name_the_file() {
        let p = std::env::temp_dir().join("trailmate-missing-answers.json");
        let err = read_answers(&p).unwrap_err();
        assert!(format!("{err:#}").contains("trailmate-missing-answers.json"));
    }
}
