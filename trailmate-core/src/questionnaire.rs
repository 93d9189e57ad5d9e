//! Multi-page questionnaire: topic pages, form state and submission.
//!
//! The in-progress form is an explicit value (`QuestionnaireForm`) that the
//! caller owns and passes around. Paging never validates; only `submit` does.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::answers::{AnswerRecord, AnswerValue, TrekMode};
use crate::kit;
use crate::scoring::{RiskResult, Scorer};
use crate::validation::{ValidationError, Validator};

/// Question keys.
pub mod keys {
    pub const NAME: &str = "name";
    pub const AGE: &str = "age";
    pub const BLOOD_GROUP: &str = "bloodGroup";
    pub const PHONE: &str = "phone";
    pub const ADDRESS: &str = "address";
    pub const CITIZENSHIP_NUMBER: &str = "citizenshipNumber";

    pub const ALLERGIES: &str = "allergies";
    pub const MEDICAL_CONDITIONS: &str = "medicalConditions";
    pub const MEDICAL_DETAILS: &str = "medicalDetails";

    pub const TREK_COUNT: &str = "trekCount";
    pub const HAS_HIKED_BEFORE: &str = "hasHikedBefore";
    pub const BACKUP_PLAN: &str = "backupPlan";

    pub const GEAR: &str = "gear";
    pub const GEAR_CHECKLIST: &str = "gearChecklist";

    pub const COLD_SENSITIVE: &str = "coldSensitive";
    pub const COLD_PREP: &str = "coldPrep";
    pub const DURATION_PREF: &str = "durationPref";
    pub const TRAIL_REGION: &str = "trailRegion";

    pub const LEADER_NAME: &str = "leaderName";
    pub const GROUP_MEMBERS: &str = "groupMembers";
    pub const GROUP_GEAR: &str = "groupGear";

    pub const EMERGENCY_NAME: &str = "emergencyName";
    pub const EMERGENCY_PHONE: &str = "emergencyPhone";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    Text,
    Number,
    Phone,
    YesNo,
    MultiSelect(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub key: &'static str,
    pub label: &'static str,
    pub hint: &'static str,
    pub kind: QuestionKind,
    pub required: bool,
}

const fn q(
    key: &'static str,
    label: &'static str,
    hint: &'static str,
    kind: QuestionKind,
    required: bool,
) -> Question {
    Question { key, label, hint, kind, required }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topic {
    pub title: &'static str,
    pub questions: &'static [Question],
}

use QuestionKind::*;

pub const PERSONAL_INFO: Topic = Topic {
    title: "Personal Info",
    questions: &[
        q(keys::NAME, "Full Name", "Enter your name", Text, true),
        q(keys::AGE, "Age", "Enter your age", Number, true),
        q(keys::BLOOD_GROUP, "Blood Group", "E.g., A+, O-", Text, true),
        q(keys::PHONE, "Phone Number", "Enter your phone number", Phone, false),
        q(keys::ADDRESS, "Address", "Enter your address", Text, false),
        q(keys::CITIZENSHIP_NUMBER, "Citizenship Number", "Enter your citizenship number", Text, false),
    ],
};

pub const HEALTH_INFO: Topic = Topic {
    title: "Health Info",
    questions: &[
        q(keys::ALLERGIES, "Any Allergies?", "E.g., pollen, peanuts", Text, false),
        q(keys::MEDICAL_CONDITIONS, "Any medical conditions?", "Yes / No", YesNo, true),
        q(keys::MEDICAL_DETAILS, "Medical condition details", "E.g., asthma, diabetes", Text, false),
    ],
};

pub const TREK_EXPERIENCE: Topic = Topic {
    title: "Trek Experience",
    questions: &[
        q(keys::TREK_COUNT, "How many treks have you completed?", "E.g., 3", Number, true),
        q(keys::HAS_HIKED_BEFORE, "Have you ever hiked before?", "Yes / No", YesNo, false),
        q(keys::BACKUP_PLAN, "Do you have a backup plan?", "Yes / No", YesNo, true),
    ],
};

pub const GEAR_PREP: Topic = Topic {
    title: "Gear Prep",
    questions: &[
        q(keys::GEAR, "Do you have all essential gear?", "Yes / No", YesNo, false),
        q(
            keys::GEAR_CHECKLIST,
            "Which essentials have you packed?",
            "Comma separated",
            MultiSelect(&kit::ESSENTIALS),
            false,
        ),
    ],
};

pub const WEATHER_ADAPTATION: Topic = Topic {
    title: "Weather Adaptation",
    questions: &[
        q(keys::COLD_SENSITIVE, "Are you sensitive to cold?", "Yes / No", YesNo, false),
        q(keys::COLD_PREP, "Prepared for cold/rainy weather?", "E.g., raincoat, thermal wear", Text, false),
        q(keys::DURATION_PREF, "Preferred Trek Duration", "E.g., 1 day, 3 days, 1 week", Text, false),
        q(keys::TRAIL_REGION, "Preferred Trail Region", "E.g., Annapurna, Langtang", Text, false),
    ],
};

pub const GROUP_DETAILS: Topic = Topic {
    title: "Group Details",
    questions: &[
        q(keys::LEADER_NAME, "Group Leader", "Full name", Text, false),
        q(keys::GROUP_MEMBERS, "Group Members", "Comma separated names", Text, true),
        q(keys::GROUP_GEAR, "Does every member carry full gear?", "Yes / No", YesNo, true),
    ],
};

pub const EMERGENCY_CONTACT: Topic = Topic {
    title: "Emergency Contact",
    questions: &[
        q(keys::EMERGENCY_NAME, "Emergency Contact Name", "Full name", Text, true),
        q(keys::EMERGENCY_PHONE, "Emergency Phone Number", "E.g., 98XXXXXXXX", Phone, true),
    ],
};

const SOLO_TOPICS: [&Topic; 6] = [
    &PERSONAL_INFO,
    &HEALTH_INFO,
    &TREK_EXPERIENCE,
    &GEAR_PREP,
    &WEATHER_ADAPTATION,
    &EMERGENCY_CONTACT,
];

const GROUP_TOPICS: [&Topic; 7] = [
    &PERSONAL_INFO,
    &HEALTH_INFO,
    &TREK_EXPERIENCE,
    &GEAR_PREP,
    &WEATHER_ADAPTATION,
    &GROUP_DETAILS,
    &EMERGENCY_CONTACT,
];

/// Topic pages for `mode`, in order.
pub fn topics(mode: TrekMode) -> &'static [&'static Topic] {
    match mode {
        TrekMode::Solo => &SOLO_TOPICS,
        TrekMode::Group => &GROUP_TOPICS,
    }
}

/// Required question keys for `mode`, in page order.
pub fn required_keys(mode: TrekMode) -> Vec<&'static str> {
    topics(mode)
        .iter()
        .flat_map(|t| t.questions.iter())
        .filter(|q| q.required)
        .map(|q| q.key)
        .collect()
}

pub fn find_question(key: &str) -> Option<&'static Question> {
    topics(TrekMode::Group)
        .iter()
        .flat_map(|t| t.questions.iter())
        .find(|q| q.key == key)
}

/// Next topic index, clamped at the last page.
pub fn advance(current: usize, mode: TrekMode) -> usize {
    let last = topics(mode).len() - 1;
    (current + 1).min(last)
}

/// Previous topic index, clamped at the first page.
pub fn back(current: usize) -> usize {
    current.saturating_sub(1)
}

/// Normalize an answer for its question: yes/no to canonical spelling,
/// comma separated text to a set for multi-selects.
fn normalize(key: &str, value: AnswerValue) -> AnswerValue {
    let Some(question) = find_question(key) else {
        return value;
    };
    match (question.kind, value) {
        (YesNo, AnswerValue::Text(s)) => match s.trim().to_lowercase().as_str() {
            "yes" | "y" | "true" => AnswerValue::text("Yes"),
            "no" | "n" | "false" => AnswerValue::text("No"),
            _ => AnswerValue::Text(s),
        },
        (MultiSelect(options), AnswerValue::Text(s)) => AnswerValue::Many(
            s.split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(|p| {
                    options
                        .iter()
                        .find(|o| o.eq_ignore_ascii_case(p))
                        .map(|o| o.to_string())
                        .unwrap_or_else(|| p.to_string())
                })
                .collect(),
        ),
        (_, v) => v,
    }
}

/// A validated and scored questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub mode: TrekMode,
    pub answers: AnswerRecord,
    pub result: RiskResult,
}

/// Validate then score. The answers are returned unchanged with the result.
pub fn submit(
    answers: &AnswerRecord,
    mode: TrekMode,
    validator: &Validator,
    scorer: &Scorer,
) -> Result<Submission, ValidationError> {
    if let Err(e) = validator.validate(answers, mode) {
        debug!(error = %e, "questionnaire rejected");
        return Err(e);
    }
    let result = scorer.score(answers, mode);
    info!(
        ?mode,
        score = result.overall_score,
        status = %result.overall_status,
        "questionnaire submitted"
    );
    Ok(Submission {
        mode,
        answers: answers.clone(),
        result,
    })
}

/// In-progress questionnaire for one session.
#[derive(Debug, Clone, Default)]
pub struct QuestionnaireForm {
    mode: TrekMode,
    answers: AnswerRecord,
    current: usize,
}

impl QuestionnaireForm {
    pub fn new(mode: TrekMode) -> Self {
        Self {
            mode,
            answers: AnswerRecord::new(),
            current: 0,
        }
    }

    /// Start from previously saved answers.
    pub fn from_answers(mode: TrekMode, answers: AnswerRecord) -> Self {
        Self {
            mode,
            answers,
            current: 0,
        }
    }

    pub fn mode(&self) -> TrekMode {
        self.mode
    }

    /// Switching mode keeps the answers; the page index is clamped.
    pub fn set_mode(&mut self, mode: TrekMode) {
        self.mode = mode;
        self.current = self.current.min(topics(mode).len() - 1);
    }

    pub fn answers(&self) -> &AnswerRecord {
        &self.answers
    }

    pub fn answer(&mut self, key: &str, value: impl Into<AnswerValue>) -> &mut Self {
        let value = normalize(key, value.into());
        self.answers.insert(key, value);
        self
    }

    pub fn with_answer(mut self, key: &str, value: impl Into<AnswerValue>) -> Self {
        self.answer(key, value);
        self
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_topic(&self) -> &'static Topic {
        topics(self.mode)[self.current]
    }

    pub fn is_last_topic(&self) -> bool {
        self.current + 1 == topics(self.mode).len()
    }

    pub fn advance(&mut self) -> usize {
        self.current = advance(self.current, self.mode);
        self.current
    }

    pub fn back(&mut self) -> usize {
        self.current = back(self.current);
        self.current
    }

    /// Jump to a page (tab bar), clamped to the last page.
    pub fn jump_to(&mut self, index: usize) -> usize {
        self.current = index.min(topics(self.mode).len() - 1);
        self.current
    }

    pub fn submit(&self, validator: &Validator, scorer: &Scorer) -> Result<Submission, ValidationError> {
        submit(&self.answers, self.mode, validator, scorer)
    }
}
