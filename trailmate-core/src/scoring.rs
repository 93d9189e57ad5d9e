//! Trek readiness scoring (deduction model).
//!
//! Start at 100 and subtract a fixed penalty for every adverse condition
//! found in the answer record. Penalties stack independently and the
//! result is floored at 0. The penalty table is configuration; the
//! defaults below are the documented ones.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::answers::{AnswerRecord, TrekMode};
use crate::kit;
use crate::questionnaire::keys;

pub const MAX_SCORE: u32 = 100;

/// Trekker preparedness classification, keyed into trail filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskTier {
    #[serde(rename = "low")]
    Low,
    #[serde(rename = "moderate")]
    Moderate,
    #[serde(rename = "high")]
    High,
}

impl RiskTier {
    /// `< 40` high, `< 70` moderate, otherwise low.
    pub fn from_score(score: u32) -> Self {
        if score < 40 {
            RiskTier::High
        } else if score < 70 {
            RiskTier::Moderate
        } else {
            RiskTier::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low Risk",
            RiskTier::Moderate => "Moderate Risk",
            RiskTier::High => "High Risk",
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            RiskTier::Low => "You're well-prepared!",
            RiskTier::Moderate => "You're good to go, but take a few precautions.",
            RiskTier::High => "Prepare better before trekking.",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().trim_end_matches(" risk") {
            "low" => Some(RiskTier::Low),
            "moderate" | "medium" => Some(RiskTier::Moderate),
            "high" => Some(RiskTier::High),
            _ => None,
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-category status shared by both scoring models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryStatus {
    Great,
    Good,
    Fair,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

impl CategoryStatus {
    /// Status of `score` out of `max`: 80% great, 60% good, 40% fair.
    pub fn from_ratio(score: u32, max: u32) -> Self {
        if max == 0 || score * 10 >= max * 8 {
            CategoryStatus::Great
        } else if score * 10 >= max * 6 {
            CategoryStatus::Good
        } else if score * 10 >= max * 4 {
            CategoryStatus::Fair
        } else {
            CategoryStatus::NeedsImprovement
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryStatus::Great => "Great",
            CategoryStatus::Good => "Good",
            CategoryStatus::Fair => "Fair",
            CategoryStatus::NeedsImprovement => "Needs Improvement",
        }
    }
}

impl fmt::Display for CategoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "health")]
    Health,
    #[serde(rename = "experience")]
    Experience,
    #[serde(rename = "gear")]
    Gear,
    #[serde(rename = "planning")]
    Planning,
    #[serde(rename = "weather")]
    Weather,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Health,
        Category::Experience,
        Category::Gear,
        Category::Planning,
        Category::Weather,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Health => "Health Readiness",
            Category::Experience => "Trekking Experience",
            Category::Gear => "Gear Preparedness",
            Category::Planning => "Trip Planning",
            Category::Weather => "Weather Adaptation",
        }
    }

    pub fn suggestion(&self) -> &'static str {
        match self {
            Category::Health => "Maintain good health & avoid trekking with serious conditions.",
            Category::Experience => "Gain more trekking experience before attempting harder trails.",
            Category::Gear => "Ensure all essential gear is packed. Group members must carry gear.",
            Category::Planning => "Have a backup plan and ensure someone knows your trek itinerary.",
            Category::Weather => "Pack clothes for cold/wet weather.",
        }
    }
}

/// One adverse condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Penalty {
    AgeOutOfRange,
    MedicalCondition,
    MissingGear,
    NoBackupPlan,
    Inexperienced,
    ColdSensitive,
    GroupGearIncomplete,
    UnderPacked,
}

impl Penalty {
    pub const ALL: [Penalty; 8] = [
        Penalty::AgeOutOfRange,
        Penalty::MedicalCondition,
        Penalty::MissingGear,
        Penalty::NoBackupPlan,
        Penalty::Inexperienced,
        Penalty::ColdSensitive,
        Penalty::GroupGearIncomplete,
        Penalty::UnderPacked,
    ];

    pub fn category(&self) -> Category {
        match self {
            Penalty::AgeOutOfRange | Penalty::MedicalCondition => Category::Health,
            Penalty::Inexperienced => Category::Experience,
            Penalty::MissingGear | Penalty::GroupGearIncomplete | Penalty::UnderPacked => {
                Category::Gear
            }
            Penalty::NoBackupPlan => Category::Planning,
            Penalty::ColdSensitive => Category::Weather,
        }
    }

    /// Whether the condition can occur at all in `mode`.
    pub fn applies_to(&self, mode: TrekMode) -> bool {
        match self {
            Penalty::GroupGearIncomplete => mode.is_group(),
            _ => true,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Penalty::AgeOutOfRange => "age outside the recommended range",
            Penalty::MedicalCondition => "existing medical condition",
            Penalty::MissingGear => "missing essential gear",
            Penalty::NoBackupPlan => "no backup plan",
            Penalty::Inexperienced => "fewer than two previous treks",
            Penalty::ColdSensitive => "sensitive to cold",
            Penalty::GroupGearIncomplete => "group members without full gear",
            Penalty::UnderPacked => "fewer than half of the essentials packed",
        }
    }
}

/// Penalty points and thresholds for the deduction model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenaltyTable {
    /// Inclusive recommended age range.
    pub age_min: i64,
    pub age_max: i64,
    /// Trek count below this is inexperienced.
    pub min_trek_count: i64,

    pub age_out_of_range: u32,
    pub medical_condition: u32,
    pub missing_gear: u32,
    pub no_backup_plan: u32,
    pub inexperienced: u32,
    pub cold_sensitive: u32,
    pub group_gear_incomplete: u32,
    pub under_packed: u32,
}

impl Default for PenaltyTable {
    fn default() -> Self {
        Self {
            age_min: 16,
            age_max: 50,
            min_trek_count: 2,
            age_out_of_range: 10,
            medical_condition: 15,
            missing_gear: 10,
            no_backup_plan: 10,
            inexperienced: 15,
            cold_sensitive: 10,
            group_gear_incomplete: 10,
            under_packed: 15,
        }
    }
}

impl PenaltyTable {
    pub fn points(&self, penalty: Penalty) -> u32 {
        match penalty {
            Penalty::AgeOutOfRange => self.age_out_of_range,
            Penalty::MedicalCondition => self.medical_condition,
            Penalty::MissingGear => self.missing_gear,
            Penalty::NoBackupPlan => self.no_backup_plan,
            Penalty::Inexperienced => self.inexperienced,
            Penalty::ColdSensitive => self.cold_sensitive,
            Penalty::GroupGearIncomplete => self.group_gear_incomplete,
            Penalty::UnderPacked => self.under_packed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub label: String,
    pub score: u32,
    pub max: u32,
    pub status: CategoryStatus,
    /// Present only when the category needs work.
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskResult {
    pub overall_score: u32,
    pub overall_status: RiskTier,
    pub overall_advice: String,
    pub category_scores: Vec<CategoryScore>,
    /// Conditions that were deducted, in table order.
    pub penalties: Vec<Penalty>,
}

impl RiskResult {
    pub fn tier(&self) -> RiskTier {
        self.overall_status
    }
}

/// Deduction scorer over an answer record.
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    table: PenaltyTable,
}

impl Scorer {
    pub fn new(table: PenaltyTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &PenaltyTable {
        &self.table
    }

    /// Adverse conditions present in `answers`.
    pub fn detect(&self, answers: &AnswerRecord, mode: TrekMode) -> Vec<Penalty> {
        let t = &self.table;
        let age = answers.number(keys::AGE);
        let trek_count = answers.number(keys::TREK_COUNT);

        Penalty::ALL
            .into_iter()
            .filter(|p| p.applies_to(mode))
            .filter(|p| match p {
                Penalty::AgeOutOfRange => age < t.age_min || age > t.age_max,
                Penalty::MedicalCondition => answers.flag(keys::MEDICAL_CONDITIONS),
                Penalty::MissingGear => !answers.flag(keys::GEAR),
                Penalty::NoBackupPlan => !answers.flag(keys::BACKUP_PLAN),
                Penalty::Inexperienced => trek_count < t.min_trek_count,
                Penalty::ColdSensitive => answers.flag(keys::COLD_SENSITIVE),
                Penalty::GroupGearIncomplete => !answers.flag(keys::GROUP_GEAR),
                Penalty::UnderPacked => kit::is_under_packed(&answers.set(keys::GEAR_CHECKLIST)),
            })
            .collect()
    }

    pub fn score(&self, answers: &AnswerRecord, mode: TrekMode) -> RiskResult {
        let penalties = self.detect(answers, mode);
        let deducted: u32 = penalties.iter().map(|&p| self.table.points(p)).sum();
        let overall_score = MAX_SCORE.saturating_sub(deducted);
        let overall_status = RiskTier::from_score(overall_score);

        let category_scores = Category::ALL
            .into_iter()
            .map(|cat| {
                let max: u32 = Penalty::ALL
                    .iter()
                    .filter(|p| p.category() == cat && p.applies_to(mode))
                    .map(|&p| self.table.points(p))
                    .sum();
                let lost: u32 = penalties
                    .iter()
                    .filter(|p| p.category() == cat)
                    .map(|&p| self.table.points(p))
                    .sum();
                let score = max.saturating_sub(lost);
                CategoryScore {
                    label: cat.label().to_string(),
                    score,
                    max,
                    status: CategoryStatus::from_ratio(score, max),
                    suggestion: penalties
                        .iter()
                        .any(|p| p.category() == cat)
                        .then(|| cat.suggestion().to_string()),
                }
            })
            .collect();

        debug!(
            ?mode,
            deducted,
            overall_score,
            penalties = ?penalties,
            "scored questionnaire"
        );

        RiskResult {
            overall_score,
            overall_status,
            overall_advice: overall_status.advice().to_string(),
            category_scores,
            penalties,
        }
    }
}

/// Score with the default penalty table.
pub fn score(answers: &AnswerRecord, mode: TrekMode) -> RiskResult {
    Scorer::default().score(answers, mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::AnswerValue;

    fn prepared() -> AnswerRecord {
        AnswerRecord::new()
            .with(keys::AGE, "28")
            .with(keys::MEDICAL_CONDITIONS, "No")
            .with(keys::GEAR, "Yes")
            .with(keys::BACKUP_PLAN, "Yes")
            .with(keys::TREK_COUNT, "6")
            .with(keys::COLD_SENSITIVE, "No")
            .with(keys::GROUP_GEAR, "Yes")
            .with(keys::GEAR_CHECKLIST, AnswerValue::many(kit::ESSENTIALS))
    }

    #[test]
    fn test_prepared_trekker_scores_full() {
        let r = score(&prepared(), TrekMode::Group);
        assert_eq!(r.overall_score, 100);
        assert_eq!(r.overall_status, RiskTier::Low);
        assert_eq!(r.overall_advice, "You're well-prepared!");
        assert!(r.penalties.is_empty());
        assert!(r.category_scores.iter().all(|c| c.suggestion.is_none()));
    }

    #[test]
    fn test_penalties_stack() {
        let answers = prepared()
            .with(keys::AGE, "62")
            .with(keys::MEDICAL_CONDITIONS, "yes");
        let r = score(&answers, TrekMode::Solo);
        assert_eq!(r.overall_score, 75);
        assert_eq!(r.penalties, vec![Penalty::AgeOutOfRange, Penalty::MedicalCondition]);

        let health = &r.category_scores[0];
        assert_eq!(health.label, "Health Readiness");
        assert_eq!((health.score, health.max), (0, 25));
        assert_eq!(health.status, CategoryStatus::NeedsImprovement);
        assert!(health.suggestion.is_some());
    }

    #[test]
    fn test_age_bounds_inclusive() {
        for (age, penalised) in [("15", true), ("16", false), ("50", false), ("51", true)] {
            let r = score(&prepared().with(keys::AGE, age), TrekMode::Solo);
            assert_eq!(r.penalties.contains(&Penalty::AgeOutOfRange), penalised, "age {age}");
        }
    }

    #[test]
    fn test_every_penalty_with_defaults() {
        let r = score(&AnswerRecord::new().with(keys::MEDICAL_CONDITIONS, "Yes").with(keys::COLD_SENSITIVE, "Yes"), TrekMode::Group);
        assert_eq!(r.penalties.len(), Penalty::ALL.len());
        // 100 - (10 + 15 + 10 + 10 + 15 + 10 + 10 + 15)
        assert_eq!(r.overall_score, 5);
        assert_eq!(r.overall_status, RiskTier::High);
    }

    #[test]
    fn test_score_floors_at_zero() {
        let heavy = PenaltyTable {
            medical_condition: 60,
            inexperienced: 60,
            ..PenaltyTable::default()
        };
        let answers = AnswerRecord::new().with(keys::MEDICAL_CONDITIONS, "Yes");
        let r = Scorer::new(heavy).score(&answers, TrekMode::Solo);
        assert_eq!(r.overall_score, 0);
        assert!(r.category_scores.iter().all(|c| c.score <= c.max));
    }

    #[test]
    fn test_group_gear_only_counts_for_groups() {
        let answers = prepared().with(keys::GROUP_GEAR, "No");
        assert_eq!(score(&answers, TrekMode::Solo).overall_score, 100);
        assert_eq!(score(&answers, TrekMode::Group).overall_score, 90);

        let gear_max = |mode| score(&answers, mode).category_scores[2].max;
        assert_eq!(gear_max(TrekMode::Solo), 25);
        assert_eq!(gear_max(TrekMode::Group), 35);
    }

    #[test]
    fn test_missing_numbers_count_as_zero() {
        let answers = prepared().with(keys::AGE, "").with(keys::TREK_COUNT, "many");
        let r = score(&answers, TrekMode::Solo);
        assert!(r.penalties.contains(&Penalty::AgeOutOfRange));
        assert!(r.penalties.contains(&Penalty::Inexperienced));
    }

    #[test]
    fn test_deterministic() {
        let answers = prepared().with(keys::BACKUP_PLAN, "no");
        assert_eq!(score(&answers, TrekMode::Group), score(&answers, TrekMode::Group));
    }

    #[test]
    fn test_fixing_any_condition_never_lowers_score() {
        let worst = AnswerRecord::new()
            .with(keys::AGE, "70")
            .with(keys::MEDICAL_CONDITIONS, "Yes")
            .with(keys::GEAR, "No")
            .with(keys::BACKUP_PLAN, "No")
            .with(keys::TREK_COUNT, "0")
            .with(keys::COLD_SENSITIVE, "Yes")
            .with(keys::GROUP_GEAR, "No")
            .with(keys::GEAR_CHECKLIST, "Water");
        let base = score(&worst, TrekMode::Group).overall_score;

        let fixes: [(&str, AnswerValue); 8] = [
            (keys::AGE, "30".into()),
            (keys::MEDICAL_CONDITIONS, "No".into()),
            (keys::GEAR, "Yes".into()),
            (keys::BACKUP_PLAN, "Yes".into()),
            (keys::TREK_COUNT, "4".into()),
            (keys::COLD_SENSITIVE, "No".into()),
            (keys::GROUP_GEAR, "Yes".into()),
            (keys::GEAR_CHECKLIST, AnswerValue::many(kit::ESSENTIALS)),
        ];
        for (key, value) in fixes {
            let fixed = worst.clone().with(key, value);
            let s = score(&fixed, TrekMode::Group).overall_score;
            assert!(s > base, "fixing {key} gave {s}, base {base}");
        }
    }

    #[test]
    fn test_huge_trek_count_is_not_inexperienced() {
        let few = prepared().with(keys::TREK_COUNT, "5");
        let many = prepared().with(keys::TREK_COUNT, "99999999999999999999");
        let a = score(&few, TrekMode::Solo).overall_score;
        let b = score(&many, TrekMode::Solo).overall_score;
        assert!(b >= a, "trekCount overflow scored {b}, five treks scored {a}");
        assert!(!Scorer::default().detect(&many, TrekMode::Solo).contains(&Penalty::Inexperienced));
    }

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(RiskTier::from_score(39), RiskTier::High);
        assert_eq!(RiskTier::from_score(40), RiskTier::Moderate);
        assert_eq!(RiskTier::from_score(69), RiskTier::Moderate);
        assert_eq!(RiskTier::from_score(70), RiskTier::Low);
        assert_eq!(RiskTier::parse("High Risk"), Some(RiskTier::High));
        assert_eq!(RiskTier::parse("moderate"), Some(RiskTier::Moderate));
        assert_eq!(RiskTier::parse("extreme"), None);
    }

    #[test]
    fn test_category_status_ratio() {
        assert_eq!(CategoryStatus::from_ratio(8, 10), CategoryStatus::Great);
        assert_eq!(CategoryStatus::from_ratio(15, 25), CategoryStatus::Good);
        assert_eq!(CategoryStatus::from_ratio(4, 10), CategoryStatus::Fair);
        assert_eq!(CategoryStatus::from_ratio(0, 15), CategoryStatus::NeedsImprovement);
    }
}
