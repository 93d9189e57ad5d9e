//! trailmate-core: questionnaire, readiness scoring and trail recommendation

pub mod answers;
pub mod badges;
pub mod kit;
pub mod questionnaire;
pub mod readiness;
pub mod scoring;
pub mod trails;
pub mod trek_log;
pub mod validation;

pub use answers::{AnswerRecord, AnswerValue, TrekMode};
pub use badges::{evaluate as evaluate_badges, leaderboard, BadgeKind, BadgeProgress, LeaderboardEntry};
pub use questionnaire::{advance, keys, submit, QuestionnaireForm, Submission, Topic};
pub use readiness::{assess, Assessment, CategoryRatings};
pub use scoring::{
    score, Category, CategoryScore, CategoryStatus, Penalty, PenaltyTable, RiskResult, RiskTier,
    Scorer,
};
pub use trails::{Difficulty, ScoreBand, Trail, TrailCatalog};
pub use trek_log::{TrekEntry, TrekLog};
pub use validation::{ValidationError, Validator, DEFAULT_PHONE_PATTERN};
