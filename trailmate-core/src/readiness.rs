//! Category self-assessment.
//!
//! The trekker rates five categories from 0 to 10. The overall score is the
//! rounded mean of the ratings; it is classified with the same risk
//! thresholds as the questionnaire score.

use serde::{Deserialize, Serialize};

use crate::scoring::{CategoryScore, CategoryStatus, RiskTier};

pub const MAX_RATING: u32 = 10;

/// Suggestions are attached below this rating.
pub const SUGGESTION_CUTOFF: u32 = 7;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryRatings {
    pub fitness: u32,
    pub experience: u32,
    pub gear: u32,
    pub health: u32,
    pub weather: u32,
}

impl CategoryRatings {
    pub fn new(fitness: u32, experience: u32, gear: u32, health: u32, weather: u32) -> Self {
        Self {
            fitness,
            experience,
            gear,
            health,
            weather,
        }
    }

    fn rows(&self) -> [(&'static str, u32, &'static str); 5] {
        [
            ("Physical Fitness", self.fitness, "Work on stamina."),
            ("Trekking Experience", self.experience, "Try beginner trails first."),
            ("Gear Preparedness", self.gear, "Upgrade essential gear."),
            ("Health Readiness", self.health, "Ensure you're medically fit."),
            ("Weather Adaptation", self.weather, "Pack clothes for cold/wet weather."),
        ]
    }
}

/// `>= 8` great, `>= 6` good, `>= 4` fair.
pub fn rating_status(rating: u32) -> CategoryStatus {
    CategoryStatus::from_ratio(rating.min(MAX_RATING), MAX_RATING)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub overall_score: u32,
    pub overall_status: RiskTier,
    pub overall_advice: String,
    pub category_scores: Vec<CategoryScore>,
}

/// Rate the five categories. Ratings above 10 are clamped.
pub fn assess(ratings: &CategoryRatings) -> Assessment {
    let rows = ratings.rows();
    let total: u32 = rows.iter().map(|(_, r, _)| (*r).min(MAX_RATING)).sum();
    // round(total / 5) without floats
    let overall_score = (total * 2 + 5) / 10;
    let overall_status = RiskTier::from_score(overall_score);

    let category_scores = rows
        .into_iter()
        .map(|(label, rating, suggestion)| {
            let score = rating.min(MAX_RATING);
            CategoryScore {
                label: label.to_string(),
                score,
                max: MAX_RATING,
                status: rating_status(score),
                suggestion: (score < SUGGESTION_CUTOFF).then(|| suggestion.to_string()),
            }
        })
        .collect();

    Assessment {
        overall_score,
        overall_status,
        overall_advice: overall_status.advice().to_string(),
        category_scores,
    }
}
