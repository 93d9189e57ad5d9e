//! Submission checks: required answers and the emergency phone format.
//!
//! Only the final submission is validated. The first violated rule is
//! reported, in questionnaire order.

use regex::Regex;
use thiserror::Error;

use crate::answers::{AnswerRecord, TrekMode};
use crate::questionnaire::{self, keys};

/// Nepali mobile numbers: 96/97/98 followed by eight digits.
pub const DEFAULT_PHONE_PATTERN: &str = r"^9[678][0-9]{8}$";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("incomplete form: `{key}` is required")]
    MissingField { key: String },

    #[error("incomplete form: `{key}` is not a valid mobile number (got {value:?})")]
    InvalidPhone { key: String, value: String },

    #[error("invalid phone pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

impl ValidationError {
    /// Errors a user can fix by completing the form.
    pub fn is_incomplete_form(&self) -> bool {
        matches!(
            self,
            ValidationError::MissingField { .. } | ValidationError::InvalidPhone { .. }
        )
    }

    /// Question key the error points at, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            ValidationError::MissingField { key } | ValidationError::InvalidPhone { key, .. } => {
                Some(key.as_str())
            }
            ValidationError::InvalidPattern { .. } => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Validator {
    phone: Regex,
}

impl Validator {
    /// Build a validator for a locale's mobile number pattern.
    pub fn new(phone_pattern: &str) -> Result<Self, ValidationError> {
        let phone = Regex::new(phone_pattern).map_err(|e| ValidationError::InvalidPattern {
            pattern: phone_pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { phone })
    }

    pub fn nepal() -> Result<Self, ValidationError> {
        Self::new(DEFAULT_PHONE_PATTERN)
    }

    pub fn is_valid_phone(&self, phone: &str) -> bool {
        self.phone.is_match(phone.trim())
    }

    pub fn validate(&self, answers: &AnswerRecord, mode: TrekMode) -> Result<(), ValidationError> {
        for key in questionnaire::required_keys(mode) {
            if answers.is_blank(key) {
                return Err(ValidationError::MissingField {
                    key: key.to_string(),
                });
            }
        }

        let phone = answers.text(keys::EMERGENCY_PHONE).unwrap_or_default();
        if !self.is_valid_phone(&phone) {
            return Err(ValidationError::InvalidPhone {
                key: keys::EMERGENCY_PHONE.to_string(),
                value: phone,
            });
        }

        Ok(())
    }
}
