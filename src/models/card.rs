//! Flashcard is a question/answer pair tagged with a subject, together with
//! the spaced repetition state the scheduler maintains for it.
use super::scheduler::{DEFAULT_EASE_FACTOR, MIN_EASE_FACTOR};
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Field names follow the web app's local-storage JSON,
/// so exported collections can be moved between the two.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub subject: String,
    /// Consecutive successful recalls since the last failure.
    #[serde(rename = "repetition")]
    pub repetition_count: u32,
    #[serde(rename = "easeFactor")]
    pub ease_factor: f64,
    #[serde(rename = "nextReview")]
    pub next_review_at: DateTime<Utc>,
    #[serde(
        rename = "lastReviewed",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_reviewed_at: Option<DateTime<Utc>>,
}

impl Card {
    /// Creates a card that is due immediately.
    pub fn new(question: &str, answer: &str, subject: &str, now: DateTime<Utc>) -> Result<Self> {
        let card = Self {
            id: Uuid::new_v4(),
            question: question.trim().to_string(),
            answer: answer.trim().to_string(),
            subject: subject.trim().to_string(),
            repetition_count: 0,
            ease_factor: DEFAULT_EASE_FACTOR,
            next_review_at: now,
            last_reviewed_at: None,
        };
        card.validate()?;
        Ok(card)
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review_at <= now
    }

    /// Checks the fields the scheduler relies on.
    pub fn validate_schedule(&self) -> Result<()> {
        if !self.ease_factor.is_finite() || self.ease_factor < MIN_EASE_FACTOR {
            return Err(Error::InvalidEaseFactor(self.ease_factor));
        }
        Ok(())
    }

    /// Full validation, used on creation and on import.
    pub fn validate(&self) -> Result<()> {
        if self.question.trim().is_empty() {
            return Err(Error::MissingField("question"));
        }
        if self.answer.trim().is_empty() {
            return Err(Error::MissingField("answer"));
        }
        if self.subject.trim().is_empty() {
            return Err(Error::MissingField("subject"));
        }
        self.validate_schedule()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_new_card_defaults() {
        let card = Card::new("  What is the capital of Japan? ", "Tokyo", "Geography", now()).unwrap();

        assert_eq!(card.question, "What is the capital of Japan?");
        assert_eq!(card.repetition_count, 0);
        assert_eq!(card.ease_factor, 2.5);
        assert_eq!(card.next_review_at, now());
        assert!(card.last_reviewed_at.is_none());
        assert!(card.is_due(now()));
    }

    #[test]
    fn test_new_card_requires_all_fields() {
        let err = Card::new("question", "   ", "subject", now()).unwrap_err();
        assert!(matches!(err, Error::MissingField("answer")));

        let err = Card::new("question", "answer", "", now()).unwrap_err();
        assert!(matches!(err, Error::MissingField("subject")));
    }

    #[test]
    fn test_validate_rejects_low_ease_factor() {
        let mut card = Card::new("q", "a", "s", now()).unwrap();
        card.ease_factor = 1.2;
        assert!(matches!(card.validate(), Err(Error::InvalidEaseFactor(_))));

        card.ease_factor = f64::NAN;
        assert!(card.validate_schedule().is_err());

        card.ease_factor = 1.3;
        assert!(card.validate().is_ok());
    }

    #[test]
    fn test_deserialize_stored_format() {
        let json = r#"{
            "id": "0b5c6f5e-8a0e-4d8b-9a43-2f1f0f4d9a11",
            "question": "What is H2O?",
            "answer": "Water",
            "subject": "Chemistry",
            "repetition": 2,
            "easeFactor": 2.7,
            "nextReview": "2024-03-05T09:00:00.000Z",
            "lastReviewed": "2024-03-01T09:00:00.000Z"
        }"#;

        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.repetition_count, 2);
        assert_eq!(card.ease_factor, 2.7);
        assert_eq!(card.next_review_at, Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap());
        assert_eq!(card.last_reviewed_at, Some(now()));
    }

    #[test]
    fn test_serialize_omits_missing_last_reviewed() {
        let card = Card::new("q", "a", "s", now()).unwrap();
        let json = serde_json::to_string(&card).unwrap();

        assert!(json.contains("\"easeFactor\":2.5"));
        assert!(json.contains("\"nextReview\""));
        assert!(!json.contains("lastReviewed"));
    }
}
