//! JSON import/export of the card collection.
//! The file is a plain array of cards in the same shape the web app
//! stored, so collections can move between the two.

use crate::error::Result;
use crate::models::Card;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// Writes `cards` as pretty-printed JSON to `path`.
pub fn export_json_to_path(cards: &[Card], path: &Path) -> Result<()> {
    let json_string = serde_json::to_string_pretty(cards)?;
    let mut file = File::create(path)?;
    file.write_all(json_string.as_bytes())?;
    tracing::info!(count = cards.len(), path = %path.display(), "exported cards");
    Ok(())
}

/// Reads a card collection from `path`.
/// The whole file is rejected if any card fails validation.
pub fn import_json(path: &Path) -> Result<Vec<Card>> {
    let reader = BufReader::new(File::open(path)?);
    let cards: Vec<Card> = serde_json::from_reader(reader)?;

    for card in &cards {
        card.validate()?;
    }

    tracing::info!(count = cards.len(), path = %path.display(), "imported cards");
    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use chrono::{TimeZone, Utc};
    use std::fs;

    fn create_test_cards() -> Vec<Card> {
        let now = Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap();
        let mut reviewed = Card::new("goodbye", "do widzenia", "Polish", now).unwrap();
        reviewed.repetition_count = 2;
        reviewed.ease_factor = 2.7;
        reviewed.last_reviewed_at = Some(now);
        vec![Card::new("hello", "cześć", "Polish", now).unwrap(), reviewed]
    }

    #[test]
    fn test_export_and_import() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cards.json");
        let cards = create_test_cards();

        export_json_to_path(&cards, &path).unwrap();
        assert!(fs::metadata(&path).is_ok(), "File should exist");

        let imported = import_json(&path).unwrap();
        assert_eq!(imported, cards);
    }

    #[test]
    fn test_import_stored_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stored.json");
        let json_content = r#"[
  {
    "id": "7f1d2a4e-3c55-4f0e-9a0b-1d2c3e4f5a6b",
    "question": "What is the capital of Japan?",
    "answer": "Tokyo",
    "subject": "Geography",
    "repetition": 0,
    "easeFactor": 2.5,
    "nextReview": "2024-02-01T10:15:30.000Z"
  }
]"#;
        fs::write(&path, json_content).unwrap();

        let cards = import_json(&path).unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].answer, "Tokyo");
        assert!(cards[0].last_reviewed_at.is_none());
    }

    #[test]
    fn test_import_rejects_invalid_card() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invalid_card.json");
        let mut cards = create_test_cards();
        cards[1].ease_factor = 1.0;
        export_json_to_path(&cards, &path).unwrap();

        let err = import_json(&path).unwrap_err();
        assert!(matches!(err, Error::InvalidEaseFactor(_)));
    }

    #[test]
    fn test_import_nonexistent_file() {
        let result = import_json(Path::new("nonexistent_file_xyz123.json"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_import_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invalid.json");
        fs::write(&path, "{ this is not valid json }").unwrap();

        assert!(matches!(import_json(&path), Err(Error::Json(_))));
    }
}
