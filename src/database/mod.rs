//! Card persistence.
//!
//! `CardStore` is the repository the rest of the app talks to. Writes take
//! `&mut self`, so a review's read-modify-write of a card cannot interleave
//! with another writer.

pub mod db;
pub mod memory;

pub use db::SqliteCardStore;
pub use memory::MemoryCardStore;

use crate::error::Result;
use crate::models::{Card, ReviewQuality, scheduler};
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub trait CardStore {
    /// Fails with `Error::CardNotFound` for unknown ids.
    fn get(&self, id: Uuid) -> Result<Card>;

    /// Inserts the card or replaces the stored copy with the same id.
    fn put(&mut self, card: &Card) -> Result<()>;

    /// Stores a batch of cards, validating all of them before the first write.
    /// Stores whose writes can fail part way override this with a transaction.
    fn put_all(&mut self, cards: &[Card]) -> Result<()> {
        for card in cards {
            card.validate()?;
        }
        for card in cards {
            self.put(card)?;
        }
        Ok(())
    }

    fn delete(&mut self, id: Uuid) -> Result<()>;

    /// Every card, in insertion order.
    fn all(&self) -> Result<Vec<Card>>;

    /// Cards due at `now`, soonest next review first.
    fn due_cards(&self, now: DateTime<Utc>) -> Result<Vec<Card>>;
}

/// Loads a card, schedules its next review and stores the result.
pub fn review_card(
    store: &mut dyn CardStore,
    id: Uuid,
    quality: ReviewQuality,
    now: DateTime<Utc>,
) -> Result<Card> {
    let card = store.get(id)?;
    let updated = scheduler::compute_next_review(&card, quality, now)?;
    store.put(&updated)?;

    tracing::debug!(
        card_id = %id,
        quality = quality.label(),
        repetitions = updated.repetition_count,
        next_review = %updated.next_review_at,
        "card reviewed"
    );
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use chrono::{TimeDelta, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 2, 7, 0, 0).unwrap()
    }

    #[test]
    fn test_review_card_persists_update() {
        let mut store = MemoryCardStore::default();
        let card = Card::new("2 + 2", "4", "Math", now()).unwrap();
        store.put(&card).unwrap();

        let updated = review_card(&mut store, card.id, ReviewQuality::Easy, now()).unwrap();

        assert_eq!(updated.repetition_count, 1);
        assert_eq!(store.get(card.id).unwrap(), updated);
        assert!(store.due_cards(now()).unwrap().is_empty());
        assert_eq!(store.due_cards(now() + TimeDelta::days(1)).unwrap().len(), 1);
    }

    #[test]
    fn test_review_unknown_card() {
        let mut store = MemoryCardStore::default();
        let err = review_card(&mut store, Uuid::new_v4(), ReviewQuality::Good, now()).unwrap_err();
        assert!(matches!(err, Error::CardNotFound(_)));
    }

    #[test]
    fn test_invalid_card_is_not_written() {
        let mut store = MemoryCardStore::default();
        let mut card = Card::new("q", "a", "s", now()).unwrap();
        card.ease_factor = 0.5;
        store.put(&card).unwrap();

        assert!(review_card(&mut store, card.id, ReviewQuality::Good, now()).is_err());
        assert_eq!(store.get(card.id).unwrap(), card);
    }
}
