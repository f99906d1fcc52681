//! Review session over the cards that are due.
//! Each card is graded once; a failed card is due again tomorrow, so it is
//! not repeated within the same session.

use super::{Card, ReviewQuality};
use crate::database::{CardStore, review_card};
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};

pub struct ReviewSession {
    cards: Vec<Card>,
    current_index: usize,
    pub show_answer: bool,
    failed: usize,
}

impl ReviewSession {
    /// Starts a session over `due`, which should already be in review order.
    pub fn new(due: Vec<Card>) -> Self {
        Self {
            cards: due,
            current_index: 0,
            show_answer: false,
            failed: 0,
        }
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.cards.get(self.current_index)
    }

    pub fn reveal_answer(&mut self) {
        self.show_answer = true;
    }

    /// Schedules the current card, persists it and moves on.
    pub fn grade_current_card(
        &mut self,
        quality: ReviewQuality,
        now: DateTime<Utc>,
        store: &mut dyn CardStore,
    ) -> Result<Card> {
        let id = self.current_card().map(|card| card.id).ok_or(Error::SessionComplete)?;

        let updated = review_card(store, id, quality, now)?;
        self.cards[self.current_index] = updated.clone();

        if !quality.is_success() {
            self.failed += 1;
        }
        self.current_index += 1;
        self.show_answer = false;

        if self.is_completed() {
            tracing::info!(
                reviewed = self.reviewed_count(),
                failed = self.failed,
                "review session complete"
            );
        }
        Ok(updated)
    }

    pub fn total_count(&self) -> usize {
        self.cards.len()
    }

    pub fn reviewed_count(&self) -> usize {
        self.current_index.min(self.cards.len())
    }

    pub fn remaining_count(&self) -> usize {
        self.total_count() - self.reviewed_count()
    }

    pub fn failed_count(&self) -> usize {
        self.failed
    }

    pub fn is_completed(&self) -> bool {
        self.current_index >= self.cards.len()
    }

    pub fn progress_message(&self) -> String {
        if self.is_completed() {
            format!(
                "Reviewed {} cards ({} to relearn tomorrow)",
                self.reviewed_count(),
                self.failed
            )
        } else {
            format!("Cards to review: {}", self.remaining_count())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryCardStore;
    use chrono::{TimeDelta, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 15, 20, 0, 0).unwrap()
    }

    fn seeded_store() -> MemoryCardStore {
        let mut store = MemoryCardStore::default();
        for (question, offset) in [("Capital of Japan?", -2), ("Capital of Peru?", -1), ("Capital of Chad?", 3)] {
            let card = Card::new(question, "answer", "Geography", now() + TimeDelta::days(offset)).unwrap();
            store.put(&card).unwrap();
        }
        store
    }

    #[test]
    fn test_session_walks_due_cards_once() {
        let mut store = seeded_store();
        let mut session = ReviewSession::new(store.due_cards(now()).unwrap());

        assert_eq!(session.total_count(), 2);
        assert_eq!(session.progress_message(), "Cards to review: 2");
        assert_eq!(session.current_card().unwrap().question, "Capital of Japan?");

        session.reveal_answer();
        assert!(session.show_answer);
        session.grade_current_card(ReviewQuality::Fail, now(), &mut store).unwrap();

        assert!(!session.show_answer);
        assert_eq!(session.remaining_count(), 1);
        assert_eq!(session.current_card().unwrap().question, "Capital of Peru?");

        session.grade_current_card(ReviewQuality::Good, now(), &mut store).unwrap();

        assert!(session.is_completed());
        assert!(session.current_card().is_none());
        assert_eq!(session.failed_count(), 1);
        assert_eq!(session.progress_message(), "Reviewed 2 cards (1 to relearn tomorrow)");
    }

    #[test]
    fn test_grades_are_persisted() {
        let mut store = seeded_store();
        let mut session = ReviewSession::new(store.due_cards(now()).unwrap());
        let id = session.current_card().unwrap().id;

        let updated = session.grade_current_card(ReviewQuality::Easy, now(), &mut store).unwrap();

        assert_eq!(store.get(id).unwrap(), updated);
        assert_eq!(updated.next_review_at, now() + TimeDelta::days(1));
        assert_eq!(store.due_cards(now()).unwrap().len(), 1);
    }

    #[test]
    fn test_grading_empty_session_fails() {
        let mut store = MemoryCardStore::default();
        let mut session = ReviewSession::new(Vec::new());

        assert!(session.is_completed());
        let err = session.grade_current_card(ReviewQuality::Good, now(), &mut store).unwrap_err();
        assert!(matches!(err, Error::SessionComplete));
    }
}
