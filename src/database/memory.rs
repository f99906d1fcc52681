//! In-memory card store, used for tests and for throwaway sessions.
use super::CardStore;
use crate::error::{Error, Result};
use crate::models::{Card, selection};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryCardStore {
    cards: HashMap<Uuid, Card>,
    order: Vec<Uuid>,
}

impl MemoryCardStore {
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl CardStore for MemoryCardStore {
    fn get(&self, id: Uuid) -> Result<Card> {
        self.cards.get(&id).cloned().ok_or(Error::CardNotFound(id))
    }

    fn put(&mut self, card: &Card) -> Result<()> {
        if self.cards.insert(card.id, card.clone()).is_none() {
            self.order.push(card.id);
        }
        Ok(())
    }

    fn delete(&mut self, id: Uuid) -> Result<()> {
        self.cards.remove(&id).ok_or(Error::CardNotFound(id))?;
        self.order.retain(|existing| *existing != id);
        Ok(())
    }

    fn all(&self) -> Result<Vec<Card>> {
        Ok(self
            .order
            .iter()
            .filter_map(|id| self.cards.get(id).cloned())
            .collect())
    }

    fn due_cards(&self, now: DateTime<Utc>) -> Result<Vec<Card>> {
        // Walk insertion order so equal review times keep a stable order.
        let cards = self.order.iter().filter_map(|id| self.cards.get(id));
        Ok(selection::due_cards(cards, now))
    }
}
