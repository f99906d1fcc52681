//! Picks the cards that are due and orders them for review.
use super::Card;
use chrono::{DateTime, Utc};

/// Cards whose next review is at or before `now`, soonest first.
pub fn due_cards<'a, I>(cards: I, now: DateTime<Utc>) -> Vec<Card>
where
    I: IntoIterator<Item = &'a Card>,
{
    let mut due: Vec<Card> = cards
        .into_iter()
        .filter(|card| card.is_due(now))
        .cloned()
        .collect();
    due.sort_by_key(|card| card.next_review_at);
    due
}
