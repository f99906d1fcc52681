//! SQLite card store.
//!
//! Card content lives in `flashcards`, the scheduling fields in `review_data`
//! (removed together with the card), and the review clock offset in
//! `app_state`. Timestamps are stored as RFC 3339 text in UTC with nanosecond
//! precision; the fixed width keeps text order equal to time order.

use super::CardStore;
use crate::error::{Error, Result};
use crate::models::{Card, ReviewClock};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, Transaction, params};
use std::path::Path;
use uuid::Uuid;

const CLOCK_OFFSET_KEY: &str = "clock_offset_days";

const SELECT_CARDS: &str = "SELECT f.id, f.question, f.answer, f.subject,
            r.repetition_count, r.ease_factor, r.next_review_at, r.last_reviewed_at
     FROM flashcards f
     JOIN review_data r ON f.id = r.flashcard_id";

pub struct SqliteCardStore {
    conn: Connection,
}

impl SqliteCardStore {
    /// Opens (or creates) the database file, creating parent directories.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        tracing::info!(path = %path.display(), "opened card database");
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Clock with the persisted day offset applied.
    pub fn review_clock(&self) -> Result<ReviewClock> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM app_state WHERE key = ?1",
                params![CLOCK_OFFSET_KEY],
                |row| row.get(0),
            )
            .optional()?;

        let offset_days = match value {
            Some(v) => v.parse::<i64>().unwrap_or_else(|err| {
                tracing::warn!(value = %v, %err, "corrupt review clock offset, using 0");
                0
            }),
            None => 0,
        };
        Ok(ReviewClock::new(offset_days))
    }

    /// Moves the review clock one day ahead.
    pub fn advance_day(&mut self) -> Result<ReviewClock> {
        let clock = self.review_clock()?.advanced();
        self.conn.execute(
            "INSERT INTO app_state (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![CLOCK_OFFSET_KEY, clock.offset_days.to_string()],
        )?;
        tracing::info!(offset_days = clock.offset_days, "advanced review clock");
        Ok(clock)
    }

    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM flashcards", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn query_cards(&self, sql: &str, params: &[&dyn rusqlite::ToSql]) -> Result<Vec<Card>> {
        let mut stmt = self.conn.prepare(sql)?;
        let cards = stmt
            .query_map(params, card_from_row)?
            .collect::<rusqlite::Result<Vec<Card>>>()?;
        Ok(cards)
    }
}

impl CardStore for SqliteCardStore {
    fn get(&self, id: Uuid) -> Result<Card> {
        let sql = format!("{SELECT_CARDS} WHERE f.id = ?1");
        self.conn
            .query_row(&sql, params![id.to_string()], card_from_row)
            .optional()?
            .ok_or(Error::CardNotFound(id))
    }

    fn put(&mut self, card: &Card) -> Result<()> {
        let tx = self.conn.transaction()?;
        write_card(&tx, card)?;
        tx.commit()?;
        Ok(())
    }

    /// One transaction for the whole batch; any failure rolls it back.
    fn put_all(&mut self, cards: &[Card]) -> Result<()> {
        let tx = self.conn.transaction()?;
        for card in cards {
            card.validate()?;
            write_card(&tx, card)?;
        }
        tx.commit()?;
        tracing::info!(count = cards.len(), "stored card batch");
        Ok(())
    }

    fn delete(&mut self, id: Uuid) -> Result<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM flashcards WHERE id = ?1", params![id.to_string()])?;
        if deleted == 0 {
            return Err(Error::CardNotFound(id));
        }
        tracing::info!(card_id = %id, "deleted card");
        Ok(())
    }

    fn all(&self) -> Result<Vec<Card>> {
        self.query_cards(&format!("{SELECT_CARDS} ORDER BY f.rowid ASC"), &[])
    }

    fn due_cards(&self, now: DateTime<Utc>) -> Result<Vec<Card>> {
        let sql = format!(
            "{SELECT_CARDS} WHERE r.next_review_at <= ?1 ORDER BY r.next_review_at ASC, f.rowid ASC"
        );
        self.query_cards(&sql, &[&datetime_to_text(now)])
    }
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS flashcards (
            id TEXT PRIMARY KEY,
            question TEXT NOT NULL,
            answer TEXT NOT NULL,
            subject TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS review_data (
            flashcard_id TEXT PRIMARY KEY,
            repetition_count INTEGER NOT NULL DEFAULT 0,
            ease_factor REAL NOT NULL DEFAULT 2.5,
            next_review_at TEXT NOT NULL,
            last_reviewed_at TEXT,
            FOREIGN KEY (flashcard_id) REFERENCES flashcards(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_review_data_next_review
            ON review_data(next_review_at);

        CREATE TABLE IF NOT EXISTS app_state (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );",
    )?;
    Ok(())
}

fn write_card(tx: &Transaction<'_>, card: &Card) -> Result<()> {
    // Upsert keeps the rowid, so listing order stays insertion order.
    tx.execute(
        "INSERT INTO flashcards (id, question, answer, subject) VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(id) DO UPDATE SET
            question = excluded.question,
            answer = excluded.answer,
            subject = excluded.subject",
        params![card.id.to_string(), card.question, card.answer, card.subject],
    )?;

    tx.execute(
        "INSERT INTO review_data (flashcard_id, repetition_count, ease_factor, next_review_at, last_reviewed_at)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(flashcard_id) DO UPDATE SET
            repetition_count = excluded.repetition_count,
            ease_factor = excluded.ease_factor,
            next_review_at = excluded.next_review_at,
            last_reviewed_at = excluded.last_reviewed_at",
        params![
            card.id.to_string(),
            card.repetition_count,
            card.ease_factor,
            datetime_to_text(card.next_review_at),
            card.last_reviewed_at.map(datetime_to_text),
        ],
    )?;
    Ok(())
}

fn card_from_row(row: &Row<'_>) -> rusqlite::Result<Card> {
    let id: String = row.get(0)?;
    let id = Uuid::parse_str(&id)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?;

    let last_reviewed_at = match row.get::<_, Option<String>>(7)? {
        Some(text) => Some(text_to_datetime(7, &text)?),
        None => None,
    };

    Ok(Card {
        id,
        question: row.get(1)?,
        answer: row.get(2)?,
        subject: row.get(3)?,
        repetition_count: row.get(4)?,
        ease_factor: row.get(5)?,
        next_review_at: text_to_datetime(6, &row.get::<_, String>(6)?)?,
        last_reviewed_at,
    })
}

fn datetime_to_text(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn text_to_datetime(column: usize, text: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|time| time.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}
