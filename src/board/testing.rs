use crate::board::traits::TaskBoard;
use crate::models::Card;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// A write issued against [`RecordingBoard`]
#[derive(Debug, Clone, PartialEq)]
pub enum BoardWrite {
    Description { card_id: String, description: String },
    Attachment { card_id: String, url: String, set_cover: bool },
    Comment { card_id: String, text: String },
}

/// In-memory board that records every write
#[derive(Default)]
pub struct RecordingBoard {
    cards: Mutex<HashMap<String, Card>>,
    writes: Mutex<Vec<BoardWrite>>,
    fail_writes: bool,
}

impl RecordingBoard {
    pub fn with_cards(cards: Vec<Card>) -> Self {
        Self {
            cards: Mutex::new(cards.into_iter().map(|c| (c.id.clone(), c)).collect()),
            ..Self::default()
        }
    }

    /// Every write fails, but is still recorded
    pub fn failing(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn writes(&self) -> Vec<BoardWrite> {
        self.writes.lock().unwrap().clone()
    }

    fn record(&self, write: BoardWrite) -> Result<()> {
        self.writes.lock().unwrap().push(write);
        if self.fail_writes {
            return Err(anyhow!("board unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl TaskBoard for RecordingBoard {
    async fn get_card(&self, card_id: &str) -> Result<Card> {
        self.cards
            .lock()
            .unwrap()
            .get(card_id)
            .cloned()
            .ok_or_else(|| anyhow!("no card {}", card_id))
    }

    async fn update_description(&self, card_id: &str, description: &str) -> Result<()> {
        self.record(BoardWrite::Description {
            card_id: card_id.to_string(),
            description: description.to_string(),
        })
    }

    async fn create_attachment(&self, card_id: &str, url: &str, set_cover: bool) -> Result<()> {
        self.record(BoardWrite::Attachment {
            card_id: card_id.to_string(),
            url: url.to_string(),
            set_cover,
        })
    }

    async fn add_comment(&self, card_id: &str, text: &str) -> Result<()> {
        self.record(BoardWrite::Comment {
            card_id: card_id.to_string(),
            text: text.to_string(),
        })
    }

    async fn list_board_cards(&self, _board_id: &str) -> Result<Vec<Card>> {
        Ok(self.cards.lock().unwrap().values().cloned().collect())
    }
}
