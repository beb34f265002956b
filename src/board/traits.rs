use crate::models::Card;
use anyhow::Result;
use async_trait::async_trait;

/// The task board holding one card per property
#[async_trait]
pub trait TaskBoard: Send + Sync {
    async fn get_card(&self, card_id: &str) -> Result<Card>;

    async fn update_description(&self, card_id: &str, description: &str) -> Result<()>;

    /// Attach a URL to a card, optionally making it the card cover
    async fn create_attachment(&self, card_id: &str, url: &str, set_cover: bool) -> Result<()>;

    async fn add_comment(&self, card_id: &str, text: &str) -> Result<()>;

    async fn list_board_cards(&self, board_id: &str) -> Result<Vec<Card>>;
}
