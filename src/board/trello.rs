use crate::board::traits::TaskBoard;
use crate::models::Card;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::json;
use tracing::{debug, info};

/// Trello REST API client
pub struct TrelloClient {
    client: Client,
    api_url: String,
    key: String,
    token: String,
}

impl TrelloClient {
    pub fn new(
        client: Client,
        api_url: impl Into<String>,
        key: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            key: key.into(),
            token: token.into(),
        }
    }

    fn credentials(&self) -> [(&str, &str); 2] {
        [("key", self.key.as_str()), ("token", self.token.as_str())]
    }

    fn card_url(&self, card_id: &str) -> String {
        format!("{}/cards/{}", self.api_url, card_id)
    }
}

/// Fail on non-success status, keeping the body for the log line
async fn ensure_success(response: Response, what: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    anyhow::bail!("{} failed with status {}: {}", what, status, body)
}

#[async_trait]
impl TaskBoard for TrelloClient {
    async fn get_card(&self, card_id: &str) -> Result<Card> {
        let response = self
            .client
            .get(self.card_url(card_id))
            .query(&self.credentials())
            .send()
            .await
            .context("Failed to fetch card")?;

        ensure_success(response, "Fetching card")
            .await?
            .json::<Card>()
            .await
            .context("Failed to decode card")
    }

    async fn update_description(&self, card_id: &str, description: &str) -> Result<()> {
        let response = self
            .client
            .put(self.card_url(card_id))
            .query(&self.credentials())
            .json(&json!({ "desc": description }))
            .send()
            .await
            .context("Failed to update card description")?;

        let response = ensure_success(response, "Updating card description").await?;
        info!(card_id, status = %response.status(), "Card description updated");
        Ok(())
    }

    async fn create_attachment(&self, card_id: &str, url: &str, set_cover: bool) -> Result<()> {
        let response = self
            .client
            .post(format!("{}/attachments", self.card_url(card_id)))
            .query(&self.credentials())
            .json(&json!({ "url": url, "setCover": set_cover }))
            .send()
            .await
            .context("Failed to create attachment")?;

        let response = ensure_success(response, "Creating attachment").await?;
        info!(card_id, status = %response.status(), "Attachment created");
        Ok(())
    }

    async fn add_comment(&self, card_id: &str, text: &str) -> Result<()> {
        let response = self
            .client
            .post(format!("{}/actions/comments", self.card_url(card_id)))
            .query(&self.credentials())
            .json(&json!({ "text": text }))
            .send()
            .await
            .context("Failed to post comment")?;

        ensure_success(response, "Posting comment").await?;
        info!(card_id, "Comment posted");
        Ok(())
    }

    async fn list_board_cards(&self, board_id: &str) -> Result<Vec<Card>> {
        let response = self
            .client
            .get(format!("{}/boards/{}/cards", self.api_url, board_id))
            .query(&self.credentials())
            .send()
            .await
            .context("Failed to list board cards")?;

        let cards = ensure_success(response, "Listing board cards")
            .await?
            .json::<Vec<Card>>()
            .await
            .context("Failed to decode board cards")?;

        debug!(board_id, count = cards.len(), "Fetched board cards");
        Ok(cards)
    }
}
