use crate::models::{Card, PropertyListing};
use crate::pipeline::Pipeline;
use crate::scrapers::{match_listing, normalize_address};
use anyhow::Result;
use futures::future::join_all;
use tracing::{debug, info, warn};

impl Pipeline {
    /// Resolve the card's address to a listing and enrich the card with it
    pub async fn populate_card(&self, card: &Card) {
        if !card.has_blank_description() && card.has_cover_attachment() {
            debug!(card_id = %card.id, "Card already populated");
            return;
        }

        match self.resolve_listing(&card.name).await {
            Ok(Some(listing)) => {
                info!(card_id = %card.id, listing = %listing.url, "Resolved listing");
                self.enrich(card, &listing).await;
            }
            Ok(None) => {
                info!(card_id = %card.id, address = %card.name, "No listing found for address");
            }
            Err(e) => {
                warn!(card_id = %card.id, address = %card.name, error = %e, "Listing lookup failed");
            }
        }
    }

    /// Address to listing: suggestions, then search, then URL match
    pub async fn resolve_listing(&self, address: &str) -> Result<Option<PropertyListing>> {
        let areas = self.site.resolve_alternatives(address).await?;
        if areas.is_empty() {
            return Ok(None);
        }

        let candidates = self.site.search(&areas).await?;
        let normalized = normalize_address(address);

        Ok(match_listing(candidates, &normalized).map(PropertyListing::from))
    }

    /// Populate every card on a board at once. Returns how many cards were visited.
    pub async fn populate_board(&self, board_id: &str) -> Result<usize> {
        let cards = self.board.list_board_cards(board_id).await?;
        info!(board_id, count = cards.len(), "Populating board");

        join_all(cards.iter().map(|card| self.populate_card(card))).await;

        Ok(cards.len())
    }
}
