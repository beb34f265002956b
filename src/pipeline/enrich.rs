use crate::models::{Card, PropertyListing};
use crate::pipeline::Pipeline;
use anyhow::Result;
use tracing::{debug, info, warn};

impl Pipeline {
    /// Link the listing in the card description and use its first photo as
    /// the card cover. Each branch only runs when the card lacks that piece,
    /// and the two run concurrently without depending on each other.
    pub async fn enrich(&self, card: &Card, listing: &PropertyListing) {
        let describe = async {
            if !card.has_blank_description() {
                debug!(card_id = %card.id, "Description already set");
                return;
            }
            if let Err(e) = self.board.update_description(&card.id, &listing.url).await {
                warn!(card_id = %card.id, error = %e, "Failed to update card description");
            }
        };

        let cover = async {
            if card.has_cover_attachment() {
                debug!(card_id = %card.id, "Cover already set");
                return;
            }
            if let Err(e) = self.attach_cover_photo(card, listing).await {
                warn!(card_id = %card.id, error = %e, "Failed to attach cover photo");
            }
        };

        tokio::join!(describe, cover);
    }

    async fn attach_cover_photo(&self, card: &Card, listing: &PropertyListing) -> Result<()> {
        let Some(photo) = self.site.primary_photo(&listing.url).await? else {
            return Ok(());
        };

        self.board.create_attachment(&card.id, &photo.url, true).await?;
        info!(card_id = %card.id, photo = %photo.url, "Cover photo attached");
        Ok(())
    }
}
