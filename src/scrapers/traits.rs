use crate::models::{AreaIdentifier, ListingCandidate, Photo, ViewingDetails};
use anyhow::Result;
use async_trait::async_trait;

/// Read and write access to a real-estate listing site.
///
/// `Err` means the upstream call itself failed. An empty or `None`
/// answer means the site had nothing usable.
#[async_trait]
pub trait ListingSite: Send + Sync {
    /// Street-level area identifiers suggested for a raw address
    async fn resolve_alternatives(&self, address: &str) -> Result<Vec<AreaIdentifier>>;

    /// Listings for sale within the given areas
    async fn search(&self, areas: &[AreaIdentifier]) -> Result<Vec<ListingCandidate>>;

    /// First photo published on a listing's detail page
    async fn primary_photo(&self, listing_url: &str) -> Result<Option<Photo>>;

    /// Anti-forgery token of the viewing-request form
    async fn viewing_token(&self, form_url: &str) -> Result<Option<String>>;

    /// Post the viewing-request form
    async fn submit_viewing_request(
        &self,
        form_url: &str,
        token: &str,
        details: &ViewingDetails,
    ) -> Result<()>;

    /// Get the name of the listing site
    fn source_name(&self) -> &'static str;
}
