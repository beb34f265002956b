pub mod address;
pub mod embedded;
pub mod funda;
pub mod matching;
pub mod traits;
pub mod types;

pub use address::normalize_address;
pub use funda::{viewing_form_url, FundaClient};
pub use matching::match_listing;
pub use traits::ListingSite;
pub use types::SiteEndpoints;

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;

/// The listing site blocks clients that do not look like a browser
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Build the HTTP client shared by every outbound call.
///
/// Cookies are kept so the viewing form's anti-forgery cookie goes back
/// with the form POST.
pub fn build_client() -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent(USER_AGENT)
        .cookie_store(true)
        .build()
        .context("Failed to create HTTP client")
}
