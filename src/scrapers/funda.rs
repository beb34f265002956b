use crate::models::{AreaIdentifier, ListingCandidate, Photo, ViewingDetails};
use crate::scrapers::embedded::{extract_embedded_json, LD_JSON_MARKER};
use crate::scrapers::traits::ListingSite;
use crate::scrapers::types::{Alternatives, ListingDetail, SearchResult, SiteEndpoints};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, info, warn};

/// Only street-level suggestions narrow a search down to one address
const STREET_MARKER: &str = "/straat-";

/// Suggestion result cap
const MAX_ALTERNATIVES: &str = "7";

/// Listing category, "for sale"
const LISTING_TYPE: &str = "koop";

/// Path segment of a listing's viewing-request form
const VIEWING_SEGMENT: &str = "bezichtiging";

const TOKEN_FIELD: &str = "__RequestVerificationToken";

/// Funda listing site client
pub struct FundaClient {
    client: Client,
    endpoints: SiteEndpoints,
}

impl FundaClient {
    /// Create a client against the given endpoints
    pub fn with_endpoints(client: Client, endpoints: SiteEndpoints) -> Self {
        Self { client, endpoints }
    }

    /// Fetch a page and return its body, failing on non-success status
    async fn fetch_html(&self, url: &str) -> Result<String> {
        debug!("Fetching URL: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", url))?;

        if !response.status().is_success() {
            anyhow::bail!("Failed to fetch {}: {}", url, response.status());
        }

        let html = response.text().await.context("Failed to read response body")?;
        debug!("Downloaded {} bytes of HTML", html.len());
        Ok(html)
    }
}

/// URL of the viewing-request form belonging to a listing
pub fn viewing_form_url(listing_url: &str) -> String {
    format!("{}/{}", listing_url.trim_end_matches('/'), VIEWING_SEGMENT)
}

/// Decode the structured-data block of a page, `None` when absent or malformed
fn parse_embedded<T: serde::de::DeserializeOwned>(html: &str, url: &str) -> Option<T> {
    let Some(block) = extract_embedded_json(html, LD_JSON_MARKER) else {
        warn!(url, "No structured data block on page");
        return None;
    };

    match serde_json::from_str(block) {
        Ok(data) => Some(data),
        Err(e) => {
            warn!(url, error = %e, "Malformed structured data block");
            None
        }
    }
}

/// Value of the anti-forgery hidden input on a form page
fn parse_token(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(&format!(r#"input[name="{}"]"#, TOKEN_FIELD)).ok()?;

    document
        .select(&selector)
        .next()
        .and_then(|input| input.value().attr("value"))
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl ListingSite for FundaClient {
    async fn resolve_alternatives(&self, address: &str) -> Result<Vec<AreaIdentifier>> {
        let response = self
            .client
            .get(&self.endpoints.suggest_url)
            .query(&[
                ("query", address),
                ("max", MAX_ALTERNATIVES),
                ("type", LISTING_TYPE),
                ("areatype", ""),
            ])
            .send()
            .await
            .context("Failed to fetch address suggestions")?;

        if !response.status().is_success() {
            anyhow::bail!("Suggestion endpoint returned status: {}", response.status());
        }

        let alternatives = match response.json::<Alternatives>().await {
            Ok(alternatives) => alternatives,
            Err(e) => {
                warn!(address, error = %e, "Undecodable suggestion response");
                return Ok(Vec::new());
            }
        };

        let areas: Vec<AreaIdentifier> = alternatives
            .results
            .into_iter()
            .map(|result| result.geo_identifier)
            .filter(|id| id.contains(STREET_MARKER))
            .collect();

        info!(address, count = areas.len(), "Resolved street-level alternatives");
        Ok(areas)
    }

    async fn search(&self, areas: &[AreaIdentifier]) -> Result<Vec<ListingCandidate>> {
        let selected_area =
            serde_json::to_string(areas).context("Failed to encode selected areas")?;
        let url = format!("{}/zoeken/{}", self.endpoints.base_url, LISTING_TYPE);

        debug!("Searching {} for {}", url, selected_area);

        let response = self
            .client
            .get(&url)
            .query(&[("selected_area", selected_area.as_str())])
            .send()
            .await
            .context("Failed to fetch search results")?;

        if !response.status().is_success() {
            anyhow::bail!("Search page returned status: {}", response.status());
        }

        let html = response.text().await.context("Failed to read response body")?;

        let Some(result) = parse_embedded::<SearchResult>(&html, &url) else {
            return Ok(Vec::new());
        };

        let candidates: Vec<ListingCandidate> = result
            .item_list_element
            .into_iter()
            .map(|item| ListingCandidate { url: item.url })
            .collect();

        info!("Found {} listing candidates", candidates.len());
        Ok(candidates)
    }

    async fn primary_photo(&self, listing_url: &str) -> Result<Option<Photo>> {
        let html = self.fetch_html(listing_url).await?;

        let photo = parse_embedded::<ListingDetail>(&html, listing_url)
            .and_then(|detail| detail.photo.into_iter().next())
            .map(|photo| Photo {
                url: photo.content_url,
            });

        if photo.is_none() {
            warn!(url = listing_url, "Listing has no photo");
        }
        Ok(photo)
    }

    async fn viewing_token(&self, form_url: &str) -> Result<Option<String>> {
        let html = self.fetch_html(form_url).await?;
        Ok(parse_token(&html))
    }

    async fn submit_viewing_request(
        &self,
        form_url: &str,
        token: &str,
        details: &ViewingDetails,
    ) -> Result<()> {
        let form = [
            (TOKEN_FIELD, token),
            ("Opmerking", details.message.as_str()),
            ("Aanhef", details.salutation.as_str()),
            ("Voornaam", details.first_name.as_str()),
            ("Achternaam", details.last_name.as_str()),
            ("Telefoon", details.phone.as_str()),
            ("Email", details.email.as_str()),
        ];

        let response = self
            .client
            .post(form_url)
            .form(&form)
            .send()
            .await
            .context("Failed to submit viewing request")?;

        if !response.status().is_success() {
            anyhow::bail!("Viewing request rejected: {}", response.status());
        }

        info!(url = form_url, "Viewing request submitted");
        Ok(())
    }

    fn source_name(&self) -> &'static str {
        "Funda"
    }
}
