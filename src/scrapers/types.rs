use serde::{Deserialize, Serialize};

/// Where the listing site lives
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteEndpoints {
    /// Site root, search pages hang off `/zoeken/koop`
    pub base_url: String,
    /// Geocoding suggestion endpoint
    pub suggest_url: String,
}

impl Default for SiteEndpoints {
    fn default() -> Self {
        Self {
            base_url: "https://www.funda.nl".to_string(),
            suggest_url: "https://zb.funda.info/suggest/alternatives/".to_string(),
        }
    }
}

/// Suggestion endpoint response
#[derive(Debug, Deserialize)]
pub struct Alternatives {
    #[serde(rename = "Results", default)]
    pub results: Vec<AlternativeResult>,
}

#[derive(Debug, Deserialize)]
pub struct AlternativeResult {
    #[serde(rename = "GeoIdentifier")]
    pub geo_identifier: String,
}

/// Structured data embedded in a search results page
#[derive(Debug, Deserialize)]
pub struct SearchResult {
    #[serde(rename = "itemListElement", default)]
    pub item_list_element: Vec<ItemListElement>,
}

#[derive(Debug, Deserialize)]
pub struct ItemListElement {
    pub url: String,
}

/// Structured data embedded in a listing detail page
#[derive(Debug, Deserialize)]
pub struct ListingDetail {
    #[serde(default)]
    pub photo: Vec<PhotoObject>,
}

#[derive(Debug, Deserialize)]
pub struct PhotoObject {
    #[serde(rename = "contentUrl")]
    pub content_url: String,
}
