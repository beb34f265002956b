use crate::models::ViewingDetails;
use crate::scrapers::SiteEndpoints;
use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

const DEFAULT_TRELLO_API_URL: &str = "https://api.trello.com/1";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub trello_api_url: String,
    pub trello_key: String,
    pub trello_token: String,
    pub board_id: Option<String>,
    pub viewing_list_id: Option<String>,
    pub viewing: Option<ViewingDetails>,
    pub site: SiteEndpoints,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |name: &str| lookup(name).with_context(|| format!("{} must be set", name));
        let site_defaults = SiteEndpoints::default();

        let viewing = match lookup("VIEWING_FIRST_NAME") {
            Some(first_name) => Some(ViewingDetails {
                first_name,
                message: require("VIEWING_MESSAGE")?,
                salutation: require("VIEWING_SALUTATION")?,
                last_name: require("VIEWING_LAST_NAME")?,
                phone: require("VIEWING_PHONE")?,
                email: require("VIEWING_EMAIL")?,
            }),
            None => None,
        };

        Ok(Self {
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            trello_api_url: lookup("TRELLO_API_URL")
                .unwrap_or_else(|| DEFAULT_TRELLO_API_URL.to_string()),
            trello_key: require("TRELLO_API_KEY")?,
            trello_token: require("TRELLO_API_TOKEN")?,
            board_id: lookup("TRELLO_BOARD_ID"),
            viewing_list_id: lookup("VIEWING_LIST_ID"),
            viewing,
            site: SiteEndpoints {
                base_url: lookup("FUNDA_BASE_URL").unwrap_or(site_defaults.base_url),
                suggest_url: lookup("FUNDA_SUGGEST_URL").unwrap_or(site_defaults.suggest_url),
            },
        })
    }
}
