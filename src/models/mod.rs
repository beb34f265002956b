use serde::{Deserialize, Serialize};

/// Opaque geocoding token returned by the suggestion endpoint
pub type AreaIdentifier = String;

/// One entry of a listing search result page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListingCandidate {
    pub url: String,
}

/// The listing a card's address resolved to
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyListing {
    pub url: String,
}

impl From<ListingCandidate> for PropertyListing {
    fn from(candidate: ListingCandidate) -> Self {
        Self { url: candidate.url }
    }
}

/// A photo of a listing, as published on its detail page
#[derive(Debug, Clone, PartialEq)]
pub struct Photo {
    pub url: String,
}

/// A card on the task board. The title holds the property address.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Card {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(rename = "idAttachmentCover", default)]
    pub id_attachment_cover: Option<String>,
}

impl Card {
    /// A card created from a webhook event: no description, no cover yet
    pub fn fresh(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn has_cover_attachment(&self) -> bool {
        self.id_attachment_cover
            .as_deref()
            .is_some_and(|id| !id.is_empty())
    }

    pub fn has_blank_description(&self) -> bool {
        self.desc.trim().is_empty()
    }
}

/// Personal details sent along with every viewing request
#[derive(Debug, Clone, Default)]
pub struct ViewingDetails {
    pub message: String,
    pub salutation: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
}
