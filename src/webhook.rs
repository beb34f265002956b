//! Task-board webhook endpoint.
//!
//! Always answers 200 OK: the board does not retry failed deliveries and
//! every processing failure is already logged by the pipeline.

use crate::models::Card;
use crate::pipeline::Pipeline;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Translation key of an `updateCard` action that moved a card between lists
pub const MOVE_CARD_KEY: &str = "action_move_card_from_list_to_list";

/// State shared with the webhook handler
#[derive(Clone)]
pub struct WebhookState {
    pub pipeline: Pipeline,
    pub viewing_list_id: Arc<str>,
}

#[derive(Debug, Deserialize)]
pub struct WebhookPayload {
    pub action: Action,
}

#[derive(Debug, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub kind: String,
    pub display: Option<ActionDisplay>,
    pub data: Option<ActionData>,
}

#[derive(Debug, Deserialize)]
pub struct ActionDisplay {
    #[serde(rename = "translationKey")]
    pub translation_key: String,
}

#[derive(Debug, Deserialize)]
pub struct ActionData {
    pub card: Option<CardRef>,
}

#[derive(Debug, Deserialize)]
pub struct CardRef {
    pub id: String,
    pub name: String,
    #[serde(rename = "idList")]
    pub id_list: Option<String>,
}

/// What a webhook delivery asks the pipeline to do
#[derive(Debug, PartialEq)]
pub enum WebhookEvent {
    CardCreated { card_id: String, name: String },
    CardMoved { card_id: String, list_id: String },
    Ignored,
}

impl WebhookPayload {
    pub fn into_event(self) -> WebhookEvent {
        let Action {
            kind,
            display,
            data,
        } = self.action;
        let card = data.and_then(|data| data.card);

        match (kind.as_str(), card) {
            ("createCard", Some(card)) => WebhookEvent::CardCreated {
                card_id: card.id,
                name: card.name,
            },
            ("updateCard", Some(CardRef { id, id_list: Some(list_id), .. }))
                if display
                    .as_ref()
                    .is_some_and(|d| d.translation_key == MOVE_CARD_KEY) =>
            {
                WebhookEvent::CardMoved {
                    card_id: id,
                    list_id,
                }
            }
            _ => WebhookEvent::Ignored,
        }
    }
}

/// Build the axum router for the webhook endpoints
pub fn router(state: WebhookState) -> Router {
    Router::new()
        .route("/", post(handle_webhook).head(|| async { StatusCode::OK }))
        .route("/health", get(|| async { "ok" }))
        .with_state(state)
}

async fn handle_webhook(State(state): State<WebhookState>, body: String) -> StatusCode {
    let payload = match serde_json::from_str::<WebhookPayload>(&body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "Undecodable webhook payload");
            return StatusCode::OK;
        }
    };

    match payload.into_event() {
        WebhookEvent::CardCreated { card_id, name } => {
            info!(card_id = %card_id, address = %name, "Card created");
            state.pipeline.populate_card(&Card::fresh(card_id, name)).await;
        }
        WebhookEvent::CardMoved { card_id, list_id } if *list_id == *state.viewing_list_id => {
            info!(card_id = %card_id, "Card moved to viewing list");
            state.pipeline.request_viewing(&card_id).await;
        }
        WebhookEvent::CardMoved { card_id, list_id } => {
            debug!(card_id = %card_id, list_id = %list_id, "Card moved elsewhere");
        }
        WebhookEvent::Ignored => {
            debug!("Ignoring webhook action");
        }
    }

    StatusCode::OK
}
