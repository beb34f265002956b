use crate::pipeline::Pipeline;
use crate::scrapers::viewing_form_url;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use tracing::{debug, info, warn};

/// Comment left on a card once its viewing request went out
pub const VIEWING_COMMENT: &str = "Viewing requested";

/// Progress of one viewing request
#[derive(Debug, Clone, PartialEq)]
pub enum ViewingState {
    Idle,
    LinkExtracted { listing_url: String },
    TokenObtained { form_url: String, token: String },
    FormSubmitted,
    CommentPosted,
    Aborted(AbortReason),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AbortReason {
    CardUnavailable,
    NoListingLink,
    FormUnavailable,
    NoToken,
    FormRejected,
    /// The request was sent, only the bookkeeping comment is missing
    CommentFailed,
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbortReason::CardUnavailable => write!(f, "card could not be fetched"),
            AbortReason::NoListingLink => write!(f, "no listing link in description"),
            AbortReason::FormUnavailable => write!(f, "viewing form could not be fetched"),
            AbortReason::NoToken => write!(f, "no verification token on viewing form"),
            AbortReason::FormRejected => write!(f, "viewing request was rejected"),
            AbortReason::CommentFailed => write!(f, "comment could not be posted"),
        }
    }
}

impl ViewingState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ViewingState::CommentPosted | ViewingState::Aborted(_))
    }
}

/// First URL mentioned in a piece of text
pub fn extract_link(text: &str) -> Option<&str> {
    static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r#"https?://[^\s<>()\[\]"']+"#).expect("valid regex")
    });

    LINK_RE.find(text).map(|m| m.as_str())
}

impl Pipeline {
    /// Request a viewing for the listing linked from a card, then comment on the card
    pub async fn request_viewing(&self, card_id: &str) -> ViewingState {
        let mut state = ViewingState::Idle;
        while !state.is_terminal() {
            state = self.advance(card_id, state).await;
        }

        match &state {
            ViewingState::Aborted(reason) => {
                info!(card_id, %reason, "Viewing request aborted");
            }
            _ => info!(card_id, "Viewing request recorded on card"),
        }
        state
    }

    async fn advance(&self, card_id: &str, state: ViewingState) -> ViewingState {
        match state {
            ViewingState::Idle => {
                let card = match self.board.get_card(card_id).await {
                    Ok(card) => card,
                    Err(e) => {
                        warn!(card_id, error = %e, "Failed to fetch card");
                        return ViewingState::Aborted(AbortReason::CardUnavailable);
                    }
                };
                match extract_link(&card.desc) {
                    Some(url) => ViewingState::LinkExtracted {
                        listing_url: url.to_string(),
                    },
                    None => {
                        warn!(card_id, "No listing link in card description");
                        ViewingState::Aborted(AbortReason::NoListingLink)
                    }
                }
            }
            ViewingState::LinkExtracted { listing_url } => {
                let form_url = viewing_form_url(&listing_url);
                debug!(card_id, url = %form_url, "Loading viewing form");
                match self.site.viewing_token(&form_url).await {
                    Ok(Some(token)) => ViewingState::TokenObtained { form_url, token },
                    Ok(None) => {
                        warn!(card_id, url = %form_url, "No verification token on viewing form");
                        ViewingState::Aborted(AbortReason::NoToken)
                    }
                    Err(e) => {
                        warn!(card_id, error = %e, "Failed to load viewing form");
                        ViewingState::Aborted(AbortReason::FormUnavailable)
                    }
                }
            }
            ViewingState::TokenObtained { form_url, token } => {
                match self
                    .site
                    .submit_viewing_request(&form_url, &token, &self.viewing)
                    .await
                {
                    Ok(()) => ViewingState::FormSubmitted,
                    Err(e) => {
                        warn!(card_id, error = %e, "Failed to submit viewing request");
                        ViewingState::Aborted(AbortReason::FormRejected)
                    }
                }
            }
            ViewingState::FormSubmitted => {
                match self.board.add_comment(card_id, VIEWING_COMMENT).await {
                    Ok(()) => ViewingState::CommentPosted,
                    Err(e) => {
                        warn!(card_id, error = %e, "Failed to post viewing comment");
                        ViewingState::Aborted(AbortReason::CommentFailed)
                    }
                }
            }
            terminal => terminal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::testing::{BoardWrite, RecordingBoard};
    use crate::models::Card;
    use crate::pipeline::test_support::{pipeline_for, LogCapture};
    use std::sync::Arc;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FORM_PATH: &str = "/koop/groningen/huis-2-logger-166/bezichtiging";

    fn linked_card(server: &MockServer) -> Card {
        let mut card = Card::fresh("c1", "Logger 166");
        card.desc = format!("{}/koop/groningen/huis-2-logger-166/", server.uri());
        card
    }

    async fn mount_form(server: &MockServer, post_status: u16) {
        Mock::given(method("GET"))
            .and(path(FORM_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<form method="post"><input name="__RequestVerificationToken" type="hidden" value="tok-1" /></form>"#,
            ))
            .mount(server)
            .await;
        Mock::given(method("POST"))
            .and(path(FORM_PATH))
            .and(body_string_contains("__RequestVerificationToken=tok-1"))
            .and(body_string_contains("Achternaam=Jansen"))
            .respond_with(ResponseTemplate::new(post_status))
            .expect(1)
            .mount(server)
            .await;
    }

    #[test]
    fn test_extract_link_takes_first() {
        let text = "See https://www.funda.nl/koop/a/huis-1-x/ and https://example.com/";
        assert_eq!(extract_link(text), Some("https://www.funda.nl/koop/a/huis-1-x/"));
        assert_eq!(extract_link("no link here"), None);
    }

    #[test]
    fn test_extract_link_stops_at_markdown_paren() {
        assert_eq!(
            extract_link("[listing](https://www.funda.nl/koop/a/huis-1-x/)"),
            Some("https://www.funda.nl/koop/a/huis-1-x/")
        );
    }

    #[tokio::test]
    async fn test_full_viewing_request() {
        let server = MockServer::start().await;
        mount_form(&server, 200).await;

        let board = Arc::new(RecordingBoard::with_cards(vec![linked_card(&server)]));
        let pipeline = pipeline_for(&server, board.clone());

        let state = pipeline.request_viewing("c1").await;

        assert_eq!(state, ViewingState::CommentPosted);
        assert_eq!(
            board.writes(),
            vec![BoardWrite::Comment {
                card_id: "c1".to_string(),
                text: VIEWING_COMMENT.to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_no_link_aborts_silently() {
        let server = MockServer::start().await;

        let mut card = Card::fresh("c1", "Logger 166");
        card.desc = "Call the agent first".to_string();
        let board = Arc::new(RecordingBoard::with_cards(vec![card]));
        let pipeline = pipeline_for(&server, board.clone());

        let state = pipeline.request_viewing("c1").await;

        assert_eq!(state, ViewingState::Aborted(AbortReason::NoListingLink));
        assert!(board.writes().is_empty());
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_card_aborts() {
        let server = MockServer::start().await;
        let board = Arc::new(RecordingBoard::default());
        let pipeline = pipeline_for(&server, board.clone());

        let state = pipeline.request_viewing("missing").await;

        assert_eq!(state, ViewingState::Aborted(AbortReason::CardUnavailable));
        assert!(board.writes().is_empty());
    }

    #[tokio::test]
    async fn test_missing_token_aborts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(FORM_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("<form></form>"))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let board = Arc::new(RecordingBoard::with_cards(vec![linked_card(&server)]));
        let pipeline = pipeline_for(&server, board.clone());

        let state = pipeline.request_viewing("c1").await;

        assert_eq!(state, ViewingState::Aborted(AbortReason::NoToken));
        assert!(board.writes().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_form_posts_no_comment() {
        let server = MockServer::start().await;
        mount_form(&server, 500).await;

        let board = Arc::new(RecordingBoard::with_cards(vec![linked_card(&server)]));
        let pipeline = pipeline_for(&server, board.clone());

        let state = pipeline.request_viewing("c1").await;

        assert_eq!(state, ViewingState::Aborted(AbortReason::FormRejected));
        assert!(board.writes().is_empty());
    }

    #[tokio::test]
    async fn test_comment_failure_after_submission() {
        let server = MockServer::start().await;
        mount_form(&server, 200).await;

        let board = Arc::new(RecordingBoard::with_cards(vec![linked_card(&server)]).failing());
        let pipeline = pipeline_for(&server, board.clone());

        let state = pipeline.request_viewing("c1").await;

        assert_eq!(state, ViewingState::Aborted(AbortReason::CommentFailed));
    }

    #[tokio::test]
    async fn test_rejected_form_logs_one_warning() {
        let server = MockServer::start().await;
        mount_form(&server, 500).await;

        let board = Arc::new(RecordingBoard::with_cards(vec![linked_card(&server)]));
        let pipeline = pipeline_for(&server, board.clone());

        let logs = LogCapture::default();
        let _guard = logs.install();
        pipeline.request_viewing("c1").await;

        assert_eq!(logs.warnings(), 1);
    }

    #[tokio::test]
    async fn test_missing_link_logs_one_warning() {
        let server = MockServer::start().await;

        let mut card = Card::fresh("c1", "Logger 166");
        card.desc = "Call the agent first".to_string();
        let board = Arc::new(RecordingBoard::with_cards(vec![card]));
        let pipeline = pipeline_for(&server, board.clone());

        let logs = LogCapture::default();
        let _guard = logs.install();
        pipeline.request_viewing("c1").await;

        assert_eq!(logs.warnings(), 1);
    }
}
