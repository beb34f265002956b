//! Card enrichment pipeline.
//!
//! `populate_card` resolves a card's address to a listing and enriches the
//! card with it. `request_viewing` books a viewing for a card whose listing
//! is already linked. Neither returns an error: every failure is logged
//! where the affected branch stops.

pub mod enrich;
pub mod populate;
pub mod viewing;

use crate::board::TaskBoard;
use crate::models::ViewingDetails;
use crate::scrapers::ListingSite;
use std::sync::Arc;

#[derive(Clone)]
pub struct Pipeline {
    site: Arc<dyn ListingSite>,
    board: Arc<dyn TaskBoard>,
    viewing: Arc<ViewingDetails>,
}

impl Pipeline {
    pub fn new(
        site: Arc<dyn ListingSite>,
        board: Arc<dyn TaskBoard>,
        viewing: ViewingDetails,
    ) -> Self {
        Self {
            site,
            board,
            viewing: Arc::new(viewing),
        }
    }
}
