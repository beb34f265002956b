use crate::models::ListingCandidate;

/// Pick the listing whose URL contains the normalized address.
///
/// First match wins when several candidates qualify.
pub fn match_listing(
    candidates: Vec<ListingCandidate>,
    normalized_address: &str,
) -> Option<ListingCandidate> {
    candidates
        .into_iter()
        .find(|candidate| candidate.url.contains(normalized_address))
}
