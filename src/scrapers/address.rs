/// Canonical, URL-safe form of a free-text address.
///
/// Listing URLs embed the street name and house number in this shape,
/// so the result is also what candidate URLs are matched against.
pub fn normalize_address(address: &str) -> String {
    address
        .replace(' ', "-")
        .replace(['.', '\''], "")
        .to_lowercase()
}
