/// Opening tag of the structured-data block listing pages embed
pub const LD_JSON_MARKER: &str = r#"<script type="application/ld+json">"#;

const SCRIPT_END: &str = "</script>";

/// Text between the first `marker` and the `</script>` that follows it.
///
/// Only the first block on the page is considered.
pub fn extract_embedded_json<'a>(html: &'a str, marker: &str) -> Option<&'a str> {
    let start = html.find(marker)? + marker.len();
    let len = html[start..].find(SCRIPT_END)?;
    Some(&html[start..start + len])
}
