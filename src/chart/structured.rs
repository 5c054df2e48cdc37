//! Structured-data (JSON-LD) extraction strategy
//!
//! The preferred strategy: embedded JSON-LD tends to outlive markup
//! redesigns. The page is scanned for `application/ld+json` script blocks,
//! and the first object describing a ranked list (`ItemList` or
//! `MusicPlaylist`, directly or inside an `@graph`) is mapped to entries.
//!
//! Per-item faults never fail the whole parse: an unparseable block or a
//! list item without a usable name is logged and skipped.

use super::normalize::clean_text;
use super::RawEntry;
use scraper::{Html, Selector};
use serde_json::Value;

/// Extracts raw entries from the document's JSON-LD blocks
///
/// Returns the mapped items of the first matching list, or an empty vector
/// when no block yields one.
pub(crate) fn extract_entries(document: &Html) -> Vec<RawEntry> {
    let Ok(selector) = Selector::parse(r#"script[type="application/ld+json"]"#) else {
        return Vec::new();
    };

    for script in document.select(&selector) {
        let raw = script.text().collect::<String>();
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }

        let data: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!(error = %err, "skipping unparseable ld+json block");
                continue;
            }
        };

        for candidate in candidate_objects(&data) {
            let entries = parse_item_list(candidate);
            if !entries.is_empty() {
                return entries;
            }
        }
    }

    Vec::new()
}

/// Collects the objects worth inspecting: top-level values plus one level
/// of `@graph` nesting
fn candidate_objects(data: &Value) -> Vec<&Value> {
    let mut queue: Vec<&Value> = match data {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    };

    let mut expanded = Vec::new();
    for value in &queue {
        if let Some(graph) = value.get("@graph").and_then(Value::as_array) {
            expanded.extend(graph.iter());
        }
    }
    queue.extend(expanded);

    queue
}

/// True when the object's `@type` denotes a ranked list
///
/// `@type` may be a single string or an array of strings.
fn is_ranked_list(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(kind)) => is_list_type(kind),
        Some(Value::Array(kinds)) => kinds.iter().filter_map(Value::as_str).any(is_list_type),
        _ => false,
    }
}

fn is_list_type(kind: &str) -> bool {
    kind == "ItemList" || kind == "MusicPlaylist"
}

/// Maps a ranked-list object's `itemListElement` to raw entries
fn parse_item_list(value: &Value) -> Vec<RawEntry> {
    if !is_ranked_list(value) {
        return Vec::new();
    }

    let Some(items) = value.get("itemListElement").and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut entries = Vec::new();

    for item in items {
        if item.get("@type").and_then(Value::as_str) != Some("ListItem") {
            continue;
        }

        let Some(track) = item.get("item").filter(|v| v.is_object()) else {
            continue;
        };

        let title = clean_text(track.get("name").and_then(Value::as_str).unwrap_or(""));
        if title.is_empty() {
            tracing::debug!("list item without a name, skipping");
            continue;
        }

        let artist = clean_text(&artist_name(track));
        let rank = item.get("position").and_then(position_value);

        entries.push(RawEntry { rank, title, artist });
    }

    entries
}

/// Reads the item's `byArtist` field, which may be an object, an array of
/// objects, or plain text
fn artist_name(track: &Value) -> String {
    match track.get("byArtist") {
        Some(Value::Object(_)) => track["byArtist"]["name"]
            .as_str()
            .unwrap_or("")
            .to_string(),
        Some(Value::Array(artists)) => artists
            .iter()
            .filter_map(|a| a.get("name").and_then(Value::as_str))
            .next()
            .unwrap_or("")
            .to_string(),
        Some(Value::String(name)) => name.clone(),
        _ => String::new(),
    }
}

/// Parses a `position` value, tolerating string-typed numbers
fn position_value(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .filter(|&n| n > 0),
        Value::String(s) => s.trim().parse::<u32>().ok().filter(|&n| n > 0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> Vec<RawEntry> {
        extract_entries(&Html::parse_document(html))
    }

    fn item_list(items: &str) -> String {
        format!(
            r#"<html><head><script type="application/ld+json">
            {{"@type": "ItemList", "itemListElement": [{}]}}
            </script></head><body></body></html>"#,
            items
        )
    }

    fn list_item(position: u32, title: &str, artist: &str) -> String {
        format!(
            r#"{{"@type": "ListItem", "position": {}, "item":
            {{"name": "{}", "byArtist": {{"name": "{}"}}}}}}"#,
            position, title, artist
        )
    }

    #[test]
    fn test_extracts_well_formed_list() {
        let html = item_list(&format!(
            "{},{}",
            list_item(1, "As It Was", "Harry Styles"),
            list_item(2, "Bad Habit", "Steve Lacy")
        ));
        let entries = parse(&html);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].rank, Some(1));
        assert_eq!(entries[0].title, "As It Was");
        assert_eq!(entries[0].artist, "Harry Styles");
        assert_eq!(entries[1].rank, Some(2));
    }

    #[test]
    fn test_item_without_name_is_skipped() {
        let html = item_list(&format!(
            r#"{},{{"@type": "ListItem", "position": 2, "item": {{"byArtist": {{"name": "Nobody"}}}}}}"#,
            list_item(1, "As It Was", "Harry Styles")
        ));
        let entries = parse(&html);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "As It Was");
    }

    #[test]
    fn test_graph_nesting() {
        let html = format!(
            r#"<html><head><script type="application/ld+json">
            {{"@context": "https://schema.org", "@graph": [
                {{"@type": "WebPage", "name": "chart"}},
                {{"@type": "ItemList", "itemListElement": [{}]}}
            ]}}
            </script></head><body></body></html>"#,
            list_item(1, "As It Was", "Harry Styles")
        );
        let entries = parse(&html);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "As It Was");
    }

    #[test]
    fn test_first_matching_block_wins() {
        let first = item_list(&list_item(1, "First List", "Artist A"));
        let second = item_list(&list_item(1, "Second List", "Artist B"));
        // Two separate script blocks; only the first should be used
        let html = format!("{}{}", first, second);
        let entries = parse(&html);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "First List");
    }

    #[test]
    fn test_unparseable_block_falls_through_to_next() {
        let html = format!(
            r#"<html><head>
            <script type="application/ld+json">{{not json</script>
            {}
            </head><body></body></html>"#,
            item_list(&list_item(1, "As It Was", "Harry Styles"))
        );
        let entries = parse(&html);

        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_type_array_is_accepted() {
        let html = format!(
            r#"<html><head><script type="application/ld+json">
            {{"@type": ["MusicPlaylist", "CreativeWork"], "itemListElement": [{}]}}
            </script></head><body></body></html>"#,
            list_item(1, "As It Was", "Harry Styles")
        );
        assert_eq!(parse(&html).len(), 1);
    }

    #[test]
    fn test_artist_array_takes_first() {
        let html = item_list(
            r#"{"@type": "ListItem", "position": 1, "item":
            {"name": "Duet", "byArtist": [{"name": "Lead"}, {"name": "Feature"}]}}"#,
        );
        let entries = parse(&html);

        assert_eq!(entries[0].artist, "Lead");
    }

    #[test]
    fn test_artist_as_plain_text() {
        let html = item_list(
            r#"{"@type": "ListItem", "position": 1, "item":
            {"name": "Solo", "byArtist": "Just Text"}}"#,
        );
        let entries = parse(&html);

        assert_eq!(entries[0].artist, "Just Text");
    }

    #[test]
    fn test_missing_position_maps_to_none() {
        let html = item_list(
            r#"{"@type": "ListItem", "item":
            {"name": "No Position", "byArtist": {"name": "Someone"}}}"#,
        );
        let entries = parse(&html);

        assert_eq!(entries[0].rank, None);
    }

    #[test]
    fn test_string_position_is_parsed() {
        let html = item_list(
            r#"{"@type": "ListItem", "position": "7", "item":
            {"name": "Stringy", "byArtist": {"name": "Someone"}}}"#,
        );
        let entries = parse(&html);

        assert_eq!(entries[0].rank, Some(7));
    }

    #[test]
    fn test_entities_and_whitespace_are_normalized() {
        let html = item_list(
            r#"{"@type": "ListItem", "position": 1, "item":
            {"name": "  Me &amp;   You ", "byArtist": {"name": " The  Band "}}}"#,
        );
        let entries = parse(&html);

        assert_eq!(entries[0].title, "Me & You");
        assert_eq!(entries[0].artist, "The Band");
    }

    #[test]
    fn test_no_structured_data_yields_nothing() {
        let html = "<html><body><p>just markup</p></body></html>";
        assert!(parse(html).is_empty());
    }

    #[test]
    fn test_wrong_type_yields_nothing() {
        let html = r#"<html><head><script type="application/ld+json">
            {"@type": "WebPage", "name": "not a list"}
            </script></head><body></body></html>"#;
        assert!(parse(html).is_empty());
    }
}
