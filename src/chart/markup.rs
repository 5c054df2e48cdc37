//! Markup fallback extraction strategy
//!
//! Used only when structured data yields nothing. Chart markup changes
//! often and class names are its most volatile part, so this parser leans
//! on structure instead: a chart row is a list item carrying a heading
//! (the title), a digits-only span (the rank marker), and a textual span
//! (the artist). Entries are taken in document order.

use super::normalize::clean_text;
use super::RawEntry;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;

/// Status badges that appear in chart rows but are never artist names
const BADGES: [&str; 2] = ["NEW", "RE-ENTRY"];

/// Extracts raw entries from repeating list-item rows
///
/// Ranks are assigned by document order downstream; duplicated rows are
/// dropped on a case-insensitive (title, artist) key, keeping the first.
pub(crate) fn extract_entries(document: &Html) -> Vec<RawEntry> {
    let Ok(row_selector) = Selector::parse("li") else {
        return Vec::new();
    };
    let Ok(heading_selector) = Selector::parse("h3") else {
        return Vec::new();
    };
    let Ok(span_selector) = Selector::parse("span") else {
        return Vec::new();
    };

    let mut entries = Vec::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();

    for row in document.select(&row_selector) {
        // Only innermost list items count as rows; a wrapper list item
        // around the real rows would otherwise swallow them all.
        let wraps_other_rows = row
            .select(&row_selector)
            .any(|inner| inner.select(&heading_selector).next().is_some());
        if wraps_other_rows {
            continue;
        }

        let Some(heading) = row.select(&heading_selector).next() else {
            continue;
        };

        let title = clean_text(&element_text(heading));
        if title.is_empty() {
            continue;
        }

        let mut rank_marker = false;
        let mut artist = String::new();

        for span in row.select(&span_selector) {
            let text = clean_text(&element_text(span));
            if text.is_empty() || is_badge(&text) {
                continue;
            }

            if is_all_digits(&text) {
                rank_marker = true;
                continue;
            }

            if artist.is_empty() && text.chars().count() >= 2 {
                artist = text;
            }
        }

        // A row needs all three parts of the repeating pattern
        if !rank_marker || artist.is_empty() {
            continue;
        }

        let key = (title.to_lowercase(), artist.to_lowercase());
        if !seen.insert(key) {
            continue;
        }

        entries.push(RawEntry {
            rank: None,
            title,
            artist,
        });
    }

    entries
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>()
}

fn is_badge(text: &str) -> bool {
    let upper = text.to_uppercase();
    BADGES.iter().any(|badge| upper == *badge)
}

fn is_all_digits(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> Vec<RawEntry> {
        extract_entries(&Html::parse_document(html))
    }

    fn row(rank: u32, title: &str, artist: &str) -> String {
        format!(
            r#"<li class="row"><span class="pos">{}</span>
            <h3 class="t">{}</h3><span class="a">{}</span></li>"#,
            rank, title, artist
        )
    }

    fn chart(rows: &str) -> String {
        format!("<html><body><ul>{}</ul></body></html>", rows)
    }

    #[test]
    fn test_extracts_rows_in_document_order() {
        let html = chart(&format!(
            "{}{}{}",
            row(1, "As It Was", "Harry Styles"),
            row(2, "Bad Habit", "Steve Lacy"),
            row(3, "First Class", "Jack Harlow")
        ));
        let entries = parse(&html);

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].title, "As It Was");
        assert_eq!(entries[1].title, "Bad Habit");
        assert_eq!(entries[2].title, "First Class");
        assert!(entries.iter().all(|e| e.rank.is_none()));
    }

    #[test]
    fn test_badge_span_is_not_an_artist() {
        let html = chart(
            r#"<li><span>5</span><span>NEW</span>
            <h3>About Damn Time</h3><span>Lizzo</span></li>"#,
        );
        let entries = parse(&html);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].artist, "Lizzo");
    }

    #[test]
    fn test_reentry_badge_case_insensitive() {
        let html = chart(
            r#"<li><span>9</span><span>Re-Entry</span>
            <h3>Running Up That Hill</h3><span>Kate Bush</span></li>"#,
        );
        let entries = parse(&html);

        assert_eq!(entries[0].artist, "Kate Bush");
    }

    #[test]
    fn test_duplicate_rows_keep_first() {
        let html = chart(&format!(
            "{}{}",
            row(1, "As It Was", "Harry Styles"),
            row(2, "as it was", "harry styles")
        ));
        let entries = parse(&html);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "As It Was");
    }

    #[test]
    fn test_row_without_rank_marker_is_ignored() {
        let html = chart(
            r#"<li><h3>Site News</h3><span>Read our update</span></li>"#,
        );
        assert!(parse(&html).is_empty());
    }

    #[test]
    fn test_row_without_artist_is_ignored() {
        let html = chart(r#"<li><span>1</span><h3>Instrumental</h3></li>"#);
        assert!(parse(&html).is_empty());
    }

    #[test]
    fn test_wrapper_list_item_does_not_swallow_rows() {
        let html = format!(
            "<html><body><ul><li class=\"wrapper\"><ul>{}{}</ul></li></ul></body></html>",
            row(1, "As It Was", "Harry Styles"),
            row(2, "Bad Habit", "Steve Lacy")
        );
        let entries = parse(&html);

        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_entities_are_normalized() {
        let html = chart(
            r#"<li><span>4</span><h3>Me &amp; You&nbsp;</h3>
            <span>The  Band</span></li>"#,
        );
        let entries = parse(&html);

        assert_eq!(entries[0].title, "Me & You");
        assert_eq!(entries[0].artist, "The Band");
    }

    #[test]
    fn test_plain_page_yields_nothing() {
        assert!(parse("<html><body><p>nothing here</p></body></html>").is_empty());
    }
}
