//! Text normalization shared by both extraction strategies
//!
//! Chart titles and artist names arrive with HTML entities, stray
//! whitespace, and non-breaking spaces, regardless of which strategy
//! produced them.

/// Trims, decodes HTML entities, and collapses internal whitespace
pub fn clean_text(raw: &str) -> String {
    let decoded = decode_entities(raw);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Decodes the named and numeric HTML entities that show up in feeds
///
/// Unrecognized sequences are kept verbatim, so a bare ampersand in an
/// artist name survives unchanged.
fn decode_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        match rest.find(';') {
            Some(end) if end > 1 && end <= 10 => match decode_entity(&rest[1..end]) {
                Some(ch) => {
                    out.push(ch);
                    rest = &rest[end + 1..];
                }
                None => {
                    out.push('&');
                    rest = &rest[1..];
                }
            },
            _ => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        _ => {
            if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = name.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_collapses_whitespace() {
        assert_eq!(clean_text("  Bad   Habit \n"), "Bad Habit");
        assert_eq!(clean_text("\tSteve\u{a0}Lacy "), "Steve Lacy");
    }

    #[test]
    fn test_decodes_named_entities() {
        assert_eq!(clean_text("Tyler &amp; Friends"), "Tyler & Friends");
        assert_eq!(clean_text("&quot;Heroes&quot;"), "\"Heroes\"");
        assert_eq!(clean_text("Don&apos;t"), "Don't");
    }

    #[test]
    fn test_decodes_numeric_entities() {
        assert_eq!(clean_text("Don&#39;t Stop"), "Don't Stop");
        assert_eq!(clean_text("Don&#x27;t Stop"), "Don't Stop");
    }

    #[test]
    fn test_nbsp_becomes_plain_space() {
        assert_eq!(clean_text("First&nbsp;Class"), "First Class");
    }

    #[test]
    fn test_lone_ampersand_survives() {
        assert_eq!(clean_text("AT&T"), "AT&T");
        assert_eq!(clean_text("Earth, Wind & Fire"), "Earth, Wind & Fire");
    }

    #[test]
    fn test_unknown_entity_kept_verbatim() {
        assert_eq!(clean_text("Beyonc&eacute;"), "Beyonc&eacute;");
    }

    #[test]
    fn test_double_encoded_is_decoded_once() {
        assert_eq!(clean_text("A &amp;amp; B"), "A &amp; B");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(clean_text(""), "");
        assert_eq!(clean_text("   "), "");
    }
}
