//! Marker-delimited section extraction
//!
//! Model responses carry their reasoning and their JSON answer between
//! `<scratchpad>` and `<output>` markers. The lookup is a plain substring
//! search: it does not balance nested markers and it does not require the
//! closing marker to follow the opening one.

/// Return the text between the first `<tag>` and the first `</tag>`
///
/// Returns the empty string when either marker is missing, or when the first
/// closing marker starts before the opening marker ends.
pub fn extract_tag<'a>(text: &'a str, tag: &str) -> &'a str {
    let open = format!("<{}>", tag);
    let close = format!("</{}>", tag);

    let Some(start) = text.find(&open) else {
        return "";
    };
    let Some(end) = text.find(&close) else {
        return "";
    };

    let content_start = start + open.len();
    if end < content_start {
        return "";
    }
    &text[content_start..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_extracts_between_markers() {
        let text = "<scratchpad>thinking</scratchpad>\n<output>{\"a\": 1}</output>";
        assert_eq!(extract_tag(text, "scratchpad"), "thinking");
        assert_eq!(extract_tag(text, "output"), "{\"a\": 1}");
    }

    #[test]
    fn test_missing_markers() {
        assert_eq!(extract_tag("no markers here", "output"), "");
        assert_eq!(extract_tag("<output>unterminated", "output"), "");
        assert_eq!(extract_tag("terminated only</output>", "output"), "");
    }

    #[test]
    fn test_first_occurrence_wins() {
        let text = "<output>one</output><output>two</output>";
        assert_eq!(extract_tag(text, "output"), "one");
    }

    #[test]
    fn test_closing_before_opening_is_empty() {
        assert_eq!(extract_tag("</output> x <output>y", "output"), "");
        assert_eq!(extract_tag("</output><output>y</output>", "output"), "");
    }

    #[test]
    fn test_empty_section() {
        assert_eq!(extract_tag("<output></output>", "output"), "");
    }

    #[test]
    fn test_multibyte_content() {
        let text = "<output>Loyer: 1 200 €</output>";
        assert_eq!(extract_tag(text, "output"), "Loyer: 1 200 €");
    }

    proptest! {
        #[test]
        fn prop_wrapped_content_is_recovered(
            prefix in "[a-z0-9 {}\":,.\n]*",
            content in "[a-z0-9 {}\":,.\n]*",
            suffix in "[a-z0-9 {}\":,.\n]*",
        ) {
            let text = format!("{}<tag>{}</tag>{}", prefix, content, suffix);
            prop_assert_eq!(extract_tag(&text, "tag"), content.as_str());
        }

        #[test]
        fn prop_text_without_markers_is_empty(text in "[a-z0-9 {}\":,./\n]*") {
            prop_assert_eq!(extract_tag(&text, "tag"), "");
        }

        #[test]
        fn prop_missing_close_is_empty(prefix in "[a-z ]*", rest in "[a-z ]*") {
            let text = format!("{}<tag>{}", prefix, rest);
            prop_assert_eq!(extract_tag(&text, "tag"), "");
        }
    }
}
