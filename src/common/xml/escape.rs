use aho_corasick::{AhoCorasick, MatchKind};
use once_cell::sync::Lazy;

const CHARS: [&str; 5] = ["&", "<", ">", "\"", "'"];
const ENTITIES: [&str; 5] = ["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"];

// Static initialization: automatons are built only once, thread-safe
static XML_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(CHARS)
        .expect("Failed to build XML escaper")
});

// Use LeftmostLongest so longer entities are matched first (e.g. &amp; before &)
static XML_UNESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostLongest)
        .build(ENTITIES)
        .expect("Failed to build XML unescaper")
});

/// Escape the five predefined XML entities.
///
/// Used for both element text and attribute values on output.
///
/// # Examples
///
/// ```
/// use atomdoc::common::xml::escape_xml;
/// assert_eq!(escape_xml("Dog & Pony"), "Dog &amp; Pony");
/// assert_eq!(escape_xml("<b>bold</b>"), "&lt;b&gt;bold&lt;/b&gt;");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> String {
    XML_ESCAPER.replace_all(s, &ENTITIES)
}

/// Unescape the five predefined XML entities.
///
/// Unknown or malformed entities are left unchanged.
///
/// # Examples
///
/// ```
/// use atomdoc::common::xml::unescape_xml;
/// assert_eq!(unescape_xml("Dog &amp; Pony"), "Dog & Pony");
/// assert_eq!(unescape_xml("&lt;b&gt;bold&lt;/b&gt;"), "<b>bold</b>");
/// assert_eq!(unescape_xml("&unknown;"), "&unknown;");
/// ```
#[inline]
pub fn unescape_xml(s: &str) -> String {
    XML_UNESCAPER.replace_all(s, &CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn escape_covers_all_five_entities() {
        assert_eq!(escape_xml("&<>\"'"), "&amp;&lt;&gt;&quot;&apos;");
    }

    #[test]
    fn unescape_prefers_longest_entity() {
        // &amp;lt; must decode to the literal string "&lt;", not "<".
        assert_eq!(unescape_xml("&amp;lt;"), "&lt;");
    }

    proptest! {
        #[test]
        fn escape_then_unescape_is_identity(s in ".*") {
            prop_assert_eq!(unescape_xml(&escape_xml(&s)), s);
        }
    }
}
