//! XML attribute model and per-element attribute classification.
//!
//! Atom 1.0 allows a small set of common attributes on every element
//! (`xml:base`, `xml:lang` and namespace declarations), a fixed
//! element-specific set per element kind, and foreign-namespace extension
//! attributes. Text constructs are stricter: anything outside the common
//! set and their own `type` (plus `src` for content) is an error.

use crate::common::{Error, Result};

/// A single name/value XML attribute.
///
/// Equality is structural. A list of attributes may contain duplicates by
/// name; lookups return the first match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    name: String,
    value: String,
}

impl Attribute {
    /// Create a new attribute.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// The attribute name, including any namespace prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The attribute value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// How an attribute relates to the element carrying it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeClass {
    /// Legal on every Atom element: `xml:base`, `xml:lang`, `xmlns:*`.
    Common,
    /// Part of the carrying element's fixed attribute set.
    ElementSpecific,
    /// Outside the Atom vocabulary; retained and re-emitted verbatim.
    Extension,
    /// Disallowed in the carrying element's context.
    Rejected,
}

/// The element context an attribute is classified against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Category,
    Content,
    DateConstruct,
    Entry,
    Extension,
    Feed,
    Generator,
    Icon,
    Id,
    Link,
    Logo,
    PersonConstruct,
    Source,
    TextConstruct,
}

impl ElementKind {
    /// The fixed attribute set for this element kind.
    fn specific(self) -> &'static [&'static str] {
        match self {
            ElementKind::Category => &["term", "scheme", "label"],
            ElementKind::Content => &["type", "src"],
            ElementKind::Generator => &["uri", "version"],
            ElementKind::Link => &["href", "rel", "type", "hreflang", "title", "length"],
            ElementKind::TextConstruct => &["type"],
            _ => &[],
        }
    }

    /// Text constructs refuse attributes outside their set; everything else
    /// passes them through as extension attributes.
    fn rejects_undefined(self) -> bool {
        matches!(self, ElementKind::TextConstruct | ElementKind::Content)
    }

    /// Element name used in error messages.
    fn label(self) -> &'static str {
        match self {
            ElementKind::Category => "category",
            ElementKind::Content => "content",
            ElementKind::DateConstruct => "date construct",
            ElementKind::Entry => "entry",
            ElementKind::Extension => "extension",
            ElementKind::Feed => "feed",
            ElementKind::Generator => "generator",
            ElementKind::Icon => "icon",
            ElementKind::Id => "id",
            ElementKind::Link => "link",
            ElementKind::Logo => "logo",
            ElementKind::PersonConstruct => "person construct",
            ElementKind::Source => "source",
            ElementKind::TextConstruct => "text construct",
        }
    }
}

/// Whether the name is an Atom common attribute, legal on every element.
pub fn is_common(name: &str) -> bool {
    name == "xml:base" || name == "xml:lang" || name.starts_with("xmlns:")
}

/// Classify an attribute against the element kind carrying it.
pub fn classify(attr: &Attribute, kind: ElementKind) -> AttributeClass {
    if is_common(attr.name()) {
        return AttributeClass::Common;
    }
    if kind.specific().iter().any(|name| *name == attr.name()) {
        return AttributeClass::ElementSpecific;
    }
    if kind.rejects_undefined() {
        return AttributeClass::Rejected;
    }
    AttributeClass::Extension
}

/// Validate an attribute list for an element kind.
///
/// Synchronous, runs at construction time; the first rejected attribute
/// fails the whole construction.
pub(crate) fn verify(attributes: &[Attribute], kind: ElementKind) -> Result<()> {
    for attr in attributes {
        if classify(attr, kind) == AttributeClass::Rejected {
            return Err(Error::Spec(format!(
                "unsupported attribute \"{}\" for this {} element",
                attr.name(),
                kind.label()
            )));
        }
    }
    Ok(())
}

/// First attribute whose name matches, ignoring ASCII case.
pub(crate) fn find<'a>(attributes: &'a [Attribute], name: &str) -> Option<&'a Attribute> {
    attributes
        .iter()
        .find(|a| a.name().eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_attributes_are_legal_everywhere() {
        for name in ["xml:base", "xml:lang", "xmlns:sort"] {
            let attr = Attribute::new(name, "v");
            assert_eq!(classify(&attr, ElementKind::Link), AttributeClass::Common);
            assert_eq!(
                classify(&attr, ElementKind::TextConstruct),
                AttributeClass::Common
            );
        }
    }

    #[test]
    fn element_specific_sets_are_fixed_per_kind() {
        let href = Attribute::new("href", "http://example.org/");
        assert_eq!(
            classify(&href, ElementKind::Link),
            AttributeClass::ElementSpecific
        );
        // href is not part of the category set, but categories pass unknowns through
        assert_eq!(
            classify(&href, ElementKind::Category),
            AttributeClass::Extension
        );
    }

    #[test]
    fn text_constructs_reject_undefined_attributes() {
        let foreign = Attribute::new("foo", "bar");
        assert_eq!(
            classify(&foreign, ElementKind::TextConstruct),
            AttributeClass::Rejected
        );
        assert_eq!(
            classify(&foreign, ElementKind::Feed),
            AttributeClass::Extension
        );
    }

    #[test]
    fn content_additionally_allows_src() {
        let src = Attribute::new("src", "http://example.org/movie.mp4");
        assert_eq!(
            classify(&src, ElementKind::Content),
            AttributeClass::ElementSpecific
        );
        assert_eq!(
            classify(&src, ElementKind::TextConstruct),
            AttributeClass::Rejected
        );
    }

    #[test]
    fn verify_names_the_offender() {
        let attrs = vec![Attribute::new("xml:lang", "en"), Attribute::new("bogus", "1")];
        let err = verify(&attrs, ElementKind::TextConstruct).unwrap_err();
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn find_returns_first_match() {
        let attrs = vec![
            Attribute::new("term", "first"),
            Attribute::new("term", "second"),
        ];
        assert_eq!(find(&attrs, "term").unwrap().value(), "first");
        assert_eq!(find(&attrs, "TERM").unwrap().value(), "first");
        assert!(find(&attrs, "missing").is_none());
    }
}
