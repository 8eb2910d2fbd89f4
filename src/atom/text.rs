//! Atom text constructs: title, subtitle, summary and rights.
//!
//! A text construct carries human-readable text whose interpretation is
//! driven by its `type` attribute. XHTML payloads arrive wrapped in a single
//! `div` element; the wrapper tags are split off at construction time and
//! kept alongside the inner markup so the original payload can be
//! reassembled byte for byte on output.

use crate::atom::attribute::{self, Attribute, ElementKind};
use crate::common::Result;

/// The kind of payload a text construct (or content element) carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    /// Plain text content
    Text,
    /// Escaped HTML content
    Html,
    /// XHTML content wrapped in a `div` element
    Xhtml,
    /// A media type other than text, html or xhtml
    Other,
    /// Out-of-line content referenced by a `src` attribute
    External,
}

/// Derive the content type from an attribute list.
///
/// A `src` attribute forces [`ContentType::External`]; otherwise the `type`
/// attribute selects text/html/xhtml, any unrecognized value maps to
/// [`ContentType::Other`], and an absent `type` defaults to text.
pub fn content_type_of(attributes: &[Attribute]) -> ContentType {
    if attribute::find(attributes, "src").is_some() {
        return ContentType::External;
    }
    match attribute::find(attributes, "type").map(Attribute::value) {
        Some("text") | None => ContentType::Text,
        Some("html") => ContentType::Html,
        Some("xhtml") => ContentType::Xhtml,
        Some(_) => ContentType::Other,
    }
}

/// Split a raw XHTML payload into wrapper start tag, inner markup and
/// wrapper end tag.
///
/// The start tag is the substring up to and including the first `>`; the end
/// tag is the substring from the last `<`; the inner markup is what remains
/// after stripping the front and then the back. This is a textual unwrap,
/// not a structural one: it assumes a single well-formed wrapper element and
/// does not verify that the opening and closing tag names match, so
/// malformed input silently produces a wrong split.
pub(crate) fn unwrap_xhtml(raw: &str) -> (String, String, String) {
    let bytes = raw.as_bytes();
    let start_len = memchr::memchr(b'>', bytes).map_or(0, |i| i + 1);
    let end_pos = memchr::memrchr(b'<', bytes).unwrap_or(bytes.len());
    let start = &raw[..start_len];
    let end = &raw[end_pos..];
    let rest = &raw[start_len..];
    let inner = match memchr::memrchr(b'<', rest.as_bytes()) {
        Some(i) => &rest[..i],
        None => rest,
    };
    (start.to_string(), inner.to_string(), end.to_string())
}

/// Shared state behind every text construct element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TextConstruct {
    attributes: Vec<Attribute>,
    text: Option<String>,
    content_type: ContentType,
    div_wrapper_start: Option<String>,
    div_wrapper_end: Option<String>,
}

impl TextConstruct {
    /// Validate the attribute list for `kind` and derive the content type,
    /// splitting off the XHTML wrapper where applicable.
    ///
    /// `kind` is [`ElementKind::TextConstruct`] for title-like elements and
    /// [`ElementKind::Content`] for content, which additionally admits `src`.
    pub(crate) fn new(
        text: Option<String>,
        attributes: Vec<Attribute>,
        kind: ElementKind,
    ) -> Result<Self> {
        attribute::verify(&attributes, kind)?;
        let content_type = content_type_of(&attributes);
        let (text, div_wrapper_start, div_wrapper_end) = match (content_type, text) {
            (ContentType::Xhtml, Some(raw)) => {
                let (start, inner, end) = unwrap_xhtml(&raw);
                (Some(inner), Some(start), Some(end))
            }
            (_, text) => (text, None, None),
        };
        Ok(Self {
            attributes,
            text,
            content_type,
            div_wrapper_start,
            div_wrapper_end,
        })
    }

    pub(crate) fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub(crate) fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub(crate) fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub(crate) fn div_wrapper_start(&self) -> Option<&str> {
        self.div_wrapper_start.as_deref()
    }

    pub(crate) fn div_wrapper_end(&self) -> Option<&str> {
        self.div_wrapper_end.as_deref()
    }
}

macro_rules! text_construct_element {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            inner: TextConstruct,
        }

        impl $name {
            /// Build the element, validating its attributes.
            pub fn new(text: Option<String>, attributes: Vec<Attribute>) -> Result<Self> {
                Ok(Self {
                    inner: TextConstruct::new(text, attributes, ElementKind::TextConstruct)?,
                })
            }

            /// The attributes for this element.
            pub fn attributes(&self) -> &[Attribute] {
                self.inner.attributes()
            }

            /// First attribute with a matching name, if any.
            pub fn attribute(&self, name: &str) -> Option<&Attribute> {
                attribute::find(self.inner.attributes(), name)
            }

            /// The text payload. For XHTML this is the inner markup without
            /// the `div` wrapper.
            pub fn text(&self) -> Option<&str> {
                self.inner.text()
            }

            /// The derived content type.
            pub fn content_type(&self) -> ContentType {
                self.inner.content_type()
            }

            pub(crate) fn div_wrapper_start(&self) -> Option<&str> {
                self.inner.div_wrapper_start()
            }

            pub(crate) fn div_wrapper_end(&self) -> Option<&str> {
                self.inner.div_wrapper_end()
            }
        }
    };
}

text_construct_element! {
    /// The `atom:title` element, a human-readable title for a feed, entry
    /// or source.
    Title
}

text_construct_element! {
    /// The `atom:subtitle` element, a human-readable description or
    /// subtitle for a feed.
    Subtitle
}

text_construct_element! {
    /// The `atom:summary` element, a short summary of an entry.
    Summary
}

text_construct_element! {
    /// The `atom:rights` element, rights held in and over a feed or entry.
    Rights
}
