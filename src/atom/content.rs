//! The `atom:content` element.

use crate::atom::attribute::{self, Attribute, ElementKind};
use crate::atom::text::{ContentType, TextConstruct};
use crate::common::Result;

/// The content of an entry: inline text, HTML or XHTML, inline media, or an
/// out-of-line reference via the `src` attribute.
///
/// Validation follows the text-construct rules with `src` as an additional
/// allowed attribute. A `src` attribute makes the content
/// [`ContentType::External`]; an entry carrying external content must also
/// carry a summary, which is enforced when the entry is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    inner: TextConstruct,
}

impl Content {
    /// Build the element, validating its attributes.
    pub fn new(text: Option<String>, attributes: Vec<Attribute>) -> Result<Self> {
        Ok(Self {
            inner: TextConstruct::new(text, attributes, ElementKind::Content)?,
        })
    }

    /// The text payload. For XHTML this is the inner markup without the
    /// `div` wrapper; for external content there is none.
    pub fn text(&self) -> Option<&str> {
        self.inner.text()
    }

    /// The derived content type.
    pub fn content_type(&self) -> ContentType {
        self.inner.content_type()
    }

    /// The out-of-line content IRI, if any.
    pub fn src(&self) -> Option<&str> {
        attribute::find(self.inner.attributes(), "src").map(Attribute::value)
    }

    /// The attributes for this element.
    pub fn attributes(&self) -> &[Attribute] {
        self.inner.attributes()
    }

    /// First attribute with a matching name, if any.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        attribute::find(self.inner.attributes(), name)
    }

    pub(crate) fn div_wrapper_start(&self) -> Option<&str> {
        self.inner.div_wrapper_start()
    }

    pub(crate) fn div_wrapper_end(&self) -> Option<&str> {
        self.inner.div_wrapper_end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn src_makes_content_external() {
        let content = Content::new(
            None,
            vec![
                Attribute::new("type", "video/mp4"),
                Attribute::new("src", "http://example.org/movie.mp4"),
            ],
        )
        .unwrap();
        assert_eq!(content.content_type(), ContentType::External);
        assert_eq!(content.src(), Some("http://example.org/movie.mp4"));
    }

    #[test]
    fn rejects_attributes_outside_the_content_set() {
        let err = Content::new(
            Some("x".to_string()),
            vec![Attribute::new("href", "http://example.org/")],
        )
        .unwrap_err();
        assert!(err.to_string().contains("href"));
    }

    #[test]
    fn xhtml_content_is_unwrapped() {
        let raw = "<div xmlns=\"http://www.w3.org/1999/xhtml\"><p>para</p></div>";
        let content = Content::new(
            Some(raw.to_string()),
            vec![Attribute::new("type", "xhtml")],
        )
        .unwrap();
        assert_eq!(content.content_type(), ContentType::Xhtml);
        assert_eq!(content.text(), Some("<p>para</p>"));
    }
}
