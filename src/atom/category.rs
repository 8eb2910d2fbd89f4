//! The `atom:category` element.

use crate::atom::attribute::{self, Attribute, ElementKind};
use crate::common::{Error, Result};

/// Category information for a feed, entry or source.
///
/// The `term` attribute is required; `scheme` and `label` are optional.
/// Attributes outside that set are retained as extension attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    attributes: Vec<Attribute>,
    content: Option<String>,
}

impl Category {
    /// Build the element; fails without a `term` attribute.
    pub fn new(attributes: Vec<Attribute>, content: Option<String>) -> Result<Self> {
        attribute::verify(&attributes, ElementKind::Category)?;
        if attribute::find(&attributes, "term").is_none() {
            return Err(Error::Spec(
                "atom:category elements MUST have a \"term\" attribute".to_string(),
            ));
        }
        Ok(Self {
            attributes,
            content,
        })
    }

    /// The category term.
    pub fn term(&self) -> &str {
        // Presence is enforced by the constructor.
        attribute::find(&self.attributes, "term").map_or("", Attribute::value)
    }

    /// The categorization scheme IRI, if any.
    pub fn scheme(&self) -> Option<&str> {
        attribute::find(&self.attributes, "scheme").map(Attribute::value)
    }

    /// A human-readable label, if any.
    pub fn label(&self) -> Option<&str> {
        attribute::find(&self.attributes, "label").map(Attribute::value)
    }

    /// The undefined element content, if any.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// The attributes for this element.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// First attribute with a matching name, if any.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        attribute::find(&self.attributes, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_is_required() {
        let err = Category::new(vec![Attribute::new("scheme", "http://x/")], None).unwrap_err();
        assert!(err.to_string().contains("term"));
    }

    #[test]
    fn optional_attributes_are_exposed() {
        let cat = Category::new(
            vec![
                Attribute::new("term", "rust"),
                Attribute::new("scheme", "http://example.org/tags"),
                Attribute::new("label", "Rust"),
            ],
            None,
        )
        .unwrap();
        assert_eq!(cat.term(), "rust");
        assert_eq!(cat.scheme(), Some("http://example.org/tags"));
        assert_eq!(cat.label(), Some("Rust"));
    }

    #[test]
    fn foreign_attributes_pass_through() {
        let cat = Category::new(
            vec![Attribute::new("term", "x"), Attribute::new("custom", "y")],
            None,
        )
        .unwrap();
        assert_eq!(cat.attribute("custom").unwrap().value(), "y");
    }
}
