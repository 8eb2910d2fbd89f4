//! The `atom:generator` element.

use crate::atom::attribute::{self, Attribute, ElementKind};
use crate::common::{Error, Result};

/// Identifies the agent that generated a feed.
///
/// The text content is required; `uri` and `version` attributes are
/// optional. On output the library always replaces a feed's generator with
/// its own identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generator {
    attributes: Vec<Attribute>,
    text: String,
}

impl Generator {
    /// Build the element; fails on empty text.
    pub fn new(attributes: Vec<Attribute>, text: impl Into<String>) -> Result<Self> {
        attribute::verify(&attributes, ElementKind::Generator)?;
        let text = text.into();
        if text.is_empty() {
            return Err(Error::Spec(
                "atom:generator elements MUST contain a human-readable name".to_string(),
            ));
        }
        Ok(Self { attributes, text })
    }

    /// The human-readable generator name.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The generator's IRI, if any.
    pub fn uri(&self) -> Option<&str> {
        attribute::find(&self.attributes, "uri").map(Attribute::value)
    }

    /// The generator's version, if any.
    pub fn version(&self) -> Option<&str> {
        attribute::find(&self.attributes, "version").map(Attribute::value)
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
    fn text_is_required() {
        assert!(Generator::new(Vec::new(), "").is_err());
    }

    #[test]
    fn uri_and_version_are_exposed() {
        let generator = Generator::new(
            vec![
                Attribute::new("uri", "http://example.org/gen"),
                Attribute::new("version", "1.2"),
            ],
            "Example Generator",
        )
        .unwrap();
        assert_eq!(generator.text(), "Example Generator");
        assert_eq!(generator.uri(), Some("http://example.org/gen"));
        assert_eq!(generator.version(), Some("1.2"));
    }
}
