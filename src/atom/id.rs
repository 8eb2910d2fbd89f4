//! The `atom:id` element.

use crate::atom::attribute::{self, Attribute, ElementKind};
use crate::common::Result;

/// A permanent, universally unique identifier for a feed, entry or source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Id {
    attributes: Vec<Attribute>,
    uri: String,
}

impl Id {
    /// Build the element, validating its attributes.
    pub fn new(attributes: Vec<Attribute>, uri: impl Into<String>) -> Result<Self> {
        attribute::verify(&attributes, ElementKind::Id)?;
        Ok(Self {
            attributes,
            uri: uri.into(),
        })
    }

    /// The IRI carried by this element.
    pub fn uri(&self) -> &str {
        &self.uri
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
    fn carries_uri_and_attributes() {
        let id = Id::new(
            vec![Attribute::new("xml:base", "http://example.org/")],
            "urn:uuid:60a76c80-d399-11d9-b93C-0003939e0af6",
        )
        .unwrap();
        assert_eq!(id.uri(), "urn:uuid:60a76c80-d399-11d9-b93C-0003939e0af6");
        assert!(id.attribute("xml:base").is_some());
    }
}
