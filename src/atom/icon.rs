//! The `atom:icon` element.

use crate::atom::attribute::{self, Attribute, ElementKind};
use crate::common::Result;

/// An IRI reference to a small iconic image for a feed or source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    attributes: Vec<Attribute>,
    uri: String,
}

impl Icon {
    /// Build the element, validating its attributes.
    pub fn new(attributes: Vec<Attribute>, uri: impl Into<String>) -> Result<Self> {
        attribute::verify(&attributes, ElementKind::Icon)?;
        Ok(Self {
            attributes,
            uri: uri.into(),
        })
    }

    /// The IRI of the icon image.
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
