//! The `atom:link` element.

use crate::atom::attribute::{self, Attribute, ElementKind};
use crate::common::{Error, Result};

/// A reference from a feed, entry or source to a Web resource.
///
/// The `href` attribute is required; `rel`, `type`, `hreflang`, `title` and
/// `length` are optional. Attributes outside that set are retained as
/// extension attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    attributes: Vec<Attribute>,
    content: Option<String>,
}

impl Link {
    /// Build the element; fails without an `href` attribute.
    pub fn new(attributes: Vec<Attribute>, content: Option<String>) -> Result<Self> {
        attribute::verify(&attributes, ElementKind::Link)?;
        if attribute::find(&attributes, "href").is_none() {
            return Err(Error::Spec(
                "atom:link elements MUST have an \"href\" attribute whose value is an IRI reference"
                    .to_string(),
            ));
        }
        Ok(Self {
            attributes,
            content,
        })
    }

    /// The link's IRI.
    pub fn href(&self) -> &str {
        // Presence is enforced by the constructor.
        attribute::find(&self.attributes, "href").map_or("", Attribute::value)
    }

    /// The link relation type, if any.
    pub fn rel(&self) -> Option<&str> {
        attribute::find(&self.attributes, "rel").map(Attribute::value)
    }

    /// An advisory media type for the target, if any.
    pub fn media_type(&self) -> Option<&str> {
        attribute::find(&self.attributes, "type").map(Attribute::value)
    }

    /// The language of the linked resource, if any.
    pub fn hreflang(&self) -> Option<&str> {
        attribute::find(&self.attributes, "hreflang").map(Attribute::value)
    }

    /// Human-readable information about the link, if any.
    pub fn title(&self) -> Option<&str> {
        attribute::find(&self.attributes, "title").map(Attribute::value)
    }

    /// An advisory length of the linked content in octets, if any.
    pub fn length(&self) -> Option<&str> {
        attribute::find(&self.attributes, "length").map(Attribute::value)
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
