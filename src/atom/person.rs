//! Atom person constructs: author and contributor.

use crate::atom::attribute::{self, Attribute, ElementKind};
use crate::atom::extension::Extension;
use crate::common::{Error, Result};

/// Shared state behind the author and contributor elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PersonConstruct {
    name: String,
    uri: Option<String>,
    email: Option<String>,
    attributes: Vec<Attribute>,
    extensions: Vec<Extension>,
}

impl PersonConstruct {
    fn new(
        name: String,
        uri: Option<String>,
        email: Option<String>,
        attributes: Vec<Attribute>,
        extensions: Vec<Extension>,
        label: &str,
    ) -> Result<Self> {
        attribute::verify(&attributes, ElementKind::PersonConstruct)?;
        if name.is_empty() {
            return Err(Error::Spec(format!(
                "atom:{label} elements MUST contain exactly one atom:name element"
            )));
        }
        Ok(Self {
            name,
            uri,
            email,
            attributes,
            extensions,
        })
    }
}

macro_rules! person_construct_element {
    ($(#[$doc:meta])* $name:ident, $label:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            inner: PersonConstruct,
        }

        impl $name {
            /// Build the element; the name is required and must be non-empty.
            pub fn new(
                name: impl Into<String>,
                uri: Option<String>,
                email: Option<String>,
                attributes: Vec<Attribute>,
                extensions: Vec<Extension>,
            ) -> Result<Self> {
                Ok(Self {
                    inner: PersonConstruct::new(
                        name.into(),
                        uri,
                        email,
                        attributes,
                        extensions,
                        $label,
                    )?,
                })
            }

            /// The human-readable name of the person.
            pub fn name(&self) -> &str {
                &self.inner.name
            }

            /// An IRI associated with the person, if any.
            pub fn uri(&self) -> Option<&str> {
                self.inner.uri.as_deref()
            }

            /// An email address associated with the person, if any.
            pub fn email(&self) -> Option<&str> {
                self.inner.email.as_deref()
            }

            /// The attributes for this element.
            pub fn attributes(&self) -> &[Attribute] {
                &self.inner.attributes
            }

            /// First attribute with a matching name, if any.
            pub fn attribute(&self, name: &str) -> Option<&Attribute> {
                attribute::find(&self.inner.attributes, name)
            }

            /// Foreign child elements preserved for round-tripping.
            pub fn extensions(&self) -> &[Extension] {
                &self.inner.extensions
            }
        }
    };
}

person_construct_element! {
    /// The `atom:author` element, an author of a feed, entry or source.
    Author,
    "author"
}

person_construct_element! {
    /// The `atom:contributor` element, a person who contributed to a feed,
    /// entry or source.
    Contributor,
    "contributor"
}
