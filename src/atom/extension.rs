//! Extension elements: the escape hatch for non-Atom markup.
//!
//! Any child element outside the fixed Atom vocabulary is captured as an
//! [`Extension`] on read and re-emitted verbatim on write. Only attributes
//! and flattened text content are modeled; nested element structure inside
//! an extension is not preserved.

use crate::atom::attribute::{self, Attribute};

/// A foreign-namespace element preserved for round-tripping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    element_name: String,
    attributes: Vec<Attribute>,
    content: Option<String>,
}

impl Extension {
    /// Create an extension element. No validation applies; extensions are
    /// deliberately opaque.
    pub fn new(
        element_name: impl Into<String>,
        attributes: Vec<Attribute>,
        content: Option<String>,
    ) -> Self {
        Self {
            element_name: element_name.into(),
            attributes,
            content,
        }
    }

    /// The qualified element name, prefix included (e.g. `sort:asc`).
    pub fn element_name(&self) -> &str {
        &self.element_name
    }

    /// The attributes for this element.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// First attribute with a matching name, if any.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        attribute::find(&self.attributes, name)
    }

    /// The flattened text content, if any.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_name_attributes_and_content() {
        let ext = Extension::new(
            "dc:creator",
            vec![Attribute::new("scheme", "x")],
            Some("Bill".to_string()),
        );
        assert_eq!(ext.element_name(), "dc:creator");
        assert_eq!(ext.attribute("scheme").unwrap().value(), "x");
        assert_eq!(ext.content(), Some("Bill"));
    }
}
