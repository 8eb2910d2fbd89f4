//! The `atom:entry` element.

use crate::atom::attribute::{self, Attribute, ElementKind};
use crate::atom::category::Category;
use crate::atom::content::Content;
use crate::atom::date::{Published, Updated};
use crate::atom::extension::Extension;
use crate::atom::id::Id;
use crate::atom::link::Link;
use crate::atom::person::{Author, Contributor};
use crate::atom::source::Source;
use crate::atom::text::{Rights, Summary, Title};
use crate::common::{Error, Result};

/// An individual entry of a feed, or a standalone entry document.
///
/// Immutable once built. `id` and `title` are required; `updated` is
/// optional at construction but load-bearing when the entry joins a feed,
/// where its textual form keys the entry map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    id: Id,
    title: Title,
    updated: Option<Updated>,
    rights: Option<Rights>,
    content: Option<Content>,
    authors: Vec<Author>,
    categories: Vec<Category>,
    contributors: Vec<Contributor>,
    links: Vec<Link>,
    attributes: Vec<Attribute>,
    extensions: Vec<Extension>,
    published: Option<Published>,
    summary: Option<Summary>,
    source: Option<Box<Source>>,
}

impl Entry {
    /// Start building an entry.
    pub fn builder() -> EntryBuilder {
        EntryBuilder::default()
    }

    /// Rebuild this entry field by field.
    pub fn to_builder(&self) -> EntryBuilder {
        EntryBuilder {
            id: Some(self.id.clone()),
            title: Some(self.title.clone()),
            updated: self.updated.clone(),
            rights: self.rights.clone(),
            content: self.content.clone(),
            authors: self.authors.clone(),
            categories: self.categories.clone(),
            contributors: self.contributors.clone(),
            links: self.links.clone(),
            attributes: self.attributes.clone(),
            extensions: self.extensions.clone(),
            published: self.published.clone(),
            summary: self.summary.clone(),
            source: self.source.clone(),
        }
    }

    /// The unique identifier for this entry.
    pub fn id(&self) -> &Id {
        &self.id
    }

    /// The title for this entry.
    pub fn title(&self) -> &Title {
        &self.title
    }

    /// The updated timestamp for this entry, if any.
    pub fn updated(&self) -> Option<&Updated> {
        self.updated.as_ref()
    }

    /// The rights for this entry, if any.
    pub fn rights(&self) -> Option<&Rights> {
        self.rights.as_ref()
    }

    /// The content for this entry, if any.
    pub fn content(&self) -> Option<&Content> {
        self.content.as_ref()
    }

    /// The authors for this entry.
    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    /// The categories for this entry.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// The contributors for this entry.
    pub fn contributors(&self) -> &[Contributor] {
        &self.contributors
    }

    /// The links for this entry.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// The attributes for this entry.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Foreign child elements preserved for round-tripping.
    pub fn extensions(&self) -> &[Extension] {
        &self.extensions
    }

    /// The published timestamp for this entry, if any.
    pub fn published(&self) -> Option<&Published> {
        self.published.as_ref()
    }

    /// The summary for this entry, if any.
    pub fn summary(&self) -> Option<&Summary> {
        self.summary.as_ref()
    }

    /// A snapshot of the source feed this entry was copied from, if any.
    pub fn source(&self) -> Option<&Source> {
        self.source.as_deref()
    }

    /// First attribute with a matching name, if any.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        attribute::find(&self.attributes, name)
    }

    /// First author with a matching name, if any.
    pub fn author(&self, name: &str) -> Option<&Author> {
        self.authors.iter().find(|a| a.name() == name)
    }

    /// First category with a matching term, if any.
    pub fn category(&self, term: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.term() == term)
    }

    /// First contributor with a matching name, if any.
    pub fn contributor(&self, name: &str) -> Option<&Contributor> {
        self.contributors.iter().find(|c| c.name() == name)
    }

    /// First link with a matching href, if any.
    pub fn link(&self, href: &str) -> Option<&Link> {
        self.links.iter().find(|l| l.href() == href)
    }

    /// First extension with a matching element name, if any.
    pub fn extension(&self, element_name: &str) -> Option<&Extension> {
        self.extensions
            .iter()
            .find(|e| e.element_name() == element_name)
    }
}

/// Builder for [`Entry`]. Validation happens in [`EntryBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct EntryBuilder {
    id: Option<Id>,
    title: Option<Title>,
    updated: Option<Updated>,
    rights: Option<Rights>,
    content: Option<Content>,
    authors: Vec<Author>,
    categories: Vec<Category>,
    contributors: Vec<Contributor>,
    links: Vec<Link>,
    attributes: Vec<Attribute>,
    extensions: Vec<Extension>,
    published: Option<Published>,
    summary: Option<Summary>,
    source: Option<Box<Source>>,
}

impl EntryBuilder {
    /// Set the required id element.
    pub fn id(mut self, id: Id) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the required title element.
    pub fn title(mut self, title: Title) -> Self {
        self.title = Some(title);
        self
    }

    /// Set the updated element.
    pub fn updated(mut self, updated: Updated) -> Self {
        self.updated = Some(updated);
        self
    }

    /// Set the rights element.
    pub fn rights(mut self, rights: Rights) -> Self {
        self.rights = Some(rights);
        self
    }

    /// Set the content element.
    pub fn content(mut self, content: Content) -> Self {
        self.content = Some(content);
        self
    }

    /// Replace the author list.
    pub fn authors(mut self, authors: Vec<Author>) -> Self {
        self.authors = authors;
        self
    }

    /// Replace the category list.
    pub fn categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }

    /// Replace the contributor list.
    pub fn contributors(mut self, contributors: Vec<Contributor>) -> Self {
        self.contributors = contributors;
        self
    }

    /// Replace the link list.
    pub fn links(mut self, links: Vec<Link>) -> Self {
        self.links = links;
        self
    }

    /// Replace the attribute list.
    pub fn attributes(mut self, attributes: Vec<Attribute>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Replace the extension list.
    pub fn extensions(mut self, extensions: Vec<Extension>) -> Self {
        self.extensions = extensions;
        self
    }

    /// Set the published element.
    pub fn published(mut self, published: Published) -> Self {
        self.published = Some(published);
        self
    }

    /// Set the summary element.
    pub fn summary(mut self, summary: Summary) -> Self {
        self.summary = Some(summary);
        self
    }

    /// Set the source snapshot.
    pub fn source(mut self, source: Source) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Validate and build the entry.
    pub fn build(self) -> Result<Entry> {
        attribute::verify(&self.attributes, ElementKind::Entry)?;
        let id = self.id.ok_or_else(|| {
            Error::Spec("atom:entry elements MUST contain exactly one atom:id element".to_string())
        })?;
        let title = self.title.ok_or_else(|| {
            Error::Spec(
                "atom:entry elements MUST contain exactly one atom:title element".to_string(),
            )
        })?;
        // Out-of-line content is empty, so the entry must carry a summary.
        if let Some(content) = &self.content
            && content.src().is_some()
            && self.summary.is_none()
        {
            return Err(Error::Spec(
                "atom:entry elements MUST contain an atom:summary element if the atom:content \
                 element has a \"src\" attribute"
                    .to_string(),
            ));
        }
        Ok(Entry {
            id,
            title,
            updated: self.updated,
            rights: self.rights,
            content: self.content,
            authors: self.authors,
            categories: self.categories,
            contributors: self.contributors,
            links: self.links,
            attributes: self.attributes,
            extensions: self.extensions,
            published: self.published,
            summary: self.summary,
            source: self.source,
        })
    }
}
