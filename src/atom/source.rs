//! The `atom:source` element.

use crate::atom::attribute::{self, Attribute, ElementKind};
use crate::atom::category::Category;
use crate::atom::date::Updated;
use crate::atom::extension::Extension;
use crate::atom::generator::Generator;
use crate::atom::icon::Icon;
use crate::atom::id::Id;
use crate::atom::link::Link;
use crate::atom::logo::Logo;
use crate::atom::person::{Author, Contributor};
use crate::atom::text::{Rights, Subtitle, Title};
use crate::common::Result;

/// A snapshot of the feed an entry was copied from.
///
/// Same shape as a feed minus the entry collection; every field is
/// optional. The snapshot is an independent deep value, never a shared
/// reference back into a feed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Source {
    id: Option<Id>,
    title: Option<Title>,
    updated: Option<Updated>,
    rights: Option<Rights>,
    authors: Vec<Author>,
    categories: Vec<Category>,
    contributors: Vec<Contributor>,
    links: Vec<Link>,
    attributes: Vec<Attribute>,
    extensions: Vec<Extension>,
    generator: Option<Generator>,
    subtitle: Option<Subtitle>,
    icon: Option<Icon>,
    logo: Option<Logo>,
}

impl Source {
    /// Start building a source snapshot.
    pub fn builder() -> SourceBuilder {
        SourceBuilder::default()
    }

    /// The unique identifier, if any.
    pub fn id(&self) -> Option<&Id> {
        self.id.as_ref()
    }

    /// The title, if any.
    pub fn title(&self) -> Option<&Title> {
        self.title.as_ref()
    }

    /// The updated timestamp, if any.
    pub fn updated(&self) -> Option<&Updated> {
        self.updated.as_ref()
    }

    /// The rights, if any.
    pub fn rights(&self) -> Option<&Rights> {
        self.rights.as_ref()
    }

    /// The authors.
    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    /// The categories.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// The contributors.
    pub fn contributors(&self) -> &[Contributor] {
        &self.contributors
    }

    /// The links.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// The attributes.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Foreign child elements preserved for round-tripping.
    pub fn extensions(&self) -> &[Extension] {
        &self.extensions
    }

    /// The generator, if any.
    pub fn generator(&self) -> Option<&Generator> {
        self.generator.as_ref()
    }

    /// The subtitle, if any.
    pub fn subtitle(&self) -> Option<&Subtitle> {
        self.subtitle.as_ref()
    }

    /// The icon, if any.
    pub fn icon(&self) -> Option<&Icon> {
        self.icon.as_ref()
    }

    /// The logo, if any.
    pub fn logo(&self) -> Option<&Logo> {
        self.logo.as_ref()
    }

    /// First attribute with a matching name, if any.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        attribute::find(&self.attributes, name)
    }
}

/// Builder for [`Source`].
#[derive(Debug, Clone, Default)]
pub struct SourceBuilder {
    id: Option<Id>,
    title: Option<Title>,
    updated: Option<Updated>,
    rights: Option<Rights>,
    authors: Vec<Author>,
    categories: Vec<Category>,
    contributors: Vec<Contributor>,
    links: Vec<Link>,
    attributes: Vec<Attribute>,
    extensions: Vec<Extension>,
    generator: Option<Generator>,
    subtitle: Option<Subtitle>,
    icon: Option<Icon>,
    logo: Option<Logo>,
}

impl SourceBuilder {
    /// Set the id element.
    pub fn id(mut self, id: Id) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the title element.
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

    /// Set the generator element.
    pub fn generator(mut self, generator: Generator) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Set the subtitle element.
    pub fn subtitle(mut self, subtitle: Subtitle) -> Self {
        self.subtitle = Some(subtitle);
        self
    }

    /// Set the icon element.
    pub fn icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Set the logo element.
    pub fn logo(mut self, logo: Logo) -> Self {
        self.logo = Some(logo);
        self
    }

    /// Validate and build the source snapshot.
    pub fn build(self) -> Result<Source> {
        attribute::verify(&self.attributes, ElementKind::Source)?;
        Ok(Source {
            id: self.id,
            title: self.title,
            updated: self.updated,
            rights: self.rights,
            authors: self.authors,
            categories: self.categories,
            contributors: self.contributors,
            links: self.links,
            attributes: self.attributes,
            extensions: self.extensions,
            generator: self.generator,
            subtitle: self.subtitle,
            icon: self.icon,
            logo: self.logo,
        })
    }
}
