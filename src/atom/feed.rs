//! The `atom:feed` element and its ordered entry collection.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::iter::Rev;

use crate::atom::attribute::{self, Attribute, ElementKind};
use crate::atom::category::Category;
use crate::atom::date::Updated;
use crate::atom::entry::Entry;
use crate::atom::extension::Extension;
use crate::atom::generator::Generator;
use crate::atom::icon::Icon;
use crate::atom::id::Id;
use crate::atom::link::Link;
use crate::atom::logo::Logo;
use crate::atom::person::{Author, Contributor};
use crate::atom::text::{Rights, Subtitle, Title};
use crate::common::Result;

/// An ordered map of entries.
///
/// Entries are keyed by text, by default the textual form of each entry's
/// updated timestamp. Iteration order is ascending lexicographic by key
/// unless the map was rebuilt in descending order by the sort extension.
/// Inserting a duplicate key overwrites: last write wins.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntryMap {
    map: BTreeMap<String, Entry>,
    descending: bool,
}

impl EntryMap {
    /// Create an empty map in ascending key order.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_order(descending: bool) -> Self {
        Self {
            map: BTreeMap::new(),
            descending,
        }
    }

    /// Insert an entry under a key, returning any displaced entry.
    pub fn insert(&mut self, key: impl Into<String>, entry: Entry) -> Option<Entry> {
        self.map.insert(key.into(), entry)
    }

    /// Look up an entry by its key.
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.map.get(key)
    }

    /// Number of entries in the map.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Whether iteration runs in descending key order.
    pub fn is_descending(&self) -> bool {
        self.descending
    }

    /// Iterate entries in map order.
    pub fn iter(&self) -> EntryIter<'_> {
        EntryIter {
            inner: if self.descending {
                EntryIterImpl::Descending(self.map.iter().rev())
            } else {
                EntryIterImpl::Ascending(self.map.iter())
            },
        }
    }

    /// Iterate entry keys in map order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(k, _)| k)
    }

    /// Iterate entries in map order, without keys.
    pub fn values(&self) -> impl Iterator<Item = &Entry> {
        self.iter().map(|(_, e)| e)
    }
}

impl<'a> IntoIterator for &'a EntryMap {
    type Item = (&'a str, &'a Entry);
    type IntoIter = EntryIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over an [`EntryMap`] in its stored order.
pub struct EntryIter<'a> {
    inner: EntryIterImpl<'a>,
}

enum EntryIterImpl<'a> {
    Ascending(btree_map::Iter<'a, String, Entry>),
    Descending(Rev<btree_map::Iter<'a, String, Entry>>),
}

impl<'a> Iterator for EntryIter<'a> {
    type Item = (&'a str, &'a Entry);

    fn next(&mut self) -> Option<Self::Item> {
        let next = match &mut self.inner {
            EntryIterImpl::Ascending(iter) => iter.next(),
            EntryIterImpl::Descending(iter) => iter.next(),
        };
        next.map(|(k, e)| (k.as_str(), e))
    }
}

/// The root element of an Atom feed document.
///
/// Immutable once built; every field is optional at this level. The entry
/// collection is keyed by each entry's updated text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Feed {
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
    entries: EntryMap,
}

impl Feed {
    /// Start building a feed.
    pub fn builder() -> FeedBuilder {
        FeedBuilder::default()
    }

    /// Rebuild this feed field by field.
    pub fn to_builder(&self) -> FeedBuilder {
        FeedBuilder {
            id: self.id.clone(),
            title: self.title.clone(),
            updated: self.updated.clone(),
            rights: self.rights.clone(),
            authors: self.authors.clone(),
            categories: self.categories.clone(),
            contributors: self.contributors.clone(),
            links: self.links.clone(),
            attributes: self.attributes.clone(),
            extensions: self.extensions.clone(),
            generator: self.generator.clone(),
            subtitle: self.subtitle.clone(),
            icon: self.icon.clone(),
            logo: self.logo.clone(),
            entries: self.entries.clone(),
        }
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

    /// The generator, if any. Overwritten with the library's own identity
    /// on output.
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

    /// The ordered entry collection.
    pub fn entries(&self) -> &EntryMap {
        &self.entries
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

    /// Look up an entry by its map key (by default its updated text).
    pub fn entry(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }
}

/// Builder for [`Feed`].
#[derive(Debug, Clone, Default)]
pub struct FeedBuilder {
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
    entries: EntryMap,
}

impl FeedBuilder {
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

    /// Replace the entry collection.
    pub fn entries(mut self, entries: EntryMap) -> Self {
        self.entries = entries;
        self
    }

    /// Validate and build the feed.
    pub fn build(self) -> Result<Feed> {
        attribute::verify(&self.attributes, ElementKind::Feed)?;
        Ok(Feed {
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
            entries: self.entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str) -> Entry {
        Entry::builder()
            .id(Id::new(Vec::new(), id).unwrap())
            .title(Title::new(Some(id.to_string()), Vec::new()).unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn map_iterates_in_ascending_key_order_by_default() {
        let mut map = EntryMap::new();
        map.insert("2020-01-01T00:00:00.00+00:00", entry("b"));
        map.insert("2019-01-01T00:00:00.00+00:00", entry("a"));
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(
            keys,
            vec!["2019-01-01T00:00:00.00+00:00", "2020-01-01T00:00:00.00+00:00"]
        );
        assert!(!map.is_descending());
    }

    #[test]
    fn descending_map_reverses_iteration() {
        let mut map = EntryMap::with_order(true);
        map.insert("a", entry("a"));
        map.insert("b", entry("b"));
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn duplicate_keys_collide_last_write_wins() {
        let mut map = EntryMap::new();
        assert!(map.insert("k", entry("first")).is_none());
        let displaced = map.insert("k", entry("second")).unwrap();
        assert_eq!(displaced.id().uri(), "first");
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("k").unwrap().id().uri(), "second");
    }

    #[test]
    fn feed_fields_are_all_optional() {
        let feed = Feed::builder().build().unwrap();
        assert!(feed.id().is_none());
        assert!(feed.entries().is_empty());
    }

    #[test]
    fn feed_finders_match_by_key_field() {
        let feed = Feed::builder()
            .links(vec![
                Link::new(vec![Attribute::new("href", "http://example.org/")], None).unwrap(),
            ])
            .categories(vec![
                Category::new(vec![Attribute::new("term", "rust")], None).unwrap(),
            ])
            .build()
            .unwrap();
        assert!(feed.link("http://example.org/").is_some());
        assert!(feed.category("rust").is_some());
        assert!(feed.category("missing").is_none());
    }
}
