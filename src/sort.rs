//! The entry-sort extension.
//!
//! A feed opts in by carrying the reserved namespace attribute
//! `xmlns:sort`; the active directive is an extension element `sort:asc` or
//! `sort:desc` with a single `type` attribute naming the entry field to
//! order by. Applying a sort rebuilds the entry map keyed by that field's
//! text and normalizes the declaration so exactly one directive remains.

use crate::atom::{Attribute, Entry, EntryMap, Extension, Feed};
use crate::common::{Error, Result};

/// The reserved namespace of the sort extension.
pub const SORT_XMLNS: &str =
    "http://www.colorfulsoftware.com/projects/atomsphere/extension/sort/1.0";

/// Name of the namespace declaration attribute carried by opted-in feeds.
pub const SORT_XMLNS_ATTR: &str = "xmlns:sort";

/// Direction of an entry sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending lexicographic key order.
    Ascending,
    /// Descending lexicographic key order.
    Descending,
}

impl SortOrder {
    /// The extension element name declaring this direction.
    pub fn element_name(self) -> &'static str {
        match self {
            SortOrder::Ascending => "sort:asc",
            SortOrder::Descending => "sort:desc",
        }
    }
}

/// The entry field whose text keys a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Key by the entry's updated text.
    Updated,
    /// Key by the entry's title text.
    Title,
    /// Key by the entry's summary text.
    Summary,
}

impl SortKey {
    /// The value of the directive's `type` attribute.
    pub fn type_value(self) -> &'static str {
        match self {
            SortKey::Updated => "updated",
            SortKey::Title => "title",
            SortKey::Summary => "summary",
        }
    }

    fn from_type_value(value: &str) -> Option<Self> {
        match value {
            "updated" => Some(SortKey::Updated),
            "title" => Some(SortKey::Title),
            "summary" => Some(SortKey::Summary),
            _ => None,
        }
    }

    /// The sort key text of an entry. Comparison is textual even for
    /// updated, not a semantic timestamp compare.
    fn key_of(self, entry: &Entry) -> Result<String> {
        match self {
            SortKey::Updated => Ok(entry
                .updated()
                .ok_or_else(|| {
                    Error::Spec(
                        "cannot sort by updated: an entry has no atom:updated element".to_string(),
                    )
                })?
                .text()),
            SortKey::Title => Ok(entry.title().text().unwrap_or_default().to_string()),
            SortKey::Summary => Ok(entry
                .summary()
                .ok_or_else(|| {
                    Error::Spec(
                        "cannot sort by summary: an entry has no atom:summary element".to_string(),
                    )
                })?
                .text()
                .unwrap_or_default()
                .to_string()),
        }
    }
}

/// Rebuild a feed with its entries ordered by `key` in `order` direction.
///
/// The returned feed carries a normalized sort declaration: the namespace
/// attribute is deduplicated and exactly one `sort:asc`/`sort:desc`
/// extension remains. Idempotent for a fixed `(order, key)` pair.
pub fn sort_entries(feed: &Feed, order: SortOrder, key: SortKey) -> Result<Feed> {
    let mut entries = EntryMap::with_order(order == SortOrder::Descending);
    for entry in feed.entries().values() {
        entries.insert(key.key_of(entry)?, entry.clone());
    }

    // Deduplicate the namespace declaration, then re-append it.
    let declaration = Attribute::new(SORT_XMLNS_ATTR, SORT_XMLNS);
    let mut attributes: Vec<Attribute> = feed
        .attributes()
        .iter()
        .filter(|a| **a != declaration)
        .cloned()
        .collect();
    attributes.push(declaration);

    // Drop every stale directive and record the active one.
    let directive = Extension::new(
        order.element_name(),
        vec![Attribute::new("type", key.type_value())],
        None,
    );
    let mut extensions: Vec<Extension> = feed
        .extensions()
        .iter()
        .filter(|e| {
            !e.element_name().eq_ignore_ascii_case("sort:asc")
                && !e.element_name().eq_ignore_ascii_case("sort:desc")
        })
        .cloned()
        .collect();
    extensions.push(directive);

    feed.to_builder()
        .attributes(attributes)
        .extensions(extensions)
        .entries(entries)
        .build()
}

/// Apply the sort declared by the feed itself, if any.
///
/// Feeds without the reserved namespace attribute, or without a
/// recognizable directive, come back unchanged. Called by the writer before
/// emission.
pub(crate) fn check_for_and_apply(feed: &Feed) -> Result<Feed> {
    if feed
        .attributes()
        .iter()
        .any(|a| a.name() == SORT_XMLNS_ATTR && a.value() == SORT_XMLNS)
        && let Some((order, key)) = declared_directive(feed)
    {
        return sort_entries(feed, order, key);
    }
    Ok(feed.clone())
}

/// The first recognizable sort directive among the feed's extensions.
fn declared_directive(feed: &Feed) -> Option<(SortOrder, SortKey)> {
    for ext in feed.extensions() {
        let order = if ext.element_name().eq_ignore_ascii_case("sort:asc") {
            SortOrder::Ascending
        } else if ext.element_name().eq_ignore_ascii_case("sort:desc") {
            SortOrder::Descending
        } else {
            continue;
        };
        if let Some(attr) = ext.attribute("type")
            && let Some(key) = SortKey::from_type_value(attr.value())
        {
            return Some((order, key));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::{Id, Summary, Title};

    fn entry(id: &str, updated: &str, title: &str) -> Entry {
        Entry::builder()
            .id(Id::new(Vec::new(), id).unwrap())
            .title(Title::new(Some(title.to_string()), Vec::new()).unwrap())
            .updated(crate::atom::Updated::from_text(updated, Vec::new()).unwrap())
            .summary(Summary::new(Some(format!("about {title}")), Vec::new()).unwrap())
            .build()
            .unwrap()
    }

    fn feed_with_entries() -> Feed {
        let mut entries = EntryMap::new();
        let older = entry("urn:old", "2019-01-01T00:00:00Z", "beta");
        let newer = entry("urn:new", "2020-01-01T00:00:00Z", "alpha");
        entries.insert(older.updated().unwrap().text(), older);
        entries.insert(newer.updated().unwrap().text(), newer);
        Feed::builder().entries(entries).build().unwrap()
    }

    #[test]
    fn descending_updated_reverses_entry_order() {
        let sorted = sort_entries(&feed_with_entries(), SortOrder::Descending, SortKey::Updated)
            .unwrap();
        let ids: Vec<&str> = sorted.entries().values().map(|e| e.id().uri()).collect();
        assert_eq!(ids, vec!["urn:new", "urn:old"]);
        let directives: Vec<&Extension> = sorted
            .extensions()
            .iter()
            .filter(|e| e.element_name().starts_with("sort:"))
            .collect();
        assert_eq!(directives.len(), 1);
        assert_eq!(directives[0].element_name(), "sort:desc");
        assert_eq!(directives[0].attribute("type").unwrap().value(), "updated");
    }

    #[test]
    fn title_key_sorts_lexicographically() {
        let sorted =
            sort_entries(&feed_with_entries(), SortOrder::Ascending, SortKey::Title).unwrap();
        let keys: Vec<&str> = sorted.entries().keys().collect();
        assert_eq!(keys, vec!["alpha", "beta"]);
    }

    #[test]
    fn sorting_is_idempotent() {
        let once = sort_entries(&feed_with_entries(), SortOrder::Descending, SortKey::Updated)
            .unwrap();
        let twice = sort_entries(&once, SortOrder::Descending, SortKey::Updated).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn declared_directive_is_applied() {
        let feed = feed_with_entries()
            .to_builder()
            .attributes(vec![Attribute::new(SORT_XMLNS_ATTR, SORT_XMLNS)])
            .extensions(vec![Extension::new(
                "sort:desc",
                vec![Attribute::new("type", "updated")],
                None,
            )])
            .build()
            .unwrap();
        let applied = check_for_and_apply(&feed).unwrap();
        let ids: Vec<&str> = applied.entries().values().map(|e| e.id().uri()).collect();
        assert_eq!(ids, vec!["urn:new", "urn:old"]);
    }

    #[test]
    fn feeds_without_the_namespace_keep_their_order() {
        let feed = feed_with_entries();
        let untouched = check_for_and_apply(&feed).unwrap();
        assert_eq!(feed, untouched);
    }

    #[test]
    fn sorting_by_missing_summary_fails() {
        let mut entries = EntryMap::new();
        let entry = Entry::builder()
            .id(Id::new(Vec::new(), "urn:1").unwrap())
            .title(Title::new(Some("t".to_string()), Vec::new()).unwrap())
            .updated(crate::atom::Updated::from_text("2020-01-01T00:00:00Z", Vec::new()).unwrap())
            .build()
            .unwrap();
        entries.insert(entry.updated().unwrap().text(), entry);
        let feed = Feed::builder().entries(entries).build().unwrap();
        let err = sort_entries(&feed, SortOrder::Ascending, SortKey::Summary).unwrap_err();
        assert!(err.to_string().contains("summary"));
    }
}
