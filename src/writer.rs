//! Document writer: Atom object graph → XML.
//!
//! Walks an immutable feed or entry and emits the matching element
//! sequence, always preceded by exactly one XML declaration. Before
//! emission the root attributes gain the Atom namespace and a default
//! language if absent, feeds get this library's generator identity in
//! place of any caller-supplied one, and a feed carrying the sort
//! extension namespace has its declared entry order applied. The caller's
//! in-memory graph is never modified; the writer works on a rebuilt copy.

use std::io::Write;

use once_cell::sync::Lazy;

use crate::atom::{
    ATOM_XMLNS, Attribute, Author, Category, Content, ContentType, Contributor, DEFAULT_XML_LANG,
    Entry, Extension, Feed, Generator, Link, Rights, Source, Subtitle, Summary, Title,
    attribute::find,
};
use crate::common::Result;
use crate::common::xml::escape_xml;
use crate::sort;

/// Human-readable name emitted in every feed's generator element.
pub const GENERATOR_NAME: &str = "atomdoc";

/// IRI emitted in every feed's generator element.
pub const GENERATOR_URI: &str = "https://docs.rs/atomdoc";

// Built once from build-time package metadata.
static LIBRARY_GENERATOR: Lazy<Generator> = Lazy::new(|| {
    Generator::new(
        vec![
            Attribute::new("uri", GENERATOR_URI),
            Attribute::new("version", env!("CARGO_PKG_VERSION")),
        ],
        GENERATOR_NAME,
    )
    .expect("library generator identity is valid")
});

/// The generator element identifying this library, as stamped on output.
pub fn library_generator() -> &'static Generator {
    &LIBRARY_GENERATOR
}

/// Output document settings, threaded explicitly through every write call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteConfig {
    /// Document encoding named in the XML declaration.
    pub encoding: String,
    /// XML version named in the XML declaration.
    pub xml_version: String,
}

impl Default for WriteConfig {
    fn default() -> Self {
        Self {
            encoding: "UTF-8".to_string(),
            xml_version: "1.0".to_string(),
        }
    }
}

impl WriteConfig {
    /// Create a config with an explicit encoding and XML version.
    pub fn new(encoding: impl Into<String>, xml_version: impl Into<String>) -> Self {
        Self {
            encoding: encoding.into(),
            xml_version: xml_version.into(),
        }
    }
}

/// Serialize a feed document to `out`, flushing before return.
///
/// The sink is released when `out` drops, on success and failure alike.
pub(crate) fn write_feed<W: Write>(feed: &Feed, mut out: W, config: &WriteConfig) -> Result<()> {
    // Apply any declared sort first so the emitted order never goes stale.
    let feed = sort::check_for_and_apply(feed)?;

    let mut attributes = feed.attributes().to_vec();
    ensure_default_attributes(&mut attributes);
    let feed = feed
        .to_builder()
        .attributes(attributes)
        .generator(LIBRARY_GENERATOR.clone())
        .build()?;

    let mut xml = String::with_capacity(1024);
    push_declaration(&mut xml, config);
    push_feed(&mut xml, &feed);
    out.write_all(xml.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Serialize a standalone entry document to `out`, flushing before return.
pub(crate) fn write_entry<W: Write>(entry: &Entry, mut out: W, config: &WriteConfig) -> Result<()> {
    let mut attributes = entry.attributes().to_vec();
    ensure_default_attributes(&mut attributes);
    let entry = entry.to_builder().attributes(attributes).build()?;

    let mut xml = String::with_capacity(512);
    push_declaration(&mut xml, config);
    push_entry(&mut xml, &entry);
    out.write_all(xml.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Append the Atom namespace and default language, each only if no
/// attribute of that name is already present.
fn ensure_default_attributes(attributes: &mut Vec<Attribute>) {
    if find(attributes, "xmlns").is_none() {
        attributes.push(Attribute::new("xmlns", ATOM_XMLNS));
    }
    if find(attributes, "xml:lang").is_none() {
        attributes.push(Attribute::new("xml:lang", DEFAULT_XML_LANG));
    }
}

fn push_declaration(xml: &mut String, config: &WriteConfig) {
    xml.push_str("<?xml version=\"");
    xml.push_str(&config.xml_version);
    xml.push_str("\" encoding=\"");
    xml.push_str(&config.encoding);
    xml.push_str("\"?>");
}

// Attributes are emitted in insertion order, values escaped.
fn push_attributes(xml: &mut String, attributes: &[Attribute]) {
    for attr in attributes {
        xml.push(' ');
        xml.push_str(attr.name());
        xml.push_str("=\"");
        xml.push_str(&escape_xml(attr.value()));
        xml.push('"');
    }
}

fn push_open(xml: &mut String, name: &str, attributes: &[Attribute]) {
    xml.push('<');
    xml.push_str(name);
    push_attributes(xml, attributes);
    xml.push('>');
}

fn push_empty(xml: &mut String, name: &str, attributes: &[Attribute]) {
    xml.push('<');
    xml.push_str(name);
    push_attributes(xml, attributes);
    xml.push_str("/>");
}

fn push_close(xml: &mut String, name: &str) {
    xml.push_str("</");
    xml.push_str(name);
    xml.push('>');
}

fn push_simple(xml: &mut String, name: &str, attributes: &[Attribute], text: &str) {
    push_open(xml, name, attributes);
    xml.push_str(&escape_xml(text));
    push_close(xml, name);
}

/// Emit a text-construct payload. XHTML is reassembled from its stored
/// wrapper and inner markup verbatim; everything else is escaped text.
fn push_text_payload(
    xml: &mut String,
    content_type: ContentType,
    text: Option<&str>,
    wrapper_start: Option<&str>,
    wrapper_end: Option<&str>,
) {
    if content_type == ContentType::Xhtml {
        if let Some(start) = wrapper_start {
            xml.push_str(start);
        }
        if let Some(text) = text {
            xml.push_str(text);
        }
        if let Some(end) = wrapper_end {
            xml.push_str(end);
        }
    } else if let Some(text) = text {
        xml.push_str(&escape_xml(text));
    }
}

macro_rules! push_text_construct {
    ($fn_name:ident, $name:literal, $ty:ty) => {
        fn $fn_name(xml: &mut String, value: &$ty) {
            push_open(xml, $name, value.attributes());
            push_text_payload(
                xml,
                value.content_type(),
                value.text(),
                value.div_wrapper_start(),
                value.div_wrapper_end(),
            );
            push_close(xml, $name);
        }
    };
}

push_text_construct!(push_title, "title", Title);
push_text_construct!(push_subtitle, "subtitle", Subtitle);
push_text_construct!(push_summary, "summary", Summary);
push_text_construct!(push_rights, "rights", Rights);

fn push_content(xml: &mut String, content: &Content) {
    // Out-of-line content is an empty element by definition.
    if content.content_type() == ContentType::External {
        push_empty(xml, "content", content.attributes());
        return;
    }
    push_open(xml, "content", content.attributes());
    push_text_payload(
        xml,
        content.content_type(),
        content.text(),
        content.div_wrapper_start(),
        content.div_wrapper_end(),
    );
    push_close(xml, "content");
}

macro_rules! push_person_construct {
    ($fn_name:ident, $name:literal, $ty:ty) => {
        fn $fn_name(xml: &mut String, person: &$ty) {
            push_open(xml, $name, person.attributes());
            push_simple(xml, "name", &[], person.name());
            if let Some(uri) = person.uri() {
                push_simple(xml, "uri", &[], uri);
            }
            if let Some(email) = person.email() {
                push_simple(xml, "email", &[], email);
            }
            for extension in person.extensions() {
                push_extension(xml, extension);
            }
            push_close(xml, $name);
        }
    };
}

push_person_construct!(push_author, "author", Author);
push_person_construct!(push_contributor, "contributor", Contributor);

fn push_category(xml: &mut String, category: &Category) {
    match category.content() {
        Some(content) => push_simple(xml, "category", category.attributes(), content),
        None => push_empty(xml, "category", category.attributes()),
    }
}

fn push_link(xml: &mut String, link: &Link) {
    match link.content() {
        Some(content) => push_simple(xml, "link", link.attributes(), content),
        None => push_empty(xml, "link", link.attributes()),
    }
}

fn push_generator(xml: &mut String, generator: &Generator) {
    push_simple(xml, "generator", generator.attributes(), generator.text());
}

fn push_extension(xml: &mut String, extension: &Extension) {
    match extension.content() {
        Some(content) => push_simple(xml, extension.element_name(), extension.attributes(), content),
        None => push_empty(xml, extension.element_name(), extension.attributes()),
    }
}

fn push_feed(xml: &mut String, feed: &Feed) {
    push_open(xml, "feed", feed.attributes());
    if let Some(id) = feed.id() {
        push_simple(xml, "id", id.attributes(), id.uri());
    }
    if let Some(title) = feed.title() {
        push_title(xml, title);
    }
    if let Some(updated) = feed.updated() {
        push_simple(xml, "updated", updated.attributes(), &updated.text());
    }
    if let Some(rights) = feed.rights() {
        push_rights(xml, rights);
    }
    for author in feed.authors() {
        push_author(xml, author);
    }
    for category in feed.categories() {
        push_category(xml, category);
    }
    for contributor in feed.contributors() {
        push_contributor(xml, contributor);
    }
    for link in feed.links() {
        push_link(xml, link);
    }
    for extension in feed.extensions() {
        push_extension(xml, extension);
    }
    if let Some(generator) = feed.generator() {
        push_generator(xml, generator);
    }
    if let Some(subtitle) = feed.subtitle() {
        push_subtitle(xml, subtitle);
    }
    if let Some(icon) = feed.icon() {
        push_simple(xml, "icon", icon.attributes(), icon.uri());
    }
    if let Some(logo) = feed.logo() {
        push_simple(xml, "logo", logo.attributes(), logo.uri());
    }
    for entry in feed.entries().values() {
        push_entry(xml, entry);
    }
    push_close(xml, "feed");
}

fn push_entry(xml: &mut String, entry: &Entry) {
    push_open(xml, "entry", entry.attributes());
    push_simple(xml, "id", entry.id().attributes(), entry.id().uri());
    push_title(xml, entry.title());
    if let Some(updated) = entry.updated() {
        push_simple(xml, "updated", updated.attributes(), &updated.text());
    }
    if let Some(rights) = entry.rights() {
        push_rights(xml, rights);
    }
    if let Some(content) = entry.content() {
        push_content(xml, content);
    }
    for author in entry.authors() {
        push_author(xml, author);
    }
    for category in entry.categories() {
        push_category(xml, category);
    }
    for contributor in entry.contributors() {
        push_contributor(xml, contributor);
    }
    for link in entry.links() {
        push_link(xml, link);
    }
    for extension in entry.extensions() {
        push_extension(xml, extension);
    }
    if let Some(published) = entry.published() {
        push_simple(xml, "published", published.attributes(), &published.text());
    }
    if let Some(summary) = entry.summary() {
        push_summary(xml, summary);
    }
    if let Some(source) = entry.source() {
        push_source(xml, source);
    }
    push_close(xml, "entry");
}

fn push_source(xml: &mut String, source: &Source) {
    push_open(xml, "source", source.attributes());
    if let Some(id) = source.id() {
        push_simple(xml, "id", id.attributes(), id.uri());
    }
    if let Some(title) = source.title() {
        push_title(xml, title);
    }
    if let Some(updated) = source.updated() {
        push_simple(xml, "updated", updated.attributes(), &updated.text());
    }
    if let Some(rights) = source.rights() {
        push_rights(xml, rights);
    }
    for author in source.authors() {
        push_author(xml, author);
    }
    for category in source.categories() {
        push_category(xml, category);
    }
    for contributor in source.contributors() {
        push_contributor(xml, contributor);
    }
    for link in source.links() {
        push_link(xml, link);
    }
    for extension in source.extensions() {
        push_extension(xml, extension);
    }
    if let Some(generator) = source.generator() {
        push_generator(xml, generator);
    }
    if let Some(subtitle) = source.subtitle() {
        push_subtitle(xml, subtitle);
    }
    if let Some(icon) = source.icon() {
        push_simple(xml, "icon", icon.attributes(), icon.uri());
    }
    if let Some(logo) = source.logo() {
        push_simple(xml, "logo", logo.attributes(), logo.uri());
    }
    push_close(xml, "source");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::{EntryMap, Id};

    fn minimal_feed() -> Feed {
        Feed::builder()
            .id(Id::new(Vec::new(), "urn:feed").unwrap())
            .title(Title::new(Some("Test Feed".to_string()), Vec::new()).unwrap())
            .build()
            .unwrap()
    }

    fn to_string(feed: &Feed) -> String {
        let mut buf = Vec::new();
        write_feed(feed, &mut buf, &WriteConfig::default()).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn emits_exactly_one_declaration_with_defaults() {
        let xml = to_string(&minimal_feed());
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert_eq!(xml.matches("<?xml").count(), 1);
    }

    #[test]
    fn injects_namespace_and_language_when_absent() {
        let xml = to_string(&minimal_feed());
        assert!(xml.contains("xmlns=\"http://www.w3.org/2005/Atom\""));
        assert!(xml.contains("xml:lang=\"en-US\""));
    }

    #[test]
    fn keeps_caller_supplied_language() {
        let feed = minimal_feed()
            .to_builder()
            .attributes(vec![Attribute::new("xml:lang", "de")])
            .build()
            .unwrap();
        let xml = to_string(&feed);
        assert!(xml.contains("xml:lang=\"de\""));
        assert!(!xml.contains("xml:lang=\"en-US\""));
    }

    #[test]
    fn replaces_the_generator_on_output_only() {
        let feed = minimal_feed()
            .to_builder()
            .generator(Generator::new(Vec::new(), "Someone Else").unwrap())
            .build()
            .unwrap();
        let xml = to_string(&feed);
        assert!(xml.contains(">atomdoc</generator>"));
        assert!(!xml.contains("Someone Else"));
        // The in-memory feed is untouched.
        assert_eq!(feed.generator().unwrap().text(), "Someone Else");
    }

    #[test]
    fn escapes_text_and_attribute_values() {
        let feed = minimal_feed()
            .to_builder()
            .title(Title::new(Some("Dogs & <Ponies>".to_string()), Vec::new()).unwrap())
            .links(vec![
                Link::new(vec![Attribute::new("href", "http://x/?a=1&b=2")], None).unwrap(),
            ])
            .build()
            .unwrap();
        let xml = to_string(&feed);
        assert!(xml.contains("<title>Dogs &amp; &lt;Ponies&gt;</title>"));
        assert!(xml.contains("href=\"http://x/?a=1&amp;b=2\""));
    }

    #[test]
    fn xhtml_payload_is_reassembled_verbatim() {
        let raw = "<div xmlns=\"http://www.w3.org/1999/xhtml\">hello <b>world</b></div>";
        let feed = minimal_feed()
            .to_builder()
            .title(
                Title::new(
                    Some(raw.to_string()),
                    vec![Attribute::new("type", "xhtml")],
                )
                .unwrap(),
            )
            .build()
            .unwrap();
        let xml = to_string(&feed);
        assert!(xml.contains(&format!("<title type=\"xhtml\">{raw}</title>")));
    }

    #[test]
    fn external_content_is_an_empty_element() {
        let entry = Entry::builder()
            .id(Id::new(Vec::new(), "urn:1").unwrap())
            .title(Title::new(Some("t".to_string()), Vec::new()).unwrap())
            .content(
                Content::new(None, vec![Attribute::new("src", "http://x/a.mp4")]).unwrap(),
            )
            .summary(Summary::new(Some("s".to_string()), Vec::new()).unwrap())
            .build()
            .unwrap();
        let mut buf = Vec::new();
        write_entry(&entry, &mut buf, &WriteConfig::default()).unwrap();
        let xml = String::from_utf8(buf).unwrap();
        assert!(xml.contains("<content src=\"http://x/a.mp4\"/>"));
        // Entry documents get the defaults but never a generator.
        assert!(xml.contains("xmlns=\"http://www.w3.org/2005/Atom\""));
        assert!(!xml.contains("<generator"));
    }

    #[test]
    fn declared_sort_is_applied_before_emission() {
        let older = Entry::builder()
            .id(Id::new(Vec::new(), "urn:old").unwrap())
            .title(Title::new(Some("old".to_string()), Vec::new()).unwrap())
            .updated(crate::atom::Updated::from_text("2019-01-01T00:00:00Z", Vec::new()).unwrap())
            .build()
            .unwrap();
        let newer = Entry::builder()
            .id(Id::new(Vec::new(), "urn:new").unwrap())
            .title(Title::new(Some("new".to_string()), Vec::new()).unwrap())
            .updated(crate::atom::Updated::from_text("2020-01-01T00:00:00Z", Vec::new()).unwrap())
            .build()
            .unwrap();
        let mut entries = EntryMap::new();
        entries.insert(older.updated().unwrap().text(), older);
        entries.insert(newer.updated().unwrap().text(), newer);
        let feed = Feed::builder()
            .attributes(vec![Attribute::new(
                crate::sort::SORT_XMLNS_ATTR,
                crate::sort::SORT_XMLNS,
            )])
            .extensions(vec![Extension::new(
                "sort:desc",
                vec![Attribute::new("type", "updated")],
                None,
            )])
            .entries(entries)
            .build()
            .unwrap();
        let xml = to_string(&feed);
        let new_pos = xml.find("urn:new").unwrap();
        let old_pos = xml.find("urn:old").unwrap();
        assert!(new_pos < old_pos, "descending sort must emit newer first");
        assert_eq!(xml.matches("<sort:desc").count(), 1);
    }

    #[test]
    fn custom_config_controls_the_declaration() {
        let mut buf = Vec::new();
        write_feed(
            &minimal_feed(),
            &mut buf,
            &WriteConfig::new("ISO-8859-1", "1.1"),
        )
        .unwrap();
        let xml = String::from_utf8(buf).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.1\" encoding=\"ISO-8859-1\"?>"));
    }
}
