//! Streaming reader: an ordered XML event stream in, an Atom object graph
//! out.
//!
//! One document per call, rooted at `feed` or `entry`. Elements are read by
//! recursive descent: attributes are collected on the start event, child
//! text and elements accumulate, and the validated value object is built
//! when the element closes and attached to its parent's slot. Start
//! elements outside the Atom vocabulary become [`Extension`] values with
//! their attributes and flattened descendant text.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::atom::{
    Attribute, Author, Category, Content, ContentType, Contributor, Entry, EntryMap, Extension,
    Feed, Generator, Icon, Id, Link, Logo, Published, Rights, Source, Subtitle, Summary, Title,
    Updated, text::content_type_of,
};
use crate::common::xml::unescape_xml;
use crate::common::{Error, Result};

type XmlReader<'a> = Reader<&'a [u8]>;

/// Parse a feed document.
pub(crate) fn parse_feed(xml: &str) -> Result<Feed> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                return if e.local_name().as_ref() == b"feed" {
                    read_feed_element(&mut reader, &e, false)
                } else {
                    Err(unexpected_root("feed", &e))
                };
            }
            Ok(Event::Empty(e)) => {
                return if e.local_name().as_ref() == b"feed" {
                    read_feed_element(&mut reader, &e, true)
                } else {
                    Err(unexpected_root("feed", &e))
                };
            }
            Ok(Event::Eof) => {
                return Err(Error::Spec(
                    "document contains no atom:feed element".to_string(),
                ));
            }
            Ok(_) => {}
            Err(err) => return Err(xml_error(&reader, err)),
        }
    }
}

/// Parse a standalone entry document.
///
/// The document must yield exactly one entry; zero or more than one is a
/// specification error.
pub(crate) fn parse_entry_document(xml: &str) -> Result<Entry> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut entries: Vec<Entry> = Vec::new();
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"entry" => {
                entries.push(read_entry_element(&mut reader, &e, false)?);
            }
            Ok(Event::Empty(e)) if e.local_name().as_ref() == b"entry" => {
                entries.push(read_entry_element(&mut reader, &e, true)?);
            }
            Ok(Event::Eof) => break,
            // Descend through any other markup looking for entry elements.
            Ok(_) => {}
            Err(err) => return Err(xml_error(&reader, err)),
        }
    }
    if entries.len() == 1 {
        return Ok(entries.remove(0));
    }
    Err(Error::Spec(format!(
        "invalid number of entries ({}) for this entry document",
        entries.len()
    )))
}

fn unexpected_root(expected: &str, e: &BytesStart) -> Error {
    Error::Spec(format!(
        "expected an atom:{expected} document root, found \"{}\"",
        String::from_utf8_lossy(e.name().as_ref())
    ))
}

fn xml_error(reader: &XmlReader<'_>, err: quick_xml::Error) -> Error {
    Error::Xml(format!(
        "XML parsing error at position {}: {err}",
        reader.buffer_position()
    ))
}

fn utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| Error::Xml(format!("invalid UTF-8 in document: {e}")))
}

/// Collect the attributes of a start element in document order.
fn collect_attributes(start: &BytesStart) -> Result<Vec<Attribute>> {
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| Error::Xml(format!("malformed attribute: {e}")))?;
        let name = utf8(attr.key.as_ref())?.to_string();
        let value = attr.unescape_value()?.into_owned();
        attributes.push(Attribute::new(name, value));
    }
    Ok(attributes)
}

/// Concatenated, unescaped text of the current element, descending through
/// any nested markup. Consumes events through the element's end tag.
fn read_flattened_text(reader: &mut XmlReader<'_>) -> Result<String> {
    let mut depth = 0usize;
    let mut text = String::new();
    loop {
        match reader.read_event() {
            Ok(Event::Text(t)) => text.push_str(&unescape_xml(utf8(t.as_ref())?)),
            Ok(Event::CData(t)) => text.push_str(utf8(t.as_ref())?),
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            }
            Ok(Event::Eof) => {
                return Err(Error::Xml(
                    "unexpected end of document inside an element".to_string(),
                ));
            }
            Ok(_) => {}
            Err(err) => return Err(xml_error(reader, err)),
        }
    }
    Ok(text)
}

/// Attributes plus flattened text of a leaf element (id, icon, logo,
/// generator, the date constructs, person children).
fn read_simple(reader: &mut XmlReader<'_>, e: &BytesStart, empty: bool) -> Result<(Vec<Attribute>, String)> {
    let attributes = collect_attributes(e)?;
    let text = if empty {
        String::new()
    } else {
        read_flattened_text(reader)?
    };
    Ok((attributes, text))
}

/// Attributes plus payload of a text construct. XHTML payloads keep their
/// raw child markup so the wrapper split can reproduce the input exactly.
fn read_text_construct(
    reader: &mut XmlReader<'_>,
    e: &BytesStart,
    empty: bool,
) -> Result<(Vec<Attribute>, Option<String>)> {
    let attributes = collect_attributes(e)?;
    if empty {
        return Ok((attributes, None));
    }
    let text = if content_type_of(&attributes) == ContentType::Xhtml {
        reader.read_text(e.name())?.trim().to_string()
    } else {
        read_flattened_text(reader)?
    };
    Ok((attributes, Some(text)))
}

/// Read an unrecognized element as an extension: attributes plus flattened
/// descendant text. Child element structure is not modeled.
fn read_extension(reader: &mut XmlReader<'_>, e: &BytesStart, empty: bool) -> Result<Extension> {
    let element_name = utf8(e.name().as_ref())?.to_string();
    let attributes = collect_attributes(e)?;
    let content = if empty {
        None
    } else {
        let text = read_flattened_text(reader)?;
        (!text.is_empty()).then_some(text)
    };
    Ok(Extension::new(element_name, attributes, content))
}

/// Read a person construct (author or contributor) and hand its parts to
/// `build`.
fn read_person<T>(
    reader: &mut XmlReader<'_>,
    e: &BytesStart,
    empty: bool,
    build: impl FnOnce(String, Option<String>, Option<String>, Vec<Attribute>, Vec<Extension>) -> Result<T>,
) -> Result<T> {
    let attributes = collect_attributes(e)?;
    let mut name = None;
    let mut uri = None;
    let mut email = None;
    let mut extensions = Vec::new();
    if !empty {
        loop {
            match reader.read_event() {
                Ok(Event::Start(child)) => match child.local_name().as_ref() {
                    b"name" => name = Some(read_flattened_text(reader)?),
                    b"uri" => uri = Some(read_flattened_text(reader)?),
                    b"email" => email = Some(read_flattened_text(reader)?),
                    _ => extensions.push(read_extension(reader, &child, false)?),
                },
                Ok(Event::Empty(child)) => match child.local_name().as_ref() {
                    b"name" => name = Some(String::new()),
                    b"uri" => uri = Some(String::new()),
                    b"email" => email = Some(String::new()),
                    _ => extensions.push(read_extension(reader, &child, true)?),
                },
                Ok(Event::End(_)) => break,
                Ok(Event::Text(_)) | Ok(Event::CData(_)) => {}
                Ok(Event::Eof) => {
                    return Err(Error::Xml(
                        "unexpected end of document inside a person construct".to_string(),
                    ));
                }
                Ok(_) => {}
                Err(err) => return Err(xml_error(reader, err)),
            }
        }
    }
    build(
        name.unwrap_or_default(),
        uri,
        email,
        attributes,
        extensions,
    )
}

/// Accumulator shared by feed and source reading; `entries` stays empty for
/// sources.
#[derive(Default)]
struct FeedAcc {
    id: Option<Id>,
    title: Option<Title>,
    updated: Option<Updated>,
    rights: Option<Rights>,
    authors: Vec<Author>,
    categories: Vec<Category>,
    contributors: Vec<Contributor>,
    links: Vec<Link>,
    extensions: Vec<Extension>,
    generator: Option<Generator>,
    subtitle: Option<Subtitle>,
    icon: Option<Icon>,
    logo: Option<Logo>,
    entries: Vec<Entry>,
}

fn read_feed_like_child(
    reader: &mut XmlReader<'_>,
    e: &BytesStart,
    empty: bool,
    acc: &mut FeedAcc,
    allow_entries: bool,
) -> Result<()> {
    match e.local_name().as_ref() {
        b"id" => {
            let (attrs, text) = read_simple(reader, e, empty)?;
            acc.id = Some(Id::new(attrs, text)?);
        }
        b"title" => {
            let (attrs, text) = read_text_construct(reader, e, empty)?;
            acc.title = Some(Title::new(text, attrs)?);
        }
        b"updated" => {
            let (attrs, text) = read_simple(reader, e, empty)?;
            acc.updated = Some(Updated::from_text(&text, attrs)?);
        }
        b"rights" => {
            let (attrs, text) = read_text_construct(reader, e, empty)?;
            acc.rights = Some(Rights::new(text, attrs)?);
        }
        b"subtitle" => {
            let (attrs, text) = read_text_construct(reader, e, empty)?;
            acc.subtitle = Some(Subtitle::new(text, attrs)?);
        }
        b"generator" => {
            let (attrs, text) = read_simple(reader, e, empty)?;
            acc.generator = Some(Generator::new(attrs, text)?);
        }
        b"icon" => {
            let (attrs, text) = read_simple(reader, e, empty)?;
            acc.icon = Some(Icon::new(attrs, text)?);
        }
        b"logo" => {
            let (attrs, text) = read_simple(reader, e, empty)?;
            acc.logo = Some(Logo::new(attrs, text)?);
        }
        b"author" => acc.authors.push(read_person(reader, e, empty, |n, u, m, a, x| {
            Author::new(n, u, m, a, x)
        })?),
        b"contributor" => acc
            .contributors
            .push(read_person(reader, e, empty, |n, u, m, a, x| {
                Contributor::new(n, u, m, a, x)
            })?),
        b"category" => {
            let (attrs, text) = read_simple(reader, e, empty)?;
            acc.categories
                .push(Category::new(attrs, (!text.is_empty()).then_some(text))?);
        }
        b"link" => {
            let (attrs, text) = read_simple(reader, e, empty)?;
            acc.links
                .push(Link::new(attrs, (!text.is_empty()).then_some(text))?);
        }
        b"entry" if allow_entries => acc.entries.push(read_entry_element(reader, e, empty)?),
        _ => acc.extensions.push(read_extension(reader, e, empty)?),
    }
    Ok(())
}

fn read_feed_element(reader: &mut XmlReader<'_>, start: &BytesStart, empty: bool) -> Result<Feed> {
    let attributes = collect_attributes(start)?;
    let mut acc = FeedAcc::default();
    if !empty {
        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => read_feed_like_child(reader, &e, false, &mut acc, true)?,
                Ok(Event::Empty(e)) => read_feed_like_child(reader, &e, true, &mut acc, true)?,
                Ok(Event::End(_)) => break,
                Ok(Event::Text(_)) | Ok(Event::CData(_)) => {}
                Ok(Event::Eof) => {
                    return Err(Error::Xml(
                        "unexpected end of document inside atom:feed".to_string(),
                    ));
                }
                Ok(_) => {}
                Err(err) => return Err(xml_error(reader, err)),
            }
        }
    }

    // The updated text keys the entry map, so its presence is load-bearing
    // here even though the entry itself treats it as optional.
    let mut entries = EntryMap::new();
    for entry in acc.entries {
        let key = entry
            .updated()
            .ok_or_else(|| {
                Error::Spec(
                    "atom:entry elements MUST contain exactly one atom:updated element".to_string(),
                )
            })?
            .text();
        entries.insert(key, entry);
    }

    let mut builder = Feed::builder()
        .authors(acc.authors)
        .categories(acc.categories)
        .contributors(acc.contributors)
        .links(acc.links)
        .attributes(attributes)
        .extensions(acc.extensions)
        .entries(entries);
    if let Some(id) = acc.id {
        builder = builder.id(id);
    }
    if let Some(title) = acc.title {
        builder = builder.title(title);
    }
    if let Some(updated) = acc.updated {
        builder = builder.updated(updated);
    }
    if let Some(rights) = acc.rights {
        builder = builder.rights(rights);
    }
    if let Some(generator) = acc.generator {
        builder = builder.generator(generator);
    }
    if let Some(subtitle) = acc.subtitle {
        builder = builder.subtitle(subtitle);
    }
    if let Some(icon) = acc.icon {
        builder = builder.icon(icon);
    }
    if let Some(logo) = acc.logo {
        builder = builder.logo(logo);
    }
    builder.build()
}

fn read_source_element(reader: &mut XmlReader<'_>, start: &BytesStart, empty: bool) -> Result<Source> {
    let attributes = collect_attributes(start)?;
    let mut acc = FeedAcc::default();
    if !empty {
        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => read_feed_like_child(reader, &e, false, &mut acc, false)?,
                Ok(Event::Empty(e)) => read_feed_like_child(reader, &e, true, &mut acc, false)?,
                Ok(Event::End(_)) => break,
                Ok(Event::Text(_)) | Ok(Event::CData(_)) => {}
                Ok(Event::Eof) => {
                    return Err(Error::Xml(
                        "unexpected end of document inside atom:source".to_string(),
                    ));
                }
                Ok(_) => {}
                Err(err) => return Err(xml_error(reader, err)),
            }
        }
    }

    let mut builder = Source::builder()
        .authors(acc.authors)
        .categories(acc.categories)
        .contributors(acc.contributors)
        .links(acc.links)
        .attributes(attributes)
        .extensions(acc.extensions);
    if let Some(id) = acc.id {
        builder = builder.id(id);
    }
    if let Some(title) = acc.title {
        builder = builder.title(title);
    }
    if let Some(updated) = acc.updated {
        builder = builder.updated(updated);
    }
    if let Some(rights) = acc.rights {
        builder = builder.rights(rights);
    }
    if let Some(generator) = acc.generator {
        builder = builder.generator(generator);
    }
    if let Some(subtitle) = acc.subtitle {
        builder = builder.subtitle(subtitle);
    }
    if let Some(icon) = acc.icon {
        builder = builder.icon(icon);
    }
    if let Some(logo) = acc.logo {
        builder = builder.logo(logo);
    }
    builder.build()
}

fn read_entry_element(reader: &mut XmlReader<'_>, start: &BytesStart, empty: bool) -> Result<Entry> {
    let attributes = collect_attributes(start)?;
    let mut id = None;
    let mut title = None;
    let mut updated = None;
    let mut rights = None;
    let mut content = None;
    let mut authors = Vec::new();
    let mut categories = Vec::new();
    let mut contributors = Vec::new();
    let mut links = Vec::new();
    let mut extensions = Vec::new();
    let mut published = None;
    let mut summary = None;
    let mut source = None;

    if !empty {
        loop {
            let (e, child_empty) = match reader.read_event() {
                Ok(Event::Start(e)) => (e, false),
                Ok(Event::Empty(e)) => (e, true),
                Ok(Event::End(_)) => break,
                Ok(Event::Text(_)) | Ok(Event::CData(_)) => continue,
                Ok(Event::Eof) => {
                    return Err(Error::Xml(
                        "unexpected end of document inside atom:entry".to_string(),
                    ));
                }
                Ok(_) => continue,
                Err(err) => return Err(xml_error(reader, err)),
            };
            match e.local_name().as_ref() {
                b"id" => {
                    let (attrs, text) = read_simple(reader, &e, child_empty)?;
                    id = Some(Id::new(attrs, text)?);
                }
                b"title" => {
                    let (attrs, text) = read_text_construct(reader, &e, child_empty)?;
                    title = Some(Title::new(text, attrs)?);
                }
                b"updated" => {
                    let (attrs, text) = read_simple(reader, &e, child_empty)?;
                    updated = Some(Updated::from_text(&text, attrs)?);
                }
                b"published" => {
                    let (attrs, text) = read_simple(reader, &e, child_empty)?;
                    published = Some(Published::from_text(&text, attrs)?);
                }
                b"rights" => {
                    let (attrs, text) = read_text_construct(reader, &e, child_empty)?;
                    rights = Some(Rights::new(text, attrs)?);
                }
                b"summary" => {
                    let (attrs, text) = read_text_construct(reader, &e, child_empty)?;
                    summary = Some(Summary::new(text, attrs)?);
                }
                b"content" => {
                    let (attrs, text) = read_text_construct(reader, &e, child_empty)?;
                    content = Some(Content::new(text, attrs)?);
                }
                b"author" => authors.push(read_person(reader, &e, child_empty, |n, u, m, a, x| {
                    Author::new(n, u, m, a, x)
                })?),
                b"contributor" => {
                    contributors.push(read_person(reader, &e, child_empty, |n, u, m, a, x| {
                        Contributor::new(n, u, m, a, x)
                    })?)
                }
                b"category" => {
                    let (attrs, text) = read_simple(reader, &e, child_empty)?;
                    categories.push(Category::new(attrs, (!text.is_empty()).then_some(text))?);
                }
                b"link" => {
                    let (attrs, text) = read_simple(reader, &e, child_empty)?;
                    links.push(Link::new(attrs, (!text.is_empty()).then_some(text))?);
                }
                b"source" => source = Some(read_source_element(reader, &e, child_empty)?),
                _ => extensions.push(read_extension(reader, &e, child_empty)?),
            }
        }
    }

    let mut builder = Entry::builder()
        .authors(authors)
        .categories(categories)
        .contributors(contributors)
        .links(links)
        .attributes(attributes)
        .extensions(extensions);
    if let Some(id) = id {
        builder = builder.id(id);
    }
    if let Some(title) = title {
        builder = builder.title(title);
    }
    if let Some(updated) = updated {
        builder = builder.updated(updated);
    }
    if let Some(rights) = rights {
        builder = builder.rights(rights);
    }
    if let Some(content) = content {
        builder = builder.content(content);
    }
    if let Some(published) = published {
        builder = builder.published(published);
    }
    if let Some(summary) = summary {
        builder = builder.summary(summary);
    }
    if let Some(source) = source {
        builder = builder.source(source);
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom" xml:lang="en-US">
  <id>http://example.org/feed</id>
  <title type="xhtml"><div xmlns="http://www.w3.org/1999/xhtml">A <b>bold</b> feed</div></title>
  <updated>2026-01-02T03:04:05.67Z</updated>
  <author><name>Bill Brown</name><uri>http://example.org/~bill</uri></author>
  <link href="http://example.org/" rel="alternate"/>
  <category term="rust" scheme="http://example.org/tags"/>
  <generator uri="http://example.org/gen" version="9">Example Gen</generator>
  <myns:custom xmlns:myns="http://example.org/myns" weight="3">opaque</myns:custom>
  <entry>
    <id>http://example.org/1</id>
    <title>First &amp; Only</title>
    <updated>2026-01-01T00:00:00Z</updated>
    <summary>short</summary>
    <content type="html">&lt;p&gt;hi&lt;/p&gt;</content>
    <source>
      <id>http://example.org/origin</id>
      <title>Origin</title>
    </source>
  </entry>
</feed>"#;

    #[test]
    fn parses_a_complete_feed() {
        let feed = parse_feed(FEED).unwrap();
        assert_eq!(feed.id().unwrap().uri(), "http://example.org/feed");
        assert_eq!(feed.title().unwrap().text(), Some("A <b>bold</b> feed"));
        assert_eq!(
            feed.title().unwrap().content_type(),
            crate::atom::ContentType::Xhtml
        );
        assert_eq!(feed.authors().len(), 1);
        assert_eq!(feed.authors()[0].uri(), Some("http://example.org/~bill"));
        assert_eq!(feed.link("http://example.org/").unwrap().rel(), Some("alternate"));
        assert_eq!(feed.category("rust").unwrap().scheme(), Some("http://example.org/tags"));
        assert_eq!(feed.generator().unwrap().text(), "Example Gen");
        assert_eq!(feed.attribute("xml:lang").unwrap().value(), "en-US");
        assert_eq!(feed.entries().len(), 1);
    }

    #[test]
    fn unknown_elements_become_extensions() {
        let feed = parse_feed(FEED).unwrap();
        let ext = feed.extension("myns:custom").unwrap();
        assert_eq!(ext.attribute("weight").unwrap().value(), "3");
        assert_eq!(ext.content(), Some("opaque"));
    }

    #[test]
    fn entries_are_keyed_by_updated_text() {
        let feed = parse_feed(FEED).unwrap();
        let (key, entry) = feed.entries().iter().next().unwrap();
        assert_eq!(key, entry.updated().unwrap().text());
        assert_eq!(entry.title().text(), Some("First & Only"));
        assert_eq!(entry.source().unwrap().title().unwrap().text(), Some("Origin"));
    }

    #[test]
    fn entry_without_updated_fails_at_feed_close() {
        let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom">
<entry><id>urn:1</id><title>t</title></entry></feed>"#;
        let err = parse_feed(xml).unwrap_err();
        assert!(err.to_string().contains("atom:updated"));
    }

    #[test]
    fn non_feed_root_is_rejected() {
        let err = parse_feed("<rss version=\"2.0\"/>").unwrap_err();
        assert!(err.to_string().contains("atom:feed"));
    }

    #[test]
    fn malformed_xml_is_a_transport_error() {
        let err = parse_feed("<feed><title>oops</feed>").unwrap_err();
        assert!(matches!(err, Error::Xml(_)));
    }

    #[test]
    fn standalone_entry_document_round() {
        let xml = r#"<entry xmlns="http://www.w3.org/2005/Atom">
<id>urn:1</id><title>t</title><updated>2026-01-01T00:00:00Z</updated></entry>"#;
        let entry = parse_entry_document(xml).unwrap();
        assert_eq!(entry.id().uri(), "urn:1");
    }

    #[test]
    fn entry_document_with_zero_entries_is_an_error() {
        let err = parse_entry_document("<notatom/>").unwrap_err();
        assert!(err.to_string().contains("number of entries"));
    }

    #[test]
    fn entry_document_with_two_entries_is_an_error() {
        let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom">
<entry><id>urn:1</id><title>a</title><updated>2026-01-01T00:00:00Z</updated></entry>
<entry><id>urn:2</id><title>b</title><updated>2026-01-02T00:00:00Z</updated></entry>
</feed>"#;
        let err = parse_entry_document(xml).unwrap_err();
        assert!(err.to_string().contains("number of entries"));
    }

    #[test]
    fn duplicate_updated_keys_collide_last_wins() {
        let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom">
<entry><id>urn:1</id><title>a</title><updated>2026-01-01T00:00:00Z</updated></entry>
<entry><id>urn:2</id><title>b</title><updated>2026-01-01T00:00:00Z</updated></entry>
</feed>"#;
        let feed = parse_feed(xml).unwrap();
        assert_eq!(feed.entries().len(), 1);
        let (_, entry) = feed.entries().iter().next().unwrap();
        assert_eq!(entry.id().uri(), "urn:2");
    }

    #[test]
    fn text_construct_with_rejected_attribute_fails() {
        let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom">
<title href="http://x/">t</title></feed>"#;
        let err = parse_feed(xml).unwrap_err();
        assert!(matches!(err, Error::Spec(_)));
        assert!(err.to_string().contains("href"));
    }
}
