//! Document-level entry points.
//!
//! Thin conversion glue around the streaming reader and writer: parse a
//! feed or entry document from a string, byte slice or reader, and
//! serialize a graph to a string or any [`Write`] sink. Byte and stream
//! forms decode to UTF-8 first; the XML declaration's own encoding label is
//! carried through on output via [`WriteConfig`].

use std::io::{Read, Write};

use crate::atom::{Entry, Feed};
use crate::common::{Error, Result};
use crate::writer::WriteConfig;
use crate::{reader, writer};

/// Parse a feed document from a string.
///
/// # Examples
///
/// ```
/// let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom">
///   <id>http://example.org/feed</id>
///   <title>Example</title>
/// </feed>"#;
/// let feed = atomdoc::read_feed(xml).unwrap();
/// assert_eq!(feed.title().unwrap().text(), Some("Example"));
/// ```
pub fn read_feed(xml: &str) -> Result<Feed> {
    reader::parse_feed(xml)
}

/// Parse a feed document from raw bytes.
pub fn read_feed_from_slice(bytes: &[u8]) -> Result<Feed> {
    reader::parse_feed(decode(bytes)?)
}

/// Parse a feed document from a reader. The whole document is buffered;
/// the stream is consumed for exactly one document.
pub fn read_feed_from<R: Read>(mut input: R) -> Result<Feed> {
    let mut xml = String::new();
    input.read_to_string(&mut xml)?;
    reader::parse_feed(&xml)
}

/// Parse a standalone entry document from a string.
///
/// The document must yield exactly one entry.
pub fn read_entry(xml: &str) -> Result<Entry> {
    reader::parse_entry_document(xml)
}

/// Parse a standalone entry document from raw bytes.
pub fn read_entry_from_slice(bytes: &[u8]) -> Result<Entry> {
    reader::parse_entry_document(decode(bytes)?)
}

/// Parse a standalone entry document from a reader.
pub fn read_entry_from<R: Read>(mut input: R) -> Result<Entry> {
    let mut xml = String::new();
    input.read_to_string(&mut xml)?;
    reader::parse_entry_document(&xml)
}

/// Serialize a feed document to a writer, flushing before return.
pub fn write_feed<W: Write>(feed: &Feed, out: W, config: &WriteConfig) -> Result<()> {
    writer::write_feed(feed, out, config)
}

/// Serialize a feed document to a string.
pub fn write_feed_to_string(feed: &Feed, config: &WriteConfig) -> Result<String> {
    let mut buf = Vec::new();
    writer::write_feed(feed, &mut buf, config)?;
    encode(buf)
}

/// Serialize a standalone entry document to a writer, flushing before
/// return.
pub fn write_entry<W: Write>(entry: &Entry, out: W, config: &WriteConfig) -> Result<()> {
    writer::write_entry(entry, out, config)
}

/// Serialize a standalone entry document to a string.
pub fn write_entry_to_string(entry: &Entry, config: &WriteConfig) -> Result<String> {
    let mut buf = Vec::new();
    writer::write_entry(entry, &mut buf, config)?;
    encode(buf)
}

fn decode(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes)
        .map_err(|e| Error::Xml(format!("invalid UTF-8 in document: {e}")))
}

fn encode(buf: Vec<u8>) -> Result<String> {
    String::from_utf8(buf).map_err(|e| Error::Xml(format!("invalid UTF-8 in output: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::{Attribute, Content, ContentType, Entry, EntryMap, Feed, Id, Summary, Title, Updated};
    use std::io::{Seek, SeekFrom};

    fn sample_feed() -> Feed {
        let entry = Entry::builder()
            .id(Id::new(Vec::new(), "urn:entry:1").unwrap())
            .title(Title::new(Some("Hello & Welcome".to_string()), Vec::new()).unwrap())
            .updated(Updated::from_text("2026-03-04T05:06:07.89Z", Vec::new()).unwrap())
            .summary(Summary::new(Some("greeting".to_string()), Vec::new()).unwrap())
            .content(
                Content::new(
                    Some("<div xmlns=\"http://www.w3.org/1999/xhtml\">hi <i>there</i></div>"
                        .to_string()),
                    vec![Attribute::new("type", "xhtml")],
                )
                .unwrap(),
            )
            .build()
            .unwrap();
        let mut entries = EntryMap::new();
        entries.insert(entry.updated().unwrap().text(), entry);
        Feed::builder()
            .id(Id::new(Vec::new(), "urn:feed:1").unwrap())
            .title(Title::new(Some("Round Trip".to_string()), Vec::new()).unwrap())
            .updated(Updated::from_text("2026-03-04T05:06:07.89Z", Vec::new()).unwrap())
            .entries(entries)
            .build()
            .unwrap()
    }

    #[test]
    fn feed_round_trip_preserves_fields() {
        let feed = sample_feed();
        let xml = write_feed_to_string(&feed, &WriteConfig::default()).unwrap();
        let reread = read_feed(&xml).unwrap();

        assert_eq!(reread.id(), feed.id());
        assert_eq!(reread.title(), feed.title());
        assert_eq!(reread.updated(), feed.updated());
        assert_eq!(reread.entries().len(), 1);

        let (key, entry) = reread.entries().iter().next().unwrap();
        let (orig_key, orig) = feed.entries().iter().next().unwrap();
        assert_eq!(key, orig_key);
        assert_eq!(entry.title(), orig.title());
        assert_eq!(entry.summary(), orig.summary());
        assert_eq!(entry.content(), orig.content());
        assert_eq!(entry.content().unwrap().content_type(), ContentType::Xhtml);

        // The generator is normalized to this library's identity...
        let generator = reread.generator().unwrap();
        assert_eq!(generator.text(), crate::writer::GENERATOR_NAME);
        assert_eq!(generator.version(), Some(env!("CARGO_PKG_VERSION")));
        // ...and the injected defaults appear only on the reread copy.
        assert!(feed.attribute("xmlns").is_none());
        assert_eq!(
            reread.attribute("xmlns").unwrap().value(),
            crate::atom::ATOM_XMLNS
        );
        assert_eq!(reread.attribute("xml:lang").unwrap().value(), "en-US");
    }

    #[test]
    fn entry_round_trip_via_bytes() {
        let feed = sample_feed();
        let (_, entry) = feed.entries().iter().next().unwrap();
        let xml = write_entry_to_string(entry, &WriteConfig::default()).unwrap();
        let reread = read_entry_from_slice(xml.as_bytes()).unwrap();
        assert_eq!(reread.id(), entry.id());
        assert_eq!(reread.title(), entry.title());
    }

    #[test]
    fn file_round_trip() {
        let feed = sample_feed();
        let mut file = tempfile::tempfile().unwrap();
        write_feed(&feed, &mut file, &WriteConfig::default()).unwrap();
        file.seek(SeekFrom::Start(0)).unwrap();
        let reread = read_feed_from(&mut file).unwrap();
        assert_eq!(reread.id(), feed.id());
        assert_eq!(reread.entries().len(), feed.entries().len());
    }

    #[test]
    fn invalid_bytes_are_a_transport_error() {
        let err = read_feed_from_slice(&[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, Error::Xml(_)));
    }
}
