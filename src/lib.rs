//! Atomdoc - a Rust library for the Atom Syndication Format (RFC 4287)
//!
//! This library models Atom 1.0 documents as an immutable, spec-validated
//! object graph and converts between that graph and XML with a streaming
//! reader and writer.
//!
//! # Features
//!
//! - **Value model**: every Atom element as an immutable value type with a
//!   validating constructor (feed, entry, source, text/date/person
//!   constructs, category, generator, link and friends)
//! - **Streaming reader**: builds the graph from an XML event stream,
//!   preserving unknown elements and attributes as extensions
//! - **Writer**: re-serializes the graph, injecting the Atom namespace, a
//!   default language and this library's generator identity
//! - **Sort extension**: an opt-in, namespaced protocol for declaring and
//!   applying a stable ordering of a feed's entries
//!
//! # Example - Reading a feed
//!
//! ```
//! let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom">
//!   <id>http://example.org/feed</id>
//!   <title>Example Feed</title>
//!   <updated>2026-01-02T03:04:05Z</updated>
//!   <entry>
//!     <id>http://example.org/2026/01/01</id>
//!     <title>First post</title>
//!     <updated>2026-01-01T00:00:00Z</updated>
//!   </entry>
//! </feed>"#;
//!
//! let feed = atomdoc::read_feed(xml)?;
//! assert_eq!(feed.title().unwrap().text(), Some("Example Feed"));
//! assert_eq!(feed.entries().len(), 1);
//! # Ok::<(), atomdoc::Error>(())
//! ```
//!
//! # Example - Building and writing a feed
//!
//! ```
//! use atomdoc::WriteConfig;
//! use atomdoc::atom::{Feed, Id, Title};
//!
//! let feed = Feed::builder()
//!     .id(Id::new(Vec::new(), "urn:uuid:60a76c80-d399-11d9-b93C-0003939e0af6")?)
//!     .title(Title::new(Some("My Feed".to_string()), Vec::new())?)
//!     .build()?;
//!
//! let xml = atomdoc::write_feed_to_string(&feed, &WriteConfig::default())?;
//! assert!(xml.contains("xmlns=\"http://www.w3.org/2005/Atom\""));
//! # Ok::<(), atomdoc::Error>(())
//! ```
//!
//! # Example - Sorting entries
//!
//! ```no_run
//! use atomdoc::sort::{SortKey, SortOrder, sort_entries};
//!
//! # fn main() -> atomdoc::Result<()> {
//! # let feed = atomdoc::atom::Feed::builder().build()?;
//! // Newest entries first, keyed by the updated text.
//! let sorted = sort_entries(&feed, SortOrder::Descending, SortKey::Updated)?;
//! # Ok(())
//! # }
//! ```

/// The Atom 1.0 value model: one immutable type per element family.
pub mod atom;

/// Shared error and XML text utilities.
pub mod common;

/// Document-level parse and serialize entry points.
pub mod doc;

/// The entry-sort extension protocol.
pub mod sort;

mod reader;
mod writer;

// Re-export the document API and the common result types for convenience.
pub use common::{Error, Result};
pub use doc::{
    read_entry, read_entry_from, read_entry_from_slice, read_feed, read_feed_from,
    read_feed_from_slice, write_entry, write_entry_to_string, write_feed, write_feed_to_string,
};
pub use writer::{GENERATOR_NAME, GENERATOR_URI, WriteConfig, library_generator};
