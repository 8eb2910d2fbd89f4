//! The Atom 1.0 value model.
//!
//! One module per element family, mirroring the element vocabulary of
//! RFC 4287. Every type is an immutable value object: a validating
//! constructor (or builder) runs the attribute classification and the
//! text/date construct rules, and accessors only borrow. "Updating" a feed
//! or entry means rebuilding it through [`Feed::to_builder`] /
//! [`Entry::to_builder`].

pub mod attribute;
pub mod category;
pub mod content;
pub mod date;
pub mod entry;
pub mod extension;
pub mod feed;
pub mod generator;
pub mod icon;
pub mod id;
pub mod link;
pub mod logo;
pub mod person;
pub mod source;
pub mod text;

pub use attribute::{Attribute, AttributeClass, ElementKind, classify, is_common};
pub use category::Category;
pub use content::Content;
pub use date::{Published, Updated};
pub use entry::{Entry, EntryBuilder};
pub use extension::Extension;
pub use feed::{EntryIter, EntryMap, Feed, FeedBuilder};
pub use generator::Generator;
pub use icon::Icon;
pub use id::Id;
pub use link::Link;
pub use logo::Logo;
pub use person::{Author, Contributor};
pub use source::{Source, SourceBuilder};
pub use text::{ContentType, Rights, Subtitle, Summary, Title};

/// The Atom 1.0 XML namespace.
pub const ATOM_XMLNS: &str = "http://www.w3.org/2005/Atom";

/// The default document language emitted when the caller supplies none.
pub const DEFAULT_XML_LANG: &str = "en-US";
