//! XML text utilities shared by the reader and writer.

pub mod escape;

pub use escape::{escape_xml, unescape_xml};
