//! XML text helpers shared by the tree reader and writer.

mod escape;

pub use escape::{escape_xml, resolve_entity, unescape_xml};
