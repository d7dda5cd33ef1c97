//! The drawing's exchange format: a standalone SVG document with one element
//! per shape. Used for persistence and for vector export.

mod parser;
mod writer;

pub use parser::{ParsedDocument, SvgParseError, parse_document};
pub use writer::{SVG_NAMESPACE, write_document};
