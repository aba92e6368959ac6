//! Office Open XML (OOXML) authoring.
//!
//! # Architecture
//!
//! 1. **Tree layer** (`tree`): the element tree the authoring API edits,
//!    as a trait plus an in-memory implementation that reads and writes
//!    markup
//! 2. **Shared error type** (`error`)
//! 3. **WordprocessingML** (`docx`): tables, rows and cells
pub mod docx;
pub mod error;
pub mod tree;

// Re-export error types
pub use error::{OoxmlError, Result};
