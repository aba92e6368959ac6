//! Word (.docx) content authoring.
//!
//! Only tables are modelled here; cells get just enough paragraph support
//! to hold text.
pub(crate) mod paragraph;
pub mod table;

pub use table::{Table, TableCell, TableLayout, TableRow};
