//! Tables for Word documents.
//!
//! A [`Table`] owns its [`TableRow`]s, each row owns its [`TableCell`]s.
//! Rows and cells only hold handles ([`NodeId`](crate::ooxml::tree::NodeId))
//! back to the elements that own them; every operation takes the document
//! tree explicitly.
//!
//! The interesting part is the grid bookkeeping:
//!
//! - the table has a fixed number of grid columns (`w:tblGrid`);
//! - [`TableRow::merge_right`] folds cells into their left neighbour,
//!   summing widths and growing `w:gridSpan`;
//! - [`Table::merge_down`] chains cells of one grid column across rows with
//!   `w:vMerge`.
//!
//! Invalid merges are rejected before anything is modified.

mod cell;
pub mod config;
pub mod format;
mod grid;
mod row;

#[cfg(test)]
mod tests;

pub use cell::TableCell;
pub use config::TableLayout;
pub use format::{
    BorderEdge, HeightRule, Shading, ShadingPattern, TableBorder, TableBorderStyle, VMergeState,
    VerticalAlignment,
};
pub use grid::Table;
pub use row::TableRow;
