//! docx-fluent - fluent table authoring for WordprocessingML documents
//!
//! This library builds and edits Word tables (`w:tbl`) on top of a document
//! object tree. The tree is abstracted behind
//! [`DocumentTree`](ooxml::tree::DocumentTree); an arena-backed
//! [`MemoryTree`](ooxml::tree::MemoryTree) is provided that also reads and
//! writes the markup.
//!
//! # Features
//!
//! - **Table grid**: fixed grid columns with per-column widths in twips
//! - **Horizontal merges**: cells absorb their right neighbours, widths are
//!   summed and `w:gridSpan` grows
//! - **Vertical merges**: `w:vMerge` chains across rows, aligned on grid columns
//! - **Formatting**: borders, shading, vertical alignment, row height and
//!   header rows
//! - **Existing content**: open tables parsed from `document.xml`
//!
//! # Example - Building a table
//!
//! ```
//! use docx_fluent::common::TableWidth;
//! use docx_fluent::ooxml::docx::table::{Shading, Table, TableBorder};
//! use docx_fluent::ooxml::tree::MemoryTree;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut tree = MemoryTree::new();
//! let body = tree.body().unwrap();
//!
//! let widths = [TableWidth::dxa(2000), TableWidth::dxa(2000), TableWidth::dxa(3000)];
//! let mut table = Table::insert(&mut tree, body, &widths)?;
//! table.set_borders(&mut tree, &TableBorder::default())?;
//! table.add_rows(&mut tree, 3)?;
//!
//! table
//!     .row_mut(0)
//!     .unwrap()
//!     .set_header(&mut tree, true)?
//!     .set_shading(&mut tree, &Shading::fill("D9D9D9"))?;
//! table.cell_mut(0, 0).unwrap().set_text(&mut tree, "Name")?;
//!
//! // Span the first two columns of the second row, then the first
//! // column down the last two rows
//! table.merge_right(&mut tree, 1, 0, 1)?;
//! table.merge_down(&mut tree, 1, 0, 1)?;
//!
//! let xml = tree.document_xml()?;
//! assert!(xml.contains("<w:gridSpan w:val=\"2\"/>"));
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Editing an existing table
//!
//! ```
//! use docx_fluent::ooxml::docx::table::Table;
//! use docx_fluent::ooxml::tree::{DocumentTree, MemoryTree};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let xml = r#"<w:tbl><w:tblGrid><w:gridCol w:w="1500"/><w:gridCol w:w="1500"/></w:tblGrid>
//! <w:tr><w:tc><w:p/></w:tc><w:tc><w:p/></w:tc></w:tr></w:tbl>"#;
//! let mut tree = MemoryTree::from_xml(xml)?;
//! let root = tree.root();
//!
//! let mut table = Table::open(&mut tree, root)?;
//! table.merge_right(&mut tree, 0, 0, 1)?;
//! assert_eq!(tree.children_named(table.row(0).unwrap().node(), "w:tc")?.len(), 1);
//! # Ok(())
//! # }
//! ```

/// Shared units and XML text helpers
pub mod common;

/// OOXML authoring: the document tree and WordprocessingML tables
pub mod ooxml;

// Re-export commonly used types for convenience
pub use common::{TableWidth, WidthType};
pub use ooxml::docx::table::{Table, TableCell, TableRow};
pub use ooxml::tree::{DocumentTree, MemoryTree, NodeId};
pub use ooxml::{OoxmlError, Result};
