/// Table (`w:tbl`): column grid, rows and vertical merging.
use super::cell::TableCell;
use super::config::TableLayout;
use super::format::{BORDERS_ORDER, BorderEdge, TableBorder, VMergeState};
use super::row::TableRow;
use crate::common::{TableWidth, WidthType};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::tree::{DocumentTree, NodeId};
use smallvec::SmallVec;
use tracing::debug;

/// Child order inside `w:tbl`.
const TBL_ORDER: &[&str] = &["w:tblPr", "w:tblGrid", "w:tr"];

/// Child order inside `w:tblPr` (`CT_TblPr`).
const TBL_PR_ORDER: &[&str] = &[
    "w:tblStyle",
    "w:tblpPr",
    "w:tblOverlap",
    "w:bidiVisual",
    "w:tblStyleRowBandSize",
    "w:tblStyleColBandSize",
    "w:tblW",
    "w:jc",
    "w:tblCellSpacing",
    "w:tblInd",
    "w:tblBorders",
    "w:shd",
    "w:tblLayout",
    "w:tblCellMar",
    "w:tblLook",
];

/// A table in a Word document.
///
/// Represents a `<w:tbl>` element with a fixed number of grid columns. Rows
/// always cover every grid column; horizontal merges make a row hold fewer,
/// wider cells, vertical merges chain cells in one column across rows.
///
/// # Example
///
/// ```
/// use docx_fluent::common::TableWidth;
/// use docx_fluent::ooxml::docx::table::Table;
/// use docx_fluent::ooxml::tree::MemoryTree;
///
/// let mut tree = MemoryTree::new();
/// let body = tree.body().unwrap();
/// let widths = [TableWidth::dxa(1000), TableWidth::dxa(2000), TableWidth::dxa(3000)];
///
/// let mut table = Table::insert(&mut tree, body, &widths)?;
/// table.add_rows(&mut tree, 2)?;
/// table.merge_right(&mut tree, 0, 0, 1)?;
/// table.merge_down(&mut tree, 0, 1, 1)?;
///
/// let first = table.cell(0, 0).unwrap();
/// assert_eq!(first.width(&tree)?, TableWidth::dxa(3000));
/// assert_eq!(first.grid_span(&tree)?, 2);
/// # Ok::<(), docx_fluent::ooxml::OoxmlError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Table {
    node: NodeId,
    column_widths: SmallVec<[TableWidth; 8]>,
    rows: Vec<TableRow>,
}

impl Table {
    /// Create an empty table under `parent` (a body or a cell).
    pub fn insert<T: DocumentTree>(
        tree: &mut T,
        parent: NodeId,
        column_widths: &[TableWidth],
    ) -> Result<Self> {
        if column_widths.is_empty() {
            return Err(OoxmlError::InvalidArgument(
                "a table needs at least one column".to_string(),
            ));
        }

        let node = tree.create_child(parent, "w:tbl")?;
        let pr = tree.get_or_create_child(node, "w:tblPr", TBL_ORDER)?;
        let tbl_w = tree.get_or_create_child(pr, "w:tblW", TBL_PR_ORDER)?;
        tree.set_attribute(tbl_w, "w:w", "0")?;
        tree.set_attribute(tbl_w, "w:type", WidthType::Auto.as_str())?;

        let grid = tree.get_or_create_child(node, "w:tblGrid", TBL_ORDER)?;
        for width in column_widths {
            let col = tree.create_child(grid, "w:gridCol")?;
            // gridCol only takes twips
            if let Some(twips) = width.as_twips() {
                tree.set_attribute(col, "w:w", &twips.to_string())?;
            }
        }

        debug!(table = %node, columns = column_widths.len(), "created table");

        Ok(Self {
            node,
            column_widths: column_widths.iter().copied().collect(),
            rows: Vec::new(),
        })
    }

    /// Create a table from a layout configuration.
    pub fn with_layout<T: DocumentTree>(
        tree: &mut T,
        parent: NodeId,
        columns: usize,
        layout: &TableLayout,
    ) -> Result<Self> {
        layout.validate()?;
        let widths = layout.column_widths(columns)?;

        let mut table = Self::insert(tree, parent, &widths)?;
        if let Some(border) = &layout.border {
            table.set_borders(tree, border)?;
        }
        if let Some(percent) = layout.width_percent {
            table.set_width(tree, TableWidth::percent(percent as i64))?;
        }
        table.add_rows(tree, layout.rows)?;
        for row in table.rows.iter_mut().take(layout.header_rows) {
            row.set_header(tree, true)?;
            if let Some(shading) = &layout.header_shading {
                row.set_shading(tree, shading)?;
            }
        }
        Ok(table)
    }

    /// Wrap an existing `w:tbl` element.
    ///
    /// Column widths come from `w:tblGrid`. Short rows are padded with
    /// fresh cells; a table with any over-full row is rejected before the
    /// tree is modified.
    pub fn open<T: DocumentTree>(tree: &mut T, node: NodeId) -> Result<Self> {
        let name = tree.name(node)?;
        if name != "w:tbl" {
            return Err(OoxmlError::InvalidFormat(format!(
                "expected w:tbl, found {}",
                name
            )));
        }
        let grid = tree
            .first_child_named(node, "w:tblGrid")?
            .ok_or_else(|| OoxmlError::InvalidFormat(format!("table {} has no w:tblGrid", node)))?;

        let mut column_widths: SmallVec<[TableWidth; 8]> = SmallVec::new();
        for col in tree.children_named(grid, "w:gridCol")? {
            column_widths.push(match tree.attribute_as::<i64>(col, "w:w")? {
                Some(twips) => TableWidth::dxa(twips),
                None => TableWidth::auto(),
            });
        }
        if column_widths.is_empty() {
            return Err(OoxmlError::InvalidFormat(format!(
                "table {} declares no grid columns",
                node
            )));
        }

        // Every row is checked before any short row is padded
        let mut rows = Vec::new();
        for tr in tree.children_named(node, "w:tr")? {
            rows.push(TableRow::bind(tree, node, tr, column_widths.len())?);
        }
        for row in &mut rows {
            row.pad(tree, &column_widths)?;
        }

        debug!(table = %node, columns = column_widths.len(), rows = rows.len(), "opened table");

        Ok(Self {
            node,
            column_widths,
            rows,
        })
    }

    /// The underlying `w:tbl` element.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Number of grid columns.
    pub fn column_count(&self) -> usize {
        self.column_widths.len()
    }

    pub fn column_widths(&self) -> &[TableWidth] {
        &self.column_widths
    }

    /// Append a row with one default-width cell per column.
    pub fn add_row<T: DocumentTree>(&mut self, tree: &mut T) -> Result<&mut TableRow> {
        let row = TableRow::create(tree, self.node, &self.column_widths)?;
        self.rows.push(row);
        let last = self.rows.len() - 1;
        Ok(&mut self.rows[last])
    }

    pub fn add_rows<T: DocumentTree>(&mut self, tree: &mut T, count: usize) -> Result<&mut Self> {
        for _ in 0..count {
            self.add_row(tree)?;
        }
        Ok(self)
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&TableRow> {
        self.rows.get(index)
    }

    pub fn row_mut(&mut self, index: usize) -> Option<&mut TableRow> {
        self.rows.get_mut(index)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get a cell by row and physical cell index.
    pub fn cell(&self, row: usize, index: usize) -> Option<&TableCell> {
        self.rows.get(row)?.cell(index)
    }

    pub fn cell_mut(&mut self, row: usize, index: usize) -> Option<&mut TableCell> {
        self.rows.get_mut(row)?.cell_mut(index)
    }

    /// Set all six table borders (outer edges and inside lines) at once.
    pub fn set_borders<T: DocumentTree>(
        &mut self,
        tree: &mut T,
        border: &TableBorder,
    ) -> Result<&mut Self> {
        let pr = tree.get_or_create_child(self.node, "w:tblPr", TBL_ORDER)?;
        let borders = tree.get_or_create_child(pr, "w:tblBorders", TBL_PR_ORDER)?;
        for edge in BorderEdge::ALL {
            let node = tree.get_or_create_child(borders, edge.element(), BORDERS_ORDER)?;
            border.apply(tree, node)?;
        }
        Ok(self)
    }

    pub fn border<T: DocumentTree>(&self, tree: &T, edge: BorderEdge) -> Result<Option<TableBorder>> {
        let Some(pr) = tree.first_child_named(self.node, "w:tblPr")? else {
            return Ok(None);
        };
        let Some(borders) = tree.first_child_named(pr, "w:tblBorders")? else {
            return Ok(None);
        };
        match tree.first_child_named(borders, edge.element())? {
            Some(node) => TableBorder::read(tree, node).map(Some),
            None => Ok(None),
        }
    }

    /// Preferred table width (`w:tblW`).
    pub fn set_width<T: DocumentTree>(&mut self, tree: &mut T, width: TableWidth) -> Result<&mut Self> {
        let pr = tree.get_or_create_child(self.node, "w:tblPr", TBL_ORDER)?;
        let tbl_w = tree.get_or_create_child(pr, "w:tblW", TBL_PR_ORDER)?;
        tree.set_attribute(tbl_w, "w:w", &width.value.to_string())?;
        tree.set_attribute(tbl_w, "w:type", width.width_type.as_str())?;
        Ok(self)
    }

    /// Set the table width as a whole percentage of the text width.
    pub fn set_width_percent<T: DocumentTree>(
        &mut self,
        tree: &mut T,
        percent: u32,
    ) -> Result<&mut Self> {
        if !(1..=100).contains(&percent) {
            return Err(OoxmlError::OutOfRange {
                what: "width percent",
                index: percent as usize,
                bound: 100,
            });
        }
        self.set_width(tree, TableWidth::percent(percent as i64))
    }

    pub fn width<T: DocumentTree>(&self, tree: &T) -> Result<TableWidth> {
        let Some(pr) = tree.first_child_named(self.node, "w:tblPr")? else {
            return Ok(TableWidth::auto());
        };
        let Some(tbl_w) = tree.first_child_named(pr, "w:tblW")? else {
            return Ok(TableWidth::auto());
        };
        let width_type = match tree.attribute(tbl_w, "w:type")? {
            Some(raw) => raw.parse::<WidthType>().map_err(OoxmlError::InvalidFormat)?,
            None => WidthType::Dxa,
        };
        let value = tree.attribute_as::<i64>(tbl_w, "w:w")?.unwrap_or(0);
        Ok(TableWidth::new(value, width_type))
    }

    /// Merge the cell at (`row`, `index`) with the `count` cells to its right.
    ///
    /// See [`TableRow::merge_right`].
    pub fn merge_right<T: DocumentTree>(
        &mut self,
        tree: &mut T,
        row: usize,
        index: usize,
        count: usize,
    ) -> Result<Vec<TableCell>> {
        let bound = self.rows.len();
        self.rows
            .get_mut(row)
            .ok_or(OoxmlError::OutOfRange {
                what: "row index",
                index: row,
                bound,
            })?
            .merge_right(tree, index, count)
    }

    /// Merge the cell at (`row`, `index`) with the cells below it in the
    /// next `count` rows.
    ///
    /// The column is identified by the grid column the cell starts at, so
    /// rows with different horizontal merges still line up. The origin cell
    /// is marked `restart`, the cells below it `continue`; nothing else in
    /// those rows changes. Continuation cells directly below the chain, left
    /// over from an earlier longer merge in the same column, are unmarked so
    /// the merged block spans exactly `count + 1` rows. Every precondition is checked before the tree is
    /// modified.
    pub fn merge_down<T: DocumentTree>(
        &mut self,
        tree: &mut T,
        row: usize,
        index: usize,
        count: usize,
    ) -> Result<()> {
        let total = self.rows.len();
        if count == 0 {
            return Err(OoxmlError::InvalidArgument(
                "merge count must be at least 1; a cell cannot be merged with itself".to_string(),
            ));
        }
        if row >= total {
            return Err(OoxmlError::OutOfRange {
                what: "row index",
                index: row,
                bound: total,
            });
        }
        let last = row
            .checked_add(count)
            .filter(|&last| last < total)
            .ok_or(OoxmlError::OutOfRange {
                what: "last merged row index",
                index: row.saturating_add(count),
                bound: total,
            })?;

        let origin = &self.rows[row];
        if index >= origin.cell_count() {
            return Err(OoxmlError::OutOfRange {
                what: "cell index",
                index,
                bound: origin.cell_count(),
            });
        }
        let column = origin.grid_start(tree, index)?;

        let mut chain: SmallVec<[(usize, usize); 8]> = SmallVec::new();
        chain.push((row, index));
        for r in row + 1..=last {
            let below = self.rows[r].cell_at_grid_column(tree, column)?.ok_or_else(|| {
                OoxmlError::InvalidArgument(format!(
                    "row {} has no cell starting at grid column {}",
                    r, column
                ))
            })?;
            chain.push((r, below));
        }

        // Continuations left below the new chain by an earlier, longer merge
        // would otherwise extend it
        let mut stale: SmallVec<[(usize, usize); 4]> = SmallVec::new();
        for r in last + 1..total {
            let Some(c) = self.rows[r].cell_at_grid_column(tree, column)? else {
                break;
            };
            if self.rows[r].cells()[c].v_merge(tree)? != Some(VMergeState::Continue) {
                break;
            }
            stale.push((r, c));
        }

        for (position, &(r, c)) in chain.iter().enumerate() {
            let state = if position == 0 {
                VMergeState::Restart
            } else {
                VMergeState::Continue
            };
            self.rows[r].cells()[c].set_v_merge(tree, Some(state))?;
        }
        for &(r, c) in &stale {
            self.rows[r].cells()[c].set_v_merge(tree, None)?;
        }

        debug!(
            table = %self.node,
            row,
            column,
            count,
            cleared = stale.len(),
            "merged cells vertically"
        );
        Ok(())
    }
}
