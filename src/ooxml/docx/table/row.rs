/// Table row (`w:tr`) and horizontal merging.
use super::cell::TableCell;
use super::format::{HeightRule, Shading, TableBorder};
use crate::common::TableWidth;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::tree::{DocumentTree, NodeId};
use tracing::{debug, warn};

/// Child order inside `w:tr`.
const TR_ORDER: &[&str] = &["w:tblPrEx", "w:trPr", "w:tc", "w:sdt"];

/// Child order inside `w:trPr` (`CT_TrPr`).
const TR_PR_ORDER: &[&str] = &[
    "w:cnfStyle",
    "w:divId",
    "w:gridBefore",
    "w:gridAfter",
    "w:wBefore",
    "w:wAfter",
    "w:cantSplit",
    "w:trHeight",
    "w:tblHeader",
    "w:tblCellSpacing",
    "w:jc",
    "w:hidden",
];

/// A row in a table.
///
/// Holds its cells in column order and a handle to the owning `w:tbl`
/// element. After horizontal merges a row has fewer physical cells than the
/// table has grid columns; [`TableRow::grid_start`] maps between the two.
#[derive(Debug, Clone)]
pub struct TableRow {
    node: NodeId,
    table: NodeId,
    cells: Vec<TableCell>,
}

impl TableRow {
    /// Append a new `w:tr` to `table` and fill it with one cell per column.
    pub(crate) fn create<T: DocumentTree>(
        tree: &mut T,
        table: NodeId,
        column_widths: &[TableWidth],
    ) -> Result<Self> {
        let node = tree.create_child(table, "w:tr")?;
        Self::attach(tree, table, node, column_widths)
    }

    /// Bind a `w:tr` element to its table.
    ///
    /// Existing `w:tc` children are wrapped as they are. A row whose cells
    /// cover fewer grid columns than the table has is padded with fresh
    /// cells for the missing trailing columns; a row covering more columns
    /// is rejected without touching the tree. A row with no cells gets one
    /// fresh cell per column.
    pub(crate) fn attach<T: DocumentTree>(
        tree: &mut T,
        table: NodeId,
        node: NodeId,
        column_widths: &[TableWidth],
    ) -> Result<Self> {
        let mut row = Self::bind(tree, table, node, column_widths.len())?;
        row.pad(tree, column_widths)?;
        Ok(row)
    }

    /// Wrap the existing cells of a `w:tr` without modifying the tree.
    ///
    /// Fails when the cells cover more than `columns` grid columns.
    pub(crate) fn bind<T: DocumentTree>(
        tree: &T,
        table: NodeId,
        node: NodeId,
        columns: usize,
    ) -> Result<Self> {
        let mut cells = Vec::with_capacity(columns);
        for tc in tree.children_named(node, "w:tc")? {
            cells.push(TableCell::wrap(tree, tc, node)?);
        }

        let row = Self { node, table, cells };
        let covered = row.covered_columns(tree)?;
        if covered > columns {
            return Err(OoxmlError::InvalidFormat(format!(
                "row {} covers {} grid columns but the table has {}",
                node, covered, columns
            )));
        }
        Ok(row)
    }

    /// Append fresh cells for the grid columns this row does not cover.
    pub(crate) fn pad<T: DocumentTree>(
        &mut self,
        tree: &mut T,
        column_widths: &[TableWidth],
    ) -> Result<()> {
        let columns = column_widths.len();
        let covered = self.covered_columns(tree)?;
        if covered >= columns {
            return Ok(());
        }
        if !self.cells.is_empty() {
            warn!(
                row = %self.node,
                covered,
                columns,
                "padding short table row with empty cells"
            );
        }

        for width in &column_widths[covered..] {
            self.cells.push(TableCell::create(tree, self.node, *width)?);
        }
        Ok(())
    }

    /// Number of grid columns spanned by the row's cells.
    fn covered_columns<T: DocumentTree>(&self, tree: &T) -> Result<usize> {
        let mut covered: usize = 0;
        for cell in &self.cells {
            covered = covered.saturating_add(cell.grid_span(tree)?);
        }
        Ok(covered)
    }

    /// The underlying `w:tr` element.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The `w:tbl` element owning this row.
    pub fn table(&self) -> NodeId {
        self.table
    }

    pub fn cells(&self) -> &[TableCell] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&TableCell> {
        self.cells.get(index)
    }

    pub fn cell_mut(&mut self, index: usize) -> Option<&mut TableCell> {
        self.cells.get_mut(index)
    }

    /// Number of physical cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Grid column at which the cell at `index` starts.
    pub fn grid_start<T: DocumentTree>(&self, tree: &T, index: usize) -> Result<usize> {
        if index >= self.cells.len() {
            return Err(OoxmlError::OutOfRange {
                what: "cell index",
                index,
                bound: self.cells.len(),
            });
        }
        let mut column = 0;
        for cell in &self.cells[..index] {
            column += cell.grid_span(tree)?;
        }
        Ok(column)
    }

    /// Physical index of the cell starting exactly at grid column `column`.
    pub fn cell_at_grid_column<T: DocumentTree>(
        &self,
        tree: &T,
        column: usize,
    ) -> Result<Option<usize>> {
        let mut start = 0;
        for (index, cell) in self.cells.iter().enumerate() {
            if start == column {
                return Ok(Some(index));
            }
            if start > column {
                break;
            }
            start += cell.grid_span(tree)?;
        }
        Ok(None)
    }

    fn properties<T: DocumentTree>(&self, tree: &T) -> Result<Option<NodeId>> {
        tree.first_child_named(self.node, "w:trPr")
    }

    fn property<T: DocumentTree>(&self, tree: &T, name: &str) -> Result<Option<NodeId>> {
        match self.properties(tree)? {
            Some(pr) => tree.first_child_named(pr, name),
            None => Ok(None),
        }
    }

    fn property_mut<T: DocumentTree>(&self, tree: &mut T, name: &str) -> Result<NodeId> {
        let pr = tree.get_or_create_child(self.node, "w:trPr", TR_ORDER)?;
        tree.get_or_create_child(pr, name, TR_PR_ORDER)
    }

    fn clear_property<T: DocumentTree>(&self, tree: &mut T, name: &str) -> Result<()> {
        if let Some(pr) = self.properties(tree)? {
            tree.remove_children_named(pr, name)?;
        }
        Ok(())
    }

    /// Repeat this row at the top of every page the table spans.
    pub fn set_header<T: DocumentTree>(&mut self, tree: &mut T, header: bool) -> Result<&mut Self> {
        if header {
            self.property_mut(tree, "w:tblHeader")?;
        } else {
            self.clear_property(tree, "w:tblHeader")?;
        }
        Ok(self)
    }

    pub fn is_header<T: DocumentTree>(&self, tree: &T) -> Result<bool> {
        on_off(tree, self.property(tree, "w:tblHeader")?)
    }

    /// Set the row height in twips.
    pub fn set_height<T: DocumentTree>(
        &mut self,
        tree: &mut T,
        twips: u32,
        rule: HeightRule,
    ) -> Result<&mut Self> {
        let height = self.property_mut(tree, "w:trHeight")?;
        tree.set_attribute(height, "w:val", &twips.to_string())?;
        tree.set_attribute(height, "w:hRule", rule.as_str())?;
        Ok(self)
    }

    pub fn height<T: DocumentTree>(&self, tree: &T) -> Result<Option<(u32, HeightRule)>> {
        let Some(height) = self.property(tree, "w:trHeight")? else {
            return Ok(None);
        };
        let twips = tree.attribute_as::<u32>(height, "w:val")?.unwrap_or(0);
        let rule = match tree.attribute(height, "w:hRule")? {
            Some(raw) => HeightRule::parse(raw).ok_or_else(|| {
                OoxmlError::InvalidFormat(format!("unsupported height rule {:?}", raw))
            })?,
            // Omitted hRule means atLeast
            None => HeightRule::AtLeast,
        };
        Ok(Some((twips, rule)))
    }

    /// Allow or forbid the row to break across a page boundary.
    pub fn set_break_across_pages<T: DocumentTree>(
        &mut self,
        tree: &mut T,
        allow: bool,
    ) -> Result<&mut Self> {
        if allow {
            self.clear_property(tree, "w:cantSplit")?;
        } else {
            self.property_mut(tree, "w:cantSplit")?;
        }
        Ok(self)
    }

    pub fn breaks_across_pages<T: DocumentTree>(&self, tree: &T) -> Result<bool> {
        Ok(!on_off(tree, self.property(tree, "w:cantSplit")?)?)
    }

    /// Apply the same border to every cell of the row.
    pub fn set_borders<T: DocumentTree>(
        &mut self,
        tree: &mut T,
        border: &TableBorder,
    ) -> Result<&mut Self> {
        for cell in &mut self.cells {
            cell.set_borders(tree, border)?;
        }
        Ok(self)
    }

    /// Apply the same shading to every cell of the row.
    pub fn set_shading<T: DocumentTree>(
        &mut self,
        tree: &mut T,
        shading: &Shading,
    ) -> Result<&mut Self> {
        for cell in &mut self.cells {
            cell.set_shading(tree, shading)?;
        }
        Ok(self)
    }

    /// Merge the cell at `index` with the `count` cells to its right.
    ///
    /// The absorbed cells' widths are added to the surviving cell, their
    /// elements are detached from the row and their grid spans are added to
    /// the survivor's `w:gridSpan`. Every precondition is checked before the
    /// tree is modified. Returns the absorbed cells, flagged as merged.
    pub fn merge_right<T: DocumentTree>(
        &mut self,
        tree: &mut T,
        index: usize,
        count: usize,
    ) -> Result<Vec<TableCell>> {
        let total = self.cells.len();
        if count == 0 {
            return Err(OoxmlError::InvalidArgument(
                "merge count must be at least 1; a cell cannot be merged with itself".to_string(),
            ));
        }
        if index >= total {
            return Err(OoxmlError::OutOfRange {
                what: "cell index",
                index,
                bound: total,
            });
        }
        if count >= total {
            return Err(OoxmlError::OutOfRange {
                what: "merge count",
                index: count,
                bound: total,
            });
        }
        if index + count >= total {
            return Err(OoxmlError::OutOfRange {
                what: "last merged cell index",
                index: index + count,
                bound: total,
            });
        }

        let mut width = self.cells[index].width(tree)?;
        let mut span = self.cells[index].grid_span(tree)?;
        for cell in &self.cells[index + 1..=index + count] {
            let absorbed = cell.width(tree)?;
            width = width
                .checked_add(absorbed)
                .ok_or(OoxmlError::WidthUnitMismatch {
                    expected: width.width_type,
                    got: absorbed.width_type,
                })?;
            span += cell.grid_span(tree)?;
        }

        let mut absorbed: Vec<TableCell> = self.cells.drain(index + 1..=index + count).collect();
        for cell in &mut absorbed {
            tree.remove(cell.node())?;
            cell.mark_merged();
        }

        let survivor = &mut self.cells[index];
        survivor.set_width(tree, width)?;
        survivor.set_grid_span(tree, span)?;
        survivor.set_merge_right(span - 1);

        debug!(
            row = %self.node,
            index,
            count,
            span,
            width = %width,
            "merged cells horizontally"
        );

        Ok(absorbed)
    }
}

/// `CT_OnOff`: present without `w:val`, or with a true value, means on.
fn on_off<T: DocumentTree>(tree: &T, node: Option<NodeId>) -> Result<bool> {
    let Some(node) = node else {
        return Ok(false);
    };
    Ok(!matches!(
        tree.attribute(node, "w:val")?,
        Some("0" | "false" | "off")
    ))
}
