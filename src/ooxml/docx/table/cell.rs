/// Table cell (`w:tc`).
use super::Table;
use super::format::{
    BORDERS_ORDER, BorderEdge, Shading, TableBorder, VMergeState, VerticalAlignment,
};
use crate::common::{TableWidth, WidthType};
use crate::ooxml::docx::paragraph::{append_paragraph, paragraph_text};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::tree::{DocumentTree, NodeId};

/// Child order inside `w:tc`; properties always come first.
const TC_ORDER: &[&str] = &["w:tcPr", "w:p", "w:tbl", "w:sdt"];

/// Child order inside `w:tcPr` (`CT_TcPr`).
const TC_PR_ORDER: &[&str] = &[
    "w:cnfStyle",
    "w:tcW",
    "w:gridSpan",
    "w:hMerge",
    "w:vMerge",
    "w:tcBorders",
    "w:shd",
    "w:noWrap",
    "w:tcMar",
    "w:textDirection",
    "w:tcFitText",
    "w:vAlign",
    "w:hideMark",
];

/// A cell in a table row.
///
/// The cell is a handle onto its `w:tc` element plus the row it belongs to.
/// Properties live in the tree and are read and written through it; the
/// `w:tcPr` block and its children are created on first write only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCell {
    node: NodeId,
    row: NodeId,
    merge_right: usize,
    is_merged: bool,
}

impl TableCell {
    /// Append a fresh cell of the given width, holding one empty paragraph.
    pub(crate) fn create<T: DocumentTree>(
        tree: &mut T,
        row: NodeId,
        width: TableWidth,
    ) -> Result<Self> {
        let node = tree.create_child(row, "w:tc")?;
        let mut cell = Self {
            node,
            row,
            merge_right: 0,
            is_merged: false,
        };
        cell.set_width(tree, width)?;
        append_paragraph(tree, node, "")?;
        Ok(cell)
    }

    /// Wrap an existing `w:tc` element.
    pub(crate) fn wrap<T: DocumentTree>(tree: &T, node: NodeId, row: NodeId) -> Result<Self> {
        let mut cell = Self {
            node,
            row,
            merge_right: 0,
            is_merged: false,
        };
        cell.merge_right = cell.grid_span(tree)? - 1;
        Ok(cell)
    }

    /// The underlying `w:tc` element.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The `w:tr` element this cell belongs (or belonged) to.
    pub fn row(&self) -> NodeId {
        self.row
    }

    /// Number of neighbouring cells merged into this one.
    pub fn merge_right(&self) -> usize {
        self.merge_right
    }

    /// Whether this cell was absorbed by a horizontal merge and detached.
    pub fn is_merged(&self) -> bool {
        self.is_merged
    }

    pub(crate) fn mark_merged(&mut self) {
        self.is_merged = true;
    }

    pub(crate) fn set_merge_right(&mut self, count: usize) {
        self.merge_right = count;
    }

    fn properties<T: DocumentTree>(&self, tree: &T) -> Result<Option<NodeId>> {
        tree.first_child_named(self.node, "w:tcPr")
    }

    fn property<T: DocumentTree>(&self, tree: &T, name: &str) -> Result<Option<NodeId>> {
        match self.properties(tree)? {
            Some(pr) => tree.first_child_named(pr, name),
            None => Ok(None),
        }
    }

    fn property_mut<T: DocumentTree>(&self, tree: &mut T, name: &str) -> Result<NodeId> {
        let pr = tree.get_or_create_child(self.node, "w:tcPr", TC_ORDER)?;
        tree.get_or_create_child(pr, name, TC_PR_ORDER)
    }

    fn clear_property<T: DocumentTree>(&self, tree: &mut T, name: &str) -> Result<()> {
        if let Some(pr) = self.properties(tree)? {
            tree.remove_children_named(pr, name)?;
        }
        Ok(())
    }

    /// Preferred width (`w:tcW`). A cell without one reports `auto`.
    pub fn width<T: DocumentTree>(&self, tree: &T) -> Result<TableWidth> {
        let Some(tc_w) = self.property(tree, "w:tcW")? else {
            return Ok(TableWidth::auto());
        };
        let width_type = match tree.attribute(tc_w, "w:type")? {
            Some(raw) => raw
                .parse::<WidthType>()
                .map_err(OoxmlError::InvalidFormat)?,
            None => WidthType::Dxa,
        };
        let value = tree.attribute_as::<i64>(tc_w, "w:w")?.unwrap_or(0);
        Ok(TableWidth::new(value, width_type))
    }

    pub fn set_width<T: DocumentTree>(
        &mut self,
        tree: &mut T,
        width: TableWidth,
    ) -> Result<&mut Self> {
        let tc_w = self.property_mut(tree, "w:tcW")?;
        tree.set_attribute(tc_w, "w:w", &width.value.to_string())?;
        tree.set_attribute(tc_w, "w:type", width.width_type.as_str())?;
        Ok(self)
    }

    /// Number of grid columns this cell covers (`w:gridSpan`, default 1).
    pub fn grid_span<T: DocumentTree>(&self, tree: &T) -> Result<usize> {
        match self.property(tree, "w:gridSpan")? {
            Some(span) => Ok(tree.attribute_as::<usize>(span, "w:val")?.unwrap_or(1).max(1)),
            None => Ok(1),
        }
    }

    pub(crate) fn set_grid_span<T: DocumentTree>(&self, tree: &mut T, span: usize) -> Result<()> {
        if span <= 1 {
            return self.clear_property(tree, "w:gridSpan");
        }
        let grid_span = self.property_mut(tree, "w:gridSpan")?;
        tree.set_attribute(grid_span, "w:val", &span.to_string())
    }

    /// Vertical merge role of this cell, if it takes part in one.
    pub fn v_merge<T: DocumentTree>(&self, tree: &T) -> Result<Option<VMergeState>> {
        let Some(v_merge) = self.property(tree, "w:vMerge")? else {
            return Ok(None);
        };
        Ok(match tree.attribute(v_merge, "w:val")? {
            Some("restart") => Some(VMergeState::Restart),
            _ => Some(VMergeState::Continue),
        })
    }

    pub(crate) fn set_v_merge<T: DocumentTree>(
        &self,
        tree: &mut T,
        state: Option<VMergeState>,
    ) -> Result<()> {
        match state {
            Some(VMergeState::Restart) => {
                let v_merge = self.property_mut(tree, "w:vMerge")?;
                tree.set_attribute(v_merge, "w:val", "restart")
            },
            Some(VMergeState::Continue) => {
                let v_merge = self.property_mut(tree, "w:vMerge")?;
                tree.remove_attribute(v_merge, "w:val")
            },
            None => self.clear_property(tree, "w:vMerge"),
        }
    }

    /// Apply the same border to all four edges of the cell.
    pub fn set_borders<T: DocumentTree>(
        &mut self,
        tree: &mut T,
        border: &TableBorder,
    ) -> Result<&mut Self> {
        let borders = self.property_mut(tree, "w:tcBorders")?;
        for edge in BorderEdge::OUTER {
            let node = tree.get_or_create_child(borders, edge.element(), BORDERS_ORDER)?;
            border.apply(tree, node)?;
        }
        Ok(self)
    }

    pub fn border<T: DocumentTree>(&self, tree: &T, edge: BorderEdge) -> Result<Option<TableBorder>> {
        let Some(borders) = self.property(tree, "w:tcBorders")? else {
            return Ok(None);
        };
        match tree.first_child_named(borders, edge.element())? {
            Some(node) => TableBorder::read(tree, node).map(Some),
            None => Ok(None),
        }
    }

    pub fn set_shading<T: DocumentTree>(
        &mut self,
        tree: &mut T,
        shading: &Shading,
    ) -> Result<&mut Self> {
        let shd = self.property_mut(tree, "w:shd")?;
        shading.apply(tree, shd)?;
        Ok(self)
    }

    pub fn shading<T: DocumentTree>(&self, tree: &T) -> Result<Option<Shading>> {
        match self.property(tree, "w:shd")? {
            Some(shd) => Shading::read(tree, shd).map(Some),
            None => Ok(None),
        }
    }

    pub fn set_vertical_alignment<T: DocumentTree>(
        &mut self,
        tree: &mut T,
        alignment: VerticalAlignment,
    ) -> Result<&mut Self> {
        let v_align = self.property_mut(tree, "w:vAlign")?;
        tree.set_attribute(v_align, "w:val", alignment.as_str())?;
        Ok(self)
    }

    pub fn vertical_alignment<T: DocumentTree>(&self, tree: &T) -> Result<VerticalAlignment> {
        let Some(v_align) = self.property(tree, "w:vAlign")? else {
            return Ok(VerticalAlignment::default());
        };
        match tree.attribute(v_align, "w:val")? {
            Some(raw) => VerticalAlignment::parse(raw).ok_or_else(|| {
                OoxmlError::InvalidFormat(format!("unsupported vertical alignment {:?}", raw))
            }),
            None => Ok(VerticalAlignment::default()),
        }
    }

    /// Replace the cell's paragraphs with a single paragraph of text.
    ///
    /// Nested tables are kept.
    pub fn set_text<T: DocumentTree>(&mut self, tree: &mut T, text: &str) -> Result<&mut Self> {
        tree.remove_children_named(self.node, "w:p")?;
        append_paragraph(tree, self.node, text)?;
        Ok(self)
    }

    /// Text of the cell's own paragraphs, one line per paragraph.
    pub fn text<T: DocumentTree>(&self, tree: &T) -> Result<String> {
        let mut lines = Vec::new();
        for para in tree.children_named(self.node, "w:p")? {
            lines.push(paragraph_text(tree, para)?);
        }
        Ok(lines.join("\n"))
    }

    pub fn add_paragraph<T: DocumentTree>(&mut self, tree: &mut T, text: &str) -> Result<NodeId> {
        append_paragraph(tree, self.node, text)
    }

    pub fn paragraph_count<T: DocumentTree>(&self, tree: &T) -> Result<usize> {
        Ok(tree.children_named(self.node, "w:p")?.len())
    }

    /// Insert a nested table into this cell.
    ///
    /// A cell must end with a paragraph, so an empty one follows the table.
    pub fn add_table<T: DocumentTree>(
        &mut self,
        tree: &mut T,
        column_widths: &[TableWidth],
    ) -> Result<Table> {
        let table = Table::insert(tree, self.node, column_widths)?;
        append_paragraph(tree, self.node, "")?;
        Ok(table)
    }
}
