//! Table layout configuration.
//!
//! A [`TableLayout`] describes how a new table should be set up: column
//! widths, initial rows, header rows, borders and header shading. Layouts are
//! plain serde structs so they can be kept next to document templates, e.g.
//! as YAML:
//!
//! ```yaml
//! text_width: 9360
//! rows: 3
//! header_rows: 1
//! border:
//!   style: double
//!   size: 8
//!   color: "1F3864"
//! ```

use super::format::{Shading, TableBorder};
use crate::common::TableWidth;
use crate::ooxml::error::{OoxmlError, Result};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Usable width of a Letter page with 1" margins, in twips.
pub const DEFAULT_TEXT_WIDTH: i64 = 9360;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableLayout {
    /// Width shared evenly between columns when `column_widths` is unset (twips)
    pub text_width: i64,
    /// Explicit per-column widths (twips)
    pub column_widths: Option<Vec<i64>>,
    /// Rows created up front
    pub rows: usize,
    /// Leading rows repeated on each page
    pub header_rows: usize,
    /// Preferred table width as a whole percentage of the text width
    pub width_percent: Option<u32>,
    /// Border applied to every table edge
    pub border: Option<TableBorder>,
    /// Shading applied to header rows
    pub header_shading: Option<Shading>,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            text_width: DEFAULT_TEXT_WIDTH,
            column_widths: None,
            rows: 1,
            header_rows: 0,
            width_percent: None,
            border: Some(TableBorder::default()),
            header_shading: None,
        }
    }
}

impl TableLayout {
    /// Parse a layout from YAML.
    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let layout: Self = serde_saphyr::from_str(yaml)
            .map_err(|e| OoxmlError::Config(format!("Failed to parse table layout: {}", e)))?;
        layout.validate()?;
        Ok(layout)
    }

    /// Serialize the layout to YAML.
    #[cfg(feature = "yaml")]
    pub fn to_yaml_string(&self) -> Result<String> {
        serde_saphyr::to_string(self)
            .map_err(|e| OoxmlError::Config(format!("Failed to serialize table layout: {}", e)))
    }

    pub fn validate(&self) -> Result<()> {
        if self.text_width <= 0 {
            return Err(OoxmlError::Config(format!(
                "text_width must be positive, got {}",
                self.text_width
            )));
        }
        if self.header_rows > self.rows {
            return Err(OoxmlError::Config(format!(
                "header_rows ({}) exceeds rows ({})",
                self.header_rows, self.rows
            )));
        }
        if let Some(percent) = self.width_percent
            && !(1..=100).contains(&percent)
        {
            return Err(OoxmlError::Config(format!(
                "width_percent must be within 1..=100, got {}",
                percent
            )));
        }
        if let Some(widths) = &self.column_widths
            && widths.iter().any(|&w| w < 0)
        {
            return Err(OoxmlError::Config(
                "column widths must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Column widths for a table of `columns` columns.
    ///
    /// Without explicit widths, `text_width` is split evenly and the
    /// remainder goes to the last column so the widths add up exactly.
    pub fn column_widths(&self, columns: usize) -> Result<SmallVec<[TableWidth; 8]>> {
        if columns == 0 {
            return Err(OoxmlError::InvalidArgument(
                "a table needs at least one column".to_string(),
            ));
        }
        if let Some(widths) = &self.column_widths {
            if widths.len() != columns {
                return Err(OoxmlError::Config(format!(
                    "layout lists {} column widths for a {}-column table",
                    widths.len(),
                    columns
                )));
            }
            return Ok(widths.iter().map(|&w| TableWidth::dxa(w)).collect());
        }

        let each = self.text_width / columns as i64;
        let mut widths: SmallVec<[TableWidth; 8]> =
            (0..columns).map(|_| TableWidth::dxa(each)).collect();
        if let Some(last) = widths.last_mut() {
            last.value += self.text_width - each * columns as i64;
        }
        Ok(widths)
    }
}
