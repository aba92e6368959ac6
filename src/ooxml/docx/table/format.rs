/// Formatting value types for tables, rows and cells.
use crate::ooxml::error::Result;
use crate::ooxml::tree::{DocumentTree, NodeId};
use serde::{Deserialize, Serialize};

/// Border line style (`ST_Border`).
///
/// The line styles Word offers in its border dialog are named variants.
/// Any other valid `ST_Border` value (art borders, `thinThickSmallGap`, ...)
/// is kept verbatim in [`TableBorderStyle::Other`] so opened tables read
/// back and write out unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TableBorderStyle {
    None,
    #[default]
    Single,
    Thick,
    Double,
    Triple,
    Dotted,
    Dashed,
    DashSmallGap,
    DotDash,
    DotDotDash,
    Wave,
    DoubleWave,
    ThreeDEmboss,
    ThreeDEngrave,
    Outset,
    Inset,
    #[serde(untagged)]
    Other(String),
}

impl TableBorderStyle {
    pub(crate) fn as_str(&self) -> &str {
        match self {
            Self::None => "none",
            Self::Single => "single",
            Self::Thick => "thick",
            Self::Double => "double",
            Self::Triple => "triple",
            Self::Dotted => "dotted",
            Self::Dashed => "dashed",
            Self::DashSmallGap => "dashSmallGap",
            Self::DotDash => "dotDash",
            Self::DotDotDash => "dotDotDash",
            Self::Wave => "wave",
            Self::DoubleWave => "doubleWave",
            Self::ThreeDEmboss => "threeDEmboss",
            Self::ThreeDEngrave => "threeDEngrave",
            Self::Outset => "outset",
            Self::Inset => "inset",
            Self::Other(raw) => raw,
        }
    }

    pub(crate) fn parse(s: &str) -> Self {
        match s {
            "none" | "nil" => Self::None,
            "single" => Self::Single,
            "thick" => Self::Thick,
            "double" => Self::Double,
            "triple" => Self::Triple,
            "dotted" => Self::Dotted,
            "dashed" => Self::Dashed,
            "dashSmallGap" => Self::DashSmallGap,
            "dotDash" => Self::DotDash,
            "dotDotDash" => Self::DotDotDash,
            "wave" => Self::Wave,
            "doubleWave" => Self::DoubleWave,
            "threeDEmboss" => Self::ThreeDEmboss,
            "threeDEngrave" => Self::ThreeDEngrave,
            "outset" => Self::Outset,
            "inset" => Self::Inset,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Border definition for one edge of a table or cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableBorder {
    /// Border style
    pub style: TableBorderStyle,
    /// Border width in eighths of a point (e.g., 8 = 1pt, 24 = 3pt)
    pub size: u32,
    /// Border color in hex RGB format (e.g., "FF0000" for red), or "auto"
    pub color: String,
}

impl Default for TableBorder {
    fn default() -> Self {
        Self {
            style: TableBorderStyle::Single,
            size: 4,
            color: "000000".to_string(),
        }
    }
}

impl TableBorder {
    pub fn new(style: TableBorderStyle, size: u32, color: &str) -> Self {
        Self {
            style,
            size,
            color: color.to_string(),
        }
    }

    /// Write this border onto an edge element (`w:top`, `w:insideH`, ...).
    pub(crate) fn apply<T: DocumentTree>(&self, tree: &mut T, edge: NodeId) -> Result<()> {
        tree.set_attribute(edge, "w:val", self.style.as_str())?;
        tree.set_attribute(edge, "w:sz", &self.size.to_string())?;
        tree.set_attribute(edge, "w:space", "0")?;
        tree.set_attribute(edge, "w:color", &self.color)?;
        Ok(())
    }

    /// Read a border back from an edge element.
    pub(crate) fn read<T: DocumentTree>(tree: &T, edge: NodeId) -> Result<Self> {
        let style = match tree.attribute(edge, "w:val")? {
            Some(raw) => TableBorderStyle::parse(raw),
            None => TableBorderStyle::None,
        };
        Ok(Self {
            style,
            size: tree.attribute_as::<u32>(edge, "w:sz")?.unwrap_or(0),
            color: tree
                .attribute(edge, "w:color")?
                .unwrap_or("auto")
                .to_string(),
        })
    }
}

/// One edge of a border block (`w:tblBorders` / `w:tcBorders`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderEdge {
    Top,
    Left,
    Bottom,
    Right,
    InsideH,
    InsideV,
}

impl BorderEdge {
    /// The four outer edges, in schema order.
    pub const OUTER: [BorderEdge; 4] = [Self::Top, Self::Left, Self::Bottom, Self::Right];
    /// All six edges of a table border block, in schema order.
    pub const ALL: [BorderEdge; 6] = [
        Self::Top,
        Self::Left,
        Self::Bottom,
        Self::Right,
        Self::InsideH,
        Self::InsideV,
    ];

    pub(crate) fn element(&self) -> &'static str {
        match self {
            Self::Top => "w:top",
            Self::Left => "w:left",
            Self::Bottom => "w:bottom",
            Self::Right => "w:right",
            Self::InsideH => "w:insideH",
            Self::InsideV => "w:insideV",
        }
    }
}

/// Child order inside `w:tblBorders` and `w:tcBorders`.
pub(crate) const BORDERS_ORDER: &[&str] = &[
    "w:top",
    "w:left",
    "w:bottom",
    "w:right",
    "w:insideH",
    "w:insideV",
    "w:tl2br",
    "w:tr2bl",
];

/// Shading pattern (`ST_Shd`).
///
/// Percentage patterns other than the common ones, and the thin stripe and
/// cross patterns, are kept verbatim in [`ShadingPattern::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShadingPattern {
    #[default]
    Clear,
    Solid,
    HorzStripe,
    VertStripe,
    ReverseDiagStripe,
    DiagStripe,
    HorzCross,
    DiagCross,
    Pct5,
    Pct10,
    Pct20,
    Pct25,
    Pct30,
    Pct40,
    Pct50,
    Pct60,
    Pct70,
    Pct75,
    Pct80,
    Pct90,
    #[serde(untagged)]
    Other(String),
}

impl ShadingPattern {
    pub(crate) fn as_str(&self) -> &str {
        match self {
            Self::Clear => "clear",
            Self::Solid => "solid",
            Self::HorzStripe => "horzStripe",
            Self::VertStripe => "vertStripe",
            Self::ReverseDiagStripe => "reverseDiagStripe",
            Self::DiagStripe => "diagStripe",
            Self::HorzCross => "horzCross",
            Self::DiagCross => "diagCross",
            Self::Pct5 => "pct5",
            Self::Pct10 => "pct10",
            Self::Pct20 => "pct20",
            Self::Pct25 => "pct25",
            Self::Pct30 => "pct30",
            Self::Pct40 => "pct40",
            Self::Pct50 => "pct50",
            Self::Pct60 => "pct60",
            Self::Pct70 => "pct70",
            Self::Pct75 => "pct75",
            Self::Pct80 => "pct80",
            Self::Pct90 => "pct90",
            Self::Other(raw) => raw,
        }
    }

    pub(crate) fn parse(s: &str) -> Self {
        match s {
            "clear" | "nil" => Self::Clear,
            "solid" => Self::Solid,
            "horzStripe" => Self::HorzStripe,
            "vertStripe" => Self::VertStripe,
            "reverseDiagStripe" => Self::ReverseDiagStripe,
            "diagStripe" => Self::DiagStripe,
            "horzCross" => Self::HorzCross,
            "diagCross" => Self::DiagCross,
            "pct5" => Self::Pct5,
            "pct10" => Self::Pct10,
            "pct20" => Self::Pct20,
            "pct25" => Self::Pct25,
            "pct30" => Self::Pct30,
            "pct40" => Self::Pct40,
            "pct50" => Self::Pct50,
            "pct60" => Self::Pct60,
            "pct70" => Self::Pct70,
            "pct75" => Self::Pct75,
            "pct80" => Self::Pct80,
            "pct90" => Self::Pct90,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Cell shading (`w:shd`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Shading {
    pub pattern: ShadingPattern,
    /// Pattern color, hex RGB or "auto"
    pub color: String,
    /// Background fill, hex RGB or "auto"
    pub fill: String,
}

impl Default for Shading {
    fn default() -> Self {
        Self {
            pattern: ShadingPattern::Clear,
            color: "auto".to_string(),
            fill: "auto".to_string(),
        }
    }
}

impl Shading {
    /// Plain background color, the way Word writes "cell fill".
    pub fn fill(fill: &str) -> Self {
        Self {
            fill: fill.to_string(),
            ..Self::default()
        }
    }

    pub(crate) fn apply<T: DocumentTree>(&self, tree: &mut T, shd: NodeId) -> Result<()> {
        tree.set_attribute(shd, "w:val", self.pattern.as_str())?;
        tree.set_attribute(shd, "w:color", &self.color)?;
        tree.set_attribute(shd, "w:fill", &self.fill)?;
        Ok(())
    }

    pub(crate) fn read<T: DocumentTree>(tree: &T, shd: NodeId) -> Result<Self> {
        let pattern = match tree.attribute(shd, "w:val")? {
            Some(raw) => ShadingPattern::parse(raw),
            None => ShadingPattern::Clear,
        };
        Ok(Self {
            pattern,
            color: tree.attribute(shd, "w:color")?.unwrap_or("auto").to_string(),
            fill: tree.attribute(shd, "w:fill")?.unwrap_or("auto").to_string(),
        })
    }
}

/// Vertical alignment of content in a cell (`w:vAlign`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAlignment {
    #[default]
    Top,
    Center,
    Bottom,
}

impl VerticalAlignment {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Center => "center",
            Self::Bottom => "bottom",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s {
            "top" => Some(Self::Top),
            "center" => Some(Self::Center),
            "bottom" => Some(Self::Bottom),
            _ => None,
        }
    }
}

/// How a row height is interpreted (`w:hRule`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeightRule {
    #[default]
    Auto,
    AtLeast,
    Exact,
}

impl HeightRule {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::AtLeast => "atLeast",
            Self::Exact => "exact",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s {
            "auto" => Some(Self::Auto),
            "atLeast" => Some(Self::AtLeast),
            "exact" => Some(Self::Exact),
            _ => None,
        }
    }
}

/// Vertical merge state for table cells.
///
/// In OOXML, vertical merging uses the `<w:vMerge>` element:
/// - `restart`: Starts a new vertical merge (first cell in the merge)
/// - `continue`: Continues a vertical merge from the cell above (no `val` attribute or `val="continue"`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VMergeState {
    /// Starts a vertical merge (`<w:vMerge w:val="restart"/>`)
    Restart,
    /// Continues a vertical merge from above (`<w:vMerge/>`)
    Continue,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::tree::MemoryTree;

    #[test]
    fn test_border_apply_and_read() {
        let mut tree = MemoryTree::new();
        let body = tree.body().unwrap();
        let edge = tree.create_child(body, "w:top").unwrap();

        let border = TableBorder::new(TableBorderStyle::DotDash, 12, "FF0000");
        border.apply(&mut tree, edge).unwrap();
        assert_eq!(tree.attribute(edge, "w:val").unwrap(), Some("dotDash"));
        assert_eq!(tree.attribute(edge, "w:space").unwrap(), Some("0"));
        assert_eq!(TableBorder::read(&tree, edge).unwrap(), border);
    }

    #[test]
    fn test_shading_defaults() {
        let shading = Shading::fill("FFFF00");
        assert_eq!(shading.pattern, ShadingPattern::Clear);
        assert_eq!(shading.color, "auto");

        let mut tree = MemoryTree::new();
        let body = tree.body().unwrap();
        let shd = tree.create_child(body, "w:shd").unwrap();
        tree.set_attribute(shd, "w:val", "pct20").unwrap();
        assert_eq!(Shading::read(&tree, shd).unwrap().pattern, ShadingPattern::Pct20);
    }

    #[test]
    fn test_unlisted_values_read_back_verbatim() {
        let mut tree = MemoryTree::new();
        let body = tree.body().unwrap();

        let edge = tree.create_child(body, "w:top").unwrap();
        tree.set_attribute(edge, "w:val", "thinThickSmallGap").unwrap();
        let border = TableBorder::read(&tree, edge).unwrap();
        assert_eq!(
            border.style,
            TableBorderStyle::Other("thinThickSmallGap".to_string())
        );

        let copy = tree.create_child(body, "w:bottom").unwrap();
        border.apply(&mut tree, copy).unwrap();
        assert_eq!(
            tree.attribute(copy, "w:val").unwrap(),
            Some("thinThickSmallGap")
        );

        let shd = tree.create_child(body, "w:shd").unwrap();
        tree.set_attribute(shd, "w:val", "thinDiagCross").unwrap();
        let shading = Shading::read(&tree, shd).unwrap();
        assert_eq!(shading.pattern.as_str(), "thinDiagCross");
    }

    #[test]
    fn test_enum_strings() {
        assert_eq!(HeightRule::parse("atLeast"), Some(HeightRule::AtLeast));
        assert_eq!(HeightRule::Exact.as_str(), "exact");
        assert_eq!(VerticalAlignment::parse("center"), Some(VerticalAlignment::Center));
        assert_eq!(VerticalAlignment::parse("both"), None);
        assert_eq!(TableBorderStyle::parse("nil"), TableBorderStyle::None);
        assert_eq!(TableBorderStyle::parse("triple"), TableBorderStyle::Triple);
        assert_eq!(ShadingPattern::parse("nil"), ShadingPattern::Clear);
    }
}
