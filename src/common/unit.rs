//! Unit conversion utilities.
//!
//! WordprocessingML measures most table geometry in twips (twentieths of a
//! point, also called "dxa"). Table and cell widths additionally carry a
//! width type, so a width is a `(value, type)` pair rather than a bare number.

use std::fmt;
use std::str::FromStr;

pub const TWIPS_PER_PT: i64 = 20;
pub const TWIPS_PER_INCH: i64 = 1_440;
pub const EMUS_PER_TWIP: i64 = 635;
/// `pct` widths are stored in fiftieths of a percent.
pub const PCT_UNITS_PER_PERCENT: i64 = 50;

#[inline]
pub fn pt_to_twip(pt: f64) -> i64 {
    (pt * TWIPS_PER_PT as f64).round() as i64
}

#[inline]
pub fn twip_to_pt(twips: i64) -> f64 {
    twips as f64 / TWIPS_PER_PT as f64
}

#[inline]
pub fn inch_to_twip(inches: f64) -> i64 {
    (inches * TWIPS_PER_INCH as f64).round() as i64
}

#[inline]
pub fn cm_to_twip(cm: f64) -> i64 {
    inch_to_twip(cm / 2.54)
}

#[inline]
pub fn twip_to_emu(twips: i64) -> i64 {
    twips.saturating_mul(EMUS_PER_TWIP)
}

#[inline]
pub fn emu_to_twip(emu: i64) -> i64 {
    (emu as f64 / EMUS_PER_TWIP as f64).round() as i64
}

/// Width unit (`ST_TblWidth`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WidthType {
    /// Determined by the layout engine; the value is ignored.
    #[default]
    Auto,
    /// Twips.
    Dxa,
    /// Fiftieths of a percent.
    Pct,
    /// Zero width.
    Nil,
}

impl WidthType {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Dxa => "dxa",
            Self::Pct => "pct",
            Self::Nil => "nil",
        }
    }
}

impl fmt::Display for WidthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WidthType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "dxa" => Ok(Self::Dxa),
            "pct" => Ok(Self::Pct),
            "nil" => Ok(Self::Nil),
            other => Err(format!("unknown width type: {}", other)),
        }
    }
}

/// A table, column or cell width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TableWidth {
    pub value: i64,
    pub width_type: WidthType,
}

impl TableWidth {
    #[inline]
    pub const fn new(value: i64, width_type: WidthType) -> Self {
        Self { value, width_type }
    }

    /// Width in twips.
    #[inline]
    pub const fn dxa(twips: i64) -> Self {
        Self::new(twips, WidthType::Dxa)
    }

    /// Width as a whole percentage of the container.
    #[inline]
    pub const fn percent(percent: i64) -> Self {
        Self::new(percent * PCT_UNITS_PER_PERCENT, WidthType::Pct)
    }

    #[inline]
    pub const fn auto() -> Self {
        Self::new(0, WidthType::Auto)
    }

    /// Width in twips, or `None` for any other unit.
    #[inline]
    pub fn as_twips(&self) -> Option<i64> {
        (self.width_type == WidthType::Dxa).then_some(self.value)
    }

    /// Sum two widths of the same unit.
    ///
    /// Returns `None` when the units differ. `nil` behaves like a zero-valued
    /// width of whatever unit it is added to.
    pub fn checked_add(self, other: Self) -> Option<Self> {
        match (self.width_type, other.width_type) {
            (a, b) if a == b => Some(Self::new(self.value.saturating_add(other.value), a)),
            (WidthType::Nil, b) => Some(Self::new(other.value, b)),
            (a, WidthType::Nil) => Some(Self::new(self.value, a)),
            _ => None,
        }
    }
}

impl fmt::Display for TableWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.width_type)
    }
}
