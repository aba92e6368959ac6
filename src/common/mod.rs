//! Common types and utilities shared across the crate.

pub mod unit;
pub mod xml;

pub use unit::{TableWidth, WidthType};
