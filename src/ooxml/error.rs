/// Error types for OOXML authoring operations.
use crate::common::WidthType;
use crate::ooxml::tree::NodeId;
use thiserror::Error;

/// Result type for OOXML authoring operations.
pub type Result<T> = std::result::Result<T, OoxmlError>;

/// Error types for OOXML authoring operations.
#[derive(Error, Debug)]
pub enum OoxmlError {
    /// Argument is meaningless for the operation (e.g. merging a cell with itself)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Index or count runs past the end of a row or table
    #[error("Out of range: {what} {index} exceeds bound {bound}")]
    OutOfRange {
        what: &'static str,
        index: usize,
        bound: usize,
    },

    /// Widths with different units cannot be summed
    #[error("Width unit mismatch: expected {expected}, got {got}")]
    WidthUnitMismatch { expected: WidthType, got: WidthType },

    /// Existing content does not have the expected shape
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Node handle does not belong to the tree
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// XML parsing or writing error
    #[error("XML error: {0}")]
    Xml(String),

    /// Layout configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<quick_xml::Error> for OoxmlError {
    fn from(err: quick_xml::Error) -> Self {
        OoxmlError::Xml(err.to_string())
    }
}

impl From<std::fmt::Error> for OoxmlError {
    fn from(err: std::fmt::Error) -> Self {
        OoxmlError::Xml(err.to_string())
    }
}
