//! Error types for cable route construction.

use thiserror::Error;

/// Errors that can occur while building a cable route definition.
///
/// Array-resize failures are fatal by design: a half-specified route
/// is worse than none, so no partial cable is ever left behind.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CableError {
    /// The extension has no cable definition container.
    #[error("extension {extension} carries no cable definition")]
    MissingDefinition {
        /// Name of the offending extension.
        extension: String,
    },

    /// The engine rejected the point array allocation.
    #[error("cannot resize the point definition array to {requested}")]
    PointArrayResize {
        /// Requested number of point slots.
        requested: usize,
    },

    /// The engine rejected the derived segment array allocation.
    #[error("cannot resize the segment definition array to {requested}")]
    SegmentArrayResize {
        /// Requested number of segment slots.
        requested: usize,
    },

    /// A segment override targets an index outside the derived range.
    #[error("segment override index {index} out of range (cable has {count} segments)")]
    SegmentIndexOutOfRange {
        /// The offending override index.
        index: usize,
        /// Number of derived segments.
        count: usize,
    },

    /// A route needs at least a start and an end point.
    #[error("route has {count} points; at least 2 are required")]
    TooFewPoints {
        /// Number of points supplied.
        count: usize,
    },

    /// Structural validation: a winch may only open the route.
    #[error("winch point at index {index}; a winch is only valid at index 0")]
    WinchNotFirst {
        /// Index of the misplaced winch point.
        index: usize,
    },

    /// Structural validation: an attachment may only close the route.
    #[error("attachment point at index {index} is not terminal")]
    AttachmentNotTerminal {
        /// Index of the misplaced attachment point.
        index: usize,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CableError::PointArrayResize { requested: 5 };
        assert!(err.to_string().contains('5'));

        let err = CableError::SegmentIndexOutOfRange { index: 9, count: 9 };
        assert!(err.to_string().contains("out of range"));
    }
}
