//! Error types for the widget layer.

use trellis_core::WidgetId;

/// Result type alias for widget and frame operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while composing, laying out or styling widgets.
///
/// Every error is returned to the immediate caller. A failed geometry pass
/// leaves the frame's dirty flag set, so the next
/// `check_for_geometry_updates` retries it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An argument was outside its valid range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Committing a widget list would make a container contain itself.
    #[error("Container {frame:?} cannot contain {child:?}: it would contain itself")]
    SelfContainment { frame: WidgetId, child: WidgetId },

    /// A page index outside `[0, count)` was requested.
    #[error("Page index {index} is out of range (page count {count})")]
    PageOutOfRange { index: usize, count: usize },

    /// The current page of a book frame without pages was requested.
    #[error("Book frame has no pages")]
    NoPages,

    /// A handle does not refer to a stored widget (never inserted, or removed).
    #[error("Widget {0:?} not found")]
    WidgetNotFound(WidgetId),

    /// The widget is currently checked out of the tree by an outer operation.
    #[error("Widget {0:?} is in use by another operation")]
    WidgetBusy(WidgetId),

    /// The widget is not of the requested kind.
    #[error("Widget {id:?} is not a {expected}")]
    WrongWidgetType { id: WidgetId, expected: &'static str },

    /// The widget does not support the operation.
    #[error("Operation not supported by this widget")]
    Unsupported,

    /// A widget broke a layout contract (for example, its size changed when
    /// it was only moved).
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),

    /// A style field could not be resolved.
    #[error(transparent)]
    Style(#[from] trellis_style::Error),

    /// Invalid geometry or text metrics.
    #[error(transparent)]
    Render(#[from] trellis_render::RenderError),
}

impl Error {
    /// Create an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create an invariant-violation error.
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation(message.into())
    }
}
