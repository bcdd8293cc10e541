//! Error types for the styling system.

/// Result type alias for style operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving style fields.
///
/// Styling problems are configuration errors: they surface during a
/// `stylize` pass and are meant to abort style setup, not to be recovered
/// from.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// None of the keys in a lookup chain is set.
    #[error("Missing required style field (tried: {tried})")]
    MissingField { tried: String },

    /// A key is set, but to a field of the wrong kind.
    #[error("Style field '{key}' has the wrong type: expected {expected}, found {found}")]
    WrongFieldType {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A key is set to a value of the right kind that is out of range.
    #[error("Invalid value for style field '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

impl Error {
    /// Create a missing-field error for a lookup chain.
    pub fn missing<'a>(chain: impl IntoIterator<Item = &'a crate::StyleKey>) -> Self {
        let tried = chain
            .into_iter()
            .map(|key| key.as_str())
            .collect::<Vec<_>>()
            .join(" -> ");
        Self::MissingField { tried }
    }

    /// Create a value error.
    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}
