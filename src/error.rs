//! Error types for field-selection operations.

use thiserror::Error;

/// Errors raised by `include_fields` / `exclude_fields`.
///
/// These are the only two failure modes of the reducer. The request-driven
/// query-parameter path never raises; it silently ignores unknown names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldSelectionError {
    /// The Meta field list is the "all fields" sentinel, so the selectable
    /// universe cannot be determined.
    #[error("meta fields sentinel '{sentinel}' is not supported by field filtering")]
    UnsupportedSentinel {
        /// The sentinel value found in the Meta configuration.
        sentinel: String,
    },

    /// One or more requested names exist neither among declared fields nor in
    /// the Meta field list.
    #[error("{} do not exist in meta or declared fields of {serializer}", names.join(", "))]
    UnknownFields {
        /// Every offending name from the request, none of the valid ones.
        names: Vec<String>,
        /// Name of the base serializer definition the request was made on.
        serializer: String,
    },
}

impl FieldSelectionError {
    /// Get a stable error code for this error type.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedSentinel { .. } => "UNSUPPORTED_SENTINEL",
            Self::UnknownFields { .. } => "UNKNOWN_FIELDS",
        }
    }
}
