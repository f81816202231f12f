//! Error types for annotation-driven environment parsing

/// Errors that can occur while populating a record from the environment.
///
/// Every variant is terminal for the current populate pass: the first field
/// that fails aborts the pass and the error is returned to the caller
/// unchanged. The library performs no retries and no logging; surfacing
/// failures is the host's responsibility.
#[derive(Debug, thiserror::Error)]
pub enum EnvParseError {
    /// Target environment variable is not set.
    ///
    /// A variable explicitly set to the empty string reports as missing as
    /// well; the two cases are indistinguishable by design.
    #[error("unable to find env var {name}")]
    Missing {
        /// Name of the missing environment variable
        name: String,
    },

    /// Environment variable text could not be converted to the field's
    /// declared type.
    ///
    /// Covers malformed literals as well as in-grammar values that fall
    /// outside the field's numeric range.
    #[error("failed to parse {value:?} for field '{field}': {message}")]
    Conversion {
        /// Name of the field being bound
        field: String,
        /// Raw environment variable text that failed to convert
        value: String,
        /// Message from the underlying parse failure
        message: String,
    },

    /// A directive referenced a transformer name with no registration.
    #[error("parser not found: {name}")]
    ParserNotFound {
        /// The unregistered transformer name
        name: String,
    },

    /// The field's declared type has no conversion routine.
    #[error("no registered set method for type")]
    UnsupportedType {
        /// Name of the field with the unsupported type
        field: String,
    },

    /// The host architecture is not in the known width table.
    ///
    /// Raised when a field uses a platform-native integer width and the
    /// architecture identifier cannot be resolved to 32 or 64 bits.
    #[error("unknown architecture: {arch}")]
    UnknownArchitecture {
        /// The unrecognized architecture identifier
        arch: String,
    },

    /// A transformer produced a value whose type does not match the field.
    #[error("parsed value does not match the type of field '{field}'")]
    TypeMismatch {
        /// Name of the field the value was destined for
        field: String,
    },
}

impl EnvParseError {
    /// Create a conversion error (used by the field binder)
    pub(crate) fn conversion(
        field: &str,
        value: &str,
        message: impl std::fmt::Display,
    ) -> Self {
        Self::Conversion {
            field: field.to_string(),
            value: value.to_string(),
            message: message.to_string(),
        }
    }
}
