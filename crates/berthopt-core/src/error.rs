use thiserror::Error;

/// A malformed configuration: missing field, unknown enum variant, or a
/// value out of its documented range. Always carries the dotted path of the
/// offending field so the hosting application can point at it directly.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("{field}: unrecognized value {value:?}")]
    UnknownVariant { field: String, value: String },

    #[error("{field}: {reason}")]
    OutOfRange { field: String, reason: String },

    #[error("{field}: unrecognized rule toggle {name:?}")]
    UnknownRuleToggle { field: String, name: String },
}
