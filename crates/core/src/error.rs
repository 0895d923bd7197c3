//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Analytics are pure computations, so the only failures are malformed or
/// out-of-domain inputs. Errors are always local to one record; `field` carries
/// the full path of the offending value (e.g. `menu_items[2].price`).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. negative usage, non-numeric price).
    #[error("validation failed for `{field}`: {reason}")]
    Validation { field: String, reason: String },

    /// A tool call named an analysis that does not exist.
    #[error("unknown analysis tool: {0}")]
    UnknownTool(String),

    /// A result could not be encoded for the caller.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }

    /// Path of the offending field, if this is a validation failure.
    pub fn field(&self) -> Option<&str> {
        match self {
            DomainError::Validation { field, .. } => Some(field),
            DomainError::UnknownTool(_) | DomainError::Internal(_) => None,
        }
    }

    /// Prefix the field path with the collection slot the record came from.
    ///
    /// `price` becomes `menu_items[2].price`; an empty field names the record itself.
    pub fn at(self, collection: &str, index: usize) -> Self {
        match self {
            DomainError::Validation { field, reason } => DomainError::Validation {
                field: if field.is_empty() {
                    format!("{collection}[{index}]")
                } else {
                    format!("{collection}[{index}].{field}")
                },
                reason,
            },
            other => other,
        }
    }
}
