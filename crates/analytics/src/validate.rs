//! Field-level checks shared by the analyzers.

use menuwise_core::{DomainError, DomainResult};

/// Money amounts and quantities must be finite and `>= 0`.
pub(crate) fn non_negative(field: &str, value: f64) -> DomainResult<()> {
    if !value.is_finite() {
        return Err(DomainError::validation(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(DomainError::validation(
            field,
            format!("cannot be negative (got {value})"),
        ));
    }
    Ok(())
}

/// Derived metrics must stay representable; huge or tiny inputs can overflow.
pub(crate) fn finite(field: &str, value: f64) -> DomainResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DomainError::validation(
            field,
            format!("overflows to {value}; check the input magnitudes"),
        ))
    }
}
