//! Boundary checks applied before engine inputs are accepted from callers.

/// Rejected caller input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("{field} must be a finite, non-negative number (found {value})")]
    InvalidAmount { field: &'static str, value: f64 },
    #[error("{field} must be greater than zero")]
    ZeroAmount { field: &'static str },
    #[error("{field} must not be empty")]
    Missing { field: &'static str },
}

/// Finite and zero or above.
pub fn non_negative(field: &'static str, value: f64) -> Result<(), InputError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(InputError::InvalidAmount { field, value })
    }
}

pub(crate) fn positive(field: &'static str, value: f64) -> Result<(), InputError> {
    non_negative(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(InputError::ZeroAmount { field })
    }
}

pub(crate) fn present(field: &'static str, value: &str) -> Result<(), InputError> {
    if value.trim().is_empty() {
        Err(InputError::Missing { field })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_and_non_finite_amounts() {
        assert!(non_negative("list_price", 0.0).is_ok());
        assert_eq!(
            non_negative("list_price", -1.0),
            Err(InputError::InvalidAmount {
                field: "list_price",
                value: -1.0
            })
        );
        assert!(non_negative("arv", f64::NAN).is_err());
        assert!(non_negative("arv", f64::INFINITY).is_err());
    }

    #[test]
    fn positive_requires_non_zero() {
        assert_eq!(
            positive("purchase_price", 0.0),
            Err(InputError::ZeroAmount {
                field: "purchase_price"
            })
        );
        assert!(present("address", "  ").is_err());
    }
}
