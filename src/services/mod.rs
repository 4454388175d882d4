pub mod tracking;
pub mod trips;
pub mod users;

use crate::error::AppError;

pub use tracking::TrackingService;
pub use trips::TripService;
pub use users::UserService;

/// Trims `input` and rejects it when nothing is left.
pub(crate) fn require_text(input: Option<String>, field: &str) -> Result<String, AppError> {
    normalize_optional(input).ok_or_else(|| AppError::validation(format!("{field} is required")))
}

pub(crate) fn normalize_optional(input: Option<String>) -> Option<String> {
    input.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

pub(crate) fn check_range(value: f64, min: f64, max: f64, field: &str) -> Result<(), AppError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "{field} must be between {min} and {max}"
        )))
    }
}

pub(crate) fn check_non_negative(value: f64, field: &str) -> Result<(), AppError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(AppError::validation(format!("{field} must be >= 0")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_rejected() {
        assert!(matches!(
            require_text(Some("   ".into()), "title"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            require_text(None, "title"),
            Err(AppError::Validation(_))
        ));
        assert_eq!(
            require_text(Some("  Alps ".into()), "title").unwrap(),
            "Alps"
        );
    }

    #[test]
    fn ranges_are_inclusive_and_reject_nan() {
        assert!(check_range(90.0, -90.0, 90.0, "latitude").is_ok());
        assert!(check_range(-90.0, -90.0, 90.0, "latitude").is_ok());
        assert!(check_range(90.5, -90.0, 90.0, "latitude").is_err());
        assert!(check_range(f64::NAN, -90.0, 90.0, "latitude").is_err());
        assert!(check_non_negative(0.0, "total_distance").is_ok());
        assert!(check_non_negative(-0.1, "total_distance").is_err());
    }
}
