//! Inclusive numeric bounds for validated columns.

use serde::{Deserialize, Serialize};

use crate::errors::CleaningError;

/// Inclusive `[min, max]` range. `None` leaves that side unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Bounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Reject NaN bounds and inverted or empty ranges (`min >= max`).
    pub fn validate(&self, column: &str) -> Result<(), CleaningError> {
        if self.min.is_some_and(f64::is_nan) || self.max.is_some_and(f64::is_nan) {
            return Err(CleaningError::NanBound {
                column: column.to_string(),
            });
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min >= max {
                return Err(CleaningError::InvalidBounds {
                    column: column.to_string(),
                    min,
                    max,
                });
            }
        }
        Ok(())
    }

    /// Whether `value` lies within the range, ends included.
    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |lo| value >= lo) && self.max.map_or(true, |hi| value <= hi)
    }

    /// Nearest value to `value` inside the range.
    pub fn clamp(&self, value: f64) -> f64 {
        let value = self.min.map_or(value, |lo| value.max(lo));
        self.max.map_or(value, |hi| value.min(hi))
    }

    /// Midpoint of a fully bounded range; `None` if either side is open.
    pub fn midpoint(&self) -> Option<f64> {
        match (self.min, self.max) {
            (Some(lo), Some(hi)) if lo.is_finite() && hi.is_finite() => Some((lo + hi) / 2.0),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inclusive_contains() {
        let b = Bounds::new(18.0, 90.0);
        assert!(b.contains(18.0));
        assert!(b.contains(90.0));
        assert!(!b.contains(17.999));
        assert!(!b.contains(150.0));
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        assert!(Bounds::new(90.0, 18.0).validate("age").is_err());
        assert!(Bounds::new(18.0, 18.0).validate("age").is_err());
        assert!(Bounds::new(f64::NAN, 18.0).validate("age").is_err());
        assert!(Bounds { min: Some(5.0), max: None }.validate("age").is_ok());
    }

    #[test]
    fn test_clamp() {
        let b = Bounds::new(18.2, 18.8);
        assert_eq!(b.clamp(18.0), 18.2);
        assert_eq!(b.clamp(19.0), 18.8);
        assert_eq!(b.clamp(18.5), 18.5);
        assert_eq!(Bounds::unbounded().clamp(-3.0), -3.0);
    }

    #[test]
    fn test_midpoint() {
        assert_eq!(Bounds::new(18.0, 90.0).midpoint(), Some(54.0));
        assert_eq!(Bounds { min: Some(18.0), max: None }.midpoint(), None);
    }
}
