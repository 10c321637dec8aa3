//! Scalar cell values and numeric coercion.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single table cell.
///
/// Serialized untagged, so a JSON row like `{"age": 41, "state": "NY",
/// "premium": null}` maps straight onto `Number`, `Text`, and `Missing`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Missing,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Value {
    /// Coerce to a finite float.
    ///
    /// Text is trimmed and parsed; anything that fails to parse, and any
    /// non-finite number, becomes `None`. Coercion never errors.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(*n),
            Self::Number(_) | Self::Missing => None,
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }

    /// Grouping key for a categorical cell. `None` for missing cells.
    ///
    /// Keys keep the cell's variant, so `Text("3")` and `Number(3.0)` fall
    /// in different groups.
    pub fn category_key(&self) -> Option<CategoryKey> {
        match self {
            Self::Missing => None,
            Self::Number(n) if n.is_nan() => None,
            Self::Number(n) if *n == 0.0 => Some(CategoryKey::Number(0.0_f64.to_bits())),
            Self::Number(n) => Some(CategoryKey::Number(n.to_bits())),
            Self::Bool(b) => Some(CategoryKey::Bool(*b)),
            Self::Text(s) => Some(CategoryKey::Text(s.clone())),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

/// Hashable identity of a non-missing categorical cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CategoryKey {
    Bool(bool),
    /// Bit pattern of the number, with `-0.0` folded into `0.0`.
    Number(u64),
    Text(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Option<f64>> for Value {
    fn from(n: Option<f64>) -> Self {
        n.map_or(Self::Missing, Self::Number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_coercion() {
        assert_eq!(Value::from(" 42.5 ").as_f64(), Some(42.5));
        assert_eq!(Value::from("1e3").as_f64(), Some(1000.0));
        assert_eq!(Value::from("n/a").as_f64(), None);
        assert_eq!(Value::from("").as_f64(), None);
        assert_eq!(Value::from("inf").as_f64(), None);
    }

    #[test]
    fn test_non_finite_numbers_are_missing() {
        assert_eq!(Value::Number(f64::NAN).as_f64(), None);
        assert_eq!(Value::Number(f64::INFINITY).as_f64(), None);
        assert_eq!(Value::Missing.as_f64(), None);
    }

    #[test]
    fn test_category_key() {
        assert_eq!(
            Value::from("Auto").category_key(),
            Some(CategoryKey::Text("Auto".to_string()))
        );
        assert_eq!(Value::Number(-0.0).category_key(), Value::Number(0.0).category_key());
        assert_eq!(Value::Missing.category_key(), None);
        assert_eq!(Value::Number(f64::NAN).category_key(), None);
    }

    #[test]
    fn test_category_key_keeps_variants_apart() {
        assert_ne!(Value::from("3").category_key(), Value::Number(3.0).category_key());
        assert_ne!(Value::from("true").category_key(), Value::Bool(true).category_key());
    }
}
