//! # Validation Ranges
//!
//! An inclusive `[lower, upper]` bound pair used by [`Sanitize::IsBetween`].
//!
//! Bounds are either integers or floats ([`Bound`]). Integer values are compared
//! against integer bounds exactly, so `i128::MAX` or `u128::MAX` never lose
//! precision. Any comparison that involves a float goes through `f64`.
//!
//! ```rust
//! use askloop::utils::{ParsedValue, ValidationRange};
//!
//! let age = ValidationRange::new(0, 120).unwrap();
//! assert!(age.contains(&ParsedValue::Int(45)));
//! assert!(!age.contains(&ParsedValue::Int(-5)));
//! ```
//!
//! [`Sanitize::IsBetween`]: crate::utils::Sanitize::IsBetween
use crate::utils::sanitize::{DesiredType, FilterErrorNot, ParsedValue};
use crate::utils::terminal::TerminalErrors;
use std::{cmp::Ordering, fmt::Display, str::FromStr};

/// One end of a [`ValidationRange`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Int(i128),
    Float(f64),
}

macro_rules! bound_from {
    ($variant:ident, $target:ty, $($t:ty),+) => {
        $(
            impl From<$t> for Bound {
                fn from(value: $t) -> Self {
                    Bound::$variant(value as $target)
                }
            }
        )+
    };
}

bound_from!(Int, i128, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);
bound_from!(Float, f64, f32, f64);

impl Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{}", n),
            Self::Float(n) => write!(f, "{}", n),
        }
    }
}

/// Parses `"42"` as [`Bound::Int`] and `"4.2"` / `"1e3"` as [`Bound::Float`].
impl FromStr for Bound {
    type Err = FilterErrorNot;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(n) = s.parse::<i128>() {
            return Ok(Bound::Int(n));
        }
        match s.parse::<f64>() {
            Ok(n) if !n.is_nan() => Ok(Bound::Float(n)),
            _ => Err(FilterErrorNot::Number(DesiredType::F64)),
        }
    }
}

impl Bound {
    pub fn is_nan(&self) -> bool {
        matches!(self, Bound::Float(n) if n.is_nan())
    }

    fn partial_cmp_bound(&self, other: &Bound) -> Option<Ordering> {
        match (self, other) {
            (Bound::Int(a), Bound::Int(b)) => Some(a.cmp(b)),
            (Bound::Int(a), Bound::Float(b)) => (*a as f64).partial_cmp(b),
            (Bound::Float(a), Bound::Int(b)) => a.partial_cmp(&(*b as f64)),
            (Bound::Float(a), Bound::Float(b)) => a.partial_cmp(b),
        }
    }
}

/// Orders a parsed value against a bound.
///
/// Returns `None` for non-numeric values and for NaN.
fn compare(value: &ParsedValue, bound: &Bound) -> Option<Ordering> {
    match (value, bound) {
        (ParsedValue::Int(v), Bound::Int(b)) => Some(v.cmp(b)),
        (ParsedValue::UInt(v), Bound::Int(b)) => {
            if *b < 0 || *v > i128::MAX as u128 {
                Some(Ordering::Greater)
            } else {
                Some((*v as i128).cmp(b))
            }
        }
        (ParsedValue::Int(v), Bound::Float(b)) => (*v as f64).partial_cmp(b),
        (ParsedValue::UInt(v), Bound::Float(b)) => (*v as f64).partial_cmp(b),
        (ParsedValue::Float(v), Bound::Int(b)) => v.partial_cmp(&(*b as f64)),
        (ParsedValue::Float(v), Bound::Float(b)) => v.partial_cmp(b),
        (ParsedValue::Text(_), _) | (ParsedValue::Bool(_), _) => None,
    }
}

/// Inclusive numeric range `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationRange {
    lower: Bound,
    upper: Bound,
}

impl ValidationRange {
    /// Creates a range, rejecting `lower > upper` and NaN bounds.
    pub fn new(
        lower: impl Into<Bound>,
        upper: impl Into<Bound>,
    ) -> Result<ValidationRange, TerminalErrors> {
        let lower = lower.into();
        let upper = upper.into();

        match lower.partial_cmp_bound(&upper) {
            Some(Ordering::Less) | Some(Ordering::Equal) => Ok(ValidationRange { lower, upper }),
            _ => Err(TerminalErrors::InvalidRange { lower, upper }),
        }
    }

    pub fn lower(&self) -> Bound {
        self.lower
    }

    pub fn upper(&self) -> Bound {
        self.upper
    }

    /// True when `value` is numeric and `lower <= value <= upper`.
    pub fn contains(&self, value: &ParsedValue) -> bool {
        matches!(
            compare(value, &self.lower),
            Some(Ordering::Greater) | Some(Ordering::Equal)
        ) && matches!(
            compare(value, &self.upper),
            Some(Ordering::Less) | Some(Ordering::Equal)
        )
    }
}

impl Display for ValidationRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} and {}", self.lower, self.upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_contains_is_inclusive() {
        let range = ValidationRange::new(0, 100).unwrap();
        assert!(range.contains(&ParsedValue::Int(0)));
        assert!(range.contains(&ParsedValue::Int(100)));
        assert!(range.contains(&ParsedValue::UInt(99)));
        assert!(!range.contains(&ParsedValue::Int(-1)));
        assert!(!range.contains(&ParsedValue::Int(101)));
    }

    #[test]
    fn test_range_rejects_inverted_bounds() {
        let res = ValidationRange::new(10, 1);
        assert!(matches!(res, Err(TerminalErrors::InvalidRange { .. })));

        let res = ValidationRange::new(0.0, f64::NAN);
        assert!(res.is_err());
    }

    #[test]
    fn test_range_huge_unsigned_is_above_any_int_bound() {
        let range = ValidationRange::new(i128::MIN, i128::MAX).unwrap();
        assert!(!range.contains(&ParsedValue::UInt(u128::MAX)));
        assert!(range.contains(&ParsedValue::UInt(i128::MAX as u128)));
    }

    #[test]
    fn test_range_mixed_float_and_int() {
        let range = ValidationRange::new(0, 1.5).unwrap();
        assert!(range.contains(&ParsedValue::Float(1.5)));
        assert!(range.contains(&ParsedValue::Int(1)));
        assert!(!range.contains(&ParsedValue::Int(2)));
        assert!(!range.contains(&ParsedValue::Float(f64::NAN)));
    }

    #[test]
    fn test_range_never_contains_text_or_bool() {
        let range = ValidationRange::new(0, 1).unwrap();
        assert!(!range.contains(&ParsedValue::Bool(true)));
        assert!(!range.contains(&ParsedValue::Text("1".to_string())));
    }

    #[test]
    fn test_range_display() {
        let range = ValidationRange::new(0, 120).unwrap();
        assert_eq!(format!("{}", range), "0 and 120");

        let range = ValidationRange::new(-0.5, 2.25).unwrap();
        assert_eq!(format!("{}", range), "-0.5 and 2.25");
    }

    #[test]
    fn test_bound_from_str() {
        assert_eq!("42".parse::<Bound>().unwrap(), Bound::Int(42));
        assert_eq!("-7".parse::<Bound>().unwrap(), Bound::Int(-7));
        assert_eq!("2.5".parse::<Bound>().unwrap(), Bound::Float(2.5));
        assert!("abc".parse::<Bound>().is_err());
        assert!("NaN".parse::<Bound>().is_err());
    }
}
