//! # Input Sanitization & Validation
//!
//! This module turns raw user text into typed values. It defines a set of
//! composable validation filters (`Sanitize`) that are applied to the trimmed
//! input. Conversion filters ([`Sanitize::IsType`]) run first and produce a
//! [`ParsedValue`]; constraint filters then run in order and short-circuit on
//! the first failure, returning a friendly message describing what went wrong.
//!
//! ## Features
//! - Type conversion for common Rust primitives via [`DesiredType`]
//! - Exact string matching with [`Sanitize::MatchString`]
//! - Multiple-option matching with [`Sanitize::MatchStrings`]
//! - Inclusive range validation with [`Sanitize::IsBetween`]
//! - Caller-defined checks with [`Sanitize::Satisfies`]
//! - A tagged [`ConversionOutcome`] instead of panics or silent defaults
//!
//! ## Examples
//!
//! ### Validate types
//! ```rust,no_run
//! use askloop::utils::{DesiredType, Sanitize, Terminal};
//!
//! let input = Terminal::ask(
//!     "Enter a boolean (true/false): ",
//!     &[Sanitize::IsType(DesiredType::Bool)],
//! )
//! .unwrap();
//! println!("Accepted: {}", input.value);
//! ```
//!
//! ### Validate numeric range
//! ```rust,no_run
//! use askloop::utils::{DesiredType, Sanitize, Terminal, ValidationRange};
//!
//! let number = Terminal::ask(
//!     "Enter a number between 1 and 10: ",
//!     &[
//!         Sanitize::IsType(DesiredType::I32),
//!         Sanitize::IsBetween(ValidationRange::new(1, 10).unwrap()),
//!     ],
//! )
//! .unwrap();
//! println!("In range: {}", number.value);
//! ```
use crate::utils::range::ValidationRange;
use std::{error::Error, fmt::Display, str::FromStr};

/// Represents a validation filter that can be applied to user input.
///
/// - `MatchString`: ensures that the input matches a specific string.
/// - `MatchStrings`: ensures that the input matches one of the given options.
/// - `IsType`: converts the input into a certain [`DesiredType`].
/// - `IsBetween`: ensures that the converted value is within an inclusive range.
/// - `Satisfies`: ensures that the converted value passes a caller-defined [`Rule`].
pub enum Sanitize {
    MatchString(String),
    MatchStrings(Vec<String>),
    IsType(DesiredType),
    IsBetween(ValidationRange),
    Satisfies(Rule),
}

/// A named predicate over a converted value.
///
/// The message is shown to the user when the predicate returns `false`.
///
/// ```rust
/// use askloop::utils::{ParsedValue, Rule};
///
/// let non_zero = Rule::new("Cannot divide by zero", |v| v.as_f64() != Some(0.0));
/// assert!(!non_zero.check(&ParsedValue::Int(0)));
/// ```
pub struct Rule {
    message: String,
    check: Box<dyn Fn(&ParsedValue) -> bool>,
}

impl Rule {
    pub fn new(message: impl Into<String>, check: impl Fn(&ParsedValue) -> bool + 'static) -> Self {
        Self {
            message: message.into(),
            check: Box::new(check),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn check(&self, value: &ParsedValue) -> bool {
        (self.check)(value)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("message", &self.message).finish()
    }
}

/// Trait for constraint checks on an already converted value.
trait Validate {
    fn validate(&self, input: &str, value: &ParsedValue) -> Result<(), FilterErrorNot>;
}

/// The broad class of a rejected attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "json",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum FailureKind {
    /// The text does not match the target type's grammar.
    Conversion,
    /// The value is outside the [`ValidationRange`].
    Range,
    /// The text is not one of the accepted strings.
    Mismatch,
    /// A [`Rule`] rejected the value.
    Rejected,
}

impl Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Conversion => write!(f, "conversion"),
            Self::Range => write!(f, "range"),
            Self::Mismatch => write!(f, "mismatch"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

/// Represents an error that occurs when input validation fails.
///
/// Each variant describes why the input was rejected:
/// - [`Number`]: could not parse as the expected numeric type.
/// - [`Bool`]: could not parse as boolean.
/// - [`Empty`]: nothing was entered where at least one value is required.
/// - [`Utf8`]: the line is not valid UTF-8 text.
/// - [`Between`]: did not fall between the values given.
/// - [`MatchString`]: did not match the required string.
/// - [`MatchStrings`]: did not match any of the given options.
/// - [`Rule`]: a caller-defined rule rejected the value.
///
/// [`Number`]: FilterErrorNot::Number
/// [`Bool`]: FilterErrorNot::Bool
/// [`Empty`]: FilterErrorNot::Empty
/// [`Utf8`]: FilterErrorNot::Utf8
/// [`Between`]: FilterErrorNot::Between
/// [`MatchString`]: FilterErrorNot::MatchString
/// [`MatchStrings`]: FilterErrorNot::MatchStrings
/// [`Rule`]: FilterErrorNot::Rule
#[derive(Debug, Clone, PartialEq)]
pub enum FilterErrorNot {
    Number(DesiredType),
    Bool(DesiredType),
    Empty,
    Utf8,
    Between(ValidationRange),
    MatchString(String),
    MatchStrings(Vec<String>),
    Rule(String),
}

impl FilterErrorNot {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Number(_) | Self::Bool(_) | Self::Empty | Self::Utf8 => {
                FailureKind::Conversion
            }
            Self::Between(_) => FailureKind::Range,
            Self::MatchString(_) | Self::MatchStrings(_) => FailureKind::Mismatch,
            Self::Rule(_) => FailureKind::Rejected,
        }
    }
}

impl Display for FilterErrorNot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(t) => write!(f, "The value is not a {}, try again!", t),
            Self::Bool(t) => write!(f, "The value is not a {}, try again!", t),
            Self::Empty => write!(f, "The value is empty, try again!"),
            Self::Utf8 => write!(f, "The value is not valid UTF-8 text, try again!"),
            Self::Between(range) => {
                write!(f, "The value is not between {}, try again!", range)
            }
            Self::MatchString(s) => write!(f, "The value doesn't match with {}, try again!", s),
            Self::MatchStrings(v) => write!(
                f,
                "The value doesn't match with the options: {}, try again!",
                v.join(", ")
            ),
            Self::Rule(message) => write!(f, "{}, try again!", message),
        }
    }
}

impl Error for FilterErrorNot {}

/// A typed value produced by a successful conversion.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize), serde(untagged))]
pub enum ParsedValue {
    Text(String),
    Bool(bool),
    Int(i128),
    UInt(u128),
    Float(f64),
}

impl ParsedValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer view, for unsigned values only when they fit.
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Self::Int(n) => Some(*n),
            Self::UInt(n) => i128::try_from(*n).ok(),
            _ => None,
        }
    }

    /// Numeric view of any integer or float value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::UInt(n) => Some(*n as f64),
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }
}

impl Display for ParsedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{}", s),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(n) => write!(f, "{}", n),
            Self::UInt(n) => write!(f, "{}", n),
            Self::Float(n) => write!(f, "{}", n),
        }
    }
}

/// Tagged result of one conversion attempt.
///
/// Every call site has to handle both arms; nothing unwinds and nothing is
/// filled in with a default.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionOutcome<T = ParsedValue> {
    Success(T),
    Failure(FilterErrorNot),
}

impl<T> ConversionOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn into_result(self) -> Result<T, FilterErrorNot> {
        match self {
            Self::Success(v) => Ok(v),
            Self::Failure(e) => Err(e),
        }
    }
}

impl<T> From<ConversionOutcome<T>> for Result<T, FilterErrorNot> {
    fn from(outcome: ConversionOutcome<T>) -> Self {
        outcome.into_result()
    }
}

/// Macro helper that converts an input string into the given Rust type.
/// Expands into a [`ConversionOutcome`].
///
/// # Parameters
/// - `$input`: The input string to parse.
/// - `$t`: The Rust type to parse with (e.g. `u8`, `i32`, `f64`).
/// - `$wide`: The type the parsed value is widened to.
/// - `$variant`: The [`ParsedValue`] constructor.
/// - `$err`: The error to return if parsing fails.
///
/// # Example
/// ```rust,ignore
/// let input = "42";
/// convert_type!(input, u8 => u128, ParsedValue::UInt, FilterErrorNot::Number(DesiredType::U8));
/// ```
#[macro_export]
macro_rules! convert_type {
    ($input:expr, $t:ty => $wide:ty, $variant:path, $err:expr) => {
        match $input.parse::<$t>() {
            Ok(v) => $crate::utils::ConversionOutcome::Success($variant(v as $wide)),
            Err(_) => $crate::utils::ConversionOutcome::Failure($err),
        }
    };
}

impl Sanitize {
    /// Executes all provided filters against the given answer.
    ///
    /// - Trims whitespace before validation.
    /// - Runs the conversion step, then the constraint step.
    /// - Stops and returns the first error encountered.
    pub fn execute(answer: &str, filters: &[Sanitize]) -> ConversionOutcome {
        let clean_answer = answer.trim();

        let value = match Sanitize::convert(clean_answer, filters) {
            ConversionOutcome::Success(v) => v,
            ConversionOutcome::Failure(e) => return ConversionOutcome::Failure(e),
        };

        match Sanitize::check(clean_answer, &value, filters) {
            Ok(_) => ConversionOutcome::Success(value),
            Err(e) => ConversionOutcome::Failure(e),
        }
    }

    /// Runs every [`Sanitize::IsType`] filter; the last one decides the value.
    ///
    /// Without any `IsType`, the value is text, unless an `IsBetween` is present,
    /// in which case the input is read as an `isize`.
    pub(crate) fn convert(input: &str, filters: &[Sanitize]) -> ConversionOutcome {
        let mut value = None;

        for filter in filters {
            if let Sanitize::IsType(ty) = filter {
                match ty.convert(input) {
                    ConversionOutcome::Success(v) => value = Some(v),
                    ConversionOutcome::Failure(e) => return ConversionOutcome::Failure(e),
                }
            }
        }

        match value {
            Some(v) => ConversionOutcome::Success(v),
            None if filters.iter().any(|f| matches!(f, Sanitize::IsBetween(_))) => {
                DesiredType::Isize.convert(input)
            }
            None => ConversionOutcome::Success(ParsedValue::Text(input.to_string())),
        }
    }

    /// Runs every constraint filter in order against a converted value.
    pub(crate) fn check(
        input: &str,
        value: &ParsedValue,
        filters: &[Sanitize],
    ) -> Result<(), FilterErrorNot> {
        for filter in filters {
            filter.validate(input, value)?;
        }
        Ok(())
    }
}

impl Validate for Sanitize {
    fn validate(&self, input: &str, value: &ParsedValue) -> Result<(), FilterErrorNot> {
        match self {
            Sanitize::IsType(_) => Ok(()),
            Sanitize::MatchString(s) => {
                if input == s {
                    Ok(())
                } else {
                    Err(FilterErrorNot::MatchString(s.to_string()))
                }
            }
            Sanitize::MatchStrings(options) => {
                if options.iter().any(|o| o == input) {
                    Ok(())
                } else {
                    Err(FilterErrorNot::MatchStrings(options.clone()))
                }
            }
            Sanitize::IsBetween(range) => {
                if range.contains(value) {
                    Ok(())
                } else {
                    Err(FilterErrorNot::Between(*range))
                }
            }
            Sanitize::Satisfies(rule) => {
                if rule.check(value) {
                    Ok(())
                } else {
                    Err(FilterErrorNot::Rule(rule.message().to_string()))
                }
            }
        }
    }
}

/// Represents the desired type to which the input should be converted.
///
/// Used together with [`Sanitize::IsType`].
///
/// Currently supports:
/// - `String`
/// - `Bool` (`true`/`false`, `yes`/`no`, `y`/`n`, case-insensitive)
/// - Unsigned integers: `U8`, `U16`, `U32`, `U64`, `U128`, `Usize`
/// - Signed integers: `I8`, `I16`, `I32`, `I64`, `I128`, `Isize`
/// - Floating point: `F32`, `F64`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesiredType {
    String,
    Bool,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    F32,
    F64,
}

const DESIRED_TYPES: [DesiredType; 16] = [
    DesiredType::String,
    DesiredType::Bool,
    DesiredType::U8,
    DesiredType::U16,
    DesiredType::U32,
    DesiredType::U64,
    DesiredType::U128,
    DesiredType::Usize,
    DesiredType::I8,
    DesiredType::I16,
    DesiredType::I32,
    DesiredType::I64,
    DesiredType::I128,
    DesiredType::Isize,
    DesiredType::F32,
    DesiredType::F64,
];

/// True when the text itself spells infinity or NaN, e.g. `-inf` or `NaN`.
fn names_non_finite(input: &str) -> bool {
    let name = input.trim_start_matches(['+', '-']).to_ascii_lowercase();
    matches!(name.as_str(), "inf" | "infinity" | "nan")
}

/// Parses a float, rejecting text that only overflows to infinity.
fn convert_float<T>(input: &str, ty: DesiredType) -> ConversionOutcome
where
    T: FromStr + Into<f64>,
{
    match input.parse::<T>().map(Into::into) {
        Ok(v) if v.is_finite() || names_non_finite(input) => {
            ConversionOutcome::Success(ParsedValue::Float(v))
        }
        _ => ConversionOutcome::Failure(FilterErrorNot::Number(ty)),
    }
}

fn parse_bool(input: &str) -> Option<bool> {
    match input.to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" => Some(true),
        "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

impl DesiredType {
    /// Converts the input into a [`ParsedValue`] of this type.
    ///
    /// # Example
    /// ```rust
    /// use askloop::utils::{ConversionOutcome, DesiredType, ParsedValue};
    ///
    /// assert_eq!(
    ///     DesiredType::Bool.convert("yes"),
    ///     ConversionOutcome::Success(ParsedValue::Bool(true))
    /// );
    /// assert!(!DesiredType::U8.convert("256").is_success());
    /// ```
    pub fn convert(&self, input: &str) -> ConversionOutcome {
        match self {
            DesiredType::String => ConversionOutcome::Success(ParsedValue::Text(input.to_string())),
            DesiredType::Bool => match parse_bool(input) {
                Some(b) => ConversionOutcome::Success(ParsedValue::Bool(b)),
                None => ConversionOutcome::Failure(FilterErrorNot::Bool(DesiredType::Bool)),
            },
            DesiredType::U8 => convert_type!(
                input,
                u8 => u128,
                ParsedValue::UInt,
                FilterErrorNot::Number(DesiredType::U8)
            ),
            DesiredType::U16 => convert_type!(
                input,
                u16 => u128,
                ParsedValue::UInt,
                FilterErrorNot::Number(DesiredType::U16)
            ),
            DesiredType::U32 => convert_type!(
                input,
                u32 => u128,
                ParsedValue::UInt,
                FilterErrorNot::Number(DesiredType::U32)
            ),
            DesiredType::U64 => convert_type!(
                input,
                u64 => u128,
                ParsedValue::UInt,
                FilterErrorNot::Number(DesiredType::U64)
            ),
            DesiredType::U128 => convert_type!(
                input,
                u128 => u128,
                ParsedValue::UInt,
                FilterErrorNot::Number(DesiredType::U128)
            ),
            DesiredType::Usize => convert_type!(
                input,
                usize => u128,
                ParsedValue::UInt,
                FilterErrorNot::Number(DesiredType::Usize)
            ),
            DesiredType::I8 => convert_type!(
                input,
                i8 => i128,
                ParsedValue::Int,
                FilterErrorNot::Number(DesiredType::I8)
            ),
            DesiredType::I16 => convert_type!(
                input,
                i16 => i128,
                ParsedValue::Int,
                FilterErrorNot::Number(DesiredType::I16)
            ),
            DesiredType::I32 => convert_type!(
                input,
                i32 => i128,
                ParsedValue::Int,
                FilterErrorNot::Number(DesiredType::I32)
            ),
            DesiredType::I64 => convert_type!(
                input,
                i64 => i128,
                ParsedValue::Int,
                FilterErrorNot::Number(DesiredType::I64)
            ),
            DesiredType::I128 => convert_type!(
                input,
                i128 => i128,
                ParsedValue::Int,
                FilterErrorNot::Number(DesiredType::I128)
            ),
            DesiredType::Isize => convert_type!(
                input,
                isize => i128,
                ParsedValue::Int,
                FilterErrorNot::Number(DesiredType::Isize)
            ),
            DesiredType::F32 => convert_float::<f32>(input, DesiredType::F32),
            DesiredType::F64 => convert_float::<f64>(input, DesiredType::F64),
        }
    }
}

impl Display for DesiredType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Bool => write!(f, "bool"),
            Self::U8 => write!(f, "u8"),
            Self::U16 => write!(f, "u16"),
            Self::U32 => write!(f, "u32"),
            Self::U64 => write!(f, "u64"),
            Self::U128 => write!(f, "u128"),
            Self::Usize => write!(f, "usize"),
            Self::I8 => write!(f, "i8"),
            Self::I16 => write!(f, "i16"),
            Self::I32 => write!(f, "i32"),
            Self::I64 => write!(f, "i64"),
            Self::I128 => write!(f, "i128"),
            Self::Isize => write!(f, "isize"),
            Self::F32 => write!(f, "f32"),
            Self::F64 => write!(f, "f64"),
        }
    }
}

/// Parses the names printed by `Display` (`"u8"`, `"f64"`, `"bool"`...).
impl FromStr for DesiredType {
    type Err = FilterErrorNot;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        DESIRED_TYPES
            .iter()
            .find(|t| t.to_string() == name)
            .copied()
            .ok_or_else(|| {
                FilterErrorNot::MatchStrings(DESIRED_TYPES.iter().map(|t| t.to_string()).collect())
            })
    }
}
