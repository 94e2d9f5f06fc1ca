use crate::utils::{FailureKind, FilterErrorNot};

/// Trait for formatting rejected attempts.
///
/// A `DiagnosticFormatter` defines how a [`DiagnosticRecord`] becomes the
/// line shown to the user. The returned string must not contain a newline.
pub trait DiagnosticFormatter {
    fn format(&self, record: &DiagnosticRecord) -> String;

    /// When true, the pending prompt line is ended before the diagnostic is
    /// written, so every diagnostic sits on a line of its own.
    fn own_line(&self) -> bool {
        false
    }
}

/// One rejected attempt.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct DiagnosticRecord {
    /// 1-based number of the attempt that was rejected.
    pub attempt: usize,
    pub kind: FailureKind,
    /// The cleaned input that was rejected.
    pub input: String,
    pub message: String,
}

impl DiagnosticRecord {
    pub fn new(attempt: usize, input: &str, error: &FilterErrorNot) -> Self {
        Self {
            attempt,
            kind: error.kind(),
            input: input.to_string(),
            message: error.to_string(),
        }
    }
}

/// Formats rejections as their human readable message.
pub struct PlainFormatter;

impl DiagnosticFormatter for PlainFormatter {
    fn format(&self, record: &DiagnosticRecord) -> String {
        record.message.clone()
    }
}

impl Default for PlainFormatter {
    fn default() -> Self {
        Self
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "json")] {
        /// Formats rejections as JSON strings.
        pub struct JsonFormatter;

        impl DiagnosticFormatter for JsonFormatter {
            fn format(&self, record: &DiagnosticRecord) -> String {
                serde_json::to_string(record).unwrap_or_else(|_| record.message.clone())
            }

            fn own_line(&self) -> bool {
                true
            }
        }

        impl Default for JsonFormatter {
            fn default() -> Self {
                Self
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ValidationRange;

    #[test]
    fn test_plain_formatter_is_message() {
        let range = ValidationRange::new(0, 120).unwrap();
        let record = DiagnosticRecord::new(2, "-5", &FilterErrorNot::Between(range));

        assert_eq!(record.kind, FailureKind::Range);
        assert_eq!(
            PlainFormatter.format(&record),
            "The value is not between 0 and 120, try again!"
        );
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_formatter_round_trips_record() {
        use crate::utils::DesiredType;

        let record = DiagnosticRecord::new(1, "abc", &FilterErrorNot::Number(DesiredType::I64));
        let line = JsonFormatter.format(&record);

        assert!(!line.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["kind"], "conversion");
        assert_eq!(value["attempt"], 1);
        assert_eq!(value["input"], "abc");

        let back: DiagnosticRecord = serde_json::from_str(&line).unwrap();
        assert_eq!(back, record);
    }
}
