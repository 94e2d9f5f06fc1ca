//! # Diagnostics
//!
//! Every rejected attempt of the input loop produces one [`DiagnosticRecord`].
//! A [`DiagnosticFormatter`] turns it into the single line written to the sink.
//!
//! - [`PlainFormatter`]: the human readable message (default).
//! - [`JsonFormatter`]: one JSON object per line (`json` feature).
//!
//! ```rust
//! use askloop::report::{DiagnosticFormatter, DiagnosticRecord, PlainFormatter};
//! use askloop::utils::{DesiredType, FilterErrorNot};
//!
//! let record = DiagnosticRecord::new(1, "abc", &FilterErrorNot::Number(DesiredType::I64));
//! assert_eq!(PlainFormatter.format(&record), "The value is not a i64, try again!");
//! ```
pub mod formatter;
pub use formatter::{DiagnosticFormatter, DiagnosticRecord, PlainFormatter};

cfg_if::cfg_if! {
    if #[cfg(feature = "json")] {
        pub use formatter::JsonFormatter;
    }
}
