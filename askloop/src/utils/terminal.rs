//! # Terminal Input Helper
//!
//! This module drives the validated input loop. It repeatedly prompts until
//! the input satisfies the provided [`Sanitize`] filters, reporting one
//! diagnostic line per rejected attempt.
//!
//! ## Features
//! - Re-prompts on conversion, range, mismatch and rule failures.
//! - Optional retry bound ([`PromptOptions::max_retries`]).
//! - Optional default answer for blank lines ([`PromptOptions::default_answer`]).
//! - Any [`BufRead`] works as a [`TextSource`], any [`Write`] as a sink.
//! - A line that is not valid UTF-8 is rejected like any other bad answer.
//! - End-of-stream is reported as [`TerminalErrors::StreamExhausted`], never retried.
//!
//! ## Loop states
//!
//! ```text
//! Prompting --read--> Converting --ok--> RangeChecking --ok--> Accepted
//!     ^                   |                   |
//!     |                 fail                fail
//!     |                   v                   v
//!     +---------------- Retrying  <-----------+----> Exhausted (retry bound hit)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use askloop::utils::{Console, DesiredType, ParsedValue, Sanitize, ValidationRange};
//! use std::io::Cursor;
//!
//! let input = Cursor::new("abc\n-5\n45\n");
//! let mut console = Console::new(input, Vec::new());
//!
//! let age = console
//!     .ask(
//!         "Enter your age: ",
//!         &[
//!             Sanitize::IsType(DesiredType::I64),
//!             Sanitize::IsBetween(ValidationRange::new(0, 120).unwrap()),
//!         ],
//!     )
//!     .unwrap();
//!
//! assert_eq!(age.value, ParsedValue::Int(45));
//! assert_eq!(age.attempts, 3);
//! ```
use crate::report::{DiagnosticFormatter, DiagnosticRecord, PlainFormatter};
use crate::utils::range::Bound;
use crate::utils::sanitize::{ConversionOutcome, FilterErrorNot, ParsedValue, Sanitize};
use std::{
    error::Error,
    fmt::Display,
    io::{self, BufRead, Write},
};

/// Line-oriented, blocking text input.
///
/// Lines are handed over as raw bytes; decoding happens in the loop so that
/// a line with invalid UTF-8 costs one attempt instead of the whole loop.
/// `Ok(None)` means the source is exhausted.
pub trait TextSource {
    fn next_line(&mut self) -> io::Result<Option<Vec<u8>>>;
}

impl<R: BufRead> TextSource for R {
    fn next_line(&mut self) -> io::Result<Option<Vec<u8>>> {
        let mut line = Vec::new();

        match self.read_until(b'\n', &mut line)? {
            0 => Ok(None),
            _ => Ok(Some(line)),
        }
    }
}

/// Configuration of the input loop.
///
/// # Defaults
/// ```rust,ignore
/// PromptOptions {
///     max_retries: None,
///     default_answer: None,
/// }
/// ```
#[derive(Clone, Debug)]
pub struct PromptOptions {
    /// Retries allowed after the first attempt. `None` retries forever.
    pub max_retries: Option<usize>,
    /// Raw text used in place of a blank line. It still goes through every filter.
    pub default_answer: Option<String>,
}

impl Default for PromptOptions {
    fn default() -> Self {
        Self {
            max_retries: None,
            default_answer: None,
        }
    }
}

/// Errors that end the loop without an accepted value.
#[derive(Debug)]
pub enum TerminalErrors {
    /// The source reached end-of-stream before a value was accepted.
    StreamExhausted { attempts: usize },
    /// Every allowed attempt was rejected.
    RetriesExhausted {
        attempts: usize,
        last: FilterErrorNot,
    },
    /// Reading the source or writing the sink failed.
    Io(io::Error),
    /// A [`ValidationRange`](crate::utils::ValidationRange) with `lower > upper`.
    InvalidRange { lower: Bound, upper: Bound },
}

impl Display for TerminalErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StreamExhausted { attempts } => write!(
                f,
                "Input closed after {} attempt(s) without a valid answer",
                attempts
            ),
            Self::RetriesExhausted { attempts, last } => write!(
                f,
                "No valid answer after {} attempts => last failure: {}",
                attempts,
                last.kind()
            ),
            Self::Io(e) => write!(f, "Console I/O failed => {}", e),
            Self::InvalidRange { lower, upper } if lower.is_nan() || upper.is_nan() => write!(
                f,
                "Invalid range => bounds must be numbers, got {} and {}",
                lower, upper
            ),
            Self::InvalidRange { lower, upper } => write!(
                f,
                "Invalid range => lower bound {} is greater than upper bound {}",
                lower, upper
            ),
        }
    }
}

impl Error for TerminalErrors {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::RetriesExhausted { last, .. } => Some(last),
            _ => None,
        }
    }
}

impl From<io::Error> for TerminalErrors {
    fn from(value: io::Error) -> Self {
        TerminalErrors::Io(value)
    }
}

/// The states of one run of the loop.
///
/// `T` is the value being produced: a [`ParsedValue`] for [`Console::ask`],
/// a `Vec<ParsedValue>` for [`Console::ask_many`].
#[derive(Debug, Clone, PartialEq)]
pub enum LoopState<T = ParsedValue> {
    Prompting,
    /// Holds the cleaned input line.
    Converting(String),
    RangeChecking(String, T),
    Accepted(String, T),
    Retrying(FilterErrorNot),
    Exhausted(FilterErrorNot),
}

impl<T> LoopState<T> {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Accepted(..) | Self::Exhausted(_))
    }
}

/// The two steps applied to every line: conversion, then constraint checks.
trait Stages {
    type Value;

    fn convert(&self, input: &str) -> ConversionOutcome<Self::Value>;
    fn check(&self, input: &str, value: &Self::Value) -> Result<(), FilterErrorNot>;
}

/// A single value per line.
struct Single<'a>(&'a [Sanitize]);

impl Stages for Single<'_> {
    type Value = ParsedValue;

    fn convert(&self, input: &str) -> ConversionOutcome {
        Sanitize::convert(input, self.0)
    }

    fn check(&self, input: &str, value: &ParsedValue) -> Result<(), FilterErrorNot> {
        Sanitize::check(input, value, self.0)
    }
}

/// Whitespace separated values on one line, every token through the same filters.
struct Many<'a>(&'a [Sanitize]);

impl Stages for Many<'_> {
    type Value = Vec<ParsedValue>;

    fn convert(&self, input: &str) -> ConversionOutcome<Vec<ParsedValue>> {
        let mut values = Vec::new();

        for token in input.split_whitespace() {
            match Sanitize::convert(token, self.0) {
                ConversionOutcome::Success(v) => values.push(v),
                ConversionOutcome::Failure(e) => return ConversionOutcome::Failure(e),
            }
        }

        if values.is_empty() {
            ConversionOutcome::Failure(FilterErrorNot::Empty)
        } else {
            ConversionOutcome::Success(values)
        }
    }

    fn check(&self, input: &str, values: &Vec<ParsedValue>) -> Result<(), FilterErrorNot> {
        for (token, value) in input.split_whitespace().zip(values) {
            Sanitize::check(token, value, self.0)?;
        }
        Ok(())
    }
}

/// An accepted answer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Terminal {
    /// The cleaned text the value was converted from.
    pub answer: String,
    pub value: ParsedValue,
    /// Lines read until the answer was accepted.
    pub attempts: usize,
}

/// Several values accepted from one line, see [`Console::ask_many`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Answers {
    pub answer: String,
    pub values: Vec<ParsedValue>,
    pub attempts: usize,
}

impl Terminal {
    /// Prints a question to stdout and loops until a valid answer is read from stdin.
    ///
    /// Uses [`PromptOptions::default`] and plain diagnostics.
    pub fn ask(question: &str, filters: &[Sanitize]) -> Result<Terminal, TerminalErrors> {
        Terminal::ask_with_options(question, filters, PromptOptions::default())
    }

    /// Same as [`Terminal::ask`] with custom [`PromptOptions`].
    pub fn ask_with_options(
        question: &str,
        filters: &[Sanitize],
        options: PromptOptions,
    ) -> Result<Terminal, TerminalErrors> {
        let stdin = io::stdin();
        let mut console = Console::new(stdin.lock(), io::stdout()).with_options(options);
        console.ask(question, filters)
    }
}

/// Owns the text source, the sink, the diagnostic formatter and the options.
///
/// Every call to [`Console::ask`] starts from scratch; nothing carries over
/// between calls.
pub struct Console<S, W, F = PlainFormatter>
where
    S: TextSource,
    W: Write,
    F: DiagnosticFormatter,
{
    /// Configuration options controlling the loop.
    pub options: PromptOptions,
    source: S,
    sink: W,
    formatter: F,
}

impl<S, W> Console<S, W, PlainFormatter>
where
    S: TextSource,
    W: Write,
{
    /// Creates a console with default options and plain diagnostics.
    pub fn new(source: S, sink: W) -> Self {
        Self {
            options: PromptOptions::default(),
            source,
            sink,
            formatter: PlainFormatter,
        }
    }
}

impl<S, W, F> Console<S, W, F>
where
    S: TextSource,
    W: Write,
    F: DiagnosticFormatter,
{
    /// Sets custom configuration of the [`Console`].
    pub fn with_options(mut self, options: PromptOptions) -> Self {
        self.options = options;
        self
    }

    /// Replaces the diagnostic formatter.
    pub fn with_formatter<G: DiagnosticFormatter>(self, formatter: G) -> Console<S, W, G> {
        Console {
            options: self.options,
            source: self.source,
            sink: self.sink,
            formatter,
        }
    }

    pub fn sink(&self) -> &W {
        &self.sink
    }

    pub fn into_parts(self) -> (S, W) {
        (self.source, self.sink)
    }

    /// Asks until one line passes every filter.
    pub fn ask(&mut self, question: &str, filters: &[Sanitize]) -> Result<Terminal, TerminalErrors> {
        let (answer, value, attempts) = self.run(question, &Single(filters))?;

        Ok(Terminal {
            answer,
            value,
            attempts,
        })
    }

    /// Asks until one line of whitespace separated values passes every filter.
    ///
    /// Each token is converted and checked on its own; one bad token rejects
    /// the whole line. A blank line is rejected with [`FilterErrorNot::Empty`].
    pub fn ask_many(
        &mut self,
        question: &str,
        filters: &[Sanitize],
    ) -> Result<Answers, TerminalErrors> {
        let (answer, values, attempts) = self.run(question, &Many(filters))?;

        Ok(Answers {
            answer,
            values,
            attempts,
        })
    }

    fn run<T>(
        &mut self,
        question: &str,
        stages: &impl Stages<Value = T>,
    ) -> Result<(String, T, usize), TerminalErrors> {
        let mut attempts = 0;
        let mut state = LoopState::Prompting;

        loop {
            state = match state {
                LoopState::Prompting => {
                    write!(self.sink, "{}", question)?;
                    self.sink.flush()?;

                    let Some(bytes) = self.source.next_line()? else {
                        return Err(TerminalErrors::StreamExhausted { attempts });
                    };
                    attempts += 1;

                    match String::from_utf8(bytes) {
                        Ok(line) => LoopState::Converting(self.clean(&line)),
                        Err(e) => {
                            let lossy = String::from_utf8_lossy(e.as_bytes());
                            self.reject(attempts, lossy.trim(), FilterErrorNot::Utf8)?
                        }
                    }
                }
                LoopState::Converting(input) => match stages.convert(&input) {
                    ConversionOutcome::Success(value) => LoopState::RangeChecking(input, value),
                    ConversionOutcome::Failure(e) => self.reject(attempts, &input, e)?,
                },
                LoopState::RangeChecking(input, value) => match stages.check(&input, &value) {
                    Ok(_) => LoopState::Accepted(input, value),
                    Err(e) => self.reject(attempts, &input, e)?,
                },
                LoopState::Retrying(_) => LoopState::Prompting,
                LoopState::Accepted(input, value) => return Ok((input, value, attempts)),
                LoopState::Exhausted(last) => {
                    return Err(TerminalErrors::RetriesExhausted { attempts, last });
                }
            };
        }
    }

    /// Trims the line and substitutes the default answer for a blank one.
    fn clean(&self, line: &str) -> String {
        let trimmed = line.trim();

        match (&self.options.default_answer, trimmed.is_empty()) {
            (Some(default), true) => default.trim().to_string(),
            _ => trimmed.to_string(),
        }
    }

    /// Writes exactly one diagnostic line and decides between retrying and giving up.
    fn reject<T>(
        &mut self,
        attempt: usize,
        input: &str,
        error: FilterErrorNot,
    ) -> Result<LoopState<T>, TerminalErrors> {
        let record = DiagnosticRecord::new(attempt, input, &error);
        if self.formatter.own_line() {
            writeln!(self.sink)?;
        }
        writeln!(self.sink, "{}", self.formatter.format(&record))?;

        let exhausted = self
            .options
            .max_retries
            .is_some_and(|max_retries| attempt > max_retries);

        if exhausted {
            Ok(LoopState::Exhausted(error))
        } else {
            Ok(LoopState::Retrying(error))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{DesiredType, ValidationRange};
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(console: &Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8_lossy(console.sink()).into_owned()
    }

    #[test]
    fn test_terminal_accepts_first_valid_line() {
        let mut c = console("7\n");
        let res = c.ask("n: ", &[Sanitize::IsType(DesiredType::U8)]).unwrap();

        assert_eq!(res.value, ParsedValue::UInt(7));
        assert_eq!(res.answer, "7");
        assert_eq!(res.attempts, 1);
        assert_eq!(output(&c), "n: ");
    }

    #[test]
    fn test_terminal_one_diagnostic_per_rejection() {
        let mut c = console("x\n300\n12\n");
        let res = c.ask("n: ", &[Sanitize::IsType(DesiredType::U8)]).unwrap();

        assert_eq!(res.attempts, 3);
        assert_eq!(
            output(&c),
            "n: The value is not a u8, try again!\n\
             n: The value is not a u8, try again!\n\
             n: "
        );
    }

    #[test]
    fn test_terminal_stream_exhausted_is_not_retried() {
        let mut c = console("nope\n");
        let res = c.ask("n: ", &[Sanitize::IsType(DesiredType::I32)]);

        assert!(matches!(
            res,
            Err(TerminalErrors::StreamExhausted { attempts: 1 })
        ));
    }

    #[test]
    fn test_terminal_zero_retries_gives_up_after_first_failure() {
        let mut c = console("nope\n5\n").with_options(PromptOptions {
            max_retries: Some(0),
            ..PromptOptions::default()
        });
        let res = c.ask("n: ", &[Sanitize::IsType(DesiredType::I32)]);

        match res {
            Err(TerminalErrors::RetriesExhausted { attempts, last }) => {
                assert_eq!(attempts, 1);
                assert_eq!(last, FilterErrorNot::Number(DesiredType::I32));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_terminal_default_answer_replaces_blank_line() {
        let mut c = console("   \n").with_options(PromptOptions {
            default_answer: Some("18".to_string()),
            ..PromptOptions::default()
        });
        let res = c.ask("age: ", &[Sanitize::IsType(DesiredType::I64)]).unwrap();

        assert_eq!(res.value, ParsedValue::Int(18));
        assert_eq!(res.answer, "18");
    }

    #[test]
    fn test_terminal_default_answer_is_still_validated() {
        let mut c = console("\n50\n").with_options(PromptOptions {
            default_answer: Some("500".to_string()),
            ..PromptOptions::default()
        });
        let res = c
            .ask(
                "score: ",
                &[
                    Sanitize::IsType(DesiredType::I64),
                    Sanitize::IsBetween(ValidationRange::new(0, 100).unwrap()),
                ],
            )
            .unwrap();

        assert_eq!(res.value, ParsedValue::Int(50));
        assert_eq!(res.attempts, 2);
    }

    #[test]
    fn test_terminal_ask_many() {
        let mut c = console("10 x 30\n10 20 30\n");
        let res = c
            .ask_many("numbers: ", &[Sanitize::IsType(DesiredType::I64)])
            .unwrap();

        assert_eq!(
            res.values,
            vec![
                ParsedValue::Int(10),
                ParsedValue::Int(20),
                ParsedValue::Int(30)
            ]
        );
        assert_eq!(res.attempts, 2);
    }

    #[test]
    fn test_terminal_ask_many_rejects_blank_line() {
        let mut c = console("\n1\n");
        let res = c
            .ask_many("numbers: ", &[Sanitize::IsType(DesiredType::I64)])
            .unwrap();

        assert_eq!(res.values, vec![ParsedValue::Int(1)]);
        assert!(output(&c).contains("The value is empty, try again!"));
    }

    #[test]
    fn test_terminal_ask_many_checks_every_token() {
        let mut c = console("5 500\n5 50\n");
        let res = c
            .ask_many(
                "numbers: ",
                &[Sanitize::IsBetween(ValidationRange::new(0, 100).unwrap())],
            )
            .unwrap();

        assert_eq!(res.values, vec![ParsedValue::Int(5), ParsedValue::Int(50)]);
        assert!(output(&c).contains("The value is not between 0 and 100, try again!"));
    }

    #[test]
    fn test_loop_state_terminal_states() {
        assert!(LoopState::Accepted("1".to_string(), ParsedValue::Int(1)).is_terminal());
        assert!(LoopState::<ParsedValue>::Exhausted(FilterErrorNot::Empty).is_terminal());
        assert!(!LoopState::<ParsedValue>::Prompting.is_terminal());
        assert!(!LoopState::<ParsedValue>::Retrying(FilterErrorNot::Empty).is_terminal());
    }

    #[test]
    fn test_terminal_errors_display() {
        let e = TerminalErrors::RetriesExhausted {
            attempts: 3,
            last: FilterErrorNot::Number(DesiredType::I64),
        };
        assert_eq!(
            format!("{}", e),
            "No valid answer after 3 attempts => last failure: conversion"
        );

        let e = TerminalErrors::StreamExhausted { attempts: 0 };
        assert_eq!(
            format!("{}", e),
            "Input closed after 0 attempt(s) without a valid answer"
        );

        let e = TerminalErrors::from(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        assert_eq!(format!("{}", e), "Console I/O failed => closed");
    }

    #[test]
    fn test_terminal_invalid_range_display() {
        let inverted = ValidationRange::new(5, 1).unwrap_err();
        assert_eq!(
            format!("{}", inverted),
            "Invalid range => lower bound 5 is greater than upper bound 1"
        );

        let nan = ValidationRange::new(0.0, f64::NAN).unwrap_err();
        assert_eq!(
            format!("{}", nan),
            "Invalid range => bounds must be numbers, got 0 and NaN"
        );
    }

    #[test]
    fn test_terminal_invalid_utf8_line_is_retried() {
        let mut c = Console::new(Cursor::new(b"\xff\xfe\n42\n".to_vec()), Vec::new());
        let res = c.ask("n: ", &[Sanitize::IsType(DesiredType::I64)]).unwrap();

        assert_eq!(res.value, ParsedValue::Int(42));
        assert_eq!(res.attempts, 2);
        assert_eq!(
            output(&c),
            "n: The value is not valid UTF-8 text, try again!\nn: "
        );
    }

    #[test]
    fn test_terminal_invalid_utf8_counts_against_retries() {
        let mut c = Console::new(Cursor::new(b"\xff\n42\n".to_vec()), Vec::new()).with_options(
            PromptOptions {
                max_retries: Some(0),
                ..PromptOptions::default()
            },
        );
        let res = c.ask("n: ", &[Sanitize::IsType(DesiredType::String)]);

        assert!(matches!(
            res,
            Err(TerminalErrors::RetriesExhausted {
                attempts: 1,
                last: FilterErrorNot::Utf8
            })
        ));
    }
}
