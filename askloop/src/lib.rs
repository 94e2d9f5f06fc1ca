//! # askloop
//!
//! A small Rust library for interactive CLI input: it asks a question, converts
//! the answer to a typed value, checks it against optional ranges and rules, and
//! asks again until the answer is valid.
//!
//! ## Features
//!
//! - **Typed conversion** - integers, floats, booleans and text via [`utils::DesiredType`]
//! - **Composable filters** - types, inclusive ranges, string options and custom rules
//! - **Retry loop** - re-prompts with one diagnostic line per rejected attempt
//! - **Bounded retries** - optional retry limit reported as a distinct error
//! - **Pluggable diagnostics** - plain text or JSON lines ("json" feature)
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! askloop = "0.1"
//! askloop = { version = "0.1", default-features = false }
//! ```
//!
//! ## Usage Examples
//!
//! ### Basic Input & Range Validation
//!
//! ```rust,no_run
//! use askloop::utils::{DesiredType, Sanitize, Terminal, ValidationRange};
//!
//! let age = Terminal::ask(
//!     "Enter your age: ",
//!     &[
//!         Sanitize::IsType(DesiredType::U8),
//!         Sanitize::IsBetween(ValidationRange::new(0, 120).unwrap()),
//!     ],
//! )
//! .unwrap();
//! println!("Age: {}", age.value);
//! ```
//!
//! ### Bounded retries on any reader and writer
//!
//! ```rust
//! use askloop::utils::{Console, DesiredType, PromptOptions, Sanitize, TerminalErrors};
//! use std::io::Cursor;
//!
//! let mut console = Console::new(Cursor::new("x\ny\nz\n"), Vec::new()).with_options(
//!     PromptOptions {
//!         max_retries: Some(2),
//!         ..PromptOptions::default()
//!     },
//! );
//!
//! match console.ask("Pick a number: ", &[Sanitize::IsType(DesiredType::I32)]) {
//!     Err(TerminalErrors::RetriesExhausted { attempts, .. }) => assert_eq!(attempts, 3),
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```
//!
//! ### Complex Input Validation
//!
//! ```rust,no_run
//! use askloop::utils::{DesiredType, Sanitize, Terminal};
//!
//! let choice = Terminal::ask(
//!     "Choose a mode (quick/deep/custom): ",
//!     &[
//!         Sanitize::IsType(DesiredType::String),
//!         Sanitize::MatchStrings(vec![
//!             "quick".to_string(),
//!             "deep".to_string(),
//!             "custom".to_string(),
//!         ]),
//!     ],
//! );
//! ```
//!
//! ## Architecture
//!
//! - **`utils`** - conversion, filters, ranges and the input loop
//! - **`report`** - diagnostic records and formatters
//!
//! ## Error Handling
//!
//! Conversion and range failures never leave the loop; they are reported and the
//! question is asked again. The loop only fails with [`utils::TerminalErrors`]:
//!
//! ```rust,no_run
//! use askloop::utils::{DesiredType, Sanitize, Terminal, TerminalErrors};
//!
//! match Terminal::ask("Enter a number: ", &[Sanitize::IsType(DesiredType::I64)]) {
//!     Ok(answer) => println!("Got {}", answer.value),
//!     Err(TerminalErrors::StreamExhausted { .. }) => eprintln!("No more input"),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

pub mod report;

pub mod utils;
