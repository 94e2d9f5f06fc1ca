pub mod sanitize;
pub use sanitize::{ConversionOutcome, DesiredType, FailureKind, FilterErrorNot, ParsedValue, Rule, Sanitize};

pub mod range;
pub use range::{Bound, ValidationRange};

pub mod terminal;
pub use terminal::{Answers, Console, LoopState, PromptOptions, Terminal, TerminalErrors, TextSource};
