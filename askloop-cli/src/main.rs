use anyhow::{Result, bail};
use askloop::report::{DiagnosticFormatter, JsonFormatter};
use askloop::utils::*;
use clap::Parser;
use std::io::{self, Write};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Ask for one validated value on the terminal",
    long_about = None
)]
struct Cli {
    /// Question shown before every attempt
    #[arg(default_value = "Enter a value: ")]
    question: String,

    /// Target type: string, bool, u8..u128, usize, i8..i128, isize, f32, f64
    #[arg(short = 't', long = "type", default_value = "i64")]
    desired: DesiredType,

    /// Inclusive lower bound
    #[arg(long, requires = "max", allow_hyphen_values = true)]
    min: Option<Bound>,

    /// Inclusive upper bound
    #[arg(long, requires = "min", allow_hyphen_values = true)]
    max: Option<Bound>,

    /// Accepted answers, comma separated
    #[arg(long = "one-of", value_delimiter = ',')]
    one_of: Vec<String>,

    /// Retries allowed after the first attempt (unbounded when omitted)
    #[arg(short, long)]
    retries: Option<usize>,

    /// Answer used when the line is blank
    #[arg(short, long)]
    default: Option<String>,

    /// Read several whitespace separated values from one line
    #[arg(long)]
    many: bool,

    /// Write the accepted answer as JSON on stdout, prompts and JSON diagnostics on stderr
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn filters(&self) -> Result<Vec<Sanitize>> {
        let mut filters = vec![Sanitize::IsType(self.desired)];

        if let (Some(min), Some(max)) = (self.min, self.max) {
            if matches!(self.desired, DesiredType::String | DesiredType::Bool) {
                bail!("--min/--max need a numeric --type, got {}", self.desired);
            }
            filters.push(Sanitize::IsBetween(ValidationRange::new(min, max)?));
        }

        if !self.one_of.is_empty() {
            filters.push(Sanitize::MatchStrings(self.one_of.clone()));
        }

        Ok(filters)
    }

    fn options(&self) -> PromptOptions {
        PromptOptions {
            max_retries: self.retries,
            default_answer: self.default.clone(),
        }
    }
}

fn run<S, W, F>(mut console: Console<S, W, F>, cli: &Cli, filters: &[Sanitize]) -> Result<()>
where
    S: TextSource,
    W: Write,
    F: DiagnosticFormatter,
{
    if cli.many {
        let answers = console.ask_many(&cli.question, filters)?;

        if cli.json {
            println!("{}", serde_json::to_string(&answers)?);
        } else {
            let values: Vec<String> = answers.values.iter().map(|v| v.to_string()).collect();
            println!("{}", values.join(" "));
        }
    } else {
        let answer = console.ask(&cli.question, filters)?;

        if cli.json {
            println!("{}", serde_json::to_string(&answer)?);
        } else {
            println!("{}", answer.value);
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let filters = cli.filters()?;

    let stdin = io::stdin();

    if cli.json {
        let console = Console::new(stdin.lock(), io::stderr())
            .with_options(cli.options())
            .with_formatter(JsonFormatter);
        run(console, &cli, &filters)
    } else {
        let console = Console::new(stdin.lock(), io::stdout()).with_options(cli.options());
        run(console, &cli, &filters)
    }
}
