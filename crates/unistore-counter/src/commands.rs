//! Line commands read from stdin

use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Command keyword, the first word of an input line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Verb {
    #[strum(to_string = "inc", serialize = "+")]
    Increment,
    #[strum(to_string = "dec", serialize = "-")]
    Decrement,
    #[strum(to_string = "add")]
    Add,
    #[strum(to_string = "odd")]
    IncrementIfOdd,
    #[strum(to_string = "async")]
    IncrementAsync,
    #[strum(to_string = "state")]
    Show,
    #[strum(to_string = "help", serialize = "?")]
    Help,
    #[strum(to_string = "quit", serialize = "exit", serialize = "q")]
    Quit,
}

impl Verb {
    pub fn describe(&self) -> &'static str {
        match self {
            Verb::Increment => "increment the counter (alias: +)",
            Verb::Decrement => "decrement the counter (alias: -)",
            Verb::Add => "add N to the counter, e.g. `add 5`",
            Verb::IncrementIfOdd => "increment only if the value is odd",
            Verb::IncrementAsync => "increment after the configured delay",
            Verb::Show => "print the current state",
            Verb::Help => "show this help (alias: ?)",
            Verb::Quit => "exit (aliases: exit, q)",
        }
    }
}

/// A parsed input line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Increment,
    Decrement,
    Add(i64),
    IncrementIfOdd,
    IncrementAsync,
    Show,
    Help,
    Quit,
    /// Open action record typed as JSON, e.g. `{"type": "counter/incremented"}`
    Raw(Value),
}

/// Parse one input line; blank lines yield `None`
pub fn parse(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    if line.starts_with('{') {
        let value = serde_json::from_str(line).context("Invalid JSON action")?;
        return Ok(Some(Command::Raw(value)));
    }

    let mut words = line.split_whitespace();
    let keyword = words.next().unwrap_or_default();
    let verb = Verb::from_str(keyword)
        .with_context(|| format!("Unknown command `{}` (try `help`)", keyword))?;

    let command = match verb {
        Verb::Increment => Command::Increment,
        Verb::Decrement => Command::Decrement,
        Verb::Add => {
            let Some(amount) = words.next() else {
                bail!("`add` needs an amount, e.g. `add 5`");
            };
            let amount = amount
                .parse()
                .with_context(|| format!("`{}` is not a whole number", amount))?;
            Command::Add(amount)
        }
        Verb::IncrementIfOdd => Command::IncrementIfOdd,
        Verb::IncrementAsync => Command::IncrementAsync,
        Verb::Show => Command::Show,
        Verb::Help => Command::Help,
        Verb::Quit => Command::Quit,
    };

    if let Some(extra) = words.next() {
        bail!("Unexpected argument `{}` for `{}`", extra, verb);
    }

    Ok(Some(command))
}

/// Help text listing every command
pub fn help() -> String {
    Verb::iter()
        .map(|verb| format!("  {:<6} {}", verb.to_string(), verb.describe()))
        .collect::<Vec<_>>()
        .join("\n")
}
