use std::io::{self, Write};

use anyhow::Context;
use thiserror::Error;


#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    // Not thrown by the arg reader
    #[error("Unknown command {0:?}")]
    UnknownCommand(String),

    #[error("Missing argument {0}")]
    MissingArgument(usize),

    #[error("Bad argument ({0})")]
    ParseError(String),

    #[error("Unknown register {0:?}")]
    UnknownRegister(String),

    #[error("{0} unused command arguments")]
    UnusedArguments(usize),
}

pub struct Command(String);

impl Command {
    pub fn new(line: impl Into<String>) -> Self {
        Self(line.into())
    }

    /// Reads a command line from stdin, `None` once stdin is closed.
    pub fn prompt() -> anyhow::Result<Option<Self>> {
        print!("> ");
        io::stdout().flush()?;

        io::stdin()
            .lines()
            .next()
            .transpose()
            .context("Couldn't read command from stdin")
            .map(|line| line.map(Self::new))
    }

    pub fn args(&self) -> CommandArgs<impl Iterator<Item = &str>> {
        CommandArgs {
            iter: self.0.split_whitespace(),
            index: 0,
        }
    }
}

pub struct CommandArgs<I> {
    iter: I,
    index: usize,
}

impl<'a, I> CommandArgs<I>
where
    I: Iterator<Item = &'a str>,
{
    /// The command name, `None` for a blank line.
    pub fn name(&mut self) -> Option<&'a str> {
        self.iter.next()
    }

    pub fn next(&mut self) -> Result<&'a str, CommandError> {
        self.index += 1;

        self.iter
            .next()
            .ok_or(CommandError::MissingArgument(self.index))
    }

    pub fn next_number<T>(&mut self) -> Result<T, CommandError>
    where
        T: TryFrom<u64>,
    {
        parse_number(self.next()?)
    }

    pub fn next_number_or<T>(&mut self, default: T) -> Result<T, CommandError>
    where
        T: TryFrom<u64>,
    {
        match self.next() {
            Ok(arg) => parse_number(arg),
            Err(CommandError::MissingArgument(_)) => Ok(default),
            Err(e) => Err(e),
        }
    }

    /// Fails if arguments are left over.
    pub fn finish(self) -> Result<(), CommandError> {
        match self.iter.count() {
            0 => Ok(()),
            unused => Err(CommandError::UnusedArguments(unused)),
        }
    }
}

/// Parses a decimal or `0x` prefixed hexadecimal number.
pub fn parse_number<T>(arg: &str) -> Result<T, CommandError>
where
    T: TryFrom<u64>,
{
    let value = match arg.strip_prefix("0x").or_else(|| arg.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => arg.parse(),
    }
    .map_err(|e| CommandError::ParseError(format!("{}: {}", arg, e)))?;

    T::try_from(value).map_err(|_| CommandError::ParseError(format!("{} is out of range", arg)))
}
