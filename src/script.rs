//! Command-script driver for exercising a heap by hand or from fixed inputs
//!
//! A script is a stream of whitespace-separated tokens. The first character
//! of a command token selects the command:
//!
//! | Command      | Effect                                                    |
//! |--------------|-----------------------------------------------------------|
//! | `+ prio`     | insert `prio`; the payload is the running insertion number |
//! | `- idx`      | remove the entry inserted as number `idx`                 |
//! | `?`          | print the minimum                                         |
//! | `!`          | extract and print the minimum                             |
//! | `= idx prio` | change the priority of entry `idx` to `prio`              |
//! | `q`          | stop                                                      |
//!
//! Before the first command and after every command the session prints the
//! forest dump (preceded by an empty line) and `"{n} entry(s)"`.
//!
//! # Example
//!
//! ```rust
//! use binomial_queue::script::Session;
//!
//! let mut out = Vec::new();
//! Session::new().run("+ b + a ? q".as_bytes(), &mut out).unwrap();
//! let transcript = String::from_utf8(out).unwrap();
//! assert!(transcript.contains("minimum: a 1\n"));
//! ```

use crate::binomial::{BinomialHandle, BinomialHeap, Entry};
use std::fmt;
use std::io::{self, BufRead, Write};

/// Errors that stop a script
#[derive(Debug)]
pub enum ScriptError {
    /// Reading input or writing output failed
    Io(io::Error),
    /// The input ended before a command's argument
    MissingArgument {
        command: char,
        argument: &'static str,
    },
    /// An entry index was not a non-negative integer
    InvalidIndex(String),
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::Io(err) => write!(f, "i/o error: {err}"),
            ScriptError::MissingArgument { command, argument } => {
                write!(f, "command '{command}' is missing its {argument}")
            }
            ScriptError::InvalidIndex(token) => {
                write!(f, "'{token}' is not a valid entry index")
            }
        }
    }
}

impl std::error::Error for ScriptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScriptError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ScriptError {
    fn from(err: io::Error) -> Self {
        ScriptError::Io(err)
    }
}

/// One parsed script command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Insert(String),
    Remove(usize),
    Minimum,
    ExtractMin,
    ChangePriority(usize, String),
    Quit,
    /// A token whose first character is not a command
    Unknown(String),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Insert(prio) => write!(f, "+ {prio}"),
            Command::Remove(idx) => write!(f, "- {idx}"),
            Command::Minimum => write!(f, "?"),
            Command::ExtractMin => write!(f, "!"),
            Command::ChangePriority(idx, prio) => write!(f, "= {idx} {prio}"),
            Command::Quit => write!(f, "q"),
            Command::Unknown(token) => write!(f, "{token}"),
        }
    }
}

/// Pulls whitespace-separated tokens out of line-oriented input
struct Tokens<R> {
    input: R,
    pending: std::vec::IntoIter<String>,
}

impl<R: BufRead> Tokens<R> {
    fn new(input: R) -> Self {
        Self {
            input,
            pending: Vec::new().into_iter(),
        }
    }

    fn next_token(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.next() {
                return Ok(Some(token));
            }
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let tokens: Vec<String> = line.split_whitespace().map(str::to_owned).collect();
            self.pending = tokens.into_iter();
        }
    }

    fn argument(&mut self, command: char, argument: &'static str) -> Result<String, ScriptError> {
        self.next_token()?
            .ok_or(ScriptError::MissingArgument { command, argument })
    }

    fn index(&mut self, command: char) -> Result<usize, ScriptError> {
        let token = self.argument(command, "entry index")?;
        token
            .parse()
            .map_err(|_| ScriptError::InvalidIndex(token))
    }

    /// Reads the next command, or None at end of input
    fn command(&mut self) -> Result<Option<Command>, ScriptError> {
        let Some(token) = self.next_token()? else {
            return Ok(None);
        };
        let command = match token.chars().next() {
            Some('+') => Command::Insert(self.argument('+', "priority")?),
            Some('-') => Command::Remove(self.index('-')?),
            Some('?') => Command::Minimum,
            Some('!') => Command::ExtractMin,
            Some('=') => {
                let idx = self.index('=')?;
                Command::ChangePriority(idx, self.argument('=', "priority")?)
            }
            Some('q') => Command::Quit,
            _ => Command::Unknown(token),
        };
        Ok(Some(command))
    }
}

/// Parses a whole script up front
///
/// Stops at the first `q`, which is included in the result.
pub fn parse<R: BufRead>(input: R) -> Result<Vec<Command>, ScriptError> {
    let mut tokens = Tokens::new(input);
    let mut commands = Vec::new();
    while let Some(command) = tokens.command()? {
        let quit = command == Command::Quit;
        commands.push(command);
        if quit {
            break;
        }
    }
    Ok(commands)
}

/// A heap of string priorities plus the table of handles by insertion number
pub struct Session {
    heap: BinomialHeap<usize, String>,
    entries: Vec<BinomialHandle>,
    echo: bool,
    prompt: bool,
}

impl Session {
    pub fn new() -> Self {
        Self {
            heap: BinomialHeap::new(),
            entries: Vec::new(),
            echo: false,
            prompt: false,
        }
    }

    /// Repeat every command to the output after reading it
    pub fn echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Write `"cmd: "` before reading each command
    pub fn prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn heap(&self) -> &BinomialHeap<usize, String> {
        &self.heap
    }

    /// Runs commands from `input` until `q` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<(), ScriptError> {
        let mut tokens = Tokens::new(input);
        loop {
            self.write_state(&mut output)?;
            if self.prompt {
                write!(output, "cmd: ")?;
                output.flush()?;
            }

            let Some(command) = tokens.command()? else {
                return Ok(());
            };
            if self.echo {
                writeln!(output, "{command}")?;
            }
            if command == Command::Quit {
                return Ok(());
            }
            self.execute(&command, &mut output)?;
        }
    }

    /// Applies one command to the heap, writing any result line
    pub fn execute<W: Write>(&mut self, command: &Command, mut output: W) -> io::Result<()> {
        match command {
            Command::Insert(prio) => {
                let handle = self.heap.insert(prio.clone(), self.entries.len());
                self.entries.push(handle);
            }
            Command::Remove(idx) => match self.entries.get(*idx) {
                Some(handle) => {
                    self.heap.remove(handle);
                }
                None => writeln!(output, "no entry {idx}")?,
            },
            Command::Minimum => match self.heap.minimum() {
                Some((prio, data)) => writeln!(output, "minimum: {prio} {data}")?,
                None => writeln!(output, "minimum: none")?,
            },
            Command::ExtractMin => match self.heap.extract_min().map(Entry::into_parts) {
                Some((prio, data)) => writeln!(output, "minimum: {prio} {data}")?,
                None => writeln!(output, "minimum: none")?,
            },
            Command::ChangePriority(idx, prio) => match self.entries.get(*idx) {
                Some(handle) => {
                    self.heap.change_priority(handle, prio.clone());
                }
                None => writeln!(output, "no entry {idx}")?,
            },
            Command::Quit => {}
            Command::Unknown(token) => writeln!(output, "unknown command: {token}")?,
        }
        Ok(())
    }

    fn write_state<W: Write>(&self, output: &mut W) -> io::Result<()> {
        writeln!(output)?;
        write!(output, "{}", self.heap.dump())?;
        writeln!(output, "{} entry(s)", self.heap.size())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
