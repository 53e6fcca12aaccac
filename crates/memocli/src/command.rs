//! Command line parser using nom
//!
//! One command per line, verbs are case-insensitive:
//! ```text
//! SET <key> <value...>
//! GET <key> | PEEK <key> | DEL <key> | EXISTS <key>
//! KEYS | DUMP | LEN | INFO | CLEAR
//! ```
//! Blank lines and lines starting with `#` are skipped.

use nom::{
    bytes::complete::take_till1,
    character::complete::space1,
    combinator::{map, rest},
    sequence::{pair, preceded},
    IResult,
};

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Insert or update a key
    Set {
        /// Key to write
        key: String,
        /// Value to store, may contain spaces
        value: String,
    },
    /// Read a key, marking it used
    Get(String),
    /// Read a key without marking it used
    Peek(String),
    /// Remove a key
    Del(String),
    /// Check whether a key is resident
    Exists(String),
    /// List resident keys, most recent first
    Keys,
    /// Print the recency list with values
    Dump,
    /// Number of resident entries
    Len,
    /// Capacity and statistics
    Info,
    /// Drop every entry
    Clear,
}

/// Parse one line
///
/// Returns `Ok(None)` for blank and comment lines.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (args, verb) = token(line).map_err(|_| format!("invalid command: {}", line))?;
    let name = verb.to_ascii_lowercase();

    let parsed: IResult<&str, Command> = match name.as_str() {
        "set" => map(pair(argument, value), |(key, value)| Command::Set { key, value })(args),
        "get" => map(argument, Command::Get)(args),
        "peek" => map(argument, Command::Peek)(args),
        "del" => map(argument, Command::Del)(args),
        "exists" => map(argument, Command::Exists)(args),
        "keys" => Ok((args, Command::Keys)),
        "dump" => Ok((args, Command::Dump)),
        "len" => Ok((args, Command::Len)),
        "info" => Ok((args, Command::Info)),
        "clear" => Ok((args, Command::Clear)),
        _ => return Err(format!("unknown command '{}'", verb)),
    };

    match parsed {
        Ok((remaining, command)) if remaining.is_empty() => Ok(Some(command)),
        _ => Err(format!("wrong number of arguments for '{}' command", name)),
    }
}

fn token(input: &str) -> IResult<&str, &str> {
    take_till1(char::is_whitespace)(input)
}

fn argument(input: &str) -> IResult<&str, String> {
    map(preceded(space1, token), |s: &str| s.to_string())(input)
}

fn value(input: &str) -> IResult<&str, String> {
    map(preceded(space1, rest), |s: &str| s.to_string())(input)
}
