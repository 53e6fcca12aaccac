//! Line-by-line script runner

use std::io::{self, BufRead, Write};

use tracing::warn;

use crate::command::parse_command;
use crate::handler::CommandHandler;
use crate::reply::Reply;

/// Capacity the walkthrough is written for
pub const DEMO_CAPACITY: usize = 3;

/// Walkthrough of eviction and recency order on a capacity-3 cache
pub const DEMO_SCRIPT: &str = "\
# Fill past capacity: 1 is evicted, order 4 <-> 3 <-> 2
SET 1 1
SET 2 2
SET 3 3
SET 4 4
DUMP
# Touch 2: order 2 <-> 4 <-> 3
GET 2
DUMP
# 1 was evicted
GET 1
# Update 4 in place: order 4 <-> 2 <-> 3
SET 4 5
DUMP
GET 2
GET 3
DUMP
# 4 is the tail now and gets evicted: order 6 <-> 3 <-> 2
SET 6 6
DUMP
SET 7 7
DUMP
GET 3
DUMP
# Order 8 <-> 3 <-> 7
SET 8 8
DUMP
INFO
";

/// Totals for one script run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Commands executed
    pub commands: usize,
    /// Lines that failed to parse or replied with an error
    pub errors: usize,
}

/// Run every line of `input`, writing one reply per command to `output`
///
/// Bad lines produce an error reply and the run continues. With `echo` set,
/// each command is written before its reply.
pub fn run_script<R: BufRead, W: Write>(
    handler: &CommandHandler,
    input: R,
    output: &mut W,
    echo: bool,
) -> io::Result<RunSummary> {
    let mut summary = RunSummary::default();

    for (n, line) in input.lines().enumerate() {
        let line = line?;

        let reply = match parse_command(&line) {
            Ok(Some(cmd)) => {
                if echo {
                    writeln!(output, "> {}", line.trim())?;
                }
                summary.commands += 1;
                handler.handle(cmd)
            }
            Ok(None) => continue,
            Err(e) => {
                warn!(line = n + 1, "{}", e);
                Reply::Error(format!("ERR {}", e))
            }
        };

        if reply.is_error() {
            summary.errors += 1;
        }
        writeln!(output, "{}", reply)?;
    }

    output.flush()?;
    Ok(summary)
}
