//! REPL Module
//!
//! Interactive read-eval-print loop over the Pokedex commands.

mod commands;

pub use commands::{Command, Flow, Session};

use std::io::{BufRead, Write};

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::error::Result;

/// Prompt printed before every line of input.
pub const PROMPT: &str = "Pokedex > ";

/// Lowercases `text` and splits it on whitespace.
pub fn clean_input(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Runs the loop until `exit` or until `lines` is closed.
///
/// Command failures are printed as `Error: ...` and the loop continues; only
/// a failure to write to `out` ends it early.
pub async fn run<W: Write>(
    session: &mut Session,
    lines: &mut mpsc::Receiver<String>,
    out: &mut W,
) -> Result<()> {
    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.recv().await else {
            debug!("Input closed, leaving REPL");
            writeln!(out)?;
            break;
        };

        let words = clean_input(&line);
        let Some((name, args)) = words.split_first() else {
            continue;
        };

        match Command::parse(name) {
            Some(command) => match session.execute(command, args, out).await {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(err) => {
                    warn!("Command {} failed: {}", name, err);
                    writeln!(out, "Error: {}", err)?;
                }
            },
            None => writeln!(out, "Unknown command: {}", name)?,
        }
    }

    Ok(())
}

/// Forwards lines from a blocking reader into a channel on a dedicated thread.
///
/// Blocking stdin reads would otherwise pin a runtime worker and delay
/// shutdown. The thread ends at EOF, on a read error, or once the receiver is
/// dropped.
pub fn spawn_line_reader<R>(reader: R) -> mpsc::Receiver<String>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(16);

    std::thread::spawn(move || {
        for line in reader.lines() {
            let Ok(line) = line else { break };
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
    });

    rx
}
