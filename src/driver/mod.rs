// Scopetab - A scoped symbol table for compiler front ends
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Command driver for the symbol table.
//!
//! The driver reads a command script, feeds each command to a
//! [`SymbolTable`] and writes the resulting trace:
//! - The first word of the input is the bucket count
//! - Every non-empty line after it is echoed as `Cmd N: <line>`
//! - Table events and driver diagnostics follow each echo
//! - `Q` tears every scope down and stops the run

mod command;
mod lexer;

pub use command::{Command, CommandError};
pub use lexer::{first_word, words, Lexeme, Token};

use std::io::Write;
use std::num::NonZeroU32;

use crate::error::{DriverError, Result, TableError};
use crate::table::{SymbolTable, TraceEvent, MAX_BUCKET_COUNT};

/// Message written when `E` is issued at the root scope.
pub const GLOBAL_EXIT_MESSAGE: &str = "Cannot exit from global scope";

/// What a finished run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// The bucket count every scope used.
    pub bucket_count: u32,
    /// Number of commands echoed.
    pub commands: usize,
    /// Whether the run ended on `Q` rather than end of input.
    pub stopped_by_quit: bool,
}

/// Executes command scripts and writes their trace to `W`.
#[derive(Debug)]
pub struct Driver<W: Write> {
    out: W,
    bucket_override: Option<NonZeroU32>,
}

impl<W: Write> Driver<W> {
    /// Create a driver writing its trace to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            bucket_override: None,
        }
    }

    /// Use `bucket_count` instead of the count given in the input header.
    pub fn with_bucket_count(mut self, bucket_count: NonZeroU32) -> Self {
        self.bucket_override = Some(bucket_count);
        self
    }

    /// Get the trace writer back.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Run a whole command script.
    pub fn run(&mut self, source: &str) -> Result<RunSummary> {
        let (header_count, body_start) = parse_header(source)?;
        let bucket_count = self
            .bucket_override
            .map(NonZeroU32::get)
            .unwrap_or(header_count);
        log::debug!("running with {} bucket(s) per scope", bucket_count);

        let mut table = SymbolTable::new(bucket_count)?;
        self.flush_events(&mut table)?;

        let mut summary = RunSummary {
            bucket_count,
            commands: 0,
            stopped_by_quit: false,
        };

        for raw in source[body_start..].lines() {
            let line = raw.trim_end_matches('\r');
            // Whitespace-only lines still count and are rejected as commands.
            if line.is_empty() {
                continue;
            }

            summary.commands += 1;
            writeln!(self.out, "Cmd {}: {}", summary.commands, line)?;

            match Command::parse(line) {
                Ok(command) => {
                    if self.execute(&mut table, command)? {
                        summary.stopped_by_quit = true;
                        break;
                    }
                }
                Err(CommandError::UnknownPrintTarget) => {
                    log::warn!("ignoring print with unknown target: {}", line);
                }
                Err(err) => writeln!(self.out, "\t{}", err)?,
            }
        }

        self.out.flush()?;
        log::debug!(
            "processed {} command(s), quit: {}",
            summary.commands,
            summary.stopped_by_quit
        );
        Ok(summary)
    }

    /// Apply one command; returns `true` when the run should stop.
    fn execute(&mut self, table: &mut SymbolTable, command: Command) -> Result<bool> {
        let mut quit = false;
        match command {
            Command::Insert { name, descriptor } => {
                if let Err(err) = table.insert(&name, descriptor) {
                    log::debug!("insert rejected: {}", err);
                }
            }
            Command::Lookup { name } => {
                table.lookup(&name);
            }
            Command::Delete { name } => {
                if let Err(err) = table.remove(&name) {
                    log::debug!("delete rejected: {}", err);
                }
            }
            Command::PrintAll => table.print_all_scopes(),
            Command::PrintCurrent => table.print_current_scope(),
            Command::EnterScope => {
                table.enter_scope()?;
            }
            Command::ExitScope => match table.exit_scope() {
                Ok(_) => {}
                Err(TableError::GlobalScopeExit) => {
                    writeln!(self.out, "\t{}", GLOBAL_EXIT_MESSAGE)?;
                }
                Err(err) => log::debug!("exit rejected: {}", err),
            },
            Command::Quit => {
                table.teardown_all();
                quit = true;
            }
        }

        self.flush_events(table)?;
        Ok(quit)
    }

    fn flush_events(&mut self, table: &mut SymbolTable) -> Result<()> {
        for event in table.drain_events() {
            write_event(&mut self.out, &event)?;
        }
        Ok(())
    }
}

fn write_event<W: Write>(out: &mut W, event: &TraceEvent) -> std::io::Result<()> {
    writeln!(out, "{}", event)
}

/// Read the bucket count header; returns it with the offset where commands start.
///
/// Only the single character after the count is consumed, so anything else
/// on the header line is read as the first command.
fn parse_header(source: &str) -> Result<(u32, usize)> {
    let word = first_word(source).ok_or(DriverError::MissingBucketCount)?;
    let count = word
        .text
        .parse::<u32>()
        .ok()
        .filter(|count| (1..=MAX_BUCKET_COUNT).contains(count))
        .ok_or_else(|| DriverError::InvalidBucketCount {
            text: word.text.to_string(),
            span: word.span.clone(),
        })?;

    let after = word.span.end;
    let body_start = source[after..]
        .chars()
        .next()
        .map_or(after, |separator| after + separator.len_utf8());
    Ok((count, body_start))
}
