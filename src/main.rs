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

//! Scopetab CLI
//!
//! Runs a symbol table command script and writes the trace.

use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use scopetab::error::format_error;
use scopetab::table::MAX_BUCKET_COUNT;
use scopetab::Driver;

/// Scopetab - a scoped symbol table driven by a command script
#[derive(Parser, Debug)]
#[command(name = "scopetab")]
#[command(author = "Scopetab Team")]
#[command(version)]
#[command(about = "Run symbol table command scripts and print the trace")]
#[command(long_about = r#"
Scopetab executes a command script against a scoped, hash-bucketed symbol
table and writes a trace of every operation.

The first line of the script is the number of buckets per scope. Each
following line is one command:
  I <name> <type...>   insert into the current scope
  L <name>             look a name up through all scopes
  D <name>             delete from the current scope
  P A | P C            print all scopes or the current scope
  S | E                enter or exit a scope
  Q                    remove every scope and stop

Example usage:
  scopetab commands.txt
  scopetab commands.txt -o trace.txt
  scopetab - --buckets 11 < commands.txt
"#)]
struct Cli {
    /// Command script to execute (`-` reads standard input)
    input: PathBuf,

    /// Trace output file (defaults to standard output)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Buckets per scope (1-65536), overriding the script header
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_BUCKET_COUNT)))]
    buckets: Option<u32>,

    /// Enable verbose logging on standard error
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let from_stdin = cli.input.as_os_str() == "-";
    let source = match read_input(&cli.input, from_stdin) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: Cannot read {}: {}", cli.input.display(), e);
            return ExitCode::from(3);
        }
    };
    log::debug!("read {} byte(s) from {}", source.len(), cli.input.display());

    let out: Box<dyn Write> = match &cli.output {
        Some(path) => match File::create(path) {
            Ok(file) => Box::new(BufWriter::new(file)),
            Err(e) => {
                eprintln!("Error: Cannot write {}: {}", path.display(), e);
                return ExitCode::from(2);
            }
        },
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let mut driver = Driver::new(out);
    if let Some(buckets) = cli.buckets.and_then(NonZeroU32::new) {
        driver = driver.with_bucket_count(buckets);
    }

    let filename = if from_stdin {
        "<stdin>".to_string()
    } else {
        cli.input
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("<input>")
            .to_string()
    };

    match driver.run(&source) {
        Ok(summary) => {
            if cli.verbose {
                eprintln!(
                    "Processed {} command(s) with {} bucket(s) per scope{}",
                    summary.commands,
                    summary.bucket_count,
                    if summary.stopped_by_quit {
                        ", stopped by Q"
                    } else {
                        ""
                    }
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprint!("{}", format_error(&e, &source, Some(&filename)));
            ExitCode::from(1)
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn read_input(path: &Path, from_stdin: bool) -> io::Result<String> {
    if from_stdin {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        std::fs::read_to_string(path)
    }
}
