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

//! Scopetab Symbol Table Library
//!
//! This library provides a scoped symbol table for the semantic analysis
//! stage of a compiler front end, plus a small command driver that
//! exercises it and produces a human-readable trace.
//!
//! # Modules
//!
//! - [`error`] - Error types and error reporting
//! - [`table`] - Hash bucket tables, scopes and the symbol table itself
//! - [`driver`] - Line-oriented command protocol and trace rendering
//!
//! # Example
//!
//! ```
//! use scopetab::table::{SymbolTable, TypeDescriptor};
//!
//! let mut table = SymbolTable::new(7).unwrap();
//! table.insert("main", TypeDescriptor::parse("FUNCTION INT")).unwrap();
//!
//! table.enter_scope().unwrap();
//! table.insert("i", TypeDescriptor::plain("INT")).unwrap();
//! assert!(table.lookup("main").is_some());
//!
//! table.exit_scope().unwrap();
//! assert!(table.lookup("i").is_none());
//! ```

pub mod driver;
pub mod error;
pub mod table;

// Re-export commonly used types
pub use driver::{Command, Driver, RunSummary};
pub use error::{format_error, DriverError, Result, TableError};
pub use table::{Entry, ScopeId, SymbolTable, TraceEvent, TraceSink, TypeDescriptor};

/// The version of Scopetab.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of the tool.
pub const NAME: &str = "Scopetab";

/// Run a command script and return its trace.
///
/// This is the main entry point for driving the symbol table from text.
/// The first word of `source` is the bucket count; every following line
/// is one command.
///
/// # Example
///
/// ```
/// let trace = scopetab::run("7\nI x INT\nL x\n").unwrap();
/// assert!(trace.starts_with("\tScopeTable# 1 created\nCmd 1: I x INT\n"));
/// ```
pub fn run(source: &str) -> std::result::Result<String, DriverError> {
    let mut driver = Driver::new(Vec::new());
    driver.run(source)?;
    Ok(String::from_utf8_lossy(&driver.into_inner()).into_owned())
}
