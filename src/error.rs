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

//! Error types for the symbol table and its command driver.
//!
//! [`TableError`] describes why a single table operation was refused. Those
//! failures are never fatal: the driver reports them in the trace and moves
//! on. [`DriverError`] is for problems that stop a run altogether.

use std::io;
use std::ops::Range;
use thiserror::Error;

/// A source span representing a range in the command input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Get the length of this span.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

/// Why a symbol table operation was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// A table needs at least one bucket.
    #[error("bucket count must be at least 1")]
    ZeroBuckets,

    /// The bucket count is above the supported maximum.
    #[error("bucket count {requested} exceeds the maximum of {max}")]
    TooManyBuckets { requested: u32, max: u32 },

    /// Memory for a scope's buckets could not be reserved.
    #[error("cannot allocate {bucket_count} buckets")]
    AllocationFailed { bucket_count: u32 },

    /// The name is already declared in the current scope.
    #[error("'{name}' already exists in the current scope")]
    Duplicate { name: String },

    /// The name is not declared where it was looked for.
    #[error("'{name}' not found")]
    NotFound { name: String },

    /// The root scope cannot be exited.
    #[error("cannot exit from global scope")]
    GlobalScopeExit,

    /// Every scope has been torn down.
    #[error("no active scope")]
    NoActiveScope,
}

/// Errors that stop a driver run.
#[derive(Debug, Error)]
pub enum DriverError {
    /// Reading input or writing the trace failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The symbol table could not be created.
    #[error("cannot create symbol table: {0}")]
    Table(#[from] TableError),

    /// The input has no bucket count header.
    #[error("missing bucket count")]
    MissingBucketCount,

    /// The bucket count header is not an integer in `1..=MAX_BUCKET_COUNT`.
    #[error("invalid bucket count '{text}'")]
    InvalidBucketCount { text: String, span: Span },
}

impl DriverError {
    /// Get the error code string.
    pub fn code(&self) -> &'static str {
        match self {
            DriverError::Io(_) => "E001",
            DriverError::Table(_) => "E002",
            DriverError::MissingBucketCount => "E010",
            DriverError::InvalidBucketCount { .. } => "E011",
        }
    }

    /// The input region the error points at, if any.
    pub fn span(&self) -> Option<&Span> {
        match self {
            DriverError::InvalidBucketCount { span, .. } => Some(span),
            _ => None,
        }
    }

    /// Hint for fixing the error.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            DriverError::Io(_) | DriverError::Table(_) => None,
            DriverError::MissingBucketCount | DriverError::InvalidBucketCount { .. } => {
                Some("the input must start with a bucket count between 1 and 65536, e.g. `7`")
            }
        }
    }
}

/// Result type for driver operations.
pub type Result<T> = std::result::Result<T, DriverError>;

/// Source location with line and column information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// The content of the line.
    pub line_content: String,
}

impl SourceLocation {
    /// Calculate line and column from a byte offset in the input.
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let before = &source[..offset];

        let line = before.chars().filter(|&c| c == '\n').count() + 1;

        let last_newline = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[last_newline..].chars().count() + 1;

        let line_end = source[offset..]
            .find('\n')
            .map(|i| offset + i)
            .unwrap_or(source.len());
        let line_content = source[last_newline..line_end]
            .trim_end_matches('\r')
            .to_string();

        Self {
            line,
            column,
            line_content,
        }
    }
}

/// Format a driver error with input context.
pub fn format_error(error: &DriverError, source: &str, filename: Option<&str>) -> String {
    let filename = filename.unwrap_or("<input>");
    let mut output = format!("error[{}]: {}\n", error.code(), error);

    let Some(span) = error.span() else {
        if let Some(hint) = error.hint() {
            output.push_str(&format!("  = hint: {}\n", hint));
        }
        return output;
    };

    let loc = SourceLocation::from_offset(source, span.start);
    output.push_str(&format!("  --> {}:{}:{}\n", filename, loc.line, loc.column));

    let line_num_width = loc.line.to_string().len();
    output.push_str(&format!("{:>width$} |\n", "", width = line_num_width));
    output.push_str(&format!(
        "{:>width$} | {}\n",
        loc.line,
        loc.line_content,
        width = line_num_width
    ));

    let underline_start = loc.column - 1;
    let underline_len = span
        .len()
        .max(1)
        .min(loc.line_content.len().saturating_sub(underline_start).max(1));
    output.push_str(&format!(
        "{:>width$} | {:>start$}{}\n",
        "",
        "",
        "^".repeat(underline_len),
        width = line_num_width,
        start = underline_start
    ));

    if let Some(hint) = error.hint() {
        output.push_str(&format!(
            "{:>width$} = hint: {}\n",
            "",
            hint,
            width = line_num_width
        ));
    }

    output
}
