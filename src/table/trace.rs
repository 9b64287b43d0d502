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

//! Trace events emitted by the symbol table.
//!
//! The table never writes output itself. It records structured events
//! into a [`TraceSink`]; the `Display` impl of each event is its trace line.

use std::fmt;

use super::scope::{ScopeId, ScopeListing};

/// One observable step of a symbol table operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    /// A scope was created.
    ScopeCreated { id: ScopeId, root: bool },
    /// A scope was destroyed.
    ScopeRemoved { id: ScopeId, root: bool },
    /// A symbol was inserted.
    Inserted {
        scope: ScopeId,
        bucket: usize,
        position: usize,
    },
    /// Insertion failed because the name is already in the current scope.
    AlreadyExists { name: String },
    /// A lookup hit.
    Found {
        name: String,
        scope: ScopeId,
        bucket: usize,
        position: usize,
    },
    /// A lookup missed in every live scope.
    NotFound { name: String },
    /// A symbol was deleted from the current scope.
    Deleted {
        name: String,
        scope: ScopeId,
        bucket: usize,
        position: usize,
    },
    /// A delete missed in the current scope.
    NotInCurrentScope { name: String },
    /// A scope was printed.
    ScopePrinted(ScopeListing),
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEvent::ScopeCreated { id, root } => {
                write!(f, "{}ScopeTable# {} created", lead(*root), id)
            }
            TraceEvent::ScopeRemoved { id, root } => {
                write!(f, "{}ScopeTable# {} removed", lead(*root), id)
            }
            TraceEvent::Inserted {
                scope,
                bucket,
                position,
            } => write!(
                f,
                "\t\tInserted in ScopeTable# {} at position {}, {}",
                scope, bucket, position
            ),
            TraceEvent::AlreadyExists { name } => {
                write!(f, "\t\t'{}' already exists in the current ScopeTable", name)
            }
            TraceEvent::Found {
                name,
                scope,
                bucket,
                position,
            } => write!(
                f,
                "\t\t'{}' found in ScopeTable# {} at position {}, {}",
                name, scope, bucket, position
            ),
            TraceEvent::NotFound { name } => {
                write!(f, "\t\t'{}' not found in any of the ScopeTables", name)
            }
            TraceEvent::Deleted {
                name,
                scope,
                bucket,
                position,
            } => write!(
                f,
                "\t\tDeleted '{}' from ScopeTable# {} at position {}, {}",
                name, scope, bucket, position
            ),
            TraceEvent::NotInCurrentScope { .. } => {
                write!(f, "\t\tNot found in the current ScopeTable")
            }
            TraceEvent::ScopePrinted(listing) => write!(f, "{}", listing),
        }
    }
}

fn lead(root: bool) -> &'static str {
    if root {
        "\t"
    } else {
        "\t\t"
    }
}

/// Destination for trace events.
pub trait TraceSink {
    /// Record one event.
    fn record(&mut self, event: TraceEvent);
}

/// An in-memory event log.
impl TraceSink for Vec<TraceEvent> {
    fn record(&mut self, event: TraceEvent) {
        self.push(event);
    }
}

impl<S: TraceSink + ?Sized> TraceSink for &mut S {
    fn record(&mut self, event: TraceEvent) {
        (**self).record(event);
    }
}

/// A sink that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl TraceSink for NullSink {
    fn record(&mut self, _event: TraceEvent) {}
}
