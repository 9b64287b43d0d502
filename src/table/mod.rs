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

//! Scoped symbol table.
//!
//! This module contains the data structure at the heart of the crate:
//! - Fixed-size hash bucket tables with SDBM hashing
//! - Scopes linked to their parents through an arena
//! - The symbol table that drives scope entry, exit and name resolution
//! - Structured trace events describing every operation

mod arena;
mod bucket;
mod descriptor;
mod entry;
mod hash;
mod scope;
mod symbol_table;
mod trace;

pub use arena::{ParentChain, ScopeArena, ScopeSlot};
pub use bucket::{HashBucketTable, Placement, MAX_BUCKET_COUNT};
pub use descriptor::{AggregateKind, Field, TypeDescriptor, FUNCTION_KEYWORD};
pub use entry::Entry;
pub use hash::{bucket_index, sdbm_hash};
pub use scope::{Scope, ScopeId, ScopeListing};
pub use symbol_table::{Resolved, SymbolTable};
pub use trace::{NullSink, TraceEvent, TraceSink};
