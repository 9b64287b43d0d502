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

//! Scope management for the symbol table.
//!
//! A scope is one lexical level: a bucket table of the names declared at
//! that level plus a link to the enclosing scope. The link is an arena
//! handle, so a scope never owns its parent.

use std::fmt;
use std::num::NonZeroU32;

use super::arena::ScopeSlot;
use super::bucket::{HashBucketTable, Placement};
use super::descriptor::TypeDescriptor;
use super::entry::Entry;
use crate::error::TableError;

/// Numeric scope identifier, 1-based and increasing for the lifetime of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScopeId(pub u32);

impl ScopeId {
    /// The id given to the first root scope.
    pub const GLOBAL: ScopeId = ScopeId(1);
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A scope in the symbol table.
#[derive(Debug)]
pub struct Scope {
    id: ScopeId,
    parent: Option<ScopeSlot>,
    table: HashBucketTable,
}

impl Scope {
    /// Create a new empty scope.
    pub fn new(
        id: ScopeId,
        parent: Option<ScopeSlot>,
        bucket_count: NonZeroU32,
    ) -> Result<Self, TableError> {
        Ok(Self {
            id,
            parent,
            table: HashBucketTable::new(bucket_count)?,
        })
    }

    /// This scope's id.
    pub fn id(&self) -> ScopeId {
        self.id
    }

    /// The enclosing scope, if any.
    pub fn parent(&self) -> Option<ScopeSlot> {
        self.parent
    }

    /// Check if this is a root scope.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Declare a symbol in this scope.
    pub fn insert(
        &mut self,
        name: &str,
        descriptor: TypeDescriptor,
    ) -> Result<Placement, TableError> {
        self.table.insert(name, descriptor)
    }

    /// Look up a symbol declared in this scope only.
    pub fn lookup(&self, name: &str) -> Option<(&Entry, Placement)> {
        self.table.lookup(name)
    }

    /// Remove a symbol declared in this scope.
    pub fn remove(&mut self, name: &str) -> Result<(Entry, Placement), TableError> {
        self.table.remove(name)
    }

    /// The underlying bucket table.
    pub fn table(&self) -> &HashBucketTable {
        &self.table
    }

    /// Snapshot this scope for printing at the given indentation.
    pub fn listing(&self, indent: usize) -> ScopeListing {
        ScopeListing {
            id: self.id,
            indent,
            buckets: self
                .table
                .buckets()
                .map(|(_, chain)| chain.cloned().collect())
                .collect(),
        }
    }
}

/// A printable snapshot of one scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeListing {
    /// The scope's id.
    pub id: ScopeId,
    /// Number of leading tabs on every line.
    pub indent: usize,
    /// Every bucket in order, each chain most recent first.
    pub buckets: Vec<Vec<Entry>>,
}

impl fmt::Display for ScopeListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tabs = "\t".repeat(self.indent);
        write!(f, "{}ScopeTable# {}", tabs, self.id)?;
        for (index, chain) in self.buckets.iter().enumerate() {
            write!(f, "\n{}{}-->", tabs, index + 1)?;
            for entry in chain {
                write!(f, "{} ", entry.render())?;
            }
        }
        Ok(())
    }
}
