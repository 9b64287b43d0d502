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

//! Symbol table entry definitions.
//!
//! An entry is a flat name + type pair. The table does not interpret the
//! type beyond formatting it for display.

use super::descriptor::TypeDescriptor;

/// Symbol table entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The symbol name.
    pub name: String,
    /// The declared type.
    pub descriptor: TypeDescriptor,
}

impl Entry {
    /// Create a new entry.
    pub fn new(name: impl Into<String>, descriptor: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            descriptor,
        }
    }

    /// The print form of this entry, e.g. `<x,INT>`.
    pub fn render(&self) -> String {
        self.descriptor.render(&self.name)
    }
}
