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

//! Slot arena holding the live scopes.
//!
//! Scopes refer to their parents by [`ScopeSlot`] handle. Freed slots go on
//! a free list and are reused by the next allocation.

use super::scope::Scope;

/// Handle to a scope stored in a [`ScopeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeSlot(usize);

impl ScopeSlot {
    /// The raw slot index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Owner of every live scope.
#[derive(Debug, Default)]
pub struct ScopeArena {
    slots: Vec<Option<Scope>>,
    free: Vec<usize>,
}

impl ScopeArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a scope and return its handle.
    pub fn alloc(&mut self, scope: Scope) -> ScopeSlot {
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(scope);
                ScopeSlot(index)
            }
            None => {
                self.slots.push(Some(scope));
                ScopeSlot(self.slots.len() - 1)
            }
        }
    }

    /// Remove a scope, returning it if the slot was live.
    pub fn free(&mut self, slot: ScopeSlot) -> Option<Scope> {
        let scope = self.slots.get_mut(slot.0)?.take()?;
        self.free.push(slot.0);
        Some(scope)
    }

    /// Get a live scope.
    pub fn get(&self, slot: ScopeSlot) -> Option<&Scope> {
        self.slots.get(slot.0)?.as_ref()
    }

    /// Get a live scope (mutable).
    pub fn get_mut(&mut self, slot: ScopeSlot) -> Option<&mut Scope> {
        self.slots.get_mut(slot.0)?.as_mut()
    }

    /// Number of live scopes.
    pub fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Walk from `start` outward through parent links.
    pub fn chain(&self, start: Option<ScopeSlot>) -> ParentChain<'_> {
        ParentChain {
            arena: self,
            next: start,
        }
    }
}

/// Iterator over a scope and its ancestors, innermost first.
pub struct ParentChain<'a> {
    arena: &'a ScopeArena,
    next: Option<ScopeSlot>,
}

impl<'a> Iterator for ParentChain<'a> {
    type Item = &'a Scope;

    fn next(&mut self) -> Option<Self::Item> {
        let scope = self.arena.get(self.next?)?;
        self.next = scope.parent();
        Some(scope)
    }
}
