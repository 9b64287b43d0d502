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

//! The scoped symbol table.
//!
//! The symbol table manages a stack of scopes. Inserts and deletes only
//! touch the innermost (current) scope; lookups walk outward through the
//! parent links until a declaration is found. Every operation reports what
//! it did to a [`TraceSink`].

use std::num::NonZeroU32;

use super::arena::{ScopeArena, ScopeSlot};
use super::bucket::Placement;
use super::descriptor::TypeDescriptor;
use super::entry::Entry;
use super::scope::{Scope, ScopeId, ScopeListing};
use super::trace::{TraceEvent, TraceSink};
use crate::error::TableError;

/// Indentation used when printing only the current scope.
const CURRENT_SCOPE_INDENT: usize = 1;

/// A successful lookup together with where the entry lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<'a> {
    /// The scope that declares the entry.
    pub scope: ScopeId,
    /// The entry itself.
    pub entry: &'a Entry,
    /// Bucket and chain position inside that scope.
    pub placement: Placement,
}

/// The symbol table for semantic analysis.
#[derive(Debug)]
pub struct SymbolTable<S: TraceSink = Vec<TraceEvent>> {
    /// Owner of every live scope.
    arena: ScopeArena,
    /// Live scopes, innermost last.
    stack: Vec<ScopeSlot>,
    bucket_count: NonZeroU32,
    /// Last scope id handed out.
    scope_counter: u32,
    sink: S,
}

impl SymbolTable<Vec<TraceEvent>> {
    /// Create a symbol table with a global scope that logs events into a `Vec`.
    pub fn new(bucket_count: u32) -> Result<Self, TableError> {
        Self::with_sink(bucket_count, Vec::new())
    }

    /// Take every event recorded so far.
    pub fn drain_events(&mut self) -> Vec<TraceEvent> {
        std::mem::take(&mut self.sink)
    }
}

impl<S: TraceSink> SymbolTable<S> {
    /// Create a symbol table with a global scope, reporting to `sink`.
    ///
    /// Every scope gets `bucket_count` buckets, which must be in
    /// `1..=MAX_BUCKET_COUNT`.
    pub fn with_sink(bucket_count: u32, sink: S) -> Result<Self, TableError> {
        let bucket_count = NonZeroU32::new(bucket_count).ok_or(TableError::ZeroBuckets)?;
        let mut table = Self {
            arena: ScopeArena::new(),
            stack: Vec::new(),
            bucket_count,
            scope_counter: 0,
            sink,
        };
        table.enter_scope()?;
        Ok(table)
    }

    /// Push a new scope nested in the current one and make it current.
    ///
    /// After a full teardown this creates a fresh root scope. If the scope's
    /// buckets cannot be allocated nothing changes and no id is used up.
    pub fn enter_scope(&mut self) -> Result<ScopeId, TableError> {
        let id = ScopeId(self.scope_counter + 1);
        let parent = self.current_slot();
        let scope = Scope::new(id, parent, self.bucket_count)?;

        self.scope_counter = id.0;
        let slot = self.arena.alloc(scope);
        self.stack.push(slot);

        log::debug!("entered scope {} (depth {})", id, self.stack.len());
        self.sink.record(TraceEvent::ScopeCreated {
            id,
            root: parent.is_none(),
        });
        Ok(id)
    }

    /// Destroy the current scope and make its parent current.
    ///
    /// The root scope cannot be exited this way; the table is left unchanged.
    pub fn exit_scope(&mut self) -> Result<ScopeId, TableError> {
        let slot = self.current_slot().ok_or(TableError::NoActiveScope)?;
        let scope = self.arena.get(slot).ok_or(TableError::NoActiveScope)?;
        if scope.is_root() {
            return Err(TableError::GlobalScopeExit);
        }

        self.stack.pop();
        let scope = self.arena.free(slot).ok_or(TableError::NoActiveScope)?;
        let id = scope.id();

        log::debug!("exited scope {} (depth {})", id, self.stack.len());
        self.sink.record(TraceEvent::ScopeRemoved { id, root: false });
        Ok(id)
    }

    /// Exit every nested scope, then destroy the root as well.
    ///
    /// Returns the number of scopes removed; a second call removes nothing.
    pub fn teardown_all(&mut self) -> usize {
        let mut removed = 0;
        while self.exit_scope().is_ok() {
            removed += 1;
        }

        if let Some(slot) = self.stack.pop() {
            if let Some(root) = self.arena.free(slot) {
                self.sink.record(TraceEvent::ScopeRemoved {
                    id: root.id(),
                    root: true,
                });
                removed += 1;
            }
        }

        log::debug!("tore down {} scope(s)", removed);
        removed
    }

    /// Declare a symbol in the current scope.
    pub fn insert(
        &mut self,
        name: &str,
        descriptor: TypeDescriptor,
    ) -> Result<Placement, TableError> {
        let slot = self.current_slot().ok_or(TableError::NoActiveScope)?;
        let scope = self
            .arena
            .get_mut(slot)
            .ok_or(TableError::NoActiveScope)?;
        let id = scope.id();

        match scope.insert(name, descriptor) {
            Ok(placement) => {
                self.sink.record(TraceEvent::Inserted {
                    scope: id,
                    bucket: placement.bucket,
                    position: placement.position,
                });
                Ok(placement)
            }
            Err(err) => {
                self.sink.record(TraceEvent::AlreadyExists {
                    name: name.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Look up a symbol, searching from the current scope outward.
    pub fn lookup(&mut self, name: &str) -> Option<&Entry> {
        self.resolve(name).map(|resolved| resolved.entry)
    }

    /// Like [`lookup`](Self::lookup), but also reports which scope declares the symbol.
    pub fn resolve(&mut self, name: &str) -> Option<Resolved<'_>> {
        let hit = self
            .arena
            .chain(self.stack.last().copied())
            .find_map(|scope| {
                scope.lookup(name).map(|(entry, placement)| Resolved {
                    scope: scope.id(),
                    entry,
                    placement,
                })
            });

        match &hit {
            Some(resolved) => self.sink.record(TraceEvent::Found {
                name: name.to_string(),
                scope: resolved.scope,
                bucket: resolved.placement.bucket,
                position: resolved.placement.position,
            }),
            None => self.sink.record(TraceEvent::NotFound {
                name: name.to_string(),
            }),
        }
        hit
    }

    /// Remove a symbol from the current scope only.
    pub fn remove(&mut self, name: &str) -> Result<Entry, TableError> {
        let slot = self.current_slot().ok_or(TableError::NoActiveScope)?;
        let scope = self
            .arena
            .get_mut(slot)
            .ok_or(TableError::NoActiveScope)?;
        let id = scope.id();

        match scope.remove(name) {
            Ok((entry, placement)) => {
                self.sink.record(TraceEvent::Deleted {
                    name: name.to_string(),
                    scope: id,
                    bucket: placement.bucket,
                    position: placement.position,
                });
                Ok(entry)
            }
            Err(err) => {
                self.sink.record(TraceEvent::NotInCurrentScope {
                    name: name.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Print the current scope.
    pub fn print_current_scope(&mut self) {
        if let Some(listing) = self.listing_current() {
            self.sink.record(TraceEvent::ScopePrinted(listing));
        }
    }

    /// Print every live scope, innermost first, each one tab deeper than the last.
    pub fn print_all_scopes(&mut self) {
        for listing in self.listing_all() {
            self.sink.record(TraceEvent::ScopePrinted(listing));
        }
    }

    /// Snapshot of the current scope as [`print_current_scope`](Self::print_current_scope) shows it.
    pub fn listing_current(&self) -> Option<ScopeListing> {
        self.current_scope()
            .map(|scope| scope.listing(CURRENT_SCOPE_INDENT))
    }

    /// Snapshots of all live scopes as [`print_all_scopes`](Self::print_all_scopes) shows them.
    pub fn listing_all(&self) -> Vec<ScopeListing> {
        self.arena
            .chain(self.current_slot())
            .enumerate()
            .map(|(depth, scope)| scope.listing(depth))
            .collect()
    }

    /// The id of the current scope.
    pub fn current_scope_id(&self) -> Option<ScopeId> {
        self.current_scope().map(Scope::id)
    }

    /// Number of live scopes.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Check if only the root scope is live.
    pub fn is_global_scope(&self) -> bool {
        self.stack.len() == 1
    }

    /// Check if every scope, root included, has been destroyed.
    pub fn is_torn_down(&self) -> bool {
        self.stack.is_empty()
    }

    /// The bucket count shared by all scopes.
    pub fn bucket_count(&self) -> NonZeroU32 {
        self.bucket_count
    }

    /// The trace sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The trace sink (mutable).
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the table and return its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    fn current_slot(&self) -> Option<ScopeSlot> {
        self.stack.last().copied()
    }

    fn current_scope(&self) -> Option<&Scope> {
        self.current_slot().and_then(|slot| self.arena.get(slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::bucket::MAX_BUCKET_COUNT;
    use crate::table::trace::NullSink;

    fn int() -> TypeDescriptor {
        TypeDescriptor::plain("INT")
    }

    /// Keeps rendered trace lines instead of events.
    #[derive(Debug, Default)]
    struct LineSink {
        lines: Vec<String>,
    }

    impl TraceSink for LineSink {
        fn record(&mut self, event: TraceEvent) {
            self.lines.push(event.to_string());
        }
    }

    #[test]
    fn test_new_has_global_scope() {
        let mut table = SymbolTable::new(7).unwrap();
        assert!(table.is_global_scope());
        assert_eq!(table.current_scope_id(), Some(ScopeId::GLOBAL));
        assert_eq!(
            table.drain_events(),
            vec![TraceEvent::ScopeCreated {
                id: ScopeId(1),
                root: true
            }]
        );
    }

    #[test]
    fn test_zero_buckets_rejected() {
        assert!(matches!(
            SymbolTable::new(0),
            Err(TableError::ZeroBuckets)
        ));
    }

    #[test]
    fn test_oversized_bucket_count_rejected() {
        assert!(matches!(
            SymbolTable::new(4_000_000_000),
            Err(TableError::TooManyBuckets { requested: 4_000_000_000, .. })
        ));
        assert!(SymbolTable::with_sink(MAX_BUCKET_COUNT, NullSink).is_ok());
        assert!(matches!(
            SymbolTable::with_sink(MAX_BUCKET_COUNT + 1, NullSink),
            Err(TableError::TooManyBuckets { .. })
        ));
    }

    #[test]
    fn test_borrowed_sink_sees_every_event() {
        let mut sink = LineSink::default();
        {
            let mut table = SymbolTable::with_sink(2, &mut sink).unwrap();
            table.insert("x", int()).unwrap();
            assert_eq!(table.sink().lines.len(), 2);

            table.sink_mut().lines.clear();
            table.lookup("x");
            table.lookup("nope");
        }
        assert_eq!(
            sink.lines,
            vec![
                "\t\t'x' found in ScopeTable# 1 at position 1, 1",
                "\t\t'nope' not found in any of the ScopeTables",
            ]
        );
    }

    #[test]
    fn test_into_sink_returns_owned_sink() {
        let mut table = SymbolTable::with_sink(2, LineSink::default()).unwrap();
        table.enter_scope().unwrap();
        table.teardown_all();

        let sink = table.into_sink();
        assert_eq!(
            sink.lines,
            vec![
                "\tScopeTable# 1 created",
                "\t\tScopeTable# 2 created",
                "\t\tScopeTable# 2 removed",
                "\tScopeTable# 1 removed",
            ]
        );
    }

    #[test]
    fn test_define_and_lookup() {
        let mut table = SymbolTable::with_sink(7, NullSink).unwrap();
        table.insert("x", int()).unwrap();
        assert_eq!(table.lookup("x").unwrap().descriptor, int());
    }

    #[test]
    fn test_nested_scopes() {
        let mut table = SymbolTable::with_sink(7, NullSink).unwrap();
        table.insert("outer", int()).unwrap();

        assert_eq!(table.enter_scope().unwrap(), ScopeId(2));
        table.insert("inner", TypeDescriptor::plain("FLOAT")).unwrap();

        assert!(table.lookup("outer").is_some());
        assert!(table.lookup("inner").is_some());

        assert_eq!(table.exit_scope().unwrap(), ScopeId(2));
        assert!(table.lookup("outer").is_some());
        assert!(table.lookup("inner").is_none());
    }

    #[test]
    fn test_shadowing_resolves_innermost() {
        let mut table = SymbolTable::with_sink(3, NullSink).unwrap();
        table.insert("v", int()).unwrap();
        table.enter_scope().unwrap();
        table.insert("v", TypeDescriptor::plain("CHAR")).unwrap();

        let resolved = table.resolve("v").unwrap();
        assert_eq!(resolved.scope, ScopeId(2));
        assert_eq!(resolved.entry.descriptor, TypeDescriptor::plain("CHAR"));

        table.remove("v").unwrap();
        let resolved = table.resolve("v").unwrap();
        assert_eq!(resolved.scope, ScopeId(1));
        assert_eq!(resolved.entry.descriptor, int());
    }

    #[test]
    fn test_remove_only_current_scope() {
        let mut table = SymbolTable::new(3).unwrap();
        table.insert("g", int()).unwrap();
        table.enter_scope().unwrap();
        table.drain_events();

        assert!(matches!(
            table.remove("g"),
            Err(TableError::NotFound { .. })
        ));
        assert_eq!(
            table.drain_events(),
            vec![TraceEvent::NotInCurrentScope {
                name: "g".to_string()
            }]
        );
    }

    #[test]
    fn test_cannot_exit_global_scope() {
        let mut table = SymbolTable::new(3).unwrap();
        table.drain_events();
        assert!(matches!(
            table.exit_scope(),
            Err(TableError::GlobalScopeExit)
        ));
        assert!(table.is_global_scope());
        assert!(table.drain_events().is_empty());
    }

    #[test]
    fn test_scope_ids_keep_increasing() {
        let mut table = SymbolTable::with_sink(3, NullSink).unwrap();
        assert_eq!(table.enter_scope().unwrap(), ScopeId(2));
        table.exit_scope().unwrap();
        assert_eq!(table.enter_scope().unwrap(), ScopeId(3));
        assert_eq!(table.enter_scope().unwrap(), ScopeId(4));
        assert_eq!(table.depth(), 3);
    }

    #[test]
    fn test_teardown_all() {
        let mut table = SymbolTable::new(3).unwrap();
        table.enter_scope().unwrap();
        table.enter_scope().unwrap();
        table.drain_events();

        assert_eq!(table.teardown_all(), 3);
        assert!(table.is_torn_down());
        assert_eq!(table.current_scope_id(), None);
        assert_eq!(
            table.drain_events(),
            vec![
                TraceEvent::ScopeRemoved {
                    id: ScopeId(3),
                    root: false
                },
                TraceEvent::ScopeRemoved {
                    id: ScopeId(2),
                    root: false
                },
                TraceEvent::ScopeRemoved {
                    id: ScopeId(1),
                    root: true
                },
            ]
        );

        assert_eq!(table.teardown_all(), 0);
        assert!(table.drain_events().is_empty());
    }

    #[test]
    fn test_operations_after_teardown() {
        let mut table = SymbolTable::with_sink(3, NullSink).unwrap();
        table.teardown_all();

        assert!(matches!(
            table.insert("x", int()),
            Err(TableError::NoActiveScope)
        ));
        assert!(matches!(
            table.remove("x"),
            Err(TableError::NoActiveScope)
        ));
        assert!(matches!(
            table.exit_scope(),
            Err(TableError::NoActiveScope)
        ));
        assert!(table.lookup("x").is_none());
        assert!(table.listing_current().is_none());
        assert!(table.listing_all().is_empty());
    }

    #[test]
    fn test_enter_after_teardown_creates_root() {
        let mut table = SymbolTable::new(3).unwrap();
        table.teardown_all();
        table.drain_events();

        let id = table.enter_scope().unwrap();
        assert_eq!(id, ScopeId(2));
        assert!(table.is_global_scope());
        assert_eq!(
            table.drain_events(),
            vec![TraceEvent::ScopeCreated { id, root: true }]
        );
    }

    #[test]
    fn test_listing_all_indents_outward() {
        let mut table = SymbolTable::with_sink(2, NullSink).unwrap();
        table.enter_scope().unwrap();
        table.enter_scope().unwrap();

        let listings = table.listing_all();
        let ids: Vec<_> = listings.iter().map(|l| (l.id.0, l.indent)).collect();
        assert_eq!(ids, vec![(3, 0), (2, 1), (1, 2)]);
        assert_eq!(table.listing_current().unwrap().indent, 1);
    }

    #[test]
    fn test_lookup_trace_reports_declaring_scope() {
        let mut table = SymbolTable::new(1).unwrap();
        table.insert("a", int()).unwrap();
        table.insert("b", int()).unwrap();
        table.enter_scope().unwrap();
        table.drain_events();

        table.lookup("a");
        assert_eq!(
            table.drain_events(),
            vec![TraceEvent::Found {
                name: "a".to_string(),
                scope: ScopeId(1),
                bucket: 1,
                position: 2,
            }]
        );
    }
}
