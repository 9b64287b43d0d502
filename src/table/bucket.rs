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

//! Fixed-size hash bucket table.
//!
//! Every scope owns one of these. The bucket count is fixed at
//! construction and the table never resizes. Each bucket is a chain with
//! the most recently inserted entry at the front.

use std::collections::vec_deque;
use std::collections::VecDeque;
use std::num::NonZeroU32;

use super::descriptor::TypeDescriptor;
use super::entry::Entry;
use super::hash::bucket_index;
use crate::error::TableError;

/// Largest bucket count a table accepts.
pub const MAX_BUCKET_COUNT: u32 = 1 << 16;

/// Where an operation touched the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// 1-based bucket index.
    pub bucket: usize,
    /// 1-based chain position.
    pub position: usize,
}

/// A hash table with a fixed number of chained buckets.
#[derive(Debug, Clone)]
pub struct HashBucketTable {
    buckets: Vec<VecDeque<Entry>>,
    bucket_count: NonZeroU32,
    len: usize,
}

impl HashBucketTable {
    /// Create an empty table with `bucket_count` buckets.
    ///
    /// Fails instead of aborting when the count is above
    /// [`MAX_BUCKET_COUNT`] or the buckets cannot be allocated.
    pub fn new(bucket_count: NonZeroU32) -> Result<Self, TableError> {
        let requested = bucket_count.get();
        if requested > MAX_BUCKET_COUNT {
            return Err(TableError::TooManyBuckets {
                requested,
                max: MAX_BUCKET_COUNT,
            });
        }

        let mut buckets = Vec::new();
        buckets
            .try_reserve_exact(requested as usize)
            .map_err(|_| TableError::AllocationFailed {
                bucket_count: requested,
            })?;
        buckets.resize_with(requested as usize, VecDeque::new);

        Ok(Self {
            buckets,
            bucket_count,
            len: 0,
        })
    }

    /// The fixed number of buckets.
    pub fn bucket_count(&self) -> NonZeroU32 {
        self.bucket_count
    }

    /// Number of entries across all buckets.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Zero-based bucket for `name`.
    pub fn bucket_of(&self, name: &str) -> usize {
        bucket_index(name, self.bucket_count)
    }

    /// Insert a new entry at the front of its bucket's chain.
    ///
    /// Fails without touching the table if `name` is already present. The
    /// returned position is the chain length after the insert.
    pub fn insert(
        &mut self,
        name: &str,
        descriptor: TypeDescriptor,
    ) -> Result<Placement, TableError> {
        let index = self.bucket_of(name);
        let chain = &mut self.buckets[index];

        if chain.iter().any(|entry| entry.name == name) {
            return Err(TableError::Duplicate {
                name: name.to_string(),
            });
        }

        chain.push_front(Entry::new(name, descriptor));
        self.len += 1;
        log::trace!("inserted '{}' into bucket {}", name, index + 1);

        Ok(Placement {
            bucket: index + 1,
            position: chain.len(),
        })
    }

    /// Find `name`, scanning its bucket front to back.
    pub fn lookup(&self, name: &str) -> Option<(&Entry, Placement)> {
        let index = self.bucket_of(name);
        self.buckets[index]
            .iter()
            .enumerate()
            .find(|(_, entry)| entry.name == name)
            .map(|(rank, entry)| {
                (
                    entry,
                    Placement {
                        bucket: index + 1,
                        position: rank + 1,
                    },
                )
            })
    }

    /// Unlink the first entry named `name`, keeping the rest of the chain in order.
    pub fn remove(&mut self, name: &str) -> Result<(Entry, Placement), TableError> {
        let index = self.bucket_of(name);
        let chain = &mut self.buckets[index];

        let rank = chain
            .iter()
            .position(|entry| entry.name == name)
            .ok_or_else(|| TableError::NotFound {
                name: name.to_string(),
            })?;

        let entry = chain.remove(rank).ok_or_else(|| TableError::NotFound {
            name: name.to_string(),
        })?;
        self.len -= 1;

        Ok((
            entry,
            Placement {
                bucket: index + 1,
                position: rank + 1,
            },
        ))
    }

    /// Every bucket in order, empty ones included, with its 1-based index.
    pub fn buckets(&self) -> impl Iterator<Item = (usize, vec_deque::Iter<'_, Entry>)> {
        self.buckets
            .iter()
            .enumerate()
            .map(|(index, chain)| (index + 1, chain.iter()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(buckets: u32) -> HashBucketTable {
        HashBucketTable::new(NonZeroU32::new(buckets).unwrap()).unwrap()
    }

    fn int() -> TypeDescriptor {
        TypeDescriptor::plain("INT")
    }

    #[test]
    fn test_new_table_is_empty() {
        let t = table(5);
        assert!(t.is_empty());
        assert_eq!(t.bucket_count().get(), 5);
        assert_eq!(t.buckets().count(), 5);
    }

    #[test]
    fn test_bucket_count_limit() {
        assert_eq!(table(MAX_BUCKET_COUNT).buckets().count(), MAX_BUCKET_COUNT as usize);

        let err = HashBucketTable::new(NonZeroU32::new(4_000_000_000).unwrap()).unwrap_err();
        assert_eq!(
            err,
            TableError::TooManyBuckets {
                requested: 4_000_000_000,
                max: MAX_BUCKET_COUNT,
            }
        );
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut t = table(7);
        let placement = t.insert("x", int()).unwrap();
        assert_eq!(placement.bucket, 2);
        assert_eq!(placement.position, 1);

        let (entry, found) = t.lookup("x").unwrap();
        assert_eq!(entry.descriptor, int());
        assert_eq!(found, placement);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut t = table(7);
        t.insert("x", int()).unwrap();
        let err = t.insert("x", TypeDescriptor::plain("FLOAT")).unwrap_err();
        assert!(matches!(err, TableError::Duplicate { ref name } if name == "x"));
        assert_eq!(t.lookup("x").unwrap().0.descriptor, int());
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn test_single_bucket_chain_order() {
        let mut t = table(1);
        assert_eq!(t.insert("x", int()).unwrap().position, 1);
        assert_eq!(t.insert("y", int()).unwrap().position, 2);

        let (_, chain) = t.buckets().next().unwrap();
        let names: Vec<_> = chain.map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["y", "x"]);

        assert_eq!(t.lookup("y").unwrap().1.position, 1);
        assert_eq!(t.lookup("x").unwrap().1.position, 2);
    }

    #[test]
    fn test_remove_preserves_chain_order() {
        let mut t = table(1);
        for name in ["a", "b", "c"] {
            t.insert(name, int()).unwrap();
        }
        let (removed, placement) = t.remove("b").unwrap();
        assert_eq!(removed.name, "b");
        assert_eq!(placement.position, 2);

        let (_, chain) = t.buckets().next().unwrap();
        let names: Vec<_> = chain.map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a"]);
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn test_remove_missing() {
        let mut t = table(3);
        assert!(matches!(
            t.remove("ghost"),
            Err(TableError::NotFound { .. })
        ));
    }

    #[test]
    fn test_lookup_miss() {
        let mut t = table(3);
        t.insert("a", int()).unwrap();
        assert!(t.lookup("b").is_none());
    }
}
