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

//! Bucket hashing for scope tables.
//!
//! Bucket placement is reported in trace output, so the hash must stay
//! bit-exact: an SDBM variant where every step is reduced modulo the
//! bucket count.

use std::num::NonZeroU32;

/// Compute the SDBM bucket hash of `name` for a table with `bucket_count` buckets.
///
/// Each byte is sign-extended before it is added, the way a signed `char`
/// behaves, and all arithmetic wraps on 32 bits. The result is always in
/// `0..bucket_count`.
pub fn sdbm_hash(name: &str, bucket_count: NonZeroU32) -> u32 {
    let modulus = bucket_count.get();
    let mut hash: u32 = 0;
    for &byte in name.as_bytes() {
        let c = byte as i8 as i32 as u32;
        hash = c
            .wrapping_add(hash << 6)
            .wrapping_add(hash << 16)
            .wrapping_sub(hash)
            % modulus;
    }
    hash
}

/// Zero-based bucket index of `name`.
pub fn bucket_index(name: &str, bucket_count: NonZeroU32) -> usize {
    sdbm_hash(name, bucket_count) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buckets(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn test_empty_name_hashes_to_zero() {
        assert_eq!(sdbm_hash("", buckets(7)), 0);
    }

    #[test]
    fn test_single_bucket_always_zero() {
        for name in ["a", "foo", "a_long_identifier_name", "Z9"] {
            assert_eq!(sdbm_hash(name, buckets(1)), 0);
        }
    }

    #[test]
    fn test_known_values() {
        // 'a' = 97, 97 % 7 = 6
        assert_eq!(sdbm_hash("a", buckets(7)), 6);
        // "ab": h = 6 after 'a'; 98 + 384 + 393216 - 6 = 393692; 393692 % 7 = 5
        assert_eq!(sdbm_hash("ab", buckets(7)), 5);
        assert_eq!(sdbm_hash("x", buckets(10)), 0);
        assert_eq!(sdbm_hash("y", buckets(10)), 1);
    }

    #[test]
    fn test_large_bucket_count_wraps() {
        // Must not panic on overflow and must stay in range.
        let count = buckets(u32::MAX);
        let hash = sdbm_hash("overflowing_identifier_name", count);
        assert!(hash < u32::MAX);
    }

    #[test]
    fn test_non_ascii_bytes_sign_extend() {
        // U+00C0 is 0xC3 0x80 in UTF-8; both bytes are negative as signed chars.
        assert_eq!(sdbm_hash("\u{00C0}", buckets(10)), 7);
    }

    #[test]
    fn test_bucket_index_matches_hash() {
        assert_eq!(bucket_index("ab", buckets(7)), 5);
    }
}
