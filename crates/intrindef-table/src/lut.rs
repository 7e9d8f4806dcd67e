//! Deduplicating lookup tables.
//!
//! A [`Lut`] collects sequences of items that will later be laid out in one
//! flat array. Adding a sequence returns a [`LutKey`]; adding an identical
//! sequence again returns the same key. Once every sequence has been added,
//! [`Lut::compact`] packs them into shared storage and each key resolves to a
//! stable offset.
//!
//! Packing is a shortest-common-superstring heuristic:
//! - Sequences are placed longest first (ties keep insertion order)
//! - A sequence already present anywhere in storage reuses that offset
//! - Otherwise the longest storage suffix that prefixes the sequence is shared

use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;

/// Handle to a sequence added to a [`Lut`].
///
/// Keys are only meaningful for the table that produced them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct LutKey(u32);

impl LutKey {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Append-only collection of item sequences, deduplicated by content.
#[derive(Debug, Clone)]
pub struct Lut<T> {
    /// Distinct sequences, indexed by key.
    sequences: Vec<Vec<T>>,
    /// Content lookup for identical re-adds.
    lookup: HashMap<Vec<T>, LutKey>,
}

impl<T> Default for Lut<T> {
    fn default() -> Self {
        Self {
            sequences: Vec::new(),
            lookup: HashMap::new(),
        }
    }
}

impl<T: Clone + Eq + Hash> Lut<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sequence, returning its key.
    ///
    /// Empty sequences occupy no storage and have no key.
    pub fn add(&mut self, items: &[T]) -> Option<LutKey> {
        if items.is_empty() {
            return None;
        }
        if let Some(&key) = self.lookup.get(items) {
            return Some(key);
        }

        let key = LutKey(self.sequences.len() as u32);
        self.sequences.push(items.to_vec());
        self.lookup.insert(items.to_vec(), key);
        Some(key)
    }

    /// Number of distinct sequences added so far.
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Lay out all sequences in shared storage.
    ///
    /// Consumes the table: no sequence can be added after compaction.
    pub fn compact(self) -> CompactLut<T> {
        let mut order: Vec<usize> = (0..self.sequences.len()).collect();
        // `sort_by` is stable, so equal lengths keep insertion order.
        order.sort_by(|&a, &b| self.sequences[b].len().cmp(&self.sequences[a].len()));

        let mut storage: Vec<T> = Vec::new();
        let mut offsets = vec![0u32; self.sequences.len()];

        for idx in order {
            let seq = &self.sequences[idx];
            let offset = match find(&storage, seq) {
                Some(at) => at,
                None => {
                    let shared = overlap(&storage, seq);
                    let at = storage.len() - shared;
                    storage.extend_from_slice(&seq[shared..]);
                    at
                }
            };
            offsets[idx] = offset as u32;
        }

        CompactLut {
            items: storage,
            offsets,
        }
    }
}

/// Position of the first occurrence of `needle` in `haystack`.
fn find<T: PartialEq>(haystack: &[T], needle: &[T]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Length of the longest suffix of `storage` that is a proper prefix of `seq`.
fn overlap<T: PartialEq>(storage: &[T], seq: &[T]) -> usize {
    let max = seq.len().saturating_sub(1).min(storage.len());
    (1..=max)
        .rev()
        .find(|&n| storage[storage.len() - n..] == seq[..n])
        .unwrap_or(0)
}

/// A compacted table: flat storage plus the final offset of every key.
#[derive(Debug, Clone)]
pub struct CompactLut<T> {
    items: Vec<T>,
    offsets: Vec<u32>,
}

impl<T> CompactLut<T> {
    /// Offset of the sequence identified by `key` within [`Self::items`].
    ///
    /// # Panics
    /// Panics if the key was not produced by the table that was compacted.
    #[inline]
    pub fn offset(&self, key: LutKey) -> u32 {
        self.offsets[key.index()]
    }

    /// Resolve an optional key.
    #[inline]
    pub fn resolve(&self, key: Option<LutKey>) -> Option<u32> {
        key.map(|k| self.offset(k))
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Convert the stored items while keeping the key-to-offset mapping.
    ///
    /// Used when items themselves hold keys into other tables that have only
    /// now been compacted.
    pub fn map_items<U>(self, f: impl FnMut(T) -> U) -> CompactLut<U> {
        CompactLut {
            items: self.items.into_iter().map(f).collect(),
            offsets: self.offsets,
        }
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}
