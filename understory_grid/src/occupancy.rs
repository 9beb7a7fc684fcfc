// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Occupancy pre-filter: a hashed bit array answering "might this cell hold anything?".
//!
//! Distinct cells can hash to the same bit, so a set bit only means *maybe occupied*.
//! A cell that was [`set`](OccupancyFilter::set) always reads back as set until the next
//! [`clear`](OccupancyFilter::clear). There are no false negatives.

use parking_lot::Mutex;

use crate::types::GridKey;

/// Default number of 64-bit words (524 288 bits).
pub const DEFAULT_WORDS: usize = 8192;

/// Hard upper bound on the number of words (4 MiB of bits).
pub const MAX_WORDS: usize = 65536;

/// Offset applied to cell coordinates before hashing so negative cells hash like positive ones.
const COORD_OFFSET: i64 = 16384;

const PRIME_X: u64 = 73_856_093;
const PRIME_Y: u64 = 19_349_669;

/// How many index wraps are reported through the log before going quiet.
const WRAP_LOG_LIMIT: u64 = 10;

#[derive(Debug)]
struct Bits {
    words: Box<[u64]>,
    wraps: u64,
}

/// Fixed-capacity hashed occupancy bit set, guarded by a single mutex.
#[derive(Debug)]
pub struct OccupancyFilter {
    inner: Mutex<Bits>,
}

impl Default for OccupancyFilter {
    fn default() -> Self {
        Self::new(DEFAULT_WORDS)
    }
}

impl OccupancyFilter {
    /// Create a filter with `words` 64-bit words.
    ///
    /// The request is clamped into `1..=MAX_WORDS`.
    pub fn new(words: usize) -> Self {
        let words = words.clamp(1, MAX_WORDS);
        Self {
            inner: Mutex::new(Bits {
                words: vec![0_u64; words].into_boxed_slice(),
                wraps: 0,
            }),
        }
    }

    /// Total number of bits.
    pub fn capacity_bits(&self) -> usize {
        self.inner.lock().words.len() * 64
    }

    /// Mark a cell as occupied.
    pub fn set(&self, key: GridKey) {
        let mut bits = self.inner.lock();
        let (word, mask) = bits.locate(key);
        bits.words[word] |= mask;
    }

    /// Whether a cell might be occupied.
    pub fn is_set(&self, key: GridKey) -> bool {
        let mut bits = self.inner.lock();
        let (word, mask) = bits.locate(key);
        bits.words[word] & mask != 0
    }

    /// Reset every bit. The wrap counter is cumulative and survives clears.
    pub fn clear(&self) {
        self.inner.lock().words.fill(0);
    }

    /// Number of times an index had to be wrapped back into range.
    ///
    /// Anything other than zero means the hash or the sizing needs retuning.
    pub fn index_wrap_count(&self) -> u64 {
        self.inner.lock().wraps
    }
}

/// Spatial hash of a cell key. Not injective: aliasing is expected.
fn hash_key(key: GridKey) -> u64 {
    #[allow(
        clippy::cast_sign_loss,
        reason = "Offset coordinates are reinterpreted as raw bits for hashing."
    )]
    let (x, y) = (
        (i64::from(key.x) + COORD_OFFSET) as u64,
        (i64::from(key.y) + COORD_OFFSET) as u64,
    );
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Rotations intentionally act on the low 32 bits."
    )]
    let (rx, ry) = ((x as u32).rotate_left(13), (y as u32).rotate_left(7));
    x.wrapping_mul(PRIME_X) ^ y.wrapping_mul(PRIME_Y) ^ u64::from(rx) ^ u64::from(ry)
}

impl Bits {
    /// Word index and bit mask for `key`.
    fn locate(&mut self, key: GridKey) -> (usize, u64) {
        let len = self.words.len();
        let total = len as u64 * 64;
        let idx = hash_key(key) % total;
        #[allow(
            clippy::cast_possible_truncation,
            reason = "idx < total, and total fits in usize."
        )]
        let mut word = (idx / 64) as usize;
        let mask = 1_u64 << (idx % 64);
        if word >= len {
            self.wraps += 1;
            if self.wraps <= WRAP_LOG_LIMIT {
                log::warn!(
                    "occupancy index out of range: word {word} >= {len} for cell ({}, {}), \
                     hash index {idx}; total wraps {}",
                    key.x,
                    key.y,
                    self.wraps
                );
            }
            word %= len;
        }
        (word, mask)
    }
}
