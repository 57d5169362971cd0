//! Incremental token hashing
//!
//! Runs of classified characters fold into a single `u32` fingerprint. The
//! same mixing function serves both the attribute-key scanner and the name
//! tokenizer; determinism is what makes the lookup tables and the
//! deduplication key work at all. Collisions are not detected: two spellings
//! that fold to the same value are indistinguishable, which is an accepted
//! property of the design.

use crate::charmap::{keyword_word, name_fold, KeywordWord};

/// Fingerprint of one token or cleaned name.
pub type TokenHash = u32;

/// Hash accumulator seed. A run that never folds a character stays at this
/// value, so the scanners treat it as "no token".
pub const EMPTY: TokenHash = 0;

/// Fold one classified character into the running hash.
#[inline]
pub fn fold(hash: TokenHash, ch: u8) -> TokenHash {
    hash.wrapping_mul(43) ^ ch as TokenHash
}

/// Hash a byte slice with the name alphabet.
///
/// Separator bytes are skipped rather than folded, so `"United Kingdom"`
/// and `"UnitedKingdom"` produce the same value, and a table spelling
/// matches a scanned run or a whole parenthesized phrase alike.
pub fn name_hash_bytes(bytes: &[u8]) -> TokenHash {
    let mut hash = EMPTY;
    for &byte in bytes {
        if let Some(folded) = name_fold(byte) {
            hash = fold(hash, folded);
        }
    }
    hash
}

/// Hash a token spelling with the name alphabet.
pub fn name_hash(token: &str) -> TokenHash {
    name_hash_bytes(token.as_bytes())
}

/// Hash an attribute-key spelling with the keyword alphabet.
pub fn keyword_hash(key: &str) -> TokenHash {
    let mut hash = EMPTY;
    for &byte in key.as_bytes() {
        if let KeywordWord::Ordinary(folded) = keyword_word(byte) {
            hash = fold(hash, folded);
        }
    }
    hash
}
