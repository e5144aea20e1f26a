//! Splitting windows into four blocks and assembling pair qgrams.

use crate::index::types::{BlockPair, NUM_BLOCKS};

/// The four equal blocks of a window
pub type Blocks<'a> = [&'a [u8]; NUM_BLOCKS];

/// Split `s` into four blocks of `s.len() / 4` bytes.
///
/// Returns `None` when the length is not a positive multiple of 4.
pub fn partition(s: &[u8]) -> Option<Blocks<'_>> {
    if s.is_empty() || s.len() % NUM_BLOCKS != 0 {
        return None;
    }
    let b = s.len() / NUM_BLOCKS;
    Some([&s[..b], &s[b..2 * b], &s[2 * b..3 * b], &s[3 * b..]])
}

/// Blocks of the window starting at `start` in `text`.
///
/// The caller guarantees `start + 4 * block_len <= text.len()`.
#[inline]
pub fn partition_at(text: &[u8], start: usize, block_len: usize) -> Blocks<'_> {
    let window = &text[start..start + NUM_BLOCKS * block_len];
    let (b0, rest) = window.split_at(block_len);
    let (b1, rest) = rest.split_at(block_len);
    let (b2, b3) = rest.split_at(block_len);
    [b0, b1, b2, b3]
}

/// The six block pairs, in the order they are indexed and probed
#[inline]
pub fn pairs() -> &'static [BlockPair] {
    &BlockPair::ALL
}

/// Write `block[first] ++ block[second]` into `buf`, replacing its contents
#[inline]
pub fn qgram_into(blocks: &Blocks<'_>, pair: BlockPair, buf: &mut Vec<u8>) {
    buf.clear();
    buf.extend_from_slice(blocks[pair.first()]);
    buf.extend_from_slice(blocks[pair.second()]);
}

/// Owned qgram for `pair`
pub fn qgram(blocks: &Blocks<'_>, pair: BlockPair) -> Vec<u8> {
    let mut buf = Vec::with_capacity(2 * blocks[0].len());
    qgram_into(blocks, pair, &mut buf);
    buf
}
