use zeroize::Zeroize;

use crate::permute::permute;

/// Bytes emitted per advance: the whole 256-bit state.
pub const BLOCK_LEN: usize = 32;

/// Absorption rounds per advance; each consumes 4 bytes of the old state.
const ROUNDS: usize = 8;

/// The 256-bit generator state: four 64-bit words, reinterpreted as a
/// 32-byte little-endian buffer (w1 first) for absorption and extraction.
///
/// `advance` is feedback-only: the new state is purely a function of the old
/// one, and doubles as the output block. There is no counter or nonce, so
/// any full output block determines the entire rest of the stream. Known
/// property of the construction, kept as-is.
#[derive(Clone)]
pub struct MixState {
    words: [u64; 4],
}

impl MixState {
    /// Seeded initial state: the 64-bit seed occupies w1, the remaining
    /// 192 bits start at zero and only pick up entropy through mixing.
    pub fn from_seed(seed: u64) -> Self {
        MixState {
            words: [seed, 0, 0, 0],
        }
    }

    pub fn from_words(words: [u64; 4]) -> Self {
        MixState { words }
    }

    pub fn words(&self) -> [u64; 4] {
        self.words
    }

    /// The state as its 32-byte output block.
    pub fn to_block(&self) -> [u8; BLOCK_LEN] {
        let mut block = [0u8; BLOCK_LEN];
        for (chunk, word) in block.chunks_exact_mut(8).zip(self.words) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        block
    }

    /// One update cycle: absorb the current 32-byte view into four fresh
    /// accumulators over 8 rounds, one permutation pass per round, then
    /// replace the state with the accumulators.
    ///
    /// Round `j` consumes the 4 bytes at offsets `28-4j .. 31-4j`, walking
    /// the old block from the high end backward, and spreads them one per
    /// word, shifted left by `j*8` bits.
    pub fn advance(&mut self) {
        let mut block = self.to_block();
        let mut w = [0u64; 4];
        for round in 0..ROUNDS {
            let base = BLOCK_LEN - 4 - 4 * round;
            w[0] ^= u64::from(block[base]) << (round * 8);
            w[1] ^= u64::from(block[base + 1]) << (round * 8);
            w[2] ^= u64::from(block[base + 2]) << (round * 8);
            w[3] ^= u64::from(block[base + 3]) << (round * 8);
            permute(&mut w);
        }
        self.words = w;
        block.zeroize();
    }
}

impl Drop for MixState {
    fn drop(&mut self) {
        self.words.zeroize();
    }
}
