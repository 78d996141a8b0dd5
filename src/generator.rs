//! The byte-stream generator: seeding lifecycle, output assembly, and the
//! shared serialized handle.

use std::sync::{Arc, Mutex, MutexGuard};

use rand_core::{impls, RngCore};

use crate::entropy::{EntropySource, OsEntropy};
use crate::error::QuadMixError;
use crate::state::{MixState, BLOCK_LEN};

/// Seeding lifecycle. The transition to `Seeded` happens at most once, on
/// the first request served; it never reverts.
enum Lifecycle {
    Unseeded,
    Seeded,
}

/// Pseudo-random byte-stream generator over a 256-bit feedback state.
///
/// The state is owned by the generator and advances in place: every request
/// continues the stream from wherever the previous one left it. Requests
/// take `&mut self`; for concurrent callers use [`into_shared`].
///
/// [`into_shared`]: QuadMixRng::into_shared
pub struct QuadMixRng<S: EntropySource = OsEntropy> {
    state: MixState,
    lifecycle: Lifecycle,
    entropy: S,
}

impl QuadMixRng<OsEntropy> {
    /// A generator seeded lazily from the operating system RNG.
    pub fn new() -> Self {
        QuadMixRng::with_entropy(OsEntropy)
    }
}

impl Default for QuadMixRng<OsEntropy> {
    fn default() -> Self {
        QuadMixRng::new()
    }
}

impl<S: EntropySource> QuadMixRng<S> {
    /// A generator seeded lazily from the given entropy source.
    ///
    /// # Examples
    ///
    /// ```
    /// use quadmixrng::{EntropySource, QuadMixError, QuadMixRng};
    ///
    /// struct Fixed(u64);
    ///
    /// impl EntropySource for Fixed {
    ///     fn raw_seed(&mut self) -> Result<u64, QuadMixError> {
    ///         Ok(self.0)
    ///     }
    /// }
    ///
    /// let mut a = QuadMixRng::with_entropy(Fixed(7));
    /// let mut b = QuadMixRng::with_entropy(Fixed(7));
    /// assert_eq!(a.generate(64).unwrap(), b.generate(64).unwrap());
    /// ```
    pub fn with_entropy(entropy: S) -> Self {
        QuadMixRng {
            state: MixState::from_words([0; 4]),
            lifecycle: Lifecycle::Unseeded,
            entropy,
        }
    }

    /// Draws the one-time seed on the first request. A failed draw leaves
    /// the lifecycle at `Unseeded`, so a later request retries.
    fn ensure_seeded(&mut self) -> Result<(), QuadMixError> {
        if let Lifecycle::Unseeded = self.lifecycle {
            let seed = self.entropy.raw_seed()?;
            self.state = MixState::from_seed(seed);
            self.lifecycle = Lifecycle::Seeded;
            log::debug!("generator seeded from platform entropy");
        }
        Ok(())
    }

    /// Fills `out` with the next `out.len()` bytes of the stream.
    ///
    /// Whole 32-byte blocks are emitted verbatim, one advance each; a
    /// partial final block takes the prefix of one more advance. Fails only
    /// by propagating a first-time seeding failure.
    pub fn fill(&mut self, out: &mut [u8]) -> Result<(), QuadMixError> {
        self.ensure_seeded()?;
        if out.len() >= BLOCK_LEN {
            let mut blocks = out.chunks_exact_mut(BLOCK_LEN);
            for block in &mut blocks {
                self.state.advance();
                block.copy_from_slice(&self.state.to_block());
            }
            let tail = blocks.into_remainder();
            if !tail.is_empty() {
                self.state.advance();
                tail.copy_from_slice(&self.state.to_block()[..tail.len()]);
            }
            return Ok(());
        }
        // Short requests, the empty one included, still cost one advance.
        self.state.advance();
        out.copy_from_slice(&self.state.to_block()[..out.len()]);
        Ok(())
    }

    /// Returns the next `len` bytes of the stream.
    pub fn generate(&mut self, len: usize) -> Result<Vec<u8>, QuadMixError> {
        let mut out = vec![0u8; len];
        self.fill(&mut out)?;
        Ok(out)
    }

    /// The generator is read-only: every write is rejected and the state is
    /// left untouched.
    pub fn write(&self, _input: &[u8]) -> Result<usize, QuadMixError> {
        log::warn!("write rejected: the generator is read-only");
        Err(QuadMixError::UnsupportedOperation)
    }

    /// Wraps the generator in a mutual-exclusion domain shared across
    /// threads. Concurrent requests are strictly serialized: the advances
    /// form one total order, each request occupying a contiguous run.
    pub fn into_shared(self) -> SharedQuadMixRng<S> {
        SharedQuadMixRng {
            inner: Arc::new(Mutex::new(self)),
        }
    }
}

impl<S: EntropySource> RngCore for QuadMixRng<S> {
    fn next_u32(&mut self) -> u32 {
        impls::next_u32_via_fill(self)
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_fill(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.try_fill_bytes(dest)
            .expect("platform entropy source failed on first use")
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill(dest).map_err(rand_core::Error::new)
    }
}

/// Cloneable handle to a generator behind a mutex.
///
/// Every request locks for its whole duration, so the single-total-order
/// guarantee on advances holds across threads.
pub struct SharedQuadMixRng<S: EntropySource = OsEntropy> {
    inner: Arc<Mutex<QuadMixRng<S>>>,
}

impl<S: EntropySource> Clone for SharedQuadMixRng<S> {
    fn clone(&self) -> Self {
        SharedQuadMixRng {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: EntropySource> SharedQuadMixRng<S> {
    fn lock(&self) -> MutexGuard<'_, QuadMixRng<S>> {
        // The generator cannot panic mid-request, so a poisoned lock still
        // guards a consistent state.
        self.inner.lock().unwrap_or_else(|err| err.into_inner())
    }

    /// Serialized [`QuadMixRng::fill`].
    pub fn fill(&self, out: &mut [u8]) -> Result<(), QuadMixError> {
        self.lock().fill(out)
    }

    /// Serialized [`QuadMixRng::generate`].
    pub fn generate(&self, len: usize) -> Result<Vec<u8>, QuadMixError> {
        self.lock().generate(len)
    }

    /// Serialized [`QuadMixRng::write`]; rejected like the exclusive path.
    pub fn write(&self, input: &[u8]) -> Result<usize, QuadMixError> {
        self.lock().write(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedEntropy(u64);

    impl EntropySource for FixedEntropy {
        fn raw_seed(&mut self) -> Result<u64, QuadMixError> {
            Ok(self.0)
        }
    }

    struct CountingEntropy {
        seed: u64,
        calls: u32,
    }

    impl EntropySource for CountingEntropy {
        fn raw_seed(&mut self) -> Result<u64, QuadMixError> {
            self.calls += 1;
            Ok(self.seed)
        }
    }

    struct BrokenEntropy;

    impl EntropySource for BrokenEntropy {
        fn raw_seed(&mut self) -> Result<u64, QuadMixError> {
            Err(QuadMixError::EntropyUnavailable)
        }
    }

    const SEED: u64 = 0x0123_4567_89ab_cdef;

    fn reference_stream(len: usize) -> Vec<u8> {
        let mut state = MixState::from_seed(SEED);
        let mut out = Vec::new();
        while out.len() < len {
            state.advance();
            out.extend_from_slice(&state.to_block());
        }
        out.truncate(len);
        out
    }

    #[test]
    fn generate_matches_sequential_advances() {
        let mut rng = QuadMixRng::with_entropy(FixedEntropy(SEED));
        assert_eq!(rng.generate(96).unwrap(), reference_stream(96));
    }

    #[test]
    fn entropy_drawn_exactly_once() {
        let mut rng = QuadMixRng::with_entropy(CountingEntropy {
            seed: SEED,
            calls: 0,
        });
        for len in [0, 1, 31, 32, 33, 100] {
            rng.generate(len).unwrap();
        }
        assert_eq!(rng.entropy.calls, 1);
    }

    #[test]
    fn entropy_failure_surfaces_and_allows_retry() {
        let mut rng = QuadMixRng::with_entropy(BrokenEntropy);
        assert_eq!(
            rng.generate(8).unwrap_err(),
            QuadMixError::EntropyUnavailable
        );
        // Still unseeded, so the next request hits the source again.
        assert!(matches!(rng.lifecycle, Lifecycle::Unseeded));
    }

    #[test]
    fn write_is_rejected_without_touching_state() {
        let mut rng = QuadMixRng::with_entropy(FixedEntropy(SEED));
        let first = rng.generate(32).unwrap();
        assert_eq!(
            rng.write(b"some input").unwrap_err(),
            QuadMixError::UnsupportedOperation
        );
        let second = rng.generate(32).unwrap();
        assert_eq!([first, second].concat(), reference_stream(64));
    }

    #[test]
    fn zero_length_request_still_advances() {
        let mut rng = QuadMixRng::with_entropy(FixedEntropy(SEED));
        assert!(rng.generate(0).unwrap().is_empty());
        // The empty request consumed block 1, so block 2 comes out next.
        assert_eq!(rng.generate(32).unwrap(), &reference_stream(64)[32..]);
    }

    #[test]
    fn rng_core_next_u64_reads_first_word() {
        let mut rng = QuadMixRng::with_entropy(FixedEntropy(SEED));
        // 8 bytes is a short request: one advance, little-endian prefix.
        assert_eq!(rng.next_u64(), 0x2eaea53eb7f56000);
    }
}
