//! quadmixrng: a feedback byte-stream generator over a 256-bit state.
//!
//! From one 64-bit platform seed, the generator produces an unbounded
//! pseudo-random byte stream by repeatedly passing its four 64-bit state
//! words through a fixed shift/xor/multiply/add permutation network and
//! emitting the resulting 32-byte blocks, truncating the last block to fit
//! the requested length.
//!
//! This is a non-cryptographic bit-mixing construction, reproduced
//! bit-exactly. In particular it runs in pure feedback mode: the next state
//! is a function of the previous output block alone, so anyone holding one
//! full block can compute the entire rest of the stream. Do not use it
//! where an attacker-facing RNG is required.
//!
//! # Architecture
//!
//! ```text
//! permute    (leaf: one pass of three mixing rounds over four u64 words)
//!     ↑
//! MixState   (256-bit state; advance = absorb old block, 8 permute passes)
//!     ↑
//! QuadMixRng (seeding lifecycle + assembly of N-byte requests from blocks)
//! ```
//!
//! # Examples
//!
//! ```
//! use quadmixrng::QuadMixRng;
//!
//! let mut rng = QuadMixRng::new();
//! let bytes = rng.generate(48).unwrap();
//! assert_eq!(bytes.len(), 48);
//! ```
//!
//! Concurrent callers share one serialized stream:
//!
//! ```
//! use quadmixrng::QuadMixRng;
//!
//! let shared = QuadMixRng::new().into_shared();
//! let handle = shared.clone();
//! let worker = std::thread::spawn(move || handle.generate(64).unwrap());
//! let here = shared.generate(64).unwrap();
//! let there = worker.join().unwrap();
//! assert_eq!((here.len(), there.len()), (64, 64));
//! ```

pub mod entropy;
pub mod error;
pub mod generator;
mod permute;
pub mod state;

pub use entropy::{EntropySource, OsEntropy};
pub use error::QuadMixError;
pub use generator::{QuadMixRng, SharedQuadMixRng};
pub use state::{MixState, BLOCK_LEN};
