//! Platform entropy capability.
//!
//! The generator consumes exactly one 64-bit seed from its environment,
//! lazily, on the first byte request. The source sits behind a trait so
//! tests and embedders can supply deterministic seeds.

use crate::error::QuadMixError;

/// A source of 64-bit seed values.
pub trait EntropySource {
    /// Draws one 64-bit seed from the underlying source.
    fn raw_seed(&mut self) -> Result<u64, QuadMixError>;
}

/// Operating-system entropy via the `getrandom` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn raw_seed(&mut self) -> Result<u64, QuadMixError> {
        let mut buf = [0u8; 8];
        getrandom::getrandom(&mut buf).map_err(|err| {
            log::error!("platform entropy unavailable: {err}");
            QuadMixError::EntropyUnavailable
        })?;
        Ok(u64::from_le_bytes(buf))
    }
}
