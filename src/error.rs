//! Error types for the quadmix generator.

use std::fmt;

/// Errors produced by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuadMixError {
    /// The generator is read-only; writes are rejected unconditionally.
    UnsupportedOperation,
    /// The platform entropy source could not produce a seed value.
    EntropyUnavailable,
}

impl fmt::Display for QuadMixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuadMixError::UnsupportedOperation => {
                write!(f, "operation not supported: the generator is read-only")
            }
            QuadMixError::EntropyUnavailable => {
                write!(f, "platform entropy source is unavailable")
            }
        }
    }
}

impl std::error::Error for QuadMixError {}
