//! Random byte sources.
//!
//! Every IV, salt and ephemeral scalar is drawn through [`EntropySource`].
//! Production code uses [`OsEntropy`]; tests inject seeded or failing sources
//! to exercise deterministic and error paths.

use crate::error::EciesError;

/// A cryptographically secure random byte source.
///
/// # Invariants
///
/// - Implementations used in production MUST be cryptographically secure
/// - Implementations MUST be safe to call from many threads at once
/// - A failure MUST be reported, never papered over with weak bytes
pub trait EntropySource: Send + Sync {
    /// Fill `buffer` entirely with random bytes.
    fn fill(&self, buffer: &mut [u8]) -> Result<(), EciesError>;

    /// Draw a fixed number of random bytes.
    fn array<const N: usize>(&self) -> Result<[u8; N], EciesError>
    where
        Self: Sized,
    {
        let mut bytes = [0u8; N];
        self.fill(&mut bytes)?;
        Ok(bytes)
    }
}

/// Operating system entropy via `getrandom`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&self, buffer: &mut [u8]) -> Result<(), EciesError> {
        getrandom::fill(buffer).map_err(|e| EciesError::EntropyFailure { reason: e.to_string() })
    }
}
