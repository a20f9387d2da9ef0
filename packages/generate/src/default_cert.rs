//! Fallback certificate for a random placeholder domain

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::Result;

/// Number of random bytes hashed into the placeholder domain
pub const PLACEHOLDER_ENTROPY_BYTES: usize = 100;

/// Derive `<32 hex>.<32 hex>.<suffix>` from fresh OS randomness
///
/// # Errors
///
/// Returns [`crate::GenerateError::RandomSource`] if the OS random source
/// cannot be read.
pub fn placeholder_domain(suffix: &str) -> Result<String> {
    let mut random_bytes = [0u8; PLACEHOLDER_ENTROPY_BYTES];
    getrandom::fill(&mut random_bytes)?;

    let digest = hex::encode(Sha256::digest(random_bytes));
    let (first, second) = digest.split_at(digest.len() / 2);
    let domain = format!("{first}.{second}.{suffix}");

    debug!(%domain, "derived placeholder domain");
    Ok(domain)
}
