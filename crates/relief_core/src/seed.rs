//! Stable seed derivation for reproducible "simulated" decisions.
//!
//! Requirement variance and route obstructions are drawn from a [`StdRng`]
//! seeded by a digest of the decision's inputs, so identical inputs always
//! produce identical plans.

use rand::rngs::StdRng;
use rand::SeedableRng;
use sha2::{Digest, Sha256};

/// Derive a 64-bit seed from the engine seed and an ordered list of key parts.
///
/// Parts are length-prefixed before hashing so `["ab", "c"]` and `["a", "bc"]`
/// produce different seeds.
pub fn derive_seed(engine_seed: u64, parts: &[&str]) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(engine_seed.to_le_bytes());
    for part in parts {
        hasher.update((part.len() as u64).to_le_bytes());
        hasher.update(part.as_bytes());
    }
    let digest = hasher.finalize();
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(head)
}

/// A generator seeded from [`derive_seed`].
pub fn seeded_rng(engine_seed: u64, parts: &[&str]) -> StdRng {
    StdRng::seed_from_u64(derive_seed(engine_seed, parts))
}
