use sha2::{Digest, Sha256};

/// Hash function used to derive selectors and other identifiers.
///
/// Chains pick their own (Keccak-256, SM3, ...); the node injects one so
/// selectors agree with what its clients compute.
pub trait Hasher: std::fmt::Debug {
    fn hash(&self, data: &[u8]) -> [u8; 32];
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256Hasher;

impl Hasher for Sha256Hasher {
    fn hash(&self, data: &[u8]) -> [u8; 32] {
        let digest = Sha256::digest(data);
        let mut out = [0u8; 32];
        out.copy_from_slice(&digest);
        out
    }
}
