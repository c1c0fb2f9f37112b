use md5::{Digest, Md5};
use sha2::Sha256;

const STABLE_HASH_MODULUS: u128 = 1_000_000_000_000;

/// Deterministic, platform-independent hash of a seed string.
///
/// `int(md5(seed), 16) mod 10^12`. Seeds the shuffle PRNG, so the value must
/// never depend on process state.
pub fn stable_hash(seed: &str) -> u64 {
    let digest = Md5::digest(seed.as_bytes());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest);
    (u128::from_be_bytes(bytes) % STABLE_HASH_MODULUS) as u64
}

/// Lowercase hex SHA-256 of `input`.
pub(crate) fn sha256_hex(input: &str) -> String {
    format!("{:x}", Sha256::digest(input.as_bytes()))
}
