use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::hash::{sha256_hex, stable_hash};

/// How a seed's numeric value is rendered.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeedFormat {
    /// Decimal digits, zero-padded to the width of `n!`.
    #[default]
    #[serde(alias = "digits", alias = "digits_only", alias = "numeric")]
    DigitsOnly,
    /// SHA-256 hex digest of the decimal value, truncated to the width of `n!`.
    #[serde(alias = "alphanumeric", alias = "alpha_numeric", alias = "hex")]
    AlphaNumeric,
}

/// Entropy sources for a primary seed.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct SeedInputs {
    pub track_count: u64,
    /// Generation time in Unix seconds.
    pub timestamp: u64,
    /// Combined size of all tracks in bytes.
    pub total_size: u64,
    /// Caller-supplied random component, fixed for a session.
    pub entropy: u64,
    /// Auto-regeneration counter.
    pub iteration: u64,
}

/// `n!` as an arbitrary-precision integer: the size of the permutation group.
pub fn factorial(n: u64) -> BigUint {
    let mut acc = BigUint::one();
    for i in 2..=n {
        acc *= i;
    }
    acc
}

/// Number of decimal digits in `value`.
pub fn digit_count(value: &BigUint) -> usize {
    value.to_str_radix(10).len()
}

/// Reduce into the permutation space. A modulus of 0 or 1 leaves nothing to permute.
fn reduce(value: BigUint, fact: &BigUint) -> BigUint {
    if *fact <= BigUint::one() {
        BigUint::zero()
    } else {
        value % fact
    }
}

fn render(value: &BigUint, fact: &BigUint, format: SeedFormat) -> String {
    let width = digit_count(fact);
    let decimal = value.to_str_radix(10);
    match format {
        SeedFormat::DigitsOnly => format!("{decimal:0>width$}"),
        SeedFormat::AlphaNumeric => {
            let mut hex = sha256_hex(&decimal);
            hex.truncate(width);
            hex
        }
    }
}

/// Reproducible primary seed derived from library shape and generation time.
pub fn derive_primary(inputs: &SeedInputs, format: SeedFormat) -> String {
    let fact = factorial(inputs.track_count);

    let base = BigUint::from(inputs.timestamp)
        * BigUint::from(inputs.track_count)
        * BigUint::from(inputs.total_size)
        + BigUint::from(inputs.entropy)
        + BigUint::from(inputs.iteration);
    let value = reduce(base, &fact);

    debug!(
        track_count = inputs.track_count,
        timestamp = inputs.timestamp,
        total_size = inputs.total_size,
        iteration = inputs.iteration,
        digits = digit_count(&fact),
        "derived primary seed value {value}"
    );

    render(&value, &fact, format)
}

/// Numeric value of a seed string.
///
/// Seeds are read as base 16 so both digit-only and hex seeds parse; free-form
/// user text falls back to its stable hash.
pub fn seed_value(seed: &str) -> BigUint {
    let trimmed = seed.trim();
    BigUint::parse_bytes(trimmed.as_bytes(), 16)
        .unwrap_or_else(|| BigUint::from(stable_hash(trimmed)))
}

fn random_bits(rng: &mut impl RngCore, bytes: usize) -> BigUint {
    let mut buf = vec![0u8; bytes];
    rng.fill_bytes(&mut buf);
    BigUint::from_bytes_be(&buf)
}

/// A second seed layered on `primary_seed` that cannot be reproduced from it.
///
/// `rng` should be an OS-seeded generator in production; the value is meant to be
/// logged, not replayed.
pub fn derive_shadow<R: Rng>(
    track_count: u64,
    primary_seed: &str,
    format: SeedFormat,
    rng: &mut R,
) -> String {
    let fact = factorial(track_count);

    let r = random_bits(rng, 32);
    let candidates = [
        BigUint::one(),
        random_bits(rng, 16),
        random_bits(rng, 8),
        BigUint::one(),
        BigUint::from(rng.gen_range(0u8..16)),
    ];

    let mut divisor = candidates[rng.gen_range(0..candidates.len())].clone();
    if divisor.is_zero() || (divisor > r && !divisor.is_one()) {
        divisor = candidates
            .iter()
            .filter(|c| !c.is_zero() && **c <= r)
            .max()
            .cloned()
            .unwrap_or_else(BigUint::one);
    }

    let result = &r / &divisor;
    let value = reduce(seed_value(primary_seed) + result + BigUint::one(), &fact);

    debug!(track_count, divisor = %divisor, "derived shadow seed value {value}");

    render(&value, &fact, format)
}

/// Strip leading zeros; an all-zero seed becomes `"0"`.
pub fn trim_seed(seed: &str) -> String {
    let trimmed = seed.trim().trim_start_matches('0');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
