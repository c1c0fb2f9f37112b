use rand::Rng;

use crate::error::ValidationError;

/// How many extra pairwise swaps follow the baseline permutation.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Intensity {
    /// Only the baseline permutation.
    Baseline,
    /// Swap count derived from the seed hash (60% to 107% of the track count).
    #[default]
    Auto,
    /// Exactly this many swaps.
    Swaps(usize),
}

impl Intensity {
    /// Parse user text: blank or `1` is auto, `0` is baseline, `n >= 2` is a fixed count.
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Self::Auto);
        }
        let n: i64 = text
            .parse()
            .map_err(|_| ValidationError::Intensity(text.to_string()))?;
        match n {
            n if n < 0 => Err(ValidationError::Intensity(text.to_string())),
            0 => Ok(Self::Baseline),
            1 => Ok(Self::Auto),
            n => Ok(Self::Swaps(n as usize)),
        }
    }
}

/// Block size for [`apply_block_reverse`](super::apply_block_reverse).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum ReverseStep {
    #[default]
    None,
    /// Pick a block size uniformly from `2..=21`.
    Random,
    Fixed(usize),
}

impl ReverseStep {
    /// Parse user text: blank or `0` disables, `1` requests a random step.
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Self::None);
        }
        let n: i64 = text
            .parse()
            .map_err(|_| ValidationError::ReverseStep(text.to_string()))?;
        match n {
            n if n < 0 => Err(ValidationError::ReverseStep(text.to_string())),
            0 => Ok(Self::None),
            1 => Ok(Self::Random),
            n => Ok(Self::Fixed(n as usize)),
        }
    }

    /// Concrete block size, or `None` when reversing is disabled.
    pub fn resolve<R: Rng>(self, rng: &mut R) -> Option<usize> {
        match self {
            Self::None => None,
            Self::Random => Some(rng.gen_range(2..=21)),
            Self::Fixed(n) => Some(n),
        }
    }
}
