use crate::error::ValidationError;
use crate::seed::trim_seed;
use crate::shuffle::{Intensity, ReverseStep};

/// Validated user input for one shuffle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShuffleRequest {
    /// Explicit seed, already trimmed. `None` asks for a derived one.
    pub seed: Option<String>,
    pub reverse_step: ReverseStep,
    pub intensity: Intensity,
    /// Shuffle with a shadow seed layered on the primary one.
    pub use_shadow: bool,
}

impl ShuffleRequest {
    /// Validate raw text fields before anything is touched.
    ///
    /// A blank seed or exactly `"0"` means "derive one". Other zero runs such
    /// as `"00"` are explicit and trim to seed `"0"`.
    pub fn parse(
        seed_text: &str,
        step_text: &str,
        intensity_text: &str,
        use_shadow: bool,
    ) -> Result<Self, ValidationError> {
        let reverse_step = ReverseStep::parse(step_text)?;
        let intensity = Intensity::parse(intensity_text)?;

        let seed = seed_text.trim();
        let seed = (!seed.is_empty() && seed != "0").then(|| trim_seed(seed));

        Ok(Self {
            seed,
            reverse_step,
            intensity,
            use_shadow,
        })
    }
}
