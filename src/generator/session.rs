use std::fs;

use chrono::{DateTime, Local};
use rand::{Rng, RngCore};
use tracing::{debug, info};

use crate::config::GeneratorSettings;
use crate::error::{Result, ValidationError};
use crate::library::{Track, format_duration, renumber, total_duration};
use crate::playlist::{PlaylistDocument, PlaylistFormat};
use crate::seed::{SeedFormat, SeedInputs, derive_primary, derive_shadow, trim_seed};
use crate::shuffle::{apply_block_reverse, soft_shuffle};

use super::request::ShuffleRequest;

/// Per-session shuffle state.
///
/// Holds the auto-seed iteration counter and a random component drawn once when
/// the session starts, so repeated auto requests walk through distinct seeds.
#[derive(Debug, Clone)]
pub struct Generator {
    seed_format: SeedFormat,
    format: PlaylistFormat,
    entropy: u64,
    iteration: u64,
}

impl Generator {
    pub fn new(settings: &GeneratorSettings) -> Self {
        Self::with_entropy(settings, rand::thread_rng().next_u64())
    }

    /// Session with a fixed random component.
    pub fn with_entropy(settings: &GeneratorSettings, entropy: u64) -> Self {
        Self {
            seed_format: settings.seed_format,
            format: settings.playlist_format,
            entropy,
            iteration: 0,
        }
    }

    pub fn format(&self) -> PlaylistFormat {
        self.format
    }

    pub fn set_format(&mut self, format: PlaylistFormat) {
        self.format = format;
    }

    pub fn seed_format(&self) -> SeedFormat {
        self.seed_format
    }

    pub fn set_seed_format(&mut self, format: SeedFormat) {
        self.seed_format = format;
    }

    /// Iteration the next auto-derived seed will use.
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    /// Shuffle `tracks` into a document ready to write.
    ///
    /// Shadow seeds and random reverse steps draw from the thread RNG.
    pub fn shuffle(
        &mut self,
        tracks: Vec<Track>,
        request: &ShuffleRequest,
        now: DateTime<Local>,
        name: &str,
    ) -> Result<PlaylistDocument> {
        self.shuffle_with_rng(tracks, request, now, name, &mut rand::thread_rng())
    }

    /// [`Generator::shuffle`] with an explicit RNG for the non-reproducible parts.
    pub fn shuffle_with_rng<R: Rng>(
        &mut self,
        tracks: Vec<Track>,
        request: &ShuffleRequest,
        now: DateTime<Local>,
        name: &str,
        rng: &mut R,
    ) -> Result<PlaylistDocument> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if tracks.is_empty() {
            return Err(ValidationError::NoTracks.into());
        }

        let track_count = tracks.len() as u64;
        let primary = match &request.seed {
            Some(seed) => {
                self.iteration = 0;
                seed.clone()
            }
            None => {
                let inputs = SeedInputs {
                    track_count,
                    timestamp: u64::try_from(now.timestamp()).unwrap_or_default(),
                    total_size: tracks.iter().map(size_of).fold(0u64, u64::wrapping_add),
                    entropy: self.entropy,
                    iteration: self.iteration,
                };
                self.iteration += 1;
                trim_seed(&derive_primary(&inputs, self.seed_format))
            }
        };

        let shadow = request
            .use_shadow
            .then(|| trim_seed(&derive_shadow(track_count, &primary, self.seed_format, rng)));
        let active = shadow.clone().unwrap_or_else(|| primary.clone());
        debug!(primary = %primary, shadow = ?shadow, "seed selected");

        let outcome = soft_shuffle(tracks, &active, request.intensity);
        let mut tracks = outcome.tracks;

        let step = request.reverse_step.resolve(rng);
        if let Some(step) = step {
            apply_block_reverse(&mut tracks, step);
        }
        renumber(&mut tracks);

        let mut doc = PlaylistDocument::new(name, self.format, tracks);
        doc.generated_at = Some(now.naive_local());
        doc.duration = total_duration(&doc.tracks).map(format_duration);
        doc.primary_seed = Some(primary);
        doc.shadow_seed = shadow;
        doc.swap_count = Some(outcome.swap_count);
        doc.reverse_step = step;
        doc.track_count = Some(doc.tracks.len());

        info!(
            name,
            tracks = doc.tracks.len(),
            seed = %active,
            swaps = outcome.swap_count,
            reverse_step = step.unwrap_or(0),
            "shuffled playlist"
        );
        Ok(doc)
    }
}

/// Bytes on disk: the scanned size, or a fresh stat for playlist entries.
fn size_of(track: &Track) -> u64 {
    track
        .size_bytes
        .or_else(|| fs::metadata(&track.path).ok().map(|m| m.len()))
        .unwrap_or(0)
}
