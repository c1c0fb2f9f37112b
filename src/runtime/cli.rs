use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use playmix::playlist::PlaylistFormat;
use playmix::seed::SeedFormat;

/// Seeded soft-shuffle playlist generator.
#[derive(Parser, Debug)]
#[command(name = "playmix")]
#[command(about = "Generate and remix playlists with reproducible seeded shuffles")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan folders for media files and write a shuffled playlist.
    Generate {
        /// Folders to scan
        #[arg(required = true)]
        folders: Vec<PathBuf>,

        /// Playlist name (defaults to `generator.name` from the config)
        #[arg(short, long)]
        name: Option<String>,

        #[command(flatten)]
        shuffle: ShuffleArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Merge existing playlists, reshuffle them and write the result.
    Remix {
        /// Playlist files to merge
        #[arg(required = true)]
        playlists: Vec<PathBuf>,

        /// Playlist name (defaults to `<first input>_mixed`)
        #[arg(short, long)]
        name: Option<String>,

        #[command(flatten)]
        shuffle: ShuffleArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print the effective configuration.
    Config,
}

#[derive(Args, Debug, Default)]
pub struct ShuffleArgs {
    /// Shuffle seed; blank or 0 derives one
    #[arg(short, long, default_value = "")]
    pub seed: String,

    /// Block reverse step; 0 disables, 1 picks a random step
    #[arg(long, default_value = "")]
    pub step: String,

    /// Extra swaps after the shuffle; 0 for none, blank or 1 for automatic
    #[arg(short, long, default_value = "")]
    pub intensity: String,

    /// Shuffle with a shadow seed layered on the primary seed
    #[arg(long)]
    pub shadow: bool,
}

#[derive(Args, Debug, Default)]
pub struct OutputArgs {
    /// Output playlist format
    #[arg(short, long, env = "PLAYMIX_FORMAT")]
    pub format: Option<PlaylistFormat>,

    /// Seed rendering: `digits` or `alphanumeric`
    #[arg(long, value_parser = parse_seed_format)]
    pub seed_format: Option<SeedFormat>,

    /// Directory for the written playlist
    #[arg(short, long, env = "PLAYMIX_OUT_DIR")]
    pub out_dir: Option<PathBuf>,
}

pub fn parse_seed_format(text: &str) -> Result<SeedFormat, String> {
    match text.trim().to_ascii_lowercase().as_str() {
        "digits" | "digits-only" | "numeric" => Ok(SeedFormat::DigitsOnly),
        "alphanumeric" | "alpha-numeric" | "hex" => Ok(SeedFormat::AlphaNumeric),
        other => Err(format!("unknown seed format {other:?} (expected digits or alphanumeric)")),
    }
}
