use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::Local;
use tracing::{info, warn};

use playmix::config::{self, Settings};
use playmix::editor::Editor;
use playmix::generator::{Generator, ShuffleRequest};
use playmix::library::scan;
use playmix::playlist::{self, PlaylistDocument};

mod cli;
mod settings;

pub use cli::{Cli, Command, OutputArgs, ShuffleArgs};

pub fn run(cli: Cli) -> Result<()> {
    let settings = settings::load_settings();

    match cli.command {
        Command::Generate {
            folders,
            name,
            shuffle,
            output,
        } => generate(&settings, &folders, name, &shuffle, &output),
        Command::Remix {
            playlists,
            name,
            shuffle,
            output,
        } => remix(&settings, &playlists, name, &shuffle, &output),
        Command::Config => print_config(&settings),
    }
}

fn request(settings: &Settings, args: &ShuffleArgs) -> Result<ShuffleRequest> {
    let request = ShuffleRequest::parse(
        &args.seed,
        &args.step,
        &args.intensity,
        args.shadow || settings.generator.use_shadow_seed,
    )?;
    Ok(request)
}

fn generator(settings: &Settings, output: &OutputArgs) -> Generator {
    let mut generator = Generator::new(&settings.generator);
    if let Some(format) = output.format {
        generator.set_format(format);
    }
    if let Some(seed_format) = output.seed_format {
        generator.set_seed_format(seed_format);
    }
    generator
}

fn out_dir(settings: &Settings, output: &OutputArgs) -> Result<PathBuf> {
    match output.out_dir.clone().or_else(|| settings.generator.output_dir.clone()) {
        Some(dir) => Ok(dir),
        None => env::current_dir().context("failed to resolve the current directory"),
    }
}

fn report(doc: &PlaylistDocument, path: &std::path::Path) {
    println!("{}", path.display());
    println!("  tracks:  {}", doc.tracks.len());
    if let Some(seed) = &doc.primary_seed {
        println!("  seed:    {seed}");
    }
    if let Some(shadow) = &doc.shadow_seed {
        println!("  shadow:  {shadow}");
    }
    if let Some(swaps) = doc.swap_count.filter(|n| *n > 0) {
        println!("  swaps:   {swaps}");
    }
    if let Some(step) = doc.reverse_step {
        println!("  reverse: {step}");
    }
    if let Some(duration) = &doc.duration {
        println!("  length:  {duration}");
    }
}

fn generate(
    settings: &Settings,
    folders: &[PathBuf],
    name: Option<String>,
    shuffle: &ShuffleArgs,
    output: &OutputArgs,
) -> Result<()> {
    let request = request(settings, shuffle)?;

    let scanned = scan(folders, &settings.library);
    for (path, reason) in &scanned.failures {
        warn!(path = %path.display(), "skipped: {reason}");
    }
    if scanned.tracks.is_empty() {
        bail!("no media files found");
    }

    let name = name.unwrap_or_else(|| settings.generator.name.clone());
    let mut generator = generator(settings, output);
    let doc = generator.shuffle(scanned.tracks, &request, Local::now(), &name)?;

    let dir = out_dir(settings, output)?;
    let path = playlist::save(&doc, &dir)
        .with_context(|| format!("failed to save playlist into {}", dir.display()))?;
    info!(path = %path.display(), "playlist written");
    report(&doc, &path);
    Ok(())
}

fn remix(
    settings: &Settings,
    playlists: &[PathBuf],
    name: Option<String>,
    shuffle: &ShuffleArgs,
    output: &OutputArgs,
) -> Result<()> {
    let request = request(settings, shuffle)?;
    let mut generator = generator(settings, output);

    let mut editor = Editor::open(playlists, generator.format());
    if !editor.has_tracks() {
        bail!("no media entries could be read from the given playlists");
    }
    if let Some(name) = name {
        editor.set_name(&name)?;
    }

    editor.shuffle(&mut generator, &request, Local::now())?;

    let dir = out_dir(settings, output)?;
    let path = editor
        .save(&dir)
        .with_context(|| format!("failed to save playlist into {}", dir.display()))?;
    info!(path = %path.display(), "playlist written");
    report(&editor.to_document(), &path);
    Ok(())
}

fn print_config(settings: &Settings) -> Result<()> {
    match config::resolve_config_path() {
        Some(path) => println!("# config file: {}", path.display()),
        None => println!("# config file: none"),
    }
    let rendered = toml::to_string_pretty(settings).context("failed to render settings")?;
    print!("{rendered}");
    Ok(())
}
