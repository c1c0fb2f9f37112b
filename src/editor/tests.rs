use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};
use tempfile::{TempDir, tempdir};

use super::*;
use crate::config::GeneratorSettings;
use crate::error::ValidationError;
use crate::generator::{Generator, ShuffleRequest};
use crate::library::{Track, TrackFlag};
use crate::playlist::{PlaylistFormat, read_file};
use crate::shuffle::{Intensity, soft_shuffle};

struct Fixture {
    _dir: TempDir,
    paths: Vec<PathBuf>,
}

fn fixture() -> Fixture {
    let dir = tempdir().unwrap();
    let first = dir.path().join("road trip.m3u8");
    let second = dir.path().join("extra.pls");
    let broken = dir.path().join("broken.xspf");
    fs::write(&first, "#EXTM3U\n#EXTINF:-1,Bee\n/m/b.mp3\n/m/_x.mp3\n/m/d.ogg\n").unwrap();
    fs::write(&second, "[playlist]\nFile1=/m/A.flac\nFile2=/m/c.wav\n").unwrap();
    fs::write(&broken, "<playlist>").unwrap();
    Fixture {
        paths: vec![first, second, broken],
        _dir: dir,
    }
}

fn file_names(tracks: &[Track]) -> Vec<String> {
    tracks.iter().map(Track::file_name).collect()
}

fn now() -> DateTime<Local> {
    Local.timestamp_opt(1_700_000_000, 0).unwrap()
}

fn session() -> Generator {
    Generator::with_entropy(&GeneratorSettings::default(), 1)
}

#[test]
fn open_merges_in_canonical_order_and_keeps_failures() {
    let fx = fixture();
    let editor = Editor::open(&fx.paths, PlaylistFormat::M3u8);

    assert_eq!(
        file_names(editor.tracks()),
        vec!["A.flac", "b.mp3", "c.wav", "d.ogg", "_x.mp3"]
    );
    assert_eq!(editor.tracks()[1].display_name, "Bee");
    assert_eq!(editor.tracks()[0].source_id, Some(1));
    let positions: Vec<usize> = editor.tracks().iter().map(|t| t.position).collect();
    assert_eq!(positions, vec![1, 2, 3, 4, 5]);

    assert_eq!(editor.name(), "road trip_mixed");
    assert_eq!(editor.sources.len(), 3);
    assert_eq!(editor.failures.len(), 1);
    assert_eq!(editor.failures[0].0, fx.paths[2]);
}

#[test]
fn suggested_name_falls_back_without_inputs() {
    let none: [&Path; 0] = [];
    assert_eq!(suggested_name(&none), "playlist_mixed");
    assert_eq!(suggested_name(&[Path::new("/p/jazz.xspf")]), "jazz_mixed");
}

#[test]
fn shuffle_always_starts_from_canonical_order() {
    let fx = fixture();
    let mut editor = Editor::open(&fx.paths, PlaylistFormat::Json);
    let mut generator = session();
    let request = ShuffleRequest::parse("42", "", "2", false).unwrap();

    let first = editor.shuffle(&mut generator, &request, now()).unwrap().clone();
    assert_eq!(first.format, PlaylistFormat::Json);
    assert_eq!(first.name, "road trip_mixed");

    editor.move_track(0, 4).unwrap();
    editor.remove(0).unwrap();

    let second = editor.shuffle(&mut generator, &request, now()).unwrap().clone();
    assert_eq!(file_names(&second.tracks), file_names(&first.tracks));

    let expected = soft_shuffle(editor.canonical().to_vec(), "42", Intensity::Swaps(2));
    assert_eq!(file_names(&second.tracks), file_names(&expected.tracks));
}

#[test]
fn edits_flag_rows_and_renumber() {
    let fx = fixture();
    let mut editor = Editor::open(&fx.paths, PlaylistFormat::M3u8);

    editor.rename(0, "Opening").unwrap();
    assert!(editor.tracks()[0].flags.contains(TrackFlag::NameModified));

    editor.set_path(2, "c-remaster.wav").unwrap();
    assert_eq!(editor.tracks()[2].path_str(), "/m/c-remaster.wav");
    assert!(editor.tracks()[2].flags.contains(TrackFlag::PathModified));

    editor.move_track(4, 0).unwrap();
    assert_eq!(editor.tracks()[0].file_name(), "_x.mp3");
    assert!(editor.tracks()[0].flags.contains(TrackFlag::Moved));
    assert_eq!(editor.tracks()[1].display_name, "Opening");

    let removed = editor.remove(1).unwrap();
    assert_eq!(removed.display_name, "Opening");
    let positions: Vec<usize> = editor.tracks().iter().map(|t| t.position).collect();
    assert_eq!(positions, vec![1, 2, 3, 4]);

    editor.restore(2).unwrap();
    let restored = &editor.tracks()[2];
    assert_eq!(restored.path_str(), "/m/c.wav");
    assert_eq!(restored.display_name, "c");
    assert_eq!(restored.flags.iter().collect::<Vec<_>>(), vec![TrackFlag::Restored]);
}

#[test]
fn edits_reject_out_of_range_rows() {
    let fx = fixture();
    let mut editor = Editor::open(&fx.paths, PlaylistFormat::M3u8);

    assert_eq!(
        editor.rename(9, "x").unwrap_err(),
        ValidationError::TrackIndex { index: 9, len: 5 }
    );
    assert!(editor.move_track(0, 5).is_err());
    assert!(editor.remove(5).is_err());
    assert!(editor.set_name("  ").is_err());
    assert_eq!(editor.tracks().len(), 5);
}

#[test]
fn save_writes_current_list() {
    let fx = fixture();
    let out = tempdir().unwrap();
    let mut editor = Editor::open(&fx.paths, PlaylistFormat::M3u8);
    let request = ShuffleRequest::parse("7", "2", "", false).unwrap();
    editor.shuffle(&mut session(), &request, now()).unwrap();
    editor.rename(0, "First Up").unwrap();
    editor.set_name("drive").unwrap();

    let path = editor.save(out.path()).unwrap();
    assert_eq!(path, out.path().join("drive.m3u8"));

    let back = read_file(&path).unwrap();
    assert_eq!(back.name, "drive");
    assert_eq!(back.primary_seed.as_deref(), Some("7"));
    assert_eq!(back.reverse_step, Some(2));
    assert_eq!(back.tracks[0].display_name, "First Up");
    assert_eq!(file_names(&back.tracks), file_names(editor.tracks()));
}
