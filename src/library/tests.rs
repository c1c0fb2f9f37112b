use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::tempdir;

use super::*;
use crate::config::LibrarySettings;

fn quiet_settings() -> LibrarySettings {
    LibrarySettings {
        read_tags: false,
        ..LibrarySettings::default()
    }
}

fn file_names(tracks: &[Track]) -> Vec<String> {
    tracks.iter().map(Track::file_name).collect()
}

#[test]
fn track_defaults_to_stem_and_normalized_path() {
    let t = Track::new("C:\\Music\\Band\\Song.Name.mp3");
    assert_eq!(t.path, PathBuf::from("C:/Music/Band/Song.Name.mp3"));
    assert_eq!(t.display_name, "Song.Name");
    assert_eq!(t.file_name(), "Song.Name.mp3");
    assert_eq!(t.original_path(), Path::new("C:/Music/Band/Song.Name.mp3"));
    assert!(t.flags.is_empty());

    let titled = Track::with_title("/m/a.mp3", Some("  "));
    assert_eq!(titled.display_name, "a");
}

#[test]
fn rename_flags_only_real_changes() {
    let mut t = Track::new("/m/a.mp3");
    t.rename("Intro");
    assert_eq!(t.display_name, "Intro");
    assert!(t.flags.contains(TrackFlag::NameModified));

    t.rename("a");
    assert!(!t.flags.contains(TrackFlag::NameModified));

    t.rename("   ");
    assert_eq!(t.display_name, "a");
}

#[test]
fn set_path_resolves_relative_to_original_folder() {
    let mut t = Track::new("/m/rock/a.mp3");
    t.set_path("b.mp3");
    assert_eq!(t.path, PathBuf::from("/m/rock/b.mp3"));
    assert!(t.flags.contains(TrackFlag::PathModified));
    assert_eq!(t.original_path(), Path::new("/m/rock/a.mp3"));

    t.set_path("/m/rock/a.mp3");
    assert!(!t.flags.contains(TrackFlag::PathModified));
}

#[test]
fn restore_reverts_path_and_name() {
    let mut t = Track::new("/m/a.mp3");
    t.rename("Other");
    t.set_path("/x/y.mp3");
    t.flags.insert(TrackFlag::Moved);

    t.restore();
    assert_eq!(t.path, PathBuf::from("/m/a.mp3"));
    assert_eq!(t.display_name, "a");
    assert_eq!(t.flags.iter().collect::<Vec<_>>(), vec![TrackFlag::Restored]);
}

#[test]
fn renumber_assigns_dense_positions() {
    let mut tracks = vec![Track::new("/a.mp3"), Track::new("/b.mp3"), Track::new("/c.mp3")];
    tracks.swap(0, 2);
    renumber(&mut tracks);
    let positions: Vec<usize> = tracks.iter().map(|t| t.position).collect();
    assert_eq!(positions, vec![1, 2, 3]);
}

#[test]
fn media_allow_list_is_case_insensitive_and_exact() {
    assert!(is_media_path(Path::new("/tmp/a.mp3")));
    assert!(is_media_path(Path::new("/tmp/a.MP3")));
    assert!(is_media_path(Path::new("/tmp/clip.webm")));
    assert!(!is_media_path(Path::new("/tmp/a.mp3x")));
    assert!(!is_media_path(Path::new("/tmp/a.txt")));
    assert!(!is_media_path(Path::new("/tmp/a")));

    assert!(is_media_extension(".FLAC"));
    assert!(is_media_str("C:\\x\\y.ogg"));
    assert!(!is_media_str("/x/.mp3"));
    assert!(!is_media_str("http://example.com/stream"));
    assert_eq!(media_extensions().count(), AUDIO_EXTENSIONS.len() + VIDEO_EXTENSIONS.len());
}

#[test]
fn format_duration_drops_leading_zero_units() {
    assert_eq!(format_duration(Duration::from_secs(35)), "35.00");
    assert_eq!(format_duration(Duration::from_millis(125_500)), "02:05.50");
    assert_eq!(format_duration(Duration::from_secs(3661)), "01:01:01.00");
    assert_eq!(format_duration(Duration::from_secs(90_061)), "1:01:01:01.00");
    assert_eq!(format_duration(Duration::ZERO), "00.00");
}

#[test]
fn total_duration_needs_at_least_one_known_length() {
    let mut a = Track::new("/a.mp3");
    let b = Track::new("/b.mp3");
    assert_eq!(total_duration(&[a.clone(), b.clone()]), None);

    a.duration = Some(Duration::from_secs(90));
    let mut c = Track::new("/c.mp3");
    c.duration = Some(Duration::from_secs(30));
    assert_eq!(total_duration(&[a, b, c]), Some(Duration::from_secs(120)));
}

#[test]
fn total_duration_saturates_instead_of_overflowing() {
    let huge: Vec<Track> = ["/a.mp3", "/b.mp3"]
        .into_iter()
        .map(|p| {
            let mut t = Track::new(p);
            t.duration = Some(Duration::from_secs(u64::MAX / 2 + 1));
            t
        })
        .collect();
    assert_eq!(total_duration(&huge), Some(Duration::MAX));
    assert!(!format_duration(Duration::MAX).is_empty());
}

#[test]
fn canonical_sort_puts_letters_first_then_lowercase_name() {
    let mut tracks: Vec<Track> = ["/m/b.mp3", "/x/_intro.mp3", "/m/A.mp3", "/m/1999.mp3", "/z/c.mp3"]
        .into_iter()
        .map(Track::new)
        .collect();
    canonical_sort(&mut tracks);

    assert_eq!(
        file_names(&tracks),
        vec!["A.mp3", "b.mp3", "c.mp3", "1999.mp3", "_intro.mp3"]
    );
    assert_eq!(tracks[4].position, 5);
}

#[test]
fn scan_filters_non_media_and_sorts_canonically() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b.mp3"), b"not a real mp3").unwrap();
    fs::write(dir.path().join("a.MP3"), b"x").unwrap();
    fs::write(dir.path().join("c.flac"), b"not a real flac").unwrap();
    fs::write(dir.path().join("notes.txt"), b"ignore me").unwrap();
    fs::write(dir.path().join("song.mp3x"), b"ignore me").unwrap();

    let report = scan(&[dir.path().to_path_buf()], &quiet_settings());

    assert!(report.failures.is_empty());
    assert_eq!(file_names(&report.tracks), vec!["a.MP3", "b.mp3", "c.flac"]);
    assert_eq!(report.tracks[0].display_name, "a");
    assert_eq!(report.tracks[0].size_bytes, Some(1));
    let positions: Vec<usize> = report.tracks.iter().map(|t| t.position).collect();
    assert_eq!(positions, vec![1, 2, 3]);
}

#[test]
fn scan_merges_roots_and_records_missing_ones() {
    let first = tempdir().unwrap();
    let second = tempdir().unwrap();
    fs::write(first.path().join("zeta.ogg"), b"x").unwrap();
    fs::write(second.path().join("alpha.ogg"), b"x").unwrap();
    let missing = first.path().join("does-not-exist");

    let roots = vec![first.path().to_path_buf(), missing.clone(), second.path().to_path_buf()];
    let report = scan(&roots, &quiet_settings());

    assert_eq!(file_names(&report.tracks), vec!["alpha.ogg", "zeta.ogg"]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].0, missing);
}

#[test]
fn scan_narrows_to_configured_extensions() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.mp3"), b"x").unwrap();
    fs::write(dir.path().join("b.flac"), b"x").unwrap();

    let settings = LibrarySettings {
        extensions: vec![".FLAC".to_string()],
        ..quiet_settings()
    };
    let report = scan(&[dir.path().to_path_buf()], &settings);
    assert_eq!(file_names(&report.tracks), vec!["b.flac"]);
}

#[test]
fn scan_respects_include_hidden_false() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".hidden.mp3"), b"not real").unwrap();
    fs::write(dir.path().join("visible.mp3"), b"not real").unwrap();
    let hidden_dir = dir.path().join(".cache");
    fs::create_dir_all(&hidden_dir).unwrap();
    fs::write(hidden_dir.join("inner.mp3"), b"not real").unwrap();

    let settings = LibrarySettings {
        include_hidden: false,
        ..quiet_settings()
    };
    let report = scan(&[dir.path().to_path_buf()], &settings);
    assert_eq!(file_names(&report.tracks), vec!["visible.mp3"]);
}

#[test]
fn scan_respects_recursive_false() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("root.mp3"), b"not real").unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir_all(&sub).unwrap();
    fs::write(sub.join("child.mp3"), b"not real").unwrap();

    let settings = LibrarySettings {
        recursive: false,
        ..quiet_settings()
    };
    let report = scan(&[dir.path().to_path_buf()], &settings);
    assert_eq!(file_names(&report.tracks), vec!["root.mp3"]);
}

#[test]
fn scan_respects_max_depth() {
    let dir = tempdir().unwrap();
    let d1 = dir.path().join("d1");
    let d2 = d1.join("d2");
    fs::create_dir_all(&d2).unwrap();
    fs::write(dir.path().join("root.mp3"), b"not real").unwrap();
    fs::write(d1.join("one.mp3"), b"not real").unwrap();
    fs::write(d2.join("two.mp3"), b"not real").unwrap();

    // WalkDir depth counts root as 0, children as 1, grandchildren as 2.
    let settings = LibrarySettings {
        max_depth: Some(2),
        ..quiet_settings()
    };
    let report = scan(&[dir.path().to_path_buf()], &settings);
    assert_eq!(file_names(&report.tracks), vec!["one.mp3", "root.mp3"]);
}

#[test]
fn scan_tolerates_files_without_tags() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("fake.mp3"), b"definitely not audio").unwrap();

    let report = scan(&[dir.path().to_path_buf()], &LibrarySettings::default());
    assert_eq!(report.tracks.len(), 1);
    assert_eq!(report.tracks[0].duration, None);
    assert_eq!(report.tracks[0].metadata, None);
}
