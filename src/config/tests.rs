use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use crate::playlist::PlaylistFormat;
use crate::seed::SeedFormat;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_playmix_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("PLAYMIX_CONFIG_PATH", "/tmp/playmix-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/playmix-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("playmix")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("playmix")
            .join("config.toml")
    );
}

#[test]
fn settings_load_from_config_file_and_parse_format_aliases() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[generator]
playlist_format = "xspf+url"
seed_format = "alphanumeric"
use_shadow_seed = true
output_dir = "/tmp/mixes"
name = "weekend"

[library]
extensions = ["mp3", "FLAC"]
recursive = false
include_hidden = false
follow_links = false
max_depth = 3
read_tags = false
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("PLAYMIX_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("PLAYMIX__GENERATOR__PLAYLIST_FORMAT");

    let s = Settings::load().unwrap();
    assert_eq!(s.generator.playlist_format, PlaylistFormat::XspfUrl);
    assert_eq!(s.generator.seed_format, SeedFormat::AlphaNumeric);
    assert!(s.generator.use_shadow_seed);
    assert_eq!(s.generator.output_dir, Some(std::path::PathBuf::from("/tmp/mixes")));
    assert_eq!(s.generator.name, "weekend");
    assert_eq!(s.library.extensions, vec!["mp3".to_string(), "FLAC".to_string()]);
    assert!(!s.library.recursive);
    assert!(!s.library.include_hidden);
    assert!(!s.library.follow_links);
    assert_eq!(s.library.max_depth, Some(3));
    assert!(!s.library.read_tags);
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[generator]
playlist_format = "pls"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("PLAYMIX_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("PLAYMIX__GENERATOR__PLAYLIST_FORMAT", "json");

    let s = Settings::load().unwrap();
    assert_eq!(s.generator.playlist_format, PlaylistFormat::Json);
    assert_eq!(s.generator.seed_format, SeedFormat::DigitsOnly);
}

#[test]
fn missing_config_file_yields_defaults() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let _g1 = EnvGuard::set(
        "PLAYMIX_CONFIG_PATH",
        dir.path().join("absent.toml").to_str().unwrap(),
    );
    let _g2 = EnvGuard::remove("PLAYMIX__GENERATOR__PLAYLIST_FORMAT");

    assert_eq!(Settings::load().unwrap(), Settings::default());
}

#[test]
fn validate_rejects_unusable_values() {
    let mut s = Settings::default();
    assert!(s.validate().is_ok());

    s.library.extensions = vec!["txt".to_string()];
    assert!(s.validate().unwrap_err().contains("txt"));

    s = Settings::default();
    s.library.max_depth = Some(0);
    assert!(s.validate().is_err());

    s = Settings::default();
    s.generator.name = "   ".to_string();
    assert!(s.validate().is_err());
}

#[test]
fn effective_settings_render_as_toml() {
    let rendered = toml::to_string(&Settings::default()).unwrap();
    assert!(rendered.contains("[generator]"));
    assert!(rendered.contains("playlist_format = \"m3u8\""));
    assert!(rendered.contains("seed_format = \"digits-only\""));

    let back: Settings = toml::from_str(&rendered).unwrap();
    assert_eq!(back, Settings::default());
}
