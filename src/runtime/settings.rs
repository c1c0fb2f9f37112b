use tracing::warn;

use playmix::config;

pub fn load_settings() -> config::Settings {
    match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                warn!("invalid config, using defaults: {msg}");
                config::Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            // Config is optional; failures should not stop a run.
            warn!("failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    }
}
