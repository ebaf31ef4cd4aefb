use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "fixture_feed";

/// Platform config directory for the application (e.g. `~/.config/fixture_feed`),
/// or `./fixture_feed` when the platform has none.
fn app_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join(APP_DIR_NAME)
}

/// Returns the path of the TOML config file.
pub fn get_config_path() -> String {
    app_dir().join("config.toml").to_string_lossy().to_string()
}

/// Returns the directory the rolling log files are written to.
pub fn get_log_dir_path() -> String {
    app_dir().join("logs").to_string_lossy().to_string()
}
