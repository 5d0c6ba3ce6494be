use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "MediBuddy";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default port for the local API server.
pub const DEFAULT_PORT: u16 = 7465;

/// Get the application data directory
/// ~/MediBuddy/ on all platforms (user-visible)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("MediBuddy")
}

/// Default tracing filter when RUST_LOG is not set.
pub fn default_log_filter() -> String {
    "info,medibuddy=debug".to_string()
}

/// Runtime settings resolved from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub port: u16,
}

impl Settings {
    /// Resolve settings from environment variables, falling back to defaults.
    ///
    /// - `MEDIBUDDY_DATA_DIR` — where record JSON files live
    /// - `MEDIBUDDY_PORT` — local API port
    pub fn from_env() -> Self {
        let data_dir = std::env::var("MEDIBUDDY_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| app_data_dir());
        let port = std::env::var("MEDIBUDDY_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        Settings { data_dir, port }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("MediBuddy"));
    }

    #[test]
    fn app_name_is_medibuddy() {
        assert_eq!(APP_NAME, "MediBuddy");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, env!("CARGO_PKG_VERSION"));
    }
}
