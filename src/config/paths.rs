//! Cross-platform directory path resolution
//!
//! - Linux/macOS: XDG Base Directory specification (~/.config)
//! - Windows: Known Folder API (AppData\Roaming)

use std::path::PathBuf;

/// Get the configuration directory path
///
/// Checks KUEUE_VIZ_CONFIG_DIR environment variable first, then falls back to:
/// - Unix (Linux/macOS): XDG_CONFIG_HOME/kueue-viz or ~/.config/kueue-viz
/// - Windows: %APPDATA%\kueue-viz\config
pub fn config_dir() -> PathBuf {
    std::env::var("KUEUE_VIZ_CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            #[cfg(windows)]
            {
                use directories::ProjectDirs;
                ProjectDirs::from("", "", "kueue-viz")
                    .map(|dirs| dirs.config_dir().to_path_buf())
                    .unwrap_or_else(|| PathBuf::from(".").join(".config").join("kueue-viz"))
            }
            #[cfg(not(windows))]
            {
                use directories::BaseDirs;
                std::env::var("XDG_CONFIG_HOME")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| {
                        BaseDirs::new()
                            .map(|dirs| dirs.home_dir().join(".config"))
                            .unwrap_or_else(|| PathBuf::from(".").join(".config"))
                    })
                    .join("kueue-viz")
            }
        })
}

/// Get the root configuration file path
pub fn root_config_path() -> PathBuf {
    config_dir().join("config.yaml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_config_path() {
        let path = root_config_path();
        assert!(path.ends_with("config.yaml"));
    }

    #[test]
    fn test_config_dir_env_override() {
        let dir = tempfile::tempdir().unwrap();

        // SAFETY: set_var is unsafe in Rust 2024 due to potential data races.
        // No other test in this crate reads or writes KUEUE_VIZ_CONFIG_DIR.
        unsafe {
            std::env::set_var("KUEUE_VIZ_CONFIG_DIR", dir.path());
        }
        let dir_seen = config_dir();
        let root_seen = root_config_path();
        unsafe {
            std::env::remove_var("KUEUE_VIZ_CONFIG_DIR");
        }

        assert_eq!(dir_seen, dir.path());
        assert_eq!(root_seen, dir.path().join("config.yaml"));
    }
}
