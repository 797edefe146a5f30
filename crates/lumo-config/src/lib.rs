//! Settings persistence for lumo.
//!
//! Loading is lenient (defaults on a missing or unreadable file) so the
//! screensaver always starts; saving propagates errors for the UI to surface.

use std::{
    fs,
    path::{Path, PathBuf},
};

use color_eyre::eyre::{Result, WrapErr, eyre};
use directories::ProjectDirs;
use lumo_core::Theme;
use serde::{Deserialize, Serialize};

/// Auto-reroll periods the UI cycles through, seconds.
pub const REROLL_PERIODS: [u64; 6] = [5, 10, 15, 30, 60, 120];

/// Persisted user settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: Theme,
    pub auto_reroll: bool,
    pub reroll_period_secs: u64,
    /// Fixed RNG seed for reproducible runs; absent means entropy.
    pub seed: Option<u64>,
    /// CSS color overrides for the neon palettes; empty means built-ins.
    pub dark_palette: Vec<String>,
    pub light_palette: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            auto_reroll: true,
            reroll_period_secs: REROLL_PERIODS[1],
            seed: None,
            dark_palette: Vec::new(),
            light_palette: Vec::new(),
        }
    }
}

impl Settings {
    /// Advance to the next auto-reroll period in the cycle.
    pub fn cycle_reroll_period(&mut self) {
        let idx = REROLL_PERIODS
            .iter()
            .position(|&p| p == self.reroll_period_secs)
            .unwrap_or(REROLL_PERIODS.len() - 1);
        self.reroll_period_secs = REROLL_PERIODS[(idx + 1) % REROLL_PERIODS.len()];
    }
}

/// Path of the config file under the platform config directory.
pub fn config_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("io", "lumo", "lumo")
        .ok_or_else(|| eyre!("could not resolve a config directory"))?;
    Ok(dirs.config_dir().join("config.toml"))
}

/// Load settings, falling back to defaults when the file is missing or does
/// not parse.
pub fn load(path: &Path) -> Settings {
    match fs::read_to_string(path) {
        Ok(raw) => toml::from_str(&raw).unwrap_or_default(),
        Err(_) => Settings::default(),
    }
}

/// Save settings, creating the parent directory and replacing the file
/// through a temp-file rename.
pub fn save(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).wrap_err("creating config directory")?;
    }
    let raw = toml::to_string_pretty(settings).wrap_err("serializing settings")?;
    let tmp = path.with_extension("toml.tmp");
    fs::write(&tmp, raw).wrap_err("writing settings")?;
    if path.exists() {
        let _ = fs::remove_file(path);
    }
    fs::rename(&tmp, path).wrap_err("replacing settings file")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_round_trip() {
        let mut settings = Settings::default();
        settings.theme = Theme::Light;
        settings.seed = Some(1234);
        settings.dark_palette = vec!["#00FFFF".to_string()];

        let raw = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&raw).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let parsed: Settings = toml::from_str("theme = \"light\"").unwrap();
        assert_eq!(parsed.theme, Theme::Light);
        assert!(parsed.auto_reroll);
        assert_eq!(parsed.reroll_period_secs, 10);
    }

    #[test]
    fn test_cycle_reroll_period_wraps() {
        let mut settings = Settings::default();
        assert_eq!(settings.reroll_period_secs, 10);
        settings.cycle_reroll_period();
        assert_eq!(settings.reroll_period_secs, 15);

        settings.reroll_period_secs = 120;
        settings.cycle_reroll_period();
        assert_eq!(settings.reroll_period_secs, 5);

        // An out-of-list value restarts the cycle.
        settings.reroll_period_secs = 42;
        settings.cycle_reroll_period();
        assert_eq!(settings.reroll_period_secs, 5);
    }

    #[test]
    fn test_load_missing_file_defaults() {
        let settings = load(Path::new("/definitely/not/here/config.toml"));
        assert_eq!(settings, Settings::default());
    }
}
