use crate::draw::model::StrokeColor;
use crate::draw::persist::CorruptSlotPolicy;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE_NAME: &str = "settings.json";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// When enabled the application initialises the logger at debug level.
    #[serde(default)]
    pub debug_logging: bool,
    /// Optional file receiving log output in addition to stderr.
    #[serde(default)]
    pub log_file: Option<String>,
    /// Folder holding the drawing slot. Defaults to the platform data folder.
    #[serde(default)]
    pub storage_dir: Option<String>,
    /// Folder receiving `image.png`. Defaults to the download folder.
    #[serde(default)]
    pub export_dir: Option<String>,
    /// Pen colour at startup, as hex text.
    #[serde(default = "default_color")]
    pub default_color: String,
    /// Initial window size in points. If absent, a default size is used.
    #[serde(default)]
    pub window_size: Option<(f32, f32)>,
    #[serde(default)]
    pub corrupt_slot_policy: CorruptSlotPolicy,
    /// Undo, redo and clear-all block drawing until a tool is reselected.
    #[serde(default)]
    pub legacy_inert_actions: bool,
}

fn default_color() -> String {
    StrokeColor::RED.to_hex()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug_logging: false,
            log_file: None,
            storage_dir: None,
            export_dir: None,
            default_color: default_color(),
            window_size: None,
            corrupt_slot_policy: CorruptSlotPolicy::default(),
            legacy_inert_actions: false,
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(&content).with_context(|| format!("deserialize settings file {path}"))
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("serialize settings")?;
        std::fs::write(path, json).with_context(|| format!("write settings file {path}"))?;
        Ok(())
    }

    pub fn default_color(&self) -> StrokeColor {
        match StrokeColor::from_hex(&self.default_color) {
            Ok(color) => color,
            Err(e) => {
                tracing::warn!(
                    "provided default colour '{}' is invalid ({e}); using red",
                    self.default_color
                );
                StrokeColor::RED
            }
        }
    }

    pub fn log_file_path(&self) -> Option<PathBuf> {
        self.log_file
            .as_deref()
            .map(str::trim)
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
    }
}

pub fn settings_path_from_exe_path(exe_path: &Path) -> Result<PathBuf> {
    let parent = exe_path
        .parent()
        .ok_or_else(|| anyhow!("executable path has no parent: {}", exe_path.display()))?;
    Ok(parent.join(SETTINGS_FILE_NAME))
}

pub fn resolve_settings_path() -> Result<PathBuf> {
    let exe_path = std::env::current_exe().context("resolve current executable")?;
    settings_path_from_exe_path(&exe_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(SETTINGS_FILE_NAME);
        let settings = Settings::load(&path.to_string_lossy()).expect("load");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.default_color(), StrokeColor::RED);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let settings: Settings = serde_json::from_value(serde_json::json!({
            "debug_logging": true,
            "corrupt_slot_policy": "fail",
        }))
        .expect("deserialize settings");

        assert!(settings.debug_logging);
        assert_eq!(settings.corrupt_slot_policy, CorruptSlotPolicy::Fail);
        assert_eq!(settings.default_color, "#ff0000");
        assert!(!settings.legacy_inert_actions);
    }

    #[test]
    fn roundtrip_through_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(SETTINGS_FILE_NAME);
        let path = path.to_string_lossy();

        let mut settings = Settings::default();
        settings.window_size = Some((640.0, 480.0));
        settings.legacy_inert_actions = true;
        settings.save(&path).expect("save");

        assert_eq!(Settings::load(&path).expect("load"), settings);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(SETTINGS_FILE_NAME);
        std::fs::write(&path, "{ nope").expect("write");
        assert!(Settings::load(&path.to_string_lossy()).is_err());
    }

    #[test]
    fn invalid_colour_falls_back_to_red() {
        let settings = Settings {
            default_color: "blue".into(),
            ..Settings::default()
        };
        assert_eq!(settings.default_color(), StrokeColor::RED);
    }

    #[test]
    fn settings_path_is_resolved_next_to_executable() {
        let exe = Path::new("/tmp/myapp/bin/scribble_pad");
        let path = settings_path_from_exe_path(exe).expect("path");
        assert_eq!(path, Path::new("/tmp/myapp/bin").join(SETTINGS_FILE_NAME));
    }
}
