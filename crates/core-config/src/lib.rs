//! Configuration surface consumed by the navigation engine.
//!
//! Parses `caret.toml` (or an override path supplied by the embedder)
//! extracting the three knobs the engine reads: tab size, the multi-cursor
//! pointer modifier, and line height. Unknown fields are ignored (TOML
//! deserialization tolerance) so the file can grow without breaking older
//! binaries. A missing file or a parse error falls back to defaults; the
//! typed error is still surfaced by `parse_str` for embedders that want to
//! report it.
//!
//! Raw values are retained separately from effective ones: clamping happens
//! in `apply`, and re-applying after an external change re-clamps from the
//! original file values.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Which modifier key spawns/extends multiple cursors. One of three
/// platform-dependent choices; the dispatch table is evaluated against
/// whichever is configured, never a hard-coded key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MultiCursorModifier {
    #[default]
    Alt,
    Ctrl,
    Meta,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CursorSection {
    #[serde(default = "CursorSection::default_tab_size")]
    pub tab_size: u32,
}

impl Default for CursorSection {
    fn default() -> Self {
        Self {
            tab_size: Self::default_tab_size(),
        }
    }
}

impl CursorSection {
    const fn default_tab_size() -> u32 {
        4
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct InputSection {
    #[serde(default)]
    pub multi_cursor_modifier: MultiCursorModifier,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ViewSection {
    #[serde(default = "ViewSection::default_line_height")]
    pub line_height: u32,
}

impl Default for ViewSection {
    fn default() -> Self {
        Self {
            line_height: Self::default_line_height(),
        }
    }
}

impl ViewSection {
    const fn default_line_height() -> u32 {
        18
    }
}

/// Raw file model; every section optional.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub cursor: CursorSection,
    #[serde(default)]
    pub input: InputSection,
    #[serde(default)]
    pub view: ViewSection,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Effective, clamped values the engine crates read. Externally owned and
/// read-only from the engine's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorConfig {
    pub tab_size: u32,
    pub line_height: u32,
    pub multi_cursor_modifier: MultiCursorModifier,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Config::default().effective()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>,
    pub file: ConfigFile,
}

const TAB_SIZE_MAX: u32 = 16;
const LINE_HEIGHT_MAX: u32 = 300;

impl Config {
    /// Clamp raw file values into the effective configuration.
    pub fn effective(&self) -> EditorConfig {
        let tab_size = self.file.cursor.tab_size.clamp(1, TAB_SIZE_MAX);
        let line_height = self.file.view.line_height.clamp(1, LINE_HEIGHT_MAX);
        if tab_size != self.file.cursor.tab_size || line_height != self.file.view.line_height {
            info!(
                target: "config",
                raw_tab_size = self.file.cursor.tab_size,
                tab_size,
                raw_line_height = self.file.view.line_height,
                line_height,
                "config_values_clamped"
            );
        }
        EditorConfig {
            tab_size,
            line_height,
            multi_cursor_modifier: self.file.input.multi_cursor_modifier,
        }
    }
}

/// Parse file content, surfacing the typed error.
pub fn parse_str(content: &str) -> std::result::Result<Config, ConfigError> {
    let file = toml::from_str::<ConfigFile>(content)?;
    Ok(Config {
        raw: Some(content.to_string()),
        file,
    })
}

/// Best-effort config path following platform conventions: a local
/// `caret.toml` wins over the platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from("caret.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("caret").join("caret.toml");
    }
    PathBuf::from("caret.toml")
}

/// Load configuration, falling back to defaults on a missing or malformed
/// file. Malformed content is logged, not fatal.
pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    match fs::read_to_string(&path) {
        Ok(content) => match parse_str(&content) {
            Ok(cfg) => Ok(cfg),
            Err(err) => {
                warn!(target: "config", path = %path.display(), %err, "config_parse_failed");
                Ok(Config::default())
            }
        },
        Err(_) => Ok(Config::default()),
    }
}
