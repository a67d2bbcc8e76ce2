//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/treedraw/treedraw.toml`
//! 3. Local config: `<dir>/.treedraw.toml` (usually the working directory)
//! 4. Environment variables: `TREEDRAW_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Diagram geometry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Vertical distance per tree level (pt)
    pub level_height: i64,
    /// Gap between the tree bottom and the token row (pt)
    pub token_gap: i64,
    /// Gap between the tree bottom and the index row (pt)
    pub index_gap: i64,
    /// Line width the `\Tree` pretty-printer tries to stay under
    pub margin: usize,
    /// Indent of the first `\Tree` line
    pub indent: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            level_height: 28,
            token_gap: 10,
            index_gap: 30,
            margin: 70,
            indent: 6,
        }
    }
}

/// Raw layout config for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawLayoutConfig {
    pub level_height: Option<i64>,
    pub token_gap: Option<i64>,
    pub index_gap: Option<i64>,
    pub margin: Option<usize>,
    pub indent: Option<usize>,
}

impl LayoutConfig {
    /// Merge overlay onto self: overlay wins where specified.
    pub fn merge(&self, overlay: &RawLayoutConfig) -> Self {
        Self {
            level_height: overlay.level_height.unwrap_or(self.level_height),
            token_gap: overlay.token_gap.unwrap_or(self.token_gap),
            index_gap: overlay.index_gap.unwrap_or(self.index_gap),
            margin: overlay.margin.unwrap_or(self.margin),
            indent: overlay.indent.unwrap_or(self.indent),
        }
    }
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub output: Option<PathBuf>,
    pub cjk_font: Option<String>,
    #[serde(default)]
    pub layout: RawLayoutConfig,
}

/// Unified configuration for treedraw.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Output document path (default: tree.tex)
    pub output: PathBuf,
    /// CJK font family passed to `\begin{CJK}{UTF8}{...}` (default: gbsn)
    pub cjk_font: String,
    /// Diagram geometry
    pub layout: LayoutConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output: PathBuf::from("tree.tex"),
            cjk_font: "gbsn".into(),
            layout: LayoutConfig::default(),
        }
    }
}

/// Get the XDG config directory for treedraw.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treedraw").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("treedraw.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".treedraw.toml")
}

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in the output path.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.output.to_string_lossy().as_ref());
        self.output = PathBuf::from(expanded);
    }

    /// Merge overlay config onto self (base). Overlay wins where specified.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            output: overlay.output.clone().unwrap_or_else(|| self.output.clone()),
            cjk_font: overlay
                .cjk_font
                .clone()
                .unwrap_or_else(|| self.cjk_font.clone()),
            layout: self.layout.merge(&overlay.layout),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.treedraw.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref(), local_dir)
    }

    /// Load settings from an explicit global config file.
    ///
    /// Missing files are skipped; unreadable or invalid files are errors.
    pub fn load_from(
        global_path: Option<&Path>,
        local_dir: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_path {
            if global_path.exists() {
                let raw = load_raw_settings(global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Local config
        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 4. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();

        Ok(current)
    }

    /// Apply TREEDRAW_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("TREEDRAW")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("output") {
            settings.output = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("cjk_font") {
            settings.cjk_font = val;
        }
        if let Ok(val) = config.get_int("layout.level_height") {
            settings.layout.level_height = val;
        }
        if let Ok(val) = config.get_int("layout.token_gap") {
            settings.layout.token_gap = val;
        }
        if let Ok(val) = config.get_int("layout.index_gap") {
            settings.layout.index_gap = val;
        }
        if let Ok(val) = config.get::<usize>("layout.margin") {
            settings.layout.margin = val;
        }
        if let Ok(val) = config.get::<usize>("layout.indent") {
            settings.layout.indent = val;
        }

        Ok(settings)
    }

    /// Render settings as TOML (printed by `--show-config`).
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}
