//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/vvkit/vvkit.toml`
//! 3. Explicit config file passed on the command line
//! 4. Environment variables: `VVKIT_*` prefix (`__` separates nested keys)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::tree::{
    TreeBuilder, DEFAULT_CHILDREN_FIELD, DEFAULT_LEVEL_FIELD, DEFAULT_PARENT_FIELD,
};
use crate::domain::units::{validate_datetime_format, DATETIME_FORMAT};

/// Field names used when nesting and flattening records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TreeSettings {
    /// Field holding the parent id (default: `parent_id`)
    pub parent_field: String,
    /// Field children are nested under (default: `_children`)
    pub children_field: String,
    /// Field the default decorator stamps with depth (default: `_level`)
    pub level_field: String,
    /// Field shown next to the id in listings (default: `name`)
    pub label_field: String,
}

impl Default for TreeSettings {
    fn default() -> Self {
        Self {
            parent_field: DEFAULT_PARENT_FIELD.into(),
            children_field: DEFAULT_CHILDREN_FIELD.into(),
            level_field: DEFAULT_LEVEL_FIELD.into(),
            label_field: "name".into(),
        }
    }
}

/// Byte-size rendering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UnitSettings {
    /// Decimals kept when rendering sizes
    pub precision: usize,
    /// Smallest value a larger unit may show before falling back
    pub threshold: f64,
}

impl Default for UnitSettings {
    fn default() -> Self {
        Self {
            precision: 2,
            threshold: 0.9,
        }
    }
}

/// Raw tree settings for intermediate parsing (`None` → not specified).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawTreeSettings {
    pub parent_field: Option<String>,
    pub children_field: Option<String>,
    pub level_field: Option<String>,
    pub label_field: Option<String>,
}

/// Raw unit settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawUnitSettings {
    pub precision: Option<usize>,
    pub threshold: Option<f64>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub datetime_format: Option<String>,
    pub letter_code_length: Option<usize>,
    pub tree: RawTreeSettings,
    pub units: RawUnitSettings,
}

/// Unified configuration for vvkit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// `chrono` format for rendered timestamps
    pub datetime_format: String,
    /// Default length of generated letter codes
    pub letter_code_length: usize,
    pub tree: TreeSettings,
    pub units: UnitSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            datetime_format: DATETIME_FORMAT.into(),
            letter_code_length: 8,
            tree: TreeSettings::default(),
            units: UnitSettings::default(),
        }
    }
}

/// Get the XDG config directory for vvkit.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "vvkit").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("vvkit.toml"))
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

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Tree builder using the configured field names.
    pub fn tree_builder(&self) -> TreeBuilder {
        TreeBuilder::new()
            .parent_field(&self.tree.parent_field)
            .children_field(&self.tree.children_field)
            .level_field(&self.tree.level_field)
    }

    /// Overlay values win where specified; everything else is kept.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        let tree = &overlay.tree;
        let units = &overlay.units;
        Self {
            datetime_format: overlay
                .datetime_format
                .clone()
                .unwrap_or_else(|| self.datetime_format.clone()),
            letter_code_length: overlay
                .letter_code_length
                .unwrap_or(self.letter_code_length),
            tree: TreeSettings {
                parent_field: tree
                    .parent_field
                    .clone()
                    .unwrap_or_else(|| self.tree.parent_field.clone()),
                children_field: tree
                    .children_field
                    .clone()
                    .unwrap_or_else(|| self.tree.children_field.clone()),
                level_field: tree
                    .level_field
                    .clone()
                    .unwrap_or_else(|| self.tree.level_field.clone()),
                label_field: tree
                    .label_field
                    .clone()
                    .unwrap_or_else(|| self.tree.label_field.clone()),
            },
            units: UnitSettings {
                precision: units.precision.unwrap_or(self.units.precision),
                threshold: units.threshold.unwrap_or(self.units.threshold),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file; unlike the global file it must exist
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/vvkit/vvkit.toml`
    /// 3. Explicit config file
    /// 4. Environment variables: `VVKIT_*` prefix
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config, if present
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Explicit file
        if let Some(path) = explicit {
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        // 4. Environment variables
        let settings = Self::apply_env_overrides(current)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values that would only fail once a command uses them.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        validate_datetime_format(&self.datetime_format).map_err(|e| ApplicationError::Config {
            message: format!("datetime_format: {}", e),
        })
    }

    /// Apply VVKIT_* environment variables as explicit overrides.
    ///
    /// `VVKIT_DATETIME_FORMAT`, `VVKIT_TREE__PARENT_FIELD`, `VVKIT_UNITS__PRECISION`, ...
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("VVKIT")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("datetime_format") {
            settings.datetime_format = val;
        }
        if let Ok(val) = config.get::<usize>("letter_code_length") {
            settings.letter_code_length = val;
        }
        if let Ok(val) = config.get_string("tree.parent_field") {
            settings.tree.parent_field = val;
        }
        if let Ok(val) = config.get_string("tree.children_field") {
            settings.tree.children_field = val;
        }
        if let Ok(val) = config.get_string("tree.level_field") {
            settings.tree.level_field = val;
        }
        if let Ok(val) = config.get_string("tree.label_field") {
            settings.tree.label_field = val;
        }
        if let Ok(val) = config.get::<usize>("units.precision") {
            settings.units.precision = val;
        }
        if let Ok(val) = config.get_float("units.threshold") {
            settings.units.threshold = val;
        }

        Ok(settings)
    }

    /// Render as TOML, as accepted by [`Settings::load`].
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_partial_overlay_when_merging_then_keeps_unspecified_values() {
        let raw: RawSettings = toml::from_str(
            r#"
[tree]
parent_field = "pid"
"#,
        )
        .unwrap();

        let merged = Settings::default().merge_with(&raw);

        assert_eq!(merged.tree.parent_field, "pid");
        assert_eq!(merged.tree.children_field, "_children");
        assert_eq!(merged.units, UnitSettings::default());
    }

    #[test]
    fn given_unknown_datetime_specifier_when_validating_then_config_error() {
        let mut settings = Settings::default();
        settings.datetime_format = "%Y %Q".into();

        let err = settings.validate().unwrap_err();

        assert!(matches!(err, ApplicationError::Config { ref message } if message.contains("%Q")));
    }

    #[test]
    fn given_settings_when_building_tree_builder_then_uses_configured_fields() {
        let mut settings = Settings::default();
        settings.tree.children_field = "kids".into();

        let builder = settings.tree_builder();

        assert_eq!(builder.children_field_name(), "kids");
        assert_eq!(builder.level_field_name(), "_level");
    }
}
