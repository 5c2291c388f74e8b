//! Build configuration.
//!
//! Settings come from three layers, later ones overriding earlier ones:
//!
//! ```text
//! stock defaults  →  press.toml  →  command-line flags
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! pages_dir = "./pages"      # Markdown pages
//! assets_dir = "assets"      # Static files copied into the build
//! build_dir = "build"        # Generated site
//! asset_versioning = true    # Stamp css/js/png names with the build time
//! site_name = "Website"      # Used in page titles and the resume header
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "press.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Resolved build settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Root of the markdown pages.
    pub pages_dir: PathBuf,
    /// Root of the static assets.
    pub assets_dir: PathBuf,
    /// Where the site is generated.
    pub build_dir: PathBuf,
    /// Rename css/js/png assets with the build time.
    pub asset_versioning: bool,
    /// Site name for titles and headers.
    pub site_name: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            pages_dir: PathBuf::from("./pages"),
            assets_dir: PathBuf::from("assets"),
            build_dir: PathBuf::from("build"),
            asset_versioning: true,
            site_name: "Website".to_string(),
        }
    }
}

impl BuildConfig {
    /// Validate that the configured directories don't overlap.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let build_dir = normalized(&self.build_dir);
        if build_dir == normalized(&self.pages_dir) {
            return Err(ConfigError::Validation(
                "build_dir must differ from pages_dir".into(),
            ));
        }
        if build_dir == normalized(&self.assets_dir) {
            return Err(ConfigError::Validation(
                "build_dir must differ from assets_dir".into(),
            ));
        }
        if self.site_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site_name must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Lexical form of `path` used for comparisons: `.` components dropped, so
/// `./pages`, `pages` and `pages/` are the same directory.
fn normalized(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Values given on the command line. `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub pages_dir: Option<PathBuf>,
    pub assets_dir: Option<PathBuf>,
    pub build_dir: Option<PathBuf>,
    pub no_asset_versioning: bool,
}

impl ConfigOverrides {
    fn to_toml(&self) -> toml::Value {
        let mut table = toml::Table::new();
        let dirs = [
            ("pages_dir", &self.pages_dir),
            ("assets_dir", &self.assets_dir),
            ("build_dir", &self.build_dir),
        ];
        for (key, dir) in dirs {
            if let Some(dir) = dir {
                table.insert(
                    key.to_string(),
                    toml::Value::String(dir.to_string_lossy().into_owned()),
                );
            }
        }
        if self.no_asset_versioning {
            table.insert("asset_versioning".to_string(), toml::Value::Boolean(false));
        }
        toml::Value::Table(table)
    }
}

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(BuildConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file doesn't exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Resolve the build config.
///
/// `config_file` of `None` means [`DEFAULT_CONFIG_FILE`], which may be
/// absent. An explicitly named file must exist.
pub fn load_config(
    config_file: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<BuildConfig, ConfigError> {
    let file_layer = match config_file {
        Some(path) => Some(load_raw_config(path)?.ok_or_else(|| {
            ConfigError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("config file {} not found", path.display()),
            ))
        })?),
        None => load_raw_config(Path::new(DEFAULT_CONFIG_FILE))?,
    };

    let mut merged = stock_defaults_value();
    if let Some(layer) = file_layer {
        merged = merge_toml(merged, layer);
    }
    merged = merge_toml(merged, overrides.to_toml());

    let config: BuildConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `press.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# press configuration
# ===================
#
# Every key is optional; the values below are the defaults.
# Command-line flags override anything set here.

# Directory holding the markdown pages. Every `.md` file below it becomes a
# page at the same relative path (`blog/hello.md` -> `build/blog/hello.html`).
pages_dir = "./pages"

# Directory holding static files. Its contents are copied to `build/assets/`.
assets_dir = "assets"

# Directory the site is generated into. Files from a previous build are
# overwritten in place.
build_dir = "build"

# Stamp `.css`, `.js` and `.png` file names with the build time
# (`style.css` -> `style.6553f100.css`) so browsers never serve stale copies.
asset_versioning = true

# Shown in page titles, the site header and the resume header.
site_name = "Website"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("press.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn defaults() {
        let config = BuildConfig::default();
        assert_eq!(config.pages_dir, PathBuf::from("./pages"));
        assert_eq!(config.assets_dir, PathBuf::from("assets"));
        assert_eq!(config.build_dir, PathBuf::from("build"));
        assert!(config.asset_versioning);
    }

    #[test]
    fn file_overrides_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(tmp.path(), "build_dir = \"out\"\nsite_name = \"Me\"\n");

        let config = load_config(Some(path.as_path()), &ConfigOverrides::default()).unwrap();
        assert_eq!(config.build_dir, PathBuf::from("out"));
        assert_eq!(config.site_name, "Me");
        assert_eq!(config.pages_dir, PathBuf::from("./pages"));
    }

    #[test]
    fn flags_override_file() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(tmp.path(), "build_dir = \"out\"\nasset_versioning = true\n");
        let overrides = ConfigOverrides {
            build_dir: Some(PathBuf::from("dist")),
            no_asset_versioning: true,
            ..Default::default()
        };

        let config = load_config(Some(path.as_path()), &overrides).unwrap();
        assert_eq!(config.build_dir, PathBuf::from("dist"));
        assert!(!config.asset_versioning);
    }

    #[test]
    fn absent_flags_keep_file_values() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(tmp.path(), "asset_versioning = false\n");

        let config = load_config(Some(path.as_path()), &ConfigOverrides::default()).unwrap();
        assert!(!config.asset_versioning);
    }

    #[test]
    fn unknown_keys_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(tmp.path(), "pages_directory = \"p\"\n");

        let result = load_config(Some(path.as_path()), &ConfigOverrides::default());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let result = load_config(
            Some(tmp.path().join("nope.toml").as_path()),
            &ConfigOverrides::default(),
        );
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn build_dir_must_differ_from_sources() {
        let config = BuildConfig {
            build_dir: PathBuf::from("./pages"),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        let config = BuildConfig {
            build_dir: PathBuf::from("assets"),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn build_dir_spelled_differently_is_still_rejected() {
        for (build_dir, pages_dir, assets_dir) in [
            ("pages", "./pages", "assets"),
            ("./assets", "./pages", "assets"),
            ("pages/", "pages", "assets"),
            ("./././assets", "pages", "./assets/"),
        ] {
            let config = BuildConfig {
                build_dir: PathBuf::from(build_dir),
                pages_dir: PathBuf::from(pages_dir),
                assets_dir: PathBuf::from(assets_dir),
                ..Default::default()
            };
            assert!(
                matches!(config.validate(), Err(ConfigError::Validation(_))),
                "{build_dir} accepted next to {pages_dir} and {assets_dir}"
            );
        }
    }

    #[test]
    fn cli_build_dir_overlapping_default_pages_dir_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(tmp.path(), "");
        let overrides = ConfigOverrides {
            build_dir: Some(PathBuf::from("pages")),
            ..Default::default()
        };
        assert!(matches!(
            load_config(Some(path.as_path()), &overrides),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn distinct_dirs_pass_validation() {
        let config = BuildConfig {
            build_dir: PathBuf::from("./build"),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_site_name_rejected() {
        let config = BuildConfig {
            site_name: "  ".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn merge_toml_overlay_wins() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2\n").unwrap();
        let overlay: toml::Value = toml::from_str("b = 3\n").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("a").and_then(|v| v.as_integer()), Some(1));
        assert_eq!(merged.get("b").and_then(|v| v.as_integer()), Some(3));
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config: BuildConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, BuildConfig::default());
    }
}
