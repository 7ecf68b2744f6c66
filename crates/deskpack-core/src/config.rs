use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::platform;

/// Launch window defaults (optional `[window]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Initial window width in pixels.
    pub default_width: u32,
    /// Initial window height in pixels.
    pub default_height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            default_width: 1000,
            default_height: 800,
        }
    }
}

/// Global configuration loaded from `~/.config/deskpack/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeskpackConfig {
    /// Target architecture. If missing, `npm_config_arch` or `x64` is used.
    #[serde(default)]
    pub arch: Option<String>,
    /// Platform type handed to the packager.
    #[serde(default = "default_platform_type")]
    pub platform_type: String,
    /// Dependencies installed into the staged template, as `name@versionRange`.
    #[serde(default = "default_dependencies")]
    pub dependencies: Vec<String>,
    /// Icon size tokens in preference order (most preferred first).
    #[serde(default = "default_preferred_icon_sizes")]
    pub preferred_icon_sizes: Vec<String>,
    /// Program used to install template dependencies.
    #[serde(default = "default_installer_program")]
    pub installer_program: String,
    /// Program used to package the staged template.
    #[serde(default = "default_packager_program")]
    pub packager_program: String,
    /// Directory holding the app template. Overridden by `--template`.
    #[serde(default)]
    pub template_dir: Option<PathBuf>,
    #[serde(default)]
    pub window: WindowConfig,
}

fn default_platform_type() -> String {
    platform::PLATFORM_TYPE.to_string()
}

fn default_dependencies() -> Vec<String> {
    vec![
        "electron-prebuilt@^1.2.0".to_string(),
        "electron-window-state@^3.0.3".to_string(),
    ]
}

fn default_preferred_icon_sizes() -> Vec<String> {
    [
        "256x256", "128x128", "96x96", "64x64", "48x48", "32x32", "24x24", "16x16",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_installer_program() -> String {
    "npm".to_string()
}

fn default_packager_program() -> String {
    "electron-packager".to_string()
}

impl Default for DeskpackConfig {
    fn default() -> Self {
        Self {
            arch: None,
            platform_type: default_platform_type(),
            dependencies: default_dependencies(),
            preferred_icon_sizes: default_preferred_icon_sizes(),
            installer_program: default_installer_program(),
            packager_program: default_packager_program(),
            template_dir: None,
            window: WindowConfig::default(),
        }
    }
}

impl DeskpackConfig {
    /// Architecture to package for, after applying the environment fallback.
    pub fn resolved_arch(&self) -> String {
        platform::resolve_arch(self.arch.as_deref())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("deskpack")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<DeskpackConfig> {
    load_or_init_at(&config_path()?)
}

/// Like [`load_or_init`] but for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<DeskpackConfig> {
    if !path.exists() {
        let default_cfg = DeskpackConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: DeskpackConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = DeskpackConfig::default();
        assert_eq!(cfg.platform_type, "win32");
        assert_eq!(cfg.installer_program, "npm");
        assert_eq!(cfg.packager_program, "electron-packager");
        assert_eq!(cfg.dependencies.len(), 2);
        assert_eq!(cfg.preferred_icon_sizes[0], "256x256");
        assert_eq!(cfg.window.default_width, 1000);
        assert_eq!(cfg.window.default_height, 800);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = DeskpackConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: DeskpackConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.platform_type, cfg.platform_type);
        assert_eq!(parsed.dependencies, cfg.dependencies);
        assert_eq!(parsed.preferred_icon_sizes, cfg.preferred_icon_sizes);
    }

    #[test]
    fn config_toml_partial_uses_defaults() {
        let toml = r#"
            arch = "ia32"
            dependencies = ["electron@^30.0.0"]
        "#;
        let cfg: DeskpackConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.arch.as_deref(), Some("ia32"));
        assert_eq!(cfg.resolved_arch(), "ia32");
        assert_eq!(cfg.dependencies, vec!["electron@^30.0.0".to_string()]);
        assert_eq!(cfg.packager_program, "electron-packager");
        assert!(cfg.template_dir.is_none());
    }

    #[test]
    fn config_toml_window_section() {
        let toml = r#"
            template_dir = "/opt/deskpack/template"

            [window]
            default_width = 1280
            default_height = 720
        "#;
        let cfg: DeskpackConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.window.default_width, 1280);
        assert_eq!(cfg.window.default_height, 720);
        assert_eq!(
            cfg.template_dir.as_deref(),
            Some(Path::new("/opt/deskpack/template"))
        );
    }

    #[test]
    fn load_or_init_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = load_or_init_at(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.platform_type, "win32");
        let again = load_or_init_at(&path).unwrap();
        assert_eq!(again.dependencies, cfg.dependencies);
    }
}
