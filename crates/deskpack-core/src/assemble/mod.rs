//! App assembly pipeline.
//!
//! Turns a manifest into a packaged desktop app as a sequence of stages:
//! format check, icon fetch and conversion, template staging, manifest
//! persistence, name injection, dependency install, packaging and manifest
//! relocation. Icon stages are best effort; every other stage is fatal and
//! stops the pipeline at the first error.

mod error;
mod stage;
mod tools;

pub use error::{AssembleError, ToolError};
pub use stage::{
    copy_template, inject_app_name, package_name, GenerationInfo, APP_NAME_TOKEN,
    GENERATION_INFO_FILE,
};
pub use tools::{DependencyInstaller, ElectronPackager, NpmInstaller, PackageRequest, Packager};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::{DeskpackConfig, WindowConfig};
use crate::icons::{convert, fetch, IconPolicy};
use crate::manifest::{self, Manifest, ManifestInfo};
use crate::platform;
use crate::window::{WindowSettings, WINDOW_SETTINGS_FILE};

/// Name of the generated native icon inside `images/`.
pub const APP_ICON_FILE: &str = "app.ico";

/// Settings shared by every generation.
#[derive(Debug, Clone)]
pub struct AssembleConfig {
    pub arch: String,
    pub platform_type: String,
    pub dependencies: Vec<String>,
    pub icon_policy: IconPolicy,
    pub window: WindowConfig,
}

impl AssembleConfig {
    pub fn from_config(cfg: &DeskpackConfig) -> Self {
        Self {
            arch: cfg.resolved_arch(),
            platform_type: cfg.platform_type.clone(),
            dependencies: cfg.dependencies.clone(),
            icon_policy: IconPolicy::new(cfg.preferred_icon_sizes.iter().cloned()),
            window: cfg.window.clone(),
        }
    }
}

/// One generation request.
#[derive(Debug, Clone)]
pub struct AssembleRequest {
    pub info: ManifestInfo,
    /// Root under which the platform directory is created.
    pub root_dir: PathBuf,
    /// App template to stage.
    pub template_dir: PathBuf,
    /// Directory of the manifest file; relative icons are looked up here first.
    pub manifest_dir: Option<PathBuf>,
    pub install: bool,
    pub package: bool,
}

/// Paths produced by a successful generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembleOutcome {
    pub app_name: String,
    pub platform_dir: PathBuf,
    pub staged_template: PathBuf,
    pub manifest_path: PathBuf,
    /// Generated native icon, if one could be produced.
    pub icon: Option<PathBuf>,
    /// Packaged app directory, if packaging ran.
    pub app_dir: Option<PathBuf>,
}

pub struct AppAssembler<I, P> {
    config: AssembleConfig,
    installer: I,
    packager: P,
}

impl<I: DependencyInstaller, P: Packager> AppAssembler<I, P> {
    pub fn new(config: AssembleConfig, installer: I, packager: P) -> Self {
        Self {
            config,
            installer,
            packager,
        }
    }

    pub async fn assemble(&self, request: AssembleRequest) -> Result<AssembleOutcome, AssembleError> {
        let AssembleRequest {
            info,
            root_dir,
            template_dir,
            manifest_dir,
            install,
            package,
        } = request;

        // Validation happens before anything touches the filesystem.
        if !info.is_base_format() {
            return Err(AssembleError::UnsupportedFormat(info.format));
        }
        let manifest = info.content;
        if manifest.start_url.is_none() {
            return Err(AssembleError::MissingStartUrl);
        }
        let app_name = package_name(manifest.app_name().ok_or(AssembleError::MissingName)?);

        tracing::info!("Generating the {} app...", platform::PLATFORM_NAME);
        let platform_dir = root_dir.join(platform::PLATFORM_ID);
        fs::create_dir_all(&platform_dir).map_err(|source| AssembleError::CreateDir {
            path: platform_dir.clone(),
            source,
        })?;

        let icon = self
            .prepare_icon(&manifest, manifest_dir, &platform_dir.join("images"))
            .await;

        let staged_template = platform_dir.join("template");
        let copied = {
            let (src, dst) = (template_dir.clone(), staged_template.clone());
            blocking(move || copy_template(&src, &dst))
                .await
                .map_err(|source| AssembleError::Template {
                    path: template_dir.clone(),
                    source,
                })?
        };
        tracing::debug!(files = copied, "staged template at {}", staged_template.display());

        let info_path = platform_dir.join(GENERATION_INFO_FILE);
        stage::write_json(&info_path, &GenerationInfo::now(platform::PLATFORM_ID))
            .map_err(|source| AssembleError::Write {
                path: info_path,
                source,
            })?;

        let manifest_path = platform_dir.join("manifest.json");
        manifest::save(&manifest, &manifest_path).map_err(AssembleError::Persist)?;
        tracing::debug!("persisted manifest to {}", manifest_path.display());

        let package_json = staged_template.join("package.json");
        inject_app_name(&package_json, &app_name).map_err(|source| AssembleError::InjectName {
            path: package_json,
            source,
        })?;

        let window_path = staged_template.join(WINDOW_SETTINGS_FILE);
        let window = WindowSettings::from_manifest(&manifest, &self.config.window);
        stage::write_json(&window_path, &window).map_err(|source| AssembleError::Write {
            path: window_path,
            source,
        })?;

        if install {
            tracing::info!(
                count = self.config.dependencies.len(),
                "installing template dependencies"
            );
            self.installer
                .install(&staged_template, &self.config.dependencies)
                .await
                .map_err(AssembleError::Install)?;
        }

        let app_dir = if package {
            let request = PackageRequest {
                name: app_name.clone(),
                source_dir: staged_template.clone(),
                arch: self.config.arch.clone(),
                platform_type: self.config.platform_type.clone(),
                out_dir: platform_dir.join("out"),
                icon: icon.clone(),
                overwrite: true,
            };
            tracing::info!("Generating {} package", platform::PLATFORM_NAME);
            self.packager
                .package(&request)
                .await
                .map_err(AssembleError::Package)?;
            relocate_manifest(&manifest_path, &request.packaged_manifest_path())?;
            Some(request.app_dir())
        } else {
            None
        };

        tracing::info!(app = %app_name, "generation finished in {}", platform_dir.display());
        Ok(AssembleOutcome {
            app_name,
            platform_dir,
            staged_template,
            manifest_path,
            icon,
            app_dir,
        })
    }

    /// Fetches icons and writes the selected one as the native container.
    /// Returns `None` (after logging) whenever no usable icon results.
    async fn prepare_icon(
        &self,
        manifest: &Manifest,
        manifest_dir: Option<PathBuf>,
        images_dir: &Path,
    ) -> Option<PathBuf> {
        let Some((tier, chosen)) = self.config.icon_policy.rank(&manifest.icons) else {
            tracing::info!("no suitable icon in manifest; skipping icon generation");
            return None;
        };
        tracing::debug!(src = %chosen.src, ?tier, "selected app icon");
        let chosen_src = chosen.src.clone();
        let chosen_index = manifest
            .icons
            .iter()
            .position(|icon| std::ptr::eq(icon, chosen))?;

        let fetched = {
            let (m, dir) = (manifest.clone(), images_dir.to_path_buf());
            blocking(move || fetch::fetch_all(&m, manifest_dir.as_deref(), &dir)).await
        };
        let fetched = match fetched {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("icon fetch failed: {:#}", e);
                return None;
            }
        };
        let Some(source) = fetched.into_iter().find(|f| f.index == chosen_index) else {
            tracing::warn!(src = %chosen_src, "selected icon could not be fetched");
            return None;
        };

        let dest = images_dir.join(APP_ICON_FILE);
        let result = {
            let dest = dest.clone();
            blocking(move || convert::write_app_icon(&source.path, &dest)).await
        };
        match result {
            Ok(output) => {
                tracing::debug!(?output, "wrote {}", dest.display());
                Some(dest)
            }
            Err(e) => {
                tracing::warn!("icon conversion failed: {:#}", e);
                None
            }
        }
    }
}

impl AppAssembler<NpmInstaller, ElectronPackager> {
    /// Assembler using the configured npm and electron-packager programs.
    pub fn with_default_tools(cfg: &DeskpackConfig) -> Self {
        Self::new(
            AssembleConfig::from_config(cfg),
            NpmInstaller::new(cfg.installer_program.clone()),
            ElectronPackager::new(cfg.packager_program.clone()),
        )
    }
}

fn relocate_manifest(from: &Path, to: &Path) -> Result<(), AssembleError> {
    let copy = || -> io::Result<()> {
        if let Some(parent) = to.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(from, to)?;
        Ok(())
    };
    copy().map_err(|source| AssembleError::Relocate {
        path: to.to_path_buf(),
        source,
    })?;
    tracing::debug!("copied manifest to {}", to.display());
    Ok(())
}

/// Runs blocking work off the async runtime, folding a panicked task into the error.
async fn blocking<T, E, F>(f: F) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: From<io::Error> + Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(result) => result,
        Err(join) => Err(io::Error::new(io::ErrorKind::Other, join).into()),
    }
}
