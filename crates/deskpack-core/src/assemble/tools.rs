//! External tools the pipeline drives: dependency installer and packager.
//!
//! Both are seams so callers (and tests) can substitute their own
//! implementations. Child processes are killed if the pipeline future is
//! dropped.

use std::ffi::OsString;
use std::future::Future;
use std::path::{Path, PathBuf};

use super::error::ToolError;

/// Installs `name@versionRange` dependencies into a staged template.
pub trait DependencyInstaller {
    fn install(
        &self,
        dir: &Path,
        dependencies: &[String],
    ) -> impl Future<Output = Result<(), ToolError>> + Send;
}

/// Packages a staged template into a native app directory.
pub trait Packager {
    fn package(&self, request: &PackageRequest)
        -> impl Future<Output = Result<(), ToolError>> + Send;
}

/// Inputs handed to the packager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRequest {
    pub name: String,
    pub source_dir: PathBuf,
    pub arch: String,
    pub platform_type: String,
    pub out_dir: PathBuf,
    pub icon: Option<PathBuf>,
    pub overwrite: bool,
}

impl PackageRequest {
    /// Directory the packager produces: `<out>/<name>-<platform>-<arch>`.
    pub fn app_dir(&self) -> PathBuf {
        self.out_dir
            .join(format!("{}-{}-{}", self.name, self.platform_type, self.arch))
    }

    /// Where the persisted manifest is copied after packaging.
    pub fn packaged_manifest_path(&self) -> PathBuf {
        self.app_dir().join("resources").join("manifest.json")
    }
}

/// Runs `program` (looked up in PATH) to completion.
async fn run_tool(program: &str, args: &[OsString], cwd: Option<&Path>) -> Result<(), ToolError> {
    let path = which::which(program).map_err(|source| ToolError::NotFound {
        program: program.to_string(),
        source,
    })?;

    let mut cmd = tokio::process::Command::new(&path);
    cmd.args(args).kill_on_drop(true);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }
    tracing::debug!(program = %path.display(), ?args, "running tool");

    let status = cmd.status().await.map_err(|source| ToolError::Spawn {
        program: program.to_string(),
        source,
    })?;
    if !status.success() {
        return Err(ToolError::Failed {
            program: program.to_string(),
            status,
        });
    }
    Ok(())
}

/// `npm install <deps...>` inside the template directory.
#[derive(Debug, Clone)]
pub struct NpmInstaller {
    pub program: String,
}

impl Default for NpmInstaller {
    fn default() -> Self {
        Self {
            program: "npm".to_string(),
        }
    }
}

impl NpmInstaller {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn args(dependencies: &[String]) -> Vec<OsString> {
        std::iter::once(OsString::from("install"))
            .chain(dependencies.iter().map(OsString::from))
            .collect()
    }
}

impl DependencyInstaller for NpmInstaller {
    async fn install(&self, dir: &Path, dependencies: &[String]) -> Result<(), ToolError> {
        run_tool(&self.program, &Self::args(dependencies), Some(dir)).await
    }
}

/// `electron-packager` command line.
#[derive(Debug, Clone)]
pub struct ElectronPackager {
    pub program: String,
}

impl Default for ElectronPackager {
    fn default() -> Self {
        Self {
            program: "electron-packager".to_string(),
        }
    }
}

impl ElectronPackager {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn args(request: &PackageRequest) -> Vec<OsString> {
        let flag = |name: &str, value: &Path| {
            let mut s = OsString::from(format!("--{name}="));
            s.push(value.as_os_str());
            s
        };
        let mut args = vec![
            request.source_dir.clone().into_os_string(),
            OsString::from(&request.name),
            OsString::from(format!("--platform={}", request.platform_type)),
            OsString::from(format!("--arch={}", request.arch)),
            flag("out", &request.out_dir),
            OsString::from("--prune"),
        ];
        if let Some(icon) = &request.icon {
            args.push(flag("icon", icon));
        }
        if request.overwrite {
            args.push(OsString::from("--overwrite"));
        }
        args
    }
}

impl Packager for ElectronPackager {
    async fn package(&self, request: &PackageRequest) -> Result<(), ToolError> {
        run_tool(&self.program, &Self::args(request), None).await
    }
}
