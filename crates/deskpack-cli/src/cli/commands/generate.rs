//! `deskpack generate` – stage, install and package the app for a manifest.

use anyhow::{Context, Result};
use deskpack_core::assemble::{AppAssembler, AssembleRequest};
use deskpack_core::config::DeskpackConfig;
use deskpack_core::manifest::{self, ManifestInfo};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub manifest: PathBuf,
    pub out: Option<PathBuf>,
    pub template: Option<PathBuf>,
    pub format: String,
    pub arch: Option<String>,
    pub install: bool,
    pub package: bool,
}

pub async fn run_generate(cfg: &DeskpackConfig, opts: GenerateOptions) -> Result<()> {
    let content = manifest::load(&opts.manifest)?;
    let template_dir = opts
        .template
        .or_else(|| cfg.template_dir.clone())
        .context("no app template: pass --template or set template_dir in config.toml")?;
    let root_dir = match opts.out {
        Some(dir) => dir,
        None => std::env::current_dir().context("current directory")?,
    };

    let mut cfg = cfg.clone();
    if opts.arch.is_some() {
        cfg.arch = opts.arch;
    }
    let assembler = AppAssembler::with_default_tools(&cfg);

    let outcome = assembler
        .assemble(AssembleRequest {
            info: ManifestInfo {
                format: opts.format,
                content,
            },
            root_dir,
            template_dir,
            manifest_dir: opts.manifest.parent().map(Path::to_path_buf),
            install: opts.install,
            package: opts.package,
        })
        .await?;

    println!("Generated {} in {}", outcome.app_name, outcome.platform_dir.display());
    match &outcome.icon {
        Some(icon) => println!("  icon:     {}", icon.display()),
        None => println!("  icon:     (none)"),
    }
    println!("  template: {}", outcome.staged_template.display());
    if let Some(app_dir) = &outcome.app_dir {
        println!("  package:  {}", app_dir.display());
    }
    Ok(())
}
