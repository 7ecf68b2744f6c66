//! CLI for the deskpack desktop app generator.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use deskpack_core::config;
use deskpack_core::manifest::BASE_MANIFEST_FORMAT;
use std::path::PathBuf;

use commands::{
    run_add_icon, run_check_url, run_completions, run_convert_icon, run_find_icon, run_generate,
    run_icons, run_man, run_select_icon, GenerateOptions,
};

/// Top-level CLI for deskpack.
#[derive(Debug, Parser)]
#[command(name = "deskpack")]
#[command(about = "deskpack: package a web-app manifest as a Windows desktop app", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Generate the desktop app for a manifest.
    Generate {
        /// Path to the manifest JSON file.
        manifest: PathBuf,
        /// Root directory for the generated platform folder (default: current dir).
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
        /// App template directory (overrides `template_dir` from config).
        #[arg(long, value_name = "DIR")]
        template: Option<PathBuf>,
        /// Format the manifest is supplied in.
        #[arg(long, default_value = BASE_MANIFEST_FORMAT)]
        format: String,
        /// Target architecture (overrides config and `npm_config_arch`).
        #[arg(long)]
        arch: Option<String>,
        /// Stage the app without installing template dependencies.
        #[arg(long)]
        skip_install: bool,
        /// Stage the app without running the packager.
        #[arg(long)]
        skip_package: bool,
    },

    /// Show which manifest icon would be packaged.
    SelectIcon {
        /// Path to the manifest JSON file.
        manifest: PathBuf,
    },

    /// Check whether a URL may load inside the app.
    CheckUrl {
        /// Path to the manifest JSON file.
        manifest: PathBuf,
        /// URL of the navigation.
        url: String,
        /// Hand denied URLs to the system browser.
        #[arg(long)]
        open: bool,
    },

    /// List icon sources declared by a manifest.
    Icons {
        /// Path to the manifest JSON file.
        manifest: PathBuf,
    },

    /// Find the icon declared at exactly SIZExSIZE.
    FindIcon {
        /// Path to the manifest JSON file.
        manifest: PathBuf,
        /// Icon side in pixels.
        size: u32,
    },

    /// Append a bundled icon to a manifest and rewrite it.
    AddIcon {
        /// Path to the manifest JSON file.
        manifest: PathBuf,
        /// Icon file name as referenced from the manifest.
        file: String,
        /// Icon side in pixels.
        size: u32,
    },

    /// Convert an image into a native .ico file.
    ConvertIcon {
        /// Source image (PNG or ICO).
        src: PathBuf,
        /// Destination .ico path.
        dest: PathBuf,
    },

    /// Print a shell completion script.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print the man page.
    Man,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Generate {
                manifest,
                out,
                template,
                format,
                arch,
                skip_install,
                skip_package,
            } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                let opts = GenerateOptions {
                    manifest,
                    out,
                    template,
                    format,
                    arch,
                    install: !skip_install,
                    package: !skip_package,
                };
                run_generate(&cfg, opts).await?;
            }
            CliCommand::SelectIcon { manifest } => {
                let cfg = config::load_or_init()?;
                run_select_icon(&cfg, &manifest)?;
            }
            CliCommand::CheckUrl {
                manifest,
                url,
                open,
            } => run_check_url(&manifest, &url, open)?,
            CliCommand::Icons { manifest } => run_icons(&manifest)?,
            CliCommand::FindIcon { manifest, size } => run_find_icon(&manifest, size)?,
            CliCommand::AddIcon {
                manifest,
                file,
                size,
            } => run_add_icon(&manifest, &file, size)?,
            CliCommand::ConvertIcon { src, dest } => run_convert_icon(&src, &dest).await?,
            CliCommand::Completions { shell } => run_completions(shell)?,
            CliCommand::Man => run_man()?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
