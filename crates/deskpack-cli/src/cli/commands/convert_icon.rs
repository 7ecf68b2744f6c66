//! `deskpack convert-icon` – write an image as a native .ico file.

use anyhow::{Context, Result};
use deskpack_core::icons::convert::{self, IconOutput};
use std::path::Path;

pub async fn run_convert_icon(src: &Path, dest: &Path) -> Result<()> {
    let (src_owned, dest_owned) = (src.to_path_buf(), dest.to_path_buf());
    let output = tokio::task::spawn_blocking(move || convert::write_app_icon(&src_owned, &dest_owned))
        .await
        .context("icon conversion task panicked")??;
    match output {
        IconOutput::Copied => println!("Copied {} to {}", src.display(), dest.display()),
        IconOutput::Converted { frames } => {
            println!("Wrote {} ({} frames)", dest.display(), frames)
        }
    }
    Ok(())
}
