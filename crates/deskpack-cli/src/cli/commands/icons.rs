//! `deskpack icons`, `find-icon` and `add-icon` – manifest icon list tools.

use anyhow::Result;
use deskpack_core::manifest;
use std::path::Path;

pub fn run_icons(manifest_path: &Path) -> Result<()> {
    let m = manifest::load(manifest_path)?;
    let sources = manifest::list_icon_sources(&m);
    if sources.is_empty() {
        println!("No icons in manifest.");
    }
    for src in sources {
        println!("{src}");
    }
    Ok(())
}

pub fn run_find_icon(manifest_path: &Path, size: u32) -> Result<()> {
    let m = manifest::load(manifest_path)?;
    match manifest::find_icon_by_size(&m, size) {
        Some(icon) => println!("{}", icon.src),
        None => println!("No {size}x{size} icon"),
    }
    Ok(())
}

pub fn run_add_icon(manifest_path: &Path, file: &str, size: u32) -> Result<()> {
    let mut m = manifest::load(manifest_path)?;
    manifest::add_icon(&mut m, file, size);
    manifest::save(&m, manifest_path)?;
    println!("Added {file} ({size}x{size}) to {}", manifest_path.display());
    Ok(())
}
