//! `deskpack select-icon` – show the icon that would be packaged.

use anyhow::Result;
use deskpack_core::config::DeskpackConfig;
use deskpack_core::icons::{parse_sizes, IconPolicy, IconSize};
use deskpack_core::manifest;
use std::path::Path;

pub fn run_select_icon(cfg: &DeskpackConfig, manifest_path: &Path) -> Result<()> {
    let m = manifest::load(manifest_path)?;
    let policy = IconPolicy::new(cfg.preferred_icon_sizes.iter().cloned());
    match policy.rank(&m.icons) {
        Some((tier, icon)) => {
            let largest = parse_sizes(&icon.sizes)
                .iter()
                .map(IconSize::max_side)
                .max()
                .map(|side| format!("{side}px"))
                .unwrap_or_else(|| "unknown size".to_string());
            println!("{}  ({:?}, largest {})", icon.src, tier, largest);
        }
        None => println!("No icon"),
    }
    Ok(())
}
