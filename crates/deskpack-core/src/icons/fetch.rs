//! Fetching manifest icons into the staging directory.
//!
//! Icons are taken from disk when the file sits next to the manifest,
//! otherwise resolved against `start_url` and downloaded with libcurl.
//! Runs in the current thread; call from `spawn_blocking` in async code.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::manifest::Manifest;

/// Where an icon's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconLocation {
    Remote(String),
    Local(PathBuf),
}

/// An icon copied into the images directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedIcon {
    /// Position of the icon in the manifest's list.
    pub index: usize,
    /// `src` as declared in the manifest.
    pub src: String,
    pub path: PathBuf,
}

/// Resolves an icon `src` to a location.
///
/// Absolute URLs are used as-is. Relative sources are looked up next to the
/// manifest first, then resolved against `start_url`.
pub fn locate(src: &str, start_url: Option<&str>, manifest_dir: Option<&Path>) -> Option<IconLocation> {
    if let Ok(url) = Url::parse(src) {
        return location_for(url);
    }
    if let Some(dir) = manifest_dir {
        let candidate = dir.join(src.trim_start_matches('/'));
        if candidate.is_file() {
            return Some(IconLocation::Local(candidate));
        }
    }
    let base = Url::parse(start_url?).ok()?;
    location_for(base.join(src).ok()?)
}

fn location_for(url: Url) -> Option<IconLocation> {
    match url.scheme() {
        "http" | "https" => Some(IconLocation::Remote(url.into())),
        "file" => url.to_file_path().ok().map(IconLocation::Local),
        _ => None,
    }
}

/// File name an icon is stored under: last path segment without query or fragment.
pub fn icon_file_name(src: &str) -> Option<String> {
    let path = src.split(['?', '#']).next().unwrap_or(src);
    let name = path.rsplit(['/', '\\']).next()?.trim();
    if name.is_empty() || name == "." || name == ".." {
        None
    } else {
        Some(name.to_string())
    }
}

/// GET `url` and return the body. Follows redirects; non-2xx is an error.
pub fn download(url: &str) -> Result<Vec<u8>> {
    let mut body = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url).context("invalid URL")?;
    easy.follow_location(true)?;
    easy.connect_timeout(Duration::from_secs(15))?;
    easy.timeout(Duration::from_secs(60))?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer
            .perform()
            .with_context(|| format!("GET {url} failed"))?;
    }

    let code = easy.response_code().context("no response code")?;
    if !(200..300).contains(&code) {
        anyhow::bail!("GET {} returned HTTP {}", url, code);
    }
    Ok(body)
}

/// Copies or downloads the icon at `location` to `dest`.
pub fn fetch_to(location: &IconLocation, dest: &Path) -> Result<()> {
    match location {
        IconLocation::Local(src) => {
            fs::copy(src, dest)
                .with_context(|| format!("copy {} to {}", src.display(), dest.display()))?;
        }
        IconLocation::Remote(url) => {
            let bytes = download(url)?;
            fs::write(dest, bytes).with_context(|| format!("write {}", dest.display()))?;
        }
    }
    Ok(())
}

/// Fetches every manifest icon into `images_dir` as `<index>-<file name>`.
///
/// Failures are logged per icon and skipped; the returned list holds the
/// icons that are now on disk.
pub fn fetch_all(manifest: &Manifest, manifest_dir: Option<&Path>, images_dir: &Path) -> Result<Vec<FetchedIcon>> {
    fs::create_dir_all(images_dir)
        .with_context(|| format!("create {}", images_dir.display()))?;

    let start_url = manifest.start_url.as_deref();
    let mut fetched = Vec::new();
    for (index, icon) in manifest.icons.iter().enumerate() {
        let Some(name) = icon_file_name(&icon.src) else {
            tracing::warn!(src = %icon.src, "icon has no usable file name");
            continue;
        };
        let Some(location) = locate(&icon.src, start_url, manifest_dir) else {
            tracing::warn!(src = %icon.src, "could not resolve icon location");
            continue;
        };
        let dest = images_dir.join(format!("{index}-{name}"));
        match fetch_to(&location, &dest) {
            Ok(()) => {
                tracing::debug!(src = %icon.src, path = %dest.display(), "fetched icon");
                fetched.push(FetchedIcon {
                    index,
                    src: icon.src.clone(),
                    path: dest,
                });
            }
            Err(e) => tracing::warn!(src = %icon.src, "failed to fetch icon: {:#}", e),
        }
    }
    Ok(fetched)
}
