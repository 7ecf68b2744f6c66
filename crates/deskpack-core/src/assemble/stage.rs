//! Staging steps: template copy, app name injection, generation info.

use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Placeholder replaced by the app name in the template's `package.json`.
pub const APP_NAME_TOKEN: &str = "replace";

/// Telemetry file written next to the persisted manifest.
pub const GENERATION_INFO_FILE: &str = "generationInfo.json";

/// Name used for packaging: the manifest name with all spaces removed.
pub fn package_name(app_name: &str) -> String {
    app_name.chars().filter(|c| *c != ' ').collect()
}

/// Recursively copies `src` into `dst`; returns the number of files copied.
///
/// `dst` must not lie inside `src`.
pub fn copy_template(src: &Path, dst: &Path) -> io::Result<u64> {
    let src_abs = src.canonicalize()?;
    if lenient_canonicalize(dst)?.starts_with(&src_abs) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "destination {} is inside the template {}",
                dst.display(),
                src.display()
            ),
        ));
    }

    let mut copied = 0;
    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Canonicalizes the longest existing ancestor of `path` and re-appends the rest.
fn lenient_canonicalize(path: &Path) -> io::Result<PathBuf> {
    let mut missing = Vec::new();
    let mut current = path;
    loop {
        match current.canonicalize() {
            Ok(mut resolved) => {
                resolved.extend(missing.iter().rev());
                return Ok(resolved);
            }
            Err(e) => {
                let (Some(parent), Some(name)) = (current.parent(), current.file_name()) else {
                    return Err(e);
                };
                missing.push(name.to_os_string());
                current = if parent.as_os_str().is_empty() {
                    Path::new(".")
                } else {
                    parent
                };
            }
        }
    }
}

/// Replaces every [`APP_NAME_TOKEN`] in `file` with `name`.
pub fn inject_app_name(file: &Path, name: &str) -> io::Result<()> {
    let data = fs::read_to_string(file)?;
    fs::write(file, data.replace(APP_NAME_TOKEN, name))
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationInfo {
    pub generated_at: String,
    pub generated_from: String,
    pub generator: String,
    pub generator_version: String,
    pub platform: String,
}

impl GenerationInfo {
    pub fn now(platform: &str) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            generated_from: "CLI".to_string(),
            generator: env!("CARGO_PKG_NAME").to_string(),
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
            platform: platform.to_string(),
        }
    }
}

/// Writes `value` as pretty JSON to `path`.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_name_strips_spaces() {
        assert_eq!(package_name("My Great App"), "MyGreatApp");
        assert_eq!(package_name("Solo"), "Solo");
    }

    #[test]
    fn copy_template_recurses() {
        let src = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(src.path().join("lib/nested")).unwrap();
        std::fs::write(src.path().join("package.json"), "{}").unwrap();
        std::fs::write(src.path().join("lib/nested/main.js"), "x").unwrap();
        std::fs::create_dir_all(src.path().join("empty")).unwrap();

        let dst = tempfile::tempdir().unwrap();
        let target = dst.path().join("template");
        assert_eq!(copy_template(src.path(), &target).unwrap(), 2);
        assert_eq!(std::fs::read_to_string(target.join("lib/nested/main.js")).unwrap(), "x");
        assert!(target.join("empty").is_dir());
    }

    #[test]
    fn copy_into_own_subtree_rejected() {
        let src = tempfile::tempdir().unwrap();
        std::fs::write(src.path().join("package.json"), "{}").unwrap();
        std::fs::create_dir_all(src.path().join("win32")).unwrap();

        let target = src.path().join("win32").join("template");
        let err = copy_template(src.path(), &target).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(!target.exists());

        let err = copy_template(src.path(), src.path()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn sibling_with_common_prefix_allowed() {
        let root = tempfile::tempdir().unwrap();
        let src = root.path().join("shell");
        std::fs::create_dir_all(&src).unwrap();
        std::fs::write(src.join("main.js"), "x").unwrap();
        let target = root.path().join("shell-out").join("template");
        assert_eq!(copy_template(&src, &target).unwrap(), 1);
    }

    #[test]
    fn copy_template_missing_source_fails() {
        let dst = tempfile::tempdir().unwrap();
        assert!(copy_template(&dst.path().join("nope"), &dst.path().join("t")).is_err());
    }

    #[test]
    fn inject_replaces_every_token() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("package.json");
        std::fs::write(
            &file,
            r#"{ "name": "replace", "productName": "replace", "main": "main.js" }"#,
        )
        .unwrap();
        inject_app_name(&file, "Example").unwrap();
        let out = std::fs::read_to_string(&file).unwrap();
        assert_eq!(
            out,
            r#"{ "name": "Example", "productName": "Example", "main": "main.js" }"#
        );
    }

    #[test]
    fn generation_info_fields() {
        let info = GenerationInfo::now("win32");
        let v = serde_json::to_value(&info).unwrap();
        assert_eq!(v["platform"], "win32");
        assert_eq!(v["generator"], "deskpack-core");
        assert!(v["generatedAt"].as_str().unwrap().contains('T'));
    }
}
