//! Launch window settings derived from the manifest.
//!
//! Written as `window.json` into the staged template so the app shell can
//! size and color its main window before the first page load.

use serde::{Deserialize, Serialize};

use crate::config::WindowConfig;
use crate::manifest::Manifest;

/// File name of the settings inside the staged template.
pub const WINDOW_SETTINGS_FILE: &str = "window.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// `#RRGGBB`, absent when the manifest has none or it could not be parsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    pub start_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized color {0:?}")]
pub struct ColorParseError(pub String);

const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("black", [0, 0, 0]),
    ("silver", [192, 192, 192]),
    ("gray", [128, 128, 128]),
    ("grey", [128, 128, 128]),
    ("white", [255, 255, 255]),
    ("maroon", [128, 0, 0]),
    ("red", [255, 0, 0]),
    ("purple", [128, 0, 128]),
    ("fuchsia", [255, 0, 255]),
    ("green", [0, 128, 0]),
    ("lime", [0, 255, 0]),
    ("olive", [128, 128, 0]),
    ("yellow", [255, 255, 0]),
    ("navy", [0, 0, 128]),
    ("blue", [0, 0, 255]),
    ("teal", [0, 128, 128]),
    ("aqua", [0, 255, 255]),
    ("orange", [255, 165, 0]),
];

impl WindowSettings {
    pub fn from_manifest(manifest: &Manifest, cfg: &WindowConfig) -> Self {
        let title = manifest
            .name
            .clone()
            .filter(|n| !n.is_empty())
            .or_else(|| manifest.short_name.clone())
            .unwrap_or_default();

        let background_color = manifest
            .background_color
            .as_deref()
            .and_then(|raw| match parse_color(raw) {
                Ok(hex) => Some(hex),
                Err(e) => {
                    tracing::warn!("ignoring background_color: {}", e);
                    None
                }
            });

        Self {
            title,
            width: cfg.default_width,
            height: cfg.default_height,
            background_color,
            start_url: manifest.start_url.clone().unwrap_or_default(),
        }
    }
}

/// Parses a CSS color (`#rgb`, `#rrggbb`, `rgb(r, g, b)` or a basic keyword) into `#RRGGBB`.
pub fn parse_color(input: &str) -> Result<String, ColorParseError> {
    let err = || ColorParseError(input.to_string());
    let s = input.trim().to_ascii_lowercase();

    let rgb = if let Some(hex) = s.strip_prefix('#') {
        parse_hex(hex).ok_or_else(err)?
    } else if let Some(args) = s.strip_prefix("rgb(").and_then(|r| r.strip_suffix(')')) {
        parse_rgb_args(args).ok_or_else(err)?
    } else {
        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == s)
            .map(|(_, rgb)| *rgb)
            .ok_or_else(err)?
    };

    Ok(format!("#{:02X}{:02X}{:02X}", rgb[0], rgb[1], rgb[2]))
}

fn parse_hex(hex: &str) -> Option<[u8; 3]> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let mut out = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                let v = c.to_digit(16)? as u8;
                out[i] = v * 17;
            }
            Some(out)
        }
        6 => {
            let mut out = [0u8; 3];
            for (i, slot) in out.iter_mut().enumerate() {
                *slot = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).ok()?;
            }
            Some(out)
        }
        _ => None,
    }
}

fn parse_rgb_args(args: &str) -> Option<[u8; 3]> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return None;
    }
    let mut out = [0u8; 3];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = part.parse().ok()?;
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_forms() {
        assert_eq!(parse_color("#fff").unwrap(), "#FFFFFF");
        assert_eq!(parse_color("#1a2B3c").unwrap(), "#1A2B3C");
        assert_eq!(parse_color("rgb(255, 0, 10)").unwrap(), "#FF000A");
        assert_eq!(parse_color(" Navy ").unwrap(), "#000080");
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", "#ggg", "#12345", "rgb(1,2)", "rgb(256,0,0)", "blurple"] {
            assert!(parse_color(bad).is_err(), "{bad:?}");
        }
    }

    #[test]
    fn settings_from_manifest() {
        let m = Manifest {
            start_url: Some("https://app.example.com/".into()),
            short_name: Some("App".into()),
            background_color: Some("#000".into()),
            ..Manifest::default()
        };
        let s = WindowSettings::from_manifest(&m, &WindowConfig::default());
        assert_eq!(s.title, "App");
        assert_eq!(s.width, 1000);
        assert_eq!(s.height, 800);
        assert_eq!(s.background_color.as_deref(), Some("#000000"));
        assert_eq!(s.start_url, "https://app.example.com/");
    }

    #[test]
    fn bad_background_color_falls_back_to_none() {
        let m = Manifest {
            name: Some("Full".into()),
            short_name: Some("Short".into()),
            background_color: Some("not-a-color".into()),
            ..Manifest::default()
        };
        let s = WindowSettings::from_manifest(&m, &WindowConfig::default());
        assert_eq!(s.title, "Full");
        assert!(s.background_color.is_none());
        let json = serde_json::to_string(&s).unwrap();
        assert!(!json.contains("background_color"));
    }
}
