//! `WxH` icon size tokens.

use std::fmt;
use std::str::FromStr;

/// Pixel dimensions of an icon, written `WxH` in manifests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IconSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid icon size {0:?}; expected WxH with positive integers")]
pub struct InvalidIconSize(pub String);

impl IconSize {
    pub fn square(size: u32) -> Self {
        Self {
            width: size,
            height: size,
        }
    }

    /// Largest side, used when matching raster sources to container frames.
    pub fn max_side(&self) -> u32 {
        self.width.max(self.height)
    }
}

impl fmt::Display for IconSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for IconSize {
    type Err = InvalidIconSize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidIconSize(s.to_string());
        let lower = s.trim().to_ascii_lowercase();
        let (w, h) = lower.split_once('x').ok_or_else(invalid)?;
        let width: u32 = w.parse().map_err(|_| invalid())?;
        let height: u32 = h.parse().map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        Ok(Self { width, height })
    }
}

/// Parses every valid token of a `sizes` attribute, skipping malformed ones (e.g. `any`).
pub fn parse_sizes(sizes: &str) -> Vec<IconSize> {
    sizes
        .split_whitespace()
        .filter_map(|token| token.parse().ok())
        .collect()
}
