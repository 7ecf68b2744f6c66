//! Icon list operations used by manifest tools.

use crate::icons::IconSize;

use super::types::{IconDescriptor, Manifest};

/// All icon `src` values in list order.
pub fn list_icon_sources(manifest: &Manifest) -> Vec<&str> {
    manifest.icons.iter().map(|i| i.src.as_str()).collect()
}

/// First icon declaring exactly `size x size` among its `sizes` tokens.
pub fn find_icon_by_size(manifest: &Manifest, size: u32) -> Option<&IconDescriptor> {
    let wanted = IconSize::square(size).to_string();
    manifest
        .icons
        .iter()
        .find(|icon| icon.size_tokens().any(|token| token == wanted))
}

/// `(src, token)` pairs whose size token is neither `WxH` nor `any`.
pub(crate) fn malformed_size_tokens(manifest: &Manifest) -> Vec<(&str, String)> {
    manifest
        .icons
        .iter()
        .flat_map(|icon| icon.size_tokens().map(move |token| (icon.src.as_str(), token)))
        .filter(|(_, token)| token != "any" && token.parse::<IconSize>().is_err())
        .collect()
}

/// Appends a bundled fallback icon of `size x size` pixels.
pub fn add_icon(manifest: &mut Manifest, file_name: &str, size: u32) {
    manifest.icons.push(IconDescriptor {
        src: file_name.to_string(),
        sizes: IconSize::square(size).to_string(),
        is_default: true,
        ..IconDescriptor::default()
    });
}
