//! Best-icon selection.
//!
//! Candidates are ranked by an ordered list of stages; the first stage that
//! yields an icon wins. A stage always beats a better size in a later stage.

use crate::manifest::IconDescriptor;

/// Extension of the native icon container.
pub const NATIVE_ICON_EXTENSION: &str = ".ico";
/// Extension of raster icons accepted for conversion.
pub const RASTER_ICON_EXTENSION: &str = ".png";

/// Stage that produced a selection, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IconTier {
    /// Already a native icon container; format beats resolution.
    NativeContainer,
    /// Raster icon declared by the manifest author at a preferred size.
    Declared,
    /// Bundled fallback raster icon at a preferred size.
    Bundled,
}

const TIERS: [IconTier; 3] = [
    IconTier::NativeContainer,
    IconTier::Declared,
    IconTier::Bundled,
];

/// Ordered size preferences for one platform. Ranks candidates, never rejects them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconPolicy {
    pub preferred_sizes: Vec<String>,
}

impl IconPolicy {
    pub fn new<I, S>(sizes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            preferred_sizes: sizes.into_iter().map(Into::into).collect(),
        }
    }

    /// Ranks `icons` against this policy's sizes.
    pub fn rank<'a>(&self, icons: &'a [IconDescriptor]) -> Option<(IconTier, &'a IconDescriptor)> {
        rank_icon(icons, self.preferred_sizes.as_slice())
    }
}

pub fn is_native_container(icon: &IconDescriptor) -> bool {
    has_extension(&icon.src, NATIVE_ICON_EXTENSION)
}

pub fn is_raster(icon: &IconDescriptor) -> bool {
    has_extension(&icon.src, RASTER_ICON_EXTENSION)
}

fn has_extension(src: &str, ext: &str) -> bool {
    src.to_ascii_lowercase().ends_with(ext)
}

impl IconTier {
    fn pick<'a, S: AsRef<str>>(
        self,
        icons: &'a [IconDescriptor],
        preferred_sizes: &[S],
    ) -> Option<&'a IconDescriptor> {
        let bundled = match self {
            IconTier::NativeContainer => return icons.iter().find(|i| is_native_container(i)),
            IconTier::Declared => false,
            IconTier::Bundled => true,
        };
        preferred_sizes.iter().find_map(|size| {
            let size = size.as_ref();
            icons
                .iter()
                .find(|i| is_raster(i) && i.is_default == bundled && i.sizes.contains(size))
        })
    }
}

/// Picks the icon to package, with the stage that selected it.
pub fn rank_icon<'a, S: AsRef<str>>(
    icons: &'a [IconDescriptor],
    preferred_sizes: &[S],
) -> Option<(IconTier, &'a IconDescriptor)> {
    TIERS
        .iter()
        .find_map(|tier| tier.pick(icons, preferred_sizes).map(|icon| (*tier, icon)))
}

/// Picks the icon to package: any `.ico`, else a declared `.png` at the most
/// preferred size, else a bundled `.png` at the most preferred size.
/// `None` means icon generation is skipped.
pub fn select_best_icon<'a, S: AsRef<str>>(
    icons: &'a [IconDescriptor],
    preferred_sizes: &[S],
) -> Option<&'a IconDescriptor> {
    rank_icon(icons, preferred_sizes).map(|(_, icon)| icon)
}
