//! Application icon: selection from the manifest, fetching and conversion
//! into the native icon container.

pub mod convert;
pub mod fetch;
mod select;
mod size;

pub use select::{
    is_native_container, is_raster, rank_icon, select_best_icon, IconPolicy, IconTier,
    NATIVE_ICON_EXTENSION, RASTER_ICON_EXTENSION,
};
pub use size::{parse_sizes, IconSize, InvalidIconSize};
