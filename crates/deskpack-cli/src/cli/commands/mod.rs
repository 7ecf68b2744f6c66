//! CLI command handlers, one file per command group.

mod check_url;
mod completions;
mod convert_icon;
mod generate;
mod icons;
mod select_icon;

pub use check_url::run_check_url;
pub use completions::{run_completions, run_man};
pub use convert_icon::run_convert_icon;
pub use generate::{run_generate, GenerateOptions};
pub use icons::{run_add_icon, run_find_icon, run_icons};
pub use select_icon::run_select_icon;
