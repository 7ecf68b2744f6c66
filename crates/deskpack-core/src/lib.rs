pub mod config;
pub mod logging;
pub mod platform;

pub mod assemble;
pub mod icons;
pub mod manifest;
pub mod navigation;
pub mod pattern;
pub mod window;
