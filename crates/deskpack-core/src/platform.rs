//! Identity of the desktop platform this crate generates apps for.

/// Platform identifier; also the name of the staging directory under the generation root.
pub const PLATFORM_ID: &str = "win32";

/// Human readable platform name used in progress messages.
pub const PLATFORM_NAME: &str = "Windows Desktop Platform";

/// Platform type handed to the packager.
pub const PLATFORM_TYPE: &str = "win32";

/// Architecture used when neither the config nor the environment names one.
pub const DEFAULT_ARCH: &str = "x64";

/// Environment variable consulted for the target architecture (set by npm when run as a script).
pub const ARCH_ENV_VAR: &str = "npm_config_arch";

/// Resolves the packaging architecture: explicit value, then `npm_config_arch`, then `x64`.
pub fn resolve_arch(explicit: Option<&str>) -> String {
    let from_env = std::env::var(ARCH_ENV_VAR).ok();
    pick_arch(explicit, from_env.as_deref())
}

fn pick_arch(explicit: Option<&str>, from_env: Option<&str>) -> String {
    explicit
        .or(from_env)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_ARCH)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_arch_wins() {
        assert_eq!(pick_arch(Some("ia32"), Some("arm64")), "ia32");
    }

    #[test]
    fn env_arch_used_when_no_explicit() {
        assert_eq!(pick_arch(None, Some("arm64")), "arm64");
    }

    #[test]
    fn blank_values_fall_back_to_default() {
        assert_eq!(pick_arch(Some("  "), None), "x64");
        assert_eq!(pick_arch(None, None), "x64");
    }
}
