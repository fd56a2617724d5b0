//! Host classification.
//!
//! The host descriptor is read once at process start and held immutable
//! for the run. A host that cannot natively link the fixed musl target
//! gets the `cross` wrapper instead of the native toolchain.

use crate::util::process::ProcessBuilder;

/// Placeholder for a host field that could not be determined.
pub const UNKNOWN: &str = "unknown";

/// Which toolchain produces binaries for the fixed target platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolchainKind {
    /// Host links the target natively: `cargo` with explicit
    /// cross-compiler and linker environment variables.
    Native,
    /// Host cannot link the target natively: the `cross` wrapper.
    Cross,
}

/// Operating system name and CPU architecture of the build host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostSpec {
    pub os_name: String,
    pub arch: String,
}

impl HostSpec {
    /// Create a host descriptor from known values.
    pub fn new(os_name: impl Into<String>, arch: impl Into<String>) -> Self {
        HostSpec {
            os_name: os_name.into(),
            arch: arch.into(),
        }
    }

    /// Detect the host from the runtime environment.
    ///
    /// Reads `STEVEDORE_HOST_OS` / `STEVEDORE_HOST_ARCH` overrides first,
    /// then falls back to `uname`. Fields that cannot be determined become
    /// `"unknown"` rather than failing; an unknown host selects the
    /// `cross` path.
    pub fn detect() -> Self {
        let os_name = env_override("STEVEDORE_HOST_OS")
            .or_else(|| uname("-s"))
            .unwrap_or_else(|| UNKNOWN.to_string());

        let arch = env_override("STEVEDORE_HOST_ARCH")
            .or_else(|| uname("-m"))
            .unwrap_or_else(|| UNKNOWN.to_string());

        HostSpec { os_name, arch }
    }

    /// Derive the toolchain choice for this host.
    ///
    /// Pure function of the descriptor: native only on Linux/x86_64,
    /// everything else cross-compiles.
    pub fn toolchain(&self) -> ToolchainKind {
        if self.os_name == "Linux" && self.arch == "x86_64" {
            ToolchainKind::Native
        } else {
            ToolchainKind::Cross
        }
    }
}

fn env_override(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Run `uname` with the given flag and return its trimmed output.
fn uname(flag: &str) -> Option<String> {
    let output = ProcessBuilder::new("uname").arg(flag).exec().ok()?;
    if !output.status.success() {
        return None;
    }

    let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linux_x86_64_is_native() {
        let host = HostSpec::new("Linux", "x86_64");
        assert_eq!(host.toolchain(), ToolchainKind::Native);
    }

    #[test]
    fn test_other_hosts_are_cross() {
        for (os, arch) in [
            ("Darwin", "arm64"),
            ("Darwin", "x86_64"),
            ("Linux", "aarch64"),
            ("Linux", "armv7l"),
            ("FreeBSD", "amd64"),
        ] {
            let host = HostSpec::new(os, arch);
            assert_eq!(host.toolchain(), ToolchainKind::Cross, "{}/{}", os, arch);
        }
    }

    #[test]
    fn test_unknown_host_is_cross() {
        let host = HostSpec::new(UNKNOWN, UNKNOWN);
        assert_eq!(host.toolchain(), ToolchainKind::Cross);
    }

    #[test]
    fn test_toolchain_needs_both_fields() {
        assert_eq!(HostSpec::new("Linux", UNKNOWN).toolchain(), ToolchainKind::Cross);
        assert_eq!(HostSpec::new(UNKNOWN, "x86_64").toolchain(), ToolchainKind::Cross);
    }
}
