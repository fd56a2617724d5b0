//! Build strategy selection.
//!
//! The four command variants are modeled as data: a `BuildStrategy` keyed
//! by `(artifact, toolchain)` produces an [`Invocation`] holding the
//! program, argument vector, and child environment, so tests assert on
//! the constructed command directly instead of spawning anything.
//!
//! Cross hosts get the `cross` wrapper; native hosts get `cargo` with the
//! per-target `CC_*` and `CARGO_TARGET_*_LINKER` variables set. Library
//! builds are scoped with `--lib`, binary builds with `-p <package>`.
//! Feature flags and extra arguments are appended after the fixed flags.

use crate::core::{ArtifactKind, ToolchainKind};
use crate::util::config::Config;

/// A fully constructed build command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program to run (name or path, unresolved).
    pub program: String,

    /// Argument vector, fixed flags first, extra arguments last.
    pub args: Vec<String>,

    /// Environment variables set for the child only.
    pub env: Vec<(String, String)>,
}

impl Invocation {
    /// Render the invocation as a single shell-style line, environment
    /// assignments first.
    pub fn display(&self) -> String {
        let mut parts: Vec<String> = self
            .env
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        parts.push(self.program.clone());
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// One entry of the variant table.
#[derive(Debug, Clone, Copy)]
pub struct BuildStrategy<'cfg> {
    artifact: ArtifactKind,
    toolchain: ToolchainKind,
    config: &'cfg Config,
}

impl<'cfg> BuildStrategy<'cfg> {
    /// Select the variant for the given artifact and toolchain.
    pub fn new(artifact: ArtifactKind, toolchain: ToolchainKind, config: &'cfg Config) -> Self {
        BuildStrategy {
            artifact,
            toolchain,
            config,
        }
    }

    /// Construct the full invocation, with `extra_args` appended verbatim
    /// as the final arguments.
    pub fn invocation(&self, extra_args: &[String]) -> Invocation {
        let target = self.config.target();

        let program = match self.toolchain {
            ToolchainKind::Native => self.config.cargo_program(),
            ToolchainKind::Cross => self.config.cross_program(),
        };

        let mut args = vec![
            "build".to_string(),
            "--release".to_string(),
            "--target".to_string(),
            target.to_string(),
        ];

        match self.artifact {
            ArtifactKind::Library => args.push("--lib".to_string()),
            ArtifactKind::Binary => {
                args.push("-p".to_string());
                args.push(self.config.package().to_string());
            }
        }

        let features = match self.artifact {
            ArtifactKind::Library => self.config.library_features(),
            ArtifactKind::Binary => self.config.binary_features(),
        };
        if !features.is_empty() {
            args.push("--features".to_string());
            args.push(features.join(","));
        }

        args.extend(extra_args.iter().cloned());

        let env = match self.toolchain {
            ToolchainKind::Native => {
                let cc = self.config.cross_cc().to_string();
                vec![
                    (cc_env_var(target), cc.clone()),
                    (linker_env_var(target), cc),
                ]
            }
            ToolchainKind::Cross => Vec::new(),
        };

        Invocation { program, args, env }
    }
}

/// Name of the per-target C compiler variable, e.g.
/// `CC_x86_64_unknown_linux_musl`.
fn cc_env_var(target: &str) -> String {
    format!("CC_{}", target.replace('-', "_"))
}

/// Name of the per-target cargo linker variable, e.g.
/// `CARGO_TARGET_X86_64_UNKNOWN_LINUX_MUSL_LINKER`.
fn linker_env_var(target: &str) -> String {
    format!(
        "CARGO_TARGET_{}_LINKER",
        target.replace('-', "_").to_uppercase()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_of(artifact: ArtifactKind, toolchain: ToolchainKind) -> Invocation {
        let config = Config::default();
        BuildStrategy::new(artifact, toolchain, &config).invocation(&[])
    }

    #[test]
    fn test_library_cross_variant() {
        let inv = args_of(ArtifactKind::Library, ToolchainKind::Cross);
        assert_eq!(inv.program, "cross");
        assert_eq!(
            inv.args,
            vec![
                "build",
                "--release",
                "--target",
                "x86_64-unknown-linux-musl",
                "--lib",
                "--features",
                "jemalloc",
            ]
        );
        assert!(inv.env.is_empty());
    }

    #[test]
    fn test_library_native_variant() {
        let inv = args_of(ArtifactKind::Library, ToolchainKind::Native);
        assert_eq!(inv.program, "cargo");
        assert!(inv.args.contains(&"--lib".to_string()));
        assert_eq!(
            inv.env,
            vec![
                (
                    "CC_x86_64_unknown_linux_musl".to_string(),
                    "musl-gcc".to_string()
                ),
                (
                    "CARGO_TARGET_X86_64_UNKNOWN_LINUX_MUSL_LINKER".to_string(),
                    "musl-gcc".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_binary_variants_are_package_scoped() {
        for toolchain in [ToolchainKind::Native, ToolchainKind::Cross] {
            let inv = args_of(ArtifactKind::Binary, toolchain);
            let p = inv.args.iter().position(|a| a == "-p").unwrap();
            assert_eq!(inv.args[p + 1], "pet_store");
            assert!(!inv.args.contains(&"--lib".to_string()));
        }
    }

    #[test]
    fn test_extra_args_are_final_and_ordered() {
        let config = Config::default();
        let extra = vec!["--frozen".to_string(), "-v".to_string()];
        let inv = BuildStrategy::new(ArtifactKind::Library, ToolchainKind::Cross, &config)
            .invocation(&extra);

        assert_eq!(&inv.args[inv.args.len() - 2..], &extra[..]);
    }

    #[test]
    fn test_empty_feature_list_omits_flag() {
        let mut config = Config::default();
        config.features.library = Some(vec![]);
        let inv = BuildStrategy::new(ArtifactKind::Library, ToolchainKind::Cross, &config)
            .invocation(&[]);

        assert!(!inv.args.contains(&"--features".to_string()));
    }

    #[test]
    fn test_features_are_comma_joined() {
        let mut config = Config::default();
        config.features.binary = Some(vec!["jemalloc".to_string(), "metrics".to_string()]);
        let inv = BuildStrategy::new(ArtifactKind::Binary, ToolchainKind::Cross, &config)
            .invocation(&[]);

        let f = inv.args.iter().position(|a| a == "--features").unwrap();
        assert_eq!(inv.args[f + 1], "jemalloc,metrics");
    }

    #[test]
    fn test_env_vars_follow_configured_target() {
        let mut config = Config::default();
        config.build.target = Some("aarch64-unknown-linux-musl".to_string());
        config.toolchain.cc = Some("aarch64-linux-musl-gcc".to_string());

        let inv = BuildStrategy::new(ArtifactKind::Library, ToolchainKind::Native, &config)
            .invocation(&[]);

        assert!(inv.args.contains(&"aarch64-unknown-linux-musl".to_string()));
        assert_eq!(
            inv.env[0],
            (
                "CC_aarch64_unknown_linux_musl".to_string(),
                "aarch64-linux-musl-gcc".to_string()
            )
        );
        assert_eq!(
            inv.env[1].0,
            "CARGO_TARGET_AARCH64_UNKNOWN_LINUX_MUSL_LINKER"
        );
    }

    #[test]
    fn test_display_prefixes_environment() {
        let inv = args_of(ArtifactKind::Library, ToolchainKind::Native);
        let line = inv.display();
        assert!(line.starts_with("CC_x86_64_unknown_linux_musl=musl-gcc "));
        assert!(line.contains(" cargo build --release "));
    }
}
