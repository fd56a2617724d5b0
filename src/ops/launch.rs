//! The launch operation: select a build variant and run it.

use std::path::PathBuf;
use std::process::ExitStatus;

use anyhow::{anyhow, Context, Result};

use crate::core::{ArtifactKind, HostSpec};
use crate::strategy::BuildStrategy;
use crate::util::config::{global_config_path, load_config, project_config_path};
use crate::util::process::{find_executable, ProcessBuilder};

/// Options for a single launch.
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    /// Which artifact to build.
    pub artifact: ArtifactKind,

    /// Arguments forwarded verbatim to the build tool.
    pub extra_args: Vec<String>,

    /// Print the selected command instead of running it.
    pub plan: bool,
}

/// Select the build variant for this host and run it, returning the build
/// tool's exit code unchanged.
///
/// With `plan` set, the selected command line is printed to stdout and
/// nothing is spawned.
pub fn launch(opts: &LaunchOptions) -> Result<i32> {
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let global = global_config_path();
    let config = load_config(global.as_deref(), &project_config_path(&cwd));

    let host = HostSpec::detect();
    let toolchain = host.toolchain();
    tracing::debug!(
        "host {}/{} selects {:?} toolchain",
        host.os_name,
        host.arch,
        toolchain
    );

    let strategy = BuildStrategy::new(opts.artifact, toolchain, &config);
    let invocation = strategy.invocation(&opts.extra_args);

    if opts.plan {
        println!("{}", invocation.display());
        return Ok(0);
    }

    let program = resolve_program(&invocation.program)?;
    tracing::debug!("invoking `{}`", invocation.display());

    let status = ProcessBuilder::new(&program)
        .args(&invocation.args)
        .envs(invocation.env.iter().cloned())
        .status()
        .with_context(|| format!("failed to run `{}`", invocation.display()))?;

    Ok(exit_code(status))
}

/// Resolve a bare tool name on PATH; explicit paths are used as given.
fn resolve_program(program: &str) -> Result<PathBuf> {
    if program.contains(std::path::MAIN_SEPARATOR) {
        return Ok(PathBuf::from(program));
    }

    find_executable(program).ok_or_else(|| {
        anyhow!(
            "`{}` not found on PATH\n\
             \n\
             help: install it, or point [tools] in .stevedore/config.toml at it",
            program
        )
    })
}

/// Map an exit status to the code we exit with ourselves.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    // Killed by signal: follow the usual shell convention.
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}
