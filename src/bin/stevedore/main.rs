//! Stevedore CLI - a host-aware cross-build launcher

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Cli;
use stevedore::core::ArtifactKind;
use stevedore::ops::launch::{launch, LaunchOptions};

/// Exit code for an unrecognized target value. A missing target exits
/// with 2 through clap's own usage error.
const EXIT_BAD_TARGET: i32 = 3;

fn main() {
    // Parse CLI; clap reports usage errors itself and exits with 2.
    let cli = Cli::parse();

    // Set up logging on stderr so `--plan` output stays clean.
    let filter = if cli.verbose {
        EnvFilter::new("stevedore=debug")
    } else {
        EnvFilter::new("stevedore=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let artifact: ArtifactKind = match cli.target.parse() {
        Ok(kind) => kind,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(EXIT_BAD_TARGET);
        }
    };

    let opts = LaunchOptions {
        artifact,
        extra_args: cli.extra_args,
        plan: cli.plan,
    };

    // The build tool's exit code becomes our own, unchanged.
    match launch(&opts) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {:#}", e);
            std::process::exit(1);
        }
    }
}
