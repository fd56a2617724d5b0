//! CLI definitions using clap.

use clap::Parser;

/// Stevedore - a host-aware cross-build launcher for musl targets
#[derive(Parser)]
#[command(name = "stevedore")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the selected build command without running it
    #[arg(long)]
    pub plan: bool,

    /// Which artifact to build: "library" or "binary"
    pub target: String,

    /// Extra arguments forwarded verbatim to the build tool
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub extra_args: Vec<String>,
}
