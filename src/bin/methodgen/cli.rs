//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// methodgen - P/Invoke binding generator for annotated native sources
#[derive(Parser)]
#[command(name = "methodgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Config file (defaults to methodgen.toml in the current directory)
    #[arg(long, global = true, env = "METHODGEN_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the C# interop module
    Generate(GenerateArgs),

    /// List the declarations that would be bound
    Inspect(InspectArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Output file for the generated C# module
    pub output: PathBuf,

    /// Native library name used in `Import.<library>`
    pub library: String,

    /// Source files, glob patterns or directories
    #[arg(required = true)]
    pub inputs: Vec<String>,

    /// Wrap the generated class in a namespace
    #[arg(long)]
    pub namespace: Option<String>,

    /// Additional `using` line (repeatable)
    #[arg(long = "using", value_name = "NAMESPACE")]
    pub usings: Vec<String>,

    /// Emit the host application's `using` lines
    #[arg(long)]
    pub host_usings: bool,

    /// Print the generated module instead of writing it
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct InspectArgs {
    /// Source files, glob patterns or directories
    #[arg(required = true)]
    pub inputs: Vec<String>,

    /// Output declaration lists as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
