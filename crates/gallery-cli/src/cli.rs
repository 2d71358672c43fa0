use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "gallery",
    about = "Habit gallery: share habit scorecards and six-panel comics",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the gallery HTTP server
    Serve(ServeArgs),
    /// Create the upload directory and an empty record document
    Init(StoreArgs),
    /// List stored works
    List(StoreArgs),
    /// Report malformed records and missing image files
    Check(StoreArgs),
}

/// Where the stores live. A config file is read first, then flags override it.
#[derive(Args, Clone, Debug, Default)]
pub struct StoreArgs {
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct ServeArgs {
    #[command(flatten)]
    pub store: StoreArgs,
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    #[arg(long)]
    pub site_root: Option<PathBuf>,
}
