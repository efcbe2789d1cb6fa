use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::application::dto::ReportFormat;
use crate::inventory::domain::ImagePurlScheme;

/// Build and compare bills of materials for Kubernetes clusters
#[derive(Parser, Debug)]
#[command(name = "cluster-codex")]
#[command(version)]
#[command(about = "Build and compare bills of materials for Kubernetes clusters", long_about = None)]
pub struct Cli {
    /// Log level for diagnostics on stderr (error, warn, info, debug, trace).
    /// Falls back to RUST_LOG, then warn
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<tracing::Level>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Inventory every cluster object and running container image
    Generate(GenerateArgs),
    /// Compare an expected inventory against an actual one
    Compare(CompareArgs),
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Filter file (JSON, YAML or TOML). Defaults to ./filters.json when present
    #[arg(short = 'i', long = "filters", value_name = "PATH")]
    pub filters: Option<PathBuf>,

    /// Sort entries by kind, component kind, name and namespace
    #[arg(short, long)]
    pub sort: bool,

    /// Kubeconfig context to use instead of the current one
    #[arg(long)]
    pub context: Option<String>,

    /// Abort the run after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Query-parameter scheme for image identifiers: versioned or scoped
    #[arg(long, default_value = "versioned")]
    pub image_purl_scheme: ImagePurlScheme,
}

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// The golden inventory (the source of truth)
    #[arg(short, long, value_name = "PATH")]
    pub expected: PathBuf,

    /// The inventory to check against the golden one
    #[arg(short, long, value_name = "PATH")]
    pub actual: PathBuf,

    /// Report format: table or json
    #[arg(short, long, default_value = "table")]
    pub format: ReportFormat,

    /// Header of the expected column
    #[arg(long, env = "BOM_EXPECTED_COLUMN_NAME", default_value = "Expected")]
    pub expected_label: String,

    /// Header of the actual column
    #[arg(long, env = "BOM_ACTUAL_COLUMN_NAME", default_value = "Actual")]
    pub actual_label: String,

    /// Disable colored table output
    #[arg(long)]
    pub no_color: bool,
}
