use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::core::Protocol;
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "routelint")]
#[command(about = "BGP/OSPF configuration anomaly detector for network snapshots", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run anomaly checks for a protocol against a snapshot
    Check {
        /// Snapshot name under the snapshots root
        snapshot: String,

        /// Protocol whose checks to run
        #[arg(short, long, value_enum)]
        protocol: ProtocolArg,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: FormatArg,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Analysis engine base URL (overrides configuration)
        #[arg(long, env = "ROUTELINT_ENGINE_URL")]
        engine: Option<String>,

        /// Snapshots root directory (overrides configuration)
        #[arg(long)]
        root: Option<PathBuf>,
    },

    /// Create or normalize a snapshot directory
    Init {
        /// Snapshot name under the snapshots root
        name: String,

        /// Snapshots root directory (overrides configuration)
        #[arg(long)]
        root: Option<PathBuf>,
    },

    /// List snapshots, seeding a default one when none exist
    Snapshots {
        /// Snapshots root directory (overrides configuration)
        #[arg(long)]
        root: Option<PathBuf>,

        /// Do not seed a default snapshot when the root is empty
        #[arg(long)]
        no_seed: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ProtocolArg {
    Bgp,
    Ospf,
}

impl From<ProtocolArg> for Protocol {
    fn from(arg: ProtocolArg) -> Self {
        match arg {
            ProtocolArg::Bgp => Protocol::Bgp,
            ProtocolArg::Ospf => Protocol::Ospf,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Terminal,
    Json,
    Markdown,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Terminal => OutputFormat::Terminal,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Markdown => OutputFormat::Markdown,
        }
    }
}
