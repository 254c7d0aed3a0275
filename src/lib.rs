// Export modules for library usage
pub mod cli;
pub mod config;
pub mod core;
pub mod detect;
pub mod engine;
pub mod output;
pub mod snapshot;

// Re-export commonly used types
pub use crate::core::errors::{Error, Result};
pub use crate::core::{AnomalyReport, CheckKind, CheckLabel, Protocol, ResultTable};

pub use crate::detect::{plan_for, run_checks, ProtocolCheckPlan};

pub use crate::engine::{BatfishGateway, Query, QueryGateway};

pub use crate::output::{create_writer, OutputFormat, OutputWriter};

pub use crate::snapshot::{Snapshot, SnapshotRepository};
