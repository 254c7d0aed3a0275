use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use routelint::cli::{Cli, Commands, FormatArg, ProtocolArg};
use routelint::config::get_config;
use routelint::detect;
use routelint::engine::BatfishGateway;
use routelint::output::create_writer;
use routelint::snapshot::{SnapshotRepository, CONFIGS_DIR};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            snapshot,
            protocol,
            format,
            output,
            engine,
            root,
        } => run_check(snapshot, protocol, format, output, engine, root),
        Commands::Init { name, root } => init_snapshot(name, root),
        Commands::Snapshots { root, no_seed } => list_snapshots(root, no_seed),
    }
}

fn repository(root: Option<PathBuf>) -> SnapshotRepository {
    let root = root.unwrap_or_else(|| get_config().snapshots_root.clone());
    SnapshotRepository::new(root)
}

fn run_check(
    name: String,
    protocol: ProtocolArg,
    format: FormatArg,
    output: Option<PathBuf>,
    engine: Option<String>,
    root: Option<PathBuf>,
) -> Result<()> {
    let repo = repository(root);
    let snapshot = repo.ensure_structure(&repo.snapshot_path(&name))?;

    let config = get_config();
    let engine_url = engine.unwrap_or_else(|| config.engine_url.clone());
    let mut gateway = BatfishGateway::new(engine_url, config.network.clone());

    let report = detect::run_checks(&mut gateway, &snapshot, protocol.into())?;

    let writer: Box<dyn Write> = match output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(std::io::stdout()),
    };
    create_writer(format.into(), writer).write_report(&report)?;
    Ok(())
}

fn init_snapshot(name: String, root: Option<PathBuf>) -> Result<()> {
    let repo = repository(root);
    let snapshot = repo.ensure_structure(&repo.snapshot_path(&name))?;
    println!(
        "Snapshot '{}' ready at {}",
        snapshot.name,
        snapshot.path.display()
    );
    println!(
        "Add .cfg or .conf device configurations to {}",
        snapshot.path.join(CONFIGS_DIR).display()
    );
    Ok(())
}

fn list_snapshots(root: Option<PathBuf>, no_seed: bool) -> Result<()> {
    let repo = repository(root);
    let mut names = repo.list_snapshots()?;
    if names.is_empty() && !no_seed {
        let seeded = repo.seed_default_snapshot()?;
        println!(
            "No snapshots found; seeded '{}' at {}",
            seeded.name,
            seeded.path.display()
        );
        names = repo.list_snapshots()?;
    }
    for name in names {
        println!("{name}");
    }
    Ok(())
}
