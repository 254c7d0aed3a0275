//! Snapshot directory normalization and enumeration.
//!
//! The analysis engine only accepts a snapshot whose directory carries at
//! least one recognized input subdirectory with content. Users hand us
//! legacy layouts (`config/` instead of `configs/`), loose `.cfg` files at
//! the snapshot root, or nothing at all; everything is normalized here
//! before a path ever reaches the engine.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::core::errors::{Error, Result};

/// Directory the engine reads device configurations from.
pub const CONFIGS_DIR: &str = "configs";

/// Pre-normalization directory name still found in older snapshot layouts.
pub const LEGACY_CONFIGS_DIR: &str = "config";

/// Extensions treated as device configuration files when relocating loose
/// files into `configs/`.
pub const CONFIG_EXTENSIONS: &[&str] = &["cfg", "conf"];

/// Name given to the snapshot seeded when the repository is empty.
pub const DEFAULT_SNAPSHOT: &str = "default";

/// Sample snapshots probed, in order, when seeding the default snapshot.
const SAMPLE_SNAPSHOTS: &[&str] = &["bgp_duplicated", "ospf_duplicated"];

const MINIMAL_CONFIG_FILE: &str = "minimal.cfg";

/// Placeholder written when no sample snapshot is available. One parseable
/// host keeps the engine from seeing a structurally valid but empty
/// snapshot.
const MINIMAL_CONFIG: &str = "\
hostname minimal-router
!
interface Loopback0
 ip address 192.168.1.1/32
!
";

/// Handle to a normalized snapshot directory.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Snapshot {
    pub name: String,
    pub path: PathBuf,
}

/// Owns the snapshots root and the layout rules beneath it.
#[derive(Clone, Debug)]
pub struct SnapshotRepository {
    root: PathBuf,
}

impl SnapshotRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path a snapshot of the given name lives at.
    pub fn snapshot_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Normalize `path` into a layout the engine accepts and return its
    /// handle. Idempotent: a second call on the same path changes nothing.
    pub fn ensure_structure(&self, path: &Path) -> Result<Snapshot> {
        create_dir_if_missing(path)?;
        let path = fs::canonicalize(path)
            .map_err(|e| Error::filesystem("resolving snapshot path", path, e))?;

        let configs = path.join(CONFIGS_DIR);
        let legacy = path.join(LEGACY_CONFIGS_DIR);
        if legacy.is_dir() && !configs.exists() {
            // Atomic rename, not a copy: the legacy directory disappears.
            fs::rename(&legacy, &configs)
                .map_err(|e| Error::filesystem("renaming legacy 'config' directory", &legacy, e))?;
            info!(
                "migrated legacy 'config' to 'configs' under {}",
                path.display()
            );
        } else {
            create_dir_if_missing(&configs)?;
        }

        relocate_loose_configs(&path, &configs)?;

        Ok(Snapshot {
            name: snapshot_name(&path),
            path,
        })
    }

    /// Names of snapshot directories under the root, in filesystem
    /// enumeration order (no sort is applied; callers must not rely on
    /// ordering across filesystems). Creates the root on first use.
    pub fn list_snapshots(&self) -> Result<Vec<String>> {
        create_dir_if_missing(&self.root)?;
        let entries = fs::read_dir(&self.root)
            .map_err(|e| Error::filesystem("reading snapshots root", &self.root, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|e| Error::filesystem("reading snapshots root", &self.root, e))?;
            if entry.path().is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(names)
    }

    /// Bootstrap a usable snapshot for an empty repository: ensure the
    /// default snapshot's structure, then fill its `configs/` from the
    /// first sample snapshot that has files, or synthesize a minimal
    /// placeholder configuration when no sample exists.
    pub fn seed_default_snapshot(&self) -> Result<Snapshot> {
        let snapshot = self.ensure_structure(&self.snapshot_path(DEFAULT_SNAPSHOT))?;
        let configs = snapshot.path.join(CONFIGS_DIR);
        if !dir_is_empty(&configs)? {
            return Ok(snapshot);
        }

        info!("default snapshot is empty; looking for sample configurations");
        match self.find_sample_configs()? {
            Some(sample) => {
                let copied = copy_dir_files(&sample, &configs)?;
                info!(
                    "seeded {} configuration file(s) from {}",
                    copied,
                    sample.display()
                );
            }
            None => {
                // Degrade gracefully rather than fail: one synthesized host
                // is enough for the engine to produce a parseable model.
                warn!("no sample configurations found; writing placeholder {MINIMAL_CONFIG_FILE}");
                let placeholder = configs.join(MINIMAL_CONFIG_FILE);
                fs::write(&placeholder, MINIMAL_CONFIG).map_err(|e| {
                    Error::filesystem("writing placeholder configuration", &placeholder, e)
                })?;
            }
        }
        Ok(snapshot)
    }

    /// First sample directory with at least one regular file, trying
    /// `configs/` then the legacy `config/` name for each sample. The
    /// search stops at the first hit.
    fn find_sample_configs(&self) -> Result<Option<PathBuf>> {
        for sample in SAMPLE_SNAPSHOTS {
            for dir in [CONFIGS_DIR, LEGACY_CONFIGS_DIR] {
                let candidate = self.root.join(sample).join(dir);
                if candidate.is_dir() && dir_has_files(&candidate)? {
                    return Ok(Some(candidate));
                }
            }
        }
        Ok(None)
    }
}

/// Create `path` if missing. An existing directory is a structural no-op,
/// not an error; returns whether anything was created.
fn create_dir_if_missing(path: &Path) -> Result<bool> {
    if path.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(path).map_err(|e| Error::filesystem("creating directory", path, e))?;
    Ok(true)
}

/// Copy loose `.cfg`/`.conf` files from the snapshot root into `configs/`.
/// Copies, never moves; an existing destination wins (first-write-wins).
fn relocate_loose_configs(path: &Path, configs: &Path) -> Result<usize> {
    let entries =
        fs::read_dir(path).map_err(|e| Error::filesystem("reading snapshot directory", path, e))?;

    let mut copied = 0;
    for entry in entries {
        let entry =
            entry.map_err(|e| Error::filesystem("reading snapshot directory", path, e))?;
        let source = entry.path();
        if !source.is_file() || !has_config_extension(&source) {
            continue;
        }
        let dest = configs.join(entry.file_name());
        if dest.exists() {
            debug!(
                "skipping {}: already present in {CONFIGS_DIR}",
                entry.file_name().to_string_lossy()
            );
            continue;
        }
        fs::copy(&source, &dest)
            .map_err(|e| Error::filesystem("copying configuration file", &source, e))?;
        copied += 1;
    }
    if copied > 0 {
        debug!(
            "relocated {copied} loose configuration file(s) into {}",
            configs.display()
        );
    }
    Ok(copied)
}

fn has_config_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| CONFIG_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

fn dir_is_empty(path: &Path) -> Result<bool> {
    let mut entries =
        fs::read_dir(path).map_err(|e| Error::filesystem("reading directory", path, e))?;
    match entries.next() {
        None => Ok(true),
        Some(Err(e)) => Err(Error::filesystem("reading directory", path, e)),
        Some(Ok(_)) => Ok(false),
    }
}

fn dir_has_files(path: &Path) -> Result<bool> {
    let entries =
        fs::read_dir(path).map_err(|e| Error::filesystem("reading directory", path, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| Error::filesystem("reading directory", path, e))?;
        if entry.path().is_file() {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Copy every regular file from `source` into `dest`, in directory
/// enumeration order. Subdirectories are not descended into.
fn copy_dir_files(source: &Path, dest: &Path) -> Result<usize> {
    let entries =
        fs::read_dir(source).map_err(|e| Error::filesystem("reading sample directory", source, e))?;

    let mut copied = 0;
    for entry in entries {
        let entry =
            entry.map_err(|e| Error::filesystem("reading sample directory", source, e))?;
        let from = entry.path();
        if !from.is_file() {
            continue;
        }
        let to = dest.join(entry.file_name());
        fs::copy(&from, &to)
            .map_err(|e| Error::filesystem("copying sample configuration", &from, e))?;
        copied += 1;
    }
    Ok(copied)
}

fn snapshot_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
