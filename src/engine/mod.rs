//! Analysis-engine query interface.
//!
//! The engine itself is an external collaborator; the core only needs to
//! bind a snapshot and run named queries against it. The catalog below is
//! the full set of queries this crate issues — adding one is a change to
//! a check plan, not to the gateway.

pub mod batfish;

pub use batfish::BatfishGateway;

use std::collections::BTreeMap;
use std::path::Path;

use crate::core::errors::Result;
use crate::core::{Protocol, ResultTable};
use crate::snapshot::Snapshot;

/// Subdirectories the engine accepts as snapshot input roots. A snapshot
/// binds only if at least one of these exists and is non-empty.
pub const RECOGNIZED_INPUT_DIRS: &[&str] = &["configs", "hosts", "aws_configs", "sonic_configs"];

/// Fixed catalog of engine queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Query {
    BgpPeerConfiguration,
    BgpProcessConfiguration,
    OspfInterfaceConfiguration,
    OspfAreaConfiguration,
    BgpSessionStatus,
    UndefinedReferences,
    UnusedStructures,
    Routes(Protocol),
    BgpRib,
    OspfSessionCompatibility,
    InterfaceProperties,
}

impl Query {
    /// Wire name understood by the engine.
    pub fn name(&self) -> &'static str {
        match self {
            Query::BgpPeerConfiguration => "bgpPeerConfiguration",
            Query::BgpProcessConfiguration => "bgpProcessConfiguration",
            Query::OspfInterfaceConfiguration => "ospfInterfaceConfiguration",
            Query::OspfAreaConfiguration => "ospfAreaConfiguration",
            Query::BgpSessionStatus => "bgpSessionStatus",
            Query::UndefinedReferences => "undefinedReferences",
            Query::UnusedStructures => "unusedStructures",
            Query::Routes(_) => "routes",
            Query::BgpRib => "bgpRib",
            Query::OspfSessionCompatibility => "ospfSessionCompatibility",
            Query::InterfaceProperties => "interfaceProperties",
        }
    }

    /// Engine-side parameters. Only the route-table query is
    /// parameterized, by protocol.
    pub fn parameters(&self) -> BTreeMap<&'static str, String> {
        let mut params = BTreeMap::new();
        if let Query::Routes(protocol) = self {
            params.insert("protocols", protocol.filter_value().to_string());
        }
        params
    }
}

/// Blocking session with the analysis engine.
///
/// The engine binds to a single active snapshot at a time, so both
/// operations take `&mut self`: one orchestration runs to completion
/// before the session can be rebound.
pub trait QueryGateway {
    /// Make `snapshot` the session's active snapshot.
    fn bind_snapshot(&mut self, snapshot: &Snapshot, overwrite: bool) -> Result<()>;

    /// Execute one named query against the bound snapshot.
    fn run_query(&mut self, query: Query) -> Result<ResultTable>;
}

/// Structural invariant the engine enforces on bind: at least one
/// recognized input subdirectory exists and is non-empty.
pub fn is_valid_snapshot_dir(path: &Path) -> bool {
    RECOGNIZED_INPUT_DIRS.iter().any(|dir| {
        std::fs::read_dir(path.join(dir))
            .map(|mut entries| entries.next().is_some())
            .unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_are_stable() {
        assert_eq!(Query::BgpPeerConfiguration.name(), "bgpPeerConfiguration");
        assert_eq!(Query::Routes(Protocol::Bgp).name(), "routes");
        assert_eq!(Query::Routes(Protocol::Ospf).name(), "routes");
        assert_eq!(Query::BgpRib.name(), "bgpRib");
        assert_eq!(
            Query::OspfSessionCompatibility.name(),
            "ospfSessionCompatibility"
        );
    }

    #[test]
    fn only_routes_is_parameterized() {
        assert!(Query::BgpSessionStatus.parameters().is_empty());
        let params = Query::Routes(Protocol::Ospf).parameters();
        assert_eq!(params.get("protocols").map(String::as_str), Some("OSPF"));
    }

    #[test]
    fn empty_configs_dir_is_not_a_valid_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_valid_snapshot_dir(dir.path()));
        std::fs::create_dir(dir.path().join("configs")).unwrap();
        assert!(!is_valid_snapshot_dir(dir.path()));
        std::fs::write(dir.path().join("configs/r1.cfg"), "hostname r1\n").unwrap();
        assert!(is_valid_snapshot_dir(dir.path()));
    }

    #[test]
    fn alternate_input_dirs_are_recognized() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("hosts")).unwrap();
        std::fs::write(dir.path().join("hosts/h1.json"), "{}").unwrap();
        assert!(is_valid_snapshot_dir(dir.path()));
    }
}
