pub mod errors;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Routing protocol a check plan targets.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Protocol {
    Bgp,
    Ospf,
}

impl Protocol {
    pub fn from_name(name: &str) -> Option<Self> {
        static NAME_MAP: &[(&str, Protocol)] = &[("bgp", Protocol::Bgp), ("ospf", Protocol::Ospf)];

        NAME_MAP
            .iter()
            .find(|(n, _)| name.eq_ignore_ascii_case(n))
            .map(|(_, p)| *p)
    }

    /// Upper-case form the engine expects as a `protocols` filter value.
    pub fn filter_value(&self) -> &'static str {
        match self {
            Protocol::Bgp => "BGP",
            Protocol::Ospf => "OSPF",
        }
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.filter_value())
    }
}

/// One rectangular query answer: ordered columns, ordered rows. The
/// orchestration only cares about "has rows" / "is empty"; rendering
/// happens in the output layer.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ResultTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Whether a check always runs or only after escalation.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CheckKind {
    Baseline,
    Deep,
}

/// Fixed vocabulary of report entries. Every label belongs to exactly one
/// protocol and one check kind, so presence of a label in a report is
/// checkable without string lookups.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CheckLabel {
    BgpSessions,
    UndefinedReferences,
    UnusedStructures,
    BgpRoutes,
    BgpRouteReflection,
    OspfNeighbors,
    AreaConfiguration,
    OspfRoutes,
    InterfaceProperties,
}

impl CheckLabel {
    pub fn as_str(&self) -> &'static str {
        static DISPLAY_STRINGS: &[(CheckLabel, &str)] = &[
            (CheckLabel::BgpSessions, "bgp_sessions"),
            (CheckLabel::UndefinedReferences, "undefined_references"),
            (CheckLabel::UnusedStructures, "unused_structures"),
            (CheckLabel::BgpRoutes, "bgp_routes"),
            (CheckLabel::BgpRouteReflection, "bgp_route_reflection"),
            (CheckLabel::OspfNeighbors, "ospf_neighbors"),
            (CheckLabel::AreaConfiguration, "area_configuration"),
            (CheckLabel::OspfRoutes, "ospf_routes"),
            (CheckLabel::InterfaceProperties, "interface_properties"),
        ];

        DISPLAY_STRINGS
            .iter()
            .find(|(label, _)| label == self)
            .map(|(_, s)| *s)
            .unwrap_or("unknown")
    }

    pub fn kind(&self) -> CheckKind {
        match self {
            CheckLabel::BgpSessions
            | CheckLabel::UndefinedReferences
            | CheckLabel::OspfNeighbors
            | CheckLabel::AreaConfiguration => CheckKind::Baseline,
            CheckLabel::UnusedStructures
            | CheckLabel::BgpRoutes
            | CheckLabel::BgpRouteReflection
            | CheckLabel::OspfRoutes
            | CheckLabel::InterfaceProperties => CheckKind::Deep,
        }
    }

    pub fn protocol(&self) -> Protocol {
        match self {
            CheckLabel::BgpSessions
            | CheckLabel::UndefinedReferences
            | CheckLabel::UnusedStructures
            | CheckLabel::BgpRoutes
            | CheckLabel::BgpRouteReflection => Protocol::Bgp,
            CheckLabel::OspfNeighbors
            | CheckLabel::AreaConfiguration
            | CheckLabel::OspfRoutes
            | CheckLabel::InterfaceProperties => Protocol::Ospf,
        }
    }
}

impl std::fmt::Display for CheckLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Aggregated result of one orchestration run. Entries keep insertion
/// order for deterministic display; a label that was never run is absent,
/// distinct from a present-but-empty table.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnomalyReport {
    pub protocol: Protocol,
    pub generated_at: DateTime<Utc>,
    entries: Vec<(CheckLabel, ResultTable)>,
}

impl AnomalyReport {
    pub fn new(protocol: Protocol) -> Self {
        Self {
            protocol,
            generated_at: Utc::now(),
            entries: Vec::new(),
        }
    }

    pub fn insert(&mut self, label: CheckLabel, table: ResultTable) {
        self.entries.push((label, table));
    }

    pub fn get(&self, label: CheckLabel) -> Option<&ResultTable> {
        self.entries
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, table)| table)
    }

    pub fn contains(&self, label: CheckLabel) -> bool {
        self.get(label).is_some()
    }

    pub fn labels(&self) -> impl Iterator<Item = CheckLabel> + '_ {
        self.entries.iter().map(|(label, _)| *label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(CheckLabel, ResultTable)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
