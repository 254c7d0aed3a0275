//! Two-phase anomaly check orchestration.
//!
//! Each protocol has a static check plan: a cheap pre-screen set, one
//! designated pre-screen table whose non-emptiness escalates the run, a
//! baseline set that always executes, and a deep set that only executes
//! on escalation. Adding a protocol means adding one plan value, not new
//! branches in the runner.

use log::{debug, info};

use crate::core::errors::Result;
use crate::core::{AnomalyReport, CheckLabel, Protocol, ResultTable};
use crate::engine::{Query, QueryGateway};
use crate::snapshot::Snapshot;

/// Labels for the intermediate tables collected before the escalation
/// decision. These never appear in an AnomalyReport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreScreenLabel {
    MissingNeighbors,
    MissingNetworks,
    MissingInterfaces,
    AreaConfig,
}

/// Static description of one protocol's two-phase check run.
pub struct ProtocolCheckPlan {
    pub protocol: Protocol,
    pub pre_screen: &'static [(PreScreenLabel, Query)],
    /// Escalate when this pre-screen table is non-empty. Deliberately a
    /// single-signal heuristic.
    pub escalate_on: PreScreenLabel,
    pub baseline: &'static [(CheckLabel, Query)],
    pub deep: &'static [(CheckLabel, Query)],
}

static BGP_PLAN: ProtocolCheckPlan = ProtocolCheckPlan {
    protocol: Protocol::Bgp,
    pre_screen: &[
        (PreScreenLabel::MissingNeighbors, Query::BgpPeerConfiguration),
        (
            PreScreenLabel::MissingNetworks,
            Query::BgpProcessConfiguration,
        ),
    ],
    escalate_on: PreScreenLabel::MissingNetworks,
    baseline: &[
        (CheckLabel::BgpSessions, Query::BgpSessionStatus),
        (CheckLabel::UndefinedReferences, Query::UndefinedReferences),
    ],
    deep: &[
        (CheckLabel::UnusedStructures, Query::UnusedStructures),
        (CheckLabel::BgpRoutes, Query::Routes(Protocol::Bgp)),
        (CheckLabel::BgpRouteReflection, Query::BgpRib),
    ],
};

static OSPF_PLAN: ProtocolCheckPlan = ProtocolCheckPlan {
    protocol: Protocol::Ospf,
    pre_screen: &[
        (
            PreScreenLabel::MissingInterfaces,
            Query::OspfInterfaceConfiguration,
        ),
        (PreScreenLabel::AreaConfig, Query::OspfAreaConfiguration),
    ],
    escalate_on: PreScreenLabel::AreaConfig,
    baseline: &[
        (CheckLabel::OspfNeighbors, Query::OspfSessionCompatibility),
        (CheckLabel::AreaConfiguration, Query::OspfAreaConfiguration),
    ],
    deep: &[
        (CheckLabel::OspfRoutes, Query::Routes(Protocol::Ospf)),
        (CheckLabel::InterfaceProperties, Query::InterfaceProperties),
    ],
};

/// Check plan for a protocol.
pub fn plan_for(protocol: Protocol) -> &'static ProtocolCheckPlan {
    static PLANS: &[&ProtocolCheckPlan] = &[&BGP_PLAN, &OSPF_PLAN];

    PLANS
        .iter()
        .find(|plan| plan.protocol == protocol)
        .expect("every protocol has a check plan")
}

/// Run `protocol`'s check plan against `snapshot` through the gateway.
///
/// Binds the snapshot (rebinding with overwrite, as one orchestration owns
/// the session for its whole run), collects the pre-screen tables, decides
/// escalation, then builds the report from the baseline checks plus —
/// on escalation — the deep checks. Any query failure aborts the run; a
/// partial report is never returned.
pub fn run_checks(
    gateway: &mut dyn QueryGateway,
    snapshot: &Snapshot,
    protocol: Protocol,
) -> Result<AnomalyReport> {
    let plan = plan_for(protocol);
    gateway.bind_snapshot(snapshot, true)?;
    info!(
        "running {protocol} checks against snapshot '{}'",
        snapshot.name
    );

    let mut pre_screen: Vec<(PreScreenLabel, ResultTable)> =
        Vec::with_capacity(plan.pre_screen.len());
    for (label, query) in plan.pre_screen {
        debug!("pre-screen query '{}'", query.name());
        pre_screen.push((*label, gateway.run_query(*query)?));
    }

    let escalate = pre_screen
        .iter()
        .find(|(label, _)| *label == plan.escalate_on)
        .map(|(_, table)| !table.is_empty())
        .unwrap_or(false);

    let mut report = AnomalyReport::new(protocol);
    for (label, query) in plan.baseline {
        debug!("baseline query '{}'", query.name());
        report.insert(*label, gateway.run_query(*query)?);
    }

    if escalate {
        info!("{protocol} pre-screen found configured state; running deep checks");
        for (label, query) in plan.deep {
            debug!("deep query '{}'", query.name());
            report.insert(*label, gateway.run_query(*query)?);
        }
    } else {
        debug!("{protocol} pre-screen empty; skipping deep checks");
    }

    Ok(report)
}
