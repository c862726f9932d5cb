use std::collections::BTreeSet;

use door_types::{DoorLeafConfig, HardwareKind};
use tracing::{info, instrument};

use crate::placement::HardwarePlacement;
use crate::validation::PlacementRules;

/// Post-hoc checks of the placement invariants on any placement set.
/// Meant to be run in tests and after hand-edited placements are loaded.
#[instrument(skip(leaf, placements, rules), fields(count = placements.len()))]
pub fn audit_placements(
    leaf: &DoorLeafConfig,
    placements: &[HardwarePlacement],
    rules: &PlacementRules,
) -> AuditReport {
    let tol = rules.tolerance;
    let mut findings = Vec::new();
    let mut seen = BTreeSet::new();
    let mut hinge_edges = BTreeSet::new();

    for p in placements {
        let pos = p.position();
        if !pos.is_finite() {
            findings.push(AuditFinding::NonFiniteCoordinate { id: p.id.clone() });
            continue;
        }

        if pos.y < -tol.linear || pos.y > leaf.height + tol.linear {
            findings.push(AuditFinding::YOutOfRange {
                id: p.id.clone(),
                y: pos.y,
                height: leaf.height,
            });
        }
        if pos.x < -tol.linear || pos.x > leaf.width + tol.linear {
            findings.push(AuditFinding::XOutOfRange {
                id: p.id.clone(),
                x: pos.x,
                width: leaf.width,
            });
        }

        if p.kind == HardwareKind::Hinge {
            hinge_edges.insert(p.metadata.edge);
            let expected = leaf.hinge_side.x_on(leaf.width);
            if pos.x != expected {
                findings.push(AuditFinding::HingeNotPinned {
                    id: p.id.clone(),
                    x: pos.x,
                    expected,
                });
            }
        }

        if !seen.insert(p.id.as_str()) {
            findings.push(AuditFinding::DuplicateId { id: p.id.clone() });
        }
    }

    if hinge_edges.len() > 1 {
        findings.push(AuditFinding::HingesOnBothEdges);
    }

    let report = AuditReport { findings };
    info!(
        clean = report.is_clean(),
        finding_count = report.findings.len(),
        "placement audit complete"
    );
    report
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuditFinding {
    NonFiniteCoordinate { id: String },
    YOutOfRange { id: String, y: f64, height: f64 },
    XOutOfRange { id: String, x: f64, width: f64 },
    HingeNotPinned { id: String, x: f64, expected: f64 },
    HingesOnBothEdges,
    DuplicateId { id: String },
}

impl AuditFinding {
    /// Id of the offending placement, if the finding concerns one item.
    pub fn placement_id(&self) -> Option<&str> {
        match self {
            AuditFinding::NonFiniteCoordinate { id }
            | AuditFinding::YOutOfRange { id, .. }
            | AuditFinding::XOutOfRange { id, .. }
            | AuditFinding::HingeNotPinned { id, .. }
            | AuditFinding::DuplicateId { id } => Some(id),
            AuditFinding::HingesOnBothEdges => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditReport {
    pub findings: Vec<AuditFinding>,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}
