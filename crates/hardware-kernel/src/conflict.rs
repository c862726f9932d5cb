//! Pairwise clearance check across every placed item on a leaf.
//!
//! The detector never fails. It measures centroid distances, compares them
//! with the clearance table and hands back every shortfall so the caller can
//! decide whether to reject or just warn.

use door_types::HardwareKind;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::placement::HardwarePlacement;
use crate::validation::{ClearanceTable, PlacementRules, Severity};

/// Two items closer than their required clearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardwareConflict {
    pub first_id: String,
    pub second_id: String,
    pub kinds: [HardwareKind; 2],
    /// Measured centroid distance (mm).
    pub distance: f64,
    /// Clearance the pair of kinds requires (mm).
    pub required: f64,
    pub severity: Severity,
}

impl HardwareConflict {
    pub fn involves(&self, id: &str) -> bool {
        self.first_id == id || self.second_id == id
    }

    /// How far short of the required clearance the pair is.
    pub fn shortfall(&self) -> f64 {
        self.required - self.distance
    }
}

/// All conflicts found in one placement set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConflictReport {
    pub conflicts: Vec<HardwareConflict>,
}

impl ConflictReport {
    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conflicts.len()
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// True when any conflict is severe enough to reject the configuration.
    pub fn is_blocking(&self) -> bool {
        self.error_count() > 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &HardwareConflict> {
        self.conflicts.iter()
    }

    fn count(&self, severity: Severity) -> usize {
        self.conflicts.iter().filter(|c| c.severity == severity).count()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConflictDetector {
    table: ClearanceTable,
}

impl ConflictDetector {
    pub fn new(table: ClearanceTable) -> Self {
        Self { table }
    }

    pub fn from_rules(rules: &PlacementRules) -> Self {
        Self::new(rules.clearance.clone())
    }

    /// Compare one pair. Returns `None` when the pair keeps its clearance.
    pub fn check_pair(
        &self,
        a: &HardwarePlacement,
        b: &HardwarePlacement,
    ) -> Option<HardwareConflict> {
        let required = self.table.required(a.kind, b.kind);
        let distance = a.position().distance_to(b.position());
        if distance >= required {
            return None;
        }

        let severity = if distance < self.table.error_ratio * required {
            Severity::Error
        } else {
            Severity::Warning
        };
        let kinds = if a.kind <= b.kind {
            [a.kind, b.kind]
        } else {
            [b.kind, a.kind]
        };
        Some(HardwareConflict {
            first_id: a.id.clone(),
            second_id: b.id.clone(),
            kinds,
            distance,
            required,
            severity,
        })
    }

    /// Check every unordered pair, in input order.
    #[instrument(skip(self, placements), fields(count = placements.len()))]
    pub fn detect(&self, placements: &[HardwarePlacement]) -> ConflictReport {
        let mut conflicts = Vec::new();
        for (i, a) in placements.iter().enumerate() {
            for b in &placements[i + 1..] {
                if let Some(conflict) = self.check_pair(a, b) {
                    conflicts.push(conflict);
                }
            }
        }

        let report = ConflictReport { conflicts };
        if report.is_blocking() {
            warn!(
                errors = report.error_count(),
                warnings = report.warning_count(),
                "blocking hardware conflicts"
            );
        }
        info!(
            conflicts = report.len(),
            blocking = report.is_blocking(),
            "conflict detection complete"
        );
        report
    }
}
