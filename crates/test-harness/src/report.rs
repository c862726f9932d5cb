//! Structured text placement reports for diagnostics.
//!
//! Plain text, for failing tests to print.

use std::fmt;

use door_types::{Edge, OpeningDirection};
use hardware_kernel::{HardwarePlacement, HardwareVariant, PlacementRules};
use placement_engine::{DoubleDoorPlacement, LeafPlacement};

use crate::oracle::{self, OracleVerdict};

/// A complete placement report with all sections.
pub struct PlacementReport {
    pub leaves: Vec<LeafPlacement>,
    /// Seam width and meeting line X for double doors.
    pub meeting: Option<(f64, f64)>,
    pub oracle_results: Vec<OracleVerdict>,
}

impl PlacementReport {
    pub fn from_leaf(placement: &LeafPlacement, rules: &PlacementRules) -> Self {
        Self {
            leaves: vec![placement.clone()],
            meeting: None,
            oracle_results: oracle::check_leaf(placement, rules),
        }
    }

    pub fn from_double_door(placement: &DoubleDoorPlacement, rules: &PlacementRules) -> Self {
        let mut oracle_results = oracle::check_leaf(&placement.active, rules);
        oracle_results.extend(oracle::check_leaf(&placement.inactive, rules));
        oracle_results.push(oracle::check_double_door_symmetry(placement, 1e-9));
        Self {
            leaves: vec![placement.active.clone(), placement.inactive.clone()],
            meeting: Some((placement.meeting_gap, placement.layout.meeting_line_x)),
            oracle_results,
        }
    }

    pub fn all_passed(&self) -> bool {
        self.oracle_results.iter().all(|v| v.passed)
    }

    /// Format the report as text.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("=== Door Hardware Placement Report ===\n");

        for leaf in &self.leaves {
            let config = &leaf.leaf;
            let side = match config.hinge_side {
                Edge::Left => "left",
                Edge::Right => "right",
            };
            let opens = match config.opening_direction {
                OpeningDirection::Inward => "inward",
                OpeningDirection::Outward => "outward",
            };
            out.push_str(&format!(
                "\nLeaf [{}] {} x {} x {}mm, hinged {}, opens {}:\n",
                leaf.role.as_str(),
                config.height,
                config.width,
                config.leaf_thickness,
                side,
                opens,
            ));

            push_section(&mut out, "Hinges", &leaf.hinges);
            push_section(&mut out, "Lock", leaf.lock.as_slice());
            push_section(&mut out, "Handles", &leaf.handles);
            push_section(&mut out, "Bolts", &leaf.bolts);

            if leaf.conflicts.is_empty() {
                out.push_str("  Conflicts: none\n");
            } else {
                out.push_str(&format!(
                    "  Conflicts ({} errors, {} warnings):\n",
                    leaf.conflicts.error_count(),
                    leaf.conflicts.warning_count(),
                ));
                for c in leaf.conflicts.iter() {
                    out.push_str(&format!(
                        "    {} <-> {}: {:.1}mm, need {:.1}mm ({:?})\n",
                        c.first_id, c.second_id, c.distance, c.required, c.severity,
                    ));
                }
            }
        }

        if let Some((gap, line)) = self.meeting {
            out.push_str(&format!(
                "\nMeeting gap: {:.1}mm, meeting line at x={:.1}\n",
                gap, line
            ));
        }

        if !self.oracle_results.is_empty() {
            let passed = self.oracle_results.iter().filter(|v| v.passed).count();
            out.push_str(&format!(
                "\nOracle Results ({}/{} passed):\n",
                passed,
                self.oracle_results.len()
            ));
            for v in &self.oracle_results {
                let status = if v.passed { "PASS" } else { "FAIL" };
                out.push_str(&format!("  [{}] {}: {}\n", status, v.oracle_name, v.detail));
            }
        }

        out
    }
}

impl fmt::Display for PlacementReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

fn push_section(out: &mut String, title: &str, items: &[HardwarePlacement]) {
    if items.is_empty() {
        out.push_str(&format!("  {}: none\n", title));
        return;
    }
    out.push_str(&format!("  {} ({}):\n", title, items.len()));
    for p in items {
        let pos = p.position();
        out.push_str(&format!(
            "    {:<16} ({:.1}, {:.1}, {:.1}) {}",
            p.id,
            pos.x,
            pos.y,
            pos.z,
            describe_variant(&p.metadata.variant),
        ));
        if let Some(length) = p.metadata.length {
            out.push_str(&format!(", length {:.1}mm", length));
        }
        out.push('\n');
    }
}

fn describe_variant(variant: &HardwareVariant) -> String {
    match variant {
        HardwareVariant::Hinge(t) => format!("{:?} hinge", t).to_lowercase(),
        HardwareVariant::Lock(t) => format!("{} lock", t),
        HardwareVariant::Handle(t) => format!("{:?} handle", t).to_lowercase(),
        HardwareVariant::Bolt {
            bolt_type,
            position,
        } => format!("{:?} bolt, {:?}", bolt_type, position).to_lowercase(),
    }
}
