//! Verification oracles: pure functions returning pass/fail verdicts.
//!
//! Each oracle returns an `OracleVerdict` with diagnostic detail, not panics.
//! This lets a test collect every failure in one pass.

use std::collections::HashSet;

use door_types::{DoorLeafConfig, HardwareKind};
use hardware_kernel::{ConflictReport, HardwarePlacement, PlacementRules};
use placement_engine::{DoubleDoorPlacement, LeafPlacement};

/// The result of a single oracle check.
#[derive(Debug, Clone)]
pub struct OracleVerdict {
    pub oracle_name: String,
    pub passed: bool,
    pub detail: String,
    pub value: Option<f64>,
}

impl OracleVerdict {
    fn pass(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: true,
            detail,
            value: None,
        }
    }

    fn pass_val(name: &str, detail: String, value: f64) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: true,
            detail,
            value: Some(value),
        }
    }

    fn fail(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: false,
            detail,
            value: None,
        }
    }

    fn fail_val(name: &str, detail: String, value: f64) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: false,
            detail,
            value: Some(value),
        }
    }
}

// ── Hinge Oracles ───────────────────────────────────────────────────────────

/// Consecutive hinge gaps are equal within `tol`. Value is the largest
/// deviation from the mean gap.
pub fn check_even_spacing(hinges: &[HardwarePlacement], tol: f64) -> OracleVerdict {
    if hinges.len() < 3 {
        return OracleVerdict::pass(
            "even_spacing",
            format!("{} hinge(s), spacing trivially even", hinges.len()),
        );
    }
    let gaps: Vec<f64> = hinges
        .windows(2)
        .map(|w| w[1].position().y - w[0].position().y)
        .collect();
    let mean = gaps.iter().sum::<f64>() / gaps.len() as f64;
    let deviation = gaps.iter().map(|g| (g - mean).abs()).fold(0.0, f64::max);

    if deviation <= tol {
        OracleVerdict::pass_val(
            "even_spacing",
            format!("{} gaps of {:.3}mm", gaps.len(), mean),
            deviation,
        )
    } else {
        OracleVerdict::fail_val(
            "even_spacing",
            format!("gaps {:?} deviate by {:.6}mm (tol={})", gaps, deviation, tol),
            deviation,
        )
    }
}

/// Every hinge X equals the hinge-side edge exactly.
pub fn check_hinges_pinned(leaf: &DoorLeafConfig, placements: &[HardwarePlacement]) -> OracleVerdict {
    let expected = leaf.hinge_side.x_on(leaf.width);
    let drifted: Vec<String> = placements
        .iter()
        .filter(|p| p.kind == HardwareKind::Hinge && p.position().x != expected)
        .map(|p| format!("{} at x={}", p.id, p.position().x))
        .collect();

    if drifted.is_empty() {
        OracleVerdict::pass("hinges_pinned", format!("all hinges at x={}", expected))
    } else {
        OracleVerdict::fail(
            "hinges_pinned",
            format!("expected x={}, drifted: {}", expected, drifted.join(", ")),
        )
    }
}

/// Hinges never appear on both edges of one leaf.
pub fn check_single_hinge_edge(placements: &[HardwarePlacement]) -> OracleVerdict {
    let edges: HashSet<_> = placements
        .iter()
        .filter(|p| p.kind == HardwareKind::Hinge)
        .map(|p| p.metadata.edge)
        .collect();

    if edges.len() <= 1 {
        OracleVerdict::pass("single_hinge_edge", format!("{:?}", edges))
    } else {
        OracleVerdict::fail("single_hinge_edge", "hinges on both edges".to_string())
    }
}

/// Vertical distance from the lock to every discrete hinge is at least
/// `clearance`. Value is the smallest distance found.
pub fn check_lock_clear_of_hinges(
    lock: &HardwarePlacement,
    hinges: &[HardwarePlacement],
    clearance: f64,
) -> OracleVerdict {
    let nearest = hinges
        .iter()
        .filter(|h| !h.is_continuous())
        .map(|h| (lock.position().y - h.position().y).abs())
        .fold(f64::INFINITY, f64::min);

    if nearest >= clearance {
        OracleVerdict::pass_val(
            "lock_clear_of_hinges",
            format!("nearest hinge {:.1}mm away (need {})", nearest, clearance),
            nearest,
        )
    } else {
        OracleVerdict::fail_val(
            "lock_clear_of_hinges",
            format!("nearest hinge only {:.1}mm away (need {})", nearest, clearance),
            nearest,
        )
    }
}

// ── Leaf-Wide Oracles ───────────────────────────────────────────────────────

/// All Y positions lie within [0, height].
pub fn check_y_within_leaf(leaf: &DoorLeafConfig, placements: &[HardwarePlacement]) -> OracleVerdict {
    let outside: Vec<String> = placements
        .iter()
        .filter(|p| !(0.0..=leaf.height).contains(&p.position().y))
        .map(|p| format!("{} at y={}", p.id, p.position().y))
        .collect();

    if outside.is_empty() {
        OracleVerdict::pass(
            "y_within_leaf",
            format!("{} items within [0, {}]", placements.len(), leaf.height),
        )
    } else {
        OracleVerdict::fail("y_within_leaf", outside.join(", "))
    }
}

pub fn check_unique_ids(placements: &[HardwarePlacement]) -> OracleVerdict {
    let mut seen = HashSet::new();
    let duplicates: Vec<&str> = placements
        .iter()
        .filter(|p| !seen.insert(p.id.as_str()))
        .map(|p| p.id.as_str())
        .collect();

    if duplicates.is_empty() {
        OracleVerdict::pass("unique_ids", format!("{} distinct ids", seen.len()))
    } else {
        OracleVerdict::fail("unique_ids", format!("duplicated: {}", duplicates.join(", ")))
    }
}

/// No conflict of error severity. Value is the error count.
pub fn check_no_blocking_conflicts(report: &ConflictReport) -> OracleVerdict {
    let errors = report.error_count();
    let detail = format!("{} error(s), {} warning(s)", errors, report.warning_count());
    if errors == 0 {
        OracleVerdict::pass_val("no_blocking_conflicts", detail, 0.0)
    } else {
        OracleVerdict::fail_val("no_blocking_conflicts", detail, errors as f64)
    }
}

/// Run every leaf-level oracle on one leaf placement. Conflicts are
/// advisory and left to `check_no_blocking_conflicts`.
pub fn check_leaf(placement: &LeafPlacement, rules: &PlacementRules) -> Vec<OracleVerdict> {
    let all: Vec<HardwarePlacement> = placement.all().cloned().collect();
    let mut verdicts = vec![
        check_y_within_leaf(&placement.leaf, &all),
        check_hinges_pinned(&placement.leaf, &all),
        check_single_hinge_edge(&all),
        check_unique_ids(&all),
    ];
    if let Some(lock) = &placement.lock {
        verdicts.push(check_lock_clear_of_hinges(
            lock,
            &placement.hinges,
            rules.lock.hinge_clearance,
        ));
    }
    verdicts
}

// ── Double-Door Oracles ─────────────────────────────────────────────────────

/// Hinge offsets from the meeting line are equal in magnitude and opposite
/// in sign. Value is the residual `active + inactive`.
pub fn check_double_door_symmetry(placement: &DoubleDoorPlacement, tol: f64) -> OracleVerdict {
    match placement.hinge_offsets_from_meeting_line() {
        Some((active, inactive)) => {
            let residual = active + inactive;
            if residual.abs() <= tol {
                OracleVerdict::pass_val(
                    "double_door_symmetry",
                    format!("offsets {:.3} / {:.3}", active, inactive),
                    residual,
                )
            } else {
                OracleVerdict::fail_val(
                    "double_door_symmetry",
                    format!("offsets {:.3} / {:.3} are not mirrored", active, inactive),
                    residual,
                )
            }
        }
        None => OracleVerdict::fail("double_door_symmetry", "a leaf has no hinges".to_string()),
    }
}
