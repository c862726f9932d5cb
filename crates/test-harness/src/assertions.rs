//! Rich assertion helpers with diagnostic output.
//!
//! Every failure includes expected vs actual values and the caller's context
//! string, so a failing scenario reads on its own.

use hardware_kernel::{ConflictReport, ErrorCode, HardwarePlacement, PlacementError};

use crate::helpers::HarnessError;
use crate::oracle::OracleVerdict;

/// Assert the Y positions of `placements`, in order, within `tol`.
pub fn assert_y_positions(
    placements: &[HardwarePlacement],
    expected: &[f64],
    tol: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    let actual = crate::helpers::y_positions(placements);
    let matches = actual.len() == expected.len()
        && actual.iter().zip(expected).all(|(a, e)| (a - e).abs() <= tol);

    if matches {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] expected y positions {:?}, got {:?} (tol={})",
                ctx, expected, actual, tol,
            ),
        })
    }
}

/// Assert every placement sits at exactly `x`.
pub fn assert_all_at_x(
    placements: &[HardwarePlacement],
    x: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    match placements.iter().find(|p| p.position().x != x) {
        None => Ok(()),
        Some(p) => Err(HarnessError::AssertionFailed {
            detail: format!("[{}] {} at x={}, expected x={}", ctx, p.id, p.position().x, x),
        }),
    }
}

/// Assert a placement call failed with the given code.
pub fn assert_fails_with<T: std::fmt::Debug>(
    result: &Result<T, PlacementError>,
    code: ErrorCode,
    ctx: &str,
) -> Result<(), HarnessError> {
    match result {
        Err(err) if err.code() == code => Ok(()),
        Err(err) => Err(HarnessError::AssertionFailed {
            detail: format!("[{}] expected {:?}, got {:?}: {}", ctx, code, err.code(), err),
        }),
        Ok(value) => Err(HarnessError::AssertionFailed {
            detail: format!("[{}] expected {:?}, but placement succeeded: {:?}", ctx, code, value),
        }),
    }
}

/// Assert the conflict report is empty.
pub fn assert_no_conflicts(report: &ConflictReport, ctx: &str) -> Result<(), HarnessError> {
    if report.is_empty() {
        return Ok(());
    }
    let listed: Vec<String> = report
        .iter()
        .map(|c| {
            format!(
                "{}<->{} {:.1}/{:.1}mm {:?}",
                c.first_id, c.second_id, c.distance, c.required, c.severity
            )
        })
        .collect();
    Err(HarnessError::AssertionFailed {
        detail: format!("[{}] {} conflict(s): {}", ctx, report.len(), listed.join("; ")),
    })
}

/// Assert every verdict passed; the error names the first failing oracle.
pub fn assert_all_pass(verdicts: &[OracleVerdict], ctx: &str) -> Result<(), HarnessError> {
    match verdicts.iter().find(|v| !v.passed) {
        None => Ok(()),
        Some(v) => Err(HarnessError::OracleFailure {
            oracle: v.oracle_name.clone(),
            detail: format!("[{}] {}", ctx, v.detail),
        }),
    }
}
