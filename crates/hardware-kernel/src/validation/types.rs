//! Shared types for placement validation.
//!
//! Defines the failure taxonomy, error codes, severity levels and the
//! `ValidationResult` every calculator returns from `validate`.

use std::fmt;

use door_types::HardwareKind;
use thiserror::Error;

/// Severity of an advisory finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The caller should reject the configuration.
    Error,
    /// Informational; the configuration is usable.
    Warning,
}

/// Broad class of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Leaf dimensions unusable before any rule applies.
    Input,
    /// Missing or too few items.
    Structural,
    /// A parameter outside its permitted range.
    Range,
    /// The leaf cannot physically host the hardware.
    PhysicalFeasibility,
    /// Two items too close together.
    Proximity,
}

/// One code per validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidDimension,
    MinimumHingeCountViolation,
    NoPositionsSpecified,
    HeightOutOfRange,
    EdgeOffsetOutOfRange,
    OffsetOutOfRange,
    InsufficientOffsetSpace,
    ThicknessInsufficient,
    HingeProximityViolation,
    LeafHeightMismatch,
}

impl ErrorCode {
    pub fn category(self) -> ErrorCategory {
        match self {
            ErrorCode::InvalidDimension | ErrorCode::LeafHeightMismatch => ErrorCategory::Input,
            ErrorCode::MinimumHingeCountViolation | ErrorCode::NoPositionsSpecified => {
                ErrorCategory::Structural
            }
            ErrorCode::HeightOutOfRange
            | ErrorCode::EdgeOffsetOutOfRange
            | ErrorCode::OffsetOutOfRange => ErrorCategory::Range,
            ErrorCode::InsufficientOffsetSpace | ErrorCode::ThicknessInsufficient => {
                ErrorCategory::PhysicalFeasibility
            }
            ErrorCode::HingeProximityViolation => ErrorCategory::Proximity,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A violated placement rule, carrying the offending values and the limit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlacementError {
    #[error("leaf {parameter} is not a usable value, got {value}")]
    InvalidDimension { parameter: &'static str, value: f64 },

    #[error(
        "{actual} hinges on a {height}mm leaf{} need at least {required}",
        .weight.map(|w| format!(" weighing {w:.1}kg")).unwrap_or_default()
    )]
    MinimumHingeCountViolation {
        required: u32,
        actual: u32,
        height: f64,
        weight: Option<f64>,
    },

    #[error("no bolt positions requested; at least one of top or bottom is required")]
    NoPositionsSpecified,

    #[error("{kind} height {height}mm outside permitted range [{min}, {max}]")]
    HeightOutOfRange {
        kind: HardwareKind,
        height: f64,
        min: f64,
        max: f64,
    },

    #[error("{parameter} {value}mm outside permitted range [{min}, {max}]")]
    EdgeOffsetOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("bolt {parameter} {value}mm outside permitted range [{min}, {max}]")]
    OffsetOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("insufficient hinge space: {parameter} is {value}mm, needs at least {required}mm")]
    InsufficientOffsetSpace {
        parameter: &'static str,
        value: f64,
        required: f64,
    },

    #[error("{hardware} needs a leaf at least {required}mm thick, leaf is {thickness}mm")]
    ThicknessInsufficient {
        hardware: String,
        thickness: f64,
        required: f64,
    },

    #[error(
        "lock at {lock_height}mm is {distance}mm from {hinge_id} at {hinge_y}mm; minimum clearance is {required}mm"
    )]
    HingeProximityViolation {
        hinge_id: String,
        hinge_y: f64,
        lock_height: f64,
        distance: f64,
        required: f64,
    },

    #[error("double-door leafs must share a height: active {active}mm, inactive {inactive}mm")]
    LeafHeightMismatch { active: f64, inactive: f64 },
}

impl PlacementError {
    pub fn code(&self) -> ErrorCode {
        match self {
            PlacementError::InvalidDimension { .. } => ErrorCode::InvalidDimension,
            PlacementError::MinimumHingeCountViolation { .. } => {
                ErrorCode::MinimumHingeCountViolation
            }
            PlacementError::NoPositionsSpecified => ErrorCode::NoPositionsSpecified,
            PlacementError::HeightOutOfRange { .. } => ErrorCode::HeightOutOfRange,
            PlacementError::EdgeOffsetOutOfRange { .. } => ErrorCode::EdgeOffsetOutOfRange,
            PlacementError::OffsetOutOfRange { .. } => ErrorCode::OffsetOutOfRange,
            PlacementError::InsufficientOffsetSpace { .. } => ErrorCode::InsufficientOffsetSpace,
            PlacementError::ThicknessInsufficient { .. } => ErrorCode::ThicknessInsufficient,
            PlacementError::HingeProximityViolation { .. } => ErrorCode::HingeProximityViolation,
            PlacementError::LeafHeightMismatch { .. } => ErrorCode::LeafHeightMismatch,
        }
    }
}

/// Outcome of validating one calculator's inputs: success, or every rule
/// that failed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    pub violations: Vec<PlacementError>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn push(&mut self, violation: PlacementError) {
        self.violations.push(violation);
    }

    pub fn merge(&mut self, other: ValidationResult) {
        self.violations.extend(other.violations);
    }

    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Filter violations by a specific code.
    pub fn violations_of(&self, code: ErrorCode) -> Vec<&PlacementError> {
        self.violations.iter().filter(|v| v.code() == code).collect()
    }

    pub fn has(&self, code: ErrorCode) -> bool {
        self.violations.iter().any(|v| v.code() == code)
    }

    /// Human-readable reasons, one per violation.
    pub fn reasons(&self) -> Vec<String> {
        self.violations
            .iter()
            .map(|v| format!("{}: {v}", v.code()))
            .collect()
    }

    /// Fail fast on the first violation.
    pub fn into_result(self) -> Result<(), PlacementError> {
        match self.violations.into_iter().next() {
            Some(first) => Err(first),
            None => Ok(()),
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return write!(f, "ValidationResult: valid");
        }
        writeln!(f, "ValidationResult: {} violation(s)", self.violations.len())?;
        for reason in self.reasons() {
            writeln!(f, "  {reason}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_map_to_categories() {
        assert_eq!(ErrorCode::MinimumHingeCountViolation.category(), ErrorCategory::Structural);
        assert_eq!(ErrorCode::OffsetOutOfRange.category(), ErrorCategory::Range);
        assert_eq!(ErrorCode::ThicknessInsufficient.category(), ErrorCategory::PhysicalFeasibility);
        assert_eq!(ErrorCode::HingeProximityViolation.category(), ErrorCategory::Proximity);
    }

    #[test]
    fn test_into_result_returns_first_violation() {
        let mut result = ValidationResult::ok();
        assert!(result.clone().into_result().is_ok());

        result.push(PlacementError::NoPositionsSpecified);
        result.push(PlacementError::ThicknessInsufficient {
            hardware: "flush bolt".into(),
            thickness: 30.0,
            required: 40.0,
        });
        assert!(!result.is_valid());
        assert!(result.has(ErrorCode::ThicknessInsufficient));
        assert_eq!(result.violations_of(ErrorCode::NoPositionsSpecified).len(), 1);
        assert_eq!(result.into_result(), Err(PlacementError::NoPositionsSpecified));
    }

    #[test]
    fn test_messages_carry_values() {
        let err = PlacementError::HingeProximityViolation {
            hinge_id: "hinge-1".into(),
            hinge_y: 1000.0,
            lock_height: 900.0,
            distance: 100.0,
            required: 150.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("hinge-1"));
        assert!(msg.contains("100"));
        assert!(msg.contains("150"));

        let count = PlacementError::MinimumHingeCountViolation {
            required: 4,
            actual: 2,
            height: 2000.0,
            weight: Some(85.0),
        };
        assert!(count.to_string().contains("85.0kg"));
    }
}
