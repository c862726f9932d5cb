//! Test harness for door hardware placement.
//!
//! Provides programmatic tools for scripting door configurations, verifying
//! placement invariants at every step and generating diagnostic output.
//!
//! # Key Components
//!
//! - [`DoorBuilder`]: Fluent API for configuring and placing doors
//! - [`oracle`]: Verification functions returning pass/fail verdicts
//! - [`report`]: Structured text placement descriptions
//! - [`helpers`]: Error type, standard fixtures, placement accessors
//! - [`assertions`]: Rich assertion helpers with diagnostics

pub mod assertions;
pub mod helpers;
pub mod oracle;
pub mod report;
pub mod workflow;

pub use helpers::HarnessError;
pub use oracle::OracleVerdict;
pub use report::PlacementReport;
pub use workflow::DoorBuilder;
