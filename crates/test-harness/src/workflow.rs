//! DoorBuilder: fluent API for scripting door configurations in tests.
//!
//! Goes through the real placement engine, not a simulation. Lock, handle
//! and bolt edges default to the leaf's opening edge so most scenarios only
//! name what they care about.

use door_types::{
    AstragalType, BoltSpec, BoltType, DistributionMode, DoorLeafConfig, Edge, HandleSide,
    HandleSpec, HandleType, HingeSpec, HingeType, LeafRole, LockSpec, LockType, OpeningDirection,
};
use hardware_kernel::PlacementRules;
use placement_engine::{
    DoubleDoorPlacement, DoubleDoorRequest, LeafPlacement, LeafRequest, PlacementEngine,
};

use crate::assertions::assert_all_pass;
use crate::helpers::HarnessError;
use crate::oracle;
use crate::report::PlacementReport;

/// A fluent builder for configuring and placing doors in tests.
#[derive(Debug, Clone)]
pub struct DoorBuilder {
    leaf: DoorLeafConfig,
    weight_kg: Option<f64>,
    hinges: HingeSpec,
    lock: Option<(LockType, f64, f64)>,
    backset: Option<f64>,
    handles: Option<(HandleType, HandleSide)>,
    handle_height: Option<f64>,
    handle_edge_offset: Option<f64>,
    bolts: Option<(BoltType, f64, f64)>,
    rules: PlacementRules,
    auto_check: bool,
}

impl DoorBuilder {
    /// Start from a leaf of the given size, hinged left, with two butt
    /// hinges at the default offsets.
    pub fn new(height: f64, width: f64, thickness: f64) -> Self {
        Self {
            leaf: DoorLeafConfig::new(height, width, thickness, Edge::Left),
            weight_kg: None,
            hinges: HingeSpec::new(2, HingeType::Butt),
            lock: None,
            backset: None,
            handles: None,
            handle_height: None,
            handle_edge_offset: None,
            bolts: None,
            rules: PlacementRules::default(),
            auto_check: false,
        }
    }

    /// Enable auto-checking: every placement runs the leaf oracles and
    /// fails on the first failing verdict.
    pub fn with_auto_check(mut self) -> Self {
        self.auto_check = true;
        self
    }

    pub fn rules(mut self, rules: PlacementRules) -> Self {
        self.rules = rules;
        self
    }

    // ── Leaf ────────────────────────────────────────────────────────────

    pub fn hinged(mut self, side: Edge) -> Self {
        self.leaf.hinge_side = side;
        self
    }

    pub fn opening(mut self, direction: OpeningDirection) -> Self {
        self.leaf.opening_direction = direction;
        self
    }

    pub fn weight(mut self, kg: f64) -> Self {
        self.weight_kg = Some(kg);
        self
    }

    // ── Hardware ────────────────────────────────────────────────────────

    pub fn hinges(mut self, count: u32, hinge_type: HingeType) -> Self {
        self.hinges = HingeSpec {
            count,
            hinge_type,
            ..self.hinges
        };
        self
    }

    pub fn hinge_offsets(mut self, top: f64, bottom: f64, mode: DistributionMode) -> Self {
        self.hinges = self.hinges.with_offsets(top, bottom, mode);
        self
    }

    pub fn lock(mut self, lock_type: LockType, height: f64, edge_offset: f64) -> Self {
        self.lock = Some((lock_type, height, edge_offset));
        self
    }

    pub fn backset(mut self, backset: f64) -> Self {
        self.backset = Some(backset);
        self
    }

    pub fn handles(mut self, handle_type: HandleType, side: HandleSide) -> Self {
        self.handles = Some((handle_type, side));
        self
    }

    pub fn handle_height(mut self, height: f64) -> Self {
        self.handle_height = Some(height);
        self
    }

    pub fn handle_edge_offset(mut self, offset: f64) -> Self {
        self.handle_edge_offset = Some(offset);
        self
    }

    pub fn bolts(mut self, bolt_type: BoltType, top: f64, bottom: f64) -> Self {
        self.bolts = Some((bolt_type, top, bottom));
        self
    }

    // ── Requests ────────────────────────────────────────────────────────

    fn lock_spec(&self, edge: Edge) -> Option<LockSpec> {
        self.lock.map(|(lock_type, height, offset)| {
            let spec = LockSpec::new(lock_type, height, offset, edge);
            match self.backset {
                Some(b) => spec.with_backset(b),
                None => spec,
            }
        })
    }

    fn handle_spec(&self, edge: Edge) -> Option<HandleSpec> {
        self.handles.map(|(handle_type, side)| {
            let mut spec = HandleSpec::new(handle_type, side, edge);
            if let Some(h) = self.handle_height {
                spec = spec.with_height(h);
            }
            if let Some(offset) = self.handle_edge_offset {
                spec = spec.with_edge_offset(offset);
            }
            spec
        })
    }

    fn bolt_spec(&self, edge: Edge) -> Option<BoltSpec> {
        self.bolts
            .map(|(bolt_type, top, bottom)| BoltSpec::pair(bolt_type, top, bottom, edge))
    }

    /// The single-leaf request this builder describes.
    pub fn request(&self) -> LeafRequest {
        let edge = self.leaf.opening_edge();
        LeafRequest {
            role: LeafRole::Single,
            leaf: self.leaf,
            weight_kg: self.weight_kg,
            hinges: self.hinges,
            lock: self.lock_spec(edge),
            handles: self.handle_spec(edge),
            bolts: self.bolt_spec(edge),
        }
    }

    /// A double-door request: this builder's leaf becomes the active leaf,
    /// the inactive leaf shares its height and thickness. Lock and handles
    /// default to a 1050mm cylinder lock and lever handles when not set;
    /// bolts default to flush bolts 200mm from the leaf ends.
    pub fn double_request(&self, inactive_width: f64, astragal: AstragalType) -> DoubleDoorRequest {
        let active_edge = self.leaf.opening_edge();
        let inactive = DoorLeafConfig {
            width: inactive_width,
            hinge_side: self.leaf.hinge_side.opposite(),
            ..self.leaf
        };
        DoubleDoorRequest {
            active: self.leaf,
            inactive,
            active_weight_kg: self.weight_kg,
            inactive_weight_kg: None,
            hinges: self.hinges,
            lock: self
                .lock_spec(active_edge)
                .unwrap_or_else(|| LockSpec::new(LockType::Cylinder, 1050.0, 60.0, active_edge)),
            handles: self
                .handle_spec(active_edge)
                .unwrap_or_else(|| HandleSpec::new(HandleType::Lever, HandleSide::Both, active_edge)),
            bolts: self
                .bolt_spec(inactive.opening_edge())
                .unwrap_or_else(|| BoltSpec::pair(BoltType::Flush, 200.0, 200.0, inactive.opening_edge())),
            astragal,
        }
    }

    // ── Placement ───────────────────────────────────────────────────────

    pub fn place(&self) -> Result<LeafPlacement, HarnessError> {
        let placement = PlacementEngine::new(self.rules.clone()).place_leaf(&self.request())?;
        if self.auto_check {
            assert_all_pass(&oracle::check_leaf(&placement, &self.rules), "auto check")?;
        }
        Ok(placement)
    }

    pub fn place_double(
        &self,
        inactive_width: f64,
        astragal: AstragalType,
    ) -> Result<DoubleDoorPlacement, HarnessError> {
        let request = self.double_request(inactive_width, astragal);
        let placement = PlacementEngine::new(self.rules.clone()).place_double_door(&request)?;
        if self.auto_check {
            let report = PlacementReport::from_double_door(&placement, &self.rules);
            assert_all_pass(&report.oracle_results, "auto check")?;
        }
        Ok(placement)
    }

    /// Place the leaf and describe it.
    pub fn report(&self) -> Result<PlacementReport, HarnessError> {
        let placement = self.place()?;
        Ok(PlacementReport::from_leaf(&placement, &self.rules))
    }
}
