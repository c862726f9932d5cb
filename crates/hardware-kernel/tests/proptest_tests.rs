//! Property-based tests for placement invariants using the `proptest` crate.

use proptest::prelude::*;

use door_types::{
    BoltPosition, BoltSpec, BoltType, DistributionMode, DoorLeafConfig, Edge, HandleSide,
    HandleSpec, HandleType, HingeSpec, HingeType, LeafRole, LockSpec, LockType, MountSide,
};
use hardware_kernel::geometry::{Point3d, Transform3D, Vec3};
use hardware_kernel::{
    audit_placements, BoltCalculator, ConflictDetector, HandleCalculator, HardwareMetadata,
    HardwarePlacement, HardwareVariant, HingeCalculator, LockCalculator, PlacementRules,
};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

fn arb_edge() -> impl Strategy<Value = Edge> {
    prop_oneof![Just(Edge::Left), Just(Edge::Right)]
}

/// Leaf tall and thick enough for every hardware type at default offsets.
fn arb_leaf() -> impl Strategy<Value = DoorLeafConfig> {
    (1800.0f64..2400.0, 600.0f64..1200.0, 40.0f64..60.0, arb_edge())
        .prop_map(|(h, w, t, side)| DoorLeafConfig::new(h, w, t, side))
}

fn arb_hinge_type() -> impl Strategy<Value = HingeType> {
    prop_oneof![Just(HingeType::Butt), Just(HingeType::Concealed)]
}

fn arb_mode() -> impl Strategy<Value = DistributionMode> {
    prop_oneof![Just(DistributionMode::Even), Just(DistributionMode::Weighted)]
}

/// Hinge spec that satisfies the count rule for any leaf from `arb_leaf`.
fn arb_hinge_spec() -> impl Strategy<Value = HingeSpec> {
    (3u32..6, arb_hinge_type(), 100.0f64..300.0, 100.0f64..300.0, arb_mode())
        .prop_map(|(n, ty, top, bottom, mode)| HingeSpec::new(n, ty).with_offsets(top, bottom, mode))
}

fn item(id: &str, variant: HardwareVariant, face: Option<MountSide>, at: Point3d) -> HardwarePlacement {
    HardwarePlacement::new(
        id,
        Transform3D::at(at),
        HardwareMetadata {
            index: 0,
            variant,
            edge: Edge::Right,
            face,
            y_position: at.y,
            length: None,
            body_offset: Vec3::ZERO,
        },
    )
}

fn lock_item(at: Point3d) -> HardwarePlacement {
    item("lock", HardwareVariant::Lock(LockType::Deadbolt), None, at)
}

fn handle_item(face: MountSide, at: Point3d) -> HardwarePlacement {
    let id = match face {
        MountSide::Exterior => "handle-exterior",
        MountSide::Interior => "handle-interior",
    };
    item(id, HardwareVariant::Handle(HandleType::Lever), Some(face), at)
}

fn bolt_item(at: Point3d) -> HardwarePlacement {
    let variant = HardwareVariant::Bolt {
        bolt_type: BoltType::Surface,
        position: BoltPosition::Top,
    };
    item("bolt-top", variant, None, at)
}

/// A pair of items separated along `axis` by `distance`, with the clearance
/// the default table requires for their kinds.
fn clearance_pair(pair: u8, at: Point3d, axis: Vec3, distance: f64) -> (HardwarePlacement, HardwarePlacement, f64) {
    let other = at + axis * distance;
    match pair {
        0 => (lock_item(at), bolt_item(other), 300.0),
        1 => (lock_item(at), handle_item(MountSide::Exterior, other), 50.0),
        _ => (
            handle_item(MountSide::Exterior, at),
            handle_item(MountSide::Interior, other),
            100.0,
        ),
    }
}

fn arb_axis() -> impl Strategy<Value = Vec3> {
    prop_oneof![Just(Vec3::X), Just(Vec3::Y), Just(Vec3::Z)]
}

const TOL: f64 = 1e-9;

// ---------------------------------------------------------------------------
// 1. Even spacing: consecutive hinge gaps are equal
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn even_hinges_equally_spaced(
        leaf in arb_leaf(),
        n in 3u32..7,
        top in 100.0f64..200.0,
        bottom in 100.0f64..200.0,
    ) {
        let spec = HingeSpec::new(n, HingeType::Butt).with_offsets(top, bottom, DistributionMode::Even);
        let placed = HingeCalculator::default().place(&leaf, &spec, None).unwrap();
        let ys: Vec<f64> = placed.iter().map(|p| p.metadata.y_position).collect();
        prop_assert_eq!(ys.len(), n as usize);
        prop_assert_eq!(ys[0], bottom);
        prop_assert_eq!(ys[ys.len() - 1], leaf.height - top);
        let expected = (leaf.height - top - bottom) / f64::from(n - 1);
        for w in ys.windows(2) {
            prop_assert!(((w[1] - w[0]) - expected).abs() < 1e-6,
                "gap {} != {}", w[1] - w[0], expected);
        }
    }
}

// ---------------------------------------------------------------------------
// 2. Hinge X is pinned exactly to the hinge edge, for every type and mode
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn hinge_x_pinned(leaf in arb_leaf(), spec in arb_hinge_spec()) {
        let placed = HingeCalculator::default().place(&leaf, &spec, None).unwrap();
        let expected = match leaf.hinge_side {
            Edge::Left => 0.0,
            Edge::Right => leaf.width,
        };
        for p in &placed {
            prop_assert_eq!(p.position().x, expected);
        }
    }
}

// ---------------------------------------------------------------------------
// 3. Idempotence: identical inputs give identical outputs and keys
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn hinge_placement_is_idempotent(leaf in arb_leaf(), spec in arb_hinge_spec()) {
        let calc = HingeCalculator::default();
        let a = calc.place(&leaf, &spec, None).unwrap();
        let b = calc.place(&leaf, &spec, None).unwrap();
        prop_assert_eq!(&a, &b);
        for (pa, pb) in a.iter().zip(&b) {
            prop_assert_eq!(pa.instance_key(LeafRole::Single), pb.instance_key(LeafRole::Single));
        }
    }

    #[test]
    fn lock_handle_bolt_placement_is_idempotent(
        leaf in arb_leaf(),
        lock_type in prop_oneof![
            Just(LockType::Cylinder),
            Just(LockType::Mortise),
            Just(LockType::Deadbolt),
            Just(LockType::Smart),
        ],
        lock_height in 800.0f64..1200.0,
        edge_offset in 50.0f64..90.0,
        handle_type in prop_oneof![
            Just(HandleType::Lever),
            Just(HandleType::Knob),
            Just(HandleType::Pull),
            Just(HandleType::Bar),
        ],
        bolt_type in prop_oneof![Just(BoltType::Flush), Just(BoltType::Surface), Just(BoltType::Automatic)],
        bolt_top in 150.0f64..300.0,
        bolt_bottom in 150.0f64..300.0,
    ) {
        let edge = leaf.opening_edge();

        // No hinges: the lock's proximity rule is covered elsewhere.
        let lock_calc = LockCalculator::default();
        let lock_spec = LockSpec::new(lock_type, lock_height, edge_offset, edge);
        let lock_a = lock_calc.place(&leaf, &lock_spec, &[]).unwrap();
        let lock_b = lock_calc.place(&leaf, &lock_spec, &[]).unwrap();
        prop_assert_eq!(&lock_a, &lock_b);

        let handle_calc = HandleCalculator::default();
        let handle_spec = HandleSpec::new(handle_type, HandleSide::Both, edge);
        let handles_a = handle_calc.place(&leaf, &handle_spec, Some(&lock_a)).unwrap();
        let handles_b = handle_calc.place(&leaf, &handle_spec, Some(&lock_b)).unwrap();
        prop_assert_eq!(&handles_a, &handles_b);

        let bolt_calc = BoltCalculator::default();
        let bolt_spec = BoltSpec::pair(bolt_type, bolt_top, bolt_bottom, edge);
        let bolts_a = bolt_calc.place(&leaf, &bolt_spec).unwrap();
        let bolts_b = bolt_calc.place(&leaf, &bolt_spec).unwrap();
        prop_assert_eq!(&bolts_a, &bolts_b);

        for (pa, pb) in handles_a.iter().chain(&bolts_a).zip(handles_b.iter().chain(&bolts_b)) {
            prop_assert_eq!(pa.instance_key(LeafRole::Active), pb.instance_key(LeafRole::Active));
        }
    }
}

// ---------------------------------------------------------------------------
// 4. Y range: every placed item lies within [0, height]
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn all_items_within_leaf(
        leaf in arb_leaf(),
        spec in arb_hinge_spec(),
        lock_height in 800.0f64..1200.0,
        bolt_top in 150.0f64..300.0,
        bolt_bottom in 150.0f64..300.0,
    ) {
        let hinges = HingeCalculator::default().place(&leaf, &spec, None).unwrap();
        let lock_edge = leaf.opening_edge();
        let lock_spec = LockSpec::new(LockType::Cylinder, lock_height, 60.0, lock_edge);
        // Proximity failures are legitimate here; only successful placements are checked.
        let lock = LockCalculator::default().place(&leaf, &lock_spec, &hinges).ok();
        let handles = HandleCalculator::default()
            .place(&leaf, &HandleSpec::new(HandleType::Lever, HandleSide::Both, lock_edge), lock.as_ref())
            .unwrap();
        let bolts = BoltCalculator::default()
            .place(&leaf, &BoltSpec::pair(BoltType::Flush, bolt_top, bolt_bottom, lock_edge))
            .unwrap();

        let mut all = hinges;
        all.extend(lock);
        all.extend(handles);
        all.extend(bolts);
        for p in &all {
            let y = p.position().y;
            prop_assert!((-TOL..=leaf.height + TOL).contains(&y), "{} at y={}", p.id, y);
        }
        let report = audit_placements(&leaf, &all, &PlacementRules::default());
        prop_assert!(report.is_clean(), "{:?}", report.findings);
    }
}

// ---------------------------------------------------------------------------
// 5. Mirroring the hinge side mirrors every X and keeps every Y
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn mirrored_leaf_mirrors_x(leaf in arb_leaf(), spec in arb_hinge_spec()) {
        let calc = HingeCalculator::default();
        let a = calc.place(&leaf, &spec, None).unwrap();
        let b = calc.place(&leaf.mirrored(), &spec, None).unwrap();
        for (pa, pb) in a.iter().zip(&b) {
            prop_assert!((pa.position().x + pb.position().x - leaf.width).abs() < TOL);
            prop_assert_eq!(pa.position().y, pb.position().y);
        }
    }
}

// ---------------------------------------------------------------------------
// 6. Conflict monotonicity: below clearance conflicts, at or above does not
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn conflict_monotonic_in_distance(
        pair in 0u8..3,
        axis in arb_axis(),
        base_y in 500.0f64..1500.0,
        distance in 0.0f64..600.0,
    ) {
        let detector = ConflictDetector::default();
        let at = Point3d::new(840.0, base_y, -20.0);
        let (a, b, required) = clearance_pair(pair, at, axis, distance);
        let found = detector.check_pair(&a, &b);
        let measured = a.position().distance_to(b.position());
        if measured < required {
            prop_assert!(found.is_some(), "{} <-> {} at {} (need {})", a.id, b.id, measured, required);
        } else {
            prop_assert!(found.is_none());
        }

        let (_, farther, _) = clearance_pair(pair, at, axis, distance + 50.0);
        if found.is_none() {
            prop_assert!(detector.check_pair(&a, &farther).is_none());
        }
    }
}

// ---------------------------------------------------------------------------
// 7. Pair order never changes the outcome
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn conflict_check_symmetric(
        (ax, ay) in (0.0f64..900.0, 0.0f64..2000.0),
        (bx, by) in (0.0f64..900.0, 0.0f64..2000.0),
    ) {
        let detector = ConflictDetector::default();
        let a = lock_item(Point3d::new(ax, ay, 0.0));
        let b = bolt_item(Point3d::new(bx, by, 0.0));
        let ab = detector.check_pair(&a, &b);
        let ba = detector.check_pair(&b, &a);
        prop_assert_eq!(ab.is_some(), ba.is_some());
        if let (Some(ab), Some(ba)) = (ab, ba) {
            prop_assert_eq!(ab.severity, ba.severity);
            prop_assert_eq!(ab.kinds, ba.kinds);
        }
    }
}
