use std::sync::Arc;

use nalgebra::{vector, UnitQuaternion, Vector3};
use proptest::prelude::*;

use super::topology::{chain_edges, edges_from_loops, loop_normal};
use super::*;
use crate::cfg::DIRECTION_EPS;
use crate::error::Result;
use crate::quat::{Pinch, Quat};

/// Unit circle: vertex at azimuth `gamma`.
#[derive(Debug)]
struct Ring;

impl VertexRule for Ring {
    fn default_quaternion(&self, gamma: f64, _index: usize) -> Result<Quat> {
        Quat::from_polar(1.0, 0.0, gamma, 0.0)
    }
}

fn ring(n: usize) -> Polytope {
    let pts = (0..n).map(|_| Point::derived()).collect();
    Polytope::new("ring", pts, chain_edges(n), None, RangeCfg::with_gamma(0.0, 3.0))
        .unwrap()
        .with_rule(Arc::new(Ring))
}

fn fixed(coords: &[[f64; 3]]) -> Vec<Point> {
    coords
        .iter()
        .map(|c| Point::fixed(Quat::from_cartesian(c[0], c[1], c[2], 0.0).unwrap()))
        .collect()
}

#[test]
fn empty_polytope_is_allowed() {
    let p = Polytope::new("empty", Vec::new(), Vec::new(), Some(Vec::new()), RangeCfg::default())
        .unwrap();
    assert_eq!(p.vertex_count(), 0);
    assert_eq!(p.face_count(), Some(0));
    assert_eq!(p.gamma(0), None);
    assert!(p.check_invariants().is_ok());
    assert_eq!(p.to_string(), "empty (F=0,E=0,V=0)");
}

#[test]
fn faces_not_applicable_differs_from_zero() {
    let p = ring(4);
    assert_eq!(p.face_count(), None);
    assert!(p.face_loops().is_none());
    assert_eq!(p.to_string(), "ring (F=n/a,E=3,V=4)");
}

#[test]
fn edge_outside_vertices_is_structural() {
    let err = Polytope::new(
        "bad",
        fixed(&[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]),
        vec![Edge::new(0, 2)],
        None,
        RangeCfg::default(),
    )
    .unwrap_err();
    assert!(err.is_structural());
}

#[test]
fn face_outside_edges_is_structural() {
    let pts = fixed(&[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
    let (edges, _) = edges_from_loops(&[vec![0, 1, 2]]);
    let faces = vec![Face::new(vec![0, 2, 99])];
    let err = Polytope::new("bad", pts, edges, Some(faces), RangeCfg::default()).unwrap_err();
    assert!(err.is_structural());
}

#[test]
fn open_or_short_face_is_structural() {
    let pts = fixed(&[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
    let (edges, _) = edges_from_loops(&[vec![0, 1, 2]]);
    // edge 4 (2->0) cannot follow edge 1 (1->0)
    let open = vec![Face::new(vec![0, 1, 4])];
    let err = Polytope::new("open", pts.clone(), edges.clone(), Some(open), RangeCfg::default())
        .unwrap_err();
    assert!(err.is_structural());
    let short = vec![Face::new(vec![0, 1])];
    let err = Polytope::new("short", pts, edges, Some(short), RangeCfg::default()).unwrap_err();
    assert!(err.is_structural());
}

#[test]
fn gamma_wraps_modulo_vertex_count() {
    let p = ring(4);
    // linspace(0, 3, 4) = [0, 1, 2, 3]
    assert_eq!(p.gamma_samples(), &[0.0, 1.0, 2.0, 3.0]);
    assert_eq!(p.gamma(1), Some(1.0));
    assert_eq!(p.gamma(5), Some(1.0));
    assert_eq!(p.gamma(7), Some(3.0));
    assert_eq!(p.layer_samples().len(), 3);
}

#[test]
fn derived_points_follow_the_rule() {
    let p = ring(4);
    let v = p.vertex(2).unwrap();
    assert!((v.azimuth().unwrap() - 2.0).abs() < 1e-12);
    assert!((v.norm().unwrap() - 1.0).abs() < 1e-12);
    assert!(v.elevation().unwrap().abs() < 1e-12);
}

#[test]
fn derived_point_without_rule_is_structural() {
    let p = Polytope::new(
        "bare",
        vec![Point::derived()],
        Vec::new(),
        None,
        RangeCfg::default(),
    )
    .unwrap();
    assert!(p.vertex(0).unwrap().quaternion().unwrap_err().is_structural());
}

#[test]
fn parametrized_points_see_fresh_params() {
    let pts = vec![
        Point::parametrized(|gamma, prm| Quat::from_polar(1.0 + prm.omega, 0.0, gamma + prm.psi, 0.0)),
        Point::fixed(Quat::from_polar(2.0, 0.0, 0.0, 0.0).unwrap()),
    ];
    let mut p = Polytope::new("param", pts, chain_edges(2), None, RangeCfg::default()).unwrap();
    assert!((p.vertex(0).unwrap().norm().unwrap() - 1.0).abs() < 1e-12);
    p.set_params(Params::new(2.0, 0.5));
    let v = p.vertex(0).unwrap();
    assert!((v.norm().unwrap() - 3.0).abs() < 1e-12);
    assert!((v.azimuth().unwrap() - 0.5).abs() < 1e-12);
    // repeated reads are idempotent
    assert_eq!(v.quaternion().unwrap(), v.quaternion().unwrap());
}

#[test]
fn distance_to_next_stops_at_last_point() {
    let p = Polytope::new(
        "line",
        fixed(&[[0.0, 0.0, 0.0], [3.0, 4.0, 0.0], [3.0, 4.0, 2.0]]),
        chain_edges(3),
        None,
        RangeCfg::default(),
    )
    .unwrap();
    let d0 = p.vertex(0).unwrap().distance_to_next().unwrap().unwrap();
    assert!((d0 - 5.0).abs() < 1e-9);
    let d1 = p.distance_to_next(1).unwrap().unwrap();
    assert!((d1 - 2.0).abs() < 1e-9);
    assert_eq!(p.vertex(2).unwrap().distance_to_next().unwrap(), None);
    assert!(p.distance_to_next(3).unwrap_err().is_structural());
}

#[test]
fn direction_is_unit_within_tolerance() {
    let p = Polytope::new(
        "pair",
        fixed(&[[0.3, -1.2, 0.7], [5.1, 2.2, -3.3], [0.3, -1.2, 0.7]]),
        Vec::new(),
        None,
        RangeCfg::default(),
    )
    .unwrap();
    let a = p.vertex(0).unwrap();
    let b = p.vertex(1).unwrap();
    let dir = a.direction_to(&b).unwrap();
    assert!((dir.norm() - 1.0).abs() < DIRECTION_EPS);
    let expected = (vector![5.1, 2.2, -3.3] - vector![0.3, -1.2, 0.7]).normalize();
    assert!((dir - expected).norm() < 1e-9);
    let twin = p.vertex(2).unwrap();
    assert!(a.direction_to(&twin).unwrap_err().is_domain());
}

#[test]
fn nearby_points_still_have_a_direction() {
    let p = Polytope::new(
        "close",
        fixed(&[[1.0, 0.0, 0.0], [1.0 + 1e-10, 0.0, 0.0]]),
        Vec::new(),
        None,
        RangeCfg::default(),
    )
    .unwrap();
    let dir = p.vertex(0).unwrap().direction_to(&p.vertex(1).unwrap()).unwrap();
    assert!((dir - vector![1.0, 0.0, 0.0]).norm() < 1e-3);
}

#[test]
fn transforms_freeze_vertices() {
    let mut p = ring(3);
    p.translate(&vector![0.0, 0.0, 1.0]).unwrap();
    let z: Vec<f64> = p.cartesians().unwrap().iter().map(|c| c.z).collect();
    assert!(z.iter().all(|z| (z - 1.0).abs() < 1e-12));
    assert!(p
        .vertices()
        .iter()
        .all(|v| matches!(v.source(), PointSource::Fixed(_))));

    let before = p.cartesians().unwrap();
    p.rotate(&UnitQuaternion::from_euler_angles(0.0, 0.0, std::f64::consts::PI))
        .unwrap();
    for (a, b) in before.iter().zip(p.cartesians().unwrap()) {
        assert!((Vector3::new(-a.x, -a.y, a.z) - b).norm() < 1e-9);
    }

    p.scale(4.0).unwrap();
    p.pinch(Pinch::Elevation(0.0)).unwrap();
    assert!(p.cartesians().unwrap().iter().all(|c| c.z.abs() < 1e-9));
}

#[test]
fn failed_transform_changes_nothing() {
    let mut p = ring(3);
    let before = p.quaternions().unwrap();
    assert!(p.scale(-1.0).unwrap_err().is_domain());
    assert_eq!(p.quaternions().unwrap(), before);
    assert!(matches!(p.vertices()[0].source(), PointSource::Derived));
}

#[test]
fn set_vertex_propagates_to_edges() {
    let mut p = ring(3);
    p.set_vertex(1, Quat::from_cartesian(0.0, 0.0, 5.0, 0.0).unwrap())
        .unwrap();
    let e = p.edges()[0];
    let to = p.vertex(e.to).unwrap().cartesian().unwrap();
    assert!((to - vector![0.0, 0.0, 5.0]).norm() < 1e-9);
    assert!(p.set_vertex(9, Quat::zero()).unwrap_err().is_structural());
}

#[test]
fn regular_polygon_has_one_upward_face() {
    let hex = Polygon::regular(2.0, 6).build().unwrap();
    assert_eq!(hex.vertex_count(), 6);
    assert_eq!(hex.undirected_edge_count(), 6);
    assert_eq!(hex.face_count(), Some(1));
    let pos = hex.cartesians().unwrap();
    let lp = hex.face_vertices(0).unwrap();
    assert_eq!(lp, vec![0, 1, 2, 3, 4, 5]);
    assert!(loop_normal(&lp, &pos).z > 0.0);
    assert!(pos.iter().all(|c| (c.norm() - 2.0).abs() < 1e-9));
}

#[test]
fn star_polygon_has_no_face() {
    let star = Polygon::star(1.0, 5, 2).build().unwrap();
    assert_eq!(star.face_count(), None);
    assert_eq!(star.edge_count(), 5);
    assert_eq!(star.edges()[0], Edge::new(0, 2));
    assert_eq!(star.edges()[4], Edge::new(4, 1));
    assert!(Polygon::star(1.0, 6, 3).build().unwrap_err().is_config());
    assert!(Polygon::regular(1.0, 2).build().unwrap_err().is_config());
    assert!(Polygon::regular(0.0, 5).build().unwrap_err().is_config());
}

#[test]
fn linspace_is_inclusive() {
    assert!(linspace(0.0, 1.0, 0).is_empty());
    assert_eq!(linspace(2.0, 5.0, 1), vec![2.0]);
    assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
}

#[test]
fn custom_sampling_is_used() {
    fn squares(start: f64, stop: f64, n: usize) -> Vec<f64> {
        linspace(start, stop, n).into_iter().map(|x| x * x).collect()
    }
    let mut p = ring(3);
    p.set_ranges(RangeCfg {
        gamma: AxisRange {
            start: 0.0,
            stop: 2.0,
            sampling: Sampling::Custom(squares),
        },
        ..RangeCfg::default()
    })
    .unwrap();
    assert_eq!(p.gamma_samples(), &[0.0, 1.0, 4.0]);
    assert!(p.check_invariants().is_ok());
}

#[test]
fn short_sampler_is_rejected() {
    fn first_only(start: f64, _stop: f64, _n: usize) -> Vec<f64> {
        vec![start]
    }
    let short = RangeCfg {
        gamma: AxisRange {
            start: 0.0,
            stop: 1.0,
            sampling: Sampling::Custom(first_only),
        },
        ..RangeCfg::default()
    };
    let pts = (0..4).map(|_| Point::derived()).collect();
    let err = Polytope::new("short", pts, chain_edges(4), None, short).unwrap_err();
    assert!(err.is_config());

    let mut p = ring(4);
    let before = p.gamma_samples().to_vec();
    assert!(p.set_ranges(short).unwrap_err().is_config());
    assert_eq!(p.gamma_samples(), before.as_slice());
    assert!(p.check_invariants().is_ok());

    // One vertex is the only count this sampler satisfies.
    let mut one = Polytope::new("one", vec![Point::derived()], Vec::new(), None, short).unwrap();
    let pts = (0..3).map(|_| Point::derived()).collect();
    assert!(one.replace_topology(pts, chain_edges(3), None).unwrap_err().is_config());
    assert_eq!(one.vertex_count(), 1);
    assert!(one.check_invariants().is_ok());
}

proptest! {
    #[test]
    fn indices_are_dense_after_reset(n in 0usize..40, m in 0usize..40) {
        let mut p = ring(n);
        let pts = (0..m).map(|_| Point::derived()).collect();
        p.replace_topology(pts, chain_edges(m), None).unwrap();
        prop_assert_eq!(p.vertex_count(), m);
        let idx: Vec<usize> = p.vertices().iter().map(Point::index).collect();
        prop_assert_eq!(idx, (0..m).collect::<Vec<_>>());
        prop_assert!(p.check_invariants().is_ok());
    }
}
