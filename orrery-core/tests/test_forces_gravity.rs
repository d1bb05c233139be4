//! Unit tests for the pairwise gravity model

use glam::DVec2;
use orrery_core::tests::test_helpers::{approx_eq, approx_eq_vec, body};
use orrery_core::{Body, SimError, G};

fn pair() -> (Body, Body) {
    // distance = 5.0
    (body(0.0, 0.0, 0.0, 0.0, 1.0e10), body(3.0, 4.0, 0.0, 0.0, 2.0e10))
}

#[test]
fn test_gravity_force_magnitude() {
    let (a, b) = pair();
    let force = a.gravity_from(&b).expect("distinct positions");

    // F = G * m_a * m_b / r²
    let expected_magnitude = G * 1.0e10 * 2.0e10 / 25.0;
    assert!(approx_eq(force.length(), expected_magnitude, expected_magnitude * 1e-12));
}

#[test]
fn test_gravity_force_direction() {
    let (a, b) = pair();
    let force = a.gravity_from(&b).unwrap();

    // Attraction points from a towards b
    let direction = DVec2::new(3.0, 4.0).normalize();
    assert!(approx_eq_vec(force.normalize(), direction, 1e-12));
}

#[test]
fn test_gravity_force_symmetric() {
    let (a, b) = pair();
    let on_a = a.gravity_from(&b).unwrap();
    let on_b = b.gravity_from(&a).unwrap();

    assert!(approx_eq(on_a.length(), on_b.length(), on_a.length() * 1e-12));
    assert!(approx_eq_vec(on_a + on_b, DVec2::ZERO, on_a.length() * 1e-12));
}

#[test]
fn test_symmetry_holds_for_every_pair_of_scenario() {
    let scenario = orrery_core::Scenario::solar_sail().unwrap();
    let bodies = scenario.bodies();

    for (i, a) in bodies.iter().enumerate() {
        for b in &bodies[i + 1..] {
            let on_a = a.gravity_from(b).unwrap();
            let on_b = b.gravity_from(a).unwrap();
            assert!(approx_eq_vec(on_a, -on_b, on_a.length() * 1e-12));
        }
    }
}

#[test]
fn test_net_force_is_vector_sum() {
    let a = body(0.0, 0.0, 0.0, 0.0, 1.0e10);
    let b = body(2.0, 0.0, 0.0, 0.0, 1.0e10);
    let c = body(-2.0, 0.0, 0.0, 0.0, 1.0e10);

    // Equal pulls in opposite directions cancel
    let net = a.net_force([&b, &c]).unwrap();
    assert!(approx_eq_vec(net, DVec2::ZERO, 1e-12));

    let d = body(0.0, 2.0, 0.0, 0.0, 1.0e10);
    let net = a.net_force([&b, &d]).unwrap();
    let expected = a.gravity_from(&b).unwrap() + a.gravity_from(&d).unwrap();
    assert!(approx_eq_vec(net, expected, 1e-15));
}

#[test]
fn test_compute_force_stores_force_without_moving_anything() {
    let (mut a, b) = pair();
    let b_before = b.clone();
    assert_eq!(a.accumulated_force(), None);

    a.compute_force([&b]).unwrap();

    assert_eq!(a.accumulated_force(), a.gravity_from(&b));
    assert_eq!(a.position(), DVec2::ZERO);
    assert_eq!(a.velocity(), DVec2::ZERO);
    assert_eq!(b, b_before);
}

#[test]
fn test_isolated_body_feels_no_force() {
    let mut a = body(1.0, 2.0, 3.0, 4.0, 5.0);
    a.compute_force(std::iter::empty()).unwrap();
    assert_eq!(a.accumulated_force(), Some(DVec2::ZERO));
}

#[test]
fn test_gravity_force_zero_distance() {
    let a = body(1.0, 1.0, 0.0, 0.0, 1.0);
    let far = body(10.0, 1.0, 0.0, 0.0, 1.0);
    let same = body(1.0, 1.0, 0.0, 0.0, 1.0);

    assert_eq!(a.gravity_from(&same), None);

    // Error names the coincident body by its index in the attracting set
    let err = a.net_force([&far, &same]).unwrap_err();
    assert_eq!(err, SimError::Coincident { other: 1 });
}

#[test]
fn test_failed_compute_force_leaves_no_stale_force() {
    let mut a = body(0.0, 0.0, 0.0, 0.0, 1.0);
    let b = body(1.0, 0.0, 0.0, 0.0, 1.0);
    a.compute_force([&b]).unwrap();
    assert!(a.accumulated_force().is_some());

    let same = body(0.0, 0.0, 0.0, 0.0, 1.0);
    assert!(a.compute_force([&same]).is_err());
    assert_eq!(a.accumulated_force(), None);
}
