//! Tests for the simulation context and its read-side API

use orrery_core::tests::test_helpers::{approx_eq, approx_eq_vec};
use orrery_core::{
    center_of_mass, default_detectors, format_result_table, get_body_states, run,
    step_simulation, Rgb, Scenario, SimulationConfig, SimulationContext, AU, DAY,
};
use glam::DVec2;

fn context(max_steps: u64) -> SimulationContext {
    SimulationContext::new(
        Scenario::solar_sail().unwrap(),
        SimulationConfig { dt: DAY, max_steps },
    )
    .unwrap()
}

#[test]
fn test_step_simulation_stops_at_max_steps() {
    let mut ctx = context(3);
    assert!(!step_simulation(&mut ctx).unwrap());
    assert!(!step_simulation(&mut ctx).unwrap());
    assert!(step_simulation(&mut ctx).unwrap());
    assert_eq!(ctx.current_step, 3);

    // A finished context no longer moves
    let frozen = ctx.bodies().to_vec();
    assert!(step_simulation(&mut ctx).unwrap());
    assert_eq!(ctx.current_step, 3);
    assert_eq!(ctx.bodies(), frozen);
    assert!(approx_eq(ctx.elapsed_seconds(), 3.0 * DAY, 1e-9));
}

#[test]
fn test_zero_step_run() {
    let mut ctx = context(0);
    let before = ctx.bodies().to_vec();
    let result = run(&mut ctx, &[]).unwrap();
    assert_eq!(result.steps, 0);
    assert_eq!(ctx.bodies(), before);
}

#[test]
fn test_reset_restores_initial_state() {
    let mut ctx = context(10);
    let initial = ctx.bodies().to_vec();
    run(&mut ctx, &[]).unwrap();
    assert_ne!(ctx.bodies(), initial);

    ctx.reset();
    assert_eq!(ctx.current_step, 0);
    assert_eq!(ctx.bodies(), initial);
}

#[test]
fn test_body_states_carry_labels_and_au() {
    let ctx = context(1);
    let states = get_body_states(&ctx);

    let names: Vec<_> = states.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Sun", "Earth", "Mars", "Solar Sail"]);

    let earth = &states[1];
    assert_eq!(earth.color, Rgb::BLUE);
    assert!(approx_eq_vec(earth.pos_au, DVec2::new(-1.0, 0.0), 1e-12));
    assert!(approx_eq_vec(earth.pos, DVec2::new(-AU, 0.0), 1e-3));
    assert_eq!(states[3].marker_size, 1.5);
}

#[test]
fn test_default_detectors_report_every_body() {
    let mut ctx = context(1);
    let detectors = default_detectors(ctx.labels());
    assert_eq!(detectors.len(), 4 * 3 + 2);

    let result = run(&mut ctx, &detectors).unwrap();
    let mars_x = result
        .detectors
        .iter()
        .find(|d| d.name == "Mars.x")
        .unwrap();
    assert!(approx_eq(mars_x.value, 1.524, 1e-3));

    let energy = result.detectors.iter().find(|d| d.name == "energy").unwrap();
    assert!(energy.value < 0.0, "solar system is bound");

    let table = format_result_table(&result);
    assert!(table.starts_with("1 steps, 1.0 days simulated"));
    assert!(table.contains("Solar Sail.angle"));
}

#[test]
fn test_center_of_mass_near_sun() {
    let ctx = context(1);
    let com = center_of_mass(ctx.bodies()).unwrap();
    // Earth and Mars pull it slightly off the origin, well inside the Sun
    assert!(com.length() < 7.0e8);
    assert!(center_of_mass(&[]).is_none());
}

#[test]
fn test_bodies_and_labels_stay_paired() {
    let mut ctx = context(5);
    assert_eq!(ctx.bodies().len(), ctx.labels().len());

    run(&mut ctx, &[]).unwrap();
    ctx.reset();

    let states = get_body_states(&ctx);
    assert_eq!(states.len(), ctx.bodies().len());
    for ((state, body), label) in states.iter().zip(ctx.bodies()).zip(ctx.labels()) {
        assert_eq!(state.name, label.name);
        assert_eq!(state.pos, body.position());
    }
}
