//! Conserved quantities and user-facing reporting
//!
//! The conservation helpers are read-only passes over a body collection and
//! are what the momentum/energy detectors evaluate.

use crate::engine::Body;
use crate::error::SimError;
use crate::runtime::SimulationResult;
use crate::units::G;
use glam::DVec2;
use std::fmt::Write;

/// Vector sum of `m * v` over all bodies
pub fn total_momentum(bodies: &[Body]) -> DVec2 {
    bodies.iter().map(Body::momentum).sum()
}

pub fn kinetic_energy(bodies: &[Body]) -> f64 {
    bodies.iter().map(Body::kinetic_energy).sum()
}

/// Gravitational potential energy summed over unordered pairs.
///
/// Coincident pairs make this `-inf`.
pub fn potential_energy(bodies: &[Body]) -> f64 {
    let mut energy = 0.0;
    for (i, a) in bodies.iter().enumerate() {
        for b in &bodies[i + 1..] {
            let r = a.position().distance(b.position());
            energy -= G * a.mass() * b.mass() / r;
        }
    }
    energy
}

pub fn total_energy(bodies: &[Body]) -> f64 {
    kinetic_energy(bodies) + potential_energy(bodies)
}

/// Mass-weighted mean position. `None` for an empty collection.
pub fn center_of_mass(bodies: &[Body]) -> Option<DVec2> {
    let total_mass: f64 = bodies.iter().map(Body::mass).sum();
    if bodies.is_empty() {
        return None;
    }
    let weighted: DVec2 = bodies.iter().map(|b| b.position() * b.mass()).sum();
    Some(weighted / total_mass)
}

/// Format a simulation error for the command line, with a hint where one helps.
///
/// Carries no prefix; the caller adds its own `Error:`.
pub fn format_sim_error(error: &SimError) -> String {
    let mut msg = error.to_string();
    match error {
        SimError::DegenerateSeparation { .. } => {
            msg.push_str("\n  hint: give every body a distinct starting position");
        }
        SimError::InvalidTimestep { .. } => {
            msg.push_str("\n  hint: --dt takes a positive number of seconds");
        }
        _ => {}
    }
    msg
}

/// Render detector results as aligned `name = value` lines
pub fn format_result_table(result: &SimulationResult) -> String {
    let width = result
        .detectors
        .iter()
        .map(|d| d.name.len())
        .max()
        .unwrap_or(0);

    let mut out = format!(
        "{} steps, {:.1} days simulated\n",
        result.steps,
        result.elapsed_seconds / crate::units::DAY
    );
    for detector in &result.detectors {
        // Writing to a String cannot fail
        let _ = writeln!(out, "{:<width$} = {:.6e}", detector.name, detector.value);
    }
    out
}
