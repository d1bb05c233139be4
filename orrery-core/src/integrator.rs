use crate::engine::Body;
use crate::error::SimError;
use log::trace;

/// Reject timesteps that are not strictly positive and finite
pub fn validate_dt(dt: f64) -> Result<(), SimError> {
    if dt.is_finite() && dt > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidTimestep { dt })
    }
}

/// Step the simulation forward by dt using semi-implicit Euler integration
///
/// All forces are computed against the pre-step positions before any body
/// moves. If a force or an updated state cannot be represented the step is
/// abandoned and no body changes state.
pub fn step(bodies: &mut [Body], dt: f64) -> Result<(), SimError> {
    step_with(bodies, dt, compute_forces)
}

/// `step` with the single-threaded force phase, whatever features are enabled
#[doc(hidden)]
pub fn step_sequential(bodies: &mut [Body], dt: f64) -> Result<(), SimError> {
    step_with(bodies, dt, compute_forces_sequential)
}

fn step_with(
    bodies: &mut [Body],
    dt: f64,
    force_phase: fn(&mut [Body]) -> Result<(), SimError>,
) -> Result<(), SimError> {
    validate_dt(dt)?;

    // First, compute all forces
    if let Err(e) = force_phase(bodies) {
        bodies.iter_mut().for_each(Body::clear_force);
        return Err(e);
    }

    // Then update velocities and positions (v += F/m*dt, then x += v*dt),
    // staged so a non-finite result on any body leaves all of them untouched
    let mut next = bodies.to_vec();
    for (i, body) in next.iter_mut().enumerate() {
        if let Err(e) = body.update_position(dt) {
            trace!("update of body {i} rejected: {e}");
            bodies.iter_mut().for_each(Body::clear_force);
            return Err(e);
        }
    }
    bodies.clone_from_slice(&next);

    trace!("advanced {} bodies by {dt} s", bodies.len());
    Ok(())
}

#[cfg(not(feature = "parallel"))]
fn compute_forces(bodies: &mut [Body]) -> Result<(), SimError> {
    compute_forces_sequential(bodies)
}

fn compute_forces_sequential(bodies: &mut [Body]) -> Result<(), SimError> {
    for i in 0..bodies.len() {
        let (before, rest) = bodies.split_at_mut(i);
        if let Some((body, after)) = rest.split_first_mut() {
            body.compute_force(before.iter().chain(after.iter()))
                .map_err(|e| e.for_body(i))?;
        }
    }
    Ok(())
}

#[cfg(feature = "parallel")]
fn compute_forces(bodies: &mut [Body]) -> Result<(), SimError> {
    use rayon::prelude::*;

    let snapshot: &[Body] = bodies;
    let forces = (0..snapshot.len())
        .into_par_iter()
        .map(|i| {
            let others = snapshot[..i].iter().chain(&snapshot[i + 1..]);
            snapshot[i].net_force(others).map_err(|e| e.for_body(i))
        })
        .collect::<Result<Vec<_>, _>>()?;

    for (body, force) in bodies.iter_mut().zip(forces) {
        body.set_force(force);
    }
    Ok(())
}
