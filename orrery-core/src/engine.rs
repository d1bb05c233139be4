use crate::error::SimError;
use crate::units::G;
use glam::DVec2;

/// A point mass in the simulation
///
/// Position and velocity are in SI units (m, m/s). The mass is fixed at
/// construction. The accumulated force only lives between `compute_force`
/// and the `update_position` that consumes it.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pos: DVec2,
    vel: DVec2,
    mass: f64,
    force: Option<DVec2>,
}

impl Body {
    pub fn new(pos: DVec2, vel: DVec2, mass: f64) -> Result<Self, SimError> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(SimError::InvalidMass { mass });
        }
        if !pos.is_finite() {
            return Err(SimError::NonFiniteState { what: "position" });
        }
        if !vel.is_finite() {
            return Err(SimError::NonFiniteState { what: "velocity" });
        }
        Ok(Self {
            pos,
            vel,
            mass,
            force: None,
        })
    }

    /// A body at rest
    pub fn at_rest(pos: DVec2, mass: f64) -> Result<Self, SimError> {
        Self::new(pos, DVec2::ZERO, mass)
    }

    pub fn position(&self) -> DVec2 {
        self.pos
    }

    pub fn velocity(&self) -> DVec2 {
        self.vel
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Force computed for the current step, if any
    pub fn accumulated_force(&self) -> Option<DVec2> {
        self.force
    }

    pub fn momentum(&self) -> DVec2 {
        self.vel * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.vel.length_squared()
    }

    /// Newtonian attraction exerted on this body by `other`.
    ///
    /// Returns `None` when the bodies are too close for the force to be
    /// representable: the same position, or a separation whose square
    /// underflows to a subnormal and blows the magnitude up to infinity.
    pub fn gravity_from(&self, other: &Body) -> Option<DVec2> {
        let d = other.pos - self.pos;
        let dist_sq = d.length_squared();
        if dist_sq == 0.0 {
            return None;
        }
        let force_mag = G * self.mass * other.mass / dist_sq;
        let force = d / dist_sq.sqrt() * force_mag;
        force.is_finite().then_some(force)
    }

    /// Sum of the attraction of every body in `others` on this one.
    ///
    /// `others` must not contain `self`. The sum follows iteration order.
    pub fn net_force<'a, I>(&self, others: I) -> Result<DVec2, SimError>
    where
        I: IntoIterator<Item = &'a Body>,
    {
        let mut total = DVec2::ZERO;
        for (idx, other) in others.into_iter().enumerate() {
            if !(other.pos - self.pos).is_finite() {
                return Err(SimError::NonFiniteState { what: "separation" });
            }
            total += self
                .gravity_from(other)
                .ok_or(SimError::Coincident { other: idx })?;
        }
        if !total.is_finite() {
            return Err(SimError::NonFiniteState { what: "force" });
        }
        Ok(total)
    }

    /// Compute and store the net force from `others` for this step
    pub fn compute_force<'a, I>(&mut self, others: I) -> Result<(), SimError>
    where
        I: IntoIterator<Item = &'a Body>,
    {
        self.force = None;
        self.force = Some(self.net_force(others)?);
        Ok(())
    }

    /// Store a force computed elsewhere (parallel force phase)
    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    pub(crate) fn set_force(&mut self, force: DVec2) {
        self.force = Some(force);
    }

    pub(crate) fn clear_force(&mut self) {
        self.force = None;
    }

    /// Semi-implicit Euler: velocity first, then position from the new velocity
    ///
    /// The force is consumed either way; the state is only written when the
    /// new velocity and position are both finite.
    pub fn update_position(&mut self, dt: f64) -> Result<(), SimError> {
        let force = self.force.take().ok_or(SimError::ForceNotComputed)?;
        let vel = self.vel + force / self.mass * dt;
        if !vel.is_finite() {
            return Err(SimError::NonFiniteState { what: "velocity" });
        }
        let pos = self.pos + vel * dt;
        if !pos.is_finite() {
            return Err(SimError::NonFiniteState { what: "position" });
        }
        self.vel = vel;
        self.pos = pos;
        Ok(())
    }
}
