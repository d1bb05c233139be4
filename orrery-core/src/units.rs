//! Physical constants and display-unit conversion.
//!
//! Everything inside the engine is SI. Astronomical units only appear at the
//! presentation boundary (detector readouts and the viewer).

use glam::DVec2;
use std::f64::consts::TAU;

/// Newton's gravitational constant (m³ kg⁻¹ s⁻²)
pub const G: f64 = 6.67428e-11;

/// Astronomical unit in metres
pub const AU: f64 = 149.6e6 * 1000.0;

/// One day in seconds
pub const DAY: f64 = 24.0 * 3600.0;

pub fn to_au(v: DVec2) -> DVec2 {
    v / AU
}

pub fn from_au(v: DVec2) -> DVec2 {
    v * AU
}

/// Speed of a circular orbit of radius `radius` around `central_mass`
pub fn circular_orbit_speed(central_mass: f64, radius: f64) -> f64 {
    (G * central_mass / radius).sqrt()
}

/// Period of a circular orbit of radius `radius` around `central_mass`
pub fn orbital_period(central_mass: f64, radius: f64) -> f64 {
    TAU * radius / circular_orbit_speed(central_mass, radius)
}
