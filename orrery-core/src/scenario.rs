//! Built-in initial configurations.
//!
//! A scenario is the ordered set of bodies a simulation starts from, plus the
//! display labels a renderer draws them with. Labels never reach the physics.

use crate::engine::Body;
use crate::error::SimError;
use crate::units::{circular_orbit_speed, AU};
use glam::DVec2;

/// Display color, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const YELLOW: Rgb = Rgb(191, 191, 0);
    pub const BLUE: Rgb = Rgb(0, 0, 255);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const MAGENTA: Rgb = Rgb(191, 0, 191);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
}

/// Presentation metadata for one body
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub name: String,
    pub color: Rgb,
    pub marker_size: f32,
}

impl Label {
    pub fn new(name: impl Into<String>, color: Rgb, marker_size: f32) -> Self {
        Self {
            name: name.into(),
            color,
            marker_size,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Scenario {
    bodies: Vec<Body>,
    labels: Vec<Label>,
}

impl Scenario {
    pub fn new(bodies: Vec<Body>, labels: Vec<Label>) -> Result<Self, SimError> {
        if bodies.len() != labels.len() {
            return Err(SimError::LabelMismatch {
                bodies: bodies.len(),
                labels: labels.len(),
            });
        }
        Ok(Self { bodies, labels })
    }

    /// Sun, Earth, Mars and a 15 kg solar sail inside Earth's orbit, counter-rotating
    pub fn solar_sail() -> Result<Self, SimError> {
        let sun = Body::at_rest(DVec2::ZERO, 1.98892e30)?;
        let earth = Body::new(
            DVec2::new(-1.0 * AU, 0.0),
            DVec2::new(0.0, 29.783 * 1000.0),
            5.9742e24,
        )?;
        let mars = Body::new(
            DVec2::new(1.524 * AU, 0.0),
            DVec2::new(0.0, -24.1 * 1000.0),
            6.39e23,
        )?;
        let sail = Body::new(
            DVec2::new(-1.02 * AU, 0.0),
            DVec2::new(0.0, -34.0 * 1000.0),
            15.0,
        )?;

        Self::new(
            vec![sun, earth, mars, sail],
            vec![
                Label::new("Sun", Rgb::YELLOW, 50.0),
                Label::new("Earth", Rgb::BLUE, 5.0),
                Label::new("Mars", Rgb::RED, 5.0),
                Label::new("Solar Sail", Rgb::MAGENTA, 1.5),
            ],
        )
    }

    /// A heavy body at rest at the origin and a light one on a circular orbit
    /// of radius `radius`, starting on the +x axis and moving counter-clockwise
    pub fn circular_two_body(
        central_mass: f64,
        orbiter_mass: f64,
        radius: f64,
    ) -> Result<Self, SimError> {
        let speed = circular_orbit_speed(central_mass, radius);
        let central = Body::at_rest(DVec2::ZERO, central_mass)?;
        let orbiter = Body::new(DVec2::new(radius, 0.0), DVec2::new(0.0, speed), orbiter_mass)?;

        Self::new(
            vec![central, orbiter],
            vec![
                Label::new("Primary", Rgb::YELLOW, 30.0),
                Label::new("Satellite", Rgb::BLUE, 5.0),
            ],
        )
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Index of the body labelled `name`
    pub fn find(&self, name: &str) -> Option<usize> {
        self.labels.iter().position(|l| l.name == name)
    }

    pub fn into_parts(self) -> (Vec<Body>, Vec<Label>) {
        (self.bodies, self.labels)
    }
}
