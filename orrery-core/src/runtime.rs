use crate::diagnostics::{total_energy, total_momentum};
use crate::engine::Body;
use crate::error::SimError;
use crate::integrator::{step, validate_dt};
use crate::scenario::{Label, Rgb, Scenario};
use crate::units::{to_au, DAY};
use glam::DVec2;
use log::{debug, info};

/// Driver settings: timestep and how many steps a run lasts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    pub dt: f64,
    pub max_steps: u64,
}

impl Default for SimulationConfig {
    /// One day per step, 546 steps
    fn default() -> Self {
        Self {
            dt: DAY,
            max_steps: 546,
        }
    }
}

/// A scalar readout evaluated on the final state
#[derive(Debug, Clone, PartialEq)]
pub enum Detector {
    /// x coordinate in AU
    PositionX(String),
    /// y coordinate in AU
    PositionY(String),
    /// Separation in AU
    Distance(String, String),
    /// Polar angle of the position in radians, in (-π, π]
    Angle(String),
    /// Magnitude of the total momentum (kg m/s)
    Momentum,
    /// Total mechanical energy (J)
    Energy,
}

/// Result of a detector evaluation
#[derive(Debug, Clone)]
pub struct DetectorResult {
    pub name: String,
    pub value: f64,
}

/// Final result of a batch run
#[derive(Debug)]
pub struct SimulationResult {
    pub steps: u64,
    pub elapsed_seconds: f64,
    pub detectors: Vec<DetectorResult>,
}

/// Snapshot of one body for a renderer
#[derive(Debug, Clone)]
pub struct BodyState {
    pub name: String,
    pub color: Rgb,
    pub marker_size: f32,
    pub pos: DVec2,
    pub pos_au: DVec2,
    pub vel: DVec2,
}

/// Bodies plus the bookkeeping a driver needs between ticks
///
/// `bodies` and `labels` are parallel vectors of equal length; they are only
/// reachable read-only so the pairing cannot drift.
#[derive(Debug)]
pub struct SimulationContext {
    bodies: Vec<Body>,
    labels: Vec<Label>,
    pub dt: f64,
    pub current_step: u64,
    pub max_steps: u64,
    initial: Scenario,
}

impl SimulationContext {
    pub fn new(scenario: Scenario, config: SimulationConfig) -> Result<Self, SimError> {
        validate_dt(config.dt)?;
        debug!(
            "building context: {} bodies, dt = {} s, {} steps",
            scenario.len(),
            config.dt,
            config.max_steps
        );
        let initial = scenario.clone();
        let (bodies, labels) = scenario.into_parts();
        Ok(Self {
            bodies,
            labels,
            dt: config.dt,
            current_step: 0,
            max_steps: config.max_steps,
            initial,
        })
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn is_finished(&self) -> bool {
        self.current_step >= self.max_steps
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.current_step as f64 * self.dt
    }

    /// Restore the starting bodies and rewind the step counter
    pub fn reset(&mut self) {
        let (bodies, labels) = self.initial.clone().into_parts();
        self.bodies = bodies;
        self.labels = labels;
        self.current_step = 0;
    }

    /// Index of the body labelled `name`
    pub fn index_of(&self, name: &str) -> Result<usize, SimError> {
        self.labels
            .iter()
            .position(|l| l.name == name)
            .ok_or_else(|| SimError::UnknownBody(name.to_string()))
    }

    pub fn body(&self, name: &str) -> Result<&Body, SimError> {
        self.index_of(name).map(|i| &self.bodies[i])
    }
}

/// Advance the context by one tick. Returns `true` once the run has reached
/// `max_steps`; a finished context is not stepped further.
pub fn step_simulation(ctx: &mut SimulationContext) -> Result<bool, SimError> {
    if ctx.is_finished() {
        return Ok(true);
    }
    step(&mut ctx.bodies, ctx.dt)?;
    ctx.current_step += 1;
    Ok(ctx.is_finished())
}

/// Batch mode: run to `max_steps`, then evaluate `detectors`
pub fn run(
    ctx: &mut SimulationContext,
    detectors: &[(String, Detector)],
) -> Result<SimulationResult, SimError> {
    while !step_simulation(ctx)? {}
    info!(
        "run finished after {} steps ({:.1} days)",
        ctx.current_step,
        ctx.elapsed_seconds() / DAY
    );

    Ok(SimulationResult {
        steps: ctx.current_step,
        elapsed_seconds: ctx.elapsed_seconds(),
        detectors: evaluate_detectors(ctx, detectors)?,
    })
}

/// Main entry point: build a context from `scenario` and run it with the default detectors
pub fn run_scenario(
    scenario: Scenario,
    config: SimulationConfig,
) -> Result<SimulationResult, SimError> {
    let detectors = default_detectors(scenario.labels());
    let mut ctx = SimulationContext::new(scenario, config)?;
    run(&mut ctx, &detectors)
}

/// Position and angle of every body, plus total momentum and energy
pub fn default_detectors(labels: &[Label]) -> Vec<(String, Detector)> {
    let mut detectors = Vec::with_capacity(labels.len() * 3 + 2);
    for label in labels {
        let name = &label.name;
        detectors.push((format!("{name}.x"), Detector::PositionX(name.clone())));
        detectors.push((format!("{name}.y"), Detector::PositionY(name.clone())));
        detectors.push((format!("{name}.angle"), Detector::Angle(name.clone())));
    }
    detectors.push(("momentum".to_string(), Detector::Momentum));
    detectors.push(("energy".to_string(), Detector::Energy));
    detectors
}

/// Evaluate all detectors on the current state
pub fn evaluate_detectors(
    ctx: &SimulationContext,
    detectors: &[(String, Detector)],
) -> Result<Vec<DetectorResult>, SimError> {
    let mut results = Vec::with_capacity(detectors.len());

    for (name, detector) in detectors {
        let value = match detector {
            Detector::PositionX(body) => to_au(ctx.body(body)?.position()).x,
            Detector::PositionY(body) => to_au(ctx.body(body)?.position()).y,
            Detector::Distance(a, b) => {
                let a = ctx.body(a)?.position();
                let b = ctx.body(b)?.position();
                to_au(a).distance(to_au(b))
            }
            Detector::Angle(body) => {
                let p = ctx.body(body)?.position();
                p.y.atan2(p.x)
            }
            Detector::Momentum => total_momentum(&ctx.bodies).length(),
            Detector::Energy => total_energy(&ctx.bodies),
        };

        results.push(DetectorResult {
            name: name.clone(),
            value,
        });
    }

    Ok(results)
}

/// Current state of every body, in scenario order
pub fn get_body_states(ctx: &SimulationContext) -> Vec<BodyState> {
    ctx.bodies
        .iter()
        .zip(&ctx.labels)
        .map(|(body, label)| BodyState {
            name: label.name.clone(),
            color: label.color,
            marker_size: label.marker_size,
            pos: body.position(),
            pos_au: to_au(body.position()),
            vel: body.velocity(),
        })
        .collect()
}
