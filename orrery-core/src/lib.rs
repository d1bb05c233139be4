pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod integrator;
pub mod runtime;
pub mod scenario;
pub mod units;

pub use diagnostics::{
    center_of_mass, format_result_table, format_sim_error, kinetic_energy, potential_energy,
    total_energy, total_momentum,
};
pub use engine::Body;
pub use error::SimError;
pub use integrator::step;
pub use runtime::{
    default_detectors, evaluate_detectors, get_body_states, run, run_scenario, step_simulation,
    BodyState, Detector, DetectorResult, SimulationConfig, SimulationContext, SimulationResult,
};
pub use scenario::{Label, Rgb, Scenario};
pub use units::{AU, DAY, G};
