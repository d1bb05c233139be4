mod viewer;

use clap::{Parser, Subcommand, ValueEnum};
use orrery_core::{
    default_detectors, format_result_table, format_sim_error, get_body_states, run,
    step_simulation, Scenario, SimError, SimulationConfig, SimulationContext, AU,
};
use viewer::ViewerApp;

#[derive(Parser)]
#[command(name = "orrery")]
#[command(about = "Orrery - gravitational dynamics of a small star system", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario to completion and print its final state
    Run {
        #[command(flatten)]
        sim: SimArgs,

        /// Print body positions (AU) every K steps
        #[arg(long, value_name = "K")]
        trace_every: Option<u64>,
    },
    /// Animate a scenario in a window
    View {
        #[command(flatten)]
        sim: SimArgs,
    },
}

#[derive(clap::Args)]
struct SimArgs {
    /// Built-in scenario to simulate
    #[arg(long, value_enum, default_value_t = ScenarioKind::SolarSail)]
    scenario: ScenarioKind,

    /// Timestep in seconds
    #[arg(long, default_value_t = SimulationConfig::default().dt)]
    dt: f64,

    /// Number of steps to simulate
    #[arg(long, default_value_t = SimulationConfig::default().max_steps)]
    steps: u64,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ScenarioKind {
    /// Sun, Earth, Mars and a solar sail
    SolarSail,
    /// One planet on a circular orbit of 1 AU around a solar mass
    Circular,
}

impl SimArgs {
    fn build(&self) -> Result<SimulationContext, SimError> {
        let scenario = match self.scenario {
            ScenarioKind::SolarSail => Scenario::solar_sail()?,
            ScenarioKind::Circular => Scenario::circular_two_body(1.98892e30, 5.9742e24, AU)?,
        };
        SimulationContext::new(
            scenario,
            SimulationConfig {
                dt: self.dt,
                max_steps: self.steps,
            },
        )
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Run { sim, trace_every } => run_batch(&sim, trace_every),
        Commands::View { sim } => run_viewer(&sim),
    };
    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_batch(sim: &SimArgs, trace_every: Option<u64>) -> Result<(), Box<dyn std::error::Error>> {
    let mut ctx = sim.build().map_err(|e| format_sim_error(&e))?;
    let detectors = default_detectors(ctx.labels());

    if let Some(every) = trace_every.filter(|k| *k > 0) {
        print_trace_header(&ctx);
        print_trace_row(&ctx);
        loop {
            let finished = step_simulation(&mut ctx).map_err(|e| format_sim_error(&e))?;
            if ctx.current_step % every == 0 || finished {
                print_trace_row(&ctx);
            }
            if finished {
                break;
            }
        }
    }

    let result = run(&mut ctx, &detectors).map_err(|e| format_sim_error(&e))?;
    print!("{}", format_result_table(&result));
    Ok(())
}

fn print_trace_header(ctx: &SimulationContext) {
    let columns: Vec<String> = ctx
        .labels()
        .iter()
        .flat_map(|l| [format!("{}.x", l.name), format!("{}.y", l.name)])
        .collect();
    println!("step,{}", columns.join(","));
}

fn print_trace_row(ctx: &SimulationContext) {
    let values: Vec<String> = get_body_states(ctx)
        .iter()
        .flat_map(|s| [format!("{:.6}", s.pos_au.x), format!("{:.6}", s.pos_au.y)])
        .collect();
    println!("{},{}", ctx.current_step, values.join(","));
}

fn run_viewer(sim: &SimArgs) -> Result<(), Box<dyn std::error::Error>> {
    // Fail on bad arguments before a window opens
    let ctx = sim.build().map_err(|e| format_sim_error(&e))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([800.0, 860.0]),
        ..Default::default()
    };
    eframe::run_native(
        "orrery",
        options,
        Box::new(move |cc| Ok(Box::new(ViewerApp::new(ctx, cc)))),
    )?;
    Ok(())
}
