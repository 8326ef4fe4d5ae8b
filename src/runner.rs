//! The command line host loop: parses arguments, builds [`Parameters`], configures logging and
//! runs one or more simulations to extinction, then prints the averaged outcome.
use std::error::Error;
use std::path::PathBuf;

use clap::{ArgAction, Args, Command, FromArgMatches as _};

use crate::error::ContagionError;
use crate::execution_stats::{
    log_execution_statistics, print_execution_statistics, ExecutionProfilingCollector,
};
use crate::log::{apply_log_spec, info, warn, LevelFilter, LogSpec};
use crate::parameters::Parameters;
use crate::random::run_seed;
use crate::simulation::Simulation;
use crate::summary::RunSummary;

/// Values given on the command line take precedence over the config file.
#[derive(Args, Debug, Default, Clone)]
pub struct ParameterOverrides {
    /// Number of agents
    #[arg(long)]
    pub population: Option<usize>,

    /// Probability that a contact transmits the virus
    #[arg(long)]
    pub infect_rate: Option<f64>,

    /// Fraction of agents that shelter in place
    #[arg(long)]
    pub shelter_fraction: Option<f64>,

    /// Fraction of agents that die once infected
    #[arg(long)]
    pub death_fraction: Option<f64>,

    /// Number of rooms
    #[arg(long)]
    pub rooms: Option<usize>,
}

impl ParameterOverrides {
    pub fn apply(&self, parameters: &mut Parameters) {
        if let Some(population) = self.population {
            parameters.population = population;
        }
        if let Some(infect_rate) = self.infect_rate {
            parameters.infect_rate = infect_rate;
        }
        if let Some(shelter_fraction) = self.shelter_fraction {
            parameters.shelter_fraction = shelter_fraction;
        }
        if let Some(death_fraction) = self.death_fraction {
            parameters.death_fraction = death_fraction;
        }
        if let Some(rooms) = self.rooms {
            parameters.rooms = rooms;
        }
    }
}

/// Default cli arguments for the contagion runner
#[derive(Args, Debug)]
pub struct BaseArgs {
    /// Random seed; run `k` uses this seed plus `k`
    #[arg(short, long)]
    pub random_seed: Option<u64>,

    /// Optional path for a JSON parameters file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: ParameterOverrides,

    /// Number of consecutive runs
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub runs: u32,

    /// Stop a run after this many ticks even if the infection is still spreading
    #[arg(long)]
    pub max_ticks: Option<u64>,

    /// Log level, or a comma separated list of `module=level` filters
    #[arg(long)]
    pub log_level: Option<String>,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Do not print execution statistics
    #[arg(long)]
    pub no_stats: bool,
}

fn create_cli() -> Command {
    let cli = Command::new("contagion")
        .about("Epidemic spread among agents moving in a walled arena")
        .version(env!("CARGO_PKG_VERSION"));
    BaseArgs::augment_args(cli)
}

/// Parses the command line and runs the simulations it describes.
///
/// # Errors
/// Returns an error if argument parsing, loading the parameters, or configuring logging fails
pub fn run_with_args() -> Result<RunSummary, Box<dyn Error>> {
    let matches = create_cli().get_matches();
    let args = BaseArgs::from_arg_matches(&matches)?;
    run_with_base_args(&args)
}

/// Runs `args.runs` simulations one after another and prints their averaged outcome.
///
/// # Errors
/// Returns an error if loading the parameters or configuring logging fails
pub fn run_with_base_args(args: &BaseArgs) -> Result<RunSummary, Box<dyn Error>> {
    configure_logging(args)?;
    let parameters = resolve_parameters(args)?;

    let mut collector = ExecutionProfilingCollector::new();
    let mut summary = RunSummary::new();
    for run in 0..args.runs {
        let mut run_parameters = parameters.clone();
        run_parameters.seed = run_seed(parameters.seed, run);
        info!("Starting run {} with seed {}", run + 1, run_parameters.seed);

        let mut simulation = Simulation::new(&run_parameters);
        let outcome = simulation.run_until_extinct(args.max_ticks);
        if !outcome.extinct {
            warn!(
                "run {} stopped after {} ticks with the infection still active",
                run + 1,
                outcome.ticks
            );
        }
        summary.record_run(&outcome.final_sample);
        collector.record_run(outcome.ticks);
    }

    print_summary(&summary);
    let stats = collector.compute_final_statistics(parameters.population);
    if !args.no_stats {
        print_execution_statistics(&stats);
    }
    log_execution_statistics(&stats);
    Ok(summary)
}

fn print_summary(summary: &RunSummary) {
    println!("Completed {} run(s)", summary.runs());
    println!(
        "Average percent uninfected: {:.1}%",
        summary.percent_uninfected()
    );
    println!("Average percent infected: {:.1}%", summary.percent_infected());
    println!("Average percent cured: {:.1}%", summary.percent_cured());
    println!("Average percent dead: {:.1}%", summary.percent_dead());
}

/// Starts from the config file if one is given, otherwise from the defaults, then applies the
/// command line overrides and checks the result.
///
/// # Errors
/// If the config file cannot be loaded or a value is out of range
pub fn resolve_parameters(args: &BaseArgs) -> Result<Parameters, ContagionError> {
    let mut parameters = match &args.config {
        Some(path) => {
            info!("Loading parameters from: {}", path.display());
            Parameters::from_json_file(path)?
        }
        None => Parameters::default(),
    };
    args.overrides.apply(&mut parameters);
    if let Some(seed) = args.random_seed {
        parameters.seed = seed;
    }
    parameters.validate()?;
    Ok(parameters)
}

fn verbosity_level(verbose: u8) -> Option<LevelFilter> {
    match verbose {
        0 => None,
        1 => Some(LevelFilter::Info),
        2 => Some(LevelFilter::Debug),
        _ => Some(LevelFilter::Trace),
    }
}

/// Leaves logging untouched unless `--log-level` or `-v` was given. When both set a global
/// level, the more verbose one wins.
fn configure_logging(args: &BaseArgs) -> Result<(), ContagionError> {
    let spec = match &args.log_level {
        Some(spec) => spec.parse::<LogSpec>()?,
        None => LogSpec::default(),
    }
    .with_minimum_level(verbosity_level(args.verbose));
    if spec.is_empty() {
        return Ok(());
    }

    apply_log_spec(&spec);
    if let Some(level) = spec.global {
        info!("Logging enabled at level {level}");
    }
    for (module, level) in &spec.modules {
        info!("Logging enabled for {module} at level {level}");
    }
    Ok(())
}
