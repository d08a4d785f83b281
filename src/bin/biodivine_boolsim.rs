use biodivine_boolsim::BoolSimResult;
use biodivine_boolsim::model::{Model, ReachableConfig};
use biodivine_boolsim::state_set::StateSet;
use biodivine_boolsim::tools::{ToolConfig, Toolbox};
use cancel_this::Cancellable;
use clap::{Parser, Subcommand};
use env_logger::Builder;
use log::LevelFilter;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "biodivine_boolsim")]
#[command(about = "Run boolSim attractor/reachability analysis and simplify its state sets")]
struct Args {
    #[command(subcommand)]
    command: Action,

    /// The boolSim executable
    #[arg(long, global = true, default_value = "boolSim", require_equals = true)]
    boolsim: String,

    /// The boolSim_setutils executable
    #[arg(
        long,
        global = true,
        default_value = "boolSim_setutils",
        require_equals = true
    )]
    setutils: String,

    /// The espresso executable
    #[arg(long, global = true, default_value = "espresso", require_equals = true)]
    espresso: String,

    /// Value of the boolSim `-p` flag
    #[arg(long, global = true, default_value_t = 3, require_equals = true)]
    parallelism: u32,

    /// How often a running tool is checked for completion and cancellation
    #[arg(
        long,
        global = true,
        value_name = "MILLIS",
        default_value_t = 10,
        require_equals = true
    )]
    poll_interval: u64,

    /// Continue even if an external tool exits with a non-zero status
    #[arg(long, global = true)]
    ignore_exit_status: bool,

    /// Cancel the whole run after the given number of seconds
    #[arg(long, global = true, value_name = "SECONDS", require_equals = true)]
    timeout: Option<u64>,

    /// Logging verbosity (use -v for info, or -v=LEVEL for a specific level)
    #[arg(
        long,
        short = 'v',
        global = true,
        value_name = "LEVEL",
        num_args = 0..=1,
        default_missing_value = "info",
        require_equals = true
    )]
    verbose: Option<Option<LogLevel>>,
}

#[derive(Subcommand)]
enum Action {
    /// Compute attractors of a model and print the number of states in each
    Attractors {
        /// Path to a boolSim model file
        #[arg(value_name = "MODEL")]
        model: PathBuf,
        /// Also minimize every attractor with espresso
        #[arg(long)]
        simplify: bool,
    },
    /// Compute the states reachable from an initial state set
    Reach {
        #[arg(value_name = "MODEL")]
        model: PathBuf,
        #[arg(value_name = "INITIAL")]
        initial: PathBuf,
        /// Output file (default: `<INITIAL without .txt>_<SUFFIX>.txt`)
        #[arg(long, short = 'o', require_equals = true)]
        output: Option<PathBuf>,
        #[arg(long, default_value = "reach", require_equals = true)]
        suffix: String,
        /// Maximal number of steps
        #[arg(long, require_equals = true)]
        max_steps: Option<usize>,
    },
    /// Print the number of states in each state set
    Count {
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },
    /// Print a state set with `-` as "don't care"
    Show {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Remove the states of other sets from a state set
    Exclude {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(value_name = "EXCLUDED")]
        excluded: Vec<PathBuf>,
        #[arg(long, short = 'o', require_equals = true)]
        output: PathBuf,
    },
    /// Intersect two state sets
    Intersect {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(value_name = "OTHER")]
        other: PathBuf,
        #[arg(long, short = 'o', require_equals = true)]
        output: PathBuf,
    },
    /// Minimize a state set with espresso
    Simplify {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
}

impl From<LogLevel> for LevelFilter {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
        }
    }
}

fn main() {
    let args = Args::parse();

    // None = flag missing, Some(None) = `-v` without value, Some(Some(level)) = `-v=level`.
    let log_level = match &args.verbose {
        None => LevelFilter::Off,
        Some(None) => LevelFilter::Info,
        Some(Some(level)) => level.clone().into(),
    };
    Builder::from_default_env().filter_level(log_level).init();

    let config = ToolConfig::default()
        .with_boolsim(args.boolsim.as_str())
        .with_setutils(args.setutils.as_str())
        .with_espresso(args.espresso.as_str())
        .with_parallelism(args.parallelism)
        .with_poll_interval(Duration::from_millis(args.poll_interval))
        .with_check_exit_status(!args.ignore_exit_status);
    let toolbox = Toolbox::new(config).shared();

    let result = match args.timeout {
        None => run(&toolbox, &args.command),
        Some(seconds) => {
            let timeout = Duration::from_secs(seconds);
            cancel_this::on_timeout(timeout, || -> Cancellable<BoolSimResult<()>> {
                Ok(run(&toolbox, &args.command))
            })
            .unwrap_or_else(|e| Err(e.into()))
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(toolbox: &Arc<Toolbox>, action: &Action) -> BoolSimResult<()> {
    let state_set = |path: &PathBuf| StateSet::new(toolbox.clone(), path);
    match action {
        Action::Attractors { model, simplify } => {
            let model = Model::new(toolbox.clone(), model);
            let attractors = model.attractors()?;
            for (i, attractor) in attractors.iter().enumerate() {
                println!(
                    "Attractor #{} ({}): {} states",
                    i + 1,
                    attractor.path().display(),
                    attractor.count()?
                );
                if *simplify {
                    let simplified = attractor.simplify()?;
                    simplified.show()?;
                }
            }
            println!("Total attractors: {}", attractors.len());
        }
        Action::Reach {
            model,
            initial,
            output,
            suffix,
            max_steps,
        } => {
            let model = Model::new(toolbox.clone(), model);
            let mut config = ReachableConfig::default().with_suffix(suffix);
            config.output = output.clone();
            config.max_steps = *max_steps;
            let reach = model.reachable(&state_set(initial), &config)?;
            println!("{}: {} states", reach.path().display(), reach.count()?);
        }
        Action::Count { files } => {
            for file in files {
                println!("{}: {} states", file.display(), state_set(file).count()?);
            }
        }
        Action::Show { file } => state_set(file).show()?,
        Action::Exclude {
            file,
            excluded,
            output,
        } => {
            let excluded: Vec<StateSet> = excluded.iter().map(state_set).collect();
            let excluded: Vec<&StateSet> = excluded.iter().collect();
            let result = state_set(file).exclude(output, &excluded)?;
            println!("{}: {} states", result.path().display(), result.count()?);
        }
        Action::Intersect {
            file,
            other,
            output,
        } => {
            let result = state_set(file).intersect(output, &state_set(other))?;
            println!("{}: {} states", result.path().display(), result.count()?);
        }
        Action::Simplify { file } => {
            let result = state_set(file).simplify()?;
            println!("Written {}:", result.path().display());
            result.show()?;
        }
    }
    Ok(())
}
