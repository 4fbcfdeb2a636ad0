use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use kcenter_tree::io::read_tree;
use kcenter_tree::{
    DistanceTable, FeasibilityOracle, Solver, SolverConfig, StaleEntryPolicy, Tree, Weight,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "kcenter", about = "Capacitated k-center solver for weighted trees")]
struct Cli {
    /// Log search progress (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Find the minimum radius and print centers and assignment.
    Solve {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        params: SolveArgs,
    },
    /// Run a single feasibility check at a given radius.
    Check {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        params: SolveArgs,
        /// Radius to check.
        #[arg(long)]
        radius: String,
    },
    /// Print the sorted pairwise distance universe.
    Universe {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Tree file (vertex count, then one `u v w` edge per line).
    tree: PathBuf,
    /// Parse weights as floating point instead of integers.
    #[arg(long)]
    float: bool,
}

#[derive(Args, Debug)]
struct SolveArgs {
    /// Maximum vertices served by one center (C).
    #[arg(long, short = 'c')]
    capacity: usize,
    /// Maximum number of centers to open (k).
    #[arg(long, short = 'k')]
    centers: usize,
    /// Root vertex for ancestor chains.
    #[arg(long, default_value_t = 1)]
    root: usize,
    /// Defer candidate entries whose vertex is already covered.
    #[arg(long)]
    skip_covered: bool,
}

impl SolveArgs {
    fn config(&self) -> SolverConfig {
        let policy = if self.skip_covered {
            StaleEntryPolicy::SkipCovered
        } else {
            StaleEntryPolicy::Retain
        };
        SolverConfig::new(self.capacity, self.centers)
            .with_root(self.root)
            .with_stale_entries(policy)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Solve { input, params } => {
            if input.float {
                run_solve::<f64>(&input, &params)?
            } else {
                run_solve::<i64>(&input, &params)?
            }
        }
        Commands::Check {
            input,
            params,
            radius,
        } => {
            if input.float {
                run_check::<f64>(&input, &params, &radius)?
            } else {
                run_check::<i64>(&input, &params, &radius)?
            }
        }
        Commands::Universe { input } => {
            if input.float {
                run_universe::<f64>(&input)?
            } else {
                run_universe::<i64>(&input)?
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load<W>(input: &InputArgs) -> Result<Tree<W>>
where
    W: Weight + FromStr,
    W::Err: std::error::Error + Send + Sync + 'static,
{
    read_tree(&input.tree)
}

fn run_solve<W>(input: &InputArgs, params: &SolveArgs) -> Result<()>
where
    W: Weight + FromStr,
    W::Err: std::error::Error + Send + Sync + 'static,
{
    let tree = load::<W>(input)?;
    let solver = Solver::new(params.config());
    let solution = solver.solve(&tree).context("solve failed")?;

    print!("{}", solution);
    for (center, members) in solution.clusters() {
        let members: Vec<String> = members.iter().map(ToString::to_string).collect();
        println!("cluster {}\tload={}\t[{}]", center, members.len(), members.join(" "));
    }
    println!("probes: {}", solution.stats.probes);

    Ok(())
}

fn run_check<W>(input: &InputArgs, params: &SolveArgs, radius: &str) -> Result<()>
where
    W: Weight + FromStr,
    W::Err: std::error::Error + Send + Sync + 'static,
{
    let radius: W = radius
        .parse()
        .with_context(|| format!("invalid radius '{}'", radius))?;
    let tree = load::<W>(input)?;
    let config = params.config();
    config
        .validate(tree.vertex_count())
        .context("invalid parameters")?;

    let table = DistanceTable::build(&tree, config.root).context("invalid tree")?;
    let coverage = FeasibilityOracle::new(&table, &config).check(radius);

    println!("radius: {}", coverage.radius);
    println!("feasible: {}", coverage.feasible);
    let centers: Vec<String> = coverage.centers.iter().map(ToString::to_string).collect();
    println!("centers: {}", centers.join(" "));

    Ok(())
}

fn run_universe<W>(input: &InputArgs) -> Result<()>
where
    W: Weight + FromStr,
    W::Err: std::error::Error + Send + Sync + 'static,
{
    let tree = load::<W>(input)?;
    let table = DistanceTable::build(&tree, 1).context("invalid tree")?;

    let values: Vec<String> = table.universe().iter().map(ToString::to_string).collect();
    println!("{}", values.join(" "));
    println!("distinct: {}", table.candidate_radii().len());

    Ok(())
}
