use crate::generate::{random_problem, seeded_rng, Params};
use crate::solver::{
    self, solve_bottomup, solve_rolling, solve_topdown, Memo, Problem, ProblemError, Strategy,
};
use clap::Parser;
use rand::Rng;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimingError {
    #[error("at least one trial is required")]
    NoTrials,
    #[error(transparent)]
    Problem(#[from] ProblemError),
}

#[derive(Parser, Debug)]
pub struct Options {
    /// Which solver implementation to time
    #[arg(short, long, value_enum, default_value_t = Strategy::TopDown)]
    pub strategy: Strategy,

    /// Number of random instances to solve
    #[arg(short, long, default_value_t = 100)]
    pub trials: usize,

    #[command(flatten)]
    pub params: Params,

    /// Seed for reproducible instances
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub strategy: Strategy,
    pub trials: usize,
    pub mean: Duration,
    pub mean_states: f64,
}

/// Solves `trials` fresh random instances and averages the time spent in the
/// solve call alone. Instance generation is not timed.
pub fn average_time<R: Rng + ?Sized>(
    strategy: Strategy,
    trials: usize,
    params: &Params,
    rng: &mut R,
) -> Result<Report, TimingError> {
    if trials == 0 {
        return Err(TimingError::NoTrials);
    }

    let mut total = Duration::ZERO;
    let mut total_states = 0usize;
    for trial in 0..trials {
        let problem = random_problem(rng, params)?;
        let (elapsed, states) = time_solve(&problem, strategy);

        log::trace!("trial {}: {:?}, {} states", trial, elapsed, states);
        total += elapsed;
        total_states += states;
    }

    let report = Report {
        strategy,
        trials,
        mean: mean(total, trials),
        mean_states: total_states as f64 / trials as f64,
    };
    log::info!("{:?}", report);
    Ok(report)
}

/// Times one solve call and counts the states it computed.
fn time_solve(problem: &Problem, strategy: Strategy) -> (Duration, usize) {
    match strategy {
        Strategy::TopDown => {
            let mut memo = Memo::new();
            let start = Instant::now();
            solve_topdown(problem, &mut memo);
            (start.elapsed(), memo.len())
        }
        Strategy::BottomUp => {
            let start = Instant::now();
            let (_, table) = solve_bottomup(problem);
            let elapsed = start.elapsed();
            (elapsed, table.width() * table.height())
        }
        Strategy::Rolling => {
            let start = Instant::now();
            solve_rolling(problem);
            (start.elapsed(), problem.capacity() + 1)
        }
    }
}

fn mean(total: Duration, trials: usize) -> Duration {
    Duration::from_secs_f64(total.as_secs_f64() / trials as f64)
}

pub fn run(options: &Options) -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = seeded_rng(options.seed);
    let report = average_time(options.strategy, options.trials, &options.params, &mut rng)?;

    println!(
        "Average runtime over {} trials: {:.6} seconds",
        report.trials,
        report.mean.as_secs_f64()
    );
    println!("Average states computed: {:.1}", report.mean_states);
    Ok(())
}

#[derive(Parser, Debug)]
pub struct CompareOptions {
    /// Refuse problems with more (items + 1) * (capacity + 1) states
    #[arg(long, default_value_t = solver::MAX_STATES)]
    pub max_states: usize,

    /// Problem file to compare on.
    /// If not specified, problem should be fed in via STD IN
    #[arg(short, long)]
    pub input_file: Option<PathBuf>,
}

/// One strategy's row in a side-by-side run on a single problem.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub strategy: Strategy,
    pub value: usize,
    pub elapsed: Duration,
    pub states: usize,
    /// `states` over `(n + 1) * (capacity + 1)`
    pub share: f64,
}

/// Runs bottom-up then top-down on the same problem.
pub fn compare(problem: &Problem) -> Vec<Comparison> {
    let total = problem.state_count();
    [Strategy::BottomUp, Strategy::TopDown]
        .into_iter()
        .map(|strategy| {
            let (elapsed, states) = time_solve(problem, strategy);
            Comparison {
                strategy,
                value: solver::solve(problem, strategy).value(),
                elapsed,
                states,
                share: states as f64 / total as f64,
            }
        })
        .collect()
}

pub fn run_compare(options: &CompareOptions) -> Result<(), Box<dyn std::error::Error>> {
    let problem = solver::load(options.input_file.as_deref(), options.max_states)?;

    println!("Strategy\tValue\tTime (s)\tStates\tShare");
    for row in compare(&problem) {
        println!(
            "{:?}\t{}\t{:.6}\t{}\t{:.1}%",
            row.strategy,
            row.value,
            row.elapsed.as_secs_f64(),
            row.states,
            row.share * 100.0
        );
    }
    println!("Total possible states: {}", problem.state_count());
    Ok(())
}
