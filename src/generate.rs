use crate::solver::{Problem, ProblemError};
use clap::{Args, Parser};
use rand::distributions::Uniform;
use rand::prelude::*;
use std::fs::File;
use std::io::prelude::*;
use std::io::BufWriter;
use std::path::PathBuf;

/// Bounds for random instances. Weights, values and capacity are drawn
/// uniformly from `1..=bound`.
#[derive(Args, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    /// How many items to generate
    #[arg(short = 'n', long, default_value_t = 30)]
    pub item_count: usize,

    /// Upper bound on weight
    #[arg(short, long, default_value_t = 200)]
    pub weight_bound: usize,

    /// Upper bound on value
    #[arg(short, long, default_value_t = 400)]
    pub value_bound: usize,

    /// Upper bound on capacity
    #[arg(short, long, default_value_t = 100)]
    pub capacity_bound: usize,
}

impl Default for Params {
    fn default() -> Params {
        Params {
            item_count: 30,
            weight_bound: 200,
            value_bound: 400,
            capacity_bound: 100,
        }
    }
}

#[derive(Parser, Debug)]
pub struct Options {
    #[command(flatten)]
    pub params: Params,

    /// Seed for a reproducible instance
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where to write the problem file
    #[arg(short, long)]
    pub output_path: PathBuf,
}

/// Draws one instance. Bounds below 1 are treated as 1.
pub fn random_problem<R: Rng + ?Sized>(
    rng: &mut R,
    params: &Params,
) -> Result<Problem, ProblemError> {
    let weight_distribution = Uniform::new_inclusive(1, params.weight_bound.max(1));
    let value_distribution = Uniform::new_inclusive(1, params.value_bound.max(1));
    let weights: Vec<usize> = (0..params.item_count)
        .map(|_| weight_distribution.sample(rng))
        .collect();
    let values: Vec<usize> = (0..params.item_count)
        .map(|_| value_distribution.sample(rng))
        .collect();
    let capacity = rng.gen_range(1..=params.capacity_bound.max(1));

    Problem::new(weights, values, capacity)
}

/// Writes `problem` in the format `Problem::read` accepts.
pub fn write_problem<O: std::io::Write>(problem: &Problem, output: &mut O) -> std::io::Result<()> {
    writeln!(output, "{}", problem.len())?;
    for item in problem.items() {
        writeln!(output, "{} {} {}", item.id, item.value, item.weight)?;
    }
    writeln!(output, "{}", problem.capacity())?;
    Ok(())
}

pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

pub fn run(options: &Options) -> Result<(), Box<dyn std::error::Error>> {
    let output_file = File::create(&options.output_path)?;
    let mut output_writer = BufWriter::new(output_file);
    let mut rng = seeded_rng(options.seed);

    let problem = random_problem(&mut rng, &options.params)?;
    write_problem(&problem, &mut output_writer)?;
    output_writer.flush()?;

    let weight_sum: usize = problem.weights().iter().sum();
    println!("Weight Sum: {}, Capacity: {}", weight_sum, problem.capacity());
    log::info!("wrote {} items to {:?}", problem.len(), options.output_path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn respects_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let params = Params {
            item_count: 50,
            weight_bound: 5,
            value_bound: 9,
            capacity_bound: 3,
        };
        for _ in 0..20 {
            let problem = random_problem(&mut rng, &params).unwrap();
            assert_eq!(problem.len(), 50);
            assert!(problem.weights().iter().all(|&w| (1..=5).contains(&w)));
            assert!(problem.values().iter().all(|&v| (1..=9).contains(&v)));
            assert!((1..=3).contains(&problem.capacity()));
        }
    }

    #[test]
    fn same_seed_same_problem() {
        let params = Params::default();
        let a = random_problem(&mut seeded_rng(Some(42)), &params).unwrap();
        let b = random_problem(&mut seeded_rng(Some(42)), &params).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn written_problem_reads_back() {
        let problem = random_problem(&mut StdRng::seed_from_u64(1), &Params::default()).unwrap();
        let mut buffer = Vec::new();
        write_problem(&problem, &mut buffer).unwrap();
        assert_eq!(Problem::read(Cursor::new(buffer)).unwrap(), problem);
    }
}
