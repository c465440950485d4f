pub mod backtrack;
pub mod memo;
pub mod problem;
pub mod recurrence;
pub mod rolling;
pub mod table;

pub use backtrack::{backtrack, backtrack_path, backtrack_sparse};
pub use memo::{solve_topdown, Memo, State};
pub use problem::*;
pub use rolling::solve_rolling;
pub use table::{solve_bottomup, Table};

use clap::{Parser, ValueEnum};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// The different solver implementations that are available
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Memoized recursion, visits only reachable states
    TopDown,
    /// Full table, row by row
    BottomUp,
    /// Single row, value only
    Rolling,
}

#[derive(Parser, Debug)]
pub struct Options {
    /// Which solver implementation to use
    #[arg(short, long, value_enum, default_value_t = Strategy::BottomUp)]
    pub strategy: Strategy,

    /// Do not print the selected items
    #[arg(short, long)]
    pub no_print_solution: bool,

    /// Refuse problems with more (items + 1) * (capacity + 1) states
    #[arg(long, default_value_t = MAX_STATES)]
    pub max_states: usize,

    /// Problem file to try.
    /// If not specified, problem should be fed in via STD IN
    #[arg(short, long)]
    pub input_file: Option<PathBuf>,
}

pub fn load(input_file: Option<&Path>, max_states: usize) -> Result<Problem, ProblemError> {
    let problem = if let Some(input_path) = input_file {
        let input_file = File::open(input_path)?;
        Problem::read(BufReader::new(input_file))?
    } else {
        let stdin = std::io::stdin();
        Problem::read(BufReader::new(stdin.lock()))?
    };
    problem.check_state_limit(max_states)?;
    log::debug!(
        "loaded problem: {} items, capacity {}",
        problem.len(),
        problem.capacity()
    );
    Ok(problem)
}

/// Outcome of one solve, with whatever state the strategy leaves behind.
pub enum Solved {
    TopDown(Solution, Memo),
    BottomUp(Solution, Table),
    Rolling(usize),
}

impl Solved {
    pub fn value(&self) -> usize {
        match self {
            Solved::TopDown(solution, _) | Solved::BottomUp(solution, _) => solution.value,
            Solved::Rolling(value) => *value,
        }
    }

    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Solved::TopDown(solution, _) | Solved::BottomUp(solution, _) => Some(solution),
            Solved::Rolling(_) => None,
        }
    }

    /// States the strategy actually computed.
    pub fn states_computed(&self, problem: &Problem) -> usize {
        match self {
            Solved::TopDown(_, memo) => memo.len(),
            Solved::BottomUp(..) => problem.state_count(),
            Solved::Rolling(_) => problem.capacity() + 1,
        }
    }
}

pub fn solve(problem: &Problem, strategy: Strategy) -> Solved {
    match strategy {
        Strategy::TopDown => {
            let (solution, memo) = memo::solve(problem);
            Solved::TopDown(solution, memo)
        }
        Strategy::BottomUp => {
            let (solution, table) = table::solve(problem);
            Solved::BottomUp(solution, table)
        }
        Strategy::Rolling => Solved::Rolling(solve_rolling(problem)),
    }
}

pub fn run(options: &Options) -> Result<(), Box<dyn std::error::Error>> {
    let problem = load(options.input_file.as_deref(), options.max_states)?;
    let solved = solve(&problem, options.strategy);

    if let Some(solution) = solved.solution() {
        if !solution.validate(&problem) {
            return Err("solution is not valid".into());
        }

        if !options.no_print_solution {
            println!("Id\tWeight\tValue\tSelected");
            for item in problem.items() {
                println!(
                    "{}\t{}\t{}\t{}",
                    item.id,
                    item.weight,
                    item.value,
                    solution.items.binary_search(&item.id).is_ok()
                );
            }
        }

        println!(
            "Solver Used: {:?}, Solution Value: {}, Solution Weight: {}, Target Capacity: {}, Unused Capacity: {}",
            options.strategy,
            solution.value,
            solution.weight,
            problem.capacity(),
            problem.capacity() - solution.weight
        );
    } else {
        println!(
            "Solver Used: {:?}, Solution Value: {}, Target Capacity: {}",
            options.strategy,
            solved.value(),
            problem.capacity()
        );
    }
    println!(
        "States computed: {} out of {}",
        solved.states_computed(&problem),
        problem.state_count()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategies_agree() {
        let problem = Problem::new(vec![2, 3, 4, 5, 6], vec![3, 4, 8, 8, 10], 10).unwrap();
        let values: Vec<usize> = [Strategy::TopDown, Strategy::BottomUp, Strategy::Rolling]
            .into_iter()
            .map(|strategy| solve(&problem, strategy).value())
            .collect();
        assert_eq!(values, vec![18, 18, 18]);
    }

    #[test]
    fn states_computed_per_strategy() {
        let problem = Problem::new(vec![1, 3, 4], vec![1, 4, 5], 3).unwrap();
        assert_eq!(solve(&problem, Strategy::TopDown).states_computed(&problem), 3);
        assert_eq!(solve(&problem, Strategy::BottomUp).states_computed(&problem), 16);
        assert_eq!(solve(&problem, Strategy::Rolling).states_computed(&problem), 4);
        assert!(solve(&problem, Strategy::Rolling).solution().is_none());
    }
}
