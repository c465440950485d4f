use clap::Parser;
use knapsack_dp::{generate, render, solver, timing};

#[derive(Parser, Debug)]
#[command(version, about = "0/1 knapsack by dynamic programming")]
enum Command {
    /// Write a random problem file
    Generate(generate::Options),
    /// Solve a problem file and print the selection
    Solve(solver::Options),
    /// Average solve time over random problems
    Time(timing::Options),
    /// Time bottom-up and top-down side by side on one problem
    Compare(timing::CompareOptions),
    /// Print the table or memo, backtracking path and selection
    Render(render::Options),
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env = env_logger::Env::new()
        .filter_or("KNAPSACK_LOG", "warn")
        .write_style("KNAPSACK_LOG_STYLE");
    env_logger::init_from_env(env);

    let command = Command::parse();
    log::debug!("{:?}", command);

    match command {
        Command::Generate(options) => generate::run(&options)?,
        Command::Solve(options) => solver::run(&options)?,
        Command::Time(options) => timing::run(&options)?,
        Command::Compare(options) => timing::run_compare(&options)?,
        Command::Render(options) => render::run(&options)?,
    }

    Ok(())
}
