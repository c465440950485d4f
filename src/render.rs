//! Plain-text views of solver output: the dense table, the sparse memo, the
//! backtracking path and a summary of the selected items.
//!
//! Rendering only reads what the solvers produce.

use crate::solver::{self, backtrack_path, Memo, Problem, Solution, Solved, State, Strategy};
use clap::Parser;
use std::collections::HashSet;
use std::io::{self, Write};
use std::path::PathBuf;

const UNVISITED: &str = "·";

#[derive(Parser, Debug)]
pub struct Options {
    /// Which solver to render; the value-only rolling solver has nothing to show
    #[arg(short, long, value_enum, default_value_t = Strategy::BottomUp)]
    pub strategy: Strategy,

    /// Refuse problems with more (items + 1) * (capacity + 1) states
    #[arg(long, default_value_t = solver::MAX_STATES)]
    pub max_states: usize,

    /// Problem file to render.
    /// If not specified, problem should be fed in via STD IN
    #[arg(short, long)]
    pub input_file: Option<PathBuf>,
}

/// Writes a grid with one row per item count `i` and one column per
/// capacity `w`. `cell` returns `None` for states with nothing to show.
fn grid<O, F>(output: &mut O, problem: &Problem, mut cell: F) -> io::Result<()>
where
    O: Write,
    F: FnMut(State) -> Option<String>,
{
    let rows = problem.len() + 1;
    let columns = problem.capacity() + 1;

    let mut cells = Vec::with_capacity(rows);
    for i in 0..rows {
        let row: Vec<String> = (0..columns)
            .map(|w| cell((i, w)).unwrap_or_else(|| UNVISITED.to_string()))
            .collect();
        cells.push(row);
    }

    let width = cells
        .iter()
        .flatten()
        .map(|c| c.chars().count())
        .chain(std::iter::once(columns.to_string().len()))
        .max()
        .unwrap_or(1);
    let label = rows.to_string().len().max(3);

    write!(output, "{:>label$} |", "i\\w", label = label)?;
    for w in 0..columns {
        write!(output, " {:>width$}", w, width = width)?;
    }
    writeln!(output)?;
    writeln!(output, "{}", "-".repeat(label + 2 + columns * (width + 1)))?;

    for (i, row) in cells.iter().enumerate() {
        write!(output, "{:>label$} |", i, label = label)?;
        for c in row {
            let pad = width.saturating_sub(c.chars().count());
            write!(output, " {}{}", " ".repeat(pad), c)?;
        }
        writeln!(output)?;
    }
    Ok(())
}

fn items<O: Write>(output: &mut O, problem: &Problem) -> io::Result<()> {
    for item in problem.items() {
        writeln!(output, "Item {}: W={}, V={}", item.id, item.weight, item.value)?;
    }
    Ok(())
}

pub fn render_table<O: Write>(
    output: &mut O,
    problem: &Problem,
    table: &solver::Table,
) -> io::Result<()> {
    writeln!(output, "Bottom-up table")?;
    grid(output, problem, |(i, w)| Some(table.get(i, w).to_string()))?;
    items(output, problem)
}

pub fn render_memo<O: Write>(output: &mut O, problem: &Problem, memo: &Memo) -> io::Result<()> {
    writeln!(output, "Top-down memo")?;
    grid(output, problem, |state| memo.get(state).map(|v| v.to_string()))?;
    items(output, problem)?;
    writeln!(
        output,
        "States computed: {}/{}",
        memo.len(),
        problem.state_count()
    )
}

/// The table with the cells of `path` bracketed.
pub fn render_path<O: Write>(
    output: &mut O,
    problem: &Problem,
    table: &solver::Table,
    path: &[State],
) -> io::Result<()> {
    let on_path: HashSet<State> = path.iter().copied().collect();
    writeln!(output, "Backtracking path")?;
    grid(output, problem, |(i, w)| {
        let value = table.get(i, w);
        Some(if on_path.contains(&(i, w)) {
            format!("[{}]", value)
        } else {
            value.to_string()
        })
    })?;
    let steps: Vec<String> = path.iter().map(|(i, w)| format!("({}, {})", i, w)).collect();
    writeln!(output, "Path: {}", steps.join(" -> "))
}

pub fn render_solution<O: Write>(
    output: &mut O,
    problem: &Problem,
    solution: &Solution,
) -> io::Result<()> {
    let capacity = problem.capacity();
    writeln!(output, "Capacity: {}", capacity)?;
    writeln!(
        output,
        "Selected Items: {} out of {}",
        solution.items.len(),
        problem.len()
    )?;

    for item in problem.items() {
        let selected = solution.items.binary_search(&item.id).is_ok();
        let ratio = if item.weight > 0 {
            item.value as f64 / item.weight as f64
        } else {
            0.0
        };
        writeln!(
            output,
            "  [{}] Item {}: Weight={}, Value={}, Ratio={:.2}",
            if selected { "x" } else { " " },
            item.id,
            item.weight,
            item.value,
            ratio
        )?;
    }

    writeln!(output, "Total Weight Used: {} / {}", solution.weight, capacity)?;
    writeln!(
        output,
        "Remaining Capacity: {}",
        capacity.saturating_sub(solution.weight)
    )?;
    writeln!(output, "Total Value: {}", solution.value)?;
    if capacity > 0 {
        writeln!(
            output,
            "Efficiency: {:.2} value per unit",
            solution.value as f64 / capacity as f64
        )?;
        writeln!(
            output,
            "Utilization: {:.1}% of capacity",
            solution.weight as f64 / capacity as f64 * 100.0
        )?;
    }
    Ok(())
}

pub fn run(options: &Options) -> Result<(), Box<dyn std::error::Error>> {
    let problem = solver::load(options.input_file.as_deref(), options.max_states)?;
    let stdout = io::stdout();
    let mut output = stdout.lock();

    match solver::solve(&problem, options.strategy) {
        Solved::TopDown(solution, memo) => {
            render_memo(&mut output, &problem, &memo)?;
            writeln!(output)?;
            render_solution(&mut output, &problem, &solution)?;
        }
        Solved::BottomUp(solution, table) => {
            render_table(&mut output, &problem, &table)?;
            writeln!(output)?;
            let path = backtrack_path(&problem, &table);
            render_path(&mut output, &problem, &table, &path)?;
            writeln!(output)?;
            render_solution(&mut output, &problem, &solution)?;
        }
        Solved::Rolling(_) => {
            return Err("the rolling solver keeps no table to render".into());
        }
    }
    Ok(())
}
