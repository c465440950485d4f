use crate::solver::problem::Problem;
use crate::solver::recurrence::include_value;

/// Value-only variant of the bottom-up solve over a single row.
///
/// Uses `capacity + 1` cells instead of the full table, so nothing can be
/// reconstructed afterwards.
pub fn solve_rolling(problem: &Problem) -> usize {
    let mut row = vec![0; problem.capacity() + 1];
    for item in problem.items() {
        // Descending so row[w - weight] still holds the previous item's value
        for w in (1..row.len()).rev() {
            if let Some(include) = include_value(item.weight, item.value, w, |w| row[w]) {
                row[w] = row[w].max(include);
            }
        }
    }
    row[problem.capacity()]
}
