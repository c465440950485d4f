//! Recovering the selected items from a filled table or memo.
//!
//! The two walks phrase the tie-break differently. The dense walk keeps an
//! item when the table value changes between rows, the sparse walk keeps it
//! when taking it is strictly better than leaving it and the state was
//! stored. Given a memo the recursion filled for the same problem, both test
//! the same thing; with a foreign or partial memo the sparse walk drops items
//! at states it never stored.

use crate::solver::memo::{Memo, State};
use crate::solver::problem::Problem;
use crate::solver::table::Table;

/// Walks the dense table from `(n, capacity)` and returns selected item
/// indices in ascending order.
pub fn backtrack(problem: &Problem, table: &Table) -> Vec<usize> {
    let mut selected = Vec::new();
    walk(problem, table, |_, item| {
        if let Some(item) = item {
            selected.push(item)
        }
    });
    selected.reverse();
    selected
}

/// Every state the dense walk passes through, starting at `(n, capacity)`
/// and ending at the base state where it stops.
pub fn backtrack_path(problem: &Problem, table: &Table) -> Vec<State> {
    let mut path = Vec::new();
    let end = walk(problem, table, |state, _| path.push(state));
    path.push(end);
    path
}

fn walk<F>(problem: &Problem, table: &Table, mut step: F) -> State
where
    F: FnMut(State, Option<usize>),
{
    let mut i = problem.len();
    let mut w = problem.capacity();
    while i > 0 && w > 0 {
        // If excluding item i - 1 would give the same value, it wasn't needed
        if table.get(i, w) != table.get(i - 1, w) {
            step((i, w), Some(i - 1));
            w -= problem.weights()[i - 1];
        } else {
            step((i, w), None);
        }
        i -= 1;
    }
    (i, w)
}

/// Walks a top-down memo from `(n, capacity)`.
///
/// States missing from the memo read as 0, and an item is only taken at a
/// state the recursion actually stored.
pub fn backtrack_sparse(problem: &Problem, memo: &Memo) -> Vec<usize> {
    let weights = problem.weights();
    let values = problem.values();
    let mut selected = Vec::new();
    let mut i = problem.len();
    let mut w = problem.capacity();

    while i > 0 && w > 0 {
        let not_pick = memo.get_or_zero((i - 1, w));
        let pick = if weights[i - 1] <= w {
            values[i - 1] + memo.get_or_zero((i - 1, w - weights[i - 1]))
        } else {
            0
        };

        if pick > not_pick && memo.contains((i, w)) {
            selected.push(i - 1);
            w -= weights[i - 1];
        }
        i -= 1;
    }

    selected.reverse();
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::memo::solve_topdown;
    use crate::solver::table::solve_bottomup;

    fn problem(weights: &[usize], values: &[usize], capacity: usize) -> Problem {
        Problem::new(weights.to_vec(), values.to_vec(), capacity).unwrap()
    }

    fn dense(p: &Problem) -> Vec<usize> {
        let (_, table) = solve_bottomup(p);
        backtrack(p, &table)
    }

    fn sparse(p: &Problem) -> Vec<usize> {
        let mut memo = Memo::new();
        solve_topdown(p, &mut memo);
        backtrack_sparse(p, &memo)
    }

    #[test]
    fn best_combination() {
        let p = problem(&[4, 2, 3], &[10, 4, 7], 5);
        assert_eq!(dense(&p), vec![1, 2]);
        assert_eq!(sparse(&p), vec![1, 2]);
    }

    #[test]
    fn all_items_fit() {
        let p = problem(&[1, 2, 3], &[10, 20, 30], 6);
        assert_eq!(dense(&p), vec![0, 1, 2]);
        assert_eq!(sparse(&p), vec![0, 1, 2]);
    }

    #[test]
    fn smaller_capacity() {
        let p = problem(&[1, 3, 4], &[1, 4, 5], 3);
        assert_eq!(dense(&p), vec![1]);
        assert_eq!(sparse(&p), vec![1]);
    }

    #[test]
    fn nothing_selected() {
        for p in [
            problem(&[10], &[100], 5),
            problem(&[1, 2, 3], &[10, 15, 40], 0),
            problem(&[], &[], 7),
        ] {
            assert!(dense(&p).is_empty());
            assert!(sparse(&p).is_empty());
        }
    }

    #[test]
    fn dense_tie_prefers_excluding_later_item() {
        // Either item alone is optimal; the dense walk sees row 2 equal to
        // row 1 and drops item 1.
        let p = problem(&[2, 2], &[5, 5], 3);
        assert_eq!(dense(&p), vec![0]);
    }

    #[test]
    fn sparse_tie_needs_strict_improvement() {
        // Item 0 is worth nothing, so picking it never beats leaving it.
        // The dense walk sees no change between rows and agrees here.
        let p = problem(&[1, 2], &[0, 5], 3);
        assert_eq!(sparse(&p), vec![1]);
        assert_eq!(dense(&p), vec![1]);
    }

    #[test]
    fn walks_agree_on_ties_with_own_memo() {
        // Every state on the sparse walk was stored by the recursion, so
        // "strictly better to pick" and "row value changed" coincide.
        let p = problem(&[2, 2], &[5, 5], 3);
        assert_eq!(sparse(&p), vec![0]);
        assert_eq!(dense(&p), sparse(&p));

        let p = problem(&[1, 1, 2], &[2, 2, 4], 2);
        assert_eq!(dense(&p), sparse(&p));
    }

    #[test]
    fn path_ends_at_a_base_state() {
        let p = problem(&[4, 2, 3], &[10, 4, 7], 5);
        let (_, table) = solve_bottomup(&p);
        assert_eq!(backtrack_path(&p, &table), vec![(3, 5), (2, 2), (1, 0)]);

        let p = problem(&[], &[], 3);
        let (_, table) = solve_bottomup(&p);
        assert_eq!(backtrack_path(&p, &table), vec![(0, 3)]);
    }

    #[test]
    fn unvisited_state_never_selects() {
        // A memo from a different capacity leaves (2, 3) unvisited.
        let p = problem(&[1, 2], &[4, 4], 3);
        let mut memo = Memo::new();
        solve_topdown(&problem(&[1, 2], &[4, 4], 1), &mut memo);
        assert!(!memo.contains((2, 3)));
        assert!(backtrack_sparse(&p, &memo).is_empty());
    }
}
