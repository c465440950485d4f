use crate::solver::problem::*;
use crate::solver::recurrence::state_value;
use std::collections::HashMap;

/// `(items considered, capacity remaining)`
pub type State = (usize, usize);

/// Lazily filled state values from a top-down solve. Only states the
/// descent actually visited are present, base states never are.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Memo {
    values: HashMap<State, usize>,
}

impl Memo {
    pub fn new() -> Memo {
        Memo::default()
    }

    pub fn get(&self, state: State) -> Option<usize> {
        self.values.get(&state).copied()
    }

    /// Missing states read as 0. Only safe along a traced optimal path.
    pub fn get_or_zero(&self, state: State) -> usize {
        self.get(state).unwrap_or(0)
    }

    pub fn contains(&self, state: State) -> bool {
        self.values.contains_key(&state)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (State, usize)> + '_ {
        self.values.iter().map(|(&state, &value)| (state, value))
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

/// Evaluates `value(n, capacity)` by memoized descent, filling `memo`.
///
/// The descent keeps its own stack of pending states rather than recursing,
/// so depth is bounded by memory, not by the thread stack. A state is
/// evaluated only once both of its children are in `memo` (or are base
/// states), and at most once overall; entries already in `memo` are
/// trusted, so pass a fresh memo unless resuming the same problem.
pub fn solve_topdown(problem: &Problem, memo: &mut Memo) -> usize {
    let value = visit(problem, problem.len(), problem.capacity(), memo);
    log::debug!(
        "top-down: value {}, {} of {} states computed",
        value,
        memo.len(),
        problem.state_count()
    );
    value
}

fn is_base((i, w): State) -> bool {
    i == 0 || w == 0
}

fn visit(problem: &Problem, i: usize, w: usize, memo: &mut Memo) -> usize {
    if is_base((i, w)) {
        return 0;
    }

    let mut pending: Vec<State> = vec![(i, w)];
    while let Some(&(i, w)) = pending.last() {
        if memo.contains((i, w)) {
            pending.pop();
            continue;
        }

        // Descend into children that still need a value
        let item = problem.item(i - 1);
        let exclude = (i - 1, w);
        let include = (item.weight <= w).then(|| (i - 1, w - item.weight));
        let mut waiting = false;
        for child in std::iter::once(exclude).chain(include) {
            if !is_base(child) && !memo.contains(child) {
                pending.push(child);
                waiting = true;
            }
        }
        if waiting {
            continue;
        }

        let value = state_value(problem, i, w, |w| memo.get_or_zero((i - 1, w)));
        memo.values.insert((i, w), value);
        pending.pop();
    }

    memo.get_or_zero((i, w))
}

pub fn solve(problem: &Problem) -> (Solution, Memo) {
    let mut memo = Memo::new();
    let value = solve_topdown(problem, &mut memo);
    let items = crate::solver::backtrack::backtrack_sparse(problem, &memo);
    let solution = Solution::from_items(problem, items);
    debug_assert_eq!(solution.value, value);
    (solution, memo)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problem(weights: &[usize], values: &[usize], capacity: usize) -> Problem {
        Problem::new(weights.to_vec(), values.to_vec(), capacity).unwrap()
    }

    #[test]
    fn concrete_scenarios() {
        let mut memo = Memo::new();
        assert_eq!(solve_topdown(&problem(&[1, 3, 4], &[1, 4, 5], 3), &mut memo), 4);
        let mut memo = Memo::new();
        assert_eq!(solve_topdown(&problem(&[4, 2, 3], &[10, 4, 7], 5), &mut memo), 11);
        let mut memo = Memo::new();
        assert_eq!(solve_topdown(&problem(&[1, 2, 3], &[10, 20, 30], 6), &mut memo), 60);
        let mut memo = Memo::new();
        assert_eq!(solve_topdown(&problem(&[10], &[100], 5), &mut memo), 0);
    }

    #[test]
    fn empty_and_zero_capacity() {
        let mut memo = Memo::new();
        assert_eq!(solve_topdown(&problem(&[], &[], 10), &mut memo), 0);
        assert!(memo.is_empty());

        let mut memo = Memo::new();
        assert_eq!(solve_topdown(&problem(&[1, 2, 3], &[10, 15, 40], 0), &mut memo), 0);
        assert!(memo.is_empty());
    }

    #[test]
    fn visits_only_reachable_states() {
        // Item 2 never fits, so row 2 is only reached at w = 3.
        let p = problem(&[1, 3, 4], &[1, 4, 5], 3);
        let mut memo = Memo::new();
        solve_topdown(&p, &mut memo);

        let mut states: Vec<State> = memo.iter().map(|(state, _)| state).collect();
        states.sort_unstable();
        assert_eq!(states, vec![(1, 3), (2, 3), (3, 3)]);
        assert_eq!(memo.get((3, 3)), Some(4));
        assert_eq!(memo.get((2, 3)), Some(4));
        assert_eq!(memo.get((1, 3)), Some(1));
        assert!(memo.len() < p.state_count());
    }

    #[test]
    fn memo_entries_are_reused() {
        let p = problem(&[2, 3, 4, 5, 6], &[3, 4, 8, 8, 10], 20);
        let mut memo = Memo::new();
        let first = solve_topdown(&p, &mut memo);
        let filled = memo.len();

        // A second pass over a filled memo is a single lookup.
        assert_eq!(solve_topdown(&p, &mut memo), first);
        assert_eq!(memo.len(), filled);
        assert_eq!(first, 33);
    }

    #[test]
    fn many_items_do_not_exhaust_the_stack() {
        let p = problem(&vec![1; 400_000], &vec![1; 400_000], 1);
        assert!(p.check_state_limit(MAX_STATES).is_ok());

        let mut memo = Memo::new();
        assert_eq!(solve_topdown(&p, &mut memo), 1);
        assert_eq!(memo.len(), 400_000);

        let (solution, _) = solve(&p);
        assert_eq!(solution.items, vec![0]);
    }

    #[test]
    fn zero_weight_item_descends_once() {
        // Both branches of item 0 land on base state (0, 2). Capacity 0 is a
        // base state too, so taking item 1 leaves no room for item 0.
        let p = problem(&[0, 2], &[3, 4], 2);
        let mut memo = Memo::new();
        assert_eq!(solve_topdown(&p, &mut memo), 4);
        let mut states: Vec<State> = memo.iter().map(|(state, _)| state).collect();
        states.sort_unstable();
        assert_eq!(states, vec![(1, 2), (2, 2)]);
    }

    #[test]
    fn solve_reconstructs_selection() {
        let (solution, memo) = solve(&problem(&[4, 2, 3], &[10, 4, 7], 5));
        assert_eq!(solution.value, 11);
        assert_eq!(solution.items, vec![1, 2]);
        assert_eq!(solution.weight, 5);
        assert!(!memo.is_empty());
    }
}
