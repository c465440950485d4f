use crate::solver::problem::*;
use crate::solver::recurrence::state_value;

/// Dense `(n + 1) x (capacity + 1)` state table, row-major by item count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    data: Vec<usize>,
    width: usize,
}

impl Table {
    fn new(width: usize, height: usize) -> Table {
        Table {
            data: vec![0; width * height],
            width,
        }
    }

    fn index(&self, i: usize, w: usize) -> usize {
        i * self.width + w
    }

    /// Optimal value using the first `i` items at capacity `w`.
    pub fn get(&self, i: usize, w: usize) -> usize {
        self.data[self.index(i, w)]
    }

    fn set(&mut self, i: usize, w: usize, v: usize) {
        let index = self.index(i, w);
        self.data[index] = v
    }

    pub fn row(&self, i: usize) -> &[usize] {
        let start = self.index(i, 0);
        &self.data[start..start + self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[usize]> + '_ {
        self.data.chunks(self.width)
    }

    /// Number of capacity columns, `capacity + 1`.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of item rows, `n + 1`.
    pub fn height(&self) -> usize {
        self.data.len() / self.width
    }

    pub fn max(&self) -> usize {
        self.data.iter().copied().max().unwrap_or(0)
    }

    /// The final state `(n, capacity)`.
    pub fn last(&self) -> usize {
        self.data.last().copied().unwrap_or(0)
    }
}

/// Fills every state in ascending row then column order and returns the
/// value of `(n, capacity)` together with the table.
pub fn solve_bottomup(problem: &Problem) -> (usize, Table) {
    let width = problem.capacity() + 1;
    let height = problem.len() + 1;
    let mut table = Table::new(width, height);

    // Row 0 and column 0 stay zero from allocation
    for i in 1..height {
        for w in 1..width {
            // Only row i - 1 is ever read
            let value = state_value(problem, i, w, |w| table.get(i - 1, w));
            table.set(i, w, value);
        }
    }

    log::debug!(
        "bottom-up: value {}, {} states computed",
        table.last(),
        table.data.len()
    );
    (table.last(), table)
}

pub fn solve(problem: &Problem) -> (Solution, Table) {
    let (value, table) = solve_bottomup(problem);
    let items = crate::solver::backtrack::backtrack(problem, &table);
    let solution = Solution::from_items(problem, items);
    debug_assert_eq!(solution.value, value);
    (solution, table)
}
