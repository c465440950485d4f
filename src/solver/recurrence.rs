use crate::solver::problem::Problem;

/// Optimal value of state `(i, w)` given a lookup for row `i - 1`.
///
/// `i` counts items considered, so the item decided here is `i - 1`.
/// Base states (`i == 0` or `w == 0`) are 0 and never hit `previous`.
pub fn state_value<F>(problem: &Problem, i: usize, w: usize, mut previous: F) -> usize
where
    F: FnMut(usize) -> usize,
{
    if i == 0 || w == 0 {
        return 0;
    }
    let item = problem.item(i - 1);

    // Not taking the item keeps the previous row's value at this weight
    let exclude = previous(w);
    match include_value(item.weight, item.value, w, &mut previous) {
        Some(include) => exclude.max(include),
        None => exclude,
    }
}

/// Value of taking an item of `weight`/`value` at capacity `w`, or `None`
/// when it doesn't fit.
pub fn include_value<F>(weight: usize, value: usize, w: usize, previous: F) -> Option<usize>
where
    F: FnOnce(usize) -> usize,
{
    if weight <= w {
        Some(previous(w - weight) + value)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_states_are_zero() {
        let problem = Problem::new(vec![1], vec![7], 4).unwrap();
        assert_eq!(state_value(&problem, 0, 4, |_| unreachable!()), 0);
        assert_eq!(state_value(&problem, 1, 0, |_| unreachable!()), 0);
    }

    #[test]
    fn heavy_item_only_excludes() {
        let problem = Problem::new(vec![5], vec![100], 4).unwrap();
        assert_eq!(state_value(&problem, 1, 4, |_| 3), 3);
        assert_eq!(include_value(5, 100, 4, |_| 0), None);
    }

    #[test]
    fn takes_the_better_branch() {
        let problem = Problem::new(vec![2], vec![10], 4).unwrap();
        // previous row: value w at weight w
        assert_eq!(state_value(&problem, 1, 4, |w| w), 12);
        assert_eq!(state_value(&problem, 1, 3, |w| w * 10), 30);
    }
}
