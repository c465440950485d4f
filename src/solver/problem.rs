use std::num::ParseIntError;
use thiserror::Error;

// Pre-emptively catch large instances before allocating a table
pub const MAX_STATES: usize = 1_000_000;

#[derive(Debug, Error)]
pub enum ProblemError {
    #[error("weights and values differ in length, {weights} vs {values}")]
    LengthMismatch { weights: usize, values: usize },
    #[error("{field} of item {index} is negative: {value}")]
    NegativeItem {
        field: &'static str,
        index: usize,
        value: i64,
    },
    #[error("capacity is negative: {0}")]
    NegativeCapacity(i64),
    #[error("missing {0}")]
    Missing(&'static str),
    #[error("line {line}: expected `id value weight`, got {text:?}")]
    MalformedItem { line: usize, text: String },
    #[error("line {line}: item id {id} out of order")]
    ItemOrder { line: usize, id: usize },
    #[error("problem has {states} states, limit is {limit}")]
    TooLarge { states: usize, limit: usize },
    #[error("parse error: {0}")]
    Parse(#[from] ParseIntError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: usize,
    pub value: usize,
    pub weight: usize,
}

/// A 0/1 knapsack instance. Weights and values are parallel, index `i` in
/// both refers to item `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    weights: Vec<usize>,
    values: Vec<usize>,
    capacity: usize,
}

impl Problem {
    pub fn new(
        weights: Vec<usize>,
        values: Vec<usize>,
        capacity: usize,
    ) -> Result<Problem, ProblemError> {
        if weights.len() != values.len() {
            return Err(ProblemError::LengthMismatch {
                weights: weights.len(),
                values: values.len(),
            });
        }
        Ok(Problem {
            weights,
            values,
            capacity,
        })
    }

    /// Builds a problem from signed input, rejecting negative numbers with
    /// the offending field and item index.
    pub fn from_signed(
        weights: &[i64],
        values: &[i64],
        capacity: i64,
    ) -> Result<Problem, ProblemError> {
        let capacity =
            usize::try_from(capacity).map_err(|_| ProblemError::NegativeCapacity(capacity))?;
        let weights = unsigned("weight", weights)?;
        let values = unsigned("value", values)?;
        Problem::new(weights, values, capacity)
    }

    /// Reads the format written by `generate`:
    /// the item count, one `id value weight` line per item, then the capacity.
    pub fn read<F: std::io::BufRead>(input: F) -> Result<Problem, ProblemError> {
        let mut lines = input
            .lines()
            .enumerate()
            .filter(|(_, l)| l.as_ref().map_or(true, |l| !l.trim().is_empty()));

        let item_count = match lines.next() {
            Some((_, token)) => token?.trim().parse::<usize>()?,
            None => return Err(ProblemError::Missing("item count")),
        };

        let mut weights = Vec::with_capacity(item_count);
        let mut values = Vec::with_capacity(item_count);
        for index in 0..item_count {
            let (line, text) = match lines.next() {
                Some((line, text)) => (line + 1, text?),
                None => return Err(ProblemError::Missing("item line")),
            };
            let tokens: Vec<&str> = text.split_whitespace().collect();
            if tokens.len() != 3 {
                return Err(ProblemError::MalformedItem { line, text });
            }
            let id = tokens[0].parse::<usize>()?;
            if id != index {
                return Err(ProblemError::ItemOrder { line, id });
            }
            values.push(tokens[1].parse::<i64>()?);
            weights.push(tokens[2].parse::<i64>()?);
        }

        let capacity = match lines.next() {
            Some((_, token)) => token?.trim().parse::<i64>()?,
            None => return Err(ProblemError::Missing("capacity")),
        };

        Problem::from_signed(&weights, &values, capacity)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn weights(&self) -> &[usize] {
        &self.weights
    }

    pub fn values(&self) -> &[usize] {
        &self.values
    }

    pub fn item(&self, index: usize) -> Item {
        Item {
            id: index,
            value: self.values[index],
            weight: self.weights[index],
        }
    }

    pub fn items(&self) -> impl Iterator<Item = Item> + '_ {
        (0..self.len()).map(|index| self.item(index))
    }

    /// Number of (items, capacity) states, (n + 1) * (capacity + 1).
    pub fn state_count(&self) -> usize {
        (self.len() + 1).saturating_mul(self.capacity.saturating_add(1))
    }

    pub fn check_state_limit(&self, limit: usize) -> Result<(), ProblemError> {
        let states = self.state_count();
        if states > limit {
            return Err(ProblemError::TooLarge { states, limit });
        }
        Ok(())
    }
}

fn unsigned(field: &'static str, numbers: &[i64]) -> Result<Vec<usize>, ProblemError> {
    numbers
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            usize::try_from(value).map_err(|_| ProblemError::NegativeItem {
                field,
                index,
                value,
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub value: usize,
    pub weight: usize,
    /// Selected item indices, ascending.
    pub items: Vec<usize>,
}

impl Solution {
    pub fn from_items(problem: &Problem, items: Vec<usize>) -> Solution {
        let value = items.iter().map(|&i| problem.values[i]).sum();
        let weight = items.iter().map(|&i| problem.weights[i]).sum();
        Solution {
            value,
            weight,
            items,
        }
    }

    pub fn validate(&self, problem: &Problem) -> bool {
        let mut value_sum = 0;
        let mut weight_sum = 0;
        let mut valid = true;

        if !self.items.windows(2).all(|pair| pair[0] < pair[1]) {
            log::error!("Solution::validate, items not strictly ascending: {:?}", self.items);
            valid = false;
        }

        for &index in &self.items {
            if index >= problem.len() {
                log::error!(
                    "Solution::validate, item {} out of range for {} items",
                    index,
                    problem.len()
                );
                return false;
            }
            value_sum += problem.values[index];
            weight_sum += problem.weights[index];
        }

        if value_sum != self.value {
            log::error!(
                "Solution::validate, value does not match! {} vs {}",
                value_sum,
                self.value
            );
            valid = false;
        }
        if weight_sum != self.weight {
            log::error!(
                "Solution::validate, weight does not match! {} vs {}",
                weight_sum,
                self.weight
            );
            valid = false;
        }
        if weight_sum > problem.capacity {
            log::error!(
                "Solution::validate, weight {} exceeds capacity {}",
                weight_sum,
                problem.capacity
            );
            valid = false;
        }

        valid
    }
}
