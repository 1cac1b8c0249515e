use crate::{canon::signature, expr::Expr, generate::generate, render::render};
use log::debug;
use std::{collections::BTreeSet, fmt::Display, rc::Rc};
use thiserror::Error;

pub const TARGET: i64 = 24;
pub const CARDS: usize = 4;
pub const MIN_CARD: i64 = 1;
pub const MAX_CARD: i64 = 13;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("expected 4 numbers, got {0}")]
    WrongCount(usize),
    #[error("{0} is outside 1..=13")]
    OutOfRange(i64),
}

/// Four validated cards and the value to reach.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Puzzle {
    cards: [i64; CARDS],
    target: i64,
    factorial: bool,
}

impl Puzzle {
    pub fn new(numbers: &[i64]) -> Result<Self, InputError> {
        let cards: [i64; CARDS] = numbers
            .try_into()
            .map_err(|_| InputError::WrongCount(numbers.len()))?;
        if let Some(&n) = cards.iter().find(|n| !(MIN_CARD..=MAX_CARD).contains(*n)) {
            return Err(InputError::OutOfRange(n));
        }
        Ok(Self {
            cards,
            target: TARGET,
            factorial: true,
        })
    }

    pub fn with_target(self, target: i64) -> Self {
        Self { target, ..self }
    }

    /// Restricts the search to the four binary operators.
    pub fn arithmetic_only(self) -> Self {
        Self {
            factorial: false,
            ..self
        }
    }

    pub fn cards(&self) -> [i64; CARDS] {
        self.cards
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    /// Every expression reaching the target, one per canonical signature.
    ///
    /// Orderings are visited in lexicographic order of the cards, so the
    /// result order is deterministic.
    pub fn solve(&self) -> Solutions {
        let target = self.target as f64;
        let mut order = self.cards;
        order.sort_unstable();
        let mut seen = BTreeSet::new();
        let mut items = Vec::new();
        let (mut orderings, mut candidates, mut hits) = (0usize, 0usize, 0usize);
        loop {
            orderings += 1;
            for candidate in generate(&order, self.factorial) {
                candidates += 1;
                if !candidate.value.approx_eq(target) {
                    continue;
                }
                hits += 1;
                let signature = signature(&candidate.expr);
                if seen.insert(signature.clone()) {
                    items.push(Solution::new(candidate.expr, signature));
                }
            }
            if !next_permutation(&mut order) {
                break;
            }
        }
        debug!(
            "{:?}: {orderings} orderings, {candidates} candidates, {hits} hits, {} distinct",
            self.cards,
            items.len()
        );
        Solutions { items }
    }
}

/// Validates four cards and solves for 24.
pub fn solve(numbers: &[i64]) -> Result<Solutions, InputError> {
    Ok(Puzzle::new(numbers)?.solve())
}

/// Rearranges into the next greater ordering; `false` once the last one is
/// reached.
fn next_permutation(xs: &mut [i64]) -> bool {
    let Some(i) = xs.windows(2).rposition(|w| w[0] < w[1]) else {
        return false;
    };
    let j = (i + 1..xs.len())
        .rev()
        .find(|&j| xs[j] > xs[i])
        .unwrap_or(i + 1);
    xs.swap(i, j);
    xs[i + 1..].reverse();
    true
}

#[derive(Clone, Debug)]
pub struct Solution {
    expr: Rc<Expr>,
    text: String,
    signature: String,
}

impl Solution {
    pub fn new(expr: Rc<Expr>, signature: String) -> Self {
        Self {
            text: expr.to_string(),
            expr,
            signature,
        }
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Fully parenthesized text, as generated.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn rendered(&self) -> String {
        render(&self.expr)
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Ranking key for display: factorial-free first, then fewest parentheses.
pub fn rank(text: &str) -> (bool, usize) {
    (text.contains('!'), text.matches('(').count())
}

/// Distinct solutions of one puzzle; empty when there is none.
#[derive(Clone, Debug, Default)]
pub struct Solutions {
    items: Vec<Solution>,
}

impl Solutions {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Solution> {
        self.items.iter()
    }

    /// The solution to show: lowest `rank`, earliest on ties.
    pub fn simplest(&self) -> Option<&Solution> {
        self.simplest_by(rank)
    }

    pub fn simplest_by<K: Ord>(&self, key: impl Fn(&str) -> K) -> Option<&Solution> {
        self.items.iter().min_by_key(|s| key(s.text()))
    }
}

impl FromIterator<Solution> for Solutions {
    fn from_iter<T: IntoIterator<Item = Solution>>(iter: T) -> Self {
        let mut seen = BTreeSet::new();
        Self {
            items: iter
                .into_iter()
                .filter(|s| seen.insert(s.signature.clone()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Solutions {
    type Item = &'a Solution;
    type IntoIter = std::slice::Iter<'a, Solution>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
