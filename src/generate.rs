use crate::{
    expr::{Expr, Op},
    value::Value,
};
use std::rc::Rc;

/// A generated expression together with its value.
#[derive(Clone, Debug)]
pub struct Candidate {
    pub expr: Rc<Expr>,
    pub value: Value,
}

impl Candidate {
    fn new(expr: Expr, value: Value) -> Self {
        Self {
            expr: expr.into(),
            value,
        }
    }

    /// Factorial extension of this candidate, if its value admits one.
    fn factorial(&self) -> Option<Self> {
        let value = self.value.factorial().ok()?;
        Some(Self::new(Expr::factorial(self.expr.clone()), value))
    }
}

/// Enumerates every expression over `numbers` in the given order.
///
/// Each split point divides the sequence into a prefix and a suffix, every
/// pair of results from the two sides is joined with every operator, and any
/// integral result in `0..=10` is offered once more under a factorial. With
/// `factorial` off only the four operators are used.
pub fn generate(numbers: &[i64], factorial: bool) -> Vec<Candidate> {
    match numbers {
        [] => Vec::new(),
        [n] => leaf(*n, factorial),
        _ => (1..numbers.len())
            .flat_map(|i| {
                combine(
                    &generate(&numbers[..i], factorial),
                    &generate(&numbers[i..], factorial),
                    factorial,
                )
            })
            .collect(),
    }
}

fn leaf(n: i64, factorial: bool) -> Vec<Candidate> {
    let plain = Candidate::new(Expr::Num(n), Value::from(n));
    // 1! and 2! equal their operand and are not offered; 0! is.
    let extended = plain
        .factorial()
        .filter(|f| factorial && f.value != plain.value);
    [Some(plain), extended].into_iter().flatten().collect()
}

fn combine(lefts: &[Candidate], rights: &[Candidate], factorial: bool) -> Vec<Candidate> {
    let mut out = Vec::with_capacity(lefts.len() * rights.len() * Op::ALL.len());
    for lhs in lefts {
        for rhs in rights {
            for op in Op::ALL {
                let Some(value) = op.apply(lhs.value, rhs.value) else {
                    continue;
                };
                let candidate =
                    Candidate::new(Expr::binary(op, lhs.expr.clone(), rhs.expr.clone()), value);
                let extended = candidate.factorial().filter(|_| factorial);
                out.push(candidate);
                out.extend(extended);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(candidates: &[Candidate]) -> Vec<String> {
        candidates.iter().map(|c| c.expr.to_string()).collect()
    }

    #[test]
    fn leaf_factorial_asymmetry() {
        assert_eq!(texts(&generate(&[0], true)), ["0", "0!"]);
        assert_eq!(texts(&generate(&[1], true)), ["1"]);
        assert_eq!(texts(&generate(&[2], true)), ["2"]);
        assert_eq!(texts(&generate(&[3], true)), ["3", "3!"]);
        assert_eq!(texts(&generate(&[10], true)), ["10", "10!"]);
        assert_eq!(texts(&generate(&[11], true)), ["11"]);
        assert_eq!(texts(&generate(&[3], false)), ["3"]);
    }

    #[test]
    fn pair_enumeration() {
        let got = texts(&generate(&[2, 3], true));
        assert_eq!(
            got,
            [
                "(2+3)", "(2+3)!", "(2-3)", "(2*3)", "(2*3)!", "(2/3)", "(2+3!)", "(2+3!)!",
                "(2-3!)", "(2*3!)", "(2/3!)",
            ]
        );
        assert_eq!(generate(&[2, 3], false).len(), 4);
    }

    #[test]
    fn quotients_never_take_factorial() {
        let got = texts(&generate(&[8, 2], true));
        assert!(got.contains(&"(8/2)".to_owned()));
        assert!(!got.contains(&"(8/2)!".to_owned()));
    }

    #[test]
    fn every_split_is_visited() {
        let got = texts(&generate(&[1, 2, 3], false));
        assert!(got.contains(&"(1+(2+3))".to_owned()));
        assert!(got.contains(&"((1+2)+3)".to_owned()));
        // 4 ops over 2 splits, each side of size two yielding 4
        assert_eq!(got.len(), 2 * 4 * 4);
    }

    #[test]
    fn values_match_trees() {
        for c in generate(&[4, 4, 10, 10], true) {
            assert_eq!(c.expr.eval(), Some(c.value), "{}", c.expr);
        }
    }

    #[test]
    fn no_divisor_is_zero() {
        fn check(e: &Expr) {
            match e {
                Expr::Num(_) => {}
                Expr::Binary { op, lhs, rhs } => {
                    if *op == Op::Div {
                        let divisor = rhs.eval().map(Value::as_f64).unwrap_or(f64::NAN);
                        assert!(divisor.abs() >= crate::value::ZERO_GUARD);
                    }
                    check(lhs);
                    check(rhs);
                }
                Expr::Factorial(operand) => check(operand),
            }
        }
        for c in generate(&[1, 1, 2, 2], true) {
            check(&c.expr);
        }
    }
}
