use crate::expr::{Expr, Op};
use std::fmt::Display;

/// Minimal-parenthesis rendering of an expression.
///
/// Runs of `+` and of `*` are written flat. A child of any other node is
/// wrapped only when its operator binds looser than the parent's, or when it
/// is the right operand of `-` or `/` at the same precedence.
pub struct Pretty<'a>(pub &'a Expr);

pub fn render(expr: &Expr) -> String {
    Pretty(expr).to_string()
}

fn chain(expr: &Expr, op: Op) -> Vec<&Expr> {
    match expr {
        Expr::Binary { op: o, lhs, rhs } if *o == op => {
            let mut terms = chain(lhs, op);
            terms.extend(chain(rhs, op));
            terms
        }
        _ => vec![expr],
    }
}

fn needs_parens(parent: Op, child: &Expr, right: bool) -> bool {
    child.op().is_some_and(|child| {
        child.priority() < parent.priority()
            || (right && child.priority() == parent.priority() && parent.is_inverse())
    })
}

fn write_operand(
    f: &mut std::fmt::Formatter<'_>,
    parent: Op,
    child: &Expr,
    right: bool,
) -> std::fmt::Result {
    if needs_parens(parent, child, right) {
        write!(f, "({})", Pretty(child))
    } else {
        write!(f, "{}", Pretty(child))
    }
}

impl Display for Pretty<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Expr::Num(n) => write!(f, "{n}"),
            Expr::Binary {
                op: op @ (Op::Add | Op::Mul),
                ..
            } => {
                for (i, term) in chain(self.0, *op).into_iter().enumerate() {
                    if i > 0 {
                        write!(f, "{op}")?;
                    }
                    write_operand(f, *op, term, false)?;
                }
                Ok(())
            }
            Expr::Binary { op, lhs, rhs } => {
                write_operand(f, *op, lhs, false)?;
                write!(f, "{op}")?;
                write_operand(f, *op, rhs, true)
            }
            Expr::Factorial(operand) => match operand.as_ref() {
                Expr::Binary { .. } => write!(f, "({})!", Pretty(operand)),
                _ => write!(f, "{}!", Pretty(operand)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::generate;
    use proptest::prelude::*;

    fn pretty(text: &str) -> String {
        render(&text.parse().unwrap())
    }

    #[test]
    fn flattens_runs() {
        assert_eq!(pretty("((1+2)+(3+4))"), "1+2+3+4");
        assert_eq!(pretty("(2*(3*4))"), "2*3*4");
        assert_eq!(pretty("((1-2)+3)"), "1-2+3");
        assert_eq!(pretty("(1+(2-3))"), "1+2-3");
    }

    #[test]
    fn keeps_needed_parens() {
        assert_eq!(pretty("(1-(2-3))"), "1-(2-3)");
        assert_eq!(pretty("(8/(4/2))"), "8/(4/2)");
        assert_eq!(pretty("(8/(4*2))"), "8/(4*2)");
        assert_eq!(pretty("((1+2)*3)"), "(1+2)*3");
        assert_eq!(pretty("(3*(1-2))"), "3*(1-2)");
        assert_eq!(pretty("(8/(3-(8/3)))"), "8/(3-8/3)");
        assert_eq!(pretty("((4-(10/10))*4)"), "(4-10/10)*4");
        assert_eq!(pretty("((1-2)-3)"), "1-2-3");
    }

    #[test]
    fn factorial_operand() {
        assert_eq!(pretty("3!"), "3!");
        assert_eq!(pretty("(((1+1)+1)+1)!"), "(1+1+1+1)!");
        assert_eq!(pretty("((1+2)!*4)"), "(1+2)!*4");
        assert_eq!(pretty("(4-3!)"), "4-3!");
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-6 * a.abs().max(1.0)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn rendering_round_trips(
            cards in prop::collection::vec(1i64..=13, 3),
            pick in any::<prop::sample::Index>(),
        ) {
            let candidates = generate(&cards, true);
            let candidate = &candidates[pick.index(candidates.len())];
            let text = render(&candidate.expr);
            let reparsed: Expr = text.parse().unwrap();
            let value = reparsed.eval().map(|v| v.as_f64());
            prop_assert!(
                value.is_some_and(|v| close(v, candidate.value.as_f64())),
                "{} -> {} = {:?}, expected {}", candidate.expr, text, value, candidate.value
            );
        }
    }
}
