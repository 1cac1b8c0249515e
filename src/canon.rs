//! Canonical signatures used to deduplicate solutions.
//!
//! A maximal `+`/`-` chain is flattened into the terms it adds and the terms
//! it subtracts; a `*`/`/` chain likewise into multiplied and divided terms.
//! Both lists are sorted, so commuting or re-associating inside a chain does
//! not change the signature. A chain nested under the other operator class
//! is an opaque term with its own signature.

use crate::expr::{Expr, Priority};
use log::warn;

pub fn signature(expr: &Expr) -> String {
    match expr {
        Expr::Num(n) => n.to_string(),
        Expr::Factorial(operand) => format!("fact({})", signature(operand)),
        Expr::Binary { op, .. } => {
            let priority = op.priority();
            let (mut direct, mut inverse) = collect(expr, priority);
            direct.sort();
            inverse.sort();
            let name = match priority {
                Priority::Low => "addsub",
                Priority::High => "muldiv",
            };
            format!("{name}({}|{})", direct.join("_"), inverse.join("_"))
        }
    }
}

/// Signature of an expression given as text.
///
/// Text that does not parse is its own signature.
pub fn signature_of(text: &str) -> String {
    match text.parse::<Expr>() {
        Ok(expr) => signature(&expr),
        Err(error) => {
            warn!("cannot canonicalize {text:?}, keeping it verbatim: {error}");
            text.to_owned()
        }
    }
}

fn collect(expr: &Expr, priority: Priority) -> (Vec<String>, Vec<String>) {
    match expr {
        Expr::Binary { op, lhs, rhs } if op.priority() == priority => {
            let (mut direct, mut inverse) = collect(lhs, priority);
            let (rhs_direct, rhs_inverse) = collect(rhs, priority);
            if op.is_inverse() {
                direct.extend(rhs_inverse);
                inverse.extend(rhs_direct);
            } else {
                direct.extend(rhs_direct);
                inverse.extend(rhs_inverse);
            }
            (direct, inverse)
        }
        _ => (vec![signature(expr)], Vec::new()),
    }
}
