use crate::value::Value;
use std::{fmt::Display, rc::Rc};

/// Precedence class of a binary operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    Low,
    High,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    pub const ALL: [Op; 4] = [Op::Add, Op::Sub, Op::Mul, Op::Div];

    pub fn priority(self) -> Priority {
        match self {
            Op::Add | Op::Sub => Priority::Low,
            Op::Mul | Op::Div => Priority::High,
        }
    }

    /// `-` and `/`: the right operand enters its chain inverted.
    pub fn is_inverse(self) -> bool {
        matches!(self, Op::Sub | Op::Div)
    }

    pub fn symbol(self) -> char {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
            Op::Mul => '*',
            Op::Div => '/',
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Op::ALL
            .into_iter()
            .find(|op| symbol.len() == 1 && symbol.starts_with(op.symbol()))
    }

    /// `None` when dividing by a value within the zero guard.
    pub fn apply(self, lhs: Value, rhs: Value) -> Option<Value> {
        Some(match self {
            Op::Add => lhs + rhs,
            Op::Sub => lhs - rhs,
            Op::Mul => lhs * rhs,
            Op::Div => return lhs.checked_div(rhs),
        })
    }
}

impl Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Expression tree over integer literals.
///
/// Subtrees are immutable and may be shared between the many candidates the
/// generator builds from the same partial results.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Expr {
    Num(i64),
    Binary {
        op: Op,
        lhs: Rc<Expr>,
        rhs: Rc<Expr>,
    },
    Factorial(Rc<Expr>),
}

impl Expr {
    pub fn binary(op: Op, lhs: impl Into<Rc<Expr>>, rhs: impl Into<Rc<Expr>>) -> Self {
        Expr::Binary {
            op,
            lhs: lhs.into(),
            rhs: rhs.into(),
        }
    }

    pub fn factorial(operand: impl Into<Rc<Expr>>) -> Self {
        Expr::Factorial(operand.into())
    }

    pub fn op(&self) -> Option<Op> {
        match self {
            Expr::Binary { op, .. } => Some(*op),
            _ => None,
        }
    }

    /// Evaluates the tree; `None` if any division hits the zero guard or any
    /// factorial falls outside its domain.
    pub fn eval(&self) -> Option<Value> {
        match self {
            Expr::Num(n) => Some(Value::from(*n)),
            Expr::Binary { op, lhs, rhs } => op.apply(lhs.eval()?, rhs.eval()?),
            Expr::Factorial(operand) => operand.eval()?.factorial().ok(),
        }
    }

    pub fn has_factorial(&self) -> bool {
        match self {
            Expr::Num(_) => false,
            Expr::Binary { lhs, rhs, .. } => lhs.has_factorial() || rhs.has_factorial(),
            Expr::Factorial(_) => true,
        }
    }
}

/// Fully parenthesized form: every binary node is wrapped, `!` is postfix.
impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Num(n) => write!(f, "{n}"),
            Expr::Binary { op, lhs, rhs } => write!(f, "({lhs}{op}{rhs})"),
            Expr::Factorial(operand) => write!(f, "{operand}!"),
        }
    }
}
