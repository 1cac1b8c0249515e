use std::{
    fmt::Display,
    ops::{Add, Mul, Sub},
};
use thiserror::Error;

/// Divisors smaller than this in magnitude prune the branch.
pub const ZERO_GUARD: f64 = 1e-8;

/// Maximum distance from the target for a value to count as a hit.
pub const TOLERANCE: f64 = 1e-6;

pub const MAX_FACTORIAL: i128 = 10;

#[derive(Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("factorial of non-integer {0}")]
    NotInteger(f64),
    #[error("factorial of {0} is outside 0..=10")]
    OutOfRange(i128),
}

/// Factorial of a small non-negative integer; `0! = 1`.
pub fn factorial(n: i128) -> Result<i128, DomainError> {
    if !(0..=MAX_FACTORIAL).contains(&n) {
        return Err(DomainError::OutOfRange(n));
    }
    Ok((1..=n).product())
}

/// Result of evaluating an expression.
///
/// Sums, differences and products of integers stay integral; any quotient is
/// real, and so is anything computed from a real. Only integral values are
/// ever offered a factorial.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    Int(i128),
    Real(f64),
}

impl Value {
    pub fn as_f64(self) -> f64 {
        match self {
            Value::Int(n) => n as f64,
            Value::Real(x) => x,
        }
    }

    pub fn is_int(self) -> bool {
        matches!(self, Value::Int(_))
    }

    /// `None` when the divisor is too close to zero.
    pub fn checked_div(self, rhs: Self) -> Option<Self> {
        let divisor = rhs.as_f64();
        if divisor.abs() < ZERO_GUARD {
            return None;
        }
        Some(Value::Real(self.as_f64() / divisor))
    }

    pub fn approx_eq(self, target: f64) -> bool {
        (self.as_f64() - target).abs() < TOLERANCE
    }

    pub fn factorial(self) -> Result<Self, DomainError> {
        match self {
            Value::Int(n) => factorial(n).map(Value::Int),
            Value::Real(x) => Err(DomainError::NotInteger(x)),
        }
    }

    fn combine(
        self,
        rhs: Self,
        exact: fn(i128, i128) -> Option<i128>,
        real: fn(f64, f64) -> f64,
    ) -> Self {
        match (self, rhs) {
            (Value::Int(a), Value::Int(b)) => exact(a, b)
                .map(Value::Int)
                .unwrap_or_else(|| Value::Real(real(a as f64, b as f64))),
            (lhs, rhs) => Value::Real(real(lhs.as_f64(), rhs.as_f64())),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value.into())
    }
}

impl Add for Value {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.combine(rhs, i128::checked_add, |a, b| a + b)
    }
}

impl Sub for Value {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.combine(rhs, i128::checked_sub, |a, b| a - b)
    }
}

impl Mul for Value {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.combine(rhs, i128::checked_mul, |a, b| a * b)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Real(x) => write!(f, "{x}"),
        }
    }
}
