//! Solver for the 24 game.
//!
//! Given four cards in `1..=13`, [`solve()`] finds every expression over
//! `+ - * /` and postfix factorial that reaches 24, keeping one expression
//! per canonical signature (see [`canon`]). [`Solutions::simplest`] picks the
//! one to show, and [`render()`] prints it with as few parentheses as possible.

pub mod canon;
pub mod expr;
pub mod generate;
pub mod parse;
pub mod render;
pub mod solve;
pub mod value;

pub use canon::{signature, signature_of};
pub use expr::{Expr, Op, Priority};
pub use generate::{generate, Candidate};
pub use parse::{ParseError, Rule};
pub use render::{render, Pretty};
pub use solve::{rank, solve, InputError, Puzzle, Solution, Solutions, TARGET};
pub use value::{factorial, DomainError, Value};
