use crate::expr::{Expr, Op};
use pest::{
    iterators::{Pair, Pairs},
    Parser,
};
use pest_derive::Parser;
use std::str::FromStr;
use thiserror::Error;

#[derive(Parser)]
#[grammar = "expr.pest"]
pub struct ExprParser;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Parse error: {0}")]
    Syntax(#[from] Box<pest::error::Error<Rule>>),
    #[error("Literal out of range: {0}")]
    Literal(String),
    #[error("Unexpected {0:?}")]
    Unexpected(Rule),
    #[error("Empty input")]
    EmptyInput,
}

impl FromStr for Expr {
    type Err = ParseError;

    /// Parses the usual infix grammar: `+ -` bind looser than `* /`, both
    /// left-associative, with postfix `!` binding tightest.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut pairs = ExprParser::parse(Rule::expression, s).map_err(Box::new)?;
        build(expect(&mut pairs)?)
    }
}

fn expect<'i>(pairs: &mut Pairs<'i, Rule>) -> Result<Pair<'i, Rule>, ParseError> {
    pairs.next().ok_or(ParseError::EmptyInput)
}

fn build(pair: Pair<Rule>) -> Result<Expr, ParseError> {
    match pair.as_rule() {
        Rule::sum | Rule::product => {
            let mut inner = pair.into_inner();
            let mut acc = build(expect(&mut inner)?)?;
            while let Some(op) = inner.next() {
                let op = Op::from_symbol(op.as_str()).ok_or(ParseError::Unexpected(op.as_rule()))?;
                let rhs = build(expect(&mut inner)?)?;
                acc = Expr::binary(op, acc, rhs);
            }
            Ok(acc)
        }
        Rule::postfix => {
            let mut inner = pair.into_inner();
            let operand = build(expect(&mut inner)?)?;
            Ok(inner.fold(operand, |acc, _| Expr::factorial(acc)))
        }
        Rule::number => pair
            .as_str()
            .parse()
            .map(Expr::Num)
            .map_err(|_| ParseError::Literal(pair.as_str().to_owned())),
        rule => Err(ParseError::Unexpected(rule)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Expr {
        s.parse().unwrap()
    }

    #[test]
    fn literal() {
        assert_eq!(parse("13"), Expr::Num(13));
        assert_eq!(parse(" ( 7 ) "), Expr::Num(7));
    }

    #[test]
    fn precedence_and_associativity() {
        assert_eq!(parse("1+2*3").to_string(), "(1+(2*3))");
        assert_eq!(parse("1-2-3").to_string(), "((1-2)-3)");
        assert_eq!(parse("8/4/2").to_string(), "((8/4)/2)");
        assert_eq!(parse("(1+2)*3").to_string(), "((1+2)*3)");
    }

    #[test]
    fn postfix_factorial() {
        assert_eq!(parse("3!"), Expr::factorial(Expr::Num(3)));
        assert_eq!(parse("2*3!").to_string(), "(2*3!)");
        assert_eq!(parse("(1+2)!").to_string(), "(1+2)!");
        assert_eq!(parse("3!!").to_string(), "3!!");
    }

    #[test]
    fn generated_text_round_trips() {
        for text in ["((4-(10/10))*4)", "(((1+1)+1)+1)!", "(3!*(2+2))"] {
            assert_eq!(parse(text).to_string(), text);
        }
    }

    #[test]
    fn rejects_malformed() {
        assert!(matches!("1+".parse::<Expr>(), Err(ParseError::Syntax(_))));
        assert!(matches!("(1+2".parse::<Expr>(), Err(ParseError::Syntax(_))));
        assert!(matches!("".parse::<Expr>(), Err(ParseError::Syntax(_))));
        assert!(matches!("1 2".parse::<Expr>(), Err(ParseError::Syntax(_))));
        assert!(matches!("x".parse::<Expr>(), Err(ParseError::Syntax(_))));
        assert!(matches!(
            "99999999999999999999".parse::<Expr>(),
            Err(ParseError::Literal(_))
        ));
    }
}
