use super::lexer::Token;
use crate::roll::RollError;
use thiserror::Error;

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum ParseError {
    #[error("{0:?} is not part of a valid dice string")]
    InvalidCharacter(char),
    #[error("{0} is too large to be a dice number")]
    NumberTooLarge(String),
    #[error("invalid die format: a lone term must be a number")]
    InvalidDieFormat,
    #[error("invalid die symbol: expected 'd'")]
    InvalidDieSymbol,
    #[error("invalid number of sides marker: expected a number after 'd'")]
    InvalidSidesMarker,
    #[error("invalid number of dice: expected a number before 'd'")]
    InvalidNumberOfDice,
    #[error("invalid number of sides: expected a number after 'd'")]
    InvalidNumberOfSides,
    #[error("dice must have at least one side")]
    ZeroSides,
    #[error("parentheses may only wrap a single level of signed terms")]
    InvalidParenthesis,
    #[error("invalid die {:?}", fmt_tokens(.0))]
    InvalidDie(Vec<Token>),
    #[error(transparent)]
    Roll(#[from] RollError),
}

fn fmt_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
