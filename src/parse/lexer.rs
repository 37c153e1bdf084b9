use super::error::ParseError;
use crate::common::{Sign, UInt};
use logos::Logos;
use std::fmt;

#[derive(Logos, Debug, Copy, Clone, Eq, PartialEq)]
enum TokenKind {
    #[regex(r"[0-9]+")]
    Number,

    #[token("d")]
    #[token("D")]
    DieMarker,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,

    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,

    #[regex(r"[ \t\r\n\f\v]+", logos::skip)]
    #[error]
    Error,
}

/// A lexical unit of dice notation.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Token {
    DieMarker,
    Sign(Sign),
    Number(UInt),
    LeftParen,
    RightParen,
}

impl Token {
    /// Whether this token ends a term.
    pub const fn is_separator(&self) -> bool {
        matches!(self, Self::Sign(_) | Self::LeftParen | Self::RightParen)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DieMarker => f.write_str("d"),
            Self::Sign(sign) => fmt::Display::fmt(sign, f),
            Self::Number(n) => fmt::Display::fmt(n, f),
            Self::LeftParen => f.write_str("("),
            Self::RightParen => f.write_str(")"),
        }
    }
}

/// Splits dice notation into tokens. Whitespace is dropped; runs of digits
/// become a single [`Token::Number`]. Parentheses are only accepted so that a
/// grouped negative part like `d20 - (d8 + d6)` reads back in.
pub fn tokenize(text: &str) -> Result<Vec<Token>, ParseError> {
    let mut lexer = TokenKind::lexer(text);
    let mut tokens = Vec::new();
    while let Some(kind) = lexer.next() {
        let token = match kind {
            TokenKind::Number => {
                let digits = lexer.slice();
                let n = digits
                    .parse()
                    .map_err(|_| ParseError::NumberTooLarge(digits.to_owned()))?;
                Token::Number(n)
            }
            TokenKind::DieMarker => Token::DieMarker,
            TokenKind::Plus => Token::Sign(Sign::Plus),
            TokenKind::Minus => Token::Sign(Sign::Minus),
            TokenKind::LeftParen => Token::LeftParen,
            TokenKind::RightParen => Token::RightParen,
            TokenKind::Error => {
                // Error spans can split a multi-byte character, so read from the start offset.
                let ch = text[lexer.span().start..]
                    .chars()
                    .next()
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                return Err(ParseError::InvalidCharacter(ch));
            }
        };
        tokens.push(token);
    }
    Ok(tokens)
}
