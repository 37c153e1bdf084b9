use super::{error::ParseError, lexer::Token};
use crate::common::{NonZeroUInt, Sign, UInt};
use crate::roll::{Roll, RollError, MAX_DICE};

type PResult<T = ()> = Result<T, ParseError>;

/// Builds a [`Roll`] from tokens.
///
/// The stream is a sequence of terms separated by signs. A term is a bare
/// number, `dF`, or `CdF`; the sign before it says which side of the roll it
/// lands on. A leading sign is optional. A sign may also be followed by a
/// parenthesized run of terms, which is how negative dice of several sizes
/// are written back out.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    roll: Roll,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            roll: Roll::new(),
        }
    }

    pub fn parse(mut self) -> PResult<Roll> {
        if self.tokens.is_empty() {
            return Ok(self.roll);
        }
        let mut sign = self.leading_sign();
        loop {
            if self.matches(Token::LeftParen) {
                self.advance();
                self.parse_group(sign)?;
            } else {
                self.parse_term(sign)?;
            }
            match self.advance() {
                None => return Ok(self.roll),
                Some(Token::Sign(next)) => sign = next,
                Some(_) => return Err(ParseError::InvalidParenthesis),
            }
        }
    }

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let ret = self.peek()?;
        self.pos += 1;
        Some(ret)
    }

    fn matches(&self, kind: Token) -> bool {
        self.peek() == Some(kind)
    }

    fn leading_sign(&mut self) -> Sign {
        match self.peek() {
            Some(Token::Sign(sign)) => {
                self.advance();
                sign
            }
            _ => Sign::Plus,
        }
    }

    fn parse_group(&mut self, outer: Sign) -> PResult {
        let mut sign = outer.combine(self.leading_sign());
        loop {
            if self.matches(Token::LeftParen) {
                return Err(ParseError::InvalidParenthesis);
            }
            self.parse_term(sign)?;
            match self.advance() {
                Some(Token::RightParen) => return Ok(()),
                Some(Token::Sign(next)) => sign = outer.combine(next),
                _ => return Err(ParseError::InvalidParenthesis),
            }
        }
    }

    /// Consumes tokens up to the next separator and adds them to the roll.
    fn parse_term(&mut self, sign: Sign) -> PResult {
        let tokens = self.tokens;
        let start = self.pos;
        let end = tokens[start..]
            .iter()
            .position(Token::is_separator)
            .map_or(tokens.len(), |i| start + i);
        self.pos = end;

        let term = &tokens[start..end];
        match *term {
            [Token::Number(n)] => {
                self.roll.add_offset(sign, n);
                Ok(())
            }
            [_] => Err(ParseError::InvalidDieFormat),
            [Token::DieMarker, sides] => {
                self.add_dice(sign, 1, sides, ParseError::InvalidSidesMarker)
            }
            [_, _] => Err(ParseError::InvalidDieSymbol),
            [count, marker, sides] => {
                let count = match count {
                    Token::Number(count) => count,
                    _ => return Err(ParseError::InvalidNumberOfDice),
                };
                if marker != Token::DieMarker {
                    return Err(ParseError::InvalidDieSymbol);
                }
                self.add_dice(sign, count, sides, ParseError::InvalidNumberOfSides)
            }
            _ => Err(ParseError::InvalidDie(term.to_vec())),
        }
    }

    fn add_dice(&mut self, sign: Sign, count: UInt, sides: Token, err: ParseError) -> PResult {
        let faces = match sides {
            Token::Number(n) => NonZeroUInt::new(n).ok_or(ParseError::ZeroSides)?,
            _ => return Err(err),
        };
        self.roll.add_dice(sign, count, faces)?;
        Ok(())
    }
}
