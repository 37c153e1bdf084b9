mod error;
mod lexer;
mod parser;

pub use error::ParseError;
pub use lexer::{tokenize, Token};
pub use parser::Parser;

use crate::roll::Roll;

/// Parses dice notation such as `3d8 + 2d6 - 2` into a [`Roll`].
///
/// # Examples
/// ```
/// let roll = encounter_dice::parse::parse_roll("d6 + 2 + d6").unwrap();
/// assert_eq!(roll.to_string(), "2d6 + 2");
/// assert_eq!((roll.min(), roll.max()), (4, 14));
/// ```
pub fn parse_roll(text: &str) -> Result<Roll, ParseError> {
    let tokens = tokenize(text)?;
    tracing::trace!(?tokens, "tokenized dice notation");
    let roll = Parser::new(&tokens).parse()?;
    tracing::debug!(input = text, %roll, "parsed roll");
    Ok(roll)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_strategies::{dice_string_strategy, roll_strategy};
    use proptest::prelude::*;

    #[test]
    fn test_parse_roll_is_atomic() {
        assert_eq!(parse_roll("d20 + 4 + x"), Err(ParseError::InvalidCharacter('x')));
        assert_eq!(parse_roll("d20 + 4 + 2d"), Err(ParseError::InvalidDieSymbol));
    }

    proptest! {
        #[test]
        fn test_format_reparses(s in dice_string_strategy()) {
            let roll = parse_roll(&s).unwrap();
            let text = roll.to_string();
            let reparsed = parse_roll(&text).unwrap();
            prop_assert_eq!(&reparsed, &roll, "{:?} formatted as {:?}", s, text);
            prop_assert_eq!(reparsed.to_string(), text);
        }

        #[test]
        fn test_roll_round_trip(roll in roll_strategy()) {
            let text = roll.to_string();
            prop_assert_eq!(parse_roll(&text).unwrap(), roll, "formatted as {:?}", text);
        }
    }
}
