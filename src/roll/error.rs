use crate::common::UInt;
use thiserror::Error;

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum RollError {
    #[error("too many dice: at most {0} can be rolled at once")]
    TooManyDice(UInt),
    #[error("a group of dice cannot have a count of zero")]
    EmptyGroup,
}
