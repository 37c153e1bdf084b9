//! Dice notation and reversible encounter state for tabletop sessions.
//!
//! ```
//! let roll: encounter_dice::Roll = "3d8 + 2d6 + 2".parse().unwrap();
//! assert_eq!((roll.min(), roll.max()), (7, 38));
//! let result = roll.simulate();
//! assert!(roll.min() <= result.sum() && result.sum() <= roll.max());
//! ```

#[cfg(test)]
mod test_strategies;

pub mod common;
mod error;
pub mod parse;
pub mod party;
pub mod roll;
pub mod undo;

pub use error::Error;
pub use parse::{parse_roll, ParseError};
pub use party::{Action, Party, PartyConfig};
pub use roll::{Roll, RollError, RollResult};
pub use undo::{LogError, UndoRedoLog};
