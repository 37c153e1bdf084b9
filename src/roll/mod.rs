mod error;
mod expr;
mod faces;
mod result;
mod roller;
mod stringify;

pub use error::RollError;
pub use expr::Roll;
pub use faces::{FaceCountMap, FaceGroup};
pub use result::{Draws, RollResult};
pub use roller::Roller;
pub use stringify::{MarkdownStringifier, SimpleStringifier, Stringify};

#[cfg(test)]
pub(crate) use roller::StepRoller;

use crate::common::UInt;

/// The most dice a single [`Roll`] may hold, counting both signs.
pub const MAX_DICE: UInt = 1000;
