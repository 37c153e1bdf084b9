use super::faces::{FaceCountMap, FaceGroup};
use super::result::{Draws, RollResult};
use super::roller::Roller;
use super::stringify::{SimpleStringifier, Stringify};
use super::{RollError, MAX_DICE};
use crate::common::{Int, NonZeroUInt, Sign, UInt};
use crate::parse::ParseError;
use std::fmt;
use std::str::FromStr;

/// A parsed dice expression: `positive - negative + offset`.
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roll {
    pub positive: FaceCountMap,
    pub negative: FaceCountMap,
    pub offset: Int,
}

impl Roll {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` dice to the side given by `sign`. Fails, leaving the roll
    /// unchanged, if the roll would hold more than [`MAX_DICE`] dice.
    pub fn add_dice(&mut self, sign: Sign, count: UInt, faces: NonZeroUInt) -> Result<&mut Self, RollError> {
        self.dice_count()
            .checked_add(count)
            .filter(|&total| total <= MAX_DICE)
            .ok_or(RollError::TooManyDice(MAX_DICE))?;
        self.dice_mut(sign).add(count, faces)?;
        Ok(self)
    }

    pub fn add_offset(&mut self, sign: Sign, value: UInt) -> &mut Self {
        self.offset += sign.apply(Int::from(value));
        self
    }

    pub fn dice(&self, sign: Sign) -> &FaceCountMap {
        match sign {
            Sign::Plus => &self.positive,
            Sign::Minus => &self.negative,
        }
    }

    fn dice_mut(&mut self, sign: Sign) -> &mut FaceCountMap {
        match sign {
            Sign::Plus => &mut self.positive,
            Sign::Minus => &mut self.negative,
        }
    }

    /// The number of dice on both sides.
    pub fn dice_count(&self) -> UInt {
        self.positive.dice_count() + self.negative.dice_count()
    }

    pub fn has_dice(&self) -> bool {
        !(self.positive.is_empty() && self.negative.is_empty())
    }

    /// The lowest total this roll can produce.
    pub fn min(&self) -> Int {
        self.positive.min() - self.negative.max() + self.offset
    }

    /// The highest total this roll can produce.
    pub fn max(&self) -> Int {
        self.positive.max() - self.negative.min() + self.offset
    }

    /// Rolls every die using the thread-local random number generator.
    pub fn simulate(&self) -> RollResult {
        self.simulate_with(&mut rand::thread_rng())
    }

    /// Rolls every die with `roller`, largest die size first within each sign.
    pub fn simulate_with<R: Roller + ?Sized>(&self, roller: &mut R) -> RollResult {
        let positive = draw_all(&self.positive, roller);
        let negative = draw_all(&self.negative, roller);
        let sum = positive.iter().map(Draws::total).sum::<Int>()
            - negative.iter().map(Draws::total).sum::<Int>()
            + self.offset;
        tracing::trace!(roll = %self, sum, "simulated roll");
        RollResult::new(self.clone(), positive, negative, sum)
    }
}

fn draw_all<R: Roller + ?Sized>(dice: &FaceCountMap, roller: &mut R) -> Vec<Draws> {
    dice.groups()
        .filter_map(|FaceGroup { count, faces }| {
            let values = roller.roll_group(NonZeroUInt::new(count)?, faces);
            Some(Draws { faces, values })
        })
        .collect()
}

impl fmt::Display for Roll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&SimpleStringifier.str_roll(self))
    }
}

impl FromStr for Roll {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse_roll(s)
    }
}
