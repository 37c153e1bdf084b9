use super::expr::Roll;
use super::stringify::{SimpleStringifier, Stringify};
use crate::common::{Int, NonEmpty, NonZeroUInt, UInt};
use std::fmt;

/// The individual outcomes of every die of one size.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Draws {
    pub faces: NonZeroUInt,
    pub values: NonEmpty<UInt>,
}

impl Draws {
    pub fn total(&self) -> Int {
        self.values.iter().map(|&x| Int::from(x)).sum()
    }
}

/// The outcome of simulating a [`Roll`]. Draws are kept per die size, in the
/// same largest-first order the roll is displayed in.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollResult {
    roll: Roll,
    positive: Vec<Draws>,
    negative: Vec<Draws>,
    sum: Int,
}

impl RollResult {
    pub(crate) fn new(roll: Roll, positive: Vec<Draws>, negative: Vec<Draws>, sum: Int) -> Self {
        Self {
            roll,
            positive,
            negative,
            sum,
        }
    }

    pub fn roll(&self) -> &Roll {
        &self.roll
    }

    pub fn positive(&self) -> &[Draws] {
        &self.positive
    }

    pub fn negative(&self) -> &[Draws] {
        &self.negative
    }

    pub fn sum(&self) -> Int {
        self.sum
    }

    /// Renders the individual dice, e.g. `7 + (4 + 2) - 3 + 2` for
    /// `2d6 + d8 - d4 + 2`.
    pub fn to_string_detailed(&self) -> String {
        SimpleStringifier.str_detailed(self)
    }
}

impl fmt::Display for RollResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&SimpleStringifier.str_result(self))
    }
}

#[cfg(test)]
mod tests {
    use crate::roll::roller::StepRoller;
    use crate::common::NonZeroUInt;

    fn roller() -> StepRoller {
        StepRoller::new(NonZeroUInt::new(10).unwrap(), 1)
    }

    #[test]
    fn test_sum_matches_draws() {
        let roll: crate::Roll = "3d8 + 2d6 - d4 - 5".parse().unwrap();
        let result = roll.simulate_with(&mut roller());
        let pos: i64 = result.positive().iter().map(|d| d.total()).sum();
        let neg: i64 = result.negative().iter().map(|d| d.total()).sum();
        assert_eq!(result.sum(), pos - neg - 5);
        assert_eq!(result.positive().len(), 2);
        assert_eq!(result.positive()[0].faces.get(), 8);
        assert_eq!(result.positive()[0].values.len(), 3);
    }
}
