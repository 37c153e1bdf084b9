use std::fmt::{self, Write};
use std::num::NonZeroU32;

pub type Int = i64;
pub type UInt = u32;
pub type NonZeroUInt = NonZeroU32;

pub type NonEmpty<T> = vec1::Vec1<T>;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sign {
    #[default]
    Plus,
    Minus,
}

impl Sign {
    pub const fn is_negative(self) -> bool {
        matches!(self, Self::Minus)
    }

    /// The sign of a term written as `self (other term)`.
    pub const fn combine(self, other: Self) -> Self {
        match (self, other) {
            (Self::Plus, x) => x,
            (Self::Minus, Self::Plus) => Self::Minus,
            (Self::Minus, Self::Minus) => Self::Plus,
        }
    }

    pub const fn apply(self, value: Int) -> Int {
        match self {
            Self::Plus => value,
            Self::Minus => -value,
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Self::Plus => '+',
            Self::Minus => '-',
        };
        f.write_char(c)
    }
}
