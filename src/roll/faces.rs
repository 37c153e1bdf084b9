use super::{RollError, MAX_DICE};
use crate::common::{Int, NonZeroUInt, UInt};
use std::collections::BTreeMap;
use std::fmt;

/// `count` dice with `faces` sides each.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FaceGroup {
    pub count: UInt,
    pub faces: NonZeroUInt,
}

impl FaceGroup {
    pub const fn new(count: UInt, faces: NonZeroUInt) -> Self {
        Self { count, faces }
    }
}

impl fmt::Display for FaceGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.count != 1 {
            write!(f, "{}", self.count)?;
        }
        write!(f, "d{}", self.faces)
    }
}

/// Dice of one sign, aggregated by number of faces.
///
/// Repeated mentions of the same die size are merged, so `d6 + d6` and `2d6`
/// produce equal maps. Groups are always visited largest die first. A map
/// never holds a zero count, nor more than [`MAX_DICE`] dice in total.
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "BTreeMap<NonZeroUInt, UInt>",
        into = "BTreeMap<NonZeroUInt, UInt>"
    )
)]
pub struct FaceCountMap {
    counts: BTreeMap<NonZeroUInt, UInt>,
}

impl FaceCountMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_groups<I: IntoIterator<Item = FaceGroup>>(groups: I) -> Result<Self, RollError> {
        let mut ret = Self::new();
        for group in groups {
            ret.add(group.count, group.faces)?;
        }
        Ok(ret)
    }

    /// Merges `count` dice of size `faces` into the map. Adding zero dice is a
    /// no-op. Fails without changing the map if the total would exceed
    /// [`MAX_DICE`].
    pub fn add(&mut self, count: UInt, faces: NonZeroUInt) -> Result<(), RollError> {
        if count == 0 {
            return Ok(());
        }
        self.dice_count()
            .checked_add(count)
            .filter(|&total| total <= MAX_DICE)
            .ok_or(RollError::TooManyDice(MAX_DICE))?;
        *self.counts.entry(faces).or_insert(0) += count;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The number of distinct die sizes.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn count(&self, faces: NonZeroUInt) -> UInt {
        self.counts.get(&faces).copied().unwrap_or(0)
    }

    /// The number of dice across every size.
    pub fn dice_count(&self) -> UInt {
        self.counts.values().sum()
    }

    /// Groups in canonical order, descending by number of faces.
    pub fn groups(&self) -> impl ExactSizeIterator<Item = FaceGroup> + DoubleEndedIterator + '_ {
        self.counts
            .iter()
            .rev()
            .map(|(&faces, &count)| FaceGroup::new(count, faces))
    }

    /// Smallest possible total: every die shows a 1.
    pub fn min(&self) -> Int {
        Int::from(self.dice_count())
    }

    /// Largest possible total: every die shows its highest face.
    pub fn max(&self) -> Int {
        // At most MAX_DICE * UInt::MAX, well inside Int.
        self.counts
            .iter()
            .map(|(faces, &count)| Int::from(faces.get()) * Int::from(count))
            .sum()
    }
}

impl TryFrom<BTreeMap<NonZeroUInt, UInt>> for FaceCountMap {
    type Error = RollError;

    fn try_from(counts: BTreeMap<NonZeroUInt, UInt>) -> Result<Self, Self::Error> {
        if counts.values().any(|&count| count == 0) {
            return Err(RollError::EmptyGroup);
        }
        Self::from_groups(counts.into_iter().map(|(faces, count)| FaceGroup::new(count, faces)))
    }
}

impl From<FaceCountMap> for BTreeMap<NonZeroUInt, UInt> {
    fn from(map: FaceCountMap) -> Self {
        map.counts
    }
}

impl fmt::Display for FaceCountMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, group) in self.groups().enumerate() {
            if i != 0 {
                f.write_str(" + ")?;
            }
            write!(f, "{}", group)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn faces(n: UInt) -> NonZeroUInt {
        NonZeroUInt::new(n).unwrap()
    }

    fn map(groups: &[(UInt, UInt)]) -> FaceCountMap {
        FaceCountMap::from_groups(groups.iter().map(|&(count, f)| FaceGroup::new(count, faces(f))))
            .unwrap()
    }

    #[test]
    fn test_merge_same_faces() {
        let merged = map(&[(1, 6), (1, 6)]);
        assert_eq!(merged, map(&[(2, 6)]));
        assert_eq!(merged.count(faces(6)), 2);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.to_string(), "2d6");
    }

    #[test]
    fn test_zero_count_is_dropped() {
        let empty = map(&[(0, 6)]);
        assert!(empty.is_empty());
        assert_eq!(empty.count(faces(6)), 0);
        assert_eq!(empty.to_string(), "");
    }

    #[test]
    fn test_descending_order() {
        // Insertion order must not leak into presentation.
        let m = map(&[(1, 4), (2, 20), (3, 6), (1, 100)]);
        let order: Vec<_> = m.groups().map(|g| g.faces.get()).collect();
        assert_eq!(order, [100, 20, 6, 4]);
        assert_eq!(m.to_string(), "d100 + 2d20 + 3d6 + d4");
        assert_eq!(m, map(&[(1, 100), (3, 6), (2, 20), (1, 4)]));
    }

    #[test]
    fn test_bounds() {
        let m = map(&[(3, 8), (2, 6)]);
        assert_eq!(m.min(), 5);
        assert_eq!(m.max(), 24 + 12);
        assert_eq!(FaceCountMap::new().min(), 0);
        assert_eq!(FaceCountMap::new().max(), 0);
    }

    #[test]
    fn test_group_display() {
        assert_eq!(FaceGroup::new(1, faces(6)).to_string(), "d6");
        assert_eq!(FaceGroup::new(2, faces(12)).to_string(), "2d12");
    }

    #[test]
    fn test_dice_limit() {
        let mut m = map(&[(MAX_DICE - 1, 6)]);
        assert_eq!(m.add(2, faces(6)), Err(RollError::TooManyDice(MAX_DICE)));
        assert_eq!(m.add(UInt::MAX, faces(4)), Err(RollError::TooManyDice(MAX_DICE)));
        assert_eq!(m, map(&[(MAX_DICE - 1, 6)]));
        m.add(1, faces(4)).unwrap();
        assert_eq!(m.dice_count(), MAX_DICE);
        assert_eq!(m.min(), Int::from(MAX_DICE));
    }

    #[test]
    fn test_largest_bounds_fit() {
        let m = map(&[(MAX_DICE, UInt::MAX)]);
        assert_eq!(m.max(), Int::from(UInt::MAX) * Int::from(MAX_DICE));
    }

    #[test]
    fn test_try_from_counts() {
        let counts: BTreeMap<_, _> = [(faces(6), 2), (faces(20), 1)].into_iter().collect();
        assert_eq!(FaceCountMap::try_from(counts).unwrap(), map(&[(2, 6), (1, 20)]));

        let zero: BTreeMap<_, _> = [(faces(6), 0)].into_iter().collect();
        assert_eq!(FaceCountMap::try_from(zero), Err(RollError::EmptyGroup));

        let huge: BTreeMap<_, _> = [(faces(6), MAX_DICE), (faces(8), 1)].into_iter().collect();
        assert_eq!(FaceCountMap::try_from(huge), Err(RollError::TooManyDice(MAX_DICE)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_validates() {
        let m: FaceCountMap = serde_json::from_str(r#"{"6": 2, "20": 1}"#).unwrap();
        assert_eq!(m, map(&[(2, 6), (1, 20)]));
        assert!(serde_json::from_str::<FaceCountMap>(r#"{"6": 0}"#).is_err());
        assert!(serde_json::from_str::<FaceCountMap>(r#"{"6": 4000000000}"#).is_err());
    }
}
