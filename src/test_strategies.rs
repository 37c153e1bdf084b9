use crate::common::{Int, NonZeroUInt, Sign, UInt};
use crate::roll::{FaceCountMap, FaceGroup, Roll};
use proptest::prelude::*;

fn sign_strategy() -> impl Strategy<Value = Sign> {
    prop_oneof![Just(Sign::Plus), Just(Sign::Minus)]
}

fn term_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (0..1000u32).prop_map(|n| n.to_string()),
        (1..=100u32).prop_map(|f| format!("d{}", f)),
        (0..5u32, 1..=100u32, any::<bool>())
            .prop_map(|(c, f, upper)| format!("{}{}{}", c, if upper { 'D' } else { 'd' }, f)),
    ]
}

fn separator(sign: Sign, spaced: bool) -> String {
    if spaced {
        format!(" {} ", sign)
    } else {
        sign.to_string()
    }
}

/// Dice notation as a person might type it: optional leading sign, mixed
/// spacing and die sizes in no particular order.
pub(crate) fn dice_string_strategy() -> impl Strategy<Value = String> {
    (
        prop::option::of(sign_strategy()),
        term_strategy(),
        prop::collection::vec((sign_strategy(), any::<bool>(), term_strategy()), 0..6),
    )
        .prop_map(|(lead, first, rest)| {
            let mut ret = lead.map(|s| s.to_string()).unwrap_or_default();
            ret.push_str(&first);
            for (sign, spaced, term) in rest {
                ret.push_str(&separator(sign, spaced));
                ret.push_str(&term);
            }
            ret
        })
}

fn face_map_strategy() -> impl Strategy<Value = FaceCountMap> {
    prop::collection::vec((1..4 as UInt, 1..=20 as UInt), 0..4).prop_map(|groups| {
        let groups = groups
            .into_iter()
            .filter_map(|(count, faces)| Some(FaceGroup::new(count, NonZeroUInt::new(faces)?)));
        FaceCountMap::from_groups(groups).unwrap()
    })
}

pub(crate) fn roll_strategy() -> impl Strategy<Value = Roll> {
    (face_map_strategy(), face_map_strategy(), -50..50 as Int).prop_map(
        |(positive, negative, offset)| Roll {
            positive,
            negative,
            offset,
        },
    )
}
