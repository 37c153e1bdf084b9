use crate::common::Int;
use crate::roll::{Roll, Roller};

/// A non-player combatant in the current fight.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterCreature {
    pub name: String,
    pub initiative_dice: Roll,
    pub initiative: Option<Int>,
}

impl EncounterCreature {
    pub fn new(name: impl Into<String>, initiative_dice: Roll) -> Self {
        Self {
            name: name.into(),
            initiative_dice,
            initiative: None,
        }
    }

    pub fn roll_initiative<R: Roller + ?Sized>(&self, roller: &mut R) -> Int {
        self.initiative_dice.simulate_with(roller).sum()
    }
}

/// One line of the initiative tracker. `initiative` is `None` until it has
/// been rolled or entered.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureInitiative {
    pub name: String,
    pub initiative: Option<Int>,
}

impl CreatureInitiative {
    pub fn new(name: impl Into<String>, initiative: Option<Int>) -> Self {
        Self {
            name: name.into(),
            initiative,
        }
    }

    pub fn has_initiative(&self) -> bool {
        self.initiative.is_some()
    }
}
