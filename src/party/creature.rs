use crate::common::Int;
use crate::roll::{Roll, Roller};

/// A kind of monster, with the dice rolled for each one's hit points.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureType {
    pub name: String,
    pub hit_dice: Roll,
}

impl CreatureType {
    pub fn new(name: impl Into<String>, hit_dice: Roll) -> Self {
        Self {
            name: name.into(),
            hit_dice,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Creature {
    pub kind: CreatureType,
    pub name: String,
    pub rolled_health: Int,
    pub damage_taken: Int,
}

impl Creature {
    pub fn new(kind: CreatureType, name: impl Into<String>, rolled_health: Int) -> Self {
        Self {
            kind,
            name: name.into(),
            rolled_health,
            damage_taken: 0,
        }
    }

    /// Creates a creature whose health is a fresh roll of its hit dice.
    pub fn create<R: Roller + ?Sized>(kind: CreatureType, name: impl Into<String>, roller: &mut R) -> Self {
        let rolled_health = kind.hit_dice.simulate_with(roller).sum();
        Self::new(kind, name, rolled_health)
    }

    pub fn remaining_health(&self) -> Int {
        self.rolled_health - self.damage_taken
    }

    pub fn is_down(&self) -> bool {
        self.remaining_health() <= 0
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub name: String,
    /// Rolled by the player at the table, so it is entered rather than rolled.
    pub initiative: Option<Int>,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            initiative: None,
        }
    }
}
