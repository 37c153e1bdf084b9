//! The state of a gaming session, changed only through reversible actions.

mod action;
mod creature;
mod initiative;

pub use action::{
    Action, ActionError, AddCombatant, AddCreature, AddPlayer, AddRoll, DamageCreature,
    DeleteCreature, Reversible, RollInitiative, SetPlayerInitiative,
};
pub use creature::{Creature, CreatureType, Player};
pub use initiative::{CreatureInitiative, EncounterCreature};

use crate::common::Int;
use crate::error::Error;
use crate::roll::{RollResult, Roller};
use crate::undo::{UndoRedoLog, DEFAULT_CAPACITY};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PartyConfig {
    /// How many actions can be undone.
    pub history_capacity: usize,
}

impl Default for PartyConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_CAPACITY,
        }
    }
}

/// Everything an action can change.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Encounter {
    pub players: Vec<Player>,
    pub creatures: Vec<Creature>,
    pub rolls: Vec<RollResult>,
    pub last_custom_roll: String,
    /// Creatures taking part in the current fight, in the order they joined.
    pub combatants: Vec<EncounterCreature>,
}

impl Encounter {
    pub fn player(&self, id: usize) -> Result<&Player, ActionError> {
        self.players.get(id).ok_or(ActionError::NoSuchPlayer(id))
    }

    pub fn player_mut(&mut self, id: usize) -> Result<&mut Player, ActionError> {
        self.players.get_mut(id).ok_or(ActionError::NoSuchPlayer(id))
    }

    /// Every player's initiative, in party order.
    pub fn player_initiatives(&self) -> Vec<CreatureInitiative> {
        self.players
            .iter()
            .map(|p| CreatureInitiative::new(p.name.clone(), p.initiative))
            .collect()
    }

    /// Players and combatants that have an initiative, highest first. Ties
    /// go to players, then to whoever joined first.
    pub fn initiative_order(&self) -> Vec<CreatureInitiative> {
        let combatants = self
            .combatants
            .iter()
            .map(|c| CreatureInitiative::new(c.name.clone(), c.initiative));
        let mut ret: Vec<_> = self
            .player_initiatives()
            .into_iter()
            .chain(combatants)
            .filter(CreatureInitiative::has_initiative)
            .collect();
        ret.sort_by_key(|c| std::cmp::Reverse(c.initiative));
        ret
    }

    pub fn creature(&self, id: usize) -> Result<&Creature, ActionError> {
        self.creatures.get(id).ok_or(ActionError::NoSuchCreature(id))
    }

    pub fn creature_mut(&mut self, id: usize) -> Result<&mut Creature, ActionError> {
        self.creatures.get_mut(id).ok_or(ActionError::NoSuchCreature(id))
    }

    /// The roll history, newest first.
    pub fn rolls_recent_first(&self) -> std::iter::Rev<std::slice::Iter<'_, RollResult>> {
        self.rolls.iter().rev()
    }
}

/// A named party whose encounter keeps an undo/redo history.
///
/// The history is not persisted; a deserialized party starts with an empty
/// one of the default size.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Party {
    name: String,
    encounter: Encounter,
    #[cfg_attr(feature = "serde", serde(skip))]
    actions: UndoRedoLog<Action>,
}

impl Party {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, PartyConfig::default())
    }

    pub fn with_config(name: impl Into<String>, config: PartyConfig) -> Self {
        Self {
            name: name.into(),
            encounter: Encounter::default(),
            actions: UndoRedoLog::new(config.history_capacity),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn encounter(&self) -> &Encounter {
        &self.encounter
    }

    /// Applies `action` and records it for undo. An action that fails to apply
    /// changes nothing and is not recorded.
    pub fn apply(&mut self, action: impl Into<Action>) -> Result<(), Error> {
        let action = action.into();
        action.apply(&mut self.encounter)?;
        tracing::debug!(party = %self.name, action = %action.describe(), "applied action");
        self.actions.push(action);
        Ok(())
    }

    /// Reverts the latest action, returning its description.
    pub fn undo(&mut self) -> Result<String, Error> {
        let action = self.actions.pop()?;
        let description = action.describe();
        if let Err(why) = action.undo(&mut self.encounter) {
            // Put the entry back so the log still mirrors the encounter. The
            // pop above just enabled redo, so this unpop cannot fail.
            let _ = self.actions.unpop();
            return Err(why.into());
        }
        tracing::debug!(party = %self.name, action = %description, "undid action");
        Ok(description)
    }

    /// Reapplies the action most recently undone, returning its description.
    pub fn redo(&mut self) -> Result<String, Error> {
        let action = self.actions.unpop()?;
        let description = action.describe();
        if let Err(why) = action.apply(&mut self.encounter) {
            // The unpop above left an entry to pop, so this cannot fail.
            let _ = self.actions.pop();
            return Err(why.into());
        }
        tracing::debug!(party = %self.name, action = %description, "redid action");
        Ok(description)
    }

    pub fn can_undo(&self) -> bool {
        self.actions.can_pop()
    }

    pub fn can_redo(&self) -> bool {
        self.actions.can_unpop()
    }

    /// How many actions can currently be undone.
    pub fn history_len(&self) -> usize {
        self.actions.len()
    }

    /// Parses and rolls `text` with the thread-local random number generator,
    /// adding the outcome to the roll history.
    pub fn roll(&mut self, text: &str) -> Result<RollResult, Error> {
        self.roll_with(text, &mut rand::thread_rng())
    }

    pub fn roll_with<R: Roller + ?Sized>(&mut self, text: &str, roller: &mut R) -> Result<RollResult, Error> {
        self.encounter.last_custom_roll = text.to_owned();
        let roll = crate::parse_roll(text)?;
        let result = roll.simulate_with(roller);
        self.apply(AddRoll::new(result.clone()))?;
        Ok(result)
    }

    pub fn delete_creature_action(&self, id: usize) -> Result<DeleteCreature, ActionError> {
        DeleteCreature::new(&self.encounter, id)
    }

    pub fn rolls_recent_first(&self) -> std::iter::Rev<std::slice::Iter<'_, RollResult>> {
        self.encounter.rolls_recent_first()
    }

    pub fn set_player_initiative_action(
        &self,
        id: usize,
        initiative: Option<Int>,
    ) -> Result<SetPlayerInitiative, ActionError> {
        SetPlayerInitiative::new(&self.encounter, id, initiative)
    }

    pub fn roll_initiative_action<R: Roller + ?Sized>(&self, roller: &mut R) -> RollInitiative {
        RollInitiative::new(&self.encounter, roller)
    }

    pub fn player_initiatives(&self) -> Vec<CreatureInitiative> {
        self.encounter.player_initiatives()
    }
}
