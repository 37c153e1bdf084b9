use super::creature::{Creature, Player};
use super::initiative::EncounterCreature;
use super::Encounter;
use crate::common::Int;
use crate::roll::{RollResult, Roller};
use thiserror::Error;

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum ActionError {
    #[error("there is no creature number {0}")]
    NoSuchCreature(usize),
    #[error("there is no player number {0}")]
    NoSuchPlayer(usize),
    #[error("the fight has changed since initiative was rolled")]
    StaleInitiative,
    #[error("there are no {0} left to remove")]
    Empty(&'static str),
}

type AResult = Result<(), ActionError>;

/// A change to an encounter that knows how to take itself back.
///
/// `undo` expects the encounter exactly as `apply` left it.
#[enum_dispatch::enum_dispatch]
pub trait Reversible {
    fn apply(&self, encounter: &mut Encounter) -> AResult;

    fn undo(&self, encounter: &mut Encounter) -> AResult;

    fn describe(&self) -> String;
}

#[enum_dispatch::enum_dispatch(Reversible)]
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    AddCreature(AddCreature),
    DamageCreature(DamageCreature),
    DeleteCreature(DeleteCreature),
    AddPlayer(AddPlayer),
    AddRoll(AddRoll),
    SetPlayerInitiative(SetPlayerInitiative),
    AddCombatant(AddCombatant),
    RollInitiative(RollInitiative),
}

#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AddCreature {
    pub creature: Creature,
}

impl AddCreature {
    pub fn new(creature: Creature) -> Self {
        Self { creature }
    }
}

impl Reversible for AddCreature {
    fn apply(&self, encounter: &mut Encounter) -> AResult {
        encounter.creatures.push(self.creature.clone());
        Ok(())
    }

    fn undo(&self, encounter: &mut Encounter) -> AResult {
        encounter
            .creatures
            .pop()
            .map(drop)
            .ok_or(ActionError::Empty("creatures"))
    }

    fn describe(&self) -> String {
        format!("add {}", self.creature.name)
    }
}

/// Hit points taken off one creature; negative amounts heal.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageCreature {
    pub id: usize,
    pub amount: Int,
}

impl DamageCreature {
    pub fn new(id: usize, amount: Int) -> Self {
        Self { id, amount }
    }
}

impl Reversible for DamageCreature {
    fn apply(&self, encounter: &mut Encounter) -> AResult {
        encounter.creature_mut(self.id)?.damage_taken += self.amount;
        Ok(())
    }

    fn undo(&self, encounter: &mut Encounter) -> AResult {
        encounter.creature_mut(self.id)?.damage_taken -= self.amount;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("deal {} damage to creature {}", self.amount, self.id)
    }
}

/// Removes a creature, holding on to it so that undoing puts it back in the
/// same place.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeleteCreature {
    pub id: usize,
    pub creature: Creature,
}

impl DeleteCreature {
    pub fn new(encounter: &Encounter, id: usize) -> Result<Self, ActionError> {
        let creature = encounter.creature(id)?.clone();
        Ok(Self { id, creature })
    }
}

impl Reversible for DeleteCreature {
    fn apply(&self, encounter: &mut Encounter) -> AResult {
        encounter.creature(self.id)?;
        encounter.creatures.remove(self.id);
        Ok(())
    }

    fn undo(&self, encounter: &mut Encounter) -> AResult {
        if self.id > encounter.creatures.len() {
            return Err(ActionError::NoSuchCreature(self.id));
        }
        encounter.creatures.insert(self.id, self.creature.clone());
        Ok(())
    }

    fn describe(&self) -> String {
        format!("delete {}", self.creature.name)
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AddPlayer {
    pub player: Player,
}

impl AddPlayer {
    pub fn new(player: Player) -> Self {
        Self { player }
    }
}

impl Reversible for AddPlayer {
    fn apply(&self, encounter: &mut Encounter) -> AResult {
        encounter.players.push(self.player.clone());
        Ok(())
    }

    fn undo(&self, encounter: &mut Encounter) -> AResult {
        encounter
            .players
            .pop()
            .map(drop)
            .ok_or(ActionError::Empty("players"))
    }

    fn describe(&self) -> String {
        format!("add player {}", self.player.name)
    }
}

/// Appends a dice roll to the roll history.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AddRoll {
    pub result: RollResult,
}

impl AddRoll {
    pub fn new(result: RollResult) -> Self {
        Self { result }
    }
}

impl Reversible for AddRoll {
    fn apply(&self, encounter: &mut Encounter) -> AResult {
        encounter.rolls.push(self.result.clone());
        Ok(())
    }

    fn undo(&self, encounter: &mut Encounter) -> AResult {
        encounter
            .rolls
            .pop()
            .map(drop)
            .ok_or(ActionError::Empty("rolls"))
    }

    fn describe(&self) -> String {
        format!("roll {} ({})", self.result.roll(), self.result.sum())
    }
}

fn fmt_initiative(initiative: Option<Int>) -> String {
    initiative.map_or_else(|| "unset".to_owned(), |x| x.to_string())
}

/// Records the initiative a player rolled, remembering the old value.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetPlayerInitiative {
    pub id: usize,
    pub name: String,
    pub initiative: Option<Int>,
    pub previous: Option<Int>,
}

impl SetPlayerInitiative {
    pub fn new(encounter: &Encounter, id: usize, initiative: Option<Int>) -> Result<Self, ActionError> {
        let player = encounter.player(id)?;
        Ok(Self {
            id,
            name: player.name.clone(),
            initiative,
            previous: player.initiative,
        })
    }
}

impl Reversible for SetPlayerInitiative {
    fn apply(&self, encounter: &mut Encounter) -> AResult {
        encounter.player_mut(self.id)?.initiative = self.initiative;
        Ok(())
    }

    fn undo(&self, encounter: &mut Encounter) -> AResult {
        encounter.player_mut(self.id)?.initiative = self.previous;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("set initiative of {} to {}", self.name, fmt_initiative(self.initiative))
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AddCombatant {
    pub creature: EncounterCreature,
}

impl AddCombatant {
    pub fn new(creature: EncounterCreature) -> Self {
        Self { creature }
    }
}

impl Reversible for AddCombatant {
    fn apply(&self, encounter: &mut Encounter) -> AResult {
        encounter.combatants.push(self.creature.clone());
        Ok(())
    }

    fn undo(&self, encounter: &mut Encounter) -> AResult {
        encounter
            .combatants
            .pop()
            .map(drop)
            .ok_or(ActionError::Empty("combatants"))
    }

    fn describe(&self) -> String {
        format!("add {} to the fight", self.creature.name)
    }
}

/// Rolls initiative for every combatant at once. The rolls are made when the
/// action is built, so redoing it restores the same order.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollInitiative {
    pub rolled: Vec<Int>,
    pub previous: Vec<Option<Int>>,
}

impl RollInitiative {
    pub fn new<R: Roller + ?Sized>(encounter: &Encounter, roller: &mut R) -> Self {
        let (rolled, previous) = encounter
            .combatants
            .iter()
            .map(|c| (c.roll_initiative(roller), c.initiative))
            .unzip();
        Self { rolled, previous }
    }

    fn set(encounter: &mut Encounter, values: impl ExactSizeIterator<Item = Option<Int>>) -> AResult {
        if values.len() != encounter.combatants.len() {
            return Err(ActionError::StaleInitiative);
        }
        for (creature, value) in encounter.combatants.iter_mut().zip(values) {
            creature.initiative = value;
        }
        Ok(())
    }
}

impl Reversible for RollInitiative {
    fn apply(&self, encounter: &mut Encounter) -> AResult {
        Self::set(encounter, self.rolled.iter().map(|&x| Some(x)))
    }

    fn undo(&self, encounter: &mut Encounter) -> AResult {
        Self::set(encounter, self.previous.iter().copied())
    }

    fn describe(&self) -> String {
        format!("roll initiative for {} creatures", self.rolled.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::party::creature::CreatureType;

    fn creature(name: &str, health: Int) -> Creature {
        let kind = CreatureType::new("Orc", "2d8 + 6".parse().unwrap());
        Creature::new(kind, name, health)
    }

    fn encounter(names: &[&str]) -> Encounter {
        let mut ret = Encounter::default();
        for name in names {
            ret.creatures.push(creature(name, 15));
        }
        ret
    }

    fn names(encounter: &Encounter) -> Vec<&str> {
        encounter.creatures.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_add_creature() {
        let mut enc = encounter(&["a"]);
        let action = Action::from(AddCreature::new(creature("b", 3)));
        action.apply(&mut enc).unwrap();
        assert_eq!(names(&enc), ["a", "b"]);
        action.undo(&mut enc).unwrap();
        assert_eq!(names(&enc), ["a"]);
        assert_eq!(action.describe(), "add b");
    }

    #[test]
    fn test_damage_creature() {
        let mut enc = encounter(&["a", "b"]);
        let action = Action::from(DamageCreature::new(1, 4));
        action.apply(&mut enc).unwrap();
        action.apply(&mut enc).unwrap();
        assert_eq!(enc.creatures[1].damage_taken, 8);
        assert_eq!(enc.creatures[0].damage_taken, 0);
        action.undo(&mut enc).unwrap();
        assert_eq!(enc.creatures[1].damage_taken, 4);
        assert_eq!(
            DamageCreature::new(2, 1).apply(&mut enc),
            Err(ActionError::NoSuchCreature(2))
        );
    }

    #[test]
    fn test_delete_creature_restores_position() {
        for id in 0..4 {
            let mut enc = encounter(&["a", "b", "c", "d"]);
            let action = Action::from(DeleteCreature::new(&enc, id).unwrap());
            action.apply(&mut enc).unwrap();
            assert_eq!(enc.creatures.len(), 3);
            assert!(!names(&enc).contains(&["a", "b", "c", "d"][id]));
            action.undo(&mut enc).unwrap();
            assert_eq!(names(&enc), ["a", "b", "c", "d"], "deleting {}", id);
        }
    }

    #[test]
    fn test_delete_missing_creature() {
        let enc = encounter(&["a"]);
        assert_eq!(DeleteCreature::new(&enc, 1), Err(ActionError::NoSuchCreature(1)));
    }

    #[test]
    fn test_add_player_and_roll() {
        let mut enc = Encounter::default();
        AddPlayer::new(Player::new("Vex")).apply(&mut enc).unwrap();
        assert_eq!(enc.players, [Player::new("Vex")]);
        AddPlayer::new(Player::new("Vex")).undo(&mut enc).unwrap();
        assert!(enc.players.is_empty());
        assert_eq!(
            AddPlayer::new(Player::new("Vex")).undo(&mut enc),
            Err(ActionError::Empty("players"))
        );

        let roll: crate::Roll = "3".parse().unwrap();
        let action = Action::from(AddRoll::new(roll.simulate()));
        action.apply(&mut enc).unwrap();
        assert_eq!(enc.rolls[0].sum(), 3);
        assert_eq!(action.describe(), "roll 3 (3)");
        action.undo(&mut enc).unwrap();
        assert!(enc.rolls.is_empty());
    }

    #[test]
    fn test_set_player_initiative() {
        let mut enc = Encounter::default();
        enc.players.push(Player::new("Vex"));
        enc.players.push(Player::new("Vax"));
        let first = Action::from(SetPlayerInitiative::new(&enc, 1, Some(17)).unwrap());
        first.apply(&mut enc).unwrap();
        assert_eq!(first.describe(), "set initiative of Vax to 17");
        let second = Action::from(SetPlayerInitiative::new(&enc, 1, Some(4)).unwrap());
        second.apply(&mut enc).unwrap();
        assert_eq!(enc.players[1].initiative, Some(4));
        second.undo(&mut enc).unwrap();
        assert_eq!(enc.players[1].initiative, Some(17));
        first.undo(&mut enc).unwrap();
        assert_eq!(enc.players[1].initiative, None);
        assert_eq!(enc.players[0].initiative, None);
        assert_eq!(
            SetPlayerInitiative::new(&enc, 2, Some(1)),
            Err(ActionError::NoSuchPlayer(2))
        );
    }

    #[test]
    fn test_roll_initiative_for_combatants() {
        use crate::common::NonZeroUInt;
        use crate::roll::StepRoller;

        let mut enc = Encounter::default();
        for name in ["Goblin", "Bugbear"] {
            let creature = EncounterCreature::new(name, "d20 + 1".parse().unwrap());
            AddCombatant::new(creature).apply(&mut enc).unwrap();
        }
        let mut roller = StepRoller::new(NonZeroUInt::new(12).unwrap(), 3);
        let action = Action::from(RollInitiative::new(&enc, &mut roller));
        assert_eq!(action.describe(), "roll initiative for 2 creatures");
        action.apply(&mut enc).unwrap();
        let rolled: Vec<_> = enc.combatants.iter().map(|c| c.initiative).collect();
        assert_eq!(rolled, [Some(13), Some(16)]);
        action.undo(&mut enc).unwrap();
        assert!(enc.combatants.iter().all(|c| c.initiative.is_none()));

        AddCombatant::new(EncounterCreature::new("Owlbear", "d20".parse().unwrap()))
            .apply(&mut enc)
            .unwrap();
        assert_eq!(action.apply(&mut enc), Err(ActionError::StaleInitiative));
        assert!(enc.combatants.iter().all(|c| c.initiative.is_none()));
    }
}
