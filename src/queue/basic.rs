//! The plain battle queue.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::combat::Combatant;
use crate::core::{BattleError, PartyId, PartyMap, Result};

use super::{replay, TurnQueue};

/// Turn queue without insertion restrictions.
///
/// Owns both combatants in a two-slot roster; queue entries are slot
/// references, so the `enemy` relation of any entry is just the other slot.
/// The sequence is an `im` vector, which makes the structural part of a
/// copy O(1).
#[derive(Debug, Serialize, Deserialize)]
pub struct BattleQueue<C> {
    /// Both combatants, indexed by party.
    pub(super) roster: PartyMap<C>,

    /// Queued parties, front first.
    pub(super) sequence: Vector<PartyId>,

    /// Fixed by the first insertion; the second actor is its enemy.
    pub(super) first: Option<PartyId>,
}

impl<C: Combatant> BattleQueue<C> {
    /// Create an empty queue over two combatants.
    ///
    /// `one` occupies `PartyId::ONE` and `two` occupies `PartyId::TWO`.
    /// Neither is queued yet.
    pub fn new(one: C, two: C) -> Self {
        Self::from_roster(PartyMap::new(one, two))
    }

    /// Create an empty queue over an existing roster.
    pub fn from_roster(roster: PartyMap<C>) -> Self {
        Self {
            roster,
            sequence: Vector::new(),
            first: None,
        }
    }

    /// Both combatants.
    #[must_use]
    pub fn roster(&self) -> &PartyMap<C> {
        &self.roster
    }

    /// Whether the front entry's party has no legal action left.
    pub(super) fn front_is_spent(&self) -> bool {
        self.sequence
            .front()
            .is_some_and(|party| self.roster[*party].available_actions().is_empty())
    }

    /// Record `party` as the first actor if nothing was ever added.
    ///
    /// Returns `true` when this call fixed the first actor.
    pub(super) fn fix_first(&mut self, party: PartyId) -> bool {
        if self.first.is_some() {
            return false;
        }
        self.first = Some(party);
        true
    }

    /// The front party after pruning, or the first actor if none remain.
    pub(super) fn front_or_first(&self) -> Result<PartyId> {
        self.sequence
            .front()
            .copied()
            .or(self.first)
            .ok_or(BattleError::Unseeded)
    }

    fn clean(&mut self) {
        while self.front_is_spent() {
            if let Some(party) = self.sequence.pop_front() {
                trace!(%party, "pruned spent entry");
            }
        }
    }
}

impl<C: Combatant> TurnQueue<C> for BattleQueue<C> {
    fn add(&mut self, party: PartyId) {
        self.sequence.push_back(party);
        self.fix_first(party);
    }

    fn remove(&mut self) -> Result<PartyId> {
        self.clean();
        self.sequence.pop_front().ok_or(BattleError::EmptyQueue)
    }

    fn peek(&mut self) -> Result<PartyId> {
        self.clean();
        self.front_or_first()
    }

    fn is_empty(&mut self) -> bool {
        self.clean();
        self.sequence.is_empty()
    }

    fn first_actor(&self) -> Option<PartyId> {
        self.first
    }

    fn party(&self, party: PartyId) -> &C {
        &self.roster[party]
    }

    fn party_mut(&mut self, party: PartyId) -> &mut C {
        &mut self.roster[party]
    }

    fn order(&self) -> Vec<PartyId> {
        self.sequence.iter().copied().collect()
    }

    fn len(&self) -> usize {
        self.sequence.len()
    }

    fn copy(&self) -> Self {
        replay(
            Self::from_roster(self.roster.clone()),
            self.first,
            self.sequence.iter().copied(),
        )
    }
}

impl<C: Combatant> std::fmt::Display for BattleQueue<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{Character, CharacterClass};
    use crate::core::Action;

    fn rogues() -> BattleQueue<Character> {
        BattleQueue::new(
            Character::new("r", CharacterClass::Rogue),
            Character::new("r2", CharacterClass::Rogue),
        )
    }

    #[test]
    fn test_new_queue_is_empty_and_unseeded() {
        let mut queue = rogues();

        assert!(queue.is_empty());
        assert!(queue.is_over());
        assert_eq!(queue.first_actor(), None);
        assert_eq!(queue.second_actor(), None);
        assert_eq!(queue.peek(), Err(BattleError::Unseeded));
        assert_eq!(queue.remove(), Err(BattleError::EmptyQueue));
        assert_eq!(queue.winner(), None);
        assert_eq!(queue.to_string(), "");
    }

    #[test]
    fn test_first_insertion_fixes_parties() {
        let mut queue = rogues();
        queue.add(PartyId::TWO);
        queue.add(PartyId::ONE);

        assert_eq!(queue.first_actor(), Some(PartyId::TWO));
        assert_eq!(queue.second_actor(), Some(PartyId::ONE));

        queue.remove().unwrap();
        queue.remove().unwrap();
        assert!(queue.is_empty());

        // Fixed parties survive a full drain.
        assert_eq!(queue.first_actor(), Some(PartyId::TWO));
        assert_eq!(queue.peek(), Ok(PartyId::TWO));
    }

    #[test]
    fn test_add_remove_order() {
        let mut queue = rogues();
        queue.add(PartyId::ONE);
        queue.add(PartyId::TWO);
        queue.add(PartyId::TWO);

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.remove(), Ok(PartyId::ONE));
        assert_eq!(queue.remove(), Ok(PartyId::TWO));
        assert_eq!(queue.peek(), Ok(PartyId::TWO));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_pruning_skips_spent_parties() {
        let mut queue = BattleQueue::new(
            Character::with_stats("r", CharacterClass::Rogue, 100, 2),
            Character::new("m", CharacterClass::Mage),
        );
        queue.add(PartyId::ONE);
        queue.add(PartyId::ONE);
        queue.add(PartyId::TWO);

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.peek(), Ok(PartyId::TWO));
        assert_eq!(queue.len(), 1);
        assert!(!queue.is_empty());
    }

    #[test]
    fn test_peek_falls_back_to_first_actor() {
        let mut queue = BattleQueue::new(
            Character::with_stats("r", CharacterClass::Rogue, 100, 0),
            Character::with_stats("m", CharacterClass::Mage, 100, 0),
        );
        queue.add(PartyId::ONE);
        queue.add(PartyId::TWO);

        assert!(queue.is_empty());
        assert_eq!(queue.peek(), Ok(PartyId::ONE));
        assert!(queue.is_over());
        assert_eq!(queue.winner(), None);
    }

    #[test]
    fn test_is_over_and_winner_on_zero_hp() {
        let mut queue = BattleQueue::new(
            Character::with_stats("r", CharacterClass::Rogue, 40, 100),
            Character::with_stats("m", CharacterClass::Mage, 0, 100),
        );
        queue.add(PartyId::ONE);
        queue.add(PartyId::TWO);

        assert!(!queue.is_empty());
        assert!(queue.is_over());
        assert_eq!(queue.winner(), Some(PartyId::ONE));
    }

    #[test]
    fn test_both_zero_hp_is_a_tie() {
        let mut queue = BattleQueue::new(
            Character::with_stats("r", CharacterClass::Rogue, 0, 100),
            Character::with_stats("m", CharacterClass::Mage, 0, 100),
        );
        queue.add(PartyId::ONE);

        assert!(queue.is_over());
        assert_eq!(queue.winner(), None);
    }

    #[test]
    fn test_render() {
        let mut queue = rogues();
        queue.add(PartyId::ONE);
        queue.add(PartyId::TWO);
        assert_eq!(queue.to_string(), "r (Rogue): 100/100 -> r2 (Rogue): 100/100");
    }

    #[test]
    fn test_copy_is_independent() {
        let mut queue = rogues();
        queue.add(PartyId::ONE);
        queue.add(PartyId::TWO);

        let mut copy = queue.copy();
        let mover = copy.peek().unwrap();
        Character::perform(&mut copy, mover, Action::Attack).unwrap();

        assert_eq!(copy.to_string(), "r (Rogue): 100/97 -> r2 (Rogue): 95/100 -> r (Rogue): 100/97");
        assert_eq!(queue.to_string(), "r (Rogue): 100/100 -> r2 (Rogue): 100/100");
    }

    #[test]
    fn test_copy_preserves_first_actor_and_multiplicity() {
        let mut queue = rogues();
        queue.add(PartyId::TWO);
        queue.add(PartyId::TWO);
        queue.add(PartyId::ONE);
        queue.add(PartyId::TWO);
        queue.remove().unwrap();

        let copy = queue.copy();
        assert_eq!(copy.first_actor(), Some(PartyId::TWO));
        assert_eq!(copy.order(), queue.order());
    }

    #[test]
    fn test_copy_of_unseeded_queue() {
        let queue = rogues();
        let mut copy = queue.copy();
        assert_eq!(copy.first_actor(), None);
        assert!(copy.is_empty());
    }

    #[test]
    fn test_serialization() {
        let mut queue = rogues();
        queue.add(PartyId::ONE);
        queue.add(PartyId::TWO);

        let json = serde_json::to_string(&queue).unwrap();
        let deserialized: BattleQueue<Character> = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.to_string(), queue.to_string());
        assert_eq!(deserialized.first_actor(), queue.first_actor());
    }
}
