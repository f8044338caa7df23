//! Battle queue with limited insertion rights.
//!
//! Every queued slot carries an eligibility flag decided once, when the
//! slot is inserted:
//!
//! 1. While the front slot is ineligible, every insertion is rejected.
//! 2. A party that is not currently queued is always eligible.
//! 3. Otherwise the new slot is ineligible if the front slot belongs to the
//!    party's enemy, or if the party already holds two eligible slots.
//!
//! ```text
//! A -> B        add(B) while A leads    A -> B -> B
//! Y    Y        ------------------->    Y    Y    N
//!
//! A -> A -> B   add(A)                  A -> A -> B -> A
//! Y    Y    Y   ------------------->    Y    Y    Y    N
//! ```
//!
//! Rejections are silent no-ops. They bound how often any party can chain
//! itself, which keeps exhaustive search finite.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::combat::Combatant;
use crate::core::{BattleError, PartyId, PartyMap, Result};

use super::basic::BattleQueue;
use super::{replay, TurnQueue};

/// Most eligible slots a single party may hold at once.
const MAX_ELIGIBLE_SLOTS: u8 = 2;

/// Per-slot insertion right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Eligibility {
    /// The slot's party may cause insertions when it leads (`'Y'`).
    Eligible,
    /// The slot's party blocks all insertions while it leads (`'N'`).
    Ineligible,
}

impl Eligibility {
    /// Single-letter code (`'Y'` / `'N'`).
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Eligibility::Eligible => 'Y',
            Eligibility::Ineligible => 'N',
        }
    }
}

/// Turn queue that enforces per-slot insertion rights.
#[derive(Debug, Serialize, Deserialize)]
pub struct RestrictedBattleQueue<C> {
    base: BattleQueue<C>,

    /// One flag per queued slot, popped in lockstep with the sequence.
    eligibility: Vector<Eligibility>,

    /// Eligible slots currently queued, per party.
    eligible_count: PartyMap<u8>,
}

impl<C: Combatant> RestrictedBattleQueue<C> {
    /// Create an empty queue over two combatants.
    pub fn new(one: C, two: C) -> Self {
        Self::from_roster(PartyMap::new(one, two))
    }

    /// Create an empty queue over an existing roster.
    pub fn from_roster(roster: PartyMap<C>) -> Self {
        Self {
            base: BattleQueue::from_roster(roster),
            eligibility: Vector::new(),
            eligible_count: PartyMap::default(),
        }
    }

    /// Both combatants.
    #[must_use]
    pub fn roster(&self) -> &PartyMap<C> {
        self.base.roster()
    }

    /// Flags of the queued slots, front first.
    #[must_use]
    pub fn eligibility(&self) -> Vec<Eligibility> {
        self.eligibility.iter().copied().collect()
    }

    /// Flags as `'Y'` / `'N'` codes, front first.
    #[must_use]
    pub fn eligibility_codes(&self) -> Vec<char> {
        self.eligibility.iter().map(|flag| flag.code()).collect()
    }

    /// Number of eligible slots `party` holds.
    #[must_use]
    pub fn eligible_count(&self, party: PartyId) -> u8 {
        self.eligible_count[party]
    }

    fn push_flag(&mut self, party: PartyId, flag: Eligibility) {
        if flag == Eligibility::Eligible {
            self.eligible_count[party] += 1;
        }
        self.eligibility.push_back(flag);
    }

    fn pop_front(&mut self) -> Option<PartyId> {
        let party = self.base.sequence.pop_front()?;
        if self.eligibility.pop_front() == Some(Eligibility::Eligible) {
            self.eligible_count[party] = self.eligible_count[party].saturating_sub(1);
        }
        Some(party)
    }

    fn clean(&mut self) {
        while self.base.front_is_spent() {
            if let Some(party) = self.pop_front() {
                trace!(%party, "pruned spent entry");
            }
        }
    }

    fn flag_for_requeue(&self, party: PartyId) -> Eligibility {
        let enemy_leads = self.base.sequence.front() == Some(&party.enemy());
        if enemy_leads || self.eligible_count[party] >= MAX_ELIGIBLE_SLOTS {
            Eligibility::Ineligible
        } else {
            Eligibility::Eligible
        }
    }
}

impl<C: Combatant> TurnQueue<C> for RestrictedBattleQueue<C> {
    fn add(&mut self, party: PartyId) {
        if self.eligibility.front() == Some(&Eligibility::Ineligible) {
            trace!(%party, "insertion rejected: ineligible slot leads");
            return;
        }

        let first_time = !self.base.sequence.contains(&party);
        self.base.sequence.push_back(party);

        let flag = if self.base.fix_first(party) || first_time {
            Eligibility::Eligible
        } else {
            self.flag_for_requeue(party)
        };
        self.push_flag(party, flag);
    }

    fn remove(&mut self) -> Result<PartyId> {
        self.clean();
        self.pop_front().ok_or(BattleError::EmptyQueue)
    }

    fn peek(&mut self) -> Result<PartyId> {
        self.clean();
        self.base.front_or_first()
    }

    fn is_empty(&mut self) -> bool {
        self.clean();
        self.base.sequence.is_empty()
    }

    fn first_actor(&self) -> Option<PartyId> {
        self.base.first
    }

    fn party(&self, party: PartyId) -> &C {
        self.base.party(party)
    }

    fn party_mut(&mut self, party: PartyId) -> &mut C {
        self.base.party_mut(party)
    }

    fn order(&self) -> Vec<PartyId> {
        self.base.order()
    }

    fn len(&self) -> usize {
        self.base.len()
    }

    fn copy(&self) -> Self {
        replay(
            Self::from_roster(self.base.roster.clone()),
            self.base.first,
            self.base.sequence.iter().copied(),
        )
    }
}

impl<C: Combatant> std::fmt::Display for RestrictedBattleQueue<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{Character, CharacterClass};
    use crate::core::Action;

    fn sophias() -> RestrictedBattleQueue<Character> {
        RestrictedBattleQueue::new(
            Character::new("Sophia", CharacterClass::Rogue),
            Character::new("Sophia", CharacterClass::Rogue),
        )
    }

    fn assert_counts_consistent(queue: &RestrictedBattleQueue<Character>) {
        assert_eq!(queue.eligibility.len(), queue.base.sequence.len());
        for party in PartyId::both() {
            let eligible = queue
                .base
                .sequence
                .iter()
                .zip(queue.eligibility.iter())
                .filter(|(p, flag)| **p == party && **flag == Eligibility::Eligible)
                .count();
            assert_eq!(queue.eligible_count(party) as usize, eligible);
        }
    }

    #[test]
    fn test_eligibility_example_sequence() {
        let (c, c2) = (PartyId::ONE, PartyId::TWO);
        let mut queue = sophias();

        queue.add(c);
        assert!(!queue.is_empty());
        assert_eq!(queue.eligibility_codes(), vec!['Y']);

        queue.add(c2);
        assert_eq!(queue.eligibility_codes(), vec!['Y', 'Y']);

        queue.add(c2);
        assert_eq!(queue.eligibility_codes(), vec!['Y', 'Y', 'N']);

        assert_eq!(queue.remove(), Ok(c));
        assert_eq!(queue.remove(), Ok(c2));

        queue.add(c);
        assert_eq!(queue.eligibility_codes(), vec!['N']);
        queue.add(c2);
        assert_eq!(queue.eligibility_codes(), vec!['N']);
        assert_counts_consistent(&queue);
    }

    #[test]
    fn test_self_chaining_is_capped_at_two() {
        let (a, b) = (PartyId::ONE, PartyId::TWO);
        let mut queue = sophias();

        queue.add(a);
        queue.add(a);
        queue.add(b);
        assert_eq!(queue.eligibility_codes(), vec!['Y', 'Y', 'Y']);

        queue.add(a);
        assert_eq!(queue.eligibility_codes(), vec!['Y', 'Y', 'Y', 'N']);

        queue.remove().unwrap();
        queue.add(a);
        assert_eq!(queue.order(), vec![a, b, a, a]);
        assert_eq!(queue.eligibility_codes(), vec!['Y', 'Y', 'N', 'Y']);
        assert_counts_consistent(&queue);
    }

    #[test]
    fn test_pruning_pops_flags_in_lockstep() {
        let mut queue = RestrictedBattleQueue::new(
            Character::with_stats("r", CharacterClass::Rogue, 100, 2),
            Character::new("m", CharacterClass::Mage),
        );
        queue.add(PartyId::ONE);
        queue.add(PartyId::ONE);
        queue.add(PartyId::TWO);
        assert_eq!(queue.eligible_count(PartyId::ONE), 2);

        assert_eq!(queue.peek(), Ok(PartyId::TWO));
        assert_eq!(queue.eligibility_codes(), vec!['Y']);
        assert_eq!(queue.eligible_count(PartyId::ONE), 0);
        assert_eq!(queue.eligible_count(PartyId::TWO), 1);
        assert_counts_consistent(&queue);
    }

    #[test]
    fn test_drained_queue_treats_party_as_new() {
        let (a, b) = (PartyId::ONE, PartyId::TWO);
        let mut queue = sophias();
        queue.add(a);
        queue.add(b);
        queue.remove().unwrap();
        queue.remove().unwrap();

        assert!(queue.is_empty());
        assert_eq!(queue.first_actor(), Some(a));
        assert_eq!(queue.second_actor(), Some(b));

        queue.add(a);
        assert_eq!(queue.eligibility_codes(), vec!['Y']);
        assert_eq!(queue.first_actor(), Some(a));
    }

    #[test]
    fn test_copy_reproduces_eligibility() {
        let mut queue = RestrictedBattleQueue::new(
            Character::new("r", CharacterClass::Rogue),
            Character::new("r2", CharacterClass::Rogue),
        );
        queue.add(PartyId::ONE);
        queue.add(PartyId::TWO);

        let mut copy = queue.copy();
        Character::perform(&mut copy, PartyId::ONE, Action::Attack).unwrap();

        assert_eq!(copy.to_string(), "r (Rogue): 100/97 -> r2 (Rogue): 95/100 -> r (Rogue): 100/97");
        assert_eq!(copy.eligibility_codes(), vec!['Y', 'Y', 'Y']);
        assert_eq!(queue.to_string(), "r (Rogue): 100/100 -> r2 (Rogue): 100/100");
        assert_eq!(queue.eligibility_codes(), vec!['Y', 'Y']);
        assert_counts_consistent(&copy);
    }

    #[test]
    fn test_copy_rederives_flags_from_fresh_replay() {
        let (a, b) = (PartyId::ONE, PartyId::TWO);
        let mut queue = sophias();
        queue.add(a);
        queue.add(b);
        queue.add(b);
        queue.remove().unwrap();

        // b leads with 'Y', then b with 'N'.
        assert_eq!(queue.eligibility_codes(), vec!['Y', 'N']);

        // Replayed as fresh inserts, the second b is an ordinary re-add.
        let copy = queue.copy();
        assert_eq!(copy.order(), queue.order());
        assert_eq!(copy.eligibility_codes(), vec!['Y', 'Y']);
        assert_eq!(copy.first_actor(), Some(a));
        assert_counts_consistent(&copy);
    }
}
