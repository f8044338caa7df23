//! Turn-order queues.
//!
//! A turn queue is an ordered sequence of party references saying who acts
//! next. Parties may occupy several slots. Two kinds are provided:
//!
//! - [`BattleQueue`]: plain queue; any insertion is accepted.
//! - [`RestrictedBattleQueue`]: tracks per-slot insertion rights so a party
//!   cannot be spammed into the queue by its opponent, and can only chain
//!   itself a bounded number of times.
//!
//! ## Pruning
//!
//! Both kinds drop leading entries whose party has no legal action before
//! answering `peek`, `is_empty` or `remove`. Pruning is idempotent and is
//! the only mutation a read can cause, which is why those reads take
//! `&mut self`.
//!
//! ## Copying
//!
//! `copy()` does not clone the queue structurally. It builds a fresh queue
//! over a cloned roster and replays the observable sequence through `add`,
//! so insertion side effects (first-actor fixing, eligibility) are
//! re-derived exactly as a fresh queue would derive them.
//!
//! ```
//! use rust_duel::combat::{Character, CharacterClass};
//! use rust_duel::core::PartyId;
//! use rust_duel::queue::{BattleQueue, TurnQueue};
//!
//! let mut queue = BattleQueue::new(
//!     Character::new("r", CharacterClass::Rogue),
//!     Character::new("m", CharacterClass::Mage),
//! );
//! queue.add(PartyId::ONE);
//! queue.add(PartyId::TWO);
//!
//! let mut copy = queue.copy();
//! assert_eq!(copy.to_string(), queue.to_string());
//! assert_eq!(copy.peek(), Ok(PartyId::ONE));
//! ```

mod basic;
mod restricted;

pub use basic::BattleQueue;
pub use restricted::{Eligibility, RestrictedBattleQueue};

use crate::combat::Combatant;
use crate::core::{PartyId, Result};

/// Capabilities shared by every turn queue.
///
/// The search engine and the combatants only talk to queues through this
/// trait. It is object-safe apart from `copy`, so combatants receive a
/// `&mut dyn TurnQueue<C>` when they execute an action.
pub trait TurnQueue<C: Combatant> {
    /// Append `party` at the back.
    ///
    /// The very first insertion fixes `first_actor` to `party` and
    /// `second_actor` to its enemy.
    fn add(&mut self, party: PartyId);

    /// Prune, then pop and return the front party.
    ///
    /// Fails with `EmptyQueue` if nothing remains after pruning.
    fn remove(&mut self) -> Result<PartyId>;

    /// Prune, then return the front party without removing it.
    ///
    /// Falls back to `first_actor` when pruning empties the queue, so
    /// terminal states always have a reference party. Fails with
    /// `Unseeded` only if nothing was ever added.
    fn peek(&mut self) -> Result<PartyId>;

    /// Prune, then report whether no party is queued.
    fn is_empty(&mut self) -> bool;

    /// The party fixed by the first ever insertion.
    fn first_actor(&self) -> Option<PartyId>;

    /// The enemy of `first_actor`.
    fn second_actor(&self) -> Option<PartyId> {
        self.first_actor().map(PartyId::enemy)
    }

    /// Borrow a party's combatant.
    fn party(&self, party: PartyId) -> &C;

    /// Mutably borrow a party's combatant.
    fn party_mut(&mut self, party: PartyId) -> &mut C;

    /// The queued parties front to back, without pruning.
    fn order(&self) -> Vec<PartyId>;

    /// Number of queued slots, without pruning.
    fn len(&self) -> usize;

    /// An independent queue that is observably equivalent to this one.
    fn copy(&self) -> Self
    where
        Self: Sized;

    /// Whether the game is over: nothing left to act, or a party at 0 HP.
    fn is_over(&mut self) -> bool {
        if self.is_empty() {
            return true;
        }
        match self.first_actor() {
            Some(first) => self.party(first).hp() == 0 || self.party(first.enemy()).hp() == 0,
            None => true,
        }
    }

    /// The winner once the game is over.
    ///
    /// `None` while the game continues, when both parties still stand
    /// with nothing left to act, and when both are at 0 HP.
    fn winner(&mut self) -> Option<PartyId> {
        if !self.is_over() {
            return None;
        }
        let first = self.first_actor()?;
        let second = first.enemy();
        match (self.party(first).hp(), self.party(second).hp()) {
            (0, 0) => None,
            (0, _) => Some(second),
            (_, 0) => Some(first),
            _ => None,
        }
    }

    /// Deterministic rendering of the queue order, e.g.
    /// `r (Rogue): 100/97 -> m (Mage): 95/100`.
    fn render(&self) -> String {
        self.order()
            .into_iter()
            .map(|party| self.party(party).to_string())
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

/// Rebuild a queue by replaying the insertion protocol on `fresh`.
///
/// The first actor is added and immediately consumed so it is fixed
/// exactly as in the source queue; then every queued slot is re-added in
/// order.
pub(crate) fn replay<C, Q>(mut fresh: Q, first: Option<PartyId>, order: impl IntoIterator<Item = PartyId>) -> Q
where
    C: Combatant,
    Q: TurnQueue<C>,
{
    let Some(first) = first else {
        return fresh;
    };

    fresh.add(first);
    if !fresh.is_empty() {
        // Cannot fail: the queue is non-empty after pruning.
        let _ = fresh.remove();
    }

    for party in order {
        fresh.add(party);
    }
    fresh
}
