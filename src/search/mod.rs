//! Exhaustive adversarial search over turn queues.
//!
//! ## Overview
//!
//! The score of a queue is the best outcome its mover (the front party)
//! can force under optimal play by both sides:
//!
//! - **Terminal**: 0 on a tie, otherwise `+hp` of the winner when the
//!   winner is the mover and `-hp` of the winner when it is not.
//! - **Non-terminal**: for each legal action, score the successor state
//!   from its own mover's perspective, negate it when that mover differs,
//!   and take the maximum.
//!
//! Two forms compute this: [`recursive`] walks the call stack and
//! [`iterative`] drives an explicit stack over an arena of search nodes.
//! They agree on every input.
//!
//! ## Usage
//!
//! ```rust
//! use rust_duel::combat::{Character, CharacterClass};
//! use rust_duel::core::{Action, PartyId, SearchStrategy};
//! use rust_duel::queue::{BattleQueue, TurnQueue};
//! use rust_duel::search;
//!
//! let mut queue = BattleQueue::new(
//!     Character::with_stats("r", CharacterClass::Rogue, 30, 3),
//!     Character::with_stats("m", CharacterClass::Mage, 5, 0),
//! );
//! queue.add(PartyId::ONE);
//! queue.add(PartyId::TWO);
//!
//! // The Rogue's only attack finishes the Mage.
//! assert_eq!(search::state_score(&queue, SearchStrategy::Recursive), Ok(30));
//! assert_eq!(search::state_score(&queue, SearchStrategy::Iterative), Ok(30));
//! assert_eq!(search::best_action(&queue, SearchStrategy::Recursive), Ok(Some(Action::Attack)));
//! ```
//!
//! Every entry point copies its input first, so the caller's queue is never
//! mutated.

pub mod iterative;
pub mod recursive;
pub mod stats;

pub use iterative::{NodeId, SearchNode, SearchTree};
pub use stats::SearchStats;

use tracing::debug;

use crate::combat::Combatant;
use crate::core::{Action, PartyId, Result, SearchStrategy};
use crate::queue::TurnQueue;

/// The state reached by the mover playing `action`.
///
/// Copies `queue` and [`advance`]s the copy. Returns the successor and the
/// party that moved.
pub fn successor<C, Q>(queue: &Q, action: Action) -> Result<(Q, PartyId)>
where
    C: Combatant,
    Q: TurnQueue<C>,
{
    let mut next = queue.copy();
    let mover = advance::<C, Q>(&mut next, action)?;
    Ok((next, mover))
}

/// Play `action` for the front party of `queue` in place.
///
/// The turn passes with one `remove()` only if the queue is non-empty
/// after the action. Returns the party that moved.
pub fn advance<C, Q>(queue: &mut Q, action: Action) -> Result<PartyId>
where
    C: Combatant,
    Q: TurnQueue<C>,
{
    let mover = queue.peek()?;
    C::perform(queue, mover, action)?;
    if !queue.is_empty() {
        queue.remove()?;
    }
    Ok(mover)
}

/// Score of a finished game from the perspective of its front party.
pub fn terminal_score<C, Q>(queue: &mut Q) -> Result<i64>
where
    C: Combatant,
    Q: TurnQueue<C>,
{
    let Some(winner) = queue.winner() else {
        return Ok(0);
    };
    let hp = i64::from(queue.party(winner).hp());
    if queue.peek()? == winner {
        Ok(hp)
    } else {
        Ok(-hp)
    }
}

/// Express a child's score from `mover`'s perspective.
#[inline]
pub(crate) fn signed_score(score: i64, front: PartyId, mover: PartyId) -> i64 {
    if front == mover {
        score
    } else {
        -score
    }
}

/// Score of `queue` for its mover.
pub fn state_score<C, Q>(queue: &Q, strategy: SearchStrategy) -> Result<i64>
where
    C: Combatant,
    Q: TurnQueue<C>,
{
    match strategy {
        SearchStrategy::Recursive => recursive::score::<C, Q>(queue),
        SearchStrategy::Iterative => iterative::score::<C, Q>(queue),
    }
}

/// Score of playing `action` from `queue`, from the current mover's
/// perspective.
pub fn score_action<C, Q>(queue: &Q, action: Action, strategy: SearchStrategy) -> Result<i64>
where
    C: Combatant,
    Q: TurnQueue<C>,
{
    let (mut next, mover) = successor::<C, Q>(queue, action)?;
    let score = state_score::<C, Q>(&next, strategy)?;
    Ok(signed_score(score, next.peek()?, mover))
}

/// The action the mover should take.
///
/// Returns `None` when the mover has no legal action, and the only legal
/// action without searching when there is one. Otherwise `Special` is
/// chosen only if it scores strictly higher than `Attack`.
pub fn best_action<C, Q>(queue: &Q, strategy: SearchStrategy) -> Result<Option<Action>>
where
    C: Combatant,
    Q: TurnQueue<C>,
{
    let mut root = queue.copy();
    let mover = root.peek()?;
    let actions = root.party(mover).available_actions();

    match actions.as_slice() {
        [] => {
            debug!(%mover, "no legal action");
            Ok(None)
        }
        [only] => Ok(Some(*only)),
        _ => {
            let attack = score_action::<C, Q>(&root, Action::Attack, strategy)?;
            let special = score_action::<C, Q>(&root, Action::Special, strategy)?;
            let choice = if attack < special {
                Action::Special
            } else {
                Action::Attack
            };
            debug!(%mover, attack, special, %choice, ?strategy, "search root resolved");
            Ok(Some(choice))
        }
    }
}
