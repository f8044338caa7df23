//! Depth-first search on the call stack.

use crate::combat::Combatant;
use crate::core::{BattleError, Result};
use crate::queue::TurnQueue;

use super::{signed_score, successor, terminal_score};

/// Score of `queue` for its mover.
pub fn score<C, Q>(queue: &Q) -> Result<i64>
where
    C: Combatant,
    Q: TurnQueue<C>,
{
    let mut root = queue.copy();
    score_owned::<C, Q>(&mut root)
}

fn score_owned<C, Q>(queue: &mut Q) -> Result<i64>
where
    C: Combatant,
    Q: TurnQueue<C>,
{
    if queue.is_over() {
        return terminal_score::<C, Q>(queue);
    }

    let mover = queue.peek()?;
    let actions = queue.party(mover).available_actions();

    let mut best: Option<i64> = None;
    for action in actions.iter() {
        let (mut child, _) = successor::<C, Q>(queue, action)?;
        let child_score = score_owned::<C, Q>(&mut child)?;
        let signed = signed_score(child_score, child.peek()?, mover);
        best = Some(best.map_or(signed, |b| b.max(signed)));
    }
    best.ok_or(BattleError::NoLegalAction(mover))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{Character, CharacterClass};
    use crate::core::PartyId;
    use crate::queue::BattleQueue;

    #[test]
    fn test_terminal_root_is_not_expanded() {
        let mut queue = BattleQueue::new(
            Character::with_stats("r", CharacterClass::Rogue, 40, 100),
            Character::with_stats("m", CharacterClass::Mage, 0, 100),
        );
        queue.add(PartyId::TWO);
        queue.add(PartyId::ONE);

        // Mage leads but is down; the Rogue wins with 40.
        assert_eq!(score(&queue), Ok(-40));
    }

    #[test]
    fn test_one_ply_win() {
        let mut queue = BattleQueue::new(
            Character::with_stats("m", CharacterClass::Mage, 60, 5),
            Character::with_stats("r", CharacterClass::Rogue, 10, 0),
        );
        queue.add(PartyId::ONE);
        queue.add(PartyId::TWO);
        assert_eq!(score(&queue), Ok(60));
    }

    #[test]
    fn test_caller_queue_untouched() {
        let mut queue = BattleQueue::new(
            Character::with_stats("r", CharacterClass::Rogue, 20, 6),
            Character::with_stats("r2", CharacterClass::Rogue, 20, 6),
        );
        queue.add(PartyId::ONE);
        queue.add(PartyId::TWO);
        let before = queue.to_string();

        score(&queue).unwrap();
        assert_eq!(queue.to_string(), before);
    }
}
