//! Match runner.
//!
//! A `Duel` owns one queue and one playstyle per party. Each step asks the
//! mover's playstyle for an action and applies it with the same transition
//! the search engine uses ([`search::advance`]).
//!
//! ```rust
//! use rust_duel::combat::{Character, CharacterClass};
//! use rust_duel::core::{DuelConfig, PartyMap};
//! use rust_duel::duel;
//! use rust_duel::playstyle::Playstyle;
//!
//! let config = DuelConfig::default().with_seed(3);
//! let mut rng = config.rng();
//! let outcome = duel::play(
//!     Character::new("Sophia", CharacterClass::Rogue),
//!     Character::new("Merlin", CharacterClass::Mage),
//!     PartyMap::new(Playstyle::random_from(&mut rng), Playstyle::random_from(&mut rng)),
//!     &config,
//! )
//! .unwrap();
//!
//! assert!(outcome.turns > 0);
//! ```

use std::marker::PhantomData;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::combat::Combatant;
use crate::core::{Action, BattleError, DuelConfig, PartyId, PartyMap, Result};
use crate::playstyle::Playstyle;
use crate::queue::{BattleQueue, RestrictedBattleQueue, TurnQueue};
use crate::search;

/// How a finished (or cut short) match ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelOutcome {
    /// `None` on a tie, or when the turn limit stopped the match.
    pub winner: Option<PartyId>,

    /// Actions applied.
    pub turns: u32,

    pub final_hp: PartyMap<u32>,

    /// Whether the turn limit ended the match before it was over.
    pub truncated: bool,
}

/// A match in progress.
#[derive(Debug)]
pub struct Duel<C, Q> {
    queue: Q,
    playstyles: PartyMap<Playstyle>,
    config: DuelConfig,
    turns: u32,
    _combatant: PhantomData<fn() -> C>,
}

impl<C, Q> Duel<C, Q>
where
    C: Combatant,
    Q: TurnQueue<C>,
{
    /// Create a match over an already seeded queue.
    pub fn new(queue: Q, playstyles: PartyMap<Playstyle>, config: DuelConfig) -> Self {
        Self {
            queue,
            playstyles,
            config,
            turns: 0,
            _combatant: PhantomData,
        }
    }

    #[must_use]
    pub fn queue(&self) -> &Q {
        &self.queue
    }

    #[must_use]
    pub fn config(&self) -> &DuelConfig {
        &self.config
    }

    #[must_use]
    pub fn turns(&self) -> u32 {
        self.turns
    }

    #[must_use]
    pub fn playstyle(&self, party: PartyId) -> &Playstyle {
        &self.playstyles[party]
    }

    pub fn is_over(&mut self) -> bool {
        self.queue.is_over()
    }

    pub fn winner(&mut self) -> Option<PartyId> {
        self.queue.winner()
    }

    /// The party whose playstyle decides the next action.
    pub fn to_move(&mut self) -> Result<PartyId> {
        self.queue.peek()
    }

    /// Play one turn.
    ///
    /// `input` is forwarded to the mover's playstyle. Returns the applied
    /// action, or `None` if the playstyle produced no action, in which case
    /// nothing changes.
    pub fn step(&mut self, input: Option<char>) -> Result<Option<Action>> {
        if self.queue.is_over() {
            return Err(BattleError::GameOver);
        }

        let mover = self.queue.peek()?;
        let Some(action) = self.playstyles[mover].select_attack::<C, Q>(&mut self.queue, input)? else {
            debug!(%mover, "no action selected");
            return Ok(None);
        };

        search::advance::<C, Q>(&mut self.queue, action)?;
        self.turns += 1;
        info!(turn = self.turns, %mover, %action, queue = %self.queue.render(), "turn played");
        Ok(Some(action))
    }

    /// Play automated turns until the game is over or the turn limit hits.
    ///
    /// Fails with `ManualInputRequired` if a manual party must move, and
    /// with `NoLegalAction` if an automated playstyle yields no action.
    pub fn run(&mut self) -> Result<DuelOutcome> {
        let mut truncated = false;
        while !self.queue.is_over() {
            if self.config.turn_limit_reached(self.turns) {
                truncated = true;
                break;
            }
            let mover = self.queue.peek()?;
            if self.playstyles[mover].is_manual() {
                return Err(BattleError::ManualInputRequired(mover));
            }
            if self.step(None)?.is_none() {
                return Err(BattleError::NoLegalAction(mover));
            }
        }
        Ok(self.outcome(truncated))
    }

    fn outcome(&mut self, truncated: bool) -> DuelOutcome {
        let winner = if truncated { None } else { self.queue.winner() };
        let final_hp = PartyMap::from_fn(|party| self.queue.party(party).hp());
        let outcome = DuelOutcome {
            winner,
            turns: self.turns,
            final_hp,
            truncated,
        };
        info!(winner = ?outcome.winner, turns = outcome.turns, truncated, "duel finished");
        outcome
    }
}

/// Run an automated match between two combatants.
///
/// The first combatant acts first. `config.restricted` selects the
/// restricted queue.
pub fn play<C: Combatant>(one: C, two: C, playstyles: PartyMap<Playstyle>, config: &DuelConfig) -> Result<DuelOutcome> {
    if config.restricted {
        let queue = seeded(RestrictedBattleQueue::new(one, two));
        Duel::new(queue, playstyles, config.clone()).run()
    } else {
        let queue = seeded(BattleQueue::new(one, two));
        Duel::new(queue, playstyles, config.clone()).run()
    }
}

fn seeded<C: Combatant, Q: TurnQueue<C>>(mut queue: Q) -> Q {
    queue.add(PartyId::ONE);
    queue.add(PartyId::TWO);
    queue
}
