//! Skills: what an action does to the two parties and to the queue.

use serde::{Deserialize, Serialize};

use crate::core::{PartyId, Result};
use crate::queue::TurnQueue;

use super::character::Character;
use super::combatant::Combatant;

/// Every skill in the game. Each class binds one skill to each action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Skill {
    RogueAttack,
    RogueSpecial,
    MageAttack,
    MageSpecial,
    VampireAttack,
    VampireSpecial,
    SorcererAttack,
    SorcererSpecial,
}

impl Skill {
    /// SP deducted from the caster.
    #[must_use]
    pub const fn cost(self) -> u32 {
        match self {
            Skill::RogueAttack => 3,
            Skill::RogueSpecial => 10,
            Skill::MageAttack => 5,
            Skill::MageSpecial => 30,
            Skill::VampireAttack => 15,
            Skill::VampireSpecial => 20,
            Skill::SorcererAttack => 15,
            Skill::SorcererSpecial => 20,
        }
    }

    /// Raw damage before the target's defense.
    ///
    /// The Sorcerer's attack reports 0; its damage depends on the skill
    /// its decision tree picks.
    #[must_use]
    pub const fn damage(self) -> u32 {
        match self {
            Skill::RogueAttack => 15,
            Skill::RogueSpecial => 20,
            Skill::MageAttack => 20,
            Skill::MageSpecial => 40,
            Skill::VampireAttack => 20,
            Skill::VampireSpecial => 30,
            Skill::SorcererAttack => 0,
            Skill::SorcererSpecial => 25,
        }
    }

    /// Use this skill from `caster` on its enemy.
    ///
    /// Legality is the caller's concern; `Character::perform` checks it.
    pub fn apply(self, queue: &mut dyn TurnQueue<Character>, caster: PartyId) -> Result<()> {
        let target = caster.enemy();
        match self {
            Skill::RogueAttack | Skill::MageAttack => {
                self.deal_damage(queue, caster);
                queue.add(caster);
            }
            Skill::RogueSpecial => {
                self.deal_damage(queue, caster);
                queue.add(caster);
                queue.add(caster);
            }
            Skill::MageSpecial => {
                self.deal_damage(queue, caster);
                queue.add(target);
                queue.add(caster);
            }
            Skill::VampireAttack => {
                self.drain(queue, caster);
                queue.add(caster);
            }
            Skill::VampireSpecial => {
                self.drain(queue, caster);
                queue.add(caster);
                queue.add(caster);
                queue.add(target);
            }
            Skill::SorcererAttack => {
                // The tree sees the caster before the cost is paid.
                let picked = queue
                    .party(caster)
                    .decision_tree()
                    .pick_skill(queue.party(caster), queue.party(target));
                queue.party_mut(caster).reduce_sp(self.cost());
                picked.channel(queue, caster);
            }
            Skill::SorcererSpecial => {
                self.deal_damage(queue, caster);
                while !queue.is_empty() {
                    queue.remove()?;
                }
                queue.add(caster);
                queue.add(target);
                queue.add(caster);
            }
        }
        Ok(())
    }

    fn deal_damage(self, queue: &mut dyn TurnQueue<Character>, caster: PartyId) {
        queue.party_mut(caster).reduce_sp(self.cost());
        queue.party_mut(caster.enemy()).apply_damage(self.damage());
    }

    /// Deal damage and heal the caster by the HP actually removed.
    fn drain(self, queue: &mut dyn TurnQueue<Character>, caster: PartyId) {
        let before = queue.party(caster.enemy()).hp();
        self.deal_damage(queue, caster);
        let dealt = before - queue.party(caster.enemy()).hp();
        queue.party_mut(caster).restore_hp(dealt);
    }

    /// The effect a Sorcerer produces when its tree picks this skill.
    ///
    /// The SP cost has already been paid. Only plain Rogue and Mage skills
    /// have an effect.
    fn channel(self, queue: &mut dyn TurnQueue<Character>, caster: PartyId) {
        let target = caster.enemy();
        match self {
            Skill::MageAttack | Skill::RogueAttack => {
                queue.party_mut(target).apply_damage(self.damage());
                queue.add(caster);
            }
            Skill::MageSpecial => {
                queue.party_mut(target).apply_damage(self.damage());
                queue.add(target);
                queue.add(caster);
            }
            Skill::RogueSpecial => {
                queue.party_mut(target).apply_damage(self.damage());
                queue.add(caster);
                queue.add(caster);
            }
            _ => {}
        }
    }
}

impl std::fmt::Display for Skill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}
