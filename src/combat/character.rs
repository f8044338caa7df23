//! Characters: named combatants with HP, SP, and a class.
//!
//! Every class has a defense value and one skill per action. Characters
//! start with 100 HP and 100 SP.

use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

use crate::core::{Action, ActionSet, BattleError, PartyId, Result};
use crate::queue::TurnQueue;

use super::combatant::Combatant;
use super::decision_tree::SkillDecisionTree;
use super::skill::Skill;

/// Starting HP and SP of a freshly created character.
pub const STARTING_HP: u32 = 100;
pub const STARTING_SP: u32 = 100;

/// Character class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterClass {
    Rogue,
    Mage,
    Vampire,
    Sorcerer,
}

impl CharacterClass {
    /// Flat damage reduction applied to every hit taken.
    #[must_use]
    pub const fn defense(self) -> u32 {
        match self {
            CharacterClass::Rogue => 10,
            CharacterClass::Mage => 8,
            CharacterClass::Vampire => 3,
            CharacterClass::Sorcerer => 10,
        }
    }

    /// The skill bound to `action` for this class.
    #[must_use]
    pub const fn skill(self, action: Action) -> Skill {
        match (self, action) {
            (CharacterClass::Rogue, Action::Attack) => Skill::RogueAttack,
            (CharacterClass::Rogue, Action::Special) => Skill::RogueSpecial,
            (CharacterClass::Mage, Action::Attack) => Skill::MageAttack,
            (CharacterClass::Mage, Action::Special) => Skill::MageSpecial,
            (CharacterClass::Vampire, Action::Attack) => Skill::VampireAttack,
            (CharacterClass::Vampire, Action::Special) => Skill::VampireSpecial,
            (CharacterClass::Sorcerer, Action::Attack) => Skill::SorcererAttack,
            (CharacterClass::Sorcerer, Action::Special) => Skill::SorcererSpecial,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CharacterClass::Rogue => "Rogue",
            CharacterClass::Mage => "Mage",
            CharacterClass::Vampire => "Vampire",
            CharacterClass::Sorcerer => "Sorcerer",
        }
    }
}

impl std::fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A combatant of the game.
///
/// Cheap to clone: the name and the Sorcerer's decision tree are shared
/// behind `Arc`s, only HP and SP are copied.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Character {
    name: Arc<str>,
    class: CharacterClass,
    hp: u32,
    sp: u32,

    /// Consulted by the Sorcerer's attack; `None` means the default tree.
    decision_tree: Option<Arc<SkillDecisionTree>>,
}

impl Character {
    /// Create a character with full HP and SP.
    pub fn new(name: &str, class: CharacterClass) -> Self {
        Self::with_stats(name, class, STARTING_HP, STARTING_SP)
    }

    /// Create a character with explicit HP and SP.
    pub fn with_stats(name: &str, class: CharacterClass, hp: u32, sp: u32) -> Self {
        Self {
            name: Arc::from(name),
            class,
            hp,
            sp,
            decision_tree: None,
        }
    }

    /// Replace the decision tree consulted by the Sorcerer's attack.
    #[must_use]
    pub fn with_decision_tree(mut self, tree: SkillDecisionTree) -> Self {
        self.decision_tree = Some(Arc::new(tree));
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn class(&self) -> CharacterClass {
        self.class
    }

    #[must_use]
    pub fn sp(&self) -> u32 {
        self.sp
    }

    /// The decision tree for Sorcerer attacks.
    #[must_use]
    pub fn decision_tree(&self) -> Arc<SkillDecisionTree> {
        static DEFAULT: OnceLock<Arc<SkillDecisionTree>> = OnceLock::new();
        let tree = self
            .decision_tree
            .as_ref()
            .unwrap_or_else(|| DEFAULT.get_or_init(|| Arc::new(SkillDecisionTree::default_tree())));
        Arc::clone(tree)
    }

    /// Take `damage` reduced by defense. HP floors at 0.
    pub fn apply_damage(&mut self, damage: u32) {
        let taken = damage.saturating_sub(self.class.defense());
        self.hp = self.hp.saturating_sub(taken);
    }

    /// Spend SP.
    pub fn reduce_sp(&mut self, cost: u32) {
        self.sp = self.sp.saturating_sub(cost);
    }

    /// Regain HP. There is no cap.
    pub fn restore_hp(&mut self, amount: u32) {
        self.hp = self.hp.saturating_add(amount);
    }
}

impl Combatant for Character {
    fn available_actions(&self) -> ActionSet {
        let attack = self.class.skill(Action::Attack).cost();
        let special = self.class.skill(Action::Special).cost();
        ActionSet::from_flags(self.sp >= attack, self.sp >= special)
    }

    fn hp(&self) -> u32 {
        self.hp
    }

    fn perform(queue: &mut dyn TurnQueue<Self>, caster: PartyId, action: Action) -> Result<()> {
        let character = queue.party(caster);
        if !character.available_actions().contains(action) {
            return Err(BattleError::InvalidAction { party: caster, action });
        }
        let skill = character.class.skill(action);
        skill.apply(queue, caster)
    }
}

impl std::fmt::Display for Character {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}/{}", self.name, self.class, self.hp, self.sp)
    }
}
