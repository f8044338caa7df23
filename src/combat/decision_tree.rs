//! The Sorcerer's skill decision tree.
//!
//! Each node holds a skill, a condition over (caster, target), a priority,
//! and children. Picking a skill collects candidate nodes and returns the
//! one with the lowest priority:
//!
//! - a leaf is a candidate;
//! - a node whose condition holds defers to its children's candidates;
//! - a node whose condition fails is itself a candidate.
//!
//! Conditions are plain data so trees can be serialized.

use serde::{Deserialize, Serialize};

use super::character::Character;
use super::combatant::Combatant;
use super::skill::Skill;

/// Which side of the exchange a condition looks at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    Caster,
    Target,
}

/// Which resource a condition reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    Hp,
    Sp,
}

/// Strict comparison against a threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparison {
    Above,
    Below,
}

/// A predicate over the caster and its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Condition {
    pub subject: Subject,
    pub stat: Stat,
    pub comparison: Comparison,
    pub threshold: u32,
}

impl Condition {
    #[must_use]
    pub const fn new(subject: Subject, stat: Stat, comparison: Comparison, threshold: u32) -> Self {
        Self {
            subject,
            stat,
            comparison,
            threshold,
        }
    }

    #[must_use]
    pub const fn caster_hp_above(threshold: u32) -> Self {
        Self::new(Subject::Caster, Stat::Hp, Comparison::Above, threshold)
    }

    #[must_use]
    pub const fn caster_sp_above(threshold: u32) -> Self {
        Self::new(Subject::Caster, Stat::Sp, Comparison::Above, threshold)
    }

    #[must_use]
    pub const fn target_hp_below(threshold: u32) -> Self {
        Self::new(Subject::Target, Stat::Hp, Comparison::Below, threshold)
    }

    #[must_use]
    pub const fn target_sp_above(threshold: u32) -> Self {
        Self::new(Subject::Target, Stat::Sp, Comparison::Above, threshold)
    }

    /// Evaluate against a caster and its target.
    #[must_use]
    pub fn evaluate(&self, caster: &Character, target: &Character) -> bool {
        let subject = match self.subject {
            Subject::Caster => caster,
            Subject::Target => target,
        };
        let value = match self.stat {
            Stat::Hp => subject.hp(),
            Stat::Sp => subject.sp(),
        };
        match self.comparison {
            Comparison::Above => value > self.threshold,
            Comparison::Below => value < self.threshold,
        }
    }
}

/// A node of the decision tree, and the subtree below it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkillDecisionTree {
    pub skill: Skill,
    pub condition: Condition,
    pub priority: u32,
    pub children: Vec<SkillDecisionTree>,
}

impl SkillDecisionTree {
    /// A leaf node.
    #[must_use]
    pub fn new(skill: Skill, condition: Condition, priority: u32) -> Self {
        Self {
            skill,
            condition,
            priority,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<SkillDecisionTree>) -> Self {
        self.children = children;
        self
    }

    /// Candidate nodes for this exchange, in tree order.
    #[must_use]
    pub fn candidates(&self, caster: &Character, target: &Character) -> Vec<&SkillDecisionTree> {
        let mut out = Vec::new();
        self.collect(caster, target, &mut out);
        out
    }

    fn collect<'a>(&'a self, caster: &Character, target: &Character, out: &mut Vec<&'a SkillDecisionTree>) {
        if self.children.is_empty() || !self.condition.evaluate(caster, target) {
            out.push(self);
            return;
        }
        for child in &self.children {
            child.collect(caster, target, out);
        }
    }

    /// The skill of the lowest-priority candidate; the first wins a tie.
    #[must_use]
    pub fn pick_skill(&self, caster: &Character, target: &Character) -> Skill {
        self.candidates(caster, target)
            .into_iter()
            .min_by_key(|node| node.priority)
            .map_or(self.skill, |node| node.skill)
    }

    /// The tree Sorcerers use unless given another.
    #[must_use]
    pub fn default_tree() -> Self {
        let t4 = SkillDecisionTree::new(Skill::RogueSpecial, Condition::target_hp_below(30), 4)
            .with_children(vec![SkillDecisionTree::new(
                Skill::RogueAttack,
                Condition::caster_hp_above(90),
                6,
            )]);
        let t3 = SkillDecisionTree::new(Skill::MageAttack, Condition::caster_sp_above(20), 3)
            .with_children(vec![t4]);
        let t2 = SkillDecisionTree::new(Skill::MageSpecial, Condition::target_sp_above(40), 2)
            .with_children(vec![SkillDecisionTree::new(
                Skill::RogueAttack,
                Condition::caster_hp_above(90),
                8,
            )]);
        let t1 = SkillDecisionTree::new(Skill::RogueAttack, Condition::caster_hp_above(90), 1)
            .with_children(vec![SkillDecisionTree::new(
                Skill::RogueSpecial,
                Condition::caster_hp_above(90),
                7,
            )]);

        SkillDecisionTree::new(Skill::MageAttack, Condition::caster_hp_above(50), 5)
            .with_children(vec![t3, t2, t1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::CharacterClass;

    fn mages() -> (Character, Character) {
        (
            Character::new("m", CharacterClass::Mage),
            Character::new("m2", CharacterClass::Mage),
        )
    }

    #[test]
    fn test_condition_is_strict() {
        let caster = Character::with_stats("c", CharacterClass::Mage, 90, 20);
        let target = Character::with_stats("t", CharacterClass::Mage, 30, 41);

        assert!(!Condition::caster_hp_above(90).evaluate(&caster, &target));
        assert!(!Condition::caster_sp_above(20).evaluate(&caster, &target));
        assert!(!Condition::target_hp_below(30).evaluate(&caster, &target));
        assert!(Condition::target_sp_above(40).evaluate(&caster, &target));
    }

    #[test]
    fn test_default_tree_candidates() {
        let (c, c2) = mages();
        let tree = SkillDecisionTree::default_tree();
        let candidates = tree.candidates(&c, &c2);

        let priorities: Vec<u32> = candidates.iter().map(|n| n.priority).collect();
        assert_eq!(priorities, vec![4, 8, 7]);
        assert_eq!(candidates[1].skill.cost(), 3);
    }

    #[test]
    fn test_default_tree_pick() {
        let (c, c2) = mages();
        let picked = SkillDecisionTree::default_tree().pick_skill(&c, &c2);
        assert_eq!(picked, Skill::RogueSpecial);
        assert_eq!(picked.cost(), 10);
    }

    #[test]
    fn test_failed_root_condition_yields_root() {
        let caster = Character::with_stats("c", CharacterClass::Sorcerer, 50, 100);
        let target = Character::new("t", CharacterClass::Rogue);
        assert_eq!(
            SkillDecisionTree::default_tree().pick_skill(&caster, &target),
            Skill::MageAttack
        );
    }

    #[test]
    fn test_low_target_hp_descends_further() {
        let caster = Character::with_stats("c", CharacterClass::Sorcerer, 95, 100);
        let target = Character::with_stats("t", CharacterClass::Rogue, 20, 10);

        // t4 holds, so its leaf (p6) competes with t2 (p2, failed) and t1's leaf (p7).
        let tree = SkillDecisionTree::default_tree();
        let priorities: Vec<u32> = tree.candidates(&caster, &target).iter().map(|n| n.priority).collect();
        assert_eq!(priorities, vec![6, 2, 7]);
        assert_eq!(tree.pick_skill(&caster, &target), Skill::MageSpecial);
    }

    #[test]
    fn test_tie_goes_to_first_candidate() {
        let tree = SkillDecisionTree::new(Skill::MageAttack, Condition::caster_hp_above(0), 9).with_children(vec![
            SkillDecisionTree::new(Skill::RogueAttack, Condition::caster_hp_above(0), 1),
            SkillDecisionTree::new(Skill::MageSpecial, Condition::caster_hp_above(0), 1),
        ]);
        let (c, c2) = mages();
        assert_eq!(tree.pick_skill(&c, &c2), Skill::RogueAttack);
    }

    #[test]
    fn test_serialization() {
        let tree = SkillDecisionTree::default_tree();
        let json = serde_json::to_string(&tree).unwrap();
        let deserialized: SkillDecisionTree = serde_json::from_str(&json).unwrap();
        assert_eq!(tree, deserialized);
    }
}
