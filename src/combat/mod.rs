//! Combatants: the capability contract the queues and search engine rely on,
//! plus the concrete characters, skills and decision trees of the game.
//!
//! The core only needs four things from a combatant: its legal actions,
//! its HP, a way to execute an action against a queue, and cheap
//! independent clones. [`Combatant`] is that contract; [`Character`] is the
//! one implementation shipped with the crate.

mod combatant;
mod character;
mod skill;
mod decision_tree;

pub use combatant::Combatant;
pub use character::{Character, CharacterClass};
pub use skill::Skill;
pub use decision_tree::{Comparison, Condition, SkillDecisionTree, Stat, Subject};
