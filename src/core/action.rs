//! The action alphabet and ordered legal-action sets.
//!
//! A combatant only ever chooses between two verbs: its primary attack
//! (`'A'`) and its special attack (`'S'`). What each verb does is up to
//! the combatant; the queue and the search engine only compare and order
//! them.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// One of the two actions a combatant can take.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    /// Primary attack (`'A'`).
    Attack,
    /// Secondary, special attack (`'S'`).
    Special,
}

impl Action {
    /// Both actions in canonical order.
    pub const ALL: [Action; 2] = [Action::Attack, Action::Special];

    /// The single-letter code used by key input and diagnostics.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Action::Attack => 'A',
            Action::Special => 'S',
        }
    }

    /// Parse a key press into an action.
    ///
    /// ```
    /// use rust_duel::core::Action;
    ///
    /// assert_eq!(Action::from_code('A'), Some(Action::Attack));
    /// assert_eq!(Action::from_code('S'), Some(Action::Special));
    /// assert_eq!(Action::from_code('q'), None);
    /// ```
    #[must_use]
    pub const fn from_code(code: char) -> Option<Action> {
        match code {
            'A' => Some(Action::Attack),
            'S' => Some(Action::Special),
            _ => None,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Code of a policy decision, with `'X'` standing for "no valid action".
#[must_use]
pub fn choice_code(choice: Option<Action>) -> char {
    choice.map_or('X', Action::code)
}

/// The ordered set of actions currently legal for a combatant.
///
/// Always iterates `Attack` before `Special`; the search engine's
/// tie-breaking depends on that order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionSet {
    actions: SmallVec<[Action; 2]>,
}

impl ActionSet {
    /// The empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from per-action legality flags.
    #[must_use]
    pub fn from_flags(attack: bool, special: bool) -> Self {
        let mut set = Self::new();
        if attack {
            set.actions.push(Action::Attack);
        }
        if special {
            set.actions.push(Action::Special);
        }
        set
    }

    /// Check whether `action` is legal.
    #[must_use]
    pub fn contains(&self, action: Action) -> bool {
        self.actions.contains(&action)
    }

    /// Number of legal actions (0 to 2).
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Check if no action is legal.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Iterate in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        self.actions.iter().copied()
    }

    /// The actions as a slice, in canonical order.
    #[must_use]
    pub fn as_slice(&self) -> &[Action] {
        &self.actions
    }
}

impl std::fmt::Display for ActionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let codes: Vec<String> = self.iter().map(|a| a.code().to_string()).collect();
        write!(f, "[{}]", codes.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_codes() {
        for action in Action::ALL {
            assert_eq!(Action::from_code(action.code()), Some(action));
        }
        assert_eq!(format!("{}", Action::Special), "S");
    }

    #[test]
    fn test_choice_code_sentinel() {
        assert_eq!(choice_code(Some(Action::Attack)), 'A');
        assert_eq!(choice_code(None), 'X');
    }

    #[test]
    fn test_action_set_order() {
        let set = ActionSet::from_flags(true, true);
        assert_eq!(set.as_slice(), &[Action::Attack, Action::Special]);
        assert_eq!(format!("{}", set), "[A, S]");

        let special_only = ActionSet::from_flags(false, true);
        assert!(!special_only.contains(Action::Attack));
        assert!(special_only.contains(Action::Special));
        assert_eq!(special_only.len(), 1);
    }

    #[test]
    fn test_action_set_empty() {
        let set = ActionSet::from_flags(false, false);
        assert!(set.is_empty());
        assert_eq!(set, ActionSet::new());
        assert_eq!(format!("{}", set), "[]");
    }

    #[test]
    fn test_action_set_serialization() {
        let set = ActionSet::from_flags(true, false);
        let json = serde_json::to_string(&set).unwrap();
        let deserialized: ActionSet = serde_json::from_str(&json).unwrap();
        assert_eq!(set, deserialized);
    }
}
