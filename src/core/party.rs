//! Party identification and the fixed two-slot party table.
//!
//! ## PartyId
//!
//! Exactly two parties exist per game. A `PartyId` names one slot of the
//! table; the opposing party is always the other slot, so the `enemy`
//! relation never needs a back-reference.
//!
//! ## PartyMap
//!
//! Per-party storage backed by a `[T; 2]` for O(1) access. Cloning a
//! `PartyMap` clones both entries, and because `enemy` is resolved by slot
//! substitution, a cloned table is already correctly re-linked.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Identifier of one of the two parties in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PartyId(u8);

impl PartyId {
    /// The party occupying the first table slot.
    pub const ONE: PartyId = PartyId(0);

    /// The party occupying the second table slot.
    pub const TWO: PartyId = PartyId(1);

    /// Get the raw slot index (0 or 1).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The opposing party.
    ///
    /// ```
    /// use rust_duel::core::PartyId;
    ///
    /// assert_eq!(PartyId::ONE.enemy(), PartyId::TWO);
    /// assert_eq!(PartyId::TWO.enemy(), PartyId::ONE);
    /// ```
    #[must_use]
    pub const fn enemy(self) -> PartyId {
        PartyId(1 - self.0)
    }

    /// Both parties, in slot order.
    pub fn both() -> impl Iterator<Item = PartyId> {
        [PartyId::ONE, PartyId::TWO].into_iter()
    }
}

impl std::fmt::Display for PartyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Party {}", self.0 + 1)
    }
}

/// Per-party data storage.
///
/// ```
/// use rust_duel::core::{PartyId, PartyMap};
///
/// let mut hp = PartyMap::with_value(100u32);
/// hp[PartyId::TWO] = 40;
///
/// assert_eq!(hp[PartyId::ONE], 100);
/// assert_eq!(hp[PartyId::TWO.enemy()], 100);
/// assert_eq!(hp[PartyId::ONE.enemy()], 40);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartyMap<T> {
    slots: [T; 2],
}

impl<T> PartyMap<T> {
    /// Create a table from the two slot values.
    pub fn new(one: T, two: T) -> Self {
        Self { slots: [one, two] }
    }

    /// Create a table with values from a factory function.
    pub fn from_fn(factory: impl Fn(PartyId) -> T) -> Self {
        Self::new(factory(PartyId::ONE), factory(PartyId::TWO))
    }

    /// Create a table with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(value.clone(), value)
    }

    /// Get a reference to a party's data.
    #[must_use]
    pub fn get(&self, party: PartyId) -> &T {
        &self.slots[party.index()]
    }

    /// Get a mutable reference to a party's data.
    pub fn get_mut(&mut self, party: PartyId) -> &mut T {
        &mut self.slots[party.index()]
    }

    /// Iterate over (PartyId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PartyId, &T)> {
        PartyId::both().zip(self.slots.iter())
    }

    /// Apply `f` to both entries, keeping the slot assignment.
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> PartyMap<U> {
        PartyMap::new(f(&self.slots[0]), f(&self.slots[1]))
    }
}

impl<T: Default> Default for PartyMap<T> {
    fn default() -> Self {
        Self::new(T::default(), T::default())
    }
}

impl<T> Index<PartyId> for PartyMap<T> {
    type Output = T;

    fn index(&self, party: PartyId) -> &Self::Output {
        self.get(party)
    }
}

impl<T> IndexMut<PartyId> for PartyMap<T> {
    fn index_mut(&mut self, party: PartyId) -> &mut Self::Output {
        self.get_mut(party)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_party_id_basics() {
        assert_eq!(PartyId::ONE.index(), 0);
        assert_eq!(PartyId::TWO.index(), 1);
        assert_eq!(format!("{}", PartyId::ONE), "Party 1");
        assert_eq!(format!("{}", PartyId::TWO), "Party 2");
    }

    #[test]
    fn test_enemy_is_involution() {
        for party in PartyId::both() {
            assert_ne!(party.enemy(), party);
            assert_eq!(party.enemy().enemy(), party);
        }
    }

    #[test]
    fn test_party_map_from_fn() {
        let map = PartyMap::from_fn(|p| p.index() * 10);

        assert_eq!(map[PartyId::ONE], 0);
        assert_eq!(map[PartyId::TWO], 10);
    }

    #[test]
    fn test_party_map_mutation() {
        let mut map: PartyMap<i32> = PartyMap::default();

        map[PartyId::ONE] = 7;
        *map.get_mut(PartyId::TWO) += 3;

        assert_eq!(map[PartyId::ONE], 7);
        assert_eq!(map[PartyId::TWO], 3);
    }

    #[test]
    fn test_party_map_iter_and_map() {
        let map = PartyMap::new("a", "bb");

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(PartyId::ONE, &"a"), (PartyId::TWO, &"bb")]);

        let lens = map.map(|s| s.len());
        assert_eq!(lens, PartyMap::new(1, 2));
    }

    #[test]
    fn test_party_map_serialization() {
        let map = PartyMap::new(1u32, 2u32);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: PartyMap<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }
}
