//! Pokedex Module
//!
//! Registry of caught Pokemon, owned by the REPL session.

use std::collections::BTreeMap;

use crate::models::Pokemon;

/// Lowest catch chance, in percent, regardless of base experience.
pub const MIN_CATCH_CHANCE: u32 = 5;

/// Highest catch chance, in percent, regardless of base experience.
pub const MAX_CATCH_CHANCE: u32 = 95;

// == Caught Pokemon ==
/// The details kept about a caught Pokemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaughtPokemon {
    pub name: String,
    pub height: u32,
    pub weight: u32,
    /// `(stat name, base value)` in API order
    pub stats: Vec<(String, u32)>,
    pub types: Vec<String>,
}

impl From<&Pokemon> for CaughtPokemon {
    fn from(pokemon: &Pokemon) -> Self {
        Self {
            name: pokemon.name.clone(),
            height: pokemon.height,
            weight: pokemon.weight,
            stats: pokemon
                .stats
                .iter()
                .map(|s| (s.stat.name.clone(), s.base_stat))
                .collect(),
            types: pokemon.types.iter().map(|t| t.kind.name.clone()).collect(),
        }
    }
}

// == Pokedex ==
/// Caught Pokemon keyed by lowercase name, listed alphabetically.
#[derive(Debug, Default)]
pub struct Pokedex {
    caught: BTreeMap<String, CaughtPokemon>,
}

impl Pokedex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a catch. Returns false if that Pokemon was already caught.
    pub fn insert(&mut self, pokemon: CaughtPokemon) -> bool {
        if self.caught.contains_key(&pokemon.name) {
            return false;
        }
        self.caught.insert(pokemon.name.clone(), pokemon);
        true
    }

    pub fn get(&self, name: &str) -> Option<&CaughtPokemon> {
        self.caught.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.caught.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.caught.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.caught.len()
    }

    pub fn is_empty(&self) -> bool {
        self.caught.is_empty()
    }
}

// == Catch Roll ==
/// Percent chance of catching a Pokemon with the given base experience.
///
/// Higher base experience is harder to catch, clamped to
/// [`MIN_CATCH_CHANCE`]..=[`MAX_CATCH_CHANCE`].
pub fn catch_chance(base_experience: u32) -> u32 {
    100u32
        .saturating_sub(base_experience)
        .clamp(MIN_CATCH_CHANCE, MAX_CATCH_CHANCE)
}

/// Whether a roll in `0..100` succeeds against `base_experience`.
pub fn is_caught(roll: u32, base_experience: u32) -> bool {
    roll < catch_chance(base_experience)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caught(name: &str) -> CaughtPokemon {
        CaughtPokemon {
            name: name.to_string(),
            height: 3,
            weight: 18,
            stats: vec![("hp".to_string(), 40)],
            types: vec!["normal".to_string()],
        }
    }

    #[test]
    fn test_insert_and_get() {
        let mut pokedex = Pokedex::new();

        assert!(pokedex.insert(caught("pidgey")));

        assert!(pokedex.contains("pidgey"));
        assert_eq!(pokedex.get("pidgey").unwrap().weight, 18);
        assert_eq!(pokedex.len(), 1);
    }

    #[test]
    fn test_insert_duplicate() {
        let mut pokedex = Pokedex::new();

        assert!(pokedex.insert(caught("pidgey")));
        assert!(!pokedex.insert(caught("pidgey")));
        assert_eq!(pokedex.len(), 1);
    }

    #[test]
    fn test_names_sorted() {
        let mut pokedex = Pokedex::new();
        pokedex.insert(caught("zubat"));
        pokedex.insert(caught("abra"));

        let names: Vec<&str> = pokedex.names().collect();
        assert_eq!(names, vec!["abra", "zubat"]);
    }

    #[test]
    fn test_catch_chance_clamped() {
        assert_eq!(catch_chance(0), MAX_CATCH_CHANCE);
        assert_eq!(catch_chance(50), 50);
        assert_eq!(catch_chance(112), MIN_CATCH_CHANCE);
        assert_eq!(catch_chance(u32::MAX), MIN_CATCH_CHANCE);
    }

    #[test]
    fn test_is_caught_threshold() {
        assert!(is_caught(49, 50));
        assert!(!is_caught(50, 50));
        assert!(is_caught(0, 400));
        assert!(!is_caught(99, 0));
    }
}
