//! Name-keyed character registry.
//!
//! Holds every spawned character, keyed by unique name. Names are the
//! identity the command wire and the facility worker links use, so a
//! duplicate registration is rejected and logged rather than overwriting
//! the existing character.

use std::collections::BTreeMap;

use tracing::warn;

use crate::character::Character;
use crate::error::CoreError;

/// The process-scoped character collection.
#[derive(Debug, Clone, Default)]
pub struct CharacterRegistry {
    characters: BTreeMap<String, Character>,
}

impl CharacterRegistry {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            characters: BTreeMap::new(),
        }
    }

    /// Register a character under its own name.
    ///
    /// A duplicate name is rejected; the existing character is kept.
    pub fn register(&mut self, character: Character) -> Result<(), CoreError> {
        let name = character.name().to_owned();
        if self.characters.contains_key(&name) {
            warn!(character = %name, "duplicate character name rejected");
            return Err(CoreError::DuplicateCharacter(name));
        }
        self.characters.insert(name, character);
        Ok(())
    }

    /// Look up a character by name.
    pub fn get(&self, name: &str) -> Option<&Character> {
        self.characters.get(name)
    }

    /// Mutable lookup by name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Character> {
        self.characters.get_mut(name)
    }

    /// Lookup that errors on a missing name.
    pub fn require(&self, name: &str) -> Result<&Character, CoreError> {
        self.characters
            .get(name)
            .ok_or_else(|| CoreError::CharacterNotFound(name.to_owned()))
    }

    /// Mutable lookup that errors on a missing name.
    pub fn require_mut(&mut self, name: &str) -> Result<&mut Character, CoreError> {
        self.characters
            .get_mut(name)
            .ok_or_else(|| CoreError::CharacterNotFound(name.to_owned()))
    }

    /// Whether a character with the name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.characters.contains_key(name)
    }

    /// Number of registered characters.
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Iterate over characters in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.characters.values()
    }

    /// Iterate mutably over characters in name order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Character> {
        self.characters.values_mut()
    }

    /// All registered names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.characters.keys().map(String::as_str)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn register_and_look_up() {
        let mut registry = CharacterRegistry::new();
        registry.register(Character::new("Ada")).unwrap();
        registry.register(Character::new("Brin")).unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.get("Ada").is_some());
        assert!(registry.require("Brin").is_ok());
        assert!(registry.require("Chu").is_err());
    }

    #[test]
    fn duplicate_names_keep_the_first() {
        let mut registry = CharacterRegistry::new();
        let mut first = Character::new("Ada");
        first.stats_mut().hunger = 42.0;
        registry.register(first).unwrap();

        assert!(registry.register(Character::new("Ada")).is_err());
        let kept = registry.get("Ada").unwrap();
        assert!((kept.stats().hunger - 42.0).abs() < f32::EPSILON);
    }

    #[test]
    fn iteration_is_name_ordered() {
        let mut registry = CharacterRegistry::new();
        registry.register(Character::new("Zoe")).unwrap();
        registry.register(Character::new("Ada")).unwrap();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["Ada", "Zoe"]);
    }
}
