// Sprite registry keyed by "character/expression" names

use super::{AssetError, AssetId, SpriteHandle};
use log::debug;
use std::collections::HashMap;

/// Maps sprite names to handles.
///
/// Decoding pixels is the host's job; the library only hands out stable
/// handles so scripts can refer to sprites by name.
#[derive(Debug, Default)]
pub struct SpriteLibrary {
    sprites: HashMap<String, SpriteHandle>,
    names: HashMap<AssetId, String>,
}

impl SpriteLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the canonical name for a character expression
    pub fn sprite_name(character: &str, expression: &str) -> String {
        format!("{}/{}", character.to_lowercase(), expression.to_lowercase())
    }

    /// Register a sprite under a name
    pub fn register(&mut self, name: &str) -> Result<SpriteHandle, AssetError> {
        if self.sprites.contains_key(name) {
            return Err(AssetError::AlreadyLoaded(name.to_string()));
        }

        let handle = SpriteHandle::from_path(name);
        self.sprites.insert(name.to_string(), handle);
        self.names.insert(handle.id(), name.to_string());
        debug!("Registered sprite '{}'", name);

        Ok(handle)
    }

    /// Register a sprite for a character expression
    pub fn register_expression(
        &mut self,
        character: &str,
        expression: &str,
    ) -> Result<SpriteHandle, AssetError> {
        self.register(&Self::sprite_name(character, expression))
    }

    /// Look up a sprite by name
    pub fn get(&self, name: &str) -> Result<SpriteHandle, AssetError> {
        self.sprites
            .get(name)
            .copied()
            .ok_or_else(|| AssetError::NotFound(name.to_string()))
    }

    /// Look up a character expression
    pub fn expression(&self, character: &str, expression: &str) -> Result<SpriteHandle, AssetError> {
        self.get(&Self::sprite_name(character, expression))
    }

    /// Reverse lookup, mostly for logging
    pub fn name_of(&self, handle: SpriteHandle) -> Option<&str> {
        self.names.get(&handle.id()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let mut library = SpriteLibrary::new();
        let handle = library.register_expression("Alice", "Happy").unwrap();

        assert_eq!(library.expression("alice", "happy").unwrap(), handle);
        assert_eq!(library.get("alice/happy").unwrap(), handle);
        assert_eq!(library.name_of(handle), Some("alice/happy"));
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn test_duplicate_registration() {
        let mut library = SpriteLibrary::new();
        library.register("bob/neutral").unwrap();

        let err = library.register("bob/neutral").unwrap_err();
        assert!(matches!(err, AssetError::AlreadyLoaded(name) if name == "bob/neutral"));
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn test_missing_sprite() {
        let library = SpriteLibrary::new();
        assert!(library.is_empty());

        let err = library.expression("carol", "sad").unwrap_err();
        assert_eq!(err.to_string(), "Asset not found: carol/sad");
    }
}
