// Character identities

use std::fmt;

/// Identifies a narrative character on stage.
///
/// Identities are declared up front as constants and only ever compared:
///
/// ```
/// use vn_stage::game::stage::CharacterIdentity;
///
/// const ALICE: CharacterIdentity = CharacterIdentity::new("Alice");
/// assert_eq!(ALICE.name(), "Alice");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CharacterIdentity(&'static str);

impl CharacterIdentity {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Display name, also used in log messages
    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for CharacterIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}
