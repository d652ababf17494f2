//! Registered names.

use std::fmt;

use cards_foundation::Handle;

/// The kind of entity a name refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NameType {
    /// A card definition.
    Card,
    /// An ability definition.
    Ability,
    /// A card subtype.
    Subtype,
    /// A connected player.
    Player,
}

impl fmt::Display for NameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Card => "card",
            Self::Ability => "ability",
            Self::Subtype => "subtype",
            Self::Player => "player",
        };
        f.write_str(s)
    }
}

/// A name registered in a [`NameSet`](crate::NameSet).
///
/// Created the first time its canonical key is added and dropped with the
/// set that owns it. The owner is a handle into the loader's arena, never an
/// owning link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Name {
    key: String,
    display: String,
    kind: NameType,
    owner: Handle,
}

impl Name {
    /// Creates a name record.
    #[must_use]
    pub fn new(key: String, display: String, kind: NameType, owner: Handle) -> Self {
        Self {
            key,
            display,
            kind,
            owner,
        }
    }

    /// The canonical key the name is stored under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The spelling shown to players.
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// The kind of entity this name refers to.
    #[must_use]
    pub fn kind(&self) -> NameType {
        self.kind
    }

    /// The entity that registered the name.
    #[must_use]
    pub fn owner(&self) -> Handle {
        self.owner
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.kind, self.display)
    }
}
