//! A small name set for trying the lexer by hand.

use cards_foundation::{Handle, Result};
use cards_names::{NameSet, NameType};

/// Names registered by [`names`].
pub const DEMO_NAMES: [(&str, NameType); 6] = [
    ("scone", NameType::Player),
    ("The big bucket here.", NameType::Card),
    ("Berries", NameType::Card),
    ("\u{c9}toile Filante", NameType::Ability),
    ("Goblin", NameType::Subtype),
    ("\u{1f600}", NameType::Card),
];

/// Builds and compiles the demo name set.
///
/// # Errors
///
/// Returns an allocation error if the set could not be built.
pub fn names() -> Result<NameSet> {
    let mut names = NameSet::new();
    for (index, (spelling, kind)) in (0u64..).zip(DEMO_NAMES) {
        names.add(spelling, kind, Handle::new(index, 0))?;
    }
    names.compile()?;
    Ok(names)
}
