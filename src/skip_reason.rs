/// Why a table row produced no perk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    TooFewCells(usize),
    /// The row inherits its hero but there is no hero in scope to inherit.
    MissingHero,
    /// A hero-width row whose first cell has no bold hero name.
    EmptyHeroCell,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::TooFewCells(count) => write!(f, "row has only {count} cells"),
            SkipReason::MissingHero => write!(f, "row has no hero cell and no hero to inherit"),
            SkipReason::EmptyHeroCell => write!(f, "hero cell has no hero name"),
        }
    }
}

impl std::error::Error for SkipReason {}
