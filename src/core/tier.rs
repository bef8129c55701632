//! Piece tiers.
//!
//! A tier is the evolution level of a piece. Matching three or more
//! connected pieces of tier `N` evolves the placed piece into tier `N + 1`.
//! Tiers are dense: a puzzle with `k` configured pieces has tiers `0..k`.

use serde::{Deserialize, Serialize};

/// Evolution level of a piece.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Tier(pub u32);

impl Tier {
    /// Create a new tier.
    #[must_use]
    pub const fn new(tier: u32) -> Self {
        Self(tier)
    }

    /// Get the raw tier value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The tier this one evolves into.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Index into per-tier configuration tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for Tier {
    fn from(tier: u32) -> Self {
        Self(tier)
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tier({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_next() {
        assert_eq!(Tier::new(0).next(), Tier::new(1));
        assert_eq!(Tier::new(4).next().raw(), 5);
    }

    #[test]
    fn test_tier_ordering() {
        assert!(Tier::new(1) > Tier::new(0));
        assert_eq!(Tier::default(), Tier::new(0));
        assert_eq!(format!("{}", Tier::new(3)), "Tier(3)");
    }
}
