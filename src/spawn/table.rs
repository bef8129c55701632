//! Weighted tier selection.
//!
//! ## Algorithm
//!
//! 1. Evaluate the chosen curve of every tier at `t` (empty curves weigh 0)
//! 2. Draw uniformly in `[0, total)`
//! 3. Walk tiers in ascending order, accumulating weight, until the running
//!    total reaches the draw
//!
//! If every weight is zero the table falls back to the highest configured
//! tier. Existing content relies on this, so it is not an error.

use smallvec::SmallVec;
use tracing::debug;

use super::curve::{PieceSpawnRate, SpawnMode};
use crate::core::{PuzzleError, PuzzleRng, Tier};

/// Per-tier weights at one point in time.
pub type TierWeights = SmallVec<[f32; 8]>;

/// Spawn curves for every configured tier.
///
/// ```
/// use hex_merge::core::{PuzzleRng, Tier};
/// use hex_merge::spawn::{PieceSpawnRate, SpawnCurve, SpawnMode, SpawnRateTable};
///
/// let table = SpawnRateTable::new(vec![
///     PieceSpawnRate::uniform(SpawnCurve::constant(1.0)),
///     PieceSpawnRate::evolution_only(),
/// ])
/// .unwrap();
///
/// let mut rng = PuzzleRng::new(42);
/// assert_eq!(table.select(SpawnMode::Play, 0.5, &mut rng), Tier::new(0));
/// assert_eq!(table.max_tier(), Tier::new(1));
/// ```
#[derive(Clone, Debug)]
pub struct SpawnRateTable {
    pieces: Vec<PieceSpawnRate>,
}

impl SpawnRateTable {
    /// Create a table. Index `i` configures tier `i`.
    ///
    /// Fails with `EmptySpawnTable` when no tier is configured.
    pub fn new(pieces: Vec<PieceSpawnRate>) -> Result<Self, PuzzleError> {
        if pieces.is_empty() {
            return Err(PuzzleError::EmptySpawnTable);
        }
        Ok(Self { pieces })
    }

    /// Number of configured tiers.
    #[must_use]
    pub fn tier_count(&self) -> usize {
        self.pieces.len()
    }

    /// Highest configured tier. Evolution never goes past it.
    #[must_use]
    pub fn max_tier(&self) -> Tier {
        Tier::new(self.pieces.len() as u32 - 1)
    }

    /// Spawn rates of `tier`.
    #[must_use]
    pub fn piece(&self, tier: Tier) -> Option<&PieceSpawnRate> {
        self.pieces.get(tier.index())
    }

    /// Weight of every tier at `t`, in tier order.
    #[must_use]
    pub fn weights(&self, mode: SpawnMode, t: f32) -> TierWeights {
        self.pieces.iter().map(|piece| piece.curve(mode).weight(t)).collect()
    }

    /// Draw a tier for `mode` at normalized time `t`.
    ///
    /// `t` is used as given; callers clamp it to `[0, 1]`.
    pub fn select(&self, mode: SpawnMode, t: f32, rng: &mut PuzzleRng) -> Tier {
        let weights = self.weights(mode, t);
        match rng.choose_weighted(&weights) {
            Some(index) => Tier::new(index as u32),
            None => {
                let fallback = self.max_tier();
                debug!(?mode, t, tier = fallback.raw(), "all spawn weights zero, using highest tier");
                fallback
            }
        }
    }

    /// Probability that `select` returns `tier` at `t`.
    ///
    /// Reflects the fallback: with all weights zero the highest tier has
    /// probability 1.
    #[must_use]
    pub fn probability(&self, mode: SpawnMode, tier: Tier, t: f32) -> f32 {
        let weights = self.weights(mode, t);
        let total: f32 = weights.iter().sum();
        if total <= 0.0 {
            return if tier == self.max_tier() { 1.0 } else { 0.0 };
        }
        weights.get(tier.index()).map_or(0.0, |w| w / total)
    }
}
