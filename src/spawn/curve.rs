//! Time-parameterized spawn weights.
//!
//! A `SpawnCurve` is a piecewise-linear function over normalized time,
//! defined by keyframes. A curve with no keys is *empty*: the tier it
//! belongs to is never spawned through that curve.

use serde::{Deserialize, Serialize};

/// One keyframe.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    pub time: f32,
    pub value: f32,
}

impl CurveKey {
    #[must_use]
    pub const fn new(time: f32, value: f32) -> Self {
        Self { time, value }
    }
}

/// Piecewise-linear weight curve.
///
/// Outside the keyed range the nearest key's value holds.
///
/// ```
/// use hex_merge::spawn::SpawnCurve;
///
/// let curve = SpawnCurve::linear(10.0, 0.0);
/// assert_eq!(curve.evaluate(0.0), 10.0);
/// assert_eq!(curve.evaluate(0.5), 5.0);
/// assert_eq!(curve.evaluate(2.0), 0.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "UnsortedCurve")]
pub struct SpawnCurve {
    keys: Vec<CurveKey>,
}

/// Deserialization shape; keys from content files may be in any order.
#[derive(Deserialize)]
struct UnsortedCurve {
    keys: Vec<CurveKey>,
}

impl From<UnsortedCurve> for SpawnCurve {
    fn from(raw: UnsortedCurve) -> Self {
        SpawnCurve::from_keys(raw.keys)
    }
}

impl SpawnCurve {
    /// Curve with no keys.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Same weight at every time.
    #[must_use]
    pub fn constant(value: f32) -> Self {
        Self::from_keys([CurveKey::new(0.0, value)])
    }

    /// Straight line from `start` at `t = 0` to `end` at `t = 1`.
    #[must_use]
    pub fn linear(start: f32, end: f32) -> Self {
        Self::from_keys([CurveKey::new(0.0, start), CurveKey::new(1.0, end)])
    }

    /// Build from keyframes in any order.
    pub fn from_keys(keys: impl IntoIterator<Item = CurveKey>) -> Self {
        let mut keys: Vec<CurveKey> = keys.into_iter().collect();
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }

    /// Add a keyframe.
    #[must_use]
    pub fn with_key(mut self, time: f32, value: f32) -> Self {
        let at = self.keys.partition_point(|k| k.time <= time);
        self.keys.insert(at, CurveKey::new(time, value));
        self
    }

    /// Keyframes, sorted by time.
    #[must_use]
    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }

    /// Check if the curve has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Raw curve value at `t`. Empty curves evaluate to 0, and a NaN `t`
    /// reads the first key.
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return 0.0,
        };

        if t.is_nan() || t <= first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }

        let upper = self.keys.partition_point(|k| k.time <= t);
        let a = self.keys[upper - 1];
        let b = self.keys[upper];
        let span = b.time - a.time;
        if span <= 0.0 {
            return b.value;
        }
        a.value + (b.value - a.value) * ((t - a.time) / span)
    }

    /// Weight at `t`: the curve value, with negatives and NaN read as 0.
    #[must_use]
    pub fn weight(&self, t: f32) -> f32 {
        let value = self.evaluate(t);
        if value > 0.0 {
            value
        } else {
            0.0
        }
    }
}

/// Which curve of a piece drives a draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpawnMode {
    /// Seeding the initial board.
    Initial,
    /// Pending pieces during play.
    Play,
}

/// Spawn curves of one tier.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PieceSpawnRate {
    /// Weight while seeding the initial board.
    pub initial: SpawnCurve,
    /// Weight for pending pieces during play.
    pub play: SpawnCurve,
}

impl PieceSpawnRate {
    #[must_use]
    pub fn new(initial: SpawnCurve, play: SpawnCurve) -> Self {
        Self { initial, play }
    }

    /// Same curve for seeding and play.
    #[must_use]
    pub fn uniform(curve: SpawnCurve) -> Self {
        Self {
            initial: curve.clone(),
            play: curve,
        }
    }

    /// Tier that never spawns directly, only through evolution.
    #[must_use]
    pub fn evolution_only() -> Self {
        Self::default()
    }

    /// Curve for `mode`.
    #[must_use]
    pub fn curve(&self, mode: SpawnMode) -> &SpawnCurve {
        match mode {
            SpawnMode::Initial => &self.initial,
            SpawnMode::Play => &self.play,
        }
    }
}
