//! Core puzzle types: tiers, configuration, errors, RNG.
//!
//! This module contains the building blocks shared by every other module.
//! Hosts configure the engine via `PuzzleConfig` rather than modifying it.

pub mod config;
pub mod error;
pub mod rng;
pub mod tier;

pub use config::{CoordinateSystem, GridConfig, GridShape, OffsetParity, Orientation, PuzzleConfig};
pub use error::{InvalidTargetReason, PuzzleError};
pub use rng::{PuzzleRng, PuzzleRngState};
pub use tier::Tier;
