//! Party Wheel - game/challenge spinner and seeded bingo cards
//!
//! Core modules:
//! - `engine`: Selection engine (seeded RNG, weighted pick, spin animation, chips, bingo, parser)
//! - `wheel`: A single spinnable wheel (item pool + animator + chip ledger)
//! - `app`: Application context owning settings, both wheels and the bingo session
//! - `renderer`: View traits and segment geometry for front ends
//! - `platform`: Browser/native platform abstraction
//! - `settings`: Persisted configuration
//! - `share`: Shareable bingo links

pub mod app;
pub mod engine;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod share;
pub mod wheel;

pub use app::{AppContext, AppEvent, Screen};
pub use error::{PartyError, Result};
pub use settings::Settings;
pub use wheel::{SpinOutcome, Wheel};

use glam::DVec2;

/// Game configuration constants
pub mod consts {
    /// Total chips a player may have on one wheel at a time
    pub const CHIP_BUDGET: u32 = 2;
    /// Single-cell rerolls allowed before a card is locked
    pub const REROLL_BUDGET: u32 = 2;

    /// Bingo card is BOARD_SIZE x BOARD_SIZE
    pub const BOARD_SIZE: usize = 5;
    pub const CARD_CELLS: usize = BOARD_SIZE * BOARD_SIZE;

    /// Fixed pointer at the top of the wheel (radians, 0 = +x, clockwise as drawn)
    pub const POINTER_ANGLE: f64 = -std::f64::consts::FRAC_PI_2;

    /// Extra full turns added to every spin, inclusive range
    pub const MIN_EXTRA_SPINS: u32 = 4;
    pub const MAX_EXTRA_SPINS: u32 = 6;

    /// Spin duration range in milliseconds (upper bound exclusive)
    pub const MIN_SPIN_MS: f64 = 4000.0;
    pub const MAX_SPIN_MS: f64 = 5500.0;
}

/// Normalize angle to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(std::f64::consts::TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= std::f64::consts::TAU {
        0.0
    } else {
        wrapped
    }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> DVec2 {
    DVec2::new(r * theta.cos(), r * theta.sin())
}
