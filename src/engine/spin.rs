//! Spin animation state machine
//!
//! No physics: the winner is chosen up front, then the wheel eases from its
//! current angle to a target that puts the winner's segment center under the
//! fixed pointer. The front end drives it with `tick(now_ms)` once per frame;
//! tests drive it with synthetic timestamps.

use std::f64::consts::TAU;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_EXTRA_SPINS, MAX_SPIN_MS, MIN_EXTRA_SPINS, MIN_SPIN_MS, POINTER_ANGLE};
use crate::error::{PartyError, Result};

/// Animator phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpinPhase {
    #[default]
    Idle,
    Spinning,
}

/// Cubic ease-out
#[inline]
pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// Angular width of one segment
#[inline]
pub fn segment_width(segments: usize) -> f64 {
    TAU / segments as f64
}

/// Wheel angle that rests segment `index`'s center under the pointer
/// (before any extra full turns)
pub fn resting_angle(index: usize, segments: usize) -> f64 {
    POINTER_ANGLE - segment_width(segments) * (index as f64 + 0.5)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpinAnimator {
    /// Rendered angle (radians). Accumulates across spins, never normalized.
    current_angle: f64,
    phase: SpinPhase,
    start_time_ms: f64,
    duration_ms: f64,
    start_angle: f64,
    target_angle: f64,
    chosen_index: Option<usize>,
}

impl SpinAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_angle(&self) -> f64 {
        self.current_angle
    }

    pub fn phase(&self) -> SpinPhase {
        self.phase
    }

    pub fn is_spinning(&self) -> bool {
        self.phase == SpinPhase::Spinning
    }

    /// Index the current (or last) spin lands on
    pub fn chosen_index(&self) -> Option<usize> {
        self.chosen_index
    }

    pub fn target_angle(&self) -> f64 {
        self.target_angle
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// Start a spin toward `chosen` using the thread-local RNG for flair.
    ///
    /// Returns `Ok(false)` without touching state if a spin is already running.
    pub fn start(&mut self, chosen: usize, segments: usize, now_ms: f64) -> Result<bool> {
        self.start_with(&mut rand::rng(), chosen, segments, now_ms)
    }

    pub fn start_with<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        chosen: usize,
        segments: usize,
        now_ms: f64,
    ) -> Result<bool> {
        if self.is_spinning() {
            log::debug!("Spin request ignored, wheel already spinning");
            return Ok(false);
        }
        if chosen >= segments {
            return Err(PartyError::InvalidSegment {
                index: chosen,
                count: segments,
            });
        }

        // Extra turns are cosmetic: whole multiples of 2π keep the resting segment
        let extra_spins = rng.random_range(MIN_EXTRA_SPINS..=MAX_EXTRA_SPINS);
        self.target_angle = resting_angle(chosen, segments) + extra_spins as f64 * TAU;
        self.duration_ms = rng.random_range(MIN_SPIN_MS..MAX_SPIN_MS);
        self.start_time_ms = now_ms;
        self.start_angle = self.current_angle;
        self.chosen_index = Some(chosen);
        self.phase = SpinPhase::Spinning;

        log::debug!(
            "Spin started: index {} of {}, {} extra turns, {:.0}ms",
            chosen,
            segments,
            extra_spins,
            self.duration_ms
        );
        Ok(true)
    }

    /// Advance to `now_ms`. Returns the chosen index exactly once, on the
    /// frame the spin completes.
    pub fn tick(&mut self, now_ms: f64) -> Option<usize> {
        if self.phase != SpinPhase::Spinning {
            return None;
        }

        let elapsed = now_ms - self.start_time_ms;
        let t = (elapsed / self.duration_ms).clamp(0.0, 1.0);
        let eased = ease_out_cubic(t);
        self.current_angle = self.start_angle + (self.target_angle - self.start_angle) * eased;

        if t >= 1.0 {
            self.current_angle = self.target_angle;
            self.phase = SpinPhase::Idle;
            return self.chosen_index;
        }
        None
    }

    /// Put the wheel back at angle 0 (after a shuffle or pool edit).
    /// Ignored mid-spin.
    pub fn reset_rotation(&mut self) -> bool {
        if self.is_spinning() {
            return false;
        }
        self.current_angle = 0.0;
        true
    }
}
