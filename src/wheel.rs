//! A single spinnable wheel
//!
//! Owns its item pool, spin animator and chip ledger. The game wheel and the
//! challenge wheel are two independent instances; with voting disabled the
//! pick is plain uniform.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::engine::{ChipLedger, ChipToggle, SpinAnimator, VoteWeights, select_with};
use crate::error::{PartyError, Result};

/// Result of a completed spin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinOutcome {
    pub index: usize,
    pub label: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Wheel {
    items: Vec<String>,
    spin: SpinAnimator,
    chips: ChipLedger,
    voting: bool,
}

/// Split newline-separated text into trimmed, non-empty labels
pub fn parse_names(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect()
}

impl Wheel {
    pub fn new(items: Vec<String>, voting: bool) -> Self {
        Self {
            items,
            voting,
            ..Self::default()
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Angle for the renderer
    pub fn angle(&self) -> f64 {
        self.spin.current_angle()
    }

    pub fn is_spinning(&self) -> bool {
        self.spin.is_spinning()
    }

    pub fn animator(&self) -> &SpinAnimator {
        &self.spin
    }

    pub fn chips(&self) -> &ChipLedger {
        &self.chips
    }

    pub fn voting_enabled(&self) -> bool {
        self.voting
    }

    /// Turning voting off also drops any chips already placed
    pub fn set_voting(&mut self, enabled: bool) {
        self.voting = enabled;
        if !enabled {
            self.chips.reset();
        }
    }

    /// Drop all chips (screen re-entered)
    pub fn clear_chips(&mut self) {
        self.chips.reset();
    }

    /// Swap in a new pool. Chips are reset; the rotation is kept.
    /// Ignored mid-spin.
    pub fn replace_items(&mut self, items: Vec<String>) -> bool {
        if self.is_spinning() {
            log::debug!("Pool replacement ignored mid-spin");
            return false;
        }
        self.items = items;
        self.chips.reset();
        true
    }

    /// Toggle a chip on `item`. `None` when voting is off, the wheel is
    /// spinning, or the item is not on the wheel.
    pub fn toggle_chip(&mut self, item: &str) -> Option<ChipToggle> {
        if !self.voting || self.is_spinning() || !self.items.iter().any(|i| i == item) {
            return None;
        }
        Some(self.chips.toggle(item))
    }

    /// Pick a winner and start spinning toward it.
    ///
    /// `Ok(false)` if already spinning, `Err(EmptyPool)` with no items.
    pub fn spin(&mut self, now_ms: f64) -> Result<bool> {
        self.spin_with(&mut rand::rng(), now_ms)
    }

    pub fn spin_with<R: Rng + ?Sized>(&mut self, rng: &mut R, now_ms: f64) -> Result<bool> {
        if self.is_spinning() {
            log::debug!("Spin ignored, wheel already spinning");
            return Ok(false);
        }
        if self.items.is_empty() {
            return Err(PartyError::EmptyPool);
        }

        let weights: Option<&dyn VoteWeights> = if self.voting { Some(&self.chips) } else { None };
        let chosen = select_with(rng, &self.items, weights)?;
        self.spin.start_with(rng, chosen, self.items.len(), now_ms)
    }

    /// Advance the animation. Yields the winner exactly once per spin.
    pub fn tick(&mut self, now_ms: f64) -> Option<SpinOutcome> {
        let index = self.spin.tick(now_ms)?;
        let label = self.items.get(index)?.clone();
        Some(SpinOutcome { index, label })
    }

    /// Fisher-Yates shuffle of the pool, rotation back to 0. Ignored mid-spin.
    pub fn shuffle(&mut self) -> bool {
        self.shuffle_with(&mut rand::rng())
    }

    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.is_spinning() || self.items.is_empty() {
            return false;
        }
        self.items.shuffle(rng);
        self.spin.reset_rotation();
        true
    }

    /// Remove the first occurrence of `label` (the "remove winner" option).
    /// Chips are reset since the pool changed.
    pub fn remove_item(&mut self, label: &str) -> bool {
        if self.is_spinning() {
            return false;
        }
        match self.items.iter().position(|i| i == label) {
            Some(pos) => {
                self.items.remove(pos);
                self.chips.reset();
                true
            }
            None => false,
        }
    }
}
