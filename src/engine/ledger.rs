//! Chip (vote) ledger
//!
//! Each wheel owns one. A chip is toggled on and off per item, so any one
//! item carries 0 or 1 chips; the budget caps how many items hold a chip at
//! the same time.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::consts::CHIP_BUDGET;

/// Result of a chip toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChipToggle {
    /// Item gained a chip
    Added,
    /// Item already had a chip and lost it
    Removed,
    /// Budget exhausted, nothing changed
    OverBudget,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChipLedger {
    budget: u32,
    chips: HashMap<String, u32>,
    total: u32,
}

impl Default for ChipLedger {
    fn default() -> Self {
        Self::new(CHIP_BUDGET)
    }
}

impl ChipLedger {
    pub fn new(budget: u32) -> Self {
        Self {
            budget,
            chips: HashMap::new(),
            total: 0,
        }
    }

    /// Toggle a chip on `item`
    pub fn toggle(&mut self, item: &str) -> ChipToggle {
        if let Some(count) = self.chips.get_mut(item) {
            *count -= 1;
            self.total -= 1;
            if *count == 0 {
                self.chips.remove(item);
            }
            return ChipToggle::Removed;
        }

        if self.total >= self.budget {
            log::debug!("Chip for {:?} ignored, budget {} spent", item, self.budget);
            return ChipToggle::OverBudget;
        }

        self.chips.insert(item.to_string(), 1);
        self.total += 1;
        ChipToggle::Added
    }

    /// Drop all chips (item pool replaced)
    pub fn reset(&mut self) {
        self.chips.clear();
        self.total = 0;
    }

    /// Chips on `item` (0 when absent)
    pub fn chips(&self, item: &str) -> u32 {
        self.chips.get(item).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn budget(&self) -> u32 {
        self.budget
    }

    pub fn remaining(&self) -> u32 {
        self.budget - self.total
    }

    pub fn has_votes(&self) -> bool {
        self.total > 0
    }
}
