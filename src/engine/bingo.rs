//! Seeded bingo cards
//!
//! A card is fully determined by its seed and the flattened challenge pool
//! until a cell is rerolled. Rerolls draw from ambient randomness, so a
//! rerolled cell no longer matches the shared seed.

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::pool::PoolPick;
use super::rng::Lcg32;
use super::win::{WinLine, winning_line};
use crate::consts::{CARD_CELLS, REROLL_BUDGET};
use crate::error::{PartyError, Result};

/// One card cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BingoCell {
    pub game: String,
    pub challenge: String,
    pub completed: bool,
}

impl From<&PoolPick> for BingoCell {
    fn from(pick: &PoolPick) -> Self {
        Self {
            game: pick.game.clone(),
            challenge: pick.challenge.clone(),
            completed: false,
        }
    }
}

/// A 5x5 card, cells in row-major order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BingoCard {
    seed: u32,
    cells: Vec<BingoCell>,
}

/// Pool indices for a card: no repeats until every entry has been used once
fn draw_indices(seed: u32, pool_len: usize) -> Vec<usize> {
    let mut rng = Lcg32::new(seed);
    let mut used = HashSet::with_capacity(pool_len.min(CARD_CELLS));
    let mut picks = Vec::with_capacity(CARD_CELLS);

    while picks.len() < CARD_CELLS {
        let idx = rng.next_index(pool_len);
        // Redraw on collision until every entry has been used once
        if used.len() < pool_len && !used.insert(idx) {
            continue;
        }
        picks.push(idx);
    }
    picks
}

impl BingoCard {
    /// Build the card for `seed` from the flattened pool
    pub fn generate(seed: u32, pool: &[PoolPick]) -> Result<Self> {
        if pool.is_empty() {
            return Err(PartyError::EmptyPool);
        }

        let cells = draw_indices(seed, pool.len())
            .into_iter()
            .map(|i| BingoCell::from(&pool[i]))
            .collect();

        log::info!("Generated bingo card for seed {} from {} challenges", seed, pool.len());
        Ok(Self { seed, cells })
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn cells(&self) -> &[BingoCell] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&BingoCell> {
        self.cells.get(index)
    }

    /// Completed flags in row-major order
    pub fn completion_grid(&self) -> [bool; CARD_CELLS] {
        std::array::from_fn(|i| self.cells.get(i).is_some_and(|c| c.completed))
    }
}

/// A card plus its reroll budget and lock state.
///
/// Unlocked: cells may be rerolled (budget permitting), not completed.
/// Locked: cells may be completed, never rerolled again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BingoSession {
    card: BingoCard,
    rerolls_remaining: u32,
    locked: bool,
}

impl BingoSession {
    pub fn new(card: BingoCard) -> Self {
        Self {
            card,
            rerolls_remaining: REROLL_BUDGET,
            locked: false,
        }
    }

    pub fn generate(seed: u32, pool: &[PoolPick]) -> Result<Self> {
        BingoCard::generate(seed, pool).map(Self::new)
    }

    pub fn card(&self) -> &BingoCard {
        &self.card
    }

    pub fn seed(&self) -> u32 {
        self.card.seed
    }

    pub fn rerolls_remaining(&self) -> u32 {
        self.rerolls_remaining
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Replace one cell with a fresh random pick. Returns false (no-op) when
    /// locked, out of rerolls, or given a bad cell or empty pool.
    pub fn reroll(&mut self, cell: usize, pool: &[PoolPick]) -> bool {
        self.reroll_with(&mut rand::rng(), cell, pool)
    }

    pub fn reroll_with<R: Rng + ?Sized>(&mut self, rng: &mut R, cell: usize, pool: &[PoolPick]) -> bool {
        if self.locked || self.rerolls_remaining == 0 {
            log::debug!("Reroll of cell {} ignored (locked or out of rerolls)", cell);
            return false;
        }
        if pool.is_empty() || cell >= self.card.cells.len() {
            return false;
        }

        let pick = &pool[rng.random_range(0..pool.len())];
        self.card.cells[cell] = BingoCell::from(pick);
        self.rerolls_remaining -= 1;
        log::info!(
            "Rerolled cell {} to {:?} ({} rerolls left)",
            cell,
            pick.challenge,
            self.rerolls_remaining
        );
        true
    }

    /// Start play. Returns true on the first call only.
    pub fn lock(&mut self) -> bool {
        self.rerolls_remaining = 0;
        if self.locked {
            return false;
        }
        self.locked = true;
        log::info!("Bingo card {} locked", self.card.seed);
        true
    }

    /// Flip a cell's completed flag. Returns false (no-op) before lock or
    /// for an out-of-range cell.
    pub fn toggle_completion(&mut self, cell: usize) -> bool {
        if !self.locked {
            log::debug!("Completion toggle on cell {} ignored before lock", cell);
            return false;
        }
        match self.card.cells.get_mut(cell) {
            Some(c) => {
                c.completed = !c.completed;
                true
            }
            None => false,
        }
    }

    pub fn winning_line(&self) -> Option<WinLine> {
        winning_line(&self.card.completion_grid())
    }

    pub fn has_win(&self) -> bool {
        self.winning_line().is_some()
    }
}
