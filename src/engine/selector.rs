//! Weighted outcome selection
//!
//! Every item has a baseline weight of 1 plus its votes, so unvoted items
//! stay possible. With no votes at all the pick is plain uniform. Spins are
//! not meant to be reproducible, so `select` draws from ambient randomness.

use std::collections::HashMap;
use std::hash::BuildHasher;

use rand::Rng;

use super::ledger::ChipLedger;
use crate::error::{PartyError, Result};

/// Per-item vote counts consumed by the selector
pub trait VoteWeights {
    fn votes(&self, item: &str) -> u32;
}

impl VoteWeights for ChipLedger {
    fn votes(&self, item: &str) -> u32 {
        self.chips(item)
    }
}

impl<S: BuildHasher> VoteWeights for HashMap<String, u32, S> {
    fn votes(&self, item: &str) -> u32 {
        self.get(item).copied().unwrap_or(0)
    }
}

/// Pick an index from `items` using the thread-local RNG
pub fn select(items: &[String], weights: Option<&dyn VoteWeights>) -> Result<usize> {
    select_with(&mut rand::rng(), items, weights)
}

/// Pick an index from `items` with an explicit RNG
pub fn select_with<R: Rng + ?Sized>(
    rng: &mut R,
    items: &[String],
    weights: Option<&dyn VoteWeights>,
) -> Result<usize> {
    if items.is_empty() {
        return Err(PartyError::EmptyPool);
    }
    if items.len() == 1 {
        return Ok(0);
    }

    let votes: Vec<u32> = match weights {
        Some(w) => items.iter().map(|item| w.votes(item)).collect(),
        None => return Ok(rng.random_range(0..items.len())),
    };
    if votes.iter().all(|&v| v == 0) {
        return Ok(rng.random_range(0..items.len()));
    }

    let total: f64 = votes.iter().map(|&v| 1.0 + v as f64).sum();
    let r = rng.random::<f64>() * total;

    // First index whose cumulative weight reaches r
    let mut cumulative = 0.0;
    for (i, &v) in votes.iter().enumerate() {
        cumulative += 1.0 + v as f64;
        if cumulative >= r {
            return Ok(i);
        }
    }
    Ok(items.len() - 1)
}
