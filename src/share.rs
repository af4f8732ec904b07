//! Shareable bingo links
//!
//! `?mode=bingo&seed=<uint>` opens the bingo screen with a specific card.
//! Seeds wider than 32 bits wrap; anything non-numeric is ignored and a
//! fresh seed is rolled.

use rand::Rng;

/// Parameters read from a page query string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShareParams {
    /// `mode=bingo` present
    pub bingo: bool,
    /// Parsed `seed`, wrapped to u32
    pub seed: Option<u32>,
}

/// Parse a query string, with or without the leading `?`
pub fn parse_query(query: &str) -> ShareParams {
    let mut params = ShareParams::default();
    let query = query.trim().trim_start_matches('?');

    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        match key {
            "mode" => params.bingo = value.eq_ignore_ascii_case("bingo"),
            "seed" => params.seed = parse_seed(value),
            _ => {}
        }
    }
    params
}

/// Decimal seed, wrapped to 32 bits
pub fn parse_seed(value: &str) -> Option<u32> {
    value.trim().parse::<u64>().ok().map(|s| s as u32)
}

/// Query string for a shared card
pub fn bingo_query(seed: u32) -> String {
    format!("?mode=bingo&seed={}", seed)
}

/// Fresh seed for a new card
pub fn random_seed() -> u32 {
    rand::rng().random()
}

impl ShareParams {
    /// Seed from the link, or a fresh one
    pub fn seed_or_random(&self) -> u32 {
        self.seed.unwrap_or_else(random_seed)
    }
}
