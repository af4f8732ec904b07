//! Challenge config parser
//!
//! Format: `Game(challenge, challenge, ...); Other Game(challenge); ...`
//!
//! Malformed entries are skipped, never fatal. Game names are keyed
//! case-insensitively; a later entry replaces an earlier one with the same
//! key but keeps the earlier one's position, so the flattened pool order
//! (and with it every bingo card seed) only depends on first appearance.

use serde::{Deserialize, Serialize};

/// One game's challenges
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolEntry {
    /// Game name as written in the config
    pub display_name: String,
    /// Never empty
    pub challenges: Vec<String>,
}

/// A single (game, challenge) pair from the flattened pool
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolPick {
    pub game: String,
    pub challenge: String,
}

/// Parsed challenge config, ordered by first appearance of each key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengePool {
    entries: Vec<(String, PoolEntry)>,
}

/// Parse challenge config text
pub fn parse_challenges(text: &str) -> ChallengePool {
    let mut pool = ChallengePool::default();
    for raw in text.split(';') {
        match parse_entry(raw) {
            Some(entry) => pool.insert(entry),
            None => {
                if !raw.trim().is_empty() {
                    log::debug!("Skipping malformed challenge entry {:?}", raw.trim());
                }
            }
        }
    }
    pool
}

/// `NAME(ITEM,ITEM,...)` with no parentheses inside NAME or the item list
fn parse_entry(raw: &str) -> Option<PoolEntry> {
    let entry = raw.trim();
    let inner_end = entry.strip_suffix(')')?;
    let (name, items) = inner_end.split_once('(')?;

    if name.contains(')') || items.contains('(') || items.contains(')') {
        return None;
    }
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    let challenges: Vec<String> = items
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();
    if challenges.is_empty() {
        return None;
    }

    Some(PoolEntry {
        display_name: name.to_string(),
        challenges,
    })
}

impl ChallengePool {
    pub fn parse(text: &str) -> Self {
        parse_challenges(text)
    }

    /// Insert or replace by lowercased name
    pub fn insert(&mut self, entry: PoolEntry) {
        let key = entry.display_name.to_lowercase();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = entry,
            None => self.entries.push((key, entry)),
        }
    }

    /// Case-insensitive lookup
    pub fn get(&self, game: &str) -> Option<&PoolEntry> {
        let key = game.trim().to_lowercase();
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, e)| e)
    }

    /// Challenges for `game`, if configured
    pub fn challenges_for(&self, game: &str) -> Option<&[String]> {
        self.get(game).map(|e| e.challenges.as_slice())
    }

    /// Number of games
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &PoolEntry> {
        self.entries.iter().map(|(_, e)| e)
    }

    /// Lowercased keys in pool order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Every (game, challenge) pair in pool order
    pub fn flatten(&self) -> Vec<PoolPick> {
        self.entries()
            .flat_map(|e| {
                e.challenges.iter().map(move |c| PoolPick {
                    game: e.display_name.clone(),
                    challenge: c.clone(),
                })
            })
            .collect()
    }

    /// Render back to config text, one game per line
    pub fn to_text(&self) -> String {
        self.entries()
            .map(|e| format!("{}({})", e.display_name, e.challenges.join(", ")))
            .collect::<Vec<_>>()
            .join(";\n")
    }
}
