//! Wheel and challenge settings
//!
//! Persisted as a single JSON record in LocalStorage. A missing or corrupt
//! record falls back to the built-in defaults; it is never an error.

use serde::{Deserialize, Serialize};

use crate::engine::ChallengePool;
use crate::error::{PartyError, Result};
use crate::platform::storage;

/// Built-in game list
const DEFAULT_GAMES: &[&str] = &[
    "Mario Kart",
    "Uno",
    "Jenga",
    "Charades",
    "Pictionary",
    "Just Dance",
];

/// Built-in challenges, in the `Game(challenge, ...);` config format
const DEFAULT_CHALLENGES: &str = "\
Mario Kart(Win a race, Finish last on purpose, Only use items from the back, Play with inverted steering);
Uno(Play without saying a word, Draw until you get a skip, Call Uno on someone else, Hold your cards face out);
Jenga(Pull with your weak hand, Pull a middle block, Blow on the tower once, Stack three in one turn);
Charades(Act out a movie in ten seconds, No hands allowed, Guess three in a row);
Pictionary(Draw with your eyes closed, Only straight lines, Draw with your weak hand);
Just Dance(Get a perfect move, Dance with a drink in hand, Copy the player to your left)";

/// Persisted settings record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Game wheel items, in wheel order
    pub games: Vec<String>,
    /// Challenge config text (see `engine::pool`)
    pub challenges_text: String,
    /// Chip voting on the game wheel
    pub enable_game_voting: bool,
    /// Spin a challenge after the game wheel picks a game
    pub enable_challenges: bool,
    /// Chip voting on the challenge wheel
    pub enable_challenge_voting: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            games: DEFAULT_GAMES.iter().map(|g| g.to_string()).collect(),
            challenges_text: DEFAULT_CHALLENGES.to_string(),
            enable_game_voting: true,
            enable_challenges: true,
            enable_challenge_voting: true,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "party_wheel_settings";

    /// Decode a stored record, falling back to defaults on corrupt JSON
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Stored settings unreadable ({}), using defaults", e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }

    /// Game names trimmed, blanks dropped
    pub fn cleaned_games(&self) -> Vec<String> {
        self.games
            .iter()
            .map(|g| g.trim())
            .filter(|g| !g.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn challenge_pool(&self) -> ChallengePool {
        ChallengePool::parse(&self.challenges_text)
    }

    /// Check the whole record before it is applied anywhere.
    ///
    /// Returns the cleaned game list and the parsed challenge pool.
    pub fn validate(&self) -> Result<(Vec<String>, ChallengePool)> {
        let games = self.cleaned_games();
        if games.is_empty() {
            return Err(PartyError::NoGames);
        }
        let pool = self.challenge_pool();
        if self.enable_challenges && pool.is_empty() {
            return Err(PartyError::NoChallenges);
        }
        Ok((games, pool))
    }

    /// Load settings from storage
    pub fn load() -> Self {
        match storage::load(Self::STORAGE_KEY) {
            Some(json) => {
                let settings = Self::from_json(&json);
                log::info!("Loaded settings ({} games)", settings.games.len());
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to storage
    pub fn save(&self) {
        if let Some(json) = self.to_json() {
            if storage::save(Self::STORAGE_KEY, &json) {
                log::info!("Settings saved");
            }
        }
    }
}
