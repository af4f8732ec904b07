//! Application context
//!
//! One explicit object owns everything the UI touches: the settings
//! snapshot, the parsed challenge pool, both wheels and the bingo session.
//! UI bindings call command methods on it and drive animation with
//! `tick(now_ms)`; nothing here depends on a UI event system.

use serde::Serialize;

use crate::engine::{BingoSession, ChallengePool, ChipToggle, WinLine};
use crate::error::{PartyError, Result};
use crate::platform;
use crate::renderer::{CardView, WheelId, WheelView};
use crate::settings::Settings;
use crate::share::{self, ShareParams};
use crate::wheel::{SpinOutcome, Wheel};

/// Screen currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Screen {
    #[default]
    Wheel,
    Bingo,
    Settings,
}

/// Results surfaced to the UI, each emitted once per completed spin
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AppEvent {
    /// Game wheel stopped
    GameChosen { game: String, index: usize },
    /// Chosen game has no configured challenges; the challenge wheel is empty
    NoChallengesFor { game: String },
    /// Challenge wheel stopped
    ChallengeChosen {
        game: String,
        challenge: String,
        index: usize,
    },
}

#[derive(Debug, Clone)]
pub struct AppContext {
    settings: Settings,
    pool: ChallengePool,
    game_wheel: Wheel,
    challenge_wheel: Wheel,
    current_game: Option<String>,
    bingo: Option<BingoSession>,
    screen: Screen,
    /// Drop each game from the wheel once it has been picked
    remove_winners: bool,
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl AppContext {
    /// Build a context from a settings snapshot. Invalid settings fall back
    /// to the defaults.
    pub fn new(settings: Settings) -> Self {
        let (settings, games, pool) = match settings.validate() {
            Ok((games, pool)) => (settings, games, pool),
            Err(e) => {
                log::warn!("Settings rejected ({}), using defaults", e);
                let defaults = Settings::default();
                let (games, pool) = defaults.validate().unwrap_or_default();
                (defaults, games, pool)
            }
        };

        let mut ctx = Self {
            settings: Settings::default(),
            pool: ChallengePool::default(),
            game_wheel: Wheel::default(),
            challenge_wheel: Wheel::default(),
            current_game: None,
            bingo: None,
            screen: Screen::Wheel,
            remove_winners: false,
        };
        ctx.install(settings, games, pool);
        ctx
    }

    /// Context from persisted settings
    pub fn from_storage() -> Self {
        Self::new(Settings::load())
    }

    /// Replace the whole snapshot at once. A card drawn from a different
    /// pool is dropped so a seed always maps to the current pool.
    fn install(&mut self, settings: Settings, games: Vec<String>, pool: ChallengePool) {
        if self.pool != pool && self.bingo.take().is_some() {
            log::info!("Challenge pool changed, bingo card dropped");
        }
        self.game_wheel = Wheel::new(games, settings.enable_game_voting);
        self.challenge_wheel = Wheel::new(Vec::new(), settings.enable_challenge_voting);
        self.current_game = None;
        self.pool = pool;
        self.settings = settings;
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn pool(&self) -> &ChallengePool {
        &self.pool
    }

    pub fn game_wheel(&self) -> &Wheel {
        &self.game_wheel
    }

    pub fn challenge_wheel(&self) -> &Wheel {
        &self.challenge_wheel
    }

    /// Game picked by the last game spin
    pub fn current_game(&self) -> Option<&str> {
        self.current_game.as_deref()
    }

    pub fn bingo(&self) -> Option<&BingoSession> {
        self.bingo.as_ref()
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn remove_winners(&self) -> bool {
        self.remove_winners
    }

    pub fn set_remove_winners(&mut self, enabled: bool) {
        self.remove_winners = enabled;
    }

    fn any_spinning(&self) -> bool {
        self.game_wheel.is_spinning() || self.challenge_wheel.is_spinning()
    }

    // === Settings ===

    /// Validate and apply new settings. On error nothing changes; settings
    /// are refused while either wheel is spinning.
    pub fn apply_settings(&mut self, settings: Settings) -> Result<()> {
        if self.any_spinning() {
            return Err(PartyError::SpinInProgress);
        }
        let (games, pool) = settings.validate()?;
        log::info!(
            "Applying settings: {} games, {} challenge entries",
            games.len(),
            pool.len()
        );
        self.install(settings, games, pool);
        Ok(())
    }

    /// Apply and persist
    pub fn save_settings(&mut self, settings: Settings) -> Result<()> {
        self.apply_settings(settings)?;
        self.settings.save();
        Ok(())
    }

    /// Restore and persist the built-in defaults
    pub fn reset_settings(&mut self) -> Result<()> {
        if self.any_spinning() {
            return Err(PartyError::SpinInProgress);
        }
        let defaults = Settings::default();
        let (games, pool) = defaults.validate().unwrap_or_default();
        self.install(defaults, games, pool);
        self.settings.save();
        log::info!("Settings reset to defaults");
        Ok(())
    }

    // === Screens ===

    /// Show the wheels. Chips from a previous visit are dropped.
    pub fn enter_wheel(&mut self) {
        self.screen = Screen::Wheel;
        self.game_wheel.clear_chips();
        self.challenge_wheel.clear_chips();
    }

    pub fn open_settings(&mut self) {
        self.screen = Screen::Settings;
    }

    // === Wheels ===

    /// Spin the game wheel. `Ok(false)` if either wheel is already spinning.
    pub fn spin_game(&mut self, now_ms: f64) -> Result<bool> {
        if self.any_spinning() {
            log::debug!("Game spin ignored, a wheel is spinning");
            return Ok(false);
        }
        self.game_wheel.spin(now_ms)
    }

    /// Spin the challenge wheel. `Ok(false)` if challenges are disabled or a
    /// wheel is spinning; `Err(EmptyPool)` before a game with challenges has
    /// been picked.
    pub fn spin_challenge(&mut self, now_ms: f64) -> Result<bool> {
        if !self.settings.enable_challenges {
            log::debug!("Challenge spin ignored, challenges disabled");
            return Ok(false);
        }
        if self.any_spinning() {
            log::debug!("Challenge spin ignored, a wheel is spinning");
            return Ok(false);
        }
        self.challenge_wheel.spin(now_ms)
    }

    pub fn toggle_game_chip(&mut self, item: &str) -> Option<ChipToggle> {
        self.game_wheel.toggle_chip(item)
    }

    pub fn toggle_challenge_chip(&mut self, item: &str) -> Option<ChipToggle> {
        self.challenge_wheel.toggle_chip(item)
    }

    /// Shuffle the game wheel (idle only)
    pub fn shuffle_games(&mut self) -> bool {
        self.game_wheel.shuffle()
    }

    /// Advance both wheels to `now_ms`
    pub fn tick(&mut self, now_ms: f64) -> Vec<AppEvent> {
        let mut events = Vec::new();

        if let Some(outcome) = self.game_wheel.tick(now_ms) {
            self.on_game_chosen(outcome, &mut events);
        }

        if let Some(outcome) = self.challenge_wheel.tick(now_ms) {
            log::info!("Challenge wheel landed on {:?}", outcome.label);
            events.push(AppEvent::ChallengeChosen {
                game: self.current_game.clone().unwrap_or_default(),
                challenge: outcome.label,
                index: outcome.index,
            });
        }

        events
    }

    fn on_game_chosen(&mut self, outcome: SpinOutcome, events: &mut Vec<AppEvent>) {
        log::info!("Game wheel landed on {:?}", outcome.label);
        let game = outcome.label;
        events.push(AppEvent::GameChosen {
            game: game.clone(),
            index: outcome.index,
        });

        if self.settings.enable_challenges {
            let challenges = self
                .pool
                .challenges_for(&game)
                .map(<[String]>::to_vec)
                .unwrap_or_default();
            if challenges.is_empty() {
                events.push(AppEvent::NoChallengesFor { game: game.clone() });
            }
            // Old pool and chips are gone before the challenge wheel can spin
            self.challenge_wheel.replace_items(challenges);
        }

        if self.remove_winners {
            self.game_wheel.remove_item(&game);
        }
        self.current_game = Some(game);
    }

    /// Hand both wheels to a view
    pub fn render_wheels(&self, view: &mut dyn WheelView) {
        view.draw_wheel(WheelId::Game, self.game_wheel.items(), self.game_wheel.angle());
        if self.settings.enable_challenges {
            view.draw_wheel(
                WheelId::Challenge,
                self.challenge_wheel.items(),
                self.challenge_wheel.angle(),
            );
        }
    }

    // === Bingo ===

    /// Open the bingo screen with `seed` (or a fresh one) and write the seed
    /// to the URL. Re-entering with the current seed keeps the card.
    ///
    /// With no challenges configured the screen opens without a card and
    /// `Err(EmptyPool)` is returned.
    pub fn enter_bingo(&mut self, seed: Option<u32>) -> Result<u32> {
        self.screen = Screen::Bingo;
        if let (Some(seed), Some(session)) = (seed, &self.bingo) {
            if session.seed() == seed {
                return Ok(seed);
            }
        }
        self.start_card(ShareParams { bingo: true, seed }.seed_or_random())
    }

    /// Replace the card with a freshly seeded one
    pub fn new_card(&mut self) -> Result<u32> {
        self.screen = Screen::Bingo;
        self.start_card(share::random_seed())
    }

    /// Apply `mode=bingo&seed=...` from a page link. Returns the card seed
    /// if the link asked for bingo.
    pub fn open_link(&mut self, query: &str) -> Option<Result<u32>> {
        let ShareParams { bingo, seed } = share::parse_query(query);
        bingo.then(|| self.enter_bingo(seed))
    }

    fn start_card(&mut self, seed: u32) -> Result<u32> {
        match BingoSession::generate(seed, &self.pool.flatten()) {
            Ok(session) => {
                self.bingo = Some(session);
                platform::location::replace_query(&share::bingo_query(seed));
                Ok(seed)
            }
            Err(e) => {
                self.bingo = None;
                Err(e)
            }
        }
    }

    /// Reroll one cell before the card is locked
    pub fn reroll_cell(&mut self, cell: usize) -> bool {
        let picks = self.pool.flatten();
        self.bingo
            .as_mut()
            .is_some_and(|session| session.reroll(cell, &picks))
    }

    /// Start play on the current card
    pub fn lock_card(&mut self) -> bool {
        self.bingo.as_mut().is_some_and(BingoSession::lock)
    }

    /// Mark or unmark a cell (after lock)
    pub fn toggle_cell(&mut self, cell: usize) -> bool {
        self.bingo
            .as_mut()
            .is_some_and(|session| session.toggle_completion(cell))
    }

    pub fn winning_line(&self) -> Option<WinLine> {
        self.bingo.as_ref().and_then(BingoSession::winning_line)
    }

    pub fn has_bingo(&self) -> bool {
        self.winning_line().is_some()
    }

    /// Hand the card to a view (nothing drawn without a card)
    pub fn render_card(&self, view: &mut dyn CardView) {
        if let Some(session) = &self.bingo {
            view.draw_card(
                session.card().cells(),
                session.is_locked(),
                session.rerolls_remaining(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{CARD_CELLS, MAX_SPIN_MS};
    use crate::engine::{BingoCard, BingoCell};

    fn settings(games: &[&str], challenges: &str) -> Settings {
        Settings {
            games: games.iter().map(|g| g.to_string()).collect(),
            challenges_text: challenges.to_string(),
            ..Settings::default()
        }
    }

    fn finish_spin(ctx: &mut AppContext, start: f64) -> Vec<AppEvent> {
        ctx.tick(start + MAX_SPIN_MS)
    }

    #[test]
    fn test_invalid_settings_fall_back_to_defaults() {
        let ctx = AppContext::new(settings(&[], "a(b)"));
        assert_eq!(ctx.settings(), &Settings::default());
        assert!(!ctx.game_wheel().is_empty());
    }

    #[test]
    fn test_game_spin_loads_challenges() {
        let mut ctx = AppContext::new(settings(&["Uno"], "uno(skip,reverse)"));
        assert_eq!(ctx.spin_game(0.0), Ok(true));
        let events = finish_spin(&mut ctx, 0.0);
        assert_eq!(
            events,
            vec![AppEvent::GameChosen {
                game: "Uno".to_string(),
                index: 0
            }]
        );
        assert_eq!(ctx.current_game(), Some("Uno"));
        assert_eq!(ctx.challenge_wheel().items(), &["skip".to_string(), "reverse".to_string()]);
    }

    #[test]
    fn test_game_without_challenges_reports_and_empties_wheel() {
        let mut ctx = AppContext::new(settings(&["Chess"], "uno(skip)"));
        ctx.spin_game(0.0).unwrap();
        let events = finish_spin(&mut ctx, 0.0);
        assert!(events.contains(&AppEvent::NoChallengesFor {
            game: "Chess".to_string()
        }));
        assert!(ctx.challenge_wheel().is_empty());
        assert_eq!(ctx.spin_challenge(MAX_SPIN_MS + 1.0), Err(PartyError::EmptyPool));
    }

    #[test]
    fn test_challenge_spin_before_game_fails() {
        let mut ctx = AppContext::default();
        assert_eq!(ctx.spin_challenge(0.0), Err(PartyError::EmptyPool));
    }

    #[test]
    fn test_wheels_are_mutually_exclusive_while_spinning() {
        let mut ctx = AppContext::new(settings(&["Uno"], "uno(skip,reverse)"));
        ctx.spin_game(0.0).unwrap();
        finish_spin(&mut ctx, 0.0);

        assert_eq!(ctx.spin_challenge(10_000.0), Ok(true));
        assert_eq!(ctx.spin_game(10_001.0), Ok(false));
        assert_eq!(ctx.spin_challenge(10_002.0), Ok(false));

        let events = finish_spin(&mut ctx, 10_000.0);
        assert!(matches!(
            events.as_slice(),
            [AppEvent::ChallengeChosen { game, .. }] if game == "Uno"
        ));
    }

    #[test]
    fn test_challenges_disabled_skips_challenge_wheel() {
        let mut s = settings(&["Uno"], "");
        s.enable_challenges = false;
        let mut ctx = AppContext::new(s);
        ctx.spin_game(0.0).unwrap();
        let events = finish_spin(&mut ctx, 0.0);
        assert_eq!(events.len(), 1);
        assert_eq!(ctx.spin_challenge(MAX_SPIN_MS + 1.0), Ok(false));
    }

    #[test]
    fn test_new_game_resets_challenge_chips() {
        let mut ctx = AppContext::new(settings(&["Uno", "Jenga"], "uno(skip,reverse);jenga(pull)"));
        ctx.spin_game(0.0).unwrap();
        finish_spin(&mut ctx, 0.0);
        let first = ctx.challenge_wheel().items()[0].clone();
        assert_eq!(ctx.toggle_challenge_chip(&first), Some(ChipToggle::Added));

        ctx.spin_game(10_000.0).unwrap();
        finish_spin(&mut ctx, 10_000.0);
        assert_eq!(ctx.challenge_wheel().chips().total(), 0);
    }

    #[test]
    fn test_game_voting_flag_respected() {
        let mut s = settings(&["Uno", "Jenga"], "uno(skip)");
        s.enable_game_voting = false;
        let mut ctx = AppContext::new(s);
        assert_eq!(ctx.toggle_game_chip("Uno"), None);
    }

    #[test]
    fn test_remove_winners() {
        let mut ctx = AppContext::new(settings(&["Uno", "Jenga"], "uno(skip);jenga(pull)"));
        ctx.set_remove_winners(true);
        ctx.spin_game(0.0).unwrap();
        finish_spin(&mut ctx, 0.0);
        assert_eq!(ctx.game_wheel().len(), 1);
        let remaining = &ctx.game_wheel().items()[0];
        assert_ne!(Some(remaining.as_str()), ctx.current_game());
    }

    #[test]
    fn test_apply_settings_error_keeps_previous_state() {
        let mut ctx = AppContext::new(settings(&["Uno"], "uno(skip)"));
        ctx.toggle_game_chip("Uno");
        let before = ctx.settings().clone();

        assert_eq!(ctx.apply_settings(settings(&["  "], "uno(skip)")), Err(PartyError::NoGames));
        assert_eq!(ctx.apply_settings(settings(&["Uno"], "nope")), Err(PartyError::NoChallenges));
        assert_eq!(ctx.settings(), &before);
        assert_eq!(ctx.game_wheel().chips().total(), 1);
    }

    #[test]
    fn test_apply_settings_replaces_wheels() {
        let mut ctx = AppContext::default();
        let first = ctx.game_wheel().items()[0].clone();
        ctx.toggle_game_chip(&first);
        ctx.apply_settings(settings(&[" Chess ", "", "Go"], "chess(mate)")).unwrap();
        assert_eq!(ctx.game_wheel().items(), &["Chess".to_string(), "Go".to_string()]);
        assert_eq!(ctx.game_wheel().chips().total(), 0);
        assert_eq!(ctx.pool().len(), 1);
    }

    #[test]
    fn test_enter_wheel_clears_chips() {
        let mut ctx = AppContext::default();
        let first = ctx.game_wheel().items()[0].clone();
        ctx.toggle_game_chip(&first);
        ctx.open_settings();
        ctx.enter_wheel();
        assert_eq!(ctx.screen(), Screen::Wheel);
        assert_eq!(ctx.game_wheel().chips().total(), 0);
    }

    #[test]
    fn test_enter_bingo_same_seed_keeps_card() {
        let mut ctx = AppContext::default();
        assert_eq!(ctx.enter_bingo(Some(42)), Ok(42));
        assert!(ctx.reroll_cell(0));
        let card = ctx.bingo().unwrap().clone();

        ctx.enter_wheel();
        assert_eq!(ctx.enter_bingo(Some(42)), Ok(42));
        assert_eq!(ctx.bingo(), Some(&card));

        assert_eq!(ctx.enter_bingo(Some(43)), Ok(43));
        assert_eq!(ctx.bingo().unwrap().rerolls_remaining(), 2);
    }

    #[test]
    fn test_pool_change_rebuilds_card_for_same_seed() {
        let mut ctx = AppContext::default();
        ctx.enter_bingo(Some(42)).unwrap();

        // Same pool: the card (and its progress) survives a save
        let same = ctx.settings().clone();
        ctx.apply_settings(same).unwrap();
        assert_eq!(ctx.bingo().map(BingoSession::seed), Some(42));

        ctx.apply_settings(settings(&["Chess"], "Chess(castle, fork, pin)")).unwrap();
        assert!(ctx.bingo().is_none());

        assert_eq!(ctx.enter_bingo(Some(42)), Ok(42));
        let expected = BingoCard::generate(42, &ctx.pool().flatten()).unwrap();
        assert_eq!(ctx.bingo().unwrap().card(), &expected);
        assert!(ctx.bingo().unwrap().card().cells().iter().all(|c| c.game == "Chess"));
    }

    #[test]
    fn test_settings_refused_mid_spin() {
        let mut ctx = AppContext::new(settings(&["Uno", "Jenga"], "uno(skip);jenga(pull)"));
        ctx.spin_game(0.0).unwrap();
        ctx.tick(100.0);

        let other = settings(&["Chess"], "chess(mate)");
        assert_eq!(ctx.apply_settings(other.clone()), Err(PartyError::SpinInProgress));
        assert_eq!(ctx.save_settings(other), Err(PartyError::SpinInProgress));
        assert_eq!(ctx.reset_settings(), Err(PartyError::SpinInProgress));
        assert!(ctx.game_wheel().is_spinning());
        assert_eq!(ctx.game_wheel().len(), 2);

        let events = finish_spin(&mut ctx, 0.0);
        assert!(matches!(events.as_slice(), [AppEvent::GameChosen { .. }]));

        assert_eq!(ctx.reset_settings(), Ok(()));
        assert_eq!(ctx.settings(), &Settings::default());
    }

    #[test]
    fn test_enter_bingo_without_challenges() {
        let mut s = settings(&["Uno"], "");
        s.enable_challenges = false;
        let mut ctx = AppContext::new(s);
        assert_eq!(ctx.enter_bingo(Some(1)), Err(PartyError::EmptyPool));
        assert_eq!(ctx.screen(), Screen::Bingo);
        assert!(ctx.bingo().is_none());
        assert!(!ctx.lock_card());
        assert!(!ctx.toggle_cell(0));
    }

    #[test]
    fn test_open_link() {
        let mut ctx = AppContext::default();
        assert_eq!(ctx.open_link("?mode=wheel"), None);
        assert_eq!(ctx.open_link("?mode=bingo&seed=77"), Some(Ok(77)));
        assert_eq!(ctx.bingo().unwrap().seed(), 77);

        // A link without a seed rolls a fresh one
        let seed = ctx.open_link("?mode=bingo").unwrap().unwrap();
        assert_eq!(ctx.bingo().unwrap().seed(), seed);
    }

    #[test]
    fn test_bingo_play_through() {
        let mut ctx = AppContext::default();
        ctx.enter_bingo(Some(5)).unwrap();
        assert!(!ctx.toggle_cell(0));
        assert!(ctx.lock_card());
        assert!(!ctx.reroll_cell(0));
        for cell in [4, 8, 12, 16] {
            assert!(ctx.toggle_cell(cell));
        }
        assert!(!ctx.has_bingo());
        ctx.toggle_cell(20);
        assert_eq!(ctx.winning_line(), Some(WinLine::AntiDiagonal));
    }

    #[derive(Default)]
    struct Recorder {
        wheels: Vec<(WheelId, usize, f64)>,
        cards: Vec<(usize, bool, u32)>,
    }

    impl WheelView for Recorder {
        fn draw_wheel(&mut self, wheel: WheelId, items: &[String], angle: f64) {
            self.wheels.push((wheel, items.len(), angle));
        }
    }

    impl CardView for Recorder {
        fn draw_card(&mut self, cells: &[BingoCell], locked: bool, rerolls_remaining: u32) {
            self.cards.push((cells.len(), locked, rerolls_remaining));
        }
    }

    #[test]
    fn test_render_hands_state_to_views() {
        let mut ctx = AppContext::default();
        let mut view = Recorder::default();

        ctx.render_card(&mut view);
        assert!(view.cards.is_empty());

        ctx.render_wheels(&mut view);
        assert_eq!(view.wheels.len(), 2);
        assert_eq!(view.wheels[0].0, WheelId::Game);

        ctx.enter_bingo(Some(9)).unwrap();
        ctx.render_card(&mut view);
        assert_eq!(view.cards, vec![(CARD_CELLS, false, 2)]);
    }
}
