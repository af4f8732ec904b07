//! Party Wheel entry point
//!
//! On the web this exposes a `PartyWheel` handle the page script drives
//! (commands in, JSON state out). Natively it runs a short demo: a bingo
//! card for a shared link, or a game + challenge spin on a synthetic clock.

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use wasm_bindgen::prelude::*;

    use party_wheel::engine::ChipToggle;
    use party_wheel::platform::{clock, location};
    use party_wheel::{AppContext, Settings};

    fn to_js<T: serde::Serialize>(value: &T) -> String {
        serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
    }

    fn chip_result(toggle: Option<ChipToggle>) -> String {
        match toggle {
            Some(ChipToggle::Added) => "added",
            Some(ChipToggle::Removed) => "removed",
            Some(ChipToggle::OverBudget) => "over_budget",
            None => "ignored",
        }
        .to_string()
    }

    /// Handle owned by the page script
    #[wasm_bindgen]
    pub struct PartyWheel {
        ctx: AppContext,
    }

    impl Default for PartyWheel {
        fn default() -> Self {
            Self::new()
        }
    }

    #[wasm_bindgen]
    impl PartyWheel {
        /// Load settings and honor `?mode=bingo&seed=...`
        #[wasm_bindgen(constructor)]
        pub fn new() -> PartyWheel {
            let mut ctx = AppContext::from_storage();
            if let Some(query) = location::query() {
                if let Some(Err(e)) = ctx.open_link(&query) {
                    log::warn!("Bingo link could not build a card: {}", e);
                }
            }
            PartyWheel { ctx }
        }

        /// Advance animations; returns JSON array of events
        pub fn tick(&mut self, now_ms: f64) -> String {
            to_js(&self.ctx.tick(now_ms))
        }

        /// Returns false if ignored; errors carry a user-facing message
        pub fn spin_game(&mut self) -> Result<bool, JsValue> {
            self.ctx
                .spin_game(clock::now_ms())
                .map_err(|e| JsValue::from_str(&e.to_string()))
        }

        pub fn spin_challenge(&mut self) -> Result<bool, JsValue> {
            self.ctx
                .spin_challenge(clock::now_ms())
                .map_err(|e| JsValue::from_str(&e.to_string()))
        }

        pub fn toggle_game_chip(&mut self, item: &str) -> String {
            chip_result(self.ctx.toggle_game_chip(item))
        }

        pub fn toggle_challenge_chip(&mut self, item: &str) -> String {
            chip_result(self.ctx.toggle_challenge_chip(item))
        }

        pub fn shuffle_games(&mut self) -> bool {
            self.ctx.shuffle_games()
        }

        pub fn set_remove_winners(&mut self, enabled: bool) {
            self.ctx.set_remove_winners(enabled);
        }

        pub fn game_items(&self) -> String {
            to_js(&self.ctx.game_wheel().items())
        }

        pub fn game_angle(&self) -> f64 {
            self.ctx.game_wheel().angle()
        }

        pub fn challenge_items(&self) -> String {
            to_js(&self.ctx.challenge_wheel().items())
        }

        pub fn challenge_angle(&self) -> f64 {
            self.ctx.challenge_wheel().angle()
        }

        pub fn enter_wheel(&mut self) {
            self.ctx.enter_wheel();
        }

        /// Open bingo with a seed (negative = fresh seed)
        pub fn enter_bingo(&mut self, seed: f64) -> Result<u32, JsValue> {
            let seed = (seed >= 0.0).then_some(seed as u64 as u32);
            self.ctx
                .enter_bingo(seed)
                .map_err(|e| JsValue::from_str(&e.to_string()))
        }

        pub fn new_card(&mut self) -> Result<u32, JsValue> {
            self.ctx
                .new_card()
                .map_err(|e| JsValue::from_str(&e.to_string()))
        }

        pub fn reroll_cell(&mut self, cell: usize) -> bool {
            self.ctx.reroll_cell(cell)
        }

        pub fn lock_card(&mut self) -> bool {
            self.ctx.lock_card()
        }

        pub fn toggle_cell(&mut self, cell: usize) -> bool {
            self.ctx.toggle_cell(cell)
        }

        pub fn has_bingo(&self) -> bool {
            self.ctx.has_bingo()
        }

        /// JSON of the bingo session, `null` without a card
        pub fn card(&self) -> String {
            to_js(&self.ctx.bingo())
        }

        pub fn settings(&self) -> String {
            to_js(self.ctx.settings())
        }

        /// Validate, apply and persist settings JSON
        pub fn save_settings(&mut self, json: &str) -> Result<(), JsValue> {
            let settings: Settings =
                serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
            self.ctx
                .save_settings(settings)
                .map_err(|e| JsValue::from_str(&e.to_string()))
        }

        pub fn reset_settings(&mut self) -> Result<(), JsValue> {
            self.ctx
                .reset_settings()
                .map_err(|e| JsValue::from_str(&e.to_string()))
        }
    }

    pub fn start() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
        log::info!("Party Wheel starting...");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::start();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Party Wheel (native) starting...");

    let mut ctx = party_wheel::AppContext::from_storage();

    // Optional share link, e.g. "?mode=bingo&seed=42"
    let link = std::env::args().nth(1).unwrap_or_default();
    match ctx.open_link(&link) {
        Some(Ok(seed)) => print_card(&ctx, seed),
        Some(Err(e)) => eprintln!("Cannot build a bingo card: {e}"),
        None => spin_demo(&mut ctx),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn print_card(ctx: &party_wheel::AppContext, seed: u32) {
    use party_wheel::consts::BOARD_SIZE;

    let Some(session) = ctx.bingo() else {
        return;
    };
    println!("Bingo card {seed} ({})", party_wheel::share::bingo_query(seed));
    for (i, row) in session.card().cells().chunks(BOARD_SIZE).enumerate() {
        println!("Row {}:", i + 1);
        for cell in row {
            println!("  [{}] {}", cell.game, cell.challenge);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn spin_demo(ctx: &mut party_wheel::AppContext) {
    use party_wheel::AppEvent;

    // Synthetic 60 fps clock
    const FRAME_MS: f64 = 1000.0 / 60.0;
    let mut now = 0.0;

    if let Err(e) = ctx.spin_game(now) {
        eprintln!("Cannot spin: {e}");
        return;
    }

    let mut pending_challenge = ctx.settings().enable_challenges;
    loop {
        now += FRAME_MS;
        for event in ctx.tick(now) {
            match event {
                AppEvent::GameChosen { game, .. } => {
                    println!("Game: {game}");
                    if pending_challenge && ctx.spin_challenge(now).is_err() {
                        pending_challenge = false;
                    }
                }
                AppEvent::NoChallengesFor { game } => {
                    println!("No challenges configured for {game}");
                    pending_challenge = false;
                }
                AppEvent::ChallengeChosen { challenge, .. } => {
                    println!("Challenge: {challenge}");
                    pending_challenge = false;
                }
            }
        }
        if !ctx.game_wheel().is_spinning() && !ctx.challenge_wheel().is_spinning() && !pending_challenge {
            break;
        }
    }
}
