//! Selection engine
//!
//! Everything that decides an outcome lives here, free of rendering and
//! platform dependencies:
//! - Seeded RNG for shareable bingo cards
//! - Weighted pick driven by chip votes
//! - Spin animation state machine (advanced by explicit timestamps)
//! - Bingo card generation, rerolls and win detection
//! - Challenge config parsing

pub mod bingo;
pub mod ledger;
pub mod pool;
pub mod rng;
pub mod selector;
pub mod spin;
pub mod win;

pub use bingo::{BingoCard, BingoCell, BingoSession};
pub use ledger::{ChipLedger, ChipToggle};
pub use pool::{ChallengePool, PoolEntry, PoolPick, parse_challenges};
pub use rng::Lcg32;
pub use selector::{VoteWeights, select, select_with};
pub use spin::{SpinAnimator, SpinPhase, ease_out_cubic, resting_angle, segment_width};
pub use win::{WinLine, has_win, winning_line};
