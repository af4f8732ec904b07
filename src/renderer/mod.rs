//! Rendering interface
//!
//! The core never draws. Front ends implement the view traits and use
//! `segments` for wheel geometry; `AppContext` calls the views once per
//! frame and after every state change.

pub mod segments;

pub use segments::{EMPTY_WHEEL_TEXT, Segment, segment_under_pointer, segments, truncate_label};

use crate::engine::BingoCell;

/// Which of the two wheels is being drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelId {
    Game,
    Challenge,
}

/// Draws a wheel from its items and current rotation
pub trait WheelView {
    fn draw_wheel(&mut self, wheel: WheelId, items: &[String], angle: f64);
}

/// Draws a bingo card and its session state
pub trait CardView {
    fn draw_card(&mut self, cells: &[BingoCell], locked: bool, rerolls_remaining: u32);
}
