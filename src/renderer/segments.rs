//! Wheel segment geometry
//!
//! Segment `i` spans `[angle + i*w, angle + (i+1)*w)` with `w = 2π / n`,
//! angles in screen convention (0 = +x, clockwise as drawn).

use glam::DVec2;

use crate::consts::POINTER_ANGLE;
use crate::engine::segment_width;
use crate::{normalize_angle, polar_to_cartesian};

/// Segment fill colors, cycled by index
pub const SEGMENT_COLORS: [&str; 10] = [
    "#f97316", "#3b82f6", "#22c55e", "#ec4899", "#eab308", "#8b5cf6", "#06b6d4", "#facc15",
    "#4ade80", "#fb7185",
];

/// Placeholder drawn on a wheel with no items
pub const EMPTY_WHEEL_TEXT: &str = "Add names to spin";

/// Label distance from center, as a fraction of the wheel radius
pub const LABEL_RADIUS_FACTOR: f64 = 0.65;
/// Hub circle radius, as a fraction of the wheel radius
pub const HUB_RADIUS_FACTOR: f64 = 0.18;

/// Labels longer than this are truncated
const MAX_LABEL_CHARS: usize = 18;
/// Characters kept before the ellipsis
const TRUNCATED_LABEL_CHARS: usize = 15;

/// One drawable wheel segment
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub index: usize,
    pub start_angle: f64,
    pub end_angle: f64,
    pub color: &'static str,
    /// Display label (already truncated)
    pub label: String,
}

impl Segment {
    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }

    /// Label center for a wheel of `radius`, relative to the wheel center
    pub fn label_anchor(&self, radius: f64) -> DVec2 {
        polar_to_cartesian(radius * LABEL_RADIUS_FACTOR, self.mid_angle())
    }

    /// Text rotation so labels read along the radius
    pub fn label_rotation(&self) -> f64 {
        self.mid_angle() + std::f64::consts::FRAC_PI_2
    }
}

/// Color for segment `index`
pub fn segment_color(index: usize) -> &'static str {
    SEGMENT_COLORS[index % SEGMENT_COLORS.len()]
}

/// Shorten long labels to 15 characters plus an ellipsis
pub fn truncate_label(label: &str) -> String {
    if label.chars().count() <= MAX_LABEL_CHARS {
        return label.to_string();
    }
    let head: String = label.chars().take(TRUNCATED_LABEL_CHARS).collect();
    format!("{}…", head.trim_end())
}

/// Geometry for every segment at rotation `angle`
pub fn segments(items: &[String], angle: f64) -> Vec<Segment> {
    if items.is_empty() {
        return Vec::new();
    }
    let width = segment_width(items.len());

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let start_angle = angle + i as f64 * width;
            Segment {
                index: i,
                start_angle,
                end_angle: start_angle + width,
                color: segment_color(i),
                label: truncate_label(item),
            }
        })
        .collect()
}

/// Index of the segment currently under the pointer
pub fn segment_under_pointer(count: usize, angle: f64) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let offset = normalize_angle(POINTER_ANGLE - angle);
    let index = (offset / segment_width(count)).floor() as usize;
    Some(index.min(count - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::resting_angle;
    use std::f64::consts::{FRAC_PI_2, TAU};

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("n{i}")).collect()
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("Short"), "Short");
        assert_eq!(truncate_label("exactly eighteen!!"), "exactly eighteen!!");
        assert_eq!(truncate_label("A very long game name here"), "A very long gam…");
        // Trailing space before the cut is trimmed
        assert_eq!(truncate_label("Fourteen chars and more"), "Fourteen chars…");
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        let label = "ääääääääääääääääääää";
        assert_eq!(truncate_label(label).chars().count(), 16);
    }

    #[test]
    fn test_segments_cover_full_circle() {
        let segs = segments(&names(4), 1.0);
        assert_eq!(segs.len(), 4);
        assert!((segs[0].start_angle - 1.0).abs() < 1e-12);
        assert!((segs[3].end_angle - (1.0 + TAU)).abs() < 1e-9);
        assert_eq!(segs[1].color, SEGMENT_COLORS[1]);
    }

    #[test]
    fn test_colors_cycle() {
        assert_eq!(segment_color(10), segment_color(0));
        assert_eq!(segment_color(13), SEGMENT_COLORS[3]);
    }

    #[test]
    fn test_empty_wheel_has_no_segments() {
        assert!(segments(&[], 0.0).is_empty());
        assert_eq!(segment_under_pointer(0, 0.0), None);
    }

    #[test]
    fn test_resting_angle_puts_segment_under_pointer() {
        for n in 1..20 {
            for k in 0..n {
                let angle = resting_angle(k, n) + 5.0 * TAU;
                assert_eq!(segment_under_pointer(n, angle), Some(k), "n={n} k={k}");
            }
        }
    }

    #[test]
    fn test_label_anchor_at_top_segment() {
        // Single segment resting under the pointer has its middle at the top
        let segs = segments(&names(1), resting_angle(0, 1));
        let anchor = segs[0].label_anchor(100.0);
        assert!(anchor.x.abs() < 1e-9);
        assert!((anchor.y + 65.0).abs() < 1e-9);
        assert!((segs[0].label_rotation() - (segs[0].mid_angle() + FRAC_PI_2)).abs() < 1e-12);
    }
}
