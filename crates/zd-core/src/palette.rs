//! Swatches and slider ranges offered by the settings panel.

use crate::model::{Background, Color};
use std::ops::RangeInclusive;

/// Stroke color swatches, in panel order.
pub const STROKE_SWATCHES: [&str; 12] = [
    "#000000", "#475569", "#ef4444", "#f97316", "#f59e0b", "#10b981", "#06b6d4", "#3b82f6",
    "#8b5cf6", "#d946ef", "#ec4899", "#ffffff",
];

/// Background swatches. The last entry is the transparent sentinel.
pub const BACKGROUND_SWATCHES: [&str; 6] = [
    "#ffffff",
    "#f8fafc",
    "#f1f5f9",
    "#fff7ed",
    "#f0fdf4",
    Background::TRANSPARENT,
];

pub const SIZE_RANGE: RangeInclusive<f32> = 1.0..=100.0;
pub const OPACITY_RANGE: RangeInclusive<f32> = 0.1..=1.0;
pub const OPACITY_STEP: f32 = 0.05;

pub fn stroke_colors() -> impl Iterator<Item = Color> {
    STROKE_SWATCHES.iter().filter_map(|hex| Color::from_hex(hex))
}

pub fn backgrounds() -> impl Iterator<Item = Background> {
    BACKGROUND_SWATCHES.iter().filter_map(|s| s.parse().ok())
}

/// Round an opacity to the slider's step, keeping it inside the slider range.
pub fn snap_opacity(opacity: f32) -> f32 {
    let steps = (opacity / OPACITY_STEP).round();
    (steps * OPACITY_STEP).clamp(*OPACITY_RANGE.start(), *OPACITY_RANGE.end())
}
