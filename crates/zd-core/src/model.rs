//! Core data model for the drawing surface.
//!
//! Everything here is a plain value: the settings store builds a fresh
//! `BrushConfig` on every change and the canvas re-reads it per operation.
//! Geometry is in canvas pixels relative to the canvas element's top-left
//! corner.

use crate::error::ConfigError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// ─── Colors ──────────────────────────────────────────────────────────────

/// Straight-alpha RGBA color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Value of one hex digit, either case.
pub fn hex_val(c: u8) -> Option<u8> {
    (c as char).to_digit(16).map(|d| d as u8)
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex color string: `#RGB` or `#RRGGBB`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        let byte = |i: usize| Some(hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?);
        match *bytes {
            [r, g, b] => Some(Self::rgb(
                hex_val(r)? * 17,
                hex_val(g)? * 17,
                hex_val(b)? * 17,
            )),
            [_, _, _, _, _, _] => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            _ => None,
        }
    }

    /// Lowercase `#rrggbb`. Alpha is not part of the wire format.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s).ok_or_else(|| ConfigError::InvalidColor(s.to_string()))
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ─── Background ──────────────────────────────────────────────────────────

/// Canvas backdrop: a solid color, or nothing at all.
///
/// `Transparent` means the buffer pixels are left unset; it is never
/// approximated by painting white.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Background {
    Transparent,
    Solid(Color),
}

impl Background {
    /// The literal sentinel accepted for `bgColor`.
    pub const TRANSPARENT: &'static str = "transparent";

    pub fn is_transparent(&self) -> bool {
        matches!(self, Background::Transparent)
    }

    pub fn color(&self) -> Option<Color> {
        match self {
            Background::Transparent => None,
            Background::Solid(c) => Some(*c),
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Background::Solid(Color::WHITE)
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Background::Transparent => f.write_str(Self::TRANSPARENT),
            Background::Solid(c) => write!(f, "{c}"),
        }
    }
}

impl FromStr for Background {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(Self::TRANSPARENT) {
            Ok(Background::Transparent)
        } else {
            s.parse().map(Background::Solid)
        }
    }
}

impl Serialize for Background {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Background {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ─── Brush type ──────────────────────────────────────────────────────────

/// Visual variant applied on top of the ink settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BrushType {
    /// Plain round stroke.
    #[default]
    Pen,
    /// Soft glow around the stroke.
    Brush,
    /// Thinner and lighter.
    Pencil,
    /// Rough edge from per-segment width jitter.
    Crayon,
}

impl BrushType {
    pub const ALL: [BrushType; 4] = [
        BrushType::Pen,
        BrushType::Brush,
        BrushType::Pencil,
        BrushType::Crayon,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BrushType::Pen => "pen",
            BrushType::Brush => "brush",
            BrushType::Pencil => "pencil",
            BrushType::Crayon => "crayon",
        }
    }

    /// Lenient lookup: unrecognized names render as the baseline pen.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "brush" => BrushType::Brush,
            "pencil" => BrushType::Pencil,
            "crayon" => BrushType::Crayon,
            "pen" => BrushType::Pen,
            other => {
                log::debug!("unknown brush type {other:?}, using pen");
                BrushType::Pen
            }
        }
    }
}

impl fmt::Display for BrushType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for BrushType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BrushType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(BrushType::from_name(&s))
    }
}

// ─── Brush configuration ─────────────────────────────────────────────────

/// The full set of user-facing drawing settings.
///
/// Replaced wholesale on every settings change, never mutated in place by
/// the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrushConfig {
    pub color: Color,
    /// Stroke width in pixels.
    pub size: f32,
    /// 0.0 ..= 1.0
    pub opacity: f32,
    pub is_eraser: bool,
    pub brush_type: BrushType,
    #[serde(rename = "bgColor")]
    pub background: Background,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            size: 5.0,
            opacity: 1.0,
            is_eraser: false,
            brush_type: BrushType::Pen,
            background: Background::Solid(Color::WHITE),
        }
    }
}

impl BrushConfig {
    /// Parse and validate a configuration object sent by the settings store.
    /// Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: BrushConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Size must be a positive finite number, opacity a finite value in `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(ConfigError::InvalidSize(self.size));
        }
        if !self.opacity.is_finite() || !(0.0..=1.0).contains(&self.opacity) {
            return Err(ConfigError::InvalidOpacity(self.opacity));
        }
        Ok(())
    }

    /// Snap size and opacity into the ranges and steps the settings
    /// sliders offer.
    pub fn clamped_to_ui(mut self) -> Self {
        use crate::palette::{OPACITY_RANGE, SIZE_RANGE, snap_opacity};
        self.size = if self.size.is_finite() {
            self.size.clamp(*SIZE_RANGE.start(), *SIZE_RANGE.end())
        } else {
            *SIZE_RANGE.start()
        };
        self.opacity = if self.opacity.is_finite() {
            snap_opacity(self.opacity)
        } else {
            *OPACITY_RANGE.end()
        };
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_eraser(mut self, is_eraser: bool) -> Self {
        self.is_eraser = is_eraser;
        self
    }

    pub fn with_brush_type(mut self, brush_type: BrushType) -> Self {
        self.brush_type = brush_type;
        self
    }

    pub fn with_background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }
}

// ─── Geometry ────────────────────────────────────────────────────────────

/// A point in canvas pixels, relative to the canvas element's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// A straight line between two consecutive samples of a gesture.
/// `from == to` is valid and paints a dot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

impl Segment {
    pub const fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    pub fn is_degenerate(&self) -> bool {
        self.from == self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn hex_short_and_long_forms() {
        assert_eq!(Color::from_hex("#fff"), Some(Color::WHITE));
        assert_eq!(Color::from_hex("ff0000"), Some(Color::rgb(255, 0, 0)));
        assert_eq!(Color::from_hex("#F1F5F9"), Some(Color::rgb(0xf1, 0xf5, 0xf9)));
        assert_eq!(Color::from_hex("#12"), None);
        assert_eq!(Color::from_hex("#gg0000"), None);
    }

    #[test]
    fn hex_output_is_lowercase() {
        assert_eq!(Color::rgb(0xEF, 0x44, 0x44).to_hex(), "#ef4444");
    }

    #[test]
    fn background_sentinel() {
        assert_eq!("transparent".parse::<Background>().unwrap(), Background::Transparent);
        assert_eq!(
            "#ffffff".parse::<Background>().unwrap(),
            Background::Solid(Color::WHITE)
        );
        assert!("nope".parse::<Background>().is_err());
        assert_eq!(Background::Transparent.to_string(), "transparent");
    }

    #[test]
    fn unknown_brush_type_is_pen() {
        assert_eq!(BrushType::from_name("marker"), BrushType::Pen);
        assert_eq!(BrushType::from_name("Crayon"), BrushType::Crayon);
    }

    #[test]
    fn defaults_match_startup_settings() {
        let config = BrushConfig::default();
        assert_eq!(config.color, Color::BLACK);
        assert_eq!(config.size, 5.0);
        assert_eq!(config.opacity, 1.0);
        assert!(!config.is_eraser);
        assert_eq!(config.brush_type, BrushType::Pen);
        assert_eq!(config.background, Background::Solid(Color::WHITE));
    }

    #[test]
    fn validate_rejects_bad_numbers() {
        let base = BrushConfig::default();
        assert!(base.with_size(0.0).validate().is_err());
        assert!(base.with_size(f32::NAN).validate().is_err());
        assert!(base.with_opacity(1.5).validate().is_err());
        assert!(base.with_opacity(-0.1).validate().is_err());
        assert!(base.with_opacity(0.0).validate().is_ok());
    }

    #[test]
    fn clamp_to_slider_ranges() {
        let config = BrushConfig::default()
            .with_size(500.0)
            .with_opacity(0.0)
            .clamped_to_ui();
        assert_eq!(config.size, 100.0);
        assert!((config.opacity - 0.1).abs() < 1e-6);

        let stepped = BrushConfig::default().with_opacity(0.52).clamped_to_ui();
        assert!((stepped.opacity - 0.5).abs() < 1e-6);
    }

    #[test]
    fn zero_length_segment_is_degenerate() {
        let p = Point::new(3.0, 4.0);
        assert!(Segment::new(p, p).is_degenerate());
        assert!(!Segment::new(Point::new(0.0, 0.0), p).is_degenerate());
    }
}
