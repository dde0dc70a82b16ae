//! Brush style resolution: `BrushConfig` → concrete stroke parameters.
//!
//! Resolution starts from a clean slate for every segment (no glow, no dash,
//! round caps and joins), so nothing leaks from one brush type to the next.
//!
//! | Mode    | Composite  | Width                | Alpha          | Glow          |
//! |---------|------------|----------------------|----------------|---------------|
//! | Eraser  | Erase      | `2 × size`           | 1.0            | —             |
//! | Pen     | PaintOver  | `size`               | `opacity`      | —             |
//! | Brush   | PaintOver  | `size`               | `opacity`      | `size / 2`    |
//! | Pencil  | PaintOver  | `max(1, size × 0.4)` | `opacity × 0.4`| —             |
//! | Crayon  | PaintOver  | `size ± 1` (jitter)  | `opacity`      | `1`           |

use crate::jitter::JitterSource;
use tiny_skia::{BlendMode, LineCap, LineJoin};
use zd_core::{BrushConfig, BrushType, Color};

pub const PENCIL_ALPHA_FACTOR: f32 = 0.4;
pub const PENCIL_WIDTH_FACTOR: f32 = 0.4;
pub const ERASER_WIDTH_FACTOR: f32 = 2.0;
pub const CRAYON_GLOW_RADIUS: f32 = 1.0;
/// Narrowest stroke ever painted. A zero width would render as a hairline.
pub const MIN_STROKE_WIDTH: f32 = 0.1;

/// How newly painted pixels combine with the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Composite {
    /// Source-over: ink on top of what is there.
    PaintOver,
    /// Destination-out: removes pixels, revealing true transparency.
    Erase,
    /// Destination-over: paints only where the buffer is still transparent.
    DrawBehind,
}

impl Composite {
    pub fn blend_mode(self) -> BlendMode {
        match self {
            Composite::PaintOver => BlendMode::SourceOver,
            Composite::Erase => BlendMode::DestinationOut,
            Composite::DrawBehind => BlendMode::DestinationOver,
        }
    }
}

/// A blurred halo painted beneath the stroke, like a canvas shadow with no
/// offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    /// Canvas `shadowBlur` value; the Gaussian sigma is half of it.
    pub radius: f32,
    pub color: Color,
}

impl Glow {
    pub fn sigma(&self) -> f32 {
        self.radius / 2.0
    }

    /// How far the halo can reach beyond the stroke's edge.
    pub fn margin(&self) -> f32 {
        (self.sigma() * 3.0).ceil() + 1.0
    }
}

/// Fully resolved parameters for painting one segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushStyle {
    pub composite: Composite,
    pub color: Color,
    pub width: f32,
    /// Global alpha multiplier, 0.0 ..= 1.0.
    pub alpha: f32,
    pub glow: Option<Glow>,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
}

impl BrushStyle {
    /// The reset state every segment starts from.
    pub fn baseline(color: Color, width: f32, alpha: f32) -> Self {
        Self {
            composite: Composite::PaintOver,
            color,
            width,
            alpha,
            glow: None,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
        }
    }

    /// Half the stroke width plus any glow spill: how far paint can land
    /// from the segment's centerline.
    pub fn reach(&self) -> f32 {
        self.width.max(1.0) / 2.0 + self.glow.map_or(0.0, |g| g.margin()) + 1.0
    }
}

/// Resolve the style for the next segment. Crayon strokes consume one value
/// from `jitter`; all other modes leave it untouched.
pub fn resolve_style(config: &BrushConfig, jitter: &mut dyn JitterSource) -> BrushStyle {
    let mut style = BrushStyle::baseline(config.color, config.size, config.opacity);

    if config.is_eraser {
        style.composite = Composite::Erase;
        style.width = config.size * ERASER_WIDTH_FACTOR;
        style.alpha = 1.0;
        return style;
    }

    match config.brush_type {
        BrushType::Pen => {}
        BrushType::Brush => {
            style.glow = Some(Glow {
                radius: config.size / 2.0,
                color: config.color,
            });
        }
        BrushType::Pencil => {
            style.alpha = config.opacity * PENCIL_ALPHA_FACTOR;
            style.width = (config.size * PENCIL_WIDTH_FACTOR).max(1.0);
        }
        BrushType::Crayon => {
            style.glow = Some(Glow {
                radius: CRAYON_GLOW_RADIUS,
                color: config.color,
            });
            let offset = jitter.next_jitter().clamp(-1.0, 1.0);
            style.width = (config.size + offset).max(MIN_STROKE_WIDTH);
        }
    }

    style
}
