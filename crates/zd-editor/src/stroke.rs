//! Stroke renderer: turns a gesture into straight segments on the surface.
//!
//! ```text
//!   Idle ──Start(p)──▶ Drawing{last=p} ──Move(q)──▶ paint last→q, last=q
//!    ▲                       │
//!    └────────End────────────┘
//! ```
//!
//! Painted segments are permanent; ending a gesture never rolls anything
//! back. The brush style is resolved from the live configuration for every
//! segment.

use crate::input::Gesture;
use zd_core::{BrushConfig, Point, Segment};
use zd_render::{JitterSource, Rect, SurfaceManager, resolve_style};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum StrokeState {
    #[default]
    Idle,
    Drawing {
        last_point: Point,
    },
}

#[derive(Debug, Default)]
pub struct StrokeRenderer {
    state: StrokeState,
}

impl StrokeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> StrokeState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, StrokeState::Drawing { .. })
    }

    /// Anchor of the next segment, if a gesture is in progress.
    pub fn last_point(&self) -> Option<Point> {
        match self.state {
            StrokeState::Idle => None,
            StrokeState::Drawing { last_point } => Some(last_point),
        }
    }

    /// Advance the state machine. Returns the buffer area that changed.
    ///
    /// A move keeps the anchor current even when the surface cannot be
    /// painted, so drawing resumes cleanly once it can.
    pub fn handle(
        &mut self,
        gesture: Gesture,
        config: &BrushConfig,
        surface: &mut SurfaceManager,
        jitter: &mut dyn JitterSource,
    ) -> Option<Rect> {
        match (gesture, self.state) {
            (Gesture::Start(point), _) => {
                log::debug!("stroke start at ({:.1}, {:.1})", point.x, point.y);
                self.state = StrokeState::Drawing { last_point: point };
                None
            }
            (Gesture::Move(point), StrokeState::Drawing { last_point }) => {
                let segment = Segment::new(last_point, point);
                self.state = StrokeState::Drawing { last_point: point };

                let style = resolve_style(config, jitter);
                match surface.painter() {
                    Some(mut painter) => painter.stroke_segment(segment, &style),
                    None => {
                        log::trace!("no paintable surface; segment dropped");
                        None
                    }
                }
            }
            // Stray move with no anchor.
            (Gesture::Move(_), StrokeState::Idle) => None,
            (Gesture::End, StrokeState::Drawing { .. }) => {
                log::debug!("stroke end");
                self.state = StrokeState::Idle;
                None
            }
            (Gesture::End, StrokeState::Idle) => None,
        }
    }
}
