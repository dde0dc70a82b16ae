//! Input abstraction layer.
//!
//! Normalizes mouse and touch events into gestures in canvas space. Events
//! carry viewport (client) coordinates; the canvas origin is supplied with
//! every event because scrolling and layout can move the canvas between
//! events.

use zd_core::Point;

/// The canvas element's on-screen origin at the moment an event fired.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceRect {
    pub left: f32,
    pub top: f32,
}

impl SurfaceRect {
    pub const ORIGIN: Self = Self {
        left: 0.0,
        top: 0.0,
    };

    pub fn new(left: f32, top: f32) -> Self {
        Self { left, top }
    }

    /// Map viewport coordinates into canvas coordinates.
    pub fn to_canvas(&self, client_x: f32, client_y: f32) -> Point {
        Point::new(client_x - self.left, client_y - self.top)
    }
}

/// A raw host input event, in viewport coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    MouseDown { client_x: f32, client_y: f32 },
    MouseMove { client_x: f32, client_y: f32 },
    MouseUp,
    /// Pointer left the canvas.
    MouseLeave,
    /// Active touches, in the order the host reports them.
    TouchStart { touches: Vec<(f32, f32)> },
    TouchMove { touches: Vec<(f32, f32)> },
    TouchEnd,
    TouchCancel,
}

/// What an input event means for the stroke state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Start(Point),
    Move(Point),
    End,
}

impl InputEvent {
    pub fn mouse_down(client_x: f32, client_y: f32) -> Self {
        Self::MouseDown { client_x, client_y }
    }

    pub fn mouse_move(client_x: f32, client_y: f32) -> Self {
        Self::MouseMove { client_x, client_y }
    }

    pub fn touch_start(client_x: f32, client_y: f32) -> Self {
        Self::TouchStart {
            touches: vec![(client_x, client_y)],
        }
    }

    pub fn touch_move(client_x: f32, client_y: f32) -> Self {
        Self::TouchMove {
            touches: vec![(client_x, client_y)],
        }
    }

    /// Resolve against the canvas origin. Multi-touch input only follows the
    /// first touch; a touch event with no touches yields nothing.
    pub fn gesture(&self, rect: SurfaceRect) -> Option<Gesture> {
        match self {
            Self::MouseDown { client_x, client_y } => {
                Some(Gesture::Start(rect.to_canvas(*client_x, *client_y)))
            }
            Self::MouseMove { client_x, client_y } => {
                Some(Gesture::Move(rect.to_canvas(*client_x, *client_y)))
            }
            Self::TouchStart { touches } => touches
                .first()
                .map(|&(x, y)| Gesture::Start(rect.to_canvas(x, y))),
            Self::TouchMove { touches } => touches
                .first()
                .map(|&(x, y)| Gesture::Move(rect.to_canvas(x, y))),
            Self::MouseUp | Self::MouseLeave | Self::TouchEnd | Self::TouchCancel => {
                Some(Gesture::End)
            }
        }
    }
}
