pub mod canvas;
pub mod input;
pub mod stroke;

pub use canvas::DrawingCanvas;
pub use input::{Gesture, InputEvent, SurfaceRect};
pub use stroke::{StrokeRenderer, StrokeState};
