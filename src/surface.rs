use egui::{Color32, Pos2, Vec2};

use crate::style::StrokeStyle;

/// Primitive paint operations the drawing session issues.
///
/// Coordinates are in buffer pixels. Painting outside the buffer is clipped,
/// never an error.
pub trait Surface {
    /// Opaque copy of the full pixel buffer
    type Snapshot;

    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Paint a straight segment between two points.
    fn stroke_line(&mut self, from: Pos2, to: Pos2, style: &StrokeStyle);

    /// Paint an unfilled rectangle. `size` may be negative on either axis.
    fn stroke_rect(&mut self, origin: Pos2, size: Vec2, style: &StrokeStyle);

    /// Paint an unfilled circle. A non-positive radius paints nothing.
    fn stroke_circle(&mut self, center: Pos2, radius: f32, style: &StrokeStyle);

    fn snapshot(&self) -> Self::Snapshot;

    fn restore(&mut self, snapshot: &Self::Snapshot);

    /// Reset every pixel to fully transparent.
    fn clear(&mut self);

    /// Set every pixel to `color`.
    fn fill(&mut self, color: Color32);

    /// Reallocate the buffer. Previous content is discarded.
    fn resize(&mut self, width: u32, height: u32);

    /// Read back one pixel (unmultiplied). `None` outside the buffer.
    fn pixel(&self, x: u32, y: u32) -> Option<Color32>;
}
