//! Painting helpers shared by the surface and slider views.

use floem::context::PaintCx;
use floem::kurbo::{Circle, Point, Stroke};
use floem::peniko::Color;
use floem_renderer::Renderer;

const RING_SHADOW: Color = Color::rgba8(0, 0, 0, 80);

/// Strokes a white ring of `radius` at `center`, edged by thin dark rings
/// so it reads on any background.
pub(crate) fn stroke_ring(cx: &mut PaintCx, center: Point, radius: f64) {
    cx.stroke(
        &Circle::new(center, radius + 1.5),
        RING_SHADOW,
        &Stroke::new(1.0),
    );
    cx.stroke(&Circle::new(center, radius), Color::WHITE, &Stroke::new(2.0));
    cx.stroke(
        &Circle::new(center, radius - 1.5),
        RING_SHADOW,
        &Stroke::new(1.0),
    );
}
