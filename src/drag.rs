//! Pointer-drag tracking shared by the saturation/value surface and the
//! dialog header.
//!
//! A [`DragController`] only does arithmetic: the views feed it pointer
//! positions and decide what the resulting offset drives.

use floem::kurbo::{Point, Size, Vec2};

/// State of one held-button interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Pointer position at press time.
    pub anchor: Point,
    /// Offset of the dragged thing at press time.
    pub origin: Point,
}

/// Region the computed offset is clamped to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragBounds {
    Free,
    /// `[0, 1] × [0, 1]`, for normalized control coordinates.
    UnitSquare,
    /// Keeps an `element`-sized box inside `viewport`, inset by `margin`.
    /// An element too large to fit is pinned to the margin.
    Viewport {
        viewport: Size,
        element: Size,
        margin: f64,
    },
}

impl DragBounds {
    pub fn clamp(&self, p: Point) -> Point {
        match *self {
            DragBounds::Free => p,
            DragBounds::UnitSquare => Point::new(p.x.clamp(0.0, 1.0), p.y.clamp(0.0, 1.0)),
            DragBounds::Viewport {
                viewport,
                element,
                margin,
            } => {
                let max_x = (viewport.width - element.width - margin).max(margin);
                let max_y = (viewport.height - element.height - margin).max(margin);
                Point::new(p.x.clamp(margin, max_x), p.y.clamp(margin, max_y))
            }
        }
    }
}

/// Source of the current clamp region, queried on every move so measured
/// sizes are always fresh.
pub trait BoundsQuery {
    fn drag_bounds(&self) -> DragBounds;
}

impl BoundsQuery for DragBounds {
    fn drag_bounds(&self) -> DragBounds {
        *self
    }
}

impl<F: Fn() -> DragBounds> BoundsQuery for F {
    fn drag_bounds(&self) -> DragBounds {
        self()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragController {
    session: Option<DragSession>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Starts a session. A press while a session is live restarts it.
    pub fn press(&mut self, pointer: Point, origin: Point) {
        if self.session.is_some() {
            tracing::trace!("press while dragging; restarting session");
        }
        self.session = Some(DragSession {
            anchor: pointer,
            origin,
        });
    }

    /// Returns the new offset for `pointer`, or `None` outside a session.
    pub fn move_to(&mut self, pointer: Point, bounds: &impl BoundsQuery) -> Option<Point> {
        let session = self.session?;
        let delta: Vec2 = pointer - session.anchor;
        Some(bounds.drag_bounds().clamp(session.origin + delta))
    }

    /// Ends the session. Returns whether one was active.
    pub fn release(&mut self) -> bool {
        self.session.take().is_some()
    }

    pub fn cancel(&mut self) {
        if self.session.take().is_some() {
            tracing::trace!("drag cancelled");
        }
    }
}
