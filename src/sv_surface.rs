//! Saturation/value surface.
//!
//! A square where x maps to saturation (left 0, right 100) and y maps to
//! value (top 100, bottom 0) at the picker's current hue. The surface is
//! rasterized once per hue at a fixed resolution and scaled to widget size.

use std::sync::Arc;

use floem::kurbo::{Point, Rect, Size};
use floem::peniko::{self, Blob, Color};

use floem::reactive::{create_effect, RwSignal, SignalUpdate, SignalWith};
use floem::views::Decorators;
use floem::{
    context::{ComputeLayoutCx, EventCx, PaintCx, UpdateCx},
    event::{Event, EventPropagation},
    View, ViewId,
};
use floem_renderer::Renderer;

use crate::color::Hsv;
use crate::constants;
use crate::math;
use crate::paint;
use crate::picker::{PickerEvent, PickerState};

/// Rasterize the surface for `hue` (0.0–1.0) to an RGBA8 buffer.
fn rasterize_surface(side: u32, hue: f64) -> Vec<u8> {
    let mut buf = vec![0u8; (side * side * 4) as usize];
    let last = (side - 1).max(1) as f64;
    for py in 0..side {
        let value = 1.0 - py as f64 / last;
        let row_offset = (py * side * 4) as usize;
        for px in 0..side {
            let sat = px as f64 / last;
            let (r, g, b) = math::hsv_to_rgb(hue, sat, value);
            let offset = row_offset + (px * 4) as usize;
            buf[offset] = (r * 255.0 + 0.5) as u8;
            buf[offset + 1] = (g * 255.0 + 0.5) as u8;
            buf[offset + 2] = (b * 255.0 + 0.5) as u8;
            buf[offset + 3] = 255;
        }
    }
    buf
}

pub(crate) struct SvSurface {
    id: ViewId,
    held: bool,
    hsv: Hsv,
    size: floem::taffy::prelude::Size<f32>,
    dispatch: Box<dyn Fn(PickerEvent)>,
    surface_img: Option<peniko::Image>,
    surface_hash: Vec<u8>,
    cached_hue: Option<u16>,
}

/// Creates the saturation/value surface bound to `state`.
pub(crate) fn sv_surface(state: RwSignal<PickerState>) -> SvSurface {
    let id = ViewId::new();

    create_effect(move |_| {
        let hsv = state.with(|s| s.hsv());
        id.update_state(hsv);
    });

    SvSurface {
        id,
        held: false,
        hsv: state.with_untracked(|s| s.hsv()),
        size: Default::default(),
        dispatch: Box::new(move |event| {
            state.update(|s| {
                s.apply(event);
            });
        }),
        surface_img: None,
        surface_hash: Vec::new(),
        cached_hue: None,
    }
    .style(|s| {
        s.width_full()
            .height(constants::SURFACE_HEIGHT)
            .border_radius(constants::RADIUS)
            .cursor(floem::style::CursorStyle::Default)
    })
}

impl SvSurface {
    fn widget_size(&self) -> Size {
        Size::new(self.size.width as f64, self.size.height as f64)
    }

    fn cursor_position(&self) -> (f64, f64) {
        let Size { width, height } = self.widget_size();
        (
            self.hsv.s as f64 / 100.0 * width,
            (1.0 - self.hsv.v as f64 / 100.0) * height,
        )
    }

    fn ensure_surface_image(&mut self) {
        if self.surface_img.is_some() && self.cached_hue == Some(self.hsv.h) {
            return;
        }

        let side = constants::SURFACE_RASTER_SIZE;
        let pixels = rasterize_surface(side, self.hsv.h as f64 / 360.0);
        let blob = Blob::new(Arc::new(pixels));
        let img = peniko::Image::new(blob.clone(), peniko::Format::Rgba8, side, side);

        self.surface_hash = blob.id().to_le_bytes().to_vec();
        self.surface_img = Some(img);
        self.cached_hue = Some(self.hsv.h);
    }
}

impl View for SvSurface {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(hsv) = state.downcast::<Hsv>() {
            self.hsv = *hsv;
            self.id.request_layout();
        }
    }

    fn event_before_children(&mut self, cx: &mut EventCx, event: &Event) -> EventPropagation {
        match event {
            Event::PointerDown(e) => {
                cx.update_active(self.id());
                self.held = true;
                (self.dispatch)(PickerEvent::SurfacePress {
                    pos: e.pos,
                    size: self.widget_size(),
                });
                EventPropagation::Stop
            }
            Event::PointerMove(e) => {
                if self.held {
                    (self.dispatch)(PickerEvent::SurfaceMove {
                        pos: e.pos,
                        size: self.widget_size(),
                    });
                    EventPropagation::Stop
                } else {
                    EventPropagation::Continue
                }
            }
            Event::PointerUp(_) => {
                if self.held {
                    self.held = false;
                    (self.dispatch)(PickerEvent::SurfaceRelease);
                }
                EventPropagation::Continue
            }
            Event::FocusLost => {
                self.held = false;
                (self.dispatch)(PickerEvent::SurfaceCancel);
                EventPropagation::Continue
            }
            _ => EventPropagation::Continue,
        }
    }

    fn compute_layout(&mut self, _cx: &mut ComputeLayoutCx) -> Option<Rect> {
        let layout = self.id.get_layout().unwrap_or_default();
        self.size = layout.size;
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        let Size { width: w, height: h } = self.widget_size();
        if w == 0.0 || h == 0.0 {
            return;
        }
        let rect = Rect::new(0.0, 0.0, w, h);
        let rrect = rect.to_rounded_rect(constants::RADIUS as f64);

        cx.save();
        cx.clip(&rrect);
        self.ensure_surface_image();
        if let Some(ref img) = self.surface_img {
            cx.draw_img(
                floem_renderer::Img {
                    img: img.clone(),
                    hash: &self.surface_hash,
                },
                rect,
            );
        }
        cx.restore();

        cx.stroke(
            &rrect,
            Color::rgba8(0, 0, 0, 40),
            &floem::kurbo::Stroke::new(1.0),
        );

        let (cur_x, cur_y) = self.cursor_position();
        paint::stroke_ring(cx, Point::new(cur_x, cur_y), constants::CURSOR_RADIUS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raster_corners_match_hsv_extremes() {
        let side = 8;
        let buf = rasterize_surface(side, 0.0);
        let px = |x: u32, y: u32| {
            let o = ((y * side + x) * 4) as usize;
            (buf[o], buf[o + 1], buf[o + 2], buf[o + 3])
        };
        assert_eq!(px(0, 0), (255, 255, 255, 255));
        assert_eq!(px(side - 1, 0), (255, 0, 0, 255));
        assert_eq!(px(0, side - 1), (0, 0, 0, 255));
        assert_eq!(px(side - 1, side - 1), (0, 0, 0, 255));
    }
}
