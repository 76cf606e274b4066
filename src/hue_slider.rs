//! Hue slider (0–360°).
//!
//! Renders the full hue spectrum left to right as a rasterized image,
//! avoiding vger's broken linear gradient coordinate handling.

use std::sync::Arc;

use floem::kurbo::{Point, Rect};
use floem::peniko::{self, Blob, Color};

use floem::reactive::{create_effect, RwSignal, SignalUpdate, SignalWith};
use floem::views::Decorators;
use floem::{
    context::{ComputeLayoutCx, EventCx, PaintCx, UpdateCx},
    event::{Event, EventPropagation},
    View, ViewId,
};
use floem_renderer::Renderer;

use crate::constants;
use crate::math;
use crate::paint;
use crate::picker::PickerState;

/// Rasterize a horizontal hue spectrum at full saturation and value.
fn rasterize_hue_gradient(width: u32, height: u32) -> Vec<u8> {
    let mut buf = vec![0u8; (width * height * 4) as usize];
    for px in 0..width {
        let t = px as f64 / (width - 1).max(1) as f64;
        let (r, g, b) = math::hsv_to_rgb(t, 1.0, 1.0);
        let cr = (r * 255.0 + 0.5) as u8;
        let cg = (g * 255.0 + 0.5) as u8;
        let cb = (b * 255.0 + 0.5) as u8;
        for py in 0..height {
            let offset = ((py * width + px) * 4) as usize;
            buf[offset] = cr;
            buf[offset + 1] = cg;
            buf[offset + 2] = cb;
            buf[offset + 3] = 255;
        }
    }
    buf
}

/// Maps a pointer x to whole degrees along a track inset by the thumb.
fn hue_at(x: f64, width: f64) -> Option<u16> {
    let r = constants::THUMB_RADIUS;
    let usable = width - 2.0 * r;
    if usable <= 0.0 {
        return None;
    }
    Some((((x - r) / usable).clamp(0.0, 1.0) * 360.0).round() as u16)
}

struct HueUpdate(u16);

/// Hue the thumb should show after the picker reports `committed`. The
/// picker stores 360 as 0, so a thumb held at the right end stays there.
fn reconcile_hue(local: u16, held: bool, committed: u16) -> u16 {
    if held && local % 360 == committed {
        local
    } else {
        committed
    }
}

pub struct HueSlider {
    id: ViewId,
    held: bool,
    hue: u16,
    size: floem::taffy::prelude::Size<f32>,
    on_change: Option<Box<dyn Fn(u16)>>,
    /// Cached spectrum image.
    grad_img: Option<peniko::Image>,
    grad_hash: Vec<u8>,
    cached_dims: (u32, u32),
}

/// Creates a horizontal hue slider bound to `state`.
pub fn hue_slider(state: RwSignal<PickerState>) -> HueSlider {
    let id = ViewId::new();

    create_effect(move |_| {
        let h = state.with(|s| s.hsv().h);
        id.update_state(HueUpdate(h));
    });

    HueSlider {
        id,
        held: false,
        hue: state.with_untracked(|s| s.hsv().h),
        size: Default::default(),
        on_change: Some(Box::new(move |h| {
            state.update(|s| {
                s.set_hue(h);
            });
        })),
        grad_img: None,
        grad_hash: Vec::new(),
        cached_dims: (0, 0),
    }
    .style(|s| {
        s.height(constants::SLIDER_HEIGHT)
            .border_radius(constants::THUMB_RADIUS as f32)
            .cursor(floem::style::CursorStyle::Pointer)
    })
}

impl HueSlider {
    fn update_from_pointer(&mut self, x: f64) {
        if let Some(h) = hue_at(x, self.size.width as f64) {
            self.hue = h;
        }
    }

    fn notify(&self) {
        if let Some(cb) = &self.on_change {
            cb(self.hue);
        }
    }

    fn ensure_gradient_image(&mut self, scale: f64) {
        let s = scale.max(1.0);
        let pw = (self.size.width as f64 * s).round() as u32;
        let ph = (self.size.height as f64 * s).round() as u32;
        if pw == 0 || ph == 0 {
            return;
        }
        let dims = (pw, ph);
        if self.cached_dims == dims {
            return;
        }

        let pixels = rasterize_hue_gradient(pw, ph);
        let blob = Blob::new(Arc::new(pixels));
        let img = peniko::Image::new(blob.clone(), peniko::Format::Rgba8, pw, ph);

        self.grad_hash = blob.id().to_le_bytes().to_vec();
        self.grad_img = Some(img);
        self.cached_dims = dims;
    }
}

impl View for HueSlider {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(update) = state.downcast::<HueUpdate>() {
            self.hue = reconcile_hue(self.hue, self.held, update.0);
            self.id.request_layout();
        }
    }

    fn event_before_children(&mut self, cx: &mut EventCx, event: &Event) -> EventPropagation {
        match event {
            Event::PointerDown(e) => {
                cx.update_active(self.id());
                self.held = true;
                self.update_from_pointer(e.pos.x);
                self.notify();
                self.id.request_layout();
                EventPropagation::Stop
            }
            Event::PointerMove(e) => {
                if self.held {
                    self.update_from_pointer(e.pos.x);
                    self.notify();
                    self.id.request_layout();
                    EventPropagation::Stop
                } else {
                    EventPropagation::Continue
                }
            }
            Event::PointerUp(_) | Event::FocusLost => {
                self.held = false;
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
        let w = self.size.width as f64;
        let h = self.size.height as f64;
        if w == 0.0 || h == 0.0 {
            return;
        }
        let rect = Rect::new(0.0, 0.0, w, h);
        let rrect = rect.to_rounded_rect(constants::THUMB_RADIUS);

        cx.save();
        cx.clip(&rrect);
        let scale = cx.scale();
        self.ensure_gradient_image(scale);
        if let Some(ref img) = self.grad_img {
            cx.draw_img(
                floem_renderer::Img {
                    img: img.clone(),
                    hash: &self.grad_hash,
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

        let radius = constants::THUMB_RADIUS;
        let thumb_x = radius + self.hue as f64 / 360.0 * (w - 2.0 * radius);
        paint::stroke_ring(cx, Point::new(thumb_x, h / 2.0), radius - 1.5);
    }
}
