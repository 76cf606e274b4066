//! Accent dialog: a floating panel with the saturation/value surface, hue
//! slider, hex and HSL inputs, and preset swatches, laid over a backdrop.
//!
//! The dialog is dragged by its header and kept inside the window. Pointer
//! moves are handled on the full-window overlay so a fast drag never
//! outruns the header.

use std::cell::RefCell;
use std::rc::Rc;

use floem::event::{Event, EventListener, EventPropagation};
use floem::keyboard::{Key, NamedKey};
use floem::kurbo::{Point, Size};
use floem::prelude::*;
use floem::reactive::{create_effect, RwSignal, SignalGet, SignalUpdate, SignalWith};
use floem::views::h_stack_from_iter;

use crate::config::PickerConfig;
use crate::constants;
use crate::drag::{BoundsQuery, DragBounds, DragController};
use crate::hue_slider::hue_slider;
#[cfg(feature = "copy")]
use crate::inputs::copy_button;
use crate::inputs::{hex_input, hsl_input};
use crate::picker::{HslChannel, PickerState};
use crate::presets::PresetColor;
use crate::sv_surface::sv_surface;

const BACKDROP: Color = Color::rgba8(20, 24, 32, 60);

/// Where an overlay pointer-down landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OverlayHit {
    Header,
    Dialog,
    Backdrop,
}

/// Pointer bookkeeping for the overlay. Pointer-down reaches the header and
/// the dialog body before the overlay, so they only mark the press and the
/// overlay decides what it means.
#[derive(Debug, Default)]
struct DialogPointer {
    header_pressed: bool,
    dialog_pressed: bool,
    drag: DragController,
}

impl DialogPointer {
    fn mark_header(&mut self) {
        self.header_pressed = true;
    }

    fn mark_dialog(&mut self) {
        self.dialog_pressed = true;
    }

    /// Resolves the pending marks; a header press starts a drag from the
    /// dialog's current `offset`.
    fn press(&mut self, pointer: Point, offset: Point) -> OverlayHit {
        let header = std::mem::take(&mut self.header_pressed);
        let dialog = std::mem::take(&mut self.dialog_pressed);
        if header {
            self.drag.press(pointer, offset);
            OverlayHit::Header
        } else if dialog {
            OverlayHit::Dialog
        } else {
            OverlayHit::Backdrop
        }
    }

    fn move_to(&mut self, pointer: Point, bounds: &impl BoundsQuery) -> Option<Point> {
        self.drag.move_to(pointer, bounds)
    }

    fn release(&mut self) -> bool {
        self.drag.release()
    }

    /// A hidden overlay never sees the release, so closing ends the session.
    fn dialog_closed(&mut self) {
        self.header_pressed = false;
        self.dialog_pressed = false;
        self.drag.cancel();
    }
}

/// Creates the dialog overlay. It covers its parent and is hidden while the
/// picker is idle.
pub(crate) fn accent_dialog(state: RwSignal<PickerState>, config: PickerConfig) -> impl IntoView {
    let offset = RwSignal::new(config.dialog_origin());
    let viewport = RwSignal::new(Size::ZERO);
    let dialog_size = RwSignal::new(Size::ZERO);
    let margin = config.dialog_margin;

    let pointer = Rc::new(RefCell::new(DialogPointer::default()));

    let closed = pointer.clone();
    create_effect(move |_| {
        if !state.with(|st| st.is_open()) {
            closed.borrow_mut().dialog_closed();
        }
    });

    let header_mark = pointer.clone();
    let header = h_stack((
        label(|| "Accent color").style(|s| {
            s.font_size(12.0)
                .font_bold()
                .color(Color::rgb8(60, 60, 60))
        }),
        empty().style(|s| s.flex_grow(1.0)),
        close_button(state),
    ))
    .style(|s| {
        s.items_center()
            .width_full()
            .cursor(floem::style::CursorStyle::Pointer)
    })
    .on_event(EventListener::PointerDown, move |_| {
        header_mark.borrow_mut().mark_header();
        EventPropagation::Continue
    });

    let body_mark = pointer.clone();
    let dialog = v_stack((
        header,
        sv_surface(state),
        hue_slider(state).style(|s| s.width_full()),
        hex_row(state),
        hsl_row(state),
        rgb_row(state),
        preset_row(state, config.presets.clone()),
    ))
    .style(move |s| {
        let p = offset.get();
        let palette = state.with(|st| st.palette());
        s.absolute()
            .inset_left(p.x)
            .inset_top(p.y)
            .width(constants::DIALOG_WIDTH)
            .gap(constants::GAP)
            .padding(constants::PADDING)
            .border_radius(constants::RADIUS)
            .border(1.0)
            .border_color(palette.border_color())
            .background(palette.bg_start_color())
    })
    .on_resize(move |rect| dialog_size.set(rect.size()))
    .on_event(EventListener::PointerDown, move |_| {
        body_mark.borrow_mut().mark_dialog();
        EventPropagation::Continue
    });

    let press_pointer = pointer.clone();
    let move_pointer = pointer.clone();
    let release_pointer = pointer;
    container(dialog)
        .style(move |s| {
            let open = state.with(|st| st.is_open());
            s.absolute()
                .inset(0.0)
                .size_full()
                .z_index(10)
                .background(BACKDROP)
                .apply_if(!open, |s| s.hide())
        })
        .on_resize(move |rect| viewport.set(rect.size()))
        .on_event(EventListener::PointerDown, move |e| {
            let Event::PointerDown(pe) = e else {
                return EventPropagation::Continue;
            };
            let hit = press_pointer
                .borrow_mut()
                .press(pe.pos, offset.get_untracked());
            if hit == OverlayHit::Backdrop {
                state.update(|st| {
                    st.backdrop_click();
                });
            }
            EventPropagation::Stop
        })
        .on_event(EventListener::PointerMove, move |e| {
            if let Event::PointerMove(pe) = e {
                let bounds = || DragBounds::Viewport {
                    viewport: viewport.get_untracked(),
                    element: dialog_size.get_untracked(),
                    margin,
                };
                let next = move_pointer.borrow_mut().move_to(pe.pos, &bounds);
                if let Some(p) = next {
                    offset.set(p);
                    return EventPropagation::Stop;
                }
            }
            EventPropagation::Continue
        })
        .on_event(EventListener::PointerUp, move |_| {
            release_pointer.borrow_mut().release();
            EventPropagation::Continue
        })
        .on_event(EventListener::KeyDown, move |e| {
            if let Event::KeyDown(ke) = e {
                if ke.key.logical_key == Key::Named(NamedKey::Escape) {
                    state.update(|st| {
                        st.escape();
                    });
                    return EventPropagation::Stop;
                }
            }
            EventPropagation::Continue
        })
}

fn close_button(state: RwSignal<PickerState>) -> impl IntoView {
    label(|| lucide_icons::Icon::X.unicode().to_string())
        .style(|s| {
            s.font_size(14.0)
                .font_family("lucide".to_string())
                .color(Color::rgb8(120, 120, 120))
                .padding(2.0)
                .border_radius(3.0)
                .cursor(floem::style::CursorStyle::Pointer)
                .hover(|s| s.background(Color::rgb8(230, 230, 230)))
        })
        // Consumed here so a press on the X never starts a header drag.
        .on_event_stop(EventListener::PointerDown, |_| {})
        .on_event_stop(EventListener::PointerUp, move |_| {
            state.update(|st| {
                st.close();
            });
        })
}

fn swatch(state: RwSignal<PickerState>) -> impl IntoView {
    empty().style(move |s| {
        let palette = state.with(|st| st.palette());
        s.size(constants::SWATCH_SIZE, constants::SWATCH_SIZE)
            .border_radius(constants::RADIUS)
            .border(1.0)
            .border_color(Color::rgb8(180, 180, 180))
            .background(palette.accent_color())
    })
}

fn hex_row(state: RwSignal<PickerState>) -> impl IntoView {
    h_stack((
        swatch(state),
        hex_input(state),
        #[cfg(feature = "copy")]
        copy_button(move || state.with(|st| st.hex().to_string())),
    ))
    .style(|s| s.gap(constants::GAP).items_center())
}

fn hsl_row(state: RwSignal<PickerState>) -> impl IntoView {
    h_stack((
        hsl_input("H", state, HslChannel::Hue),
        hsl_input("S", state, HslChannel::Saturation),
        hsl_input("L", state, HslChannel::Lightness),
        #[cfg(feature = "copy")]
        copy_button(move || {
            let hsl = state.with(|st| st.hsl());
            format!("hsl({}, {}%, {}%)", hsl.h, hsl.s, hsl.l)
        }),
    ))
    .style(|s| s.gap(constants::GAP / 2.0).items_center())
}

fn rgb_row(state: RwSignal<PickerState>) -> impl IntoView {
    h_stack((
        label(move || {
            let rgb = state.with(|st| st.rgb());
            format!("R {}  G {}  B {}", rgb.r, rgb.g, rgb.b)
        })
        .style(|s| {
            s.font_size(constants::INPUT_FONT)
                .font_family("monospace".to_string())
                .color(Color::rgb8(90, 90, 90))
        }),
        empty().style(|s| s.flex_grow(1.0)),
        #[cfg(feature = "copy")]
        copy_button(move || state.with(|st| st.styles().accent_color)),
    ))
    .style(|s| s.items_center().width_full())
}

fn preset_row(state: RwSignal<PickerState>, presets: Vec<PresetColor>) -> impl IntoView {
    let names = presets.clone();
    v_stack((
        h_stack_from_iter(presets.into_iter().map(move |preset| preset_swatch(state, preset)))
            .style(|s| s.gap(constants::GAP / 2.0)),
        label(move || {
            let hex = state.with(|st| st.hex());
            names
                .iter()
                .find(|p| p.hex == hex)
                .map(|p| p.label.to_string())
                .unwrap_or_else(|| "Custom".to_string())
        })
        .style(|s| {
            s.font_size(constants::LABEL_FONT)
                .color(Color::rgb8(120, 120, 120))
        }),
    ))
    .style(|s| s.gap(4.0))
}

fn preset_swatch(state: RwSignal<PickerState>, preset: PresetColor) -> impl IntoView {
    let rgb = preset.hex.rgb();
    let hex = preset.hex;
    empty()
        .style(move |s| {
            let selected = state.with(|st| st.hex() == hex);
            s.size(constants::SWATCH_SIZE, constants::SWATCH_SIZE)
                .border_radius(constants::SWATCH_SIZE / 2.0)
                .background(Color::rgb8(rgb.r, rgb.g, rgb.b))
                .border(2.0)
                .border_color(if selected {
                    Color::rgb8(60, 60, 60)
                } else {
                    Color::TRANSPARENT
                })
                .cursor(floem::style::CursorStyle::Pointer)
        })
        .on_click_stop(move |_| {
            state.update(|st| {
                st.select_preset(&preset);
            });
        })
}
