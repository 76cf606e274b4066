//! Text input components: hex field, HSL channel fields and copy buttons.

use floem::event::{Event, EventListener, EventPropagation};
use floem::keyboard::{Key, NamedKey};
use floem::prelude::*;
use floem::reactive::{create_effect, RwSignal, SignalGet, SignalUpdate, SignalWith};

use crate::constants;
use crate::picker::{HslChannel, PickerState};

fn named_key(event: &Event) -> Option<NamedKey> {
    if let Event::KeyDown(ke) = event {
        if let Key::Named(named) = &ke.key.logical_key {
            return Some(*named);
        }
    }
    None
}

fn field_style(s: floem::style::Style, width: f32) -> floem::style::Style {
    s.width(width)
        .padding(2.0)
        .font_size(constants::INPUT_FONT)
        .font_family("monospace".to_string())
        .background(Color::WHITE)
        .border(1.0)
        .border_color(Color::rgb8(200, 200, 200))
        .border_radius(3.0)
}

/// Parses a committed channel entry, clamped to `0..=max`.
fn parse_channel(raw: &str, max: u16) -> Option<u16> {
    let num = raw.trim().parse::<f64>().ok()?;
    if !num.is_finite() {
        return None;
    }
    Some(num.clamp(0.0, max as f64).round() as u16)
}

/// A numeric input for one HSL channel of the picker.
///
/// The text follows the committed color; typed values are applied on Enter
/// or focus loss, and anything unparseable snaps back.
pub(crate) fn hsl_input(
    lbl: &'static str,
    state: RwSignal<PickerState>,
    channel: HslChannel,
) -> impl IntoView {
    let max = match channel {
        HslChannel::Hue => 360,
        HslChannel::Saturation | HslChannel::Lightness => 100,
    };
    let read: fn(&PickerState) -> u16 = match channel {
        HslChannel::Hue => |s: &PickerState| s.hsl().h,
        HslChannel::Saturation => |s: &PickerState| s.hsl().s as u16,
        HslChannel::Lightness => |s: &PickerState| s.hsl().l as u16,
    };
    let text = RwSignal::new(state.with_untracked(|s| read(s)).to_string());

    // State → text (external updates)
    create_effect(move |_| {
        let expected = state.with(|s| read(s)).to_string();
        if text.get_untracked() != expected {
            text.set(expected);
        }
    });

    let on_commit = move || {
        let raw = text.get_untracked();
        let current = state.with_untracked(|s| read(s));
        match parse_channel(&raw, max) {
            Some(value) if value != current => {
                state.update(|s| {
                    s.set_hsl_channel(channel, value);
                });
            }
            _ => {}
        }
        // Snap the text to whatever was committed.
        let formatted = state.with_untracked(|s| read(s)).to_string();
        if raw != formatted {
            text.set(formatted);
        }
    };

    v_stack((
        text_input(text)
            .style(|s| field_style(s, constants::INPUT_WIDTH))
            .on_event_stop(EventListener::FocusLost, move |_| {
                on_commit();
            })
            .on_event(EventListener::KeyDown, move |e| {
                if named_key(e) == Some(NamedKey::Enter) {
                    on_commit();
                    return EventPropagation::Stop;
                }
                EventPropagation::Continue
            }),
        label(move || lbl).style(|s| {
            s.font_size(constants::LABEL_FONT)
                .color(Color::rgb8(120, 120, 120))
                .justify_content(Some(floem::taffy::AlignContent::Center))
        }),
    ))
    .style(|s| s.items_center().gap(1.0))
}

/// The free-text hex field.
///
/// Typing only updates the picker's draft; the draft is committed on Enter
/// or focus loss and reverted on Escape.
pub(crate) fn hex_input(state: RwSignal<PickerState>) -> impl IntoView {
    let text = RwSignal::new(state.with_untracked(|s| s.hex_text()));

    // State → text
    create_effect(move |_| {
        let shown = state.with(|s| s.hex_text());
        if text.get_untracked() != shown {
            text.set(shown);
        }
    });

    // Text → draft
    create_effect(move |_| {
        let raw = text.get();
        if state.with_untracked(|s| s.hex_text()) != raw {
            state.update(|s| {
                s.edit_hex_draft(raw);
            });
        }
    });

    text_input(text)
        .style(|s| field_style(s, constants::HEX_INPUT_WIDTH))
        .on_event_stop(EventListener::FocusLost, move |_| {
            state.update(|s| {
                s.commit_hex_draft();
            });
        })
        .on_event(EventListener::KeyDown, move |e| match named_key(e) {
            Some(NamedKey::Enter) => {
                state.update(|s| {
                    s.commit_hex_draft();
                });
                EventPropagation::Stop
            }
            Some(NamedKey::Escape) if state.with_untracked(|s| s.has_hex_draft()) => {
                state.update(|s| {
                    s.discard_hex_draft();
                });
                EventPropagation::Stop
            }
            _ => EventPropagation::Continue,
        })
}

/// A small copy button that copies the result of `get_text` to the clipboard.
#[cfg(feature = "copy")]
pub(crate) fn copy_button(get_text: impl Fn() -> String + 'static) -> impl IntoView {
    let pressed = RwSignal::new(false);
    container(
        label(|| lucide_icons::Icon::Copy.unicode().to_string()).style(move |s| {
            let c = if pressed.get() {
                Color::rgb8(80, 80, 80)
            } else {
                Color::rgb8(120, 120, 120)
            };
            s.font_size(14.0).font_family("lucide".to_string()).color(c)
        }),
    )
    .style(|s| {
        s.size(20.0, 20.0)
            .items_center()
            .justify_center()
            .border_radius(3.0)
            .cursor(floem::style::CursorStyle::Pointer)
            .align_self(Some(floem::taffy::AlignItems::Start))
            .hover(|s| s.background(Color::rgb8(230, 230, 230)))
    })
    .on_event_stop(EventListener::PointerDown, move |_| {
        pressed.set(true);
    })
    .on_event_stop(EventListener::PointerUp, move |_| {
        pressed.set(false);
        copy_to_clipboard(&get_text());
    })
}

#[cfg(feature = "copy")]
fn copy_to_clipboard(text: &str) {
    match arboard::Clipboard::new() {
        Ok(mut clipboard) => {
            if let Err(err) = clipboard.set_text(text) {
                tracing::warn!(%err, "clipboard write failed");
            }
        }
        Err(err) => tracing::warn!(%err, "clipboard unavailable"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_entries_are_clamped_and_rounded() {
        assert_eq!(parse_channel("42", 100), Some(42));
        assert_eq!(parse_channel(" 99.6 ", 100), Some(100));
        assert_eq!(parse_channel("-5", 100), Some(0));
        assert_eq!(parse_channel("400", 360), Some(360));
    }

    #[test]
    fn garbage_entries_are_rejected() {
        assert_eq!(parse_channel("", 100), None);
        assert_eq!(parse_channel("abc", 100), None);
        assert_eq!(parse_channel("NaN", 100), None);
        assert_eq!(parse_channel("inf", 100), None);
    }
}
