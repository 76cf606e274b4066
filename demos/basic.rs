//! Standalone demo: opens a window with the accent picker and the style
//! variables a host widget would receive.

use floem::prelude::*;
use floem::window::WindowConfig;
use floem_accent::{accent_picker, build_accent_styles, DEFAULT_ACCENT};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let accent = RwSignal::new(DEFAULT_ACCENT);

    floem::Application::new()
        .window(
            move |_| {
                stack((
                    label(move || {
                        let styles = build_accent_styles(&accent.get().to_string());
                        styles
                            .css_vars()
                            .iter()
                            .map(|(name, value)| format!("{name}: {value};"))
                            .collect::<Vec<_>>()
                            .join("\n")
                    })
                    .style(|s| s.margin_top(48.0).font_family("monospace".to_string())),
                    accent_picker(accent),
                ))
                .style(|s| s.size_full().padding(12.0))
                .on_event_stop(floem::event::EventListener::WindowClosed, |_| {
                    floem::quit_app()
                })
            },
            Some(
                WindowConfig::default()
                    .size((520.0, 560.0))
                    .title("floem-accent"),
            ),
        )
        .run();
}
