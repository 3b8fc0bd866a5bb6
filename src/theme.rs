use leptos::{create_effect, create_signal, on_cleanup, ReadSignal, SignalSet};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// CSS class applied to the app root and popovers.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Light => "theme-light",
            Self::Dark => "theme-dark",
        }
    }

    const fn from_dark_flag(dark: bool) -> Self {
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

fn dark_scheme_query() -> Option<web_sys::MediaQueryList> {
    web_sys::window()?
        .match_media("(prefers-color-scheme: dark)")
        .ok()
        .flatten()
}

/// Reactive theme derived from the system color-scheme preference.
/// Falls back to dark when the media query API is unavailable.
#[must_use]
pub fn use_theme() -> ReadSignal<Theme> {
    let (theme, set_theme) = create_signal(Theme::Dark);

    create_effect(move |_| {
        let Some(query) = dark_scheme_query() else { return };
        set_theme.set(Theme::from_dark_flag(query.matches()));

        let listener = Closure::wrap(Box::new(move |event: wasm_bindgen::JsValue| {
            let Ok(matches) = js_sys::Reflect::get(&event, &"matches".into()) else {
                return;
            };
            let Some(dark) = matches.as_bool() else { return };
            set_theme.set(Theme::from_dark_flag(dark));
        }) as Box<dyn FnMut(_)>);

        if query
            .add_listener_with_opt_callback(Some(listener.as_ref().unchecked_ref()))
            .is_err()
        {
            web_sys::console::warn_1(&"theme: could not observe color-scheme changes".into());
        }

        on_cleanup(move || {
            let _ = query.remove_listener_with_opt_callback(Some(listener.as_ref().unchecked_ref()));
            listener.forget();
        });
    });

    theme
}
