use log::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, MouseEvent};
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::components::nav::PageChrome;
use crate::dom;

/// Breathing room kept between the nav's bottom edge and the target heading.
pub const ANCHOR_MARGIN_PX: f64 = 16.0;

const IN_PAGE_LINK: &str = "a[href^=\"#\"]";

/// Whether a jump records a new history entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryUpdate {
    Push,
    Keep,
}

/// Returns the fragment if `href` is an in-page link other than a bare `#`.
pub fn fragment_of(href: &str) -> Option<&str> {
    (href.starts_with('#') && href.len() >= 2).then_some(href)
}

/// Space the fixed nav covers at the top of the viewport. No nav, no offset.
pub fn nav_offset(nav_height: Option<f64>) -> f64 {
    nav_height.map_or(0.0, |height| height + ANCHOR_MARGIN_PX)
}

/// Document scroll position that puts `target_top` just below the nav.
pub fn scroll_target(target_top: f64, offset: f64) -> f64 {
    (target_top - offset).max(0.0)
}

/// Smooth-scrolls to the element `hash` names. Unknown or malformed
/// fragments are ignored.
pub fn scroll_to_fragment(hash: &str, chrome: &PageChrome, update: HistoryUpdate) {
    let Some(hash) = fragment_of(hash) else {
        return;
    };
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(target) = window
        .document()
        .and_then(|document| document.query_selector(hash).ok().flatten())
    else {
        debug!("no element for fragment {}", hash);
        return;
    };

    let target_top = target.get_bounding_client_rect().top() + window.scroll_y().unwrap_or(0.0);
    let top = scroll_target(target_top, nav_offset(chrome.nav_height()));
    dom::smooth_scroll_to(&window, top);

    if update == HistoryUpdate::Push {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(hash));
        }
    }
}

fn current_fragment() -> Option<String> {
    web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .filter(|hash| !hash.is_empty())
}

/// Intercepts clicks on in-page links anywhere in the document and follows
/// deep links on load and on `hashchange` without adding history entries.
#[hook]
pub fn use_anchor_nav(chrome: PageChrome) {
    {
        let chrome = chrome.clone();
        use_effect_with_deps(
            move |_| {
                let document = web_sys::window().and_then(|w| w.document());

                let listener = document.map(|document| {
                    let click_chrome = chrome.clone();
                    let click_callback = Closure::<dyn Fn(MouseEvent)>::new(move |e: MouseEvent| {
                        let link = e
                            .target()
                            .and_then(|t| t.dyn_into::<Element>().ok())
                            .and_then(|el| el.closest(IN_PAGE_LINK).ok().flatten());
                        let Some(href) = link.and_then(|link| link.get_attribute("href")) else {
                            return;
                        };
                        if fragment_of(&href).is_none() {
                            return;
                        }
                        e.prevent_default();
                        scroll_to_fragment(&href, &click_chrome, HistoryUpdate::Push);
                    });
                    let _ = document.add_event_listener_with_callback(
                        "click",
                        click_callback.as_ref().unchecked_ref(),
                    );
                    (document, click_callback)
                });

                // Deep link present when the app mounts.
                if let Some(hash) = current_fragment() {
                    scroll_to_fragment(&hash, &chrome, HistoryUpdate::Keep);
                }

                move || {
                    if let Some((document, click_callback)) = listener {
                        let _ = document.remove_event_listener_with_callback(
                            "click",
                            click_callback.as_ref().unchecked_ref(),
                        );
                    }
                }
            },
            (),
        );
    }

    {
        let chrome = chrome.clone();
        use_event_with_window("hashchange", move |_: Event| {
            if let Some(hash) = current_fragment() {
                scroll_to_fragment(&hash, &chrome, HistoryUpdate::Keep);
            }
        });
    }

    // Late images shift layout; re-align once everything has loaded.
    use_event_with_window("load", move |_: Event| {
        if let Some(hash) = current_fragment() {
            scroll_to_fragment(&hash, &chrome, HistoryUpdate::Keep);
        }
    });
}
