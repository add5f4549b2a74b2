use web_sys::{ScrollBehavior, ScrollToOptions, Window};

/// Scroll offsets of the whole document: (scroll_y, scroll_height, client_height).
pub fn document_scroll_metrics() -> Option<(f64, f64, f64)> {
    let window = web_sys::window()?;
    let root = window.document()?.document_element()?;
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    Some((
        scroll_y,
        f64::from(root.scroll_height()),
        f64::from(root.client_height()),
    ))
}

pub fn smooth_scroll_to(window: &Window, top: f64) {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

/// Locks or releases page scrolling through `body.style.overflow`.
///
/// This is a plain flag, not a counter: one release undoes any number of locks.
pub fn set_body_scroll_locked(locked: bool) -> bool {
    let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    else {
        return false;
    };
    let value = if locked { "hidden" } else { "" };
    body.style().set_property("overflow", value).is_ok()
}

pub fn body_scroll_locked() -> bool {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
        .and_then(|body| body.style().get_property_value("overflow").ok())
        .map_or(false, |overflow| overflow == "hidden")
}

/// Current URL without its fragment, used to clear `#hash` in place.
pub fn path_without_fragment(window: &Window) -> Option<String> {
    let location = window.location();
    let path = location.pathname().ok()?;
    let search = location.search().unwrap_or_default();
    Some(format!("{}{}", path, search))
}
