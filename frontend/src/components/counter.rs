use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use yew::prelude::*;
use yew::virtual_dom::AttrValue;

use crate::components::demo::DemoPanelContext;
use crate::components::reveal::use_in_view;

/// Visible fraction at which a counter starts counting.
pub const COUNTER_THRESHOLD: f64 = 0.6;
pub const COUNTER_DURATION_MS: f64 = 1200.0;

/// Set-once "already animated" flag shared by every trigger of one counter.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CounterGuard {
    animated: bool,
}

impl CounterGuard {
    /// Claims the single animation run. Later calls return `false`.
    pub fn begin(&mut self) -> bool {
        if self.animated {
            return false;
        }
        self.animated = true;
        true
    }

    pub fn has_run(&self) -> bool {
        self.animated
    }
}

pub fn counter_text(prefix: &str, value: i64, suffix: &str) -> String {
    format!("{}{}{}", prefix, value, suffix)
}

/// Linear count from 0 to `target` over a fixed window, sampled per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterAnimation {
    target: i64,
    prefix: String,
    suffix: String,
    started_at: f64,
    duration: f64,
}

impl CounterAnimation {
    pub fn new(target: i64, prefix: &str, suffix: &str, started_at: f64) -> Self {
        Self {
            target,
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
            started_at,
            duration: COUNTER_DURATION_MS,
        }
    }

    pub fn fraction(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.started_at) / self.duration).clamp(0.0, 1.0)
    }

    pub fn value_at(&self, now: f64) -> i64 {
        (self.target as f64 * self.fraction(now)).round() as i64
    }

    pub fn text_at(&self, now: f64) -> String {
        counter_text(&self.prefix, self.value_at(now), &self.suffix)
    }

    pub fn is_finished(&self, now: f64) -> bool {
        self.fraction(now) >= 1.0
    }
}

/// Drives `animation` with requestAnimationFrame, writing each frame's text
/// into `text` until the window has elapsed.
fn run_animation(animation: CounterAnimation, text: UseStateHandle<String>) {
    let Some(window) = web_sys::window() else {
        return;
    };

    let frame: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let next_frame = frame.clone();

    *frame.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |now: f64| {
        text.set(animation.text_at(now));

        if animation.is_finished(now) {
            // Release the closure; wasm-bindgen defers the drop until this call returns.
            let _ = next_frame.borrow_mut().take();
            return;
        }

        if let (Some(window), Some(callback)) = (web_sys::window(), next_frame.borrow().as_ref()) {
            let _ = window.request_animation_frame(callback.as_ref().unchecked_ref());
        }
    }));

    if let Some(callback) = frame.borrow().as_ref() {
        let _ = window.request_animation_frame(callback.as_ref().unchecked_ref());
    };
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

#[derive(Properties, PartialEq)]
pub struct CounterProps {
    pub count: i64,
    #[prop_or_default]
    pub prefix: AttrValue,
    #[prop_or_default]
    pub suffix: AttrValue,
    #[prop_or_default]
    pub class: Classes,
}

/// Number that counts up once, either when scrolled into view or when the
/// demo panel holding it becomes active.
#[function_component(Counter)]
pub fn counter(props: &CounterProps) -> Html {
    let node = use_node_ref();
    let text = use_state(|| counter_text(&props.prefix, 0, &props.suffix));
    let guard = use_mut_ref(CounterGuard::default);
    let in_view = use_in_view(node.clone(), COUNTER_THRESHOLD);
    let panel_activated = use_context::<DemoPanelContext>()
        .map(|panel| panel.activated)
        .unwrap_or(false);

    {
        let text = text.clone();
        let count = props.count;
        let prefix = props.prefix.clone();
        let suffix = props.suffix.clone();
        use_effect_with_deps(
            move |(in_view, panel_activated)| {
                if (*in_view || *panel_activated) && guard.borrow_mut().begin() {
                    debug!("counting up to {}", count);
                    run_animation(CounterAnimation::new(count, &prefix, &suffix, now_ms()), text);
                }
                || ()
            },
            (in_view, panel_activated),
        );
    }

    html! {
        <span
            ref={node}
            class={classes!("counter", props.class.clone())}
            data-count={props.count.to_string()}
            data-prefix={props.prefix.clone()}
            data-suffix={props.suffix.clone()}
        >
            { (*text).clone() }
        </span>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_trigger_is_a_no_op() {
        let mut guard = CounterGuard::default();
        assert!(guard.begin());
        assert!(!guard.begin());
        assert!(guard.has_run());
    }

    #[test]
    fn counts_linearly_over_the_window() {
        let animation = CounterAnimation::new(200, "+", "%", 1000.0);
        assert_eq!(animation.text_at(1000.0), "+0%");
        assert_eq!(animation.text_at(1600.0), "+100%");
        assert_eq!(animation.text_at(2200.0), "+200%");
        assert!(!animation.is_finished(2199.0));
        assert!(animation.is_finished(2200.0));
    }

    #[test]
    fn fraction_is_clamped() {
        let animation = CounterAnimation::new(50, "", "", 500.0);
        // Frame timestamps can predate the trigger by a few milliseconds.
        assert_eq!(animation.fraction(400.0), 0.0);
        assert_eq!(animation.fraction(10_000.0), 1.0);
        assert_eq!(animation.text_at(10_000.0), "50");
    }

    #[test]
    fn rounds_to_nearest_integer() {
        let animation = CounterAnimation::new(3, "", "x", 0.0);
        // 3 * 0.5 = 1.5 rounds away from zero.
        assert_eq!(animation.text_at(600.0), "2x");
        let negative = CounterAnimation::new(-10, "", "", 0.0);
        assert_eq!(negative.text_at(1200.0), "-10");
    }
}
