use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::js_sys::Array;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::prelude::*;
use yew::virtual_dom::AttrValue;

/// Visible fraction at which a `data-reveal` block animates in.
pub const REVEAL_THRESHOLD: f64 = 0.2;

/// One-shot visibility flag. Once marked it stays marked for the page session,
/// even if the element scrolls back out of view.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RevealState {
    revealed: bool,
}

impl RevealState {
    /// Returns `true` only for the call that flips the flag.
    pub fn mark(&mut self) -> bool {
        if self.revealed {
            return false;
        }
        self.revealed = true;
        true
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }
}

/// Observes `node` and reports `true` from the first time it intersects the
/// viewport at `threshold`. The node is unobserved right after that, and the
/// observer is disconnected when the calling component unmounts.
#[hook]
pub fn use_in_view(node: NodeRef, threshold: f64) -> bool {
    let visible = use_state_eq(|| false);

    {
        let visible = visible.clone();
        use_effect_with_deps(
            move |node: &NodeRef| {
                let state = Rc::new(RefCell::new(RevealState::default()));
                let observer = node.cast::<Element>().and_then(|element| {
                    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
                        move |entries: Array, observer: IntersectionObserver| {
                            for entry in entries.iter() {
                                let entry: IntersectionObserverEntry = entry.unchecked_into();
                                if entry.is_intersecting() && state.borrow_mut().mark() {
                                    debug!("element entered view at ratio {:.2}", entry.intersection_ratio());
                                    visible.set(true);
                                    observer.unobserve(&entry.target());
                                }
                            }
                        },
                    );
                    let options = IntersectionObserverInit::new();
                    options.set_threshold(&JsValue::from_f64(threshold));
                    let observer = IntersectionObserver::new_with_options(
                        callback.as_ref().unchecked_ref(),
                        &options,
                    )
                    .ok()?;
                    observer.observe(&element);
                    Some((observer, callback))
                });

                if observer.is_none() {
                    warn!("IntersectionObserver unavailable, element stays in its initial state");
                }

                move || {
                    if let Some((observer, _callback)) = observer {
                        observer.disconnect();
                    }
                }
            },
            node,
        );
    }

    *visible
}

#[derive(Properties, PartialEq)]
pub struct RevealProps {
    #[prop_or_default]
    pub id: Option<AttrValue>,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Children,
}

/// Section wrapper that gains `is-visible` once scrolled into view.
#[function_component(Reveal)]
pub fn reveal(props: &RevealProps) -> Html {
    let node = use_node_ref();
    let revealed = use_in_view(node.clone(), REVEAL_THRESHOLD);

    html! {
        <div
            ref={node}
            id={props.id.clone()}
            data-reveal="true"
            class={classes!(props.class.clone(), revealed.then_some("is-visible"))}
        >
            { for props.children.iter() }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_marks_only_once() {
        let mut state = RevealState::default();
        assert!(!state.is_revealed());
        assert!(state.mark());
        assert!(!state.mark());
        assert!(state.is_revealed());
    }

    #[test]
    fn reveal_survives_leaving_the_viewport() {
        let mut state = RevealState::default();
        state.mark();
        // Nothing clears the flag; a later non-intersecting entry is simply ignored.
        for _ in 0..3 {
            assert!(!state.mark());
        }
        assert!(state.is_revealed());
    }
}
