use log::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Element, Node};
use yew::prelude::*;
use yew::virtual_dom::AttrValue;

use crate::components::scroll_chrome::ScrollChrome;
use crate::dom;

/// Page-wide handles shared by components that need to read the nav or the
/// device's input capabilities.
#[derive(Clone, PartialEq)]
pub struct PageChrome {
    pub nav: NodeRef,
    pub hover: bool,
}

impl PageChrome {
    pub fn nav_height(&self) -> Option<f64> {
        self.nav
            .cast::<Element>()
            .map(|nav| nav.get_bounding_client_rect().height())
    }
}

/// Mobile menu open flag.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NavMenuState {
    open: bool,
}

impl NavMenuState {
    pub fn toggled(self) -> Self {
        Self { open: !self.open }
    }

    pub fn closed() -> Self {
        Self { open: false }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn aria_expanded(&self) -> &'static str {
        if self.open {
            "true"
        } else {
            "false"
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub href: AttrValue,
    pub label: AttrValue,
}

#[derive(Properties, PartialEq)]
pub struct NavProps {
    pub brand: AttrValue,
    pub links: Vec<NavLink>,
    #[prop_or_default]
    pub cta: Option<NavLink>,
}

fn measure_scroll(scroll: &UseStateHandle<ScrollChrome>) {
    if let Some((scroll_y, scroll_height, client_height)) = dom::document_scroll_metrics() {
        scroll.set(ScrollChrome::measure(scroll_y, scroll_height, client_height));
    }
}

#[function_component(Nav)]
pub fn nav(props: &NavProps) -> Html {
    let local_ref = use_node_ref();
    let nav_ref = use_context::<PageChrome>().map_or(local_ref, |chrome| chrome.nav);
    let menu = use_state_eq(NavMenuState::default);
    let scroll = use_state_eq(ScrollChrome::default);

    {
        let scroll = scroll.clone();
        use_effect_with_deps(
            move |_| {
                let window = web_sys::window();

                let listener = window.map(|window| {
                    let handle = scroll.clone();
                    let scroll_callback = Closure::<dyn Fn()>::new(move || measure_scroll(&handle));
                    let options = AddEventListenerOptions::new();
                    options.set_passive(true);
                    if window
                        .add_event_listener_with_callback_and_add_event_listener_options(
                            "scroll",
                            scroll_callback.as_ref().unchecked_ref(),
                            &options,
                        )
                        .is_err()
                    {
                        warn!("could not attach scroll listener");
                    }
                    (window, scroll_callback)
                });

                // Initial check
                measure_scroll(&scroll);

                move || {
                    if let Some((window, scroll_callback)) = listener {
                        let _ = window.remove_event_listener_with_callback(
                            "scroll",
                            scroll_callback.as_ref().unchecked_ref(),
                        );
                    }
                }
            },
            (),
        );
    }

    // Clicks anywhere outside the nav close the mobile menu.
    {
        let menu = menu.clone();
        let nav_ref = nav_ref.clone();
        use_effect_with_deps(
            move |_| {
                let document = web_sys::window().and_then(|w| w.document());

                let listener = document.map(|document| {
                    let click_callback = Closure::<dyn Fn(MouseEvent)>::new(move |e: MouseEvent| {
                        let target = e.target().and_then(|t| t.dyn_into::<Node>().ok());
                        let inside = match (nav_ref.cast::<Node>(), target) {
                            (Some(nav), Some(target)) => nav.contains(Some(&target)),
                            _ => false,
                        };
                        if !inside {
                            menu.set(NavMenuState::closed());
                        }
                    });
                    let _ = document.add_event_listener_with_callback(
                        "click",
                        click_callback.as_ref().unchecked_ref(),
                    );
                    (document, click_callback)
                });

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

    let toggle_menu = {
        let menu = menu.clone();
        Callback::from(move |_: MouseEvent| {
            let next = (*menu).toggled();
            debug!("nav menu open: {}", next.is_open());
            menu.set(next);
        })
    };

    let close_menu = {
        let menu = menu.clone();
        Callback::from(move |_: MouseEvent| menu.set(NavMenuState::closed()))
    };

    let scroll_to_top = Callback::from(|_: MouseEvent| {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let (Ok(history), Some(path)) = (window.history(), dom::path_without_fragment(&window)) {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&path));
        }
        dom::smooth_scroll_to(&window, 0.0);
    });

    html! {
        <>
            <div
                id="scroll-progress"
                class="scroll-progress"
                style={scroll.progress_style()}
                aria-hidden="true"
            ></div>
            <nav
                ref={nav_ref}
                class={classes!(
                    "nav",
                    scroll.stuck.then_some("is-sticky"),
                    menu.is_open().then_some("is-open")
                )}
            >
                <div class="nav-content">
                    <a href="#inicio" class="nav-logo">{ props.brand.clone() }</a>
                    <button
                        type="button"
                        class="nav-toggle"
                        aria-controls="nav-menu"
                        aria-expanded={menu.aria_expanded()}
                        aria-label="Abrir menú"
                        onclick={toggle_menu}
                    >
                        <span></span>
                        <span></span>
                        <span></span>
                    </button>
                    <div id="nav-menu" class="nav-menu">
                        { for props.links.iter().map(|link| html! {
                            <a class="nav-link" href={link.href.clone()} onclick={close_menu.clone()}>
                                { link.label.clone() }
                            </a>
                        }) }
                        {
                            if let Some(cta) = &props.cta {
                                html! {
                                    <a class="nav-cta" href={cta.href.clone()} onclick={close_menu.clone()}>
                                        { cta.label.clone() }
                                    </a>
                                }
                            } else {
                                html! {}
                            }
                        }
                    </div>
                </div>
            </nav>
            <button
                type="button"
                class={classes!("scroll-top", scroll.show_scroll_top.then_some("is-visible"))}
                aria-label="Volver arriba"
                onclick={scroll_to_top}
            >
                {"↑"}
            </button>
        </>
    }
}
