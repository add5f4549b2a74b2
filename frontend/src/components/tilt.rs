use web_sys::{Element, HtmlElement};
use yew::prelude::*;

use crate::components::nav::PageChrome;

pub const MAX_TILT_DEG: f64 = 6.0;
pub const TILT_LIFT_PX: f64 = 4.0;

/// Element kinds that get the hover tilt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TiltKind {
    Card,
    Chip,
    Step,
    Quote,
    DemoPanel,
    Screen,
}

impl TiltKind {
    pub fn css_class(self) -> &'static str {
        match self {
            TiltKind::Card => "card",
            TiltKind::Chip => "chip",
            TiltKind::Step => "step",
            TiltKind::Quote => "quote",
            TiltKind::DemoPanel => "demo-panel",
            TiltKind::Screen => "screen",
        }
    }
}

/// Bounding box captured on the first move of a hover session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TiltRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl TiltRect {
    fn of(element: &Element) -> Self {
        let rect = element.get_bounding_client_rect();
        Self {
            left: rect.left(),
            top: rect.top(),
            width: rect.width(),
            height: rect.height(),
        }
    }
}

fn normalized(offset: f64, extent: f64) -> f64 {
    if extent <= 0.0 {
        return 0.0;
    }
    ((offset / extent - 0.5) * 2.0).clamp(-1.0, 1.0)
}

/// `(rotate_x, rotate_y)` in degrees for a pointer at `(client_x, client_y)`.
/// Pointer below center tilts the top edge away (negative X rotation).
pub fn tilt_angles(rect: &TiltRect, client_x: f64, client_y: f64) -> (f64, f64) {
    let x = normalized(client_x - rect.left, rect.width);
    let y = normalized(client_y - rect.top, rect.height);
    // Adding 0.0 turns -0.0 into 0.0 so a centered pointer prints "0.00".
    (-y * MAX_TILT_DEG + 0.0, x * MAX_TILT_DEG + 0.0)
}

pub fn tilt_transform(rotate_x: f64, rotate_y: f64) -> String {
    format!(
        "translateY(-{}px) rotateX({:.2}deg) rotateY({:.2}deg)",
        TILT_LIFT_PX, rotate_x, rotate_y
    )
}

/// Evaluated once at startup; touch-only devices never attach tilt listeners.
pub fn supports_hover() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(hover: hover)").ok().flatten())
        .map_or(false, |query| query.matches())
}

fn set_transform(node: &NodeRef, value: &str) {
    if let Some(element) = node.cast::<HtmlElement>() {
        let _ = element.style().set_property("transform", value);
    }
}

#[derive(Properties, PartialEq)]
pub struct TiltProps {
    pub kind: TiltKind,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(Tilt)]
pub fn tilt(props: &TiltProps) -> Html {
    let node = use_node_ref();
    let rect = use_mut_ref(|| None::<TiltRect>);
    let hover = use_context::<PageChrome>().map_or(false, |chrome| chrome.hover);
    let class = classes!(props.kind.css_class(), props.class.clone());

    if !hover {
        return html! {
            <div ref={node} class={class}>
                { for props.children.iter() }
            </div>
        };
    }

    let on_move = {
        let node = node.clone();
        let rect = rect.clone();
        Callback::from(move |e: MouseEvent| {
            let Some(element) = node.cast::<Element>() else {
                return;
            };
            let bounds = *rect.borrow_mut().get_or_insert_with(|| TiltRect::of(&element));
            let (rotate_x, rotate_y) =
                tilt_angles(&bounds, f64::from(e.client_x()), f64::from(e.client_y()));
            set_transform(&node, &tilt_transform(rotate_x, rotate_y));
        })
    };

    let on_leave = {
        let node = node.clone();
        Callback::from(move |_: MouseEvent| {
            rect.borrow_mut().take();
            set_transform(&node, "");
        })
    };

    html! {
        <div ref={node} class={class} onmousemove={on_move} onmouseleave={on_leave}>
            { for props.children.iter() }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const RECT: TiltRect = TiltRect {
        left: 100.0,
        top: 50.0,
        width: 200.0,
        height: 100.0,
    };

    #[test]
    fn centered_pointer_is_flat() {
        assert_eq!(tilt_angles(&RECT, 200.0, 100.0), (0.0, 0.0));
        assert_eq!(
            tilt_transform(0.0, 0.0),
            "translateY(-4px) rotateX(0.00deg) rotateY(0.00deg)"
        );
    }

    #[test]
    fn corners_reach_the_maximum() {
        // Top-left corner: x = -1, y = -1.
        assert_eq!(tilt_angles(&RECT, 100.0, 50.0), (6.0, -6.0));
        // Bottom-right corner: x = 1, y = 1.
        assert_eq!(tilt_angles(&RECT, 300.0, 150.0), (-6.0, 6.0));
    }

    #[test]
    fn transform_uses_two_decimals() {
        let (x, y) = tilt_angles(&RECT, 250.0, 75.0);
        assert_eq!(
            tilt_transform(x, y),
            "translateY(-4px) rotateX(3.00deg) rotateY(3.00deg)"
        );
    }

    #[test]
    fn zero_sized_rect_does_not_tilt() {
        let empty = TiltRect {
            left: 0.0,
            top: 0.0,
            width: 0.0,
            height: 0.0,
        };
        assert_eq!(tilt_angles(&empty, 10.0, 10.0), (0.0, 0.0));
    }

    #[test]
    fn each_kind_names_its_class() {
        let classes: Vec<&str> = [
            TiltKind::Card,
            TiltKind::Chip,
            TiltKind::Step,
            TiltKind::Quote,
            TiltKind::DemoPanel,
            TiltKind::Screen,
        ]
        .into_iter()
        .map(TiltKind::css_class)
        .collect();
        assert_eq!(
            classes,
            ["card", "chip", "step", "quote", "demo-panel", "screen"]
        );
    }

    proptest! {
        #[test]
        fn never_exceeds_max_tilt(x in -1000.0f64..1000.0, y in -1000.0f64..1000.0) {
            let (rotate_x, rotate_y) = tilt_angles(&RECT, x, y);
            prop_assert!(rotate_x.abs() <= MAX_TILT_DEG);
            prop_assert!(rotate_y.abs() <= MAX_TILT_DEG);
        }
    }
}
