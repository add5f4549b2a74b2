use std::rc::Rc;

use gloo_timers::callback::Interval;
use log::{debug, info};
use yew::prelude::*;
use yew::virtual_dom::AttrValue;

use crate::components::tilt::{Tilt, TiltKind};

pub const DEMO_INTERVAL_MS: u32 = 5_000;

/// Tells components inside a demo panel whether that panel is showing.
///
/// `activated` is only set once the panel became active through a tick or a
/// click. The panel shown on first render is not activated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DemoPanelContext {
    pub active: bool,
    pub activated: bool,
}

/// Ordered step ids with exactly one active at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoCycle {
    order: Vec<String>,
    index: usize,
    transitioned: bool,
}

impl DemoCycle {
    pub fn new(order: Vec<String>) -> Self {
        Self {
            order,
            index: 0,
            transitioned: false,
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn active_id(&self) -> Option<&str> {
        self.order.get(self.index).map(String::as_str)
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active_id() == Some(id)
    }

    /// True once a tick or a select has moved the cycle.
    pub fn has_transitioned(&self) -> bool {
        self.transitioned
    }

    pub fn panel_context(&self, id: &str) -> DemoPanelContext {
        let active = self.is_active(id);
        DemoPanelContext {
            active,
            activated: active && self.transitioned,
        }
    }

    /// Advances to the next step, wrapping back to the first.
    pub fn tick(&mut self) {
        if self.order.is_empty() {
            return;
        }
        self.index = (self.index + 1) % self.order.len();
        self.transitioned = true;
    }

    /// Jumps straight to `id`. Unknown ids leave the cycle untouched.
    pub fn select(&mut self, id: &str) -> bool {
        match self.order.iter().position(|step| step == id) {
            Some(position) => {
                self.index = position;
                self.transitioned = true;
                true
            }
            None => false,
        }
    }
}

pub enum DemoAction {
    Tick,
    Select(String),
}

impl Reducible for DemoCycle {
    type Action = DemoAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            DemoAction::Tick => next.tick(),
            DemoAction::Select(id) => {
                next.select(&id);
            }
        }
        next.into()
    }
}

/// Holds at most one running timer handle.
#[derive(Debug)]
pub struct CycleTimer<H> {
    handle: Option<H>,
}

impl<H> Default for CycleTimer<H> {
    fn default() -> Self {
        Self { handle: None }
    }
}

impl<H> CycleTimer<H> {
    /// Starts a timer with `start` unless one is already running.
    pub fn resume(&mut self, start: impl FnOnce() -> H) -> bool {
        if self.handle.is_some() {
            return false;
        }
        self.handle = Some(start());
        true
    }

    /// Drops the running timer, which cancels it.
    pub fn pause(&mut self) -> bool {
        self.handle.take().is_some()
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

#[derive(Clone, PartialEq)]
pub struct DemoStep {
    pub id: AttrValue,
    pub label: AttrValue,
    pub content: Html,
}

#[derive(Properties, PartialEq)]
pub struct DemoCyclerProps {
    pub steps: Vec<DemoStep>,
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(DemoCycler)]
pub fn demo_cycler(props: &DemoCyclerProps) -> Html {
    let cycle = use_reducer(|| {
        DemoCycle::new(props.steps.iter().map(|step| step.id.to_string()).collect())
    });
    let timer = use_mut_ref(CycleTimer::<Interval>::default);

    let start_timer = {
        let timer = timer.clone();
        let dispatcher = cycle.dispatcher();
        let has_steps = !cycle.is_empty();
        Rc::new(move || {
            if !has_steps {
                return;
            }
            let dispatcher = dispatcher.clone();
            let started = timer.borrow_mut().resume(move || {
                Interval::new(DEMO_INTERVAL_MS, move || dispatcher.dispatch(DemoAction::Tick))
            });
            if started {
                debug!("demo auto-advance running");
            }
        })
    };

    {
        let timer = timer.clone();
        let start_timer = start_timer.clone();
        use_effect_with_deps(
            move |_| {
                start_timer();
                move || {
                    timer.borrow_mut().pause();
                }
            },
            (),
        );
    }

    {
        let active = cycle.active_id().unwrap_or_default().to_string();
        use_effect_with_deps(
            move |active: &String| {
                if !active.is_empty() {
                    info!("demo step active: {}", active);
                }
                || ()
            },
            active,
        );
    }

    if cycle.is_empty() {
        return html! {};
    }

    let on_enter = {
        let timer = timer.clone();
        Callback::from(move |_: MouseEvent| {
            if timer.borrow_mut().pause() {
                debug!("demo auto-advance paused");
            }
        })
    };

    let on_leave = {
        let start_timer = start_timer.clone();
        Callback::from(move |_: MouseEvent| start_timer())
    };

    html! {
        <div class={classes!("demo", props.class.clone())} onmouseenter={on_enter} onmouseleave={on_leave}>
            <div class="demo-steps" role="tablist">
                { for props.steps.iter().map(|step| {
                    let is_active = cycle.is_active(&step.id);
                    let onclick = {
                        let cycle = cycle.clone();
                        let id = step.id.to_string();
                        Callback::from(move |_: MouseEvent| cycle.dispatch(DemoAction::Select(id.clone())))
                    };
                    html! {
                        <button
                            key={step.id.to_string()}
                            type="button"
                            role="tab"
                            class={classes!("demo-step", is_active.then_some("is-active"))}
                            data-demo-step={step.id.clone()}
                            aria-selected={is_active.to_string()}
                            onclick={onclick}
                        >
                            { step.label.clone() }
                        </button>
                    }
                }) }
            </div>
            <div class="demo-panels">
                { for props.steps.iter().map(|step| {
                    let context = cycle.panel_context(&step.id);
                    html! {
                        <div
                            key={step.id.to_string()}
                            role="tabpanel"
                            class={classes!("demo-content", context.active.then_some("is-active"))}
                            data-demo-content={step.id.clone()}
                        >
                            <Tilt kind={TiltKind::DemoPanel}>
                                <ContextProvider<DemoPanelContext> context={context}>
                                    { step.content.clone() }
                                </ContextProvider<DemoPanelContext>>
                            </Tilt>
                        </div>
                    }
                }) }
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cycle(ids: &[&str]) -> DemoCycle {
        DemoCycle::new(ids.iter().map(|id| id.to_string()).collect())
    }

    #[test]
    fn starts_on_first_step() {
        let demo = cycle(&["capture", "review", "ship"]);
        assert_eq!(demo.index(), 0);
        assert_eq!(demo.active_id(), Some("capture"));
        assert!(demo.is_active("capture"));
        assert!(!demo.is_active("review"));
    }

    #[test]
    fn tick_wraps_around() {
        let mut demo = cycle(&["a", "b", "c"]);
        demo.tick();
        demo.tick();
        assert_eq!(demo.active_id(), Some("c"));
        demo.tick();
        assert_eq!(demo.active_id(), Some("a"));
    }

    #[test]
    fn select_jumps_and_ticks_continue_from_there() {
        let mut demo = cycle(&["a", "b", "c"]);
        assert!(demo.select("c"));
        assert_eq!(demo.index(), 2);
        demo.tick();
        assert_eq!(demo.active_id(), Some("a"));
    }

    #[test]
    fn unknown_step_is_ignored() {
        let mut demo = cycle(&["a", "b"]);
        demo.tick();
        assert!(!demo.select("missing"));
        assert_eq!(demo.active_id(), Some("b"));
    }

    #[test]
    fn empty_cycle_has_no_active_step() {
        let mut demo = cycle(&[]);
        demo.tick();
        assert!(demo.is_empty());
        assert_eq!(demo.active_id(), None);
    }

    #[test]
    fn reducer_applies_actions() {
        let demo = Rc::new(cycle(&["a", "b", "c"]));
        let demo = demo.reduce(DemoAction::Select("b".into()));
        let demo = demo.reduce(DemoAction::Tick);
        assert_eq!(demo.active_id(), Some("c"));
    }

    #[test]
    fn initial_panel_is_active_but_not_activated() {
        let demo = cycle(&["a", "b"]);
        assert!(!demo.has_transitioned());
        assert_eq!(
            demo.panel_context("a"),
            DemoPanelContext {
                active: true,
                activated: false,
            }
        );
        assert!(!demo.panel_context("b").activated);
    }

    #[test]
    fn tick_activates_the_next_panel() {
        let mut demo = cycle(&["a", "b"]);
        demo.tick();
        assert!(demo.panel_context("b").activated);
        assert!(!demo.panel_context("a").activated);
        demo.tick();
        assert!(demo.panel_context("a").activated);
    }

    #[test]
    fn clicking_the_showing_step_activates_it() {
        let mut demo = cycle(&["a", "b"]);
        assert!(demo.select("a"));
        assert!(demo.panel_context("a").activated);
    }

    #[test]
    fn unknown_select_does_not_activate() {
        let mut demo = cycle(&["a", "b"]);
        assert!(!demo.select("missing"));
        assert!(!demo.has_transitioned());
        assert!(!demo.panel_context("a").activated);
    }

    #[test]
    fn leave_without_enter_never_starts_a_second_timer() {
        let mut timer = CycleTimer::default();
        let mut starts = 0;

        assert!(timer.resume(|| {
            starts += 1;
        }));
        // Pointer leaves while the timer is still running.
        assert!(!timer.resume(|| {
            starts += 1;
        }));
        assert_eq!(starts, 1);
    }

    #[test]
    fn pause_then_resume_restarts_once() {
        let mut timer = CycleTimer::default();
        let mut starts = 0;
        timer.resume(|| starts += 1);

        assert!(timer.pause());
        assert!(!timer.is_running());
        assert!(!timer.pause());

        assert!(timer.resume(|| starts += 1));
        assert!(!timer.resume(|| starts += 1));
        assert!(timer.is_running());
        assert_eq!(starts, 2);
    }

    proptest! {
        #[test]
        fn n_ticks_return_to_start(len in 1usize..32, rounds in 1usize..4) {
            let ids: Vec<String> = (0..len).map(|i| format!("step-{}", i)).collect();
            let mut demo = DemoCycle::new(ids);
            for _ in 0..len * rounds {
                demo.tick();
            }
            prop_assert_eq!(demo.index(), 0);
        }

        #[test]
        fn active_index_stays_in_range(len in 1usize..16, ticks in 0usize..64) {
            let ids: Vec<String> = (0..len).map(|i| format!("step-{}", i)).collect();
            let mut demo = DemoCycle::new(ids);
            for _ in 0..ticks {
                demo.tick();
            }
            prop_assert!(demo.index() < len);
            prop_assert_eq!(demo.index(), ticks % len);
        }
    }
}
