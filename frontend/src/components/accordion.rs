use log::debug;
use yew::prelude::*;
use yew::virtual_dom::AttrValue;

/// Open/closed flags for a set of FAQ entries, at most one open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccordionState {
    len: usize,
    open: Option<usize>,
}

impl AccordionState {
    pub fn new(len: usize) -> Self {
        Self { len, open: None }
    }

    /// Flips `index` and closes every other entry. Returns whether `index`
    /// is open afterwards. Indices past the end are ignored.
    pub fn toggle(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.open = if self.open == Some(index) {
            None
        } else {
            Some(index)
        };
        self.open == Some(index)
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open == Some(index)
    }

    pub fn open_entry(&self) -> Option<usize> {
        self.open
    }
}

#[derive(Clone, PartialEq)]
pub struct FaqEntry {
    pub question: AttrValue,
    pub answer: Html,
}

#[derive(Properties, PartialEq)]
pub struct AccordionProps {
    pub items: Vec<FaqEntry>,
}

#[function_component(Accordion)]
pub fn accordion(props: &AccordionProps) -> Html {
    let state = use_state(|| AccordionState::new(props.items.len()));

    html! {
        <div class="faq-list">
            { for props.items.iter().enumerate().map(|(index, item)| {
                let is_open = state.is_open(index);
                let toggle = {
                    let state = state.clone();
                    Callback::from(move |e: MouseEvent| {
                        e.prevent_default();
                        let mut next = (*state).clone();
                        let now_open = next.toggle(index);
                        debug!("faq entry {} open: {}", index, now_open);
                        state.set(next);
                    })
                };
                html! {
                    <div class={classes!("faq-item", is_open.then_some("is-open"))}>
                        <button
                            type="button"
                            class="faq-question"
                            aria-expanded={is_open.to_string()}
                            onclick={toggle}
                        >
                            <span class="question-text">{ item.question.clone() }</span>
                            <span class="toggle-icon">{ if is_open { "−" } else { "+" } }</span>
                        </button>
                        <div class="faq-answer">
                            { item.answer.clone() }
                        </div>
                    </div>
                }
            }) }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn opening_one_closes_the_other() {
        let mut faq = AccordionState::new(3);
        assert!(faq.toggle(0));
        assert!(faq.toggle(2));
        assert!(!faq.is_open(0));
        assert!(faq.is_open(2));
    }

    #[test]
    fn clicking_the_open_entry_closes_it() {
        let mut faq = AccordionState::new(2);
        faq.toggle(1);
        assert!(!faq.toggle(1));
        assert_eq!(faq.open_entry(), None);
    }

    #[test]
    fn entry_without_header_is_inert() {
        let mut faq = AccordionState::new(2);
        faq.toggle(0);
        assert!(!faq.toggle(5));
        assert_eq!(faq.open_entry(), Some(0));
    }

    proptest! {
        #[test]
        fn at_most_one_entry_open(len in 1usize..10, clicks in prop::collection::vec(0usize..12, 0..40)) {
            let mut faq = AccordionState::new(len);
            for click in clicks {
                faq.toggle(click);
                let open = (0..len).filter(|i| faq.is_open(*i)).count();
                prop_assert!(open <= 1);
            }
        }
    }
}
