/// Scroll depth past which the nav switches to its compact, stuck style.
pub const STUCK_AFTER_PX: f64 = 12.0;
/// Scroll depth past which the "back to top" button shows up.
pub const SCROLL_TOP_AFTER_PX: f64 = 500.0;

/// Scroll-derived UI state, recomputed from scratch on every scroll tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollChrome {
    pub progress: f64,
    pub stuck: bool,
    pub show_scroll_top: bool,
}

impl ScrollChrome {
    pub fn measure(scroll_y: f64, scroll_height: f64, client_height: f64) -> Self {
        let scroll_y = scroll_y.max(0.0);
        Self {
            progress: scroll_progress(scroll_y, scroll_height - client_height),
            stuck: scroll_y > STUCK_AFTER_PX,
            show_scroll_top: scroll_y > SCROLL_TOP_AFTER_PX,
        }
    }

    pub fn progress_style(&self) -> String {
        format!("width: {}%", self.progress)
    }
}

/// Percentage of the scrollable range covered, capped at 100. A page that
/// cannot scroll reports 0.
pub fn scroll_progress(scroll_y: f64, scrollable: f64) -> f64 {
    if scrollable <= 0.0 {
        return 0.0;
    }
    (scroll_y.max(0.0) / scrollable * 100.0).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn halfway_down() {
        let chrome = ScrollChrome::measure(450.0, 1900.0, 1000.0);
        assert_eq!(chrome.progress, 50.0);
        assert!(chrome.stuck);
        assert!(!chrome.show_scroll_top);
        assert_eq!(chrome.progress_style(), "width: 50%");
    }

    #[test]
    fn unscrollable_page_has_no_progress() {
        let chrome = ScrollChrome::measure(0.0, 800.0, 800.0);
        assert_eq!(chrome.progress, 0.0);
        assert_eq!(scroll_progress(30.0, 0.0), 0.0);
        assert_eq!(scroll_progress(30.0, -20.0), 0.0);
    }

    #[test]
    fn thresholds_are_exclusive() {
        assert!(!ScrollChrome::measure(12.0, 5000.0, 800.0).stuck);
        assert!(ScrollChrome::measure(13.0, 5000.0, 800.0).stuck);
        assert!(!ScrollChrome::measure(500.0, 5000.0, 800.0).show_scroll_top);
        assert!(ScrollChrome::measure(501.0, 5000.0, 800.0).show_scroll_top);
    }

    #[test]
    fn overscroll_is_capped() {
        assert_eq!(scroll_progress(1200.0, 1000.0), 100.0);
        assert_eq!(ScrollChrome::measure(-40.0, 2000.0, 1000.0).progress, 0.0);
    }

    proptest! {
        #[test]
        fn progress_matches_formula(scroll_y in 0.0f64..100_000.0, scrollable in 0.0f64..50_000.0) {
            let progress = scroll_progress(scroll_y, scrollable);
            let expected = if scrollable > 0.0 {
                (scroll_y / scrollable * 100.0).min(100.0)
            } else {
                0.0
            };
            prop_assert_eq!(progress, expected);
            prop_assert!((0.0..=100.0).contains(&progress));
        }
    }
}
