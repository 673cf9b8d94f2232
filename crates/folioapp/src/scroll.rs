//! Scroll-driven state: the navbar and the reading progress bar.

/// Past this offset the navbar gets its "scrolled" look.
pub const NAVBAR_SCROLLED_AT: f64 = 50.0;
/// Scrolling down past this offset hides the navbar.
pub const NAVBAR_HIDE_AFTER: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavbarState {
    pub scrolled: bool,
    pub hidden: bool,
}

/// Tracks the last scroll offset so direction can be derived.
#[derive(Debug, Clone, Copy, Default)]
pub struct NavbarTracker {
    last_top: f64,
}

impl NavbarTracker {
    pub fn on_scroll(&mut self, top: f64) -> NavbarState {
        let state = NavbarState {
            scrolled: top > NAVBAR_SCROLLED_AT,
            hidden: top > self.last_top && top > NAVBAR_HIDE_AFTER,
        };
        // Overscroll bounce can report negative offsets.
        self.last_top = top.max(0.0);
        state
    }
}

/// Percentage of the document scrolled, clamped to 0..=100.
pub fn reading_progress(scrolled: f64, document_height: f64, viewport_height: f64) -> f64 {
    let scrollable = document_height - viewport_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (scrolled / scrollable * 100.0).clamp(0.0, 100.0)
}
