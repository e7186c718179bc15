//! Hiding the navigation bar while the task list is scrolled

use std::time::{Duration, Instant};

use crate::config::NAV_BAR_SCROLL_THRESHOLD;
use crate::transition::Transition;

/// Whether the navigation bar should be visible, given the scroll offset of the task list.
///
/// The bar is shown only when the list is (almost) at its top. There is no debounce: a list oscillating around the
/// threshold flips the signal on every scroll event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollVisibility {
    show_nav_bar: bool,
}

impl Default for ScrollVisibility {
    fn default() -> Self {
        Self { show_nav_bar: true }
    }
}

impl ScrollVisibility {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_nav_bar(&self) -> bool {
        self.show_nav_bar
    }

    /// Feed a new scroll offset. Returns the new visibility if it has changed.
    ///
    /// Non-finite offsets are ignored.
    pub fn on_scroll(&mut self, offset: f64) -> Option<bool> {
        if !offset.is_finite() {
            log::debug!("Ignoring scroll offset {}", offset);
            return None;
        }
        let show = offset <= NAV_BAR_SCROLL_THRESHOLD;
        if show == self.show_nav_bar {
            return None;
        }
        log::trace!("Navigation bar {} (offset {})", if show { "shown" } else { "hidden" }, offset);
        self.show_nav_bar = show;
        Some(show)
    }
}


/// Opacity and vertical slide of the navigation bar, following a [`ScrollVisibility`]
#[derive(Clone, Debug)]
pub struct NavBarAnimation {
    opacity: Transition,
    slide: Transition,
    slide_px: f32,
    duration: Duration,
}

impl NavBarAnimation {
    /// A visible navigation bar
    pub fn new(slide_px: f32, duration: Duration, now: Instant) -> Self {
        Self {
            opacity: Transition::settled(1.0, now),
            slide: Transition::settled(0.0, now),
            slide_px,
            duration,
        }
    }

    pub fn on_visibility(&mut self, visible: bool, now: Instant) {
        let (opacity, slide) = if visible { (1.0, 0.0) } else { (0.0, self.slide_px) };
        self.opacity.retarget(opacity, now, self.duration);
        self.slide.retarget(slide, now, self.duration);
    }

    pub fn opacity(&self, now: Instant) -> f32 {
        self.opacity.value_at(now)
    }

    /// Downward offset, in pixels
    pub fn offset(&self, now: Instant) -> f32 {
        self.slide.value_at(now)
    }
}
