//! Scroll-triggered loading for scrollable containers.
//!
//! A bound container reports every native `scroll` event to a [`ScrollMonitor`],
//! which decides whether the caller's `method` should run:
//! - scrolling down to within `distance` px of the bottom edge always triggers
//! - scrolling up to within `distance` px of the top edge triggers only when
//!   `bi_direction` is enabled
//!
//! There is no cooldown. Each qualifying event fires, so callers that load a
//! page per trigger keep their own in-flight flag.

use std::cell::RefCell;
use std::rc::Rc;
use strum::{AsRefStr, Display};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum ScrollDirection {
    Down,
    /// Upward, or no movement since the previous event.
    Up,
}

impl From<ScrollDirection> for bool {
    fn from(d: ScrollDirection) -> bool {
        d == ScrollDirection::Down
    }
}

/// Geometry of the container at the time of a scroll event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollMetrics {
    pub scroll_top: i32,
    pub scroll_height: i32,
    pub client_height: i32,
}

impl ScrollMetrics {
    pub fn read(el: &web_sys::Element) -> Self {
        Self {
            scroll_top: el.scroll_top(),
            scroll_height: el.scroll_height(),
            client_height: el.client_height(),
        }
    }

    pub fn remaining_bottom(&self) -> i32 {
        self.scroll_height - (self.client_height + self.scroll_top)
    }
}

/// DOM-free trigger state for one bound container.
#[derive(Debug, Clone)]
pub struct ScrollMonitor {
    last_position: i32,
    distance: i32,
    bi_direction: bool,
}

impl ScrollMonitor {
    pub fn new(distance: i32, bi_direction: bool) -> Self {
        Self {
            last_position: 0,
            distance: distance.max(0),
            bi_direction,
        }
    }

    pub fn last_position(&self) -> i32 {
        self.last_position
    }

    pub fn distance(&self) -> i32 {
        self.distance
    }

    pub fn bi_direction(&self) -> bool {
        self.bi_direction
    }

    /// Record one scroll event and return the direction to report, if the
    /// event should trigger a load.
    pub fn observe(&mut self, m: ScrollMetrics) -> Option<ScrollDirection> {
        let direction = if m.scroll_top - self.last_position > 0 {
            ScrollDirection::Down
        } else {
            ScrollDirection::Up
        };
        // Position is tracked whether or not this event triggers.
        self.last_position = m.scroll_top;

        match direction {
            ScrollDirection::Down if m.remaining_bottom() <= self.distance => Some(direction),
            ScrollDirection::Up if self.bi_direction && m.scroll_top <= self.distance => {
                Some(direction)
            }
            _ => None,
        }
    }
}

pub type ScrollLoadCallback = Rc<dyn Fn(ScrollDirection, &web_sys::Element)>;

#[derive(Clone, Default)]
pub struct ScrollLoadOptions {
    /// Resolved against the bind root; `None` binds the root itself.
    pub selector: Option<String>,
    pub distance: i32,
    pub bi_direction: bool,
    pub method: Option<ScrollLoadCallback>,
}

impl ScrollLoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selector(mut self, selector: impl Into<String>) -> Self {
        let selector = selector.into();
        self.selector = if selector.trim().is_empty() {
            None
        } else {
            Some(selector)
        };
        self
    }

    pub fn distance(mut self, distance: i32) -> Self {
        self.distance = distance;
        self
    }

    pub fn bi_direction(mut self, bi_direction: bool) -> Self {
        self.bi_direction = bi_direction;
        self
    }

    pub fn method(mut self, f: impl Fn(ScrollDirection, &web_sys::Element) + 'static) -> Self {
        self.method = Some(Rc::new(f));
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScrollLoadError {
    InvalidTarget { selector: String },
    MissingCallback,
    ListenerRejected(String),
}

impl std::fmt::Display for ScrollLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTarget { selector } => {
                write!(f, "scroll-load target not found: {selector}")
            }
            Self::MissingCallback => write!(f, "scroll-load method is not set"),
            Self::ListenerRejected(e) => write!(f, "failed to attach scroll listener: {e}"),
        }
    }
}

impl std::error::Error for ScrollLoadError {}

fn resolve_container(
    root: &web_sys::Element,
    selector: Option<&str>,
) -> Result<web_sys::Element, ScrollLoadError> {
    let Some(selector) = selector else {
        return Ok(root.clone());
    };

    // An unparsable selector is reported the same as one that matches nothing.
    root.query_selector(selector)
        .ok()
        .flatten()
        .ok_or_else(|| ScrollLoadError::InvalidTarget {
            selector: selector.to_string(),
        })
}

/// Keeps a scroll listener attached. Dropping it detaches the listener.
#[must_use = "dropping the handle detaches the scroll listener"]
pub struct ScrollLoadHandle {
    container: web_sys::Element,
    monitor: Rc<RefCell<ScrollMonitor>>,
    listener: Closure<dyn FnMut()>,
}

impl ScrollLoadHandle {
    pub fn container(&self) -> &web_sys::Element {
        &self.container
    }

    pub fn last_position(&self) -> i32 {
        self.monitor.borrow().last_position()
    }
}

impl Drop for ScrollLoadHandle {
    fn drop(&mut self) {
        match self
            .container
            .remove_event_listener_with_callback("scroll", self.listener.as_ref().unchecked_ref())
        {
            Ok(()) => leptos::logging::log!("scroll-load: detached"),
            Err(e) => leptos::logging::warn!("scroll-load: failed to detach listener: {e:?}"),
        }
    }
}

/// Attach scroll-triggered loading to `root` (or the descendant matched by
/// `options.selector`).
///
/// The listener stays attached only while the returned handle is alive: keep
/// it for as long as the container should load, e.g. in a `StoredValue` or via
/// `use_scroll_load`. `bind_scroll_load(&root, opts)?;` detaches immediately.
pub fn bind_scroll_load(
    root: &web_sys::Element,
    options: ScrollLoadOptions,
) -> Result<ScrollLoadHandle, ScrollLoadError> {
    let method = options.method.ok_or(ScrollLoadError::MissingCallback)?;
    let container = resolve_container(root, options.selector.as_deref())?;
    let monitor = Rc::new(RefCell::new(ScrollMonitor::new(
        options.distance,
        options.bi_direction,
    )));

    let el = container.clone();
    let m = monitor.clone();
    let listener = Closure::wrap(Box::new(move || {
        let metrics = ScrollMetrics::read(&el);
        let hit = m.borrow_mut().observe(metrics);
        if let Some(direction) = hit {
            leptos::logging::log!("scroll-load: {direction} at {}", metrics.scroll_top);
            method(direction, &el);
        }
    }) as Box<dyn FnMut()>);

    container
        .add_event_listener_with_callback("scroll", listener.as_ref().unchecked_ref())
        .map_err(|e| ScrollLoadError::ListenerRejected(format!("{e:?}")))?;

    leptos::logging::log!(
        "scroll-load: attached (distance={}, bi_direction={})",
        options.distance.max(0),
        options.bi_direction
    );

    Ok(ScrollLoadHandle {
        container,
        monitor,
        listener,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(scroll_top: i32, scroll_height: i32, client_height: i32) -> ScrollMetrics {
        ScrollMetrics {
            scroll_top,
            scroll_height,
            client_height,
        }
    }

    #[test]
    fn test_last_position_follows_every_event() {
        let mut m = ScrollMonitor::new(10, true);
        for v in [0, 120, 80, 80, 990, 3] {
            m.observe(at(v, 1000, 100));
            assert_eq!(m.last_position(), v);
        }
    }

    #[test]
    fn test_downward_trigger_near_bottom() {
        let mut m = ScrollMonitor::new(30, false);
        assert_eq!(m.observe(at(100, 1000, 400)), None);
        // 1000 - (400 + 580) = 20 <= 30
        assert_eq!(m.observe(at(580, 1000, 400)), Some(ScrollDirection::Down));
    }

    #[test]
    fn test_upward_ignored_without_bi_direction() {
        let mut m = ScrollMonitor::new(50, false);
        m.observe(at(300, 1000, 400));
        for v in [200, 40, 0] {
            assert_eq!(m.observe(at(v, 1000, 400)), None);
        }
    }

    #[test]
    fn test_bi_direction_upward_trigger() {
        let mut m = ScrollMonitor::new(50, true);
        m.observe(at(300, 1000, 400));
        assert_eq!(m.observe(at(120, 1000, 400)), None);
        assert_eq!(m.observe(at(40, 1000, 400)), Some(ScrollDirection::Up));
    }

    #[test]
    fn test_no_trigger_outside_threshold() {
        let mut m = ScrollMonitor::new(20, true);
        assert_eq!(m.observe(at(200, 2000, 800)), None);
        assert_eq!(m.observe(at(500, 2000, 800)), None);
        assert_eq!(m.observe(at(300, 2000, 800)), None);
    }

    #[test]
    fn test_repeat_triggers_inside_band() {
        let mut m = ScrollMonitor::new(50, false);
        assert_eq!(m.observe(at(460, 1000, 500)), Some(ScrollDirection::Down));
        assert_eq!(m.observe(at(470, 1000, 500)), Some(ScrollDirection::Down));
    }

    #[test]
    fn test_mixed_sequence_fires_once() {
        let mut m = ScrollMonitor::new(20, true);
        let fired: Vec<_> = [100, 1190, 1000]
            .into_iter()
            .filter_map(|v| m.observe(at(v, 2000, 800)))
            .collect();
        assert_eq!(fired, vec![ScrollDirection::Down]);
        assert_eq!(m.last_position(), 1000);
    }

    #[test]
    fn test_stationary_event_counts_as_up() {
        let mut m = ScrollMonitor::new(0, true);
        // First event at the top: no movement, bi-directional, 0 <= 0.
        assert_eq!(m.observe(at(0, 1000, 100)), Some(ScrollDirection::Up));

        let mut bottom_only = ScrollMonitor::new(0, false);
        bottom_only.observe(at(900, 1000, 100));
        // Same position again at the very bottom is not a downward move.
        assert_eq!(bottom_only.observe(at(900, 1000, 100)), None);
    }

    #[test]
    fn test_negative_distance_clamps_to_zero() {
        let m = ScrollMonitor::new(-5, false);
        assert_eq!(m.distance(), 0);
    }

    #[test]
    fn test_options_defaults() {
        let o = ScrollLoadOptions::new();
        assert!(o.selector.is_none());
        assert_eq!(o.distance, 0);
        assert!(!o.bi_direction);
        assert!(o.method.is_none());

        let o = o.selector("  ").distance(15).bi_direction(true).method(|_, _| {});
        assert!(o.selector.is_none());
        assert_eq!(o.distance, 15);
        assert!(o.bi_direction);
        assert!(o.method.is_some());
    }

    #[test]
    fn test_direction_bool_and_display() {
        assert!(bool::from(ScrollDirection::Down));
        assert!(!bool::from(ScrollDirection::Up));
        assert_eq!(ScrollDirection::Down.to_string(), "down");
        assert_eq!(ScrollDirection::Up.as_ref(), "up");
    }

    #[test]
    fn test_error_display() {
        let e = ScrollLoadError::InvalidTarget {
            selector: ".feed".to_string(),
        };
        assert_eq!(e.to_string(), "scroll-load target not found: .feed");
        assert_eq!(
            ScrollLoadError::MissingCallback.to_string(),
            "scroll-load method is not set"
        );
    }
}
