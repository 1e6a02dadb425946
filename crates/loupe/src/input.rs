//! Pointer input routing
//!
//! Mouse and touch events arrive from the host in page coordinates. The
//! tracker keeps the last resolved position per controller so that an event
//! with a missing coordinate still lands somewhere sensible.

use crate::math::Vec2;

/// A pointer sample delivered by the host
#[derive(Clone, Debug, PartialEq)]
pub enum PointerEvent {
    /// Mouse event; a coordinate is `None` when the host could not read it
    Mouse { x: Option<f64>, y: Option<f64> },
    /// Touch event with every active touch point, in order
    Touch { touches: Vec<Vec2> },
}

impl PointerEvent {
    /// Mouse event with both coordinates known
    pub fn mouse(x: f64, y: f64) -> Self {
        PointerEvent::Mouse {
            x: Some(x),
            y: Some(y),
        }
    }

    /// Touch event with a single touch point
    pub fn touch(x: f64, y: f64) -> Self {
        PointerEvent::Touch {
            touches: vec![Vec2::new(x, y)],
        }
    }

    /// Number of active pointers carried by this event
    pub fn touch_count(&self) -> usize {
        match self {
            PointerEvent::Mouse { .. } => 1,
            PointerEvent::Touch { touches } => touches.len(),
        }
    }

    /// Whether this event starts a single-pointer interaction
    ///
    /// Multi-touch starts are left to the browser so native gestures such
    /// as pinch still work.
    pub fn is_single(&self) -> bool {
        self.touch_count() == 1
    }
}

/// Outcome of routing an input event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputResult {
    /// Event was consumed; the host should suppress its default action
    Handled,
    /// Event was not consumed; the default action proceeds
    Unhandled,
}

impl InputResult {
    /// Whether the host should call `preventDefault`
    pub fn prevents_default(self) -> bool {
        matches!(self, InputResult::Handled)
    }
}

/// Last known pointer position, owned by one controller
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerTracker {
    last: Vec2,
}

impl PointerTracker {
    /// Create a tracker at the page origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Last resolved position
    pub fn last(&self) -> Vec2 {
        self.last
    }

    /// Resolve an event into a page position and remember it
    ///
    /// Touch events only use the first touch point. Missing coordinates
    /// fall back to the previous position on that axis.
    pub fn resolve(&mut self, event: &PointerEvent) -> Vec2 {
        match event {
            PointerEvent::Touch { touches } => {
                if let Some(first) = touches.first() {
                    self.last = *first;
                }
            }
            PointerEvent::Mouse { x, y } => {
                self.last = Vec2::new(x.unwrap_or(self.last.x), y.unwrap_or(self.last.y));
            }
        }
        self.last
    }

    /// Forget the last position
    pub fn reset(&mut self) {
        self.last = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_uses_first_point() {
        let mut tracker = PointerTracker::new();
        let event = PointerEvent::Touch {
            touches: vec![Vec2::new(10.0, 20.0), Vec2::new(300.0, 400.0)],
        };
        assert_eq!(tracker.resolve(&event), Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_missing_axis_falls_back() {
        let mut tracker = PointerTracker::new();
        tracker.resolve(&PointerEvent::mouse(50.0, 60.0));

        let partial = PointerEvent::Mouse {
            x: Some(70.0),
            y: None,
        };
        assert_eq!(tracker.resolve(&partial), Vec2::new(70.0, 60.0));
    }

    #[test]
    fn test_empty_touch_list_keeps_last() {
        let mut tracker = PointerTracker::new();
        tracker.resolve(&PointerEvent::touch(5.0, 6.0));
        let empty = PointerEvent::Touch { touches: vec![] };
        assert_eq!(tracker.resolve(&empty), Vec2::new(5.0, 6.0));
    }

    #[test]
    fn test_single_pointer_detection() {
        assert!(PointerEvent::mouse(0.0, 0.0).is_single());
        assert!(PointerEvent::touch(0.0, 0.0).is_single());

        let pinch = PointerEvent::Touch {
            touches: vec![Vec2::ZERO, Vec2::new(1.0, 1.0)],
        };
        assert!(!pinch.is_single());
        assert_eq!(pinch.touch_count(), 2);
    }

    #[test]
    fn test_input_result() {
        assert!(InputResult::Handled.prevents_default());
        assert!(!InputResult::Unhandled.prevents_default());
    }
}
