//! Host environment contract
//!
//! The controller never touches a DOM directly. Everything it needs from the
//! page (element geometry, inserting and removing its two managed elements,
//! state classes, image loading and timers) goes through [`ZoomHost`].
//!
//! Asynchronous work is started through the host and reported back to the
//! controller:
//!
//! - [`ZoomHost::load_image`] → [`ZoomController::handle_load`]
//! - [`ZoomHost::schedule`] → [`ZoomController::handle_timer`]
//!
//! [`ZoomController::handle_load`]: crate::ZoomController::handle_load
//! [`ZoomController::handle_timer`]: crate::ZoomController::handle_timer

use serde::{Deserialize, Serialize};

use crate::asset::LoadTicket;
use crate::math::{Size, Vec2};

/// Class name of the flyout container created by the host
pub const FLYOUT_CLASS: &str = "easyzoom-flyout";

/// Class name of the notice container created by the host
pub const NOTICE_CLASS: &str = "easyzoom-notice";

/// Handle for a scheduled host timer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(pub u32);

/// State classes toggled on the target element
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StateClass {
    /// The zoom image is loading
    Loading,
    /// The zoom image is loaded and usable
    Ready,
    /// The zoom image failed to load
    Error,
}

impl StateClass {
    /// All state classes
    pub const ALL: [StateClass; 3] = [StateClass::Loading, StateClass::Ready, StateClass::Error];

    /// CSS class name on the target element
    pub fn class_name(self) -> &'static str {
        match self {
            StateClass::Loading => "is-loading",
            StateClass::Ready => "is-ready",
            StateClass::Error => "is-error",
        }
    }
}

/// Alternate-resolution source set for the thumbnail
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SrcSet {
    /// A ready-made `srcset` attribute value
    Raw(String),
    /// Individual candidates, joined with `,`
    List(Vec<String>),
}

impl SrcSet {
    /// Value for the `srcset` attribute
    pub fn to_attribute(&self) -> String {
        match self {
            SrcSet::Raw(value) => value.clone(),
            SrcSet::List(candidates) => candidates.join(","),
        }
    }
}

impl From<&str> for SrcSet {
    fn from(value: &str) -> Self {
        SrcSet::Raw(value.to_string())
    }
}

impl From<Vec<String>> for SrcSet {
    fn from(candidates: Vec<String>) -> Self {
        SrcSet::List(candidates)
    }
}

/// DOM-like environment consumed by the zoom controller
pub trait ZoomHost {
    /// Install pointer listeners on the target.
    /// Click suppression is only wired when `prevent_clicks` is set.
    fn bind(&mut self, prevent_clicks: bool);

    /// Remove every listener installed by `bind`, the managed elements and
    /// anything still loading or scheduled
    fn unbind(&mut self);

    /// Page offset of the target's top-left corner
    fn target_offset(&self) -> Vec2;

    /// Current size of the target element
    fn target_size(&self) -> Size;

    /// Current size of the flyout element; only meaningful while attached
    fn flyout_size(&self) -> Size;

    /// Insert the flyout into the target
    fn attach_flyout(&mut self);

    /// Remove the flyout from the target
    fn detach_flyout(&mut self);

    /// Insert the notice into the target
    fn attach_notice(&mut self);

    /// Remove the notice from the target
    fn detach_notice(&mut self);

    /// Replace the notice text
    fn set_notice_text(&mut self, text: &str);

    /// Add a state class to the target
    fn add_class(&mut self, class: StateClass);

    /// Remove a state class from the target
    fn remove_class(&mut self, class: StateClass);

    /// Zoom image URL carried by the target's link
    fn zoom_href(&self) -> Option<String>;

    /// Point the target's link at a new zoom image
    fn set_zoom_href(&mut self, href: &str);

    /// Replace the thumbnail source; `None` clears the source set
    fn set_thumbnail(&mut self, src: &str, srcset: Option<&str>);

    /// Start loading the zoom image; the outcome is reported with `ticket`
    fn load_image(&mut self, ticket: LoadTicket, href: &str);

    /// Make the loaded image for `ticket` the flyout's only content
    fn mount_zoom_image(&mut self, ticket: LoadTicket);

    /// Position the zoom image inside the flyout (CSS `left` / `top`)
    fn position_zoom_image(&mut self, offset: Vec2);

    /// Schedule a one-shot timer
    fn schedule(&mut self, delay_ms: u32) -> TimerId;

    /// Cancel a timer; unknown or fired timers are ignored
    fn cancel(&mut self, timer: TimerId);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_class_names() {
        assert_eq!(StateClass::Loading.class_name(), "is-loading");
        assert_eq!(StateClass::Ready.class_name(), "is-ready");
        assert_eq!(StateClass::Error.class_name(), "is-error");
    }

    #[test]
    fn test_srcset_attribute() {
        let raw = SrcSet::from("a.jpg 1x, b.jpg 2x");
        assert_eq!(raw.to_attribute(), "a.jpg 1x, b.jpg 2x");

        let list = SrcSet::from(vec!["a.jpg 1x".to_string(), "b.jpg 2x".to_string()]);
        assert_eq!(list.to_attribute(), "a.jpg 1x,b.jpg 2x");
    }
}
