//! In-memory host for tests and headless use.
//!
//! Records the DOM state the controller would produce in a browser (state
//! classes, which managed elements are inserted, notice text, zoom image
//! offset, thumbnail attributes) and simulates timers with a manual clock.

use std::collections::{BTreeMap, BTreeSet};

use crate::asset::LoadTicket;
use crate::host::{StateClass, TimerId, ZoomHost};
use crate::math::{Size, Vec2};

/// In-memory `ZoomHost`
#[derive(Clone, Debug)]
pub struct MemoryHost {
    // Listener state
    bound: bool,
    clicks_prevented: bool,
    bind_count: u32,

    // Layout
    target_offset: Vec2,
    target_size: Size,
    flyout_size: Size,

    // Managed elements
    flyout_attached: bool,
    notice_attached: bool,
    notice_text: String,
    notice_attach_count: u32,
    notice_detach_count: u32,
    flyout_attach_count: u32,
    mounted: Option<LoadTicket>,
    zoom_offset: Option<Vec2>,

    // Target attributes
    classes: BTreeSet<&'static str>,
    zoom_href: Option<String>,
    thumbnail_src: Option<String>,
    srcset: Option<String>,

    // Loads started, in order
    loads: Vec<(LoadTicket, String)>,

    // Timers (id -> due time in ms)
    timers: BTreeMap<TimerId, u64>,
    next_timer: u32,
    now: u64,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    /// Create a host with a 100×100 target at the page origin and a 50×50 flyout
    pub fn new() -> Self {
        Self {
            bound: false,
            clicks_prevented: false,
            bind_count: 0,
            target_offset: Vec2::ZERO,
            target_size: Size::new(100.0, 100.0),
            flyout_size: Size::new(50.0, 50.0),
            flyout_attached: false,
            notice_attached: false,
            notice_text: String::new(),
            notice_attach_count: 0,
            notice_detach_count: 0,
            flyout_attach_count: 0,
            mounted: None,
            zoom_offset: None,
            classes: BTreeSet::new(),
            zoom_href: None,
            thumbnail_src: None,
            srcset: None,
            loads: Vec::new(),
            timers: BTreeMap::new(),
            next_timer: 1,
            now: 0,
        }
    }

    /// Builder-style target placement
    pub fn with_target(mut self, offset: Vec2, size: Size) -> Self {
        self.target_offset = offset;
        self.target_size = size;
        self
    }

    /// Builder-style flyout size
    pub fn with_flyout(mut self, size: Size) -> Self {
        self.flyout_size = size;
        self
    }

    /// Builder-style zoom link
    pub fn with_zoom_href(mut self, href: impl Into<String>) -> Self {
        self.zoom_href = Some(href.into());
        self
    }

    /// Move or resize the target (simulates a layout change)
    pub fn set_target(&mut self, offset: Vec2, size: Size) {
        self.target_offset = offset;
        self.target_size = size;
    }

    /// Resize the flyout (simulates a stylesheet change)
    pub fn set_flyout_size(&mut self, size: Size) {
        self.flyout_size = size;
    }

    /// Advance the clock and return the timers that expired, in due order
    ///
    /// The caller delivers them to the controller with `handle_timer`.
    pub fn advance(&mut self, ms: u64) -> Vec<TimerId> {
        self.now += ms;
        let now = self.now;

        let mut due: Vec<(u64, TimerId)> = self
            .timers
            .iter()
            .filter(|(_, at)| **at <= now)
            .map(|(id, at)| (*at, *id))
            .collect();
        due.sort();

        for (_, id) in &due {
            self.timers.remove(id);
        }
        due.into_iter().map(|(_, id)| id).collect()
    }

    /// Current clock value in ms
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Number of timers still scheduled
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Whether listeners are installed
    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Whether click suppression was requested by the last `bind`
    pub fn clicks_prevented(&self) -> bool {
        self.bound && self.clicks_prevented
    }

    /// Number of `bind` calls so far
    pub fn bind_count(&self) -> u32 {
        self.bind_count
    }

    /// Whether the flyout is inserted
    pub fn is_flyout_attached(&self) -> bool {
        self.flyout_attached
    }

    /// Number of times the flyout was inserted
    pub fn flyout_attach_count(&self) -> u32 {
        self.flyout_attach_count
    }

    /// Whether the notice is inserted
    pub fn is_notice_attached(&self) -> bool {
        self.notice_attached
    }

    /// Current notice text
    pub fn notice_text(&self) -> &str {
        &self.notice_text
    }

    /// Number of times the notice was inserted
    pub fn notice_attach_count(&self) -> u32 {
        self.notice_attach_count
    }

    /// Number of times the notice was removed
    pub fn notice_detach_count(&self) -> u32 {
        self.notice_detach_count
    }

    /// Whether the target carries a state class
    pub fn has_class(&self, class: StateClass) -> bool {
        self.classes.contains(class.class_name())
    }

    /// All state classes on the target, sorted
    pub fn classes(&self) -> Vec<&'static str> {
        self.classes.iter().copied().collect()
    }

    /// Loads started so far, in order
    pub fn loads(&self) -> &[(LoadTicket, String)] {
        &self.loads
    }

    /// Ticket of the most recent load
    pub fn last_ticket(&self) -> Option<LoadTicket> {
        self.loads.last().map(|(ticket, _)| *ticket)
    }

    /// Ticket of the image currently inside the flyout
    pub fn mounted(&self) -> Option<LoadTicket> {
        self.mounted
    }

    /// Offset last applied to the zoom image
    pub fn zoom_offset(&self) -> Option<Vec2> {
        self.zoom_offset
    }

    /// Current thumbnail `src`
    pub fn thumbnail_src(&self) -> Option<&str> {
        self.thumbnail_src.as_deref()
    }

    /// Current thumbnail `srcset`
    pub fn srcset(&self) -> Option<&str> {
        self.srcset.as_deref()
    }
}

impl ZoomHost for MemoryHost {
    fn bind(&mut self, prevent_clicks: bool) {
        self.bound = true;
        self.clicks_prevented = prevent_clicks;
        self.bind_count += 1;
    }

    fn unbind(&mut self) {
        self.bound = false;
        self.clicks_prevented = false;
        self.mounted = None;
        self.zoom_offset = None;
    }

    fn target_offset(&self) -> Vec2 {
        self.target_offset
    }

    fn target_size(&self) -> Size {
        self.target_size
    }

    fn flyout_size(&self) -> Size {
        if self.flyout_attached {
            self.flyout_size
        } else {
            Size::ZERO
        }
    }

    fn attach_flyout(&mut self) {
        self.flyout_attached = true;
        self.flyout_attach_count += 1;
    }

    fn detach_flyout(&mut self) {
        self.flyout_attached = false;
    }

    fn attach_notice(&mut self) {
        self.notice_attached = true;
        self.notice_attach_count += 1;
    }

    fn detach_notice(&mut self) {
        self.notice_attached = false;
        self.notice_detach_count += 1;
    }

    fn set_notice_text(&mut self, text: &str) {
        self.notice_text = text.to_string();
    }

    fn add_class(&mut self, class: StateClass) {
        self.classes.insert(class.class_name());
    }

    fn remove_class(&mut self, class: StateClass) {
        self.classes.remove(class.class_name());
    }

    fn zoom_href(&self) -> Option<String> {
        self.zoom_href.clone()
    }

    fn set_zoom_href(&mut self, href: &str) {
        self.zoom_href = Some(href.to_string());
    }

    fn set_thumbnail(&mut self, src: &str, srcset: Option<&str>) {
        self.thumbnail_src = Some(src.to_string());
        self.srcset = srcset.map(str::to_string);
    }

    fn load_image(&mut self, ticket: LoadTicket, href: &str) {
        self.loads.push((ticket, href.to_string()));
    }

    fn mount_zoom_image(&mut self, ticket: LoadTicket) {
        self.mounted = Some(ticket);
        self.zoom_offset = None;
    }

    fn position_zoom_image(&mut self, offset: Vec2) {
        self.zoom_offset = Some(offset);
    }

    fn schedule(&mut self, delay_ms: u32) -> TimerId {
        let id = TimerId(self.next_timer);
        self.next_timer += 1;
        self.timers.insert(id, self.now + u64::from(delay_ms));
        id
    }

    fn cancel(&mut self, timer: TimerId) {
        self.timers.remove(&timer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timers_fire_in_due_order() {
        let mut host = MemoryHost::new();
        let late = host.schedule(200);
        let early = host.schedule(50);

        assert!(host.advance(49).is_empty());
        assert_eq!(host.advance(200), vec![early, late]);
        assert_eq!(host.pending_timers(), 0);
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut host = MemoryHost::new();
        let timer = host.schedule(10);
        host.cancel(timer);
        assert!(host.advance(100).is_empty());
    }

    #[test]
    fn test_flyout_size_only_when_attached() {
        let mut host = MemoryHost::new().with_flyout(Size::new(80.0, 60.0));
        assert_eq!(host.flyout_size(), Size::ZERO);
        host.attach_flyout();
        assert_eq!(host.flyout_size(), Size::new(80.0, 60.0));
    }

    #[test]
    fn test_classes_are_sets() {
        let mut host = MemoryHost::new();
        host.add_class(StateClass::Loading);
        host.add_class(StateClass::Loading);
        host.add_class(StateClass::Error);
        assert_eq!(host.classes(), vec!["is-error", "is-loading"]);

        host.remove_class(StateClass::Loading);
        assert!(!host.has_class(StateClass::Loading));
    }
}
