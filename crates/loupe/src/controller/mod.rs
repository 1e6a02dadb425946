//! Zoom controller
//!
//! Owns everything one zoom lens needs: listener lifecycle, the zoom image
//! load state, the geometry snapshot of the open flyout, the notice and the
//! last pointer position. Nothing is shared between controllers, so several
//! lenses can live on one page.
//!
//! ## Lifecycle
//!
//! ```text
//!            attach()                 enter / show()
//!  Detached ─────────► Closed ──────────────────────────► Open
//!     ▲                  │  ▲   (loads first if not ready)   │
//!     │   teardown()     │  └────────────────────────────────┘
//!     └──────────────────┘      leave / hide() / pointer out of range
//! ```
//!
//! While detached, [`ZoomController::is_open`] and [`ZoomController::is_ready`]
//! return `None` rather than `Some(false)`.

mod loader;

use serde::Serialize;
use tracing::{debug, trace};

use crate::asset::{LoadStatus, LoadTicket, ZoomAsset};
use crate::config::ZoomConfig;
use crate::error::{ZoomError, ZoomResult};
use crate::geometry::{GeometrySnapshot, Placement};
use crate::host::{SrcSet, StateClass, TimerId, ZoomHost};
use crate::input::{InputResult, PointerEvent, PointerTracker};
use crate::notice::Notice;

/// Callbacks fired on flyout transitions
#[derive(Default)]
pub struct ZoomHooks {
    /// Called after the flyout opens
    pub on_show: Option<Box<dyn FnMut()>>,
    /// Called after the flyout closes
    pub on_hide: Option<Box<dyn FnMut()>>,
}

impl std::fmt::Debug for ZoomHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZoomHooks")
            .field("on_show", &self.on_show.is_some())
            .field("on_hide", &self.on_hide.is_some())
            .finish()
    }
}

/// An open request waiting for the zoom image
#[derive(Clone, Debug, PartialEq)]
struct PendingOpen {
    origin: Option<PointerEvent>,
    /// Only open if the pointer is still over the target
    test_mouse_over: bool,
}

impl PendingOpen {
    /// Fold a newer request into this one
    fn merge(self, newer: PendingOpen) -> PendingOpen {
        PendingOpen {
            origin: newer.origin.or(self.origin),
            test_mouse_over: self.test_mouse_over && newer.test_mouse_over,
        }
    }
}

/// State that only exists while attached
#[derive(Debug, Default)]
struct Active {
    /// Geometry of the open flyout; `Some` exactly while open
    view: Option<GeometrySnapshot>,
    mouse_over: bool,
    asset: Option<ZoomAsset>,
    pending_open: Option<PendingOpen>,
}

/// Serializable view of a controller's state
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoomSnapshot {
    pub attached: bool,
    pub is_open: Option<bool>,
    pub is_ready: Option<bool>,
    pub is_mouse_over: bool,
    pub status: LoadStatus,
    pub zoom_href: Option<String>,
    pub geometry: Option<GeometrySnapshot>,
    pub notice: Option<String>,
}

/// Zoom lens state machine for one target
pub struct ZoomController<H: ZoomHost> {
    host: H,
    config: ZoomConfig,
    hooks: ZoomHooks,
    /// `None` while detached
    active: Option<Active>,
    notice: Notice,
    pointer: PointerTracker,
    next_ticket: LoadTicket,
}

impl<H: ZoomHost> ZoomController<H> {
    /// Create a detached controller
    pub fn new(host: H, config: ZoomConfig) -> Self {
        Self {
            host,
            config,
            hooks: ZoomHooks::default(),
            active: None,
            notice: Notice::new(),
            pointer: PointerTracker::new(),
            next_ticket: LoadTicket(0),
        }
    }

    /// Builder-style hooks
    pub fn with_hooks(mut self, hooks: ZoomHooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// Replace the hooks
    pub fn set_hooks(&mut self, hooks: ZoomHooks) {
        self.hooks = hooks;
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Host environment
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host environment
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Configuration
    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    /// Notice state
    pub fn notice(&self) -> &Notice {
        &self.notice
    }

    /// Whether listeners are installed
    pub fn is_attached(&self) -> bool {
        self.active.is_some()
    }

    /// Whether the flyout is displayed; `None` while detached
    pub fn is_open(&self) -> Option<bool> {
        self.active.as_ref().map(|a| a.view.is_some())
    }

    /// Whether the zoom image is loaded; `None` while detached
    pub fn is_ready(&self) -> Option<bool> {
        self.active
            .as_ref()
            .map(|a| a.asset.as_ref().is_some_and(ZoomAsset::is_ready))
    }

    /// Whether the pointer is over the target
    pub fn is_mouse_over(&self) -> bool {
        self.active.as_ref().is_some_and(|a| a.mouse_over)
    }

    /// Load status of the current zoom image
    pub fn load_status(&self) -> LoadStatus {
        self.asset().map_or(LoadStatus::Unloaded, |a| a.status)
    }

    /// Current zoom image, if one has been requested
    pub fn asset(&self) -> Option<&ZoomAsset> {
        self.active.as_ref().and_then(|a| a.asset.as_ref())
    }

    /// Geometry of the open flyout
    pub fn geometry(&self) -> Option<&GeometrySnapshot> {
        self.active.as_ref().and_then(|a| a.view.as_ref())
    }

    /// Whether an open request is waiting for the zoom image
    pub fn has_pending_open(&self) -> bool {
        self.active.as_ref().is_some_and(|a| a.pending_open.is_some())
    }

    /// Serializable state for the page
    pub fn snapshot(&self) -> ZoomSnapshot {
        ZoomSnapshot {
            attached: self.is_attached(),
            is_open: self.is_open(),
            is_ready: self.is_ready(),
            is_mouse_over: self.is_mouse_over(),
            status: self.load_status(),
            zoom_href: self.host.zoom_href(),
            geometry: self.geometry().copied(),
            notice: self
                .notice
                .is_attached()
                .then(|| self.notice.text().to_string()),
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Install listeners on the target
    ///
    /// Returns false when already attached. Attaching again after
    /// [`teardown`](Self::teardown) starts from a clean state.
    pub fn attach(&mut self) -> bool {
        if self.active.is_some() {
            trace!("attach: already attached");
            return false;
        }

        self.host.bind(self.config.prevent_clicks);
        self.active = Some(Active::default());
        debug!(prevent_clicks = self.config.prevent_clicks, "zoom attached");
        true
    }

    /// Open the flyout, loading the zoom image first if needed
    ///
    /// When `origin` is given the zoom image is positioned for it right away.
    pub fn show(&mut self, origin: Option<PointerEvent>) -> ZoomResult<()> {
        if self.active.is_none() {
            return Err(ZoomError::NotAttached { op: "show" });
        }
        self.open(origin, false);
        Ok(())
    }

    /// Close the flyout; no-op if already closed or detached
    pub fn hide(&mut self) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        if active.view.take().is_none() {
            return;
        }

        self.host.detach_flyout();
        debug!("flyout closed");

        if let Some(on_hide) = self.hooks.on_hide.as_mut() {
            on_hide();
        }
    }

    /// Bind new images to the target
    ///
    /// Closes the flyout, forgets the loaded zoom image, cancels the error
    /// notice timer and clears the state classes. The next open loads
    /// `zoom_href` from scratch.
    pub fn swap(
        &mut self,
        thumbnail_src: &str,
        zoom_href: &str,
        srcset: Option<SrcSet>,
    ) -> ZoomResult<()> {
        if self.active.is_none() {
            return Err(ZoomError::NotAttached { op: "swap" });
        }

        self.hide();

        if let Some(active) = self.active.as_mut() {
            active.asset = None;
            active.pending_open = None;
        }
        self.notice.hide(&mut self.host);
        self.clear_classes();

        let srcset = srcset.as_ref().map(SrcSet::to_attribute);
        self.host.set_thumbnail(thumbnail_src, srcset.as_deref());
        self.host.set_zoom_href(zoom_href);

        debug!(thumbnail_src, zoom_href, "images swapped");
        Ok(())
    }

    /// Remove listeners and forget all per-attachment state
    pub fn teardown(&mut self) {
        if self.active.is_none() {
            return;
        }

        self.hide();
        self.notice.hide(&mut self.host);
        self.clear_classes();
        self.host.unbind();

        self.active = None;
        self.pointer.reset();
        debug!("zoom torn down");
    }

    // =========================================================================
    // Input handling
    // =========================================================================

    /// Pointer entered the target (mouse enter or touch start)
    pub fn handle_enter(&mut self, event: &PointerEvent) -> InputResult {
        let Some(active) = self.active.as_mut() else {
            return InputResult::Unhandled;
        };
        active.mouse_over = true;

        if !event.is_single() {
            trace!(touches = event.touch_count(), "multi-touch start ignored");
            return InputResult::Unhandled;
        }

        self.open(Some(event.clone()), true);
        InputResult::Handled
    }

    /// Pointer moved over the target
    pub fn handle_move(&mut self, event: &PointerEvent) -> InputResult {
        if self.is_open() != Some(true) {
            return InputResult::Unhandled;
        }
        self.pan(event);
        InputResult::Handled
    }

    /// Pointer left the target (mouse leave or touch end)
    ///
    /// Never suppresses the native action.
    pub fn handle_leave(&mut self) -> InputResult {
        if let Some(active) = self.active.as_mut() {
            active.mouse_over = false;
        }
        self.hide();
        InputResult::Unhandled
    }

    /// Click inside the target; `on_link` is true when it hit the zoom link
    pub fn handle_click(&self, on_link: bool) -> InputResult {
        if self.active.is_some() && self.config.prevent_clicks && on_link {
            InputResult::Handled
        } else {
            InputResult::Unhandled
        }
    }

    /// A host timer expired
    ///
    /// Returns true if the timer belonged to this controller.
    pub fn handle_timer(&mut self, timer: TimerId) -> bool {
        let expired = self.notice.expire(&mut self.host, timer);
        if expired {
            trace!(?timer, "notice auto-hidden");
        }
        expired
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Open now if the zoom image is ready, otherwise queue and load
    fn open(&mut self, origin: Option<PointerEvent>, test_mouse_over: bool) {
        let Some(active) = self.active.as_mut() else {
            return;
        };

        let zoom = match active.asset.as_ref() {
            Some(asset) if asset.is_ready() => asset.natural,
            _ => {
                let request = PendingOpen {
                    origin,
                    test_mouse_over,
                };
                active.pending_open = Some(match active.pending_open.take() {
                    Some(pending) => pending.merge(request),
                    None => request,
                });
                self.load();
                return;
            }
        };

        let was_open = active.view.is_some();
        if !was_open {
            self.host.attach_flyout();
        }

        let geometry =
            GeometrySnapshot::compute(self.host.target_size(), self.host.flyout_size(), zoom);
        active.view = Some(geometry);
        debug!(
            range_x = geometry.range.x,
            range_y = geometry.range.y,
            ratio_x = geometry.ratio.x,
            ratio_y = geometry.ratio.y,
            "flyout opened"
        );

        if !was_open {
            if let Some(on_show) = self.hooks.on_show.as_mut() {
                on_show();
            }
        }

        if let Some(event) = origin {
            self.pan(&event);
        }
    }

    /// Reposition the zoom image for a pointer event, or close if out of range
    fn pan(&mut self, event: &PointerEvent) {
        let page = self.pointer.resolve(event);
        let Some(view) = self.geometry().copied() else {
            return;
        };

        match view.map(page, self.host.target_offset()) {
            Placement::Inside { offset } => self.host.position_zoom_image(offset),
            Placement::Outside => {
                trace!(x = page.x, y = page.y, "pointer left pannable range");
                self.hide();
            }
        }
    }

    fn clear_classes(&mut self) {
        for class in StateClass::ALL {
            self.host.remove_class(class);
        }
    }
}
