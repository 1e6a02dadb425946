//! Loading / error notice presenter
//!
//! One notice element exists per controller. The presenter tracks whether it
//! is currently inserted and which auto-hide timer (if any) owns it, so a
//! stale timer from an earlier load can never hide a newer notice.

use tracing::trace;

use crate::host::{TimerId, ZoomHost};

/// Status overlay state
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Notice {
    text: String,
    attached: bool,
    timer: Option<TimerId>,
}

impl Notice {
    /// Detached, empty notice
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the notice is inserted into the target
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Pending auto-hide timer
    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }

    /// Show the loading text, cancelling any pending auto-hide
    pub fn loading<H: ZoomHost>(&mut self, host: &mut H, text: &str) {
        self.cancel_timer(host);
        self.show(host, text);
    }

    /// Show the error text and hide it again after `duration_ms`
    pub fn fail<H: ZoomHost>(&mut self, host: &mut H, text: &str, duration_ms: u32) {
        self.cancel_timer(host);
        self.show(host, text);
        let timer = host.schedule(duration_ms);
        trace!(?timer, duration_ms, "notice auto-hide scheduled");
        self.timer = Some(timer);
    }

    /// Cancel any pending timer and remove the notice
    pub fn hide<H: ZoomHost>(&mut self, host: &mut H) {
        self.cancel_timer(host);
        self.detach(host);
    }

    /// Handle an expired timer; returns true if it belonged to this notice
    pub fn expire<H: ZoomHost>(&mut self, host: &mut H, timer: TimerId) -> bool {
        if self.timer != Some(timer) {
            return false;
        }
        self.timer = None;
        self.detach(host);
        true
    }

    fn show<H: ZoomHost>(&mut self, host: &mut H, text: &str) {
        self.text = text.to_string();
        host.set_notice_text(text);
        if !self.attached {
            host.attach_notice();
            self.attached = true;
        }
    }

    fn detach<H: ZoomHost>(&mut self, host: &mut H) {
        if self.attached {
            host.detach_notice();
            self.attached = false;
        }
    }

    fn cancel_timer<H: ZoomHost>(&mut self, host: &mut H) {
        if let Some(timer) = self.timer.take() {
            host.cancel(timer);
        }
    }
}
