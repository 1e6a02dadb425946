//! Zoom image loading
//!
//! Single-flight per zoom image: while a load is in flight, further open
//! requests only update the pending request. Each load carries a
//! [`LoadTicket`]; completions for any other ticket are stale and dropped,
//! which is what lets `swap` supersede a load without aborting it.

use tracing::{debug, trace, warn};

use super::ZoomController;
use crate::asset::{LoadOutcome, LoadStatus, LoadTicket, ZoomAsset};
use crate::host::{StateClass, ZoomHost};

impl<H: ZoomHost> ZoomController<H> {
    /// Start loading the target's zoom image unless that load is in flight
    pub(super) fn load(&mut self) {
        let Some(active) = self.active.as_mut() else {
            return;
        };

        let Some(href) = self.host.zoom_href() else {
            warn!("target has no zoom link; nothing to load");
            active.pending_open = None;
            active.asset = None;
            self.present_failure();
            return;
        };

        if let Some(asset) = active.asset.as_ref() {
            if asset.href == href && asset.is_loading() {
                trace!(%href, ticket = asset.ticket.0, "load already in flight");
                return;
            }
        }

        let ticket = self.next_ticket;
        self.next_ticket = ticket.next();
        active.asset = Some(ZoomAsset::loading(href.clone(), ticket));

        self.host.remove_class(StateClass::Error);
        self.host.remove_class(StateClass::Ready);
        self.host.add_class(StateClass::Loading);
        self.notice.loading(&mut self.host, &self.config.loading_notice);

        debug!(%href, ticket = ticket.0, "loading zoom image");
        self.host.load_image(ticket, &href);
    }

    /// The host finished a load started with `ticket`
    pub fn handle_load(&mut self, ticket: LoadTicket, outcome: LoadOutcome) {
        let Some(active) = self.active.as_mut() else {
            trace!(ticket = ticket.0, "load finished after teardown");
            return;
        };
        let Some(asset) = active
            .asset
            .as_mut()
            .filter(|a| a.ticket == ticket && a.is_loading())
        else {
            trace!(ticket = ticket.0, "stale load completion ignored");
            return;
        };

        let Some(natural) = outcome.usable_size() else {
            warn!(href = %asset.href, ticket = ticket.0, "zoom image failed to load");
            asset.status = LoadStatus::Error;
            active.pending_open = None;
            self.present_failure();
            return;
        };

        asset.natural = natural;
        asset.status = LoadStatus::Ready;
        let pending = active.pending_open.take();
        let mouse_over = active.mouse_over;

        self.notice.hide(&mut self.host);
        self.host.mount_zoom_image(ticket);
        self.host.remove_class(StateClass::Loading);
        self.host.add_class(StateClass::Ready);
        debug!(
            ticket = ticket.0,
            width = natural.width,
            height = natural.height,
            "zoom image ready"
        );

        if let Some(request) = pending {
            if mouse_over || !request.test_mouse_over {
                self.open(request.origin, false);
            } else {
                trace!("pointer left before load finished; not opening");
            }
        }
    }

    fn present_failure(&mut self) {
        self.notice.fail(
            &mut self.host,
            &self.config.error_notice,
            self.config.error_duration,
        );
        self.host.remove_class(StateClass::Loading);
        self.host.add_class(StateClass::Error);
    }
}
