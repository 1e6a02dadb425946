//! Zoom image load state

use serde::{Deserialize, Serialize};

use crate::math::Size;

/// Identifies one load request
///
/// Tickets increase monotonically per controller, so a completion for a
/// superseded request can always be told apart from the current one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LoadTicket(pub u64);

impl LoadTicket {
    /// Ticket that follows this one
    pub fn next(self) -> LoadTicket {
        LoadTicket(self.0 + 1)
    }
}

/// Load status of the zoom image
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    /// No load has been requested yet
    #[default]
    Unloaded,
    /// A load is in flight
    Loading,
    /// The image loaded with usable dimensions
    Ready,
    /// The image failed to load
    Error,
}

/// Result reported by the host when a load finishes
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LoadOutcome {
    /// The image loaded with the given natural size
    Loaded { width: f64, height: f64 },
    /// The image could not be loaded
    Failed,
}

impl LoadOutcome {
    /// Natural size when the outcome is a usable image
    ///
    /// Some browsers report success for broken images; a zero-sized image
    /// counts as a failure.
    pub fn usable_size(self) -> Option<Size> {
        match self {
            LoadOutcome::Loaded { width, height } => {
                let size = Size::new(width, height);
                (!size.is_empty()).then_some(size)
            }
            LoadOutcome::Failed => None,
        }
    }
}

/// The large image shown inside the flyout
#[derive(Clone, Debug, PartialEq)]
pub struct ZoomAsset {
    /// Source URL
    pub href: String,
    /// Ticket of the load that owns this asset
    pub ticket: LoadTicket,
    /// Natural size, zero until loaded
    pub natural: Size,
    /// Load status
    pub status: LoadStatus,
}

impl ZoomAsset {
    /// New asset for a load that is about to start
    pub fn loading(href: impl Into<String>, ticket: LoadTicket) -> Self {
        Self {
            href: href.into(),
            ticket,
            natural: Size::ZERO,
            status: LoadStatus::Loading,
        }
    }

    /// Whether the asset can be displayed
    pub fn is_ready(&self) -> bool {
        self.status == LoadStatus::Ready
    }

    /// Whether a load for this asset is still in flight
    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usable_size() {
        let ok = LoadOutcome::Loaded {
            width: 400.0,
            height: 300.0,
        };
        assert_eq!(ok.usable_size(), Some(Size::new(400.0, 300.0)));

        let broken = LoadOutcome::Loaded {
            width: 0.0,
            height: 0.0,
        };
        assert_eq!(broken.usable_size(), None);
        assert_eq!(LoadOutcome::Failed.usable_size(), None);
    }

    #[test]
    fn test_ticket_sequence() {
        let first = LoadTicket(0);
        assert_eq!(first.next(), LoadTicket(1));
        assert!(first.next() > first);
    }

    #[test]
    fn test_asset_starts_loading() {
        let asset = ZoomAsset::loading("zoom.jpg", LoadTicket(3));
        assert!(asset.is_loading());
        assert!(!asset.is_ready());
        assert_eq!(asset.natural, Size::ZERO);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&LoadStatus::Ready).unwrap();
        assert_eq!(json, "\"ready\"");
    }
}
