//! Hover zoom lens for thumbnail images
//!
//! A target element pairs a thumbnail with a link to a larger zoom image.
//! While the pointer is over the thumbnail, a fixed-size flyout shows the
//! matching part of the zoom image, panning linearly with the pointer.
//!
//! This crate provides:
//! - Lazy, single-flight zoom image loading with a loading / error notice
//! - Pointer-to-offset mapping with per-open geometry snapshots
//! - Flyout show / hide / swap / teardown lifecycle with page hooks
//! - An element → controller registry for idempotent initialisation
//!
//! ## Architecture
//!
//! ```text
//!   browser events ──► wasm::WebHost ──► ZoomController ──► ZoomHost calls
//!                         ▲                 │  │  │
//!   load / timer done ────┘                 │  │  └── notice::Notice
//!                                           │  └───── geometry::GeometrySnapshot
//!                                           └──────── asset::ZoomAsset
//! ```
//!
//! - [`math`]: `Vec2` and `Size`
//! - [`geometry`]: pannable range, ratios and pointer mapping
//! - [`input`]: pointer events and the per-controller pointer tracker
//! - [`host`]: the [`ZoomHost`] environment contract
//! - [`controller`]: the zoom state machine
//! - [`registry`]: element identity → controller
//! - [`memory`]: in-memory host for tests and headless use
//!
//! ## Example
//!
//! ```rust
//! use loupe::{LoadOutcome, MemoryHost, PointerEvent, Size, Vec2, ZoomConfig, ZoomController};
//!
//! let host = MemoryHost::new()
//!     .with_target(Vec2::ZERO, Size::new(100.0, 100.0))
//!     .with_flyout(Size::new(50.0, 50.0))
//!     .with_zoom_href("zoom.jpg");
//! let mut zoom = ZoomController::new(host, ZoomConfig::default());
//! zoom.attach();
//!
//! zoom.handle_enter(&PointerEvent::mouse(20.0, 20.0));
//! let ticket = zoom.host().last_ticket().unwrap();
//! zoom.handle_load(ticket, LoadOutcome::Loaded { width: 400.0, height: 300.0 });
//!
//! assert_eq!(zoom.is_open(), Some(true));
//! assert_eq!(zoom.host().zoom_offset(), Some(Vec2::new(-70.0, -50.0)));
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Rust Core**: all state lives in the controller, testable without a browser
//! 2. **Injected Environment**: DOM access, image loading and timers go through [`ZoomHost`]
//! 3. **No Shared State**: pointer position and geometry belong to one controller

pub mod asset;
pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod host;
pub mod input;
pub mod math;
pub mod memory;
pub mod notice;
pub mod registry;

// WASM exports (only available with "wasm" feature)
#[cfg(feature = "wasm")]
mod wasm;
#[cfg(feature = "wasm")]
pub use wasm::*;

// Re-export core types for convenience
pub use asset::{LoadOutcome, LoadStatus, LoadTicket, ZoomAsset};
pub use config::ZoomConfig;
pub use controller::{ZoomController, ZoomHooks, ZoomSnapshot};
pub use error::{ZoomError, ZoomResult};
pub use geometry::{GeometrySnapshot, Placement};
pub use host::{SrcSet, StateClass, TimerId, ZoomHost, FLYOUT_CLASS, NOTICE_CLASS};
pub use input::{InputResult, PointerEvent, PointerTracker};
pub use math::{Size, Vec2};
pub use memory::MemoryHost;
pub use notice::Notice;
pub use registry::{Attach, Attachment, Registry};
