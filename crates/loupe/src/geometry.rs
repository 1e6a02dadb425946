//! Pointer-to-zoom coordinate mapping
//!
//! The flyout is a fixed-size window over the larger zoom image. Moving the
//! pointer across the thumbnail pans the zoom image linearly: the thumbnail's
//! top-left corner shows the zoom image's top-left corner, and its bottom-right
//! corner shows the zoom image's bottom-right corner.
//!
//! ```text
//!   thumbnail (target)            zoom image
//!   ┌──────────┐                  ┌──────────────────────┐
//!   │   •      │   local * ratio  │        ┌───────┐     │
//!   │          │ ───────────────► │        │flyout │     │
//!   └──────────┘                  │        └───────┘     │
//!                                 └──────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::math::{Size, Vec2};

/// Geometry captured when the flyout opens
///
/// Layout may change between two opens, so a snapshot is only meaningful
/// while the flyout it was computed for stays open.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeometrySnapshot {
    /// Size of the target element (thumbnail container)
    pub target: Size,
    /// Size of the flyout viewport
    pub flyout: Size,
    /// Natural size of the zoom image
    pub zoom: Size,
    /// Pannable range: zoom size minus flyout size (`dw`, `dh`)
    pub range: Vec2,
    /// Translation per target pixel (`rw`, `rh`)
    pub ratio: Vec2,
}

/// Where a pointer position lands relative to the pannable range
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Placement {
    /// Inside the range; the zoom image should be offset by `offset`
    Inside { offset: Vec2 },
    /// Outside the range; the flyout should close
    Outside,
}

impl GeometrySnapshot {
    /// Compute range and ratios from the three sizes
    pub fn compute(target: Size, flyout: Size, zoom: Size) -> Self {
        let range = zoom.as_vec2() - flyout.as_vec2();
        let ratio = Vec2::new(
            axis_ratio(range.x, target.width),
            axis_ratio(range.y, target.height),
        );

        Self {
            target,
            flyout,
            zoom,
            range,
            ratio,
        }
    }

    /// Translation of the zoom image for a target-local pointer position
    ///
    /// Rounds up so the zoom image never leaves a sub-pixel gap at the
    /// viewport edge. Returns `None` when the translation falls outside
    /// `[0, dw] × [0, dh]`.
    pub fn translation(&self, local: Vec2) -> Option<Vec2> {
        let t = local.scale(self.ratio).ceil();

        if t.x < 0.0 || t.y < 0.0 || t.x > self.range.x || t.y > self.range.y {
            None
        } else {
            Some(t)
        }
    }

    /// Map a page position to a placement, given the target's page offset
    pub fn map(&self, page: Vec2, target_offset: Vec2) -> Placement {
        match self.translation(page - target_offset) {
            Some(t) => Placement::Inside { offset: -t },
            None => Placement::Outside,
        }
    }
}

fn axis_ratio(range: f64, extent: f64) -> f64 {
    if extent > 0.0 {
        range / extent
    } else {
        0.0
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn snapshot() -> impl Strategy<Value = GeometrySnapshot> {
        (
            1.0f64..2000.0,
            1.0f64..2000.0,
            1.0f64..1000.0,
            1.0f64..1000.0,
            0.0f64..4000.0,
            0.0f64..4000.0,
        )
            .prop_map(|(tw, th, fw, fh, extra_w, extra_h)| {
                GeometrySnapshot::compute(
                    Size::new(tw, th),
                    Size::new(fw, fh),
                    Size::new(fw + extra_w, fh + extra_h),
                )
            })
    }

    proptest! {
        /// Every accepted translation is ceil(local * ratio) and lies in range
        #[test]
        fn translation_matches_formula(g in snapshot(), fx in -0.5f64..1.5, fy in -0.5f64..1.5) {
            let local = Vec2::new(fx * g.target.width, fy * g.target.height);
            let expected = Vec2::new((local.x * g.ratio.x).ceil(), (local.y * g.ratio.y).ceil());
            let inside = expected.x >= 0.0
                && expected.y >= 0.0
                && expected.x <= g.range.x
                && expected.y <= g.range.y;

            match g.translation(local) {
                Some(t) => {
                    prop_assert!(inside);
                    prop_assert_eq!(t, expected);
                }
                None => prop_assert!(!inside),
            }
        }

        /// Placement offsets are the negated translation of the target-local position
        #[test]
        fn placement_offset_is_negated(
            g in snapshot(),
            lx in 0u32..2000,
            ly in 0u32..2000,
            ox in -500i32..500,
            oy in -500i32..500,
        ) {
            let origin = Vec2::new(f64::from(ox), f64::from(oy));
            let local = Vec2::new(f64::from(lx), f64::from(ly));

            match (g.translation(local), g.map(origin + local, origin)) {
                (Some(t), Placement::Inside { offset }) => prop_assert_eq!(offset, -t),
                (None, Placement::Outside) => {}
                (t, placement) => prop_assert!(false, "translation {:?} vs placement {:?}", t, placement),
            }
        }
    }
}
