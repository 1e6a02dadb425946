//! DOM event → [`PointerEvent`] conversion

use wasm_bindgen::JsCast;
use web_sys::{Event, MouseEvent, TouchEvent};

use crate::input::PointerEvent;
use crate::math::Vec2;

/// Page-coordinate pointer sample for a mouse or touch event
///
/// Any other event (a synthetic one passed to `show`, say) yields a mouse
/// sample without coordinates, which resolves to the last known position.
pub(crate) fn pointer(event: &Event) -> PointerEvent {
    // Checked by type name: `instanceof TouchEvent` throws where touch
    // events are not supported at all.
    if event.type_().starts_with("touch") {
        let touches = event.unchecked_ref::<TouchEvent>().touches();
        return PointerEvent::Touch {
            touches: (0..touches.length())
                .filter_map(|index| touches.get(index))
                .map(|touch| Vec2::new(f64::from(touch.page_x()), f64::from(touch.page_y())))
                .collect(),
        };
    }

    match event.dyn_ref::<MouseEvent>() {
        Some(mouse) => PointerEvent::mouse(f64::from(mouse.page_x()), f64::from(mouse.page_y())),
        None => PointerEvent::Mouse { x: None, y: None },
    }
}
