//! `ZoomHost` over real DOM elements
//!
//! The host owns every `Closure` handed to the browser. Listener closures
//! hold a `Weak` reference back to their lens, so dropping the lens frees
//! the closures and nothing keeps it alive from the JS side.
//!
//! Image loads and timers are identified by our own tokens (`LoadTicket`,
//! `TimerId`). The browser objects behind them are looked up here when the
//! corresponding event fires.

use std::rc::Weak;

use js_sys::Function;
use tracing::{trace, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, HtmlImageElement, Node, Window};

use super::lens::Lens;
use crate::asset::{LoadOutcome, LoadTicket};
use crate::error::{ZoomError, ZoomResult};
use crate::host::{StateClass, TimerId, ZoomHost, FLYOUT_CLASS, NOTICE_CLASS};
use crate::math::{Size, Vec2};

const ENTER_EVENTS: [&str; 2] = ["mouseenter", "touchstart"];
const MOVE_EVENTS: [&str; 2] = ["mousemove", "touchmove"];
const LEAVE_EVENTS: [&str; 2] = ["mouseleave", "touchend"];
const SETTLE_EVENTS: [&str; 2] = ["load", "error"];

type Listener = Closure<dyn FnMut(Event)>;

/// Elements a lens works with, resolved before the lens is built
pub(crate) struct Parts {
    window: Window,
    target: HtmlElement,
    link: Option<web_sys::Element>,
    thumbnail: Option<HtmlImageElement>,
    flyout: HtmlElement,
    notice: HtmlElement,
}

impl Parts {
    /// Find the link and thumbnail inside `target` and create the managed elements
    pub(crate) fn query(target: &HtmlElement) -> ZoomResult<Self> {
        let window = web_sys::window().ok_or_else(|| host_error("no window"))?;
        let document = window.document().ok_or_else(|| host_error("no document"))?;

        let link = target.query_selector("a").map_err(js_error)?;
        if link.is_none() {
            warn!("zoom target has no link; zoom image href will be missing");
        }
        let thumbnail = target
            .query_selector("img")
            .map_err(js_error)?
            .and_then(|img| img.dyn_into::<HtmlImageElement>().ok());

        let create = |class: &str| -> ZoomResult<HtmlElement> {
            let element = document
                .create_element("div")
                .map_err(js_error)?
                .dyn_into::<HtmlElement>()
                .map_err(|_| host_error("created div is not an HtmlElement"))?;
            element.set_class_name(class);
            Ok(element)
        };

        Ok(Self {
            flyout: create(FLYOUT_CLASS)?,
            notice: create(NOTICE_CLASS)?,
            window,
            target: target.clone(),
            link,
            thumbnail,
        })
    }
}

/// Browser closures owned by one lens
struct Listeners {
    enter: Listener,
    motion: Listener,
    leave: Listener,
    click: Listener,
    settle: Listener,
    tick: Closure<dyn FnMut(JsValue)>,
}

impl Listeners {
    fn new(lens: &Weak<Lens>) -> Self {
        let timer_lens = lens.clone();
        Self {
            enter: listener(lens, Lens::on_enter),
            motion: listener(lens, Lens::on_move),
            leave: listener(lens, Lens::on_leave),
            click: listener(lens, Lens::on_click),
            settle: listener(lens, Lens::on_settle),
            tick: Closure::wrap(Box::new(move |token: JsValue| {
                if let Some(lens) = timer_lens.upgrade() {
                    lens.on_timer(&token);
                }
            }) as Box<dyn FnMut(JsValue)>),
        }
    }
}

fn listener(lens: &Weak<Lens>, handler: fn(&Lens, &Event)) -> Listener {
    let lens = lens.clone();
    Closure::wrap(Box::new(move |event: Event| {
        if let Some(lens) = lens.upgrade() {
            handler(&lens, &event);
        }
    }) as Box<dyn FnMut(Event)>)
}

/// DOM-backed host for one zoom target
pub struct WebHost {
    window: Window,
    target: HtmlElement,
    link: Option<web_sys::Element>,
    thumbnail: Option<HtmlImageElement>,
    flyout: HtmlElement,
    notice: HtmlElement,

    /// Image shown inside the flyout
    zoom_image: Option<HtmlImageElement>,
    /// Loads started but not yet settled
    in_flight: Vec<(LoadTicket, HtmlImageElement)>,
    /// Most recently settled load, waiting to be mounted
    settled: Option<(LoadTicket, HtmlImageElement)>,

    /// Our timer ids mapped to browser handles
    timers: Vec<(TimerId, i32)>,
    next_timer: u32,

    listeners: Listeners,
}

impl WebHost {
    pub(crate) fn new(parts: Parts, lens: &Weak<Lens>) -> Self {
        Self {
            window: parts.window,
            target: parts.target,
            link: parts.link,
            thumbnail: parts.thumbnail,
            flyout: parts.flyout,
            notice: parts.notice,
            zoom_image: None,
            in_flight: Vec::new(),
            settled: None,
            timers: Vec::new(),
            next_timer: 1,
            listeners: Listeners::new(lens),
        }
    }

    /// Resolve a `load`/`error` event to the load it finishes
    ///
    /// Returns `None` for images this host no longer tracks.
    pub(crate) fn settle(&mut self, event: &Event) -> Option<(LoadTicket, LoadOutcome)> {
        let node = event.target()?.dyn_into::<Node>().ok()?;
        let index = self
            .in_flight
            .iter()
            .position(|(_, image)| image.is_same_node(Some(&node)))?;
        let (ticket, image) = self.in_flight.swap_remove(index);
        self.unlisten(&image, &SETTLE_EVENTS, &self.listeners.settle);

        let outcome = if event.type_() == "load" {
            LoadOutcome::Loaded {
                width: f64::from(image.natural_width()),
                height: f64::from(image.natural_height()),
            }
        } else {
            LoadOutcome::Failed
        };
        trace!(ticket = ticket.0, ?outcome, "image settled");

        self.settled = Some((ticket, image));
        Some((ticket, outcome))
    }

    /// Forget a timer the browser has just run
    pub(crate) fn timer_fired(&mut self, timer: TimerId) {
        self.timers.retain(|(id, _)| *id != timer);
    }

    fn listen(&self, node: &web_sys::EventTarget, kinds: &[&str], listener: &Listener) {
        for kind in kinds {
            if let Err(err) =
                node.add_event_listener_with_callback(kind, listener.as_ref().unchecked_ref())
            {
                warn!(kind, ?err, "failed to add listener");
            }
        }
    }

    fn unlisten(&self, node: &web_sys::EventTarget, kinds: &[&str], listener: &Listener) {
        for kind in kinds {
            if let Err(err) =
                node.remove_event_listener_with_callback(kind, listener.as_ref().unchecked_ref())
            {
                warn!(kind, ?err, "failed to remove listener");
            }
        }
    }

    fn set_style(element: &HtmlElement, property: &str, value: &str) {
        if let Err(err) = element.style().set_property(property, value) {
            warn!(property, ?err, "failed to set style");
        }
    }
}

impl ZoomHost for WebHost {
    fn bind(&mut self, prevent_clicks: bool) {
        let listeners = &self.listeners;
        self.listen(&self.target, &ENTER_EVENTS, &listeners.enter);
        self.listen(&self.target, &MOVE_EVENTS, &listeners.motion);
        self.listen(&self.target, &LEAVE_EVENTS, &listeners.leave);
        if prevent_clicks {
            self.listen(&self.target, &["click"], &listeners.click);
        }
    }

    fn unbind(&mut self) {
        let listeners = &self.listeners;
        self.unlisten(&self.target, &ENTER_EVENTS, &listeners.enter);
        self.unlisten(&self.target, &MOVE_EVENTS, &listeners.motion);
        self.unlisten(&self.target, &LEAVE_EVENTS, &listeners.leave);
        self.unlisten(&self.target, &["click"], &listeners.click);

        for (_, image) in std::mem::take(&mut self.in_flight) {
            self.unlisten(&image, &SETTLE_EVENTS, &self.listeners.settle);
        }
        self.settled = None;
        if let Some(image) = self.zoom_image.take() {
            image.remove();
        }

        for (_, handle) in self.timers.drain(..) {
            self.window.clear_timeout_with_handle(handle);
        }

        self.flyout.remove();
        self.notice.remove();
    }

    fn target_offset(&self) -> Vec2 {
        let rect = self.target.get_bounding_client_rect();
        let scroll = Vec2::new(
            self.window.scroll_x().unwrap_or(0.0),
            self.window.scroll_y().unwrap_or(0.0),
        );
        Vec2::new(rect.left(), rect.top()) + scroll
    }

    fn target_size(&self) -> Size {
        Size::new(
            f64::from(self.target.client_width()),
            f64::from(self.target.client_height()),
        )
    }

    fn flyout_size(&self) -> Size {
        Size::new(
            f64::from(self.flyout.client_width()),
            f64::from(self.flyout.client_height()),
        )
    }

    fn attach_flyout(&mut self) {
        if let Err(err) = self.target.append_child(&self.flyout) {
            warn!(?err, "failed to insert flyout");
        }
    }

    fn detach_flyout(&mut self) {
        self.flyout.remove();
    }

    fn attach_notice(&mut self) {
        if let Err(err) = self.target.append_child(&self.notice) {
            warn!(?err, "failed to insert notice");
        }
    }

    fn detach_notice(&mut self) {
        self.notice.remove();
    }

    fn set_notice_text(&mut self, text: &str) {
        self.notice.set_text_content(Some(text));
    }

    fn add_class(&mut self, class: StateClass) {
        if let Err(err) = self.target.class_list().add_1(class.class_name()) {
            warn!(class = class.class_name(), ?err, "failed to add class");
        }
    }

    fn remove_class(&mut self, class: StateClass) {
        if let Err(err) = self.target.class_list().remove_1(class.class_name()) {
            warn!(class = class.class_name(), ?err, "failed to remove class");
        }
    }

    fn zoom_href(&self) -> Option<String> {
        self.link
            .as_ref()
            .and_then(|link| link.get_attribute("href"))
            .filter(|href| !href.is_empty())
    }

    fn set_zoom_href(&mut self, href: &str) {
        let Some(link) = self.link.as_ref() else {
            warn!(href, "zoom target has no link to update");
            return;
        };
        if let Err(err) = link.set_attribute("href", href) {
            warn!(?err, "failed to set zoom href");
        }
    }

    fn set_thumbnail(&mut self, src: &str, srcset: Option<&str>) {
        let Some(thumbnail) = self.thumbnail.as_ref() else {
            warn!(src, "zoom target has no thumbnail to update");
            return;
        };
        thumbnail.set_src(src);
        let result = match srcset {
            Some(srcset) => thumbnail.set_attribute("srcset", srcset),
            None => thumbnail.remove_attribute("srcset"),
        };
        if let Err(err) = result {
            warn!(?err, "failed to update srcset");
        }
    }

    fn load_image(&mut self, ticket: LoadTicket, href: &str) {
        let image = match HtmlImageElement::new() {
            Ok(image) => image,
            Err(err) => {
                warn!(ticket = ticket.0, ?err, "failed to create zoom image");
                return;
            }
        };
        self.listen(&image, &SETTLE_EVENTS, &self.listeners.settle);
        image.set_src(href);
        self.in_flight.push((ticket, image));
    }

    fn mount_zoom_image(&mut self, ticket: LoadTicket) {
        let Some((settled, image)) = self.settled.take() else {
            return;
        };
        if settled != ticket {
            trace!(ticket = ticket.0, "mount skipped; image not settled");
            return;
        }

        if let Some(previous) = self.zoom_image.take() {
            previous.remove();
        }
        Self::set_style(&image, "position", "absolute");
        if let Err(err) = self.flyout.append_child(&image) {
            warn!(?err, "failed to insert zoom image");
        }
        self.zoom_image = Some(image);
    }

    fn position_zoom_image(&mut self, offset: Vec2) {
        if let Some(image) = self.zoom_image.as_ref() {
            Self::set_style(image, "left", &format!("{}px", offset.x));
            Self::set_style(image, "top", &format!("{}px", offset.y));
        }
    }

    fn schedule(&mut self, delay_ms: u32) -> TimerId {
        let timer = TimerId(self.next_timer);
        self.next_timer = self.next_timer.wrapping_add(1);

        let callback: &Function = self.listeners.tick.as_ref().unchecked_ref();
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_1(
                callback,
                delay,
                &JsValue::from(timer.0),
            ) {
            Ok(handle) => self.timers.push((timer, handle)),
            Err(err) => warn!(?err, "failed to schedule timer"),
        }
        timer
    }

    fn cancel(&mut self, timer: TimerId) {
        if let Some(index) = self.timers.iter().position(|(id, _)| *id == timer) {
            let (_, handle) = self.timers.swap_remove(index);
            self.window.clear_timeout_with_handle(handle);
        }
    }
}

fn host_error(message: &str) -> ZoomError {
    ZoomError::Host(message.to_string())
}

fn js_error(err: JsValue) -> ZoomError {
    ZoomError::Host(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}
