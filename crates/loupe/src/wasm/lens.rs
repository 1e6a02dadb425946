//! One zoom lens bound to one DOM element
//!
//! Browser callbacks and page calls both go through [`Lens::dispatch`],
//! which borrows the controller for the duration of one operation. The
//! page's `onShow` / `onHide` functions are queued while the controller is
//! borrowed and run right after, so they may call back into the lens.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Function;
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement};

use super::events;
use super::host::{Parts, WebHost};
use super::options;
use crate::controller::{ZoomController, ZoomHooks};
use crate::error::ZoomResult;
use crate::host::TimerId;
use crate::input::InputResult;
use crate::registry::Attach;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Hook {
    Show,
    Hide,
}

type HookQueue = Rc<RefCell<Vec<Hook>>>;

pub(crate) struct Lens {
    target: HtmlElement,
    controller: RefCell<ZoomController<WebHost>>,
    queued: HookQueue,
    on_show: Option<Function>,
    on_hide: Option<Function>,
}

impl Lens {
    /// Build a detached lens for `target`
    pub(crate) fn create(target: HtmlElement, options: &JsValue) -> ZoomResult<Rc<Lens>> {
        let config = options::config(options)?;
        let on_show = options::callback(options, "onShow");
        let on_hide = options::callback(options, "onHide");
        let parts = Parts::query(&target)?;

        let queued: HookQueue = Rc::default();
        let hooks = ZoomHooks {
            on_show: on_show.as_ref().map(|_| enqueue(&queued, Hook::Show)),
            on_hide: on_hide.as_ref().map(|_| enqueue(&queued, Hook::Hide)),
        };

        Ok(Rc::new_cyclic(|lens| Lens {
            target,
            controller: RefCell::new(
                ZoomController::new(WebHost::new(parts, lens), config).with_hooks(hooks),
            ),
            queued,
            on_show,
            on_hide,
        }))
    }

    pub(crate) fn target(&self) -> &HtmlElement {
        &self.target
    }

    /// Run `op` against the controller, then deliver queued hooks
    ///
    /// Returns `None` if the controller is already borrowed further up the
    /// stack (a hook that synchronously dispatches a DOM event, for one).
    pub(crate) fn dispatch<R>(
        &self,
        op: impl FnOnce(&mut ZoomController<WebHost>) -> R,
    ) -> Option<R> {
        let result = match self.controller.try_borrow_mut() {
            Ok(mut controller) => Some(op(&mut controller)),
            Err(_) => {
                warn!("zoom controller busy; call dropped");
                None
            }
        };
        self.flush_hooks();
        result
    }

    /// Read controller state without dispatching
    pub(crate) fn inspect<R>(&self, op: impl FnOnce(&ZoomController<WebHost>) -> R) -> Option<R> {
        self.controller.try_borrow().ok().map(|controller| op(&controller))
    }

    fn flush_hooks(&self) {
        let hooks: Vec<Hook> = self.queued.borrow_mut().drain(..).collect();
        for hook in hooks {
            let callback = match hook {
                Hook::Show => self.on_show.as_ref(),
                Hook::Hide => self.on_hide.as_ref(),
            };
            if let Some(callback) = callback {
                if let Err(err) = callback.call0(&self.target) {
                    warn!(?hook, ?err, "zoom hook threw");
                }
            }
        }
    }

    // =========================================================================
    // Browser events
    // =========================================================================

    pub(super) fn on_enter(&self, event: &Event) {
        let pointer = events::pointer(event);
        let result = self.dispatch(|zoom| zoom.handle_enter(&pointer));
        suppress(event, result);
    }

    pub(super) fn on_move(&self, event: &Event) {
        let pointer = events::pointer(event);
        let result = self.dispatch(|zoom| zoom.handle_move(&pointer));
        suppress(event, result);
    }

    pub(super) fn on_leave(&self, event: &Event) {
        let result = self.dispatch(|zoom| zoom.handle_leave());
        suppress(event, result);
    }

    pub(super) fn on_click(&self, event: &Event) {
        let on_link = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
            .and_then(|element| element.closest("a").ok().flatten())
            .is_some();
        let result = self.dispatch(|zoom| zoom.handle_click(on_link));
        suppress(event, result);
    }

    pub(super) fn on_settle(&self, event: &Event) {
        self.dispatch(|zoom| {
            if let Some((ticket, outcome)) = zoom.host_mut().settle(event) {
                zoom.handle_load(ticket, outcome);
            }
        });
    }

    pub(super) fn on_timer(&self, token: &JsValue) {
        let Some(raw) = token.as_f64() else {
            warn!(?token, "timer fired without a token");
            return;
        };
        let timer = TimerId(raw as u32);
        self.dispatch(|zoom| {
            zoom.host_mut().timer_fired(timer);
            zoom.handle_timer(timer);
        });
    }
}

impl Attach for Rc<Lens> {
    fn is_attached(&self) -> bool {
        self.inspect(|zoom| zoom.is_attached()).unwrap_or(true)
    }

    fn attach(&mut self) -> bool {
        self.dispatch(|zoom| zoom.attach()).unwrap_or(false)
    }
}

fn enqueue(queue: &HookQueue, hook: Hook) -> Box<dyn FnMut()> {
    let queue = Rc::clone(queue);
    Box::new(move || queue.borrow_mut().push(hook))
}

fn suppress(event: &Event, result: Option<InputResult>) {
    if result.is_some_and(InputResult::prevents_default) {
        event.prevent_default();
    }
}
