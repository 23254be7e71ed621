use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Interval;
use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::js_sys::Date;
use web_sys::{EventTarget, HtmlElement, MutationObserver, MutationObserverInit, ResizeObserver};

use super::dom::DomSurface;
use super::widget::{StepConfig, StepWidget};
use crate::config;
use crate::error::WidgetError;

type SharedWidget = Rc<RefCell<StepWidget<DomSurface>>>;

/// Runs `f` unless the widget is already borrowed by an outer callback.
fn with_widget(widget: &SharedWidget, f: impl FnOnce(&mut StepWidget<DomSurface>)) {
    if let Ok(mut widget) = widget.try_borrow_mut() {
        f(&mut widget);
    }
}

/// Event listener that is removed again when dropped.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut()>,
}

impl Listener {
    pub fn new(
        target: &EventTarget,
        event: &'static str,
        callback: impl FnMut() + 'static,
    ) -> Result<Self, WidgetError> {
        let callback = Closure::wrap(Box::new(callback) as Box<dyn FnMut()>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// Frame ticker and layout notifications. They only run while the widget
/// needs frames, so hidden or detached widgets cost nothing.
struct Driver {
    container: HtmlElement,
    running: Cell<bool>,
    ticker: RefCell<Option<Interval>>,
    window_resize: RefCell<Option<Listener>>,
    resize_observer: ResizeObserver,
    _resize_callback: Closure<dyn FnMut()>,
}

impl Driver {
    fn new(container: HtmlElement, widget: &SharedWidget) -> Result<Self, WidgetError> {
        let resize_callback = {
            let widget = widget.clone();
            Closure::wrap(Box::new(move || with_widget(&widget, |w| w.on_resize()))
                as Box<dyn FnMut()>)
        };
        let resize_observer = ResizeObserver::new(resize_callback.as_ref().unchecked_ref())?;

        Ok(Self {
            container,
            running: Cell::new(false),
            ticker: RefCell::new(None),
            window_resize: RefCell::new(None),
            resize_observer,
            _resize_callback: resize_callback,
        })
    }

    // Never called from the ticker's own callback, which would drop the running closure
    fn sync(&self, widget: &SharedWidget) {
        let Ok(running) = widget.try_borrow().map(|w| w.needs_frames()) else {
            return;
        };
        if running == self.running.get() {
            return;
        }
        self.running.set(running);

        if running {
            debug!("Starting step widget ticker");
            self.start(widget);
        } else {
            debug!("Stopping step widget ticker");
            self.stop();
        }
    }

    fn start(&self, widget: &SharedWidget) {
        let ticker = {
            let widget = widget.clone();
            let mut last = Date::now();
            Interval::new(config::FRAME_INTERVAL_MS, move || {
                let now = Date::now();
                // Background tabs throttle timers; never jump more than one frame budget
                let dt = ((now - last) / 1000.0).min(config::MAX_FRAME_DELTA);
                last = now;
                with_widget(&widget, |w| w.tick(dt));
            })
        };
        *self.ticker.borrow_mut() = Some(ticker);

        let window_resize = web_sys::window().ok_or(WidgetError::NoWindow).and_then(|window| {
            let widget = widget.clone();
            Listener::new(&window, "resize", move || with_widget(&widget, |w| w.on_resize()))
        });
        match window_resize {
            Ok(listener) => *self.window_resize.borrow_mut() = Some(listener),
            Err(e) => warn!("Window resize not tracked: {}", e),
        }
        self.resize_observer.observe(&self.container);
    }

    fn stop(&self) {
        self.running.set(false);
        self.ticker.borrow_mut().take();
        self.window_resize.borrow_mut().take();
        self.resize_observer.disconnect();
    }
}

/// Entry point for outside code that changes whether the widget should run.
#[derive(Clone)]
pub struct WidgetHandle {
    widget: SharedWidget,
    driver: Rc<Driver>,
}

impl WidgetHandle {
    pub fn set_visible(&self, visible: bool) {
        with_widget(&self.widget, |w| w.set_visible(visible));
        self.driver.sync(&self.widget);
    }

    pub fn sync_attachment(&self) {
        with_widget(&self.widget, |w| w.sync_attachment());
        self.driver.sync(&self.widget);
    }

    #[cfg(test)]
    pub(crate) fn is_driving(&self) -> bool {
        self.driver.running.get() && self.driver.ticker.borrow().is_some()
    }
}

/// A [`StepWidget`] wired to its container. Dropping it tears the widget down
/// and removes everything it added to the page.
pub struct MountedWidget {
    handle: WidgetHandle,
    _listeners: Vec<Listener>,
    attach_observer: MutationObserver,
    _attach_callback: Closure<dyn FnMut()>,
}

impl MountedWidget {
    pub fn attach(
        container: HtmlElement,
        step_config: StepConfig,
        visible: bool,
    ) -> Result<Self, WidgetError> {
        let document = web_sys::window()
            .ok_or(WidgetError::NoWindow)?
            .document()
            .ok_or(WidgetError::NoDocument)?;
        let surface = DomSurface::discover(&container)?;
        let headers = surface.headers();

        let mut widget = if visible {
            StepWidget::new(surface, step_config)
        } else {
            StepWidget::hidden(surface, step_config)
        };
        widget.initialize();
        debug!("Mounted step widget, visible: {}", visible);
        let widget: SharedWidget = Rc::new(RefCell::new(widget));

        let mut listeners = Vec::new();
        {
            let widget = widget.clone();
            listeners.push(Listener::new(&container, "mouseenter", move || {
                with_widget(&widget, |w| w.pause())
            })?);
        }
        {
            let widget = widget.clone();
            listeners.push(Listener::new(&container, "mouseleave", move || {
                with_widget(&widget, |w| w.resume())
            })?);
        }
        for (index, header) in headers {
            header.style().set_property("cursor", "pointer")?;
            let widget = widget.clone();
            listeners.push(Listener::new(&header, "click", move || {
                with_widget(&widget, |w| w.on_step_header_click(index))
            })?);
        }

        let driver = Rc::new(Driver::new(container, &widget)?);
        let handle = WidgetHandle { widget, driver };
        handle.driver.sync(&handle.widget);

        // Removal or re-insertion anywhere in the document may detach the container
        let attach_callback = {
            let handle = handle.clone();
            Closure::wrap(Box::new(move || handle.sync_attachment()) as Box<dyn FnMut()>)
        };
        let attach_observer = MutationObserver::new(attach_callback.as_ref().unchecked_ref())?;
        let options = MutationObserverInit::new();
        options.set_child_list(true);
        options.set_subtree(true);
        attach_observer.observe_with_options(&document, &options)?;

        Ok(Self {
            handle,
            _listeners: listeners,
            attach_observer,
            _attach_callback: attach_callback,
        })
    }

    pub fn handle(&self) -> WidgetHandle {
        self.handle.clone()
    }

    pub fn set_visible(&self, visible: bool) {
        self.handle.set_visible(visible);
    }
}

impl Drop for MountedWidget {
    fn drop(&mut self) {
        self.attach_observer.disconnect();
        with_widget(&self.handle.widget, |w| w.teardown());
        self.handle.driver.stop();
    }
}
