//! Attaches widgets to services sections already present in the published page.

use std::cell::RefCell;

use log::{debug, info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{Document, Element, HtmlElement, MutationObserver, MutationObserverInit};

use crate::config;
use crate::error::WidgetError;
use crate::steps::dom::{query_all, rect_of};
use crate::steps::geometry::static_line;
use crate::steps::mount::Listener;
use crate::steps::{MountedWidget, StepConfig, WidgetHandle};

/// Translates the tab pane's active class into `set_visible` calls.
struct TabWatch {
    observer: MutationObserver,
    _callback: Closure<dyn FnMut()>,
}

impl Drop for TabWatch {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

struct PageWidget {
    // Declared first so the observer stops before the widget tears down
    _tab: Option<TabWatch>,
    _widget: MountedWidget,
}

/// Everything attached to the current page. Dropping it detaches all of it.
pub struct PageBindings {
    _widgets: Vec<PageWidget>,
    _line: Option<Listener>,
}

fn is_tab_active(pane: &Element) -> bool {
    pane.class_list().contains(config::TAB_ACTIVE_CLASS)
}

fn watch_tab(pane: &Element, widget: WidgetHandle) -> Result<TabWatch, WidgetError> {
    let callback = {
        let pane = pane.clone();
        Closure::wrap(Box::new(move || widget.set_visible(is_tab_active(&pane)))
            as Box<dyn FnMut()>)
    };

    let observer = MutationObserver::new(callback.as_ref().unchecked_ref())?;
    let options = MutationObserverInit::new();
    options.set_attributes(true);
    options.set_attribute_filter(&Array::of1(&JsValue::from_str("class")));
    observer.observe_with_options(pane, &options)?;

    Ok(TabWatch {
        observer,
        _callback: callback,
    })
}

fn attach_container(container: Element) -> Result<Option<PageWidget>, WidgetError> {
    if container.has_attribute(config::MANAGED_ATTR) {
        return Ok(None);
    }
    let container = container
        .dyn_into::<HtmlElement>()
        .map_err(|_| WidgetError::Dom("services container is not an HtmlElement".to_string()))?;

    let pane = container.closest(config::TAB_PANE_SELECTOR)?;
    let visible = pane.as_ref().map_or(true, is_tab_active);
    // Standalone sections tint the active step images, tabbed ones do not
    let step_config = if pane.is_some() {
        StepConfig::default()
    } else {
        StepConfig::highlighted()
    };

    let widget = MountedWidget::attach(container, step_config, visible)?;
    let tab = pane
        .map(|pane| watch_tab(&pane, widget.handle()))
        .transpose()?;

    Ok(Some(PageWidget {
        _tab: tab,
        _widget: widget,
    }))
}

fn adjust_list_line(document: &Document) {
    let Some(container) = document
        .query_selector(config::LIST_CONTAINER_SELECTOR)
        .ok()
        .flatten()
    else {
        return;
    };
    let Some(line) = document
        .query_selector(config::LIST_LINE_SELECTOR)
        .ok()
        .flatten()
        .and_then(|line| line.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };
    let markers: Vec<_> = query_all(&container, config::MARKER_SELECTOR)
        .unwrap_or_default()
        .iter()
        .map(rect_of)
        .collect();

    if let Some(placement) = static_line(rect_of(&container), &markers) {
        line.style().set_css_text(&format!(
            "position: absolute; top: {}px; height: {}px; left: {}px; transform: translateX(-50%);",
            placement.top, placement.height, placement.left
        ));
    }
}

fn attach_list_line(document: &Document) -> Result<Option<Listener>, WidgetError> {
    if document
        .query_selector(config::LIST_CONTAINER_SELECTOR)?
        .is_none()
    {
        return Ok(None);
    }
    let window = web_sys::window().ok_or(WidgetError::NoWindow)?;

    adjust_list_line(document);
    let document = document.clone();
    Listener::new(&window, "resize", move || adjust_list_line(&document)).map(Some)
}

/// Finds every services container in the document and gives it a widget.
/// Containers that fail to bind are logged and skipped.
pub fn enhance_page(document: &Document) -> PageBindings {
    let containers = document
        .document_element()
        .map(|root| query_all(&root, config::WRAPPER_SELECTOR))
        .transpose()
        .unwrap_or_else(|e| {
            warn!("Could not query services containers: {}", e);
            None
        })
        .unwrap_or_default();

    let mut widgets = Vec::new();
    for container in containers {
        match attach_container(container) {
            Ok(Some(widget)) => widgets.push(widget),
            Ok(None) => debug!("Skipping container owned by a component"),
            Err(e) => warn!("Skipping services container: {}", e),
        }
    }

    let line = attach_list_line(document).unwrap_or_else(|e| {
        warn!("Services line not attached: {}", e);
        None
    });

    info!("Enhanced {} services sections", widgets.len());
    PageBindings {
        _widgets: widgets,
        _line: line,
    }
}

thread_local! {
    static PAGE: RefCell<Option<PageBindings>> = RefCell::new(None);
}

/// Enhances the page and keeps the bindings alive until the next call, which
/// drops the previous set first.
pub fn install(document: &Document) {
    PAGE.with(|page| {
        page.borrow_mut().take();
        let bindings = enhance_page(document);
        *page.borrow_mut() = Some(bindings);
    });
}
