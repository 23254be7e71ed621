use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use super::geometry::{IndicatorGeometry, Rect};
use super::surface::{ContentHeight, StepSurface};
use crate::config;
use crate::error::WidgetError;

pub fn rect_of(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
}

fn find(parent: &Element, selector: &str) -> Option<Element> {
    parent.query_selector(selector).ok().flatten()
}

fn find_html(parent: &Element, selector: &str) -> Option<HtmlElement> {
    find(parent, selector).and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

// Any of these may be missing from an item
struct StepElements {
    marker: Option<Element>,
    title: Option<Element>,
    header: Option<HtmlElement>,
    content: Option<HtmlElement>,
    image: Option<HtmlElement>,
}

impl StepElements {
    fn find(item: &Element) -> Self {
        Self {
            marker: find(item, config::MARKER_SELECTOR),
            title: find(item, config::TITLE_SELECTOR),
            header: find_html(item, config::HEADER_SELECTOR),
            content: find_html(item, config::CONTENT_SELECTOR),
            image: find_html(item, config::IMAGE_SELECTOR),
        }
    }
}

pub fn query_all(parent: &Element, selector: &str) -> Result<Vec<Element>, WidgetError> {
    let nodes = parent.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

fn create_line(document: &Document, color: &str) -> Result<HtmlElement, WidgetError> {
    let line = document
        .create_element("div")?
        .dyn_into::<HtmlElement>()
        .map_err(|_| WidgetError::Dom("created div is not an HtmlElement".to_string()))?;

    let style = line.style();
    for (property, value) in [
        ("position", "absolute"),
        ("width", config::LINE_WIDTH),
        ("height", "0px"),
        ("z-index", "1"),
        ("top", "0"),
        ("left", "0"),
        ("transform-origin", "top left"),
        ("pointer-events", "none"),
        ("background", color),
    ] {
        style.set_property(property, value)?;
    }
    Ok(line)
}

/// [`StepSurface`] over a services container. Owns the track and progress
/// lines it appends; everything else belongs to the page.
pub struct DomSurface {
    container: HtmlElement,
    steps: Vec<StepElements>,
    track: HtmlElement,
    progress: HtmlElement,
}

impl DomSurface {
    pub fn discover(container: &HtmlElement) -> Result<Self, WidgetError> {
        let window = web_sys::window().ok_or(WidgetError::NoWindow)?;
        let document = window.document().ok_or(WidgetError::NoDocument)?;

        let steps: Vec<StepElements> = query_all(container, config::ITEM_SELECTOR)?
            .iter()
            .map(StepElements::find)
            .collect();
        if steps.is_empty() {
            return Err(WidgetError::NoSteps);
        }

        // Lines are positioned against the container
        let position = window
            .get_computed_style(container)?
            .map(|style| style.get_property_value("position"))
            .transpose()?
            .unwrap_or_default();
        if position.is_empty() || position == "static" {
            container.style().set_property("position", "relative")?;
        }

        let track = create_line(&document, config::TRACK_COLOR)?;
        let progress = create_line(&document, config::PROGRESS_COLOR)?;
        container.append_child(&track)?;
        container.append_child(&progress)?;

        Ok(Self {
            container: container.clone(),
            steps,
            track,
            progress,
        })
    }

    pub fn headers(&self) -> Vec<(usize, HtmlElement)> {
        self.steps
            .iter()
            .enumerate()
            .filter_map(|(index, step)| step.header.clone().map(|header| (index, header)))
            .collect()
    }

    fn place_line(line: &HtmlElement, x: f64, y: f64, height: f64) {
        let style = line.style();
        let _ = style.set_property("transform", &format!("translate({}px, {}px)", x, y));
        let _ = style.set_property("height", &format!("{}px", height));
    }
}

impl Drop for DomSurface {
    fn drop(&mut self) {
        self.track.remove();
        self.progress.remove();
    }
}

impl StepSurface for DomSurface {
    fn step_count(&self) -> usize {
        self.steps.len()
    }

    fn is_attached(&self) -> bool {
        self.container.is_connected()
    }

    fn container_rect(&self) -> Option<Rect> {
        self.is_attached().then(|| rect_of(&self.container))
    }

    fn marker_rect(&self, index: usize) -> Option<Rect> {
        self.steps
            .get(index)?
            .marker
            .as_ref()
            .filter(|marker| marker.is_connected())
            .map(rect_of)
    }

    fn content_natural_height(&self, index: usize) -> Option<f64> {
        let content = self.steps.get(index)?.content.as_ref()?;
        Some(content.scroll_height() as f64)
    }

    fn set_content_height(&mut self, index: usize, height: ContentHeight) {
        let Some(content) = self.steps.get(index).and_then(|step| step.content.as_ref()) else {
            return;
        };
        let value = match height {
            ContentHeight::Collapsed => "0px".to_string(),
            ContentHeight::Px(px) => format!("{}px", px.max(0.0)),
            ContentHeight::Auto => "auto".to_string(),
        };
        let style = content.style();
        let _ = style.set_property("overflow", "hidden");
        let _ = style.set_property("height", &value);
    }

    fn set_step_active(&mut self, index: usize, active: bool) {
        let Some(step) = self.steps.get(index) else {
            return;
        };
        for element in [&step.marker, &step.title].into_iter().flatten() {
            let _ = element
                .class_list()
                .toggle_with_force(config::ACTIVE_CLASS, active);
        }
    }

    fn set_highlight(&mut self, index: usize, filter: Option<&str>) {
        let Some(image) = self.steps.get(index).and_then(|step| step.image.as_ref()) else {
            return;
        };
        let style = image.style();
        let _ = style.set_property("transition", "filter 0.3s ease");
        let _ = style.set_property("filter", filter.unwrap_or("none"));
    }

    fn set_indicator(&mut self, geometry: &IndicatorGeometry) {
        Self::place_line(&self.track, geometry.x, geometry.y, geometry.track_height);
        Self::place_line(
            &self.progress,
            geometry.x,
            geometry.y,
            geometry.progress_height,
        );
    }
}
