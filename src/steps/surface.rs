use super::geometry::{IndicatorGeometry, Rect};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContentHeight {
    Collapsed,
    Px(f64),
    Auto,
}

/// Everything the widget reads from and writes to the page.
///
/// Reads return `None` for anything missing or detached; writes to a missing
/// element are silently dropped.
pub trait StepSurface {
    fn step_count(&self) -> usize;

    fn is_attached(&self) -> bool;

    fn container_rect(&self) -> Option<Rect>;
    fn marker_rect(&self, index: usize) -> Option<Rect>;

    /// Intrinsic height of a step's content, regardless of its current inline height.
    fn content_natural_height(&self, index: usize) -> Option<f64>;

    fn set_content_height(&mut self, index: usize, height: ContentHeight);
    fn set_step_active(&mut self, index: usize, active: bool);

    fn set_highlight(&mut self, index: usize, filter: Option<&str>);

    fn set_indicator(&mut self, geometry: &IndicatorGeometry);
}
