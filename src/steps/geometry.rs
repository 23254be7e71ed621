#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorGeometry {
    pub x: f64,
    pub y: f64,
    pub track_height: f64,
    pub progress_height: f64,
}

/// Indicator placement for a fractional step `position`, or `None` when the
/// draw must be skipped (collapsed container or a needed marker missing).
pub fn indicator_geometry(
    container: Rect,
    markers: &[Option<Rect>],
    position: f64,
) -> Option<IndicatorGeometry> {
    let count = markers.len();
    if count == 0 || container.height <= 0.0 || !position.is_finite() {
        return None;
    }

    let first = markers[0]?;
    let last = markers[count - 1]?;

    // Line is 2px wide, centred on the marker
    let x = first.center_x() - container.left - 1.0;
    let y = first.center_y() - container.top;
    let track_height = last.center_y() - container.top - y;

    // Past the last step the line stays pinned to the last marker
    let position = position.clamp(0.0, count as f64);
    let index = (position.floor() as usize).min(count - 1);
    let next_index = (index + 1).min(count - 1);
    let fraction = (position - index as f64).clamp(0.0, 1.0);

    let current = markers[index]?;
    let next = markers[next_index]?;

    let segment_start = current.center_y() - container.top - y;
    let segment_length = next.top - current.top;
    let progress_height = (segment_start + segment_length * fraction).max(0.0);

    Some(IndicatorGeometry {
        x,
        y,
        track_height,
        progress_height,
    })
}

/// Line drawn behind list-style services sections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticLine {
    pub top: f64,
    pub left: f64,
    pub height: f64,
}

pub fn static_line(container: Rect, markers: &[Rect]) -> Option<StaticLine> {
    if markers.len() < 2 {
        return None;
    }
    let first = markers[0];
    let last = markers[markers.len() - 1];

    Some(StaticLine {
        top: first.center_y() - container.top,
        left: first.center_x() - container.left,
        height: last.center_y() - first.center_y(),
    })
}
