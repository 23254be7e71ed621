use log::Level;

// Timing, in seconds
pub const LINE_DURATION: f64 = 2.0;
pub const SWITCH_DURATION: f64 = 0.5;
pub const END_DELAY: f64 = 3.0;

/// Frame ticker period driving every mounted widget.
pub const FRAME_INTERVAL_MS: u32 = 16;
/// Largest time step fed to a widget in one frame, in seconds.
pub const MAX_FRAME_DELTA: f64 = 0.1;

/// Blue tint applied to the image of an active step.
pub const ACTIVE_FILTER: &str =
    "invert(32%) sepia(99%) saturate(1352%) hue-rotate(203deg) brightness(98%) contrast(106%)";

pub const TRACK_COLOR: &str = "#E3E3E3";
pub const PROGRESS_COLOR: &str = "#06F";
pub const LINE_WIDTH: &str = "2px";

// Activation contract
pub const WRAPPER_SELECTOR: &str = ".services_slider-wrapper-inner";
pub const ITEM_SELECTOR: &str = ".w-dyn-item";
pub const MARKER_SELECTOR: &str = "[data-step=\"decor\"]";
pub const HEADER_SELECTOR: &str = "[data-step=\"header\"]";
pub const TITLE_SELECTOR: &str = "h4";
pub const CONTENT_SELECTOR: &str = "[data-step-content]";
pub const IMAGE_SELECTOR: &str = "img";
pub const ACTIVE_CLASS: &str = "is-active";

/// Set on containers a Yew component already owns so page enhancement skips them.
pub const MANAGED_ATTR: &str = "data-step-managed";

pub const TAB_PANE_SELECTOR: &str = ".w-tab-pane";
pub const TAB_ACTIVE_CLASS: &str = "w--tab-active";

// Static line for list-style services sections
pub const LIST_CONTAINER_SELECTOR: &str = ".services_outer-wrapper.is-list";
pub const LIST_LINE_SELECTOR: &str = ".services_slider-wrapper-line";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Widget lifecycle chatter while developing
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}
