//! Auto-advancing stepped progress widget and its DOM bindings.

pub mod dom;
pub mod geometry;
pub mod mount;
pub mod surface;
pub mod task;
pub mod timing;
pub mod widget;

pub use mount::{MountedWidget, WidgetHandle};
pub use widget::{ActiveStyle, Phase, StepConfig, StepWidget};
