//! Reusable UI components.

pub mod input_field;
pub mod status_indicator;

pub use input_field::{render_input_field, visible_window, InputFieldConfig};
pub use status_indicator::{render_status_indicator, status_dot};
