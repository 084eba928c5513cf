pub mod formatters;
pub mod view_models;
pub mod views;

/// Display formatting options
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayOptions {
    pub enable_color: bool,
}
