pub mod animation;
pub mod chart;
pub mod color;
pub mod types;

pub use animation::{
    Ease, contrast_color, ease_out_cubic, fade_in, item_duration, staggered_progress,
};
pub use chart::{
    Chart, ChartContent, ChartStyle, ChartTerm, ChartType, ValueType, calculate_percents,
    display_value, format_value, terms_total,
};
pub use color::{ColorToken, parse_color};
pub use types::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, Viewport};
