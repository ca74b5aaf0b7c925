//! chart-motion: animated proportional charts.
//!
//! Charts (bars, circles, rectangles, donut) are laid out as backend-agnostic
//! [`render::RenderFrame`]s for any animation progress in `[0, 1]`. The same
//! frames back static thumbnails, host-driven live playback and frame-by-frame
//! export through an encoder such as [`encode::GifFrameEncoder`].

pub mod api;
pub mod core;
pub mod encode;
pub mod error;
pub mod layout;
pub mod render;
pub mod telemetry;

pub use api::{
    ExportSettings, PlaybackController, StaticRenderer, export_animation, export_filename,
    export_gif,
};
pub use crate::core::{Chart, ChartTerm, ChartType, Viewport};
pub use error::{ChartError, ChartResult};
pub use layout::build_chart_frame;
