//! Chart-level entry points: thumbnails, live playback and export.

mod export;
mod playback;
mod static_renderer;

pub use export::{
    BlobSink, ExportSettings, FileBlobSink, export_animation, export_filename, export_gif,
    export_surface,
};
pub use playback::{
    FrameHandle, FrameScheduler, ManualClock, ManualFrameScheduler, PlaybackClock,
    PlaybackController, PlaybackSettings, PlaybackState, SystemClock,
};
pub use static_renderer::{StaticRenderer, ThumbnailSink};
