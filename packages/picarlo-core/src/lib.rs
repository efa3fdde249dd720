pub mod client;
pub mod decode;
pub mod error;
pub mod render;
pub mod surface;
pub mod types;

pub use client::{FetchedPoints, PointClient};
pub use decode::{decode, normalize_u64, RECORD_BYTES};
pub use error::{PiError, Result};
pub use render::{
    BatchOutcome, RenderConfig, RenderController, RenderEvent, RenderSession, DEFAULT_BATCH_SIZE,
};
pub use surface::{Cell, GridSurface, Surface};
pub use types::{EstimateSummary, Point, SessionState, StreamResult, PREVIEW_POINTS};
