//! Progressive "rain" rendering of a decoded point stream.

mod controller;
mod session;

pub use controller::{RenderConfig, RenderController, RenderEvent};
pub use session::{BatchOutcome, RenderSession, DEFAULT_BATCH_SIZE};
