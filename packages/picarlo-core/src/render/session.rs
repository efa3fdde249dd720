//! The rain session state: drawn position plus a polled cancellation flag.
//!
//! Deliberately synchronous. The session does not know what schedules it —
//! [`super::controller::RenderController`] paces it with an async interval,
//! tests drive it directly.

use crate::surface::Surface;
use crate::types::StreamResult;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Maximum points drawn per scheduled tick.
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// Outcome of one scheduled batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    /// The cancellation flag was set; nothing was drawn.
    Stopped,
    /// A batch was drawn and undrawn points remain.
    InProgress,
    /// Every point has been drawn.
    Completed,
}

/// Progressive drawing state over an already-decoded [`StreamResult`].
pub struct RenderSession {
    result: Arc<StreamResult>,
    drawn_count: usize,
    batch_size: usize,
    cancelled: Arc<AtomicBool>,
}

impl RenderSession {
    pub fn new(result: Arc<StreamResult>, batch_size: usize) -> Self {
        Self {
            result,
            drawn_count: 0,
            batch_size: batch_size.max(1),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Shared cancellation flag; setting it stops the session at the next
    /// batch boundary.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// Points drawn so far, in decode order.
    pub fn drawn_count(&self) -> usize {
        self.drawn_count
    }

    pub fn total(&self) -> usize {
        self.result.points.len()
    }

    /// Draw the next batch of at most `batch_size` points.
    ///
    /// The cancellation flag is checked before any drawing, so a stop request
    /// between ticks suppresses the whole next batch. Points are drawn
    /// strictly in decode order and batches never overlap.
    pub fn draw_batch(&mut self, surface: &mut dyn Surface) -> BatchOutcome {
        if self.cancelled.load(Ordering::Relaxed) {
            return BatchOutcome::Stopped;
        }

        let end = (self.drawn_count + self.batch_size).min(self.result.points.len());
        for point in &self.result.points[self.drawn_count..end] {
            surface.plot(point.x, point.y, point.inside);
        }
        self.drawn_count = end;
        surface.flush();

        if self.drawn_count >= self.result.points.len() {
            BatchOutcome::Completed
        } else {
            BatchOutcome::InProgress
        }
    }
}
