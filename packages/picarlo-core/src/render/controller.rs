//! Render controller - drives a rain session across scheduled ticks
//!
//! The controller manages:
//! - Session lifecycle (start, tick, stop)
//! - Frame pacing via a tokio interval
//! - Cooperative cancellation via CancellationToken, checked before each tick
//! - Event emission to the presentation layer
//! - State management

use crate::error::{PiError, Result};
use crate::render::session::{BatchOutcome, RenderSession, DEFAULT_BATCH_SIZE};
use crate::surface::Surface;
use crate::types::{EstimateSummary, SessionState, StreamResult};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tokio_util::sync::CancellationToken;

/// Render controller configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Maximum points drawn per tick.
    pub batch_size: usize,
    /// Delay between scheduled ticks.
    pub frame_interval: Duration,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            frame_interval: Duration::from_millis(16),
        }
    }
}

/// Events emitted by the render controller
#[derive(Debug, Clone)]
pub enum RenderEvent {
    StateChanged { state: SessionState },
    BatchDrawn { drawn: u64, total: u64 },
    Completed { summary: EstimateSummary },
}

type EventCallback = Box<dyn Fn(RenderEvent) + Send + Sync>;

/// Drives one rain session: batch-paced drawing of a decoded point stream
/// onto a [`Surface`], cancellable at every batch boundary.
///
/// One controller hosts at most one session; once the session reaches a
/// terminal state a new controller is created for the next run.
pub struct RenderController {
    config: RenderConfig,

    // State
    state: Arc<RwLock<SessionState>>,
    is_running: Arc<AtomicBool>,
    drawn: Arc<AtomicU64>,

    // Cancellation token checked before every tick
    cancel_token: CancellationToken,

    // Event emission callback
    event_callback: Arc<RwLock<Option<EventCallback>>>,

    task: Option<JoinHandle<()>>,
}

impl RenderController {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            state: Arc::new(RwLock::new(SessionState::Idle)),
            is_running: Arc::new(AtomicBool::new(false)),
            drawn: Arc::new(AtomicU64::new(0)),
            cancel_token: CancellationToken::new(),
            event_callback: Arc::new(RwLock::new(None)),
            task: None,
        }
    }

    /// Replace the controller's own token with an externally owned one, so a
    /// single token can gate both the upstream fetch and the render loop.
    pub fn with_cancellation_token(mut self, token: CancellationToken) -> Self {
        self.cancel_token = token;
        self
    }

    /// Set event callback function
    pub fn set_event_callback<F>(&self, callback: F)
    where
        F: Fn(RenderEvent) + Send + Sync + 'static,
    {
        *self.event_callback.write() = Some(Box::new(callback));
    }

    /// Get the cancellation token for external cancellation support
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Current session state
    pub fn state(&self) -> SessionState {
        self.state.read().clone()
    }

    /// Points drawn so far
    pub fn drawn_count(&self) -> u64 {
        self.drawn.load(Ordering::Relaxed)
    }

    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::Relaxed)
    }

    /// Start the rain session.
    ///
    /// Resets the surface to its blank boundary state, then draws batches of
    /// at most `batch_size` points per tick until exhausted or stopped. The
    /// completion event carries the final estimate built from `result` and
    /// `response_time`.
    ///
    /// Rejects a second start while a session is active.
    pub fn start(
        &mut self,
        result: Arc<StreamResult>,
        mut surface: Box<dyn Surface>,
        response_time: Duration,
    ) -> Result<()> {
        if self.is_running.swap(true, Ordering::SeqCst) {
            return Err(PiError::AlreadyRunning);
        }

        log::info!(
            "Starting rain session: {} points, batch {}",
            result.total,
            self.config.batch_size
        );

        self.drawn.store(0, Ordering::Relaxed);
        self.set_state(SessionState::Running {
            started_at: chrono::Utc::now().timestamp_millis() as f64 / 1000.0,
        });

        let mut session = RenderSession::new(Arc::clone(&result), self.config.batch_size);
        let frame_interval = self.config.frame_interval;

        let state = Arc::clone(&self.state);
        let is_running = Arc::clone(&self.is_running);
        let drawn = Arc::clone(&self.drawn);
        let event_callback = Arc::clone(&self.event_callback);
        let cancel_token = self.cancel_token.clone();

        self.task = Some(tokio::spawn(async move {
            let total = session.total() as u64;
            let emit = |event: RenderEvent| {
                if let Some(callback) = event_callback.read().as_ref() {
                    callback(event);
                }
            };
            let set_state = |next: SessionState| {
                *state.write() = next.clone();
                emit(RenderEvent::StateChanged { state: next });
            };

            // Blank boundary state before the first batch, so a stop that
            // lands before any tick still leaves a reset surface behind.
            surface.reset();
            surface.flush();

            let mut tick = interval(frame_interval);

            loop {
                tokio::select! {
                    // Cancellation wins over a ready tick
                    biased;

                    _ = cancel_token.cancelled() => {
                        log::info!("Rain session stopped after {} points", session.drawn_count());
                        set_state(SessionState::Stopped);
                        break;
                    }

                    _ = tick.tick() => {
                        match session.draw_batch(surface.as_mut()) {
                            BatchOutcome::Stopped => {
                                log::info!(
                                    "Rain session stopped after {} points",
                                    session.drawn_count()
                                );
                                set_state(SessionState::Stopped);
                                break;
                            }
                            BatchOutcome::InProgress => {
                                drawn.store(session.drawn_count() as u64, Ordering::Relaxed);
                                emit(RenderEvent::BatchDrawn {
                                    drawn: session.drawn_count() as u64,
                                    total,
                                });
                            }
                            BatchOutcome::Completed => {
                                drawn.store(session.drawn_count() as u64, Ordering::Relaxed);
                                emit(RenderEvent::BatchDrawn {
                                    drawn: session.drawn_count() as u64,
                                    total,
                                });
                                let summary = result.summary(response_time);
                                log::info!(
                                    "Rain session completed: pi ~= {:.6} ({} / {})",
                                    summary.pi_estimate,
                                    summary.inside_count,
                                    summary.total
                                );
                                set_state(SessionState::Completed);
                                emit(RenderEvent::Completed { summary });
                                break;
                            }
                        }
                    }
                }
            }

            is_running.store(false, Ordering::Relaxed);
        }));

        Ok(())
    }

    /// Request a stop. Idempotent: safe to call repeatedly and after the
    /// session reached a terminal state.
    pub fn stop(&self) {
        if self.state.read().is_terminal() {
            return;
        }
        log::info!("Stop requested for rain session");
        self.cancel_token.cancel();
    }

    /// Wait for the session task to finish, if one was started.
    pub async fn join(&mut self) {
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    fn set_state(&self, next: SessionState) {
        *self.state.write() = next.clone();
        if let Some(callback) = self.event_callback.read().as_ref() {
            callback(RenderEvent::StateChanged { state: next });
        }
    }
}

impl Drop for RenderController {
    fn drop(&mut self) {
        // A dropped controller must not leave a detached session drawing
        self.cancel_token.cancel();
    }
}
