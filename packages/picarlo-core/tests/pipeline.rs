//! End-to-end decode -> rain pipeline over an in-memory surface.

use picarlo_core::{
    decode, GridSurface, RenderConfig, RenderController, RenderEvent, SessionState, Surface,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

fn buffer_of(records: &[(u64, u64)]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(records.len() * 16);
    for &(x, y) in records {
        buf.extend_from_slice(&x.to_le_bytes());
        buf.extend_from_slice(&y.to_le_bytes());
    }
    buf
}

/// Grid surface wrapper that shares its cell state with the test.
struct ProbeSurface {
    grid: GridSurface,
    plotted: Arc<parking_lot::Mutex<usize>>,
}

impl Surface for ProbeSurface {
    fn size(&self) -> u32 {
        self.grid.size()
    }

    fn reset(&mut self) {
        self.grid.reset();
    }

    fn plot(&mut self, x: f64, y: f64, inside: bool) {
        self.grid.plot(x, y, inside);
        *self.plotted.lock() += 1;
    }
}

#[tokio::test]
async fn test_decode_then_rain_to_completion() {
    // Half the records sit near the origin (inside), half near (1,1) (outside)
    let mut records = Vec::new();
    for i in 0..600u64 {
        if i % 2 == 0 {
            records.push((i << 40, i << 40));
        } else {
            records.push((u64::MAX - i, u64::MAX - i));
        }
    }
    let buf = buffer_of(&records);

    let result = Arc::new(decode(&buf).unwrap());
    assert_eq!(result.total, 600);

    let plotted = Arc::new(parking_lot::Mutex::new(0));
    let surface = ProbeSurface {
        grid: GridSurface::new(64),
        plotted: Arc::clone(&plotted),
    };

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut controller = RenderController::new(RenderConfig {
        batch_size: 250,
        frame_interval: Duration::from_millis(1),
    });
    controller.set_event_callback(move |event| {
        tx.send(event).ok();
    });
    controller
        .start(Arc::clone(&result), Box::new(surface), Duration::from_millis(7))
        .unwrap();
    controller.join().await;

    assert_eq!(controller.state(), SessionState::Completed);
    assert_eq!(controller.drawn_count(), 600);
    assert_eq!(*plotted.lock(), 600);

    let mut batch_counts = Vec::new();
    let mut summary = None;
    while let Ok(event) = rx.try_recv() {
        match event {
            RenderEvent::BatchDrawn { drawn, .. } => batch_counts.push(drawn),
            RenderEvent::Completed { summary: s } => summary = Some(s),
            RenderEvent::StateChanged { .. } => {}
        }
    }
    assert_eq!(batch_counts, vec![250, 500, 600]);

    let summary = summary.expect("completion event");
    assert_eq!(summary.pi_estimate, result.pi_estimate());
    assert_eq!(summary.inside_count, result.inside_count);
    assert!((summary.response_time_ms - 7.0).abs() < 1e-9);
    assert_eq!(summary.preview.len(), 5);
}

#[tokio::test]
async fn test_malformed_body_never_reaches_renderer() {
    let buf = vec![0u8; 15];
    assert!(decode(&buf).is_err());
}
