use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A single decoded sample in the unit square.
///
/// Coordinates are always in `[0, 1)`; `inside` records membership in the
/// closed quarter unit disk (`x*x + y*y <= 1`, boundary inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub inside: bool,
}

impl Point {
    /// Classify a coordinate pair against the closed quarter unit disk.
    pub fn classify(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            inside: x * x + y * y <= 1.0,
        }
    }
}

/// Result of decoding a full point-stream response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamResult {
    /// Decoded points, in stream order.
    pub points: Vec<Point>,
    /// Number of points inside the quarter disk.
    pub inside_count: u64,
    /// Total number of decoded points.
    pub total: u64,
}

impl StreamResult {
    /// The π estimate, `4 * inside / total`.
    ///
    /// Computed once from the finalized result; never from partial counts.
    pub fn pi_estimate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        4.0 * self.inside_count as f64 / self.total as f64
    }

    /// Build the presentable summary for this result.
    pub fn summary(&self, response_time: Duration) -> EstimateSummary {
        EstimateSummary {
            pi_estimate: self.pi_estimate(),
            inside_count: self.inside_count,
            total: self.total,
            response_time_ms: response_time.as_secs_f64() * 1000.0,
            preview: self.points.iter().take(PREVIEW_POINTS).copied().collect(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Number of leading points included in a summary preview.
pub const PREVIEW_POINTS: usize = 5;

/// Aggregate statistics reported when a run finishes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateSummary {
    pub pi_estimate: f64,
    pub inside_count: u64,
    pub total: u64,
    /// Wall-clock time spent fetching the point stream, in milliseconds.
    pub response_time_ms: f64,
    /// First few decoded points, for display.
    pub preview: Vec<Point>,
    pub created_at: String,
}

/// Current state of a render session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum SessionState {
    /// No session has been started
    Idle,

    /// A session is actively drawing batches
    Running { started_at: f64 },

    /// All points were drawn
    Completed,

    /// The session was stopped by request
    Stopped,

    /// The upstream fetch or decode failed before a session could run
    Failed { message: String },
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Idle
    }
}

impl SessionState {
    /// Terminal states stay terminal until a new session is created.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionState::Completed | SessionState::Stopped | SessionState::Failed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_origin() {
        let p = Point::classify(0.0, 0.0);
        assert!(p.inside);
    }

    #[test]
    fn test_classify_boundary_counts_as_inside() {
        assert!(Point::classify(1.0, 0.0).inside);
        assert!(Point::classify(0.0, 1.0).inside);
    }

    #[test]
    fn test_classify_outside() {
        assert!(!Point::classify(0.9, 0.9).inside);
    }

    #[test]
    fn test_pi_estimate_matches_recomputation() {
        let result = StreamResult {
            points: vec![
                Point::classify(0.1, 0.1),
                Point::classify(0.2, 0.3),
                Point::classify(0.99, 0.99),
                Point::classify(0.5, 0.5),
            ],
            inside_count: 3,
            total: 4,
        };
        let expected = 4.0 * result.inside_count as f64 / result.total as f64;
        assert_eq!(result.pi_estimate(), expected);
        assert_eq!(result.pi_estimate(), 3.0);
    }

    #[test]
    fn test_pi_estimate_empty() {
        let result = StreamResult {
            points: vec![],
            inside_count: 0,
            total: 0,
        };
        assert_eq!(result.pi_estimate(), 0.0);
    }

    #[test]
    fn test_summary_preview_truncated() {
        let points: Vec<Point> = (0..10)
            .map(|i| Point::classify(i as f64 / 10.0, 0.0))
            .collect();
        let inside = points.iter().filter(|p| p.inside).count() as u64;
        let result = StreamResult {
            total: points.len() as u64,
            inside_count: inside,
            points,
        };
        let summary = result.summary(Duration::from_millis(12));
        assert_eq!(summary.preview.len(), PREVIEW_POINTS);
        assert_eq!(summary.preview[0], result.points[0]);
        assert!((summary.response_time_ms - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_terminal_states() {
        assert!(!SessionState::Idle.is_terminal());
        assert!(!SessionState::Running { started_at: 0.0 }.is_terminal());
        assert!(SessionState::Completed.is_terminal());
        assert!(SessionState::Stopped.is_terminal());
        assert!(SessionState::Failed {
            message: "boom".into()
        }
        .is_terminal());
    }
}
