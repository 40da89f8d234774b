//! Dashboard submit/countdown state machine.
//!
//! ```text
//! Idle ──submit──▶ Loading ──2xx──────────────▶ Success(view)
//!                     │──429/413──▶ RateLimited{60} ──tick×60──▶ Idle
//!                     └──other────▶ Error(message)
//! ```
//!
//! Submission is blocked while Loading or while the countdown is nonzero;
//! one request is in flight at a time. The embedder drives [`Dashboard::tick`]
//! once per second while rate limited and stops driving it at zero or on
//! teardown. Nothing here is persisted; only the session token outlives the
//! machine.

use crate::report::{parse_report, AnalysisResult, LlmReport};

/// Cooldown imposed when the backend signals rate limiting (429 or 413).
pub const RATE_LIMIT_COOLDOWN_SECS: u32 = 60;

const GENERIC_ERROR: &str = "An error occurred";

/// A completed analysis, parsed for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisView {
    pub result: AnalysisResult,
    pub report: LlmReport,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardState {
    Idle,
    Loading,
    Success(AnalysisView),
    RateLimited { remaining_secs: u32 },
    Error(String),
}

/// The dashboard's render state.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    state: DashboardState,
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            state: DashboardState::Idle,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        !matches!(
            self.state,
            DashboardState::Loading | DashboardState::RateLimited { .. }
        )
    }

    /// Move to Loading. Returns false (and stays put) if submission is
    /// currently blocked.
    pub fn begin_submit(&mut self) -> bool {
        if !self.can_submit() {
            return false;
        }
        self.state = DashboardState::Loading;
        true
    }

    /// Apply a buffered gateway response.
    pub fn on_response(&mut self, status: u16, body: &str) {
        if status == 429 || status == 413 {
            self.state = DashboardState::RateLimited {
                remaining_secs: RATE_LIMIT_COOLDOWN_SECS,
            };
            return;
        }

        if !(200..300).contains(&status) {
            self.state = DashboardState::Error(envelope_message(body));
            return;
        }

        let result: AnalysisResult = serde_json::from_str(body).unwrap_or_else(|_| AnalysisResult {
            report: body.to_string(),
            ..AnalysisResult::default()
        });
        let report = parse_report(&result.report);
        self.state = DashboardState::Success(AnalysisView { result, report });
    }

    /// Apply the accumulated text of a completed analysis stream.
    pub fn on_stream_complete(&mut self, accumulated: &str) {
        let report = parse_report(accumulated);
        self.state = DashboardState::Success(AnalysisView {
            result: AnalysisResult {
                report: accumulated.to_string(),
                ..AnalysisResult::default()
            },
            report,
        });
    }

    /// Apply a transport failure.
    pub fn on_transport_error(&mut self, message: &str) {
        self.state = DashboardState::Error(message.to_string());
    }

    /// Advance the rate-limit countdown by one second.
    ///
    /// No-op outside RateLimited; reaching zero re-enables submission.
    pub fn tick(&mut self) {
        if let DashboardState::RateLimited { remaining_secs } = &mut self.state {
            *remaining_secs = remaining_secs.saturating_sub(1);
            if *remaining_secs == 0 {
                self.state = DashboardState::Idle;
            }
        }
    }

    /// Drive the countdown once per second until it reaches zero.
    ///
    /// Returns immediately when not rate limited. Dropping the future stops
    /// the timer, so tying it to the owning component's lifetime is enough
    /// to avoid leaking it.
    pub async fn run_countdown(&mut self) {
        while matches!(self.state, DashboardState::RateLimited { .. }) {
            tokio::time::sleep(std::time::Duration::from_secs(1)).await;
            self.tick();
        }
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

fn envelope_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error")?.as_str().map(String::from))
        .unwrap_or_else(|| GENERIC_ERROR.to_string())
}
