//! Logging facilities for DeepScript.
//!
//! DeepScript uses the `tracing` crate for instrumentation. Nothing is printed
//! unless the embedding application installs a subscriber:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("deepscript=debug,deepscript_net=info")
//!         .init();
//! }
//! ```
//!
//! Every crate logs under one of the [`targets`] so that subsystems can be
//! filtered independently.

use std::time::{Duration, Instant};

/// Target names for log filtering.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "deepscript_core::signal";
    /// HTTP transport target.
    pub const HTTP: &str = "deepscript_net::http";
    /// Remote font services target.
    pub const SERVICES: &str = "deepscript_net::services";
    /// Canvas layout and editing target.
    pub const CANVAS: &str = "deepscript::canvas";
    /// Font acquisition target.
    pub const FONT: &str = "deepscript::font";
    /// Workflow orchestration target.
    pub const WORKFLOW: &str = "deepscript::workflow";
    /// Preview and download target.
    pub const PREVIEW: &str = "deepscript::preview";
    /// Performance measurements target.
    pub const PERF: &str = "deepscript::perf";
}

/// Measures how long an operation takes and logs it when dropped.
///
/// Unlike an entered `tracing` span, a `PerfSpan` may be held across `.await`
/// points.
#[derive(Debug)]
pub struct PerfSpan {
    operation: &'static str,
    started: Instant,
}

impl PerfSpan {
    /// Start timing `operation`.
    pub fn new(operation: &'static str) -> Self {
        tracing::trace!(target: targets::PERF, operation, "started");
        Self {
            operation,
            started: Instant::now(),
        }
    }

    /// Time elapsed since the span was created.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

impl Drop for PerfSpan {
    fn drop(&mut self) {
        tracing::debug!(
            target: targets::PERF,
            operation = self.operation,
            elapsed_ms = self.started.elapsed().as_millis() as u64,
            "finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_span_measures_elapsed() {
        let span = PerfSpan::new("test_operation");
        std::thread::sleep(Duration::from_millis(2));
        assert!(span.elapsed() >= Duration::from_millis(2));
    }
}
