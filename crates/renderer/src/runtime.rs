//! Frame clock and loop lifecycle.
//!
//! The clock origin is captured when the renderer mounts and every frame
//! samples elapsed seconds from it; the loop lifecycle is a one-way
//! Uninitialized → Running → Stopped machine with an idempotent stop.

use std::time::Instant;

/// Snapshot of the time state supplied to the dot pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSample {
    /// Elapsed seconds since the clock origin.
    pub seconds: f32,
    /// Monotonic frame counter for the running session.
    pub frame_index: u64,
}

impl TimeSample {
    pub fn new(seconds: f32, frame_index: u64) -> Self {
        Self {
            seconds,
            frame_index,
        }
    }
}

/// Abstraction over where time values originate from.
pub trait TimeSource {
    /// Produces a time sample for the next frame.
    fn sample(&mut self) -> TimeSample;
}

/// Time source backed by the system monotonic clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemTimeSource {
    origin: Instant,
    frame: u64,
}

impl SystemTimeSource {
    /// Creates a system time source with its origin at `Instant::now()`.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for SystemTimeSource {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
            frame: 0,
        }
    }
}

impl TimeSource for SystemTimeSource {
    fn sample(&mut self) -> TimeSample {
        let sample = TimeSample::new(self.origin.elapsed().as_secs_f32(), self.frame);
        self.frame = self.frame.saturating_add(1);
        sample
    }
}

/// Time source that always reports a fixed timestamp.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeSource {
    time: f32,
}

impl FixedTimeSource {
    pub fn new(time: f32) -> Self {
        Self { time }
    }
}

impl TimeSource for FixedTimeSource {
    fn sample(&mut self) -> TimeSample {
        TimeSample::new(self.time, 0)
    }
}

/// Lifecycle of the frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    Uninitialized,
    Running,
    /// Terminal; a stopped loop never resumes.
    Stopped,
}

/// Tracks whether frame callbacks may run.
///
/// Stopping cancels whatever frame would come next; it is safe to stop a loop
/// that never started, and to stop repeatedly.
#[derive(Debug, Clone, Copy)]
pub struct LoopControl {
    phase: LoopPhase,
}

impl LoopControl {
    pub fn new() -> Self {
        Self {
            phase: LoopPhase::Uninitialized,
        }
    }

    /// Enters `Running`. Returns false if the loop already ran or stopped.
    pub fn start(&mut self) -> bool {
        if matches!(self.phase, LoopPhase::Uninitialized) {
            self.phase = LoopPhase::Running;
            true
        } else {
            false
        }
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    pub fn should_render(&self) -> bool {
        matches!(self.phase, LoopPhase::Running)
    }

    /// Cancels the frame schedule from any phase, any number of times.
    pub fn stop(&mut self) {
        self.phase = LoopPhase::Stopped;
    }
}

impl Default for LoopControl {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_source_reports_the_given_time() {
        let mut source = FixedTimeSource::new(1.5);
        assert_eq!(source.sample(), TimeSample::new(1.5, 0));
        assert_eq!(source.sample(), TimeSample::new(1.5, 0));
    }

    #[test]
    fn system_source_counts_frames_and_never_goes_backwards() {
        let mut source = SystemTimeSource::new();
        let first = source.sample();
        let second = source.sample();
        assert_eq!(first.frame_index, 0);
        assert_eq!(second.frame_index, 1);
        assert!(second.seconds >= first.seconds);
    }

    #[test]
    fn loop_starts_once_and_renders_while_running() {
        let mut control = LoopControl::new();
        assert!(!control.should_render());
        assert!(control.start());
        assert!(control.should_render());
        assert!(!control.start());
    }

    #[test]
    fn stop_before_start_is_allowed_and_final() {
        let mut control = LoopControl::new();
        control.stop();
        assert_eq!(control.phase(), LoopPhase::Stopped);
        assert!(!control.start());
        assert!(!control.should_render());
    }

    #[test]
    fn stop_is_idempotent() {
        let mut control = LoopControl::new();
        control.start();
        control.stop();
        control.stop();
        assert_eq!(control.phase(), LoopPhase::Stopped);
        assert!(!control.should_render());
    }
}
