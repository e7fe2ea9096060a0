//! Progress and diagnostics reporting.
//!
//! Long-running transforms announce when they start and finish, and the
//! gradient reports deprecated configuration knobs. Nothing here holds global
//! state: callers pass a sink into the `*_with` entry points, and the plain
//! entry points fall back to [`TracingDiagnostics`].

use std::fmt;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Transform that produced a diagnostics event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Resize,
    Revolve,
    Gradient,
    FourierResize,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Resize => "resize",
            Operation::Revolve => "revolve",
            Operation::Gradient => "gradient",
            Operation::FourierResize => "fourier_resize",
        };
        f.write_str(name)
    }
}

/// A diagnostics event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The operation began work.
    Started(Operation),
    /// The operation finished; reported with the elapsed wall-clock time.
    Completed(Operation),
    /// A deprecated option was supplied and ignored.
    Deprecated(&'static str),
}

/// Sink for diagnostics events.
pub trait Diagnostics: Send + Sync {
    /// Called once per event. `elapsed` is set for [`Event::Completed`].
    fn report(&self, event: &Event, elapsed: Option<Duration>);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDiagnostics;

impl Diagnostics for NullDiagnostics {
    fn report(&self, _event: &Event, _elapsed: Option<Duration>) {}
}

/// Forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&self, event: &Event, elapsed: Option<Duration>) {
        match event {
            Event::Started(op) => tracing::info!(operation = %op, "started"),
            Event::Completed(op) => {
                let elapsed_ms = elapsed.map_or(0.0, |d| d.as_secs_f64() * 1e3);
                tracing::info!(operation = %op, elapsed_ms, "completed");
            }
            Event::Deprecated(knob) => {
                tracing::warn!(
                    option = *knob,
                    "{knob} is no longer a supported argument; ignoring it"
                );
            }
        }
    }
}

/// Keeps every event in arrival order.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    events: Mutex<Vec<(Event, Option<Duration>)>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far, without timings.
    pub fn events(&self) -> Vec<Event> {
        match self.events.lock() {
            Ok(events) => events.iter().map(|(e, _)| e.clone()).collect(),
            Err(poisoned) => poisoned.into_inner().iter().map(|(e, _)| e.clone()).collect(),
        }
    }

    /// Snapshot of the events recorded so far, with timings.
    pub fn timed_events(&self) -> Vec<(Event, Option<Duration>)> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn report(&self, event: &Event, elapsed: Option<Duration>) {
        let mut events = match self.events.lock() {
            Ok(events) => events,
            Err(poisoned) => poisoned.into_inner(),
        };
        events.push((event.clone(), elapsed));
    }
}

/// Reports `Started` on creation and `Completed` with the elapsed time on
/// [`Stopwatch::finish`]. Dropping it without finishing reports nothing
/// further, so failed calls only ever show a start notice.
pub struct Stopwatch<'a> {
    sink: &'a dyn Diagnostics,
    operation: Operation,
    start: Instant,
}

impl<'a> Stopwatch<'a> {
    pub fn start(sink: &'a dyn Diagnostics, operation: Operation) -> Self {
        sink.report(&Event::Started(operation), None);
        Self {
            sink,
            operation,
            start: Instant::now(),
        }
    }

    pub fn finish(self) -> Duration {
        let elapsed = self.start.elapsed();
        self.sink
            .report(&Event::Completed(self.operation), Some(elapsed));
        elapsed
    }
}
