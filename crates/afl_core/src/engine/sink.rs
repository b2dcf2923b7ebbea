//! Event sink
//!
//! Telemetry side channel for live consumers (commentary, UI, replay). The
//! match never waits on it and never fails because of it: errors and panics
//! from a sink are logged, counted in `MatchResult::sink_failures`, and the
//! simulation carries on.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender, SyncSender, TrySendError};

use tracing::warn;

use crate::error::SinkError;
use crate::models::{EventKind, MatchEvent};

pub trait MatchEventSink {
    fn on_event(&mut self, event: &MatchEvent) -> Result<(), SinkError>;
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl MatchEventSink for NullSink {
    fn on_event(&mut self, _event: &MatchEvent) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Keeps a copy of every event.
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    events: Vec<MatchEvent>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[MatchEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<MatchEvent> {
        self.events
    }
}

impl MatchEventSink for CollectingSink {
    fn on_event(&mut self, event: &MatchEvent) -> Result<(), SinkError> {
        self.events.push(event.clone());
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum ChannelSender {
    Unbounded(Sender<MatchEvent>),
    Bounded(SyncSender<MatchEvent>),
}

/// Forwards events over `std::sync::mpsc`. The bounded form drops on a full
/// buffer instead of blocking the match.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: ChannelSender,
}

impl ChannelSink {
    pub fn unbounded() -> (Self, Receiver<MatchEvent>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx: ChannelSender::Unbounded(tx) }, rx)
    }

    pub fn bounded(capacity: usize) -> (Self, Receiver<MatchEvent>) {
        let (tx, rx) = mpsc::sync_channel(capacity);
        (Self { tx: ChannelSender::Bounded(tx) }, rx)
    }
}

impl MatchEventSink for ChannelSink {
    fn on_event(&mut self, event: &MatchEvent) -> Result<(), SinkError> {
        match &self.tx {
            ChannelSender::Unbounded(tx) => tx.send(event.clone()).map_err(|_| SinkError::Disconnected),
            ChannelSender::Bounded(tx) => tx.try_send(event.clone()).map_err(|e| match e {
                TrySendError::Full(_) => SinkError::Full,
                TrySendError::Disconnected(_) => SinkError::Disconnected,
            }),
        }
    }
}

/// Numbers events, keeps the match log and shields the match from its sink.
pub(crate) struct EventEmitter<'s> {
    sink: &'s mut dyn MatchEventSink,
    events: Vec<MatchEvent>,
    failures: u32,
}

impl<'s> EventEmitter<'s> {
    pub(crate) fn new(sink: &'s mut dyn MatchEventSink) -> Self {
        Self { sink, events: Vec::with_capacity(512), failures: 0 }
    }

    pub(crate) fn emit(&mut self, game_time_ms: u64, quarter: u8, kind: EventKind) {
        let event = MatchEvent { seq: self.events.len() as u32, game_time_ms, quarter, kind };
        self.deliver(&event);
        self.events.push(event);
    }

    fn deliver(&mut self, event: &MatchEvent) {
        let sink = &mut *self.sink;
        match catch_unwind(AssertUnwindSafe(|| sink.on_event(event))) {
            Ok(Ok(())) => {}
            Ok(Err(error)) => {
                self.failures += 1;
                warn!(seq = event.seq, %error, "event sink failed");
            }
            Err(_) => {
                self.failures += 1;
                warn!(seq = event.seq, "event sink panicked");
            }
        }
    }

    pub(crate) fn failures(&self) -> u32 {
        self.failures
    }

    pub(crate) fn into_events(self) -> (Vec<MatchEvent>, u32) {
        (self.events, self.failures)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Rejects every event.
    pub(crate) struct RejectingSink;

    impl MatchEventSink for RejectingSink {
        fn on_event(&mut self, _event: &MatchEvent) -> Result<(), SinkError> {
            Err(SinkError::Rejected("closed for maintenance".into()))
        }
    }

    /// Panics on every `n`th event.
    pub(crate) struct PanickingSink {
        pub every: u32,
    }

    impl MatchEventSink for PanickingSink {
        fn on_event(&mut self, event: &MatchEvent) -> Result<(), SinkError> {
            if event.seq % self.every == 0 {
                panic!("sink blew up on event {}", event.seq);
            }
            Ok(())
        }
    }

    #[test]
    fn test_emitter_numbers_events() {
        let mut sink = CollectingSink::new();
        let mut emitter = EventEmitter::new(&mut sink);
        emitter.emit(0, 1, EventKind::QuarterStart);
        emitter.emit(1_000, 1, EventKind::Cancelled);
        let (events, failures) = emitter.into_events();
        assert_eq!(failures, 0);
        assert_eq!(events.iter().map(|e| e.seq).collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(sink.events(), &events[..]);
    }

    #[test]
    fn test_rejections_are_counted() {
        let mut sink = RejectingSink;
        let mut emitter = EventEmitter::new(&mut sink);
        emitter.emit(0, 1, EventKind::QuarterStart);
        emitter.emit(0, 1, EventKind::QuarterStart);
        assert_eq!(emitter.failures(), 2);
        let (events, _) = emitter.into_events();
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_panics_are_contained() {
        let mut sink = PanickingSink { every: 2 };
        let mut emitter = EventEmitter::new(&mut sink);
        for _ in 0..4 {
            emitter.emit(0, 1, EventKind::QuarterStart);
        }
        assert_eq!(emitter.failures(), 2);
    }

    #[test]
    fn test_bounded_channel_drops_when_full() {
        let (mut sink, rx) = ChannelSink::bounded(1);
        let event = MatchEvent { seq: 0, game_time_ms: 0, quarter: 1, kind: EventKind::QuarterStart };
        assert_eq!(sink.on_event(&event), Ok(()));
        assert_eq!(sink.on_event(&event), Err(SinkError::Full));
        assert_eq!(rx.recv().unwrap(), event);
        drop(rx);
        assert_eq!(sink.on_event(&event), Err(SinkError::Disconnected));
    }

    #[test]
    fn test_unbounded_channel() {
        let (mut sink, rx) = ChannelSink::unbounded();
        let event = MatchEvent { seq: 5, game_time_ms: 10, quarter: 2, kind: EventKind::Cancelled };
        sink.on_event(&event).unwrap();
        assert_eq!(rx.try_recv().unwrap().seq, 5);
    }
}
