//! Impact events
//!
//! The simulation reports wall and ball-to-ball impacts through the
//! [`EventSink`] trait instead of making sound itself. Sinks can be
//! chained with [`FanoutSink`] so one run can feed MIDI, logging and
//! test recorders at the same time.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Which wall pair a ball bounced off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallAxis {
    /// Left or right wall
    X,
    /// Top or bottom wall
    Y,
}

/// A single collision worth reporting
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ImpactEvent {
    /// A ball bounced off a wall
    Wall {
        ball: u32,
        axis: WallAxis,
        /// Speed along the reflected axis after the bounce
        intensity: f32,
        pos: Vec2,
    },
    /// Two balls bounced off each other
    Body {
        first: u32,
        second: u32,
        /// Relative speed of the pair after the velocity exchange
        intensity: f32,
        pos: Vec2,
    },
}

impl ImpactEvent {
    /// Impact speed, whatever the impact kind
    pub fn intensity(&self) -> f32 {
        match *self {
            ImpactEvent::Wall { intensity, .. } => intensity,
            ImpactEvent::Body { intensity, .. } => intensity,
        }
    }

    /// Where the impact happened
    pub fn pos(&self) -> Vec2 {
        match *self {
            ImpactEvent::Wall { pos, .. } => pos,
            ImpactEvent::Body { pos, .. } => pos,
        }
    }
}

/// Consumer of impact events produced during a tick
pub trait EventSink {
    fn on_impact(&mut self, event: &ImpactEvent);
}

impl<T: EventSink + ?Sized> EventSink for &mut T {
    fn on_impact(&mut self, event: &ImpactEvent) {
        (**self).on_impact(event);
    }
}

/// Sink that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn on_impact(&mut self, _event: &ImpactEvent) {}
}

/// Sink that keeps every event in order of arrival
#[derive(Debug, Default, Clone)]
pub struct ImpactRecorder {
    pub events: Vec<ImpactEvent>,
}

impl ImpactRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wall_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, ImpactEvent::Wall { .. }))
            .count()
    }

    pub fn body_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, ImpactEvent::Body { .. }))
            .count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for ImpactRecorder {
    fn on_impact(&mut self, event: &ImpactEvent) {
        self.events.push(*event);
    }
}

/// Sink that logs every event as JSON at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn on_impact(&mut self, event: &ImpactEvent) {
        log::debug!("impact {}", serde_json::to_string(event).unwrap_or_default());
    }
}

/// Fans each event out to every registered sink
#[derive(Default)]
pub struct FanoutSink<'a> {
    sinks: Vec<Box<dyn EventSink + 'a>>,
}

impl<'a> FanoutSink<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sink: impl EventSink + 'a) {
        self.sinks.push(Box::new(sink));
    }
}

impl EventSink for FanoutSink<'_> {
    fn on_impact(&mut self, event: &ImpactEvent) {
        for sink in &mut self.sinks {
            sink.on_impact(event);
        }
    }
}
