//! Impact-to-MIDI translation
//!
//! Each impact becomes a short chime: a pan control change toward where
//! the impact happened, then a note-on/note-off pair whose velocity is
//! proportional to impact speed and whose pitch is a random degree of
//! the active key. The sink only queues raw messages; whoever owns the
//! output port drains and sends them.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts;
use crate::events::{EventSink, ImpactEvent};
use crate::notes::KeyState;

/// MIDI controller number for stereo pan
pub const PAN_CONTROLLER: u8 = 10;

/// A raw MIDI channel message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MidiMessage {
    NoteOn { note: u8, velocity: u8 },
    NoteOff { note: u8, velocity: u8 },
    ControlChange { control: u8, value: u8 },
}

impl MidiMessage {
    /// Encode as a standard 3-byte channel message
    pub fn to_bytes(self, channel: u8) -> [u8; 3] {
        let channel = channel & 0x0F;
        match self {
            MidiMessage::NoteOn { note, velocity } => {
                [0x90 | channel, note & 0x7F, velocity & 0x7F]
            }
            MidiMessage::NoteOff { note, velocity } => {
                [0x80 | channel, note & 0x7F, velocity & 0x7F]
            }
            MidiMessage::ControlChange { control, value } => {
                [0xB0 | channel, control & 0x7F, value & 0x7F]
            }
        }
    }
}

/// Sink that turns impact events into queued MIDI chimes
pub struct MidiChimes {
    key: KeyState,
    rng: Pcg32,
    arena_width: f32,
    velocity_mult: f32,
    outgoing: Vec<MidiMessage>,
}

impl MidiChimes {
    /// `arena_width` maps impact positions onto the pan range
    pub fn new(seed: u64, arena_width: f32) -> Self {
        Self {
            key: KeyState::default(),
            rng: Pcg32::seed_from_u64(seed),
            arena_width: arena_width.max(1.0),
            velocity_mult: consts::NOTE_VELOCITY_MULT,
            outgoing: Vec::new(),
        }
    }

    pub fn key(&self) -> &KeyState {
        &self.key
    }

    pub fn key_mut(&mut self) -> &mut KeyState {
        &mut self.key
    }

    /// MIDI velocity for an impact speed, capped at 127
    pub fn velocity_for(&self, intensity: f32) -> u8 {
        (intensity.abs() * self.velocity_mult).min(127.0) as u8
    }

    /// Stereo pan for a horizontal position, hard left at the left wall
    pub fn pan_for(&self, x: f32) -> u8 {
        ((x / self.arena_width * 127.0) as i32).clamp(0, 127) as u8
    }

    /// Take the queued messages, oldest first
    pub fn drain(&mut self) -> Vec<MidiMessage> {
        std::mem::take(&mut self.outgoing)
    }

    pub fn pending(&self) -> usize {
        self.outgoing.len()
    }
}

impl EventSink for MidiChimes {
    fn on_impact(&mut self, event: &ImpactEvent) {
        let velocity = self.velocity_for(event.intensity());
        let pan = self.pan_for(event.pos().x);
        let note = self.key.pick(&mut self.rng);
        self.outgoing.push(MidiMessage::ControlChange {
            control: PAN_CONTROLLER,
            value: pan,
        });
        self.outgoing.push(MidiMessage::NoteOn { note, velocity });
        // Same velocity on release, matching the attack
        self.outgoing.push(MidiMessage::NoteOff { note, velocity });
    }
}
