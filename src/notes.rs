//! Scales, chords and key state
//!
//! Impacts pick a random degree from the active note set, offset from a
//! movable root. The set is one of the chord voicings below by default;
//! a scale can be swapped in, and cycling chords swaps the chords back.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts;

/// Root-note shifts the key commands support, in semitones
pub const KEY_SHIFT_INTERVALS: [i8; 10] = [-7, 7, -5, 5, -2, 2, -1, 1, -12, 12];

/// Scale interval tables, in semitones above the root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scale {
    Major,
    Minor,
    Pentatonic,
    Blues,
    Phrygian,
    Lydian,
    Mixolydian,
    Dorian,
    Locrian,
    HarmonicMinor,
    MelodicMinor,
    DoubleHarmonic,
    Enigmatic,
    HungarianMinor,
    Persian,
    Hirajoshi,
    Iwato,
    NeapolitanMajor,
    NeapolitanMinor,
    Octatonic,
    WholeTone,
}

impl Scale {
    pub const ALL: [Scale; 21] = [
        Scale::Major,
        Scale::Minor,
        Scale::Pentatonic,
        Scale::Blues,
        Scale::Phrygian,
        Scale::Lydian,
        Scale::Mixolydian,
        Scale::Dorian,
        Scale::Locrian,
        Scale::HarmonicMinor,
        Scale::MelodicMinor,
        Scale::DoubleHarmonic,
        Scale::Enigmatic,
        Scale::HungarianMinor,
        Scale::Persian,
        Scale::Hirajoshi,
        Scale::Iwato,
        Scale::NeapolitanMajor,
        Scale::NeapolitanMinor,
        Scale::Octatonic,
        Scale::WholeTone,
    ];

    pub fn intervals(self) -> &'static [u8] {
        match self {
            Scale::Major => &[0, 2, 4, 5, 7, 9, 11],
            Scale::Minor => &[0, 2, 3, 5, 7, 8, 10],
            Scale::Pentatonic => &[0, 2, 4, 7, 9],
            Scale::Blues => &[0, 3, 5, 6, 7, 10],
            Scale::Phrygian => &[0, 1, 3, 5, 7, 8, 10],
            Scale::Lydian => &[0, 2, 4, 6, 7, 9, 11],
            Scale::Mixolydian => &[0, 2, 4, 5, 7, 9, 10],
            Scale::Dorian => &[0, 2, 3, 5, 7, 9, 10],
            Scale::Locrian => &[0, 1, 3, 5, 6, 8, 10],
            Scale::HarmonicMinor => &[0, 2, 3, 5, 7, 8, 11],
            Scale::MelodicMinor => &[0, 2, 3, 5, 7, 9, 11],
            Scale::DoubleHarmonic => &[0, 1, 4, 5, 7, 8, 11],
            Scale::Enigmatic => &[0, 1, 4, 6, 8, 10, 11],
            Scale::HungarianMinor => &[0, 2, 3, 6, 7, 8, 11],
            Scale::Persian => &[0, 1, 4, 5, 6, 8, 11],
            Scale::Hirajoshi => &[0, 2, 3, 7, 8],
            Scale::Iwato => &[0, 1, 5, 6, 10],
            Scale::NeapolitanMajor => &[0, 1, 3, 5, 7, 9, 11],
            Scale::NeapolitanMinor => &[0, 1, 3, 5, 7, 8, 11],
            Scale::Octatonic => &[0, 1, 3, 4, 6, 7, 9, 10],
            Scale::WholeTone => &[0, 2, 4, 6, 8, 10],
        }
    }
}

/// Two-octave chord voicings impacts strike notes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Chord {
    MajorSeventh,
    MinorSeventh,
    AddedNinth,
    Sixth,
    MinorNinth,
}

impl Chord {
    pub fn intervals(self) -> &'static [u8] {
        match self {
            Chord::MajorSeventh => &[0, 4, 7, 11, 12, 16, 19, 23],
            Chord::MinorSeventh => &[0, 3, 7, 10, 12, 15, 19, 22],
            Chord::AddedNinth => &[0, 4, 7, 14, 12, 16, 19, 26],
            Chord::Sixth => &[0, 4, 7, 9, 12, 16, 19, 21],
            Chord::MinorNinth => &[0, 3, 7, 10, 14, 12, 15, 19, 22, 26],
        }
    }

    /// Next chord in the cycle major 7th, minor 7th, minor 9th
    pub fn next(self) -> Chord {
        match self {
            Chord::MajorSeventh => Chord::MinorSeventh,
            Chord::MinorSeventh => Chord::MinorNinth,
            Chord::MinorNinth => Chord::MajorSeventh,
            // Off-cycle voicings rejoin at the top
            Chord::AddedNinth | Chord::Sixth => Chord::MajorSeventh,
        }
    }
}

/// Movable root plus the note set impacts pick degrees from
#[derive(Debug, Clone, Copy)]
pub struct KeyState {
    root: u8,
    chord: Chord,
    notes: &'static [u8],
}

impl Default for KeyState {
    fn default() -> Self {
        Self::new(consts::ROOT_NOTE)
    }
}

impl KeyState {
    pub fn new(root: u8) -> Self {
        let chord = Chord::MajorSeventh;
        Self {
            root: root.min(127),
            chord,
            notes: chord.intervals(),
        }
    }

    pub fn root(&self) -> u8 {
        self.root
    }

    pub fn chord(&self) -> Chord {
        self.chord
    }

    /// Move the root by a (possibly negative) number of semitones,
    /// saturating at the ends of the MIDI note range
    pub fn shift_root(&mut self, semitones: i8) {
        self.root = (self.root as i16 + semitones as i16).clamp(0, 127) as u8;
    }

    pub fn set_chord(&mut self, chord: Chord) {
        self.chord = chord;
        self.notes = chord.intervals();
    }

    /// Advance to the next chord in the cycle. Also the way back into
    /// chord picking after [`KeyState::set_scale`].
    pub fn cycle_chord(&mut self) {
        self.set_chord(self.chord.next());
    }

    /// Pick degrees from a scale instead of the active chord
    pub fn set_scale(&mut self, scale: Scale) {
        self.notes = scale.intervals();
    }

    /// Pick a random note: root plus a random degree, capped at 127
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> u8 {
        let degree = self.notes[rng.random_range(0..self.notes.len())];
        (self.root as u16 + degree as u16).min(127) as u8
    }
}
