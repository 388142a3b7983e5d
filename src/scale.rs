//! Scale Engine — scale interval patterns and note-sequence generation.
//!
//! Scales are addressed by [`ScaleKind`]. The string-keyed functions below
//! accept whatever key the UI hands over and fall back to the major scale,
//! with a warning, when the key is unknown.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostics;
use crate::error::TheoryError;
use crate::notes::{self, MIDI_MAX, MIDI_MIN};

/// Every scale the engine knows, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScaleKind {
    Major,
    MinorNatural,
    MinorHarmonic,
    MinorMelodic,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Locrian,
    MajorPentatonic,
    MinorPentatonic,
    Blues,
}

/// An immutable scale pattern. `intervals` ascend from 0 within one octave.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleDefinition {
    pub key: &'static str,
    pub name: &'static str,
    pub intervals: &'static [u8],
    pub degree_labels: &'static [&'static str],
    pub description: &'static str,
}

static SCALES: [ScaleDefinition; 12] = [
    ScaleDefinition {
        key: "major",
        name: "Major",
        intervals: &[0, 2, 4, 5, 7, 9, 11],
        degree_labels: &["1", "2", "3", "4", "5", "6", "7"],
        description: "Bright and stable; the Ionian mode",
    },
    ScaleDefinition {
        key: "minorNatural",
        name: "Natural Minor",
        intervals: &[0, 2, 3, 5, 7, 8, 10],
        degree_labels: &["1", "2", "b3", "4", "5", "b6", "b7"],
        description: "Dark and melancholic; the Aeolian mode",
    },
    ScaleDefinition {
        key: "minorHarmonic",
        name: "Harmonic Minor",
        intervals: &[0, 2, 3, 5, 7, 8, 11],
        degree_labels: &["1", "2", "b3", "4", "5", "b6", "7"],
        description: "Natural minor with a raised 7th, giving a major dominant",
    },
    ScaleDefinition {
        key: "minorMelodic",
        name: "Melodic Minor",
        intervals: &[0, 2, 3, 5, 7, 9, 11],
        degree_labels: &["1", "2", "b3", "4", "5", "6", "7"],
        description: "Minor with raised 6th and 7th (ascending form)",
    },
    ScaleDefinition {
        key: "dorian",
        name: "Dorian",
        intervals: &[0, 2, 3, 5, 7, 9, 10],
        degree_labels: &["1", "2", "b3", "4", "5", "6", "b7"],
        description: "Minor with a raised 6th; jazzy and soulful",
    },
    ScaleDefinition {
        key: "phrygian",
        name: "Phrygian",
        intervals: &[0, 1, 3, 5, 7, 8, 10],
        degree_labels: &["1", "b2", "b3", "4", "5", "b6", "b7"],
        description: "Minor with a lowered 2nd; Spanish flavour",
    },
    ScaleDefinition {
        key: "lydian",
        name: "Lydian",
        intervals: &[0, 2, 4, 6, 7, 9, 11],
        degree_labels: &["1", "2", "3", "#4", "5", "6", "7"],
        description: "Major with a raised 4th; dreamy",
    },
    ScaleDefinition {
        key: "mixolydian",
        name: "Mixolydian",
        intervals: &[0, 2, 4, 5, 7, 9, 10],
        degree_labels: &["1", "2", "3", "4", "5", "6", "b7"],
        description: "Major with a lowered 7th; bluesy rock",
    },
    ScaleDefinition {
        key: "locrian",
        name: "Locrian",
        intervals: &[0, 1, 3, 5, 6, 8, 10],
        degree_labels: &["1", "b2", "b3", "4", "b5", "b6", "b7"],
        description: "Diminished tonic; unstable and tense",
    },
    ScaleDefinition {
        key: "majorPentatonic",
        name: "Major Pentatonic",
        intervals: &[0, 2, 4, 7, 9],
        degree_labels: &["1", "2", "3", "5", "6"],
        description: "Five-note major scale without half steps",
    },
    ScaleDefinition {
        key: "minorPentatonic",
        name: "Minor Pentatonic",
        intervals: &[0, 3, 5, 7, 10],
        degree_labels: &["1", "b3", "4", "5", "b7"],
        description: "Five-note minor scale; rock and blues staple",
    },
    ScaleDefinition {
        key: "blues",
        name: "Blues",
        intervals: &[0, 3, 5, 6, 7, 10],
        degree_labels: &["1", "b3", "4", "b5", "5", "b7"],
        description: "Minor pentatonic plus the flat-5 blue note",
    },
];

const DEGREE_NUMERALS: [&str; 7] = ["I", "II", "III", "IV", "V", "VI", "VII"];
const DEGREE_NAMES: [&str; 7] = [
    "Tonic",
    "Supertonic",
    "Mediant",
    "Subdominant",
    "Dominant",
    "Submediant",
    "Leading Tone",
];

impl ScaleKind {
    pub const ALL: [ScaleKind; 12] = [
        ScaleKind::Major,
        ScaleKind::MinorNatural,
        ScaleKind::MinorHarmonic,
        ScaleKind::MinorMelodic,
        ScaleKind::Dorian,
        ScaleKind::Phrygian,
        ScaleKind::Lydian,
        ScaleKind::Mixolydian,
        ScaleKind::Locrian,
        ScaleKind::MajorPentatonic,
        ScaleKind::MinorPentatonic,
        ScaleKind::Blues,
    ];

    pub fn definition(self) -> &'static ScaleDefinition {
        &SCALES[self as usize]
    }

    pub fn key(self) -> &'static str {
        self.definition().key
    }

    pub fn intervals(self) -> &'static [u8] {
        self.definition().intervals
    }

    /// The note at position `index` of this scale's unbounded degree
    /// sequence: `root + 12 * (index / len) + intervals[index % len]`.
    ///
    /// Saturates at the `i32` bounds; such notes are far outside the MIDI
    /// range and callers filter them out.
    pub fn degree_note(self, root: i32, index: usize) -> i32 {
        let intervals = self.intervals();
        let octave = i32::try_from(index / intervals.len()).unwrap_or(i32::MAX);
        root.saturating_add(octave.saturating_mul(12))
            .saturating_add(intervals[index % intervals.len()] as i32)
    }

    /// Generate `octaves` octaves of this scale from `root`.
    ///
    /// Notes outside [0, 127] are dropped rather than clamped, so an
    /// out-of-range root does not appear in the result. Only octaves that
    /// can reach the MIDI range are visited.
    pub fn generate(self, root: i32, octaves: u32) -> Vec<i32> {
        let intervals = self.intervals();
        let capacity = intervals
            .len()
            .saturating_mul(octaves as usize)
            .min((MIDI_MAX + 1) as usize);
        let mut notes = Vec::with_capacity(capacity);

        let root = i64::from(root);
        let lowest_base = i64::from(MIDI_MIN) - 11;
        // First octave whose base can still land a note at or above MIDI_MIN.
        let first = if root < lowest_base {
            (lowest_base - root + 11) / 12
        } else {
            0
        };
        for octave in first..i64::from(octaves) {
            let base = root + 12 * octave;
            if base > i64::from(MIDI_MAX) {
                break;
            }
            for &interval in intervals {
                let note = base + i64::from(interval);
                if (i64::from(MIDI_MIN)..=i64::from(MIDI_MAX)).contains(&note) {
                    notes.push(note as i32);
                }
            }
        }
        notes
    }

    /// Whether `note` shares a pitch class with any degree of this scale on `root`.
    pub fn contains(self, root: i32, note: i32) -> bool {
        let pc = (note.rem_euclid(12) - root.rem_euclid(12)).rem_euclid(12) as u8;
        self.intervals().contains(&pc)
    }

    /// Snap a note to the nearest in-scale pitch. Ties resolve downward.
    pub fn snap(self, root: i32, note: i32) -> i32 {
        let note = note.clamp(MIDI_MIN, MIDI_MAX);
        if self.contains(root, note) {
            return note;
        }
        for offset in 1..=6 {
            if note - offset >= MIDI_MIN && self.contains(root, note - offset) {
                return note - offset;
            }
            if note + offset <= MIDI_MAX && self.contains(root, note + offset) {
                return note + offset;
            }
        }
        note
    }
}

impl FromStr for ScaleKind {
    type Err = TheoryError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        ScaleKind::ALL
            .into_iter()
            .find(|kind| kind.key() == key)
            .ok_or_else(|| TheoryError::UnknownScale(key.to_string()))
    }
}

impl fmt::Display for ScaleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Look up a scale key, substituting major (with a warning) on a miss.
pub fn resolve_scale(key: &str, diag: &dyn Diagnostics) -> ScaleKind {
    key.parse().unwrap_or_else(|e: TheoryError| {
        diag.warn(&format!("{e}, falling back to major"));
        ScaleKind::Major
    })
}

/// Generate a scale as MIDI notes. Unknown keys fall back to major.
pub fn generate_scale(root: i32, key: &str, octaves: u32, diag: &dyn Diagnostics) -> Vec<i32> {
    resolve_scale(key, diag).generate(root, octaves)
}

pub fn get_scale_info(key: &str, diag: &dyn Diagnostics) -> &'static ScaleDefinition {
    resolve_scale(key, diag).definition()
}

pub fn get_available_scales() -> Vec<&'static str> {
    ScaleKind::ALL.iter().map(|kind| kind.key()).collect()
}

/// Format any integer note as `<name><octave>` without range checks,
/// e.g. `0` → `"C-1"`, `-1` → `"B-2"`.
pub fn get_note_name(note: i32, use_sharps: bool) -> String {
    format!(
        "{}{}",
        notes::pitch_class_name(note, use_sharps),
        notes::octave_of(note)
    )
}

pub fn get_scale_note_names(
    root: i32,
    key: &str,
    octaves: u32,
    use_sharps: bool,
    diag: &dyn Diagnostics,
) -> Vec<String> {
    generate_scale(root, key, octaves, diag)
        .into_iter()
        .map(|note| get_note_name(note, use_sharps))
        .collect()
}

/// Descriptive info for a scale degree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleDegreeInfo {
    pub degree: i32,
    pub roman_numeral: &'static str,
    pub degree_name: &'static str,
    /// Semitones above the root; absent when the scale has fewer degrees.
    pub interval: Option<u8>,
}

/// Describe degree `degree` (1–7, or 8 for the octave) of a scale.
///
/// The degree wraps with `(degree - 1) mod 7`, so 8 reads as the tonic.
pub fn get_scale_degree(key: &str, degree: i32, diag: &dyn Diagnostics) -> ScaleDegreeInfo {
    let kind = resolve_scale(key, diag);
    let index = (i64::from(degree) - 1).rem_euclid(7) as usize;
    ScaleDegreeInfo {
        degree,
        roman_numeral: DEGREE_NUMERALS[index],
        degree_name: DEGREE_NAMES[index],
        interval: kind.intervals().get(index).copied(),
    }
}

pub fn scale_contains(root: i32, key: &str, note: i32, diag: &dyn Diagnostics) -> bool {
    resolve_scale(key, diag).contains(root, note)
}

pub fn snap_to_scale(root: i32, key: &str, note: i32, diag: &dyn Diagnostics) -> i32 {
    resolve_scale(key, diag).snap(root, note)
}
