//! Note & interval utilities — MIDI number ↔ note name ↔ frequency.
//!
//! Parsing and frequency conversions return `None` when the input cannot be
//! mapped onto the MIDI range. Formatting clamps out-of-range numbers and
//! reports the substitution to the supplied diagnostics sink.

use crate::diagnostics::Diagnostics;
use crate::error::TheoryError;

pub const MIDI_MIN: i32 = 0;
pub const MIDI_MAX: i32 = 127;

/// A0, the lowest key of an 88-key piano.
pub const PIANO_LOWEST: i32 = 21;
/// C8, the highest key of an 88-key piano.
pub const PIANO_HIGHEST: i32 = 108;

/// Standard concert pitch for A4 (MIDI 69).
pub const A4_FREQUENCY: f64 = 440.0;
const A4_MIDI: f64 = 69.0;

pub const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];
pub const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

const INTERVAL_NAMES: [&str; 13] = [
    "Unison",
    "Minor 2nd",
    "Major 2nd",
    "Minor 3rd",
    "Major 3rd",
    "Perfect 4th",
    "Tritone",
    "Perfect 5th",
    "Minor 6th",
    "Major 6th",
    "Minor 7th",
    "Major 7th",
    "Octave",
];

/// Letter + accidental for a pitch class. Any integer is reduced mod 12.
pub fn pitch_class_name(note: i32, use_sharps: bool) -> &'static str {
    let pc = note.rem_euclid(12) as usize;
    if use_sharps { SHARP_NAMES[pc] } else { FLAT_NAMES[pc] }
}

/// Octave number in scientific pitch notation (MIDI 60 = C4).
pub fn octave_of(note: i32) -> i32 {
    note.div_euclid(12) - 1
}

/// Format a MIDI note as `<name><octave>`, e.g. `60` → `"C4"`.
///
/// Out-of-range input is clamped into [0, 127] with a warning.
pub fn midi_to_note_name(note: i32, use_sharps: bool, diag: &dyn Diagnostics) -> String {
    let clamped = note.clamp(MIDI_MIN, MIDI_MAX);
    if clamped != note {
        diag.warn(&format!(
            "MIDI note {note} out of range, clamped to {clamped}"
        ));
    }
    format!("{}{}", pitch_class_name(clamped, use_sharps), octave_of(clamped))
}

/// Parse a note name (e.g. "C4", "F#3", "Bb5", "C-1") into a MIDI note number.
///
/// Grammar: one letter `A`–`G`, an optional `#` or `b`, then an optionally
/// negative integer octave. Returns `None` on any other shape or when the
/// result falls outside [0, 127].
pub fn note_name_to_midi(name: &str) -> Option<i32> {
    let mut chars = name.chars();
    let base_semitone = match chars.next()? {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return None,
    };

    let rest = chars.as_str();
    let (semitone, octave_str) = match rest.as_bytes().first() {
        Some(b'#') => (base_semitone + 1, &rest[1..]),
        Some(b'b') => (base_semitone - 1, &rest[1..]),
        _ => (base_semitone, rest),
    };

    let digits = octave_str.strip_prefix('-').unwrap_or(octave_str);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let octave: i32 = octave_str.parse().ok()?;

    // MIDI note number: C4 = 60
    let midi = octave.checked_add(1)?.checked_mul(12)?.checked_add(semitone)?;
    (MIDI_MIN..=MIDI_MAX).contains(&midi).then_some(midi)
}

/// `Result` flavour of [`note_name_to_midi`] for callers that propagate with `?`.
pub fn parse_note_name(name: &str) -> Result<i32, TheoryError> {
    note_name_to_midi(name).ok_or_else(|| TheoryError::InvalidNoteName(name.to_string()))
}

/// Equal-temperament frequency of a MIDI note at A4 = 440 Hz.
pub fn midi_to_frequency(note: i32) -> Option<f64> {
    midi_to_frequency_with_tuning(note, A4_FREQUENCY)
}

/// Convert a MIDI note number to frequency using the given tuning pitch.
///
/// `tuning_pitch` is the frequency of A4 (MIDI 69).
/// Formula: `tuning_pitch * 2^((midi - 69) / 12)`
pub fn midi_to_frequency_with_tuning(note: i32, tuning_pitch: f64) -> Option<f64> {
    if !(MIDI_MIN..=MIDI_MAX).contains(&note) {
        return None;
    }
    Some(tuning_pitch * 2.0_f64.powf((note as f64 - A4_MIDI) / 12.0))
}

/// Nearest MIDI note for a frequency at A4 = 440 Hz.
pub fn frequency_to_midi(frequency: f64) -> Option<i32> {
    frequency_to_midi_with_tuning(frequency, A4_FREQUENCY)
}

pub fn frequency_to_midi_with_tuning(frequency: f64, tuning_pitch: f64) -> Option<i32> {
    frequency_to_midi_cents(frequency, tuning_pitch).map(|(note, _)| note)
}

/// Convert a frequency to the nearest MIDI note + deviation in cents.
///
/// Returns `None` for non-positive (or NaN) frequencies and for results
/// outside [0, 127].
pub fn frequency_to_midi_cents(frequency: f64, tuning_pitch: f64) -> Option<(i32, f64)> {
    if !(frequency > 0.0 && tuning_pitch > 0.0) {
        return None;
    }
    let midi_float = A4_MIDI + 12.0 * (frequency / tuning_pitch).log2();
    let rounded = midi_float.round();
    if !(MIDI_MIN as f64..=MIDI_MAX as f64).contains(&rounded) {
        return None;
    }
    let cents = (midi_float - rounded) * 100.0;
    Some((rounded as i32, cents))
}

/// Values that hold one or many MIDI notes and can be mapped note-by-note
/// while keeping their shape: a scalar stays a scalar, a sequence stays a
/// sequence of the same length.
pub trait NoteShape {
    type Output;

    fn map_notes(&self, f: impl Fn(i32) -> i32) -> Self::Output;
}

impl NoteShape for i32 {
    type Output = i32;

    fn map_notes(&self, f: impl Fn(i32) -> i32) -> i32 {
        f(*self)
    }
}

impl NoteShape for [i32] {
    type Output = Vec<i32>;

    fn map_notes(&self, f: impl Fn(i32) -> i32) -> Vec<i32> {
        self.iter().map(|&n| f(n)).collect()
    }
}

impl NoteShape for Vec<i32> {
    type Output = Vec<i32>;

    fn map_notes(&self, f: impl Fn(i32) -> i32) -> Vec<i32> {
        self.as_slice().map_notes(f)
    }
}

impl<const N: usize> NoteShape for [i32; N] {
    type Output = [i32; N];

    fn map_notes(&self, f: impl Fn(i32) -> i32) -> [i32; N] {
        (*self).map(f)
    }
}

/// Shift notes by `semitones`, clamping each result into [0, 127].
pub fn transpose<T: NoteShape + ?Sized>(notes: &T, semitones: i32) -> T::Output {
    notes.map_notes(|n| n.saturating_add(semitones).clamp(MIDI_MIN, MIDI_MAX))
}

/// Clamp notes elementwise into `[min, max]`.
///
/// An inverted range never panics: `max` wins over `min`.
pub fn clamp_midi<T: NoteShape + ?Sized>(notes: &T, min: i32, max: i32) -> T::Output {
    notes.map_notes(|n| n.max(min).min(max))
}

/// Clamp notes elementwise into the full MIDI range.
pub fn clamp_to_midi_range<T: NoteShape + ?Sized>(notes: &T) -> T::Output {
    clamp_midi(notes, MIDI_MIN, MIDI_MAX)
}

/// Name of the interval spanning `semitones`.
///
/// 0..=12 are looked up directly; larger spans reduce mod 12 (compound
/// intervals are named by their simple equivalent). Negative spans are
/// `"unknown"`.
pub fn get_interval_name(semitones: i32) -> &'static str {
    match semitones {
        0..=12 => INTERVAL_NAMES[semitones as usize],
        s if s > 12 => INTERVAL_NAMES[(s % 12) as usize],
        _ => "unknown",
    }
}

/// True for A0..=C8, the keys of an 88-key piano.
pub fn is_in_piano_range(note: i32) -> bool {
    (PIANO_LOWEST..=PIANO_HIGHEST).contains(&note)
}
