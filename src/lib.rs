pub mod chord;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod notes;
pub mod progression;
pub mod scale;
pub mod theory;

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::diagnostics::ConsoleDiagnostics;

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// WASM-exposed: return the songwalker-theory version string.
#[wasm_bindgen(js_name = coreVersion)]
pub fn core_version() -> String {
    VERSION.to_string()
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&format!("{e}")))
}

fn from_js<T: for<'de> Deserialize<'de>>(value: JsValue) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&format!("{e}")))
}

// ── Scales & chords ─────────────────────────────────────────

/// WASM-exposed: scale notes from a root. `octave_count` defaults to 2.
#[wasm_bindgen(js_name = generateScale)]
pub fn generate_scale(root_note: i32, scale_key: &str, octave_count: Option<u32>) -> Vec<i32> {
    scale::generate_scale(root_note, scale_key, octave_count.unwrap_or(2), &ConsoleDiagnostics)
}

#[wasm_bindgen(js_name = getScaleInfo)]
pub fn get_scale_info(scale_key: &str) -> Result<JsValue, JsValue> {
    to_js(scale::get_scale_info(scale_key, &ConsoleDiagnostics))
}

#[wasm_bindgen(js_name = getAvailableScales)]
pub fn get_available_scales() -> Vec<String> {
    scale::get_available_scales().into_iter().map(String::from).collect()
}

#[wasm_bindgen(js_name = generateChord)]
pub fn generate_chord(root_note: i32, chord_key: Option<String>) -> Vec<i32> {
    let key = chord_key.as_deref().unwrap_or("major");
    chord::generate_chord(root_note, key, &ConsoleDiagnostics)
}

#[wasm_bindgen(js_name = getChordInfo)]
pub fn get_chord_info(chord_key: &str) -> Result<JsValue, JsValue> {
    to_js(chord::get_chord_info(chord_key, &ConsoleDiagnostics))
}

#[wasm_bindgen(js_name = getAvailableChords)]
pub fn get_available_chords() -> Vec<String> {
    chord::get_available_chords().into_iter().map(String::from).collect()
}

#[wasm_bindgen(js_name = generateDiatonicChords)]
pub fn generate_diatonic_chords(root_note: i32, scale_key: Option<String>) -> Result<JsValue, JsValue> {
    let key = scale_key.as_deref().unwrap_or("major");
    to_js(&chord::generate_diatonic_chords(root_note, key, &ConsoleDiagnostics))
}

#[wasm_bindgen(js_name = invertChord)]
pub fn invert_chord(chord_notes: Vec<i32>, inversion: usize) -> Vec<i32> {
    chord::invert(&chord_notes, inversion)
}

#[wasm_bindgen(js_name = calculateVoiceLeading)]
pub fn calculate_voice_leading(from_chord: Vec<i32>, to_chord: Vec<i32>) -> Result<JsValue, JsValue> {
    to_js(&chord::calculate_voice_leading(&from_chord, &to_chord))
}

#[wasm_bindgen(js_name = identifyChord)]
pub fn identify_chord(chord_notes: Vec<i32>) -> Result<JsValue, JsValue> {
    to_js(&chord::identify_chord(&chord_notes))
}

// ── Progressions ────────────────────────────────────────────

/// WASM-exposed: `roman_numerals` is a JS array of strings.
#[wasm_bindgen(js_name = generateProgression)]
pub fn generate_progression(
    root_note: i32,
    scale_key: &str,
    roman_numerals: JsValue,
) -> Result<JsValue, JsValue> {
    let numerals: Vec<String> = from_js(roman_numerals)?;
    to_js(&progression::generate_progression(
        root_note,
        scale_key,
        &numerals,
        &ConsoleDiagnostics,
    ))
}

#[wasm_bindgen(js_name = generateProgressionFromTemplate)]
pub fn generate_progression_from_template(
    root_note: i32,
    scale_key: &str,
    template_key: &str,
) -> Result<JsValue, JsValue> {
    to_js(&progression::generate_progression_from_template(
        root_note,
        scale_key,
        template_key,
        &ConsoleDiagnostics,
    ))
}

/// WASM-exposed: accepts any array of chords that carry a `notes` array,
/// or an array of plain note arrays.
#[wasm_bindgen(js_name = analyzeVoiceLeading)]
pub fn analyze_voice_leading(chords: JsValue) -> Result<JsValue, JsValue> {
    let chords: Vec<ChordArg> = from_js(chords)?;
    to_js(&progression::analyze_voice_leading(&chords))
}

#[wasm_bindgen(js_name = analyzeChordFunction)]
pub fn analyze_chord_function(roman_numeral: &str, scale_key: Option<String>) -> Result<JsValue, JsValue> {
    let key = scale_key.as_deref().unwrap_or("major");
    to_js(&progression::analyze_chord_function(roman_numeral, key))
}

#[wasm_bindgen(js_name = getProgressionTemplate)]
pub fn get_progression_template(template_key: &str) -> Result<JsValue, JsValue> {
    to_js(&progression::get_progression_template(template_key))
}

#[wasm_bindgen(js_name = getAvailableProgressions)]
pub fn get_available_progressions() -> Vec<String> {
    progression::get_available_progressions()
        .into_iter()
        .map(String::from)
        .collect()
}

#[wasm_bindgen(js_name = getProgressionsByGenre)]
pub fn get_progressions_by_genre(genre: &str) -> Result<JsValue, JsValue> {
    to_js(&progression::get_progressions_by_genre(genre))
}

// ── Notes ───────────────────────────────────────────────────

#[wasm_bindgen(js_name = midiToNoteName)]
pub fn midi_to_note_name(note: i32, use_sharps: Option<bool>) -> String {
    notes::midi_to_note_name(note, use_sharps.unwrap_or(true), &ConsoleDiagnostics)
}

#[wasm_bindgen(js_name = noteNameToMidi)]
pub fn note_name_to_midi(name: &str) -> Option<i32> {
    notes::note_name_to_midi(name)
}

#[wasm_bindgen(js_name = midiToFrequency)]
pub fn midi_to_frequency(note: i32) -> Option<f64> {
    notes::midi_to_frequency(note)
}

#[wasm_bindgen(js_name = frequencyToMidi)]
pub fn frequency_to_midi(frequency: f64) -> Option<i32> {
    notes::frequency_to_midi(frequency)
}

#[wasm_bindgen(js_name = getIntervalName)]
pub fn get_interval_name(semitones: i32) -> String {
    notes::get_interval_name(semitones).to_string()
}

#[wasm_bindgen(js_name = isInPianoRange)]
pub fn is_in_piano_range(note: i32) -> bool {
    notes::is_in_piano_range(note)
}

/// A JS number or array of numbers; the shape is preserved on the way out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NotesArg {
    One(i32),
    Many(Vec<i32>),
}

impl NotesArg {
    pub fn transpose(&self, semitones: i32) -> NotesArg {
        match self {
            NotesArg::One(note) => NotesArg::One(notes::transpose(note, semitones)),
            NotesArg::Many(many) => NotesArg::Many(notes::transpose(many, semitones)),
        }
    }

    pub fn clamp(&self, min: i32, max: i32) -> NotesArg {
        match self {
            NotesArg::One(note) => NotesArg::One(notes::clamp_midi(note, min, max)),
            NotesArg::Many(many) => NotesArg::Many(notes::clamp_midi(many, min, max)),
        }
    }
}

/// A chord as received from JS: either a bare note array or any object
/// with a `notes` array (diatonic or progression chord records).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum ChordArg {
    Notes(Vec<i32>),
    Record { notes: Vec<i32> },
}

impl AsRef<[i32]> for ChordArg {
    fn as_ref(&self) -> &[i32] {
        match self {
            ChordArg::Notes(notes) | ChordArg::Record { notes } => notes,
        }
    }
}

#[wasm_bindgen(js_name = transpose)]
pub fn transpose(value: JsValue, semitones: i32) -> Result<JsValue, JsValue> {
    let arg: NotesArg = from_js(value)?;
    to_js(&arg.transpose(semitones))
}

#[wasm_bindgen(js_name = clampMidi)]
pub fn clamp_midi(value: JsValue, min: Option<i32>, max: Option<i32>) -> Result<JsValue, JsValue> {
    let arg: NotesArg = from_js(value)?;
    to_js(&arg.clamp(min.unwrap_or(notes::MIDI_MIN), max.unwrap_or(notes::MIDI_MAX)))
}
