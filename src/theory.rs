//! `Theory` — the string-keyed engine surface with its config and
//! diagnostics sink bound once, for callers that drive it from UI state.

use crate::chord::{self, ChordTemplate, DiatonicChord};
use crate::config::TheoryConfig;
use crate::diagnostics::{Diagnostics, LogDiagnostics};
use crate::notes;
use crate::progression::{self, ProgressionChord};
use crate::scale::{self, ScaleDefinition};

pub struct Theory<D: Diagnostics = LogDiagnostics> {
    pub config: TheoryConfig,
    diagnostics: D,
}

impl Default for Theory {
    fn default() -> Self {
        Theory::new(TheoryConfig::default(), LogDiagnostics)
    }
}

impl<D: Diagnostics> Theory<D> {
    pub fn new(config: TheoryConfig, diagnostics: D) -> Self {
        Theory { config, diagnostics }
    }

    pub fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    /// Generate `config.default_octaves` octaves of a scale.
    pub fn scale(&self, root: i32, key: &str) -> Vec<i32> {
        self.scale_octaves(root, key, self.config.default_octaves)
    }

    pub fn scale_octaves(&self, root: i32, key: &str, octaves: u32) -> Vec<i32> {
        scale::generate_scale(root, key, octaves, &self.diagnostics)
    }

    pub fn scale_info(&self, key: &str) -> &'static ScaleDefinition {
        scale::get_scale_info(key, &self.diagnostics)
    }

    pub fn scale_note_names(&self, root: i32, key: &str) -> Vec<String> {
        scale::get_scale_note_names(
            root,
            key,
            self.config.default_octaves,
            self.config.use_sharps,
            &self.diagnostics,
        )
    }

    pub fn chord(&self, root: i32, key: &str) -> Vec<i32> {
        chord::generate_chord(root, key, &self.diagnostics)
    }

    pub fn chord_info(&self, key: &str) -> &'static ChordTemplate {
        chord::get_chord_info(key, &self.diagnostics)
    }

    pub fn diatonic_chords(&self, root: i32, scale_key: &str) -> Vec<DiatonicChord> {
        chord::generate_diatonic_chords(root, scale_key, &self.diagnostics)
    }

    pub fn progression<S: AsRef<str>>(
        &self,
        root: i32,
        scale_key: &str,
        numerals: &[S],
    ) -> Vec<ProgressionChord> {
        progression::generate_progression(root, scale_key, numerals, &self.diagnostics)
    }

    pub fn progression_from_template(
        &self,
        root: i32,
        scale_key: &str,
        template_key: &str,
    ) -> Vec<ProgressionChord> {
        progression::generate_progression_from_template(
            root,
            scale_key,
            template_key,
            &self.diagnostics,
        )
    }

    pub fn note_name(&self, note: i32) -> String {
        notes::midi_to_note_name(note, self.config.use_sharps, &self.diagnostics)
    }

    /// Frequency at the configured tuning pitch.
    pub fn frequency(&self, note: i32) -> Option<f64> {
        notes::midi_to_frequency_with_tuning(note, self.config.tuning_pitch)
    }

    pub fn note_for_frequency(&self, frequency: f64) -> Option<i32> {
        notes::frequency_to_midi_with_tuning(frequency, self.config.tuning_pitch)
    }

    /// Frequencies for a set of notes, skipping any outside the MIDI range.
    pub fn frequencies(&self, chord: &[i32]) -> Vec<f64> {
        chord.iter().filter_map(|&note| self.frequency(note)).collect()
    }
}
