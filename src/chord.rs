//! Chord Engine — chord templates, diatonic harmony, inversions and voice leading.
//!
//! Chords are plain ascending `Vec<i32>` note lists. Template generation is
//! not range-clamped; typical roots keep results inside the MIDI range.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostics;
use crate::error::TheoryError;
use crate::notes::{self, MIDI_MAX, MIDI_MIN};
use crate::scale::{self, ScaleKind};

// ── Templates ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChordKind {
    Major,
    Minor,
    Diminished,
    Augmented,
    Sus2,
    Sus4,
    Major7,
    Minor7,
    Dom7,
    Dim7,
    HalfDim7,
    MinorMajor7,
    Add9,
    Major9,
    Minor9,
    Dom9,
}

/// An immutable chord shape: semitone offsets from the root.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordTemplate {
    pub key: &'static str,
    pub name: &'static str,
    pub intervals: &'static [u8],
    pub symbol: &'static str,
    pub quality: &'static str,
    pub note_count: usize,
}

macro_rules! template {
    ($key:literal, $name:literal, [$($i:literal),+], $symbol:literal, $quality:literal) => {
        ChordTemplate {
            key: $key,
            name: $name,
            intervals: &[$($i),+],
            symbol: $symbol,
            quality: $quality,
            note_count: [$($i),+].len(),
        }
    };
}

static CHORDS: [ChordTemplate; 16] = [
    template!("major", "Major", [0, 4, 7], "", "major"),
    template!("minor", "Minor", [0, 3, 7], "m", "minor"),
    template!("diminished", "Diminished", [0, 3, 6], "°", "diminished"),
    template!("augmented", "Augmented", [0, 4, 8], "+", "augmented"),
    template!("sus2", "Suspended 2nd", [0, 2, 7], "sus2", "suspended"),
    template!("sus4", "Suspended 4th", [0, 5, 7], "sus4", "suspended"),
    template!("major7", "Major 7th", [0, 4, 7, 11], "maj7", "major"),
    template!("minor7", "Minor 7th", [0, 3, 7, 10], "m7", "minor"),
    template!("dom7", "Dominant 7th", [0, 4, 7, 10], "7", "dominant"),
    template!("dim7", "Diminished 7th", [0, 3, 6, 9], "°7", "diminished"),
    template!("halfDim7", "Half-Diminished 7th", [0, 3, 6, 10], "ø7", "half-diminished"),
    template!("minorMajor7", "Minor Major 7th", [0, 3, 7, 11], "m(maj7)", "minor"),
    template!("add9", "Add 9", [0, 4, 7, 14], "add9", "major"),
    template!("major9", "Major 9th", [0, 4, 7, 11, 14], "maj9", "major"),
    template!("minor9", "Minor 9th", [0, 3, 7, 10, 14], "m9", "minor"),
    template!("dom9", "Dominant 9th", [0, 4, 7, 10, 14], "9", "dominant"),
];

impl ChordKind {
    pub const ALL: [ChordKind; 16] = [
        ChordKind::Major,
        ChordKind::Minor,
        ChordKind::Diminished,
        ChordKind::Augmented,
        ChordKind::Sus2,
        ChordKind::Sus4,
        ChordKind::Major7,
        ChordKind::Minor7,
        ChordKind::Dom7,
        ChordKind::Dim7,
        ChordKind::HalfDim7,
        ChordKind::MinorMajor7,
        ChordKind::Add9,
        ChordKind::Major9,
        ChordKind::Minor9,
        ChordKind::Dom9,
    ];

    pub fn template(self) -> &'static ChordTemplate {
        &CHORDS[self as usize]
    }

    pub fn key(self) -> &'static str {
        self.template().key
    }

    /// `intervals.map(i => root + i)`, unclamped.
    pub fn build(self, root: i32) -> Vec<i32> {
        self.template()
            .intervals
            .iter()
            .map(|&interval| root.saturating_add(interval as i32))
            .collect()
    }
}

impl FromStr for ChordKind {
    type Err = TheoryError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        ChordKind::ALL
            .into_iter()
            .find(|kind| kind.key() == key)
            .ok_or_else(|| TheoryError::UnknownChord(key.to_string()))
    }
}

impl fmt::Display for ChordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Look up a chord key, substituting major (with a warning) on a miss.
pub fn resolve_chord(key: &str, diag: &dyn Diagnostics) -> ChordKind {
    key.parse().unwrap_or_else(|e: TheoryError| {
        diag.warn(&format!("{e}, falling back to major"));
        ChordKind::Major
    })
}

pub fn generate_chord(root: i32, key: &str, diag: &dyn Diagnostics) -> Vec<i32> {
    resolve_chord(key, diag).build(root)
}

pub fn get_chord_info(key: &str, diag: &dyn Diagnostics) -> &'static ChordTemplate {
    resolve_chord(key, diag).template()
}

pub fn get_available_chords() -> Vec<&'static str> {
    ChordKind::ALL.iter().map(|kind| kind.key()).collect()
}

pub fn chord_note_names(chord: &[i32], use_sharps: bool) -> Vec<String> {
    chord
        .iter()
        .map(|&note| scale::get_note_name(note, use_sharps))
        .collect()
}

// ── Harmonic function ───────────────────────────────────────

/// The structural role a chord plays within a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HarmonicFunction {
    Tonic,
    Subdominant,
    Dominant,
    PreDominant,
    Relative,
    Diminished,
    DominantLike,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stability {
    Stable,
    Unstable,
}

impl HarmonicFunction {
    pub fn as_str(self) -> &'static str {
        match self {
            HarmonicFunction::Tonic => "tonic",
            HarmonicFunction::Subdominant => "subdominant",
            HarmonicFunction::Dominant => "dominant",
            HarmonicFunction::PreDominant => "pre-dominant",
            HarmonicFunction::Relative => "relative",
            HarmonicFunction::Diminished => "diminished",
            HarmonicFunction::DominantLike => "dominant-like",
        }
    }

    /// Descriptive only; nothing branches on it.
    pub fn stability(self) -> Stability {
        match self {
            HarmonicFunction::Tonic | HarmonicFunction::Relative | HarmonicFunction::Subdominant => {
                Stability::Stable
            }
            HarmonicFunction::Dominant
            | HarmonicFunction::PreDominant
            | HarmonicFunction::Diminished
            | HarmonicFunction::DominantLike => Stability::Unstable,
        }
    }
}

impl fmt::Display for HarmonicFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Diatonic harmony ────────────────────────────────────────

/// Triad quality of a diatonic chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChordQuality {
    Major,
    Minor,
    Diminished,
    Augmented,
}

impl ChordQuality {
    pub fn chord_kind(self) -> ChordKind {
        match self {
            ChordQuality::Major => ChordKind::Major,
            ChordQuality::Minor => ChordKind::Minor,
            ChordQuality::Diminished => ChordKind::Diminished,
            ChordQuality::Augmented => ChordKind::Augmented,
        }
    }

    pub fn as_str(self) -> &'static str {
        self.chord_kind().template().quality
    }
}

struct DiatonicTable {
    numerals: [&'static str; 7],
    qualities: [ChordQuality; 7],
    functions: [HarmonicFunction; 7],
}

use ChordQuality::{Augmented as Aug, Diminished as Dim, Major as Maj, Minor as Min};
use HarmonicFunction::*;

static MAJOR_TABLE: DiatonicTable = DiatonicTable {
    numerals: ["I", "ii", "iii", "IV", "V", "vi", "vii°"],
    qualities: [Maj, Min, Min, Maj, Maj, Min, Dim],
    functions: [Tonic, PreDominant, Relative, Subdominant, Dominant, Relative, Diminished],
};

static MINOR_NATURAL_TABLE: DiatonicTable = DiatonicTable {
    numerals: ["i", "ii°", "III", "iv", "v", "VI", "VII"],
    qualities: [Min, Dim, Maj, Min, Min, Maj, Maj],
    functions: [Tonic, PreDominant, Relative, Subdominant, DominantLike, Relative, DominantLike],
};

static MINOR_HARMONIC_TABLE: DiatonicTable = DiatonicTable {
    numerals: ["i", "ii°", "III+", "iv", "V", "VI", "vii°"],
    qualities: [Min, Dim, Aug, Min, Maj, Maj, Dim],
    functions: [Tonic, PreDominant, Relative, Subdominant, Dominant, Relative, Diminished],
};

// Only major and the two tabulated minors have their own quality table;
// every other scale reuses the major one.
fn diatonic_table(kind: ScaleKind, diag: &dyn Diagnostics) -> &'static DiatonicTable {
    match kind {
        ScaleKind::Major => &MAJOR_TABLE,
        ScaleKind::MinorNatural => &MINOR_NATURAL_TABLE,
        ScaleKind::MinorHarmonic => &MINOR_HARMONIC_TABLE,
        other => {
            diag.warn(&format!(
                "No diatonic chord table for scale '{other}', using major qualities"
            ));
            &MAJOR_TABLE
        }
    }
}

/// One of the seven triads built on a scale degree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiatonicChord {
    /// 1–7.
    pub degree: u8,
    pub roman_numeral: &'static str,
    pub root: i32,
    pub notes: Vec<i32>,
    pub quality: ChordQuality,
    pub harmonic_function: HarmonicFunction,
    /// Pitch-class name plus chord symbol, e.g. `"Dm"`, `"B°"`.
    pub name: String,
}

/// Build the seven diatonic triads of a scale.
///
/// Chord tones are degrees `d`, `d + 2`, `d + 4` of the scale's degree
/// sequence ("skip one, skip one"). Tones outside [0, 127] are dropped, but
/// every degree always yields a record.
pub fn generate_diatonic_chords(root: i32, key: &str, diag: &dyn Diagnostics) -> Vec<DiatonicChord> {
    let kind = scale::resolve_scale(key, diag);
    diatonic_chords_for(root, kind, diag)
}

pub fn diatonic_chords_for(root: i32, kind: ScaleKind, diag: &dyn Diagnostics) -> Vec<DiatonicChord> {
    let table = diatonic_table(kind, diag);
    (0..7)
        .map(|index| {
            let chord_root = kind.degree_note(root, index);
            let tones = [index, index + 2, index + 4]
                .into_iter()
                .map(|i| kind.degree_note(root, i))
                .filter(|note| (MIDI_MIN..=MIDI_MAX).contains(note))
                .collect();
            let quality = table.qualities[index];
            DiatonicChord {
                degree: index as u8 + 1,
                roman_numeral: table.numerals[index],
                root: chord_root,
                notes: tones,
                quality,
                harmonic_function: table.functions[index],
                name: format!(
                    "{}{}",
                    notes::pitch_class_name(chord_root, true),
                    quality.chord_kind().template().symbol
                ),
            }
        })
        .collect()
}

// ── Inversions & voice leading ──────────────────────────────

/// Move the lowest note up an octave `inversion` times.
///
/// Inversions past the chord length keep climbing into higher octaves.
/// Whole cycles are applied at once, so the cost does not grow with
/// `inversion`.
pub fn invert(chord: &[i32], inversion: usize) -> Vec<i32> {
    if chord.is_empty() {
        return Vec::new();
    }
    let cycles = i32::try_from(inversion / chord.len()).unwrap_or(i32::MAX);
    let octave_shift = cycles.saturating_mul(12);
    let (moved, kept) = chord.split_at(inversion % chord.len());
    kept.iter()
        .map(|&note| note.saturating_add(octave_shift))
        .chain(
            moved
                .iter()
                .map(|&note| note.saturating_add(octave_shift).saturating_add(12)),
        )
        .collect()
}

/// Sum of absolute differences between positionally paired notes, up to
/// the shorter chord's length.
pub fn voice_distance(from: &[i32], to: &[i32]) -> u32 {
    from.iter()
        .zip(to)
        .map(|(&a, &b)| a.abs_diff(b))
        .fold(0u32, u32::saturating_add)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InversionDistance {
    pub inversion: usize,
    pub distance: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceLeading {
    pub best_inversion: usize,
    pub min_distance: u32,
    pub suggested_notes: Vec<i32>,
    pub all_distances: Vec<InversionDistance>,
}

/// Find the inversion of `to` that moves least from `from`.
///
/// Ties keep the lowest inversion index.
pub fn calculate_voice_leading(from: &[i32], to: &[i32]) -> VoiceLeading {
    let mut best = VoiceLeading {
        best_inversion: 0,
        min_distance: 0,
        suggested_notes: to.to_vec(),
        all_distances: Vec::with_capacity(to.len()),
    };
    let mut min_distance = u32::MAX;

    for inversion in 0..to.len() {
        let candidate = invert(to, inversion);
        let distance = voice_distance(from, &candidate);
        best.all_distances.push(InversionDistance { inversion, distance });
        if distance < min_distance {
            min_distance = distance;
            best.best_inversion = inversion;
            best.suggested_notes = candidate;
        }
    }

    if !best.all_distances.is_empty() {
        best.min_distance = min_distance;
    }
    best
}

// ── Chord identification ────────────────────────────────────

/// A template match for a set of notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordMatch {
    /// Pitch class of the root, 0 = C.
    pub root: u8,
    pub chord_key: &'static str,
    pub symbol: &'static str,
    pub name: String,
    /// Position of the bass note within the template, 0 = root position.
    pub inversion: usize,
}

fn pitch_class_set(pcs: impl Iterator<Item = i32>) -> Vec<u8> {
    let mut set: Vec<u8> = pcs.map(|n| n.rem_euclid(12) as u8).collect();
    set.sort_unstable();
    set.dedup();
    set
}

/// Name the chord formed by `chord`, matching its pitch-class set against
/// every template. Candidate roots are tried from the lowest note upward.
pub fn identify_chord(chord: &[i32]) -> Option<ChordMatch> {
    let mut sorted = chord.to_vec();
    sorted.sort_unstable();
    let bass = *sorted.first()?;
    let target = pitch_class_set(sorted.iter().copied());

    let mut roots: Vec<i32> = Vec::new();
    for &note in &sorted {
        let pc = note.rem_euclid(12);
        if !roots.contains(&pc) {
            roots.push(pc);
        }
    }

    for root in roots {
        for kind in ChordKind::ALL {
            let template = kind.template();
            let pcs = pitch_class_set(template.intervals.iter().map(|&i| root + i as i32));
            if pcs != target {
                continue;
            }
            let bass_interval = (bass.rem_euclid(12) - root).rem_euclid(12);
            let inversion = template
                .intervals
                .iter()
                .position(|&i| i as i32 % 12 == bass_interval)
                .unwrap_or(0);
            return Some(ChordMatch {
                root: root as u8,
                chord_key: template.key,
                symbol: template.symbol,
                name: format!("{}{}", notes::pitch_class_name(root, true), template.symbol),
                inversion,
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Silent;
    use std::cell::RefCell;

    fn pitch_classes(notes: &[i32]) -> Vec<i32> {
        let mut pcs: Vec<i32> = notes.iter().map(|n| n.rem_euclid(12)).collect();
        pcs.sort_unstable();
        pcs
    }

    #[test]
    fn build_basic_chords() {
        assert_eq!(generate_chord(60, "major", &Silent), vec![60, 64, 67]);
        assert_eq!(generate_chord(60, "dom7", &Silent), vec![60, 64, 67, 70]);
        assert_eq!(generate_chord(57, "minor7", &Silent), vec![57, 60, 64, 67]);
    }

    #[test]
    fn chord_generation_is_not_clamped() {
        assert_eq!(generate_chord(120, "major9", &Silent), vec![120, 124, 127, 131, 134]);
    }

    #[test]
    fn unknown_chord_falls_back_to_major() {
        let seen = RefCell::new(Vec::new());
        let sink = |msg: &str| seen.borrow_mut().push(msg.to_string());
        assert_eq!(generate_chord(62, "mystery", &sink), vec![62, 66, 69]);
        assert_eq!(seen.borrow().len(), 1);
        assert!(seen.borrow()[0].contains("mystery"));
    }

    #[test]
    fn template_metadata() {
        let info = get_chord_info("halfDim7", &Silent);
        assert_eq!(info.symbol, "ø7");
        assert_eq!(info.note_count, 4);
        for kind in ChordKind::ALL {
            let t = kind.template();
            assert_eq!(t.note_count, t.intervals.len(), "{}", t.key);
            assert_eq!(t.intervals[0], 0, "{}", t.key);
            assert_eq!(t.key.parse::<ChordKind>(), Ok(kind));
        }
        let keys = get_available_chords();
        assert_eq!(keys.len(), 16);
        assert_eq!(keys[0], "major");
        assert!(keys.contains(&"dom7"));
    }

    #[test]
    fn invert_triad() {
        assert_eq!(invert(&[60, 64, 67], 0), vec![60, 64, 67]);
        assert_eq!(invert(&[60, 64, 67], 1), vec![64, 67, 72]);
        assert_eq!(invert(&[60, 64, 67], 2), vec![67, 72, 76]);
        // Past the chord length the cycle continues an octave up.
        assert_eq!(invert(&[60, 64, 67], 3), vec![72, 76, 79]);
        assert!(invert(&[], 4).is_empty());
        assert_eq!(invert(&[60, 64, 67], 7), vec![88, 91, 96]);
    }

    #[test]
    fn inversion_preserves_pitch_classes() {
        for kind in ChordKind::ALL {
            let chord = kind.build(48);
            for k in 0..8 {
                let inverted = invert(&chord, k);
                assert_eq!(inverted.len(), chord.len());
                assert_eq!(pitch_classes(&inverted), pitch_classes(&chord), "{kind} inv {k}");
            }
        }
    }

    #[test]
    fn voice_leading_identity_is_zero() {
        for kind in ChordKind::ALL {
            let chord = kind.build(55);
            let vl = calculate_voice_leading(&chord, &chord);
            assert_eq!(vl.min_distance, 0);
            assert_eq!(vl.best_inversion, 0);
            assert_eq!(vl.suggested_notes, chord);
        }
    }

    #[test]
    fn voice_leading_picks_closest_inversion() {
        let g = [67, 71, 74];
        let c = [60, 64, 67];
        let vl = calculate_voice_leading(&g, &c);
        assert_eq!(vl.best_inversion, 2);
        assert_eq!(vl.min_distance, 3);
        assert_eq!(vl.suggested_notes, vec![67, 72, 76]);
        assert_eq!(
            vl.all_distances.iter().map(|d| d.distance).collect::<Vec<_>>(),
            vec![21, 9, 3]
        );
    }

    #[test]
    fn voice_leading_ties_keep_first() {
        let vl = calculate_voice_leading(&[66, 72], &[60, 72]);
        assert_eq!(vl.all_distances[0].distance, vl.all_distances[1].distance);
        assert_eq!(vl.best_inversion, 0);
    }

    #[test]
    fn voice_leading_compares_up_to_shorter_chord() {
        assert_eq!(voice_distance(&[60, 64], &[61, 65, 90]), 2);
        let vl = calculate_voice_leading(&[60, 64, 67], &[]);
        assert_eq!(vl.min_distance, 0);
        assert!(vl.all_distances.is_empty());
    }

    #[test]
    fn extreme_inputs_do_not_overflow() {
        assert_eq!(generate_chord(i32::MAX, "dom9", &Silent), vec![i32::MAX; 5]);
        let inverted = invert(&[60, 64, 67], usize::MAX);
        assert_eq!(inverted.len(), 3);
        assert!(inverted.iter().all(|&n| n == i32::MAX));
        assert_eq!(invert(&[i32::MAX - 1], 1), vec![i32::MAX]);
        assert_eq!(voice_distance(&[i32::MIN, i32::MIN], &[i32::MAX, i32::MAX]), u32::MAX);
        let m = identify_chord(&[i32::MIN, i32::MIN + 4, i32::MIN + 7]).unwrap();
        assert_eq!(m.chord_key, "major");
        assert_eq!(generate_diatonic_chords(i32::MAX, "majorPentatonic", &Silent).len(), 7);
    }

    #[test]
    fn c_major_diatonic_chords() {
        let chords = generate_diatonic_chords(60, "major", &Silent);
        assert_eq!(chords.len(), 7);
        let numerals: Vec<_> = chords.iter().map(|c| c.roman_numeral).collect();
        assert_eq!(numerals, ["I", "ii", "iii", "IV", "V", "vi", "vii°"]);
        assert_eq!(chords[0].notes, vec![60, 64, 67]);
        assert_eq!(chords[1].notes, vec![62, 65, 69]);
        assert_eq!(chords[4].notes, vec![67, 71, 74]);
        assert_eq!(chords[6].notes, vec![71, 74, 77]);
        assert_eq!(chords[1].name, "Dm");
        assert_eq!(chords[6].name, "B°");
        assert_eq!(chords[4].harmonic_function, HarmonicFunction::Dominant);
        assert_eq!(chords[4].degree, 5);
    }

    #[test]
    fn harmonic_minor_diatonic_chords() {
        let chords = generate_diatonic_chords(57, "minorHarmonic", &Silent);
        assert_eq!(chords[2].roman_numeral, "III+");
        assert_eq!(chords[2].notes, vec![60, 64, 68]);
        assert_eq!(chords[4].roman_numeral, "V");
        assert_eq!(chords[4].notes, vec![64, 68, 71]);
        assert_eq!(chords[6].quality, ChordQuality::Diminished);
    }

    #[test]
    fn diatonic_chords_match_their_quality() {
        for kind in [ScaleKind::Major, ScaleKind::MinorNatural, ScaleKind::MinorHarmonic] {
            for chord in diatonic_chords_for(48, kind, &Silent) {
                let expected = chord.quality.chord_kind().build(chord.root);
                assert_eq!(chord.notes, expected, "{kind} {}", chord.roman_numeral);
            }
        }
    }

    #[test]
    fn always_seven_diatonic_chords() {
        for key in scale::get_available_scales() {
            for root in 0..=127 {
                assert_eq!(generate_diatonic_chords(root, key, &Silent).len(), 7);
            }
        }
    }

    #[test]
    fn untabulated_scales_reuse_major_table_with_warning() {
        let seen = RefCell::new(Vec::new());
        let sink = |msg: &str| seen.borrow_mut().push(msg.to_string());
        let chords = generate_diatonic_chords(62, "dorian", &sink);
        assert_eq!(chords[0].roman_numeral, "I");
        assert_eq!(chords[0].notes, vec![62, 65, 69]);
        assert_eq!(seen.borrow().len(), 1);

        // Pentatonic degrees continue into a third octave.
        let chords = generate_diatonic_chords(60, "majorPentatonic", &Silent);
        assert_eq!(chords[6].notes, vec![74, 79, 84]);
    }

    #[test]
    fn diatonic_notes_outside_range_are_dropped() {
        let chords = generate_diatonic_chords(120, "major", &Silent);
        assert_eq!(chords.len(), 7);
        assert_eq!(chords[0].notes, vec![120, 124, 127]);
        assert!(chords[6].notes.is_empty());
    }

    #[test]
    fn out_of_range_root_keeps_degree_positions() {
        // Degrees stay anchored to the root: chord tones are not shifted onto
        // the next in-range scale notes when the root itself is dropped.
        let chords = generate_diatonic_chords(-3, "major", &Silent);
        assert_eq!(chords.len(), 7);
        assert_eq!(chords[0].root, -3);
        assert_eq!(chords[0].notes, vec![1, 4]);
        assert_eq!(chords[0].name, "A");
        assert_eq!(chords[1].notes, vec![2, 6]);
        assert_eq!(chords[2].notes, vec![1, 4, 8]);
    }

    #[test]
    fn function_stability() {
        assert_eq!(HarmonicFunction::Tonic.stability(), Stability::Stable);
        assert_eq!(HarmonicFunction::Dominant.stability(), Stability::Unstable);
        assert_eq!(HarmonicFunction::DominantLike.as_str(), "dominant-like");
    }

    #[test]
    fn identify_common_chords() {
        let m = identify_chord(&[60, 64, 67]).unwrap();
        assert_eq!((m.chord_key, m.name.as_str(), m.inversion), ("major", "C", 0));

        let m = identify_chord(&[64, 67, 72]).unwrap();
        assert_eq!((m.chord_key, m.root, m.inversion), ("major", 0, 1));

        let m = identify_chord(&[67, 71, 74, 77]).unwrap();
        assert_eq!(m.name, "G7");

        let m = identify_chord(&[57, 60, 64]).unwrap();
        assert_eq!(m.name, "Am");

        assert_eq!(identify_chord(&[60, 61, 62]), None);
        assert_eq!(identify_chord(&[]), None);
    }

    #[test]
    fn note_names_for_chords() {
        assert_eq!(chord_note_names(&[60, 63, 67], false), vec!["C4", "Eb4", "G4"]);
    }
}
