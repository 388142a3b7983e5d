//! Progression Engine — Roman-numeral templates, harmonic-function analysis,
//! voice-led progression generation and voice-leading quality scoring.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::chord::{
    self, ChordQuality, DiatonicChord, HarmonicFunction, Stability, calculate_voice_leading,
    voice_distance,
};
use crate::diagnostics::Diagnostics;
use crate::error::TheoryError;
use crate::scale;

// ── Templates ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProgressionKind {
    Pop,
    Doowop,
    JazzIiVI,
    Blues12Bar,
    Canon,
    Sensitive,
    RoyalRoad,
    CircleOfFifths,
    Andalusian,
    EpicMinor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionTemplate {
    pub key: &'static str,
    pub name: &'static str,
    pub roman_numerals: &'static [&'static str],
    pub description: &'static str,
    /// One genre or a comma-joined list, e.g. `"jazz, standards"`.
    pub genre: &'static str,
    pub feel: &'static str,
    pub difficulty: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeatable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bars: Option<u32>,
}

static PROGRESSIONS: [ProgressionTemplate; 10] = [
    ProgressionTemplate {
        key: "pop",
        name: "Pop Anthem",
        roman_numerals: &["I", "V", "vi", "IV"],
        description: "The four-chord song behind countless hits",
        genre: "pop, rock",
        feel: "uplifting",
        difficulty: "beginner",
        repeatable: Some(true),
        bars: Some(4),
    },
    ProgressionTemplate {
        key: "doowop",
        name: "50s Doo-Wop",
        roman_numerals: &["I", "vi", "IV", "V"],
        description: "Classic 1950s ballad changes",
        genre: "doo-wop, oldies",
        feel: "nostalgic",
        difficulty: "beginner",
        repeatable: Some(true),
        bars: Some(4),
    },
    ProgressionTemplate {
        key: "jazzIiVI",
        name: "Jazz ii-V-I",
        roman_numerals: &["ii", "V", "I"],
        description: "The fundamental jazz cadence",
        genre: "jazz, standards",
        feel: "sophisticated",
        difficulty: "intermediate",
        repeatable: None,
        bars: None,
    },
    ProgressionTemplate {
        key: "blues12Bar",
        name: "12-Bar Blues",
        roman_numerals: &["I", "I", "I", "I", "IV", "IV", "I", "I", "V", "IV", "I", "V"],
        description: "The standard twelve-bar blues form with turnaround",
        genre: "blues, rock",
        feel: "gritty",
        difficulty: "beginner",
        repeatable: Some(true),
        bars: Some(12),
    },
    ProgressionTemplate {
        key: "canon",
        name: "Pachelbel's Canon",
        roman_numerals: &["I", "V", "vi", "iii", "IV", "I", "IV", "V"],
        description: "Descending bass line progression from the Canon in D",
        genre: "classical, pop",
        feel: "majestic",
        difficulty: "intermediate",
        repeatable: Some(true),
        bars: Some(8),
    },
    ProgressionTemplate {
        key: "sensitive",
        name: "Sensitive",
        roman_numerals: &["vi", "IV", "I", "V"],
        description: "The pop progression started from the relative minor",
        genre: "pop, ballad",
        feel: "emotional",
        difficulty: "beginner",
        repeatable: Some(true),
        bars: Some(4),
    },
    ProgressionTemplate {
        key: "royalRoad",
        name: "Royal Road",
        roman_numerals: &["IV", "V", "iii", "vi"],
        description: "Bittersweet changes common in J-pop",
        genre: "j-pop, anime",
        feel: "bittersweet",
        difficulty: "intermediate",
        repeatable: Some(true),
        bars: Some(4),
    },
    ProgressionTemplate {
        key: "circleOfFifths",
        name: "Circle of Fifths",
        roman_numerals: &["vi", "ii", "V", "I"],
        description: "Root motion by descending fifths back to the tonic",
        genre: "jazz, classical",
        feel: "resolving",
        difficulty: "intermediate",
        repeatable: None,
        bars: None,
    },
    ProgressionTemplate {
        key: "andalusian",
        name: "Andalusian Cadence",
        roman_numerals: &["i", "VII", "VI", "v"],
        description: "Descending minor tetrachord; use with natural minor",
        genre: "flamenco, rock",
        feel: "dramatic",
        difficulty: "intermediate",
        repeatable: Some(true),
        bars: Some(4),
    },
    ProgressionTemplate {
        key: "epicMinor",
        name: "Epic Minor",
        roman_numerals: &["i", "VI", "III", "VII"],
        description: "Soaring minor-key loop for film and rock",
        genre: "cinematic, rock",
        feel: "epic",
        difficulty: "beginner",
        repeatable: Some(true),
        bars: Some(4),
    },
];

impl ProgressionKind {
    pub const ALL: [ProgressionKind; 10] = [
        ProgressionKind::Pop,
        ProgressionKind::Doowop,
        ProgressionKind::JazzIiVI,
        ProgressionKind::Blues12Bar,
        ProgressionKind::Canon,
        ProgressionKind::Sensitive,
        ProgressionKind::RoyalRoad,
        ProgressionKind::CircleOfFifths,
        ProgressionKind::Andalusian,
        ProgressionKind::EpicMinor,
    ];

    pub fn template(self) -> &'static ProgressionTemplate {
        &PROGRESSIONS[self as usize]
    }

    pub fn key(self) -> &'static str {
        self.template().key
    }
}

impl FromStr for ProgressionKind {
    type Err = TheoryError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        ProgressionKind::ALL
            .into_iter()
            .find(|kind| kind.key() == key)
            .ok_or_else(|| TheoryError::UnknownProgression(key.to_string()))
    }
}

impl fmt::Display for ProgressionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Template lookup. `None` for unknown keys; there is no sensible default.
pub fn get_progression_template(key: &str) -> Option<&'static ProgressionTemplate> {
    key.parse::<ProgressionKind>().ok().map(ProgressionKind::template)
}

pub fn get_available_progressions() -> Vec<&'static str> {
    ProgressionKind::ALL.iter().map(|kind| kind.key()).collect()
}

/// Templates whose genre list contains `genre`, case-insensitively.
pub fn get_progressions_by_genre(genre: &str) -> Vec<&'static ProgressionTemplate> {
    let needle = genre.to_lowercase();
    PROGRESSIONS
        .iter()
        .filter(|template| template.genre.to_lowercase().contains(&needle))
        .collect()
}

// ── Function analysis ───────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionAnalysis {
    /// A [`HarmonicFunction`] name, or `"unknown"`.
    pub primary: &'static str,
    pub secondary: Vec<&'static str>,
    pub qualities: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stability: Option<Stability>,
}

struct FunctionEntry {
    numeral: &'static str,
    primary: HarmonicFunction,
    secondary: &'static [HarmonicFunction],
    qualities: &'static [ChordQuality],
}

use ChordQuality::{Diminished as Dim, Major as Maj, Minor as Min};
use HarmonicFunction::*;

static FUNCTIONS: [FunctionEntry; 14] = [
    FunctionEntry { numeral: "I", primary: Tonic, secondary: &[], qualities: &[Maj] },
    FunctionEntry { numeral: "i", primary: Tonic, secondary: &[], qualities: &[Min] },
    FunctionEntry { numeral: "ii", primary: PreDominant, secondary: &[Subdominant], qualities: &[Min] },
    FunctionEntry {
        numeral: "ii°",
        primary: PreDominant,
        secondary: &[Subdominant, Diminished],
        qualities: &[Dim],
    },
    FunctionEntry { numeral: "iii", primary: Relative, secondary: &[Tonic, Dominant], qualities: &[Min] },
    FunctionEntry { numeral: "III", primary: Relative, secondary: &[Tonic], qualities: &[Maj] },
    FunctionEntry { numeral: "IV", primary: Subdominant, secondary: &[PreDominant], qualities: &[Maj] },
    FunctionEntry { numeral: "iv", primary: Subdominant, secondary: &[PreDominant], qualities: &[Min] },
    FunctionEntry { numeral: "V", primary: Dominant, secondary: &[], qualities: &[Maj] },
    FunctionEntry { numeral: "v", primary: DominantLike, secondary: &[Dominant], qualities: &[Min] },
    FunctionEntry { numeral: "VI", primary: Relative, secondary: &[Subdominant], qualities: &[Maj] },
    FunctionEntry {
        numeral: "vi",
        primary: Relative,
        secondary: &[Tonic, Subdominant],
        qualities: &[Min],
    },
    FunctionEntry { numeral: "VII", primary: DominantLike, secondary: &[Subdominant], qualities: &[Maj] },
    FunctionEntry {
        numeral: "vii°",
        primary: Diminished,
        secondary: &[Dominant, DominantLike],
        qualities: &[Dim],
    },
];

/// Classify a Roman numeral by exact string match.
///
/// `_scale_key` is accepted for call-site symmetry but not consulted: one
/// table serves every scale.
pub fn analyze_chord_function(numeral: &str, _scale_key: &str) -> FunctionAnalysis {
    match FUNCTIONS.iter().find(|entry| entry.numeral == numeral) {
        Some(entry) => FunctionAnalysis {
            primary: entry.primary.as_str(),
            secondary: entry.secondary.iter().map(|f| f.as_str()).collect(),
            qualities: entry.qualities.iter().map(|q| q.as_str()).collect(),
            stability: Some(entry.primary.stability()),
        },
        None => FunctionAnalysis {
            primary: "unknown",
            secondary: Vec::new(),
            qualities: Vec::new(),
            stability: None,
        },
    }
}

// ── Generation ──────────────────────────────────────────────

/// A diatonic chord placed in a progression, voiced relative to the chord
/// before it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionChord {
    /// `notes` holds the voiced (possibly inverted) notes.
    #[serde(flatten)]
    pub chord: DiatonicChord,
    pub voice_leading_inversion: usize,
    /// Absent for the first chord.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_leading_distance: Option<u32>,
}

impl ProgressionChord {
    pub fn notes(&self) -> &[i32] {
        &self.chord.notes
    }
}

impl AsRef<[i32]> for ProgressionChord {
    fn as_ref(&self) -> &[i32] {
        self.notes()
    }
}

impl AsRef<[i32]> for DiatonicChord {
    fn as_ref(&self) -> &[i32] {
        &self.notes
    }
}

/// Chain diatonic chords by Roman numeral, voicing each against the previous
/// output chord. Numerals with no diatonic match are skipped with a warning.
pub fn generate_progression<S: AsRef<str>>(
    root: i32,
    scale_key: &str,
    numerals: &[S],
    diag: &dyn Diagnostics,
) -> Vec<ProgressionChord> {
    let kind = scale::resolve_scale(scale_key, diag);
    let diatonic = chord::diatonic_chords_for(root, kind, diag);
    let mut progression: Vec<ProgressionChord> = Vec::with_capacity(numerals.len());

    for numeral in numerals {
        let numeral = numeral.as_ref();
        let Some(found) = diatonic.iter().find(|c| c.roman_numeral == numeral) else {
            diag.warn(&format!(
                "Roman numeral '{numeral}' not found in {kind} diatonic chords, skipping"
            ));
            continue;
        };

        let mut chord = found.clone();
        let (inversion, distance) = match progression.last() {
            None => (0, None),
            Some(previous) => {
                let vl = calculate_voice_leading(previous.notes(), &chord.notes);
                chord.notes = vl.suggested_notes;
                (vl.best_inversion, Some(vl.min_distance))
            }
        };
        progression.push(ProgressionChord {
            chord,
            voice_leading_inversion: inversion,
            voice_leading_distance: distance,
        });
    }
    progression
}

/// Generate a named template. Unknown template keys fall back to `"pop"`.
pub fn generate_progression_from_template(
    root: i32,
    scale_key: &str,
    template_key: &str,
    diag: &dyn Diagnostics,
) -> Vec<ProgressionChord> {
    let kind = template_key.parse().unwrap_or_else(|e: TheoryError| {
        diag.warn(&format!("{e}, falling back to pop"));
        ProgressionKind::Pop
    });
    generate_progression(root, scale_key, kind.template().roman_numerals, diag)
}

// ── Voice-leading analysis ──────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceLeadingQuality {
    Excellent,
    Good,
    Fair,
}

impl VoiceLeadingQuality {
    pub fn from_average(average: f64) -> Self {
        if average < 5.0 {
            VoiceLeadingQuality::Excellent
        } else if average < 10.0 {
            VoiceLeadingQuality::Good
        } else {
            VoiceLeadingQuality::Fair
        }
    }
}

const INVERSION_SUGGESTION: &str =
    "Consider using inversions to reduce movement between consecutive chords";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceLeadingAnalysis {
    pub total_distance: u32,
    pub average_distance: f64,
    pub quality: VoiceLeadingQuality,
    pub distances: Vec<u32>,
    pub suggestions: Vec<&'static str>,
}

/// Score the stored voicings of a progression pair by pair.
pub fn analyze_voice_leading<C: AsRef<[i32]>>(progression: &[C]) -> VoiceLeadingAnalysis {
    let distances: Vec<u32> = progression
        .windows(2)
        .map(|pair| voice_distance(pair[0].as_ref(), pair[1].as_ref()))
        .collect();
    let total_distance = distances.iter().copied().fold(0u32, u32::saturating_add);
    let average_distance = if distances.is_empty() {
        0.0
    } else {
        total_distance as f64 / distances.len() as f64
    };
    let quality = VoiceLeadingQuality::from_average(average_distance);
    let suggestions = if quality == VoiceLeadingQuality::Excellent {
        Vec::new()
    } else {
        vec![INVERSION_SUGGESTION]
    };

    VoiceLeadingAnalysis {
        total_distance,
        average_distance,
        quality,
        distances,
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Silent;
    use std::cell::RefCell;

    #[test]
    fn one_four_five_one() {
        let progression = generate_progression(60, "major", &["I", "IV", "V", "I"], &Silent);
        assert_eq!(progression.len(), 4);

        assert_eq!(progression[0].notes(), [60, 64, 67]);
        assert_eq!(progression[0].voice_leading_inversion, 0);
        assert_eq!(progression[0].voice_leading_distance, None);

        assert_eq!(progression[1].notes(), [65, 69, 72]);
        assert_eq!(progression[1].voice_leading_distance, Some(15));
        assert_eq!(progression[2].voice_leading_distance, Some(6));
        assert_eq!(progression[3].voice_leading_inversion, 2);
        assert_eq!(progression[3].notes(), [67, 72, 76]);
        assert_eq!(progression[3].voice_leading_distance, Some(3));

        let analysis = analyze_voice_leading(&progression);
        assert_eq!(analysis.distances, vec![15, 6, 3]);
        assert_eq!(analysis.total_distance, 24);
        assert!((analysis.average_distance - 8.0).abs() < 1e-9);
        assert_eq!(analysis.quality, VoiceLeadingQuality::Good);
        assert_eq!(analysis.suggestions.len(), 1);
    }

    #[test]
    fn voice_leading_chains_from_adjusted_notes() {
        let progression = generate_progression(60, "major", &["V", "I", "V"], &Silent);
        // I is voiced as [67, 72, 76]; V then sits 3 semitones away from that
        // voicing rather than 21 away from root-position I.
        assert_eq!(progression[1].notes(), [67, 72, 76]);
        assert_eq!(progression[2].voice_leading_distance, Some(3));
        assert_eq!(progression[2].notes(), [67, 71, 74]);
    }

    #[test]
    fn unmatched_numerals_are_skipped_with_warning() {
        let seen = RefCell::new(Vec::new());
        let sink = |msg: &str| seen.borrow_mut().push(msg.to_string());
        let progression = generate_progression(60, "major", &["I", "II", "vii", "V"], &sink);
        assert_eq!(progression.len(), 2);
        assert_eq!(progression[1].chord.roman_numeral, "V");
        assert_eq!(progression[1].voice_leading_distance, Some(21));
        assert_eq!(seen.borrow().len(), 2);
        assert!(seen.borrow()[0].contains("'II'"));
    }

    #[test]
    fn numerals_match_exactly() {
        let progression = generate_progression(57, "minorHarmonic", &["i", "vii°", "vii", "V"], &Silent);
        let numerals: Vec<_> = progression.iter().map(|c| c.chord.roman_numeral).collect();
        assert_eq!(numerals, ["i", "vii°", "V"]);
    }

    #[test]
    fn accepts_owned_numerals() {
        let numerals: Vec<String> = vec!["ii".into(), "V".into(), "I".into()];
        assert_eq!(generate_progression(62, "major", &numerals, &Silent).len(), 3);
    }

    #[test]
    fn empty_and_single_chord_analysis() {
        let empty: Vec<Vec<i32>> = Vec::new();
        let analysis = analyze_voice_leading(&empty);
        assert_eq!(analysis.total_distance, 0);
        assert_eq!(analysis.quality, VoiceLeadingQuality::Excellent);
        assert!(analysis.suggestions.is_empty());

        let single = generate_progression(60, "major", &["I"], &Silent);
        assert!(analyze_voice_leading(&single).distances.is_empty());
    }

    #[test]
    fn quality_thresholds() {
        assert_eq!(VoiceLeadingQuality::from_average(4.9), VoiceLeadingQuality::Excellent);
        assert_eq!(VoiceLeadingQuality::from_average(5.0), VoiceLeadingQuality::Good);
        assert_eq!(VoiceLeadingQuality::from_average(9.99), VoiceLeadingQuality::Good);
        assert_eq!(VoiceLeadingQuality::from_average(10.0), VoiceLeadingQuality::Fair);

        let smooth = analyze_voice_leading(&[vec![60, 64, 67], vec![60, 65, 69]]);
        assert_eq!(smooth.quality, VoiceLeadingQuality::Excellent);
        let jumpy = analyze_voice_leading(&[vec![60, 64, 67], vec![72, 76, 79]]);
        assert_eq!(jumpy.quality, VoiceLeadingQuality::Fair);
        assert_eq!(jumpy.suggestions, vec![INVERSION_SUGGESTION]);
    }

    #[test]
    fn chord_function_lookup() {
        let v = analyze_chord_function("V", "major");
        assert_eq!(v.primary, "dominant");
        assert_eq!(v.qualities, vec!["major"]);
        assert_eq!(v.stability, Some(Stability::Unstable));

        let vii = analyze_chord_function("vii°", "major");
        assert_eq!(vii.primary, "diminished");
        assert_eq!(vii.secondary, vec!["dominant", "dominant-like"]);

        let unknown = analyze_chord_function("bVII", "major");
        assert_eq!(unknown.primary, "unknown");
        assert!(unknown.secondary.is_empty());
        assert!(unknown.qualities.is_empty());
    }

    #[test]
    fn chord_function_ignores_scale() {
        for scale in scale::get_available_scales() {
            assert_eq!(analyze_chord_function("iv", scale), analyze_chord_function("iv", "major"));
        }
    }

    #[test]
    fn every_tabulated_numeral_is_classified() {
        for numeral in ["I", "i", "ii", "ii°", "iii", "III", "IV", "iv", "V", "v", "VI", "vi", "VII", "vii°"] {
            assert_ne!(analyze_chord_function(numeral, "major").primary, "unknown", "{numeral}");
        }
    }

    #[test]
    fn template_lookup_and_listing() {
        let keys = get_available_progressions();
        assert_eq!(keys.len(), 10);
        assert_eq!(keys[0], "pop");
        for key in &keys {
            assert_eq!(get_progression_template(key).map(|t| t.key), Some(*key));
        }
        assert_eq!(get_progression_template("nope"), None);
        assert_eq!(get_progression_template("blues12Bar").unwrap().bars, Some(12));
    }

    #[test]
    fn genre_filter_is_case_insensitive_substring() {
        let jazz: Vec<_> = get_progressions_by_genre("JAZZ").iter().map(|t| t.key).collect();
        assert_eq!(jazz, ["jazzIiVI", "circleOfFifths"]);
        let standards = get_progressions_by_genre("stand");
        assert_eq!(standards.len(), 1);
        assert!(get_progressions_by_genre("polka").is_empty());
        assert_eq!(get_progressions_by_genre("").len(), 10);
    }

    #[test]
    fn templates_generate_in_their_home_scales() {
        let pop = generate_progression_from_template(60, "major", "pop", &Silent);
        assert_eq!(pop.len(), 4);
        let andalusian = generate_progression_from_template(57, "minorNatural", "andalusian", &Silent);
        assert_eq!(andalusian.len(), 4);
        let blues = generate_progression_from_template(60, "major", "blues12Bar", &Silent);
        assert_eq!(blues.len(), 12);
    }

    #[test]
    fn unknown_template_falls_back_to_pop() {
        let seen = RefCell::new(Vec::new());
        let sink = |msg: &str| seen.borrow_mut().push(msg.to_string());
        let chords = generate_progression_from_template(60, "major", "vaporwave", &sink);
        let numerals: Vec<_> = chords.iter().map(|c| c.chord.roman_numeral).collect();
        assert_eq!(numerals, ["I", "V", "vi", "IV"]);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn serializes_camel_case_without_first_distance() {
        let progression = generate_progression(60, "major", &["I", "V"], &Silent);
        let json = serde_json::to_value(&progression).unwrap();
        assert_eq!(json[0]["romanNumeral"], "I");
        assert_eq!(json[0]["harmonicFunction"], "tonic");
        assert!(json[0].get("voiceLeadingDistance").is_none());
        assert_eq!(json[1]["voiceLeadingDistance"], 21);
        assert_eq!(json[1]["voiceLeadingInversion"], 0);
    }
}
