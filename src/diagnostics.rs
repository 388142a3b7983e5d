//! Diagnostics — where the lenient operations report substituted defaults.
//!
//! Unknown scale/chord keys and unmatched Roman numerals are not errors;
//! they are warnings handed to a caller-supplied sink so that interactive
//! callers keep running while tests can still observe what happened.

/// A sink for non-fatal warnings.
pub trait Diagnostics {
    fn warn(&self, message: &str);
}

/// Forwards warnings to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn warn(&self, message: &str) {
        log::warn!(target: "songwalker_theory", "{message}");
    }
}

#[cfg(target_arch = "wasm32")]
mod console {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_namespace = console)]
        pub fn warn(s: &str);
    }
}

/// The sink behind the WASM entry points: `console.warn` in the browser,
/// plus the `log` facade on every target.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleDiagnostics;

impl Diagnostics for ConsoleDiagnostics {
    fn warn(&self, message: &str) {
        #[cfg(target_arch = "wasm32")]
        console::warn(message);
        LogDiagnostics.warn(message);
    }
}

/// Discards every warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Diagnostics for Silent {
    fn warn(&self, _message: &str) {}
}

impl<F> Diagnostics for F
where
    F: Fn(&str),
{
    fn warn(&self, message: &str) {
        self(message)
    }
}
