//! Deterministic canonicalization of raw test and column names.

use crate::translit::transliterate;

/// Normalize a raw test/column name for comparison.
///
/// Steps, in order: transliterate Cyrillic to Latin, lowercase, replace
/// everything outside `[a-z0-9]` with a single `_` per run, trim leading
/// and trailing underscores.
///
/// Idempotent: `normalize(normalize(x)) == normalize(x)` for all inputs.
pub fn normalize(name: &str) -> String {
    let lowered = transliterate(name).to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut pending_separator = false;
    for ch in lowered.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push('_');
            }
            pending_separator = false;
            out.push(ch);
        } else {
            pending_separator = true;
        }
    }
    out
}
