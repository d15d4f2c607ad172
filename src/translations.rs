/// Translation code used when a caller does not specify one.
pub const DEFAULT_TRANSLATION: &str = "NIV";

/// Recognized translation codes, keyed by their lowercase form.
const TRANSLATIONS: [(&str, &str); 12] = [
    ("amp", "AMP"),
    ("asv", "ASV"),
    ("csb", "CSB"),
    ("esv", "ESV"),
    ("kjv", "KJV"),
    ("msg", "MSG"),
    ("nasb", "NASB"),
    ("niv", "NIV"),
    ("nkjv", "NKJV"),
    ("nlt", "NLT"),
    ("web", "WEB"),
    ("ylt", "YLT"),
];

/// Normalizes a translation code.
///
/// Absent or empty input yields [DEFAULT_TRANSLATION](DEFAULT_TRANSLATION).
/// Known codes map to their canonical form; unknown codes pass through
/// upper-cased, since the content service is the final authority on
/// validity.
pub fn normalize(code: Option<&str>) -> String {
    let code = code.unwrap_or("").trim();
    if code.is_empty() {
        return DEFAULT_TRANSLATION.to_string();
    }

    let lower = code.to_lowercase();
    TRANSLATIONS
        .iter()
        .find(|(key, _)| *key == lower)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or_else(|| code.to_uppercase())
}
