use once_cell::sync::Lazy;
use regex::Regex;

static NUMERIC_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+\.?\d*)").expect("numeric token pattern is valid"));

static UNIT_QUALIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)per|/\s*[a-z]").expect("unit qualifier pattern is valid"));

const CURRENCY_SYMBOLS: &[char] = &['$', '€', '£', '¥'];

/// Coerces a raw survey cell to a number.
///
/// Currency symbols and thousands separators are stripped first. Text carrying a
/// unit qualifier such as `"45 per inspection"` or `"$32.10/hr"` yields its first
/// numeric token. Blank, unparseable and non-finite cells yield `None`.
pub fn parse_compensation_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let cleaned: String = trimmed
        .chars()
        .filter(|ch| *ch != ',' && !CURRENCY_SYMBOLS.contains(ch))
        .collect();
    let cleaned = cleaned.trim();

    let parsed = if UNIT_QUALIFIER.is_match(cleaned) {
        NUMERIC_TOKEN
            .captures(cleaned)
            .and_then(|caps| caps.get(1))
            .and_then(|token| token.as_str().parse::<f64>().ok())
    } else {
        cleaned.parse::<f64>().ok()
    };

    parsed.filter(|value| value.is_finite())
}
