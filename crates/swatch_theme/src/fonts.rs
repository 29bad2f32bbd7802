//! Font family extraction and web font stylesheet URLs

/// Weights requested while editing.
pub const EDITOR_FONT_WEIGHTS: &[u16] = &[400, 500, 600, 700];

/// Weights requested by the initial paint, before the editor is interactive.
pub const INITIAL_PAINT_FONT_WEIGHTS: &[u16] = &[400];

const GOOGLE_FONTS_CSS: &str = "https://fonts.googleapis.com/css2";

/// Generic families that never need a stylesheet.
const GENERIC_FAMILIES: &[&str] = &[
    "ui-sans-serif",
    "ui-serif",
    "ui-monospace",
    "system-ui",
    "sans-serif",
    "serif",
    "monospace",
    "cursive",
    "fantasy",
];

/// First family of a CSS `font-family` list, unquoted.
///
/// Returns `None` for empty lists and for generic families such as
/// `sans-serif`, which the platform already provides.
pub fn extract_font_family(value: &str) -> Option<String> {
    let first = value.split(',').next()?.trim();
    let family = first.trim_matches(|c| c == '"' || c == '\'').trim();

    if family.is_empty() {
        return None;
    }
    if GENERIC_FAMILIES
        .iter()
        .any(|generic| generic.eq_ignore_ascii_case(family))
    {
        return None;
    }

    Some(family.to_string())
}

/// Stylesheet URL for `family` at the given weights.
///
/// Returns `None` when there is nothing to request.
pub fn font_stylesheet_url(family: &str, weights: &[u16]) -> Option<String> {
    let family = family.trim();
    if family.is_empty() || weights.is_empty() {
        return None;
    }

    let mut sorted = weights.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    let weights = sorted
        .iter()
        .map(u16::to_string)
        .collect::<Vec<_>>()
        .join(";");

    Some(format!(
        "{GOOGLE_FONTS_CSS}?family={}:wght@{weights}&display=swap",
        encode_family(family)
    ))
}

/// URI component encoding: unreserved characters pass, everything else is `%XX`.
fn encode_family(family: &str) -> String {
    let mut out = String::with_capacity(family.len());
    for byte in family.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            other => out.push_str(&format!("%{other:02X}")),
        }
    }
    out
}
