const REPLACEMENT: char = '_';

/// Replaces characters that are illegal in file names with `_`, then trims
/// whitespace and dots from both ends.
///
/// Total: any input is accepted and the result may be empty.
pub fn sanitize_fragment(value: &str) -> String {
    let replaced: String = value
        .chars()
        .map(|ch| if is_disallowed_char(ch) { REPLACEMENT } else { ch })
        .collect();

    // Dots and whitespace are trimmed together so that "  . a . " settles in one pass.
    replaced
        .trim_matches(|c: char| c == '.' || c.is_whitespace())
        .to_string()
}

fn is_disallowed_char(ch: char) -> bool {
    matches!(ch, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*') || ch <= '\u{1f}'
}
