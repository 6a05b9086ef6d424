//! Keeps player-typed text on one log line.

const MAX_PREVIEW: usize = 80;

/// Escape control characters and quotes in a search query and cap its
/// length before it goes into a log record.
pub fn escape_log(s: &str) -> String {
    let mut out: String = s
        .chars()
        .take(MAX_PREVIEW)
        .flat_map(char::escape_debug)
        .collect();
    if s.chars().nth(MAX_PREVIEW).is_some() {
        out.push('…');
    }
    out
}
