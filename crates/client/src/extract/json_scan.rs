//! Locating a JSON literal embedded in script text.
//!
//! The scan tracks bracket depth and string state, so braces or `};` inside
//! string values do not end the literal early.

/// Slice of `text` holding the complete JSON object or array that starts at byte `start`.
///
/// Returns None if `start` is not `{`/`[` or the literal never closes.
pub fn balanced_json(text: &str, start: usize) -> Option<&str> {
    let bytes = text.as_bytes();
    if !matches!(bytes.get(start), Some(b'{' | b'[')) {
        return None;
    }

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &b) in bytes[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'{' | b'[' => depth += 1,
            b'}' | b']' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    None
}

/// JSON object assigned right after the first occurrence of `marker`.
pub fn json_after_marker<'a>(text: &'a str, marker: &str) -> Option<&'a str> {
    let after = text.find(marker)? + marker.len();
    let start = after + text[after..].find(|c: char| !c.is_whitespace())?;
    if text.as_bytes()[start] != b'{' {
        return None;
    }
    balanced_json(text, start)
}
