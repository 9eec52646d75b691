use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates `s` to at most `max_width` display columns, ending in `...`.
///
/// Wide characters (CJK titles, emoji) count by display width and are never
/// split.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(1);

        if current_width + char_width + 3 > max_width {
            break;
        }

        result.push(c);
        current_width += char_width;
    }

    result.push_str("...");
    result
}

/// `"N/A"` for empty strings, used when printing previews.
pub fn or_na(s: &str) -> &str {
    if s.is_empty() {
        "N/A"
    } else {
        s
    }
}
