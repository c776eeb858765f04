//! Making service-supplied text safe to put on the terminal

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// CSI and OSC escape sequences
static ESCAPE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[0-?]*[ -/]*[@-~]|\x1b\][^\x07\x1b]*(?:\x07|\x1b\\)").unwrap()
});

/// Strip escape sequences and turn remaining control characters into spaces
pub fn sanitize(text: &str) -> String {
    ESCAPE_REGEX
        .replace_all(text, "")
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// How a single cell value is shown
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => sanitize(s),
        other => sanitize(&other.to_string()),
    }
}

/// Pad or truncate `text` to exactly `width` terminal columns
pub fn fit(text: &str, width: usize) -> String {
    let text_width = UnicodeWidthStr::width(text);
    if text_width <= width {
        return format!("{}{}", text, " ".repeat(width - text_width));
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}
