//! Number formatting, truncation and padding helpers.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Maximum display width of an error message carried by a cell.
pub const MAX_MESSAGE_WIDTH: usize = 80;

/// Formats an integer with `,` thousands separators (`#,##0`).
pub fn group_int(value: i128) -> String {
    let digits = value.unsigned_abs().to_string();
    let grouped = group_digits(&digits);
    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Formats a float with two decimals and thousands separators (`#,##0.00`).
pub fn group_fixed2(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-∞" } else { "∞" }.to_string();
    }

    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, group_digits(int_part), frac_part)
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Truncates text to `max_width` display columns, ending in `…` when cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    // Reserve 1 column for the ellipsis
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

/// Collapses a diagnostic message to a single line of at most
/// [`MAX_MESSAGE_WIDTH`] columns.
pub fn truncate_message(message: &str) -> String {
    let single_line = message.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate_to_width(&single_line, MAX_MESSAGE_WIDTH)
}

/// Display width of a string, counting wide characters as two columns.
pub fn display_width(s: &str) -> usize {
    s.width()
}

/// Pads on the right to `width` columns.
pub fn pad_right(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

/// Pads on the left to `width` columns.
pub fn pad_left(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", " ".repeat(padding), s)
}

/// Centers within `width` columns; odd padding goes to the right.
pub fn pad_center(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    let left = padding / 2;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(padding - left))
}
