//! Visible width and padding helpers for styled labels.
//!
//! Labels may carry ANSI styling from widget themes; width math has to ignore
//! the escape sequences and count grapheme clusters the way terminals do.

use emojis::get as emoji_get;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

const TAB_WIDTH: usize = 3;

fn grapheme_width(grapheme: &str) -> usize {
    if grapheme.is_empty() {
        return 0;
    }
    if grapheme == "\t" {
        return TAB_WIDTH;
    }
    if emoji_get(grapheme).is_some() {
        return 2;
    }

    grapheme
        .chars()
        .map(|ch| {
            if ch == '\t' {
                TAB_WIDTH
            } else {
                UnicodeWidthChar::width(ch).unwrap_or(0)
            }
        })
        .sum()
}

/// Byte length of the escape sequence starting at `idx`, if one starts there.
///
/// Recognizes CSI (`ESC [` through a final byte), OSC (`ESC ]` through BEL or
/// ST), and two-byte `ESC x` sequences. An unterminated sequence swallows the
/// rest of the input.
fn escape_len(input: &str, idx: usize) -> Option<usize> {
    let rest = input[idx..].as_bytes();
    if rest.first() != Some(&0x1b) {
        return None;
    }
    match rest.get(1) {
        Some(b'[') => {
            let mut len = 2;
            while let Some(&byte) = rest.get(len) {
                len += 1;
                if (0x40..=0x7e).contains(&byte) {
                    return Some(len);
                }
            }
            Some(rest.len())
        }
        Some(b']') => {
            let mut len = 2;
            while let Some(&byte) = rest.get(len) {
                if byte == 0x07 {
                    return Some(len + 1);
                }
                if byte == 0x1b && rest.get(len + 1) == Some(&b'\\') {
                    return Some(len + 2);
                }
                len += 1;
            }
            Some(rest.len())
        }
        Some(_) => Some(2),
        None => Some(1),
    }
}

fn strip_escapes(input: &str) -> String {
    let mut clean = String::with_capacity(input.len());
    let mut idx = 0;
    while idx < input.len() {
        if let Some(len) = escape_len(input, idx) {
            idx += len;
            while idx < input.len() && !input.is_char_boundary(idx) {
                idx += 1;
            }
            continue;
        }
        let ch = input[idx..].chars().next().expect("char at boundary");
        clean.push(ch);
        idx += ch.len_utf8();
    }
    clean
}

/// Terminal-visible width of `input`, ignoring escape sequences.
pub fn visible_width(input: &str) -> usize {
    if input.is_empty() {
        return 0;
    }
    strip_escapes(input)
        .graphemes(true)
        .map(grapheme_width)
        .sum()
}

/// Truncate `input` to at most `max` visible columns, preserving escape
/// sequences so styling stays balanced.
pub fn truncate_to_width(input: &str, max: usize) -> String {
    if visible_width(input) <= max {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len());
    let mut used = 0;
    let mut idx = 0;
    while idx < input.len() {
        if let Some(len) = escape_len(input, idx) {
            let mut end = idx + len;
            while end < input.len() && !input.is_char_boundary(end) {
                end += 1;
            }
            out.push_str(&input[idx..end.min(input.len())]);
            idx = end;
            continue;
        }
        let ch = input[idx..].chars().next().expect("char at boundary");
        let mut buf = [0u8; 4];
        let ch_width = grapheme_width(ch.encode_utf8(&mut buf));
        if used + ch_width > max {
            break;
        }
        out.push(ch);
        used += ch_width;
        idx += ch.len_utf8();
    }
    out
}

/// Pad `line` with trailing spaces to exactly `width` visible columns. Lines
/// already at or past `width` are returned unchanged.
pub fn pad_to_width(line: &str, width: usize) -> String {
    let padding = width.saturating_sub(visible_width(line));
    if padding == 0 {
        return line.to_string();
    }
    format!("{line}{}", " ".repeat(padding))
}
