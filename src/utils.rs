use unicode_width::UnicodeWidthChar;

pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}

/// Byte offset of the `char_index`-th character of `text`.
pub fn byte_index(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// Where the cursor lands when `text` is rendered with `Wrap { trim: true }`
/// in a box `width` columns wide. `cursor` is a character index; the result
/// is (visual line, column) of the spot the next typed character would fill.
/// Hard newlines force a break; a character that no longer fits on the
/// current line wraps to the next one.
pub fn wrapped_cursor_position(text: &str, cursor: usize, width: usize) -> (usize, usize) {
    if width == 0 {
        return (0, 0);
    }

    let mut line = 0usize;
    let mut col = 0usize;
    for (i, ch) in text.chars().enumerate() {
        if i == cursor {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 0;
            continue;
        }
        let w = ch.width().unwrap_or(1);
        if col + w > width && col > 0 {
            line += 1;
            col = 0;
        }
        col += w;
    }
    (line, col)
}
