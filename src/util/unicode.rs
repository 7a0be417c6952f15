use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width in terminal cells. Tabs count as 4 cells.
pub fn display_width(s: &str) -> usize {
    s.split('\t')
        .enumerate()
        .map(|(i, part)| {
            let w = UnicodeWidthStr::width(part);
            if i > 0 { w + 4 } else { w }
        })
        .sum()
}

/// Display width of a single character in terminal cells. Tabs count as 4.
pub fn char_display_width(c: char) -> usize {
    if c == '\t' {
        4
    } else {
        unicode_width::UnicodeWidthChar::width(c).unwrap_or(0)
    }
}

/// Truncate a string to fit within `max_cells` terminal cells, appending `…` if truncated.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if max_cells == 0 {
        return String::new();
    }
    let sw = display_width(s);
    if sw <= max_cells {
        return s.to_string();
    }
    if max_cells <= 1 {
        return "\u{2026}".to_string();
    }
    let budget = max_cells - 1; // reserve 1 cell for '…'
    let mut width = 0;
    let mut result = String::new();
    for grapheme in s.graphemes(true) {
        let gw = grapheme_display_width(grapheme);
        if width + gw > budget {
            break;
        }
        width += gw;
        result.push_str(grapheme);
    }
    result.push('\u{2026}');
    result
}

/// Number of codepoints in `s`.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Byte offset of the codepoint at `char_offset`, or `s.len()` past the end.
pub fn byte_offset(s: &str, char_offset: usize) -> usize {
    s.char_indices()
        .nth(char_offset)
        .map_or(s.len(), |(i, _)| i)
}

/// Display column (terminal cells) of the codepoint offset `char_offset`.
pub fn char_offset_to_display_col(s: &str, char_offset: usize) -> usize {
    s.chars().take(char_offset).map(char_display_width).sum()
}

fn is_word_char(c: char) -> bool {
    c.is_alphabetic()
}

/// Start of the word to the left of `cursor` (codepoint offsets).
///
/// Skips non-letters, then letters, so the result sits on the first letter of
/// the word. Never goes below 0.
pub fn word_left(s: &str, cursor: usize) -> usize {
    let chars: Vec<char> = s.chars().collect();
    let mut idx = cursor.min(chars.len());
    while idx > 0 && !is_word_char(chars[idx - 1]) {
        idx -= 1;
    }
    while idx > 0 && is_word_char(chars[idx - 1]) {
        idx -= 1;
    }
    idx
}

/// End of the word to the right of `cursor` (codepoint offsets).
///
/// Skips non-letters, then letters, so the result sits just past the last
/// letter of the word. Never goes past the end of `s`.
pub fn word_right(s: &str, cursor: usize) -> usize {
    let chars: Vec<char> = s.chars().collect();
    let mut idx = cursor.min(chars.len());
    while idx < chars.len() && !is_word_char(chars[idx]) {
        idx += 1;
    }
    while idx < chars.len() && is_word_char(chars[idx]) {
        idx += 1;
    }
    idx
}

/// Display width of a grapheme cluster.
fn grapheme_display_width(g: &str) -> usize {
    // Tab handling
    if g == "\t" {
        return 4;
    }
    UnicodeWidthStr::width(g)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── display_width ──────────────────────────────────────────────

    #[test]
    fn display_width_ascii() {
        assert_eq!(display_width("hello"), 5);
    }

    #[test]
    fn display_width_cjk() {
        assert_eq!(display_width("你好"), 4);
    }

    #[test]
    fn display_width_emoji() {
        assert_eq!(display_width("🎉"), 2);
    }

    #[test]
    fn display_width_tab() {
        assert_eq!(display_width("\thello"), 9);
        assert_eq!(display_width("a\tb"), 6); // 1 + 4 + 1
    }

    #[test]
    fn display_width_empty() {
        assert_eq!(display_width(""), 0);
    }

    // ── truncate_to_width ──────────────────────────────────────────

    #[test]
    fn truncate_no_truncation_needed() {
        assert_eq!(truncate_to_width("hi", 10), "hi");
    }

    #[test]
    fn truncate_ascii() {
        assert_eq!(truncate_to_width("hello world", 8), "hello w\u{2026}");
    }

    #[test]
    fn truncate_cjk_boundary() {
        // "你好世界" is 8 cells. Truncating to 5: "你好" = 4 + "…" = 1 = 5
        assert_eq!(truncate_to_width("你好世界", 5), "你好\u{2026}");
    }

    #[test]
    fn truncate_zero_and_one() {
        assert_eq!(truncate_to_width("hello", 0), "");
        assert_eq!(truncate_to_width("hello", 1), "\u{2026}");
    }

    // ── codepoint offsets ──────────────────────────────────────────

    #[test]
    fn byte_offset_multibyte() {
        let s = "añb你";
        assert_eq!(byte_offset(s, 0), 0);
        assert_eq!(byte_offset(s, 1), 1);
        assert_eq!(byte_offset(s, 2), 3); // ñ is 2 bytes
        assert_eq!(byte_offset(s, 3), 4);
        assert_eq!(byte_offset(s, 4), s.len());
        assert_eq!(byte_offset(s, 99), s.len());
    }

    #[test]
    fn display_col_of_char_offset() {
        assert_eq!(char_offset_to_display_col("hello", 3), 3);
        assert_eq!(char_offset_to_display_col("你好", 1), 2);
        assert_eq!(char_offset_to_display_col("你好", 2), 4);
    }

    // ── word jumps ─────────────────────────────────────────────────

    #[test]
    fn word_left_lands_on_word_start() {
        let s = "hello world";
        assert_eq!(word_left(s, 11), 6);
        assert_eq!(word_left(s, 6), 0);
        assert_eq!(word_left(s, 0), 0);
    }

    #[test]
    fn word_left_from_inside_word() {
        assert_eq!(word_left("hello world", 8), 6);
    }

    #[test]
    fn word_right_lands_past_word_end() {
        let s = "hello world";
        assert_eq!(word_right(s, 0), 5);
        assert_eq!(word_right(s, 5), 11);
        assert_eq!(word_right(s, 11), 11);
    }

    #[test]
    fn word_jumps_treat_digits_and_punctuation_as_separators() {
        let s = "fix #42-bug now";
        assert_eq!(word_right(s, 3), 11); // skips " #42-" then "bug"
        assert_eq!(word_left(s, 11), 8);
    }

    #[test]
    fn word_jumps_count_codepoints() {
        let s = "héllo wörld";
        assert_eq!(word_left(s, char_len(s)), 6);
        assert_eq!(word_right(s, 0), 5);
    }

    #[test]
    fn word_jumps_clamp_out_of_range_cursor() {
        assert_eq!(word_left("abc", 10), 0);
        assert_eq!(word_right("abc", 10), 3);
    }

    #[test]
    fn char_display_width_tests() {
        assert_eq!(char_display_width('a'), 1);
        assert_eq!(char_display_width('你'), 2);
        assert_eq!(char_display_width('\t'), 4);
    }
}
