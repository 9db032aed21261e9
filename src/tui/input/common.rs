//! Single-line edit buffer helpers shared by the inline editor and the
//! add form. Cursors are byte offsets; movement and deletion operate on
//! grapheme clusters.

use unicode_segmentation::UnicodeSegmentation;

/// Byte offset of the grapheme boundary before `pos` (0 at the start)
pub(super) fn prev_boundary(text: &str, pos: usize) -> usize {
    text.grapheme_indices(true)
        .map(|(i, _)| i)
        .take_while(|&i| i < pos)
        .last()
        .unwrap_or(0)
}

/// Byte offset of the grapheme boundary after `pos` (len at the end)
pub(super) fn next_boundary(text: &str, pos: usize) -> usize {
    text.grapheme_indices(true)
        .map(|(i, _)| i)
        .find(|&i| i > pos)
        .unwrap_or(text.len())
}

pub(super) fn insert_char(buffer: &mut String, cursor: &mut usize, c: char) {
    buffer.insert(*cursor, c);
    *cursor += c.len_utf8();
}

/// Remove the grapheme before the cursor
pub(super) fn delete_back(buffer: &mut String, cursor: &mut usize) {
    if *cursor == 0 {
        return;
    }
    let start = prev_boundary(buffer, *cursor);
    buffer.replace_range(start..*cursor, "");
    *cursor = start;
}

/// Remove the grapheme under the cursor
pub(super) fn delete_forward(buffer: &mut String, cursor: &mut usize) {
    if *cursor >= buffer.len() {
        return;
    }
    let end = next_boundary(buffer, *cursor);
    buffer.replace_range(*cursor..end, "");
}
