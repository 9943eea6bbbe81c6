//! This module contains some functions that help us pointing at positions in
//! the tile text.

/// Returns the byte range of the line that contains the given offset.
pub fn line_span(content: &str, offset: usize) -> (usize, usize) {
    let start = content[..offset].rfind('\n').map_or(0, |i| i + 1);
    let end = content[offset..]
        .find('\n')
        .map_or(content.len(), |i| offset + i);

    (start, end)
}

/// Computes the column of a byte offset, in chars, counting from the start of
/// its line.
pub fn compute_column(content: &str, start: usize, current: usize) -> usize {
    content[start..current].chars().count()
}

#[cfg(test)]
mod tests {
    use crate::layout::utils::{compute_column, line_span};

    #[test]
    fn line_span_covers_the_middle_line() {
        let content = "een\ntwee\ndrie";
        assert_eq!(line_span(content, 5), (4, 8));
        assert_eq!(&content[4..8], "twee");
    }

    #[test]
    fn line_span_reaches_the_boundaries() {
        let content = "een\ntwee";
        assert_eq!(line_span(content, 0), (0, 3));
        assert_eq!(line_span(content, 6), (4, content.len()));
    }

    #[test]
    fn columns_count_chars_not_bytes() {
        let content = "café<b>";
        assert_eq!(compute_column(content, 0, content.find("<b>").unwrap()), 4);
    }
}
