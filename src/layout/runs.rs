//! The lexer that splits a line of tile text into styled runs.
//!
//! The scan happens in two passes: the first one splits the line on the
//! `<b>…</b>` boundaries into alternating plain and bold chunks, the second
//! one walks each chunk char by char and pulls the singled out punctuation
//! marks into their own runs.

use nom::bytes::complete::{tag, take_until};
use nom::sequence::delimited;
use nom::IResult;

use std::mem;

use crate::fonts::styles::StyleClass;
use crate::layout::constants::MARK_CHARS;
use crate::layout::utils::compute_column;
use crate::layout::warnings::{EmptyWarning, Position, WarningType};

/// A run of text tagged with its style, before measurement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRun {
    /// The content of the run.
    pub text: String,

    /// The style of the run.
    pub class: StyleClass,
}

/// A chunk of a line produced by the first pass.
enum Chunk<'a> {
    /// Text outside any bold span.
    Plain(&'a str),

    /// Text inside a bold span.
    Bold(&'a str),
}

/// Recognizes a bold span and returns its inner text.
fn bold_span(input: &str) -> IResult<&str, &str> {
    delimited(tag("<b>"), take_until("</b>"), tag("</b>"))(input)
}

/// Splits a line on its bold span boundaries.
///
/// A marker that is never closed does not open a span: the rest of the line,
/// markers included, stays literal text.
fn split_bold(line: &str) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut rest = line;

    while let Some(start) = rest.find("<b>") {
        match bold_span(&rest[start..]) {
            Ok((after, inner)) => {
                if start > 0 {
                    chunks.push(Chunk::Plain(&rest[..start]));
                }
                chunks.push(Chunk::Bold(inner));
                rest = after;
            }
            Err(_) => break,
        }
    }

    if !rest.is_empty() {
        chunks.push(Chunk::Plain(rest));
    }

    chunks
}

/// Walks a chunk char by char, accumulating text and flushing it whenever a
/// punctuation mark has to become its own run.
fn scan_marks(text: &str, class: StyleClass, runs: &mut Vec<RawRun>) {
    let mut buffer = String::new();

    for c in text.chars() {
        if MARK_CHARS.contains(&c) {
            if !buffer.is_empty() {
                runs.push(RawRun {
                    text: mem::take(&mut buffer),
                    class,
                });
            }

            runs.push(RawRun {
                text: c.to_string(),
                class: StyleClass::Punctuation,
            });
        } else {
            buffer.push(c);
        }
    }

    if !buffer.is_empty() {
        runs.push(RawRun {
            text: buffer,
            class,
        });
    }
}

/// Splits a line of tile text into its styled runs.
///
/// ```
/// # use tegel::fonts::styles::StyleClass;
/// # use tegel::layout::runs::segment_line;
/// let runs = segment_line("a<b>b</b>c");
/// assert_eq!(runs.len(), 3);
/// assert_eq!(runs[1].class, StyleClass::Bold);
/// ```
pub fn segment_line(line: &str) -> Vec<RawRun> {
    let mut runs = Vec::new();

    for chunk in split_bold(line) {
        match chunk {
            Chunk::Plain(text) => scan_marks(text, StyleClass::Regular, &mut runs),
            Chunk::Bold(text) => scan_marks(text, StyleClass::Bold, &mut runs),
        }
    }

    runs
}

/// Scans a whole text for markup that will not render the way it looks.
///
/// The lexing result is never altered by what is reported here: malformed
/// markup always falls back to literal text.
pub fn check_markup(content: &str) -> Vec<EmptyWarning> {
    let mut warnings = Vec::new();
    let mut line_start = 0;

    for (index, line) in content.split('\n').enumerate() {
        check_line(content, line, index as u32 + 1, line_start, &mut warnings);
        line_start += line.len() + 1;
    }

    warnings
}

/// Scans a single line for suspicious markup.
fn check_line(
    content: &str,
    line: &str,
    number: u32,
    line_start: usize,
    warnings: &mut Vec<EmptyWarning>,
) {
    let mut push = |local: usize, ty: WarningType| {
        let offset = line_start + local;
        warnings.push(EmptyWarning {
            position: Position {
                line: number,
                column: compute_column(content, line_start, offset) + 1,
                offset,
            },
            ty,
        });
    };

    let mut rest = line;
    let mut consumed = 0;

    loop {
        match rest.find("<b>") {
            Some(start) => {
                if let Some(stray) = rest[..start].find("</b>") {
                    push(consumed + stray, WarningType::StrayClosingBold);
                }

                match bold_span(&rest[start..]) {
                    Ok((after, inner)) => {
                        if let Some(nested) = inner.find("<b>") {
                            push(consumed + start + 3 + nested, WarningType::NestedBold);
                        }
                        consumed += rest.len() - after.len();
                        rest = after;
                    }
                    Err(_) => {
                        push(consumed + start, WarningType::UnterminatedBold);
                        break;
                    }
                }
            }

            None => {
                if let Some(stray) = rest.find("</b>") {
                    push(consumed + stray, WarningType::StrayClosingBold);
                }
                break;
            }
        }
    }
}

/// Returns the number of visible characters of a text, markers excluded.
pub fn visible_len(text: &str) -> usize {
    let mut count = 0;

    for (index, line) in text.split('\n').enumerate() {
        if index > 0 {
            count += 1;
        }

        for chunk in split_bold(line) {
            count += match chunk {
                Chunk::Plain(text) | Chunk::Bold(text) => text.chars().count(),
            };
        }
    }

    count
}

/// Returns the number of lines of a text.
pub fn line_count(text: &str) -> usize {
    text.split('\n').count()
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use crate::fonts::styles::StyleClass;
    use crate::layout::runs::{check_markup, line_count, segment_line, visible_len, RawRun};
    use crate::layout::warnings::WarningType;

    fn run(text: &str, class: StyleClass) -> RawRun {
        RawRun {
            text: String::from(text),
            class,
        }
    }

    #[test_case("geworden krijg ik" ; "plain words")]
    #[test_case("OSS speelt" ; "template line")]
    fn plain_line_is_one_regular_run(input: &str) {
        assert_eq!(segment_line(input), vec![run(input, StyleClass::Regular)]);
    }

    #[test]
    fn empty_line_has_no_runs() {
        assert_eq!(segment_line(""), Vec::new());
    }

    #[test]
    fn bold_span_splits_the_line() {
        assert_eq!(
            segment_line("a<b>b</b>c"),
            vec![
                run("a", StyleClass::Regular),
                run("b", StyleClass::Bold),
                run("c", StyleClass::Regular),
            ]
        );
    }

    #[test]
    fn bold_span_at_the_boundaries_produces_no_empty_run() {
        assert_eq!(
            segment_line("<b>28</b>"),
            vec![run("28", StyleClass::Bold)]
        );
    }

    #[test]
    fn empty_bold_span_produces_no_run() {
        assert_eq!(
            segment_line("a<b></b>b"),
            vec![run("a", StyleClass::Regular), run("b", StyleClass::Regular)]
        );
    }

    #[test]
    fn adjacent_bold_spans() {
        assert_eq!(
            segment_line("<b>a</b><b>c</b>"),
            vec![run("a", StyleClass::Bold), run("c", StyleClass::Bold)]
        );
    }

    #[test]
    fn exclamation_mark_becomes_its_own_run() {
        assert_eq!(
            segment_line("Nee!"),
            vec![
                run("Nee", StyleClass::Regular),
                run("!", StyleClass::Punctuation),
            ]
        );
    }

    #[test]
    fn apostrophe_in_the_middle_of_a_word() {
        assert_eq!(
            segment_line("zo'n"),
            vec![
                run("zo", StyleClass::Regular),
                run("'", StyleClass::Punctuation),
                run("n", StyleClass::Regular),
            ]
        );
    }

    #[test]
    fn mark_at_the_start_of_a_line() {
        assert_eq!(
            segment_line("!ja"),
            vec![
                run("!", StyleClass::Punctuation),
                run("ja", StyleClass::Regular),
            ]
        );
    }

    #[test]
    fn marks_inside_a_bold_span_keep_their_own_style() {
        assert_eq!(
            segment_line("<b>kut!</b>"),
            vec![
                run("kut", StyleClass::Bold),
                run("!", StyleClass::Punctuation),
            ]
        );
    }

    #[test]
    fn unterminated_marker_stays_literal() {
        assert_eq!(
            segment_line("a<b>bc"),
            vec![run("a<b>bc", StyleClass::Regular)]
        );
    }

    #[test]
    fn nested_marker_stays_literal_inside_the_span() {
        assert_eq!(
            segment_line("<b>x<b>y</b>z</b>"),
            vec![
                run("x<b>y", StyleClass::Bold),
                run("z</b>", StyleClass::Regular),
            ]
        );
    }

    #[test]
    fn clean_markup_produces_no_warning() {
        assert!(check_markup("Neuken?\nNee!\n<b>OSS</b> speelt").is_empty());
    }

    #[test]
    fn unterminated_marker_is_reported() {
        let warnings = check_markup("eerste\na<b>bc");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].ty, WarningType::UnterminatedBold);
        assert_eq!(warnings[0].position.line, 2);
        assert_eq!(warnings[0].position.column, 2);
        assert_eq!(warnings[0].position.offset, 8);
    }

    #[test]
    fn stray_closing_marker_is_reported() {
        let warnings = check_markup("ab</b>c");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].ty, WarningType::StrayClosingBold);
        assert_eq!(warnings[0].position.column, 3);
    }

    #[test]
    fn nested_marker_is_reported() {
        let warnings = check_markup("<b>x<b>y</b>z</b>");
        assert!(warnings
            .iter()
            .any(|warning| warning.ty == WarningType::NestedBold));
    }

    #[test]
    fn visible_len_strips_the_markers() {
        assert_eq!(visible_len("Ben ik <b>28</b>"), 9);
        assert_eq!(visible_len("a\nb"), 3);
    }

    #[test]
    fn line_count_counts_the_newlines() {
        assert_eq!(line_count("Neuken?\nNee!\n<b>OSS</b> speelt"), 3);
        assert_eq!(line_count("een"), 1);
    }
}
