//! Measuring the runs of a line and computing where to draw them.

use crate::fonts::configuration::FontSet;
use crate::fonts::styles::StyleClass;
use crate::layout::constants::{CENTERING_TRIM, LINE_SPACING};
use crate::layout::runs::RawRun;
use crate::layout::{Line, StyledRun};
use crate::units::Pt;

/// Measures the runs of a line with the fonts of the set and injects the
/// invisible spacer that precedes every punctuation mark.
pub fn measure_line(runs: &[RawRun], fonts: &FontSet, size: Pt) -> Line {
    let mut styled = Vec::new();

    for run in runs {
        if run.class == StyleClass::Punctuation {
            styled.push(StyledRun::spacer(size));
        }

        let font = fonts.for_class(run.class);
        styled.push(StyledRun {
            text: run.text.clone(),
            class: run.class,
            width: font.text_width(&run.text, size),
        });
    }

    Line::new(styled)
}

/// Computes the baseline of the first line so that the whole block of lines
/// is vertically centered on the page.
pub fn block_start_y(page_height: Pt, line_count: usize) -> Pt {
    page_height / 2.0 + (line_count as f64 - 1.5) * LINE_SPACING / 2.0
}

/// Computes the baseline of the line at the given index, counting from the
/// top of the block.
pub fn baseline(start_y: Pt, index: usize) -> Pt {
    start_y - index as f64 * LINE_SPACING
}

/// Computes the x coordinate at which a line starts so that it is centered on
/// the page.
pub fn line_start_x(page_width: Pt, line_width: Pt) -> Pt {
    (page_width - line_width) / 2.0 - CENTERING_TRIM
}

#[cfg(test)]
mod tests {
    use crate::layout::constants::LINE_SPACING;
    use crate::layout::lines::{baseline, block_start_y, line_start_x};
    use crate::units::{nearly_equal, Pt};

    #[test]
    fn single_line_sits_under_the_middle() {
        // One line: the block center is offset by a quarter of the spacing.
        let start = block_start_y(Pt(700.0), 1);
        assert!(nearly_equal(start.0, 350.0 - 16.0));
    }

    #[test]
    fn two_lines_straddle_the_middle() {
        let start = block_start_y(Pt(700.0), 2);
        assert!(nearly_equal(start.0, 350.0 + 16.0));
    }

    #[test]
    fn baselines_are_spaced_regularly() {
        let start = block_start_y(Pt(700.0), 3);

        for index in 1..3 {
            let above = baseline(start, index - 1);
            let below = baseline(start, index);
            assert!(nearly_equal((above - below).0, LINE_SPACING.0));
        }
    }

    #[test]
    fn block_offset_follows_the_line_count() {
        // The first baseline of an n line block is offset from the page
        // center by ((n - 1.5) * spacing) / 2.
        for count in 1..6 {
            let start = block_start_y(Pt(700.0), count);
            let expected = 350.0 + ((count as f64 - 1.5) * LINE_SPACING.0) / 2.0;
            assert!(nearly_equal(start.0, expected));
        }
    }

    #[test]
    fn lines_are_centered_with_the_optical_trim() {
        let start = line_start_x(Pt(500.0), Pt(100.0));
        assert!(nearly_equal(start.0, 197.0));

        // The right edge of the drawn line lands symmetrically, trim aside.
        assert!(nearly_equal((start + Pt(100.0)).0, 297.0));
    }
}
