//! This module turns the tile text into measured runs ready to be drawn.

pub mod constants;
pub mod lines;
pub mod runs;
pub mod utils;
pub mod warnings;

use crate::fonts::styles::StyleClass;
use crate::layout::constants::MARK_SPACING_RATIO;
use crate::units::Pt;

/// A run of text sharing one rendering style and having one measured width.
#[derive(Debug, Clone)]
pub struct StyledRun {
    /// The content of the run.
    pub text: String,

    /// The style of the run.
    pub class: StyleClass,

    /// The measured width of the run, in pt.
    pub width: Pt,
}

impl StyledRun {
    /// Creates the invisible spacer run that separates a punctuation mark from
    /// the glyph before it.
    pub fn spacer(size: Pt) -> StyledRun {
        StyledRun {
            text: String::from(" "),
            class: StyleClass::Punctuation,
            width: size * MARK_SPACING_RATIO,
        }
    }
}

/// A measured line of the tile text.
#[derive(Debug)]
pub struct Line {
    /// The runs of the line, in drawing order.
    pub runs: Vec<StyledRun>,

    /// The total width of the line, in pt.
    pub width: Pt,
}

impl Line {
    /// Creates a line from its runs, accumulating the total width.
    pub fn new(runs: Vec<StyledRun>) -> Line {
        let width = runs.iter().fold(Pt(0.0), |acc, run| acc + run.width);
        Line { runs, width }
    }
}
