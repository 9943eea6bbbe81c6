//! Various constants used for laying out the tile text and the final sheet.

use crate::units::Pt;

/// The font size of the tile text.
pub const FONT_SIZE: Pt = Pt(48.0);

/// The vertical distance between two consecutive baselines.
pub const LINE_SPACING: Pt = Pt(64.0);

/// The leftward trim applied when centering a line, to compensate the optical
/// centering of the tile fonts.
pub const CENTERING_TRIM: Pt = Pt(3.0);

/// The spacing inserted before a punctuation mark, as a ratio of the font
/// size.
pub const MARK_SPACING_RATIO: f64 = 0.05;

/// The characters that are pulled out of their run and rendered with the
/// marks font.
pub const MARK_CHARS: [char; 2] = ['!', '\''];

/// The width of the final print sheet.
pub const SHEET_WIDTH: Pt = Pt(842.0);

/// The height of the final print sheet.
pub const SHEET_HEIGHT: Pt = Pt(595.0);
