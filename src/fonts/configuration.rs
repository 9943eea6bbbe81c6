//! The set of fonts used to render one tile.

use crate::fonts::styles::StyleClass;
use crate::fonts::Font;

/// The three fonts of a tile: regular, bold, and the marks font which only
/// ever renders the singled out punctuation characters.
pub struct FontSet<'a> {
    /// The regular font.
    pub regular: &'a Font,

    /// The bold font.
    pub bold: &'a Font,

    /// The font for the punctuation marks.
    pub marks: &'a Font,
}

impl<'a> FontSet<'a> {
    /// Returns the font corresponding to the style.
    pub fn for_class(&self, class: StyleClass) -> &'a Font {
        match class {
            StyleClass::Regular => self.regular,
            StyleClass::Bold => self.bold,
            StyleClass::Punctuation => self.marks,
        }
    }
}
