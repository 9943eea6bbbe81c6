//! This module contains everything that helps us dealing with fonts.

pub mod configuration;
pub mod manager;
pub mod styles;
pub mod winansi;

use freetype::{face, Face, Library};

use crate::document::Document;
use crate::units::Pt;
use crate::Result;

/// The first character code covered by the widths table of an embedded font.
const FIRST_CHAR: u8 = 32;

/// A font that contains the pdf resource name needed to render text and the
/// freetype face needed to measure text.
#[derive(Debug)]
pub struct Font {
    /// The freetype face.
    freetype: Face,

    /// The name under which the font is registered in the page resources.
    resource: String,
}

impl Font {
    /// Creates a font from a byte array and embeds it into a document.
    pub fn from_bytes(bytes: &[u8], library: &Library, document: &mut Document) -> Result<Font> {
        // I don't like this bytes.to_vec() but I'm not sure there's a better
        // way of doing this...
        let freetype = library.new_memory_face(bytes.to_vec(), 0)?;
        let metrics = FaceMetrics::from_face(&freetype, bytes);
        let resource = document.embed_font(bytes, &metrics)?;

        Ok(Font { freetype, resource })
    }

    /// Computes the text width of the font at a specified size.
    pub fn text_width(&self, text: &str, scale: Pt) -> Pt {
        let units_per_em = f64::from(self.freetype.raw().units_per_EM);

        // calculate the width of the text in unscaled units
        let sum_width = text
            .chars()
            .fold(0.0, |acc, ch| acc + unscaled_advance(&self.freetype, ch));

        Pt(sum_width * scale.0 / units_per_em)
    }

    /// Returns the resource name of the font in the page it was embedded into.
    pub fn resource(&self) -> &str {
        &self.resource
    }
}

/// Returns the advance width of a char in unscaled font units.
fn unscaled_advance(face: &Face, c: char) -> f64 {
    let is_ok = face
        .load_char(c as usize, face::LoadFlag::NO_SCALE)
        .is_ok();

    if is_ok {
        face.glyph().metrics().horiAdvance as f64
    } else {
        0.0
    }
}

/// The metrics of a face that are needed to build its pdf font descriptor,
/// expressed in the 1000 units per em glyph space of pdf fonts.
pub struct FaceMetrics {
    /// The postscript looking name of the font.
    pub base_name: String,

    /// The ascent of the font.
    pub ascent: f64,

    /// The descent of the font.
    pub descent: f64,

    /// The cap height of the font, approximated by its ascent.
    pub cap_height: f64,

    /// The bounding box of the font.
    pub bbox: [f64; 4],

    /// The advance widths of the WinAnsi codes from 32 to 255.
    pub widths: Vec<f64>,

    /// Whether the font program contains cff outlines.
    pub cff: bool,
}

impl FaceMetrics {
    /// Extracts the descriptor metrics from a freetype face.
    pub fn from_face(face: &Face, bytes: &[u8]) -> FaceMetrics {
        let raw = face.raw();
        let to_glyph_space = 1000.0 / f64::from(raw.units_per_EM);

        let widths = (FIRST_CHAR..=255)
            .map(|code| unscaled_advance(face, winansi::char_for(code)) * to_glyph_space)
            .collect();

        FaceMetrics {
            base_name: base_font_name(face),
            ascent: f64::from(raw.ascender) * to_glyph_space,
            descent: f64::from(raw.descender) * to_glyph_space,
            cap_height: f64::from(raw.ascender) * to_glyph_space,
            bbox: [
                raw.bbox.xMin as f64 * to_glyph_space,
                raw.bbox.yMin as f64 * to_glyph_space,
                raw.bbox.xMax as f64 * to_glyph_space,
                raw.bbox.yMax as f64 * to_glyph_space,
            ],
            widths,
            cff: bytes.len() >= 4 && &bytes[0..4] == b"OTTO",
        }
    }
}

/// Builds the base font name of a face from its family and style names.
fn base_font_name(face: &Face) -> String {
    let name = match (face.family_name(), face.style_name()) {
        (Some(family), Some(style)) => format!("{}-{}", family, style),
        (Some(family), None) => family,
        _ => String::from("Embedded"),
    };

    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect()
}
