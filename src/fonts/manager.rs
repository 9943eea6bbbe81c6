//! The manager that loads the fonts of a generation into a document.

use std::collections::HashMap;

use freetype::Library;

use crate::assets::AssetStore;
use crate::document::Document;
use crate::fonts::configuration::FontSet;
use crate::fonts::Font;
use crate::Result;

/// This struct holds the fonts of one generation.
///
/// A manager is created freshly for every document build, so that concurrent
/// generations never share font or document handles.
pub struct FontManager {
    /// The freetype library, needed to be able to measure texts.
    library: Library,

    /// The hashmap that associates slot names with fonts.
    fonts: HashMap<String, Font>,
}

impl FontManager {
    /// Creates a new font manager and embeds the three tile fonts into the
    /// document.
    pub fn init(document: &mut Document, assets: &AssetStore) -> Result<FontManager> {
        let mut font_manager = FontManager {
            library: Library::init()?,
            fonts: HashMap::new(),
        };

        // Insert the tile fonts
        font_manager.add_font("regular", assets.regular(), document)?;
        font_manager.add_font("bold", assets.bold(), document)?;
        font_manager.add_font("marks", assets.marks(), document)?;

        Ok(font_manager)
    }

    /// Adds a new font to the font manager.
    pub fn add_font(&mut self, slot: &str, bytes: &[u8], document: &mut Document) -> Result<()> {
        let font = Font::from_bytes(bytes, &self.library, document)?;
        self.fonts.insert(String::from(slot), font);
        Ok(())
    }

    /// Returns a reference to a font if it is present in the font manager.
    pub fn get(&self, slot: &str) -> Option<&Font> {
        self.fonts.get(slot)
    }

    /// Returns the font set of the tile.
    pub fn set(&self) -> FontSet {
        match (self.get("regular"), self.get("bold"), self.get("marks")) {
            (Some(regular), Some(bold), Some(marks)) => FontSet {
                regular,
                bold,
                marks,
            },
            // This should never fail since init always loads the three slots.
            _ => unreachable!("tile font not found, this should never happen"),
        }
    }
}
