//! The store that holds the raw bytes of everything a generation needs.

use std::fs;
use std::path::PathBuf;

use crate::config::Config;
use crate::{Error, Result};

/// Holds the base tile document and the three font programs of a project.
///
/// The base document bytes are loaded once and never mutated afterwards, so
/// the store can be shared freely between generations. Requesting a
/// generation before the base document is available fails fast instead of
/// producing an empty tile.
pub struct AssetStore {
    /// The bytes of the base tile document, if they were loaded.
    source: Option<Vec<u8>>,

    /// The bytes of the regular font.
    regular: Vec<u8>,

    /// The bytes of the bold font.
    bold: Vec<u8>,

    /// The bytes of the marks font.
    marks: Vec<u8>,
}

impl AssetStore {
    /// Creates a store from already loaded font bytes, with no base document
    /// yet.
    pub fn new(regular: Vec<u8>, bold: Vec<u8>, marks: Vec<u8>) -> AssetStore {
        AssetStore {
            source: None,
            regular,
            bold,
            marks,
        }
    }

    /// Sets the base document bytes of the store.
    pub fn with_source(mut self, source: Vec<u8>) -> AssetStore {
        self.source = Some(source);
        self
    }

    /// Loads every asset referenced by the config from disk.
    pub fn load(config: &Config) -> Result<AssetStore> {
        let read_font = |path: &str| {
            fs::read(path).map_err(|_| Error::FontNotFound(PathBuf::from(path)))
        };

        Ok(AssetStore {
            source: Some(fs::read(&config.source)?),
            regular: read_font(&config.fonts.regular)?,
            bold: read_font(&config.fonts.bold)?,
            marks: read_font(&config.fonts.marks)?,
        })
    }

    /// Returns the base document bytes, or fails if they were never loaded.
    pub fn source(&self) -> Result<&[u8]> {
        match &self.source {
            Some(source) => Ok(source),
            None => Err(Error::SourceNotLoaded),
        }
    }

    /// Returns the bytes of the regular font.
    pub fn regular(&self) -> &[u8] {
        &self.regular
    }

    /// Returns the bytes of the bold font.
    pub fn bold(&self) -> &[u8] {
        &self.bold
    }

    /// Returns the bytes of the marks font.
    pub fn marks(&self) -> &[u8] {
        &self.marks
    }
}

#[cfg(test)]
mod tests {
    use crate::assets::AssetStore;
    use crate::Error;

    #[test]
    fn source_is_missing_until_loaded() {
        let store = AssetStore::new(Vec::new(), Vec::new(), Vec::new());
        match store.source() {
            Err(Error::SourceNotLoaded) => (),
            _ => panic!("expected the source not loaded error"),
        }

        let store = store.with_source(vec![1, 2, 3]);
        assert_eq!(store.source().unwrap(), &[1, 2, 3]);
    }
}
