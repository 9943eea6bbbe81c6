//! This module defines the configuration of a tile project. The configuration
//! is parsed from a TOML file located at the root of the project.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::assets::AssetStore;
use crate::document;
use crate::layout::runs::{check_markup, line_count, visible_len};
use crate::layout::warnings::Warnings;
use crate::Result;

/// The paths to the three fonts used on a tile.
#[derive(Clone, Serialize, Deserialize)]
pub struct FontPaths {
    /// The font used for regular text.
    pub regular: String,

    /// The font used for bold text.
    pub bold: String,

    /// The font used for the singled out punctuation marks.
    pub marks: String,
}

/// Holds the configuration of a tile project.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// The title of the project.
    pub title: String,

    /// The path to the base tile document.
    pub source: String,

    /// The path to the tile text.
    pub input: String,

    /// The path of the generated sheet.
    pub output: String,

    /// The fonts of the project.
    pub fonts: FontPaths,
}

impl Config {
    /// Creates a default configuration with a title.
    pub fn with_title(title: &str) -> Config {
        Config {
            title: String::from(title),
            source: String::from("tile.pdf"),
            input: String::from("tile.txt"),
            output: String::from("sheet.pdf"),
            fonts: FontPaths {
                regular: String::from("fonts/parkside-light.otf"),
                bold: String::from("fonts/parkside-bold.otf"),
                marks: String::from("fonts/minion-italic.otf"),
            },
        }
    }

    /// Builds the project: loads the assets, generates the sheet and writes
    /// it to the output file.
    pub fn build(&self) -> Result<()> {
        let content = fs::read_to_string(&self.input)?;

        // A trailing newline would count as an extra empty line and push the
        // text block off center.
        let text = content.trim_end_matches('\n');

        let warnings = check_markup(text);
        if !warnings.is_empty() {
            let warnings = Warnings {
                path: PathBuf::from(&self.input),
                content: String::from(text),
                warnings,
            };
            eprint!("{}", warnings);
        }

        info!(
            "generating a tile from {} lines, {} visible characters",
            line_count(text),
            visible_len(text)
        );

        let assets = AssetStore::load(self)?;
        let bytes = document::generate(&assets, text)?;

        fs::write(&self.output, &bytes)?;
        info!("sheet written to {}", self.output);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Config;

    #[test]
    fn config_round_trips_through_toml() {
        let config = Config::with_title("mijn-tegel");
        let serialized = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(parsed.title, config.title);
        assert_eq!(parsed.source, config.source);
        assert_eq!(parsed.fonts.marks, config.fonts.marks);
    }
}
