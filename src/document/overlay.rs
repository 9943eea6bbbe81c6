//! Overlaying the tile text onto the base document.

use crate::assets::AssetStore;
use crate::document::Document;
use crate::fonts::manager::FontManager;
use crate::layout::constants::FONT_SIZE;
use crate::layout::lines::{baseline, block_start_y, line_start_x, measure_line};
use crate::layout::runs::segment_line;
use crate::layout::Line;
use crate::Result;

/// Draws the text onto the first page of the base tile document and returns
/// the serialized result.
///
/// The fonts and the document are loaded freshly on every call, so two
/// concurrent generations never share any handle. Nothing is returned unless
/// every step succeeded.
pub fn composite(assets: &AssetStore, text: &str) -> Result<Vec<u8>> {
    let mut document = Document::load(assets.source()?)?;
    let manager = FontManager::init(&mut document, assets)?;
    let fonts = manager.set();

    let (page_width, page_height) = document.page_size()?;

    let lines: Vec<Line> = text
        .split('\n')
        .map(|line| measure_line(&segment_line(line), &fonts, FONT_SIZE))
        .collect();

    debug!("overlaying {} lines on the base tile", lines.len());

    let start_y = block_start_y(page_height, lines.len());

    for (index, line) in lines.iter().enumerate() {
        let x = line_start_x(page_width, line.width);
        let y = baseline(start_y, index);
        document.write_line(line, &fonts, x, y, FONT_SIZE);
    }

    document.save()
}

#[cfg(test)]
mod tests {
    use crate::assets::AssetStore;
    use crate::document::overlay::composite;
    use crate::Error;

    #[test]
    fn generation_without_a_source_fails_fast() {
        let assets = AssetStore::new(Vec::new(), Vec::new(), Vec::new());
        match composite(&assets, "Nee!") {
            Err(Error::SourceNotLoaded) => (),
            _ => panic!("expected the source not loaded error"),
        }
    }
}
