//! Composing the final print sheet from the overlaid tile page.
//!
//! The overlaid page is embedded once as a vector object and drawn twice,
//! side by side, on a fixed size landscape sheet. Both placements share the
//! same object, the same scale and the same vertical position: they can only
//! differ by their horizontal offset.

use crate::document::Document;
use crate::layout::constants::{SHEET_HEIGHT, SHEET_WIDTH};
use crate::units::Pt;
use crate::Result;

/// Computes the uniform scale factor that fits a source page into a target
/// cell while preserving its aspect ratio.
///
/// The scaled page never exceeds the cell in either direction, and exactly
/// fills it in at least one.
pub fn fit_scale(source: (Pt, Pt), target: (Pt, Pt)) -> f64 {
    let scale_x = target.0 .0 / source.0 .0;
    let scale_y = target.1 .0 / source.1 .0;
    scale_x.min(scale_y)
}

/// Loads the overlaid page and places it twice, side by side, on a new
/// landscape sheet.
pub fn compose_sheet(overlaid: &[u8]) -> Result<Vec<u8>> {
    let source = Document::load(overlaid)?;

    let mut sheet = Document::new(SHEET_WIDTH, SHEET_HEIGHT);
    let embedded = sheet.embed_page(&source)?;

    let (source_width, source_height) = embedded.size();
    let scale = fit_scale(
        (source_width, source_height),
        (SHEET_WIDTH / 2.0, SHEET_HEIGHT),
    );

    let scaled_width = source_width * scale;
    let scaled_height = source_height * scale;

    // Both copies are aligned at the very top of the sheet.
    let y = SHEET_HEIGHT - scaled_height;
    let left_x = SHEET_WIDTH / 4.0 - scaled_width / 2.0;
    let right_x = 3.0 * SHEET_WIDTH / 4.0 - scaled_width / 2.0;

    sheet.draw_embedded(&embedded, left_x, y, scale);
    sheet.draw_embedded(&embedded, right_x, y, scale);

    sheet.save()
}

#[cfg(test)]
mod tests {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    use crate::document::sheet::{compose_sheet, fit_scale};
    use crate::document::Document;
    use crate::units::{nearly_equal, Pt};

    /// Builds a one page document with a filled rectangle on it.
    fn synthetic_page(width: f32, height: f32) -> Vec<u8> {
        let mut doc = lopdf::Document::with_version("1.5");

        let pages_id = doc.new_object_id();

        let content = Content {
            operations: vec![
                Operation::new("rg", vec![1.into(), 0.into(), 0.into()]),
                Operation::new("re", vec![10.into(), 10.into(), 100.into(), 50.into()]),
                Operation::new("f", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => dictionary! {},
        });

        doc.set_object(
            pages_id,
            dictionary! {
                "Type" => "Pages",
                "Count" => 1,
                "Kids" => vec![page_id.into()],
                "MediaBox" => vec![
                    0.into(),
                    0.into(),
                    Object::Real(width),
                    Object::Real(height)
                ],
            },
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    /// Reads a pdf number operand as a float.
    fn operand(operation: &Operation, index: usize) -> f64 {
        match &operation.operands[index] {
            Object::Integer(value) => *value as f64,
            Object::Real(value) => f64::from(*value),
            other => panic!("expected a number, got {:?}", other),
        }
    }

    #[test]
    fn scale_is_bounded_by_the_narrow_direction() {
        // A tall page is bounded by the cell height.
        let scale = fit_scale((Pt(500.0), Pt(1000.0)), (Pt(421.0), Pt(595.0)));
        assert!(nearly_equal(scale, 0.595));

        // A wide page is bounded by the cell width.
        let scale = fit_scale((Pt(1000.0), Pt(500.0)), (Pt(421.0), Pt(595.0)));
        assert!(nearly_equal(scale, 0.421));
    }

    #[test]
    fn scaled_page_exactly_fills_one_direction() {
        let source = (Pt(500.0), Pt(700.0));
        let target = (Pt(421.0), Pt(595.0));
        let scale = fit_scale(source, target);

        let scaled = (source.0 .0 * scale, source.1 .0 * scale);
        assert!(scaled.0 <= target.0 .0 + 1e-9);
        assert!(scaled.1 <= target.1 .0 + 1e-9);
        assert!(nearly_equal(scaled.0, target.0 .0) || nearly_equal(scaled.1, target.1 .0));
    }

    #[test]
    fn sheet_holds_two_identical_placements() {
        let bytes = compose_sheet(&synthetic_page(500.0, 700.0)).unwrap();

        let sheet = Document::load(&bytes).unwrap();
        let (width, height) = sheet.page_size().unwrap();
        assert!(nearly_equal(width.0, 842.0));
        assert!(nearly_equal(height.0, 595.0));

        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        let page_id = doc.page_iter().next().unwrap();
        let content = doc.get_page_content(page_id).unwrap();
        let operations = Content::decode(&content).unwrap().operations;

        let draws: Vec<&Operation> = operations
            .iter()
            .filter(|operation| operation.operator == "Do")
            .collect();
        assert_eq!(draws.len(), 2);
        assert_eq!(draws[0].operands, draws[1].operands);

        let matrices: Vec<&Operation> = operations
            .iter()
            .filter(|operation| operation.operator == "cm")
            .collect();
        assert_eq!(matrices.len(), 2);

        // Same scale and same vertical position for both placements.
        assert!(nearly_equal(operand(matrices[0], 0), operand(matrices[1], 0)));
        assert!(nearly_equal(operand(matrices[0], 3), operand(matrices[1], 3)));
        assert!(nearly_equal(operand(matrices[0], 5), operand(matrices[1], 5)));

        // The horizontal offsets differ by exactly half the sheet width.
        let left = operand(matrices[0], 4);
        let right = operand(matrices[1], 4);
        assert!(nearly_equal(right - left, 421.0));
    }

    #[test]
    fn placements_follow_the_source_geometry() {
        let bytes = compose_sheet(&synthetic_page(500.0, 700.0)).unwrap();

        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        let page_id = doc.page_iter().next().unwrap();
        let content = doc.get_page_content(page_id).unwrap();
        let operations = Content::decode(&content).unwrap().operations;

        let matrices: Vec<&Operation> = operations
            .iter()
            .filter(|operation| operation.operator == "cm")
            .collect();

        // scale = min(421 / 500, 595 / 700) = 0.842, so the scaled page is
        // 421 x 589.4 and sits at the top of the sheet.
        let scale = operand(matrices[0], 0);
        assert!(nearly_equal(scale, 0.842));
        assert!(operand(matrices[0], 4).abs() < 1e-4);
        assert!(nearly_equal(operand(matrices[0], 5), 595.0 - 589.4));
        assert!(nearly_equal(operand(matrices[1], 4), 421.0));
    }
}
