//! This module wraps the pdf documents that we read, modify and produce.

pub mod overlay;
pub mod sheet;

use std::collections::BTreeMap;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Object, ObjectId, Stream, StringFormat};

use crate::assets::AssetStore;
use crate::fonts::configuration::FontSet;
use crate::fonts::{winansi, FaceMetrics};
use crate::layout::Line;
use crate::units::Pt;
use crate::{Error, Result};

/// Builds a pdf real number object.
fn real(value: f64) -> Object {
    Object::Real(value as f32)
}

/// Reads a pdf number object as a float.
fn as_f64(object: &Object) -> Option<f64> {
    match object {
        Object::Integer(value) => Some(*value as f64),
        Object::Real(value) => Some(f64::from(*value)),
        _ => None,
    }
}

/// A page of another document captured as a reusable vector object, that can
/// be drawn several times without re-deriving its content.
pub struct EmbeddedPage {
    /// The name under which the object is registered in the page resources.
    name: String,

    /// The size of the embedded page, in pt.
    size: (Pt, Pt),
}

impl EmbeddedPage {
    /// Returns the size of the embedded page, in pt.
    pub fn size(&self) -> (Pt, Pt) {
        self.size
    }
}

/// This struct contains a single page pdf document.
pub struct Document {
    /// The inner document from lopdf.
    inner: lopdf::Document,

    /// The id of the page we're working on.
    page: ObjectId,

    /// The operations waiting to be flushed onto the page.
    ops: Vec<Operation>,

    /// The number of fonts embedded so far, used to name font resources.
    font_count: usize,

    /// The number of pages embedded so far, used to name xobject resources.
    xobject_count: usize,
}

impl Document {
    /// Creates a new blank pdf document with a single page of the given size.
    pub fn new(width: Pt, height: Pt) -> Document {
        let mut inner = lopdf::Document::with_version("1.5");

        let pages_id = inner.new_object_id();

        let page_id = inner.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Resources" => dictionary! {},
        });

        inner.set_object(
            pages_id,
            dictionary! {
                "Type" => "Pages",
                "Count" => 1,
                "Kids" => vec![page_id.into()],
                "MediaBox" => vec![0.into(), 0.into(), real(width.0), real(height.0)],
            },
        );

        let catalog_id = inner.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        inner.trailer.set("Root", catalog_id);

        Document {
            inner,
            page: page_id,
            ops: Vec::new(),
            font_count: 0,
            xobject_count: 0,
        }
    }

    /// Loads a document from its serialized bytes and finds its first page.
    ///
    /// Only the first page is ever worked on: documents with more pages keep
    /// them untouched.
    pub fn load(bytes: &[u8]) -> Result<Document> {
        let inner = lopdf::Document::load_mem(bytes)?;
        let page = inner.page_iter().next().ok_or(Error::MissingPage)?;

        Ok(Document {
            inner,
            page,
            ops: Vec::new(),
            font_count: 0,
            xobject_count: 0,
        })
    }

    /// Returns the size of the page, in pt.
    pub fn page_size(&self) -> Result<(Pt, Pt)> {
        let page = self.inner.get_dictionary(self.page)?;

        match self.media_box(page) {
            Some(size) => Ok(size),
            None => {
                warn!("no media box found on the page, falling back to letter size");
                Ok((Pt(612.0), Pt(792.0)))
            }
        }
    }

    /// Looks up the media box of a page, following references and the page
    /// tree parent if needed.
    fn media_box(&self, page: &Dictionary) -> Option<(Pt, Pt)> {
        let object = match page.get(b"MediaBox") {
            Ok(object) => object,
            Err(_) => match page.get(b"Parent") {
                Ok(Object::Reference(parent)) => self
                    .inner
                    .get_dictionary(*parent)
                    .ok()
                    .and_then(|parent| parent.get(b"MediaBox").ok())?,
                _ => return None,
            },
        };

        let array = match object {
            Object::Array(array) => array.clone(),
            Object::Reference(id) => match self.inner.get_object(*id).ok()? {
                Object::Array(array) => array.clone(),
                _ => return None,
            },
            _ => return None,
        };

        if array.len() < 4 {
            return None;
        }

        let x1 = as_f64(&array[0])?;
        let y1 = as_f64(&array[1])?;
        let x2 = as_f64(&array[2])?;
        let y2 = as_f64(&array[3])?;

        Some((Pt((x2 - x1).abs()), Pt((y2 - y1).abs())))
    }

    /// Embeds a font program into the document and registers it in the page
    /// resources.
    ///
    /// The font is embedded as a simple WinAnsi encoded font, with cff
    /// outlines going to a FontFile3 stream and truetype outlines to a
    /// FontFile2 one.
    pub fn embed_font(&mut self, bytes: &[u8], metrics: &FaceMetrics) -> Result<String> {
        let mut file = Stream::new(
            dictionary! {
                "Length1" => bytes.len() as i64,
            },
            bytes.to_vec(),
        );
        if metrics.cff {
            file.dict.set("Subtype", "OpenType");
        }
        let file_id = self.inner.add_object(file);

        let mut descriptor = dictionary! {
            "Type" => "FontDescriptor",
            "FontName" => metrics.base_name.as_str(),
            "Flags" => 32,
            "FontBBox" => metrics.bbox.iter().map(|v| real(*v)).collect::<Vec<Object>>(),
            "ItalicAngle" => 0,
            "Ascent" => real(metrics.ascent),
            "Descent" => real(metrics.descent),
            "CapHeight" => real(metrics.cap_height),
            "StemV" => 80,
        };
        descriptor.set(
            if metrics.cff { "FontFile3" } else { "FontFile2" },
            Object::Reference(file_id),
        );
        let descriptor_id = self.inner.add_object(descriptor);

        let font_id = self.inner.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => if metrics.cff { "Type1" } else { "TrueType" },
            "BaseFont" => metrics.base_name.as_str(),
            "FirstChar" => 32,
            "LastChar" => 255,
            "Widths" => metrics.widths.iter().map(|w| real(*w)).collect::<Vec<Object>>(),
            "FontDescriptor" => descriptor_id,
            "Encoding" => "WinAnsiEncoding",
        });

        self.font_count += 1;
        let name = format!("Tg{}", self.font_count);
        self.add_resource("Font", &name, font_id)?;

        Ok(name)
    }

    /// Captures the first page of another document as a form xobject of this
    /// document.
    ///
    /// This is done once per source page; the returned handle can then be
    /// drawn any number of times, and every draw reuses the exact same
    /// object.
    pub fn embed_page(&mut self, source: &Document) -> Result<EmbeddedPage> {
        let (width, height) = source.page_size()?;
        let content = source.inner.get_page_content(source.page)?;
        let page = source.inner.get_dictionary(source.page)?;

        let mut map = BTreeMap::new();
        let resources = match page.get(b"Resources") {
            Ok(object) => self.import_object(&source.inner, object, &mut map)?,
            Err(_) => Object::Dictionary(Dictionary::new()),
        };

        let mut dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Form",
            "FormType" => 1,
            "BBox" => vec![0.into(), 0.into(), real(width.0), real(height.0)],
        };
        dict.set("Resources", resources);

        let xobject_id = self.inner.add_object(Stream::new(dict, content));

        self.xobject_count += 1;
        let name = format!("Fm{}", self.xobject_count);
        self.add_resource("XObject", &name, xobject_id)?;

        Ok(EmbeddedPage {
            name,
            size: (width, height),
        })
    }

    /// Recursively copies an object coming from another document, renumbering
    /// every reference it holds.
    fn import_object(
        &mut self,
        source: &lopdf::Document,
        object: &Object,
        map: &mut BTreeMap<ObjectId, ObjectId>,
    ) -> Result<Object> {
        let imported = match object {
            Object::Reference(id) => {
                if let Some(mapped) = map.get(id) {
                    return Ok(Object::Reference(*mapped));
                }

                // Reserve the new id before recursing so that reference
                // cycles terminate.
                let new_id = self.inner.new_object_id();
                map.insert(*id, new_id);

                let resolved = source.get_object(*id)?;
                let copied = self.import_object(source, resolved, map)?;
                self.inner.set_object(new_id, copied);

                Object::Reference(new_id)
            }

            Object::Dictionary(dict) => {
                let mut copied = Dictionary::new();
                for (key, value) in dict.iter() {
                    copied.set(key.clone(), self.import_object(source, value, map)?);
                }
                Object::Dictionary(copied)
            }

            Object::Array(array) => Object::Array(
                array
                    .iter()
                    .map(|item| self.import_object(source, item, map))
                    .collect::<Result<Vec<Object>>>()?,
            ),

            Object::Stream(stream) => {
                let mut copied = Dictionary::new();
                for (key, value) in stream.dict.iter() {
                    copied.set(key.clone(), self.import_object(source, value, map)?);
                }
                Object::Stream(Stream::new(copied, stream.content.clone()))
            }

            other => other.clone(),
        };

        Ok(imported)
    }

    /// Writes a measured line of text on the page, starting at the given
    /// position and advancing the cursor by each run's width.
    pub fn write_line(&mut self, line: &Line, fonts: &FontSet, x: Pt, y: Pt, size: Pt) {
        let mut cursor = x;

        self.ops.push(Operation::new("BT", vec![]));
        self.ops
            .push(Operation::new("rg", vec![real(0.0), real(0.0), real(0.0)]));

        for run in &line.runs {
            let font = fonts.for_class(run.class);

            self.ops.push(Operation::new(
                "Tf",
                vec![
                    Object::Name(font.resource().as_bytes().to_vec()),
                    real(size.0),
                ],
            ));
            self.ops.push(Operation::new(
                "Tm",
                vec![
                    real(1.0),
                    real(0.0),
                    real(0.0),
                    real(1.0),
                    real(cursor.0),
                    real(y.0),
                ],
            ));
            self.ops.push(Operation::new(
                "Tj",
                vec![Object::String(
                    winansi::encode(&run.text),
                    StringFormat::Literal,
                )],
            ));

            cursor += run.width;
        }

        self.ops.push(Operation::new("ET", vec![]));
    }

    /// Draws an embedded page at the given position, uniformly scaled.
    ///
    /// Drawing never touches the embedded object itself, so the same handle
    /// can be drawn again and again.
    pub fn draw_embedded(&mut self, embedded: &EmbeddedPage, x: Pt, y: Pt, scale: f64) {
        self.ops.push(Operation::new("q", vec![]));
        self.ops.push(Operation::new(
            "cm",
            vec![
                real(scale),
                real(0.0),
                real(0.0),
                real(scale),
                real(x.0),
                real(y.0),
            ],
        ));
        self.ops.push(Operation::new(
            "Do",
            vec![Object::Name(embedded.name.as_bytes().to_vec())],
        ));
        self.ops.push(Operation::new("Q", vec![]));
    }

    /// Flushes the pending operations onto the page, on top of whatever
    /// content it already has, and serializes the document.
    pub fn save(mut self) -> Result<Vec<u8>> {
        if !self.ops.is_empty() {
            let content = Content {
                operations: self.ops,
            };
            let stream_id = self
                .inner
                .add_object(Stream::new(dictionary! {}, content.encode()?));

            let mut page = self.inner.get_dictionary(self.page)?.clone();
            let contents = match page.get(b"Contents") {
                Ok(Object::Reference(id)) => match self.inner.get_object(*id) {
                    Ok(Object::Array(array)) => {
                        let mut array = array.clone();
                        array.push(stream_id.into());
                        array
                    }
                    _ => vec![Object::Reference(*id), stream_id.into()],
                },
                Ok(Object::Array(array)) => {
                    let mut array = array.clone();
                    array.push(stream_id.into());
                    array
                }
                _ => vec![stream_id.into()],
            };
            page.set("Contents", contents);
            self.inner.set_object(self.page, page);
        }

        self.inner.compress();

        let mut buffer = Vec::new();
        self.inner.save_to(&mut buffer)?;
        Ok(buffer)
    }

    /// Registers a resource of the given kind under the page resources,
    /// creating the dictionaries on the way if needed.
    fn add_resource(&mut self, kind: &str, name: &str, id: ObjectId) -> Result<()> {
        let page = self.inner.get_dictionary(self.page)?.clone();

        let (target, mut resources) = match page.get(b"Resources") {
            Ok(Object::Reference(reference)) => {
                (Some(*reference), self.inner.get_dictionary(*reference)?.clone())
            }
            Ok(Object::Dictionary(dictionary)) => (None, dictionary.clone()),
            _ => (None, Dictionary::new()),
        };

        let mut entries = match resources.get(kind.as_bytes()) {
            Ok(Object::Reference(reference)) => self.inner.get_dictionary(*reference)?.clone(),
            Ok(Object::Dictionary(dictionary)) => dictionary.clone(),
            _ => Dictionary::new(),
        };

        entries.set(name, id);
        resources.set(kind, entries);

        match target {
            Some(reference) => {
                self.inner.set_object(reference, resources);
            }
            None => {
                let mut page = page;
                page.set("Resources", resources);
                self.inner.set_object(self.page, page);
            }
        }

        Ok(())
    }
}

/// Runs the whole generation pipeline: overlays the text onto the base tile
/// and composes the final print sheet.
pub fn generate(assets: &AssetStore, text: &str) -> Result<Vec<u8>> {
    let overlaid = overlay::composite(assets, text)?;
    sheet::compose_sheet(&overlaid)
}
