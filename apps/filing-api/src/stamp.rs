//! Bates stamping over finished PDFs.
//!
//! Implements the compiler's `BatesStamper` seam with lopdf: each page gets
//! an appended content stream drawing the sequential label near the
//! bottom-right corner, below the compiler's own footer band.

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use filing_compiler::{BatesConfig, BatesStamper, StampError};

const STAMP_SIZE: f64 = 9.0;
const STAMP_BASELINE: f64 = 20.0;
const STAMP_RIGHT_INSET: f64 = 150.0;

pub struct LopdfBatesStamper;

impl BatesStamper for LopdfBatesStamper {
    fn stamp(&self, pdf: &[u8], config: &BatesConfig) -> Result<Vec<u8>, StampError> {
        let mut doc = Document::load_mem(pdf).map_err(|e| StampError(e.to_string()))?;

        let mut font = Dictionary::new();
        font.set("Type", Object::Name(b"Font".to_vec()));
        font.set("Subtype", Object::Name(b"Type1".to_vec()));
        font.set("BaseFont", Object::Name(b"Helvetica".to_vec()));
        let font_id = doc.add_object(Object::Dictionary(font));

        let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
        for (index, page_id) in page_ids.into_iter().enumerate() {
            let width = page_width(&doc, page_id);
            let label = config.label(index);
            let ops = format!(
                "BT /FB {} Tf {:.2} {:.2} Td ({}) Tj ET",
                STAMP_SIZE,
                (width - STAMP_RIGHT_INSET).max(0.0),
                STAMP_BASELINE,
                escape_literal(&label),
            );
            let content_id = doc.add_object(Object::Stream(Stream::new(
                Dictionary::new(),
                ops.into_bytes(),
            )));

            let mut indirect_resources: Option<ObjectId> = None;
            {
                let page = doc
                    .get_object_mut(page_id)
                    .and_then(Object::as_dict_mut)
                    .map_err(|e| StampError(e.to_string()))?;

                let contents = match page.get(b"Contents") {
                    Ok(Object::Reference(id)) => {
                        Object::Array(vec![Object::Reference(*id), Object::Reference(content_id)])
                    }
                    Ok(Object::Array(existing)) => {
                        let mut arr = existing.clone();
                        arr.push(Object::Reference(content_id));
                        Object::Array(arr)
                    }
                    _ => Object::Reference(content_id),
                };
                page.set("Contents", contents);

                match page.get(b"Resources") {
                    Ok(Object::Reference(id)) => indirect_resources = Some(*id),
                    Ok(Object::Dictionary(existing)) => {
                        let mut resources = existing.clone();
                        register_font(&mut resources, font_id);
                        page.set("Resources", resources);
                    }
                    _ => {
                        let mut resources = Dictionary::new();
                        register_font(&mut resources, font_id);
                        page.set("Resources", resources);
                    }
                }
            }

            if let Some(res_id) = indirect_resources {
                let resources = doc
                    .get_object_mut(res_id)
                    .and_then(Object::as_dict_mut)
                    .map_err(|e| StampError(e.to_string()))?;
                register_font(resources, font_id);
            }
        }

        let mut out = Vec::new();
        doc.save_to(&mut out)
            .map_err(|e| StampError(e.to_string()))?;
        Ok(out)
    }
}

fn register_font(resources: &mut Dictionary, font_id: ObjectId) {
    let mut fonts = match resources.get(b"Font") {
        Ok(Object::Dictionary(existing)) => existing.clone(),
        _ => Dictionary::new(),
    };
    fonts.set("FB", Object::Reference(font_id));
    resources.set("Font", fonts);
}

fn page_width(doc: &Document, page_id: ObjectId) -> f64 {
    doc.get_object(page_id)
        .ok()
        .and_then(|o| o.as_dict().ok())
        .and_then(|d| d.get(b"MediaBox").ok())
        .and_then(|o| o.as_array().ok())
        .and_then(|a| a.get(2))
        .and_then(as_number)
        .unwrap_or(612.0)
}

fn as_number(object: &Object) -> Option<f64> {
    match object {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(*r as f64),
        _ => None,
    }
}

fn escape_literal(text: &str) -> String {
    text.chars()
        .flat_map(|c| match c {
            '(' | ')' | '\\' => vec!['\\', c],
            _ => vec![c],
        })
        .collect()
}
