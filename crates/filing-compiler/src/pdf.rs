//! PDF assembly with lopdf.
//!
//! Turns finished layout pages into a page tree with one content stream per
//! page. Text is drawn with the base-14 Times faces under WinAnsiEncoding;
//! rules are stroked paths; signature images become image XObjects.

use lopdf::{Dictionary, Document, Object, Stream};

use crate::error::CompileError;
use crate::fonts::Font;
use crate::image::{ImageKind, SignatureImage};
use crate::layout::{Layout, PageOps};

pub fn serialize(layout: &Layout) -> Result<Vec<u8>, CompileError> {
    let mut doc = Document::with_version("1.5");

    let pages_id = doc.new_object_id();

    // Shared font objects, WinAnsi encoded.
    let roman_id = doc.add_object(Object::Dictionary(font_dict(Font::TimesRoman)));
    let bold_id = doc.add_object(Object::Dictionary(font_dict(Font::TimesBold)));

    let mut page_ids = Vec::new();
    for page in &layout.pages {
        let content_id = doc.add_object(Object::Stream(Stream::new(
            Dictionary::new(),
            page_content(page),
        )));

        let mut fonts = Dictionary::new();
        fonts.set(Font::TimesRoman.resource_key(), Object::Reference(roman_id));
        fonts.set(Font::TimesBold.resource_key(), Object::Reference(bold_id));
        let mut resources = Dictionary::new();
        resources.set("Font", Object::Dictionary(fonts));

        if !page.images.is_empty() {
            let mut xobjects = Dictionary::new();
            for (i, op) in page.images.iter().enumerate() {
                let xobject_id = doc.add_object(Object::Stream(image_xobject(&op.image)));
                xobjects.set(format!("Im{}", i), Object::Reference(xobject_id));
            }
            resources.set("XObject", Object::Dictionary(xobjects));
        }

        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(pages_id));
        page_dict.set("Contents", Object::Reference(content_id));
        page_dict.set("Resources", Object::Dictionary(resources));
        page_dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(layout.geometry.width as f32),
                Object::Real(layout.geometry.height as f32),
            ]),
        );
        let page_id = doc.add_object(Object::Dictionary(page_dict));
        page_ids.push(page_id);
    }

    let mut pages_dict = Dictionary::new();
    pages_dict.set("Type", Object::Name(b"Pages".to_vec()));
    pages_dict.set("Count", Object::Integer(page_ids.len() as i64));
    pages_dict.set(
        "Kids",
        Object::Array(page_ids.iter().map(|&id| Object::Reference(id)).collect()),
    );
    doc.objects
        .insert(pages_id, Object::Dictionary(pages_dict));

    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));
    let catalog_id = doc.add_object(Object::Dictionary(catalog));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| CompileError::Pdf(e.to_string()))?;
    Ok(buffer)
}

fn font_dict(font: Font) -> Dictionary {
    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"Font".to_vec()));
    dict.set("Subtype", Object::Name(b"Type1".to_vec()));
    dict.set("BaseFont", Object::Name(font.base_name().as_bytes().to_vec()));
    dict.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));
    dict
}

fn page_content(page: &PageOps) -> Vec<u8> {
    let mut buf: Vec<u8> = Vec::new();
    for op in &page.texts {
        buf.extend_from_slice(
            format!(
                "BT /{} {} Tf {:.2} {:.2} Td ",
                op.font.resource_key(),
                op.size,
                op.x,
                op.y
            )
            .as_bytes(),
        );
        buf.extend_from_slice(&encode_pdf_string(&op.text));
        buf.extend_from_slice(b" Tj ET\n");
    }
    for rule in &page.rules {
        buf.extend_from_slice(
            format!(
                "0.75 w {:.2} {:.2} m {:.2} {:.2} l S\n",
                rule.x1, rule.y, rule.x2, rule.y
            )
            .as_bytes(),
        );
    }
    for (i, op) in page.images.iter().enumerate() {
        buf.extend_from_slice(
            format!(
                "q {:.2} 0 0 {:.2} {:.2} {:.2} cm /Im{} Do Q\n",
                op.width, op.height, op.x, op.y, i
            )
            .as_bytes(),
        );
    }
    buf
}

fn image_xobject(image: &SignatureImage) -> Stream {
    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Image".to_vec()));
    dict.set("Width", Object::Integer(image.width as i64));
    dict.set("Height", Object::Integer(image.height as i64));
    dict.set("BitsPerComponent", Object::Integer(8));

    match &image.kind {
        ImageKind::Jpeg(bytes) => {
            dict.set("ColorSpace", Object::Name(b"DeviceRGB".to_vec()));
            dict.set("Filter", Object::Name(b"DCTDecode".to_vec()));
            let mut stream = Stream::new(dict, bytes.clone());
            // DCT data is already compressed
            stream.dict.set("Length", Object::Integer(bytes.len() as i64));
            stream
        }
        ImageKind::Png { data, color } => {
            dict.set(
                "ColorSpace",
                Object::Name(color.color_space().as_bytes().to_vec()),
            );
            dict.set("Filter", Object::Name(b"FlateDecode".to_vec()));
            let mut parms = Dictionary::new();
            parms.set("Predictor", Object::Integer(15));
            parms.set("Colors", Object::Integer(color.components() as i64));
            parms.set("BitsPerComponent", Object::Integer(8));
            parms.set("Columns", Object::Integer(image.width as i64));
            dict.set("DecodeParms", Object::Dictionary(parms));
            Stream::new(dict, data.clone())
        }
    }
}

/// Encode text as a PDF string literal in WinAnsi, escaping delimiters.
fn encode_pdf_string(text: &str) -> Vec<u8> {
    let mut out = vec![b'('];
    for c in text.chars() {
        let b = winansi_byte(c);
        match b {
            b'(' | b')' | b'\\' => {
                out.push(b'\\');
                out.push(b);
            }
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\r' => out.extend_from_slice(b"\\r"),
            _ => out.push(b),
        }
    }
    out.push(b')');
    out
}

fn winansi_byte(c: char) -> u8 {
    match c {
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{00A7}' => 0xA7,
        c if (c as u32) < 0x80 => c as u8,
        _ => b'?',
    }
}
