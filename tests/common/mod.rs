#![allow(dead_code)]

use std::io::{Cursor, Write};

use docxlite_pdf::pdf::{Cell, Instruction};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const DOCUMENT_OPEN: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"
  xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"
  xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing"
  xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"
  xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture">"#;

/// Wrap body content in a `w:document` with the usual namespace prefixes.
pub fn document_xml(body: &str) -> String {
    format!("{DOCUMENT_OPEN}<w:body>{body}</w:body></w:document>")
}

pub fn paragraph(text: &str) -> String {
    format!("<w:p><w:r><w:t>{text}</w:t></w:r></w:p>")
}

/// An inline drawing whose blip embeds `embed`.
pub fn inline_drawing(embed: &str) -> String {
    format!(
        r#"<w:drawing><wp:inline><wp:extent cx="914400" cy="914400"/>
<a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture">
<pic:pic><pic:blipFill><a:blip r:embed="{embed}"/></pic:blipFill></pic:pic>
</a:graphicData></a:graphic></wp:inline></w:drawing>"#
    )
}

pub fn image_relationships(pairs: &[(&str, &str)]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for (id, target) in pairs {
        xml.push_str(&format!(
            r#"<Relationship Id="{id}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="{target}"/>"#
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

/// Build a DOCX archive in memory from `(entry name, bytes)` pairs.
pub fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip_data = Vec::new();
    {
        let mut writer = ZipWriter::new(Cursor::new(&mut zip_data));
        let options = SimpleFileOptions::default();
        for (name, data) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap();
    }
    zip_data
}

pub fn build_docx(body: &str) -> Vec<u8> {
    let xml = document_xml(body);
    build_zip(&[("word/document.xml", xml.as_bytes())])
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([200, 30, 30]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

pub fn cells(instructions: &[Instruction]) -> Vec<&Cell> {
    instructions
        .iter()
        .filter_map(|i| match i {
            Instruction::Cell(c) => Some(c),
            _ => None,
        })
        .collect()
}

pub fn image_count(instructions: &[Instruction]) -> usize {
    instructions
        .iter()
        .filter(|i| matches!(i, Instruction::Image { .. }))
        .count()
}

/// Decoded content-stream operations for every page of a PDF.
pub fn page_operations(pdf: &[u8]) -> Vec<Vec<lopdf::content::Operation>> {
    let doc = lopdf::Document::load_mem(pdf).expect("generated PDF should parse");
    doc.get_pages()
        .values()
        .map(|&page_id| {
            let data = doc.get_page_content(page_id).expect("page content");
            lopdf::content::Content::decode(&data)
                .expect("content stream should decode")
                .operations
        })
        .collect()
}

/// Strings shown with `Tj`, in stream order.
pub fn shown_text(ops: &[lopdf::content::Operation]) -> Vec<String> {
    ops.iter()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| match op.operands.first() {
            Some(lopdf::Object::String(bytes, _)) => Some(String::from_utf8_lossy(bytes).into_owned()),
            _ => None,
        })
        .collect()
}

pub fn count_operator(ops: &[lopdf::content::Operation], operator: &str) -> usize {
    ops.iter().filter(|op| op.operator == operator).count()
}
