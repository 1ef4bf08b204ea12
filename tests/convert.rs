mod common;

use common::{
    build_docx, build_zip, count_operator, document_xml, image_relationships, inline_drawing,
    page_operations, paragraph, png_bytes, shown_text,
};
use docxlite_pdf::{BlockOrder, ConvertOptions, Error};

fn write_input(dir: &tempfile::TempDir, bytes: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join("input.docx");
    std::fs::write(&path, bytes).unwrap();
    path
}

fn docx_with_image(body: &str) -> Vec<u8> {
    let xml = document_xml(body);
    let rels = image_relationships(&[("rId5", "media/image1.png")]);
    let png = png_bytes(4, 3);
    build_zip(&[
        ("word/document.xml", xml.as_bytes()),
        ("word/_rels/document.xml.rels", rels.as_bytes()),
        ("word/media/image1.png", &png),
    ])
}

#[test]
fn converts_paragraphs_and_tables() {
    let _ = env_logger::try_init();
    let dir = tempfile::tempdir().unwrap();
    let body = format!(
        r#"{}<w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:r><w:rPr><w:b/><w:color w:val="FF0000"/></w:rPr><w:t>Hello, </w:t></w:r><w:r><w:rPr><w:i/></w:rPr><w:t>world.</w:t></w:r></w:p>
<w:tbl><w:tr><w:tc><w:p><w:r><w:t>A</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>B</w:t></w:r></w:p></w:tc></w:tr>
<w:tr><w:tc><w:p><w:r><w:t>C</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>D</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#,
        paragraph("Title")
    );
    let input = write_input(&dir, &build_docx(&body));
    let output = dir.path().join("out.pdf");

    docxlite_pdf::convert_docx_to_pdf(&input, &output).unwrap();

    let pdf = std::fs::read(&output).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
    let pages = page_operations(&pdf);
    assert_eq!(pages.len(), 1);
    assert_eq!(
        shown_text(&pages[0]),
        vec!["Title", "Hello, ", "world.", "A", "B", "C", "D"]
    );
    // One bordered rectangle per table cell.
    assert_eq!(count_operator(&pages[0], "re"), 4);
}

#[test]
fn long_documents_flow_onto_new_pages() {
    let dir = tempfile::tempdir().unwrap();
    let body: String = (0..60).map(|i| paragraph(&format!("line {i}"))).collect();
    let input = write_input(&dir, &build_docx(&body));
    let output = dir.path().join("out.pdf");

    docxlite_pdf::convert_docx_to_pdf(&input, &output).unwrap();

    let pages = page_operations(&std::fs::read(&output).unwrap());
    assert_eq!(pages.len(), 3);
    let total: usize = pages.iter().map(|ops| shown_text(ops).len()).sum();
    assert_eq!(total, 60);
    assert_eq!(shown_text(&pages[1])[0], "line 27");
}

#[test]
fn images_resolve_through_relationships() {
    let dir = tempfile::tempdir().unwrap();
    let body = format!("<w:p><w:r>{}</w:r></w:p>", inline_drawing("rId5"));
    let input = write_input(&dir, &docx_with_image(&body));
    let output = dir.path().join("out.pdf");

    docxlite_pdf::convert_docx_to_pdf(&input, &output).unwrap();

    let pages = page_operations(&std::fs::read(&output).unwrap());
    assert_eq!(count_operator(&pages[0], "Do"), 1);
}

#[test]
fn missing_media_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let body = format!("{}<w:p><w:r>{}</w:r></w:p>", paragraph("text"), inline_drawing("rId99"));
    let input = write_input(&dir, &docx_with_image(&body));
    let output = dir.path().join("out.pdf");

    docxlite_pdf::convert_docx_to_pdf(&input, &output).unwrap();

    let pages = page_operations(&std::fs::read(&output).unwrap());
    assert_eq!(count_operator(&pages[0], "Do"), 0);
    assert_eq!(shown_text(&pages[0]), vec!["text"]);
}

#[test]
fn extracted_media_is_removed_after_use() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, &docx_with_image(&paragraph("x")));

    let (tree, assets) = docxlite_pdf::load_docx(&input).unwrap();
    assert_eq!(tree.paragraphs().count(), 1);
    let storage = assets.storage_dir().unwrap().to_path_buf();
    let image = assets.lookup_embed("rId5").unwrap().to_path_buf();
    assert_eq!(assets.get("word/media/image1.png"), Some(image.as_path()));
    assert!(image.starts_with(&storage));
    assert!(image.exists());

    drop(assets);
    assert!(!storage.exists());
}

#[test]
fn same_input_gives_identical_output() {
    let dir = tempfile::tempdir().unwrap();
    let body = format!(
        "{}<w:p><w:r>{}</w:r></w:p><w:tbl><w:tr><w:tc><w:p><w:r><w:t>cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>",
        paragraph("repeat"),
        inline_drawing("rId5")
    );
    let input = write_input(&dir, &docx_with_image(&body));
    let output = dir.path().join("out.pdf");

    docxlite_pdf::convert_docx_to_pdf(&input, &output).unwrap();
    let first = std::fs::read(&output).unwrap();
    docxlite_pdf::convert_docx_to_pdf(&input, &output).unwrap();
    let second = std::fs::read(&output).unwrap();
    assert_eq!(first, second);
}

#[test]
fn grouped_order_renders_tables_after_paragraphs() {
    let dir = tempfile::tempdir().unwrap();
    let body = format!(
        "<w:tbl><w:tr><w:tc><w:p><w:r><w:t>cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>{}",
        paragraph("after")
    );
    let input = write_input(&dir, &build_docx(&body));
    let output = dir.path().join("out.pdf");
    let options = ConvertOptions {
        order: BlockOrder::Grouped,
    };

    docxlite_pdf::convert_with_options(&input, &output, &options).unwrap();
    let pages = page_operations(&std::fs::read(&output).unwrap());
    assert_eq!(shown_text(&pages[0]), vec!["after", "cell"]);

    docxlite_pdf::convert_docx_to_pdf(&input, &output).unwrap();
    let pages = page_operations(&std::fs::read(&output).unwrap());
    assert_eq!(shown_text(&pages[0]), vec!["cell", "after"]);
}

#[test]
fn bytes_entry_point_matches_file_entry_point() {
    let dir = tempfile::tempdir().unwrap();
    let docx = build_docx(&paragraph("bytes"));
    let input = write_input(&dir, &docx);
    let from_file = dir.path().join("a.pdf");
    let from_bytes = dir.path().join("b.pdf");

    docxlite_pdf::convert_docx_to_pdf(&input, &from_file).unwrap();
    docxlite_pdf::convert_docx_bytes_to_pdf(&docx, &from_bytes).unwrap();
    assert_eq!(
        std::fs::read(from_file).unwrap(),
        std::fs::read(from_bytes).unwrap()
    );
}

#[test]
fn missing_input_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = docxlite_pdf::convert_docx_to_pdf(
        &dir.path().join("nope.docx"),
        &dir.path().join("out.pdf"),
    )
    .unwrap_err();
    assert!(matches!(err, Error::Io(_)), "{err:?}");
}

#[test]
fn non_zip_input_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, b"this is not a zip archive");
    let err = docxlite_pdf::convert_docx_to_pdf(&input, &dir.path().join("out.pdf")).unwrap_err();
    assert!(matches!(err, Error::InvalidDocx(_)), "{err:?}");
}

#[test]
fn archive_without_content_part_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, &build_zip(&[("word/styles.xml", b"<styles/>")]));
    let output = dir.path().join("out.pdf");
    let err = docxlite_pdf::convert_docx_to_pdf(&input, &output).unwrap_err();
    assert!(matches!(err, Error::MissingContentPart), "{err:?}");
    assert!(!output.exists());
}

#[test]
fn malformed_content_part_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        &dir,
        &build_zip(&[("word/document.xml", b"<w:document><unclosed>")]),
    );
    let err = docxlite_pdf::convert_docx_to_pdf(&input, &dir.path().join("out.pdf")).unwrap_err();
    assert!(matches!(err, Error::Xml(_)), "{err:?}");
}

#[test]
fn unwritable_output_is_a_render_write_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, &build_docx(&paragraph("x")));
    let output = dir.path().join("missing-dir").join("out.pdf");
    let err = docxlite_pdf::convert_docx_to_pdf(&input, &output).unwrap_err();
    match err {
        Error::RenderWrite { path, .. } => assert_eq!(path, output),
        other => panic!("unexpected error: {other:?}"),
    }
}
