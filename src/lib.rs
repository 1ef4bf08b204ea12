pub mod assets;
pub mod docx;
mod error;
mod fonts;
pub mod model;
pub mod pdf;

pub use assets::ImageAssets;
pub use error::Error;
pub use fonts::FontStyle;
pub use model::{BlockOrder, ContentTree};

use std::io::{Read, Seek};
use std::path::Path;
use std::time::Instant;

use docx::package::DocxPackage;

#[derive(Clone, Copy, Debug, Default)]
pub struct ConvertOptions {
    pub order: BlockOrder,
}

pub fn convert_docx_to_pdf(input: &Path, output: &Path) -> Result<(), Error> {
    convert_with_options(input, output, &ConvertOptions::default())
}

pub fn convert_with_options(
    input: &Path,
    output: &Path,
    options: &ConvertOptions,
) -> Result<(), Error> {
    convert_package(DocxPackage::open(input)?, output, options)
}

pub fn convert_docx_bytes_to_pdf(input: &[u8], output: &Path) -> Result<(), Error> {
    convert_package(
        DocxPackage::new(std::io::Cursor::new(input))?,
        output,
        &ConvertOptions::default(),
    )
}

/// Parse a DOCX file and extract its media without rendering.
///
/// The returned assets own the extracted files; they are deleted on drop.
pub fn load_docx(input: &Path) -> Result<(ContentTree, ImageAssets), Error> {
    let mut package = DocxPackage::open(input)?;
    let tree = docx::parse_content(&package.content_part()?)?;
    let assets = package.extract_media()?;
    Ok((tree, assets))
}

fn convert_package<R: Read + Seek>(
    mut package: DocxPackage<R>,
    output: &Path,
    options: &ConvertOptions,
) -> Result<(), Error> {
    let t0 = Instant::now();

    let content = package.content_part()?;
    let tree = docx::parse_content(&content)?;
    let t_parse = t0.elapsed();

    // Extracted images live in a temp dir owned by `assets` and are removed
    // when it drops, on success and on every error path below.
    let assets = package.extract_media()?;
    let t_extract = t0.elapsed();

    let written = pdf::render_to_path(&tree, &assets, options.order, output)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: parse={:.1}ms, extract={:.1}ms, render+write={:.1}ms, total={:.1}ms (output {} bytes)",
        t_parse.as_secs_f64() * 1000.0,
        (t_extract - t_parse).as_secs_f64() * 1000.0,
        (t_total - t_extract).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        written,
    );

    Ok(())
}
