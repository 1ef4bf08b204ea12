mod canvas;
mod image;
mod mapper;
mod style;

use std::path::Path;

use crate::assets::ImageAssets;
use crate::error::Error;
use crate::model::{BlockOrder, ContentTree};

pub use canvas::{MARGIN, PAGE_HEIGHT, PAGE_WIDTH, PdfCanvas};
pub use mapper::{
    Advance, Cell, IMAGE_HEIGHT, IMAGE_WIDTH, IMAGE_X, IMAGE_Y, Instruction, PARAGRAPH_SPACING,
    TABLE_CELL_HEIGHT, TABLE_CELL_WIDTH, TABLE_FONT_SIZE, TEXT_CELL_HEIGHT, map_document,
};
pub use style::{
    CellAlign, DEFAULT_FONT_SIZE, DEFAULT_TEXT_COLOR, MAX_FONT_SIZE, RunStyle, parse_hex_color,
    resolve_color, resolve_font_size,
};

fn draw(tree: &ContentTree, assets: &ImageAssets, order: BlockOrder) -> Result<PdfCanvas, Error> {
    let instructions = map_document(tree, assets, order);
    let mut canvas = PdfCanvas::new();
    canvas.execute(&instructions)?;
    log::info!(
        "Rendered {} instructions onto {} page(s)",
        instructions.len(),
        canvas.page_count(),
    );
    Ok(canvas)
}

/// Map the tree and render it to PDF bytes.
pub fn render(
    tree: &ContentTree,
    assets: &ImageAssets,
    order: BlockOrder,
) -> Result<Vec<u8>, Error> {
    Ok(draw(tree, assets, order)?.finish())
}

/// Map the tree, render it and write the PDF to `output`. Returns the byte count.
pub fn render_to_path(
    tree: &ContentTree,
    assets: &ImageAssets,
    order: BlockOrder,
    output: &Path,
) -> Result<usize, Error> {
    draw(tree, assets, order)?.save(output)
}
